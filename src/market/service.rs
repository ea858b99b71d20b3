use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::api::{ApiClient, Category, FEATURED_COUNT, Professional};
use crate::commands::{Command, CopyToClipboardCmd};
use crate::config::{GlobalAction, KeyResolver, MarketAction};
use crate::market::command::{
    FetchCategoriesCmd, FetchFeaturedCmd, FetchProfessionalsCmd, FetchReviewsCmd,
};
use crate::market::message::MarketMsg;
use crate::market::view::{HomeView, ProfessionalListView, ProfileView};
use crate::service::{Service, UpdateResult};
use crate::tui::Event;
use crate::ui::{Component, EventResult, Keybinding, Spinner};

/// Title shown on the professionals listing when the selected category is
/// not among the fetched categories.
const FALLBACK_LISTING_TITLE: &str = "Profesionales";

/// Current view of the marketplace.
enum State {
    /// A category-filtered fetch is in flight; the listing is hidden.
    Loading,
    Home(HomeView),
    Professionals(ProfessionalListView),
    Profile(ProfileView),
}

/// The marketplace browsing service.
///
/// Owns the tri-state view navigation (home, professionals, profile), the
/// cached collections behind it, and the fetches triggered on transition.
pub struct Marketplace {
    api: ApiClient,
    resolver: Arc<KeyResolver>,
    spinner: Spinner,
    state: State,
    /// Fetched once at startup; used for listing headers.
    categories: Vec<Category>,
    /// The shared professional collection: the featured subset on home, the
    /// filtered list on the listing. Replaced wholesale by every fetch.
    professionals: Vec<Professional>,
    selected_category: Option<String>,
    initial_category: Option<String>,
    msg_tx: UnboundedSender<MarketMsg>,
    msg_rx: UnboundedReceiver<MarketMsg>,
}

impl Marketplace {
    pub fn new(api: ApiClient, resolver: Arc<KeyResolver>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let home = HomeView::new(Vec::new(), Vec::new(), resolver.clone());
        Self {
            api,
            resolver,
            spinner: Spinner::new(),
            state: State::Home(home),
            categories: Vec::new(),
            professionals: Vec::new(),
            selected_category: None,
            initial_category: None,
            msg_tx,
            msg_rx,
        }
    }

    /// Category to jump into right after startup (from the CLI).
    pub fn set_initial_category(&mut self, category: String) {
        self.initial_category = Some(category);
    }

    /// Queue a message to be processed by `update()`.
    fn queue(&self, msg: MarketMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn enter_loading_state(&mut self, label: &'static str) {
        self.spinner.set_label(label);
        self.state = State::Loading;
    }

    /// Header for the professionals listing: the selected category's display
    /// name, or a generic fallback when the id is unknown.
    fn listing_title(&self) -> String {
        self.selected_category
            .as_ref()
            .and_then(|id| self.categories.iter().find(|c| &c.id == id))
            .map_or_else(|| FALLBACK_LISTING_TITLE.to_string(), |c| c.name.clone())
    }

    fn listing_view(&self) -> ProfessionalListView {
        ProfessionalListView::new(
            &self.listing_title(),
            self.professionals.clone(),
            self.resolver.clone(),
        )
    }

    fn home_view(&self) -> HomeView {
        let mut featured = self.professionals.clone();
        featured.truncate(FEATURED_COUNT);
        HomeView::new(self.categories.clone(), featured, self.resolver.clone())
    }

    /// Process a single message and return the result.
    fn process_message(&mut self, msg: MarketMsg) -> UpdateResult {
        match msg {
            MarketMsg::Initialize => UpdateResult::Commands(vec![
                Box::new(FetchCategoriesCmd::new(self.api.clone(), self.msg_tx.clone())),
                Box::new(FetchFeaturedCmd::new(self.api.clone(), self.msg_tx.clone())),
            ]),

            MarketMsg::SelectCategory(id) => self.select_category(id),

            MarketMsg::SelectProfessional(professional) => {
                let fetch = FetchReviewsCmd::new(
                    self.api.clone(),
                    professional.id,
                    self.msg_tx.clone(),
                );
                self.state = State::Profile(ProfileView::new(professional, self.resolver.clone()));
                fetch.into()
            }

            MarketMsg::NavigateBack => self.navigate_back(),

            MarketMsg::Reload => self.reload_current_view(),

            MarketMsg::CopyPhone => self.copy_phone(),

            MarketMsg::CategoriesLoaded(categories) => {
                self.categories = categories;
                if let State::Home(view) = &mut self.state {
                    view.set_categories(self.categories.clone());
                }
                UpdateResult::Idle
            }

            MarketMsg::FeaturedLoaded(professionals) => {
                self.professionals = professionals;
                if let State::Home(view) = &mut self.state {
                    view.set_featured(self.professionals.clone());
                }
                UpdateResult::Idle
            }

            MarketMsg::ProfessionalsLoaded(professionals) => {
                self.professionals = professionals;
                // Do not yank the user out of the profile when a late
                // response arrives; last-to-resolve wins on the listing.
                if matches!(self.state, State::Loading | State::Professionals(_)) {
                    self.state = State::Professionals(self.listing_view());
                }
                UpdateResult::Idle
            }

            MarketMsg::ProfessionalsFailed => {
                // Resolve the loading state to whatever data we still have.
                if matches!(self.state, State::Loading) {
                    self.state = State::Professionals(self.listing_view());
                }
                UpdateResult::Idle
            }

            MarketMsg::ReviewsLoaded(reviews) => {
                if let State::Profile(view) = &mut self.state {
                    view.set_reviews(reviews);
                }
                UpdateResult::Idle
            }
        }
    }

    fn select_category(&mut self, id: String) -> UpdateResult {
        self.selected_category = Some(id.clone());
        self.enter_loading_state("Cargando profesionales...");
        FetchProfessionalsCmd::new(self.api.clone(), id, self.msg_tx.clone()).into()
    }

    fn navigate_back(&mut self) -> UpdateResult {
        match &self.state {
            State::Home(_) => UpdateResult::Close,
            // The loading state belongs to the listing; backing out of
            // either returns home and refreshes the featured subset.
            State::Loading | State::Professionals(_) => {
                self.state = State::Home(self.home_view());
                FetchFeaturedCmd::new(self.api.clone(), self.msg_tx.clone()).into()
            }
            // Back to the listing without a fetch: the cached collection is
            // redisplayed as-is.
            State::Profile(_) => {
                self.state = State::Professionals(self.listing_view());
                UpdateResult::Idle
            }
        }
    }

    fn reload_current_view(&mut self) -> UpdateResult {
        match &self.state {
            State::Loading => UpdateResult::Idle,
            State::Home(_) => UpdateResult::Commands(vec![
                Box::new(FetchCategoriesCmd::new(self.api.clone(), self.msg_tx.clone())),
                Box::new(FetchFeaturedCmd::new(self.api.clone(), self.msg_tx.clone())),
            ]),
            State::Professionals(_) => match self.selected_category.clone() {
                Some(id) => self.select_category(id),
                None => UpdateResult::Idle,
            },
            State::Profile(view) => FetchReviewsCmd::new(
                self.api.clone(),
                view.professional().id,
                self.msg_tx.clone(),
            )
            .into(),
        }
    }

    fn copy_phone(&self) -> UpdateResult {
        if let State::Profile(view) = &self.state {
            let professional = view.professional();
            if let Some(phone) = &professional.phone {
                return CopyToClipboardCmd::new(
                    phone.clone(),
                    format!("teléfono de {}", professional.name),
                )
                .into();
            }
        }
        UpdateResult::Idle
    }
}

impl Service for Marketplace {
    fn init(&mut self) {
        self.queue(MarketMsg::Initialize);
        if let Some(category) = self.initial_category.take() {
            self.queue(MarketMsg::SelectCategory(category));
        }
    }

    fn handle_tick(&mut self) {
        if matches!(self.state, State::Loading) {
            self.spinner.handle_tick();
        }
    }

    fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };

        // Let the current view handle the key first
        let result = match &mut self.state {
            State::Loading => EventResult::Ignored,
            State::Home(view) => view.handle_key(*key),
            State::Professionals(view) => view.handle_key(*key),
            State::Profile(view) => view.handle_key(*key),
        };

        match result {
            EventResult::Event(msg) => {
                self.queue(msg);
                return true;
            }
            EventResult::Consumed => return true,
            EventResult::Ignored => {}
        }

        if self.resolver.matches_global(key, GlobalAction::Back) {
            self.queue(MarketMsg::NavigateBack);
            return true;
        }

        false
    }

    fn update(&mut self) -> UpdateResult {
        // Drain all pending messages
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                UpdateResult::Idle => {}
                UpdateResult::Commands(cmds) => commands.extend(cmds),
                UpdateResult::Close => return UpdateResult::Close,
                UpdateResult::Error(e) => return UpdateResult::Error(e),
            }
        }

        if commands.is_empty() {
            UpdateResult::Idle
        } else {
            UpdateResult::Commands(commands)
        }
    }

    fn view(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match &mut self.state {
            State::Loading => self.spinner.render(frame, area, theme),
            State::Home(view) => view.render(frame, area, theme),
            State::Professionals(view) => view.render(frame, area, theme),
            State::Profile(view) => view.render(frame, area, theme),
        }
    }

    fn breadcrumbs(&self) -> Vec<String> {
        let mut bc = vec!["Inicio".to_string()];

        match &self.state {
            State::Home(_) => {}
            State::Loading | State::Professionals(_) => bc.push(self.listing_title()),
            State::Profile(view) => {
                bc.push(self.listing_title());
                bc.push(view.professional().name.clone());
            }
        }
        bc
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        match &self.state {
            State::Loading => vec![],
            State::Home(_) => vec![Keybinding::hint(
                self.resolver.display_market(MarketAction::Reload),
                "Recargar",
            )],
            State::Professionals(_) => vec![
                Keybinding::hint("/", "Buscar"),
                Keybinding::hint(
                    self.resolver.display_market(MarketAction::Reload),
                    "Recargar",
                ),
            ],
            State::Profile(_) => vec![
                Keybinding::hint(
                    self.resolver.display_market(MarketAction::CopyPhone),
                    "Copiar teléfono",
                ),
                Keybinding::hint(
                    self.resolver.display_market(MarketAction::Reload),
                    "Recargar",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::KeybindingsConfig;

    use super::*;

    fn test_professional(id: i64, name: &str) -> Professional {
        Professional {
            id,
            name: name.to_string(),
            category: Some("electricista".to_string()),
            rating: 4.8,
            reviews_count: 127,
            distance: "0.5 km".to_string(),
            available: true,
            specialties: vec!["Instalaciones".to_string()],
            price: "$5,000".to_string(),
            avatar: "JP".to_string(),
            phone: Some("+54 9 342 123-4567".to_string()),
            description: None,
            location: Some("Santa Fe".to_string()),
        }
    }

    fn test_category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: "zap".to_string(),
        }
    }

    fn test_service() -> Marketplace {
        // The client is never exercised in these tests; commands are
        // inspected, not executed.
        let api = ApiClient::new("http://127.0.0.1:9/api");
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        Marketplace::new(api, resolver)
    }

    fn command_names(result: UpdateResult) -> Vec<String> {
        match result {
            UpdateResult::Commands(cmds) => cmds.iter().map(|c| c.name()).collect(),
            _ => vec![],
        }
    }

    #[test]
    fn test_initialize_fetches_categories_and_featured() {
        let mut svc = test_service();
        svc.init();
        let names = command_names(svc.update());
        assert_eq!(names.len(), 2);
        assert!(names[0].contains("categories"));
        assert!(names[1].contains("featured"));
    }

    #[test]
    fn test_select_category_enters_loading_with_one_filtered_fetch() {
        let mut svc = test_service();
        svc.queue(MarketMsg::SelectCategory("electricista".to_string()));

        let names = command_names(svc.update());

        assert_eq!(names.len(), 1);
        assert!(names[0].contains("electricista"));
        assert!(matches!(svc.state, State::Loading));
        assert_eq!(svc.selected_category.as_deref(), Some("electricista"));
    }

    #[test]
    fn test_professionals_loaded_resolves_loading() {
        let mut svc = test_service();
        svc.queue(MarketMsg::SelectCategory("electricista".to_string()));
        svc.update();

        svc.queue(MarketMsg::ProfessionalsLoaded(vec![test_professional(
            1,
            "Juan Pérez",
        )]));
        svc.update();

        assert!(matches!(svc.state, State::Professionals(_)));
        assert_eq!(svc.professionals.len(), 1);
    }

    #[test]
    fn test_select_professional_opens_profile_with_one_reviews_fetch() {
        let mut svc = test_service();
        svc.queue(MarketMsg::SelectProfessional(test_professional(
            7,
            "Juan Pérez",
        )));

        let names = command_names(svc.update());

        assert_eq!(names.len(), 1);
        assert!(names[0].contains('7'));
        assert!(matches!(svc.state, State::Profile(_)));
    }

    #[test]
    fn test_back_from_profile_restores_listing_without_fetch() {
        let mut svc = test_service();
        svc.professionals = vec![test_professional(1, "Juan Pérez")];
        svc.queue(MarketMsg::SelectProfessional(test_professional(
            1,
            "Juan Pérez",
        )));
        svc.update();

        svc.queue(MarketMsg::NavigateBack);
        let result = svc.update();

        assert!(matches!(result, UpdateResult::Idle));
        assert!(matches!(svc.state, State::Professionals(_)));
    }

    #[test]
    fn test_back_from_professionals_goes_home_and_refetches_featured() {
        let mut svc = test_service();
        svc.queue(MarketMsg::SelectCategory("electricista".to_string()));
        svc.update();
        svc.queue(MarketMsg::ProfessionalsLoaded(vec![test_professional(
            1,
            "Juan Pérez",
        )]));
        svc.update();

        svc.queue(MarketMsg::NavigateBack);
        let names = command_names(svc.update());

        assert_eq!(names.len(), 1);
        assert!(names[0].contains("featured"));
        assert!(matches!(svc.state, State::Home(_)));
    }

    #[test]
    fn test_back_from_home_closes() {
        let mut svc = test_service();
        svc.queue(MarketMsg::NavigateBack);
        assert!(matches!(svc.update(), UpdateResult::Close));
    }

    #[test]
    fn test_listing_title_matches_category_or_falls_back() {
        let mut svc = test_service();
        svc.categories = vec![test_category("electricista", "Electricista")];

        svc.selected_category = Some("electricista".to_string());
        assert_eq!(svc.listing_title(), "Electricista");

        svc.selected_category = Some("plomero".to_string());
        assert_eq!(svc.listing_title(), "Profesionales");
    }

    #[test]
    fn test_failed_fetch_resolves_loading_to_stale_listing() {
        let mut svc = test_service();
        svc.professionals = vec![test_professional(1, "Juan Pérez")];
        svc.queue(MarketMsg::SelectCategory("plomero".to_string()));
        svc.update();
        assert!(matches!(svc.state, State::Loading));

        svc.queue(MarketMsg::ProfessionalsFailed);
        svc.update();

        // The stale collection stays on screen; no error is surfaced.
        assert!(matches!(svc.state, State::Professionals(_)));
        assert_eq!(svc.professionals.len(), 1);
    }

    #[test]
    fn test_late_listing_response_does_not_yank_profile() {
        let mut svc = test_service();
        svc.queue(MarketMsg::SelectProfessional(test_professional(
            1,
            "Juan Pérez",
        )));
        svc.update();

        svc.queue(MarketMsg::ProfessionalsLoaded(vec![test_professional(
            2,
            "María García",
        )]));
        svc.update();

        assert!(matches!(svc.state, State::Profile(_)));
        // The collection is still replaced wholesale
        assert_eq!(svc.professionals[0].id, 2);
    }

    #[test]
    fn test_featured_loaded_replaces_collection_wholesale() {
        let mut svc = test_service();
        svc.professionals = vec![
            test_professional(1, "Juan Pérez"),
            test_professional(2, "María García"),
            test_professional(3, "Carlos López"),
        ];

        svc.queue(MarketMsg::FeaturedLoaded(vec![test_professional(
            9,
            "Laura Díaz",
        )]));
        svc.update();

        assert_eq!(svc.professionals.len(), 1);
        assert_eq!(svc.professionals[0].id, 9);
    }

    #[test]
    fn test_copy_phone_only_applies_on_profile() {
        let mut svc = test_service();
        svc.queue(MarketMsg::CopyPhone);
        assert!(matches!(svc.update(), UpdateResult::Idle));

        svc.queue(MarketMsg::SelectProfessional(test_professional(
            1,
            "Juan Pérez",
        )));
        svc.update();
        svc.queue(MarketMsg::CopyPhone);
        let names = command_names(svc.update());
        assert_eq!(names.len(), 1);
        assert!(names[0].contains("Juan Pérez"));
    }
}
