use std::sync::Arc;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

use crate::Theme;
use crate::account::{AccountEvent, AccountView, LoginCmd, RegisterCmd};
use crate::api::{ApiClient, User};
use crate::cli::Args;
use crate::commands::Command;
use crate::config::{self, GlobalAction, KeyResolver};
use crate::market::Marketplace;
use crate::service::{Service, UpdateResult};
use crate::theme::{ThemeEvent, ThemeSelectorView};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, EventResult, HelpOverlay, Keybinding, StatusBar, Toast, ToastManager, ToastType,
};

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 4.0;

/// Messages sent to the App from spawned commands.
pub enum AppMessage {
    ShowToast {
        message: String,
        toast_type: ToastType,
    },
    /// A spawned command finished; services get an `update()` pass.
    CommandFinished(String),
}

enum Overlay {
    Account(AccountView),
    ThemeSelector(ThemeSelectorView),
}

enum LoopEvent {
    Terminal(Event),
    App(AppMessage),
}

pub struct App {
    api: ApiClient,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    service: Marketplace,
    overlay: Option<Overlay>,
    help: HelpOverlay,
    /// The single shared user value; in memory only.
    user: Option<User>,
    status_bar: StatusBar,
    toasts: ToastManager,
    should_quit: bool,
    msg_tx: UnboundedSender<AppMessage>,
    msg_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(api: ApiClient, resolver: Arc<KeyResolver>, theme: Theme) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let service = Marketplace::new(api.clone(), resolver.clone());
        let status_bar = StatusBar::new(resolver.clone());
        Self {
            api,
            resolver,
            theme,
            service,
            overlay: None,
            help: HelpOverlay::new(),
            user: None,
            status_bar,
            toasts: ToastManager::new(),
            should_quit: false,
            msg_tx,
            msg_rx,
        }
    }

    pub fn apply_cli_args(&mut self, args: &Args) {
        if let Some(category) = &args.category {
            self.service.set_initial_category(category.clone());
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        self.service.init();
        self.run_update();

        loop {
            let next = tokio::select! {
                event = tui.next_event() => event.map(LoopEvent::Terminal),
                message = self.msg_rx.recv() => message.map(LoopEvent::App),
            };
            let Some(next) = next else { break };

            match next {
                LoopEvent::Terminal(event) => self.handle_event(&mut tui, event)?,
                LoopEvent::App(message) => self.handle_app_message(message),
            }

            if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Suspend => {
                tui.suspend()?;
                tui.resume()?;
                tui.clear()?;
            }
            Event::Tick => {
                self.service.handle_tick();
                self.toasts.handle_tick();
            }
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Paste(text) => {
                if let Some(Overlay::Account(view)) = &mut self.overlay {
                    view.insert_paste(&text);
                }
            }
            Event::Key(key) => self.handle_key(key),
            Event::Error(e) => error!("Terminal event error: {e}"),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if self.help.is_visible() {
            if self.resolver.matches_global(&key, GlobalAction::Back)
                || self.resolver.matches_global(&key, GlobalAction::Help)
            {
                self.help.hide();
            }
            return;
        }

        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }

        // The active view gets the key first so typing in a search or form
        // is never hijacked by a global binding
        if self.service.handle_input(&Event::Key(key)) {
            self.run_update();
            return;
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if self.resolver.matches_global(&key, GlobalAction::Help) {
            self.help.show();
        } else if self.resolver.matches_global(&key, GlobalAction::Theme) {
            self.overlay = Some(Overlay::ThemeSelector(ThemeSelectorView::new(
                self.resolver.clone(),
            )));
        } else if self.resolver.matches_global(&key, GlobalAction::Account) {
            // Already signed in: just surface the session details
            if let Some(user) = &self.user {
                self.toasts.show(Toast::info(format!(
                    "Sesión: {} ({})",
                    user.username, user.email
                )));
            } else {
                self.overlay = Some(Overlay::Account(AccountView::new(self.resolver.clone())));
            }
        }
    }

    fn handle_overlay_key(&mut self, key: crossterm::event::KeyEvent) {
        match &mut self.overlay {
            Some(Overlay::Account(view)) => match view.handle_key(key) {
                EventResult::Event(AccountEvent::SubmitLogin(credentials)) => {
                    let cmd = LoginCmd::new(self.api.clone(), credentials, view.sender());
                    self.spawn_command(Box::new(cmd));
                }
                EventResult::Event(AccountEvent::SubmitRegister(details)) => {
                    let cmd = RegisterCmd::new(self.api.clone(), details, view.sender());
                    self.spawn_command(Box::new(cmd));
                }
                EventResult::Event(AccountEvent::Cancelled) => self.overlay = None,
                EventResult::Consumed | EventResult::Ignored => {}
            },
            Some(Overlay::ThemeSelector(view)) => match view.handle_key(key) {
                EventResult::Event(ThemeEvent::Selected(info)) => {
                    self.theme = info.theme;
                    if let Err(e) = config::save_theme(info.name) {
                        error!("Failed to persist theme selection: {e:#}");
                    }
                    self.overlay = None;
                }
                EventResult::Event(ThemeEvent::Cancelled) => self.overlay = None,
                EventResult::Consumed | EventResult::Ignored => {}
            },
            None => {}
        }
    }

    fn handle_app_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::ShowToast {
                message,
                toast_type,
            } => self.toasts.show(Toast::new(message, toast_type)),
            AppMessage::CommandFinished(name) => {
                debug!("Command finished: {name}");
                let signed_in = match &mut self.overlay {
                    Some(Overlay::Account(view)) => view.update(),
                    _ => None,
                };
                if let Some(user) = signed_in {
                    self.sign_in(user);
                }
                self.run_update();
            }
        }
    }

    fn sign_in(&mut self, user: User) {
        self.toasts.show(Toast::success(format!(
            "Sesión iniciada como {}",
            user.username
        )));
        self.status_bar.set_user(user.clone());
        self.user = Some(user);
        self.overlay = None;
    }

    /// Run the service's single-funnel update and act on the result.
    fn run_update(&mut self) {
        match self.service.update() {
            UpdateResult::Idle => {}
            UpdateResult::Commands(commands) => {
                for command in commands {
                    self.spawn_command(command);
                }
            }
            UpdateResult::Close => self.should_quit = true,
            UpdateResult::Error(e) => error!("Marketplace error: {e}"),
        }
    }

    fn spawn_command(&self, command: Box<dyn Command>) {
        let app_tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let name = command.name();
            debug!("Running command: {name}");
            if let Err(e) = command.execute(app_tx.clone()).await {
                error!("Command '{name}' failed: {e:#}");
            }
            let _ = app_tx.send(AppMessage::CommandFinished(name));
        });
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let theme = self.theme;
        let breadcrumbs = self.service.breadcrumbs();
        let local_keybindings = self.service.keybindings();
        let help_keybindings = self.help_keybindings(&local_keybindings);

        tui.draw(|frame| {
            let area = frame.area();
            let chunks = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(9),
            ])
            .split(area);

            render_breadcrumbs(frame, chunks[0], &theme, &breadcrumbs);
            self.service.view(frame, chunks[1], &theme);
            self.status_bar
                .render_with_keybindings(frame, chunks[2], &theme, &local_keybindings);

            match &mut self.overlay {
                Some(Overlay::Account(view)) => view.render(frame, area, &theme),
                Some(Overlay::ThemeSelector(view)) => view.render(frame, area, &theme),
                None => {}
            }

            self.help.render(frame, area, &theme, &help_keybindings);

            self.toasts.render(frame, area, &theme);
        })?;
        Ok(())
    }

    fn help_keybindings(&self, local: &[Keybinding]) -> Vec<Keybinding> {
        let mut all = local.to_vec();
        all.extend(self.status_bar.global_keybindings());
        all
    }
}

fn render_breadcrumbs(
    frame: &mut ratatui::Frame,
    area: Rect,
    theme: &Theme,
    breadcrumbs: &[String],
) {
    let mut spans = Vec::new();
    for (i, segment) in breadcrumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(theme.overlay1)));
        }
        let style = if i == breadcrumbs.len() - 1 {
            Style::default()
                .fg(theme.lavender)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.subtext0)
        };
        spans.push(Span::styled(segment.clone(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
