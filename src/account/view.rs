use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::account::message::AuthMsg;
use crate::api::{Credentials, Registration, User};
use crate::config::{AccountAction, GlobalAction, KeyResolver};
use crate::ui::{EventResult, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Login,
    Register,
}

impl Tab {
    const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

pub enum AccountEvent {
    SubmitLogin(Credentials),
    SubmitRegister(Registration),
    Cancelled,
}

/// The login/register overlay.
///
/// Two flat form-field records, one per tab. Submitting fires exactly one
/// POST; the fields are not validated client-side and a rejected attempt
/// leaves the form untouched.
pub struct AccountView {
    tab: Tab,
    login_fields: Vec<TextInput>,
    register_fields: Vec<TextInput>,
    focus: usize,
    resolver: Arc<KeyResolver>,
    msg_tx: UnboundedSender<AuthMsg>,
    msg_rx: UnboundedReceiver<AuthMsg>,
}

impl AccountView {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            tab: Tab::Login,
            login_fields: vec![
                TextInput::new("Usuario"),
                TextInput::new("Contraseña").masked(),
            ],
            register_fields: vec![
                TextInput::new("Usuario"),
                TextInput::new("Email"),
                TextInput::new("Contraseña").masked(),
            ],
            focus: 0,
            resolver,
            msg_tx,
            msg_rx,
        }
    }

    /// Sender handed to the auth commands for reporting success.
    pub fn sender(&self) -> UnboundedSender<AuthMsg> {
        self.msg_tx.clone()
    }

    /// Drain queued auth results. Returns the signed-in user, if any.
    pub fn update(&mut self) -> Option<User> {
        let mut signed_in = None;
        while let Ok(msg) = self.msg_rx.try_recv() {
            match msg {
                AuthMsg::SignedIn(user) => signed_in = Some(user),
            }
        }
        signed_in
    }

    fn fields(&self) -> &[TextInput] {
        match self.tab {
            Tab::Login => &self.login_fields,
            Tab::Register => &self.register_fields,
        }
    }

    fn fields_mut(&mut self) -> &mut Vec<TextInput> {
        match self.tab {
            Tab::Login => &mut self.login_fields,
            Tab::Register => &mut self.register_fields,
        }
    }

    fn submit(&self) -> AccountEvent {
        match self.tab {
            Tab::Login => AccountEvent::SubmitLogin(Credentials {
                username: self.login_fields[0].value().to_string(),
                password: self.login_fields[1].value().to_string(),
            }),
            Tab::Register => AccountEvent::SubmitRegister(Registration {
                username: self.register_fields[0].value().to_string(),
                email: self.register_fields[1].value().to_string(),
                password: self.register_fields[2].value().to_string(),
            }),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult<AccountEvent> {
        if self.resolver.matches_global(&key, GlobalAction::Back) {
            return AccountEvent::Cancelled.into();
        }
        if self.resolver.matches_account(&key, AccountAction::SwitchTab) {
            self.tab = self.tab.toggled();
            self.focus = 0;
            return EventResult::Consumed;
        }
        if self.resolver.matches_account(&key, AccountAction::Submit) {
            return self.submit().into();
        }
        if self.resolver.matches_account(&key, AccountAction::NextField) {
            self.focus = (self.focus + 1) % self.fields().len();
            return EventResult::Consumed;
        }
        if self.resolver.matches_account(&key, AccountAction::PrevField) {
            let len = self.fields().len();
            self.focus = (self.focus + len - 1) % len;
            return EventResult::Consumed;
        }

        let focus = self.focus;
        if self.fields_mut()[focus].handle_key(key) {
            return EventResult::Consumed;
        }

        // A modal overlay swallows everything else
        EventResult::Consumed
    }

    /// Insert pasted text into the focused field.
    pub fn insert_paste(&mut self, text: &str) {
        let focus = self.focus;
        self.fields_mut()[focus].insert_str(text);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let field_count = self.fields().len() as u16;
        let height = field_count * 3 + 4;
        let popup_area = area.centered(Constraint::Percentage(45), Constraint::Length(height));

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Cuenta ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.base));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(std::iter::repeat_n(Constraint::Length(3), field_count as usize));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);

        self.render_tabs(frame, chunks[0], theme);

        let focus = self.focus;
        for (i, field) in self.fields().iter().enumerate() {
            field.render(frame, chunks[i + 1], theme, i == focus);
        }

        let submit_label = match self.tab {
            Tab::Login => "Entrar",
            Tab::Register => "Crear cuenta",
        };
        let hint = Line::from(Span::styled(
            format!(
                "{}: {submit_label}   {}: cambiar pestaña   Esc: cerrar",
                self.resolver.display_account(AccountAction::Submit),
                self.resolver.display_account(AccountAction::SwitchTab),
            ),
            Style::default().fg(theme.overlay1),
        ));
        frame.render_widget(Paragraph::new(hint), chunks[chunks.len() - 1]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let tab_style = |active: bool| {
            if active {
                Style::default()
                    .fg(theme.lavender)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.subtext0)
            }
        };

        let line = Line::from(vec![
            Span::styled("Iniciar sesión", tab_style(self.tab == Tab::Login)),
            Span::raw("   "),
            Span::styled("Registrarse", tab_style(self.tab == Tab::Register)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::config::KeybindingsConfig;

    use super::*;

    fn view() -> AccountView {
        AccountView::new(Arc::new(KeyResolver::new(Arc::new(
            KeybindingsConfig::default(),
        ))))
    }

    fn press(view: &mut AccountView, code: KeyCode) -> EventResult<AccountEvent> {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(view: &mut AccountView, text: &str) {
        for c in text.chars() {
            press(view, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_submit_login_collects_field_values() {
        let mut view = view();
        type_str(&mut view, "maria");
        press(&mut view, KeyCode::Down);
        type_str(&mut view, "secret");

        let event = press(&mut view, KeyCode::Enter);
        match event {
            EventResult::Event(AccountEvent::SubmitLogin(credentials)) => {
                assert_eq!(credentials.username, "maria");
                assert_eq!(credentials.password, "secret");
            }
            _ => panic!("expected a login submission"),
        }
    }

    #[test]
    fn test_switch_tab_submits_registration() {
        let mut view = view();
        press(&mut view, KeyCode::Tab);
        type_str(&mut view, "nuevo");
        press(&mut view, KeyCode::Down);
        type_str(&mut view, "nuevo@example.com");
        press(&mut view, KeyCode::Down);
        type_str(&mut view, "secret");

        let event = press(&mut view, KeyCode::Enter);
        match event {
            EventResult::Event(AccountEvent::SubmitRegister(details)) => {
                assert_eq!(details.username, "nuevo");
                assert_eq!(details.email, "nuevo@example.com");
                assert_eq!(details.password, "secret");
            }
            _ => panic!("expected a register submission"),
        }
    }

    #[test]
    fn test_escape_cancels() {
        let mut view = view();
        assert!(matches!(
            press(&mut view, KeyCode::Esc),
            EventResult::Event(AccountEvent::Cancelled)
        ));
    }

    #[test]
    fn test_update_without_result_keeps_user_unset() {
        let mut view = view();
        assert!(view.update().is_none());
    }

    #[test]
    fn test_update_picks_up_signed_in_user() {
        let mut view = view();
        let user = User {
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
        };
        view.sender().send(AuthMsg::SignedIn(user.clone())).unwrap();
        assert_eq!(view.update(), Some(user));
    }
}
