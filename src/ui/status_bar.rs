use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::Theme;
use crate::api::User;
use crate::config::{GlobalAction, KeyResolver, NavAction};
use crate::ui::Keybinding;

/// ASCII art logo for the status bar.
const LOGO: &[&str] = &[
    r"                      _ ",
    r" ___ ___ ___ _ __  _ (_)",
    r"(_-</ -_) '_\ V / || | |",
    r"/__/\___|_|  \_/ \_,_|_|",
    r"      s e r v i t u i   ",
];

pub struct StatusBar {
    user: Option<User>,
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            user: None,
            resolver,
        }
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn render_with_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.surface1));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        // Three columns: session info (left), keybindings (middle), logo (right)
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(34),
                Constraint::Min(20),
                Constraint::Length(22),
            ])
            .split(inner_area);

        self.render_session_info(frame, chunks[0], theme);
        self.render_keybindings(frame, chunks[1], theme, local_keybindings);
        Self::render_logo(frame, chunks[2], theme);
    }

    fn render_session_info(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let w = area.width as usize;
        let label_style = Style::default().fg(theme.overlay1);
        let value_style = Style::default().fg(theme.text);

        let lines = match &self.user {
            Some(user) => vec![
                Line::from(Span::styled(
                    truncate_str(&user.username, w),
                    Style::default()
                        .fg(theme.lavender)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                status_line("email", &user.email, w, label_style, value_style),
                status_line("zona", "Santa Fe", w, label_style, value_style),
            ],
            None => vec![
                Line::from(Span::styled(
                    "Sin sesión",
                    Style::default()
                        .fg(theme.overlay0)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                status_line("zona", "Santa Fe", w, label_style, value_style),
            ],
        };

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let global_keybindings = self.global_keybindings();

        // Hints only, local first
        let hints: Vec<&Keybinding> = local_keybindings
            .iter()
            .filter(|kb| kb.hint)
            .chain(global_keybindings.iter().filter(|kb| kb.hint))
            .collect();

        if hints.is_empty() {
            return;
        }

        // Compute alignment widths from actual content so the separator
        // forms a straight vertical line regardless of key length.
        let max_key_w = hints.iter().map(|kb| kb.key.len()).max().unwrap_or(1);
        let max_desc_w = hints
            .iter()
            .map(|kb| kb.description.len())
            .max()
            .unwrap_or(1);
        let col_width = u16::try_from(max_key_w + 3 + max_desc_w + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = area.height as usize;

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];

        for (i, kb) in hints.iter().enumerate() {
            let col_idx = i / num_rows.max(1);
            if col_idx >= num_cols {
                break;
            }

            let line = Line::from(vec![
                Span::styled(
                    format!("{:>width$}", kb.key, width = max_key_w),
                    Style::default().fg(theme.peach),
                ),
                Span::styled(" │ ", Style::default().fg(theme.surface2)),
                Span::styled(kb.description, Style::default().fg(theme.subtext0)),
            ]);
            columns[col_idx].push(line);
        }

        let col_constraints: Vec<Constraint> = vec![Constraint::Length(col_width); num_cols];
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(area);

        for (col_idx, col_lines) in columns.into_iter().enumerate() {
            if col_idx < col_areas.len() {
                frame.render_widget(Paragraph::new(col_lines), col_areas[col_idx]);
            }
        }
    }

    fn render_logo(frame: &mut Frame, area: Rect, theme: &Theme) {
        let logo_lines: Vec<Line> = LOGO
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default()
                        .fg(theme.mauve)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        frame.render_widget(Paragraph::new(logo_lines), area);
    }

    /// Global keybindings, also used by the help overlay.
    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Help), "Ayuda"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Back), "Volver"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Account), "Cuenta"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Theme), "Tema"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), "Salir"),
            Keybinding::new(self.resolver.display_nav(NavAction::Select), "Elegir"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Navegar",
            ),
        ]
    }
}

/// Render a labelled status line: right-aligned label, then value.
fn status_line<'a>(
    label: &'a str,
    value: &str,
    max_width: usize,
    label_style: Style,
    value_style: Style,
) -> Line<'a> {
    const LABEL_W: usize = 7;
    let available = max_width.saturating_sub(LABEL_W + 1);
    Line::from(vec![
        Span::styled(format!("{label:>LABEL_W$}"), label_style),
        Span::raw(" "),
        Span::styled(truncate_str(value, available), value_style),
    ])
}

/// Truncate a string to fit within a given width, adding "..." if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
