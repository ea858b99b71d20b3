use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::Theme;
use crate::ui::Keybinding;

/// Help overlay that displays keybindings in a centered popup.
#[derive(Default)]
pub struct HelpOverlay {
    visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn show(&mut self) {
        self.visible = true;
    }

    pub const fn hide(&mut self) {
        self.visible = false;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, keybindings: &[Keybinding]) {
        if !self.visible {
            return;
        }

        let popup_area = area.centered(Constraint::Percentage(50), Constraint::Percentage(60));

        frame.render_widget(Clear, popup_area);

        let key_style = Style::default()
            .fg(theme.peach)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.text);

        let lines: Vec<Line> = keybindings
            .iter()
            .map(|kb| {
                Line::from(vec![
                    Span::styled(format!("{:>12}", kb.key), key_style),
                    Span::raw("  "),
                    Span::styled(kb.description, desc_style),
                ])
            })
            .collect();

        let block = Block::default()
            .title(" Ayuda (Esc para cerrar) ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.base));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}
