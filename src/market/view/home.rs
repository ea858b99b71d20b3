use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, ListItem, Paragraph};

use crate::Theme;
use crate::api::{Category, Professional};
use crate::config::KeyResolver;
use crate::market::message::MarketMsg;
use crate::market::view::{availability_label, icon_glyph, stars};
use crate::ui::{Component, EventResult, List, ListEvent, ListRow};

impl ListRow for Category {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(Line::from(vec![
            Span::raw(format!("{} ", icon_glyph(&self.icon))),
            Span::styled(self.name.clone(), Style::default().fg(theme.text)),
        ]))
    }
}

/// The home screen: selectable category list plus the read-only featured
/// professionals section below it.
pub struct HomeView {
    categories: List<Category>,
    featured: Vec<Professional>,
}

impl HomeView {
    pub fn new(
        categories: Vec<Category>,
        featured: Vec<Professional>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        Self {
            categories: List::new(categories, resolver),
            featured,
        }
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories.set_items(categories);
    }

    pub fn set_featured(&mut self, featured: Vec<Professional>) {
        self.featured = featured;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult<MarketMsg> {
        match self.categories.handle_key(key) {
            EventResult::Event(ListEvent::Activated(category)) => {
                MarketMsg::SelectCategory(category.id).into()
            }
            EventResult::Consumed | EventResult::Event(_) => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::vertical([Constraint::Min(8), Constraint::Length(8)]).split(area);

        let categories_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_focused()))
            .title(" Categorías de Servicios ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            );
        let categories_area = categories_block.inner(chunks[0]);
        frame.render_widget(categories_block, chunks[0]);
        self.categories.render(frame, categories_area, theme);

        let featured_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(" Servicios Destacados ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            );
        let featured_area = featured_block.inner(chunks[1]);
        frame.render_widget(featured_block, chunks[1]);

        let mut lines: Vec<Line> = Vec::new();
        if self.featured.is_empty() {
            lines.push(Line::from(Span::styled(
                "Sin servicios destacados",
                Style::default().fg(theme.overlay0),
            )));
        }
        for professional in &self.featured {
            let badge_color = if professional.available {
                theme.success()
            } else {
                theme.overlay1
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<3}", professional.avatar),
                    Style::default()
                        .fg(theme.lavender)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    professional.name.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(stars(professional.rating), Style::default().fg(theme.yellow)),
                Span::styled(
                    format!(" ({})", professional.reviews_count),
                    Style::default().fg(theme.subtext0),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", availability_label(professional.available)),
                    Style::default().fg(badge_color),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", professional.specialties.join(", ")),
                Style::default().fg(theme.subtext0),
            )));
        }

        frame.render_widget(Paragraph::new(lines), featured_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use crate::config::KeybindingsConfig;

    use super::*;

    fn home_with(categories: Vec<Category>) -> HomeView {
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        HomeView::new(categories, Vec::new(), resolver)
    }

    #[test]
    fn test_activating_a_category_selects_it() {
        let mut view = home_with(vec![
            Category {
                id: "electricista".to_string(),
                name: "Electricista".to_string(),
                icon: "zap".to_string(),
            },
            Category {
                id: "plomero".to_string(),
                name: "Plomero".to_string(),
                icon: "droplets".to_string(),
            },
        ]);

        // Move to the second category and activate it
        view.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let result = view.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        match result {
            EventResult::Event(MarketMsg::SelectCategory(id)) => assert_eq!(id, "plomero"),
            _ => panic!("expected a category selection"),
        }
    }

    #[test]
    fn test_enter_on_empty_home_is_ignored() {
        let mut view = home_with(Vec::new());
        let result = view.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(matches!(result, EventResult::Ignored));
    }
}
