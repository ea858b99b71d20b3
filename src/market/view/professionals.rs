use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::Cell;
use ratatui::Frame;

use crate::Theme;
use crate::api::Professional;
use crate::config::{KeyResolver, MarketAction};
use crate::market::message::MarketMsg;
use crate::market::view::{availability_label, stars};
use crate::search::Matcher;
use crate::ui::{ColumnDef, Component, EventResult, Table, TableEvent, TableRow};

impl TableRow for Professional {
    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("Nombre", Constraint::Min(18)),
            ColumnDef::new("Valoración", Constraint::Length(12)),
            ColumnDef::new("Distancia", Constraint::Length(10)),
            ColumnDef::new("Especialidades", Constraint::Min(20)),
            ColumnDef::new("Precio", Constraint::Length(8)),
            ColumnDef::new("Estado", Constraint::Length(10)),
        ];
        COLUMNS
    }

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let status_style = if self.available {
            Style::default().fg(theme.success())
        } else {
            Style::default().fg(theme.overlay1)
        };

        vec![
            Cell::from(format!("{} {}", self.avatar, self.name)),
            Cell::from(format!("{} ({})", stars(self.rating), self.reviews_count)),
            Cell::from(format!("A {}", self.distance)),
            Cell::from(self.specialties.join(", ")),
            Cell::from(self.price.clone()),
            Cell::from(availability_label(self.available)).style(status_style),
        ]
    }

    fn matches(&self, query: &str) -> bool {
        let matcher = Matcher::new();
        matcher.matches(&self.name, query)
            || matcher.matches_any(self.specialties.iter().map(String::as_str), query)
    }
}

/// The category listing: a searchable table of professionals.
pub struct ProfessionalListView {
    table: Table<Professional>,
    resolver: Arc<KeyResolver>,
}

impl ProfessionalListView {
    pub fn new(
        title: &str,
        professionals: Vec<Professional>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        Self {
            table: Table::new(professionals, resolver.clone()).with_title(format!(" {title} ")),
            resolver,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult<MarketMsg> {
        match self.table.handle_key(key) {
            EventResult::Event(TableEvent::Activated(professional)) => {
                return MarketMsg::SelectProfessional(professional).into();
            }
            EventResult::Consumed | EventResult::Event(_) => return EventResult::Consumed,
            EventResult::Ignored => {}
        }

        if self.resolver.matches_market(&key, MarketAction::Reload) {
            return MarketMsg::Reload.into();
        }

        EventResult::Ignored
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.table.render(frame, area, theme);
    }
}
