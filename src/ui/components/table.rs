use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Paragraph, Row, Table as RatatuiTable, TableState,
};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, SearchAction};
use crate::ui::{Component, EventResult};

const PAGE_STEP: usize = 10;

pub enum TableEvent<T> {
    Changed(T),
    Activated(T),
}

pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self { header, constraint }
    }
}

pub trait TableRow {
    fn columns() -> &'static [ColumnDef];

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>>;

    /// Return true if this row matches the search query for local filtering.
    fn matches(&self, query: &str) -> bool;
}

/// Selectable table with incremental search ("/" to filter).
pub struct Table<T: TableRow + Clone> {
    items: Vec<T>,
    filtered_indices: Vec<usize>,
    state: TableState,
    title: Option<String>,
    searching: bool,
    query: String,
    resolver: Arc<KeyResolver>,
}

impl<T: TableRow + Clone> Table<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let filtered_indices: Vec<usize> = (0..items.len()).collect();
        let mut state = TableState::default();
        if !filtered_indices.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            filtered_indices,
            state,
            title: None,
            searching: false,
            query: String::new(),
            resolver,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.state
            .selected()
            .and_then(|selected| self.filtered_indices.get(selected))
            .and_then(|&idx| self.items.get(idx))
    }

    fn update_filter(&mut self) {
        self.filtered_indices = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.query.is_empty() || item.matches(&self.query))
            .map(|(i, _)| i)
            .collect();

        if self.filtered_indices.is_empty() {
            self.state.select(None);
        } else if self
            .state
            .selected()
            .is_none_or(|i| i >= self.filtered_indices.len())
        {
            self.state.select(Some(0));
        }
    }

    fn select_offset(&mut self, offset: isize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        let last = self.filtered_indices.len() - 1;
        let i = self.state.selected().map_or(0, |i| {
            i.saturating_add_signed(offset).min(last)
        });
        self.state.select(Some(i));
    }

    fn get_change_event(&self, before: Option<usize>) -> EventResult<TableEvent<T>> {
        if let Some(selected) = self.state.selected()
            && Some(selected) != before
            && let Some(&idx) = self.filtered_indices.get(selected)
        {
            return TableEvent::Changed(self.items[idx].clone()).into();
        }
        EventResult::Consumed
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        // Esc exits search mode and clears the filter
        if self.resolver.matches_search(&key, SearchAction::Exit) {
            self.searching = false;
            self.query.clear();
            self.update_filter();
            return EventResult::Consumed;
        }

        // Enter exits search mode but keeps the filter
        if self.resolver.matches_nav(&key, NavAction::Select) {
            self.searching = false;
            return EventResult::Consumed;
        }

        match key.code {
            KeyCode::Backspace => {
                self.query.pop();
                self.update_filter();
                EventResult::Consumed
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.update_filter();
                EventResult::Consumed
            }
            // Consume all other keys in search mode
            _ => EventResult::Consumed,
        }
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        let before = self.state.selected();

        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.select_offset(1);
            return self.get_change_event(before);
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.select_offset(-1);
            return self.get_change_event(before);
        }
        if self.resolver.matches_nav(&key, NavAction::Home) {
            if !self.filtered_indices.is_empty() {
                self.state.select(Some(0));
            }
            return self.get_change_event(before);
        }
        if self.resolver.matches_nav(&key, NavAction::End) {
            if !self.filtered_indices.is_empty() {
                self.state.select(Some(self.filtered_indices.len() - 1));
            }
            return self.get_change_event(before);
        }
        if self.resolver.matches_nav(&key, NavAction::PageDown) {
            self.select_offset(PAGE_STEP as isize);
            return self.get_change_event(before);
        }
        if self.resolver.matches_nav(&key, NavAction::PageUp) {
            self.select_offset(-(PAGE_STEP as isize));
            return self.get_change_event(before);
        }
        if self.resolver.matches_nav(&key, NavAction::Select) {
            return self.selected_item().map_or(EventResult::Ignored, |item| {
                TableEvent::Activated(item.clone()).into()
            });
        }
        if self.resolver.matches_search(&key, SearchAction::Toggle) {
            self.searching = true;
            return EventResult::Consumed;
        }
        if self.resolver.matches_search(&key, SearchAction::Exit) && !self.query.is_empty() {
            self.query.clear();
            self.update_filter();
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }
}

impl<T: TableRow + Clone> Component for Table<T> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<Self::Output> {
        if self.searching {
            self.handle_search_key(key)
        } else {
            self.handle_navigation_key(key)
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Reserve a line for the search bar while searching or filtered
        let has_search_bar = self.searching || !self.query.is_empty();
        let (table_area, search_area) = if has_search_bar {
            let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let columns = T::columns();

        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| {
                Cell::from(c.header).style(
                    Style::default()
                        .fg(theme.header())
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        let header = Row::new(header_cells)
            .height(1)
            .style(Style::default().bg(theme.surface0));

        let rows: Vec<Row> = self
            .filtered_indices
            .iter()
            .map(|&idx| {
                Row::new(self.items[idx].render_cells(theme))
                    .style(Style::default().fg(theme.text))
            })
            .collect();

        let widths: Vec<Constraint> = columns.iter().map(|c| c.constraint).collect();

        let mut table = RatatuiTable::new(rows, widths)
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        if let Some(title) = &self.title {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border()))
                .title(title.as_str())
                .title_style(
                    Style::default()
                        .fg(theme.mauve)
                        .add_modifier(Modifier::BOLD),
                );
            table = table.block(block);
        }

        frame.render_stateful_widget(table, table_area, &mut self.state);

        if let Some(search_area) = search_area {
            let search_text = if self.searching {
                format!("/{}_", self.query)
            } else {
                format!("/{} ({} resultados)", self.query, self.filtered_indices.len())
            };

            let search_style = if self.searching {
                Style::default().fg(theme.yellow)
            } else {
                Style::default().fg(theme.subtext0)
            };

            frame.render_widget(Paragraph::new(search_text).style(search_style), search_area);
        }
    }
}
