use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::Theme;
use crate::api::{format_review_date, Professional, Review};
use crate::config::{KeyResolver, MarketAction, NavAction};
use crate::market::message::MarketMsg;
use crate::market::view::{availability_label, stars};
use crate::ui::EventResult;

/// The profile screen: the selected professional's details plus their
/// reviews, which stream in after the view opens.
pub struct ProfileView {
    professional: Professional,
    reviews: Vec<Review>,
    scroll: u16,
    resolver: Arc<KeyResolver>,
}

impl ProfileView {
    pub fn new(professional: Professional, resolver: Arc<KeyResolver>) -> Self {
        Self {
            professional,
            reviews: Vec::new(),
            scroll: 0,
            resolver,
        }
    }

    pub const fn professional(&self) -> &Professional {
        &self.professional
    }

    pub fn set_reviews(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult<MarketMsg> {
        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.scroll = self.scroll.saturating_add(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Up) {
            self.scroll = self.scroll.saturating_sub(1);
            return EventResult::Consumed;
        }
        if self.resolver.matches_nav(&key, NavAction::Home) {
            self.scroll = 0;
            return EventResult::Consumed;
        }
        if self.resolver.matches_market(&key, MarketAction::Reload) {
            return MarketMsg::Reload.into();
        }
        if self.resolver.matches_market(&key, MarketAction::CopyPhone) {
            return MarketMsg::CopyPhone.into();
        }

        EventResult::Ignored
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let p = &self.professional;

        let badge_color = if p.available {
            theme.success()
        } else {
            theme.overlay1
        };

        let mut lines: Vec<Line> = vec![
            Line::from(vec![
                Span::styled(
                    format!("{}  ", p.avatar),
                    Style::default()
                        .fg(theme.lavender)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    p.name.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(stars(p.rating), Style::default().fg(theme.yellow)),
                Span::styled(
                    format!(" ({})", p.reviews_count),
                    Style::default().fg(theme.subtext0),
                ),
                Span::raw("   "),
                Span::styled(format!("A {}", p.distance), Style::default().fg(theme.subtext0)),
                Span::raw("   "),
                Span::styled(
                    format!("[{}]", availability_label(p.available)),
                    Style::default().fg(badge_color),
                ),
            ]),
        ];

        if let Some(phone) = &p.phone {
            lines.push(Line::from(Span::styled(
                format!("☎ {phone}"),
                Style::default().fg(theme.subtext1),
            )));
        }
        if let Some(description) = &p.description {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(theme.subtext1),
            )));
        }

        lines.push(Line::from(""));
        lines.push(section_header("Servicios", theme));
        for specialty in &p.specialties {
            lines.push(Line::from(vec![
                Span::styled(format!("  {specialty}"), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}", p.price),
                    Style::default().fg(theme.subtext0),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(section_header("Tarifas", theme));
        lines.push(Line::from(vec![
            Span::styled("  Visita:", Style::default().fg(theme.text)),
            Span::styled(
                format!("  {}", p.price),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]));

        lines.push(Line::from(""));
        lines.push(section_header(
            &format!("Opiniones ({} reseñas)", p.reviews_count),
            theme,
        ));
        if self.reviews.is_empty() {
            lines.push(Line::from(Span::styled(
                "  Sin opiniones todavía",
                Style::default().fg(theme.overlay0),
            )));
        }
        for review in &self.reviews {
            let date = review
                .created_at
                .as_deref()
                .map(format_review_date)
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}  ", review.client_avatar),
                    Style::default().fg(theme.lavender),
                ),
                Span::styled(
                    review.client_name.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(stars(review.rating), Style::default().fg(theme.yellow)),
                Span::styled(format!("  {date}"), Style::default().fg(theme.overlay1)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", review.comment),
                Style::default().fg(theme.subtext0),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()))
            .title(" Perfil ")
            .title_style(
                Style::default()
                    .fg(theme.mauve)
                    .add_modifier(Modifier::BOLD),
            );

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, area);
    }
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.mauve)
            .add_modifier(Modifier::BOLD),
    ))
}
