use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Info,
}

pub struct Toast {
    message: String,
    toast_type: ToastType,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Info)
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

/// Stack of transient notifications in the bottom-right corner.
#[derive(Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn handle_tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.toasts.is_empty() {
            return;
        }

        let toast_height = 3u16;
        let toast_width = 50u16.min(area.width.saturating_sub(4));
        let spacing = 1u16;

        // Stack toasts from bottom-right, going upward
        for (i, toast) in self.toasts.iter().enumerate() {
            let y_offset = (i as u16) * (toast_height + spacing);
            let y = area.y + area.height.saturating_sub(toast_height + y_offset + 1);
            let x = area.x + area.width.saturating_sub(toast_width + 2);

            if y < area.y {
                break; // No more room
            }

            let toast_area = Rect::new(x, y, toast_width, toast_height);

            let (border_color, icon) = match toast.toast_type {
                ToastType::Success => (theme.success(), "✓"),
                ToastType::Info => (theme.blue, "ℹ"),
            };

            frame.render_widget(Clear, toast_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(theme.surface0));

            let inner = block.inner(toast_area);
            frame.render_widget(block, toast_area);

            let text = format!("{} {}", icon, toast.message);
            let paragraph = Paragraph::new(text)
                .style(
                    Style::default()
                        .fg(theme.text)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);

            frame.render_widget(paragraph, inner);
        }
    }
}
