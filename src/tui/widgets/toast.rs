//! Toast notification widget

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::{Duration, Instant};

use crate::session::{Notice, NoticeKind};

const TOAST_TTL: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

/// Short-lived notices rendered in the bottom-right corner.
pub struct Toasts {
    entries: Vec<(Notice, Instant)>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, notice: Notice) {
        self.entries.push((notice, Instant::now()));
    }

    /// Drop notices older than the display window.
    pub fn expire(&mut self) {
        self.entries.retain(|(_, at)| at.elapsed() < TOAST_TTL);
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let visible: Vec<_> = self.entries.iter().rev().take(MAX_VISIBLE).collect();

        for (i, (notice, _)) in visible.iter().enumerate() {
            let width = (notice.message.len() as u16 + 4).min(area.width.saturating_sub(2));
            let height = 3;
            let y_offset = (i as u16 + 1) * height;

            if area.height < y_offset + 1 || area.width < width + 1 {
                continue;
            }

            let toast_area = Rect {
                x: area.width.saturating_sub(width + 1),
                y: area.height.saturating_sub(y_offset + 1),
                width,
                height,
            };

            let color = match notice.kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
                NoticeKind::Info => Color::Cyan,
            };

            frame.render_widget(Clear, toast_area);
            let widget = Paragraph::new(notice.message.clone())
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                );
            frame.render_widget(widget, toast_area);
        }
    }
}
