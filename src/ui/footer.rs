use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::notify::Notification;
use crate::ui::app::StreamStatus;
use crate::ui::theme::{DIM_TEXT, GLOBAL_BORDER, STATUS_ERROR, STATUS_OK};

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(
        &self,
        notification: Option<&Notification>,
        stream: &StreamStatus,
    ) -> Paragraph<'static> {
        let dim = Style::default().fg(DIM_TEXT);

        let status_line = match notification {
            Some(notification) => Line::from(Span::styled(
                format!(" {}", notification.message),
                Style::default().fg(STATUS_ERROR),
            )),
            None => Line::from(Span::styled(" no errors", dim)),
        };

        let stream_span = if stream.active {
            let last = stream.last.as_deref().unwrap_or("-");
            Span::styled(
                format!(" events: {} │ {}", stream.messages, last),
                Style::default().fg(STATUS_OK).add_modifier(Modifier::DIM),
            )
        } else {
            Span::styled(" events: off", dim)
        };
        let hints = Span::styled(
            "  │  ↑/↓ select · Enter open · Esc back · c cluster · r refresh · q quit",
            dim,
        );

        Paragraph::new(vec![status_line, Line::from(vec![stream_span, hints])]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
