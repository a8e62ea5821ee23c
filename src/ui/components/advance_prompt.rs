use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

/// Celebration popup shown once a word locks. Clicking it or pressing Enter
/// moves on to the next word.
pub struct AdvancePrompt<'a> {
    pub word: String,
    pub theme: &'a Theme,
}

impl<'a> AdvancePrompt<'a> {
    pub fn new(word: &str, theme: &'a Theme) -> Self {
        Self {
            word: word.to_string(),
            theme,
        }
    }
}

impl Widget for &AdvancePrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", t!("prompt.title")))
            .border_style(Style::default().fg(colors.success()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("prompt.spelled", word = self.word).into_owned(),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                t!("prompt.next").into_owned(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
