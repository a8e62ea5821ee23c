use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::word::WordState;
use crate::ui::layout::tile_rects;
use crate::ui::theme::Theme;

/// The grid of letter tiles. Spent tiles stay visible but fade out.
pub struct TileBoard<'a> {
    pub word: &'a WordState,
    pub theme: &'a Theme,
}

impl<'a> TileBoard<'a> {
    pub fn new(word: &'a WordState, theme: &'a Theme) -> Self {
        Self { word, theme }
    }
}

impl Widget for &TileBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        for (tile, rect) in self.word.tiles.iter().zip(tile_rects(area, self.word.tiles.len())) {
            let (letter_style, border_style, bg) = if tile.used {
                (
                    Style::default().fg(colors.tile_used()),
                    Style::default().fg(colors.tile_used()),
                    colors.bg(),
                )
            } else {
                (
                    Style::default()
                        .fg(colors.tile_fg())
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(colors.tile_border()),
                    colors.tile_bg(),
                )
            };

            let block = Block::bordered()
                .border_style(border_style)
                .style(Style::default().bg(bg));
            let inner = block.inner(rect);
            block.render(rect, buf);

            Paragraph::new(Line::from(Span::styled(
                tile.letter.to_string(),
                letter_style,
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
        }
    }
}
