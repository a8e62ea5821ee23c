use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Widget};

use crate::session::word::WordState;
use crate::ui::theme::Theme;

/// One cell per target letter: picked letters in order, underscores for the
/// rest. `jitter` shifts the row sideways while a shake cue is running.
pub struct AttemptRow<'a> {
    pub word: &'a WordState,
    pub jitter: i16,
    pub theme: &'a Theme,
}

impl<'a> AttemptRow<'a> {
    pub fn new(word: &'a WordState, jitter: i16, theme: &'a Theme) -> Self {
        Self { word, jitter, theme }
    }

    /// Slot cells in display order.
    pub fn slots(word: &WordState) -> Vec<Option<char>> {
        let picked: Vec<char> = word.attempt_string().chars().collect();
        (0..word.target_len())
            .map(|i| picked.get(i).copied())
            .collect()
    }
}

impl Widget for &AttemptRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border_color = if self.word.locked {
            colors.success()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_color = if self.word.locked {
            colors.success()
        } else {
            colors.slot_filled()
        };
        let mut spans: Vec<Span> = Vec::new();
        for (i, slot) in Self::slots(self.word).iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            match slot {
                Some(ch) => spans.push(Span::styled(
                    ch.to_string(),
                    Style::default()
                        .fg(filled_color)
                        .add_modifier(Modifier::BOLD),
                )),
                None => spans.push(Span::styled(
                    "_",
                    Style::default().fg(colors.slot_empty()),
                )),
            }
        }

        let content_width = (self.word.target_len() * 2).saturating_sub(1) as u16;
        let base = inner.x + inner.width.saturating_sub(content_width) / 2;
        let x = (base as i32 + self.jitter as i32)
            .clamp(inner.x as i32, (inner.x + inner.width.saturating_sub(1)) as i32)
            as u16;
        let max_width = (inner.x + inner.width).saturating_sub(x);
        buf.set_line(x, inner.y, &Line::from(spans), max_width);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::dataset::WordEntry;
    use crate::session::input::append_letter;

    use super::*;

    #[test]
    fn slots_show_picked_letters_then_blanks() {
        let entry = WordEntry {
            id: "w1".to_string(),
            word: "hund".to_string(),
            audio: "w1.wav".to_string(),
            letters: "hund".chars().collect(),
            hint: None,
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mut word = WordState::new(&entry, &mut rng);
        append_letter(&mut word, 'h');
        append_letter(&mut word, 'u');

        let slots = AttemptRow::slots(&word);
        assert_eq!(slots, vec![Some('h'), Some('u'), None, None]);
    }
}
