use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::word::Feedback;
use crate::ui::theme::Theme;

pub struct FeedbackBanner<'a> {
    pub feedback: &'a Feedback,
    pub theme: &'a Theme,
}

impl<'a> FeedbackBanner<'a> {
    pub fn new(feedback: &'a Feedback, theme: &'a Theme) -> Self {
        Self { feedback, theme }
    }

    /// Localized banner text for a feedback state.
    pub fn message(feedback: &Feedback) -> String {
        match feedback {
            Feedback::Neutral => t!("feedback.prompt").into_owned(),
            Feedback::Empty => t!("feedback.empty").into_owned(),
            Feedback::TooFew { missing: 1 } => t!("feedback.missing_one").into_owned(),
            Feedback::TooFew { missing } => {
                t!("feedback.missing_many", count = missing).into_owned()
            }
            Feedback::TooMany { extra } => t!("feedback.too_many", count = extra).into_owned(),
            Feedback::Wrong { hint: Some(hint) } => {
                t!("feedback.wrong_hint", hint = hint).into_owned()
            }
            Feedback::Wrong { hint: None } => t!("feedback.wrong").into_owned(),
            Feedback::Correct => t!("feedback.correct").into_owned(),
        }
    }

    fn color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.feedback {
            Feedback::Neutral => colors.text_dim(),
            Feedback::Correct => colors.success(),
            Feedback::Wrong { .. } => colors.error(),
            Feedback::Empty | Feedback::TooFew { .. } | Feedback::TooMany { .. } => {
                colors.warning()
            }
        }
    }
}

impl Widget for &FeedbackBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default().fg(self.color());
        if *self.feedback != Feedback::Neutral {
            style = style.add_modifier(Modifier::BOLD);
        }

        Paragraph::new(Line::from(Span::styled(
            Self::message(self.feedback),
            style,
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counts_appear_in_the_message() {
        rust_i18n::set_locale("en");
        let message = FeedbackBanner::message(&Feedback::TooFew { missing: 3 });
        assert!(message.contains('3'), "got: {message}");
    }

    #[test]
    fn wrong_message_carries_the_hint() {
        rust_i18n::set_locale("en");
        let message = FeedbackBanner::message(&Feedback::Wrong {
            hint: Some("it barks".to_string()),
        });
        assert!(message.contains("it barks"), "got: {message}");
    }

    #[test]
    fn every_state_has_a_nonempty_message() {
        rust_i18n::set_locale("en");
        let states = [
            Feedback::Neutral,
            Feedback::Empty,
            Feedback::TooFew { missing: 1 },
            Feedback::TooFew { missing: 2 },
            Feedback::TooMany { extra: 1 },
            Feedback::Wrong { hint: None },
            Feedback::Correct,
        ];
        for state in states {
            assert!(!FeedbackBanner::message(&state).is_empty(), "{state:?}");
        }
    }
}
