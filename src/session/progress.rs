use std::collections::HashMap;

use crate::dataset::WordList;
use crate::session::input::CheckOutcome;
use crate::store::schema::ProgressData;

/// Where the learner stands in the pack and what each word has cost so far.
#[derive(Debug, Default)]
pub struct SessionProgress {
    pub index: usize,
    pub mistakes: HashMap<String, u32>,
}

impl SessionProgress {
    /// Restore from a stored record, normalized against the current dataset:
    /// the index wraps modulo the list length and mistake counts for ids the
    /// dataset no longer contains are dropped.
    pub fn from_stored(data: ProgressData, words: &WordList) -> Self {
        let index = if words.is_empty() {
            0
        } else {
            data.index % words.len()
        };
        let mistakes = data
            .mistakes
            .into_iter()
            .filter(|(id, _)| words.contains_id(id))
            .collect();

        Self { index, mistakes }
    }

    /// Step to the next word, wrapping past the end of the list.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Apply a check outcome to the counters. Only a full-length spelling
    /// miss costs a mistake; length complaints and repeats never do.
    /// Returns whether anything changed and so needs saving.
    pub fn note_check(&mut self, id: &str, outcome: CheckOutcome) -> bool {
        match outcome {
            CheckOutcome::Wrong => {
                *self.mistakes.entry(id.to_string()).or_insert(0) += 1;
                true
            }
            _ => false,
        }
    }

    pub fn mistakes_for(&self, id: &str) -> u32 {
        self.mistakes.get(id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::dataset::WordEntry;
    use crate::store::schema::SCHEMA_VERSION;

    use super::*;

    fn words(ids: &[&str]) -> WordList {
        WordList::new(
            ids.iter()
                .map(|id| WordEntry {
                    id: id.to_string(),
                    word: "cat".to_string(),
                    audio: format!("{id}.wav"),
                    letters: vec!['c', 'a', 't'],
                    hint: None,
                })
                .collect(),
        )
    }

    #[test]
    fn advance_wraps_to_the_first_word() {
        let mut progress = SessionProgress::default();

        progress.advance(3);
        progress.advance(3);
        assert_eq!(progress.index, 2);

        progress.advance(3);
        assert_eq!(progress.index, 0);
    }

    #[test]
    fn advance_on_empty_list_stays_put() {
        let mut progress = SessionProgress::default();
        progress.advance(0);
        assert_eq!(progress.index, 0);
    }

    #[test]
    fn only_wrong_outcomes_cost_a_mistake() {
        let mut progress = SessionProgress::default();

        assert!(!progress.note_check("w1", CheckOutcome::Empty));
        assert!(!progress.note_check("w1", CheckOutcome::TooFew { missing: 2 }));
        assert!(!progress.note_check("w1", CheckOutcome::TooMany { extra: 1 }));
        assert!(!progress.note_check("w1", CheckOutcome::Correct));
        assert!(!progress.note_check("w1", CheckOutcome::AlreadyLocked));
        assert_eq!(progress.mistakes_for("w1"), 0);

        assert!(progress.note_check("w1", CheckOutcome::Wrong));
        assert!(progress.note_check("w1", CheckOutcome::Wrong));
        assert_eq!(progress.mistakes_for("w1"), 2);
        assert_eq!(progress.mistakes_for("w2"), 0);
    }

    #[test]
    fn from_stored_wraps_an_out_of_range_index() {
        let data = ProgressData {
            schema_version: SCHEMA_VERSION,
            index: 7,
            mistakes: HashMap::new(),
            saved_at: Utc::now(),
        };

        let progress = SessionProgress::from_stored(data, &words(&["w1", "w2", "w3"]));
        assert_eq!(progress.index, 1);
    }

    #[test]
    fn from_stored_drops_unknown_mistake_ids() {
        let mut mistakes = HashMap::new();
        mistakes.insert("w1".to_string(), 3);
        mistakes.insert("gone".to_string(), 2);
        let data = ProgressData {
            schema_version: SCHEMA_VERSION,
            index: 0,
            mistakes,
            saved_at: Utc::now(),
        };

        let progress = SessionProgress::from_stored(data, &words(&["w1", "w2"]));
        assert_eq!(progress.mistakes_for("w1"), 3);
        assert!(!progress.mistakes.contains_key("gone"));
    }

    #[test]
    fn from_stored_on_empty_dataset_resets_the_index() {
        let data = ProgressData {
            schema_version: SCHEMA_VERSION,
            index: 5,
            mistakes: HashMap::new(),
            saved_at: Utc::now(),
        };

        let progress = SessionProgress::from_stored(data, &WordList::empty());
        assert_eq!(progress.index, 0);
    }
}
