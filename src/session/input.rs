use crate::session::word::{Feedback, WordState};

/// Result of trying to place a letter. Feeds the key-press or shake cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    Rejected,
}

/// Result of a check, in the order the rules apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    AlreadyLocked,
    Empty,
    TooFew { missing: usize },
    TooMany { extra: usize },
    Wrong,
    Correct,
}

/// Consume the tile at `tile` and push it onto the attempt.
///
/// Rejected while locked, when the attempt is already target-length, when the
/// index is out of range, or when that tile is spent.
pub fn append_tile(word: &mut WordState, tile: usize) -> AppendOutcome {
    if word.locked || word.attempt_len() >= word.target_len() {
        return AppendOutcome::Rejected;
    }
    if tile >= word.tiles.len() || word.tiles[tile].used {
        return AppendOutcome::Rejected;
    }

    word.tiles[tile].used = true;
    word.attempt.push(tile);
    AppendOutcome::Appended
}

/// Typed-letter variant: picks the first free tile carrying `ch`.
pub fn append_letter(word: &mut WordState, ch: char) -> AppendOutcome {
    if word.locked || word.attempt_len() >= word.target_len() {
        return AppendOutcome::Rejected;
    }
    match word.free_tile_with(ch) {
        Some(tile) => append_tile(word, tile),
        None => AppendOutcome::Rejected,
    }
}

/// Undo the most recent pick, releasing its tile. No-op when locked or empty.
pub fn remove_last(word: &mut WordState) -> bool {
    if word.locked {
        return false;
    }
    match word.attempt.pop() {
        Some(tile) => {
            word.tiles[tile].used = false;
            true
        }
        None => false,
    }
}

/// Release every picked tile and reset the banner. No-op when locked or empty.
pub fn clear(word: &mut WordState) -> bool {
    if word.locked || word.attempt.is_empty() {
        return false;
    }
    for &tile in &word.attempt {
        word.tiles[tile].used = false;
    }
    word.attempt.clear();
    word.feedback = Feedback::Neutral;
    true
}

/// Judge the attempt. Length rules run before the letter comparison, and only
/// a full-length mismatch counts as a real spelling miss.
pub fn check(word: &mut WordState) -> CheckOutcome {
    if word.locked {
        return CheckOutcome::AlreadyLocked;
    }

    let got = word.attempt_len();
    let want = word.target_len();

    if got == 0 {
        word.feedback = Feedback::Empty;
        return CheckOutcome::Empty;
    }
    if got < want {
        let missing = want - got;
        word.feedback = Feedback::TooFew { missing };
        return CheckOutcome::TooFew { missing };
    }
    if got > want {
        let extra = got - want;
        word.feedback = Feedback::TooMany { extra };
        return CheckOutcome::TooMany { extra };
    }

    if word.attempt_string() == word.target_string() {
        word.locked = true;
        word.feedback = Feedback::Correct;
        CheckOutcome::Correct
    } else {
        word.feedback = Feedback::Wrong {
            hint: word.hint.clone(),
        };
        CheckOutcome::Wrong
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::dataset::WordEntry;

    use super::*;

    fn word(target: &str, letters: &str) -> WordState {
        let entry = WordEntry {
            id: "w1".to_string(),
            word: target.to_string(),
            audio: "w1.wav".to_string(),
            letters: letters.chars().collect(),
            hint: None,
        };
        let mut rng = SmallRng::seed_from_u64(11);
        WordState::new(&entry, &mut rng)
    }

    fn type_word(state: &mut WordState, text: &str) {
        for ch in text.chars() {
            append_letter(state, ch);
        }
    }

    #[test]
    fn append_consumes_a_matching_tile() {
        let mut state = word("cat", "tac");

        assert_eq!(append_letter(&mut state, 'c'), AppendOutcome::Appended);
        assert_eq!(state.attempt_string(), "c");
        assert_eq!(state.tiles.iter().filter(|t| t.used).count(), 1);
    }

    #[test]
    fn append_rejects_a_letter_with_no_free_tile() {
        let mut state = word("cat", "tac");

        assert_eq!(append_letter(&mut state, 'z'), AppendOutcome::Rejected);
        assert!(state.attempt.is_empty());

        append_letter(&mut state, 'a');
        assert_eq!(append_letter(&mut state, 'a'), AppendOutcome::Rejected);
        assert_eq!(state.attempt_string(), "a");
    }

    #[test]
    fn append_caps_at_target_length() {
        let mut state = word("hund", "hundt");
        type_word(&mut state, "hund");

        assert_eq!(append_letter(&mut state, 't'), AppendOutcome::Rejected);
        assert_eq!(state.attempt_len(), 4);
    }

    #[test]
    fn append_tile_rejects_used_and_out_of_range() {
        let mut state = word("cat", "tac");

        assert_eq!(append_tile(&mut state, 0), AppendOutcome::Appended);
        assert_eq!(append_tile(&mut state, 0), AppendOutcome::Rejected);
        assert_eq!(append_tile(&mut state, 99), AppendOutcome::Rejected);
    }

    #[test]
    fn duplicate_letters_use_distinct_tiles() {
        let mut state = word("ball", "ball");
        type_word(&mut state, "ball");

        assert_eq!(state.attempt_string(), "ball");
        assert_eq!(state.tiles.iter().filter(|t| t.used).count(), 4);
        assert_eq!(check(&mut state), CheckOutcome::Correct);
    }

    #[test]
    fn remove_last_releases_the_exact_tile() {
        let mut state = word("ball", "ball");
        type_word(&mut state, "bal");

        let last = *state.attempt.last().unwrap();
        assert!(remove_last(&mut state));
        assert!(!state.tiles[last].used);
        assert_eq!(state.attempt_string(), "ba");
    }

    #[test]
    fn remove_last_on_empty_attempt_is_a_noop() {
        let mut state = word("cat", "tac");

        assert!(!remove_last(&mut state));
        assert!(state.attempt.is_empty());
    }

    #[test]
    fn clear_releases_everything_and_resets_feedback() {
        let mut state = word("cat", "tac");
        type_word(&mut state, "ca");
        check(&mut state);
        assert_ne!(state.feedback, Feedback::Neutral);

        assert!(clear(&mut state));
        assert!(state.attempt.is_empty());
        assert!(state.tiles.iter().all(|t| !t.used));
        assert_eq!(state.feedback, Feedback::Neutral);

        // Second clear has nothing to do
        assert!(!clear(&mut state));
    }

    #[test]
    fn check_on_empty_attempt() {
        let mut state = word("cat", "tac");

        assert_eq!(check(&mut state), CheckOutcome::Empty);
        assert_eq!(state.feedback, Feedback::Empty);
        assert!(!state.locked);
    }

    #[test]
    fn check_reports_missing_count() {
        let mut state = word("hund", "hund");
        type_word(&mut state, "hu");

        assert_eq!(check(&mut state), CheckOutcome::TooFew { missing: 2 });
        assert_eq!(state.feedback, Feedback::TooFew { missing: 2 });
        assert!(!state.locked);
    }

    #[test]
    fn check_reports_overlong_attempts() {
        let mut state = word("cat", "taca");
        type_word(&mut state, "cat");
        // The cap stops a fourth append; force the state to exercise the rule.
        let tile = state.free_tile_with('a').unwrap();
        state.tiles[tile].used = true;
        state.attempt.push(tile);

        assert_eq!(check(&mut state), CheckOutcome::TooMany { extra: 1 });
        assert!(!state.locked);
    }

    #[test]
    fn check_wrong_keeps_the_attempt_editable() {
        let mut state = word("hund", "hund");
        type_word(&mut state, "hudn");

        assert_eq!(check(&mut state), CheckOutcome::Wrong);
        assert!(matches!(state.feedback, Feedback::Wrong { .. }));
        assert!(!state.locked);

        // The learner can fix it in place
        remove_last(&mut state);
        remove_last(&mut state);
        type_word(&mut state, "nd");
        assert_eq!(check(&mut state), CheckOutcome::Correct);
    }

    #[test]
    fn check_correct_locks_the_word() {
        let mut state = word("hund", "hund");
        type_word(&mut state, "hund");

        assert_eq!(check(&mut state), CheckOutcome::Correct);
        assert!(state.locked);
        assert_eq!(state.feedback, Feedback::Correct);
    }

    #[test]
    fn check_wrong_carries_the_hint() {
        let entry = WordEntry {
            id: "w1".to_string(),
            word: "cat".to_string(),
            audio: "w1.wav".to_string(),
            letters: vec!['t', 'a', 'c'],
            hint: Some("a pet that meows".to_string()),
        };
        let mut rng = SmallRng::seed_from_u64(5);
        let mut state = WordState::new(&entry, &mut rng);
        type_word(&mut state, "act");

        check(&mut state);
        assert_eq!(
            state.feedback,
            Feedback::Wrong {
                hint: Some("a pet that meows".to_string())
            }
        );
    }

    #[test]
    fn locked_word_ignores_every_edit() {
        let mut state = word("cat", "tac");
        type_word(&mut state, "cat");
        check(&mut state);
        assert!(state.locked);

        assert_eq!(append_letter(&mut state, 'c'), AppendOutcome::Rejected);
        assert!(!remove_last(&mut state));
        assert!(!clear(&mut state));
        assert_eq!(check(&mut state), CheckOutcome::AlreadyLocked);
        assert_eq!(state.attempt_string(), "cat");
        assert_eq!(state.feedback, Feedback::Correct);
    }

    #[test]
    fn checking_twice_stays_correct_without_side_effects() {
        let mut state = word("cat", "tac");
        type_word(&mut state, "cat");

        assert_eq!(check(&mut state), CheckOutcome::Correct);
        assert_eq!(check(&mut state), CheckOutcome::AlreadyLocked);
        assert_eq!(state.feedback, Feedback::Correct);
    }
}
