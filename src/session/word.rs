use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::dataset::WordEntry;

const MAX_RESHUFFLES: usize = 32;

/// One selectable letter tile. `used` means the attempt has consumed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub letter: char,
    pub used: bool,
}

/// What the banner under the attempt row shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Neutral,
    Empty,
    TooFew { missing: usize },
    TooMany { extra: usize },
    Wrong { hint: Option<String> },
    Correct,
}

/// Per-word working state. Rebuilt from the dataset entry on every advance.
///
/// The attempt stores tile indices rather than characters, so a letter that
/// appears on two tiles consumes them one at a time and undo releases the
/// exact tile that was picked.
pub struct WordState {
    pub target: Vec<char>,
    pub tiles: Vec<Tile>,
    pub attempt: Vec<usize>,
    pub locked: bool,
    pub feedback: Feedback,
    pub hint: Option<String>,
}

impl WordState {
    pub fn new(entry: &WordEntry, rng: &mut SmallRng) -> Self {
        let mut letters = entry.letters.clone();
        shuffle_tiles(&mut letters, &entry.word, rng);

        Self {
            target: entry.word.chars().collect(),
            tiles: letters
                .into_iter()
                .map(|letter| Tile { letter, used: false })
                .collect(),
            attempt: Vec::new(),
            locked: false,
            feedback: Feedback::Neutral,
            hint: entry.hint.clone(),
        }
    }

    pub fn attempt_len(&self) -> usize {
        self.attempt.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn attempt_string(&self) -> String {
        self.attempt.iter().map(|&i| self.tiles[i].letter).collect()
    }

    pub fn target_string(&self) -> String {
        self.target.iter().collect()
    }

    /// First unused tile carrying `ch`, if any.
    pub fn free_tile_with(&self, ch: char) -> Option<usize> {
        self.tiles.iter().position(|t| !t.used && t.letter == ch)
    }
}

/// Uniform shuffle that avoids presenting the solved word outright.
///
/// Re-rolls while the tile row spells the target, bounded so degenerate sets
/// (single tile, all tiles equal) cannot spin forever.
fn shuffle_tiles(letters: &mut [char], word: &str, rng: &mut SmallRng) {
    letters.shuffle(rng);

    if letters.len() < 2 || letters.iter().all(|&c| c == letters[0]) {
        return;
    }
    let target: Vec<char> = word.chars().collect();
    if letters.len() != target.len() {
        // Distractors present, the row can never spell the word.
        return;
    }

    let mut tries = 0;
    while letters == target.as_slice() && tries < MAX_RESHUFFLES {
        letters.shuffle(rng);
        tries += 1;
    }
}
