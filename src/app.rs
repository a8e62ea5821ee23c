use std::path::Path;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::audio::player::{Cue, LoadedClip, Player};
use crate::config::Config;
use crate::dataset::{DatasetError, WordEntry, WordList};
use crate::session::input::{self, AppendOutcome, CheckOutcome};
use crate::session::progress::SessionProgress;
use crate::session::word::WordState;
use crate::store::json_store::JsonStore;
use crate::store::schema::ProgressData;
use crate::ui::theme::Theme;

const SHAKE_DURATION: Duration = Duration::from_millis(350);
const SHAKE_PERIOD_MS: u128 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Practice,
    NoWords,
}

/// Why the speaker affordance is greyed out, if it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioStatus {
    Ready,
    Muted,
    Unavailable,
}

pub struct App {
    pub screen: AppScreen,
    pub words: WordList,
    pub progress: SessionProgress,
    pub word: Option<WordState>,
    pub audio_status: AudioStatus,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    pub shake_started: Option<Instant>,
    clip: Option<LoadedClip>,
    player: Option<Player>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, words: WordList) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_else(|| {
            warn!(
                "theme '{}' not found (bundled: {})",
                config.theme,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = match JsonStore::new() {
            Ok(store) => Some(store),
            Err(err) => {
                warn!("progress store unavailable: {err}");
                None
            }
        };

        let progress = if let Some(ref s) = store {
            // load_progress returns None if the file exists but can't parse
            match s.load_progress() {
                Some(data) if !data.needs_reset() => SessionProgress::from_stored(data, &words),
                _ => SessionProgress::default(),
            }
        } else {
            SessionProgress::default()
        };

        let player = if config.audio_enabled {
            match Player::new() {
                Ok(player) => Some(player),
                Err(err) => {
                    warn!("audio output unavailable: {err}");
                    None
                }
            }
        } else {
            None
        };

        let screen = if words.is_empty() {
            AppScreen::NoWords
        } else {
            AppScreen::Practice
        };

        let mut app = Self {
            screen,
            words,
            progress,
            word: None,
            audio_status: AudioStatus::Muted,
            theme,
            config,
            store,
            should_quit: false,
            shake_started: None,
            clip: None,
            player,
            rng: SmallRng::from_entropy(),
        };
        if app.screen == AppScreen::Practice {
            app.load_word();
        }
        app
    }

    pub fn current_entry(&self) -> Option<&WordEntry> {
        if self.words.is_empty() {
            None
        } else {
            Some(self.words.entry(self.progress.index))
        }
    }

    pub fn is_locked(&self) -> bool {
        self.word.as_ref().is_some_and(|w| w.locked)
    }

    /// Rebuild all per-word state for the entry at the current index.
    fn load_word(&mut self) {
        let entry = self.words.entry(self.progress.index);
        let audio_file = entry.audio.clone();
        let state = WordState::new(entry, &mut self.rng);
        info!(word = %state.target_string(), index = self.progress.index, "word loaded");

        self.word = Some(state);
        self.shake_started = None;
        self.clip = None;
        self.audio_status = match self.player {
            Some(ref player) => {
                let path = self.config.media_dir_path().join(&audio_file);
                match player.load_clip(&path) {
                    Ok(clip) => {
                        self.clip = Some(clip);
                        AudioStatus::Ready
                    }
                    Err(err) => {
                        warn!("word clip unavailable: {err}");
                        AudioStatus::Unavailable
                    }
                }
            }
            None if self.config.audio_enabled => AudioStatus::Unavailable,
            None => AudioStatus::Muted,
        };
    }

    pub fn append_letter(&mut self, ch: char) {
        let Some(ref mut word) = self.word else { return };
        match input::append_letter(word, ch) {
            AppendOutcome::Appended => self.play_cue(Cue::KeyPress),
            AppendOutcome::Rejected => self.start_shake(),
        }
    }

    pub fn append_tile(&mut self, tile: usize) {
        let Some(ref mut word) = self.word else { return };
        match input::append_tile(word, tile) {
            AppendOutcome::Appended => self.play_cue(Cue::KeyPress),
            AppendOutcome::Rejected => self.start_shake(),
        }
    }

    pub fn remove_last(&mut self) {
        if let Some(ref mut word) = self.word {
            input::remove_last(word);
        }
    }

    pub fn clear_attempt(&mut self) {
        if let Some(ref mut word) = self.word {
            input::clear(word);
        }
    }

    pub fn check(&mut self) {
        let Some(ref mut word) = self.word else { return };
        let outcome = input::check(word);

        match outcome {
            CheckOutcome::Correct => self.play_cue(Cue::Success),
            CheckOutcome::Empty
            | CheckOutcome::TooFew { .. }
            | CheckOutcome::TooMany { .. }
            | CheckOutcome::Wrong => {
                self.play_cue(Cue::Error);
                self.start_shake();
            }
            CheckOutcome::AlreadyLocked => {}
        }

        if let Some(entry) = self.current_entry() {
            let id = entry.id.clone();
            if self.progress.note_check(&id, outcome) {
                info!(word_id = %id, count = self.progress.mistakes_for(&id), "mistake recorded");
                self.save_progress();
            }
        }
    }

    /// Move to the next word, wrapping at the end of the list. Only a locked
    /// word can be advanced past.
    pub fn advance(&mut self) {
        if !self.is_locked() {
            return;
        }
        self.progress.advance(self.words.len());
        self.save_progress();
        self.load_word();
    }

    /// Play the current word's clip from the start.
    pub fn play_word(&mut self) {
        let Some(clip) = self.clip.clone() else { return };
        let Some(ref mut player) = self.player else { return };

        if let Err(err) = player.play_clip(&clip) {
            warn!("word playback failed: {err}");
            self.clip = None;
            self.audio_status = AudioStatus::Unavailable;
        }
    }

    fn play_cue(&self, cue: Cue) {
        if let Some(ref player) = self.player {
            player.play_cue(cue);
        }
    }

    fn start_shake(&mut self) {
        self.shake_started = Some(Instant::now());
    }

    /// Sideways offset of the attempt row while a shake is running.
    pub fn shake_offset(&self) -> i16 {
        match self.shake_started {
            Some(start) if start.elapsed() < SHAKE_DURATION => {
                if (start.elapsed().as_millis() / SHAKE_PERIOD_MS) % 2 == 0 {
                    1
                } else {
                    -1
                }
            }
            _ => 0,
        }
    }

    /// Timed cleanup driven by the event thread's tick.
    pub fn tick(&mut self) {
        if let Some(start) = self.shake_started {
            if start.elapsed() >= SHAKE_DURATION {
                self.shake_started = None;
            }
        }
    }

    fn save_progress(&self) {
        let Some(ref store) = self.store else { return };
        let data = ProgressData {
            index: self.progress.index,
            mistakes: self.progress.mistakes.clone(),
            ..ProgressData::default()
        };
        if let Err(err) = store.save_progress(&data) {
            warn!("progress save failed: {err}");
        }
    }
}

/// Dataset precedence: explicit file, then the configured bundled pack, then
/// the English pack. A named file that fails to load is a startup error; a
/// bad pack name falls back with a warning.
pub fn load_words(config: &Config) -> Result<WordList, DatasetError> {
    if let Some(ref path) = config.words_file {
        return WordList::from_file(Path::new(path));
    }
    match WordList::bundled(&config.word_pack) {
        Ok(words) => Ok(words),
        Err(err) => {
            warn!(
                "word pack '{}' unusable (bundled: {}): {err}",
                config.word_pack,
                WordList::available_packs().join(", ")
            );
            Ok(WordList::bundled("en").unwrap_or_else(|_| WordList::empty()))
        }
    }
}
