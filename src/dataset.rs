use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Embed)]
#[folder = "assets/words/"]
struct WordPackAssets;

/// One drillable word. Loaded from a pack at startup, never mutated afterwards.
///
/// `letters` is the tile multiset offered to the learner. It must cover the
/// word's own letters and may carry extra distractors.
#[derive(Clone, Debug, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    pub audio: String,
    pub letters: Vec<char>,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read word file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid word data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no bundled word pack named '{0}'")]
    UnknownPack(String),
}

pub struct WordList {
    entries: Vec<WordEntry>,
}

impl WordList {
    /// Build a list from raw entries, dropping the unusable ones.
    pub fn new(raw: Vec<WordEntry>) -> Self {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut entries = Vec::with_capacity(raw.len());

        for mut entry in raw {
            normalize_entry(&mut entry);
            if let Err(reason) = validate_entry(&entry) {
                warn!(id = %entry.id, word = %entry.word, "skipping word entry: {reason}");
                continue;
            }
            if !seen_ids.insert(entry.id.clone()) {
                warn!(id = %entry.id, "skipping word entry: duplicate id");
                continue;
            }
            entries.push(entry);
        }

        Self { entries }
    }

    /// Load a bundled pack by name ("en", "de").
    pub fn bundled(pack: &str) -> Result<Self, DatasetError> {
        let filename = format!("{pack}.json");
        let file = WordPackAssets::get(&filename)
            .ok_or_else(|| DatasetError::UnknownPack(pack.to_string()))?;
        let content = String::from_utf8_lossy(file.data.as_ref()).into_owned();
        Self::from_json(&content, &format!("assets/words/{filename}"))
    }

    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content, &path.display().to_string())
    }

    pub fn from_json(content: &str, origin: &str) -> Result<Self, DatasetError> {
        let raw: Vec<WordEntry> =
            serde_json::from_str(content).map_err(|source| DatasetError::Parse {
                path: origin.to_string(),
                source,
            })?;
        Ok(Self::new(raw))
    }

    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn available_packs() -> Vec<String> {
        WordPackAssets::iter()
            .filter_map(|f| f.strip_suffix(".json").map(|n| n.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> &WordEntry {
        &self.entries[index]
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

fn normalize_entry(entry: &mut WordEntry) {
    entry.word = entry.word.trim().chars().flat_map(|c| c.to_lowercase()).collect();
    entry.letters = entry
        .letters
        .iter()
        .flat_map(|c| c.to_lowercase())
        .collect();
}

/// A usable entry spells a real word and its tiles can actually assemble it.
fn validate_entry(entry: &WordEntry) -> Result<(), String> {
    if entry.id.is_empty() {
        return Err("empty id".to_string());
    }
    if entry.word.is_empty() {
        return Err("empty word".to_string());
    }
    if !entry.word.chars().all(char::is_alphabetic) {
        return Err("word contains non-letter characters".to_string());
    }
    if !entry.letters.iter().all(|c| c.is_alphabetic()) {
        return Err("letter tiles contain non-letter characters".to_string());
    }

    let mut pool: HashMap<char, usize> = HashMap::new();
    for &c in &entry.letters {
        *pool.entry(c).or_insert(0) += 1;
    }
    for c in entry.word.chars() {
        match pool.get_mut(&c) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return Err(format!("letter tiles cannot spell '{}'", entry.word)),
        }
    }

    Ok(())
}
