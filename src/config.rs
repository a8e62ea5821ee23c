use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_word_pack")]
    pub word_pack: String,
    #[serde(default)]
    pub words_file: Option<String>,
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_word_pack() -> String {
    "en".to_string()
}
fn default_media_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stavr")
        .join("media")
        .to_string_lossy()
        .to_string()
}
fn default_audio_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            word_pack: default_word_pack(),
            words_file: None,
            media_dir: default_media_dir(),
            audio_enabled: default_audio_enabled(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stavr")
            .join("config.toml")
    }

    pub fn media_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.media_dir)
    }

    /// Validate `locale` against the compiled translations, resetting to the
    /// default if a config file asks for one that does not exist.
    pub fn normalize_locale(&mut self, available: &[&str]) {
        if !available.contains(&self.locale.as_str()) {
            self.locale = default_locale();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.locale, "en");
        assert_eq!(config.word_pack, "en");
        assert_eq!(config.words_file, None);
        assert!(config.audio_enabled);
        assert!(config.media_dir.contains("media"));
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let toml_str = r#"
theme = "high-contrast"
word_pack = "de"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "high-contrast");
        assert_eq!(config.word_pack, "de");
        // Untouched fields keep their defaults
        assert_eq!(config.locale, "en");
        assert!(config.audio_enabled);
    }

    #[test]
    fn serde_roundtrip() {
        let mut config = Config::default();
        config.words_file = Some("/tmp/words.json".to_string());
        config.audio_enabled = false;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.words_file, deserialized.words_file);
        assert_eq!(config.audio_enabled, deserialized.audio_enabled);
        assert_eq!(config.media_dir, deserialized.media_dir);
    }

    #[test]
    fn normalize_locale_keeps_known_values() {
        let mut config = Config::default();
        config.locale = "de".to_string();
        config.normalize_locale(&["en", "de"]);
        assert_eq!(config.locale, "de");
    }

    #[test]
    fn normalize_locale_resets_unknown_values() {
        let mut config = Config::default();
        config.locale = "fr".to_string();
        config.normalize_locale(&["en", "de"]);
        assert_eq!(config.locale, "en");
    }
}
