//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use crate::difficulty::Difficulty;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
    /// Best score per difficulty
    pub best_scores: BestScores,
}

/// Key bindings (stored as strings for easy editing)
/// Each command can have one or more keys bound to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub restart: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Visual settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Draw the drop projection under the falling piece
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Gameplay settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Preset highlighted first on the difficulty screen
    pub difficulty: Option<Difficulty>,
}

/// Best final score reached on each difficulty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestScores {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            rotate: vec!["Up".to_string()],
            soft_drop: vec!["Down".to_string()],
            pause: vec!["p".to_string()],
            restart: vec!["Space".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl BestScores {
    pub fn get(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Record a finished game, returns true on a new best
    pub fn record(&mut self, difficulty: Difficulty, score: u64) -> bool {
        let best = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        };
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or create default
    pub fn load() -> (Self, LoadStatus) {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), LoadStatus::Missing),
        }
    }

    /// Load settings from `path`; an unparseable file yields defaults
    pub fn load_from(path: &Path) -> (Self, LoadStatus) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return (Self::default(), LoadStatus::Missing);
            }
            Err(e) => {
                tracing::warn!("Could not read settings {}: {}", path.display(), e);
                return (Self::default(), LoadStatus::Unreadable);
            }
        };

        match Self::from_toml(&contents) {
            Ok(settings) => (settings, LoadStatus::Loaded),
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                (Self::default(), LoadStatus::Unreadable)
            }
        }
    }

    /// Parse settings, filling anything missing with defaults
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse settings: {}", e))
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), String> {
        let Some(dir) = Self::config_dir() else {
            return Err("Could not determine config directory".to_string());
        };

        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };

        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config dir: {}", e))?;

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// How the settings file looked at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    Missing,
    /// The file exists but could not be read or parsed
    Unreadable,
}

impl LoadStatus {
    /// Whether writing settings back is safe. An unreadable file is only
    /// replaced once there is something worth keeping (a new best score or a
    /// difficulty choice).
    pub fn should_save(self, changed: bool) -> bool {
        match self {
            LoadStatus::Loaded | LoadStatus::Missing => true,
            LoadStatus::Unreadable => changed,
        }
    }
}

impl VisualSettings {
    /// Get the (block, ghost) characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", "::"),
            "round" => ("()", "::"),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_classic_controls() {
        let keys = KeyBindings::default();
        assert_eq!(keys.move_left, vec!["Left"]);
        assert_eq!(keys.rotate, vec!["Up"]);
        assert_eq!(keys.pause, vec!["p"]);
        assert_eq!(keys.restart, vec!["Space"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [keys]
            rotate = ["Up", "x"]

            [gameplay]
            difficulty = "hard"
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.keys.rotate, vec!["Up", "x"]);
        assert_eq!(settings.keys.move_left, vec!["Left"]);
        assert_eq!(settings.gameplay.difficulty, Some(Difficulty::Hard));
        assert!(settings.visual.show_ghost);
    }

    #[test]
    fn test_round_trip_single_key_as_string() {
        let settings = Settings::default();
        let text = toml::to_string_pretty(&settings).expect("serializable");
        assert!(text.contains("move_left = \"Left\""));
        let parsed = Settings::from_toml(&text).expect("valid settings");
        assert_eq!(parsed.keys.quit, settings.keys.quit);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(Settings::from_toml("keys = 3").is_err());
    }

    #[test]
    fn test_best_scores() {
        let mut best = BestScores::default();
        assert!(best.record(Difficulty::Hard, 300));
        assert!(!best.record(Difficulty::Hard, 200));
        assert_eq!(best.get(Difficulty::Hard), 300);
        assert_eq!(best.get(Difficulty::Easy), 0);
    }

    fn scratch_file(name: &str, contents: Option<&str>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blockfall-test-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("scratch dir");
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        if let Some(contents) = contents {
            fs::write(&path, contents).expect("scratch file");
        }
        path
    }

    #[test]
    fn test_load_reports_status() {
        let path = scratch_file("good.toml", Some("[gameplay]\ndifficulty = \"easy\"\n"));
        let (settings, status) = Settings::load_from(&path);
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(settings.gameplay.difficulty, Some(Difficulty::Easy));

        let path = scratch_file("absent.toml", None);
        assert_eq!(Settings::load_from(&path).1, LoadStatus::Missing);

        let path = scratch_file("broken.toml", Some("keys = 3"));
        let (settings, status) = Settings::load_from(&path);
        assert_eq!(status, LoadStatus::Unreadable);
        assert_eq!(settings.gameplay.difficulty, None);
    }

    #[test]
    fn test_unreadable_file_kept_unless_changed() {
        assert!(LoadStatus::Loaded.should_save(false));
        assert!(LoadStatus::Missing.should_save(false));
        assert!(!LoadStatus::Unreadable.should_save(false));
        assert!(LoadStatus::Unreadable.should_save(true));
    }
}
