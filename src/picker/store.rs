use super::error::{PickError, PickResult};
use super::history::History;
use super::item::Registry;
use super::seed::Seed;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_STATE_FILE: &str = "pool.json";

/// Everything that survives between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub items: Registry,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub seed: Seed,
}

#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Store {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    ///
    /// Reads the state file. A missing file is an empty state; a file that
    /// exists but does not parse is an error, never a reset.
    ///
    pub fn load(&self) -> PickResult<PersistedState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No state at {}, starting empty", self.path.display());
                return Ok(PersistedState::default());
            }
            Err(err) => return Err(err.into()),
        };
        let state: PersistedState =
            serde_json::from_str(&contents).map_err(|err| self.corrupt(err.to_string()))?;
        state.items.validate().map_err(|reason| self.corrupt(reason))?;
        debug!(
            "Loaded {} items and {} history entries from {}",
            state.items.len(),
            state.history.len(),
            self.path.display()
        );
        Ok(state)
    }

    ///
    /// Rewrites the whole file. The new contents go to a sibling temp file
    /// first and are renamed over the old one.
    ///
    pub fn save(&self, state: &PersistedState) -> PickResult<()> {
        let mut serialized = serde_json::to_string_pretty(state)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        serialized.push('\n');

        let temp_path = self.temp_path();
        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(serialized.as_bytes())?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|_| fs::rename(&temp_path, &self.path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        debug!("Saved state to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| DEFAULT_STATE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt(&self, reason: String) -> PickError {
        PickError::CorruptState {
            path: self.path.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_state() -> PersistedState {
        let mut state = PersistedState::default();
        state.items.add_or_update("Ramen", 2.0).unwrap();
        state.items.add_or_update("Pho", 1.0).unwrap();
        state.items.add_or_update("Крем-брюле", 0.25).unwrap();
        state.history.append(vec!["Ramen".to_string()]);
        state
            .history
            .append(vec!["Pho".to_string(), "Ramen".to_string()]);
        state.seed = Seed::Textual("friday".to_string());
        state
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("pool.json"));
        let state = store.load().unwrap();
        assert!(state.items.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.seed, Seed::Unset);
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("pool.json"));
        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_round_trip_numeric_and_unset_seed() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("pool.json"));
        for seed in [Seed::Numeric(-42), Seed::Unset] {
            let mut state = sample_state();
            state.seed = seed;
            store.save(&state).unwrap();
            assert_eq!(store.load().unwrap(), state);
        }
    }

    #[test]
    fn test_file_is_readable_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.json");
        let store = Store::new(&path);
        store.save(&sample_state()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Крем-брюле"));
        assert!(text.contains("\n  \"items\": ["));
        assert!(text.contains("\"seed\": \"friday\""));
        assert!(!dir.path().join("pool.json.tmp").exists());
    }

    #[test]
    fn test_loads_plain_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(
            &path,
            r#"{"items": [{"name": "A", "weight": 1}, {"name": "B", "weight": 2.5}],
                "history": [{"pick": ["A"]}, {"pick": ["B", "A"]}],
                "seed": 42}"#,
        )
        .unwrap();
        let state = Store::new(&path).load().unwrap();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items.list()[0].weight, 1.0);
        assert_eq!(state.history.entries()[1].pick, vec!["B", "A"]);
        assert_eq!(state.seed, Seed::Numeric(42));
    }

    #[test]
    fn test_missing_history_and_seed_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(&path, r#"{"items": []}"#).unwrap();
        let state = Store::new(&path).load().unwrap();
        assert_eq!(state, PersistedState::default());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.json");
        for contents in [
            "not json",
            r#"{"history": []}"#,
            r#"{"items": [{"name": "A"}]}"#,
            r#"{"items": [{"name": "A", "weight": -1}]}"#,
            r#"{"items": [{"name": "A", "weight": 1}, {"name": "a", "weight": 2}]}"#,
            r#"{"items": [], "seed": [1, 2]}"#,
        ] {
            fs::write(&path, contents).unwrap();
            match Store::new(&path).load() {
                Err(PickError::CorruptState { path: reported, .. }) => {
                    assert_eq!(reported, path)
                }
                other => panic!("{:?} loaded as {:?}", contents, other),
            }
            // Still there for the user to fix
            assert_eq!(fs::read_to_string(&path).unwrap(), contents);
        }
    }

    #[test]
    fn test_failed_save_keeps_old_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.json");
        let store = Store::new(&path);
        store.save(&sample_state()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(dir.path().join("pool.json.tmp")).unwrap();
        assert!(matches!(
            store.save(&PersistedState::default()),
            Err(PickError::Io(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
