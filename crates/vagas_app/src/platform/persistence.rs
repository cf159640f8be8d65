use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vagas_core::KeyValueStore;
use vagas_engine::AtomicFileWriter;
use vagas_logging::{vagas_error, vagas_info, vagas_warn};

const STATE_FILENAME: &str = ".vagas_state.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedState {
    entries: BTreeMap<String, String>,
}

/// Key-value flags kept in `<state_dir>/.vagas_state.ron`, rewritten on every change.
#[derive(Debug)]
pub struct RonStore {
    writer: AtomicFileWriter,
    entries: BTreeMap<String, String>,
}

impl RonStore {
    /// Unreadable or corrupt state starts empty; the next write replaces it.
    pub fn open(state_dir: &Path) -> Self {
        let writer = AtomicFileWriter::new(state_dir);
        let entries = match writer.read(STATE_FILENAME) {
            Ok(Some(content)) => match ron::from_str::<PersistedState>(&content) {
                Ok(state) => {
                    vagas_info!(
                        "Loaded {} persisted entries from {:?}",
                        state.entries.len(),
                        state_dir.join(STATE_FILENAME)
                    );
                    state.entries
                }
                Err(err) => {
                    vagas_warn!("Failed to parse persisted state in {:?}: {}", state_dir, err);
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                vagas_warn!("Failed to read persisted state in {:?}: {}", state_dir, err);
                BTreeMap::new()
            }
        };
        Self { writer, entries }
    }

    fn save(&self) {
        let state = PersistedState {
            entries: self.entries.clone(),
        };
        let content = match ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new()) {
            Ok(text) => text,
            Err(err) => {
                vagas_error!("Failed to serialize persisted state: {}", err);
                return;
            }
        };
        if let Err(err) = self.writer.write(STATE_FILENAME, &content) {
            vagas_error!(
                "Failed to write persisted state to {:?}: {}",
                self.writer.dir(),
                err
            );
        }
    }
}

impl KeyValueStore for RonStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return;
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.save();
    }
}
