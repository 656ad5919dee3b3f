use cinedex_core::ports::SettingsStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toml::value::Table;
use toml::Value;
use tracing::warn;

/// TOML-file-backed settings store.
///
/// A flat string-keyed table persisted to `settings.toml` in the data
/// directory. The `SettingsStore` surface is infallible: reads fall back to
/// the supplied default, writes are best-effort and log failures.
pub struct FileSettingsStore {
    path: PathBuf,
    values: Mutex<Table>,
}

impl FileSettingsStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let path = data_dir.as_ref().join("settings.toml");
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match contents.parse::<Value>() {
                Ok(Value::Table(table)) => table,
                Ok(_) | Err(_) => {
                    warn!("Settings file {} is malformed, starting empty", path.display());
                    Table::new()
                }
            },
            Err(_) => Table::new(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &Table) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create settings directory: {}", e);
                return;
            }
        }
        match toml::to_string_pretty(values) {
            Ok(contents) => {
                if let Err(e) = fs::write(&self.path, contents) {
                    warn!("Failed to write settings file: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
    }

    fn set(&self, key: &str, value: Value) {
        let mut values = self.values.lock().expect("settings lock poisoned");
        values.insert(key.to_string(), value);
        self.persist(&values);
    }
}

impl SettingsStore for FileSettingsStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        let values = self.values.lock().expect("settings lock poisoned");
        values
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.set(key, Value::String(value.to_string()));
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        let values = self.values.lock().expect("settings lock poisoned");
        values.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.set(key, Value::Boolean(value));
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().expect("settings lock poisoned");
        values.remove(key);
        self.persist(&values);
    }
}
