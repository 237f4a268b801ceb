use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result, StoreError};

/// Template name → request payload. Ordered so listings are lexical.
pub type Templates = BTreeMap<String, Value>;

/// Earlier versions stored templates as a list of name/payload records.
#[derive(Deserialize)]
struct LegacyTemplate {
    name: String,
    payload: Value,
}

/// JSON file holding every stored template. Each mutation rereads the whole
/// file and atomically replaces it.
pub struct TemplateStore {
    path: PathBuf,
}

impl TemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store.
    pub fn load(&self) -> Result<Templates> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Templates::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };

        let parsed: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        match parsed {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Array(_) => {
                let legacy: Vec<LegacyTemplate> =
                    serde_json::from_value(parsed).map_err(|source| StoreError::Parse {
                        path: self.path.clone(),
                        source,
                    })?;
                debug!(path = %self.path.display(), "read legacy list-style template store");
                Ok(legacy.into_iter().map(|t| (t.name, t.payload)).collect())
            }
            _ => Err(StoreError::Layout {
                path: self.path.clone(),
            }
            .into()),
        }
    }

    pub fn save(&self, templates: &Templates) -> Result<()> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let body = serde_json::to_string_pretty(templates)
            .map_err(|err| write_err(io::Error::other(err)))?;
        atomic_write(&self.path, format!("{}\n", body).as_bytes()).map_err(write_err)?;

        debug!(path = %self.path.display(), count = templates.len(), "saved templates");
        Ok(())
    }

    /// Store `payload` under `name`, replacing any existing entry. Returns
    /// whether an entry was replaced.
    pub fn add(&self, name: &str, payload: Value) -> Result<bool> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName.into());
        }

        let mut templates = self.load()?;
        let replaced = templates.insert(name.to_string(), payload).is_some();
        self.save(&templates)?;
        Ok(replaced)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let mut templates = self.load()?;
        if templates.remove(name).is_none() {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        self.save(&templates)
    }

    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.load()?.remove(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })
    }
}

/// Write to a sibling temp file, then rename it over `path`.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("templates");
    let tmp = parent.join(format!(".{}.{}.tmp", file_name, std::process::id()));

    let written = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}
