//! JSON persistence for message catalogues.
//!
//! A catalogue file is a JSON array with one object per diagnostic code:
//!
//! ```json
//! [
//!   {
//!     "code": 1,
//!     "type": "API_INVARIANT",
//!     "messagePattern": "Invoked createZone() but zones are not enabled.",
//!     "callers": [
//!       {
//!         "class": "app::zone",
//!         "method": "create_zone",
//!         "file": "src/zone.rs",
//!         "lineNumber": 185
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Output is always sorted by code, callers by class then line number, and
//! pretty-printed with 2-space indentation and a trailing newline, so saving
//! an unchanged catalogue reproduces the file byte for byte.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{CallSite, CatalogError, GuardKind, Message};

/// Messages of one catalogue, keyed (and therefore ordered) by code.
pub type Catalogue = BTreeMap<u16, Message>;

/// One element of the on-disk JSON array.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    code: u16,
    #[serde(rename = "type")]
    kind: GuardKind,
    message_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    callers: Option<Vec<CallSite>>,
}

/// Flags that decide what [`render`] and [`CatalogStore::save`] write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write the `callers` array of each entry.
    pub record_callers: bool,
    /// Drop entries that were never observed, provided the suite succeeded.
    pub delete_if_unmatched: bool,
    pub suite_successful: bool,
}

impl SaveOptions {
    fn keeps(&self, message: &Message) -> bool {
        // An unsuccessful suite may simply never have reached some checks.
        !self.delete_if_unmatched || !self.suite_successful || !message.callers().is_empty()
    }
}

/// Counts reported after rendering a catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub written: usize,
    pub dropped: usize,
}

/// Parse catalogue JSON. `path` is only used for error reporting.
pub fn parse(path: &Path, content: &str) -> Result<Catalogue, CatalogError> {
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut messages = Catalogue::new();
    for entry in entries {
        if messages.contains_key(&entry.code) {
            return Err(CatalogError::DuplicateCode {
                path: path.to_path_buf(),
                code: entry.code,
            });
        }
        let callers: BTreeSet<CallSite> = entry.callers.unwrap_or_default().into_iter().collect();
        messages.insert(
            entry.code,
            Message::loaded(entry.code, entry.kind, entry.message_pattern, callers),
        );
    }
    Ok(messages)
}

/// Load a catalogue file. A missing file is an empty catalogue.
pub fn load(path: &Path) -> Result<Catalogue, CatalogError> {
    if !path.exists() {
        return Ok(Catalogue::new());
    }
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &content)
}

/// Render messages in canonical catalogue format.
pub fn render(
    path: &Path,
    messages: &Catalogue,
    options: SaveOptions,
) -> Result<(String, SaveSummary), CatalogError> {
    let entries: Vec<CatalogEntry> = messages
        .values()
        .filter(|message| options.keeps(message))
        .map(|message| CatalogEntry {
            code: message.code(),
            kind: message.kind(),
            message_pattern: message.pattern().to_string(),
            callers: options
                .record_callers
                .then(|| message.callers().iter().cloned().collect()),
        })
        .collect();

    let summary = SaveSummary {
        written: entries.len(),
        dropped: messages.len() - entries.len(),
    };
    let content = serde_json::to_string_pretty(&entries).map_err(|err| CatalogError::Write {
        path: path.to_path_buf(),
        source: err.into(),
    })?;
    Ok((format!("{}\n", content), summary))
}

/// Re-render catalogue JSON in canonical form, keeping every entry and its recorded callers.
pub fn canonicalize(path: &Path, content: &str, record_callers: bool) -> Result<String, CatalogError> {
    let mut messages = parse(path, content)?;
    for message in messages.values_mut() {
        message.restore_original_callers();
    }
    let options = SaveOptions {
        record_callers,
        delete_if_unmatched: false,
        suite_successful: false,
    };
    Ok(render(path, &messages, options)?.0)
}

/// Replace `path` with what `write` produces.
///
/// The content goes to a temporary file next to `path` that is renamed over it
/// once complete, so `path` is either the old file or the new one.
fn replace_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Snapshot of the file as of the last read, keyed by its modification time.
#[derive(Debug)]
struct LoadedCatalogue {
    modified: SystemTime,
    messages: Catalogue,
}

/// A catalogue file plus a cache of its last parsed contents.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    loaded: Option<LoadedCatalogue>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return a fresh copy of the catalogue, re-reading the file only if its
    /// modification time differs from the cached read.
    pub fn load_if_stale(&mut self) -> Result<Catalogue, CatalogError> {
        if !self.path.exists() {
            self.loaded = None;
            return Ok(Catalogue::new());
        }

        let modified = fs::metadata(&self.path)
            .and_then(|metadata| metadata.modified())
            .map_err(|source| CatalogError::Read {
                path: self.path.clone(),
                source,
            })?;

        if let Some(loaded) = &self.loaded {
            if loaded.modified == modified {
                tracing::trace!(path = %self.path.display(), "catalogue unchanged, reusing cached read");
                return Ok(loaded.messages.clone());
            }
        }

        let messages = load(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            entries = messages.len(),
            "loaded diagnostic message catalogue"
        );
        self.loaded = Some(LoadedCatalogue {
            modified,
            messages: messages.clone(),
        });
        Ok(messages)
    }

    /// Write `messages` to the file. On failure the existing file is left as it was.
    pub fn save(
        &mut self,
        messages: &Catalogue,
        options: SaveOptions,
    ) -> Result<SaveSummary, CatalogError> {
        let (content, summary) = render(&self.path, messages, options)?;

        replace_file(&self.path, |file| file.write_all(content.as_bytes())).map_err(
            |source| CatalogError::Write {
                path: self.path.clone(),
                source,
            },
        )?;

        self.loaded = None;
        tracing::info!(
            path = %self.path.display(),
            written = summary.written,
            dropped = summary.dropped,
            "saved diagnostic message catalogue"
        );
        Ok(summary)
    }
}
