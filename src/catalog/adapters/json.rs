//! JSON catalog directory adapter.
//!
//! Expects the following layout below the catalog root:
//!
//! ```text
//! tasks.json          base catalog document (journey phases, tasks, registries)
//! action_blocks.json  optional action blocks keyed by task identifier
//! overlays/en.json    optional overlay per locale code
//! ```
//!
//! Blocks in `action_blocks.json` replace blocks of the same task declared
//! inline in `tasks.json`.

use async_trait::async_trait;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::catalog::{
    domain::{ActionBlock, CatalogDocument, Locale, LocaleOverlay, TaskId},
    ports::{CatalogSource, CatalogSourceError, CatalogSourceResult},
};

const DOCUMENT_FILE: &str = "tasks.json";
const ACTION_BLOCKS_FILE: &str = "action_blocks.json";
const OVERLAY_DIR: &str = "overlays";

#[derive(Deserialize)]
struct ActionBlocksFile {
    #[serde(default)]
    action_blocks: BTreeMap<TaskId, ActionBlock>,
}

/// Catalog source reading JSON files from a directory capability.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    root: Arc<Dir>,
}

impl JsonCatalogSource {
    /// Wraps an already opened catalog directory.
    #[must_use]
    pub fn new(root: Dir) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Opens the catalog directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogSourceError::Io`] when the directory cannot be
    /// opened.
    pub fn open(path: &str) -> CatalogSourceResult<Self> {
        let root = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| CatalogSourceError::io(path, err))?;
        Ok(Self::new(root))
    }

    async fn read_json<T>(&self, location: String) -> CatalogSourceResult<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || read_json_blocking(&root, location))
            .await
            .map_err(CatalogSourceError::unavailable)?
    }
}

fn read_json_blocking<T: DeserializeOwned>(
    root: &Dir,
    location: String,
) -> CatalogSourceResult<Option<T>> {
    let contents = match root.read_to_string(&location) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(CatalogSourceError::io(location, err)),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|err| CatalogSourceError::malformed(location, err))
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn load_document(&self) -> CatalogSourceResult<CatalogDocument> {
        let mut document: CatalogDocument = self
            .read_json(DOCUMENT_FILE.to_owned())
            .await?
            .ok_or_else(|| {
                CatalogSourceError::io(
                    DOCUMENT_FILE,
                    std::io::Error::from(ErrorKind::NotFound),
                )
            })?;
        if let Some(file) = self
            .read_json::<ActionBlocksFile>(ACTION_BLOCKS_FILE.to_owned())
            .await?
        {
            document.action_blocks.extend(file.action_blocks);
        }
        Ok(document)
    }

    async fn load_overlay(&self, locale: Locale) -> CatalogSourceResult<Option<LocaleOverlay>> {
        self.read_json(format!("{OVERLAY_DIR}/{}.json", locale.as_str()))
            .await
    }
}
