//! # Draft Store
//!
//! Local cache of order forms that have not been submitted yet.
//!
//! ## Layout
//! ```text
//! <draft_dir>/
//! ├── 3f2a9c1e0b7d4e4f9a1c2b3d4e5f6a7b.json   ◄─── one Draft per file
//! ├── monday-restock.json
//! └── .monday-restock.json.tmp                ◄─── in-flight write
//! ```
//!
//! ## Write Path
//! ```text
//! save() ──► serialize ──► write .<id>.json.tmp ──► rename to <id>.json
//! ```
//! A crash mid-write leaves the previous version of the draft intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stockdesk_core::money::as_major;
use stockdesk_core::{Money, OrderForm};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::DeskConfig;
use crate::error::{DraftError, DraftResult};

const DRAFT_EXT: &str = "json";
const MAX_ID_LEN: usize = 64;

/// A cached order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub form: OrderForm,
}

/// One row of the draft list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub customer_id: String,
    pub item_count: usize,
    #[serde(with = "as_major")]
    pub total_amount: Money,
}

impl From<&Draft> for DraftSummary {
    fn from(draft: &Draft) -> Self {
        DraftSummary {
            id: draft.id.clone(),
            saved_at: draft.saved_at,
            customer_id: draft.form.customer_id().to_string(),
            item_count: draft.form.item_count(),
            total_amount: draft.form.pricing().total_amount,
        }
    }
}

/// Checks that a draft id is safe to use as a file name.
pub fn validate_draft_id(id: &str) -> DraftResult<()> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DraftError::InvalidDraftId(id.to_string()))
    }
}

/// File-backed draft cache.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
    max_drafts: usize,
}

impl DraftStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>, max_drafts: usize) -> DraftResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(?dir, max_drafts, "Draft store opened");
        Ok(DraftStore { dir, max_drafts })
    }

    /// Opens the store described by the configuration.
    pub fn from_config(config: &DeskConfig) -> DraftResult<Self> {
        Self::open(config.draft_dir()?, config.drafts.max_drafts)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generates a fresh draft id.
    pub fn new_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, DRAFT_EXT))
    }

    fn draft_paths(&self) -> DraftResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_draft = path.extension().is_some_and(|ext| ext == DRAFT_EXT)
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| !n.starts_with('.'));
            if is_draft {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    /// Saves a form under `id`, or under a new id when `None`.
    ///
    /// Overwriting an existing draft is always allowed; a new draft is
    /// refused once the store holds `max_drafts`.
    pub fn save(&self, id: Option<&str>, form: &OrderForm) -> DraftResult<Draft> {
        self.save_at(id, form, Utc::now())
    }

    /// Same as [`DraftStore::save`] with an explicit save time.
    pub fn save_at(
        &self,
        id: Option<&str>,
        form: &OrderForm,
        saved_at: DateTime<Utc>,
    ) -> DraftResult<Draft> {
        let id = match id {
            Some(id) => {
                validate_draft_id(id)?;
                id.to_string()
            }
            None => Self::new_id(),
        };

        let path = self.path_for(&id);
        if !path.exists() && self.draft_paths()?.len() >= self.max_drafts {
            return Err(DraftError::LimitReached {
                max: self.max_drafts,
            });
        }

        let draft = Draft {
            id: id.clone(),
            saved_at,
            form: form.clone(),
        };

        let bytes = serde_json::to_vec_pretty(&draft)?;
        let tmp = self.dir.join(format!(".{}.{}.tmp", id, DRAFT_EXT));
        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &path)) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(?tmp, error = %cleanup, "Could not remove temporary draft file");
                }
            }
            return Err(e.into());
        }

        debug!(draft_id = %id, items = form.item_count(), "Draft saved");
        Ok(draft)
    }

    /// Loads a draft; `Ok(None)` if it does not exist.
    pub fn load(&self, id: &str) -> DraftResult<Option<Draft>> {
        validate_draft_id(id)?;
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// All readable drafts, newest first. Unreadable files are skipped.
    pub fn list(&self) -> DraftResult<Vec<DraftSummary>> {
        let mut summaries = Vec::new();

        for path in self.draft_paths()? {
            let parsed = fs::read(&path)
                .map_err(DraftError::from)
                .and_then(|bytes| serde_json::from_slice::<Draft>(&bytes).map_err(DraftError::from));

            match parsed {
                Ok(draft) => summaries.push(DraftSummary::from(&draft)),
                Err(e) => warn!(?path, error = %e, "Skipping unreadable draft"),
            }
        }

        summaries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    /// Deletes a draft. Returns false if there was nothing to delete.
    pub fn discard(&self, id: &str) -> DraftResult<bool> {
        validate_draft_id(id)?;
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => {
                debug!(draft_id = %id, "Draft discarded");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
