//! Best-effort resume file.
//!
//! Holds the reviewer's email, the position in the feed and a snapshot of
//! the feed. It is only a hint: the server decides what is already
//! reviewed, so [`reconcile`] always works from a freshly fetched feed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::features::products::dtos::ProductDto;

pub const DEFAULT_PROGRESS_FILE: &str = ".review-progress.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeHint {
    pub user_email: String,
    #[serde(default)]
    pub current_product_index: usize,
    #[serde(default)]
    pub products: Vec<ProductDto>,
}

impl ResumeHint {
    pub fn new(user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            current_product_index: 0,
            products: Vec::new(),
        }
    }

    fn current_scrape_id(&self) -> Option<&str> {
        self.products
            .get(self.current_product_index)
            .map(|p| p.scrape_id.as_str())
    }
}

pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable and corrupt files all read as "no progress"
    pub fn load(&self) -> Option<ResumeHint> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable progress file {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(hint) => Some(hint),
            Err(e) => {
                tracing::warn!("Ignoring corrupt progress file {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, hint: &ResumeHint) -> io::Result<()> {
        let json = serde_json::to_string_pretty(hint).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Start position in `fresh` for `email`.
///
/// The cached current product is looked up by id in the fresh feed; when it
/// is gone (reviewed elsewhere) or the hint belongs to another reviewer the
/// session starts at the top.
pub fn reconcile(hint: Option<&ResumeHint>, email: &str, fresh: &[ProductDto]) -> usize {
    hint.filter(|h| h.user_email == email)
        .and_then(ResumeHint::current_scrape_id)
        .and_then(|id| fresh.iter().position(|p| p.scrape_id == id))
        .unwrap_or(0)
}
