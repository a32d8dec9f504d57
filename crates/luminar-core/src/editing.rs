//! Visual-editing overlay state.
//!
//! The content backend can overlay in-place editing controls on rendered
//! items. Whether the overlay is active is explicit state owned by the host
//! (one per process or page context), and `apply`/`remove` are idempotent.
//! Edit attributes are only produced while the overlay is applied.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ItemId;

/// How the editor opens when an item is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Popover,
    Drawer,
    Modal,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Popover => write!(f, "popover"),
            EditMode::Drawer => write!(f, "drawer"),
            EditMode::Modal => write!(f, "modal"),
        }
    }
}

/// An editable field group on a single content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub collection: String,
    pub item: ItemId,
    pub fields: Vec<String>,
    pub mode: EditMode,
}

impl EditTarget {
    pub fn new(collection: &str, item: ItemId, fields: &[&str]) -> Self {
        Self {
            collection: collection.to_string(),
            item,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            mode: EditMode::default(),
        }
    }

    /// Encode as the `data-directus` attribute value.
    pub fn attribute(&self) -> String {
        format!(
            "collection:{};item:{};fields:{};mode:{}",
            self.collection,
            self.item,
            self.fields.join(","),
            self.mode
        )
    }
}

/// Overlay state for one host context.
#[derive(Debug, Clone)]
pub struct VisualEditing {
    directus_url: String,
    applied: bool,
}

impl VisualEditing {
    pub fn new(directus_url: &str) -> Self {
        Self {
            directus_url: directus_url.trim_end_matches('/').to_string(),
            applied: false,
        }
    }

    /// Whether a page query string asks for the overlay (`visual-editing=true`).
    pub fn requested_by(query: &str) -> bool {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| key == "visual-editing" && value == "true")
    }

    /// Activate the overlay. Returns `false` if it was already active.
    pub fn apply(&mut self) -> bool {
        if self.applied {
            return false;
        }
        self.applied = true;
        tracing::debug!(url = %self.directus_url, "visual editing applied");
        true
    }

    /// Deactivate the overlay. Returns `false` if it was not active.
    pub fn remove(&mut self) -> bool {
        if !self.applied {
            return false;
        }
        self.applied = false;
        tracing::debug!("visual editing removed");
        true
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn directus_url(&self) -> &str {
        &self.directus_url
    }

    /// The edit attribute for `target`, or `None` while the overlay is off.
    pub fn attribute(&self, target: &EditTarget) -> Option<String> {
        self.applied.then(|| target.attribute())
    }

    /// Link to the backend's admin app, shown when a collection is empty.
    pub fn admin_url(&self) -> String {
        format!("{}/admin", self.directus_url)
    }
}
