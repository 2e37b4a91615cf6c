use std::collections::BTreeMap;
use serde::Serialize;
use tracing::debug;
use crate::core::{Result, StorageObjectRef, TransferError};

pub const LOG_ACTION: &str = "log";
pub const PERMISSION_ACTION: &str = "permission";

pub const DRIVE_FILE_ATTRS_PAGE: &str = "drive-file-attrs";
pub const DRIVE_FILE_PERMISSION_PAGE: &str = "drive-file-permission";

/// Named route plus its path params and query, as handed to the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    pub name: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

impl RouteTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
            query: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Route to a page about one storage entry.
    pub fn for_storage(name: impl Into<String>, file: &StorageObjectRef) -> Self {
        Self::new(name)
            .param("ownerType", file.owner_type.as_str().to_lowercase())
            .param("ownerId", file.owner_id.to_string())
            .param("id", file.storage_id.to_string())
            .param("type", file.storage_type.as_str().to_lowercase())
    }
}

/// What the presentation layer draws for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ActionLabel {
    Text(String),
    Link {
        text: String,
        target: RouteTarget,
    },
}

impl ActionLabel {
    pub fn text(&self) -> &str {
        match self {
            ActionLabel::Text(text) => text,
            ActionLabel::Link { text, .. } => text,
        }
    }

    pub fn target(&self) -> Option<&RouteTarget> {
        match self {
            ActionLabel::Text(_) => None,
            ActionLabel::Link { target, .. } => Some(target),
        }
    }
}

/// Menu entry keyed by a stable string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub key: String,
    pub label: ActionLabel,
}

impl ActionDescriptor {
    pub fn text(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: ActionLabel::Text(text.into()),
        }
    }
}

fn find_action(actions: &[ActionDescriptor], key: &str) -> Result<usize> {
    actions
        .iter()
        .position(|action| action.key == key)
        .ok_or_else(|| TransferError::missing_action(key))
}

/// Point the "log" and "permission" entries at the pages of `file`.
///
/// Both keys are resolved before anything is changed, so a missing key
/// leaves `actions` untouched.
pub fn bind_file_actions(
    file: &StorageObjectRef,
    actions: &mut [ActionDescriptor],
    query: &BTreeMap<String, String>,
) -> Result<()> {
    let log_index = find_action(actions, LOG_ACTION)?;
    let permission_index = find_action(actions, PERMISSION_ACTION)?;

    for (index, page) in [
        (log_index, DRIVE_FILE_ATTRS_PAGE),
        (permission_index, DRIVE_FILE_PERMISSION_PAGE),
    ] {
        let action = &mut actions[index];
        let text = action.label.text().to_string();
        action.label = ActionLabel::Link {
            text,
            target: RouteTarget::for_storage(page, file).query(query.clone()),
        };
    }

    debug!(storage_id = file.storage_id, "file actions bound");
    Ok(())
}
