//! HubSpot file manager types.

use serde::{Deserialize, Serialize};

/// File stored in the HubSpot file manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// File ID.
    pub id: String,
    /// File name without extension.
    #[serde(default)]
    pub name: String,
    /// Full path in the file manager.
    #[serde(default)]
    pub path: Option<String>,
    /// Public URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Containing folder.
    #[serde(default)]
    pub parent_folder_id: Option<String>,
    /// File extension.
    #[serde(default)]
    pub extension: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Access level.
    #[serde(default)]
    pub access: Option<String>,
}

/// Upload options sent with every file operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOptions {
    /// Access level of the stored file.
    pub access: &'static str,
    /// Whether an existing file with the same name is overwritten.
    pub overwrite: bool,
    /// Duplicate detection strategy.
    pub duplicate_validation_strategy: &'static str,
    /// Where duplicates are looked for.
    pub duplicate_validation_scope: &'static str,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            access: "PUBLIC_INDEXABLE",
            overwrite: false,
            duplicate_validation_strategy: "NONE",
            duplicate_validation_scope: "EXACT_FOLDER",
        }
    }
}

/// File search criteria. Empty criteria are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileQuery {
    /// File name (without extension).
    pub name: Option<String>,
    /// Restrict to these folders.
    pub parent_folder_ids: Vec<String>,
    /// Full file path.
    pub path: Option<String>,
    /// Restrict to these file IDs.
    pub ids: Vec<String>,
}

impl FileQuery {
    /// Files named `name` inside folder `folder_id`.
    #[must_use]
    pub fn name_in_folder(name: &str, folder_id: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            parent_folder_ids: vec![folder_id.to_owned()],
            ..Self::default()
        }
    }

    /// Files at `path`.
    #[must_use]
    pub fn path(path: &str) -> Self {
        Self {
            path: Some(path.to_owned()),
            ..Self::default()
        }
    }

    /// The file with ID `id`.
    #[must_use]
    pub fn id(id: &str) -> Self {
        Self {
            ids: vec![id.to_owned()],
            ..Self::default()
        }
    }

    /// Query string parameters, in a stable order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(("name", name.as_str()));
        }
        for id in &self.parent_folder_ids {
            params.push(("parentFolderIds", id.as_str()));
        }
        if let Some(path) = &self.path {
            params.push(("path", path.as_str()));
        }
        for id in &self.ids {
            params.push(("ids", id.as_str()));
        }
        params
    }
}
