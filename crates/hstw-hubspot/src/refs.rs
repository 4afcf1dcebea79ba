//! References to remote resources.
//!
//! Blog posts and files are addressed either by identifier or by name, and
//! folders either by identifier or by path. Exactly one must be given; the
//! `from_options` constructors turn a pair of optional command line values
//! into a reference and reject both-or-neither before any request is made.

use std::fmt;

use crate::error::HubSpotError;

/// Blog post reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRef {
    /// Post ID.
    Id(String),
    /// Internal post name.
    Name(String),
}

impl PostRef {
    /// Build from an optional identifier and an optional name.
    ///
    /// Empty strings count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Config`] if both or neither are given.
    pub fn from_options(id: Option<String>, name: Option<String>) -> Result<Self, HubSpotError> {
        one_of(id, name).map(|either| match either {
            Either::First(id) => Self::Id(id),
            Either::Second(name) => Self::Name(name),
        })
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(name) => write!(f, "name={name}"),
        }
    }
}

/// File reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    /// File ID.
    Id(String),
    /// File name, including extension.
    Name(String),
}

impl FileRef {
    /// Build from an optional identifier and an optional name.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Config`] if both or neither are given.
    pub fn from_options(id: Option<String>, name: Option<String>) -> Result<Self, HubSpotError> {
        one_of(id, name).map(|either| match either {
            Either::First(id) => Self::Id(id),
            Either::Second(name) => Self::Name(name),
        })
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(name) => write!(f, "name={name}"),
        }
    }
}

/// File manager folder reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderRef {
    /// Folder ID.
    Id(String),
    /// Folder path, e.g. `/blog/images`.
    Path(String),
}

impl FolderRef {
    /// Build a required folder reference.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Config`] if both or neither are given.
    pub fn from_options(id: Option<String>, path: Option<String>) -> Result<Self, HubSpotError> {
        Self::optional(id, path)?.ok_or_else(|| {
            HubSpotError::Config(
                "Folder is required for uploading files, please specify either `folder_id` or `folder_path`"
                    .to_owned(),
            )
        })
    }

    /// Build an optional folder reference.
    ///
    /// # Errors
    ///
    /// Returns [`HubSpotError::Config`] if both are given.
    pub fn optional(id: Option<String>, path: Option<String>) -> Result<Option<Self>, HubSpotError> {
        match (non_empty(id), non_empty(path)) {
            (Some(_), Some(_)) => Err(HubSpotError::Config(
                "One of 'folder_id' or 'folder_path' must be specified, not both".to_owned(),
            )),
            (Some(id), None) => Ok(Some(Self::Id(id))),
            (None, Some(path)) => Ok(Some(Self::Path(path))),
            (None, None) => Ok(None),
        }
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "folder_id={id}"),
            Self::Path(path) => write!(f, "folder_path={path}"),
        }
    }
}

enum Either {
    First(String),
    Second(String),
}

fn one_of(id: Option<String>, name: Option<String>) -> Result<Either, HubSpotError> {
    match (non_empty(id), non_empty(name)) {
        (Some(_), Some(_)) => Err(HubSpotError::Config(
            "Either 'identifier' or 'name' must be specified, not both".to_owned(),
        )),
        (Some(id), None) => Ok(Either::First(id)),
        (None, Some(name)) => Ok(Either::Second(name)),
        (None, None) => Err(HubSpotError::Config(
            "One of 'identifier' or 'name' must be specified".to_owned(),
        )),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(value: &str) -> Option<String> {
        Some(value.to_owned())
    }

    #[test]
    fn test_post_ref_by_id() {
        assert_eq!(
            PostRef::from_options(s("123"), None).unwrap(),
            PostRef::Id("123".to_owned())
        );
    }

    #[test]
    fn test_post_ref_by_name() {
        assert_eq!(
            PostRef::from_options(None, s("hello")).unwrap(),
            PostRef::Name("hello".to_owned())
        );
    }

    #[test]
    fn test_post_ref_both() {
        let err = PostRef::from_options(s("123"), s("hello")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either 'identifier' or 'name' must be specified, not both"
        );
    }

    #[test]
    fn test_post_ref_neither() {
        let err = PostRef::from_options(None, None).unwrap_err();
        assert_eq!(err.to_string(), "One of 'identifier' or 'name' must be specified");
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        assert!(PostRef::from_options(s(""), s("")).is_err());
        assert_eq!(
            FileRef::from_options(s(""), s("bar.png")).unwrap(),
            FileRef::Name("bar.png".to_owned())
        );
    }

    #[test]
    fn test_file_ref_both() {
        assert!(matches!(
            FileRef::from_options(s("1"), s("bar.png")),
            Err(HubSpotError::Config(_))
        ));
    }

    #[test]
    fn test_folder_ref() {
        assert_eq!(
            FolderRef::from_options(s("7"), None).unwrap(),
            FolderRef::Id("7".to_owned())
        );
        assert_eq!(
            FolderRef::from_options(None, s("/blog")).unwrap(),
            FolderRef::Path("/blog".to_owned())
        );
    }

    #[test]
    fn test_folder_ref_both() {
        let err = FolderRef::from_options(s("7"), s("/blog")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "One of 'folder_id' or 'folder_path' must be specified, not both"
        );
    }

    #[test]
    fn test_folder_ref_required() {
        let err = FolderRef::from_options(None, None).unwrap_err();
        assert!(err.to_string().starts_with("Folder is required for uploading files"));
    }

    #[test]
    fn test_folder_ref_optional() {
        assert_eq!(FolderRef::optional(None, None).unwrap(), None);
        assert!(FolderRef::optional(s("7"), s("/blog")).is_err());
    }
}
