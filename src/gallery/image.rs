use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a gallery image.
///
/// Ids survive filtering and list mutation; positions do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub name: String,
    /// Resolvable URI (base-URL-relative path already resolved, or `file://`)
    pub source: String,
    /// Free-form tag; empty means uncategorized
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub favorite: bool,
}

impl Image {
    pub fn new(
        id: ImageId,
        name: impl Into<String>,
        source: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            source: source.into(),
            category: category.into(),
            favorite: false,
        }
    }

    /// Build an image from a filename relative to `base_url`.
    pub fn from_relative(
        id: ImageId,
        name: impl Into<String>,
        base_url: &str,
        filename: &str,
        category: impl Into<String>,
    ) -> Self {
        Self::new(id, name, resolve_source(base_url, filename), category)
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category.trim().is_empty()
    }

    /// Category label for display ("Nature", or "Uncategorized")
    pub fn category_label(&self) -> String {
        if self.is_uncategorized() {
            "Uncategorized".to_string()
        } else {
            crate::utils::capitalize(&self.category)
        }
    }
}

/// Join a relative filename onto a base URL.
///
/// Absolute URIs (`scheme://...` or `data:`) are returned unchanged.
pub fn resolve_source(base_url: &str, filename: &str) -> String {
    if filename.contains("://") || filename.starts_with("data:") {
        return filename.to_string();
    }
    if base_url.is_empty() {
        return filename.to_string();
    }

    let base = base_url.trim_end_matches('/');
    let rel = filename.trim_start_matches('/');
    format!("{}/{}", base, rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_joins_with_single_slash() {
        assert_eq!(
            resolve_source("https://cdn.example.com/img/", "a.jpg"),
            "https://cdn.example.com/img/a.jpg"
        );
        assert_eq!(
            resolve_source("https://cdn.example.com/img", "/a.jpg"),
            "https://cdn.example.com/img/a.jpg"
        );
    }

    #[test]
    fn test_resolve_source_keeps_absolute_uris() {
        assert_eq!(
            resolve_source("https://cdn.example.com/", "file:///tmp/a.png"),
            "file:///tmp/a.png"
        );
        assert_eq!(
            resolve_source("https://cdn.example.com/", "data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_resolve_source_without_base() {
        assert_eq!(resolve_source("", "photos/a.jpg"), "photos/a.jpg");
    }

    #[test]
    fn test_category_label() {
        let img = Image::new(ImageId(1), "a", "a.jpg", "nature");
        assert_eq!(img.category_label(), "Nature");

        let img = Image::new(ImageId(2), "b", "b.jpg", "  ");
        assert!(img.is_uncategorized());
        assert_eq!(img.category_label(), "Uncategorized");
    }

    #[test]
    fn test_image_id_display() {
        assert_eq!(ImageId(42).to_string(), "42");
    }
}
