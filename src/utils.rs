use std::path::Path;
use url::Url;

/// Supported image file extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Check if a path has one of the given extensions (case insensitive)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|supported| supported.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> std::path::PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    std::path::PathBuf::from(path)
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `file://` URI for an absolute path, percent-encoded so that it parses
/// back to the same file. `None` for relative paths.
pub fn file_uri(path: &Path) -> Option<String> {
    Url::from_file_path(path).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_has_extension_uses_given_list() {
        let exts = vec!["png".to_string()];
        assert!(has_extension(Path::new("a.PNG"), &exts));
        assert!(!has_extension(Path::new("a.jpg"), &exts));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hot"), "Hot");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize("Urban"), "Urban");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_uri_escapes_reserved_and_non_ascii() {
        let cases = [
            ("/tmp/my photo#1.png", "file:///tmp/my%20photo%231.png"),
            ("/tmp/what?.png", "file:///tmp/what%3F.png"),
            ("/tmp/100%.png", "file:///tmp/100%25.png"),
            ("/tmp/café.png", "file:///tmp/caf%C3%A9.png"),
        ];
        for (path, expected) in cases {
            let uri = file_uri(Path::new(path)).unwrap();
            assert_eq!(uri, expected);
            let back = Url::parse(&uri).unwrap().to_file_path().unwrap();
            assert_eq!(back, PathBuf::from(path));
        }
    }

    #[test]
    fn test_file_uri_rejects_relative_paths() {
        assert_eq!(file_uri(Path::new("pics/a.png")), None);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/srv/pics"), PathBuf::from("/srv/pics"));
    }
}
