//! Local file upload: turns a path into a displayable `(name, uri)` pair.
//!
//! Each file is read on its own tokio task; completions are handed to a sink
//! one at a time so the event loop can apply them as single `add_image` calls.

use crate::gallery::{Image, ImageId};
use crate::utils;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncReadExt;
use walkdir::WalkDir;

/// Bytes read from the head of a file to sniff its format
const SNIFF_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{} is not a supported image", .0.display())]
    NotAnImage(PathBuf),
    #[error("{} has no file URI", .0.display())]
    NoUri(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file that was read successfully and can become a gallery image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub name: String,
    pub uri: String,
    pub mime: &'static str,
}

impl UploadedFile {
    pub fn into_image(self, id: ImageId, category: &str) -> Image {
        Image::new(id, self.name, self.uri, category)
    }
}

/// Result of one upload, tagged with the path that was requested
#[derive(Debug)]
pub struct UploadOutcome {
    pub requested: PathBuf,
    pub result: Result<UploadedFile, UploadError>,
}

/// Read and validate one file.
///
/// The extension must be allowed and the leading bytes must look like an
/// image format the `image` crate recognises.
pub async fn read_upload(path: &Path, extensions: &[String]) -> Result<UploadedFile, UploadError> {
    let io_err = |source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    };

    if !utils::has_extension(path, extensions) {
        return Err(UploadError::NotAnImage(path.to_path_buf()));
    }

    let absolute = tokio::fs::canonicalize(path).await.map_err(io_err)?;
    let mut file = tokio::fs::File::open(&absolute).await.map_err(io_err)?;

    let mut head = Vec::with_capacity(SNIFF_LEN);
    (&mut file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .await
        .map_err(io_err)?;

    let format =
        image::guess_format(&head).map_err(|_| UploadError::NotAnImage(path.to_path_buf()))?;

    let name = absolute
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload")
        .to_string();

    let uri = utils::file_uri(&absolute).ok_or_else(|| UploadError::NoUri(absolute.clone()))?;

    Ok(UploadedFile {
        uri,
        path: absolute,
        name,
        mime: format.to_mime_type(),
    })
}

/// Expand directories into the image files they contain.
///
/// Plain files are passed through unchanged so that validation can report on
/// them individually.
pub fn expand_paths(paths: &[PathBuf], extensions: &[String], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| utils::has_extension(p, extensions))
            .collect();
        found.sort();
        files.extend(found);
    }

    files
}

/// Start one task per file. `sink` is called once per file, in completion order.
pub fn spawn_uploads<F>(paths: Vec<PathBuf>, extensions: Vec<String>, sink: F)
where
    F: Fn(UploadOutcome) + Clone + Send + 'static,
{
    for path in paths {
        let extensions = extensions.clone();
        let sink = sink.clone();
        tokio::spawn(async move {
            tracing::debug!(path = %path.display(), "upload started");
            let result = read_upload(&path, &extensions).await;
            if let Err(e) = &result {
                tracing::warn!(path = %path.display(), error = %e, "upload failed");
            }
            sink(UploadOutcome {
                requested: path,
                result,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc;
    use std::time::Duration;

    /// Minimal PNG signature plus IHDR chunk header
    const PNG_HEAD: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R',
    ];

    fn exts() -> Vec<String> {
        utils::IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_read_upload_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunset beach.png");
        fs::write(&path, PNG_HEAD).unwrap();

        let uploaded = read_upload(&path, &exts()).await.unwrap();
        assert_eq!(uploaded.name, "sunset beach");
        assert_eq!(uploaded.mime, "image/png");
        assert!(uploaded.uri.starts_with("file:///"));
        assert!(uploaded.uri.ends_with("sunset%20beach.png"));
    }

    #[tokio::test]
    async fn test_read_upload_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let err = read_upload(&path, &exts()).await.unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage(_)));
    }

    #[tokio::test]
    async fn test_read_upload_rejects_non_image_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        fs::write(&path, "definitely not a jpeg").unwrap();

        let err = read_upload(&path, &exts()).await.unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage(_)));
    }

    #[tokio::test]
    async fn test_read_upload_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let err = read_upload(&path, &exts()).await.unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }

    #[test]
    fn test_expand_paths_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), PNG_HEAD).unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("skip.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.gif"), b"x").unwrap();

        let loose = PathBuf::from("/somewhere/loose.txt");
        let flat = expand_paths(&[dir.path().to_path_buf(), loose.clone()], &exts(), false);
        assert_eq!(
            flat,
            vec![dir.path().join("a.jpg"), dir.path().join("b.png"), loose]
        );

        let deep = expand_paths(&[dir.path().to_path_buf()], &exts(), true);
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_into_image_uses_name_and_uri() {
        let uploaded = UploadedFile {
            path: PathBuf::from("/tmp/cat.png"),
            name: "cat".to_string(),
            uri: "file:///tmp/cat.png".to_string(),
            mime: "image/png",
        };
        let image = uploaded.into_image(ImageId(9), "pets");
        assert_eq!(image.id, ImageId(9));
        assert_eq!(image.name, "cat");
        assert_eq!(image.source, "file:///tmp/cat.png");
        assert_eq!(image.category, "pets");
        assert!(!image.favorite);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_uploads_reports_each_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, PNG_HEAD).unwrap();
        fs::write(&bad, b"x").unwrap();

        let (tx, rx) = mpsc::channel();
        spawn_uploads(vec![good.clone(), bad.clone()], exts(), move |outcome| {
            let _ = tx.send(outcome);
        });

        let mut outcomes = Vec::new();
        for _ in 0..2 {
            outcomes.push(rx.recv_timeout(Duration::from_secs(5)).expect("outcome"));
        }
        outcomes.sort_by(|a, b| a.requested.cmp(&b.requested));

        assert!(outcomes[0].result.is_err()); // bad.txt
        assert!(outcomes[1].result.is_ok()); // good.png
    }
}
