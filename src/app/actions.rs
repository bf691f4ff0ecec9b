use super::{App, AppEvent};
use crate::gallery::{Image, ImageId};
use crate::upload::{self, UploadOutcome};
use std::path::PathBuf;

impl App {
    /// Image the next action applies to: the lightbox image when open,
    /// otherwise the grid selection.
    pub fn focused_image(&self) -> Option<&Image> {
        if self.gallery.lightbox().is_open() {
            self.gallery.current_image().ok()
        } else {
            self.selected_image()
        }
    }

    fn focused_id(&self) -> Option<ImageId> {
        self.focused_image().map(|img| img.id)
    }

    /// Toggle the favorite flag of the focused image.
    pub fn toggle_favorite_focused(&mut self) {
        let Some(id) = self.focused_id() else {
            return;
        };
        match self.gallery.toggle_favorite(id) {
            Ok(favorite) => {
                tracing::debug!(%id, favorite, "favorite toggled");
                // Unfavoriting under the Favorites filter shrinks the grid.
                if !self.gallery.lightbox().is_open() {
                    self.clamp_cursor();
                }
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    /// Ask for confirmation before deleting the focused image.
    pub fn request_delete(&mut self) {
        self.ui.confirm_delete = self.focused_id();
    }

    pub fn cancel_delete(&mut self) {
        self.ui.confirm_delete = None;
    }

    /// Delete the image awaiting confirmation.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.ui.confirm_delete.take() else {
            return;
        };
        match self.gallery.remove_image(id) {
            Ok(removed) => {
                tracing::info!(%id, name = %removed.name, "image deleted");
                self.toasts.success(format!("Image \"{}\" deleted", removed.name));
                if !self.gallery.lightbox().is_open() {
                    self.clamp_cursor();
                }
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
    }

    /// Start uploading `paths`. Directories are expanded; each file
    /// completes on its own through `AppEvent::Upload`.
    pub fn start_upload(&mut self, paths: &[PathBuf]) {
        let files = upload::expand_paths(
            paths,
            &self.config.upload.extensions,
            self.config.upload.recursive,
        );
        if files.is_empty() {
            self.toasts.error("No image files to upload");
            return;
        }

        let Some(tx) = self.uploads.event_tx.clone() else {
            self.toasts.error("Uploads are not available");
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            self.toasts.error("Uploads are not available");
            return;
        };

        tracing::info!(count = files.len(), "upload requested");
        self.uploads.pending += files.len();
        self.toasts.info(format!("Uploading {} file(s)...", files.len()));

        let _guard = handle.enter();
        upload::spawn_uploads(
            files,
            self.config.upload.extensions.clone(),
            move |outcome| {
                // Blocking send: an upload result must not be dropped.
                if let Err(e) = tx.send(AppEvent::Upload(outcome)) {
                    tracing::debug!(error = %e, "event loop gone, upload result dropped");
                }
            },
        );
    }

    /// Apply one finished upload as a single insertion.
    pub fn handle_upload(&mut self, outcome: UploadOutcome) {
        self.uploads.pending = self.uploads.pending.saturating_sub(1);

        let file = match outcome.result {
            Ok(file) => file,
            Err(e) => {
                self.uploads.failed += 1;
                self.toasts.error(format!("Upload failed: {}", e));
                return;
            }
        };

        tracing::debug!(path = %file.path.display(), mime = file.mime, "upload read");
        let selected = self.selected_image().map(|img| img.id);
        let id = self.gallery.next_id();
        let image = file.into_image(id, &self.config.upload.default_category);
        let name = image.name.clone();

        match self.gallery.add_image(image) {
            Ok(()) => {
                self.uploads.completed += 1;
                tracing::info!(%id, name = %name, "image uploaded");
                self.toasts.success(format!("Image \"{}\" uploaded", name));
                // The new image is prepended; keep the grid on the same image.
                if let Some(pos) = selected.and_then(|sel| self.gallery.position_of(sel)) {
                    self.selection.cursor = pos;
                }
            }
            Err(e) => {
                self.uploads.failed += 1;
                self.toasts.error(e.to_string());
            }
        }
    }

    /// Files appeared in the drop folder.
    pub fn handle_dropped(&mut self, paths: Vec<PathBuf>) {
        tracing::debug!(count = paths.len(), "files dropped");
        self.start_upload(&paths);
    }
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{app_with, image, two_images};
    use crate::gallery::{Filter, ImageId};
    use crate::toast::ToastKind;
    use crate::upload::{UploadError, UploadOutcome, UploadedFile};
    use std::path::PathBuf;

    fn uploaded(name: &str) -> UploadOutcome {
        let path = PathBuf::from(format!("/tmp/{}.png", name));
        UploadOutcome {
            requested: path.clone(),
            result: Ok(UploadedFile {
                uri: format!("file://{}", path.display()),
                path,
                name: name.to_string(),
                mime: "image/png",
            }),
        }
    }

    #[test]
    fn test_toggle_favorite_in_lightbox_targets_current_image() {
        let mut app = two_images();
        app.selection.cursor = 1;
        app.open_lightbox();
        app.toggle_favorite_focused();
        assert!(app.gallery.get(ImageId(2)).unwrap().favorite);
        assert!(!app.gallery.get(ImageId(1)).unwrap().favorite);
    }

    #[test]
    fn test_unfavorite_under_favorites_filter_clamps_cursor() {
        let mut app = two_images();
        app.gallery.toggle_favorite(ImageId(1)).unwrap();
        app.gallery.toggle_favorite(ImageId(2)).unwrap();
        app.set_filter(Filter::Favorites);
        app.selection.cursor = 1;

        app.toggle_favorite_focused();
        assert_eq!(app.gallery.filtered_view().len(), 1);
        assert_eq!(app.selection.cursor, 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = two_images();
        app.request_delete();
        assert_eq!(app.ui.confirm_delete, Some(ImageId(1)));
        app.cancel_delete();
        assert_eq!(app.gallery.len(), 2);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.gallery.len(), 1);
        assert!(app.gallery.get(ImageId(1)).is_none());
        assert_eq!(app.toasts.iter().next().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_delete_last_grid_image_clamps_cursor() {
        let mut app = two_images();
        app.selection.cursor = 1;
        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.selection.cursor, 0);
    }

    #[test]
    fn test_handle_upload_prepends_with_fresh_id() {
        let mut app = app_with(vec![image(4, "hot"), image(9, "nature")]);
        app.uploads.pending = 1;
        app.handle_upload(uploaded("sunset"));

        let first = &app.gallery.images()[0];
        assert_eq!(first.id, ImageId(10));
        assert_eq!(first.name, "sunset");
        assert!(first.is_uncategorized());
        assert!(!first.favorite);
        assert_eq!(app.uploads.pending, 0);
        assert_eq!(app.uploads.completed, 1);
    }

    #[test]
    fn test_handle_upload_keeps_grid_selection() {
        let mut app = two_images();
        app.selection.cursor = 1;
        app.handle_upload(uploaded("new"));
        assert_eq!(app.selected_image().unwrap().id, ImageId(2));
    }

    #[test]
    fn test_handle_upload_with_category_outside_filter() {
        let mut app = two_images();
        app.config.upload.default_category = "nature".into();
        app.set_filter(Filter::category("hot"));
        app.handle_upload(uploaded("leaf"));
        assert_eq!(app.gallery.filtered_view().len(), 1);
        assert_eq!(app.selection.cursor, 0);
        assert_eq!(app.gallery.images()[0].category, "nature");
    }

    #[test]
    fn test_failed_upload_reports_error() {
        let mut app = two_images();
        app.handle_upload(UploadOutcome {
            requested: PathBuf::from("notes.txt"),
            result: Err(UploadError::NotAnImage(PathBuf::from("notes.txt"))),
        });
        assert_eq!(app.gallery.len(), 2);
        assert_eq!(app.uploads.failed, 1);
        assert_eq!(app.toasts.iter().next().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn test_start_upload_without_files_reports_error() {
        let mut app = two_images();
        app.start_upload(&[]);
        assert_eq!(app.uploads.pending, 0);
        assert_eq!(app.toasts.len(), 1);
    }
}
