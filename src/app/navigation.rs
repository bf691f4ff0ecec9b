use super::App;
use crate::gallery::{GalleryError, Image};

impl App {
    /// Image under the grid cursor, if any.
    pub fn selected_image(&self) -> Option<&Image> {
        self.gallery
            .filtered_view()
            .get(self.selection.cursor)
            .copied()
    }

    /// Columns the grid was last drawn with, else the configured count.
    fn grid_columns(&self) -> usize {
        if self.selection.columns > 0 {
            self.selection.columns
        } else {
            self.config.display.grid_columns.max(1)
        }
    }

    /// Keep the cursor inside the filtered view after it shrinks.
    pub fn clamp_cursor(&mut self) {
        let len = self.gallery.filtered_view().len();
        if len == 0 {
            self.selection.cursor = 0;
        } else if self.selection.cursor >= len {
            self.selection.cursor = len - 1;
        }
    }

    /// Move the grid cursor right, wrapping to the first image.
    pub fn cursor_next(&mut self) {
        let len = self.gallery.filtered_view().len();
        if len > 0 {
            self.selection.cursor = (self.selection.cursor + 1) % len;
        }
    }

    /// Move the grid cursor left, wrapping to the last image.
    pub fn cursor_prev(&mut self) {
        let len = self.gallery.filtered_view().len();
        if len > 0 {
            self.selection.cursor = if self.selection.cursor == 0 {
                len - 1
            } else {
                self.selection.cursor - 1
            };
        }
    }

    /// Move the grid cursor one row down (stays put on the last row).
    pub fn cursor_down(&mut self) {
        let len = self.gallery.filtered_view().len();
        let target = self.selection.cursor + self.grid_columns();
        if target < len {
            self.selection.cursor = target;
        }
    }

    /// Move the grid cursor one row up (stays put on the first row).
    pub fn cursor_up(&mut self) {
        if let Some(target) = self.selection.cursor.checked_sub(self.grid_columns()) {
            self.selection.cursor = target;
        }
    }

    pub fn cursor_first(&mut self) {
        self.selection.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.selection.cursor = self.gallery.filtered_view().len().saturating_sub(1);
    }

    /// Open the lightbox on the grid cursor. Refused on an empty view.
    pub fn open_lightbox(&mut self) {
        match self.gallery.open_at(self.selection.cursor) {
            Ok(()) => {
                tracing::debug!(index = self.selection.cursor, "lightbox opened");
            }
            Err(GalleryError::OutOfRange { len: 0, .. }) => {
                self.toasts.info("No images available in this category.");
            }
            Err(e) => {
                self.toasts.error(e.to_string());
            }
        }
    }

    /// Close the lightbox and leave the grid cursor on the last viewed image.
    pub fn close_lightbox(&mut self) {
        if let Some(index) = self.gallery.lightbox().index() {
            self.selection.cursor = index;
            self.clamp_cursor();
        }
        self.gallery.close();
    }

    pub fn lightbox_next(&mut self) {
        let result = self.gallery.advance();
        self.after_lightbox_step(result);
    }

    pub fn lightbox_prev(&mut self) {
        let result = self.gallery.retreat();
        self.after_lightbox_step(result);
    }

    fn after_lightbox_step(&mut self, result: Result<usize, GalleryError>) {
        match result {
            Ok(index) => self.selection.cursor = index,
            Err(GalleryError::LightboxClosed) => {}
            Err(e) => {
                tracing::debug!(error = %e, "lightbox step on empty view");
                self.gallery.close();
                self.clamp_cursor();
                self.toasts.info("No images left in this view.");
            }
        }
    }

    /// Image for the lightbox to show, if it is open and its index resolves.
    pub fn lightbox_image(&self) -> Option<&Image> {
        self.gallery.current_image().ok()
    }

    /// Close a lightbox whose index no longer resolves.
    ///
    /// Runs after each batch of events, so removals and filter changes never
    /// leave a wrong or missing image on screen.
    pub fn sync_lightbox(&mut self) {
        match self.gallery.current_image() {
            Ok(_) | Err(GalleryError::LightboxClosed) => {}
            Err(e) => {
                tracing::debug!(error = %e, "closing lightbox on stale index");
                self.gallery.close();
                self.clamp_cursor();
                self.toasts.info("The image you were viewing is no longer in this view.");
            }
        }
    }
}
