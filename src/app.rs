use crate::gallery::{GalleryState, ImageId};
use crate::toast::ToastQueue;
use crate::upload::UploadOutcome;
use crossterm::event;
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;

mod actions;
mod commands;
mod config;
mod filters;
mod navigation;
mod runtime;

pub use config::{sample_images, Config};
pub use runtime::run_tui;

/// Events from background threads
pub enum AppEvent {
    Key(event::KeyEvent),
    /// One finished upload (success or failure)
    Upload(UploadOutcome),
    /// Files that appeared in the drop folder
    Dropped(Vec<PathBuf>),
    Resize,
    Tick,
}

/// UI-related transient state (popups, command mode).
pub struct UiState {
    pub should_quit: bool,
    pub show_help: bool,
    pub command_mode: bool,
    pub command_buffer: String,
    /// Image awaiting a y/n delete confirmation
    pub confirm_delete: Option<ImageId>,
    /// Cached theme (updated on theme-change detection, not every frame)
    pub theme: crate::ui::theme::GalleryTheme,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            should_quit: false,
            show_help: false,
            command_mode: false,
            command_buffer: String::new(),
            confirm_delete: None,
            theme: crate::ui::theme::gallery_theme(),
        }
    }
}

/// Grid cursor over the filtered view.
#[derive(Default)]
pub struct SelectionState {
    pub cursor: usize,
    /// First visible grid row, kept in sync with the cursor while drawing
    pub scroll_row: usize,
    /// Columns the grid was last drawn with (0 until the first draw)
    pub columns: usize,
}

/// In-flight upload bookkeeping.
#[derive(Default)]
pub struct UploadState {
    pub pending: usize,
    pub completed: usize,
    pub failed: usize,
    event_tx: Option<SyncSender<AppEvent>>,
}

pub struct App {
    pub gallery: GalleryState,
    pub config: Config,
    pub ui: UiState,
    pub selection: SelectionState,
    pub toasts: ToastQueue,
    pub uploads: UploadState,
}

impl App {
    /// Create a new App seeded from the configured (or sample) images.
    pub fn new(config: Config) -> Self {
        let gallery = GalleryState::new(config.initial_images());
        let toasts = ToastQueue::new(config.toast_duration(), config.toast.max_visible);

        tracing::info!(images = gallery.len(), "gallery seeded");

        Self {
            gallery,
            config,
            ui: UiState::default(),
            selection: SelectionState::default(),
            toasts,
            uploads: UploadState::default(),
        }
    }

    /// Attach the channel that upload completions are delivered on.
    pub fn set_event_channel(&mut self, tx: SyncSender<AppEvent>) {
        self.uploads.event_tx = Some(tx);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{App, Config};
    use crate::gallery::{Image, ImageId};

    pub(crate) fn image(id: u64, category: &str) -> Image {
        Image::new(
            ImageId(id),
            format!("img{}", id),
            format!("https://cdn.example.com/{}.jpg", id),
            category,
        )
    }

    /// App over a fixed collection, without samples or a terminal.
    pub(crate) fn app_with(images: Vec<Image>) -> App {
        let mut config = Config::default();
        config.gallery.use_samples = false;
        config.gallery.categories = vec!["hot".into(), "nature".into()];
        let mut app = App::new(config);
        for img in images.into_iter().rev() {
            app.gallery.add_image(img).expect("unique test ids");
        }
        app
    }

    pub(crate) fn two_images() -> App {
        app_with(vec![image(1, "hot"), image(2, "nature")])
    }
}
