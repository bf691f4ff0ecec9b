use crate::gallery::{Filter, GalleryState, Image, ImageId};
use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Prefix joined onto every relative `filename`
    pub base_url: String,
    /// Categories offered as filter buttons, in order. Omitted in a
    /// `[gallery]` table means derive them from the images.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Seed built-in sample images when `images` is empty
    pub use_samples: bool,
    pub images: Vec<ImageEntry>,
}

/// One statically configured image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub id: u64,
    pub name: String,
    pub filename: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub grid_columns: usize,
    /// Show the category line under each grid tile
    pub show_categories: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Folder watched for dropped files
    pub drop_dir: Option<PathBuf>,
    pub extensions: Vec<String>,
    /// Category assigned to uploaded images (empty = uncategorized)
    pub default_category: String,
    /// Walk directories recursively when a folder is uploaded
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub duration_ms: u64,
    pub max_visible: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub next: String,
    pub prev: String,
    pub open: String,
    pub close: String,
    pub favorite: String,
    pub delete: String,
    pub quit: String,
    pub filter_next: String,
    pub filter_prev: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            categories: vec!["nature".into(), "urban".into(), "portrait".into()],
            use_samples: true,
            images: Vec::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            grid_columns: 4,
            show_categories: true,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            drop_dir: None,
            extensions: crate::utils::IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            default_category: String::new(),
            recursive: false,
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            max_visible: 3,
        }
    }
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            next: "l".to_string(),
            prev: "h".to_string(),
            open: "Enter".to_string(),
            close: "Esc".to_string(),
            favorite: "f".to_string(),
            delete: "d".to_string(),
            quit: "q".to_string(),
            filter_next: "Tab".to_string(),
            filter_prev: "BackTab".to_string(),
        }
    }
}

impl KeybindingsConfig {
    /// Parse a keybinding string into a KeyCode
    pub fn parse_key(s: &str) -> Option<KeyCode> {
        let s = s.trim();

        // Single character
        if s.chars().count() == 1 {
            if let Some(ch) = s.chars().next() {
                return Some(KeyCode::Char(ch));
            }
        }

        // Named keys (case insensitive)
        match s.to_lowercase().as_str() {
            "enter" | "return" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "backtab" | "shift+tab" | "s-tab" => Some(KeyCode::BackTab),
            "space" => Some(KeyCode::Char(' ')),
            "backspace" => Some(KeyCode::Backspace),
            "delete" | "del" => Some(KeyCode::Delete),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" | "pgup" => Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => Some(KeyCode::PageDown),
            "up" | "arrow_up" => Some(KeyCode::Up),
            "down" | "arrow_down" => Some(KeyCode::Down),
            "left" | "arrow_left" => Some(KeyCode::Left),
            "right" | "arrow_right" => Some(KeyCode::Right),
            f if f.starts_with('f') => f[1..]
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .map(KeyCode::F),
            _ => None,
        }
    }

    /// Check if a KeyCode matches a keybinding
    pub fn matches(&self, key: KeyCode, binding: &str) -> bool {
        Self::parse_key(binding) == Some(key)
    }
}

impl Config {
    /// Return the default path of the configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "mrmattias", "galleria")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from `path`, writing defaults if it does not exist.
    ///
    /// A file that fails to parse is left untouched and defaults are used.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "config loaded");
                    Ok(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "config parse failed");
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}",
                        path.display(),
                        e
                    );
                    eprintln!("Using default configuration.");
                    Ok(Config::default())
                }
            }
        } else {
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!(path = %path.display(), "wrote default config");
            Ok(config)
        }
    }

    /// Save config to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;

        Ok(())
    }

    /// Images the gallery starts with: configured entries, else samples.
    pub fn initial_images(&self) -> Vec<Image> {
        if self.gallery.images.is_empty() && self.gallery.use_samples {
            return sample_images();
        }

        self.gallery
            .images
            .iter()
            .map(|entry| {
                Image::from_relative(
                    ImageId(entry.id),
                    entry.name.clone(),
                    &self.gallery.base_url,
                    &entry.filename,
                    entry.category.clone(),
                )
                .with_favorite(entry.favorite)
            })
            .collect()
    }

    /// Category buttons: configured categories, or those present in the
    /// gallery, followed by "" while any image is uncategorized.
    pub fn filter_categories(&self, gallery: &GalleryState) -> Vec<String> {
        let mut categories = if self.gallery.categories.is_empty() {
            gallery.categories()
        } else {
            self.gallery.categories.clone()
        };
        if gallery.counts().uncategorized > 0 && !categories.iter().any(|c| c.is_empty()) {
            categories.push(String::new());
        }
        categories
    }

    /// Filter buttons in display order: All, categories, Favorites.
    pub fn filter_buttons(&self, gallery: &GalleryState) -> Vec<Filter> {
        let mut buttons = vec![Filter::All];
        buttons.extend(
            self.filter_categories(gallery)
                .into_iter()
                .map(Filter::Category),
        );
        buttons.push(Filter::Favorites);
        buttons
    }

    /// Parse a filter typed by the user. Category names match a button
    /// case-insensitively, by name or by label ("uncategorized").
    pub fn resolve_filter(&self, gallery: &GalleryState, text: &str) -> Filter {
        match text.parse::<Filter>().unwrap_or_default() {
            Filter::Category(name) => self
                .filter_buttons(gallery)
                .into_iter()
                .find(|button| match button {
                    Filter::Category(c) => {
                        c.eq_ignore_ascii_case(&name)
                            || button.display_name().eq_ignore_ascii_case(&name)
                    }
                    _ => false,
                })
                .unwrap_or(Filter::Category(name)),
            other => other,
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast.duration_ms)
    }

    /// Drop folder with `~` expanded.
    pub fn drop_dir(&self) -> Option<PathBuf> {
        self.upload
            .drop_dir
            .as_ref()
            .map(|dir| crate::utils::expand_tilde(&dir.to_string_lossy()))
    }
}

/// Built-in demo collection used when nothing is configured
pub fn sample_images() -> Vec<Image> {
    const BASE: &str = "https://picsum.photos/id/";
    let samples: [(u64, &str, &str, &str); 8] = [
        (1, "Misty Forest", "1018/1200/800", "nature"),
        (2, "Night Skyline", "1031/1200/800", "urban"),
        (3, "Mountain Lake", "1015/1200/800", "nature"),
        (4, "Street Portrait", "1005/800/1200", "portrait"),
        (5, "Old Bridge", "1067/1200/800", "urban"),
        (6, "Desert Dunes", "1002/1200/800", "nature"),
        (7, "Studio Light", "1027/800/1200", "portrait"),
        (8, "Untitled", "1060/1200/800", ""),
    ];

    samples
        .iter()
        .map(|&(id, name, path, category)| {
            Image::from_relative(ImageId(id), name, BASE, path, category)
        })
        .collect()
}
