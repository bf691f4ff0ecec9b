use ratatui::style::Color;
use std::fs;

/// Gallery colors, one palette per terminal background
#[derive(Clone)]
pub struct GalleryTheme {
    // Backgrounds
    pub bg_dark: Color,
    pub bg_medium: Color,

    // Foregrounds
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accents
    pub accent_primary: Color,   // Selection
    pub accent_secondary: Color, // Category labels
    pub accent_highlight: Color, // Favorites, titles

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl GalleryTheme {
    /// Paper - for light terminal backgrounds
    pub fn paper() -> Self {
        Self {
            // Transparent backgrounds (inherit from terminal)
            bg_dark: Color::Reset,
            bg_medium: Color::Rgb(232, 228, 220), // #e8e4dc - matte card

            fg_primary: Color::Rgb(20, 20, 24),   // #141418
            fg_secondary: Color::Rgb(60, 58, 70), // #3c3a46
            fg_muted: Color::Rgb(110, 106, 120),  // #6e6a78

            accent_primary: Color::Rgb(36, 88, 160),    // #2458a0 - ink blue
            accent_secondary: Color::Rgb(30, 120, 100), // #1e7864 - teal
            accent_highlight: Color::Rgb(176, 40, 72),  // #b02848 - heart red

            success: Color::Rgb(20, 110, 60), // #146e3c
            warning: Color::Rgb(150, 96, 18), // #966012
            error: Color::Rgb(170, 30, 30),   // #aa1e1e

            border: Color::Rgb(190, 184, 172),       // #beb8ac
            border_focused: Color::Rgb(36, 88, 160), // #2458a0
        }
    }

    /// Darkroom - for dark terminal backgrounds
    pub fn darkroom() -> Self {
        Self {
            bg_dark: Color::Reset,
            bg_medium: Color::Rgb(34, 34, 40), // #222228

            fg_primary: Color::Rgb(240, 240, 245),   // #f0f0f5
            fg_secondary: Color::Rgb(190, 190, 205), // #bebecd
            fg_muted: Color::Rgb(100, 100, 115),     // #646473

            accent_primary: Color::Rgb(110, 180, 255),   // #6eb4ff
            accent_secondary: Color::Rgb(120, 220, 190), // #78dcbe
            accent_highlight: Color::Rgb(255, 105, 135), // #ff6987

            success: Color::Rgb(110, 230, 140), // #6ee68c
            warning: Color::Rgb(255, 205, 95),  // #ffcd5f
            error: Color::Rgb(255, 90, 90),     // #ff5a5a

            border: Color::Rgb(70, 70, 85),            // #464655
            border_focused: Color::Rgb(110, 180, 255), // #6eb4ff
        }
    }
}

impl Default for GalleryTheme {
    fn default() -> Self {
        if detect_light_theme() {
            Self::paper()
        } else {
            Self::darkroom()
        }
    }
}

/// Guess the terminal background from `GALLERIA_THEME`, `COLORFGBG`,
/// then the Alacritty/Kitty config headers.
fn detect_light_theme() -> bool {
    if let Ok(theme_env) = std::env::var("GALLERIA_THEME") {
        return theme_env.to_lowercase().contains("light");
    }

    // "fg;bg" as exported by rxvt and others; bg 7 or 15 is light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.rsplit(';').next() {
            return matches!(bg.trim(), "7" | "15");
        }
    }

    let Ok(home) = std::env::var("HOME") else {
        return false;
    };

    for config in [".config/kitty/kitty.conf", ".config/alacritty/alacritty.toml"] {
        if let Ok(content) = fs::read_to_string(format!("{}/{}", home, config)) {
            let header: String = content
                .lines()
                .take(10)
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            if header.contains("light") {
                return true;
            }
            if header.contains("dark") {
                return false;
            }
        }
    }

    // Default to dark
    false
}

/// Get the current theme based on terminal detection
pub fn gallery_theme() -> GalleryTheme {
    GalleryTheme::default()
}

/// Check if current theme is light (for change detection)
pub fn is_light_theme() -> bool {
    detect_light_theme()
}
