use anyhow::Result;
use std::path::Path;

use crate::app::Config;
use crate::gallery::{GalleryError, GalleryState, Image, ImageId};

fn load_gallery(config: &Config) -> GalleryState {
    GalleryState::new(config.initial_images())
}

fn format_row(image: &Image) -> String {
    format!(
        "{:>4}  {} {:<24} {:<14} {}",
        image.id.0,
        if image.favorite { "♥" } else { " " },
        image.name,
        image.category_label(),
        image.source
    )
}

pub fn cmd_list(config: &Config, filter: &str, json: bool) -> Result<()> {
    let mut gallery = load_gallery(config);
    let filter = config.resolve_filter(&gallery, filter);
    gallery.set_filter(filter);
    let view = gallery.filtered_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No images available in this category.");
        return Ok(());
    }

    for image in view {
        println!("{}", format_row(image));
    }

    Ok(())
}

/// One line per filter button, with counts.
fn category_lines(config: &Config, gallery: &GalleryState) -> Vec<String> {
    let counts = gallery.counts();
    config
        .filter_buttons(gallery)
        .iter()
        .map(|f| format!("{:<16} {}", f.display_name(), counts.for_filter(f)))
        .collect()
}

pub fn cmd_categories(config: &Config) {
    let gallery = load_gallery(config);
    for line in category_lines(config, &gallery) {
        println!("{}", line);
    }
}

pub fn cmd_show(config: &Config, id: u64, json: bool) -> Result<()> {
    let gallery = load_gallery(config);
    let image = gallery
        .get(ImageId(id))
        .ok_or(GalleryError::NotFound(ImageId(id)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(image)?);
        return Ok(());
    }

    println!("Id:       {}", image.id);
    println!("Name:     {}", image.name);
    println!("Category: {}", image.category_label());
    println!("Favorite: {}", if image.favorite { "yes" } else { "no" });
    println!("Source:   {}", image.source);
    Ok(())
}

pub fn cmd_config(path: &Path) {
    println!("{}", path.display());
}
