use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

mod grid;
mod header;
mod lightbox;
mod popups;

use grid::draw_grid;
use header::{draw_filter_bar, draw_footer, draw_header};
use lightbox::draw_lightbox;
use popups::{draw_confirm_popup, draw_help_popup, draw_toasts};

/// Render one frame. Only layout bookkeeping (grid columns and scroll) is
/// written back to `app`.
pub fn draw(f: &mut Frame, app: &mut App) {
    let lightbox_image = app.lightbox_image().cloned();
    let theme = app.ui.theme.clone();
    let area = f.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_dark));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(2), // Filter buttons
            Constraint::Min(5),    // Grid or lightbox
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    draw_header(f, app, chunks[0], &theme);
    draw_filter_bar(f, app, chunks[1], &theme);

    match lightbox_image {
        Some(image) => draw_lightbox(f, app, &image, chunks[2], &theme),
        None => draw_grid(f, app, chunks[2], &theme),
    }

    draw_footer(f, app, chunks[3], &theme);

    // Popups on top
    if app.ui.show_help {
        draw_help_popup(f, app, area, &theme);
    } else if app.ui.confirm_delete.is_some() {
        draw_confirm_popup(f, app, area, &theme);
    }

    draw_toasts(f, app, area, &theme);
}

fn center_vertically(area: Rect, height: u16) -> Rect {
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x, y, area.width, height.min(area.height))
}

/// Centered rect of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Shorten `text` to `max` characters, ending with an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app_with, image, two_images};
    use crate::gallery::{Filter, ImageId};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for (i, cell) in buffer.content.iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % width as usize == 0 {
                out.push('\n');
            }
        }
        out
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("sunset", 10), "sunset");
        assert_eq!(truncate("sunset", 4), "sun…");
        assert_eq!(truncate("sunset", 0), "");
    }

    #[test]
    fn test_centered_stays_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered(area, 50, 50);
        assert!(popup.width <= 16 && popup.height <= 6);
        assert!(popup.x + popup.width <= area.width);
    }

    #[test]
    fn test_grid_renders_names_and_filter_buttons() {
        let mut app = two_images();
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("img1"));
        assert!(screen.contains("img2"));
        assert!(screen.contains("All"));
        assert!(screen.contains("Favorites"));
    }

    #[test]
    fn test_empty_view_shows_placeholder() {
        let mut app = two_images();
        app.set_filter(Filter::Favorites);
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("No images available in this category."));
    }

    #[test]
    fn test_lightbox_shows_position_and_category() {
        let mut app = app_with(vec![image(1, "hot"), image(2, "nature"), image(3, "hot")]);
        app.selection.cursor = 1;
        app.open_lightbox();
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("img2"));
        assert!(screen.contains("Nature"));
        assert!(screen.contains("2 / 3"));
    }

    #[test]
    fn test_stale_lightbox_draws_grid_without_mutating_gallery() {
        let mut app = two_images();
        app.selection.cursor = 1;
        app.open_lightbox();
        app.gallery.remove_image(ImageId(2)).unwrap();
        let screen = render(&mut app, 100, 30);
        assert!(app.gallery.lightbox().is_open());
        assert!(app.toasts.is_empty());
        assert!(screen.contains("img1"));
    }

    #[test]
    fn test_row_movement_uses_columns_that_fit() {
        let mut app = app_with((1..=12).map(|i| image(i, "hot")).collect());
        app.config.display.grid_columns = 4;

        // 28 columns inside the border only fit two cards.
        render(&mut app, 30, 30);
        assert_eq!(app.selection.columns, 2);
        app.cursor_down();
        assert_eq!(app.selection.cursor, 2);

        render(&mut app, 100, 30);
        assert_eq!(app.selection.columns, 4);
        app.cursor_down();
        assert_eq!(app.selection.cursor, 6);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = two_images();
        app.ui.show_help = true;
        app.toasts.info("hello");
        render(&mut app, 10, 5);
    }
}
