use super::{center_vertically, truncate};
use crate::app::App;
use crate::gallery::Image;
use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Card height in rows, borders included
const CARD_HEIGHT: u16 = 5;
const MIN_CARD_WIDTH: u16 = 12;

/// Keep the cursor row inside the visible window.
fn scroll_to_cursor(scroll_row: usize, cursor_row: usize, visible_rows: usize) -> usize {
    if cursor_row < scroll_row {
        cursor_row
    } else if cursor_row >= scroll_row + visible_rows {
        cursor_row + 1 - visible_rows
    } else {
        scroll_row
    }
}

pub(super) fn draw_grid(f: &mut Frame, app: &mut App, area: Rect, theme: &GalleryTheme) {
    let len = app.gallery.filtered_view().len();
    if len == 0 {
        let text = Paragraph::new("No images available in this category.")
            .style(Style::default().fg(theme.fg_muted))
            .alignment(Alignment::Center);
        f.render_widget(text, center_vertically(area, 1));
        return;
    }

    // Fewer columns when the terminal is too narrow for the configured count.
    let max_columns = (area.width / MIN_CARD_WIDTH).max(1) as usize;
    let columns = app.config.display.grid_columns.clamp(1, max_columns);
    app.selection.columns = columns;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let cursor = app.selection.cursor.min(len - 1);

    app.selection.scroll_row =
        scroll_to_cursor(app.selection.scroll_row, cursor / columns, visible_rows);

    let card_width = area.width / columns as u16;
    let first = app.selection.scroll_row * columns;
    let show_categories = app.config.display.show_categories;
    let view = app.gallery.filtered_view();

    for (offset, image) in view.iter().skip(first).take(visible_rows * columns).enumerate() {
        let col = (offset % columns) as u16;
        let row = (offset / columns) as u16;
        let card = Rect::new(
            area.x + col * card_width,
            area.y + row * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
        );
        draw_card(f, image, first + offset == cursor, show_categories, card, theme);
    }

    // Scroll hint when rows are hidden below.
    let total_rows = len.div_ceil(columns);
    if app.selection.scroll_row + visible_rows < total_rows && area.height > 0 {
        let hint = Paragraph::new(format!(
            "↓ {} more",
            len.saturating_sub(first + visible_rows * columns)
        ))
        .style(Style::default().fg(theme.fg_muted))
        .alignment(Alignment::Right);
        let hint_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        f.render_widget(hint, hint_area);
    }
}

fn draw_card(
    f: &mut Frame,
    image: &Image,
    selected: bool,
    show_categories: bool,
    area: Rect,
    theme: &GalleryTheme,
) {
    let border_style = if selected {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };

    let text_width = area.width.saturating_sub(4) as usize;
    let title = format!(" {} ", truncate(&image.name, text_width));
    let block = Block::default()
        .title(title)
        .title_style(if selected {
            Style::default()
                .fg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_primary)
        })
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut first_line = Vec::new();
    if image.favorite {
        first_line.push(Span::styled("♥ ", Style::default().fg(theme.accent_highlight)));
    }
    if show_categories {
        first_line.push(Span::styled(
            image.category_label(),
            Style::default().fg(theme.accent_secondary),
        ));
    }

    let lines = vec![
        Line::from(first_line),
        Line::from(Span::styled(
            truncate(&image.source, inner.width as usize),
            Style::default().fg(theme.fg_muted),
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::scroll_to_cursor;

    #[test]
    fn test_scroll_follows_cursor() {
        // Visible window already holds the cursor.
        assert_eq!(scroll_to_cursor(0, 1, 3), 0);
        // Cursor below the window.
        assert_eq!(scroll_to_cursor(0, 5, 3), 3);
        // Cursor above the window.
        assert_eq!(scroll_to_cursor(4, 2, 3), 2);
    }
}
