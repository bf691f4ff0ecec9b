use super::{centered, truncate};
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

pub(super) fn draw_lightbox(
    f: &mut Frame,
    app: &App,
    image: &Image,
    area: Rect,
    theme: &GalleryTheme,
) {
    let position = app.gallery.lightbox().index().unwrap_or(0) + 1;
    let total = app.gallery.filtered_view().len();

    let frame = centered(area, area.width.saturating_sub(4).max(40), area.height);
    let block = Block::default()
        .title(format!(" {} ", truncate(&image.name, frame.width.saturating_sub(4) as usize)))
        .title_style(
            Style::default()
                .fg(theme.accent_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(Line::from(format!(" {} / {} ", position, total)).centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_dark));

    let inner = block.inner(frame);
    f.render_widget(block, frame);

    let favorite = if image.favorite {
        Span::styled("♥ Favorite", Style::default().fg(theme.accent_highlight))
    } else {
        Span::styled("♡ Not a favorite", Style::default().fg(theme.fg_muted))
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            image.name.as_str(),
            Style::default()
                .fg(theme.fg_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            image.category_label(),
            Style::default().fg(theme.accent_secondary),
        )),
        Line::from(favorite),
        Line::from(""),
        Line::from(Span::styled(
            truncate(&image.source, inner.width as usize),
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("‹ ", Style::default().fg(theme.accent_primary)),
            Span::styled(
                format!("{} / {}", position, total),
                Style::default().fg(theme.fg_secondary),
            ),
            Span::styled(" ›", Style::default().fg(theme.accent_primary)),
        ]),
    ];

    let height = (lines.len() as u16).min(inner.height);
    let body = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(height) / 2,
        inner.width,
        height,
    );
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}
