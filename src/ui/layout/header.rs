use crate::app::App;
use crate::gallery::Filter;
use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn draw_header(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    let counts = app.gallery.counts();
    let total = app.gallery.filtered_view().len();
    let count_info = if total == 0 {
        "0/0".to_string()
    } else {
        format!("{}/{}", app.selection.cursor.min(total - 1) + 1, total)
    };

    let mut header_spans = vec![
        Span::styled(
            " Galleria ",
            Style::default()
                .fg(theme.accent_highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme.fg_muted)),
        Span::styled(
            format!("{} images", counts.all),
            Style::default().fg(theme.fg_secondary),
        ),
        Span::styled(" │ ", Style::default().fg(theme.fg_muted)),
        Span::styled(count_info, Style::default().fg(theme.accent_primary)),
        Span::styled(" │ ", Style::default().fg(theme.fg_muted)),
        Span::styled(
            format!("♥ {}", counts.favorites),
            Style::default().fg(theme.accent_highlight),
        ),
    ];

    if app.uploads.pending > 0 {
        header_spans.push(Span::styled(" │ ", Style::default().fg(theme.fg_muted)));
        header_spans.push(Span::styled(
            format!("⇪ uploading {}", app.uploads.pending),
            Style::default().fg(theme.warning),
        ));
    }

    let paragraph = Paragraph::new(Line::from(header_spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// One button per filter, with the number of images it would show.
pub(super) fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    let counts = app.gallery.counts();
    let active = app.gallery.filter();

    let mut spans = Vec::new();
    for (i, filter) in app.filter_buttons().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let label = match filter {
            Filter::Favorites => format!(" ♥ {} {} ", filter.display_name(), counts.for_filter(filter)),
            _ => format!(" {} {} ", filter.display_name(), counts.for_filter(filter)),
        };
        let style = if filter == active {
            Style::default()
                .fg(theme.bg_medium)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        spans.push(Span::styled(label, style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

pub(super) fn draw_footer(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    // Command mode - show command input line
    if app.ui.command_mode {
        let cmd_line = Line::from(vec![
            Span::styled(
                ":",
                Style::default()
                    .fg(theme.accent_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                &app.ui.command_buffer,
                Style::default().fg(theme.fg_primary),
            ),
            Span::styled("█", Style::default().fg(theme.accent_primary)), // Cursor
        ]);
        f.render_widget(Paragraph::new(cmd_line), area);
        return;
    }

    let keys: &[(&str, &str)] = if app.gallery.lightbox().is_open() {
        &[
            ("←/→", " prev/next"),
            ("f", " favorite"),
            ("d", " delete"),
            ("Esc", " close"),
        ]
    } else {
        &[
            ("←↑↓→", " move"),
            ("Enter", " open"),
            ("Tab", " filter"),
            ("f", " favorite"),
            ("d", " delete"),
            (":", " cmd"),
            ("?", " help"),
            ("q", " quit"),
        ]
    };

    draw_help_line(f, keys, area, theme);
}

fn draw_help_line(f: &mut Frame, keys: &[(&str, &str)], area: Rect, theme: &GalleryTheme) {
    let sep = Span::styled(" │ ", Style::default().fg(theme.fg_muted));

    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(sep.clone());
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent_primary)));
        spans.push(Span::styled(*action, Style::default().fg(theme.fg_muted)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
