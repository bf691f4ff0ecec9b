use super::{centered, truncate};
use crate::app::App;
use crate::toast::ToastKind;
use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const TOAST_WIDTH: u16 = 44;

fn section(title: &str, theme: &GalleryTheme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.accent_highlight)
            .add_modifier(Modifier::BOLD),
    ))
}

fn entry(key: &str, action: &str, theme: &GalleryTheme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<10}", key),
            Style::default().fg(theme.accent_primary),
        ),
        Span::styled(action.to_string(), Style::default().fg(theme.fg_secondary)),
    ])
}

pub(super) fn draw_help_popup(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    let kb = &app.config.keybindings;
    let popup_area = centered(area, 52, 30);

    f.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(" Galleria Help ")
        .title_style(
            Style::default()
                .fg(theme.accent_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_primary))
        .style(Style::default().bg(theme.bg_dark));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let help_text = vec![
        section("Grid", theme),
        entry(&format!("{}/{}/←/→", kb.prev, kb.next), "Move selection", theme),
        entry("j/k/↑/↓", "Move by row", theme),
        entry(&kb.open, "Open lightbox", theme),
        entry(&format!("{}/{}", kb.filter_next, kb.filter_prev), "Cycle filter", theme),
        entry("0-9", "Pick filter button", theme),
        Line::from(""),
        section("Lightbox", theme),
        entry("←/→", "Previous / next (wraps)", theme),
        entry(&kb.close, "Close", theme),
        Line::from(""),
        section("Actions", theme),
        entry(&kb.favorite, "Toggle favorite", theme),
        entry(&kb.delete, "Delete (asks first)", theme),
        entry("x", "Dismiss notifications", theme),
        entry(":", "Command mode", theme),
        Line::from(""),
        section("Commands (:)", theme),
        entry(":filter <f>", "Category, all or favorites", theme),
        entry(":upload <p>", "Add files or folders", theme),
        entry(":fav  :rm", "Favorite / delete", theme),
        entry(":go <n>", "Jump to image n", theme),
        entry(":clear", "Show all images", theme),
        Line::from(""),
        entry(&format!("{}/Esc", kb.quit), "Quit", theme),
    ];

    f.render_widget(Paragraph::new(help_text), inner);
}

pub(super) fn draw_confirm_popup(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    let Some(image) = app
        .ui
        .confirm_delete
        .and_then(|id| app.gallery.get(id))
    else {
        return;
    };

    let popup_area = centered(area, 50, 5);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Delete image ")
        .title_style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.bg_dark));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let name_width = (inner.width as usize).saturating_sub(20);
    let text = vec![
        Line::from(vec![
            Span::styled("Delete ", Style::default().fg(theme.fg_primary)),
            Span::styled(
                format!("\"{}\"", truncate(&image.name, name_width)),
                Style::default()
                    .fg(theme.accent_highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(theme.fg_primary)),
        ]),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.error)),
            Span::styled(" delete  ", Style::default().fg(theme.fg_muted)),
            Span::styled("n/Esc", Style::default().fg(theme.accent_primary)),
            Span::styled(" keep", Style::default().fg(theme.fg_muted)),
        ]),
    ];

    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Stack toasts in the top-right corner, newest on top.
pub(super) fn draw_toasts(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let x = area.x + area.width - width - 1;
    let mut y = area.y + 1;
    let now = Instant::now();

    for toast in app.toasts.iter() {
        if y + 3 > area.y + area.height {
            break;
        }
        let color = match toast.kind {
            ToastKind::Success => theme.success,
            ToastKind::Info => theme.accent_primary,
            ToastKind::Error => theme.error,
        };

        let toast_area = Rect::new(x, y, width, 3);
        f.render_widget(Clear, toast_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.bg_dark));
        let inner = block.inner(toast_area);
        f.render_widget(block, toast_area);

        // Fade the text during the last second.
        let text_color = if toast.remaining(app.toasts.lifetime(), now) < Duration::from_secs(1) {
            theme.fg_muted
        } else {
            theme.fg_primary
        };
        let line = Line::from(vec![
            Span::styled(format!("{} ", toast.kind.icon()), Style::default().fg(color)),
            Span::styled(
                truncate(&toast.message, (inner.width as usize).saturating_sub(2)),
                Style::default().fg(text_color),
            ),
        ]);
        f.render_widget(Paragraph::new(line), inner);

        y += 3;
    }
}
