use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{App, Focus};
use crate::tui::layout::{Layout, layout_chips, scroll_to_row};
use crate::tui::widgets::{
    color::parse_color,
    entry_field::render_entry_field,
    status_bar::render_status_bar,
    tags::render_tag_container,
};
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let theme = app.config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.field_name))
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(outer_block, f.area());

    let selected = match app.focus {
        Focus::Chips { selected } => Some(selected),
        Focus::Entry => None,
    };

    // Keep the selected chip's row on screen and never scroll past the last row
    let container_inner = Block::default().borders(Borders::ALL).inner(layout.tags_area);
    let placements = layout_chips(container_inner, &app.surface.chips);
    let row_count = placements.last().map_or(0, |p| p.row + 1);
    let max_offset = row_count.saturating_sub(container_inner.height);
    if let Some(placement) = selected.and_then(|selected| placements.get(selected)) {
        app.chip_row_offset = scroll_to_row(app.chip_row_offset, placement.row, container_inner.height);
    }
    app.chip_row_offset = app.chip_row_offset.min(max_offset);

    app.chip_hitboxes = render_tag_container(
        f,
        layout.tags_area,
        &app.surface,
        selected,
        app.chip_row_offset,
        &theme,
    );

    app.widget.entry_mut().update_horizontal_scroll(layout.entry_area.width as usize);
    render_entry_field(f, layout.entry_area, app.widget.entry(), app.focus == Focus::Entry, &theme);

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_ref(), &key_hints, &theme);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let keys = &app.config.key_bindings;
    let key = |binding: &str| format_key_binding_for_display(binding);
    match app.focus {
        Focus::Entry => vec![
            format!("{}: Add tag", key(&keys.commit)),
            format!("{}: Select tags", key(&keys.toggle_focus)),
            format!("{}: Paste", key(&keys.paste)),
            "Click x: Remove".to_string(),
            format!("{}: Quit", key(&keys.quit)),
        ],
        Focus::Chips { .. } => vec![
            format!("{}/{}: Move", key(&keys.chip_left), key(&keys.chip_right)),
            format!("{}: Remove", key(&keys.remove_chip)),
            format!("{}: Back to entry", key(&keys.toggle_focus)),
            format!("{}: Back", key(&keys.quit)),
        ],
    }
}
