use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::config::Theme;
use crate::tui::layout::{ChipPlacement, visible_chips};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::widget::RenderSurface;

/// Draw the tag container. Returns the chips that ended up on screen.
pub fn render_tag_container(
    f: &mut Frame,
    area: Rect,
    surface: &RenderSurface,
    selected: Option<usize>,
    row_offset: u16,
    theme: &Theme,
) -> Vec<ChipPlacement> {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let base = Style::default().fg(fg_color).bg(bg_color);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Tags ({}) ", surface.chips.len()))
        .style(base);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !surface.container_visible {
        let placeholder = Paragraph::new("No tags yet. Type one below and press Enter.")
            .style(base.add_modifier(Modifier::DIM));
        f.render_widget(placeholder, inner);
        return Vec::new();
    }

    let chip_bg = parse_color(&theme.chip_bg);
    let chip_fg = if theme.chip_fg.is_empty() {
        get_contrast_text_color(chip_bg)
    } else {
        parse_color(&theme.chip_fg)
    };
    let highlight_bg = parse_color(&theme.highlight_bg);
    let highlight_fg = if theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&theme.highlight_fg)
    };

    let placements = visible_chips(inner, &surface.chips, row_offset);
    for placement in &placements {
        let style = if selected == Some(placement.index) {
            Style::default().fg(highlight_fg).bg(highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(chip_fg).bg(chip_bg)
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", placement.label), style),
            Span::styled("x", style.add_modifier(Modifier::BOLD)),
            Span::styled(" ", style),
        ]);
        f.render_widget(Paragraph::new(line), placement.area);
    }
    placements
}
