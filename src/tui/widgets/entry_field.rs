use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::config::Theme;
use crate::tui::widgets::color::parse_color;
use crate::widget::Entry;

pub fn render_entry_field(f: &mut Frame, area: Rect, entry: &Entry, focused: bool, theme: &Theme) {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let border_color = if focused { parse_color(&theme.highlight_bg) } else { fg_color };

    let paragraph = Paragraph::new(entry.visible_text(area.width as usize))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" New tag ")
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(paragraph, area);

    if focused {
        if let Some((x, y)) = entry.get_cursor_screen_pos(area) {
            f.set_cursor_position((x, y));
        }
    }
}
