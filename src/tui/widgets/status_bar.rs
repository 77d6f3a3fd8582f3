use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width`, ending with an ellipsis when some are dropped
pub fn fit_key_hints(key_hints: &[String], max_width: usize) -> String {
    let mut hints_text = String::new();
    for (i, hint) in key_hints.iter().enumerate() {
        let current_len = hints_text.chars().count();
        let would_be_len = if i == 0 {
            hint.chars().count()
        } else {
            current_len + SEPARATOR.chars().count() + hint.chars().count()
        };

        if would_be_len > max_width {
            if i == 0 {
                // Even the first hint is too long
                let truncate_to = max_width.saturating_sub(ELLIPSIS.len());
                hints_text = hint.chars().take(truncate_to).collect();
                hints_text.push_str(ELLIPSIS);
            } else if current_len + ELLIPSIS.len() <= max_width {
                hints_text.push_str(ELLIPSIS);
            }
            break;
        }

        if i > 0 {
            hints_text.push_str(SEPARATOR);
        }
        hints_text.push_str(hint);
    }
    hints_text
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    theme: &Theme,
) {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let highlight_bg = parse_color(&theme.highlight_bg);
    let max_width = area.width as usize;

    let (content, style) = if let Some(msg) = message {
        // Status messages get a highlighted background for visibility
        let msg_fg = get_contrast_text_color(highlight_bg);
        let content = if msg.chars().count() > max_width {
            msg.chars().take(max_width.saturating_sub(ELLIPSIS.len())).collect::<String>() + ELLIPSIS
        } else {
            msg.clone()
        };
        (content, Style::default().fg(msg_fg).bg(highlight_bg).add_modifier(Modifier::BOLD))
    } else {
        (fit_key_hints(key_hints, max_width), Style::default().fg(fg_color).bg(bg_color))
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["Enter: Add".to_string(), "Tab: Select".to_string(), "Esc: Quit".to_string()]
    }

    #[test]
    fn all_hints_fit() {
        assert_eq!(fit_key_hints(&hints(), 80), "Enter: Add • Tab: Select • Esc: Quit");
    }

    #[test]
    fn overflow_ends_with_ellipsis() {
        assert_eq!(fit_key_hints(&hints(), 27), "Enter: Add • Tab: Select...");
        assert_eq!(fit_key_hints(&hints(), 6), "Ent...");
    }
}
