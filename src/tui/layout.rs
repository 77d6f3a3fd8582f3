use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};
use ratatui::text::Span;

use crate::store::TagId;
use crate::widget::Chip;

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub tags_area: Rect,
    pub entry_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions, without the outer border
    /// Height: 3 tag container + 3 entry + 1 status
    pub const MIN_WIDTH: u16 = 20;
    pub const MIN_HEIGHT: u16 = 7;

    pub fn calculate(size: Rect) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Tag container
                Constraint::Length(3), // Entry field
                Constraint::Length(1), // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            tags_area: vertical[0],
            entry_area: vertical[1],
            status_area: vertical[2],
        }
    }
}

/// Where one chip lands inside the tag container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipPlacement {
    pub id: TagId,
    pub index: usize,
    pub row: u16,
    /// Text shown on the chip, truncated to fit
    pub label: String,
    pub area: Rect,
    /// The single cell of the `x` close control
    pub close_area: Rect,
}

/// Blank cells around the label plus the close control: " label x "
const CHIP_PADDING: u16 = 4;
const CHIP_GAP: u16 = 1;

fn text_width(s: &str) -> u16 {
    u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX)
}

fn truncate_label(text: &str, max_width: u16) -> String {
    if text_width(text) <= max_width {
        return text.to_string();
    }
    let mut label = String::new();
    let budget = max_width.saturating_sub(3);
    for ch in text.chars() {
        let mut next = label.clone();
        next.push(ch);
        if text_width(&next) > budget {
            break;
        }
        label = next;
    }
    label.push_str("...");
    label
}

/// Flow chips left to right, wrapping to a new row when one does not fit.
/// Rows are not clipped: `row` may go past the bottom of `area`.
pub fn layout_chips(area: Rect, chips: &[Chip]) -> Vec<ChipPlacement> {
    let mut placements = Vec::with_capacity(chips.len());
    if area.width <= CHIP_PADDING {
        return placements;
    }

    let max_label = area.width - CHIP_PADDING;
    let mut x = area.x;
    let mut row = 0u16;

    for (index, chip) in chips.iter().enumerate() {
        let label = truncate_label(&chip.text, max_label);
        let width = text_width(&label) + CHIP_PADDING;

        if x > area.x && x.saturating_add(width) > area.right() {
            x = area.x;
            row += 1;
        }

        let y = area.y.saturating_add(row);
        let chip_area = Rect::new(x, y, width, 1);
        let close_area = Rect::new(x + width - 2, y, 1, 1);
        placements.push(ChipPlacement {
            id: chip.id,
            index,
            row,
            label,
            area: chip_area,
            close_area,
        });

        x = x.saturating_add(width + CHIP_GAP);
    }

    placements
}

/// Placements on the rows `row_offset..row_offset + area.height`, moved up to fit `area`
pub fn visible_chips(area: Rect, chips: &[Chip], row_offset: u16) -> Vec<ChipPlacement> {
    layout_chips(area, chips)
        .into_iter()
        .filter(|p| p.row >= row_offset && p.row - row_offset < area.height)
        .map(|mut p| {
            p.area.y -= row_offset;
            p.close_area.y -= row_offset;
            p
        })
        .collect()
}

/// Row offset that keeps `row` on screen for a container `height` rows tall
pub fn scroll_to_row(current_offset: u16, row: u16, height: u16) -> u16 {
    if height == 0 {
        return current_offset;
    }
    if row < current_offset {
        row
    } else if row >= current_offset + height {
        row + 1 - height
    } else {
        current_offset
    }
}
