//! Dropdown selector used on the settings screen.
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::theme::Theme;

/// Where a dropdown opens relative to the row that owns it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropdownPlacement {
    pub popup_under_anchor: bool,
    pub margin_top: u16,
}

impl DropdownPlacement {
    /// The dropdown is as wide as its anchor. Under the anchor it starts
    /// `anchor.height + margin_top` rows lower, otherwise it covers the
    /// anchor row. The result is kept inside `bounds`.
    pub fn dropdown_area(&self, anchor: Rect, item_count: u16, bounds: Rect) -> Rect {
        let offset = if self.popup_under_anchor {
            anchor.height.saturating_add(self.margin_top)
        } else {
            0
        };
        let height = item_count.saturating_add(2).min(bounds.height);
        let y = anchor
            .y
            .saturating_add(offset)
            .min(bounds.bottom().saturating_sub(height))
            .max(bounds.y);
        let x = anchor.x.clamp(bounds.x, bounds.right());
        let width = anchor.width.min(bounds.right().saturating_sub(x));
        Rect::new(x, y, width, height)
    }
}

pub fn render_dropdown(frame: &mut Frame, area: Rect, options: &[&str], selected: usize) {
    frame.render_widget(Clear, area);
    let lines = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let is_selected = index == selected;
            let style = if is_selected {
                Theme::focused()
            } else {
                Style::default().fg(Theme::text())
            };
            Line::from(vec![
                Span::styled(if is_selected { "> " } else { "  " }, Theme::marker(is_selected)),
                Span::styled(*option, style),
            ])
        })
        .collect::<Vec<_>>();
    let dropdown = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(
                Style::default()
                    .fg(Theme::secondary())
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(dropdown, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn overlays_anchor_by_default() {
        let anchor = Rect::new(30, 5, 20, 1);
        let area = DropdownPlacement::default().dropdown_area(anchor, 3, BOUNDS);
        assert_eq!(area, Rect::new(30, 5, 20, 5));
    }

    #[test]
    fn opens_under_anchor_with_margin() {
        let placement = DropdownPlacement {
            popup_under_anchor: true,
            margin_top: 1,
        };
        let anchor = Rect::new(30, 5, 20, 1);
        let area = placement.dropdown_area(anchor, 3, BOUNDS);
        assert_eq!(area.y, 7);
        assert_eq!(area.width, anchor.width);
    }

    #[test]
    fn stays_inside_bounds() {
        let placement = DropdownPlacement {
            popup_under_anchor: true,
            margin_top: 0,
        };
        let anchor = Rect::new(70, 22, 20, 1);
        let area = placement.dropdown_area(anchor, 4, BOUNDS);
        assert_eq!(area.bottom(), 24);
        assert_eq!(area.right(), 80);
        assert_eq!(area.height, 6);
    }
}
