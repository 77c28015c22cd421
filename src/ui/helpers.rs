use ratatui::style::Color;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

pub fn hex_to_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Renders values as vertical bars `height` rows tall, top row first. Each
/// value takes one column. Bars scale to the largest value.
pub fn bar_rows(data: &[f32], height: usize) -> Vec<String> {
    let max = data.iter().copied().fold(0.0_f32, f32::max);
    let levels = data
        .iter()
        .map(|value| {
            if max <= 0.0 {
                0
            } else {
                ((value / max) * (height * 8) as f32).round() as usize
            }
        })
        .collect::<Vec<_>>();

    (0..height)
        .rev()
        .map(|row| {
            levels
                .iter()
                .map(|level| {
                    let filled = level.saturating_sub(row * 8).min(8);
                    EIGHTHS[filled]
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_to_color("#FF0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(hex_to_color("nope"), None);
    }

    #[test]
    fn clamps_long_names() {
        assert_eq!(clamp_name("Reading", 9), "Reading  ");
        assert_eq!(clamp_name("Reading books", 6), "Read..");
    }

    #[test]
    fn bars_scale_to_max() {
        let rows = bar_rows(&[0.0, 1.0, 2.0], 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "  █");
        assert_eq!(rows[1], " ██");
    }

    #[test]
    fn empty_data_draws_blank_rows() {
        let rows = bar_rows(&[0.0, 0.0], 3);
        assert!(rows.iter().all(|row| row.trim().is_empty()));
    }
}
