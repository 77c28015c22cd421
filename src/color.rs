/// Color utilities for record types and UI.
use rand::RngExt;

/// Color used for untracked time and types without a color.
pub const UNTRACKED_COLOR: &str = "#9E9E9E";

/// Colors offered when creating a record type.
pub const PALETTE: &[&str] = &[
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4",
    "#00BCD4", "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFC107", "#FF9800",
    "#FF5722", "#795548",
];

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalizes user input like `ff0000` or ` #FF0000 ` to `#FF0000`.
pub fn normalize_hex(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let with_hash = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    };
    is_valid_hex(&with_hash).then(|| with_hash.to_ascii_uppercase())
}

/// Pick a random color from the palette.
pub fn random_color() -> String {
    let mut rng = rand::rng();
    PALETTE[rng.random_range(0..PALETTE.len())].to_string()
}
