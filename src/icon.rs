/// Icon names a record type can carry, with the glyph drawn in the terminal.
pub const ICONS: &[(&str, &str)] = &[
    ("work", "⚒"),
    ("book", "✎"),
    ("sport", "⚽"),
    ("music", "♫"),
    ("coffee", "☕"),
    ("home", "⌂"),
    ("sleep", "☾"),
    ("star", "★"),
    ("heart", "♥"),
    ("flag", "⚑"),
];

pub const UNKNOWN_ICON: &str = "unknown";

pub fn is_known(name: &str) -> bool {
    ICONS.iter().any(|(icon, _)| *icon == name)
}

/// Glyph for an icon name, `?` for anything not in the table.
pub fn glyph(name: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(icon, _)| *icon == name)
        .map(|(_, glyph)| *glyph)
        .unwrap_or("?")
}

pub fn default_icon() -> &'static str {
    ICONS[0].0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(glyph("book"), "✎");
        assert_eq!(glyph(UNKNOWN_ICON), "?");
        assert!(!is_known(UNKNOWN_ICON));
        assert!(is_known(default_icon()));
    }
}
