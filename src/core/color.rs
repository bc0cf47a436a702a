//! Colour resolution, emoji decoration and CSS/ANSI colour parsing

use super::log_level::LogLevel;
use std::collections::HashMap;
use std::str::FromStr;

/// Emoji used when a level has none of its own
pub const FALLBACK_EMOJI: &str = "🚀";
/// Emoji for timer titles
pub const TIMER_EMOJI: &str = "⏱️";

/// Emoji prefix for a level
pub fn level_emoji(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "🐞",
        LogLevel::Info => "ℹ️",
        LogLevel::Warn => "⚠️",
        LogLevel::Error => "❌",
        LogLevel::Silent => FALLBACK_EMOJI,
    }
}

/// Built-in per-level colours
pub fn default_level_colors() -> HashMap<LogLevel, String> {
    [
        (LogLevel::Debug, "#87CEFA"),
        (LogLevel::Info, "#90EE90"),
        (LogLevel::Warn, "#FF7F00"),
        (LogLevel::Error, "#ff0000"),
        (LogLevel::Silent, "#A7B0C4"),
    ]
    .into_iter()
    .map(|(level, color)| (level, color.to_string()))
    .collect()
}

/// Deterministic colour derived from a namespace.
///
/// djb2 over UTF-16 code units, reduced to 24 bits. Only the shifted term
/// is truncated to 32 bits; the running sum keeps its full width.
pub fn hash_color(namespace: &str) -> String {
    let mut hash: i64 = 5381;
    for unit in namespace.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = shifted.wrapping_add(hash).wrapping_add(i64::from(unit));
    }
    let color = hash.unsigned_abs() % 0x0100_0000;
    format!("#{:06x}", color)
}

/// Pick the colour of a title.
///
/// Per-call colour wins, then the configured level colour, then the
/// namespace hash colour. `None` means render without colour.
pub fn resolve_color(
    call_color: Option<&str>,
    level: LogLevel,
    level_colors: &HashMap<LogLevel, String>,
    namespace: &str,
    use_color: bool,
) -> Option<String> {
    if !use_color {
        return None;
    }
    if let Some(color) = call_color.filter(|c| !c.trim().is_empty()) {
        return Some(color.to_string());
    }
    if let Some(color) = level_colors.get(&level).filter(|c| !c.trim().is_empty()) {
        return Some(color.clone());
    }
    if !namespace.is_empty() {
        return Some(hash_color(namespace));
    }
    None
}

/// Parse `#rgb`, `#rrggbb` or a named colour into a terminal colour
pub fn parse_color(value: &str) -> Option<colored::Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let rgb = u32::from_str_radix(&expanded, 16).ok()?;
        return Some(colored::Color::TrueColor {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        });
    }
    colored::Color::from_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_color_is_deterministic() {
        assert_eq!(hash_color("payments"), hash_color("payments"));
        assert_ne!(hash_color("payments"), hash_color("checkout"));
        let color = hash_color("payments");
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
    }

    #[test]
    fn test_hash_color_of_empty_namespace() {
        // djb2 seed only
        assert_eq!(hash_color(""), format!("#{:06x}", 5381));
    }

    #[test]
    fn test_hash_color_known_values() {
        assert_eq!(hash_color("payments"), "#80a5ca");
        assert_eq!(hash_color("checkout"), "#a6611b");
        assert_eq!(hash_color("App"), "#87d646");
        assert_eq!(hash_color("a"), "#02b606");
    }

    #[test]
    fn test_resolution_order() {
        let colors = default_level_colors();
        assert_eq!(
            resolve_color(Some("red"), LogLevel::Info, &colors, "ns", true).as_deref(),
            Some("red")
        );
        assert_eq!(
            resolve_color(None, LogLevel::Info, &colors, "ns", true).as_deref(),
            Some("#90EE90")
        );

        let empty = HashMap::new();
        assert_eq!(
            resolve_color(None, LogLevel::Info, &empty, "ns", true),
            Some(hash_color("ns"))
        );
        assert_eq!(resolve_color(None, LogLevel::Info, &empty, "", true), None);
        assert_eq!(resolve_color(Some("red"), LogLevel::Info, &colors, "ns", false), None);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(
            parse_color("#ff7f00"),
            Some(colored::Color::TrueColor { r: 255, g: 127, b: 0 })
        );
        assert_eq!(
            parse_color("#fff"),
            Some(colored::Color::TrueColor { r: 255, g: 255, b: 255 })
        );
        assert_eq!(parse_color("red"), Some(colored::Color::Red));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_emoji_fallback() {
        assert_eq!(level_emoji(LogLevel::Warn), "⚠️");
        assert_eq!(level_emoji(LogLevel::Silent), FALLBACK_EMOJI);
    }
}
