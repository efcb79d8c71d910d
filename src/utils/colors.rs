//! ANSI color helpers and the subject / highlight palettes.

use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Subject colors offered to the user.
pub const SUBJECT_PALETTE: &[(&str, &str)] = &[
    ("Rose", "#FF6B9D"),
    ("Coral", "#FF8C42"),
    ("Sunset", "#FFA94D"),
    ("Honey", "#FFD93D"),
    ("Lime", "#95E1D3"),
    ("Mint", "#6BCB77"),
    ("Turquoise", "#4ECDC4"),
    ("Ocean", "#45B7D1"),
    ("Sky", "#5DADE2"),
    ("Lavender", "#A8DADC"),
    ("Sage", "#B4C7A3"),
    ("Peach", "#FFABAB"),
    ("Salmon", "#FF9AA2"),
    ("Marigold", "#FFC75F"),
    ("Emerald", "#45B384"),
    ("Teal", "#36CFC9"),
];

/// Highlight colors for todo titles.
pub const HIGHLIGHT_PALETTE: &[(&str, &str)] = &[
    ("Yellow", "#FEF08A"),
    ("Green", "#BBF7D0"),
    ("Blue", "#BFDBFE"),
    ("Pink", "#FBCFE8"),
    ("Orange", "#FED7AA"),
];

pub const DEFAULT_SUBJECT_COLOR: &str = "#FF6B9D";

/// Fallback block color for entries whose subject is unknown.
pub const FALLBACK_BLOCK_COLOR: &str = "#E2E8F0";

fn hex_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").ok()).as_ref()
}

pub fn is_hex_color(s: &str) -> bool {
    hex_re().is_some_and(|re| re.is_match(s))
}

/// Accept `#RRGGBB` (normalized to upper case) or a name from `palette`.
pub fn resolve_color(input: &str, palette: &[(&str, &str)]) -> AppResult<String> {
    let s = input.trim();

    if is_hex_color(s) {
        return Ok(s.to_uppercase());
    }

    palette
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, hex)| hex.to_string())
        .ok_or_else(|| AppError::InvalidColor(input.to_string()))
}

pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    if !is_hex_color(hex) {
        return None;
    }
    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
    Some((r, g, b))
}

/// Terminal colour for a `#RRGGBB` token (white if malformed).
pub fn colour_of(hex: &str) -> Colour {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => Colour::RGB(r, g, b),
        None => Colour::White,
    }
}

/// `text` on a solid background of `hex`, with dark foreground.
pub fn paint_block(text: &str, hex: &str) -> String {
    Colour::Black.on(colour_of(hex)).paint(text).to_string()
}

/// Grade average color: ≥ 14 green, ≥ 10 default, below red.
pub fn color_for_average(avg: f64) -> &'static str {
    if avg >= 14.0 {
        GREEN
    } else if avg >= 10.0 {
        RESET
    } else {
        RED
    }
}
