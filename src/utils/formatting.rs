//! Formatting utilities used for CLI and export outputs.

use crate::core::grades::GRADE_SCALE;
use crate::models::TodoFormatting;
use crate::utils::colors::colour_of;
use ansi_term::{Colour, Style};

/// `15.333…` → `"15.33/20"`, `None` → `"--"`.
pub fn format_average(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{:.2}/{}", v, GRADE_SCALE),
        None => "--".to_string(),
    }
}

/// Numbers without useless decimals: `15` / `12.5` / `0.25`.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Apply a todo's formatting to its title for terminal output.
pub fn styled_title(title: &str, fmt: &TodoFormatting) -> String {
    let mut style = Style::new();
    if fmt.bold {
        style = style.bold();
    }
    if fmt.italic {
        style = style.italic();
    }
    if fmt.underline {
        style = style.underline();
    }
    if let Some(hl) = &fmt.highlight {
        style = style.on(colour_of(hl)).fg(Colour::Black);
    }
    style.paint(title).to_string()
}

/// Cut `s` to `max` characters, ending with "…" when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
