//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Prices and amounts: integers print bare, everything else with 2 decimals.
pub fn money(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Part numbers may be empty; show that explicitly.
pub fn part_label(part_no: &str) -> &str {
    if part_no.is_empty() { "(none)" } else { part_no }
}

/// Placeholder for unset draft fields.
pub fn or_dash(s: &str) -> &str {
    if s.is_empty() { "--" } else { s }
}
