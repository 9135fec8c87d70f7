//! Hex color parsing and normalization.
//!
//! Field colors are stored exactly as the color picker hands them over, so
//! these helpers never reject a stored value. They are used where a concrete
//! channel triple is needed (canvas glow alpha, SVG output) and by hosts that
//! accept free-typed colors and want picker-style `#rrggbb` strings.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Fallback channels used when both the value and its fallback are unparsable.
const LAST_RESORT_RGB: (u8, u8, u8) = (0, 128, 255);

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn channel(pair: &str) -> Option<u8> {
    match u8::from_str_radix(pair, 16) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// Normalize a color to canonical lowercase `#rrggbb`, using `fallback` when
/// `value` does not parse.
#[must_use]
pub fn normalize_hex_color(value: &str, fallback: &str) -> String {
    let (r, g, b) = resolve_rgb(value, fallback);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// CSS `rgba()` string for `value` at the given opacity.
#[must_use]
pub fn with_alpha(value: &str, fallback: &str, alpha: f64) -> String {
    let (r, g, b) = resolve_rgb(value, fallback);
    format!("rgba({r}, {g}, {b}, {:.2})", alpha.clamp(0.0, 1.0))
}

fn resolve_rgb(value: &str, fallback: &str) -> (u8, u8, u8) {
    parse_hex_rgb(value)
        .or_else(|| parse_hex_rgb(fallback))
        .unwrap_or(LAST_RESORT_RGB)
}
