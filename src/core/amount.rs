//! Amount derivation: quantity × unit price, rounded to cents.

/// Round half up to 2 decimal places.
///
/// The epsilon nudge keeps values such as 1.005, stored just below the
/// half, rounding the way they read.
pub fn round2(x: f64) -> f64 {
    (((x + f64::EPSILON) * 100.0) + 0.5).floor() / 100.0
}

/// Parse a typed quantity. Blank input reads as 0; anything that is not a
/// finite number is `None`.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    t.parse::<f64>().ok().filter(|q| q.is_finite())
}

/// Amount shown while editing. An unreadable quantity gives 0, not an error.
pub fn derive_amount(unit_price: f64, quantity: &str) -> f64 {
    match parse_quantity(quantity) {
        Some(q) if unit_price.is_finite() => round2(unit_price * q),
        _ => 0.0,
    }
}
