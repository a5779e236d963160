//! Color tokens ("#rrggbb") shared by both drawing back ends.

/// An sRGB color as resolved from a token.
pub type Rgb = [u8; 3];

/// Used when a token does not parse.
pub const FALLBACK_RGB: Rgb = [100, 116, 139]; // Slate 500

/// Parse "#rrggbb" (leading '#' optional).
pub fn parse_hex(token: &str) -> Option<Rgb> {
    let hex = token.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Resolve a token, warning when it falls back. Call once per chart build.
pub fn rgb_or_fallback(token: &str) -> Rgb {
    parse_hex(token).unwrap_or_else(|| {
        log::warn!("Unrecognized color token '{}'", token);
        FALLBACK_RGB
    })
}
