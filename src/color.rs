//! Color mixing utilities
//!
//! Derives display colors from the objects currently in the blender jar.
//! Mixing is a per-channel arithmetic average in RGB space - an
//! approximation that reads well on screen, not a physical pigment model.

/// Fallback color when there is nothing to mix
pub const WHITE: &str = "#ffffff";

/// An sRGB color with integer channels in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse a 6-hex-digit color string, with optional leading `#`.
///
/// Returns `None` for anything that is not exactly six hex digits -
/// callers drop unparsable colors rather than mixing garbage channels.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb { r, g, b })
}

/// Render channels as `#rrggbb`, rounding to nearest and clamping to [0, 255]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Mix hex colors by averaging each RGB channel.
///
/// Empty input yields white, a single color passes through unchanged, and
/// unparsable entries are silently dropped from the average.
pub fn mix_colors<S: AsRef<str>>(colors: &[S]) -> String {
    if colors.is_empty() {
        return WHITE.to_string();
    }
    if colors.len() == 1 {
        return colors[0].as_ref().to_string();
    }

    let parsed: Vec<Rgb> = colors
        .iter()
        .filter_map(|c| hex_to_rgb(c.as_ref()))
        .collect();
    if parsed.is_empty() {
        return WHITE.to_string();
    }

    let n = parsed.len() as f64;
    let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
    for c in &parsed {
        r += c.r as f64;
        g += c.g as f64;
        b += c.b as f64;
    }
    rgb_to_hex(r / n, g / n, b / n)
}

/// Lighten (positive percent) or darken (negative percent) a color.
///
/// Each channel is scaled by `1 + percent/100` and clamped to [0, 255];
/// percents outside [-100, 100] simply saturate. Unparsable input is
/// returned unchanged.
pub fn adjust_brightness(hex: &str, percent: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let scale = 1.0 + percent / 100.0;
    rgb_to_hex(
        rgb.r as f64 * scale,
        rgb.g as f64 * scale,
        rgb.b as f64 * scale,
    )
}

/// Linear gradient through a sequence of colors, for particle effects.
///
/// For each consecutive pair, emits `steps` interpolants at ratios
/// `i/steps` for `i in 0..steps`, then appends the final input color.
/// Pairs with an unparsable endpoint are skipped.
pub fn color_gradient<S: AsRef<str>>(colors: &[S], steps: u32) -> Vec<String> {
    if colors.is_empty() {
        return vec![WHITE.to_string()];
    }
    if colors.len() == 1 {
        return vec![colors[0].as_ref().to_string()];
    }

    let mut gradient = Vec::new();
    for pair in colors.windows(2) {
        let (Some(start), Some(end)) =
            (hex_to_rgb(pair[0].as_ref()), hex_to_rgb(pair[1].as_ref()))
        else {
            continue;
        };
        for step in 0..steps {
            let ratio = step as f64 / steps as f64;
            gradient.push(rgb_to_hex(
                start.r as f64 + (end.r as f64 - start.r as f64) * ratio,
                start.g as f64 + (end.g as f64 - start.g as f64) * ratio,
                start.b as f64 + (end.b as f64 - start.b as f64) * ratio,
            ));
        }
    }

    // Final color is appended verbatim
    gradient.push(colors[colors.len() - 1].as_ref().to_string());
    gradient
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_to_rgb_parses_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#ff8000"), Some(Rgb { r: 255, g: 128, b: 0 }));
        assert_eq!(hex_to_rgb("ff8000"), Some(Rgb { r: 255, g: 128, b: 0 }));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#ff80000"), None);
        assert_eq!(hex_to_rgb("#gg0000"), None);
        assert_eq!(hex_to_rgb("not a color"), None);
    }

    #[test]
    fn test_mix_colors_empty_is_white() {
        let none: [&str; 0] = [];
        assert_eq!(mix_colors(&none), "#ffffff");
    }

    #[test]
    fn test_mix_colors_single_passes_through() {
        // Single colors pass through untouched, even odd casing
        assert_eq!(mix_colors(&["#A1B2C3"]), "#A1B2C3");
    }

    #[test]
    fn test_mix_colors_identical_pair_is_identity() {
        assert_eq!(mix_colors(&["#a1b2c3", "#a1b2c3"]), "#a1b2c3");
    }

    #[test]
    fn test_mix_colors_black_white_is_mid_gray() {
        // 127.5 rounds to 128
        assert_eq!(mix_colors(&["#000000", "#ffffff"]), "#808080");
    }

    #[test]
    fn test_mix_colors_drops_invalid_entries() {
        assert_eq!(mix_colors(&["#000000", "bogus", "#ffffff"]), "#808080");
        assert_eq!(mix_colors(&["bogus", "also bogus"]), "#ffffff");
    }

    #[test]
    fn test_adjust_brightness_darken() {
        assert_eq!(adjust_brightness("#808080", -50.0), "#404040");
    }

    #[test]
    fn test_adjust_brightness_clamps() {
        assert_eq!(adjust_brightness("#808080", 200.0), "#ffffff");
        assert_eq!(adjust_brightness("#808080", -150.0), "#000000");
    }

    #[test]
    fn test_adjust_brightness_passes_through_malformed() {
        assert_eq!(adjust_brightness("nope", 50.0), "nope");
    }

    #[test]
    fn test_gradient_two_steps() {
        assert_eq!(
            color_gradient(&["#000000", "#ffffff"], 2),
            vec!["#000000", "#808080", "#ffffff"]
        );
    }

    #[test]
    fn test_gradient_empty_and_single() {
        let none: [&str; 0] = [];
        assert_eq!(color_gradient(&none, 3), vec!["#ffffff"]);
        assert_eq!(color_gradient(&["#123456"], 3), vec!["#123456"]);
    }

    #[test]
    fn test_gradient_skips_unparsable_pairs() {
        // Both pairs touch the bad middle color, so only the final color
        // survives
        assert_eq!(
            color_gradient(&["#000000", "bad", "#ffffff"], 2),
            vec!["#ffffff"]
        );
    }

    #[test]
    fn test_gradient_zero_steps_keeps_final_color() {
        assert_eq!(
            color_gradient(&["#000000", "#ffffff"], 0),
            vec!["#ffffff"]
        );
    }

    proptest! {
        #[test]
        fn prop_hex_rgb_round_trip(r: u8, g: u8, b: u8) {
            let hex = rgb_to_hex(r as f64, g as f64, b as f64);
            prop_assert_eq!(hex_to_rgb(&hex), Some(Rgb { r, g, b }));
        }

        #[test]
        fn prop_mix_is_valid_hex(colors in proptest::collection::vec("#[0-9a-f]{6}", 0..6)) {
            let mixed = mix_colors(&colors);
            prop_assert!(hex_to_rgb(&mixed).is_some());
        }
    }
}
