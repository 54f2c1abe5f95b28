//! The colour sub-engine: canonicalises a colour token to its shortest
//! equivalent form.
//!
//! Total by construction: a token that doesn't parse as a hex triplet, an
//! `rgb()`/`hsl()` function, or a recognised name is returned unchanged
//! (case preserved, per contract).

/// A representative slice of the CSS named-colour table: the 16 CSS1/2
/// keywords plus the extended names common enough to show up in real
/// stylesheets. Entries are `(name, r, g, b)`.
const NAMED_COLORS: &[(&str, u8, u8, u8)] = &[
    ("black", 0, 0, 0),
    ("silver", 192, 192, 192),
    ("gray", 128, 128, 128),
    ("white", 255, 255, 255),
    ("maroon", 128, 0, 0),
    ("red", 255, 0, 0),
    ("purple", 128, 0, 128),
    ("fuchsia", 255, 0, 255),
    ("green", 0, 128, 0),
    ("lime", 0, 255, 0),
    ("olive", 128, 128, 0),
    ("yellow", 255, 255, 0),
    ("navy", 0, 0, 128),
    ("blue", 0, 0, 255),
    ("teal", 0, 128, 128),
    ("aqua", 0, 255, 255),
    ("orange", 255, 165, 0),
    ("pink", 255, 192, 203),
    ("gold", 255, 215, 0),
    ("indigo", 75, 0, 130),
    ("violet", 238, 130, 238),
    ("brown", 165, 42, 42),
    ("chocolate", 210, 105, 30),
    ("coral", 255, 127, 80),
    ("crimson", 220, 20, 60),
    ("cyan", 0, 255, 255),
    ("darkblue", 0, 0, 139),
    ("darkgreen", 0, 100, 0),
    ("darkorange", 255, 140, 0),
    ("darkred", 139, 0, 0),
    ("hotpink", 255, 105, 180),
    ("indianred", 205, 92, 92),
    ("ivory", 255, 255, 240),
    ("khaki", 240, 230, 140),
    ("lavender", 230, 230, 250),
    ("lightblue", 173, 216, 230),
    ("lightgray", 211, 211, 211),
    ("magenta", 255, 0, 255),
    ("orchid", 218, 112, 214),
    ("plum", 221, 160, 221),
    ("salmon", 250, 128, 114),
    ("skyblue", 135, 206, 235),
    ("tan", 210, 180, 140),
    ("tomato", 255, 99, 71),
    ("turquoise", 64, 224, 208),
    ("wheat", 245, 222, 179),
    ("transparent", 0, 0, 0),
];

fn name_to_rgb(name: &str) -> Option<(u8, u8, u8)> {
    if name.eq_ignore_ascii_case("transparent") {
        return None; // a keyword in its own right, not a colour to recompress
    }
    NAMED_COLORS
        .iter()
        .find(|(n, ..)| n.eq_ignore_ascii_case(name))
        .map(|&(_, r, g, b)| (r, g, b))
}

fn rgb_to_name(rgb: (u8, u8, u8)) -> Option<&'static str> {
    NAMED_COLORS
        .iter()
        .find(|&&(n, r, g, b)| (r, g, b) == rgb && n != "transparent")
        .map(|(n, ..)| *n)
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.strip_prefix('#')?;
    let bytes = s.as_bytes();
    match bytes.len() {
        3 => {
            let r = hex_digit(bytes[0])?;
            let g = hex_digit(bytes[1])?;
            let b = hex_digit(bytes[2])?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let mut channel = |i: usize| -> Option<u8> {
                Some(hex_digit(bytes[i])? * 16 + hex_digit(bytes[i + 1])?)
            };
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_fn(s: &str) -> Option<(u8, u8, u8)> {
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim());
    let r = parts.next()?.parse::<u16>().ok()?;
    let g = parts.next()?.parse::<u16>().ok()?;
    let b = parts.next()?.parse::<u16>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r.min(255) as u8, g.min(255) as u8, b.min(255) as u8))
}

fn parse_hsl_fn(s: &str) -> Option<(u8, u8, u8)> {
    let inner = s.strip_prefix("hsl(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim());
    let h: f64 = parts.next()?.parse().ok()?;
    let s_pct: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let l_pct: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hsl_to_rgb(h, s_pct / 100.0, l_pct / 100.0))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }
    let h = ((h % 360.0) + 360.0) % 360.0 / 360.0;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue_to_rgb = |t: f64| -> f64 {
        let mut t = t;
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    };
    let r = (hue_to_rgb(h + 1.0 / 3.0) * 255.0).round() as u8;
    let g = (hue_to_rgb(h) * 255.0).round() as u8;
    let b = (hue_to_rgb(h - 1.0 / 3.0) * 255.0).round() as u8;
    (r, g, b)
}

fn parse_color(token: &str) -> Option<(u8, u8, u8)> {
    if token.starts_with('#') {
        return parse_hex(token);
    }
    if token.starts_with("rgb(") || token.starts_with("RGB(") {
        return parse_rgb_fn(&token.to_ascii_lowercase());
    }
    if token.starts_with("hsl(") || token.starts_with("HSL(") {
        return parse_hsl_fn(&token.to_ascii_lowercase());
    }
    name_to_rgb(token)
}

fn shortenable_hex3(rgb: (u8, u8, u8)) -> Option<String> {
    let (r, g, b) = rgb;
    let half = |c: u8| (c & 0x0f, c >> 4);
    let ok = |c: u8| {
        let (lo, hi) = half(c);
        lo == hi
    };
    if ok(r) && ok(g) && ok(b) {
        Some(format!("#{:x}{:x}{:x}", r >> 4, g >> 4, b >> 4))
    } else {
        None
    }
}

/// Rewrite `token` to the shortest equivalent colour representation.
/// Non-colour tokens (including the `transparent` keyword, which names no
/// RGB triple to recompress) pass through unchanged.
pub fn optimise(token: &str) -> String {
    let rgb = match parse_color(token) {
        Some(rgb) => rgb,
        None => return token.to_string(),
    };

    let hex6 = format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2);
    let mut best = hex6;

    if let Some(hex3) = shortenable_hex3(rgb) {
        if hex3.len() < best.len() {
            best = hex3;
        }
    }
    if let Some(name) = rgb_to_name(rgb) {
        if name.len() < best.len() {
            best = name.to_string();
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_color_passes_through_with_case() {
        assert_eq!(optimise("Arial"), "Arial");
        assert_eq!(optimise("solid"), "solid");
    }

    #[test]
    fn red_hex_becomes_named() {
        assert_eq!(optimise("#ff0000"), "red");
    }

    #[test]
    fn white_hex_becomes_short_hex() {
        assert_eq!(optimise("#ffffff"), "#fff");
    }

    #[test]
    fn rgb_function_is_canonicalised() {
        assert_eq!(optimise("rgb(255,0,0)"), "red");
    }

    #[test]
    fn hsl_function_is_canonicalised() {
        assert_eq!(optimise("hsl(0,100%,50%)"), "red");
    }

    #[test]
    fn transparent_keyword_passes_through() {
        assert_eq!(optimise("transparent"), "transparent");
    }

    #[test]
    fn non_shortenable_hex_stays_six_digit() {
        assert_eq!(optimise("#a1b2c3"), "#a1b2c3");
    }
}
