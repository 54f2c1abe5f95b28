//! Static shorthand/longhand tables.
//!
//! Small and immutable, so these are plain `const` data rather than
//! anything built at start-up, matching how the host toolkit inlines its
//! own format tables (tag lists, default field values) as constants.

/// A four-value box shorthand and its longhands in top/right/bottom/left
/// order (`border-radius` uses the same shape but a different corner
/// order, see [`BORDER_RADIUS_LONGHANDS`]).
pub struct FourValueShorthand {
    pub shorthand: &'static str,
    pub longhands: [&'static str; 4],
}

pub const FOUR_VALUE_SHORTHANDS: &[FourValueShorthand] = &[
    FourValueShorthand {
        shorthand: "border-color",
        longhands: [
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    },
    FourValueShorthand {
        shorthand: "border-style",
        longhands: [
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
    },
    FourValueShorthand {
        shorthand: "border-width",
        longhands: [
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
    },
    FourValueShorthand {
        shorthand: "margin",
        longhands: ["margin-top", "margin-right", "margin-bottom", "margin-left"],
    },
    FourValueShorthand {
        shorthand: "padding",
        longhands: [
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ],
    },
];

/// `border-radius`'s longhands, in top-left/top-right/bottom-right/bottom-left
/// order -- distinct from every other four-value shorthand, and handled by
/// its own dispatch branch because it is written as up to two slash-separated
/// halves rather than a single four-value list.
pub const BORDER_RADIUS: &str = "border-radius";
pub const BORDER_RADIUS_LONGHANDS: [&str; 4] = [
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-right-radius",
    "border-bottom-left-radius",
];

/// A two-value paired shorthand (`x-before`/`x-after` or `x`/`y`).
pub struct TwoValueShorthand {
    pub shorthand: &'static str,
    pub first: &'static str,
    pub second: &'static str,
}

pub const TWO_VALUE_SHORTHANDS: &[TwoValueShorthand] = &[
    TwoValueShorthand {
        shorthand: "overflow",
        first: "overflow-x",
        second: "overflow-y",
    },
    TwoValueShorthand {
        shorthand: "pause",
        first: "pause-before",
        second: "pause-after",
    },
    TwoValueShorthand {
        shorthand: "rest",
        first: "rest-before",
        second: "rest-after",
    },
    TwoValueShorthand {
        shorthand: "cue",
        first: "cue-before",
        second: "cue-after",
    },
];

/// `background` longhands and their defaults, in merge/dissolve order.
pub const BACKGROUND_LONGHANDS: &[(&str, &str)] = &[
    ("background-image", "none"),
    ("background-size", "auto"),
    ("background-repeat", "repeat"),
    ("background-position", "0 0"),
    ("background-attachment", "scroll"),
    ("background-clip", "border"),
    ("background-origin", "padding"),
    ("background-color", "transparent"),
];

/// `font` longhands and their defaults, in merge order.
pub const FONT_LONGHANDS: &[(&str, &str)] = &[
    ("font-style", "normal"),
    ("font-variant", "normal"),
    ("font-weight", "normal"),
    ("font-size", ""),
    ("line-height", ""),
    ("font-family", ""),
];

pub const FONT_WEIGHT_KEYWORDS: &[&str] = &[
    "normal", "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600", "700", "800",
    "900",
];
pub const FONT_VARIANT_KEYWORDS: &[&str] = &["normal", "small-caps"];
pub const FONT_STYLE_KEYWORDS: &[&str] = &["normal", "italic", "oblique"];

pub const BACKGROUND_REPEAT_KEYWORDS: &[&str] =
    &["repeat", "repeat-x", "repeat-y", "no-repeat", "space"];
pub const BACKGROUND_ATTACHMENT_KEYWORDS: &[&str] = &["scroll", "fixed", "local"];
pub const BACKGROUND_BOX_KEYWORDS: &[&str] = &["border", "padding", "content"];
pub const BACKGROUND_POSITION_KEYWORDS: &[&str] = &["top", "center", "bottom", "left", "right"];

/// Does `shorthand` name one of the registered four-value shorthands
/// (excluding `border-radius`, which has its own dispatch path)?
pub fn four_value_shorthand(name: &str) -> Option<&'static FourValueShorthand> {
    FOUR_VALUE_SHORTHANDS.iter().find(|s| s.shorthand == name)
}

pub fn two_value_shorthand(name: &str) -> Option<&'static TwoValueShorthand> {
    TWO_VALUE_SHORTHANDS.iter().find(|s| s.shorthand == name)
}

pub fn background_default(longhand: &str) -> Option<&'static str> {
    BACKGROUND_LONGHANDS
        .iter()
        .find(|(k, _)| *k == longhand)
        .map(|(_, v)| *v)
}

pub fn font_default(longhand: &str) -> Option<&'static str> {
    FONT_LONGHANDS
        .iter()
        .find(|(k, _)| *k == longhand)
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn looks_up_four_value_shorthand() {
        let m = four_value_shorthand("margin").unwrap();
        assert_eq!(m.longhands[0], "margin-top");
        assert_eq!(m.longhands[3], "margin-left");
        assert!(four_value_shorthand("border-radius").is_none());
    }

    #[test]
    fn looks_up_two_value_shorthand() {
        let p = two_value_shorthand("pause").unwrap();
        assert_eq!(p.first, "pause-before");
        assert_eq!(p.second, "pause-after");
    }

    #[test]
    fn background_defaults_present() {
        assert_eq!(background_default("background-image"), Some("none"));
        assert_eq!(background_default("background-color"), Some("transparent"));
    }
}
