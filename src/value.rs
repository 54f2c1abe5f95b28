//! The value engine: per-property value rewrites, dispatched on property
//! name. Every function here is total -- an unrecognised or malformed
//! shape is returned unchanged rather than erroring.

use crate::config::Config;
use crate::functions;
use crate::registry;
use crate::splitter;
use log::debug;

/// Split `v` into `(stripped_value, important)`. Matches `!important`
/// case-insensitively, with arbitrary whitespace before the `!`.
pub fn strip_importance(v: &str) -> (&str, bool) {
    let trimmed = v.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(bang) = lower.rfind('!') {
        let marker = lower[bang + 1..].trim();
        if marker == "important" {
            return (trimmed[..bang].trim_end(), true);
        }
    }
    (trimmed, false)
}

/// Compress a top/right/bottom/left (or top-left/top-right/bottom-right/
/// bottom-left, for `border-radius`) 4-tuple per the box-shorthand rule.
pub fn compress_four(values: &[String; 4]) -> String {
    let [top, right, bottom, left] = values;
    if top == right && right == bottom && bottom == left {
        top.clone()
    } else if top == bottom && right == left {
        format!("{} {}", top, right)
    } else if right == left {
        format!("{} {} {}", top, right, bottom)
    } else {
        format!("{} {} {} {}", top, right, bottom, left)
    }
}

/// Split `v` on whitespace and re-compress it via [`compress_four`],
/// without dissolving into longhands. Used for a bare four-value shorthand
/// declaration that was never split into longhands in the first place.
fn compress_shorthand_value(v: &str) -> String {
    let tokens = splitter::split_ws(v);
    match tokens.len() {
        1 => tokens[0].clone(),
        2 => compress_four(&[
            tokens[0].clone(),
            tokens[1].clone(),
            tokens[0].clone(),
            tokens[1].clone(),
        ]),
        3 => compress_four(&[
            tokens[0].clone(),
            tokens[1].clone(),
            tokens[2].clone(),
            tokens[1].clone(),
        ]),
        4 => compress_four(&[
            tokens[0].clone(),
            tokens[1].clone(),
            tokens[2].clone(),
            tokens[3].clone(),
        ]),
        _ => v.to_string(),
    }
}

fn compress_border_radius(v: &str) -> String {
    let halves: Vec<&str> = v.split('/').collect();
    if halves.len() > 2 {
        debug!("border-radius with more than two '/'-parts left unchanged: {}", v);
        return v.to_string();
    }
    halves
        .iter()
        .map(|h| compress_shorthand_value(h.trim()))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// `Optimiser::value`: the whole-declaration-value rewrite, applied once
/// per declaration before dissolve/merge run their course.
pub fn value(config: &Config, property: &str, v: &str) -> String {
    let (stripped, important) = strip_importance(v);
    let bare_property = functions::strip_vendor_prefix(property);

    let rewritten = if bare_property == registry::BORDER_RADIUS {
        compress_border_radius(stripped)
    } else if registry::four_value_shorthand(bare_property).is_some() {
        compress_shorthand_value(stripped)
    } else if (bare_property == "background-image" || bare_property == "background")
        && config.compress_colors
        && functions::contains_gradient(stripped)
    {
        functions::rewrite_gradient(stripped)
    } else if bare_property == "transform" {
        functions::rewrite_transform(stripped)
    } else {
        stripped.to_string()
    };

    if important {
        format!("{}!important", rewritten)
    } else {
        rewritten
    }
}

/// `Optimiser::subValue`: rewrite one already-comma-split sub-value.
pub fn sub_value(config: &Config, property: &str, sv: &str) -> String {
    let (stripped, important) = strip_importance(sv);

    let mut out = stripped.to_string();
    if property == "font-weight" && config.compress_font_weight {
        out = match out.as_str() {
            "bold" => "700".to_string(),
            "normal" => "400".to_string(),
            other => other.to_string(),
        };
    }
    out = crate::number::optimise(Some(property), &out);
    if config.compress_colors {
        out = crate::color::optimise(&out);
    }
    out = functions::rewrite_calc(&out);

    if important {
        format!("{}!important", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn strips_important_case_insensitively_with_whitespace() {
        assert_eq!(strip_importance("red  !  IMPORTANT"), ("red", true));
        assert_eq!(strip_importance("red"), ("red", false));
    }

    #[test]
    fn compress_four_all_equal() {
        let v = ["1px".into(), "1px".into(), "1px".into(), "1px".into()];
        assert_eq!(compress_four(&v), "1px");
    }

    #[test]
    fn compress_four_top_bottom_left_right() {
        let v = ["1px".into(), "2px".into(), "1px".into(), "2px".into()];
        assert_eq!(compress_four(&v), "1px 2px");
    }

    #[test]
    fn compress_four_left_equals_right_only() {
        let v = ["1px".into(), "2px".into(), "3px".into(), "2px".into()];
        assert_eq!(compress_four(&v), "1px 2px 3px");
    }

    #[test]
    fn compress_four_all_distinct() {
        let v = ["1px".into(), "2px".into(), "3px".into(), "4px".into()];
        assert_eq!(compress_four(&v), "1px 2px 3px 4px");
    }

    #[test]
    fn border_radius_compresses_each_half_independently() {
        assert_eq!(
            value(&cfg(), "border-radius", "5px 5px 5px 5px / 10px 10px 10px 10px"),
            "5px / 10px"
        );
    }

    #[test]
    fn border_radius_with_too_many_slashes_is_left_alone() {
        let v = "1px / 2px / 3px";
        assert_eq!(value(&cfg(), "border-radius", v), v);
    }

    #[test]
    fn important_whitespace_is_compacted() {
        assert_eq!(
            value(&cfg(), "margin", "1px 1px 1px 1px !important"),
            "1px!important"
        );
    }

    #[test]
    fn background_gradient_colours_are_rewritten_without_dissolving() {
        assert_eq!(
            value(
                &cfg(),
                "background",
                "linear-gradient(to right, #ff0000, #ffffff)"
            ),
            "linear-gradient(to right,red,#fff)"
        );
    }

    #[test]
    fn vendor_prefixed_transform_is_dispatched() {
        assert_eq!(
            value(&cfg(), "-webkit-transform", "translateX(1px) translateY(2px)"),
            "translate(1px,2px)"
        );
    }

    #[test]
    fn sub_value_maps_font_weight_keywords() {
        assert_eq!(sub_value(&cfg(), "font-weight", "bold"), "700");
        assert_eq!(sub_value(&cfg(), "font-weight", "normal"), "400");
    }

    #[test]
    fn sub_value_runs_color_and_calc() {
        assert_eq!(sub_value(&cfg(), "color", "#ff0000"), "red");
        assert_eq!(sub_value(&cfg(), "width", "calc(100% - 10px)"), "calc(100%-10px)");
    }
}
