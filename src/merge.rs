//! Shorthand merging: recompose a complete set of longhands back into their
//! shorthand when it is safe to do so.

use crate::block::{Declaration, PropertyMap};
use crate::config::Level;
use crate::functions;
use crate::registry;
use crate::splitter;
use crate::value::compress_four;

/// Run every merge step gated by `level`, in pipeline order.
pub fn merge_shorthands(props: &mut PropertyMap, level: Level) {
    if !level.at_least(Level::Common) {
        return;
    }
    for s in registry::FOUR_VALUE_SHORTHANDS {
        merge_four_value(props, s.shorthand, &s.longhands);
    }
    merge_four_value(props, registry::BORDER_RADIUS, &registry::BORDER_RADIUS_LONGHANDS);
    merge_two_value(props);

    if level.at_least(Level::Font) {
        merge_font(props);
    }
    if level.at_least(Level::Background) {
        merge_background(props);
    }
}

fn merge_four_value(props: &mut PropertyMap, shorthand: &str, longhands: &[&str; 4]) {
    if !longhands.iter().all(|l| props.contains(l)) {
        return;
    }
    let decls: Vec<Declaration> = longhands.iter().map(|l| props.get(l).unwrap().clone()).collect();
    // The group is treated as important if any member is, matching legacy
    // behaviour (see the design notes for the reasoning).
    let important = decls.iter().any(|d| d.important);
    let values = [
        decls[0].value.clone(),
        decls[1].value.clone(),
        decls[2].value.clone(),
        decls[3].value.clone(),
    ];
    let compressed = compress_four(&values);

    let position = longhands.iter().filter_map(|l| props.position(l)).min().unwrap();
    for l in longhands {
        props.remove(l);
    }
    props.insert_at(position, shorthand, Declaration::new(compressed, important));
}

fn merge_two_value(props: &mut PropertyMap) {
    for pair in registry::TWO_VALUE_SHORTHANDS {
        if !(props.contains(pair.first) && props.contains(pair.second)) {
            continue;
        }
        let a = props.get(pair.first).unwrap().clone();
        let b = props.get(pair.second).unwrap().clone();
        if a.important != b.important {
            continue;
        }
        let value = if a.value == b.value {
            a.value.clone()
        } else {
            format!("{} {}", a.value, b.value)
        };
        let position = props.position(pair.first).unwrap().min(props.position(pair.second).unwrap());
        props.remove(pair.first);
        props.remove(pair.second);
        props.insert_at(position, pair.shorthand, Declaration::new(value, a.important));
    }
}

const FONT_ORDER: &[&str] = &[
    "font-style",
    "font-variant",
    "font-weight",
    "font-size",
    "line-height",
    "font-family",
];

fn merge_font(props: &mut PropertyMap) {
    if !props.contains("font-size") {
        return;
    }

    let preserve_variant = props
        .get("font-variant")
        .map_or(false, |d| d.value != "small-caps");

    let line_height_value = props.get("line-height").and_then(|d| {
        let default = registry::font_default("line-height").unwrap_or("");
        if d.value.is_empty() || d.value == default {
            None
        } else {
            Some(d.value.clone())
        }
    });

    let mut parts: Vec<String> = Vec::new();
    let mut important = false;

    for &name in FONT_ORDER {
        if name == "font-variant" && preserve_variant {
            continue;
        }
        if name == "line-height" {
            // folded into the font-size branch below
            continue;
        }
        let decl = match props.get(name) {
            Some(d) => d.clone(),
            None => continue,
        };
        let default = registry::font_default(name).unwrap_or("");
        if decl.value == default {
            continue;
        }
        if decl.important {
            important = true;
        }
        if name == "font-size" {
            match &line_height_value {
                Some(lh) => parts.push(format!("{}/{}", decl.value, lh)),
                None => parts.push(decl.value.clone()),
            }
        } else {
            parts.push(decl.value.clone());
        }
    }

    if parts.is_empty() {
        return;
    }

    let position = FONT_ORDER.iter().filter_map(|n| props.position(n)).min().unwrap();
    let assembled = parts.join(" ");

    for &name in FONT_ORDER {
        if name == "font-variant" && preserve_variant {
            continue;
        }
        props.remove(name);
    }
    props.insert_at(position, "font", Declaration::new(assembled, important));
}

fn merge_background(props: &mut PropertyMap) {
    if let Some(bg) = props.get("background") {
        if !bg.value.trim().is_empty() {
            return;
        }
    }
    let had_background_key = props.contains("background");

    for (name, _) in registry::BACKGROUND_LONGHANDS {
        if let Some(d) = props.get(name) {
            if functions::contains_gradient(&d.value) {
                return;
            }
        }
    }

    let image_segs = props
        .get("background-image")
        .map(|d| splitter::split(',', &d.value))
        .unwrap_or_default();
    let color_segs = props
        .get("background-color")
        .map(|d| splitter::split(',', &d.value))
        .unwrap_or_default();
    let n = image_segs.len().max(color_segs.len()).max(1);

    let important = registry::BACKGROUND_LONGHANDS
        .iter()
        .any(|(name, _)| props.get(name).map_or(false, |d| d.important));

    let mut layers: Vec<String> = Vec::with_capacity(n);
    for i in 0..n {
        let skip_positional = image_segs
            .get(i)
            .map_or(true, |s| s.trim().is_empty() || s.trim() == "none");

        let mut parts: Vec<String> = Vec::new();
        for (name, default) in registry::BACKGROUND_LONGHANDS {
            let decl = match props.get(name) {
                Some(d) => d,
                None => continue,
            };
            if decl.value == *default {
                continue;
            }
            let positional = matches!(
                *name,
                "background-size" | "background-position" | "background-attachment" | "background-repeat"
            );
            if positional && skip_positional {
                continue;
            }
            let segs = splitter::split(',', &decl.value);
            let seg = match segs.get(i) {
                Some(s) => s.trim().to_string(),
                None => continue,
            };
            if seg.is_empty() || seg == *default {
                continue;
            }
            let seg = if *name == "background-size" {
                format!("({})", seg)
            } else {
                seg
            };
            parts.push(seg);
        }
        layers.push(parts.join(" "));
    }

    let assembled = layers
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    if !assembled.is_empty() {
        for (name, _) in registry::BACKGROUND_LONGHANDS {
            props.remove(name);
        }
        props.insert("background", Declaration::new(assembled, important));
    } else if had_background_key {
        props.insert("background", Declaration::new("none", important));
    }
}
