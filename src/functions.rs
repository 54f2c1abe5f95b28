//! Function-level value rewrites: `calc()`/`min()`/`max()` whitespace
//! compaction, gradient colour-stop rewriting, and `transform` function
//! merging.

use crate::block::{Declaration, PropertyMap};
use crate::color;
use crate::number;
use crate::splitter;

/// Strip a single leading vendor-prefix segment (`-webkit-`, `-moz-`, ...)
/// from a property or function name. Names with no vendor prefix are
/// returned unchanged.
pub fn strip_vendor_prefix(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('-') {
        if let Some(dash) = rest.find('-') {
            return &rest[dash + 1..];
        }
    }
    name
}

const CALC_LIKE_HEADS: &[&str] = &["calc(", "min(", "max("];

/// Rewrite a `calc()`/`min()`/`max()` value: split the interior on
/// top-level commas, strip all whitespace from each part, rejoin. Anything
/// else passes through unchanged.
pub fn rewrite_calc(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    for head in CALC_LIKE_HEADS {
        if lower.starts_with(head) && value.ends_with(')') {
            let head_len = head.len();
            let inner = &value[head_len..value.len() - 1];
            let parts: Vec<String> = splitter::split(',', inner)
                .into_iter()
                .map(|part| part.chars().filter(|c| !c.is_whitespace()).collect())
                .collect();
            return format!("{}{})", &value[..head_len], parts.join(","));
        }
    }
    value.to_string()
}

struct GradientHead {
    name: &'static str,
    skip: usize,
}

const GRADIENT_HEADS: &[GradientHead] = &[
    GradientHead {
        name: "linear-gradient",
        skip: 1,
    },
    GradientHead {
        name: "repeating-linear-gradient",
        skip: 1,
    },
    GradientHead {
        name: "radial-gradient",
        skip: 2,
    },
    GradientHead {
        name: "repeating-radial-gradient",
        skip: 2,
    },
];

/// Does `value` contain a `gradient(` construct anywhere, case-insensitive?
/// Used by background dissolution to refuse to touch gradient values.
pub fn contains_gradient(value: &str) -> bool {
    value.to_ascii_lowercase().contains("gradient(")
}

/// Rewrite the colour stops inside a single supported gradient function,
/// leaving the geometry segments and the function head untouched.
/// Non-gradient or unsupported-head values pass through unchanged.
pub fn rewrite_gradient(value: &str) -> String {
    let trimmed = value.trim();
    let open = match trimmed.find('(') {
        Some(i) => i,
        None => return value.to_string(),
    };
    if !trimmed.ends_with(')') {
        return value.to_string();
    }
    let head_with_prefix = &trimmed[..open];
    let bare_head = strip_vendor_prefix(head_with_prefix);
    let spec = match GRADIENT_HEADS
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(bare_head))
    {
        Some(g) => g,
        None => return value.to_string(),
    };

    let inner = &trimmed[open + 1..trimmed.len() - 1];
    let segments = splitter::split(',', inner);
    let rewritten: Vec<String> = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            if i < spec.skip {
                return seg.clone();
            }
            let mut tokens = splitter::split_ws(seg);
            if let Some(first) = tokens.first_mut() {
                *first = color::optimise(first);
            }
            tokens.join(" ")
        })
        .collect();

    format!("{}({})", head_with_prefix, rewritten.join(","))
}

/// The fixed set of `transform` function names this crate understands.
fn recognised_transform_function(name: &str) -> bool {
    matches!(
        name,
        "matrix"
            | "matrix3d"
            | "translate"
            | "translate3d"
            | "translateX"
            | "translateY"
            | "translateZ"
            | "scale"
            | "scale3d"
            | "scaleX"
            | "scaleY"
            | "scaleZ"
            | "rotate"
            | "rotate3d"
            | "rotateX"
            | "rotateY"
            | "rotateZ"
            | "skew"
            | "skewX"
            | "skewY"
            | "perspective"
    )
}

/// Merge `X`/`Y`/`Z`-suffixed transform functions back into their combined
/// form where possible, and normalise every numeric argument along the way.
///
/// Recognised functions are keyed by name in an ordered map (reusing
/// [`PropertyMap`] exactly as the optimiser core does for declarations): a
/// second occurrence of the same function name overwrites the first, which
/// is a deliberately preserved legacy quirk rather than a bug (see
/// DESIGN.md). Unrecognised functions pass through, keeping their relative
/// order among themselves.
pub fn rewrite_transform(value: &str) -> String {
    let tokens = splitter::split_ws(value);
    let mut passthrough: Vec<String> = Vec::new();
    let mut functions = PropertyMap::new();

    for token in &tokens {
        let open = match token.find('(') {
            Some(i) => i,
            None => {
                passthrough.push(token.clone());
                continue;
            }
        };
        if !token.ends_with(')') {
            passthrough.push(token.clone());
            continue;
        }
        let name = &token[..open];
        if !recognised_transform_function(name) {
            passthrough.push(token.clone());
            continue;
        }
        let args = &token[open + 1..token.len() - 1];
        let normalised_args: Vec<String> = splitter::split(',', args)
            .into_iter()
            .map(|a| number::optimise(None, a.trim()))
            .collect();
        functions.insert(name, Declaration::new(normalised_args.join(","), false));
    }

    merge_axis_group(&mut functions, "translate3d", &["translateX", "translateY", "translateZ"], "translate");
    merge_axis_group(&mut functions, "scale3d", &["scaleX", "scaleY", "scaleZ"], "scale");
    for (base2d, x, y) in [
        ("skew", "skewX", "skewY"),
        ("scale", "scaleX", "scaleY"),
        ("translate", "translateX", "translateY"),
        ("rotate", "rotateX", "rotateY"),
    ] {
        merge_axis_pair(&mut functions, base2d, x, y);
    }

    let mut out: Vec<String> = passthrough;
    for (name, decl) in functions.iter() {
        out.push(format!("{}({})", name, decl.value));
    }
    out.join(" ")
}

fn merge_axis_group(map: &mut PropertyMap, merged_name: &str, axes: &[&str; 3], _base: &str) {
    if axes.iter().all(|a| map.contains(a)) {
        let position = axes.iter().filter_map(|a| map.position(*a)).min().unwrap_or(0);
        let values: Vec<String> = axes.iter().map(|a| map.get(a).unwrap().value.clone()).collect();
        for a in axes {
            map.remove(a);
        }
        map.insert_at(position, merged_name, Declaration::new(values.join(","), false));
    }
}

fn merge_axis_pair(map: &mut PropertyMap, merged_name: &str, x: &str, y: &str) {
    if map.contains(x) && map.contains(y) {
        let position = map.position(x).unwrap().min(map.position(y).unwrap());
        let vx = map.get(x).unwrap().value.clone();
        let vy = map.get(y).unwrap().value.clone();
        map.remove(x);
        map.remove(y);
        map.insert_at(position, merged_name, Declaration::new(format!("{},{}", vx, vy), false));
    }
}
