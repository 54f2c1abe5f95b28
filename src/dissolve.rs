//! Shorthand dissolution: expand a shorthand declaration into its longhand
//! set. Each function is a no-op when its shorthand isn't present, and
//! leaves the block untouched on any shape it doesn't recognise (an
//! unrecognised shape is logged at `debug` by the caller, not here -- these
//! functions stay pure value-in, map-mutated-out).

use crate::block::{Declaration, PropertyMap};
use crate::config::Level;
use crate::functions;
use crate::registry;
use crate::splitter;
use log::debug;

/// Run every dissolve step gated by `level`, in the order the pipeline
/// documents: four-value shorthands (and `border-radius`) at `Common`,
/// `font` at `Font`, `background` at `Background`.
pub fn dissolve_shorthands(props: &mut PropertyMap, level: Level) {
    if !level.at_least(Level::Common) {
        return;
    }
    for s in registry::FOUR_VALUE_SHORTHANDS {
        dissolve_four_value(props, s.shorthand, &s.longhands);
    }
    dissolve_border_radius(props);

    if level.at_least(Level::Font) {
        dissolve_font(props);
    }
    if level.at_least(Level::Background) {
        dissolve_background(props);
    }
}

fn dissolve_four_value(props: &mut PropertyMap, shorthand: &str, longhands: &[&str; 4]) {
    let decl = match props.get(shorthand) {
        Some(d) => d.clone(),
        None => return,
    };
    let tokens = splitter::split_ws(&decl.value);
    if tokens.is_empty() {
        return;
    }
    let values: [String; 4] = match tokens.len() {
        1 => [tokens[0].clone(), tokens[0].clone(), tokens[0].clone(), tokens[0].clone()],
        2 => [tokens[0].clone(), tokens[1].clone(), tokens[0].clone(), tokens[1].clone()],
        3 => [tokens[0].clone(), tokens[1].clone(), tokens[2].clone(), tokens[1].clone()],
        4 => [tokens[0].clone(), tokens[1].clone(), tokens[2].clone(), tokens[3].clone()],
        // tolerant fallback for any other arity, matching the reference behaviour
        n => {
            debug!("{} has {} space-separated values, expected 1-4; falling back to the first", shorthand, n);
            [tokens[0].clone(), tokens[0].clone(), tokens[0].clone(), tokens[0].clone()]
        }
    };

    let position = props.position(shorthand).unwrap();
    props.remove(shorthand);
    for (i, lh) in longhands.iter().enumerate() {
        props.insert_at(position + i, *lh, Declaration::new(values[i].clone(), decl.important));
    }
}

/// `border-radius` dissolves the same way as any four-value shorthand when
/// written as a single (no-slash) value. A two-half `a / b` value is left
/// for [`crate::value::value`] to compress in place rather than dissolved,
/// since splitting two independent four-tuples into eight longhands has no
/// single agreed longhand set to target.
fn dissolve_border_radius(props: &mut PropertyMap) {
    let decl = match props.get(registry::BORDER_RADIUS) {
        Some(d) => d.clone(),
        None => return,
    };
    if decl.value.contains('/') {
        return;
    }
    dissolve_four_value(props, registry::BORDER_RADIUS, &registry::BORDER_RADIUS_LONGHANDS);
}

fn dissolve_font(props: &mut PropertyMap) {
    let decl = match props.get("font") {
        Some(d) => d.clone(),
        None => return,
    };
    let position = props.position("font").unwrap();
    let important = decl.important;

    let segments = splitter::split(',', &decl.value);
    if segments.is_empty() {
        return;
    }

    let mut font_style: Option<String> = None;
    let mut font_variant: Option<String> = None;
    let mut font_weight: Option<String> = None;
    let mut font_size: Option<String> = None;
    let mut line_height: Option<String> = None;
    let mut family_words: Vec<String> = Vec::new();

    for token in splitter::split_ws(&segments[0]) {
        if font_weight.is_none() && registry::FONT_WEIGHT_KEYWORDS.contains(&token.as_str()) {
            font_weight = Some(token);
        } else if font_variant.is_none() && registry::FONT_VARIANT_KEYWORDS.contains(&token.as_str()) {
            font_variant = Some(token);
        } else if font_style.is_none() && registry::FONT_STYLE_KEYWORDS.contains(&token.as_str()) {
            font_style = Some(token);
        } else if font_size.is_none()
            && token.chars().next().map_or(false, |c| c.is_ascii_digit() || c == '.')
        {
            if let Some(slash) = token.find('/') {
                font_size = Some(token[..slash].to_string());
                line_height = Some(token[slash + 1..].to_string());
            } else {
                font_size = Some(token);
            }
        } else {
            family_words.push(token);
        }
    }

    let mut font_family = if family_words.is_empty() {
        None
    } else {
        let joined = family_words.join(" ");
        if family_words.len() > 1 {
            Some(format!("\"{}\"", joined))
        } else {
            Some(joined)
        }
    };
    for seg in &segments[1..] {
        let seg = seg.trim();
        font_family = Some(match font_family {
            Some(f) => format!("{},{}", f, seg),
            None => seg.to_string(),
        });
    }

    // Ambiguity fix: a bare numeric weight with no size token found is really
    // the size (e.g. `font: 400 12px/1.5 Arial` parsed with tokens swapped).
    if font_size.is_none() {
        if let Some(w) = &font_weight {
            if !w.is_empty() && w.chars().all(|c| c.is_ascii_digit()) {
                font_size = font_weight.take();
            }
        }
    }

    let style = font_style.unwrap_or_else(|| registry::font_default("font-style").unwrap().to_string());
    let variant =
        font_variant.unwrap_or_else(|| registry::font_default("font-variant").unwrap().to_string());
    let weight =
        font_weight.unwrap_or_else(|| registry::font_default("font-weight").unwrap().to_string());
    let size = font_size.unwrap_or_default();
    let lh = line_height.unwrap_or_default();
    let family = font_family.unwrap_or_default();

    props.remove("font");
    let longhands = [
        ("font-style", style),
        ("font-variant", variant),
        ("font-weight", weight),
        ("font-size", size),
        ("line-height", lh),
        ("font-family", family),
    ];
    for (i, (name, value)) in longhands.into_iter().enumerate() {
        props.insert_at(position + i, *name, Declaration::new(value, important));
    }
}

#[derive(Default)]
struct BackgroundLayer {
    image: Option<String>,
    size: Option<String>,
    repeat: Option<String>,
    position: Vec<String>,
    attachment: Option<String>,
    clip: Option<String>,
    origin: Option<String>,
    color: Option<String>,
}

fn classify_background_token(layer: &mut BackgroundLayer, token: &str) {
    let lower = token.to_ascii_lowercase();
    if layer.image.is_none() && (lower.starts_with("url(") || lower == "none") {
        layer.image = Some(token.to_string());
    } else if layer.repeat.is_none() && registry::BACKGROUND_REPEAT_KEYWORDS.contains(&lower.as_str()) {
        layer.repeat = Some(token.to_string());
    } else if layer.attachment.is_none()
        && registry::BACKGROUND_ATTACHMENT_KEYWORDS.contains(&lower.as_str())
    {
        layer.attachment = Some(token.to_string());
    } else if lower == "border" || lower == "padding" {
        if layer.clip.is_none() {
            layer.clip = Some(token.to_string());
        } else {
            layer.origin = Some(token.to_string());
        }
    } else if lower == "content" {
        layer.origin = Some(token.to_string());
    } else if token.starts_with('(') && token.ends_with(')') {
        layer.size = Some(token[1..token.len() - 1].to_string());
    } else if layer.position.len() < 2
        && (registry::BACKGROUND_POSITION_KEYWORDS.contains(&lower.as_str())
            || token.chars().next().map_or(false, |c| c.is_ascii_digit() || c == '.' || c == '-'))
    {
        layer.position.push(token.to_string());
    } else if layer.color.is_none() {
        layer.color = Some(token.to_string());
    }
}

fn accumulate_layers(
    layers: &[BackgroundLayer],
    default: &str,
    pick: impl Fn(&BackgroundLayer) -> Option<String>,
) -> String {
    layers
        .iter()
        .map(|l| pick(l).unwrap_or_else(|| default.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

fn dissolve_background(props: &mut PropertyMap) {
    let decl = match props.get("background") {
        Some(d) => d.clone(),
        None => return,
    };
    if functions::contains_gradient(&decl.value) {
        return;
    }

    let position = props.position("background").unwrap();
    let important = decl.important;

    let layers: Vec<BackgroundLayer> = splitter::split(',', &decl.value)
        .iter()
        .map(|layer_src| {
            let mut layer = BackgroundLayer::default();
            for token in splitter::split_ws(layer_src) {
                classify_background_token(&mut layer, &token);
            }
            layer
        })
        .collect();
    if layers.is_empty() {
        return;
    }

    let image = accumulate_layers(&layers, "none", |l| l.image.clone());
    let size = accumulate_layers(&layers, "auto", |l| l.size.clone().map(|s| format!("({})", s)));
    let repeat = accumulate_layers(&layers, "repeat", |l| l.repeat.clone());
    let pos = accumulate_layers(&layers, "0 0", |l| {
        if l.position.is_empty() {
            None
        } else {
            Some(l.position.join(" "))
        }
    });
    let attachment = accumulate_layers(&layers, "scroll", |l| l.attachment.clone());
    let clip = accumulate_layers(&layers, "border", |l| l.clip.clone());
    let origin = accumulate_layers(&layers, "padding", |l| l.origin.clone());
    let color = accumulate_layers(&layers, "transparent", |l| l.color.clone());

    props.remove("background");
    let longhands = [
        ("background-image", image),
        ("background-size", size),
        ("background-repeat", repeat),
        ("background-position", pos),
        ("background-attachment", attachment),
        ("background-clip", clip),
        ("background-origin", origin),
        ("background-color", color),
    ];
    for (i, (name, value)) in longhands.into_iter().enumerate() {
        props.insert_at(position + i, *name, Declaration::new(value, important));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::config::Level;

    #[test]
    fn four_value_dissolve_expands_two_tokens() {
        let mut p = PropertyMap::new();
        p.insert("margin", Declaration::new("1px 2px", false));
        dissolve_shorthands(&mut p, Level::Common);
        assert_eq!(p.get("margin-top").unwrap().value, "1px");
        assert_eq!(p.get("margin-right").unwrap().value, "2px");
        assert_eq!(p.get("margin-bottom").unwrap().value, "1px");
        assert_eq!(p.get("margin-left").unwrap().value, "2px");
        assert!(!p.contains("margin"));
    }

    #[test]
    fn border_radius_with_slash_is_left_alone() {
        let mut p = PropertyMap::new();
        p.insert("border-radius", Declaration::new("1px / 2px", false));
        dissolve_shorthands(&mut p, Level::Common);
        assert!(p.contains("border-radius"));
        assert!(!p.contains("border-top-left-radius"));
    }

    #[test]
    fn font_dissolve_splits_style_weight_size_and_family() {
        let mut p = PropertyMap::new();
        p.insert("font", Declaration::new("italic bold 12px/1.5 Arial", false));
        dissolve_shorthands(&mut p, Level::Font);
        assert_eq!(p.get("font-style").unwrap().value, "italic");
        assert_eq!(p.get("font-weight").unwrap().value, "bold");
        assert_eq!(p.get("font-size").unwrap().value, "12px");
        assert_eq!(p.get("line-height").unwrap().value, "1.5");
        assert_eq!(p.get("font-family").unwrap().value, "Arial");
    }

    #[test]
    fn font_dissolve_quotes_multi_word_family() {
        let mut p = PropertyMap::new();
        p.insert("font", Declaration::new("12px Times New Roman", false));
        dissolve_shorthands(&mut p, Level::Font);
        assert_eq!(p.get("font-family").unwrap().value, "\"Times New Roman\"");
    }

    #[test]
    fn background_with_gradient_refuses_to_dissolve() {
        let mut p = PropertyMap::new();
        p.insert(
            "background",
            Declaration::new("linear-gradient(to right, red, blue)", false),
        );
        dissolve_shorthands(&mut p, Level::Background);
        assert!(p.contains("background"));
        assert!(!p.contains("background-image"));
    }

    #[test]
    fn background_dissolve_classifies_single_layer() {
        let mut p = PropertyMap::new();
        p.insert(
            "background",
            Declaration::new("url(a.png) no-repeat top left red", false),
        );
        dissolve_shorthands(&mut p, Level::Background);
        assert_eq!(p.get("background-image").unwrap().value, "url(a.png)");
        assert_eq!(p.get("background-repeat").unwrap().value, "no-repeat");
        assert_eq!(p.get("background-position").unwrap().value, "top left");
        assert_eq!(p.get("background-color").unwrap().value, "red");
        assert_eq!(p.get("background-attachment").unwrap().value, "scroll");
    }
}
