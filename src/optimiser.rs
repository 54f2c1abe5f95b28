//! The driver that ties the sub-engines together into the documented
//! pipeline: dissolve, rewrite every declaration's value, re-merge, recurse.

use log::info;

use crate::block::{AtBody, Block, Declaration, PropertyMap, Stylesheet};
use crate::config::{Config, Level};
use crate::dissolve;
use crate::merge;
use crate::splitter;
use crate::value;

/// Owns a [`Config`] and applies it to a parsed [`Stylesheet`] in place.
pub struct Optimiser {
    config: Config,
}

impl Optimiser {
    pub fn new(config: Config) -> Self {
        Optimiser { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Optimise every block of `sheet` in place, recursing into at-rules.
    pub fn postparse(&self, sheet: &mut Stylesheet) {
        for block in &mut sheet.blocks {
            self.optimise_block(block);
        }
    }

    fn optimise_block(&self, block: &mut Block) {
        match block {
            Block::Style(style) => self.optimise_properties(&mut style.properties),
            Block::At(at) => match &mut at.body {
                AtBody::None => {}
                AtBody::Declarations(props) => self.optimise_properties(props),
                AtBody::Blocks(children) => {
                    for child in children {
                        self.optimise_block(child);
                    }
                }
            },
        }
    }

    fn optimise_properties(&self, props: &mut PropertyMap) {
        let level = self.config.optimise_shorthands;
        let before = props.len();

        dissolve::dissolve_shorthands(props, level);

        // At level NONE, invariant 3 promises the property name set is
        // stable and values change only via `!important` whitespace
        // compaction -- so the per-declaration value rewrite (colour,
        // number, calc, font-weight) is itself gated on Common, same as
        // the shorthand passes either side of it.
        if level.at_least(Level::Common) {
            let names: Vec<String> = props.iter().map(|(k, _)| k.to_string()).collect();
            for name in names {
                let decl = props.get(&name).unwrap().clone();
                let rewritten = self.rewrite_declaration(&name, &decl);
                if rewritten != decl {
                    info!("{}: `{}` -> `{}`", name, decl.to_css(), rewritten.to_css());
                }
                props.insert(name, rewritten);
            }
        }

        merge::merge_shorthands(props, level);

        if props.len() != before {
            info!(
                "shorthand pass changed declaration count from {} to {}",
                before,
                props.len()
            );
        }
    }

    /// Run `subValue` over each top-level comma-separated part, rejoin, then
    /// run the whole-value dispatch in [`value::value`] (which also
    /// normalises `!important`).
    fn rewrite_declaration(&self, property: &str, decl: &Declaration) -> Declaration {
        let parts = splitter::split(',', &decl.value);
        let rewritten_parts: Vec<String> = parts
            .iter()
            .map(|part| value::sub_value(&self.config, property, part))
            .collect();
        let rejoined = rewritten_parts.join(",");

        let with_importance = if decl.important {
            format!("{}!important", rejoined)
        } else {
            rejoined
        };
        let dispatched = value::value(&self.config, property, &with_importance);
        let (v, important) = value::strip_importance(&dispatched);
        Declaration::new(v, important)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::block::StyleBlock;

    fn style_block(props: &[(&str, &str, bool)]) -> Block {
        let mut map = PropertyMap::new();
        for (name, value, important) in props {
            map.insert(*name, Declaration::new(*value, *important));
        }
        Block::Style(StyleBlock {
            selector: "x".to_string(),
            properties: map,
        })
    }

    fn optimise_one(block: &mut Block, config: Config) {
        Optimiser::new(config).optimise_block(block);
    }

    fn properties(block: &Block) -> &PropertyMap {
        match block {
            Block::Style(s) => &s.properties,
            Block::At(_) => panic!("expected a style block"),
        }
    }

    #[test]
    fn full_pipeline_merges_two_value_pair() {
        let mut block = style_block(&[("pause-before", "weak", false), ("pause-after", "medium", false)]);
        optimise_one(&mut block, Config::default());
        assert_eq!(properties(&block).get("pause").unwrap().value, "weak medium");
    }

    #[test]
    fn full_pipeline_dissolves_then_remerges_margin() {
        let mut block = style_block(&[("margin", "1px 1px 1px 1px", true)]);
        optimise_one(&mut block, Config::default());
        let props = properties(&block);
        assert_eq!(props.get("margin").unwrap().value, "1px");
        assert!(props.get("margin").unwrap().important);
        assert!(!props.contains("margin-top"));
    }

    #[test]
    fn full_pipeline_rewrites_transform() {
        let mut block = style_block(&[("transform", "translateX(1px) translateY(2px)", false)]);
        optimise_one(&mut block, Config::default());
        assert_eq!(properties(&block).get("transform").unwrap().value, "translate(1px,2px)");
    }

    #[test]
    fn full_pipeline_leaves_untouched_at_none_level() {
        let mut config = Config::default();
        config.optimise_shorthands = Level::None;
        let mut block = style_block(&[("margin-top", "1px", false), ("margin-right", "1px", false)]);
        optimise_one(&mut block, config);
        let props = properties(&block);
        assert!(props.contains("margin-top"));
        assert!(props.contains("margin-right"));
        assert!(!props.contains("margin"));
    }

    #[test]
    fn full_pipeline_leaves_colour_values_untouched_at_none_level() {
        let mut config = Config::default();
        config.optimise_shorthands = Level::None;
        let mut block = style_block(&[("color", "#FF0000", false)]);
        optimise_one(&mut block, config);
        assert_eq!(properties(&block).get("color").unwrap().value, "#FF0000");
    }

    #[test]
    fn full_pipeline_compresses_background_gradient_colours() {
        let mut block = style_block(&[(
            "background",
            "linear-gradient(to right, #ff0000, #ffffff)",
            false,
        )]);
        optimise_one(&mut block, Config::default());
        assert_eq!(
            properties(&block).get("background").unwrap().value,
            "linear-gradient(to right,red,#fff)"
        );
    }
}
