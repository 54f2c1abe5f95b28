use std::str::FromStr;

/// How aggressively the optimiser recomposes shorthand properties.
///
/// Ordered: `None < Common < Font < Background < All`. Each stage named in
/// the crate-level pipeline is gated by a minimum level, so a lower level
/// is guaranteed to produce a subset of the changes a higher one would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    None = 0,
    Common = 1,
    Font = 2,
    Background = 3,
    All = 4,
}

impl Level {
    pub fn at_least(self, min: Level) -> bool {
        self >= min
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Level::None),
            "common" => Ok(Level::Common),
            "font" => Ok(Level::Font),
            "background" => Ok(Level::Background),
            "all" => Ok(Level::All),
            other => Err(format!("unknown optimisation level: {}", other)),
        }
    }
}

/// The knobs the optimiser core actually consumes, plus the ambient ones a
/// real driver (the CLI) needs to round-trip a document.
#[derive(Debug, Clone)]
pub struct Config {
    pub optimise_shorthands: Level,
    pub compress_colors: bool,
    pub compress_font_weight: bool,
    /// Ambient: let the printer keep `/* ... */` comments in the output.
    pub preserve_comments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            optimise_shorthands: Level::All,
            compress_colors: true,
            compress_font_weight: true,
            preserve_comments: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_ordering() {
        assert!(Level::None < Level::Common);
        assert!(Level::Common < Level::Font);
        assert!(Level::Font < Level::Background);
        assert!(Level::Background < Level::All);
    }

    #[test]
    fn level_from_str() {
        assert_eq!("ALL".parse::<Level>().unwrap(), Level::All);
        assert_eq!("common".parse::<Level>().unwrap(), Level::Common);
        assert!("bogus".parse::<Level>().is_err());
    }

    #[test]
    fn default_config_is_all_with_compression_on() {
        let c = Config::default();
        assert_eq!(c.optimise_shorthands, Level::All);
        assert!(c.compress_colors);
        assert!(c.compress_font_weight);
    }
}
