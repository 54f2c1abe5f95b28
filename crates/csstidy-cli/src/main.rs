//! `csstidy`: read a stylesheet from a file or stdin, optimise it, and write
//! the result to a file or stdout.
//!
//! Follows the toolkit's own small binaries: positional `INPUT`/`OUTPUT`
//! arguments that fall back to the Unix pipe (stdin/stdout) when omitted, so
//! the tool composes in a shell pipeline as easily as it runs standalone.

use std::fs;
use std::io::{self, Read, Write};
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use log::info;

use csstidy::{Config, Level, Optimiser};

fn read_args() -> ArgMatches<'static> {
    App::new("csstidy")
        .about("Parses a CSS stylesheet and optimises it without changing what it renders")
        .arg(
            Arg::with_name("INPUT")
                .help("CSS file to read (defaults to stdin)")
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Where to write the optimised CSS (defaults to stdout)")
                .required(false),
        )
        .arg(
            Arg::with_name("optimise")
                .long("optimise")
                .takes_value(true)
                .possible_values(&["none", "common", "font", "background", "all"])
                .default_value("all")
                .help("How aggressively to dissolve and recompose shorthand properties"),
        )
        .arg(
            Arg::with_name("no-compress-colors")
                .long("no-compress-colors")
                .help("Leave colour literals as written instead of shortening them"),
        )
        .arg(
            Arg::with_name("no-compress-font-weight")
                .long("no-compress-font-weight")
                .help("Leave `bold`/`normal` font-weight keywords as written"),
        )
        .arg(
            Arg::with_name("preserve-comments")
                .long("preserve-comments")
                .help("Keep leading comments (e.g. a licence header) in the output"),
        )
        .get_matches()
}

fn config_from_args(matches: &ArgMatches) -> Config {
    Config {
        optimise_shorthands: Level::from_str(matches.value_of("optimise").unwrap())
            .expect("clap already validated this against possible_values"),
        compress_colors: !matches.is_present("no-compress-colors"),
        compress_font_weight: !matches.is_present("no-compress-font-weight"),
        preserve_comments: matches.is_present("preserve-comments"),
    }
}

fn read_input(matches: &ArgMatches) -> io::Result<String> {
    match matches.value_of("INPUT") {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(matches: &ArgMatches, text: &str) -> io::Result<()> {
    match matches.value_of("OUTPUT") {
        Some(path) => fs::write(path, text),
        None => io::stdout().write_all(text.as_bytes()),
    }
}

fn main() {
    env_logger::init();
    let matches = read_args();
    let config = config_from_args(&matches);

    let input = match read_input(&matches) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("csstidy: could not read input: {}", e);
            process::exit(1);
        }
    };

    let mut sheet = match csstidy::parser::parse(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("csstidy: could not parse input: {}", e);
            process::exit(1);
        }
    };

    Optimiser::new(config.clone()).postparse(&mut sheet);
    let output = csstidy::printer::print(&sheet, &config);

    if let Err(e) = write_output(&matches, &output) {
        eprintln!("csstidy: could not write output: {}", e);
        process::exit(1);
    }

    info!("{} bytes in, {} bytes out", input.len(), output.len());
}
