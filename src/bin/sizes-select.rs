use anyhow::{bail, Context, Result};
use simple_logger::SimpleLogger;
use sizes_css::errors::{DiagnosticSink, ParseError};
use sizes_css::media::Viewport;
use sizes_css::parser_config::SizesConfig;
use sizes_css::SizesParser;
use std::io::Read;

/// Prints parse errors to stderr
struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn parse_error(&self, error: &ParseError) {
        eprintln!("parse error: {error}");
    }

    fn parse_error_from(&self, source: &str, error: &ParseError) {
        eprintln!("parse error in {source}: {error}");
    }
}

fn main() -> Result<()> {
    let matches = clap::Command::new("Sizes attribute selector")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            clap::Arg::new("sizes")
                .help("The sizes attribute value, or - to read it from stdin")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("width")
                .help("Viewport width in css pixels")
                .long("width")
                .value_parser(clap::value_parser!(f64))
                .default_value("1024"),
        )
        .arg(
            clap::Arg::new("height")
                .help("Viewport height in css pixels")
                .long("height")
                .value_parser(clap::value_parser!(f64))
                .default_value("768"),
        )
        .arg(
            clap::Arg::new("font-size")
                .help("Initial font size in css pixels")
                .long("font-size")
                .value_parser(clap::value_parser!(f64))
                .default_value("16"),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the tokenized candidates")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("strict-commas")
                .help("Only split candidates on commas outside parentheses")
                .long("strict-commas")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("quiet")
                .help("Don't display parse errors")
                .long("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("debug") {
        SimpleLogger::new()
            .with_level(log::LevelFilter::Trace)
            .init()
            .context("could not initialize logger")?;
    }

    let Some(sizes) = matches.get_one::<String>("sizes") else {
        bail!("no sizes attribute given");
    };
    let from_stdin = sizes == "-";
    let sizes = if from_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("could not read sizes attribute from stdin")?;
        buf
    } else {
        sizes.clone()
    };

    let mut config = if matches.get_flag("strict-commas") {
        SizesConfig::strict()
    } else {
        SizesConfig::default()
    };
    config.source = Some(if from_stdin { "stdin" } else { "argument" }.into());

    let viewport = Viewport {
        width: dimension(&matches, "width")?,
        height: dimension(&matches, "height")?,
        font_size: dimension(&matches, "font-size")?,
    };

    if matches.get_flag("tokens") {
        let parser = SizesParser::new(config);
        for (index, group) in parser.tokenize(&sizes).iter().enumerate() {
            println!("{index}: {group:?}");
        }
        return Ok(());
    }

    let size = if matches.get_flag("quiet") {
        SizesParser::new(config).select(Some(&sizes), &viewport)
    } else {
        SizesParser::with_sink(config, StderrSink).select(Some(&sizes), &viewport)
    };
    println!("{size}");

    Ok(())
}

fn dimension(matches: &clap::ArgMatches, name: &str) -> Result<f64> {
    let Some(value) = matches.get_one::<f64>(name).copied() else {
        bail!("missing value for --{name}");
    };
    if !value.is_finite() || value < 0.0 {
        bail!("--{name} must be a non-negative number, got {value}");
    }
    Ok(value)
}
