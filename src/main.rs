use clap::{Arg, ArgAction, Command};
use std::io::Read;
use std::path::Path;
use tracing::{debug, Level};

use markup::aggregating::{self, Entry};
use markup::config::Config;
use markup::formatting;
use markup::matching::Matchers;
use markup::parsing::{self, Document, Elements};
use markup::rendering::Renderer;

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("markup")
        .version(VERSION)
        .propagate_version(true)
        .about("A configurable markup language toolchain.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug output."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .default_value("markup.json")
                .help("The configuration file declaring the elements and the rules applied to them."),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse the given document and print its tree")
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .action(ArgAction::SetTrue)
                        .help("Print the tree as recognized, without applying any transformation passes."),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .action(ArgAction::SetTrue)
                        .help("Print the tree written back out as source text instead of in canonical form."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the document to parse, or '-' for standard input."),
                ),
        )
        .subcommand(
            Command::new("index")
                .about("Collect the configured aggregates from the given document")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the aggregates as JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the document to index, or '-' for standard input."),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the given document to HTML")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the document to render, or '-' for standard input."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("parse", submatches)) => {
            let (config, elements) = setup(submatches);
            let raw = submatches.get_flag("raw");
            let source = submatches.get_flag("source");

            let document = process(submatches, &config, &elements, raw);

            if source {
                print!("{}", formatting::to_source(&document.tree, &elements));
            } else {
                println!("{}", formatting::canonical(&document.tree));
            }
        }
        Some(("index", submatches)) => {
            let (config, elements) = setup(submatches);
            let json = submatches.get_flag("json");

            let document = process(submatches, &config, &elements, false);
            let aggregates = aggregating::aggregate(&config.aggregates, &document.tree);

            if json {
                match serde_json::to_string_pretty(&aggregates) {
                    Ok(output) => println!("{}", output),
                    Err(error) => {
                        eprintln!("error: {}", error);
                        std::process::exit(1);
                    }
                }
            } else {
                for (name, items) in aggregates {
                    println!("{}:", name);
                    print_outline(&aggregating::regroup(items), 1);
                }
            }
        }
        Some(("render", submatches)) => {
            let (config, elements) = setup(submatches);
            let filename = filename(submatches);

            let document = process(submatches, &config, &elements, false);

            let renderer = match Renderer::new(&elements, &config.templates) {
                Ok(renderer) => renderer,
                Err(error) => {
                    eprintln!("{}", problem::concise_render_error(&error, Path::new(filename)));
                    std::process::exit(1);
                }
            };
            match renderer.render(&document.tree) {
                Ok(output) => print!("{}", output),
                Err(error) => {
                    eprintln!("{}", problem::concise_render_error(&error, Path::new(filename)));
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: markup [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn filename(submatches: &clap::ArgMatches) -> &str {
    submatches
        .get_one::<String>("filename")
        .map(String::as_str)
        .unwrap_or("-")
}

/// Load and validate the configuration, or exit.
fn setup(submatches: &clap::ArgMatches) -> (Config, Elements) {
    let path = submatches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("markup.json");
    let path = Path::new(path);

    let result = Config::load(path).and_then(|config| {
        config
            .validate(&Matchers::standard())
            .map(|elements| (config, elements))
    });

    match result {
        Ok(setup) => setup,
        Err(error) => {
            eprintln!("{}", problem::concise_config_error(&error, path));
            std::process::exit(1);
        }
    }
}

/// Read, parse, and (unless raw) transform the named document, reporting
/// any encoding problems along the way.
fn process(submatches: &clap::ArgMatches, config: &Config, elements: &Elements, raw: bool) -> Document {
    let filename = Path::new(filename(submatches));

    let input = if filename.to_str() == Some("-") {
        let mut buffer = Vec::new();
        if let Err(error) = std::io::stdin().read_to_end(&mut buffer) {
            eprintln!("error: <stdin>: {}", error);
            std::process::exit(1);
        }
        buffer
    } else {
        match parsing::load(filename) {
            Ok(input) => input,
            Err(error) => {
                eprintln!("{}", problem::concise_loading_error(&error));
                std::process::exit(1);
            }
        }
    };

    let mut document = parsing::parse(elements, &input);

    for diagnostic in &document.diagnostics {
        if submatches.get_flag("debug") {
            eprintln!("{}", problem::full_diagnostic(diagnostic, filename, &input));
        } else {
            eprintln!("{}", problem::concise_diagnostic(diagnostic, filename, &input));
        }
    }

    if raw {
        debug!("Skipping transformation passes");
    } else {
        match config.pipeline() {
            Ok(pipeline) => pipeline.run(&mut document.tree),
            Err(error) => {
                eprintln!("{}", problem::concise_config_error(&error, filename));
                std::process::exit(1);
            }
        }
    }

    document
}

fn print_outline(entries: &[Entry], depth: usize) {
    for entry in entries {
        match entry {
            Entry::Item(item) => {
                let text = item
                    .text
                    .lines()
                    .next()
                    .unwrap_or("");
                match &item.label {
                    Some(label) => println!("{:width$}{} {}", "", label, text, width = depth * 2),
                    None => println!("{:width$}{}", "", text, width = depth * 2),
                }
            }
            Entry::Nested(entries) => print_outline(entries, depth + 1),
        }
    }
}
