//! CLI tool for xlprint - paginates a JSON sheet description and outputs the page plan
//!
//! Usage:
//!   xlprint_cli <sheet.json>                  # Plan JSON to stdout
//!   xlprint_cli <sheet.json> -o plan.json     # Plan JSON to file
//!   xlprint_cli <sheet.json> --paper A3 --landscape
//!
//! Set `RUST_LOG=xlprint=debug` to log every page as it is produced.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use xlprint::print::{paginate, Paper};
use xlprint::types::{Orientation, SheetDescription};
use xlprint::SheetLayout;

const USAGE: &str =
    "Usage: xlprint_cli <sheet.json> [-o plan.json] [--paper NAME] [--landscape] [--no-fit]";

struct Args {
    input: String,
    output: Option<String>,
    paper: Option<String>,
    landscape: bool,
    no_fit: bool,
}

fn parse_args() -> Option<Args> {
    let mut args = env::args().skip(1);
    let input = args.next()?;
    let mut parsed = Args {
        input,
        output: None,
        paper: None,
        landscape: false,
        no_fit: false,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" => parsed.output = Some(args.next()?),
            "--paper" => parsed.paper = Some(args.next()?),
            "--landscape" => parsed.landscape = true,
            "--no-fit" => parsed.no_fit = true,
            _ => return None,
        }
    }
    Some(parsed)
}

fn fail(msg: String) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Some(args) = parse_args() else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    let text = fs::read_to_string(&args.input)
        .unwrap_or_else(|e| fail(format!("Error reading {}: {}", args.input, e)));

    let desc: SheetDescription = serde_json::from_str(&text)
        .unwrap_or_else(|e| fail(format!("Error parsing sheet description: {}", e)));

    let layout = SheetLayout::from_description(&desc)
        .unwrap_or_else(|e| fail(format!("Error building sheet layout: {}", e)));

    // Command-line flags override the sheet's own paper config
    let mut paper = Paper::default();
    if let Some(config) = &desc.paper {
        if let Err(e) = paper.apply_config(config) {
            fail(format!("Error in paper config: {}", e));
        }
    }
    if let Some(name) = &args.paper {
        if let Err(e) = paper.set_size(name) {
            fail(e.to_string());
        }
    }
    if args.landscape {
        paper.orientation = Orientation::Landscape;
    }
    if args.no_fit {
        paper.fit_to_width = false;
    }

    let plan = paginate(&layout, &paper);
    tracing::info!(pages = plan.pages.len(), scale = plan.geometry.scale, "paginated");

    let json = serde_json::to_string_pretty(&plan)
        .unwrap_or_else(|e| fail(format!("Error serializing JSON: {}", e)));

    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                fail(format!("Error writing {}: {}", path, e));
            }
            eprintln!("Written: {} ({} pages)", path, plan.pages.len());
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
