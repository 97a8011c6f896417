//! wikicreole CLI - convert WikiCreole markup to XHTML

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use wikicreole::{Options, OutputMode};

#[derive(Parser)]
#[command(name = "wikicreole")]
#[command(version, about = "Convert WikiCreole markup to XHTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    wikicreole page.wiki              Convert a file
    wikicreole < page.wiki            Convert standard input
    wikicreole --toc 3 page.wiki      Prepend a table of contents from 3 headings")]
struct Cli {
    /// Input file, or `-` for standard input
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Emit template tags for page links and plugin calls
    #[arg(long)]
    template: bool,

    /// Prefix for page links
    #[arg(long, value_name = "URL")]
    link_base: Option<String>,

    /// Prefix for image assets
    #[arg(long, value_name = "URL")]
    asset_base: Option<String>,

    /// Prepend a table of contents once there are at least N headings
    #[arg(long, value_name = "N")]
    toc: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> wikicreole::Result<()> {
    let input = match cli.input.as_deref() {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let defaults = Options::default();
    let options = Options {
        mode: if cli.template {
            OutputMode::Template
        } else {
            OutputMode::Xhtml
        },
        link_base: cli.link_base.clone().unwrap_or(defaults.link_base),
        asset_base: cli.asset_base.clone().unwrap_or(defaults.asset_base),
        toc: cli.toc.is_some(),
        toc_min_headings: cli.toc.unwrap_or(defaults.toc_min_headings),
    };

    let html = wikicreole::to_html_with_options(&input, &options)?;
    io::stdout().write_all(html.as_bytes())?;
    Ok(())
}
