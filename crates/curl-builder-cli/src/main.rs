//! curl-builder CLI - Print shell-safe curl command lines
//!
//! Usage:
//!   curl-builder http://example.com -o '["-L", {"-H": "Accept: */*"}]'
//!   curl-builder -r request.json             # Import a JSON request description
//!   curl-builder -r - < request.json         # Read the request from stdin
//!   curl-builder -q double -t '{name}{url}{options}' http://example.com

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use curl_builder::{Command, HttpRequest, OptionsInput, QuoteStyle};

/// curl-builder - Build shell-safe curl commands
#[derive(Parser, Debug)]
#[command(name = "curl-builder")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target URL (overrides the request's URI)
    #[arg()]
    url: Option<String>,

    /// Options as JSON: ["-L", {"-d": "data", "-H": ["A: 1", "B: 2"]}]
    #[arg(short = 'o', long = "options", value_name = "JSON")]
    options: Vec<String>,

    /// JSON request description to import ('-' reads stdin)
    #[arg(short = 'r', long = "request", value_name = "FILE")]
    request: Option<PathBuf>,

    /// Quoting of option arguments
    #[arg(short = 'q', long = "quote", value_name = "STYLE", default_value_t = QuoteStyle::Single)]
    quote: QuoteStyle,

    /// Output layout using {name}, {options} and {url}
    #[arg(short = 't', long = "template")]
    template: Option<String>,

    /// Command name
    #[arg(short = 'n', long = "name")]
    name: Option<String>,
}

fn read_request(path: &Path, stdin: &mut impl Read) -> Result<HttpRequest> {
    let json = if path.as_os_str() == "-" {
        let mut json = String::new();
        stdin
            .read_to_string(&mut json)
            .context("Failed to read request from stdin")?;
        json
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request: {}", path.display()))?
    };
    HttpRequest::from_json_str(&json).context("Invalid request description")
}

fn run(args: Args, stdin: &mut impl Read) -> Result<String> {
    let mut command = Command::new();
    command.set_quote_style(args.quote);

    if let Some(path) = &args.request {
        command.set_request(read_request(path, stdin)?, true);
    }
    if let Some(url) = args.url {
        command.set_url(url);
    }
    for json in &args.options {
        let input = OptionsInput::from_json_str(json)
            .with_context(|| format!("Invalid options: {json}"))?;
        command.add_options(input).context("Invalid options")?;
    }
    if let Some(template) = args.template {
        command.set_template(template);
    }
    if let Some(name) = args.name {
        command.set_name(name);
    }

    Ok(command.build())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let line = run(args, &mut std::io::stdin())?;
    println!("{line}");
    Ok(())
}
