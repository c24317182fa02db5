//! Command-line interface.
//!
//! Parses arguments, gathers spec tokens from the command line or from
//! files, merges them into one set and prints it in the requested style.

use crate::collect_specs;
use crate::diagnostics;
use crate::output::{render, OutputStyle};
use crate::processing::{Resolver, SystemResolver};
use clap::builder::BoolishValueParser;
use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::io::{self, Read};

const SPEC_HELP: &str = "Definitions:
  a spec can be any of:
    address
    address:address
    address,address
    address:+address
    address/mask
  an address can be any of:
    N\t\tdecimal number
    0N\t\toctal number
    0xN\t\thex number
    N.N.N.N\tdotted quad
    x:x::x\tIPv6 address
    hostname\tdns domain name
  a mask is the number of bits set to one from the left,
  or an explicit (or Cisco wildcard) mask address";

/// This is netmask, an address netmask generation utility
#[derive(Parser, Debug, Default)]
#[command(name = "netmask", author, version, about, long_about = None, after_help = SPEC_HELP)]
pub struct Cli {
    /// Address specs (or input files with --files)
    pub specs: Vec<String>,

    #[command(flatten)]
    pub style: StyleArgs,

    /// Print status/progress information
    #[arg(short, long, env = "NETMASK_DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,

    /// Disable DNS lookups for addresses
    #[arg(short = 'n', long = "nodns", env = "NETMASK_NODNS", value_parser = BoolishValueParser::new())]
    pub nodns: bool,

    /// Treat arguments as input files ("-" reads stdin)
    #[arg(short, long)]
    pub files: bool,
}

/// Output style flags; at most one may be given.
#[derive(clap::Args, Debug, Default)]
#[group(multiple = false)]
pub struct StyleArgs {
    /// Output address/netmask pairs
    #[arg(short, long)]
    pub standard: bool,

    /// Output CIDR format address lists (default)
    #[arg(short, long)]
    pub cidr: bool,

    /// Output Cisco style address lists
    #[arg(short = 'i', long)]
    pub cisco: bool,

    /// Output ip address ranges
    #[arg(short, long)]
    pub range: bool,

    /// Output address/netmask pairs in hex
    #[arg(short = 'x', long)]
    pub hex: bool,

    /// Output address/netmask pairs in octal
    #[arg(short, long)]
    pub octal: bool,

    /// Output address/netmask pairs in binary
    #[arg(short, long)]
    pub binary: bool,

    /// Output the address list as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl StyleArgs {
    /// The selected style, CIDR when no flag is given.
    pub fn output_style(&self) -> OutputStyle {
        [
            (self.standard, OutputStyle::Standard),
            (self.cisco, OutputStyle::Cisco),
            (self.range, OutputStyle::Range),
            (self.hex, OutputStyle::Hex),
            (self.octal, OutputStyle::Octal),
            (self.binary, OutputStyle::Binary),
            (self.json, OutputStyle::Json),
        ]
        .into_iter()
        .find(|(set, _)| *set)
        .map(|(_, style)| style)
        .unwrap_or_default()
    }
}

/// Run one batch: gather tokens, merge them and print the result.
pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.specs.is_empty() {
        eprintln!("Try 'netmask --help' for more information.");
    }

    let system = SystemResolver;
    let resolver: Option<&dyn Resolver> = if cli.nodns { None } else { Some(&system) };

    let tokens = if cli.files {
        read_tokens_from_files(&cli.specs)
    } else {
        cli.specs.clone()
    };
    log::debug!("processing {} spec token(s)", tokens.len());

    let set = collect_specs(tokens.iter().map(String::as_str), resolver);

    let lines = match render(&set, cli.style.output_style()) {
        Ok(lines) => lines,
        Err(e) if e.is_fatal() => diagnostics::fatal(&e.to_string()),
        Err(e) => return Err(e.into()),
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Whitespace-separated tokens from every readable file, in order.
///
/// An unreadable file is reported and skipped.
pub fn read_tokens_from_files(paths: &[String]) -> Vec<String> {
    let mut tokens = Vec::new();
    for path in paths {
        match read_input(path) {
            Ok(content) => tokens.extend(content.split_whitespace().map(str::to_string)),
            Err(e) => log::error!("Failed to open file: {}: {}", path.on_red(), e),
        }
    }
    tokens
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
    }
}
