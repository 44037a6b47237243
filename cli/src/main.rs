use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wayfinder_core::{
    init_logging_with, validate_address, AddressResolver, Config, FileSystemProbe,
    LocalFileSystem, UpNavigator,
};

#[derive(Parser, Debug)]
#[command(name = "wayfinder")]
#[command(about = "Resolve file-browser addresses and inspect their breadcrumbs")]
#[command(
    long_about = "Resolve file-browser addresses and inspect their breadcrumbs.\n\n\
                  Local addresses use Windows-style `\\` separators (`C:\\Users\\me`, \
                  `\\\\server\\share`). A Unix path such as `/tmp/x` is a single component."
)]
struct Args {
    /// Enable debug logging
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the location an address resolves to
    Resolve {
        address: String,
        /// Reject malformed archive and search addresses instead of coercing them
        #[arg(long, default_value_t = false)]
        strict: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the breadcrumb trail of an address
    Crumbs {
        address: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the parent of an address, checked against the local filesystem
    ///
    /// Only `\` separates local path components, so `/tmp/x` has no parent.
    Up { address: String },
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let resolver = AddressResolver::new();

    match args.command {
        Command::Resolve {
            address,
            strict,
            json,
        } => {
            if strict {
                validate_address(&address).context("invalid address")?;
            }
            let location = resolver.resolve(&address);
            if json {
                println!("{}", serde_json::to_string_pretty(&location)?);
            } else {
                println!("{}\t{}", location.kind(), location.address());
            }
        }
        Command::Crumbs { address, json } => {
            let location = resolver.resolve(&address);
            let layout = config.breadcrumb_builder().layout(&location);
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                println!("{}", layout.render());
            }
        }
        Command::Up { address } => {
            let location = resolver.resolve(&address);
            let probe = LocalFileSystem;
            match UpNavigator::new().up(&location, |p| probe.dir_exists(p)) {
                Some(parent) => println!("{}", parent.address()),
                None => bail!("no parent for {}", location.address()),
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging_with(if args.verbose { "debug" } else { "warn" });
    tracing::debug!(command = ?args.command, "Starting");
    run(args)
}
