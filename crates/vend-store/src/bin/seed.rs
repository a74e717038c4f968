//! # Stock File Seeder
//!
//! Writes the default stock snapshot to the store file, so a machine can
//! be provisioned (or reset) without running the full app.
//!
//! ## Usage
//! ```bash
//! # Seed the default location (./data/vinyl-vend-stock.json)
//! cargo run -p vend-store --bin seed
//!
//! # Custom directory and namespace
//! cargo run -p vend-store --bin seed -- --dir /var/lib/vend --namespace kiosk-7
//!
//! # Overwrite an existing stock file
//! cargo run -p vend-store --bin seed -- --force
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use vend_core::catalog::default_catalog;
use vend_store::{JsonFileStore, StockSnapshot, StockStore, StoreConfig};

/// Parsed command line.
#[derive(Debug)]
enum SeedArgs {
    Run { config: StoreConfig, force: bool },
    Help,
}

/// Strict parser: unknown flags and flags missing their value are errors,
/// never silent fallbacks to defaults.
fn parse_args(args: &[String]) -> Result<SeedArgs, String> {
    let mut config = StoreConfig::default();
    let mut force = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("-d" | "--dir") => {
                i += 1;
                match args.get(i) {
                    Some(value) => config.dir = PathBuf::from(value),
                    None => return Err(format!("Missing value for {flag} (try --help)")),
                }
            }
            flag @ ("-n" | "--namespace") => {
                i += 1;
                match args.get(i) {
                    Some(value) => config.namespace = value.clone(),
                    None => return Err(format!("Missing value for {flag} (try --help)")),
                }
            }
            "-f" | "--force" => force = true,
            "-h" | "--help" => return Ok(SeedArgs::Help),
            other => return Err(format!("Unknown argument: {other} (try --help)")),
        }
        i += 1;
    }

    Ok(SeedArgs::Run { config, force })
}

fn print_help() {
    println!("Vinyl Vend Stock Seeder");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --dir <PATH>        Directory for the stock file (default: ./data)");
    println!("  -n, --namespace <NAME>  Key prefix for the stock file (default: vinyl-vend)");
    println!("  -f, --force             Overwrite an existing stock file");
    println!("  -h, --help              Show this help message");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (config, force) = match parse_args(&args) {
        Ok(SeedArgs::Run { config, force }) => (config, force),
        Ok(SeedArgs::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let store = JsonFileStore::new(&config);
    println!("Vinyl Vend Stock Seeder");
    println!("=======================");
    println!("Stock file: {}", store.path().display());
    println!();

    match store.read_all() {
        Ok(Some(existing)) if !force => {
            println!("Stock file already exists ({} items).", existing.len());
            println!("Use --force to overwrite with catalog defaults.");
            return ExitCode::SUCCESS;
        }
        Ok(_) => {}
        Err(err) => {
            // Malformed file: seeding over it is exactly what --force is for
            println!("Existing stock file is unreadable: {err}");
            if !force {
                println!("Use --force to overwrite it with catalog defaults.");
                return ExitCode::FAILURE;
            }
        }
    }

    let catalog = default_catalog();
    let snapshot: StockSnapshot = catalog
        .items()
        .iter()
        .map(|item| (item.id.clone(), item.default_stock))
        .collect();

    if let Err(err) = store.write_all(&snapshot) {
        eprintln!("Failed to write stock file: {err}");
        return ExitCode::FAILURE;
    }

    println!("Seeded {} items with default stock.", snapshot.len());
    ExitCode::SUCCESS
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = parse_args(&args(&[])).unwrap();
        let SeedArgs::Run { config, force } = parsed else {
            panic!("expected a run");
        };
        assert_eq!(config.namespace, "vinyl-vend");
        assert!(!force);
    }

    #[test]
    fn test_parse_flags_with_values() {
        let parsed = parse_args(&args(&["--dir", "/tmp/vend", "-n", "kiosk-7", "-f"])).unwrap();
        let SeedArgs::Run { config, force } = parsed else {
            panic!("expected a run");
        };
        assert_eq!(config.dir, PathBuf::from("/tmp/vend"));
        assert_eq!(config.namespace, "kiosk-7");
        assert!(force);
    }

    #[test]
    fn test_parse_rejects_missing_value() {
        let err = parse_args(&args(&["--dir"])).unwrap_err();
        assert!(err.contains("Missing value for --dir"));

        let err = parse_args(&args(&["--force", "-n"])).unwrap_err();
        assert!(err.contains("Missing value for -n"));
    }

    #[test]
    fn test_parse_rejects_unknown_argument() {
        let err = parse_args(&args(&["--wipe-everything"])).unwrap_err();
        assert!(err.contains("Unknown argument: --wipe-everything"));
    }
}
