mod cli;

use cinemabin::{
    config,
    sync::{self, SyncOptions},
};

use anyhow::Result;
use cb_core::Column;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cinemabin=trace,cb_parser=trace,cb_reconcile=trace".to_string()
        } else {
            "cinemabin=info,cb_reconcile=info".to_string()
        }
    });

    // Logs go to stderr so that JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sync {
            library,
            remote,
            output,
            dry_run,
        } => run_sync(
            cli.config.as_deref(),
            library,
            remote,
            output,
            SyncOptions { dry_run },
        ),
        Commands::Parse { filenames, json } => parse_filenames(&filenames, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("cinemabin {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_sync(
    config_path: Option<&Path>,
    library: Option<PathBuf>,
    remote: Option<PathBuf>,
    output: Option<PathBuf>,
    options: SyncOptions,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Command-line paths win over the config file
    if let Some(library) = library {
        config.library.root = Some(library);
    }
    if let Some(remote) = remote {
        config.remote.path = remote;
    }
    if let Some(output) = output {
        config.output.path = output;
    }
    config::validate_config(&config)?;

    let summary = match sync::run(&config, &options) {
        Ok(summary) => summary,
        Err(e) => {
            let library_fault = e
                .downcast_ref::<cb_core::Error>()
                .is_some_and(cb_core::Error::is_library_fault);
            if library_fault {
                eprintln!("The library needs attention: rename or remove the folder, then run sync again.");
            }
            return Err(e);
        }
    };

    if options.dry_run {
        println!("[DRY RUN] Nothing was written");
    }
    println!("Remote rows: {}", summary.remote_rows);
    println!(
        "Local files: {} ({} movies, {} ignored)",
        summary.local_files, summary.local_movies, summary.ignored_files
    );
    println!("Added: {}", summary.report.added.len());
    println!("Updated: {}", summary.report.updated.len());
    println!("Total rows: {}", summary.total_rows);
    if let Some(ref backup) = summary.backup {
        println!("Backup: {}", backup.display());
    }
    if let Some(ref output) = summary.output {
        println!("Output: {}", output.display());
    }

    println!("{}", summary.report.to_json_pretty()?);

    Ok(())
}

fn parse_filenames(filenames: &[String], json: bool) -> Result<()> {
    let records: Vec<_> = filenames.iter().map(|f| cb_parser::parse_file(f)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for column in Column::ALL {
            let value = record.get(column);
            if !value.is_empty() {
                println!("{}: {}", column.header(), value);
            }
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            config::validate_config(&config)?;
            config
        }
    };

    println!("✓ Configuration is valid");
    match config.library.root {
        Some(ref root) => println!("  Library root: {}", root.display()),
        None => println!("  Library root: (not set)"),
    }
    println!("  Grouping depth: {}", config.library.grouping_depth);
    println!(
        "  Video extensions: {}",
        config.library.video_extensions.join(", ")
    );
    println!(
        "  Subtitle extensions: {}",
        config.library.subtitle_extensions.join(", ")
    );
    println!("  Remote table: {}", config.remote.path.display());
    println!("  Output table: {}", config.output.path.display());
    println!("  Backup dir: {}", config.output.backup_dir.display());

    Ok(())
}
