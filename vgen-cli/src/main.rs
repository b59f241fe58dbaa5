//! # vgen
//!
//! Compile `#[vgen("...")]` field annotations into `Validate` implementations.
//!
//! ## Usage
//!
//! ```bash
//! # Generate src/user_vgen.rs from src/user.rs
//! vgen src/user.rs
//!
//! # Write into another directory
//! vgen src/user.rs --output src/generated
//!
//! # Preview without writing
//! vgen src/user.rs --dry-run
//!
//! # Fail (exit code 2) if the generated file is missing or stale
//! vgen src/user.rs --check
//!
//! # Create vgen.toml
//! vgen init
//! ```

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use vgen_cli::{
    config::{CliArgs, ConfigManager, CONFIG_FILENAME},
    error::{CliError, CliResult},
    generator::ValidatorGenerator,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser, Debug)]
#[command(name = "vgen")]
#[command(
    author,
    version,
    about = "Generate validators from #[vgen(...)] field annotations",
    long_about = None
)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Rust source file with annotated structs
    #[arg(value_name = "FILE", required = true)]
    file: Option<PathBuf>,

    /// Directory for the generated file (default: next to FILE)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the generated code instead of writing it
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Verify the generated file is up to date without writing
    #[arg(long)]
    check: bool,

    /// Omit the "Code generated by vgen" header
    #[arg(long)]
    no_header: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new vgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Log to stderr at a level picked by `-v`, unless `RUST_LOG` is set.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    match (cli.command, cli.generate.file.clone()) {
        (Some(Commands::Init { output, force }), _) => cmd_init(&output, force),
        (None, Some(file)) => cmd_generate(&file, &cli.generate),
        (None, None) => Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a source FILE is required",
            )
            .exit(),
    }
}

/// Generate command implementation.
fn cmd_generate(file: &Path, args: &GenerateArgs) -> CliResult<()> {
    let config = ConfigManager::load(args.config.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output: args.output.clone(),
            no_header: args.no_header,
        },
    );
    config.validate()?;

    let generator = ValidatorGenerator::new(config);
    let artifact = generator.generate(file)?;

    if artifact.is_empty() {
        println!(
            "{} No #[vgen] annotations found in {}",
            "Warning:".yellow(),
            file.display()
        );
        if args.check {
            generator.ensure_up_to_date(&artifact)?;
        }
        return Ok(());
    }

    tracing::info!(structs = ?artifact.structs, "compiled validators");

    if args.check {
        generator.ensure_up_to_date(&artifact)?;
        println!(
            "{} {} is up to date",
            "✓".green(),
            artifact.path.display()
        );
        return Ok(());
    }

    let writer = FileWriter::new(args.dry_run);

    match writer.write(&artifact.path, &artifact.content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Successfully generated validator for {}",
                "✓".green(),
                file.display()
            );
            println!(
                "  {} validator(s), {} bytes written to {}",
                artifact.structs.len().to_string().green(),
                bytes,
                path.display()
            );
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: &Path, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(CliError::AlreadyExists {
            path: output.to_path_buf(),
        });
    }

    FileWriter::new(false).write(output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
