//! reqbump - Format-preserving version requirement rewriter CLI
//!
//! Subcommands:
//! - `rewrite`: rewrite one requirement to admit a target version
//! - `compare`: order two versions
//! - `satisfies`: check a version against a requirement
//! - `batch`: rewrite a JSON array of requirement records

use anyhow::Context;
use clap::Parser;
use reqbump::cli::{CliArgs, Command};
use reqbump::config::{FileConfig, Settings};
use reqbump::domain::{Requirement, RewriteResult};
use reqbump::grammar::get_profile;
use reqbump::output::{create_formatter, OutputConfig, RewriteReport};
use reqbump::requirement::RequirementSet;
use reqbump::update::{RequirementRewriter, RequirementsUpdater};
use reqbump::version::Version;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

fn initialize_logger(args: &CliArgs) -> anyhow::Result<()> {
    let filter = if args.quiet {
        simplelog::LevelFilter::Off
    } else if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Warn
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("reqbump")
        .build();

    let color = if args.no_color {
        simplelog::ColorChoice::Never
    } else {
        simplelog::ColorChoice::Auto
    };

    simplelog::TermLogger::init(filter, config, simplelog::TerminalMode::Stderr, color)
        .context("failed to initialize logger")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    initialize_logger(&args)?;
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let file_config = FileConfig::discover(args.config.as_deref(), &cwd)?;
    let settings = Settings::resolve(args.ecosystem, args.strategy, &file_config)?;
    let profile = get_profile(settings.ecosystem);

    let output_config =
        OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.use_color());
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();

    let exit_code = match &args.command {
        Command::Rewrite {
            requirement,
            target,
        } => {
            let target_version = Version::parse(target, profile)?;
            let rewriter = RequirementRewriter::new(profile, settings.strategy);
            let result = rewriter.rewrite_str(requirement, &target_version)?;
            let report = RewriteReport {
                ecosystem: settings.ecosystem,
                strategy: settings.strategy,
                requirement,
                target,
                result: &result,
            };
            formatter.format_rewrite(&report, &mut stdout)?;
            if result == RewriteResult::Unfixable {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Command::Compare { left, right } => {
            let left_version = Version::parse(left, profile)?;
            let right_version = Version::parse(right, profile)?;
            let ordering = left_version.cmp(&right_version);
            formatter.format_comparison(left, right, ordering, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Command::Satisfies {
            requirement,
            version,
        } => {
            let set = RequirementSet::parse(requirement, profile)?;
            let candidate = Version::parse(version, profile)?;
            let satisfied = set.is_satisfied_by(&candidate);
            formatter.format_satisfaction(requirement, version, satisfied, &mut stdout)?;
            if satisfied {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::Batch {
            input,
            target,
            updated_source,
        } => {
            let records = read_records(input)?;
            let target_version = target
                .as_deref()
                .map(|t| Version::parse(t, profile))
                .transpose()?;

            let rewriter = RequirementRewriter::new(profile, settings.strategy);
            let mut updater = RequirementsUpdater::new(rewriter, target_version);
            if let Some(source) = updated_source {
                let source: serde_json::Value = serde_json::from_str(source)
                    .context("--updated-source must be a JSON value")?;
                updater = updater.with_updated_source(source);
            }

            let updates = updater.updated_requirements(&records);
            formatter.format_batch(&records, &updates, &mut stdout)?;

            if updates.iter().any(|u| u.is_error() || u.is_unfixable()) {
                // Partial success - some records could not be rewritten
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
    };

    stdout.flush()?;
    Ok(exit_code)
}

/// Read a JSON array of records from a file, or from stdin for "-"
fn read_records(input: &str) -> anyhow::Result<Vec<Requirement>> {
    let content = if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read records from stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("invalid requirement records in {}", input))
}
