//! `license-importr` — import package-manager license listings into a
//! normalized component inventory.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the import config ([`config::load_config`]).
//! 3. Build the importer registry ([`importer::ImporterRegistry`]).
//! 4. Import each configured source ([`importer`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (all sources imported) or `1` (any import failed — no
//!    partial inventory is rendered).

mod cli;
mod config;
mod error;
mod importer;
mod models;
mod purl;
mod report;

use std::path::Path;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use config::load_config;
use importer::ImporterRegistry;
use models::Application;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    if config.sources.is_empty() {
        eprintln!("No inventory sources configured for {}", path.display());
        std::process::exit(1);
    }

    // Built once, passed explicitly to the dispatch loop below.
    let registry = ImporterRegistry::with_defaults();

    let mut application = Application::new(
        config.application.name.clone(),
        config.application.release.clone(),
    );

    for source in &config.sources {
        let Some(importer) = registry.get(&source.kind) else {
            bail!(
                "unknown source type '{}' (supported: {})",
                source.kind,
                registry.supported_types().join(", ")
            );
        };

        let source_url = resolve_source(&path, &source.source);
        let outcome = importer.import(
            &source_url,
            &application,
            source.usage,
            &source.repo_type,
            &source.parameters,
        )?;

        if !cli.quiet {
            eprintln!(
                "  {} {}: {}: {} components, {} licenses",
                "→".cyan(),
                source_url,
                application.name,
                outcome.component_count,
                outcome.license_count,
            );
        }

        application.components.extend(outcome.components);
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&application, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&application)?);
        }
    }

    Ok(())
}

/// Resolve a configured source locator against the project path.
///
/// Absolute locators pass through untouched (keeping any `file:` prefix
/// for the importer to strip); relative ones are joined to the project
/// path.
fn resolve_source(project_path: &Path, source: &str) -> String {
    let raw = source.strip_prefix("file:").unwrap_or(source);
    if Path::new(raw).is_absolute() {
        source.to_string()
    } else {
        project_path.join(raw).display().to_string()
    }
}
