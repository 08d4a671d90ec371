use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::models::{Application, ApplicationComponent};

/// Render a colored terminal report of the imported inventory.
pub fn render(application: &Application, verbose: bool, quiet: bool) -> Result<()> {
    let total = application.components.len();

    if quiet {
        println!(
            "Application: {}  Components: {}",
            application.name,
            total.to_string().green(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "license-importr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        " Application: {} {}\n",
        application.name.bold(),
        application.release
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total components  : {}", total));
    println!(
        " │  {:<48} │",
        format!("Declared licenses : {}", summarize_licenses(&application.components))
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if total > 0 {
        render_table(&application.components, verbose);
        println!();
    }

    Ok(())
}

fn render_table(components: &[ApplicationComponent], verbose: bool) {
    let mut table = Table::new();
    let mut header = vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Version").add_attribute(Attribute::Bold),
        Cell::new("License").add_attribute(Attribute::Bold),
        Cell::new("Package URL").add_attribute(Attribute::Bold),
        Cell::new("Repository").add_attribute(Attribute::Bold),
    ];
    if verbose {
        header.push(Cell::new("Homepage").add_attribute(Attribute::Bold));
        header.push(Cell::new("License URL").add_attribute(Attribute::Bold));
    }

    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for component in components {
        let mut row = vec![
            Cell::new(&component.artifact_id),
            Cell::new(&component.version),
            Cell::new(declared_license(component)),
            Cell::new(&component.package_url),
            Cell::new(&component.source_repo_url),
        ];
        if verbose {
            row.push(Cell::new(&component.oss_homepage));
            row.push(Cell::new(license_url(component)));
        }
        table.add_row(row);
    }

    println!("{}", table);
}

/// First declared license of a component, or "unknown" when the source
/// left it blank.
fn declared_license(component: &ApplicationComponent) -> &str {
    component
        .raw_licenses
        .first()
        .map(|l| l.declared_license.as_str())
        .filter(|l| !l.is_empty())
        .unwrap_or("unknown")
}

fn license_url(component: &ApplicationComponent) -> &str {
    component
        .raw_licenses
        .first()
        .map(|l| l.license_url.as_str())
        .unwrap_or("")
}

/// Top declared licenses with counts, e.g. `[MIT (12), ISC (3)]`.
fn summarize_licenses(components: &[ApplicationComponent]) -> String {
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for component in components {
        *counts.entry(declared_license(component)).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        "none".to_string()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
