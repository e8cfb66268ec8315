//! Tarief CLI - evaluate invoice templates from the command line

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tarief::prelude::*;
use tarief::{eval_arithmetic, recompute_line, TemplateIssue};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tarief")]
#[command(
    author,
    version,
    about = "Evaluate invoice templates, lines and time-entry imports"
)]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

/// Settings that override the template's own values
#[derive(Args)]
struct Overrides {
    /// VAT percentage (0-100)
    #[arg(long, global = true, env = "TARIEF_VAT")]
    vat: Option<f64>,

    /// Hourly rate (uurtarief)
    #[arg(long, global = true, env = "TARIEF_HOURLY_RATE")]
    hourly_rate: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an arithmetic expression (invalid input prints 0)
    Eval {
        /// Expression using numbers, + - * / and parentheses
        expression: String,
    },

    /// Report problems in a template; exits non-zero when any are found
    Check {
        /// Template JSON file
        template: PathBuf,
    },

    /// Recompute lines and print their totals
    Totals {
        /// Template JSON file
        template: PathBuf,

        /// Lines JSON file (array of lines)
        lines: PathBuf,
    },

    /// Import time entries as invoice lines
    Import {
        /// Template JSON file
        template: PathBuf,

        /// Time entries JSON file (array of entries)
        entries: PathBuf,

        /// Skip the kilometer and DOT surcharge lines
        #[arg(long)]
        no_summary: bool,
    },
}

/// Totals with the rows the template chooses to display
#[derive(Serialize)]
struct TotalsReport {
    #[serde(flatten)]
    totals: Totals,
    rows: Vec<TotalsRow>,
}

#[derive(Serialize)]
struct TotalsRow {
    label: String,
    amount: f64,
}

#[derive(Serialize)]
struct Report {
    lines: Vec<Line>,
    totals: TotalsReport,
}

fn totals_report(template: &Template, lines: &[Line]) -> TotalsReport {
    let totals = template.totals(lines).rounded();
    let rows = totals
        .display_rows(&template.totals)
        .into_iter()
        .map(|(label, amount)| TotalsRow { label, amount })
        .collect();
    TotalsReport { totals, rows }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { expression } => {
            println!("{}", eval_arithmetic(&expression));
            Ok(())
        }
        Commands::Check { template } => check(&load_template(&template, &cli.overrides)?),
        Commands::Totals { template, lines } => {
            totals(&load_template(&template, &cli.overrides)?, &lines)
        }
        Commands::Import {
            template,
            entries,
            no_summary,
        } => import(
            &load_template(&template, &cli.overrides)?,
            &entries,
            no_summary,
        ),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse '{}'", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn load_template(path: &Path, overrides: &Overrides) -> Result<Template> {
    let mut template: Template = read_json(path)?;

    if let Some(vat) = overrides.vat {
        let config = TotalsConfig::with_vat(vat).context("Invalid --vat")?;
        template.totals.vat_percentage = config.vat_percentage;
    }
    if let Some(rate) = overrides.hourly_rate {
        template.defaults.hourly_rate = rate;
    }

    tracing::debug!(
        template = %template.id,
        columns = template.columns.len(),
        "loaded template"
    );
    Ok(template)
}

fn check(template: &Template) -> Result<()> {
    let issues: Vec<TemplateIssue> = template.issues();
    if issues.is_empty() {
        println!("Template '{}' is valid", template.id);
        return Ok(());
    }

    for issue in &issues {
        println!("{}", issue);
    }
    bail!("Template '{}' has {} issue(s)", template.id, issues.len())
}

fn totals(template: &Template, lines_path: &Path) -> Result<()> {
    let lines: Vec<Line> = read_json(lines_path)?;
    let lines: Vec<Line> = lines
        .iter()
        .map(|line| recompute_line(line, &template.columns, &template.defaults))
        .collect();

    print_json(&totals_report(template, &lines))
}

fn import(template: &Template, entries_path: &Path, no_summary: bool) -> Result<()> {
    let entries: Vec<TimeEntry> = read_json(entries_path)?;

    let lines = if no_summary {
        entries
            .iter()
            .map(|entry| import_from_source(entry, &template.columns, &template.defaults))
            .collect()
    } else {
        template.import(&entries)
    };

    let totals = totals_report(template, &lines);
    print_json(&Report { lines, totals })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_report_honors_display_flags() {
        let mut template = Template::new(
            "t",
            "T",
            vec![Column::new("bedrag", "Bedrag", ColumnType::Price)],
        );
        template.totals.show_subtotal = false;
        let mut line = Line::new();
        line.set("Bedrag", 100.0);

        let report = totals_report(&template, &[line]);
        assert_eq!(report.totals.total, 121.0);
        let labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["BTW 21%", "Totaal"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["subtotal"], 100.0);
        assert_eq!(json["rows"][0]["amount"], 21.0);
    }
}
