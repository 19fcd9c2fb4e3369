mod analytics;
mod api;
mod config;
mod error;
mod svg;

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::analytics::{
    build_chart, current_month_key, set_paid, summarize, validate_month_key, CompanyTotal,
    EarningsPoint, Summary,
};
use crate::api::ApiClient;
use crate::config::{config_dir, load_config, resolve_output_dir, Config, CONFIG_TEMPLATE};
use crate::error::{AnalyticsError, Result};

#[derive(Parser)]
#[command(name = "earnings")]
#[command(version, about = "CLI analytics client for a contractor invoicing backend", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.earnings or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config file
    Init,

    /// Show company balances and the earnings summary for a month
    Overview {
        /// Month to inspect in YYYY-MM format (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Render the earnings trend chart as an SVG file
    Chart {
        /// Read the earnings series from a local JSON file instead of the API
        #[arg(long)]
        input: Option<PathBuf>,

        /// Custom output file path (default: output_dir/earnings-YYYY-MM-DD.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mark a company's monthly total as paid
    MarkPaid {
        /// Company name as listed in the overview
        company: String,

        /// Month in YYYY-MM format (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Mark a company's monthly total as unpaid
    MarkUnpaid {
        /// Company name as listed in the overview
        company: String,

        /// Month in YYYY-MM format (default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show configuration information
    Status,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Overview { month } => cmd_overview(&cfg_dir, month),
        Commands::Chart { input, output } => cmd_chart(&cfg_dir, input, output),
        Commands::MarkPaid { company, month } => cmd_mark_paid(&cfg_dir, &company, month, true),
        Commands::MarkUnpaid { company, month } => cmd_mark_paid(&cfg_dir, &company, month, false),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with a template config file
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    if cfg_dir.exists() {
        return Err(AnalyticsError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized earnings config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point the client at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Check company balances:            earnings overview");
    println!("  3. Render the earnings trend:         earnings chart");

    Ok(())
}

// Table row struct for tabled
#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "COMPANY")]
    company: String,
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

fn format_amount(value: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, value)
}

/// Append a merged financial footer (TOTAL / PAID / OUTSTANDING) to a
/// rendered balances table. The COMPANY and MONTH columns are merged into
/// one label cell, the AMOUNT column carries the figures and the STATUS
/// column is closed off.
fn add_summary_footer(table: &str, total: &str, paid: &str, outstanding: &str) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() < 4 {
        return table.to_string();
    }

    let left_width = widths[0] + widths[1] + 1; // +1 for the ┴ replaced by a space
    let amount_width = widths[2];
    let status_width = widths[3];

    let rows = [
        ("TOTAL", total),
        ("(-) PAID", paid),
        ("(=) OUTSTANDING", outstanding),
    ];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    // First separator: merge COMPANY and MONTH, keep AMOUNT, close off STATUS
    out.push_str(&format!(
        "├{}┴{}┼{}┼{}╯\n",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(amount_width),
        "─".repeat(status_width),
    ));

    // Summary rows with separators between them
    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>amount$} │\n",
            label,
            value,
            left = left_width - 2,
            amount = amount_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(amount_width)
            ));
        }
    }

    // Bottom border
    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(amount_width)
    ));

    out
}

/// Render the balances table with its financial footer.
fn balances_table(totals: &[CompanyTotal], summary: &Summary, currency_symbol: &str) -> String {
    let rows: Vec<BalanceRow> = totals
        .iter()
        .map(|t| BalanceRow {
            company: t.company.clone(),
            month: t.month_key.clone(),
            amount: format_amount(t.total_amount, currency_symbol),
            status: if t.paid { "PAID" } else { "UNPAID" }.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    add_summary_footer(
        &table,
        &format_amount(summary.total, currency_symbol),
        &format_amount(summary.paid, currency_symbol),
        &format_amount(summary.outstanding, currency_symbol),
    )
}

/// Print the most recent six months of the earnings series with their
/// literal amounts.
fn print_legend(earnings: &[EarningsPoint], currency_symbol: &str) {
    let mut ordered: Vec<&EarningsPoint> = earnings.iter().collect();
    ordered.sort_by(|a, b| a.month_key.cmp(&b.month_key));

    let recent = &ordered[ordered.len().saturating_sub(6)..];
    for point in recent {
        println!(
            "  {}: {}",
            point.month_key,
            format_amount(point.total_amount, currency_symbol)
        );
    }
}

fn resolve_month(month: Option<String>) -> Result<String> {
    let month = month.unwrap_or_else(current_month_key);
    validate_month_key(&month)?;
    Ok(month)
}

fn load_config_checked(cfg_dir: &PathBuf) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(AnalyticsError::ConfigNotFound(cfg_dir.clone()));
    }
    load_config(cfg_dir)
}

/// Show company balances and the earnings summary for a month
fn cmd_overview(cfg_dir: &PathBuf, month: Option<String>) -> Result<()> {
    let config = load_config_checked(cfg_dir)?;
    let month = resolve_month(month)?;

    let client = ApiClient::new(&config.api);
    let snapshot = client.fetch_snapshot(&month)?;
    let symbol = &config.display.currency_symbol;

    println!("Analytics for {month}");
    println!();

    if snapshot.totals.is_empty() {
        println!("No invoices for this month.");
    } else {
        let summary = snapshot.summary();
        println!("{}", balances_table(&snapshot.totals, &summary, symbol));
    }

    println!();
    if snapshot.earnings.is_empty() {
        println!("No earnings recorded yet.");
    } else {
        println!("Earnings over time (last 6 months):");
        print_legend(&snapshot.earnings, symbol);
    }

    Ok(())
}

/// Render the earnings trend chart as an SVG file
fn cmd_chart(cfg_dir: &PathBuf, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = load_config_checked(cfg_dir)?;

    let earnings: Vec<EarningsPoint> = match input {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ApiClient::new(&config.api).earnings()?,
    };

    if earnings.is_empty() {
        println!("No invoice data yet.");
        return Ok(());
    }

    let geometry = build_chart(&earnings, config.chart.canvas())?;
    let document = svg::render_chart(&geometry);

    let svg_path = match output {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&config.chart.output_dir, cfg_dir);
            fs::create_dir_all(&output_dir)?;
            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            output_dir.join(format!("earnings-{today}.svg"))
        }
    };
    fs::write(&svg_path, document)?;

    println!("Rendered earnings chart ({} months)", earnings.len());
    print_legend(&earnings, &config.display.currency_symbol);
    println!("  Saved: {}", svg_path.display());

    Ok(())
}

/// Toggle the paid flag for one company's monthly total.
///
/// The flag is applied to the locally held rows only after the backend
/// confirms the change, so a failed request leaves the displayed state as
/// it was fetched.
fn cmd_mark_paid(
    cfg_dir: &PathBuf,
    company: &str,
    month: Option<String>,
    paid: bool,
) -> Result<()> {
    let config = load_config_checked(cfg_dir)?;
    let month = resolve_month(month)?;

    let client = ApiClient::new(&config.api);
    let totals = client.company_totals(&month)?;

    client.mark_paid(company, &month, paid)?;
    let totals = set_paid(&totals, company, paid);

    println!(
        "Marked {} as {} for {}",
        company,
        if paid { "paid" } else { "unpaid" },
        month
    );

    if !totals.is_empty() {
        let summary = summarize(&totals);
        println!();
        println!(
            "{}",
            balances_table(&totals, &summary, &config.display.currency_symbol)
        );
    }

    Ok(())
}

/// Show configuration information
fn cmd_status(cfg_dir: &PathBuf) -> Result<()> {
    let config = load_config_checked(cfg_dir)?;

    println!("Earnings Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("API base URL:     {}", config.api.base_url);
    println!(
        "Auth token:       {}",
        if config.api.token.is_some() {
            "configured"
        } else {
            "not set"
        }
    );
    println!(
        "Chart canvas:     {}x{} ({}px padding)",
        config.chart.width, config.chart.height, config.chart.padding
    );
    println!(
        "Chart output:     {}",
        resolve_output_dir(&config.chart.output_dir, cfg_dir).display()
    );

    Ok(())
}
