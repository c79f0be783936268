//! GitHub Dashboard - CSV Repository Analysis & Interactive Chart Viewer

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use github_dashboard::charts::Selection;
use github_dashboard::config::Config;
use github_dashboard::data::LanguageFilter;
use github_dashboard::gui::DashboardApp;
use github_dashboard::{headless, telemetry};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "github-dashboard")]
#[command(about = "Interactive dashboard over a CSV of GitHub repository metadata")]
struct Cli {
    /// Path to the repository CSV
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Configuration file (defaults to ./github-dashboard.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Entries shown in each ranking
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Initial language filter ("All" for no filter)
    #[arg(short, long, default_value = "All")]
    language: LanguageFilter,

    /// Print the dashboard model as JSON instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Run in verbose mode
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.data {
        config.data.path = path;
    }
    if let Some(top_n) = cli.top_n {
        config.display.top_n = top_n;
    }
    config.validate()?;

    let selection = Selection {
        language: cli.language,
        top_n: config.display.top_n,
        table_rows: config.display.table_rows,
    };

    if cli.headless {
        return run_headless(&config, &selection);
    }

    tracing::info!(path = %config.data.path.display(), "Starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("GitHub Projects Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "GitHub Projects Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config, selection)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

fn run_headless(config: &Config, selection: &Selection) -> anyhow::Result<()> {
    let json = headless::render_json(config, selection)?;
    println!("{json}");
    Ok(())
}
