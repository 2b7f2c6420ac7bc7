//! Formloom launcher.
//!
//! Parses arguments, initializes logging and hands the terminal to the TUI.

use anyhow::Result;
use clap::Parser;
use formloom::tui::{self, TuiArgs};
use formloom_logging::{init_logging, LogConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "formloom", about = "Design forms in the terminal", version)]
struct Cli {
    /// Mirror the full log filter to stderr instead of warnings only
    #[arg(long, short)]
    verbose: bool,

    #[command(flatten)]
    tui: TuiArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig {
        app_name: "formloom",
        verbose: cli.verbose,
        tui_mode: true,
    })?;
    info!("formloom starting");

    tui::run(cli.tui).await
}
