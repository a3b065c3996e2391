//! pipeline-init CLI - Generate CI pipeline config templates

use anyhow::Result;
use clap::{Parser, Subcommand};
use pipeline_init_core::tui::InitArgs;
use pipeline_init_core::{CustomDetector, Detector};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pipeline-init")]
#[command(about = "Generate CI pipeline config templates from selectable option trees")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect configuration answers interactively and write the
    /// resulting pipeline configs (or the raw scan result in CI mode)
    ManualConfig(CliInitArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Directory to write results into (default: ./_defaults)
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Output format: yaml or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Save the aggregate scan result without asking anything
    #[arg(long)]
    pub ci: bool,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            output_dir: args.output_dir,
            format: args.format,
            ci: args.ci,
        }
    }
}

/// Every detector a run consults, in scan order.
fn detectors() -> Vec<Box<dyn Detector>> {
    vec![Box::new(CustomDetector)]
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let init_args = match args.command {
        Some(Command::ManualConfig(cli_args)) => cli_args.into(),
        // No subcommand provided, default to the interactive flow
        None => InitArgs::default(),
    };

    let result = pipeline_init_core::run(&detectors(), init_args);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
