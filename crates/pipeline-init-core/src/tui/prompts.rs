//! Interactive manual-config flow built on cliclack prompts

use crate::detector::{scan, Detector};
use crate::options::Interaction;
use crate::output::{write_to_file, Format};
use crate::synth::synthesize;
use crate::walk::{resolve, SelectionStrategy};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "_defaults";

/// Sentinel select item for typing a value not on the list.
const MANUAL_ITEM: &str = "<manual>";

/// CLI arguments for the manual-config command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Directory to write results into (default: ./_defaults)
    pub output_dir: Option<PathBuf>,

    /// Output format name (yaml or json)
    pub format: Option<String>,

    /// CI mode: save the aggregate scan result without asking anything
    pub ci: bool,
}

/// Selection strategy backed by live terminal prompts.
pub struct InteractiveStrategy;

impl SelectionStrategy for InteractiveStrategy {
    fn select(
        &mut self,
        title: &str,
        interaction: Interaction,
        candidates: &[String],
    ) -> Result<String> {
        match interaction {
            Interaction::Selector => {
                // A sole option is not worth a question.
                if candidates.len() == 1 {
                    let sole = candidates[0].clone();
                    cliclack::log::info(format!("{}: {}", title, sole))?;
                    return Ok(sole);
                }

                let mut select = cliclack::select(title);
                for value in candidates {
                    select = select.item(value.clone(), value, "");
                }
                Ok(select.interact()?)
            }
            Interaction::OptionalSelector => {
                let mut select = cliclack::select(title);
                for value in candidates {
                    select = select.item(value.clone(), value, "");
                }
                select = select.item(MANUAL_ITEM.to_string(), "Other", "type a value manually");

                let choice = select.interact()?;
                if choice != MANUAL_ITEM {
                    return Ok(choice);
                }
                let input: String = cliclack::input(title)
                    .validate(|value: &String| {
                        if value.trim().is_empty() {
                            Err("a value is required")
                        } else {
                            Ok(())
                        }
                    })
                    .interact()?;
                Ok(input)
            }
            Interaction::UserInput => {
                let mut input = cliclack::input(title);
                if let Some(hint) = candidates.first() {
                    input = input.placeholder(hint);
                }
                let value: String = input
                    .validate(|value: &String| {
                        if value.trim().is_empty() {
                            Err("a value is required")
                        } else {
                            Ok(())
                        }
                    })
                    .interact()?;
                Ok(value)
            }
            Interaction::OptionalUserInput => {
                // Empty submission is permitted here.
                let mut input = cliclack::input(title).default_input("");
                if let Some(hint) = candidates.first() {
                    input = input.placeholder(hint);
                }
                let value: String = input.interact()?;
                Ok(value)
            }
        }
    }
}

/// Run the manual-config flow: scan all detectors, then either save the
/// aggregate result (CI mode) or walk each detector's tree with live
/// prompts and write one synthesized config per detector.
pub fn run(detectors: &[Box<dyn Detector>], args: InitArgs) -> Result<()> {
    cliclack::intro("pipeline-init")?;

    let output_dir = resolve_output_dir(&args)?;
    let format: Format = match &args.format {
        Some(name) => name.parse()?,
        None => Format::default(),
    };

    if args.ci {
        cliclack::log::info("CI mode")?;
    }
    cliclack::log::info(format!("Output dir: {}", output_dir.display()))?;
    cliclack::log::info(format!("Output format: {}", format))?;

    let result = scan(detectors)?;

    if args.ci {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("failed to create {}", output_dir.display()))?;

        let path = write_to_file(&result, format, &output_dir.join("result"))?;
        cliclack::log::success(format!(
            "Scan result: {}",
            path.display().to_string().blue()
        ))?;
        cliclack::outro("Saved scan result")?;
        return Ok(());
    }

    cliclack::log::info("Collecting inputs:")?;

    for (name, options) in &result.options {
        cliclack::log::info(format!("Detector: {}", name.blue()))?;

        // Recreate this detector's output directory from scratch.
        let detector_dir = output_dir.join(name);
        if detector_dir.exists() {
            std::fs::remove_dir_all(&detector_dir)
                .with_context(|| format!("failed to clean up {}", detector_dir.display()))?;
        }
        std::fs::create_dir_all(&detector_dir)
            .with_context(|| format!("failed to create {}", detector_dir.display()))?;

        let selection = resolve(options, &mut InteractiveStrategy)
            .with_context(|| format!("failed to resolve options for detector '{}'", name))?;

        let configs = result
            .configs
            .get(name)
            .with_context(|| format!("no config map for detector '{}'", name))?;
        let document = synthesize(&selection.config_name, configs, &selection.assignments)
            .with_context(|| format!("failed to synthesize config for detector '{}'", name))?;

        let path = write_to_file(
            &document,
            format,
            &detector_dir.join(&selection.config_name),
        )?;
        cliclack::log::success(format!(
            "Pipeline config: {}",
            path.display().to_string().blue()
        ))?;
    }

    cliclack::outro("All configs saved")?;
    Ok(())
}

fn resolve_output_dir(args: &InitArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().context("failed to get current directory")?;
    let dir = match &args.output_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir.join(DEFAULT_OUTPUT_DIR),
    };
    Ok(dir)
}
