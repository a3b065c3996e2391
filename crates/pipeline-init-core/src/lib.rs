//! Pipeline Init Core - Option tree elicitation for CI pipeline configs
//!
//! This library turns a set of project detectors into concrete CI
//! pipeline configuration documents. Each detector hands over a
//! selectable decision tree of configuration questions (the option
//! tree) plus the documents its terminal nodes name; this crate walks
//! the tree with a pluggable selection strategy, collects environment
//! variable assignments along the route, and injects them into the
//! resolved document.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Option Tree** - Node model and structural algorithms
//!   (attachment, ancestry, terminal discovery, grafting, stripping)
//! - **Layer 2: Walk & Synthesis** - `SelectionStrategy` trait, the
//!   resolver, and environment injection into config documents
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   and the manual-config flow (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use pipeline_init_core::{resolve, synthesize, Detector, CustomDetector, ScriptedStrategy};
//!
//! let detector = CustomDetector;
//! let selection = resolve(&detector.default_options(), &mut ScriptedStrategy::new())?;
//! let configs = detector.default_configs()?;
//! let document = synthesize(&selection.config_name, &configs, &selection.assignments)?;
//! ```

pub mod custom;
pub mod detector;
pub mod error;
pub mod options;
pub mod output;
pub mod synth;
pub mod walk;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use custom::CustomDetector;
pub use detector::{scan, ConfigMap, Detector, ScanResult};
pub use error::InitError;
pub use options::{Interaction, OptionKind, OptionNode};
pub use output::{write_to_file, Format};
pub use synth::{synthesize, ConfigDocument, EnvAssignment};
pub use walk::{resolve, ResolvedSelection, ScriptedStrategy, SelectionStrategy};

#[cfg(feature = "tui")]
pub use tui::{run, InitArgs};
