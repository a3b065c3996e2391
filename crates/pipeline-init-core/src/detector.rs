//! Detector contract and scan aggregation
//!
//! A detector inspects a source project elsewhere and hands this crate
//! a fully formed option tree plus the documents its terminal nodes
//! name. The core never touches the project filesystem itself.

use crate::options::OptionNode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from document name to serialized pipeline-config text.
pub type ConfigMap = BTreeMap<String, String>;

/// Contract a project detector must satisfy.
///
/// Every config name reachable from `default_options()`'s terminal
/// nodes must have a matching key in `default_configs()`; a mismatch is
/// a detector-author error and surfaces as a missing document when the
/// walk resolves.
pub trait Detector {
    /// Stable detector identifier, also used as an output namespace.
    fn name(&self) -> &'static str;

    /// Root of a fully formed decision tree.
    fn default_options(&self) -> OptionNode;

    /// The documents the tree's terminal nodes refer to.
    fn default_configs(&self) -> Result<ConfigMap>;
}

/// Aggregate scan artifact: every detector's option tree and document
/// map, keyed by detector name. Serialized wholesale in CI mode, where
/// no interactive selection may occur; consumed once by the walk stage
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub options: BTreeMap<String, OptionNode>,

    #[serde(default)]
    pub configs: BTreeMap<String, ConfigMap>,
}

/// Run every detector once and aggregate the results. Each tree is
/// validated up front so authoring mistakes fail the run immediately
/// instead of mid-walk.
pub fn scan(detectors: &[Box<dyn Detector>]) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    for detector in detectors {
        let name = detector.name();

        let options = detector.default_options();
        options
            .validate()
            .with_context(|| format!("detector '{}' produced an invalid option tree", name))?;

        let configs = detector
            .default_configs()
            .with_context(|| format!("detector '{}' failed to produce default configs", name))?;

        result.options.insert(name.to_string(), options);
        result.configs.insert(name.to_string(), configs);
    }

    Ok(result)
}
