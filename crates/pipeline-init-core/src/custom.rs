//! Built-in fallback detector offering a bare pipeline skeleton
//!
//! Ecosystem detectors live outside this crate; the custom detector is
//! the one every run can fall back on when nothing else matches.

use crate::detector::{ConfigMap, Detector};
use crate::options::OptionNode;
use anyhow::Result;

pub const CUSTOM_CONFIG_NAME: &str = "custom-config";

/// A minimal pipeline with one empty primary workflow.
const CUSTOM_CONFIG: &str = "\
format_version: \"1\"
app:
  envs: []
pipelines:
  primary:
    steps: []
";

pub struct CustomDetector;

impl Detector for CustomDetector {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn default_options(&self) -> OptionNode {
        // The selector binds no env key, so the selected value is the
        // config name itself; its sole candidate is auto-selected.
        let mut root = OptionNode::value("Please choose a config type", "");
        root.add_config(CUSTOM_CONFIG_NAME, OptionNode::config(CUSTOM_CONFIG_NAME));
        root
    }

    fn default_configs(&self) -> Result<ConfigMap> {
        let mut configs = ConfigMap::new();
        configs.insert(CUSTOM_CONFIG_NAME.to_string(), CUSTOM_CONFIG.to_string());
        Ok(configs)
    }
}
