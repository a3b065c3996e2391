//! Option node types, construction, and wire-shape serialization

use crate::error::InitError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a selection strategy must resolve a value node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interaction {
    /// Pick one of the offered values. A sole candidate may be
    /// auto-selected without surfacing a question.
    #[default]
    #[serde(rename = "selector")]
    Selector,
    /// Pick one of the offered values, or type any other value manually.
    #[serde(rename = "selector_optional")]
    OptionalSelector,
    /// Free text, required. Candidate keys are placeholder hints only.
    #[serde(rename = "user_input")]
    UserInput,
    /// Free text, empty permitted. Candidate keys are placeholder hints only.
    #[serde(rename = "user_input_optional")]
    OptionalUserInput,
}

/// What role a node plays in the tree. Exactly one role per node,
/// enforced by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Prompts for one environment-variable value and branches by the
    /// chosen value. An empty `env_key` marks a pure routing node whose
    /// selected value is itself the resolved config name.
    Value {
        title: String,
        env_key: String,
        interaction: Interaction,
    },
    /// Terminal node naming a concrete pipeline-config document.
    Config { name: String },
    /// Empty placeholder, e.g. a config node stripped of its binding.
    Placeholder,
}

/// One node of a selectable decision tree of configuration questions.
///
/// Children are owned exclusively and keyed by the literal value a
/// user or strategy selects. `path` holds the edge labels from the
/// tree's root to this node; it is maintained by [`OptionNode::add_option`]
/// and excluded from serialization, so deserialized or detached copies
/// carry empty paths until reattached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "NodeRepr", try_from = "NodeRepr")]
pub struct OptionNode {
    pub(crate) kind: OptionKind,
    pub(crate) children: BTreeMap<String, OptionNode>,
    pub(crate) path: Vec<String>,
}

impl OptionNode {
    /// Create a value node prompting with `title` and binding the
    /// selection to `env_key`. Interaction defaults to [`Interaction::Selector`].
    pub fn value(title: impl Into<String>, env_key: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::Value {
                title: title.into(),
                env_key: env_key.into(),
                interaction: Interaction::default(),
            },
            children: BTreeMap::new(),
            path: Vec::new(),
        }
    }

    /// Create a terminal node naming a pipeline-config document.
    pub fn config(name: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::Config { name: name.into() },
            children: BTreeMap::new(),
            path: Vec::new(),
        }
    }

    /// Create an empty placeholder node.
    pub fn placeholder() -> Self {
        Self {
            kind: OptionKind::Placeholder,
            children: BTreeMap::new(),
            path: Vec::new(),
        }
    }

    /// Override the interaction type of a value node (builder style).
    /// No effect on config or placeholder nodes.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        if let OptionKind::Value {
            interaction: ref mut current,
            ..
        } = self.kind
        {
            *current = interaction;
        }
        self
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// Prompt text of a value node.
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            OptionKind::Value { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Environment variable a value node binds; empty for routing nodes.
    pub fn env_key(&self) -> Option<&str> {
        match &self.kind {
            OptionKind::Value { env_key, .. } => Some(env_key),
            _ => None,
        }
    }

    pub fn interaction(&self) -> Option<Interaction> {
        match &self.kind {
            OptionKind::Value { interaction, .. } => Some(*interaction),
            _ => None,
        }
    }

    /// Document name of a config node.
    pub fn config_name(&self) -> Option<&str> {
        match &self.kind {
            OptionKind::Config { name } => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &BTreeMap<String, OptionNode> {
        &self.children
    }

    /// Edge labels from the root to this node. Empty exactly for the
    /// root of the tree this node was attached into.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Insert `child` under the selectable value `for_value`.
    ///
    /// The child's path becomes `self.path + [for_value]` and every
    /// descendant path is rebased accordingly, so pre-built subtrees
    /// (including detached copies) can be grafted in either build
    /// order. A duplicate `for_value` overwrites the previous child
    /// silently; this map-assignment behavior is deliberate.
    pub fn add_option(&mut self, for_value: impl Into<String>, mut child: OptionNode) {
        let for_value = for_value.into();
        let mut base = self.path.clone();
        base.push(for_value.clone());
        child.rebase(base);
        self.children.insert(for_value, child);
    }

    /// Same attachment as [`OptionNode::add_option`], named for terminal children.
    pub fn add_config(&mut self, for_value: impl Into<String>, config: OptionNode) {
        self.add_option(for_value, config);
    }

    /// Rewrite this subtree's paths as if rooted at `path`.
    pub(crate) fn rebase(&mut self, path: Vec<String>) {
        for (value, child) in &mut self.children {
            let mut child_path = path.clone();
            child_path.push(value.clone());
            child.rebase(child_path);
        }
        self.path = path;
    }

    /// Check detector-authoring rules: selector-kind value nodes must
    /// offer at least one value and config names must be non-empty.
    /// The title/config mutual exclusivity of the original model needs
    /// no check here; the kind enum rules it out by construction.
    pub fn validate(&self) -> Result<(), InitError> {
        match &self.kind {
            OptionKind::Value {
                title, interaction, ..
            } => {
                if title.is_empty() {
                    return Err(InitError::MalformedTree(
                        "value node with empty title".to_string(),
                    ));
                }
                if matches!(
                    interaction,
                    Interaction::Selector | Interaction::OptionalSelector
                ) && self.children.is_empty()
                {
                    return Err(InitError::MalformedTree(format!(
                        "selector '{}' offers no values",
                        title
                    )));
                }
            }
            OptionKind::Config { name } => {
                if name.is_empty() {
                    return Err(InitError::MalformedTree(
                        "config node with empty document name".to_string(),
                    ));
                }
            }
            OptionKind::Placeholder => {}
        }

        for child in self.children.values() {
            child.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for OptionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_yaml::to_string(self) {
            Ok(text) => f.write_str(&text),
            Err(err) => write!(f, "failed to serialize option node: {}", err),
        }
    }
}

/// Wire shape shared with the original model: a flat map of
/// `title` / `env_key` / `type` / `value_map` / `config` with empties
/// omitted. Paths are never serialized.
#[derive(Serialize, Deserialize)]
struct NodeRepr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    env_key: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    interaction: Option<Interaction>,

    #[serde(rename = "value_map", default, skip_serializing_if = "BTreeMap::is_empty")]
    children: BTreeMap<String, OptionNode>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    config: String,
}

impl From<OptionNode> for NodeRepr {
    fn from(node: OptionNode) -> Self {
        let (title, env_key, interaction, config) = match node.kind {
            OptionKind::Value {
                title,
                env_key,
                interaction,
            } => (title, env_key, Some(interaction), String::new()),
            OptionKind::Config { name } => (String::new(), String::new(), None, name),
            OptionKind::Placeholder => (String::new(), String::new(), None, String::new()),
        };
        NodeRepr {
            title,
            env_key,
            interaction,
            children: node.children,
            config,
        }
    }
}

impl TryFrom<NodeRepr> for OptionNode {
    type Error = InitError;

    fn try_from(repr: NodeRepr) -> Result<Self, Self::Error> {
        if !repr.title.is_empty() && !repr.config.is_empty() {
            return Err(InitError::MalformedTree(format!(
                "node populates both title ('{}') and config ('{}')",
                repr.title, repr.config
            )));
        }

        let kind = if !repr.title.is_empty() {
            OptionKind::Value {
                title: repr.title,
                env_key: repr.env_key,
                interaction: repr.interaction.unwrap_or_default(),
            }
        } else if !repr.config.is_empty() {
            OptionKind::Config { name: repr.config }
        } else {
            OptionKind::Placeholder
        };

        Ok(OptionNode {
            kind,
            children: repr.children,
            path: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_option_tracks_paths() {
        let mut root = OptionNode::value("Project type", "PROJECT_TYPE");
        let mut branch = OptionNode::value("Build variant", "BUILD_VARIANT");
        branch.add_config("debug", OptionNode::config("debug-config"));
        root.add_option("android", branch);

        assert!(root.path().is_empty());

        let branch = &root.children()["android"];
        assert_eq!(branch.path(), ["android"]);

        let leaf = &branch.children()["debug"];
        assert_eq!(leaf.path(), ["android", "debug"]);
    }

    #[test]
    fn test_add_option_overwrites_duplicate_value() {
        let mut root = OptionNode::value("Project type", "PROJECT_TYPE");
        root.add_config("ios", OptionNode::config("first"));
        root.add_config("ios", OptionNode::config("second"));

        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()["ios"].config_name(), Some("second"));
    }

    #[test]
    fn test_wire_shape_omits_empty_fields() {
        let mut root =
            OptionNode::value("Project type", "PROJECT_TYPE").with_interaction(Interaction::Selector);
        root.add_config("ios", OptionNode::config("ios-config"));

        let yaml = serde_yaml::to_string(&root).unwrap();
        assert!(yaml.contains("title: Project type"));
        assert!(yaml.contains("env_key: PROJECT_TYPE"));
        assert!(yaml.contains("type: selector"));
        assert!(yaml.contains("config: ios-config"));
        assert!(!yaml.contains("path"));

        let config_yaml = serde_yaml::to_string(&OptionNode::config("ios-config")).unwrap();
        assert!(!config_yaml.contains("title"));
        assert!(!config_yaml.contains("env_key"));
        assert!(!config_yaml.contains("type"));
    }

    #[test]
    fn test_wire_shape_round_trips() {
        let mut root = OptionNode::value("Project path", "PROJECT_PATH")
            .with_interaction(Interaction::UserInput);
        root.add_config("./app", OptionNode::config("default"));

        let yaml = serde_yaml::to_string(&root).unwrap();
        let parsed: OptionNode = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.title(), Some("Project path"));
        assert_eq!(parsed.interaction(), Some(Interaction::UserInput));
        assert_eq!(parsed.children()["./app"].config_name(), Some("default"));
        // Paths are transient and never survive serialization.
        assert!(parsed.children()["./app"].path().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_title_and_config_together() {
        let err = serde_yaml::from_str::<OptionNode>("title: Project type\nconfig: ios-config\n")
            .unwrap_err();
        assert!(err.to_string().contains("malformed option tree"));
    }

    #[test]
    fn test_missing_type_defaults_to_selector() {
        let parsed: OptionNode =
            serde_yaml::from_str("title: Project type\nenv_key: PROJECT_TYPE\n").unwrap();
        assert_eq!(parsed.interaction(), Some(Interaction::Selector));
    }

    #[test]
    fn test_validate_flags_empty_selector() {
        let node = OptionNode::value("Project type", "PROJECT_TYPE");
        assert!(matches!(
            node.validate(),
            Err(InitError::MalformedTree(_))
        ));

        let input = OptionNode::value("Project path", "PROJECT_PATH")
            .with_interaction(Interaction::UserInput);
        assert!(input.validate().is_ok());
    }
}
