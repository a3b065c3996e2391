//! Error types for option tree construction, walking, and synthesis

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    /// An option node violates a structural authoring rule. Malformed
    /// nodes can only enter through deserialized input or detector
    /// authoring mistakes; they are rejected up front, never coerced.
    #[error("malformed option tree: {0}")]
    MalformedTree(String),

    /// A walk selected a value with no corresponding child subtree.
    /// Always fatal to that walk: a broken route is a detector
    /// authoring defect, not a transient condition.
    #[error("broken route at '{path}': no option subtree under value '{value}'")]
    BrokenRoute { path: String, value: String },

    /// A walk resolved to a config name the detector never registered.
    #[error("missing config document: '{0}'")]
    MissingDocument(String),

    /// The selection strategy itself failed (e.g. interactive input
    /// aborted); propagated unchanged, aborts the walk.
    #[error("selection strategy failed")]
    StrategyFailure(#[source] anyhow::Error),

    /// A config document failed to parse or serialize.
    #[error("config document (de)serialization failed: {0}")]
    ParseFailure(#[from] serde_yaml::Error),
}

/// Result type for core option tree operations
pub type Result<T> = std::result::Result<T, InitError>;
