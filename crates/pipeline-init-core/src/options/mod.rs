//! The option tree: a purpose-built decision tree of configuration
//! questions that resolves to named pipeline-config documents.
//!
//! This module provides:
//! - Node types and construction/attachment (node)
//! - Structural algorithms: descent, ancestry, grafting (traverse)

mod node;
mod traverse;

pub use node::{Interaction, OptionKind, OptionNode};
