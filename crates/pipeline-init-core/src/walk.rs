//! Tree walk: resolves an option tree to one config name plus the
//! environment assignments collected along the route.

use crate::error::{InitError, Result};
use crate::options::{Interaction, OptionKind, OptionNode};
use crate::synth::EnvAssignment;
use std::collections::BTreeMap;

/// Chooses one value for a value node during a walk.
///
/// Contract per interaction type:
/// - [`Interaction::Selector`]: must return one of `candidates`; a sole
///   candidate may be taken without surfacing a question.
/// - [`Interaction::OptionalSelector`]: as above, but manual free text
///   may be offered as an alternative.
/// - [`Interaction::UserInput`] / [`Interaction::OptionalUserInput`]:
///   free text (required or empty-permitted); `candidates` are
///   placeholder hints, not an enumeration constraint.
pub trait SelectionStrategy {
    fn select(
        &mut self,
        title: &str,
        interaction: Interaction,
        candidates: &[String],
    ) -> anyhow::Result<String>;
}

/// The outcome of one walk: the terminal config name plus the
/// `(env key, value)` pairs collected root-to-leaf, in route order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    pub assignments: Vec<EnvAssignment>,
    pub config_name: String,
}

/// One transition of the walk state machine.
enum Step<'a> {
    /// Descend into the child selected for a value node.
    Routed { child: &'a OptionNode, value: String },
    /// The walk ended on a config name.
    Terminal(String),
}

/// Walk from `root` to a terminal config node, asking `strategy` for
/// one value per value node.
///
/// A config node terminates the walk with its document name. A value
/// node with an empty env key terminates it with the selected value
/// itself (the selected value *is* the config identifier). Any other
/// selection appends an assignment and routes into the matching child;
/// a selection with no matching child fails with
/// [`InitError::BrokenRoute`]. No backtracking, no retries.
pub fn resolve(root: &OptionNode, strategy: &mut dyn SelectionStrategy) -> Result<ResolvedSelection> {
    let mut assignments = Vec::new();
    let mut trail: Vec<String> = Vec::new();
    let mut node = root;

    loop {
        match advance(node, strategy, &mut assignments, &trail)? {
            Step::Terminal(config_name) => {
                return Ok(ResolvedSelection {
                    assignments,
                    config_name,
                })
            }
            Step::Routed { child, value } => {
                // The trail mirrors the route for error reporting.
                trail.push(value);
                node = child;
            }
        }
    }
}

fn advance<'a>(
    node: &'a OptionNode,
    strategy: &mut dyn SelectionStrategy,
    assignments: &mut Vec<EnvAssignment>,
    trail: &[String],
) -> Result<Step<'a>> {
    // A config node is terminal; no prompting.
    let (title, env_key, interaction) = match node.kind() {
        OptionKind::Config { name } => return Ok(Step::Terminal(name.clone())),
        OptionKind::Value {
            title,
            env_key,
            interaction,
        } => (title.as_str(), env_key.as_str(), *interaction),
        // An empty node prompts like a value node that binds nothing.
        OptionKind::Placeholder => ("", "", Interaction::Selector),
    };

    let candidates = node.values();
    let selected = strategy
        .select(title, interaction, &candidates)
        .map_err(InitError::StrategyFailure)?;

    // An empty env key means the selected value is the config name.
    if env_key.is_empty() {
        return Ok(Step::Terminal(selected));
    }

    match node.children().get(&selected) {
        Some(child) => {
            assignments.push(EnvAssignment::new(env_key, &selected));
            Ok(Step::Routed {
                child,
                value: selected,
            })
        }
        None => Err(InitError::BrokenRoute {
            path: trail.join("/"),
            value: selected,
        }),
    }
}

/// Pre-supplied answers keyed by prompt title; the non-interactive
/// counterpart of the TUI strategy, also used in tests. Sole `selector`
/// candidates are taken without counting as a surfaced prompt.
#[derive(Debug, Default)]
pub struct ScriptedStrategy {
    answers: BTreeMap<String, String>,
    prompted: usize,
}

impl ScriptedStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the answer for the prompt titled `title`.
    pub fn answer(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.answers.insert(title.into(), value.into());
        self
    }

    /// How many prompts actually had to be surfaced (auto-selected
    /// sole candidates are not counted).
    pub fn prompted(&self) -> usize {
        self.prompted
    }
}

impl SelectionStrategy for ScriptedStrategy {
    fn select(
        &mut self,
        title: &str,
        interaction: Interaction,
        candidates: &[String],
    ) -> anyhow::Result<String> {
        if interaction == Interaction::Selector && candidates.len() == 1 {
            return Ok(candidates[0].clone());
        }

        self.prompted += 1;

        let answer = match self.answers.get(title) {
            Some(answer) => answer.clone(),
            None if interaction == Interaction::OptionalUserInput => String::new(),
            None => anyhow::bail!("no scripted answer for prompt '{}'", title),
        };

        // Strict selectors only accept offered values.
        if interaction == Interaction::Selector && !candidates.contains(&answer) {
            anyhow::bail!(
                "answer '{}' for prompt '{}' is not one of the offered values ({})",
                answer,
                title,
                candidates.join(", ")
            );
        }

        Ok(answer)
    }
}
