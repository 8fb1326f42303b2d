mod contracts;
mod cycles;
mod inheritance;
mod overload;
mod structure;
mod types;
mod visibility;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::model::{Feature, Model, NodeId};

pub use cycles::{CycleDetected, interface_graph, topological_type_order, type_graph};
pub use types::Ty;

/// How much effort a validation pass may spend.
///
/// Ordered: a pass in `Expensive` mode also runs `Fast` and `Normal`
/// validators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    Fast,
    #[default]
    Normal,
    Expensive,
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckMode::Fast => "fast",
            CheckMode::Normal => "normal",
            CheckMode::Expensive => "expensive",
        })
    }
}

impl FromStr for CheckMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(CheckMode::Fast),
            "normal" => Ok(CheckMode::Normal),
            "expensive" => Ok(CheckMode::Expensive),
            other => Err(format!(
                "unknown check mode {other:?}, expected fast, normal or expensive"
            )),
        }
    }
}

/// Knobs of one validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub mode: CheckMode,
    /// Warn about types and constants declared after an interface contract.
    pub element_order: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mode: CheckMode::Normal,
            element_order: true,
        }
    }
}

/// An externally supplied rule set, run after the built-in checkers.
pub trait Validator {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Least mode in which this validator runs.
    fn mode(&self) -> CheckMode {
        CheckMode::Normal
    }

    fn validate(&self, model: &Model, sink: &mut Diagnostics);
}

type BuiltinCheck = fn(&Model, &Options, &mut Diagnostics);

const BUILTIN_CHECKS: &[(&str, BuiltinCheck)] = &[
    ("cycles", |m, _, s| cycles::check(m, s)),
    ("structure", structure::check),
    ("types", |m, _, s| types::check(m, s)),
    ("inheritance", |m, _, s| inheritance::check(m, s)),
    ("overload", |m, _, s| overload::check(m, s)),
    ("visibility", |m, _, s| visibility::check(m, s)),
    ("contracts", |m, _, s| contracts::check(m, s)),
];

/// Runs every built-in checker and the registered validators over a model.
///
/// All checkers run to completion; diagnostics are collected, never
/// short-circuited.
#[derive(Default)]
pub struct Dispatcher {
    options: Options,
    validators: Vec<Box<dyn Validator>>,
}

impl Dispatcher {
    pub fn new(options: Options) -> Self {
        Dispatcher {
            options,
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.register(Box::new(validator));
        self
    }

    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn run(&self, model: &Model) -> Diagnostics {
        let mut sink = Diagnostics::new();
        self.run_into(model, &mut sink);
        sink
    }

    /// Append the findings of one pass to a caller-owned sink.
    pub fn run_into(&self, model: &Model, sink: &mut Diagnostics) {
        let start = sink.len();

        for (name, check) in BUILTIN_CHECKS {
            let before = sink.len();
            check(model, &self.options, sink);
            fr_debug!(check, checker = *name, found = sink.len() - before, "checker finished");
        }

        for validator in &self.validators {
            if validator.mode() > self.options.mode {
                fr_debug!(
                    check,
                    validator = validator.name(),
                    mode = %validator.mode(),
                    "validator skipped"
                );
                continue;
            }
            let before = sink.len();
            validator.validate(model, sink);
            fr_debug!(
                check,
                validator = validator.name(),
                found = sink.len() - before,
                "validator finished"
            );
        }

        let found = &sink.as_slice()[start..];
        let errors = found.iter().filter(|d| d.is_error()).count();
        fr_info!(
            check,
            model = %model.name,
            mode = %self.options.mode,
            errors,
            warnings = found.len() - errors,
            "validation complete"
        );
    }
}

/// Validate a model with default options and no external validators.
pub fn check_model(model: &Model) -> Diagnostics {
    Dispatcher::default().run(model)
}

/// Report every element whose name is shared with a sibling.
///
/// Each element of a clashing group gets its own error.
fn report_duplicates<'a>(
    items: impl IntoIterator<Item = (&'a str, NodeId)>,
    what: &str,
    kind: DiagnosticKind,
    sink: &mut Diagnostics,
) {
    let mut groups: IndexMap<&str, Vec<NodeId>> = IndexMap::new();
    for (name, node) in items {
        groups.entry(name).or_default().push(node);
    }
    for (name, nodes) in groups {
        if nodes.len() < 2 {
            continue;
        }
        for node in nodes {
            sink.error(kind, node, Feature::Name, format!("Duplicate {what} '{name}'"));
        }
    }
}

#[cfg(test)]
mod tests;
