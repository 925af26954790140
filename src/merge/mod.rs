//! Manifest merge engine
//!
//! Folding plugin manifests onto the base follows one rule per field:
//!
//! | field         | rule                                  |
//! |---------------|---------------------------------------|
//! | `name`        | base kept                             |
//! | `version`     | base kept                             |
//! | `description` | base kept                             |
//! | `commands`    | other appended after base             |
//! | `env`         | union, other wins on shared keys      |
//! | `schemas`     | union, other wins on shared keys      |
//! | `examples`    | other appended after base             |

use indexmap::IndexMap;

use crate::models::Manifest;

/// Manifest fields that take part in a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Version,
    Description,
    Commands,
    Env,
    Schemas,
    Examples,
}

/// How a single field combines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Keep the base value, ignore the other side
    KeepBase,
    /// Concatenate, base entries first
    Append,
    /// Union keyed entries, the other side wins on collisions
    Override,
}

impl Field {
    /// Every field, in document order
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Version,
        Field::Description,
        Field::Commands,
        Field::Env,
        Field::Schemas,
        Field::Examples,
    ];

    /// The rule table
    pub fn rule(self) -> MergeRule {
        match self {
            Field::Name | Field::Version | Field::Description => MergeRule::KeepBase,
            Field::Commands | Field::Examples => MergeRule::Append,
            Field::Env | Field::Schemas => MergeRule::Override,
        }
    }
}

/// Merge engine for combining manifests
pub struct MergeEngine;

impl MergeEngine {
    /// Combine `other` onto `base`, producing a new manifest
    ///
    /// Neither input is modified.
    pub fn merge(base: &Manifest, other: &Manifest) -> Manifest {
        Manifest {
            name: Self::scalar(Field::Name, &base.name),
            version: Self::scalar(Field::Version, &base.version),
            description: Self::scalar(Field::Description, &base.description),
            commands: Self::sequence(Field::Commands, &base.commands, &other.commands),
            env: Self::mapping(Field::Env, &base.env, &other.env),
            schemas: Self::mapping(Field::Schemas, &base.schemas, &other.schemas),
            examples: Self::sequence(Field::Examples, &base.examples, &other.examples),
        }
    }

    // Each helper serves exactly one rule; the table routes scalars,
    // sequences and maps to it and nothing else.

    fn scalar(field: Field, base: &Option<String>) -> Option<String> {
        debug_assert_eq!(field.rule(), MergeRule::KeepBase);
        base.clone()
    }

    fn sequence<T: Clone>(field: Field, base: &[T], other: &[T]) -> Vec<T> {
        debug_assert_eq!(field.rule(), MergeRule::Append);
        base.iter().chain(other).cloned().collect()
    }

    /// Existing keys keep their position, only the value changes
    fn mapping<V: Clone>(
        field: Field,
        base: &IndexMap<String, V>,
        other: &IndexMap<String, V>,
    ) -> IndexMap<String, V> {
        debug_assert_eq!(field.rule(), MergeRule::Override);
        let mut out = base.clone();
        for (k, v) in other {
            out.insert(k.clone(), v.clone());
        }
        out
    }
}
