//! Base-revision resolution and lint planning.
//!
//! Input: a [`query::RevisionQuery`] port (implemented elsewhere) plus an explicit policy.
//! Output: one resolved base reference, or a lint plan for a set of changed files.
//!
//! Nothing in this crate spawns processes or reads the environment; git is only reached
//! through the port, so every rule here runs against a scripted fake in tests.

#![forbid(unsafe_code)]

pub mod error;
pub mod plan;
pub mod policy;
pub mod query;
pub mod resolver;
pub mod strategy;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod proptest;

pub use error::{QueryError, ResolveError, UnresolvedReason};
pub use plan::{PlanError, Planner};
pub use policy::{EffectiveConfig, ExhaustionPolicy, PlanPolicy, ResolverPolicy, StrategyKind};
pub use query::{FailureMode, GitQuery, RevisionQuery};
pub use resolver::BaseRefResolver;
pub use strategy::{LastSorted, NamedPriority, SelectionStrategy};
