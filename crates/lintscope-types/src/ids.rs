//! Stable identifiers used in reports and log fields.

// Plan kinds
pub const PLAN_FILES: &str = "files";
pub const PLAN_WHOLE_TREE: &str = "whole_tree";
pub const PLAN_NOTHING: &str = "nothing";

// Branch names and prefixes preferred by the named-priority strategy, in rank order.
pub const BRANCH_DEVELOP: &str = "refs/heads/develop";
pub const BRANCH_MASTER: &str = "refs/heads/master";
pub const BRANCH_FEATURE_PREFIX: &str = "refs/heads/feature/";
pub const BRANCH_RELEASE_PREFIX: &str = "refs/heads/release/";

// Defaults
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_HEAD: &str = "HEAD";
pub const MAX_WALK_DEPTH: u32 = 99;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
