//! Config parsing, profile/preset resolution and the environment snapshot.
//!
//! This crate is intentionally IO-free: it parses configuration provided as strings and
//! reads the environment only through [`Environment::from_env`], which the binary calls once.

#![forbid(unsafe_code)]

mod environment;
mod model;
mod presets;
mod resolve;

pub use environment::{
    ENV_BASE_REF, ENV_CI, ENV_EXPLICIT_BASE, ENV_GITHUB_ACTIONS, Environment,
};
pub use model::{LintscopeConfigV1, SCHEMA_CONFIG_V1};
pub use presets::{PROFILE_CI, PROFILE_CLI, PROFILE_LOCAL};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `lintscope.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LintscopeConfigV1> {
    let cfg: LintscopeConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (profile preset, then config file, then overrides).
pub fn resolve_config(
    cfg: LintscopeConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
