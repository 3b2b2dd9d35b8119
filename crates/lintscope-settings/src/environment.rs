use lintscope_types::InvocationMode;

pub const ENV_BASE_REF: &str = "GITHUB_BASE_REF";
pub const ENV_CI: &str = "CI";
pub const ENV_GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
pub const ENV_EXPLICIT_BASE: &str = "LINTSCOPE_BASE";

/// The process environment, captured once at the binary boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    /// Base branch name handed over by CI for a pull request.
    pub base_branch: Option<String>,
    pub ci: bool,
    pub ci_provider: Option<String>,
    /// Base revision the operator pinned through the environment.
    pub explicit_base: Option<String>,
}

impl Environment {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build from `(name, value)` pairs. Empty values count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut env = Environment::default();
        let mut github_actions = false;
        for (key, value) in vars {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ENV_BASE_REF => env.base_branch = Some(value.to_string()),
                ENV_EXPLICIT_BASE => env.explicit_base = Some(value.to_string()),
                ENV_CI => env.ci = env.ci || is_truthy(value),
                ENV_GITHUB_ACTIONS => github_actions = is_truthy(value),
                _ => {}
            }
        }
        if github_actions {
            env.ci = true;
            env.ci_provider = Some("github-actions".to_string());
        }
        env
    }

    /// A forced mode wins; otherwise a CI-supplied base branch means automated.
    pub fn invocation_mode(&self, forced: Option<InvocationMode>) -> InvocationMode {
        match forced {
            Some(mode) => mode,
            None if self.base_branch.is_some() => InvocationMode::Automated,
            None => InvocationMode::Interactive,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "0" | "false" | "no")
}
