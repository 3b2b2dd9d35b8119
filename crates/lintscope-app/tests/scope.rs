//! End-to-end use cases against real temporary repositories.

use camino::Utf8Path;
use lintscope_app::{ScopeInput, is_unresolved, run_base, run_scope};
use lintscope_settings::{Environment, Overrides};
use lintscope_test_util::{GitFixture, normalize_nondeterministic, normalize_root};
use lintscope_types::{BaseSource, ChangedFileSet, InvocationMode, LintPlan};
use tokio_util::sync::CancellationToken;

/// master -> develop (+1) -> topic (+2), checked out on topic.
fn stacked_on_develop() -> GitFixture {
    let repo = GitFixture::new();
    repo.checkout_new("develop");
    repo.commit_file("src/lib.js", "lib", "develop work");
    repo.checkout_new("topic");
    repo.commit_file("src/a.js", "a", "topic 1");
    repo.commit_file("README.md", "readme", "topic 2");
    repo
}

fn input<'a>(repo: &'a GitFixture, config_text: &'a str, env: &'a Environment) -> ScopeInput<'a> {
    ScopeInput {
        repo_root: repo.root(),
        scope: None,
        config_text,
        overrides: Overrides::default(),
        env,
        explicit_base: None,
        git_program: None,
        cancel: CancellationToken::new(),
    }
}

#[tokio::test]
async fn scope_report_snapshot() {
    let repo = stacked_on_develop();
    let env = Environment::default();
    let config = "extensions = [\"js\"]\n";

    let out = run_scope(&input(&repo, config, &env)).await.expect("run_scope");

    let value = serde_json::to_value(&out.report).expect("report to json");
    let value = normalize_root(normalize_nondeterministic(value), repo.root().as_str());
    insta::assert_snapshot!(serde_json::to_string_pretty(&value).unwrap(), @r#"
    {
      "base": {
        "head": "HEAD",
        "reference": "refs/heads/develop",
        "source": {
          "distance": 2,
          "kind": "ancestor_walk"
        }
      },
      "mode": "interactive",
      "plan": {
        "changed_total": 2,
        "files": [
          "<ROOT>/src/a.js"
        ],
        "kind": "files"
      },
      "run": {
        "duration_ms": 0,
        "ended_at": "__TIMESTAMP__",
        "started_at": "__TIMESTAMP__"
      },
      "schema": "lintscope.report.v1",
      "scope_root": "<ROOT>",
      "tool": {
        "name": "lintscope",
        "version": "__VERSION__"
      }
    }
    "#);
}

#[tokio::test]
async fn sentinel_change_plans_whole_tree() {
    let repo = stacked_on_develop();
    repo.write("package.json", "{}");
    let env = Environment::default();
    let config = "extensions = [\"js\"]\nsentinels = [\"package.json\"]\n";
    let mut scope_input = input(&repo, config, &env);
    scope_input.explicit_base = Some("develop".to_string());

    // Untracked files are not part of the diff.
    let out = run_scope(&scope_input).await.expect("run_scope");
    assert!(matches!(out.plan, LintPlan::Files(_)));

    repo.commit_all("add package.json");
    let out = run_scope(&scope_input).await.expect("run_scope");
    assert_eq!(
        out.plan,
        LintPlan::WholeTree {
            sentinel: repo.path("package.json")
        }
    );
    assert_eq!(out.base.base.source, BaseSource::Explicit);
}

#[tokio::test]
async fn nothing_left_after_filtering_is_success() {
    let repo = stacked_on_develop();
    repo.remove("src/a.js");
    let env = Environment::default();
    let config = "extensions = [\"ts\"]\n";

    let out = run_scope(&input(&repo, config, &env)).await.expect("run_scope");

    assert!(out.plan.is_nothing());
    assert_eq!(out.changed_total, 1);
}

#[tokio::test]
async fn scope_subdirectory_limits_listing() {
    let repo = stacked_on_develop();
    let env = Environment::default();
    let mut scope_input = input(&repo, "", &env);
    scope_input.scope = Some(Utf8Path::new("src"));

    let out = run_scope(&scope_input).await.expect("run_scope");

    assert_eq!(out.scope_root, repo.path("src"));
    assert_eq!(
        out.plan,
        LintPlan::Files(ChangedFileSet::from_paths([repo.path("src/a.js")]))
    );
}

#[tokio::test]
async fn automated_mode_uses_remote_tracking_base() {
    let repo = stacked_on_develop();
    repo.remote_branch("develop", "develop");
    let env = Environment::from_vars([("GITHUB_BASE_REF", "develop"), ("CI", "true")]);

    let out = run_scope(&input(&repo, "", &env)).await.expect("run_scope");

    assert_eq!(out.base.mode, InvocationMode::Automated);
    assert_eq!(out.base.base.reference.as_str(), "refs/remotes/origin/develop");
    assert_eq!(out.changed_total, 2);
    assert!(out.report.run.ci.is_some());
}

#[tokio::test]
async fn exhausted_walk_surfaces_as_unresolved() {
    let repo = GitFixture::new();
    repo.checkout_new("topic");
    let env = Environment::default();

    let err = run_base(&input(&repo, "max_depth = 3\n", &env))
        .await
        .unwrap_err();

    assert!(is_unresolved(&err));
}

#[tokio::test]
async fn cli_profile_falls_back_to_upstream_name() {
    let repo = GitFixture::new();
    repo.checkout_new("topic");
    let env = Environment::default();

    let out = run_base(&input(&repo, "profile = \"cli\"\nmax_depth = 3\n", &env))
        .await
        .expect("run_base");

    assert_eq!(out.base.reference.as_str(), "HEAD@{upstream}");
    assert_eq!(out.base.source, BaseSource::UpstreamFallback);
}
