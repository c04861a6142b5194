use std::fs;
use std::path::{Path, PathBuf};

use release_kit::config::GitConfig;
use release_kit::process::{CommandOutput, MockRunner};
use release_kit::release::ReleaseSettings;

#[allow(dead_code)]
pub const OID: &str = "3f786850e387550fdab836ed7e6dc881de23001b";

#[allow(dead_code)]
pub fn write_manifest(root: &Path, version: &str) -> PathBuf {
    let path = root.join("package.json");
    let body = format!(
        "{{\n  \"name\": \"site\",\n  \"version\": \"{}\",\n  \"private\": true\n}}\n",
        version
    );
    fs::write(&path, body).unwrap();
    path
}

#[allow(dead_code)]
pub fn settings(root: &Path) -> ReleaseSettings {
    ReleaseSettings {
        root: root.to_path_buf(),
        manifest_path: root.join("package.json"),
        git: GitConfig::default(),
    }
}

#[allow(dead_code)]
pub fn local_probe(tag: &str) -> String {
    format!("git rev-parse --verify --quiet refs/tags/{}", tag)
}

#[allow(dead_code)]
pub fn remote_probe(tag: &str) -> String {
    format!("git ls-remote --tags origin refs/tags/{}", tag)
}

/// A runner where `tag` exists exactly where requested and every other
/// command succeeds, with staged changes present.
#[allow(dead_code)]
pub fn runner_with_tag(tag: &str, local: bool, remote: bool) -> MockRunner {
    let mut runner = MockRunner::new();
    if !local {
        runner.fail(&local_probe(tag), 1);
    }
    if remote {
        runner.respond(
            &remote_probe(tag),
            CommandOutput::ok_with_stdout(format!("{}\trefs/tags/{}\n", OID, tag)),
        );
    }
    runner.fail("git diff --cached --quiet", 1);
    runner
}

/// Commands that change repository state, in call order.
#[allow(dead_code)]
pub fn mutations(runner: &MockRunner) -> Vec<String> {
    runner
        .calls()
        .into_iter()
        .filter(|c| {
            c.starts_with("git tag")
                || c.starts_with("git push")
                || c.starts_with("git commit")
                || c.starts_with("git add")
        })
        .collect()
}
