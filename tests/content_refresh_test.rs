// tests/content_refresh_test.rs
use std::fs;
use std::path::{Path, PathBuf};

use release_kit::boundary::BoundaryWarning;
use release_kit::cli::refresh::{self, RefreshArgs};
use release_kit::config::{Config, STACK_KEY_ENV};
use release_kit::content::{ContentRefresher, ContentStats, RefreshOutcome, RefreshSettings};
use release_kit::process::{MockRunner, OutputMode};
use release_kit::ReleaseError;
use serial_test::serial;
use tempfile::TempDir;

const EXPORT: &str = "csdx cm:export -k blt-test -d content";

fn settings(root: &Path) -> RefreshSettings {
    let mut config = Config::default();
    config.content.stack_api_key = Some("blt-test".to_string());
    RefreshSettings::from_config(&config, root).unwrap()
}

/// Simulates the export CLI writing `files` JSON files spread over `dirs`
/// subdirectories of `<cwd>/content`.
fn exporting(runner: &mut MockRunner, dirs: usize, files: usize) {
    runner.on_run(EXPORT, move |cmd| {
        let root: PathBuf = cmd.current_dir.clone().unwrap().join("content");
        fs::create_dir_all(&root).unwrap();
        for d in 0..dirs {
            fs::create_dir_all(root.join(format!("type-{}", d))).unwrap();
        }
        for f in 0..files {
            let parent = if dirs == 0 {
                root.clone()
            } else {
                root.join(format!("type-{}", f % dirs))
            };
            fs::write(parent.join(format!("entry-{}.json", f)), "{}").unwrap();
        }
    });
}

#[test]
fn test_missing_dir_still_exports_and_counts() {
    let dir = TempDir::new().unwrap();
    let mut runner = MockRunner::new();
    exporting(&mut runner, 3, 7);

    let outcome = ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Exported(ContentStats {
            files: 7,
            directories: 3,
        })
    );
    assert_eq!(runner.calls(), vec![EXPORT.to_string()]);
}

#[test]
fn test_export_inherits_stdio_and_runs_from_root() {
    let dir = TempDir::new().unwrap();
    let mut runner = MockRunner::new();
    exporting(&mut runner, 0, 1);

    ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap();

    let invocation = &runner.invocations()[0];
    assert_eq!(invocation.mode, OutputMode::Inherit);
    assert_eq!(
        invocation.command.current_dir.as_deref(),
        Some(dir.path())
    );
}

#[test]
fn test_existing_dir_is_replaced() {
    let dir = TempDir::new().unwrap();
    let stale = dir.path().join("content/old-type");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join("old.json"), "{}").unwrap();

    let mut runner = MockRunner::new();
    exporting(&mut runner, 1, 2);

    let outcome = ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap();

    assert!(!stale.exists());
    assert_eq!(
        outcome,
        RefreshOutcome::Exported(ContentStats {
            files: 2,
            directories: 1,
        })
    );
}

#[test]
fn test_clear_reports_whether_dir_existed() {
    let dir = TempDir::new().unwrap();
    let runner = MockRunner::new();
    let refresher = ContentRefresher::new(&runner, settings(dir.path()));

    assert!(!refresher.clear().unwrap());
    fs::create_dir_all(dir.path().join("content")).unwrap();
    assert!(refresher.clear().unwrap());
    assert!(!dir.path().join("content").exists());
}

#[test]
fn test_file_in_place_of_dir_is_removed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("content"), "not a directory").unwrap();

    let mut runner = MockRunner::new();
    exporting(&mut runner, 1, 1);

    let outcome = ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap();

    assert!(dir.path().join("content").is_dir());
    assert_eq!(
        outcome,
        RefreshOutcome::Exported(ContentStats {
            files: 1,
            directories: 1,
        })
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_dir_is_unlinked_not_emptied() {
    let dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    fs::write(elsewhere.path().join("keep.json"), "{}").unwrap();
    std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("content")).unwrap();

    let runner = MockRunner::new();
    let refresher = ContentRefresher::new(&runner, settings(dir.path()));

    assert!(refresher.clear().unwrap());
    assert!(fs::symlink_metadata(dir.path().join("content")).is_err());
    assert!(elsewhere.path().join("keep.json").exists());
}

#[test]
fn test_failed_export_is_fatal_without_stats() {
    let dir = TempDir::new().unwrap();
    let mut runner = MockRunner::new();
    exporting(&mut runner, 1, 1);
    runner.fail(EXPORT, 2);

    let err = ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap_err();

    assert!(matches!(err, ReleaseError::Export(_)));
    assert!(err.to_string().contains("exit code 2"));
}

#[test]
fn test_export_binary_missing_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut runner = MockRunner::new();
    runner.fail_to_spawn(EXPORT);

    let err = ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap_err();

    assert!(matches!(err, ReleaseError::Export(_)));
}

#[test]
fn test_export_without_output_dir_warns() {
    let dir = TempDir::new().unwrap();
    let runner = MockRunner::new();

    let outcome = ContentRefresher::new(&runner, settings(dir.path()))
        .refresh()
        .unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Missing(BoundaryWarning::ContentDirMissing {
            dir: dir.path().join("content"),
        })
    );
}

#[test]
#[serial]
fn test_cli_run_takes_key_from_env() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("releasekit.toml"), "").unwrap();
    let mut runner = MockRunner::new();
    exporting(&mut runner, 2, 4);

    std::env::set_var(STACK_KEY_ENV, "blt-test");
    let result = refresh::run(&RefreshArgs { config: None }, dir.path(), &runner);
    std::env::remove_var(STACK_KEY_ENV);

    assert_eq!(
        result.unwrap(),
        RefreshOutcome::Exported(ContentStats {
            files: 4,
            directories: 2,
        })
    );
}

#[test]
#[serial]
fn test_cli_run_without_key_deletes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("releasekit.toml"), "").unwrap();
    fs::create_dir_all(dir.path().join("content")).unwrap();
    let runner = MockRunner::new();

    std::env::remove_var(STACK_KEY_ENV);
    let err = refresh::run(&RefreshArgs { config: None }, dir.path(), &runner).unwrap_err();

    assert!(matches!(err, ReleaseError::Config(_)));
    assert!(dir.path().join("content").exists());
    assert!(runner.calls().is_empty());
}

#[test]
#[serial]
fn test_cli_run_with_custom_program_and_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("releasekit.toml"),
        "[content]\ndir = \"export\"\nprogram = \"npx\"\nsubcommand = \"csdx\"\nstack_api_key = \"blt-file\"\n",
    )
    .unwrap();
    let runner = MockRunner::new();

    std::env::remove_var(STACK_KEY_ENV);
    refresh::run(&RefreshArgs { config: None }, dir.path(), &runner).unwrap();

    assert_eq!(
        runner.calls(),
        vec!["npx csdx -k blt-file -d export".to_string()]
    );
}
