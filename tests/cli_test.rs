use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A repo on branch `feature` with one commit and an uncommitted file.
/// With `remote`, `origin` points at a local bare repository.
fn setup_repo(tmp: &TempDir, remote: bool) -> PathBuf {
    let repo = tmp.path().join("work");
    std::fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init"]);
    git(&repo, &["commit", "--allow-empty", "-m", "initial"]);
    git(&repo, &["checkout", "-b", "feature"]);
    std::fs::write(repo.join("notes.txt"), "hello\n").unwrap();

    if remote {
        let bare = tmp.path().join("origin.git");
        std::fs::create_dir_all(&bare).unwrap();
        git(&bare, &["init", "--bare"]);
        git(&repo, &["remote", "add", "origin", bare.to_str().unwrap()]);
    }

    repo
}

fn git_acp(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("git-acp").unwrap();
    cmd.current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .env("GIT_CEILING_DIRECTORIES", dir.parent().unwrap_or(dir));
    cmd
}

#[test]
fn help_exits_zero() {
    Command::cargo_bin("git-acp")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--message"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn positional_argument_rejected() {
    Command::cargo_bin("git-acp")
        .unwrap()
        .arg("unexpected")
        .assert()
        .failure();
}

#[test]
fn outside_a_repo_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("plain");
    std::fs::create_dir_all(&dir).unwrap();

    git_acp(&dir)
        .args(["-m", "x", "-f"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("fatal: not a git repository"))
        .stderr(predicate::str::contains(
            "Error: This directory is not a Git repository.",
        ))
        .stdout(predicate::str::contains("git status:").not());
}

#[test]
fn full_run_pushes_and_sets_upstream() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, true);

    git_acp(&repo)
        .args(["-m", "fix bug", "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git status:\n$ git status\n"))
        .stdout(predicate::str::contains(
            "Queued commands:\n  git add -A\n  git commit -m \"fix bug\"\n  git push -u origin feature\n",
        ))
        .stdout(predicate::str::contains("$ git push -u origin feature\n"))
        .stdout(predicate::str::contains("✅ Done."))
        .stdout(predicate::str::contains("Run these now?").not());

    assert_eq!(git(&repo, &["log", "-1", "--format=%s"]), "fix bug");
    assert_eq!(
        git(&repo, &["rev-parse", "--abbrev-ref", "@{u}"]),
        "origin/feature"
    );
}

#[test]
fn second_run_uses_bare_push() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, true);

    git_acp(&repo).args(["-m", "first", "-f"]).assert().success();
    std::fs::write(repo.join("more.txt"), "more\n").unwrap();

    git_acp(&repo)
        .args(["-m", "second", "-f"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  git push\n"));
}

#[test]
fn push_without_remote_counts_one_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, false);

    git_acp(&repo)
        .args(["-m", "local only", "-f"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Completed with 1 error(s)."));

    assert_eq!(git(&repo, &["log", "-1", "--format=%s"]), "local only");
}

#[test]
fn nothing_to_commit_stops_before_push() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, true);
    std::fs::remove_file(repo.join("notes.txt")).unwrap();

    git_acp(&repo)
        .args(["-m", "empty", "-f"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Commit failed. Stopping before push.",
        ))
        .stdout(predicate::str::contains("$ git push").not());
}

#[test]
fn declining_confirmation_changes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, true);
    let head_before = git(&repo, &["rev-parse", "HEAD"]);

    git_acp(&repo)
        .args(["-m", "nope"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run these now? Type \"y\" to continue: "))
        .stdout(predicate::str::contains("Canceled."))
        .stdout(predicate::str::contains("$ git add").not());

    assert_eq!(git(&repo, &["rev-parse", "HEAD"]), head_before);
}

#[test]
fn prompted_blank_message_uses_default() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, true);

    git_acp(&repo)
        .write_stdin("\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Commit message (leave blank for \"update\"): ",
        ));

    let subject = git(&repo, &["log", "-1", "--format=%s"]);
    assert!(subject.starts_with("update "), "subject: {}", subject);
    assert_eq!(subject.len(), "update YYYY-MM-DD HH:MM:SS".len());
}

#[test]
fn dry_run_leaves_repo_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = setup_repo(&tmp, true);
    let head_before = git(&repo, &["rev-parse", "HEAD"]);

    git_acp(&repo)
        .args(["-m", "later", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: no commands were run."));

    assert_eq!(git(&repo, &["rev-parse", "HEAD"]), head_before);
}
