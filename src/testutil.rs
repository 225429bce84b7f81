#![cfg(test)]

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use crate::git::{CommandLine, ExecResult, Runner};

pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    pub fn create_repo(&self, name: &str) -> PathBuf {
        let repo_path = self.dir.path().join(name);
        std::fs::create_dir_all(&repo_path).unwrap();

        let run = |args: &[&str]| {
            let output = Command::new("git")
                .args(args)
                .current_dir(&repo_path)
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
        };

        run(&["init"]);
        run(&["commit", "--allow-empty", "-m", "initial"]);

        repo_path
    }
}

impl ExecResult {
    pub fn ok(stdout: &str) -> Self {
        Self {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Answers commands from a script keyed by their display form and records
/// every call. Unscripted commands succeed silently.
pub struct FakeRunner {
    script: HashMap<String, ExecResult>,
    calls: RefCell<Vec<CommandLine>>,
}

impl FakeRunner {
    /// A healthy work tree on `branch`, tracking `origin/<branch>`.
    pub fn repo_on_branch(branch: &str) -> Self {
        Self {
            script: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
        .script("git rev-parse --is-inside-work-tree", ExecResult::ok("true\n"))
        .script(
            "git rev-parse --abbrev-ref HEAD",
            ExecResult::ok(&format!("{}\n", branch)),
        )
        .script(
            "git rev-parse --abbrev-ref @{u}",
            ExecResult::ok(&format!("origin/{}\n", branch)),
        )
    }

    pub fn without_upstream(self) -> Self {
        self.script(
            "git rev-parse --abbrev-ref @{u}",
            ExecResult::failed(128, "fatal: no upstream configured for branch\n"),
        )
    }

    pub fn script(mut self, cmd: &str, result: ExecResult) -> Self {
        self.script.insert(cmd.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// The message passed to `git commit -m`, if a commit ran.
    pub fn commit_message(&self) -> Option<String> {
        self.calls
            .borrow()
            .iter()
            .find(|c| c.tokens().get(1).map(String::as_str) == Some("commit"))
            .and_then(|c| c.tokens().get(3).cloned())
    }
}

impl Runner for FakeRunner {
    fn run(&self, cmd: &CommandLine) -> Result<ExecResult> {
        self.calls.borrow_mut().push(cmd.clone());
        Ok(self
            .script
            .get(&cmd.to_string())
            .cloned()
            .unwrap_or_default())
    }
}
