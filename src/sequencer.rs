use anyhow::Result;
use chrono::Local;

use crate::cli::Options;
use crate::console::Console;
use crate::git::{CommandLine, ExecResult, Runner};
use crate::plan::{default_message, Plan, Step, Upstream, UNKNOWN_BRANCH};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NotARepo { code: i32 },
    StatusFailed { code: i32 },
    Canceled,
    Previewed,
    Finished { failures: usize },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::NotARepo { code } | Outcome::StatusFailed { code } => *code,
            Outcome::Canceled | Outcome::Previewed => 0,
            Outcome::Finished { failures: 0 } => 0,
            Outcome::Finished { .. } => 1,
        }
    }
}

pub struct Sequencer<'a, R: Runner> {
    runner: &'a R,
    console: Console<'a>,
}

impl<'a, R: Runner> Sequencer<'a, R> {
    pub fn new(runner: &'a R, console: Console<'a>) -> Self {
        Self { runner, console }
    }

    pub fn run(&mut self, opts: &Options) -> Result<Outcome> {
        if let Some(failed) = self.check_work_tree()? {
            // git's own diagnostic may name a different cause (ownership, corruption).
            self.console.echo_err(&failed.stderr)?;
            self.console
                .warn("Error: This directory is not a Git repository.")?;
            return Ok(Outcome::NotARepo { code: failed.code });
        }

        self.console.say("git status:")?;
        let code = self.run_and_print(&CommandLine::git(&["status"]))?;
        if code != 0 {
            self.console.warn("Aborting because `git status` failed.")?;
            return Ok(Outcome::StatusFailed { code });
        }

        let message = self.resolve_message(opts.message.as_deref())?;
        let upstream = self.detect_upstream()?;
        let plan = Plan::build(&message, &upstream);

        self.console.say("\nQueued commands:")?;
        for queued in plan.steps() {
            self.console.say(&format!("  {}", queued.cmd))?;
        }

        if opts.dry_run {
            self.console.say("\nDry run: no commands were run.")?;
            return Ok(Outcome::Previewed);
        }

        if !opts.force {
            let answer = self
                .console
                .prompt("\nRun these now? Type \"y\" to continue: ")?;
            if answer.map(|a| a.to_lowercase()).as_deref() != Some("y") {
                self.console.say("Canceled.")?;
                return Ok(Outcome::Canceled);
            }
        }

        let failures = self.execute(&plan)?;

        if failures == 0 {
            self.console.say("✅ Done.")?;
        } else {
            self.console
                .warn(&format!("⚠️ Completed with {} error(s).", failures))?;
        }
        Ok(Outcome::Finished { failures })
    }

    /// Runs the queued commands in order. Returns the number that failed.
    fn execute(&mut self, plan: &Plan) -> Result<usize> {
        let mut failures = 0;

        for queued in plan.steps() {
            let code = self.run_and_print(&queued.cmd)?;
            self.console.say("")?;
            self.console
                .debug(&format!("{} exited with {}", queued.step, code))?;

            if code != 0 {
                failures += 1;
                if queued.step == Step::Commit {
                    self.console.warn("Commit failed. Stopping before push.")?;
                    break;
                }
            }
        }

        Ok(failures)
    }

    /// Prints the command and a blank line, runs it, then echoes stdout
    /// followed by stderr. Returns the exit code.
    fn run_and_print(&mut self, cmd: &CommandLine) -> Result<i32> {
        self.console.say(&format!("$ {}\n", cmd))?;
        let result = self.runner.run(cmd)?;

        if !result.stdout.is_empty() {
            self.console.echo(&result.stdout)?;
        }
        if !result.stderr.is_empty() {
            self.console.echo_err(&result.stderr)?;
        }
        Ok(result.code)
    }

    /// Returns the failed query when the directory is not a work tree.
    fn check_work_tree(&mut self) -> Result<Option<ExecResult>> {
        let result = self
            .runner
            .run(&CommandLine::git(&["rev-parse", "--is-inside-work-tree"]))?;
        self.console.debug(&format!(
            "work tree check exited with {}: {:?}",
            result.code,
            result.stdout.trim()
        ))?;

        if !result.success() {
            return Ok(Some(result));
        }
        if result.stdout.trim() != "true" {
            return Ok(Some(ExecResult {
                code: 1,
                ..result
            }));
        }
        Ok(None)
    }

    fn resolve_message(&mut self, given: Option<&str>) -> Result<String> {
        if let Some(message) = given.filter(|m| !m.is_empty()) {
            return Ok(message.to_string());
        }

        let answer = self
            .console
            .prompt("Commit message (leave blank for \"update\"): ")?
            .unwrap_or_default();
        if answer.is_empty() {
            return Ok(default_message(Local::now()));
        }
        Ok(answer)
    }

    fn detect_upstream(&mut self) -> Result<Upstream> {
        let head = self
            .runner
            .run(&CommandLine::git(&["rev-parse", "--abbrev-ref", "HEAD"]))?;
        let branch = if head.success() {
            head.stdout.trim().to_string()
        } else {
            UNKNOWN_BRANCH.to_string()
        };

        let tracking = self
            .runner
            .run(&CommandLine::git(&["rev-parse", "--abbrev-ref", "@{u}"]))?;
        self.console.debug(&format!(
            "branch {}, upstream {}",
            branch,
            if tracking.success() {
                tracking.stdout.trim()
            } else {
                "none"
            }
        ))?;

        if tracking.success() {
            Ok(Upstream::Tracked)
        } else {
            Ok(Upstream::Missing { branch })
        }
    }
}
