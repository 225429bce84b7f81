use chrono::{DateTime, Local};
use std::fmt;

use crate::git::CommandLine;

pub const UNKNOWN_BRANCH: &str = "<unknown-branch>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Add,
    Commit,
    Push,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Add => "add",
            Step::Commit => "commit",
            Step::Push => "push",
        };
        f.write_str(name)
    }
}

/// Whether the current branch already tracks a remote branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upstream {
    Tracked,
    Missing { branch: String },
}

#[derive(Debug, Clone)]
pub struct QueuedCommand {
    pub step: Step,
    pub cmd: CommandLine,
}

/// The three mutating commands, in execution order.
#[derive(Debug, Clone)]
pub struct Plan {
    steps: [QueuedCommand; 3],
}

impl Plan {
    pub fn build(message: &str, upstream: &Upstream) -> Self {
        let push = match upstream {
            Upstream::Tracked => CommandLine::git(&["push"]),
            Upstream::Missing { branch } => {
                CommandLine::git(&["push", "-u", "origin", branch.as_str()])
            }
        };

        Self {
            steps: [
                QueuedCommand {
                    step: Step::Add,
                    cmd: CommandLine::git(&["add", "-A"]),
                },
                QueuedCommand {
                    step: Step::Commit,
                    cmd: CommandLine::git(&["commit", "-m", message]),
                },
                QueuedCommand {
                    step: Step::Push,
                    cmd: push,
                },
            ],
        }
    }

    pub fn steps(&self) -> &[QueuedCommand] {
        &self.steps
    }
}

pub fn default_message(now: DateTime<Local>) -> String {
    format!("update {}", now.format("%Y-%m-%d %H:%M:%S"))
}
