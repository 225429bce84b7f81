use clap::Parser;

#[derive(Parser)]
#[command(name = "git-acp", about = "Stage, commit and push in one step")]
pub struct Cli {
    /// Commit message (prompted for when omitted)
    #[arg(short, long)]
    pub message: Option<String>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
    /// Show the queued commands without running them
    #[arg(long)]
    pub dry_run: bool,
    /// Print diagnostics to stderr
    #[arg(long)]
    pub debug: bool,
}

/// Run options, resolved once from the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub message: Option<String>,
    pub force: bool,
    pub dry_run: bool,
    pub debug: bool,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            message: cli.message,
            force: cli.force,
            dry_run: cli.dry_run,
            debug: cli.debug,
        }
    }
}
