mod cli;
mod console;
mod git;
mod plan;
mod sequencer;
mod testutil;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use cli::{Cli, Options};
use console::Console;
use git::SystemRunner;
use sequencer::Sequencer;

fn main() {
    let opts = Options::from(Cli::parse());

    match run(&opts) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(opts: &Options) -> Result<i32> {
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    let runner = SystemRunner::new(cwd);

    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let console = Console::new(&mut input, &mut out, &mut err, opts.debug);

    let outcome = Sequencer::new(&runner, console).run(opts)?;
    out.flush()?;
    Ok(outcome.exit_code())
}
