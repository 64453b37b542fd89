//! `fixit completions` command - shell completion scripts
//!
//! Writes a completion script for the requested shell to stdout, e.g.
//! `source <(fixit completions bash)` in `~/.bashrc` or
//! `fixit completions fish > ~/.config/fish/completions/fixit.fish`.
//! Completions cover subcommands, flags, and value enums such as the
//! duplicate strategy.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "fixit", &mut io::stdout());
    Ok(())
}
