use clap::Parser;
use fixit::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => fixit::cli::commands::init::run(args),
        Commands::Import(args) => fixit::cli::commands::import::run(args, &global),
        Commands::Export(args) => fixit::cli::commands::export::run(args, &global),
        Commands::List(args) => fixit::cli::commands::list::run(args, &global),
        Commands::Wizard(args) => fixit::cli::commands::wizard::run(args, &global),
        Commands::Completions(args) => fixit::cli::commands::completions::run(args),
    }
}
