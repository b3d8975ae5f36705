use antwalk::cli::{Cli, Commands};
use antwalk::output::{self, Verbosity};
use antwalk::{AntwalkContext, commands};
use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use std::io;
use std::process;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    output::set_verbosity(verbosity);
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Select(args) => {
            let ctx = AntwalkContext::new()?;
            commands::select::execute(&ctx, &args)?;
        }
        Commands::Match {
            pattern,
            paths,
            exclude,
            ignore_case,
            dir,
        } => {
            commands::matches::execute(&pattern, &paths, exclude, ignore_case, dir)?;
        }
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => {
            let mut ctx = AntwalkContext::new()?;
            commands::config::execute(&mut ctx, key.as_deref(), value, unset, list)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `level`.
fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
