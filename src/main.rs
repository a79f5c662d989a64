//! sshgrid CLI entry point.
//!
//! This binary provides the `sshgrid` command for opening a grid of
//! synchronized SSH sessions in tmux.

use clap::Parser;
use sshgrid::cli::Cli;
use sshgrid::config::Config;
use sshgrid::dry_run::DryRunTerminal;
use sshgrid::error::Result;
use sshgrid::tmux::TmuxTerminal;
use sshgrid::{launcher, loader, resolver, shell};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = loader::load(cli.config.as_deref())?;

    if cli.list {
        print_clusters(&config);
        return Ok(());
    }

    let destinations = resolver::resolve_destinations(&config, &cli.destinations)?;
    let env_shell = std::env::var("SHELL").ok();
    let shell = shell::resolve_login_shell(config.defaults.shell.as_deref(), env_shell.as_deref())?;
    let defaults = cli.ssh_defaults(&config.defaults, shell);
    debug!(?defaults, destinations = destinations.len(), "resolved");

    let plan = launcher::prepare(
        &destinations,
        &defaults,
        cli.column_hint(&config.defaults),
        config.defaults.spacer.as_deref(),
    )?;

    if cli.dry_run {
        let mut terminal = DryRunTerminal::new();
        launcher::launch(&plan, &mut terminal)?;
        terminal.print();
        return Ok(());
    }

    let mut terminal = TmuxTerminal::connect(&cli.name)?;
    launcher::launch(&plan, &mut terminal)?;

    if !terminal.is_inside() {
        if cli.no_attach {
            println!("Attach with: tmux attach-session -t {}", terminal.session_name());
        } else {
            terminal.attach()?;
        }
    }

    Ok(())
}

/// Print all clusters and their members.
fn print_clusters(config: &Config) {
    if config.clusters.is_empty() {
        println!("No clusters defined.");
        return;
    }
    println!("Clusters:");
    for name in config.list_clusters() {
        let members = config.get_cluster(&name).unwrap_or_default();
        println!("  {} ({})", name, members.join(" "));
    }
}
