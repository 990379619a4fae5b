use std::io::Write;
use std::path::PathBuf;

use acclaunch::args::{build_launch_plan, build_launch_plan_from_tokens, FsProbe, LaunchContext};
use acclaunch::config::LauncherConfig;
use acclaunch::logging::init_tracing;
use anyhow::{Context, Result};
use clap::Parser;

/// Env var holding the raw argument string (set by the Windows script).
const INPUT_ARGS_ENV: &str = "inputArgs";

/// Prints the runtime command line that launches an application client.
#[derive(Debug, Parser)]
#[command(
    name = "acclaunch",
    version,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Launcher configuration file (default: <config dir>/acclaunch/config.toml).
    #[arg(long = "launcher-config", value_name = "PATH")]
    launcher_config: Option<PathBuf>,

    /// Print the launch plan as JSON instead of the command line.
    #[arg(long)]
    json: bool,

    /// Launcher arguments: runtime options, client options, client and its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.launcher_config {
        Some(path) => LauncherConfig::load_from(path),
        None => LauncherConfig::load(),
    }
    .context("loading launcher configuration")?;

    let ctx = LaunchContext::from_env()?;
    let probe = FsProbe;

    let plan = match std::env::var(INPUT_ARGS_ENV) {
        Ok(raw) => build_launch_plan(&raw, &ctx, &config, &probe)?,
        Err(_) => build_launch_plan_from_tokens(&cli.args, &ctx, &config, &probe)?,
    };
    tracing::info!("Launch command: {}", plan.command_line());

    let output = if cli.json {
        serde_json::to_string_pretty(&plan)?
    } else {
        plan.command_line()
    };

    // No trailing newline: the calling script executes stdout verbatim.
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
