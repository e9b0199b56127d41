mod dispatch;

use anyhow::{Context, Result};
use bootseq_core::config::{is_truthy, BootstrapConfig, DependencyTarget, Identity};
use bootseq_core::identity::GitGlobalConfig;
use bootseq_core::idle;
use bootseq_core::invocation::Invocation;
use bootseq_core::readiness::TcpProbe;
use bootseq_core::sequence::Sequencer;
use bootseq_core::BootstrapError;
use clap::Parser;
use std::ffi::OsString;
use std::io::IsTerminal;

#[derive(Parser, Debug)]
#[command(
    name = "bootseq",
    about = "Container entrypoint: set git identity, optionally wait for the database, then run a command or idle",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// git user.name (default: admin-gulpanzer)
    #[arg(long, env = "GIT_USER_NAME")]
    git_user_name: Option<String>,

    /// git user.email (default: admin@gulpanzer.xyz)
    #[arg(long, env = "GIT_USER_EMAIL")]
    git_user_email: Option<String>,

    /// Print the environment before starting ("true" or "True" to enable)
    #[arg(long, env = "PRINT_ENV_ON_LOAD", value_name = "BOOL")]
    print_env_on_load: Option<String>,

    /// Wait for DB_HOST:DB_PORT to accept TCP connections ("true" or "True" to enable)
    #[arg(long, env = "WAIT_FOR_DB", value_name = "BOOL")]
    wait_for_db: Option<String>,

    /// Host of the dependency to wait for
    #[arg(long, env = "DB_HOST")]
    db_host: Option<String>,

    /// TCP port of the dependency to wait for
    #[arg(long, env = "DB_PORT")]
    db_port: Option<String>,

    /// Command to run, or `chill` to keep the container alive.
    /// Tokens are passed through untouched, including `--help` and non-UTF-8 bytes.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    command: Vec<OsString>,
}

impl Cli {
    fn into_config(self) -> bootseq_core::Result<BootstrapConfig> {
        let flag = |v: &Option<String>| v.as_deref().is_some_and(is_truthy);
        Ok(BootstrapConfig {
            identity: Identity::resolve(self.git_user_name, self.git_user_email),
            print_env: flag(&self.print_env_on_load),
            wait_for_dependency: flag(&self.wait_for_db),
            dependency: DependencyTarget::new(self.db_host, self.db_port),
            invocation: Invocation::parse(self.command)?,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        let code = e
            .downcast_ref::<BootstrapError>()
            .map(BootstrapError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;

    // One thread of control: the readiness wait and the idle wait are the
    // only places that suspend.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let sequencer = Sequencer::new(GitGlobalConfig::discover()?, TcpProbe::default());
    let invocation = rt.block_on(sequencer.run(&config, &mut std::io::stdout()))?;

    match invocation {
        Invocation::Run(argv) => {
            drop(rt);
            Err(dispatch::dispatch(&argv).into())
        }
        Invocation::Idle => {
            rt.block_on(idle::idle_until(idle::shutdown_signal()))
                .context("failed to wait for shutdown signal")?;
            Ok(())
        }
    }
}
