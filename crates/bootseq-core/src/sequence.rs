//! The ordered bootstrap steps that run before control is handed over.
//!
//! `Sequencer::run` configures identity, optionally dumps the environment,
//! optionally waits for the dependency, and returns the resolved
//! [`Invocation`]. Exec and idle are terminal, so the caller performs them.

use std::io::Write;

use crate::config::BootstrapConfig;
use crate::env_dump;
use crate::error::Result;
use crate::identity::IdentityStore;
use crate::invocation::Invocation;
use crate::readiness::DependencyProbe;

pub struct Sequencer<S, P> {
    store: S,
    probe: P,
}

impl<S: IdentityStore, P: DependencyProbe> Sequencer<S, P> {
    pub fn new(store: S, probe: P) -> Self {
        Self { store, probe }
    }

    pub async fn run<W: Write>(&self, config: &BootstrapConfig, out: &mut W) -> Result<Invocation> {
        self.store.configure(&config.identity)?;

        if config.print_env {
            if let Err(e) = env_dump::dump_process_env(out) {
                tracing::warn!(error = %e, "failed to print environment");
            }
        }

        if config.wait_for_dependency {
            self.probe.wait(&config.dependency).await?;
        }

        Ok(config.invocation.clone())
    }
}
