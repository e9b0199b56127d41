//! Durable git identity for everything that runs after bootstrap.
//!
//! The identity lands in git's global config (`~/.gitconfig`, or whatever
//! `GIT_CONFIG_GLOBAL` points at), so it outlives this process and is picked
//! up by the dispatched command.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::Identity;
use crate::error::{BootstrapError, Result};

/// Somewhere a git identity can be persisted.
pub trait IdentityStore {
    fn configure(&self, identity: &Identity) -> Result<()>;
}

/// Writes `user.name` / `user.email` with `git config --global`.
#[derive(Debug, Clone)]
pub struct GitGlobalConfig {
    git: PathBuf,
    config_file: Option<PathBuf>,
}

impl GitGlobalConfig {
    /// Locate `git` on PATH.
    pub fn discover() -> Result<Self> {
        let git = which::which("git").map_err(|_| BootstrapError::GitNotFound)?;
        Ok(Self {
            git,
            config_file: None,
        })
    }

    /// Redirect the global config to `path` via `GIT_CONFIG_GLOBAL`.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    #[cfg(test)]
    fn git(&self) -> &std::path::Path {
        &self.git
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cmd = Command::new(&self.git);
        cmd.args(["config", "--global", key, value]);
        if let Some(file) = &self.config_file {
            cmd.env("GIT_CONFIG_GLOBAL", file);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| BootstrapError::Identity {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("git exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(BootstrapError::Identity {
                key: key.to_string(),
                reason,
            });
        }

        Ok(())
    }
}

impl IdentityStore for GitGlobalConfig {
    fn configure(&self, identity: &Identity) -> Result<()> {
        self.set("user.name", &identity.name)?;
        self.set("user.email", &identity.email)?;
        tracing::debug!(name = %identity.name, email = %identity.email, "git identity configured");
        Ok(())
    }
}
