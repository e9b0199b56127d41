use std::time::Duration;

use crate::invocation::Invocation;

pub const DEFAULT_GIT_USER_NAME: &str = "admin-gulpanzer";
pub const DEFAULT_GIT_USER_EMAIL: &str = "admin@gulpanzer.xyz";

/// How long the readiness wait blocks before giving up.
pub const DEPENDENCY_TIMEOUT: Duration = Duration::from_secs(300);

/// Feature flags are enabled only by the exact tokens `true` and `True`.
/// Everything else, including `1`, `TRUE` and the empty string, is off.
pub fn is_truthy(value: &str) -> bool {
    matches!(value, "true" | "True")
}

/// Name and email attributed to git actions inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Resolve overrides against the fixed defaults. Set values are kept verbatim.
    pub fn resolve(name: Option<String>, email: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| DEFAULT_GIT_USER_NAME.to_string()),
            email: email.unwrap_or_else(|| DEFAULT_GIT_USER_EMAIL.to_string()),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// The TCP endpoint the readiness wait blocks on.
///
/// Host and port are carried as given; validating them is the prober's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTarget {
    pub host: Option<String>,
    pub port: Option<String>,
    pub timeout: Duration,
}

impl DependencyTarget {
    pub fn new(host: Option<String>, port: Option<String>) -> Self {
        Self {
            host,
            port,
            timeout: DEPENDENCY_TIMEOUT,
        }
    }

    /// `tcp://host:port`, with `?` standing in for unset parts.
    pub fn display_url(&self) -> String {
        format!(
            "tcp://{}:{}",
            self.host.as_deref().unwrap_or("?"),
            self.port.as_deref().unwrap_or("?")
        )
    }
}

/// Everything the sequence needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub identity: Identity,
    pub print_env: bool,
    pub wait_for_dependency: bool,
    pub dependency: DependencyTarget,
    pub invocation: Invocation,
}
