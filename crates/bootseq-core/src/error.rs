use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("no command given: pass a command to run, or 'chill' to idle")]
    EmptyInvocation,

    #[error("git not found on PATH: cannot configure identity")]
    GitNotFound,

    #[error("failed to set git {key}: {reason}")]
    Identity { key: String, reason: String },

    #[error("dependency {target} unavailable: {reason}")]
    DependencyUnavailable { target: String, reason: String },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("failed to run '{command}': {source}")]
    Dispatch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BootstrapError {
    pub fn timed_out(target: impl Into<String>, timeout: Duration) -> Self {
        BootstrapError::DependencyUnavailable {
            target: target.into(),
            reason: format!("not reachable after {}s", timeout.as_secs()),
        }
    }

    /// Process exit status reported to the container runtime for this failure.
    ///
    /// Dispatch failures follow the shell convention (127 not found, 126 not
    /// executable) so they read the same as a failed `exec` in a script.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::EmptyInvocation => 2,
            BootstrapError::GitNotFound | BootstrapError::Identity { .. } => 3,
            BootstrapError::DependencyUnavailable { .. } => 4,
            BootstrapError::CommandNotFound(_) => 127,
            BootstrapError::Dispatch { .. } => 126,
            BootstrapError::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_failure_class() {
        let identity = BootstrapError::Identity {
            key: "user.name".into(),
            reason: "boom".into(),
        };
        let dependency = BootstrapError::timed_out("tcp://db:5432", Duration::from_secs(300));
        let not_found = BootstrapError::CommandNotFound("nope".into());
        let dispatch = BootstrapError::Dispatch {
            command: "./script".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        let codes = [
            BootstrapError::EmptyInvocation.exit_code(),
            identity.exit_code(),
            dependency.exit_code(),
            not_found.exit_code(),
            dispatch.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 127, 126]);
        assert_eq!(BootstrapError::GitNotFound.exit_code(), 3);
    }

    #[test]
    fn timeout_message_names_target_and_seconds() {
        let err = BootstrapError::timed_out("tcp://db:5432", Duration::from_secs(300));
        assert_eq!(
            err.to_string(),
            "dependency tcp://db:5432 unavailable: not reachable after 300s"
        );
    }
}
