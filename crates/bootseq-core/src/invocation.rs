use std::ffi::OsString;

use crate::error::{BootstrapError, Result};

/// First token that selects idle mode instead of running a command.
pub const IDLE_SENTINEL: &str = "chill";

/// What the container was asked to do once bootstrap finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Keep the container alive until it is stopped.
    Idle,
    /// Replace this process with the given argv. Never empty.
    Run(Vec<OsString>),
}

impl Invocation {
    /// Decide the mode from the command-line tokens.
    ///
    /// A missing or empty first token is rejected rather than handed to exec.
    pub fn parse(tokens: Vec<OsString>) -> Result<Self> {
        match tokens.first() {
            None => Err(BootstrapError::EmptyInvocation),
            Some(first) if first.is_empty() => Err(BootstrapError::EmptyInvocation),
            Some(first) if first == IDLE_SENTINEL => Ok(Invocation::Idle),
            Some(_) => Ok(Invocation::Run(tokens)),
        }
    }

    /// The command line as logged before dispatch.
    pub fn command_line(&self) -> Option<String> {
        match self {
            Invocation::Idle => None,
            Invocation::Run(argv) => Some(command_line(argv)),
        }
    }
}

/// `argv` joined by spaces, with non-UTF-8 bytes replaced. For logs only.
pub fn command_line(argv: &[OsString]) -> String {
    argv.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(v: &[&str]) -> Vec<OsString> {
        v.iter().map(OsString::from).collect()
    }

    #[test]
    fn chill_selects_idle() {
        assert_eq!(Invocation::parse(tokens(&["chill"])).unwrap(), Invocation::Idle);
    }

    #[test]
    fn chill_ignores_trailing_tokens() {
        assert_eq!(
            Invocation::parse(tokens(&["chill", "extra"])).unwrap(),
            Invocation::Idle
        );
    }

    #[test]
    fn anything_else_runs_full_argv() {
        let inv = Invocation::parse(tokens(&["echo", "hello"])).unwrap();
        assert_eq!(inv, Invocation::Run(tokens(&["echo", "hello"])));
        assert_eq!(inv.command_line().as_deref(), Some("echo hello"));
    }

    #[test]
    fn sentinel_match_is_exact() {
        let inv = Invocation::parse(tokens(&["Chill"])).unwrap();
        assert_eq!(inv, Invocation::Run(tokens(&["Chill"])));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_tokens_are_kept_as_is() {
        use std::os::unix::ffi::OsStringExt;

        let arg = OsString::from_vec(b"caf\xe9".to_vec());
        let inv = Invocation::parse(vec!["echo".into(), arg.clone()]).unwrap();
        assert_eq!(inv, Invocation::Run(vec!["echo".into(), arg]));
        assert_eq!(inv.command_line().as_deref(), Some("echo caf\u{fffd}"));
    }

    #[test]
    fn help_and_version_tokens_are_commands() {
        for first in ["--help", "-h", "--version", "-V"] {
            let inv = Invocation::parse(tokens(&[first])).unwrap();
            assert_eq!(inv, Invocation::Run(tokens(&[first])));
        }
    }

    #[test]
    fn empty_invocation_is_rejected() {
        assert!(matches!(
            Invocation::parse(vec![]),
            Err(BootstrapError::EmptyInvocation)
        ));
        assert!(matches!(
            Invocation::parse(tokens(&["", "x"])),
            Err(BootstrapError::EmptyInvocation)
        ));
    }
}
