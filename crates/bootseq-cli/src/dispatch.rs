use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::process::Command;

use bootseq_core::invocation::command_line;
use bootseq_core::BootstrapError;

fn classify(program: &OsStr, err: std::io::Error) -> BootstrapError {
    let program = program.to_string_lossy().into_owned();
    match err.kind() {
        ErrorKind::NotFound => BootstrapError::CommandNotFound(program),
        _ => BootstrapError::Dispatch {
            command: program,
            source: err,
        },
    }
}

/// Replace this process with `argv`. Returns only if that failed.
///
/// The new program inherits the environment, including the git identity
/// written during bootstrap.
#[cfg(unix)]
pub fn dispatch(argv: &[OsString]) -> BootstrapError {
    use std::os::unix::process::CommandExt;

    let Some((program, args)) = argv.split_first() else {
        return BootstrapError::EmptyInvocation;
    };

    tracing::info!("Running: {}", command_line(argv));
    let err = Command::new(program).args(args).exec();
    classify(program, err)
}

/// Without exec, run `argv` as a child and exit with its status.
#[cfg(not(unix))]
pub fn dispatch(argv: &[OsString]) -> BootstrapError {
    let Some((program, args)) = argv.split_first() else {
        return BootstrapError::EmptyInvocation;
    };

    tracing::info!("Running: {}", command_line(argv));
    match Command::new(program).args(args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => classify(program, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_maps_to_not_found() {
        let err = dispatch(&["bootseq-definitely-not-a-real-binary".into()]);
        assert!(matches!(err, BootstrapError::CommandNotFound(ref p) if p == "bootseq-definitely-not-a-real-binary"));
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn empty_argv_is_rejected() {
        assert!(matches!(dispatch(&[]), BootstrapError::EmptyInvocation));
    }

    #[test]
    fn permission_denied_maps_to_dispatch_error() {
        let err = classify(
            OsStr::new("./script.sh"),
            std::io::Error::from(ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, BootstrapError::Dispatch { ref command, .. } if command == "./script.sh"));
        assert_eq!(err.exit_code(), 126);
    }
}
