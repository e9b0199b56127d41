use std::future::Future;

pub const GREETING: &str = "Nothing to run, chilling until the container is stopped";

/// Log the greeting once, then park until `shutdown` resolves.
pub async fn idle_until<F: Future>(shutdown: F) -> F::Output {
    tracing::info!("{GREETING}");
    shutdown.await
}

/// Resolves when the process receives SIGINT or SIGTERM.
///
/// As PID 1 the default SIGTERM disposition is ignored, so it must be
/// handled here for `docker stop` to end idle mode.
pub async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("shutdown signal received");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn idle_does_not_return_on_its_own() {
        let parked = tokio::time::timeout(
            Duration::from_millis(200),
            idle_until(std::future::pending::<()>()),
        )
        .await;
        assert!(parked.is_err(), "idle returned without a shutdown signal");
    }

    #[tokio::test]
    async fn idle_returns_when_shutdown_resolves() {
        let (tx, rx) = tokio::sync::oneshot::channel::<&str>();
        let handle = tokio::spawn(idle_until(rx));
        tx.send("stop").unwrap();
        assert_eq!(handle.await.unwrap().unwrap(), "stop");
    }
}
