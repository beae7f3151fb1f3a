use std::time::Duration;
use tracing::info;

use crate::session_store::SessionStore;

/// Periodically drops booking sessions nobody has touched for `idle_ttl`.
pub async fn start_session_sweeper(sessions: SessionStore, idle_ttl: Duration, every: Duration) {
    info!(?idle_ttl, ?every, "Session sweeper started");

    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let removed = sessions.cleanup_expired(idle_ttl).await;
        if removed > 0 {
            let remaining = sessions.len().await;
            info!(removed, remaining, "Expired idle sessions");
        }
    }
}
