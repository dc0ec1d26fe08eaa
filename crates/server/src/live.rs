//! Live location channel.
//!
//! One outbound WebSocket to the backend's `/location` stream carries
//! every per-manifest logical channel. The [`ChannelManager`] owns the
//! subscription bookkeeping: joins are reference-counted, incoming
//! `locationUpdated` events are sequence-stamped and fanned out on
//! per-manifest broadcast channels, and the connection is opened on the
//! first join and closed when the last channel is released — lifecycle is
//! deterministic, not tied to any single view.
//!
//! Clients consume the stream through long-poll server functions:
//! `join_manifest_channel` / `poll_location_update` / `leave_manifest_channel`.

use dioxus::prelude::*;
use shared_types::LocationPing;

#[cfg(feature = "server")]
pub use manager::{channel_manager, ChannelManager};

/// How long a single long-poll call waits for news before returning `None`.
#[cfg(feature = "server")]
const LONG_POLL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(25);

/// Subscribe this process to a manifest's location events. Reference
/// counted; the first join opens the stream connection.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn join_manifest_channel(manifest_id: String) -> Result<(), ServerFnError> {
    if !crate::config::feature_flags().live_updates {
        return Ok(());
    }
    let manager = channel_manager();
    if manager.join(&manifest_id) {
        connection::join(manager, manifest_id);
    }
    Ok(())
}

/// Release one subscription on a manifest's channel. When the last
/// subscription goes, the logical channel is left; when no channels
/// remain, the connection is closed.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn leave_manifest_channel(manifest_id: String) -> Result<(), ServerFnError> {
    if !crate::config::feature_flags().live_updates {
        return Ok(());
    }
    let manager = channel_manager();
    if manager.leave(&manifest_id) {
        connection::leave(manager, manifest_id);
    }
    Ok(())
}

/// Long-poll for the next location event on a manifest channel newer than
/// `after_seq`. Returns `None` on timeout — the caller immediately polls
/// again.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn poll_location_update(
    manifest_id: String,
    after_seq: u64,
) -> Result<Option<LocationPing>, ServerFnError> {
    if !crate::config::feature_flags().live_updates {
        // Without the stream there is never news; park the poll so the
        // client loop doesn't spin.
        tokio::time::sleep(LONG_POLL_TIMEOUT).await;
        return Ok(None);
    }
    Ok(channel_manager()
        .poll(&manifest_id, after_seq, LONG_POLL_TIMEOUT)
        .await)
}

#[cfg(feature = "server")]
mod manager {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    use shared_types::{LocationPing, LocationUpdatedPayload};
    use tokio::sync::broadcast;

    static MANAGER: OnceLock<ChannelManager> = OnceLock::new();

    /// The process-wide channel manager.
    pub fn channel_manager() -> &'static ChannelManager {
        MANAGER.get_or_init(ChannelManager::new)
    }

    struct ChannelState {
        subscribers: usize,
        tx: broadcast::Sender<LocationPing>,
        /// Most recent event, so a poller that joined late catches up
        /// without waiting for the next fix.
        latest: Option<LocationPing>,
    }

    /// Reference-counted registry of per-manifest location channels.
    pub struct ChannelManager {
        channels: Mutex<HashMap<String, ChannelState>>,
        seq: AtomicU64,
    }

    impl ChannelManager {
        pub fn new() -> Self {
            Self {
                channels: Mutex::new(HashMap::new()),
                seq: AtomicU64::new(0),
            }
        }

        /// Add a subscription. Returns `true` when this created the
        /// logical channel (the caller should emit `joinManifest`).
        pub fn join(&self, manifest_id: &str) -> bool {
            let mut channels = self.channels.lock().unwrap();
            match channels.get_mut(manifest_id) {
                Some(state) => {
                    state.subscribers += 1;
                    false
                }
                None => {
                    let (tx, _) = broadcast::channel(32);
                    channels.insert(
                        manifest_id.to_string(),
                        ChannelState {
                            subscribers: 1,
                            tx,
                            latest: None,
                        },
                    );
                    true
                }
            }
        }

        /// Drop a subscription. Returns `true` when the logical channel was
        /// removed (the caller should emit `leaveManifest`).
        pub fn leave(&self, manifest_id: &str) -> bool {
            let mut channels = self.channels.lock().unwrap();
            let Some(state) = channels.get_mut(manifest_id) else {
                return false;
            };
            state.subscribers = state.subscribers.saturating_sub(1);
            if state.subscribers == 0 {
                channels.remove(manifest_id);
                true
            } else {
                false
            }
        }

        /// True when no logical channels remain.
        pub fn is_idle(&self) -> bool {
            self.channels.lock().unwrap().is_empty()
        }

        /// Manifest ids of every open logical channel.
        pub fn open_channels(&self) -> Vec<String> {
            self.channels.lock().unwrap().keys().cloned().collect()
        }

        /// Stamp an incoming event and fan it out to its manifest's
        /// subscribers. Events for channels nobody joined are dropped.
        pub fn publish(&self, payload: LocationUpdatedPayload) {
            let mut channels = self.channels.lock().unwrap();
            let Some(state) = channels.get_mut(&payload.manifest_id) else {
                return;
            };
            let ping = LocationPing {
                seq: self.seq.fetch_add(1, Ordering::SeqCst) + 1,
                manifest_id: payload.manifest_id,
                location: payload.location,
                recorded_at: payload.recorded_at,
            };
            state.latest = Some(ping.clone());
            // Send fails only when no receiver is currently polling; the
            // buffered latest covers that case.
            let _ = state.tx.send(ping);
        }

        /// Wait up to `timeout` for an event on `manifest_id` newer than
        /// `after_seq`. The buffered latest event satisfies the poll
        /// immediately when the poller is behind.
        pub async fn poll(
            &self,
            manifest_id: &str,
            after_seq: u64,
            timeout: Duration,
        ) -> Option<LocationPing> {
            let mut rx = {
                let channels = self.channels.lock().unwrap();
                let state = channels.get(manifest_id)?;
                if let Some(latest) = &state.latest {
                    if latest.seq > after_seq {
                        return Some(latest.clone());
                    }
                }
                state.tx.subscribe()
            };

            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                let ping = match tokio::time::timeout_at(deadline, rx.recv()).await {
                    Ok(Ok(ping)) => ping,
                    // Lagged receivers skip ahead; closed or timed out ends
                    // the poll.
                    Ok(Err(broadcast::error::RecvError::Lagged(_))) => continue,
                    _ => return None,
                };
                if ping.seq > after_seq {
                    return Some(ping);
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use shared_types::GeoPoint;

        fn payload(manifest_id: &str, lat: f64) -> LocationUpdatedPayload {
            LocationUpdatedPayload {
                manifest_id: manifest_id.to_string(),
                location: GeoPoint {
                    latitude: lat,
                    longitude: 0.0,
                    address: None,
                    last_updated: None,
                },
                recorded_at: None,
            }
        }

        #[test]
        fn join_is_reference_counted() {
            let manager = ChannelManager::new();
            assert!(manager.join("M1"));
            assert!(!manager.join("M1"));
            assert!(!manager.leave("M1"));
            assert!(manager.leave("M1"));
            assert!(manager.is_idle());
        }

        #[test]
        fn leave_without_join_is_a_no_op() {
            let manager = ChannelManager::new();
            assert!(!manager.leave("M1"));
        }

        #[tokio::test]
        async fn buffered_event_satisfies_late_poll() {
            let manager = ChannelManager::new();
            manager.join("M1");
            manager.publish(payload("M1", 40.7));

            let ping = manager
                .poll("M1", 0, Duration::from_millis(50))
                .await
                .expect("buffered event");
            assert_eq!(ping.manifest_id, "M1");
            assert_eq!(ping.location.latitude, 40.7);

            // Already-seen events do not satisfy a poll
            assert!(manager
                .poll("M1", ping.seq, Duration::from_millis(50))
                .await
                .is_none());
        }

        #[tokio::test]
        async fn poll_receives_event_published_while_waiting() {
            let manager = std::sync::Arc::new(ChannelManager::new());
            manager.join("M1");

            let waiter = {
                let manager = manager.clone();
                tokio::spawn(async move {
                    manager.poll("M1", 0, Duration::from_secs(2)).await
                })
            };
            tokio::time::sleep(Duration::from_millis(20)).await;
            manager.publish(payload("M1", 41.0));

            let ping = waiter.await.unwrap().expect("event while waiting");
            assert_eq!(ping.location.latitude, 41.0);
        }

        #[tokio::test]
        async fn events_are_scoped_to_their_manifest() {
            let manager = ChannelManager::new();
            manager.join("M1");
            manager.join("M2");
            manager.publish(payload("M1", 40.7));

            assert!(manager
                .poll("M1", 0, Duration::from_millis(50))
                .await
                .is_some());
            assert!(manager
                .poll("M2", 0, Duration::from_millis(50))
                .await
                .is_none());
        }

        #[tokio::test]
        async fn events_for_unjoined_channels_are_dropped() {
            let manager = ChannelManager::new();
            manager.publish(payload("M9", 1.0));
            assert!(manager
                .poll("M9", 0, Duration::from_millis(20))
                .await
                .is_none());
        }
    }
}

#[cfg(feature = "server")]
mod connection {
    use futures::{SinkExt, StreamExt};
    use std::sync::Mutex;
    use shared_types::{ChannelCommand, ChannelEvent};
    use tokio::sync::mpsc;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message;

    use super::manager::ChannelManager;

    /// Command queue into the connection task, present while connected.
    static COMMANDS: Mutex<Option<mpsc::UnboundedSender<ChannelCommand>>> = Mutex::new(None);

    /// Emit `joinManifest`, connecting first if no connection is live.
    pub fn join(manager: &'static ChannelManager, manifest_id: String) {
        let tx = ensure_connected(manager);
        let _ = tx.send(ChannelCommand::JoinManifest(manifest_id));
    }

    /// Emit `leaveManifest`; drop the connection when the manager is idle.
    pub fn leave(manager: &'static ChannelManager, manifest_id: String) {
        let mut guard = COMMANDS.lock().unwrap();
        if let Some(tx) = guard.as_ref() {
            let _ = tx.send(ChannelCommand::LeaveManifest(manifest_id));
        }
        if manager.is_idle() {
            // Dropping the sender ends the pump task's command stream,
            // which closes the socket.
            *guard = None;
        }
    }

    fn ensure_connected(manager: &'static ChannelManager) -> mpsc::UnboundedSender<ChannelCommand> {
        let mut guard = COMMANDS.lock().unwrap();
        if let Some(tx) = guard.as_ref() {
            return tx.clone();
        }

        let (tx, rx) = mpsc::unbounded_channel();
        *guard = Some(tx.clone());

        let url = format!("{}/location", crate::config::config().backend.ws_url());
        tokio::spawn(pump(manager, url, rx));
        tx
    }

    /// Connection task: forwards queued commands to the socket and routes
    /// incoming events into the manager. Exits when the command sender is
    /// dropped or the socket closes; a later join reconnects.
    async fn pump(
        manager: &'static ChannelManager,
        url: String,
        mut commands: mpsc::UnboundedReceiver<ChannelCommand>,
    ) {
        let (stream, _) = match connect_async(&url).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(url, error = %e, "Location stream connect failed");
                *COMMANDS.lock().unwrap() = None;
                return;
            }
        };
        tracing::info!(url, "Location stream connected");
        let (mut sink, mut source) = stream.split();

        // Channels joined before (re)connecting need their join frames
        // replayed on the fresh socket.
        for manifest_id in manager.open_channels() {
            if let Ok(text) = serde_json::to_string(&ChannelCommand::JoinManifest(manifest_id)) {
                let _ = sink.send(Message::Text(text.into())).await;
            }
        }

        loop {
            tokio::select! {
                cmd = commands.recv() => {
                    let Some(cmd) = cmd else { break };
                    let Ok(text) = serde_json::to_string(&cmd) else { continue };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                msg = source.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<ChannelEvent>(&text) {
                                Ok(ChannelEvent::LocationUpdated(payload)) => {
                                    manager.publish(payload);
                                }
                                Err(e) => {
                                    tracing::debug!(error = %e, "Unrecognized stream frame");
                                }
                            }
                        }
                        Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "Location stream read error");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        let _ = sink.close().await;
        *COMMANDS.lock().unwrap() = None;
        tracing::info!("Location stream closed");
    }
}
