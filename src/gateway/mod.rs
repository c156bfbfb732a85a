//! Gateway: the poll loop connecting the transport, the config store, and
//! the script executor.
//!
//! Each fetched event is dispatched as its own task. A semaphore caps how
//! many dispatches run at once; when it is exhausted the poller waits for a
//! permit before spawning more.

mod dispatch;
mod notify;


use crate::store::ConfigStore;
use hubctl_core::traits::{ScriptExecutor, Transport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The central gateway that turns inbound events into service actions.
pub struct Gateway {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) executor: Arc<dyn ScriptExecutor>,
    pub(super) store: ConfigStore,
    pub(super) poll_interval: Duration,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl Gateway {
    pub fn new(
        transport: Arc<dyn Transport>,
        executor: Arc<dyn ScriptExecutor>,
        store: ConfigStore,
        poll_interval: Duration,
        max_concurrent: usize,
    ) -> Self {
        Self {
            transport,
            executor,
            store,
            poll_interval,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Run the poll loop until Ctrl-C.
    ///
    /// Transport errors never end the loop. In-flight dispatches are not
    /// awaited on shutdown.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        if let Err(e) = self.transport.register_commands().await {
            warn!("failed to register bot commands: {e}");
        }

        info!(
            "hubctl gateway running | transport: {} | poll: {}s | max concurrent: {} | config: {}",
            self.transport.name(),
            self.poll_interval.as_secs(),
            self.max_concurrent,
            self.store.path().display(),
        );

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let mut offset: i64 = 0;
        loop {
            tokio::select! {
                _ = self.poll_cycle(&mut offset) => {}
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        info!("hubctl gateway stopped");
        Ok(())
    }

    /// One fetch plus the fixed pause that follows it.
    async fn poll_cycle(self: &Arc<Self>, offset: &mut i64) {
        self.poll_once(offset).await;
        tokio::time::sleep(self.poll_interval).await;
    }

    /// Fetch one batch starting at `offset`, spawn a dispatch per event, and
    /// advance `offset` past the highest sequence number seen.
    ///
    /// The cursor never moves backwards. On fetch failure it is left alone.
    pub(super) async fn poll_once(self: &Arc<Self>, offset: &mut i64) -> Vec<JoinHandle<()>> {
        let events = match self.transport.fetch_updates(*offset).await {
            Ok(events) => events,
            Err(e) => {
                error!("error getting updates: {e}");
                return Vec::new();
            }
        };

        let mut handles = Vec::with_capacity(events.len());
        for event in events {
            *offset = (*offset).max(event.sequence + 1);

            let permit = match self.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("dispatch pool closed: {e}");
                    break;
                }
            };
            let gw = self.clone();
            handles.push(tokio::spawn(async move {
                gw.handle_event(event).await;
                drop(permit);
            }));
        }
        handles
    }
}
