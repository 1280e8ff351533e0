use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, Semaphore};

use super::{Notifier, NotifyError, OutboundEmail, SEND_TIMEOUT};

/// Fire-and-forget delivery. Each notification runs on its own task, at most
/// `max_in_flight` sending at a time; callers never wait on delivery.
#[derive(Clone)]
pub struct Dispatcher {
    notifier: Option<Arc<dyn Notifier>>,
    slots: Arc<Semaphore>,
    pending: Arc<Pending>,
}

#[derive(Default)]
struct Pending {
    count: AtomicUsize,
    idle: Notify,
}

/// Counts a dispatched task until it finishes, however it finishes.
struct PendingGuard(Arc<Pending>);

impl PendingGuard {
    fn new(pending: Arc<Pending>) -> Self {
        pending.count.fetch_add(1, Ordering::SeqCst);
        Self(pending)
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

impl Dispatcher {
    pub fn new(notifier: Option<Arc<dyn Notifier>>, max_in_flight: usize) -> Self {
        Self {
            notifier,
            slots: Arc::new(Semaphore::new(max_in_flight.max(1))),
            pending: Arc::new(Pending::default()),
        }
    }

    /// Number of notifications dispatched but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.pending.count.load(Ordering::SeqCst)
    }

    /// Queue a delivery attempt and return immediately. Must be called from
    /// within a Tokio runtime.
    pub fn dispatch(&self, email: OutboundEmail) {
        let Some(notifier) = self.notifier.clone() else {
            tracing::warn!("Mail transport not configured; skipping notification \"{}\"", email.subject);
            return;
        };

        let guard = PendingGuard::new(self.pending.clone());
        let slots = self.slots.clone();
        tokio::spawn(async move {
            let _guard = guard;
            let Ok(_permit) = slots.acquire_owned().await else {
                return;
            };
            deliver(notifier.as_ref(), &email).await;
        });
    }

    /// Wait for every dispatched delivery to finish. Returns false if
    /// `timeout` elapsed first.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let idle = async {
            loop {
                let notified = self.pending.idle.notified();
                if self.in_flight() == 0 {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, idle).await.is_ok()
    }
}

async fn deliver(notifier: &dyn Notifier, email: &OutboundEmail) {
    let result = match tokio::time::timeout(SEND_TIMEOUT, notifier.send(email)).await {
        Ok(result) => result,
        Err(_) => Err(NotifyError::Timeout(SEND_TIMEOUT)),
    };

    match result {
        Ok(()) => tracing::info!(
            transport = notifier.transport(),
            "Notification sent to {}",
            email.to
        ),
        Err(e) => tracing::error!(
            transport = notifier.transport(),
            "Failed to send notification to {}: {e}",
            email.to
        ),
    }
}
