//! Keystroke debouncing for the search boxes.
//!
//! Each new input aborts the previously scheduled search, so only the most
//! recent query actually fires once the quiet period elapses. This is the
//! only cancellation path in the whole system; in-flight service calls are
//! never aborted.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Schedule `search` to run with `query` after the quiet period,
    /// cancelling whatever was scheduled before.
    pub fn input<F, Fut>(&mut self, query: String, search: F)
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet_period = self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(quiet_period).await;
            search(query).await;
        }));
    }

    /// Drop the pending search, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Wait for the scheduled search to run. Used by tests and by the binary
    /// before rendering.
    pub async fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.await;
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (
        Arc<Mutex<Vec<String>>>,
        impl Fn(String) -> std::future::Ready<()> + Clone,
    ) {
        let fired: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let record = move |query: String| {
            sink.lock().unwrap().push(query);
            std::future::ready(())
        };
        (fired, record)
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_most_recent_query_fires() {
        let (fired, record) = recorder();
        let mut debouncer = Debouncer::default();

        debouncer.input("jo".to_string(), record.clone());
        debouncer.input("joh".to_string(), record.clone());
        debouncer.input("john".to_string(), record);
        debouncer.flush().await;

        assert_eq!(*fired.lock().unwrap(), vec!["john".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_period_delays_the_search() {
        let (fired, record) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.input("query".to_string(), record);
        time::sleep(Duration::from_millis(100)).await;
        assert!(fired.lock().unwrap().is_empty());

        debouncer.flush().await;
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_pending_search() {
        let (fired, record) = recorder();
        let mut debouncer = Debouncer::default();

        debouncer.input("query".to_string(), record);
        debouncer.cancel();
        time::sleep(Duration::from_millis(500)).await;

        assert!(fired.lock().unwrap().is_empty());
    }
}
