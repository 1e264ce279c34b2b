use std::time::Duration;

use rand::Rng;
use tokio::time;

/// Artificial delay injected at the service boundary.
///
/// This simulates network latency and nothing else: there is no queueing, no
/// backpressure, no timeout and no cancellation. A service call sleeps, then
/// performs its store access synchronously under the store lock.
#[derive(Debug, Clone, Copy)]
pub enum Latency {
    None,
    Fixed(Duration),
    Jittered { min: Duration, max: Duration },
}

impl Latency {
    pub async fn wait(self) {
        match self {
            Self::None => {}
            Self::Fixed(delay) => time::sleep(delay).await,
            Self::Jittered { min, max } => {
                let span = max.saturating_sub(min).as_millis() as u64;
                let extra = rand::thread_rng().gen_range(0..=span);
                time::sleep(min + Duration::from_millis(extra)).await;
            }
        }
    }
}

/// Per-operation delays, matching the profile of the simulated backend:
/// listing is slower than a point fetch, creation is the slowest call.
#[derive(Debug, Clone, Copy)]
pub struct LatencyProfile {
    pub list: Latency,
    pub fetch: Latency,
    pub create: Latency,
    pub update: Latency,
    pub delete: Latency,
    pub query: Latency,
}

impl LatencyProfile {
    /// The fixed per-operation delays of the simulated backend.
    pub fn simulated() -> Self {
        Self {
            list: Latency::Fixed(Duration::from_millis(300)),
            fetch: Latency::Fixed(Duration::from_millis(200)),
            create: Latency::Fixed(Duration::from_millis(400)),
            update: Latency::Fixed(Duration::from_millis(300)),
            delete: Latency::Fixed(Duration::from_millis(250)),
            query: Latency::Fixed(Duration::from_millis(200)),
        }
    }

    /// One uniform jittered delay for every operation.
    pub fn jittered(min: Duration, max: Duration) -> Self {
        let latency = Latency::Jittered { min, max };
        Self {
            list: latency,
            fetch: latency,
            create: latency,
            update: latency,
            delete: latency,
            query: latency,
        }
    }

    /// No delay at all. Used by tests.
    pub fn instant() -> Self {
        Self {
            list: Latency::None,
            fetch: Latency::None,
            create: Latency::None,
            update: Latency::None,
            delete: Latency::None,
            query: Latency::None,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::simulated()
    }
}
