//! Periodic sampling loop
//!
//! Each cycle runs a render step and hands its output to a callback, then
//! sleeps out the rest of the interval. A failed cycle produces an
//! `error: ...` line instead of stopping the loop.
//!
//! Dual sampling launches two detached tasks per cycle, one immediately and
//! one after a delay. Each writes into its own [`SampleCell`]. The cells are
//! read after a fixed window of 4/3 of the delay whether or not the tasks
//! have finished.

use anyhow::{anyhow, Result};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Longest delay fraction for which the read window still fits the interval
const MAX_DELAY_FRACTION: f64 = 0.75;

/// `n` tenths of a second, the unit monitor rates are configured in
pub fn tenths(n: u64) -> Duration {
    Duration::from_millis(n.saturating_mul(100))
}

/// Content of a sample cell
#[derive(Debug, Clone, PartialEq)]
pub enum SampleState<T> {
    /// The task has not stored a result yet
    Pending,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> SampleState<T> {
    /// Pending counts as an empty sample; only a failure is an error
    pub fn into_result(self) -> Result<Vec<T>> {
        match self {
            SampleState::Pending => Ok(Vec::new()),
            SampleState::Ready(values) => Ok(values),
            SampleState::Failed(message) => Err(anyhow!(message)),
        }
    }
}

/// Single-slot cell holding the latest result of one sampling task
#[derive(Debug)]
pub struct SampleCell<T> {
    slot: Arc<Mutex<SampleState<T>>>,
}

impl<T> Clone for SampleCell<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for SampleCell<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(SampleState::Pending)),
        }
    }
}

impl<T> SampleCell<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the cell with `state`
    pub fn put(&self, state: SampleState<T>) {
        // A poisoned slot still holds a whole SampleState
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = state;
    }

    /// Take the current state, leaving the cell pending
    pub fn take(&self) -> SampleState<T> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *slot, SampleState::Pending)
    }
}

/// Timing for a poller
#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    /// Time from the start of one cycle to the start of the next
    pub interval: Duration,
    /// Delay of the second sample as a fraction of the interval
    pub delay_fraction: f64,
}

impl PollerConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            delay_fraction: 0.5,
        }
    }

    /// Delay before the second sample
    pub fn delay(&self) -> Duration {
        let fraction = if self.delay_fraction.is_nan() {
            0.0
        } else {
            self.delay_fraction.clamp(0.0, MAX_DELAY_FRACTION)
        };
        self.interval.mul_f64(fraction)
    }

    /// How long a dual-sample cycle waits before reading both cells
    pub fn sample_window(&self) -> Duration {
        self.delay() * 4 / 3
    }
}

/// Drives one monitor's cycles
#[derive(Debug, Clone)]
pub struct Poller {
    config: PollerConfig,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Run `action` twice, the second time after the configured delay
    ///
    /// Returns whatever both cells hold once the sample window has passed.
    /// A task that is still running yields an empty list; a task that
    /// failed fails the pair.
    pub async fn sample_twice<T, F, Fut>(&self, action: Arc<F>) -> Result<(Vec<T>, Vec<T>)>
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        let delay = self.config.delay();
        let first = spawn_sample(Arc::clone(&action), Duration::ZERO);
        let second = spawn_sample(action, delay);

        sleep(self.config.sample_window()).await;

        let first = first.take();
        let second = second.take();
        if matches!(first, SampleState::Pending) || matches!(second, SampleState::Pending) {
            log::trace!("Sample window closed with a sample still pending");
        }
        Ok((first.into_result()?, second.into_result()?))
    }

    /// Run one cycle, turning a failure into an `error: ` line
    pub async fn poll_once<C, Fut>(&self, cycle: &mut C) -> String
    where
        C: FnMut() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        match cycle().await {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Monitor cycle failed: {:#}", e);
                format!("error: {:#}", e)
            }
        }
    }

    /// Run cycles forever, delivering each output to `deliver`
    pub async fn run<C, Fut, D>(&self, mut cycle: C, mut deliver: D)
    where
        C: FnMut() -> Fut,
        Fut: Future<Output = Result<String>>,
        D: FnMut(String),
    {
        loop {
            let start = Instant::now();
            let output = self.poll_once(&mut cycle).await;
            deliver(output);

            let elapsed = start.elapsed();
            log::trace!("Monitor cycle took {:?}", elapsed);
            sleep(self.config.interval.saturating_sub(elapsed)).await;
        }
    }
}

/// Launch a detached task that waits `delay`, runs `action` and stores the
/// outcome in a fresh cell
fn spawn_sample<T, F, Fut>(action: Arc<F>, delay: Duration) -> SampleCell<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    let cell = SampleCell::new();
    let writer = cell.clone();
    tokio::spawn(async move {
        if !delay.is_zero() {
            sleep(delay).await;
        }
        let state = match action().await {
            Ok(values) => SampleState::Ready(values),
            Err(e) => SampleState::Failed(format!("{:#}", e)),
        };
        writer.put(state);
    });
    cell
}
