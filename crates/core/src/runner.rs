//! Runs one monitor on a poller

use crate::error::OptionError;
use crate::monitor::{Monitor, Sampling};
use crate::options::parse_options;
use crate::poller::{Poller, PollerConfig};
use crate::store::ConfigStore;
use crate::template::fill_template;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Duration;

/// A monitor instance together with its configuration store and poller
pub struct MonitorRunner {
    monitor: Arc<dyn Monitor>,
    store: ConfigStore,
    poller: Poller,
}

impl MonitorRunner {
    /// Create a runner using the monitor's default configuration
    pub fn new(monitor: Arc<dyn Monitor>, interval: Duration) -> Self {
        let store = ConfigStore::new(monitor.default_config());
        Self {
            monitor,
            store,
            poller: Poller::new(PollerConfig::new(interval)),
        }
    }

    /// Replace the poller timing
    pub fn with_poller_config(mut self, config: PollerConfig) -> Self {
        self.poller = Poller::new(config);
        self
    }

    /// Handle for reading or reconfiguring this monitor while it runs
    pub fn store(&self) -> ConfigStore {
        self.store.clone()
    }

    pub fn monitor(&self) -> &Arc<dyn Monitor> {
        &self.monitor
    }

    /// Apply option tokens to the store
    ///
    /// Returns the non-option arguments.
    pub fn configure<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<String>, OptionError> {
        parse_options(args, &self.store)
    }

    async fn sample_once(&self) -> Result<Vec<f64>> {
        let monitor = Arc::clone(&self.monitor);
        tokio::task::spawn_blocking(move || monitor.sample())
            .await
            .map_err(|e| anyhow!("sampling task failed: {}", e))?
    }

    /// Sample, render and template one cycle's output
    pub async fn render_cycle(&self) -> Result<String> {
        let (first, second) = match self.monitor.metadata().sampling {
            Sampling::Single => (self.sample_once().await?, Vec::new()),
            Sampling::Dual => {
                let monitor = Arc::clone(&self.monitor);
                let action = Arc::new(move || {
                    let monitor = Arc::clone(&monitor);
                    async move {
                        tokio::task::spawn_blocking(move || monitor.sample())
                            .await
                            .map_err(|e| anyhow!("sampling task failed: {}", e))?
                    }
                });
                self.poller.sample_twice(action).await?
            }
        };

        let config = self.store.snapshot();
        let values = self.monitor.render(&config, &first, &second)?;
        Ok(fill_template(&config, &values))
    }

    /// Parse `args`, then deliver one line per cycle forever
    ///
    /// When the options do not parse, every cycle delivers the option error
    /// so the problem stays visible in the bar.
    pub async fn run<S, D>(&self, args: &[S], deliver: D)
    where
        S: AsRef<str>,
        D: FnMut(String),
    {
        let id = &self.monitor.metadata().id;
        match self.configure(args) {
            Ok(residual) => {
                if !residual.is_empty() {
                    log::debug!("Monitor {} ignoring extra arguments {:?}", id, residual);
                }
                log::info!(
                    "Starting monitor {} every {:?}",
                    id,
                    self.poller.config().interval
                );
                self.poller.run(|| self.render_cycle(), deliver).await;
            }
            Err(e) => {
                log::error!("Monitor {} has invalid options: {}", id, e);
                let message = e.to_string();
                self.poller
                    .run(|| {
                        let message = message.clone();
                        async move { Ok::<_, anyhow::Error>(message) }
                    }, deliver)
                    .await;
            }
        }
    }
}
