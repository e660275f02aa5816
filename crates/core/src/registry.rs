//! Registry of available monitors

use crate::monitor::BoxedMonitor;
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Function that creates a monitor
pub type MonitorFactory = fn() -> BoxedMonitor;

/// Listing entry for a registered monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    pub id: String,
    pub name: String,
}

struct Entry {
    name: String,
    factory: MonitorFactory,
}

/// Maps monitor ids to factories
#[derive(Default)]
pub struct Registry {
    monitors: BTreeMap<String, Entry>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a monitor, replacing any previous one with the same id
    pub fn register(&mut self, id: &str, name: &str, factory: MonitorFactory) {
        if self
            .monitors
            .insert(
                id.to_string(),
                Entry {
                    name: name.to_string(),
                    factory,
                },
            )
            .is_some()
        {
            log::warn!("Monitor '{}' registered twice, keeping the latest", id);
        }
    }

    /// Create a monitor by id
    pub fn create(&self, id: &str) -> Result<BoxedMonitor> {
        let entry = self
            .monitors
            .get(id)
            .ok_or_else(|| anyhow!("Unknown monitor: {}", id))?;
        Ok((entry.factory)())
    }

    /// All registered monitors, sorted by id
    pub fn list(&self) -> Vec<MonitorInfo> {
        self.monitors
            .iter()
            .map(|(id, entry)| MonitorInfo {
                id: id.clone(),
                name: entry.name.clone(),
            })
            .collect()
    }
}

static GLOBAL_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Process-wide registry that built-in monitors register into at startup
pub fn global_registry() -> &'static RwLock<Registry> {
    &GLOBAL_REGISTRY
}
