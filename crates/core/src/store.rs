//! Configuration store shared between option parsing and polling cycles

use arc_swap::ArcSwap;
use barmon_types::MonitorConfig;
use std::sync::Arc;

/// Handle to one monitor's configuration
///
/// Readers (every polling cycle) load the latest published configuration
/// without locking. Writers publish a modified copy, so a reader never sees
/// a half-written field. Only one writing context per monitor is supported;
/// two concurrent writers may each retry but the last one wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    inner: Arc<ArcSwap<MonitorConfig>>,
}

macro_rules! field_accessors {
    ($($field:ident, $setter:ident: $ty:ty;)*) => {
        $(
            pub fn $field(&self) -> $ty {
                self.inner.load().$field.clone()
            }

            pub fn $setter(&self, value: $ty) {
                self.update(|config| config.$field = value.clone());
            }
        )*
    };
}

impl ConfigStore {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Latest configuration, cheap to clone and safe to hold across awaits
    pub fn snapshot(&self) -> Arc<MonitorConfig> {
        self.inner.load_full()
    }

    /// Apply `f` to a copy of the current configuration and publish it
    pub fn update<F>(&self, f: F)
    where
        F: Fn(&mut MonitorConfig),
    {
        self.inner.rcu(|current| {
            let mut next = MonitorConfig::clone(current);
            f(&mut next);
            next
        });
    }

    /// Replace the whole configuration
    pub fn replace(&self, config: MonitorConfig) {
        self.inner.store(Arc::new(config));
    }

    field_accessors! {
        normal_color, set_normal_color: Option<String>;
        low_color, set_low_color: Option<String>;
        high_color, set_high_color: Option<String>;
        low, set_low: i64;
        high, set_high: i64;
        template, set_template: String;
        export, set_export: Vec<String>;
        percent_pad, set_percent_pad: usize;
        decimal_digits, set_decimal_digits: usize;
        min_width, set_min_width: usize;
        max_width, set_max_width: usize;
        pad_chars, set_pad_chars: String;
        pad_right, set_pad_right: bool;
        bar_back, set_bar_back: String;
        bar_fore, set_bar_fore: String;
        bar_width, set_bar_width: usize;
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reads_see_latest_write() {
        let store = ConfigStore::new(MonitorConfig::new("<total>", &["total"]));
        assert_eq!(store.high(), 66);
        store.set_high(90);
        assert_eq!(store.high(), 90);
        store.set_template("Cpu: <total>".to_string());
        assert_eq!(store.template(), "Cpu: <total>");
        assert_eq!(store.export(), vec!["total".to_string()]);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_writes() {
        let store = ConfigStore::default();
        let before = store.snapshot();
        store.set_high_color(Some("red".to_string()));
        assert_eq!(before.high_color, None);
        assert_eq!(store.snapshot().high_color.as_deref(), Some("red"));
    }

    #[test]
    fn test_clones_share_the_same_configuration() {
        let store = ConfigStore::default();
        let writer = store.clone();
        writer.set_min_width(4);
        assert_eq!(store.min_width(), 4);
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_fields() {
        let store = ConfigStore::default();
        let writer = store.clone();

        let handle = thread::spawn(move || {
            for i in 0..500 {
                let chars = if i % 2 == 0 { "ab" } else { "xyz" };
                writer.set_pad_chars(chars.to_string());
            }
        });

        for _ in 0..500 {
            let chars = store.pad_chars();
            assert!(chars == " " || chars == "ab" || chars == "xyz", "got {chars:?}");
        }
        handle.join().unwrap();
    }
}
