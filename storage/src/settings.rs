//! Runtime settings consulted by the adapters.

use std::sync::atomic::{AtomicBool, Ordering};

/// Read access to the plugin settings the adapters depend on.
///
/// Adapters read the flag on every mutating call, so implementations must
/// not cache a stale value.
pub trait SettingsSource: Send + Sync {
    /// When true, create/update/delete/save calls are skipped.
    fn read_only(&self) -> bool;
}

/// Process settings with a toggleable read-only switch.
#[derive(Debug, Default)]
pub struct Settings {
    read_only: AtomicBool,
}

impl Settings {
    pub fn new(read_only: bool) -> Self {
        Self {
            read_only: AtomicBool::new(read_only),
        }
    }

    /// Build settings from `GUILDS_READ_ONLY`.
    pub fn from_env() -> Self {
        Self::new(crate::config::get_read_only())
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

impl SettingsSource for Settings {
    fn read_only(&self) -> bool {
        self.read_only.load(Ordering::SeqCst)
    }
}
