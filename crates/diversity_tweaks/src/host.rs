//! # Host Capabilities
//!
//! Everything the engine needs from the environment it runs in, behind one
//! versioned trait. The engine never inspects host internals directly.

use crate::body::Body;

/// Capability interface version implemented by this crate.
pub const CAPABILITY_VERSION: u32 = 1;

/// Services a host provides to a generation pass.
pub trait HostCapabilities {
    /// Version of the capability interface the host implements.
    fn capability_version(&self) -> u32;

    /// Whether the host stored `flag` for `body` (e.g. `barycenter`).
    fn has_storage_flag(&self, body: &Body, flag: &str) -> bool;

    /// Called once per terrain modifier whose seeds changed, so the host can
    /// rebuild it.
    fn on_terrain_mod_changed(&mut self, body: &Body, mod_index: usize);
}

/// Host that answers from body data alone and records rebuild requests.
#[derive(Clone, Debug, Default)]
pub struct DetachedHost {
    rebuilds: Vec<(String, usize)>,
}

impl DetachedHost {
    /// Creates a host with no recorded rebuilds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rebuilds: Vec::new(),
        }
    }

    /// Terrain modifiers the pass asked to rebuild, as `(body, index)`.
    #[must_use]
    pub fn rebuilds(&self) -> &[(String, usize)] {
        &self.rebuilds
    }
}

impl HostCapabilities for DetachedHost {
    fn capability_version(&self) -> u32 {
        CAPABILITY_VERSION
    }

    fn has_storage_flag(&self, body: &Body, flag: &str) -> bool {
        body.storage_flags.iter().any(|f| f == flag)
    }

    fn on_terrain_mod_changed(&mut self, body: &Body, mod_index: usize) {
        tracing::debug!("terrain modifier {} of {} needs a rebuild", mod_index, body.name);
        self.rebuilds.push((body.name.clone(), mod_index));
    }
}
