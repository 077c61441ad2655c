//! # Diversity Tweaks
//!
//! Rule engine that re-rolls a planetary system from a single game seed.
//!
//! ## Design Principles
//!
//! 1. **Ordered**: Rules run in registration order, bodies in host order
//! 2. **Transactional**: A failing rule leaves its body exactly as it found it
//! 3. **Configurable**: Groups, settings and a blacklist gate every rule
//! 4. **Host-agnostic**: The environment is reached only through `HostCapabilities`
//!
//! ## Example
//!
//! ```rust,ignore
//! use diversity_tweaks::{DetachedHost, PlanetarySystem, RuleRegistry, TweakConfig, TweakOrchestrator};
//! use diversity_procedural::GameSeed;
//!
//! let mut system = PlanetarySystem::from_description(SystemDescription::from_toml(text)?)?;
//! let mut orchestrator = TweakOrchestrator::new(RuleRegistry::standard());
//! let config = TweakConfig::all_enabled(orchestrator.registry());
//! let changes = orchestrator.run(&mut system, &config, GameSeed::new(42), &mut DetachedHost::new())?;
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod rule;
pub mod rules;
pub mod system;
pub mod terrain;

pub use body::{Atmosphere, Body, BodyKind, Material, Orbit, Shader};
pub use config::{GroupConfig, TweakConfig};
pub use error::{TweakError, TweakResult};
pub use host::{DetachedHost, HostCapabilities, CAPABILITY_VERSION};
pub use orchestrator::{ChangeSet, TweakOrchestrator};
pub use rule::{
    BodyRule, RuleContext, RuleRegistry, RuleVariant, TerrainModRule, CELESTIAL_GROUP,
    TERRAIN_SEED_GROUP,
};
pub use system::{PlanetarySystem, SystemDescription};
pub use terrain::{TerrainMod, TerrainModKind};
