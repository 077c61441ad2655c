//! # Tweak Rules
//!
//! A rule is one unit of generation logic gated by a group and an optional
//! setting. Rules are registered statically, in the order they run.
//!
//! ## Rule Shapes
//!
//! - [`BodyRule`]: sees the whole system, writes one body
//! - [`TerrainModRule`]: a plain function applied to every terrain modifier of
//!   one kind on a body

use std::collections::BTreeSet;

use diversity_procedural::{GameSeed, SeededRandomStream};

use crate::config::TweakConfig;
use crate::error::TweakResult;
use crate::host::HostCapabilities;
use crate::rules::{
    terrain_seed, AtmosphereRule, AtmosphereToggleRule, GasPlanetColorRule, NameRule, OrbitRule,
};
use crate::system::PlanetarySystem;
use crate::terrain::{TerrainMod, TerrainModKind};

/// Group of the body-level rules.
pub const CELESTIAL_GROUP: &str = "celestial";
/// Group of the terrain seed rules.
pub const TERRAIN_SEED_GROUP: &str = "terrain_seed";

/// What a rule may use while it runs.
pub struct RuleContext<'a> {
    /// The session stream.
    pub rng: &'a mut SeededRandomStream,
    /// The seed the session stream is bound to.
    pub seed: GameSeed,
    /// Host services.
    pub host: &'a dyn HostCapabilities,
}

/// A rule operating on one body of the system.
pub trait BodyRule {
    /// Unique rule name.
    fn name(&self) -> &'static str;

    /// Config group.
    fn group(&self) -> &'static str {
        CELESTIAL_GROUP
    }

    /// Config setting, `None` if the group flag alone decides.
    fn setting(&self) -> Option<&'static str>;

    /// Called once per pass, before the first body.
    fn begin_pass(&mut self, _config: &TweakConfig) {}

    /// Applies the rule to the body at `index`.
    ///
    /// Returns whether the body changed. Only the body at `index` may be
    /// written.
    ///
    /// # Errors
    ///
    /// Any error makes the orchestrator roll the body back.
    fn apply(
        &mut self,
        system: &mut PlanetarySystem,
        index: usize,
        ctx: &mut RuleContext<'_>,
    ) -> TweakResult<bool>;

    /// Drops caches that belong to a session.
    ///
    /// State describing how bodies looked before this rule changed them
    /// survives, so a later session on the same bodies can still undo it.
    fn reset(&mut self) {}

    /// Drops state remembered about earlier contents of the bodies. Call
    /// when the bodies are replaced by fresh copies.
    fn forget_bodies(&mut self) {}
}

/// Function applied to a single terrain modifier.
pub type TerrainModApply = fn(&mut TerrainMod, &mut RuleContext<'_>) -> TweakResult<bool>;

/// A rule re-rolling one kind of terrain modifier.
#[derive(Clone, Copy)]
pub struct TerrainModRule {
    /// Modifier kind the rule handles.
    pub kind: TerrainModKind,
    /// Modifier transformation.
    pub apply: TerrainModApply,
}

impl TerrainModRule {
    /// Creates a terrain rule.
    #[must_use]
    pub const fn new(kind: TerrainModKind, apply: TerrainModApply) -> Self {
        Self { kind, apply }
    }
}

impl std::fmt::Debug for TerrainModRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainModRule").field("kind", &self.kind).finish()
    }
}

/// A registered rule.
pub enum RuleVariant {
    /// Body-level rule.
    Body(Box<dyn BodyRule>),
    /// Terrain-modifier rule.
    TerrainMod(TerrainModRule),
}

impl RuleVariant {
    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Body(rule) => rule.name(),
            Self::TerrainMod(rule) => rule.kind.name(),
        }
    }

    /// Config group.
    #[must_use]
    pub fn group(&self) -> &'static str {
        match self {
            Self::Body(rule) => rule.group(),
            Self::TerrainMod(_) => TERRAIN_SEED_GROUP,
        }
    }

    /// Config setting.
    #[must_use]
    pub fn setting(&self) -> Option<&'static str> {
        match self {
            Self::Body(rule) => rule.setting(),
            Self::TerrainMod(rule) => Some(rule.kind.name()),
        }
    }
}

impl std::fmt::Debug for RuleVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleVariant")
            .field("name", &self.name())
            .field("group", &self.group())
            .field("setting", &self.setting())
            .finish()
    }
}

/// Ordered list of rules.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<RuleVariant>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in rules: every terrain seed rule, then name, orbit,
    /// atmosphere toggle, atmosphere and gas planet colour.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for rule in terrain_seed::rules() {
            registry.register(RuleVariant::TerrainMod(rule));
        }
        registry.register_body(NameRule::default());
        registry.register_body(OrbitRule);
        registry.register_body(AtmosphereToggleRule::default());
        registry.register_body(AtmosphereRule);
        registry.register_body(GasPlanetColorRule);
        registry
    }

    /// Appends a rule.
    pub fn register(&mut self, rule: RuleVariant) {
        self.rules.push(rule);
    }

    /// Appends a body rule.
    pub fn register_body(&mut self, rule: impl BodyRule + 'static) {
        self.register(RuleVariant::Body(Box::new(rule)));
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleVariant> {
        self.rules.iter()
    }

    /// Mutable rules in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RuleVariant> {
        self.rules.iter_mut()
    }

    /// Every group a registered rule belongs to.
    #[must_use]
    pub fn groups(&self) -> BTreeSet<&'static str> {
        self.rules.iter().map(RuleVariant::group).collect()
    }

    /// Resets the session caches of every body rule.
    pub fn reset(&mut self) {
        for rule in &mut self.rules {
            if let RuleVariant::Body(rule) = rule {
                rule.reset();
            }
        }
    }

    /// Drops what every body rule remembers about earlier body contents.
    pub fn forget_bodies(&mut self) {
        for rule in &mut self.rules {
            if let RuleVariant::Body(rule) = rule {
                rule.forget_bodies();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let registry = RuleRegistry::standard();
        let names: Vec<&str> = registry.iter().map(RuleVariant::name).collect();

        let terrain = TerrainModKind::ALL.len();
        assert_eq!(names.len(), terrain + 5);
        assert_eq!(names[0], "vertex_height_noise");
        assert_eq!(
            &names[terrain..],
            &["name", "orbit", "atmosphere_toggle", "atmosphere", "gas_planet_color"]
        );
        assert!(registry.iter().take(terrain).all(|r| r.group() == TERRAIN_SEED_GROUP));
        assert!(registry.iter().skip(terrain).all(|r| r.group() == CELESTIAL_GROUP));
    }

    #[test]
    fn test_groups() {
        let groups = RuleRegistry::standard().groups();
        assert_eq!(groups.into_iter().collect::<Vec<_>>(), vec![CELESTIAL_GROUP, TERRAIN_SEED_GROUP]);
    }
}
