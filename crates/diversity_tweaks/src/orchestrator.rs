//! # Tweak Orchestrator
//!
//! Runs one generation pass: every enabled rule, in registration order, over
//! every body, in host order.
//!
//! ## Fault Containment
//!
//! Each rule application is transactional. The target body is snapshotted
//! before the rule runs; if the rule returns an error or panics, the body is
//! restored, the fault is logged and the pair counts as "no change". A fault
//! never aborts the pass.

use std::panic::{self, AssertUnwindSafe};

use diversity_procedural::{GameSeed, SeededRandomStream};

use crate::config::TweakConfig;
use crate::error::{TweakError, TweakResult};
use crate::host::{HostCapabilities, CAPABILITY_VERSION};
use crate::rule::{RuleContext, RuleRegistry, RuleVariant, TerrainModRule};
use crate::system::PlanetarySystem;

/// Bodies changed by a pass, in first-change order, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    bodies: Vec<String>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Records a change. Returns `false` if the body was already recorded.
    pub fn insert(&mut self, body: &str) -> bool {
        if self.contains(body) {
            return false;
        }
        self.bodies.push(body.to_string());
        true
    }

    /// Whether `body` changed.
    #[must_use]
    pub fn contains(&self, body: &str) -> bool {
        self.bodies.iter().any(|b| b == body)
    }

    /// Number of changed bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Changed body names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter().map(String::as_str)
    }
}

/// Drives generation passes with one registry and one session stream.
#[derive(Debug)]
pub struct TweakOrchestrator {
    registry: RuleRegistry,
    rng: SeededRandomStream,
}

impl Default for TweakOrchestrator {
    fn default() -> Self {
        Self::new(RuleRegistry::standard())
    }
}

impl TweakOrchestrator {
    /// Creates an orchestrator with an unbound session stream.
    #[must_use]
    pub const fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            rng: SeededRandomStream::new(),
        }
    }

    /// The registered rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The seed the session is bound to, if any pass ran.
    #[must_use]
    pub fn session_seed(&self) -> Option<GameSeed> {
        self.rng.bound_seed()
    }

    /// Ends the session: unbinds the stream and clears session caches.
    ///
    /// Undo records of earlier changes are kept, so the next session can
    /// still revert them on the same system.
    pub fn reset_session(&mut self) {
        self.rng.reset();
        self.registry.reset();
    }

    /// Drops undo records. Use after swapping the system for a fresh copy.
    pub fn forget_bodies(&mut self) {
        self.registry.forget_bodies();
    }

    /// Runs one pass over `system`.
    ///
    /// The session stream binds to `seed` on the first pass; later seeds are
    /// ignored until [`TweakOrchestrator::reset_session`].
    ///
    /// # Errors
    ///
    /// `IncompatibleHost` if the host is too old, `MissingGroup` or
    /// `InvalidConfig` if the config does not fit the registry. Rule faults
    /// are never returned.
    pub fn run(
        &mut self,
        system: &mut PlanetarySystem,
        config: &TweakConfig,
        seed: GameSeed,
        host: &mut dyn HostCapabilities,
    ) -> TweakResult<ChangeSet> {
        let found = host.capability_version();
        if found < CAPABILITY_VERSION {
            return Err(TweakError::IncompatibleHost {
                required: CAPABILITY_VERSION,
                found,
            });
        }
        config.validate_for(&self.registry)?;

        if !self.rng.initialize(seed) && self.rng.bound_seed() != Some(seed) {
            tracing::warn!(
                "Session already bound to seed {:?}, ignoring seed {}",
                self.rng.bound_seed(),
                seed
            );
        }
        let session_seed = self.rng.bound_seed().unwrap_or(seed);

        let mut changes = ChangeSet::new();
        let Self { registry, rng } = self;

        for rule in registry.iter_mut() {
            if !config.rule_enabled(rule.group(), rule.setting()) {
                tracing::debug!("Rule {} disabled", rule.name());
                continue;
            }
            if let RuleVariant::Body(body_rule) = rule {
                body_rule.begin_pass(config);
            }

            for index in 0..system.len() {
                let body_name = system.body(index).name.clone();
                if config.is_blacklisted(&body_name) {
                    continue;
                }

                let changed = match rule {
                    RuleVariant::Body(body_rule) => {
                        let rule_name = body_rule.name();
                        contained(system, index, rule_name, |system| {
                            let mut ctx = RuleContext { rng: &mut *rng, seed: session_seed, host: &*host };
                            body_rule.apply(system, index, &mut ctx)
                        })
                        .unwrap_or(false)
                    }
                    RuleVariant::TerrainMod(terrain_rule) => {
                        apply_terrain_rule(*terrain_rule, system, index, rng, session_seed, host)
                    }
                };

                if changed {
                    tracing::debug!("Rule {} changed {}", rule.name(), body_name);
                    changes.insert(&body_name);
                }
            }
        }

        tracing::info!(
            "Generation pass with seed {} changed {} of {} bodies",
            session_seed,
            changes.len(),
            system.len()
        );
        Ok(changes)
    }
}

/// Applies a terrain rule to every matching modifier of one body, then asks
/// the host to rebuild each changed modifier.
fn apply_terrain_rule(
    rule: TerrainModRule,
    system: &mut PlanetarySystem,
    index: usize,
    rng: &mut SeededRandomStream,
    seed: GameSeed,
    host: &mut dyn HostCapabilities,
) -> bool {
    let changed_mods = contained(system, index, rule.kind.name(), |system| {
        let mut ctx = RuleContext { rng, seed, host: &*host };
        let mut changed = Vec::new();
        for (mod_index, terrain_mod) in system.body_mut(index).terrain_mods.iter_mut().enumerate() {
            if terrain_mod.kind() == rule.kind && (rule.apply)(terrain_mod, &mut ctx)? {
                changed.push(mod_index);
            }
        }
        Ok(changed)
    })
    .unwrap_or_default();

    for &mod_index in &changed_mods {
        host.on_terrain_mod_changed(system.body(index), mod_index);
    }
    !changed_mods.is_empty()
}

/// Runs `apply` against the body at `index`, rolling the body back on error
/// or panic.
fn contained<T>(
    system: &mut PlanetarySystem,
    index: usize,
    rule_name: &str,
    apply: impl FnOnce(&mut PlanetarySystem) -> TweakResult<T>,
) -> Option<T> {
    let snapshot = system.body(index).clone();

    let reason = match panic::catch_unwind(AssertUnwindSafe(|| apply(&mut *system))) {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(error)) => error.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    system.restore_body(index, snapshot);
    let fault = TweakError::RuleFault {
        rule: rule_name.to_string(),
        body: system.body(index).name.clone(),
        reason,
    };
    tracing::warn!("{}, body rolled back", fault);
    None
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_set_dedup_keeps_order() {
        let mut changes = ChangeSet::new();
        assert!(changes.insert("b"));
        assert!(changes.insert("a"));
        assert!(!changes.insert("b"));
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!((&changes).into_iter().count(), 2);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "panic");
    }
}
