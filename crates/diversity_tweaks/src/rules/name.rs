//! Display names for every body.
//!
//! A star decides the naming scheme of everything that orbits it. Bodies may
//! arrive in any host order: when a body is reached before its star or its
//! parent, the star's scheme is rolled and the parent's new name is worked
//! out on the spot, then reused when the parent itself comes up.

use std::collections::{HashMap, HashSet};

use diversity_procedural::{NameSynthesizer, NamingScheme, SeededRandomStream};

use crate::config::TweakConfig;
use crate::error::TweakResult;
use crate::rule::{BodyRule, RuleContext};
use crate::system::PlanetarySystem;

/// Renames bodies with the freeform or systematic grammar.
#[derive(Clone, Debug, Default)]
pub struct NameRule {
    names: NameSynthesizer,
    /// New display names decided this pass, by body name.
    resolved: HashMap<String, String>,
    /// Bodies that keep their current name this pass.
    blacklist: HashSet<String>,
}

impl NameRule {
    /// Creates the rule over a prepared synthesizer, e.g. with forced schemes.
    #[must_use]
    pub fn new(names: NameSynthesizer) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// The synthesizer and its scheme cache.
    #[must_use]
    pub fn names(&self) -> &NameSynthesizer {
        &self.names
    }

    /// The name `index` has, or will have, at the end of this pass.
    fn resolved_name(
        &mut self,
        system: &PlanetarySystem,
        index: usize,
        rng: &mut SeededRandomStream,
    ) -> TweakResult<String> {
        let body = system.body(index);
        if let Some(name) = self.resolved.get(&body.name) {
            return Ok(name.clone());
        }
        if self.blacklist.contains(&body.name) {
            return Ok(body.display_name.clone());
        }

        let name = self.synthesize(system, index, rng)?;
        self.resolved.insert(body.name.clone(), name.clone());
        Ok(name)
    }

    fn synthesize(
        &mut self,
        system: &PlanetarySystem,
        index: usize,
        rng: &mut SeededRandomStream,
    ) -> TweakResult<String> {
        let body = system.body(index);
        if body.is_star() {
            return Ok(match self.names.scheme_for_star(&body.name, rng)? {
                NamingScheme::Systematic => self.names.systematic_star_name(rng)?,
                NamingScheme::Freeform => self.names.star_name(rng)?,
            });
        }

        let star = system.nearest_star(index);
        let scheme = match star {
            Some(star) => self.names.scheme_for_star(&system.body(star).name, rng)?,
            None => NamingScheme::Freeform,
        };

        match (scheme, system.parent(index)) {
            (NamingScheme::Systematic, Some(parent)) => {
                let parent_name = self.resolved_name(system, parent, rng)?;
                let position = system.orbital_index(index).unwrap_or(0);
                Ok(NameSynthesizer::systematic_name(
                    &parent_name,
                    position,
                    Some(parent) == star,
                )?)
            }
            _ => Ok(self.names.planet_name(rng)?),
        }
    }
}

impl BodyRule for NameRule {
    fn name(&self) -> &'static str {
        "name"
    }

    fn setting(&self) -> Option<&'static str> {
        Some("name")
    }

    fn begin_pass(&mut self, config: &TweakConfig) {
        self.resolved.clear();
        self.blacklist = config.blacklist.iter().cloned().collect();
    }

    fn apply(
        &mut self,
        system: &mut PlanetarySystem,
        index: usize,
        ctx: &mut RuleContext<'_>,
    ) -> TweakResult<bool> {
        let display_name = self.resolved_name(system, index, ctx.rng)?;
        tracing::debug!("{} is now called {}", system.body(index).name, display_name);
        system.body_mut(index).display_name = display_name;
        Ok(true)
    }

    fn reset(&mut self) {
        self.names.reset();
        self.resolved.clear();
    }
}
