//! Orbit perturbation around the reference orbit.

use std::f64::consts::PI;

use crate::error::TweakResult;
use crate::rule::{BodyRule, RuleContext};
use crate::system::PlanetarySystem;

/// Percent chance that the inclination is re-rolled.
const INCLINATION_CHANCE: i32 = 20;

/// Jitters the orbital elements of every body with an orbit.
///
/// Semi-major axis and eccentricity scale the reference values by
/// `[0.8, 1.2)`, so repeated passes never drift.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrbitRule;

impl BodyRule for OrbitRule {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn setting(&self) -> Option<&'static str> {
        Some("orbit")
    }

    fn apply(
        &mut self,
        system: &mut PlanetarySystem,
        index: usize,
        ctx: &mut RuleContext<'_>,
    ) -> TweakResult<bool> {
        let Some(current) = system.body(index).orbit else {
            return Ok(false);
        };
        let reference = system.reference(index).orbit.unwrap_or(current);
        let mut orbit = current;
        let rng = &mut *ctx.rng;

        if rng.chance(INCLINATION_CHANCE)? {
            orbit.inclination = rng.next_double(-3.0, 3.0)?;
        }
        orbit.semi_major_axis = reference.semi_major_axis * rng.next_double(0.8, 1.2)?;
        orbit.longitude_of_ascending_node = f64::from(rng.next_int_range(0, 361)?);
        orbit.mean_anomaly_at_epoch = f64::from(rng.next_int_range(0, 361)?) * PI / 180.0;
        orbit.argument_of_periapsis = f64::from(rng.next_int_range(0, 361)?);
        orbit.eccentricity = reference.eccentricity * rng.next_double(0.8, 1.2)?;

        system.body_mut(index).orbit = Some(orbit);
        Ok(true)
    }
}
