//! Atmosphere density jitter.

use crate::error::TweakResult;
use crate::rule::{BodyRule, RuleContext};
use crate::system::PlanetarySystem;

/// Scales pressure and temperature by one multiplier in `[0.9, 1.1)`.
///
/// Curves are rebuilt from the reference atmosphere when the body had one,
/// otherwise from the current curves (an atmosphere added this session).
/// Curve tangents are kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct AtmosphereRule;

impl BodyRule for AtmosphereRule {
    fn name(&self) -> &'static str {
        "atmosphere"
    }

    fn setting(&self) -> Option<&'static str> {
        Some("atmosphere")
    }

    fn apply(
        &mut self,
        system: &mut PlanetarySystem,
        index: usize,
        ctx: &mut RuleContext<'_>,
    ) -> TweakResult<bool> {
        let Some(current) = system.body(index).atmosphere.as_ref() else {
            return Ok(false);
        };
        let reference = system
            .reference(index)
            .atmosphere
            .as_ref()
            .unwrap_or(current);
        let pressure_curve = reference.pressure_curve.clone();
        let temperature_curve = reference.temperature_curve.clone();
        let (pressure, temperature) = (reference.sea_level_pressure, reference.sea_level_temperature);

        let mult = ctx.rng.next_double(0.9, 1.1)? as f32;

        let Some(atmosphere) = system.body_mut(index).atmosphere.as_mut() else {
            return Ok(false);
        };
        if atmosphere.uses_pressure_curve {
            atmosphere.pressure_curve = pressure_curve.scaled(mult);
            atmosphere.sea_level_pressure = pressure * f64::from(mult);
        }
        if atmosphere.uses_temperature_curve {
            atmosphere.temperature_curve = temperature_curve.scaled(mult);
            atmosphere.sea_level_temperature = temperature * f64::from(mult);
        }
        Ok(atmosphere.uses_pressure_curve || atmosphere.uses_temperature_curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Atmosphere, Body, BodyKind};
    use crate::host::DetachedHost;
    use diversity_procedural::{GameSeed, SeededRandomStream, ATMOSPHERE_TEMPLATES};

    fn atmosphere(uses_curves: bool) -> Atmosphere {
        Atmosphere {
            uses_pressure_curve: uses_curves,
            uses_temperature_curve: uses_curves,
            pressure_curve: ATMOSPHERE_TEMPLATES[3].pressure_curve(),
            temperature_curve: ATMOSPHERE_TEMPLATES[3].temperature_curve(),
            ..Atmosphere::default()
        }
    }

    #[test]
    fn test_scales_from_reference() {
        let mut system = PlanetarySystem::new(vec![
            Body::new("Airless", BodyKind::Rocky),
            Body::new("Curved", BodyKind::Rocky).with_atmosphere(atmosphere(true)),
            Body::new("Flat", BodyKind::Rocky).with_atmosphere(atmosphere(false)),
        ])
        .unwrap();

        let host = DetachedHost::new();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(9));
        let mut ctx = RuleContext { rng: &mut rng, seed: GameSeed::new(9), host: &host };
        let mut rule = AtmosphereRule;

        assert!(!rule.apply(&mut system, 0, &mut ctx).unwrap());
        assert!(!rule.apply(&mut system, 2, &mut ctx).unwrap(), "no curve in use");

        let base = system.reference(1).atmosphere.clone().unwrap();
        for _ in 0..20 {
            assert!(rule.apply(&mut system, 1, &mut ctx).unwrap());
            let scaled = system.body(1).atmosphere.as_ref().unwrap();
            let ratio = scaled.pressure_curve.keys[0].value / base.pressure_curve.keys[0].value;
            assert!((0.9..=1.1).contains(&ratio), "curve ratio {ratio} drifted");
            for (a, b) in base.pressure_curve.keys.iter().zip(&scaled.pressure_curve.keys) {
                assert_eq!(a.in_tangent, b.in_tangent);
            }
        }
    }
}
