//! Gas giant recolouring.

use diversity_procedural::{Gradient, PALETTE, RAMP_WIDTH};

use crate::error::TweakResult;
use crate::rule::{BodyRule, RuleContext};
use crate::system::PlanetarySystem;

/// Storage flag marking a body as an invisible barycenter.
pub const BARYCENTER_FLAG: &str = "barycenter";

/// Tints gas giants with a darkened palette colour.
///
/// With an atmosphere, the scattering wavelength, ambient light and rim ramp
/// follow the new colour.
#[derive(Clone, Copy, Debug, Default)]
pub struct GasPlanetColorRule;

impl BodyRule for GasPlanetColorRule {
    fn name(&self) -> &'static str {
        "gas_planet_color"
    }

    fn setting(&self) -> Option<&'static str> {
        Some("gas_planet_color")
    }

    fn apply(
        &mut self,
        system: &mut PlanetarySystem,
        index: usize,
        ctx: &mut RuleContext<'_>,
    ) -> TweakResult<bool> {
        let body = system.body(index);
        if body.has_solid_surface() || body.is_star() {
            return Ok(false);
        }
        if ctx.host.has_storage_flag(body, BARYCENTER_FLAG) {
            return Ok(false);
        }

        let (_, picked) = ctx.rng.pick(PALETTE)?;
        let color = picked.dark();

        let body = system.body_mut(index);
        body.material.color = color.recolor(body.material.average_color);

        let Some(atmosphere) = body.atmosphere.as_mut() else {
            return Ok(true);
        };
        atmosphere.wavelength = color.inverted();
        atmosphere.ambient = color;
        body.material.rim_ramp = Gradient::rim(color).ramp(RAMP_WIDTH);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Atmosphere, Body, BodyKind};
    use crate::host::DetachedHost;
    use diversity_procedural::{GameSeed, SeededRandomStream};

    #[test]
    fn test_only_visible_gas_giants() {
        let mut barycenter = Body::new("Barycenter", BodyKind::Gaseous);
        barycenter.storage_flags.push(BARYCENTER_FLAG.to_string());
        let mut system = PlanetarySystem::new(vec![
            Body::new("Sun", BodyKind::Star),
            Body::new("Rock", BodyKind::Rocky),
            barycenter,
            Body::new("Giant", BodyKind::Gaseous).with_atmosphere(Atmosphere::default()),
            Body::new("Bare", BodyKind::Gaseous),
        ])
        .unwrap();

        let host = DetachedHost::new();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(4));
        let mut ctx = RuleContext { rng: &mut rng, seed: GameSeed::new(4), host: &host };
        let mut rule = GasPlanetColorRule;

        let changed: Vec<bool> = (0..system.len())
            .map(|i| rule.apply(&mut system, i, &mut ctx).unwrap())
            .collect();
        assert_eq!(changed, vec![false, false, false, true, true]);

        let giant = system.body(3);
        let atmosphere = giant.atmosphere.as_ref().unwrap();
        assert_eq!(giant.material.rim_ramp.len(), RAMP_WIDTH);
        assert_eq!(giant.material.rim_ramp[0], atmosphere.ambient);
        assert!(atmosphere.ambient.max_difference(atmosphere.wavelength.inverted()) < 1e-6);
        assert!(system.body(4).material.rim_ramp.is_empty(), "no atmosphere, no ramp");
        assert_eq!(system.body(2).material, system.reference(2).material);
    }
}
