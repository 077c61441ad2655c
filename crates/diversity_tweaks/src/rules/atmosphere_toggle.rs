//! Atmosphere toggle: rarely strips an atmosphere or grows a new one.
//!
//! A toggle is remembered per body. On the next pass the body is first put
//! back the way it was before the toggle, then rolled again, so toggles
//! never stack. The memory outlives a session reset and is only dropped by
//! `forget_bodies`.

use std::collections::HashMap;

use diversity_procedural::{Color, Gradient, ATMOSPHERE_TEMPLATES, RAMP_WIDTH};

use crate::body::{Atmosphere, Body, Material, Shader};
use crate::error::TweakResult;
use crate::rule::{BodyRule, RuleContext};
use crate::system::PlanetarySystem;

/// Percent chance a body is toggled.
const TOGGLE_CHANCE: i32 = 5;

/// State of a body before it was toggled.
#[derive(Clone, Debug, PartialEq)]
struct Untoggled {
    atmosphere: Option<Atmosphere>,
    material: Material,
}

/// Adds or removes atmospheres on solid, ocean-free, non-home bodies.
#[derive(Clone, Debug, Default)]
pub struct AtmosphereToggleRule {
    previous: HashMap<String, Untoggled>,
}

impl AtmosphereToggleRule {
    /// Whether `body` is currently toggled by an earlier pass.
    #[must_use]
    pub fn is_toggled(&self, body: &str) -> bool {
        self.previous.contains_key(body)
    }
}

impl BodyRule for AtmosphereToggleRule {
    fn name(&self) -> &'static str {
        "atmosphere_toggle"
    }

    fn setting(&self) -> Option<&'static str> {
        Some("atmosphere_toggle")
    }

    fn apply(
        &mut self,
        system: &mut PlanetarySystem,
        index: usize,
        ctx: &mut RuleContext<'_>,
    ) -> TweakResult<bool> {
        let body = system.body_mut(index);
        if !body.has_solid_surface() || body.home_world || body.ocean {
            return Ok(false);
        }

        let mut changed = false;
        if let Some(untoggled) = self.previous.remove(&body.name) {
            tracing::debug!("restoring atmosphere state of {}", body.name);
            body.atmosphere = untoggled.atmosphere;
            body.material = untoggled.material;
            changed = true;
        }

        if ctx.rng.chance(TOGGLE_CHANCE)? {
            let untoggled = Untoggled {
                atmosphere: body.atmosphere.clone(),
                material: body.material.clone(),
            };
            if body.atmosphere.is_some() {
                strip(body);
            } else {
                grow(body, ctx)?;
            }
            self.previous.insert(body.name.clone(), untoggled);
            changed = true;
        }
        Ok(changed)
    }

    fn forget_bodies(&mut self) {
        self.previous.clear();
    }
}

/// Removes the atmosphere and falls back to the simple shader.
fn strip(body: &mut Body) {
    tracing::debug!("removing the atmosphere of {}", body.name);
    body.atmosphere = None;
    body.material = Material {
        shader: Shader::Simple,
        rim_power: 0.0,
        rim_blend: 0.0,
        rim_ramp: Vec::new(),
        ..body.material.clone()
    };
}

/// Synthesises a new atmosphere with a rim-lit material.
fn grow(body: &mut Body, ctx: &mut RuleContext<'_>) -> TweakResult<()> {
    tracing::debug!("adding an atmosphere to {}", body.name);
    let rng = &mut *ctx.rng;

    let contains_oxygen = rng.next_int_range(0, 99)? < 10;
    let depth = body.radius / 10.0 * rng.next_double(0.8, 1.2)?;
    let adiabatic_index = 1.399_999_976_158_14 * rng.next_double(0.8, 1.2)?;
    let gas_mass_lapse_rate = 4.847_411_257_024_93 * rng.next_double(0.8, 1.2)?;
    let molar_mass = 0.028_964_400_291_442_9 * rng.next_double(0.8, 1.2)?;
    let multiplier = rng.next_double(0.0, 1.0)?;
    let temperature_lapse_rate = rng.next_double(0.004, 0.005)?;
    let template = rng.pick(ATMOSPHERE_TEMPLATES)?;

    let average = body.material.average_color;
    let mut alter = |channel: f32| -> TweakResult<f32> {
        Ok((f64::from(channel) * rng.next_double(0.92, 1.05)?).min(1.0) as f32)
    };
    let altered = Color::new(alter(average.r)?, alter(average.g)?, alter(average.b)?, average.a);
    let rim_power = rng.next_double(3.8, 6.2)? as f32;

    body.atmosphere = Some(Atmosphere {
        contains_oxygen,
        depth,
        adiabatic_index,
        gas_mass_lapse_rate,
        molar_mass,
        sea_level_pressure: 595.0 * multiplier + 5.0,
        sea_level_temperature: 270.0 * multiplier + 240.0,
        sea_level_density: 6.9 * multiplier + 0.1,
        temperature_lapse_rate,
        uses_pressure_curve: true,
        uses_temperature_curve: true,
        pressure_curve: template.pressure_curve(),
        temperature_curve: template.temperature_curve(),
        wavelength: Color::new(1.0 - altered.r, 1.0 - altered.g, 1.0 - altered.b, 0.5),
        ambient: altered,
    });
    body.material = Material {
        shader: Shader::RimAerial,
        rim_power,
        rim_blend: 1.0,
        rim_ramp: Gradient::rim(altered).ramp(RAMP_WIDTH),
        ..body.material.clone()
    };
    Ok(())
}
