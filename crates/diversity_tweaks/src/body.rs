//! # Bodies
//!
//! The mutable parameter set of one star, planet or moon as the host hands it
//! to the engine. Rules only ever write these fields; the engine never creates
//! or destroys bodies.

use diversity_procedural::{Color, FloatCurve};
use serde::{Deserialize, Serialize};

use crate::terrain::TerrainMod;

/// Broad physical class of a body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// A star, root of a naming subtree.
    Star,
    /// A planet or moon with a solid surface.
    #[default]
    Rocky,
    /// A body without a solid surface.
    Gaseous,
}

/// Keplerian orbital elements. Angles in degrees except the mean anomaly,
/// which is in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orbit {
    /// Semi-major axis in metres.
    pub semi_major_axis: f64,
    /// Eccentricity.
    pub eccentricity: f64,
    /// Inclination.
    pub inclination: f64,
    /// Longitude of the ascending node.
    pub longitude_of_ascending_node: f64,
    /// Argument of periapsis.
    pub argument_of_periapsis: f64,
    /// Mean anomaly at epoch, radians.
    pub mean_anomaly_at_epoch: f64,
}

/// Physical and visual parameters of an atmosphere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    /// Whether air-breathing engines work.
    pub contains_oxygen: bool,
    /// Height of the atmosphere in metres.
    pub depth: f64,
    /// Adiabatic index.
    pub adiabatic_index: f64,
    /// Gas mass lapse rate.
    pub gas_mass_lapse_rate: f64,
    /// Molar mass in kg/mol.
    pub molar_mass: f64,
    /// Sea-level pressure in kPa.
    pub sea_level_pressure: f64,
    /// Sea-level temperature in K.
    pub sea_level_temperature: f64,
    /// Sea-level density in kg/m³.
    pub sea_level_density: f64,
    /// Temperature lapse rate in K/m.
    pub temperature_lapse_rate: f64,
    /// Whether pressure follows `pressure_curve`.
    pub uses_pressure_curve: bool,
    /// Whether temperature follows `temperature_curve`.
    pub uses_temperature_curve: bool,
    /// Normalised pressure profile.
    pub pressure_curve: FloatCurve,
    /// Normalised temperature profile.
    pub temperature_curve: FloatCurve,
    /// Scattering wavelength colour seen from the ground.
    pub wavelength: Color,
    /// Ambient light colour.
    pub ambient: Color,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            contains_oxygen: false,
            depth: 0.0,
            adiabatic_index: 1.4,
            gas_mass_lapse_rate: 0.0,
            molar_mass: 0.028_964_4,
            sea_level_pressure: 101.325,
            sea_level_temperature: 288.0,
            sea_level_density: 1.225,
            temperature_lapse_rate: 0.0,
            uses_pressure_curve: false,
            uses_temperature_curve: false,
            pressure_curve: FloatCurve::default(),
            temperature_curve: FloatCurve::default(),
            wavelength: Color::new(0.5, 0.5, 0.5, 0.5),
            ambient: Color::BLACK,
        }
    }
}

/// Shader family of the scaled-space material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shader {
    /// Plain lit surface.
    #[default]
    Simple,
    /// Surface with an atmospheric rim.
    RimAerial,
}

/// Scaled-space material of a body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Shader in use.
    pub shader: Shader,
    /// Tint multiplied over the surface texture.
    pub color: Color,
    /// Average colour of the surface texture.
    pub average_color: Color,
    /// Rim falloff exponent.
    pub rim_power: f32,
    /// Rim blend factor.
    pub rim_blend: f32,
    /// Rim colour ramp, empty when the material has none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rim_ramp: Vec<Color>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shader: Shader::Simple,
            color: Color::WHITE,
            average_color: Color::rgb(0.5, 0.5, 0.5),
            rim_power: 0.0,
            rim_blend: 0.0,
            rim_ramp: Vec::new(),
        }
    }
}

/// One celestial body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Unique identifier.
    pub name: String,
    /// Name shown to players, defaults to `name`.
    #[serde(default)]
    pub display_name: String,
    /// Physical class.
    #[serde(default)]
    pub kind: BodyKind,
    /// Name of the body this one orbits.
    #[serde(default)]
    pub parent: Option<String>,
    /// Radius in metres.
    #[serde(default)]
    pub radius: f64,
    /// The body players start on.
    #[serde(default)]
    pub home_world: bool,
    /// Whether the body has an ocean.
    #[serde(default)]
    pub ocean: bool,
    /// Orbit around `parent`.
    #[serde(default)]
    pub orbit: Option<Orbit>,
    /// Atmosphere, if any.
    #[serde(default)]
    pub atmosphere: Option<Atmosphere>,
    /// Scaled-space material.
    #[serde(default)]
    pub material: Material,
    /// Host storage flags, e.g. `barycenter`.
    #[serde(default)]
    pub storage_flags: Vec<String>,
    /// Terrain modifiers in host order.
    #[serde(default)]
    pub terrain_mods: Vec<TerrainMod>,
}

impl Body {
    /// Creates a body with default parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: BodyKind) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            kind,
            parent: None,
            radius: 0.0,
            home_world: false,
            ocean: false,
            orbit: None,
            atmosphere: None,
            material: Material::default(),
            storage_flags: Vec::new(),
            terrain_mods: Vec::new(),
        }
    }

    /// Sets the parent and the orbit around it.
    #[must_use]
    pub fn orbiting(mut self, parent: impl Into<String>, orbit: Orbit) -> Self {
        self.parent = Some(parent.into());
        self.orbit = Some(orbit);
        self
    }

    /// Sets the radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the atmosphere.
    #[must_use]
    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }

    /// Adds a terrain modifier.
    #[must_use]
    pub fn with_terrain_mod(mut self, terrain_mod: TerrainMod) -> Self {
        self.terrain_mods.push(terrain_mod);
        self
    }

    /// Whether the body is a star.
    #[inline]
    #[must_use]
    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    /// Whether the body has a solid surface.
    #[inline]
    #[must_use]
    pub fn has_solid_surface(&self) -> bool {
        self.kind == BodyKind::Rocky
    }

    /// Semi-major axis, zero for bodies without an orbit.
    #[inline]
    #[must_use]
    pub fn semi_major_axis(&self) -> f64 {
        self.orbit.map_or(0.0, |o| o.semi_major_axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_body_from_toml() {
        let body: Body = toml::from_str(
            r#"
            name = "Duna"
            parent = "Sun"
            kind = "rocky"
            radius = 320000.0
            [orbit]
            semi_major_axis = 20726155264.0
            eccentricity = 0.051
            "#,
        )
        .expect("body parses");

        assert_eq!(body.parent.as_deref(), Some("Sun"));
        assert!(body.has_solid_surface());
        assert!((body.semi_major_axis() - 20_726_155_264.0).abs() < 1.0);
        assert!(body.atmosphere.is_none());
        assert_eq!(body.material.shader, Shader::Simple);
        assert!(body.display_name.is_empty(), "filled in by the system");
    }

    #[test]
    fn test_builder() {
        let body = Body::new("Mun", BodyKind::Rocky)
            .orbiting("Kerbin", Orbit { semi_major_axis: 12_000_000.0, ..Orbit::default() })
            .with_radius(200_000.0);
        assert_eq!(body.display_name, "Mun");
        assert_eq!(body.parent.as_deref(), Some("Kerbin"));
        assert!(!body.is_star());
    }
}
