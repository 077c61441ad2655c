//! # Terrain Modifiers
//!
//! Noise-driven terrain modifiers attached to a body. Only their seeds are
//! modelled: the engine re-rolls seeds, the host rebuilds the terrain.
//!
//! Optional sub-noises are `Option`s and only get a new seed when present.

use serde::{Deserialize, Serialize};

/// Kind of a terrain modifier, used to route modifiers to their rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainModKind {
    /// Height noise.
    VertexHeightNoise,
    /// Height noise scaled by height.
    VertexHeightNoiseVertHeight,
    /// Height noise shaped by a height curve.
    VertexHeightNoiseVertHeightCurve,
    /// Ridged and simplex height noise shaped by a height curve.
    VertexHeightNoiseVertHeightCurve2,
    /// Height curve noise with optional sub-noises.
    VertexHeightNoiseVertHeightCurve3,
    /// Ridged noise shaped by an altitude curve.
    VertexRidgedAltitudeCurve,
    /// Simplex height.
    VertexSimplexHeight,
    /// Per-channel simplex colour.
    VertexSimplexMultiChromatic,
    /// Voronoi height.
    VertexVoronoi,
    /// Crater field.
    VoronoiCraters,
    /// Scattered meshes.
    MeshScatter,
    /// Land classes and scatter placement.
    LandControl,
    /// Whole-planet continental noise.
    VertexPlanet,
}

impl TerrainModKind {
    /// Every kind, in rule registration order.
    pub const ALL: [Self; 13] = [
        Self::VertexHeightNoise,
        Self::VertexHeightNoiseVertHeight,
        Self::VertexHeightNoiseVertHeightCurve,
        Self::VertexHeightNoiseVertHeightCurve2,
        Self::VertexHeightNoiseVertHeightCurve3,
        Self::VertexRidgedAltitudeCurve,
        Self::VertexSimplexHeight,
        Self::VertexSimplexMultiChromatic,
        Self::VertexVoronoi,
        Self::VoronoiCraters,
        Self::MeshScatter,
        Self::LandControl,
        Self::VertexPlanet,
    ];

    /// Config key and rule name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::VertexHeightNoise => "vertex_height_noise",
            Self::VertexHeightNoiseVertHeight => "vertex_height_noise_vert_height",
            Self::VertexHeightNoiseVertHeightCurve => "vertex_height_noise_vert_height_curve",
            Self::VertexHeightNoiseVertHeightCurve2 => "vertex_height_noise_vert_height_curve2",
            Self::VertexHeightNoiseVertHeightCurve3 => "vertex_height_noise_vert_height_curve3",
            Self::VertexRidgedAltitudeCurve => "vertex_ridged_altitude_curve",
            Self::VertexSimplexHeight => "vertex_simplex_height",
            Self::VertexSimplexMultiChromatic => "vertex_simplex_multi_chromatic",
            Self::VertexVoronoi => "vertex_voronoi",
            Self::VoronoiCraters => "voronoi_craters",
            Self::MeshScatter => "mesh_scatter",
            Self::LandControl => "land_control",
            Self::VertexPlanet => "vertex_planet",
        }
    }
}

/// One land class of a [`LandControl`] modifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandClass {
    /// Coverage noise seed.
    pub coverage_seed: i32,
    /// Detail noise seed.
    pub noise_seed: i32,
    /// Optional coverage simplex.
    pub coverage_simplex: Option<i32>,
    /// Optional detail simplex.
    pub noise_simplex: Option<i32>,
}

/// Land class placement modifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandControl {
    /// Altitude noise seed.
    pub altitude_seed: i32,
    /// Latitude noise seed.
    pub latitude_seed: i32,
    /// Longitude noise seed.
    pub longitude_seed: i32,
    /// Optional altitude simplex.
    pub altitude_simplex: Option<i32>,
    /// Optional latitude simplex.
    pub latitude_simplex: Option<i32>,
    /// Optional longitude simplex.
    pub longitude_simplex: Option<i32>,
    /// Land classes.
    pub land_classes: Vec<LandClass>,
    /// Scatter seeds.
    pub scatters: Vec<i32>,
}

/// Land class of a [`VertexPlanet`] modifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetLandClass {
    /// Optional colour noise map.
    pub color_noise_map: Option<i32>,
}

/// Whole-planet terrain modifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexPlanet {
    /// Base seed.
    pub seed: i32,
    /// Optional continental noise.
    pub continental: Option<i32>,
    /// Optional continental ruggedness noise.
    pub continental_ruggedness: Option<i32>,
    /// Optional continental sharpness noise.
    pub continental_sharpness: Option<i32>,
    /// Optional continental sharpness map.
    pub continental_sharpness_map: Option<i32>,
    /// Optional terrain type noise.
    pub terrain_type: Option<i32>,
    /// Land classes.
    pub land_classes: Vec<PlanetLandClass>,
}

/// A terrain modifier with its noise seeds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum TerrainMod {
    VertexHeightNoise {
        #[serde(default)]
        seed: i32,
    },
    VertexHeightNoiseVertHeight {
        #[serde(default)]
        seed: i32,
    },
    VertexHeightNoiseVertHeightCurve {
        #[serde(default)]
        seed: i32,
    },
    VertexHeightNoiseVertHeightCurve2 {
        #[serde(default)]
        ridged_add_seed: i32,
        #[serde(default)]
        ridged_sub_seed: i32,
        #[serde(default)]
        simplex_seed: i32,
    },
    VertexHeightNoiseVertHeightCurve3 {
        #[serde(default)]
        curve_multiplier: Option<i32>,
        #[serde(default)]
        deformity: Option<i32>,
        #[serde(default)]
        ridged_add: Option<i32>,
        #[serde(default)]
        ridged_sub: Option<i32>,
    },
    VertexRidgedAltitudeCurve {
        #[serde(default)]
        ridged_add_seed: i32,
        #[serde(default)]
        simplex_seed: i32,
    },
    VertexSimplexHeight {
        #[serde(default)]
        seed: i32,
    },
    VertexSimplexMultiChromatic {
        #[serde(default)]
        alpha_seed: i32,
        #[serde(default)]
        red_seed: i32,
        #[serde(default)]
        green_seed: i32,
        #[serde(default)]
        blue_seed: i32,
    },
    VertexVoronoi {
        #[serde(default)]
        voronoi_seed: i32,
    },
    VoronoiCraters {
        #[serde(default)]
        simplex_seed: i32,
        #[serde(default)]
        voronoi_seed: i32,
    },
    MeshScatter {
        #[serde(default)]
        seed: i32,
    },
    LandControl(LandControl),
    VertexPlanet(VertexPlanet),
}

impl TerrainMod {
    /// The kind of this modifier.
    #[must_use]
    pub const fn kind(&self) -> TerrainModKind {
        match self {
            Self::VertexHeightNoise { .. } => TerrainModKind::VertexHeightNoise,
            Self::VertexHeightNoiseVertHeight { .. } => TerrainModKind::VertexHeightNoiseVertHeight,
            Self::VertexHeightNoiseVertHeightCurve { .. } => {
                TerrainModKind::VertexHeightNoiseVertHeightCurve
            }
            Self::VertexHeightNoiseVertHeightCurve2 { .. } => {
                TerrainModKind::VertexHeightNoiseVertHeightCurve2
            }
            Self::VertexHeightNoiseVertHeightCurve3 { .. } => {
                TerrainModKind::VertexHeightNoiseVertHeightCurve3
            }
            Self::VertexRidgedAltitudeCurve { .. } => TerrainModKind::VertexRidgedAltitudeCurve,
            Self::VertexSimplexHeight { .. } => TerrainModKind::VertexSimplexHeight,
            Self::VertexSimplexMultiChromatic { .. } => TerrainModKind::VertexSimplexMultiChromatic,
            Self::VertexVoronoi { .. } => TerrainModKind::VertexVoronoi,
            Self::VoronoiCraters { .. } => TerrainModKind::VoronoiCraters,
            Self::MeshScatter { .. } => TerrainModKind::MeshScatter,
            Self::LandControl(_) => TerrainModKind::LandControl,
            Self::VertexPlanet(_) => TerrainModKind::VertexPlanet,
        }
    }

    /// Every seed present on the modifier, in the order they are re-rolled.
    pub fn seed_slots_mut(&mut self) -> Vec<&mut i32> {
        match self {
            Self::VertexHeightNoise { seed }
            | Self::VertexHeightNoiseVertHeight { seed }
            | Self::VertexHeightNoiseVertHeightCurve { seed }
            | Self::VertexSimplexHeight { seed }
            | Self::MeshScatter { seed } => vec![seed],
            Self::VertexHeightNoiseVertHeightCurve2 {
                ridged_add_seed,
                ridged_sub_seed,
                simplex_seed,
            } => vec![ridged_add_seed, ridged_sub_seed, simplex_seed],
            Self::VertexHeightNoiseVertHeightCurve3 {
                curve_multiplier,
                deformity,
                ridged_add,
                ridged_sub,
            } => [curve_multiplier, deformity, ridged_add, ridged_sub]
                .into_iter()
                .filter_map(Option::as_mut)
                .collect(),
            Self::VertexRidgedAltitudeCurve {
                ridged_add_seed,
                simplex_seed,
            } => vec![ridged_add_seed, simplex_seed],
            Self::VertexSimplexMultiChromatic {
                alpha_seed,
                red_seed,
                green_seed,
                blue_seed,
            } => vec![alpha_seed, red_seed, green_seed, blue_seed],
            Self::VertexVoronoi { voronoi_seed } => vec![voronoi_seed],
            Self::VoronoiCraters {
                simplex_seed,
                voronoi_seed,
            } => vec![simplex_seed, voronoi_seed],
            Self::LandControl(control) => {
                let mut slots = vec![
                    &mut control.altitude_seed,
                    &mut control.latitude_seed,
                    &mut control.longitude_seed,
                ];
                slots.extend(
                    [
                        &mut control.altitude_simplex,
                        &mut control.latitude_simplex,
                        &mut control.longitude_simplex,
                    ]
                    .into_iter()
                    .filter_map(Option::as_mut),
                );
                for class in &mut control.land_classes {
                    slots.push(&mut class.coverage_seed);
                    slots.push(&mut class.noise_seed);
                    slots.extend(
                        [&mut class.coverage_simplex, &mut class.noise_simplex]
                            .into_iter()
                            .filter_map(Option::as_mut),
                    );
                }
                slots.extend(control.scatters.iter_mut());
                slots
            }
            Self::VertexPlanet(planet) => {
                let mut slots = vec![&mut planet.seed];
                slots.extend(
                    [
                        &mut planet.continental,
                        &mut planet.continental_ruggedness,
                        &mut planet.continental_sharpness,
                        &mut planet.continental_sharpness_map,
                        &mut planet.terrain_type,
                    ]
                    .into_iter()
                    .filter_map(Option::as_mut),
                );
                slots.extend(
                    planet
                        .land_classes
                        .iter_mut()
                        .filter_map(|class| class.color_noise_map.as_mut()),
                );
                slots
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_are_unique() {
        let mut names: Vec<&str> = TerrainModKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TerrainModKind::ALL.len());
    }

    #[test]
    fn test_optional_seeds_are_skipped() {
        let mut curve3 = TerrainMod::VertexHeightNoiseVertHeightCurve3 {
            curve_multiplier: None,
            deformity: Some(4),
            ridged_add: None,
            ridged_sub: Some(9),
        };
        let slots: Vec<i32> = curve3.seed_slots_mut().into_iter().map(|s| *s).collect();
        assert_eq!(slots, vec![4, 9]);
    }

    #[test]
    fn test_land_control_slot_order() {
        let mut control = TerrainMod::LandControl(LandControl {
            altitude_seed: 1,
            latitude_seed: 2,
            longitude_seed: 3,
            altitude_simplex: None,
            latitude_simplex: Some(4),
            longitude_simplex: None,
            land_classes: vec![LandClass {
                coverage_seed: 5,
                noise_seed: 6,
                coverage_simplex: Some(7),
                noise_simplex: None,
            }],
            scatters: vec![8, 9],
        });
        let slots: Vec<i32> = control.seed_slots_mut().into_iter().map(|s| *s).collect();
        assert_eq!(slots, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_terrain_mods_from_toml() {
        #[derive(Deserialize)]
        struct Mods {
            terrain_mods: Vec<TerrainMod>,
        }
        let mods: Mods = toml::from_str(
            r#"
            [[terrain_mods]]
            type = "vertex_height_noise"
            seed = 12

            [[terrain_mods]]
            type = "voronoi_craters"

            [[terrain_mods]]
            type = "vertex_planet"
            seed = 3
            continental = 5
            land_classes = [{ color_noise_map = 1 }, {}]
            "#,
        )
        .expect("terrain mods parse");

        assert_eq!(mods.terrain_mods[0], TerrainMod::VertexHeightNoise { seed: 12 });
        assert_eq!(mods.terrain_mods[1].kind(), TerrainModKind::VoronoiCraters);
        let TerrainMod::VertexPlanet(planet) = &mods.terrain_mods[2] else {
            panic!("expected vertex planet");
        };
        assert_eq!(planet.continental, Some(5));
        assert_eq!(planet.land_classes.len(), 2);
    }
}
