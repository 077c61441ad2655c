//! # Built-in Rules
//!
//! Body rules of the `celestial` group and the terrain seed rules.

mod atmosphere;
mod atmosphere_toggle;
mod gas_color;
mod name;
mod orbit;
pub mod terrain_seed;

pub use atmosphere::AtmosphereRule;
pub use atmosphere_toggle::AtmosphereToggleRule;
pub use gas_color::GasPlanetColorRule;
pub use name::NameRule;
pub use orbit::OrbitRule;
