//! # Diversity Procedural Generation
//!
//! Deterministic building blocks for re-rolling a planetary system.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and same call order always produce the same values
//! 2. **One stream**: A session draws everything from a single `SeededRandomStream`
//! 3. **Standalone**: Gradients and names are usable without the rule engine
//!
//! ## Core Components
//!
//! - `SeededRandomStream`: Bind-once random stream with weighted choice
//! - `Gradient`: Sparse colour stops, linear interpolation, ramp buffers
//! - `FloatCurve`: Keyframed curves and the atmosphere curve templates
//! - `NameSynthesizer`: Freeform and systematic naming grammars
//!
//! ## Example
//!
//! ```rust,ignore
//! use diversity_procedural::{GameSeed, Gradient, NameSynthesizer, SeededRandomStream, Color};
//!
//! let mut rng = SeededRandomStream::seeded(GameSeed::new(42));
//! let names = NameSynthesizer::default();
//! let star = names.star_name(&mut rng)?;
//!
//! let mut gradient = Gradient::new();
//! gradient.add(0.0, Color::BLACK);
//! gradient.add(1.0, Color::WHITE);
//! let ramp = gradient.ramp_rgba8(512);
//! ```

pub mod color;
pub mod curve;
pub mod error;
pub mod gradient;
pub mod names;
pub mod random;

pub use color::{Color, PALETTE};
pub use curve::{AtmosphereTemplate, FloatCurve, Keyframe, ATMOSPHERE_TEMPLATES};
pub use error::{ProceduralError, ProceduralResult};
pub use gradient::{Gradient, RAMP_WIDTH};
pub use names::{NameSynthesizer, NameTables, NamingScheme};
pub use random::{GameSeed, SeededRandomStream};
