//! Terrain seed rules: every seed of a matching modifier gets a fresh
//! `next_int()` from the session stream.
//!
//! Crater fields are the exception. They draw from a new stream bound to the
//! game seed, so every crater field of a session gets the same two seeds.

use diversity_procedural::SeededRandomStream;

use crate::error::TweakResult;
use crate::rule::{RuleContext, TerrainModRule};
use crate::terrain::{TerrainMod, TerrainModKind};

/// One rule per terrain modifier kind, in registration order.
#[must_use]
pub fn rules() -> Vec<TerrainModRule> {
    TerrainModKind::ALL
        .iter()
        .map(|&kind| match kind {
            TerrainModKind::VoronoiCraters => TerrainModRule::new(kind, reseed_from_game_seed),
            _ => TerrainModRule::new(kind, reseed),
        })
        .collect()
}

/// Re-rolls every present seed from the session stream.
///
/// # Errors
///
/// `Unseeded` if the session stream is unbound.
pub fn reseed(terrain_mod: &mut TerrainMod, ctx: &mut RuleContext<'_>) -> TweakResult<bool> {
    for slot in terrain_mod.seed_slots_mut() {
        *slot = ctx.rng.next_int()?;
    }
    Ok(true)
}

/// Re-rolls every seed from a fresh stream bound to the game seed.
///
/// # Errors
///
/// Never in practice; the fresh stream is always bound.
pub fn reseed_from_game_seed(
    terrain_mod: &mut TerrainMod,
    ctx: &mut RuleContext<'_>,
) -> TweakResult<bool> {
    let mut fresh = SeededRandomStream::seeded(ctx.seed);
    for slot in terrain_mod.seed_slots_mut() {
        *slot = fresh.next_int()?;
    }
    Ok(true)
}
