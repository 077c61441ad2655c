//! # Seeded Random Stream
//!
//! The single source of randomness for a generation session.
//!
//! ## Bind-Once Semantics
//!
//! A stream is bound to the **first** seed it is given. Later calls to
//! [`SeededRandomStream::initialize`] with a different seed are ignored until
//! [`SeededRandomStream::reset`] is called. Rules never receive their own
//! generator: every value they draw depends on how many values were drawn
//! before them, so call order is part of the determinism contract.
//!
//! ## Determinism Guarantee
//!
//! Given the same `GameSeed` and the same sequence of calls, the stream
//! produces exactly the same values on any platform (ChaCha8 is portable).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{ProceduralError, ProceduralResult};

/// Game seed for deterministic generation.
///
/// All randomness of a session derives from this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameSeed(i32);

impl GameSeed {
    /// Creates a new game seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Parses a user supplied seed.
    ///
    /// Numeric text is used as is. Anything else is hashed (FNV-1a), so a
    /// player can type a word and still get a stable seed.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Self(value);
        }

        let mut hash: u32 = 0x811C_9DC5;
        for byte in trimmed.bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(0x0100_0193);
        }
        Self(hash as i32)
    }
}

impl Default for GameSeed {
    fn default() -> Self {
        Self(0x5EED_CAFE)
    }
}

impl std::fmt::Display for GameSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bind-once deterministic random stream.
#[derive(Clone, Debug, Default)]
pub struct SeededRandomStream {
    /// The bound generator, `None` until the first `initialize`.
    rng: Option<ChaCha8Rng>,
    /// The seed the generator was bound to.
    seed: Option<GameSeed>,
}

impl SeededRandomStream {
    /// Creates an unbound stream.
    #[must_use]
    pub const fn new() -> Self {
        Self { rng: None, seed: None }
    }

    /// Creates a stream already bound to `seed`.
    #[must_use]
    pub fn seeded(seed: GameSeed) -> Self {
        let mut stream = Self::new();
        stream.initialize(seed);
        stream
    }

    /// Binds the stream to `seed` if no seed is bound yet.
    ///
    /// Returns `true` if this call bound the stream, `false` if an earlier
    /// seed is still in effect.
    pub fn initialize(&mut self, seed: GameSeed) -> bool {
        if self.rng.is_some() {
            return false;
        }
        let raw = i64::from(seed.value()) as u64;
        self.rng = Some(ChaCha8Rng::seed_from_u64(raw));
        self.seed = Some(seed);
        true
    }

    /// Whether a seed is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.rng.is_some()
    }

    /// The seed currently in effect.
    #[must_use]
    pub const fn bound_seed(&self) -> Option<GameSeed> {
        self.seed
    }

    /// Forgets the bound generator. The next `initialize` re-seeds.
    pub fn reset(&mut self) {
        self.rng = None;
        self.seed = None;
    }

    fn generator(&mut self) -> ProceduralResult<&mut ChaCha8Rng> {
        self.rng.as_mut().ok_or(ProceduralError::Unseeded)
    }

    /// Next non-negative integer in `[0, i32::MAX)`.
    ///
    /// # Errors
    ///
    /// `Unseeded` if no seed is bound.
    pub fn next_int(&mut self) -> ProceduralResult<i32> {
        Ok(self.generator()?.gen_range(0..i32::MAX))
    }

    /// Next integer in `[min, max)`.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `max <= min`, `Unseeded` if no seed is bound.
    pub fn next_int_range(&mut self, min: i32, max: i32) -> ProceduralResult<i32> {
        if max <= min {
            return Err(ProceduralError::InvalidRange { min, max });
        }
        Ok(self.generator()?.gen_range(min..max))
    }

    /// Next double, `min + uniform01 * (max - min)`.
    ///
    /// # Errors
    ///
    /// `Unseeded` if no seed is bound.
    pub fn next_double(&mut self, min: f64, max: f64) -> ProceduralResult<f64> {
        let unit: f64 = self.generator()?.gen();
        Ok(min + unit * (max - min))
    }

    /// Rolls a percentage: `true` with `percent`% probability.
    ///
    /// Consumes exactly one `next_int_range(0, 100)` draw.
    ///
    /// # Errors
    ///
    /// `Unseeded` if no seed is bound.
    pub fn chance(&mut self, percent: i32) -> ProceduralResult<bool> {
        Ok(self.next_int_range(0, 100)? < percent)
    }

    /// Picks a uniformly random element.
    ///
    /// # Errors
    ///
    /// `EmptyTable` if `items` is empty, `Unseeded` if no seed is bound.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> ProceduralResult<&'a T> {
        if items.is_empty() {
            return Err(ProceduralError::EmptyTable(std::any::type_name::<T>().to_string()));
        }
        let len = i32::try_from(items.len()).unwrap_or(i32::MAX);
        let index = self.next_int_range(0, len)?;
        Ok(&items[index as usize])
    }

    /// Expands a percentage table into a flat list.
    ///
    /// Each element appears `weight` times. The table must add up to exactly
    /// 100; partial or oversized tables are rejected, never normalised.
    ///
    /// # Errors
    ///
    /// `InvalidWeights` if the percentages do not sum to 100.
    pub fn make_chance_list<T: Clone>(weights: &[(T, u32)]) -> ProceduralResult<Vec<T>> {
        let sum: u64 = weights.iter().map(|(_, w)| u64::from(*w)).sum();
        if sum != 100 {
            return Err(ProceduralError::InvalidWeights { sum });
        }

        let mut list = Vec::with_capacity(100);
        for (element, weight) in weights {
            list.extend(std::iter::repeat(element.clone()).take(*weight as usize));
        }
        Ok(list)
    }

    /// Weighted discrete choice over a percentage table.
    ///
    /// # Errors
    ///
    /// `InvalidWeights` if the table does not sum to 100, `Unseeded` if no
    /// seed is bound.
    pub fn choose<T: Clone>(&mut self, weights: &[(T, u32)]) -> ProceduralResult<T> {
        let list = Self::make_chance_list(weights)?;
        self.pick(&list).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seed_wins() {
        let mut stream = SeededRandomStream::new();
        assert!(stream.initialize(GameSeed::new(42)));
        assert!(!stream.initialize(GameSeed::new(7)), "second seed must be ignored");
        assert_eq!(stream.bound_seed(), Some(GameSeed::new(42)));

        let mut reference = SeededRandomStream::seeded(GameSeed::new(42));
        for _ in 0..32 {
            assert_eq!(stream.next_int().unwrap(), reference.next_int().unwrap());
        }
    }

    #[test]
    fn test_reset_allows_reseed() {
        let mut stream = SeededRandomStream::seeded(GameSeed::new(1));
        stream.reset();
        assert!(!stream.is_bound());
        assert!(stream.initialize(GameSeed::new(2)));
        assert_eq!(stream.bound_seed(), Some(GameSeed::new(2)));
    }

    #[test]
    fn test_unbound_stream_fails() {
        let mut stream = SeededRandomStream::new();
        assert_eq!(stream.next_int(), Err(ProceduralError::Unseeded));
        assert_eq!(stream.next_double(0.0, 1.0), Err(ProceduralError::Unseeded));
    }

    #[test]
    fn test_range_bounds() {
        let mut stream = SeededRandomStream::seeded(GameSeed::new(99));
        for _ in 0..1000 {
            let value = stream.next_int_range(-3, 3).unwrap();
            assert!((-3..3).contains(&value), "value {value} out of range");

            let double = stream.next_double(0.8, 1.2).unwrap();
            assert!((0.8..1.2).contains(&double), "double {double} out of range");
        }
        assert!(stream.next_int().unwrap() >= 0);
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut stream = SeededRandomStream::seeded(GameSeed::new(99));
        assert_eq!(
            stream.next_int_range(5, 5),
            Err(ProceduralError::InvalidRange { min: 5, max: 5 })
        );
        assert!(stream.next_int_range(6, 5).is_err());
    }

    #[test]
    fn test_chance_table_must_sum_to_100() {
        let under = [("a", 50), ("b", 49)];
        let over = [("a", 50), ("b", 51)];
        assert_eq!(
            SeededRandomStream::make_chance_list(&under),
            Err(ProceduralError::InvalidWeights { sum: 99 })
        );
        assert_eq!(
            SeededRandomStream::make_chance_list(&over),
            Err(ProceduralError::InvalidWeights { sum: 101 })
        );

        let mut stream = SeededRandomStream::seeded(GameSeed::new(5));
        assert!(stream.choose(&under).is_err());
        assert!(stream.choose(&over).is_err());
    }

    #[test]
    fn test_chance_table_draw() {
        let table = [("never", 0), ("rare", 3), ("common", 97)];
        let list = SeededRandomStream::make_chance_list(&table).unwrap();
        assert_eq!(list.len(), 100);
        assert_eq!(list.iter().filter(|e| **e == "rare").count(), 3);

        let mut stream = SeededRandomStream::seeded(GameSeed::new(5));
        for _ in 0..500 {
            let drawn = stream.choose(&table).unwrap();
            assert_ne!(drawn, "never", "zero-weight entry must never be drawn");
        }
    }

    #[test]
    fn test_pick_empty_table() {
        let mut stream = SeededRandomStream::seeded(GameSeed::new(5));
        let empty: [u8; 0] = [];
        assert!(matches!(stream.pick(&empty), Err(ProceduralError::EmptyTable(_))));
    }

    #[test]
    fn test_seed_parse() {
        assert_eq!(GameSeed::parse("42"), GameSeed::new(42));
        assert_eq!(GameSeed::parse(" -7 "), GameSeed::new(-7));
        assert_eq!(GameSeed::parse("kraken"), GameSeed::parse("kraken"));
        assert_ne!(GameSeed::parse("kraken"), GameSeed::parse("krakens"));
    }
}
