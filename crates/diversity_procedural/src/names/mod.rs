//! # Name Synthesis
//!
//! Two grammars for body names, chosen once per star and shared by every
//! body that orbits it.
//!
//! ## Schemes
//!
//! - **Systematic**: the star gets a catalogue designation (`HD 00452`),
//!   planets append a Roman numeral to their star (`HD 00452 II`), moons append
//!   a lowercase letter to their planet (`HD 00452 IIb`)
//! - **Freeform**: every body gets an independent name from fragment tables
//!
//! A star's scheme is rolled on its first visit (`next_int_range(0, 100) < 50`
//! means systematic) and cached until [`NameSynthesizer::reset`].
//!
//! ## Draw Order
//!
//! Every operation draws from the shared stream in a fixed order. Changing the
//! order changes every name generated after it.

mod tables;

use std::collections::HashMap;

use crate::error::{ProceduralError, ProceduralResult};
use crate::random::SeededRandomStream;

pub use tables::{NameTables, EXCEPTIONAL_CHAR, EXCEPTIONAL_LETTER};

/// Freeform planet names are regenerated at most this many times.
pub const MAX_NAME_ATTEMPTS: u32 = 64;

/// Naming grammar of one star subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamingScheme {
    /// Catalogue star name, positional child names.
    Systematic,
    /// Independently synthesised names.
    Freeform,
}

/// Name generator with the per-star scheme cache.
#[derive(Clone, Debug)]
pub struct NameSynthesizer {
    tables: NameTables,
    schemes: HashMap<String, NamingScheme>,
}

impl Default for NameSynthesizer {
    fn default() -> Self {
        Self {
            tables: NameTables::default(),
            schemes: HashMap::new(),
        }
    }
}

impl NameSynthesizer {
    /// Creates a synthesizer over custom tables.
    ///
    /// # Errors
    ///
    /// `EmptyTable` if a required table is empty.
    pub fn new(tables: NameTables) -> ProceduralResult<Self> {
        tables.validate()?;
        Ok(Self {
            tables,
            schemes: HashMap::new(),
        })
    }

    /// The fragment tables in use.
    #[must_use]
    pub fn tables(&self) -> &NameTables {
        &self.tables
    }

    /// Returns the cached scheme of `star`, rolling it on first use.
    ///
    /// # Errors
    ///
    /// `Unseeded` if the roll is needed and the stream is unbound.
    pub fn scheme_for_star(
        &mut self,
        star: &str,
        rng: &mut SeededRandomStream,
    ) -> ProceduralResult<NamingScheme> {
        if let Some(scheme) = self.schemes.get(star) {
            return Ok(*scheme);
        }
        let scheme = if rng.chance(50)? {
            NamingScheme::Systematic
        } else {
            NamingScheme::Freeform
        };
        self.schemes.insert(star.to_string(), scheme);
        Ok(scheme)
    }

    /// Pins the scheme of `star`; no roll is made for it afterwards.
    pub fn force_scheme(&mut self, star: &str, scheme: NamingScheme) {
        self.schemes.insert(star.to_string(), scheme);
    }

    /// The scheme of `star`, if already decided.
    #[must_use]
    pub fn scheme_of(&self, star: &str) -> Option<NamingScheme> {
        self.schemes.get(star).copied()
    }

    /// Forgets every cached scheme.
    pub fn reset(&mut self) {
        self.schemes.clear();
    }

    /// Constellation-style star name, e.g. `Beta Andromedae Minoris`.
    ///
    /// # Errors
    ///
    /// `Unseeded` if the stream is unbound.
    pub fn star_name(&self, rng: &mut SeededRandomStream) -> ProceduralResult<String> {
        let t = &self.tables;

        let mut constellation = rng.pick(&t.star_prefix)?.clone();
        constellation.push_str(rng.pick(&t.star_middle)?);
        if constellation == "An" {
            constellation.push('n');
        }
        constellation.push_str(rng.pick(&t.star_suffix)?);

        let use_chars = rng.chance(25)?;
        let tier = rng.next_int_range(0, 501)?;
        let token = match (tier, use_chars) {
            (0..=349, true) => rng.pick(&t.common_chars)?.as_str(),
            (0..=349, false) => rng.pick(&t.common_letters)?.as_str(),
            (350..=499, true) => rng.pick(&t.rare_chars)?.as_str(),
            (350..=499, false) => rng.pick(&t.rare_letters)?.as_str(),
            (_, true) => EXCEPTIONAL_CHAR,
            (_, false) => EXCEPTIONAL_LETTER,
        };
        let mut name = format!("{token} {constellation}");

        if rng.chance(10)? {
            name.push_str(if rng.chance(50)? { " Minoris" } else { " Majoris" });
        }
        if rng.chance(5)? {
            name.push(' ');
            name.push_str(rng.pick(&t.star_multiple)?);
        }
        Ok(name)
    }

    /// Catalogue-style star name: acronym, 0 to 4 zeros, a number in `[100, 9999)`.
    ///
    /// # Errors
    ///
    /// `Unseeded` if the stream is unbound.
    pub fn systematic_star_name(&self, rng: &mut SeededRandomStream) -> ProceduralResult<String> {
        let acronym = rng.pick(&self.tables.acronyms)?;
        let zeros = rng.next_int_range(0, 5)? as usize;
        let number = rng.next_int_range(100, 9999)?;
        Ok(format!("{acronym} {}{number}", "0".repeat(zeros)))
    }

    /// Freeform planet or moon name.
    ///
    /// Prefix, then a middle on a 50% roll, then a suffix on a 50% roll or
    /// whenever the middle was skipped. Reserved results are regenerated.
    ///
    /// # Errors
    ///
    /// `ReservedNamesExhausted` if [`MAX_NAME_ATTEMPTS`] attempts all hit a
    /// reserved name, `Unseeded` if the stream is unbound.
    pub fn planet_name(&self, rng: &mut SeededRandomStream) -> ProceduralResult<String> {
        let t = &self.tables;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let mut name = rng.pick(&t.planet_prefix)?.clone();
            let has_middle = rng.chance(50)?;
            if has_middle {
                name.push_str(rng.pick(&t.planet_middle)?);
            }
            if rng.chance(50)? || !has_middle {
                name.push_str(rng.pick(&t.planet_suffix)?);
            }
            if !t.is_reserved(&name) {
                return Ok(name);
            }
        }
        Err(ProceduralError::ReservedNamesExhausted {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    /// Positional name derived from the parent's display name.
    ///
    /// Bodies orbiting a star get `"{parent} {roman}"`, others get
    /// `"{parent}{letter}"`. `index` is the zero-based orbital index.
    ///
    /// # Errors
    ///
    /// `DesignatorOutOfRange` if the Roman numeral would exceed 3999.
    pub fn systematic_name(parent: &str, index: usize, orbits_star: bool) -> ProceduralResult<String> {
        if orbits_star {
            let numeral =
                roman_numeral(index + 1).ok_or(ProceduralError::DesignatorOutOfRange(index))?;
            Ok(format!("{parent} {numeral}"))
        } else {
            Ok(format!("{parent}{}", moon_letters(index)))
        }
    }
}

/// Roman numeral for `value` in `1..=3999`.
#[must_use]
pub fn roman_numeral(value: usize) -> Option<String> {
    const DIGITS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if value == 0 || value > 3999 {
        return None;
    }
    let mut rest = value;
    let mut numeral = String::new();
    for (weight, digits) in DIGITS {
        while rest >= weight {
            numeral.push_str(digits);
            rest -= weight;
        }
    }
    Some(numeral)
}

/// Letter designator for a zero-based index: `a`..`z`, then `aa`, `ab`, ...
#[must_use]
pub fn moon_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::GameSeed;

    #[test]
    fn test_roman_numerals() {
        let expected = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
        for (i, numeral) in expected.iter().enumerate() {
            assert_eq!(roman_numeral(i + 1).as_deref(), Some(*numeral));
        }
        assert_eq!(roman_numeral(49).as_deref(), Some("XLIX"));
        assert_eq!(roman_numeral(1994).as_deref(), Some("MCMXCIV"));
        assert_eq!(roman_numeral(0), None);
        assert_eq!(roman_numeral(4000), None);
    }

    #[test]
    fn test_moon_letters_continue_past_z() {
        assert_eq!(moon_letters(0), "a");
        assert_eq!(moon_letters(25), "z");
        assert_eq!(moon_letters(26), "aa");
        assert_eq!(moon_letters(27), "ab");
        assert_eq!(moon_letters(26 + 26 * 26), "aaa");
    }

    #[test]
    fn test_systematic_names() {
        assert_eq!(NameSynthesizer::systematic_name("Sol", 0, true).unwrap(), "Sol I");
        assert_eq!(NameSynthesizer::systematic_name("Sol", 3, true).unwrap(), "Sol IV");
        assert_eq!(NameSynthesizer::systematic_name("Sol III", 0, false).unwrap(), "Sol IIIa");
        assert_eq!(
            NameSynthesizer::systematic_name("Sol", 4000, true),
            Err(ProceduralError::DesignatorOutOfRange(4000))
        );
    }

    #[test]
    fn test_scheme_rolled_once() {
        let mut names = NameSynthesizer::default();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(3));
        let first = names.scheme_for_star("Sun", &mut rng).unwrap();

        let mut unbound = SeededRandomStream::new();
        let again = names.scheme_for_star("Sun", &mut unbound).unwrap();
        assert_eq!(first, again, "cached scheme must not draw");
        assert_eq!(names.scheme_of("Sun"), Some(first));

        names.reset();
        assert_eq!(names.scheme_of("Sun"), None);
    }

    #[test]
    fn test_forced_scheme_wins() {
        let mut names = NameSynthesizer::default();
        names.force_scheme("Sun", NamingScheme::Systematic);
        let mut unbound = SeededRandomStream::new();
        assert_eq!(
            names.scheme_for_star("Sun", &mut unbound).unwrap(),
            NamingScheme::Systematic
        );
    }

    #[test]
    fn test_star_names_are_well_formed() {
        let names = NameSynthesizer::default();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(11));
        for _ in 0..500 {
            let name = names.star_name(&mut rng).unwrap();
            let token = name.split(' ').next().unwrap();
            let t = names.tables();
            let known = t.common_letters.iter().chain(&t.rare_letters).chain(&t.common_chars).chain(&t.rare_chars).any(|l| l == token)
                || token == EXCEPTIONAL_LETTER
                || token == EXCEPTIONAL_CHAR;
            assert!(known, "star name {name} must start with a Greek token");
            assert!(name.split(' ').count() >= 2);
        }
    }

    #[test]
    fn test_an_is_padded() {
        let tables = NameTables {
            star_prefix: vec!["An".to_string()],
            star_middle: vec![String::new()],
            star_suffix: vec!["dromedae".to_string()],
            ..NameTables::default()
        };
        let names = NameSynthesizer::new(tables).unwrap();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(1));
        let name = names.star_name(&mut rng).unwrap();
        assert!(name.contains("Anndromedae"), "got {name}");
    }

    #[test]
    fn test_systematic_star_name_format() {
        let names = NameSynthesizer::default();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(8));
        for _ in 0..200 {
            let name = names.systematic_star_name(&mut rng).unwrap();
            let (acronym, number) = name.rsplit_once(' ').unwrap();
            assert!(names.tables().acronyms.iter().any(|a| a == acronym), "bad acronym in {name}");
            let zeros = number.len() - number.trim_start_matches('0').len();
            assert!(zeros <= 4, "too much padding in {name}");
            let value: u32 = number.trim_start_matches('0').parse().unwrap();
            assert!((100..9999).contains(&value), "number out of range in {name}");
        }
    }

    #[test]
    fn test_planet_name_has_middle_or_suffix() {
        let tables = NameTables {
            planet_prefix: vec!["P".to_string()],
            planet_middle: vec!["m".to_string()],
            planet_suffix: vec!["s".to_string()],
            ..NameTables::default()
        };
        let names = NameSynthesizer::new(tables).unwrap();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(21));
        for _ in 0..200 {
            let name = names.planet_name(&mut rng).unwrap();
            assert!(["Pm", "Ps", "Pms"].contains(&name.as_str()), "unexpected {name}");
        }
    }

    #[test]
    fn test_reserved_only_tables_exhaust() {
        let tables = NameTables {
            planet_prefix: vec!["Kerbin".to_string()],
            planet_middle: vec![String::new()],
            planet_suffix: vec![String::new()],
            ..NameTables::default()
        };
        let names = NameSynthesizer::new(tables).unwrap();
        let mut rng = SeededRandomStream::seeded(GameSeed::new(2));
        assert_eq!(
            names.planet_name(&mut rng),
            Err(ProceduralError::ReservedNamesExhausted { attempts: MAX_NAME_ATTEMPTS })
        );
    }

    #[test]
    fn test_same_seed_same_names() {
        let names = NameSynthesizer::default();
        let mut a = SeededRandomStream::seeded(GameSeed::new(77));
        let mut b = SeededRandomStream::seeded(GameSeed::new(77));
        for _ in 0..50 {
            assert_eq!(names.star_name(&mut a).unwrap(), names.star_name(&mut b).unwrap());
            assert_eq!(names.planet_name(&mut a).unwrap(), names.planet_name(&mut b).unwrap());
        }
    }
}
