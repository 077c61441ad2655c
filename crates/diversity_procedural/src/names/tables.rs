//! Fragment tables for name synthesis.

use serde::{Deserialize, Serialize};

use crate::error::{ProceduralError, ProceduralResult};

/// Spelled token used when the tier roll lands past the rare tier.
pub const EXCEPTIONAL_LETTER: &str = "Kappa";
/// Character token used when the tier roll lands past the rare tier.
pub const EXCEPTIONAL_CHAR: &str = "κ";

const PLANET_PREFIX: &[&str] = &[
    "Mer", "Ven", "Ear", "Mar", "Ju", "Sat", "Ur", "Nep", "Mo", "E", "Ker", "Du", "Jo", "Er",
    "Aph", "Geo", "Ar", "Ze", "Chr", "Cae", "Pos", "Bel", "Bil", "Cour", "Ein", "Gus", "Greg",
    "Jeb", "Murf", "Murph", "Stef", "Steph", "Th'No", "As", "Az", "Et", "Ga", "Ik", "Is", "Je",
    "Qo", "Sa", "Uo", "Vo", "Wo", "Ber", "Bre", "Cee", "Cel", "Clo", "Cor", "Cre", "Dil", "Hur",
    "Jex", "Kep", "Kev", "Kos", "Lan", "Ler", "Loo", "Lum", "Lun", "Moo", "Mur", "Nem", "Pra",
    "Que", "Tar", "Uur", "Vul", "Zer", "Erde", "Trur", "Lurlur", "Querr",
];

const PLANET_MIDDLE: &[&str] = &[
    "cury", "nus", "th", "s", "pit", "urn", "an", "tu", "ho", "ve", "bin", "na", "ol", "mes",
    "ro", "es", "us", "on", "lum", "eid", "bob", "ella", "ley", "ly", "lynn", "man", "ney", "sux",
    "ool", "'noS", "bodobo", "ed", "up", "bal", "ban", "bel", "bor", "can", "con", "cor", "ero",
    "far", "for", "kel", "pon", "sic", "tin", "tor", "bini", "filt", "this",
];

const PLANET_SUFFIX: &[&str] = &[
    "er", "us", "ne", "dite", "os", "on", "'s World", "'s Planet", "-X", "-Y", "-Z", "oon", "'orL",
    "'Orhs", "a", "ar", "as", "ia", "in", "la", "ol", "or", "ro", "te", "th", "un", "end", "erl",
    "iah", "ian", "ina", "man", "obo", "ony", "ore", "orf", "oss", "rig", "xis", "xiz", "dyne",
    "eker", "lech", "lony", "nert", "obon", "ough", "osser",
];

const COMMON_LETTERS: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota",
];

const RARE_LETTERS: &[&str] = &[
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega",
];

const COMMON_CHARS: &[&str] = &["α", "β", "γ", "δ", "ε", "ζ", "η", "θ", "ι"];

const RARE_CHARS: &[&str] = &[
    "λ", "μ", "ν", "ξ", "ο", "π", "ρ", "σ", "τ", "υ", "φ", "χ", "ψ", "ω",
];

const STAR_PREFIX: &[&str] = &[
    "An", "Aq", "Ar", "Au", "Bo", "Ca", "Ce", "Cy", "Dra", "Er", "Gem", "Her", "Hy", "La", "Le",
    "Ly", "Mo", "Oph", "Or", "Pe", "Pho", "Pyx", "Sa", "Sco", "Ser", "Ta", "Tri", "Ve", "Vir",
    "Vu",
];

const STAR_MIDDLE: &[&str] = &[
    "", "", "", "dr", "g", "l", "m", "n", "nt", "r", "ss", "st", "th", "ur",
];

const STAR_SUFFIX: &[&str] = &[
    "ae", "aris", "ei", "ii", "ion", "is", "itis", "ium", "oris", "ornis", "ulae", "um", "us",
    "yae", "orum",
];

const STAR_MULTIPLE: &[&str] = &["A", "B", "C", "AB", "Ab", "Ba"];

const CATALOGUE_ACRONYMS: &[&str] = &[
    "HD", "HIP", "GJ", "LHS", "TYC", "KOI", "TOI", "WASP", "HAT-P", "BD", "CoRoT", "Wolf",
    "Ross", "LTT",
];

const RESERVED: &[&str] = &["Kerbin", "Kerbol"];

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| (*s).to_string()).collect()
}

/// Every fragment table the synthesizer draws from.
///
/// `Default` provides the built-in tables. Custom tables can be deserialised
/// from TOML; all of them must be non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTables {
    /// Planet name openings.
    pub planet_prefix: Vec<String>,
    /// Optional planet name middles.
    pub planet_middle: Vec<String>,
    /// Planet name endings.
    pub planet_suffix: Vec<String>,
    /// Frequent spelled Greek letters.
    pub common_letters: Vec<String>,
    /// Infrequent spelled Greek letters.
    pub rare_letters: Vec<String>,
    /// Frequent Greek characters.
    pub common_chars: Vec<String>,
    /// Infrequent Greek characters.
    pub rare_chars: Vec<String>,
    /// Constellation openings.
    pub star_prefix: Vec<String>,
    /// Constellation middles, may contain empty strings.
    pub star_middle: Vec<String>,
    /// Constellation endings.
    pub star_suffix: Vec<String>,
    /// Multiple-star-system markers.
    pub star_multiple: Vec<String>,
    /// Catalogue prefixes for systematic star names.
    pub acronyms: Vec<String>,
    /// Names that must never be produced for planets.
    pub reserved: Vec<String>,
}

impl Default for NameTables {
    fn default() -> Self {
        Self {
            planet_prefix: owned(PLANET_PREFIX),
            planet_middle: owned(PLANET_MIDDLE),
            planet_suffix: owned(PLANET_SUFFIX),
            common_letters: owned(COMMON_LETTERS),
            rare_letters: owned(RARE_LETTERS),
            common_chars: owned(COMMON_CHARS),
            rare_chars: owned(RARE_CHARS),
            star_prefix: owned(STAR_PREFIX),
            star_middle: owned(STAR_MIDDLE),
            star_suffix: owned(STAR_SUFFIX),
            star_multiple: owned(STAR_MULTIPLE),
            acronyms: owned(CATALOGUE_ACRONYMS),
            reserved: owned(RESERVED),
        }
    }
}

impl NameTables {
    /// Checks that every drawn-from table has at least one entry.
    ///
    /// The reserved list may be empty.
    ///
    /// # Errors
    ///
    /// `EmptyTable` naming the first empty table.
    pub fn validate(&self) -> ProceduralResult<()> {
        let tables = [
            ("planet_prefix", &self.planet_prefix),
            ("planet_middle", &self.planet_middle),
            ("planet_suffix", &self.planet_suffix),
            ("common_letters", &self.common_letters),
            ("rare_letters", &self.rare_letters),
            ("common_chars", &self.common_chars),
            ("rare_chars", &self.rare_chars),
            ("star_prefix", &self.star_prefix),
            ("star_middle", &self.star_middle),
            ("star_suffix", &self.star_suffix),
            ("star_multiple", &self.star_multiple),
            ("acronyms", &self.acronyms),
        ];
        for (name, table) in tables {
            if table.is_empty() {
                return Err(ProceduralError::EmptyTable(name.to_string()));
            }
        }
        Ok(())
    }

    /// Whether `name` is reserved.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r == name)
    }
}
