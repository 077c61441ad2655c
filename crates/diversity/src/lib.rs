//! # Diversity
//!
//! Loads a planetary system and a rule configuration from disk and re-rolls
//! the system from a game seed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use diversity::{load_config, load_system, Diversity};
//! use diversity_procedural::GameSeed;
//!
//! let system = load_system("data/system.toml")?;
//! let config = load_config("data/diversity.toml")?;
//! let mut session = Diversity::new(system, config);
//! let changes = session.generate(GameSeed::parse("kraken"))?;
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use diversity_procedural::GameSeed;
use diversity_tweaks::{
    ChangeSet, DetachedHost, PlanetarySystem, RuleRegistry, SystemDescription, TweakConfig,
    TweakError, TweakOrchestrator,
};

/// Errors of the file-facing layer.
#[derive(Debug, Error)]
pub enum DiversityError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A file is not valid TOML for its schema.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// The system or the pass was rejected.
    #[error(transparent)]
    Tweak(#[from] TweakError),
}

/// Result type for facade operations.
pub type DiversityResult<T> = Result<T, DiversityError>;

fn read(path: &Path) -> DiversityResult<String> {
    std::fs::read_to_string(path).map_err(|source| DiversityError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates a system description.
///
/// # Errors
///
/// `Io`, `Parse`, or `Tweak` if the bodies do not form a valid system.
pub fn load_system(path: impl AsRef<Path>) -> DiversityResult<PlanetarySystem> {
    let path = path.as_ref();
    let description = SystemDescription::from_toml(&read(path)?).map_err(|source| {
        DiversityError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::info!("Loaded {} bodies from {}", description.bodies.len(), path.display());
    Ok(PlanetarySystem::from_description(description)?)
}

/// Loads a rule configuration.
///
/// # Errors
///
/// `Io` or `Parse`. The configuration is checked against the rules when a
/// pass runs.
pub fn load_config(path: impl AsRef<Path>) -> DiversityResult<TweakConfig> {
    let path = path.as_ref();
    TweakConfig::from_toml(&read(path)?).map_err(|source| DiversityError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A generation session over one system with the built-in rules.
#[derive(Debug)]
pub struct Diversity {
    pristine: PlanetarySystem,
    system: PlanetarySystem,
    config: TweakConfig,
    orchestrator: TweakOrchestrator,
    host: DetachedHost,
}

impl Diversity {
    /// Starts a session with the standard rule registry.
    #[must_use]
    pub fn new(system: PlanetarySystem, config: TweakConfig) -> Self {
        Self::with_registry(system, config, RuleRegistry::standard())
    }

    /// Starts a session with a custom rule registry.
    #[must_use]
    pub fn with_registry(system: PlanetarySystem, config: TweakConfig, registry: RuleRegistry) -> Self {
        Self {
            pristine: system.clone(),
            system,
            config,
            orchestrator: TweakOrchestrator::new(registry),
            host: DetachedHost::new(),
        }
    }

    /// Runs one pass. The first pass of a session binds the seed.
    ///
    /// # Errors
    ///
    /// Any error the orchestrator rejects the pass with.
    pub fn generate(&mut self, seed: GameSeed) -> DiversityResult<ChangeSet> {
        let changes = self
            .orchestrator
            .run(&mut self.system, &self.config, seed, &mut self.host)?;
        Ok(changes)
    }

    /// Ends the session and puts every body back as loaded.
    pub fn reset(&mut self) {
        self.orchestrator.reset_session();
        self.orchestrator.forget_bodies();
        self.system = self.pristine.clone();
        self.host = DetachedHost::new();
    }

    /// The system in its current state.
    #[must_use]
    pub fn system(&self) -> &PlanetarySystem {
        &self.system
    }

    /// The rule configuration.
    #[must_use]
    pub fn config(&self) -> &TweakConfig {
        &self.config
    }

    /// The host, with the terrain rebuilds requested so far.
    #[must_use]
    pub fn host(&self) -> &DetachedHost {
        &self.host
    }

    /// The seed the session is bound to.
    #[must_use]
    pub fn session_seed(&self) -> Option<GameSeed> {
        self.orchestrator.session_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, DiversityError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
