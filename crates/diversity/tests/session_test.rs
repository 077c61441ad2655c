//! Integration tests for the file-facing session over the sample data.

use std::path::PathBuf;

use diversity::{load_config, load_system, Diversity, DiversityError};
use diversity_procedural::{GameSeed, RAMP_WIDTH};
use diversity_tweaks::{Shader, TweakError};

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}

fn create_session() -> Diversity {
    let system = load_system(data_path("system.toml")).unwrap();
    let config = load_config(data_path("diversity.toml")).unwrap();
    Diversity::new(system, config)
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("diversity_{name}_{id}.toml"));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_sample_system_loads_in_orbit_order() {
    let system = load_system(data_path("system.toml")).unwrap();
    let order: Vec<&str> = system.sorted().into_iter().map(|i| system.body(i).name.as_str()).collect();
    assert_eq!(
        order,
        vec!["Sun", "Moho", "Eve", "Kerbin", "Mun", "Minmus", "Dres", "Jool", "Laythe", "Binary"]
    );
}

#[test]
fn test_sample_generation_is_deterministic() {
    let mut first = create_session();
    let mut second = create_session();
    let seed = GameSeed::parse("kraken");

    let changes_a = first.generate(seed).unwrap();
    let changes_b = second.generate(seed).unwrap();
    assert_eq!(changes_a, changes_b);
    assert_eq!(first.system().bodies(), second.system().bodies());
    assert_eq!(first.host().rebuilds(), second.host().rebuilds());
}

#[test]
fn test_sample_generation_effects() {
    let mut session = create_session();
    let pristine = load_system(data_path("system.toml")).unwrap();
    let changes = session.generate(GameSeed::new(42)).unwrap();
    let system = session.system();

    assert!(!changes.contains("Kerbin"), "blacklisted");
    assert_eq!(system.get("Kerbin").unwrap(), pristine.get("Kerbin").unwrap());

    let jool = system.get("Jool").unwrap();
    assert_eq!(jool.material.rim_ramp.len(), RAMP_WIDTH, "gas giant gets a rim ramp");
    assert_eq!(jool.material.shader, Shader::RimAerial);

    let binary = system.get("Binary").unwrap();
    assert_eq!(binary.material, pristine.get("Binary").unwrap().material, "barycenter keeps its colour");

    // Eve has an ocean and is never toggled.
    assert!(system.get("Eve").unwrap().atmosphere.is_some());

    // Mun's crater seeds change, Dres's vertex_planet is disabled by config.
    assert!(session.host().rebuilds().iter().any(|(body, _)| body == "Mun"));
    assert!(!session.host().rebuilds().iter().any(|(body, _)| body == "Dres"));
    assert_eq!(system.get("Dres").unwrap().terrain_mods, pristine.get("Dres").unwrap().terrain_mods);
}

#[test]
fn test_reset_restores_loaded_system() {
    let mut session = create_session();
    let pristine = load_system(data_path("system.toml")).unwrap();

    session.generate(GameSeed::new(7)).unwrap();
    assert_ne!(session.system().bodies(), pristine.bodies());

    session.reset();
    assert_eq!(session.system().bodies(), pristine.bodies());
    assert_eq!(session.session_seed(), None);
    assert!(session.host().rebuilds().is_empty());
}

#[test]
fn test_reset_session_matches_fresh_session() {
    let mut reused = create_session();
    for seed in 0..30 {
        reused.generate(GameSeed::new(seed)).unwrap();
        reused.reset();
    }
    reused.generate(GameSeed::new(99)).unwrap();

    let mut fresh = create_session();
    fresh.generate(GameSeed::new(99)).unwrap();
    assert_eq!(reused.system().bodies(), fresh.system().bodies());
}

#[test]
fn test_malformed_system_reports_parse_error() {
    let path = temp_file("malformed", "[[bodies]]\nname = 3\n");
    let err = load_system(&path).unwrap_err();
    assert!(matches!(err, DiversityError::Parse { .. }), "got {err}");
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_invalid_system_rejected() {
    let path = temp_file(
        "cycle",
        "[[bodies]]\nname = \"A\"\nparent = \"B\"\n\n[[bodies]]\nname = \"B\"\nparent = \"A\"\n",
    );
    let err = load_system(&path).unwrap_err();
    assert!(
        matches!(err, DiversityError::Tweak(TweakError::CycleDetected(_))),
        "got {err}"
    );
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_incomplete_config_rejected_at_generation() {
    let system = load_system(data_path("system.toml")).unwrap();
    let path = temp_file("partial", "[groups.celestial]\nenabled = true\nname = true\n");
    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut session = Diversity::new(system, config);
    let err = session.generate(GameSeed::new(1)).unwrap_err();
    assert!(
        matches!(err, DiversityError::Tweak(TweakError::MissingGroup(ref group)) if group == "terrain_seed"),
        "got {err}"
    );
}
