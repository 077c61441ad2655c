//! Diversity CLI
//!
//! Re-rolls a planetary system from a seed and prints the result.
//!
//! Usage: `diversity --system <file> --config <file> [--seed <text>] [--ramp <body>]`

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use diversity::{load_config, load_system, Diversity};
use diversity_procedural::GameSeed;
use diversity_tweaks::PlanetarySystem;

#[derive(Parser, Debug)]
#[command(name = "diversity")]
#[command(about = "Re-roll a planetary system from a game seed")]
struct Args {
    /// System description (TOML, `[[bodies]]` tables)
    #[arg(long)]
    system: PathBuf,

    /// Rule configuration (TOML)
    #[arg(long)]
    config: PathBuf,

    /// Game seed; non-numeric text is hashed
    #[arg(long)]
    seed: Option<String>,

    /// Print the rim ramp of this body as hex RGBA
    #[arg(long)]
    ramp: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("diversity=info,diversity_tweaks=info,diversity_procedural=info")
    });

    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() {
    init_logging();

    let args = Args::parse();

    let system = load_system(&args.system).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    let config = load_config(&args.config).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let seed = args.seed.as_deref().map_or_else(GameSeed::default, GameSeed::parse);
    info!("Generating with seed {}", seed);

    let mut session = Diversity::new(system, config);
    let changes = session.generate(seed).unwrap_or_else(|e| {
        error!("Generation rejected: {}", e);
        process::exit(1);
    });

    print_table(session.system());

    println!();
    println!("Changed ({}):", changes.len());
    for name in &changes {
        println!("  {name}");
    }

    if let Some(name) = args.ramp.as_deref() {
        let body = session.system().get(name).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });
        if body.material.rim_ramp.is_empty() {
            error!("{} has no rim ramp", name);
            process::exit(1);
        }
        println!();
        println!("Rim ramp of {} ({} samples):", body.display_name, body.material.rim_ramp.len());
        for row in body.material.rim_ramp.chunks(8) {
            let line: Vec<String> = row
                .iter()
                .map(|color| {
                    let [r, g, b, a] = color.to_rgba8();
                    format!("{r:02x}{g:02x}{b:02x}{a:02x}")
                })
                .collect();
            println!("  {}", line.join(" "));
        }
    }
}

fn print_table(system: &PlanetarySystem) {
    println!(
        "{:<32} {:<16} {:>14} {:>8} {:>8}  {}",
        "display name", "body", "sma (m)", "ecc", "inc", "atmosphere"
    );
    for index in system.sorted() {
        let body = system.body(index);

        let mut depth = 0;
        let mut parent = system.parent(index);
        while let Some(p) = parent {
            depth += 1;
            parent = system.parent(p);
        }

        let label = format!("{}{}", "  ".repeat(depth), body.display_name);
        let (sma, ecc, inc) = body.orbit.map_or_else(
            || ("-".to_string(), "-".to_string(), "-".to_string()),
            |o| {
                (
                    format!("{:.4e}", o.semi_major_axis),
                    format!("{:.4}", o.eccentricity),
                    format!("{:.2}", o.inclination),
                )
            },
        );
        let atmosphere = match &body.atmosphere {
            Some(a) if a.contains_oxygen => "oxygen",
            Some(_) => "yes",
            None => "no",
        };
        println!(
            "{:<32} {:<16} {:>14} {:>8} {:>8}  {}",
            label, body.name, sma, ecc, inc, atmosphere
        );
    }
}
