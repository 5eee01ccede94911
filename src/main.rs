use anyhow::{bail, Context};
use rand::Rng;
use treevolve::data::recalc;
use treevolve::engines::generation::ConsoleProgressCallback;
use treevolve::{ConfigManager, EvaluationStore, EvolutionEngine, Population};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("run") | None => run_session(args.get(2).map(String::as_str)),
        Some("recalc") => {
            let folder = args.get(2).context("usage: treevolve recalc <folder>")?;
            let updated = recalc::recalculate_folder(folder)?;
            println!("recalculated {} evaluation files", updated);
            Ok(())
        }
        Some("best") => {
            let folder = args.get(2).context("usage: treevolve best <folder> [n]")?;
            let count = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(10);
            for sentence in recalc::best_sentences(folder, count)? {
                println!("{}", sentence);
            }
            Ok(())
        }
        Some("settings") => {
            // Machine-readable description of the tunable config fields,
            // for front ends that build their settings panel from it.
            let manifest = treevolve::config::AppConfig::manifest();
            println!("{}", serde_json::to_string_pretty(&manifest)?);
            Ok(())
        }
        Some(other) => bail!("unknown command: {}", other),
    }
}

/// Simulated interactive session: a random picker stands in for the human.
fn run_session(config_path: Option<&str>) -> anyhow::Result<()> {
    let manager = ConfigManager::new();
    if let Some(path) = config_path {
        manager.load_from_file(path)?;
    }
    let config = manager.get();

    let required_picks = config.evolution.required_picks as usize;
    let mut engine = EvolutionEngine::new(config.evolution)?;
    let mut store = EvaluationStore::new();
    let mut callback = ConsoleProgressCallback;

    let final_population = engine.run(
        |population: &Population, rng| {
            // Pick distinct trees at random, like an undecided user would.
            let mut picked = Vec::with_capacity(required_picks);
            while picked.len() < required_picks {
                let index = rng.gen_range(0..population.size());
                let identity = population.members[index].identity.clone();
                if !picked.contains(&identity) {
                    picked.push(identity);
                }
            }
            picked
        },
        &mut store,
        &mut callback,
        config.export.save_branches,
    )?;

    let path = store.save_all(&config.export.output_dir)?;
    println!(
        "evolved {} generations, evaluation saved to {}",
        final_population.generation_number(),
        path.display()
    );

    Ok(())
}
