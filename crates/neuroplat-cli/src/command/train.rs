use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use neuroplat_training::{
    PopulationManager, TickLimits, TrainingParams, TrainingSeed, run_generation,
};

use crate::{
    model::TrainedModel,
    util::{self, Output},
};

const DEFAULT_GENERATIONS: usize = 50;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Training parameters (JSON); missing fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// ASCII level file; the built-in course when omitted
    #[arg(long)]
    level: Option<PathBuf>,
    /// Number of generations to run
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Agents per generation
    #[arg(long)]
    population: Option<usize>,
    /// Hidden layer width
    #[arg(long)]
    hidden: Option<usize>,
    /// 32-digit hex seed for a reproducible run
    #[arg(long)]
    seed: Option<TrainingSeed>,
    /// Ticks (1/60 s each) after which a generation is force-ended
    #[arg(long, default_value_t = TickLimits::default().max_ticks)]
    max_ticks: u64,
    /// Model name stored in the output
    #[arg(long, default_value = "platformer")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        config,
        level,
        generations,
        population,
        hidden,
        seed,
        max_ticks,
        name,
        output,
    } = arg;

    let mut params: TrainingParams = match config {
        Some(path) => util::read_json_file("training config", path)?,
        None => TrainingParams::default(),
    };
    if let Some(population) = population {
        params.population_size = *population;
    }
    if let Some(hidden) = hidden {
        params.hidden_size = *hidden;
    }
    if params.population_size == 0 || params.hidden_size == 0 {
        anyhow::bail!("population and hidden layer sizes must be positive");
    }
    if params.vision_size % 2 == 0 {
        anyhow::bail!("vision size must be odd, got {}", params.vision_size);
    }

    let mut course = util::load_course(level.as_deref())?;
    let limits = TickLimits {
        max_ticks: *max_ticks,
        ..TickLimits::default()
    };
    let mut manager = match seed {
        Some(seed) => PopulationManager::with_seed(params, *seed),
        None => PopulationManager::new(params),
    };
    eprintln!("Seed: {}", manager.seed());
    eprintln!(
        "Network: {} -> {} -> {}",
        manager.shape().input,
        manager.shape().hidden,
        manager.shape().output
    );

    eprintln!(
        "{:>5}  {:<12} {:>10} {:>10} {:>8} {:>8} {:>7} {:>8}",
        "gen", "end", "best", "mean", "fitness", "divers", "mutate", "progress"
    );
    for _ in 0..*generations {
        let summary = run_generation(&mut manager, &mut course, limits);
        eprintln!(
            "{:>5}  {:<12} {:>10.1} {:>10.1} {:>8.3} {:>8.3} {:>7.3} {:>7.1}%",
            summary.generation,
            summary.reason.to_string(),
            summary.best_score,
            summary.mean_score,
            summary.mean_fitness,
            summary.diversity,
            summary.mutation_rate,
            summary.max_progress,
        );
    }

    let champion = manager
        .champion()
        .context("No generation was evaluated; nothing to save")?;
    let model = TrainedModel {
        name: name.clone(),
        trained_at: Utc::now(),
        seed: manager.seed(),
        generations: manager.history().len(),
        champion_generation: champion.generation,
        best_score: champion.score,
        vision_size: manager.params().vision_size,
        sensor_ranges: manager.params().sensor_ranges,
        lifespan_cadence_ms: manager.params().lifespan_cadence_ms,
        fitness: manager.params().fitness,
        genome: champion.genome.clone(),
    };
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Generations: {}", model.generations);
    eprintln!(
        "  Best score: {:.1} (generation {})",
        model.best_score, model.champion_generation
    );

    Ok(())
}
