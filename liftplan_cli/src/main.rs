use clap::{Args, Parser, Subcommand};
use liftplan_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Six-week workout program generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new six-week plan
    Generate {
        #[command(flatten)]
        prefs: PreferenceArgs,

        /// Seed for reproducible exercise selection
        #[arg(long)]
        seed: Option<u64>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Save the plan to the library
        #[arg(long)]
        save: bool,

        /// Export the plan as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List saved plans
    List,

    /// Show a saved plan
    Show {
        id: Uuid,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved plan
    Delete { id: Uuid },

    /// Export a saved plan as CSV
    Export {
        id: Uuid,

        #[arg(long)]
        out: PathBuf,
    },
}

/// Preferences from a file, overridden by individual flags
#[derive(Args)]
struct PreferenceArgs {
    /// Preferences file (TOML or JSON)
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Training goal (strength, hypertrophy, endurance, weight_loss)
    #[arg(long)]
    goal: Option<Goal>,

    /// Experience level (novice, beginner, intermediate, advanced)
    #[arg(long)]
    level: Option<DifficultyTier>,

    /// Training days per week (1-7)
    #[arg(long)]
    days: Option<u8>,

    #[arg(long)]
    age: Option<u8>,

    #[arg(long)]
    gender: Option<Gender>,

    /// Target muscle groups, comma separated
    #[arg(long, value_delimiter = ',')]
    muscles: Vec<MuscleGroup>,

    /// Available equipment, comma separated
    #[arg(long, value_delimiter = ',')]
    equipment: Vec<EquipmentKind>,
}

impl PreferenceArgs {
    fn resolve(self, config: &Config) -> Result<UserPreferences> {
        let base = self.prefs.as_deref().map(load_preferences).transpose()?;

        let missing = |flag: &str| Error::InvalidPreference(format!("missing --{}", flag));
        let equipment = if !self.equipment.is_empty() {
            self.equipment.into_iter().collect()
        } else if let Some(base) = &base {
            base.equipment.clone()
        } else {
            config.defaults.equipment.clone()
        };
        let target_muscles = if !self.muscles.is_empty() {
            self.muscles.into_iter().collect()
        } else {
            base.as_ref()
                .map(|b| b.target_muscles.clone())
                .ok_or_else(|| missing("muscles"))?
        };

        Ok(UserPreferences {
            gender: self
                .gender
                .or(base.as_ref().map(|b| b.gender))
                .unwrap_or(Gender::Other),
            age: self
                .age
                .or(base.as_ref().map(|b| b.age))
                .ok_or_else(|| missing("age"))?,
            goal: self
                .goal
                .or(base.as_ref().map(|b| b.goal))
                .ok_or_else(|| missing("goal"))?,
            experience_level: self
                .level
                .or(base.as_ref().map(|b| b.experience_level))
                .ok_or_else(|| missing("level"))?,
            days_per_week: self
                .days
                .or(base.as_ref().map(|b| b.days_per_week))
                .ok_or_else(|| missing("days"))?,
            equipment,
            target_muscles,
        })
    }
}

fn main() -> Result<()> {
    // Initialize logging
    liftplan_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    tracing::debug!("Plan library at {:?}", config.plans_path());

    match cli.command {
        Commands::Generate {
            prefs,
            seed,
            json,
            save,
            csv,
        } => cmd_generate(&config, prefs, seed, json, save, csv.as_deref()),
        Commands::List => cmd_list(&config),
        Commands::Show { id, json } => cmd_show(&config, id, json),
        Commands::Delete { id } => cmd_delete(&config, id),
        Commands::Export { id, out } => cmd_export(&config, id, &out),
    }
}

fn cmd_generate(
    config: &Config,
    prefs: PreferenceArgs,
    seed: Option<u64>,
    json: bool,
    save: bool,
    csv: Option<&Path>,
) -> Result<()> {
    let preferences = prefs.resolve(config)?;

    let custom_catalog = config.load_catalog()?;
    let catalog = match &custom_catalog {
        Some(catalog) => catalog,
        None => default_catalog()?,
    };
    let generator =
        ProgramGenerator::new(catalog).with_policy(config.generation.frequency_policy());

    let plan = match seed {
        Some(seed) => generator.generate(&preferences, &mut StdRng::seed_from_u64(seed))?,
        None => generator.generate(&preferences, &mut rand::thread_rng())?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan);
    }

    if save {
        let mut store = JsonFileStore::new(config.plans_path());
        let id = store.save(&plan)?;
        status(json, &format!("✓ Saved plan {}", id));
    }

    if let Some(path) = csv {
        write_plan_csv(&plan, path)?;
        status(json, &format!("✓ Exported CSV to {}", path.display()));
    }

    Ok(())
}

fn cmd_list(config: &Config) -> Result<()> {
    let store = JsonFileStore::new(config.plans_path());
    let plans = store.list()?;

    if plans.is_empty() {
        println!("No saved plans.");
        return Ok(());
    }

    for stored in plans {
        println!(
            "{}  {}  {}",
            stored.plan.id,
            stored.saved_at.format("%Y-%m-%d %H:%M"),
            stored.plan.title
        );
    }
    Ok(())
}

fn cmd_show(config: &Config, id: Uuid, json: bool) -> Result<()> {
    let stored = JsonFileStore::new(config.plans_path()).get(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stored.plan)?);
    } else {
        display_plan(&stored.plan);
        println!("Saved {}", stored.saved_at.to_rfc3339());
    }
    Ok(())
}

fn cmd_delete(config: &Config, id: Uuid) -> Result<()> {
    JsonFileStore::new(config.plans_path()).delete(id)?;
    println!("✓ Deleted plan {}", id);
    Ok(())
}

fn cmd_export(config: &Config, id: Uuid, out: &Path) -> Result<()> {
    let stored = JsonFileStore::new(config.plans_path()).get(id)?;
    write_plan_csv(&stored.plan, out)?;
    println!("✓ Exported plan {} to {}", id, out.display());
    Ok(())
}

/// Status lines go to stderr when stdout carries JSON
fn status(json: bool, message: &str) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

fn display_plan(plan: &WorkoutPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", plan.title);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Id: {}", plan.id);
    println!(
        "  Split: {} ({} training day(s), {} rest day(s))",
        plan.split_style,
        plan.training_days(),
        plan.rest_days
    );
    println!("  Estimated time: ~{} min per week", plan.estimated_duration_minutes);

    for week in &plan.six_week_program {
        println!();
        println!("Week {}", week.week_number);
        for day in &week.days {
            println!("  {}", day.label);
            if day.exercises.is_empty() {
                println!("    (no exercises available)");
            }
            for exercise in &day.exercises {
                match &exercise.cardio {
                    Some(cardio) => println!(
                        "    → {}: {} min, {:.2} km, ~{} kcal",
                        exercise.display_name,
                        cardio.duration_minutes,
                        cardio.distance_km,
                        cardio.calories
                    ),
                    None => println!(
                        "    → {}: {} x {} @ {}, rest {}s",
                        exercise.display_name,
                        exercise.sets,
                        exercise.reps,
                        exercise.intensity,
                        exercise.rest_seconds
                    ),
                }
            }
        }
    }

    println!();
}
