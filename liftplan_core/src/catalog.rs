//! Exercise catalog loading and lookup.
//!
//! The default catalog is a TOML asset compiled into the crate and parsed
//! once per process. Replacement catalogs in the same format can be loaded
//! from disk (see `Config::catalog`).

use crate::prescription::standard_template;
use crate::progression::{INTENSITY_CAP, MAX_SETS};
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Raw catalog asset shipped with the crate
const DEFAULT_CATALOG_TOML: &str = include_str!("../assets/exercises.toml");

/// Cached default catalog - parsed once and reused across all generations
static DEFAULT_CATALOG: OnceCell<Catalog> = OnceCell::new();

/// Get a reference to the cached default catalog
pub fn default_catalog() -> Result<&'static Catalog> {
    DEFAULT_CATALOG.get_or_try_init(build_default_catalog)
}

/// Parse the built-in catalog asset into a fresh `Catalog`
///
/// **Note**: For production use, prefer `default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Result<Catalog> {
    Catalog::from_toml_str(DEFAULT_CATALOG_TOML)
}

/// On-disk catalog file format
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: u32,
    #[serde(default, rename = "exercise")]
    exercises: Vec<ExerciseRecord>,
}

/// One `[[exercise]]` record
#[derive(Debug, Deserialize)]
struct ExerciseRecord {
    name: String,
    muscles: Vec<MuscleGroup>,
    equipment: Vec<EquipmentKind>,
    #[serde(default)]
    goals: Vec<Goal>,
    #[serde(default)]
    templates: BTreeMap<String, GoalTemplate>,
    #[serde(default)]
    variants: BTreeMap<String, ExerciseVariant>,
    #[serde(default)]
    cardio: Option<CardioTarget>,
}

impl TryFrom<ExerciseRecord> for ExerciseDefinition {
    type Error = Error;

    fn try_from(record: ExerciseRecord) -> Result<Self> {
        let mut goal_templates: BTreeMap<Goal, GoalTemplate> = record
            .goals
            .iter()
            .map(|goal| (*goal, standard_template(*goal)))
            .collect();

        for (key, template) in record.templates {
            let goal: Goal = key.parse().map_err(|e| {
                Error::Catalog(format!("Exercise '{}': {}", record.name, e))
            })?;
            goal_templates.insert(goal, template);
        }

        let mut difficulty_variants = BTreeMap::new();
        for (key, variant) in record.variants {
            let tier: DifficultyTier = key.parse().map_err(|e| {
                Error::Catalog(format!("Exercise '{}': {}", record.name, e))
            })?;
            difficulty_variants.insert(tier, variant);
        }

        Ok(ExerciseDefinition {
            name: record.name,
            muscle_groups: record.muscles.into_iter().collect(),
            equipment: record.equipment.into_iter().collect(),
            goal_templates,
            difficulty_variants,
            cardio: record.cardio,
        })
    }
}

impl Catalog {
    /// Parse a catalog from its TOML representation
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;
        let definitions = file
            .exercises
            .into_iter()
            .map(ExerciseDefinition::try_from)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::from_definitions(definitions)?;
        tracing::debug!(
            "Loaded catalog v{} with {} exercises",
            file.version,
            catalog.exercises.len()
        );
        Ok(catalog)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded catalog from {:?}", path);
        Ok(catalog)
    }

    /// Build a catalog and its muscle index from definitions in order
    ///
    /// Fails on duplicate exercise names since names are the catalog key.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ExerciseDefinition>,
    ) -> Result<Self> {
        let mut catalog = Catalog::default();

        for definition in definitions {
            if catalog.exercises.contains_key(&definition.name) {
                return Err(Error::Catalog(format!(
                    "Duplicate exercise name '{}'",
                    definition.name
                )));
            }
            for muscle in &definition.muscle_groups {
                catalog
                    .by_muscle
                    .entry(*muscle)
                    .or_default()
                    .push(definition.name.clone());
            }
            catalog
                .exercises
                .insert(definition.name.clone(), definition);
        }

        Ok(catalog)
    }

    /// Look up an exercise by name
    pub fn get(&self, name: &str) -> Option<&ExerciseDefinition> {
        self.exercises.get(name)
    }

    /// Exercises indexed under a muscle group, in catalog order
    pub fn for_muscle(&self, muscle: MuscleGroup) -> impl Iterator<Item = &ExerciseDefinition> {
        self.by_muscle
            .get(&muscle)
            .into_iter()
            .flatten()
            .filter_map(|name| self.exercises.get(name))
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, exercise) in &self.exercises {
            if name.trim().is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if exercise.muscle_groups.is_empty() {
                errors.push(format!("Exercise '{}' targets no muscle group", name));
            }
            if exercise.equipment.is_empty() {
                errors.push(format!("Exercise '{}' lists no equipment", name));
            }
            if exercise.goal_templates.is_empty() {
                errors.push(format!("Exercise '{}' supports no goal", name));
            }

            for (goal, template) in &exercise.goal_templates {
                if template.sets == 0 {
                    errors.push(format!(
                        "Exercise '{}': {} template has zero sets",
                        name, goal
                    ));
                }
                if template.sets > MAX_SETS {
                    errors.push(format!(
                        "Exercise '{}': {} template has {} sets, above the limit of {}",
                        name, goal, template.sets, MAX_SETS
                    ));
                }
                if template.intensity.high > INTENSITY_CAP {
                    errors.push(format!(
                        "Exercise '{}': {} template intensity {} exceeds {}%",
                        name, goal, template.intensity, INTENSITY_CAP
                    ));
                }
            }

            for (tier, variant) in &exercise.difficulty_variants {
                if variant.display_name.trim().is_empty() {
                    errors.push(format!(
                        "Exercise '{}': {} variant has empty display name",
                        name, tier
                    ));
                }
            }

            if let Some(cardio) = &exercise.cardio {
                if cardio.duration_minutes == 0 || cardio.distance_km <= 0.0 {
                    errors.push(format!(
                        "Exercise '{}': cardio targets must be positive",
                        name
                    ));
                }
            }
        }

        // Every muscle group needs at least one exercise, and a bodyweight one
        // so the selector's fallback always has somewhere to land
        for muscle in MuscleGroup::ALL {
            let exercises: Vec<_> = self.for_muscle(muscle).collect();
            if exercises.is_empty() {
                errors.push(format!("Catalog has no exercises for {}", muscle));
            } else if !exercises.iter().any(|e| e.is_bodyweight_only()) {
                errors.push(format!("Catalog has no bodyweight exercise for {}", muscle));
            }
        }

        errors
    }

    /// Every equipment kind referenced by at least one exercise
    pub fn equipment_in_use(&self) -> BTreeSet<EquipmentKind> {
        self.exercises
            .values()
            .flat_map(|e| e.equipment.iter().copied())
            .collect()
    }
}
