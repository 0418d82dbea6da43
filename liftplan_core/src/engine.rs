//! Plan generation pipeline.
//!
//! Generation runs in four steps:
//! 1. Schedule target muscles into a weekly split
//! 2. Select and prescribe exercises for every (day, muscle) slot of week 1
//! 3. Project week 1 across the six-week cycle
//! 4. Assemble the plan (id, title, duration estimate)
//!
//! The random source is the only non-deterministic input; the catalog is
//! read-only and may be shared across concurrent generations.

use crate::assembler::assemble;
use crate::catalog::default_catalog;
use crate::preferences::FrequencyPolicy;
use crate::prescription::assign;
use crate::progression::project;
use crate::random::{random_uuid, RandomSource};
use crate::selector::{select_exercises, SelectedExercise, SelectionRequest};
use crate::split::schedule;
use crate::{
    CardioPrescription, Catalog, MuscleGroup, PrescribedExercise, ProgramDay, Result,
    TrainingSplit, UserPreferences, WorkoutPlan,
};
use std::collections::HashSet;

/// Generates plans against a borrowed catalog
#[derive(Clone, Copy, Debug)]
pub struct ProgramGenerator<'c> {
    catalog: &'c Catalog,
    policy: FrequencyPolicy,
}

impl<'c> ProgramGenerator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            policy: FrequencyPolicy::default(),
        }
    }

    /// Use a different frequency policy during validation
    pub fn with_policy(mut self, policy: FrequencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Generate a complete six-week plan
    ///
    /// Fails only with `Error::InvalidPreference`; every valid input yields
    /// a plan, with empty exercise lists where the catalog has nothing for a
    /// muscle group.
    pub fn generate(
        &self,
        preferences: &UserPreferences,
        rng: &mut impl RandomSource,
    ) -> Result<WorkoutPlan> {
        preferences.validate(self.policy)?;

        tracing::info!(
            "Generating {} {} plan, {} day(s)/week, {} muscle group(s)",
            preferences.experience_level,
            preferences.goal,
            preferences.days_per_week,
            preferences.target_muscles.len()
        );

        let split = schedule(&preferences.target_muscles, preferences.days_per_week);
        tracing::debug!(
            "Split: {} with {} training day(s), {} rest day(s)",
            split.style,
            split.days.len(),
            split.rest_days
        );

        let week_one = self.build_week_one(preferences, &split, rng);
        let weeks = project(&week_one, preferences.experience_level);
        let id = random_uuid(rng);

        Ok(assemble(preferences, &split, weeks, id))
    }

    /// Week-1 days with selected and prescribed exercises
    pub fn build_week_one(
        &self,
        preferences: &UserPreferences,
        split: &TrainingSplit,
        rng: &mut impl RandomSource,
    ) -> Vec<ProgramDay> {
        split
            .days
            .iter()
            .map(|day| {
                let mut used = HashSet::new();
                let mut exercises = Vec::new();

                for &muscle in &day.muscle_groups {
                    let request = SelectionRequest {
                        muscle,
                        equipment: &preferences.equipment,
                        goal: preferences.goal,
                        age: preferences.age,
                        level: preferences.experience_level,
                    };
                    exercises.extend(
                        select_exercises(self.catalog, &request, &mut used, rng)
                            .into_iter()
                            .map(|selected| prescribe(selected, muscle, preferences)),
                    );
                }

                ProgramDay {
                    label: day.label.clone(),
                    muscle_groups: day.muscle_groups.clone(),
                    exercises,
                }
            })
            .collect()
    }
}

fn prescribe(
    selected: SelectedExercise<'_>,
    muscle: MuscleGroup,
    preferences: &UserPreferences,
) -> PrescribedExercise {
    let definition = selected.definition;
    let template = assign(definition, preferences.goal, preferences.age);

    PrescribedExercise {
        exercise: definition.name.clone(),
        display_name: selected.display_name,
        description: selected.description,
        muscle_group: muscle,
        sets: template.sets,
        reps: template.reps,
        rest_seconds: template.rest_seconds,
        intensity: template.intensity,
        cardio: definition.cardio.map(|c| CardioPrescription {
            duration_minutes: c.duration_minutes,
            distance_km: c.distance_km,
            calories: c.calories,
        }),
    }
}

/// Generate a plan from the built-in catalog
pub fn generate_program(
    preferences: &UserPreferences,
    rng: &mut impl RandomSource,
) -> Result<WorkoutPlan> {
    ProgramGenerator::new(default_catalog()?).generate(preferences, rng)
}
