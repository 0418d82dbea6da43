//! Per-exercise prescription: sets, reps, rest and intensity.
//!
//! The goal table below is the single source of base templates. Catalog
//! records may override it per exercise; age adjustments are applied after
//! lookup and are the same for every exercise of a plan.

use crate::progression::{INTENSITY_CAP, MAX_SETS};
use crate::{ExerciseDefinition, Goal, GoalTemplate, IntensityRange, RepScheme};

/// Intensity forced on every exercise for users under 18
pub const YOUTH_INTENSITY: IntensityRange = IntensityRange::new(60, 70);

/// Extra rest granted to users over 65
pub const SENIOR_EXTRA_REST_SECONDS: u32 = 30;

/// Age bracket that drives label and prescription adjustments
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgeBracket {
    /// Under 18
    Youth,
    Adult,
    /// Over 65
    Senior,
}

impl AgeBracket {
    pub fn from_age(age: u8) -> Self {
        if age < 18 {
            AgeBracket::Youth
        } else if age > 65 {
            AgeBracket::Senior
        } else {
            AgeBracket::Adult
        }
    }
}

/// Base template for a goal
///
/// | Goal        | Sets | Reps  | Rest | Intensity |
/// |-------------|------|-------|------|-----------|
/// | WeightLoss  | 3    | 12-15 | 45s  | 60-75%    |
/// | Endurance   | 3    | 15-20 | 60s  | 50-70%    |
/// | Strength    | 5    | 3-5   | 180s | 85-95%    |
/// | Hypertrophy | 4    | 8-12  | 90s  | 70-85%    |
pub fn standard_template(goal: Goal) -> GoalTemplate {
    let (sets, low, high, rest_seconds, intensity) = match goal {
        Goal::WeightLoss => (3, 12, 15, 45, IntensityRange::new(60, 75)),
        Goal::Endurance => (3, 15, 20, 60, IntensityRange::new(50, 70)),
        Goal::Strength => (5, 3, 5, 180, IntensityRange::new(85, 95)),
        Goal::Hypertrophy => (4, 8, 12, 90, IntensityRange::new(70, 85)),
    };

    GoalTemplate {
        sets,
        reps: RepScheme::Range { low, high },
        rest_seconds,
        intensity,
    }
}

/// Apply the age policy to a template
pub fn adjust_for_age(template: GoalTemplate, age: u8) -> GoalTemplate {
    match AgeBracket::from_age(age) {
        AgeBracket::Youth => GoalTemplate {
            intensity: YOUTH_INTENSITY,
            ..template
        },
        AgeBracket::Senior => GoalTemplate {
            rest_seconds: template.rest_seconds + SENIOR_EXTRA_REST_SECONDS,
            ..template
        },
        AgeBracket::Adult => template,
    }
}

/// Prescription for one exercise under the user's goal and age
///
/// Uses the exercise's own template for the goal when the catalog carries
/// one, the goal table otherwise (the selector's last fallback stage can
/// hand over exercises without a template for the goal). Sets and intensity
/// are held to the same ceilings the progression uses, so catalog overrides
/// cannot start above them.
pub fn assign(exercise: &ExerciseDefinition, goal: Goal, age: u8) -> GoalTemplate {
    let base = exercise
        .goal_templates
        .get(&goal)
        .copied()
        .unwrap_or_else(|| standard_template(goal));

    within_caps(adjust_for_age(base, age))
}

fn within_caps(template: GoalTemplate) -> GoalTemplate {
    GoalTemplate {
        sets: template.sets.min(MAX_SETS),
        intensity: template.intensity.raised(0, INTENSITY_CAP),
        ..template
    }
}
