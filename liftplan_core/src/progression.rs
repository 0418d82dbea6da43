//! Six-week progressive overload projection.
//!
//! This module expands week one into the full cycle:
//! - Sets: +1 every other week, capped at 6
//! - Intensity: +level step per week, capped at 95%
//! - Reps: upper bound widened on weeks 3 and 5 only
//! - Cardio: duration and distance grow linearly, calories follow them

use crate::{CardioPrescription, DifficultyTier, PrescribedExercise, ProgramDay, WeeklyProgram};

/// Length of the projected cycle
pub const PROGRAM_WEEKS: u8 = 6;

/// Hard ceiling on sets for any exercise in any week
pub const MAX_SETS: u32 = 6;

/// Hard ceiling on intensity, in percent
pub const INTENSITY_CAP: u8 = 95;

/// Weeks whose rep ranges are widened
const REP_BUMP_WEEKS: [u8; 2] = [3, 5];

/// Per-level progression steps
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelFactors {
    /// Intensity percentage points added per week
    pub intensity_step: u8,
    /// Reps added to the upper bound on bump weeks
    pub rep_bump: u32,
    pub duration_step_minutes: u32,
    pub distance_step_km: f64,
}

/// Progression steps for an experience level (Novice progresses like Beginner)
pub fn level_factors(level: DifficultyTier) -> LevelFactors {
    match level {
        DifficultyTier::Novice | DifficultyTier::Beginner => LevelFactors {
            intensity_step: 5,
            rep_bump: 1,
            duration_step_minutes: 2,
            distance_step_km: 0.5,
        },
        DifficultyTier::Intermediate => LevelFactors {
            intensity_step: 7,
            rep_bump: 2,
            duration_step_minutes: 3,
            distance_step_km: 0.7,
        },
        DifficultyTier::Advanced => LevelFactors {
            intensity_step: 10,
            rep_bump: 2,
            duration_step_minutes: 5,
            distance_step_km: 1.0,
        },
    }
}

/// Project week one across the full cycle; week one is returned unchanged
pub fn project(week_one: &[ProgramDay], level: DifficultyTier) -> Vec<WeeklyProgram> {
    let factors = level_factors(level);

    let weeks: Vec<WeeklyProgram> = (1..=PROGRAM_WEEKS)
        .map(|week| WeeklyProgram {
            week_number: week,
            days: week_one
                .iter()
                .map(|day| ProgramDay {
                    label: day.label.clone(),
                    muscle_groups: day.muscle_groups.clone(),
                    exercises: day
                        .exercises
                        .iter()
                        .map(|e| project_exercise(e, week, &factors))
                        .collect(),
                })
                .collect(),
        })
        .collect();

    tracing::debug!(
        "Projected {} weeks at {} progression (+{}%/week)",
        weeks.len(),
        level,
        factors.intensity_step
    );
    weeks
}

/// One exercise as prescribed in `week` (1-based)
pub fn project_exercise(
    exercise: &PrescribedExercise,
    week: u8,
    factors: &LevelFactors,
) -> PrescribedExercise {
    if week <= 1 {
        return exercise.clone();
    }
    let elapsed = week - 1;

    if let Some(cardio) = &exercise.cardio {
        return PrescribedExercise {
            cardio: Some(project_cardio(cardio, elapsed, factors)),
            ..exercise.clone()
        };
    }

    let sets = (exercise.sets + u32::from(elapsed / 2)).min(MAX_SETS);
    let intensity = exercise
        .intensity
        .raised(elapsed.saturating_mul(factors.intensity_step), INTENSITY_CAP);
    let reps = if REP_BUMP_WEEKS.contains(&week) {
        exercise.reps.widened(factors.rep_bump)
    } else {
        exercise.reps
    };

    PrescribedExercise {
        sets,
        reps,
        intensity,
        ..exercise.clone()
    }
}

/// Linear duration/distance growth with calories re-weighted 80/20
fn project_cardio(base: &CardioPrescription, elapsed: u8, factors: &LevelFactors) -> CardioPrescription {
    let duration_minutes = base.duration_minutes + u32::from(elapsed) * factors.duration_step_minutes;
    let distance_km =
        round_hundredths(base.distance_km + f64::from(elapsed) * factors.distance_step_km);

    let duration_ratio = ratio(f64::from(duration_minutes), f64::from(base.duration_minutes));
    let distance_ratio = ratio(distance_km, base.distance_km);
    let calories =
        (f64::from(base.calories) * (duration_ratio * 0.8 + distance_ratio * 0.2)).round() as u32;

    CardioPrescription {
        duration_minutes,
        distance_km,
        calories,
    }
}

fn ratio(value: f64, base: f64) -> f64 {
    if base > 0.0 {
        value / base
    } else {
        1.0
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
