//! Plan assembly: duration estimate, title and the final `WorkoutPlan`.

use crate::{
    DifficultyTier, Goal, MuscleGroup, ProgramDay, TrainingSplit, UserPreferences,
    WeeklyProgram, WorkoutPlan,
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Focus used in titles when no single muscle group dominates
pub const BALANCED_FOCUS: &str = "Full Body";

/// Estimated minutes for the exercises of one week
///
/// Each exercise counts `sets * (first rep number + 1) * 0.5 + rest`
/// seconds; the total is rounded up to whole minutes.
pub fn estimate_duration_minutes(days: &[ProgramDay]) -> u32 {
    let seconds: f64 = days
        .iter()
        .flat_map(|d| &d.exercises)
        .map(|e| {
            f64::from(e.sets) * f64::from(e.reps.first_number() + 1) * 0.5
                + f64::from(e.rest_seconds)
        })
        .sum();

    (seconds / 60.0).ceil() as u32
}

/// Most frequent muscle group across the split's days, if it is unique
///
/// The title focus is always a muscle group or `BALANCED_FOCUS`, never the
/// split style: a balanced Push/Pull/Legs week ties every muscle once and is
/// titled "Full Body". The split style is carried separately on the plan.
pub fn dominant_muscle(split: &TrainingSplit) -> Option<MuscleGroup> {
    let mut counts: BTreeMap<MuscleGroup, usize> = BTreeMap::new();
    for muscle in split.days.iter().flat_map(|d| &d.muscle_groups) {
        *counts.entry(*muscle).or_default() += 1;
    }

    let top = counts.values().copied().max()?;
    let mut leaders = counts.into_iter().filter(|(_, count)| *count == top);
    match (leaders.next(), leaders.next()) {
        (Some((muscle, _)), None) => Some(muscle),
        _ => None,
    }
}

/// Human-readable plan title, e.g. "Intermediate Full Body Hypertrophy Program (5x/week)"
pub fn build_title(level: DifficultyTier, focus: &str, goal: Goal, days_per_week: u8) -> String {
    format!("{} {} {} Program ({}x/week)", level, focus, goal, days_per_week)
}

/// Compose the split and projected weeks into the final plan
pub fn assemble(
    preferences: &UserPreferences,
    split: &TrainingSplit,
    weekly_programs: Vec<WeeklyProgram>,
    id: Uuid,
) -> WorkoutPlan {
    let estimated_duration_minutes = weekly_programs
        .first()
        .map(|week| estimate_duration_minutes(&week.days))
        .unwrap_or(0);

    let focus = dominant_muscle(split)
        .map(|m| m.to_string())
        .unwrap_or_else(|| BALANCED_FOCUS.to_string());
    let title = build_title(
        preferences.experience_level,
        &focus,
        preferences.goal,
        preferences.days_per_week,
    );

    tracing::info!("Assembled plan {} ({})", title, id);

    WorkoutPlan {
        id,
        title,
        goal: preferences.goal,
        experience_level: preferences.experience_level,
        days_per_week: preferences.days_per_week,
        target_muscles: preferences.target_muscles.clone(),
        split_style: split.style.clone(),
        rest_days: split.rest_days,
        estimated_duration_minutes,
        six_week_program: weekly_programs,
    }
}
