//! CSV export of a plan's six-week program.
//!
//! One row per prescribed exercise per week. Cardio columns are empty for
//! exercises without cardio targets.

use crate::{Result, WorkoutPlan};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    week: u8,
    day: &'a str,
    exercise: &'a str,
    display_name: &'a str,
    muscle_group: String,
    sets: u32,
    reps: String,
    rest_seconds: u32,
    intensity: String,
    duration_minutes: Option<u32>,
    distance_km: Option<f64>,
    calories: Option<u32>,
}

fn rows(plan: &WorkoutPlan) -> impl Iterator<Item = CsvRow<'_>> {
    plan.six_week_program.iter().flat_map(|week| {
        week.days.iter().flat_map(move |day| {
            day.exercises.iter().map(move |e| CsvRow {
                week: week.week_number,
                day: &day.label,
                exercise: &e.exercise,
                display_name: &e.display_name,
                muscle_group: e.muscle_group.to_string(),
                sets: e.sets,
                reps: e.reps.to_string(),
                rest_seconds: e.rest_seconds,
                intensity: e.intensity.label(),
                duration_minutes: e.cardio.map(|c| c.duration_minutes),
                distance_km: e.cardio.map(|c| c.distance_km),
                calories: e.cardio.map(|c| c.calories),
            })
        })
    })
}

fn write_rows<W: Write>(plan: &WorkoutPlan, sink: W) -> Result<W> {
    let mut writer = csv::Writer::from_writer(sink);
    let mut count = 0usize;
    for row in rows(plan) {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    tracing::debug!("Wrote {} CSV row(s) for plan {}", count, plan.id);

    writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()).into())
}

/// Write the plan as CSV to `path`, replacing any existing file
pub fn write_plan_csv(plan: &WorkoutPlan, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    let file = write_rows(plan, file)?;
    file.sync_all()?;

    tracing::info!("Exported plan {} to {:?}", plan.id, path);
    Ok(())
}

/// The plan as a CSV document
pub fn plan_to_csv_string(plan: &WorkoutPlan) -> Result<String> {
    let bytes = write_rows(plan, Vec::new())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
