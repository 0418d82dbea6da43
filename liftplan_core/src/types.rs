//! Core domain types for the liftplan program generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Muscle groups, movement categories, equipment, goals and tiers
//! - Rep schemes and intensity ranges (with their string forms)
//! - Exercise definitions as loaded from the catalog
//! - Training splits, prescriptions, weekly programs and the final plan

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Keyed enums
// ============================================================================

/// Error returned when a string does not name a known enum value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseKeyError {
    pub kind: &'static str,
    pub value: String,
}

/// Closed set of named values that can be listed and parsed from user input.
pub trait Keyed: Copy + 'static {
    /// Human-readable kind name used in parse errors
    const KIND: &'static str;

    fn all() -> &'static [Self];

    fn name(self) -> &'static str;

    /// Extra spellings accepted by `parse_keyed`
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }
}

/// Lowercase and strip separators so "Weight Loss", "weight_loss" and
/// "weight-loss" compare equal.
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse any `Keyed` value from its display name or one of its aliases
pub fn parse_keyed<T: Keyed>(s: &str) -> Result<T, ParseKeyError> {
    let key = normalize_key(s);
    T::all()
        .iter()
        .copied()
        .find(|v| {
            normalize_key(v.name()) == key || v.aliases().iter().any(|a| normalize_key(a) == key)
        })
        .ok_or_else(|| ParseKeyError {
            kind: T::KIND,
            value: s.to_string(),
        })
}

// ============================================================================
// Muscles and Movement Categories
// ============================================================================

/// A trainable muscle group; both a catalog index and a scheduling unit
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Abs,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 10] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Abs,
        MuscleGroup::Quads,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Calves,
    ];

    /// Movement category this muscle is scheduled under
    pub fn category(self) -> MovementCategory {
        match self {
            MuscleGroup::Chest | MuscleGroup::Shoulders | MuscleGroup::Triceps => {
                MovementCategory::Push
            }
            MuscleGroup::Back | MuscleGroup::Biceps => MovementCategory::Pull,
            MuscleGroup::Quads
            | MuscleGroup::Hamstrings
            | MuscleGroup::Glutes
            | MuscleGroup::Calves => MovementCategory::Legs,
            MuscleGroup::Abs => MovementCategory::Core,
        }
    }
}

impl Keyed for MuscleGroup {
    const KIND: &'static str = "muscle group";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Calves => "Calves",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            MuscleGroup::Abs => &["core"],
            MuscleGroup::Quads => &["quadriceps"],
            MuscleGroup::Shoulders => &["delts"],
            _ => &[],
        }
    }
}

/// Movement category used to group muscles into training days
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MovementCategory {
    Push,
    Pull,
    Legs,
    Core,
}

impl MovementCategory {
    pub fn name(self) -> &'static str {
        match self {
            MovementCategory::Push => "Push",
            MovementCategory::Pull => "Pull",
            MovementCategory::Legs => "Legs",
            MovementCategory::Core => "Core",
        }
    }
}

// ============================================================================
// Equipment, Goals, Tiers
// ============================================================================

/// Equipment an exercise requires or a user has available
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Bodyweight,
    Dumbbells,
    Barbell,
    Kettlebell,
    Cable,
    Machine,
    ResistanceBand,
    PullUpBar,
    Bench,
    CardioMachine,
}

impl EquipmentKind {
    pub const ALL: [EquipmentKind; 10] = [
        EquipmentKind::Bodyweight,
        EquipmentKind::Dumbbells,
        EquipmentKind::Barbell,
        EquipmentKind::Kettlebell,
        EquipmentKind::Cable,
        EquipmentKind::Machine,
        EquipmentKind::ResistanceBand,
        EquipmentKind::PullUpBar,
        EquipmentKind::Bench,
        EquipmentKind::CardioMachine,
    ];
}

impl Keyed for EquipmentKind {
    const KIND: &'static str = "equipment";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn name(self) -> &'static str {
        match self {
            EquipmentKind::Bodyweight => "Bodyweight",
            EquipmentKind::Dumbbells => "Dumbbells",
            EquipmentKind::Barbell => "Barbell",
            EquipmentKind::Kettlebell => "Kettlebell",
            EquipmentKind::Cable => "Cable",
            EquipmentKind::Machine => "Machine",
            EquipmentKind::ResistanceBand => "Resistance Band",
            EquipmentKind::PullUpBar => "Pull-up Bar",
            EquipmentKind::Bench => "Bench",
            EquipmentKind::CardioMachine => "Cardio Machine",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            EquipmentKind::Bodyweight => &["none", "body weight"],
            EquipmentKind::Dumbbells => &["dumbbell"],
            EquipmentKind::Kettlebell => &["kettlebells"],
            EquipmentKind::ResistanceBand => &["band", "bands"],
            EquipmentKind::PullUpBar => &["pullup"],
            _ => &[],
        }
    }
}

/// Training objective driving set/rep/intensity selection
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Endurance,
    Strength,
    Hypertrophy,
    WeightLoss,
}

impl Keyed for Goal {
    const KIND: &'static str = "goal";

    fn all() -> &'static [Self] {
        &[
            Goal::Endurance,
            Goal::Strength,
            Goal::Hypertrophy,
            Goal::WeightLoss,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            Goal::Endurance => "Endurance",
            Goal::Strength => "Strength",
            Goal::Hypertrophy => "Hypertrophy",
            Goal::WeightLoss => "Weight Loss",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Goal::Hypertrophy => &["muscle", "muscle gain"],
            Goal::WeightLoss => &["fat loss"],
            _ => &[],
        }
    }
}

/// Experience bracket used for variant names and progression factors
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Novice,
    Beginner,
    Intermediate,
    Advanced,
}

impl Keyed for DifficultyTier {
    const KIND: &'static str = "experience level";

    fn all() -> &'static [Self] {
        &[
            DifficultyTier::Novice,
            DifficultyTier::Beginner,
            DifficultyTier::Intermediate,
            DifficultyTier::Advanced,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            DifficultyTier::Novice => "Novice",
            DifficultyTier::Beginner => "Beginner",
            DifficultyTier::Intermediate => "Intermediate",
            DifficultyTier::Advanced => "Advanced",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Keyed for Gender {
    const KIND: &'static str = "gender";

    fn all() -> &'static [Self] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }

    fn name(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Gender::Male => &["m"],
            Gender::Female => &["f"],
            Gender::Other => &["non-binary", "unspecified"],
        }
    }
}

macro_rules! keyed_display_from_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(Keyed::name(*self))
                }
            }

            impl FromStr for $ty {
                type Err = ParseKeyError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_keyed(s)
                }
            }
        )*
    };
}

keyed_display_from_str!(MuscleGroup, EquipmentKind, Goal, DifficultyTier, Gender);

// ============================================================================
// Rep Schemes and Intensity
// ============================================================================

/// Error returned when a rep scheme or intensity label cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

/// Split "a-b" (hyphen or en dash) into trimmed halves
fn split_range(s: &str) -> Option<(&str, &str)> {
    s.split_once('-')
        .or_else(|| s.split_once('\u{2013}'))
        .map(|(a, b)| (a.trim(), b.trim()))
}

/// Repetition target: a single number or an inclusive range.
///
/// Serialized as its display string ("12" or "8-12").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RepScheme {
    Fixed(u32),
    Range { low: u32, high: u32 },
}

impl RepScheme {
    /// Leading number of the scheme (the lower bound of a range)
    pub fn first_number(&self) -> u32 {
        match *self {
            RepScheme::Fixed(n) => n,
            RepScheme::Range { low, .. } => low,
        }
    }

    /// Widen the upper bound (or the single number) by `by` reps
    pub fn widened(&self, by: u32) -> RepScheme {
        match *self {
            RepScheme::Fixed(n) => RepScheme::Fixed(n + by),
            RepScheme::Range { low, high } => RepScheme::Range {
                low,
                high: high + by,
            },
        }
    }
}

impl fmt::Display for RepScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepScheme::Fixed(n) => write!(f, "{}", n),
            RepScheme::Range { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

impl FromStr for RepScheme {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLabelError {
            kind: "rep scheme",
            value: s.to_string(),
        };
        let s = s.trim();
        match split_range(s) {
            Some((a, b)) => {
                let low: u32 = a.parse().map_err(|_| err())?;
                let high: u32 = b.parse().map_err(|_| err())?;
                if low > high {
                    return Err(err());
                }
                Ok(RepScheme::Range { low, high })
            }
            None => s.parse().map(RepScheme::Fixed).map_err(|_| err()),
        }
    }
}

impl TryFrom<String> for RepScheme {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepScheme> for String {
    fn from(value: RepScheme) -> Self {
        value.to_string()
    }
}

/// Percentage-of-max intensity band, e.g. 70-85%.
///
/// Serialized as its label ("70-85%", or "95%" when both ends meet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct IntensityRange {
    pub low: u8,
    pub high: u8,
}

impl IntensityRange {
    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    /// Shift both ends up by `by` percentage points, saturating at `cap`
    pub fn raised(&self, by: u8, cap: u8) -> IntensityRange {
        IntensityRange {
            low: self.low.saturating_add(by).min(cap),
            high: self.high.saturating_add(by).min(cap),
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IntensityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}%", self.low)
        } else {
            write!(f, "{}-{}%", self.low, self.high)
        }
    }
}

impl FromStr for IntensityRange {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLabelError {
            kind: "intensity",
            value: s.to_string(),
        };
        let body = s.trim().trim_end_matches('%');
        let (low, high) = match split_range(body) {
            Some((a, b)) => (
                a.trim_end_matches('%').parse::<u8>().map_err(|_| err())?,
                b.parse::<u8>().map_err(|_| err())?,
            ),
            None => {
                let v = body.trim().parse::<u8>().map_err(|_| err())?;
                (v, v)
            }
        };
        if low > high || high > 100 {
            return Err(err());
        }
        Ok(IntensityRange { low, high })
    }
}

impl TryFrom<String> for IntensityRange {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IntensityRange> for String {
    fn from(value: IntensityRange) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Set/rep/rest/intensity prescription for one goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalTemplate {
    pub sets: u32,
    pub reps: RepScheme,
    pub rest_seconds: u32,
    pub intensity: IntensityRange,
}

/// Tier-specific display variant of an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseVariant {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Duration/distance/calorie targets for cardio-flagged exercises
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardioTarget {
    pub duration_minutes: u32,
    pub distance_km: f64,
    pub calories: u32,
}

/// One exercise of the reference catalog
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseDefinition {
    pub name: String,
    pub muscle_groups: BTreeSet<MuscleGroup>,
    pub equipment: BTreeSet<EquipmentKind>,
    pub goal_templates: BTreeMap<Goal, GoalTemplate>,
    pub difficulty_variants: BTreeMap<DifficultyTier, ExerciseVariant>,
    pub cardio: Option<CardioTarget>,
}

impl ExerciseDefinition {
    /// True when the exercise needs nothing beyond bodyweight
    pub fn is_bodyweight_only(&self) -> bool {
        self.equipment.iter().all(|e| *e == EquipmentKind::Bodyweight)
    }

    /// Hardest tier for which a display variant exists
    pub fn hardest_tier(&self) -> Option<DifficultyTier> {
        self.difficulty_variants.keys().next_back().copied()
    }
}

/// The immutable exercise reference data
///
/// `by_muscle` keeps catalog file order so that candidate pools, and with
/// them seeded selections, are stable.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: BTreeMap<String, ExerciseDefinition>,
    pub by_muscle: BTreeMap<MuscleGroup, Vec<String>>,
}

// ============================================================================
// Preferences
// ============================================================================

/// Fully-resolved generation input
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPreferences {
    pub gender: Gender,
    pub age: u8,
    pub goal: Goal,
    pub experience_level: DifficultyTier,
    pub days_per_week: u8,
    pub equipment: BTreeSet<EquipmentKind>,
    pub target_muscles: BTreeSet<MuscleGroup>,
}

// ============================================================================
// Split, Prescription and Plan Types
// ============================================================================

/// A named training day and the muscles it trains
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingDay {
    pub label: String,
    pub muscle_groups: Vec<MuscleGroup>,
}

/// Weekly assignment of muscle groups to days
///
/// `days` holds only non-empty training days; the remainder of the requested
/// frequency is counted in `rest_days`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingSplit {
    pub style: String,
    pub days: Vec<TrainingDay>,
    pub rest_days: u8,
}

/// Per-week cardio targets attached to a prescribed cardio exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardioPrescription {
    pub duration_minutes: u32,
    pub distance_km: f64,
    pub calories: u32,
}

/// An exercise with its sets/reps/rest/intensity for one day of one week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrescribedExercise {
    pub exercise: String,
    pub display_name: String,
    pub description: String,
    pub muscle_group: MuscleGroup,
    pub sets: u32,
    pub reps: RepScheme,
    pub rest_seconds: u32,
    pub intensity: IntensityRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio: Option<CardioPrescription>,
}

/// A training day with its prescribed exercises
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgramDay {
    pub label: String,
    pub muscle_groups: Vec<MuscleGroup>,
    pub exercises: Vec<PrescribedExercise>,
}

/// One week of the six-week program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyProgram {
    pub week_number: u8,
    pub days: Vec<ProgramDay>,
}

/// The generated plan; aggregate root handed to the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub title: String,
    pub goal: Goal,
    pub experience_level: DifficultyTier,
    pub days_per_week: u8,
    pub target_muscles: BTreeSet<MuscleGroup>,
    pub split_style: String,
    pub rest_days: u8,
    pub estimated_duration_minutes: u32,
    pub six_week_program: Vec<WeeklyProgram>,
}

impl WorkoutPlan {
    /// Days per week that carry exercises
    ///
    /// Saturates at zero, since stored plans may have been edited by hand.
    pub fn training_days(&self) -> u8 {
        self.days_per_week.saturating_sub(self.rest_days)
    }
}
