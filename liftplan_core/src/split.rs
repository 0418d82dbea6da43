//! Weekly split scheduling.
//!
//! Muscles are partitioned into movement categories (Push, Pull, Legs, Core)
//! and laid onto days by a declarative pattern per weekly frequency. When a
//! pattern cannot be populated from the selected muscles, the full muscle
//! list is chunked evenly across the requested days instead. Days that end
//! up without muscles are dropped and counted as rest days.

use crate::{MovementCategory, MuscleGroup, TrainingDay, TrainingSplit};
use std::collections::BTreeSet;

use MovementCategory::{Core, Legs, Pull, Push};

/// Style name used when the chunk fallback replaces the pattern
pub const CUSTOM_SPLIT_STYLE: &str = "Custom Split";

/// One day of a split pattern
#[derive(Debug)]
struct DayTemplate {
    name: &'static str,
    categories: &'static [MovementCategory],
    /// Optional days are dropped when empty instead of forcing the fallback
    required: bool,
}

const fn day(name: &'static str, categories: &'static [MovementCategory]) -> DayTemplate {
    DayTemplate {
        name,
        categories,
        required: true,
    }
}

/// How Core muscles find their day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoreRule {
    /// Core is listed in the day categories of the pattern
    Listed,
    /// Core rides along with the Pull day; with Pull empty, with Push; then Legs
    FollowPull,
}

/// When the pattern gives way to the chunk fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackRule {
    /// Any required day resolves empty
    AnyDayEmpty,
    /// Push, Pull and Legs are all empty (only Core selected)
    MainCategoriesEmpty,
}

#[derive(Debug)]
struct SplitPattern {
    style: &'static str,
    days: &'static [DayTemplate],
    core: CoreRule,
    fallback: FallbackRule,
}

const FULL_BODY: DayTemplate = day("Full Body", &[Push, Pull, Legs, Core]);
const UPPER_CORE: DayTemplate = day("Upper", &[Push, Pull, Core]);
const UPPER: DayTemplate = day("Upper", &[Push, Pull]);
const LOWER: DayTemplate = day("Lower", &[Legs]);
const PUSH: DayTemplate = day("Push", &[Push]);
const PULL: DayTemplate = day("Pull", &[Pull]);
const LEGS: DayTemplate = day("Legs", &[Legs]);
const CORE_RECOVERY: DayTemplate = DayTemplate {
    name: "Core & Recovery",
    categories: &[Core],
    required: false,
};

/// Patterns indexed by `days_per_week - 1`
const PATTERNS: [SplitPattern; 7] = [
    SplitPattern {
        style: "Full Body",
        days: &[FULL_BODY],
        core: CoreRule::Listed,
        fallback: FallbackRule::AnyDayEmpty,
    },
    SplitPattern {
        style: "Upper/Lower",
        days: &[UPPER_CORE, LOWER],
        core: CoreRule::Listed,
        fallback: FallbackRule::AnyDayEmpty,
    },
    SplitPattern {
        style: "Push/Pull/Legs",
        days: &[PUSH, PULL, LEGS],
        core: CoreRule::FollowPull,
        fallback: FallbackRule::MainCategoriesEmpty,
    },
    SplitPattern {
        style: "Upper/Lower",
        days: &[UPPER_CORE, LOWER, UPPER, LOWER],
        core: CoreRule::Listed,
        fallback: FallbackRule::AnyDayEmpty,
    },
    SplitPattern {
        style: "Push/Pull/Legs + Upper/Lower",
        days: &[PUSH, PULL, LEGS, UPPER, LOWER],
        core: CoreRule::FollowPull,
        fallback: FallbackRule::MainCategoriesEmpty,
    },
    SplitPattern {
        style: "Push/Pull/Legs",
        days: &[PUSH, PULL, LEGS, PUSH, PULL, LEGS],
        core: CoreRule::FollowPull,
        fallback: FallbackRule::MainCategoriesEmpty,
    },
    SplitPattern {
        style: "Push/Pull/Legs + Core",
        days: &[PUSH, PULL, LEGS, PUSH, PULL, LEGS, CORE_RECOVERY],
        core: CoreRule::Listed,
        fallback: FallbackRule::MainCategoriesEmpty,
    },
];

/// Selected muscles partitioned by movement category, in canonical order
#[derive(Debug, Default)]
struct CategoryGroups {
    push: Vec<MuscleGroup>,
    pull: Vec<MuscleGroup>,
    legs: Vec<MuscleGroup>,
    core: Vec<MuscleGroup>,
}

impl CategoryGroups {
    fn partition(muscles: &BTreeSet<MuscleGroup>) -> Self {
        let mut groups = CategoryGroups::default();
        for muscle in muscles {
            match muscle.category() {
                Push => groups.push.push(*muscle),
                Pull => groups.pull.push(*muscle),
                Legs => groups.legs.push(*muscle),
                Core => groups.core.push(*muscle),
            }
        }
        groups
    }

    fn members(&self, category: MovementCategory) -> &[MuscleGroup] {
        match category {
            Push => &self.push,
            Pull => &self.pull,
            Legs => &self.legs,
            Core => &self.core,
        }
    }

    /// Category whose day carries Core under `CoreRule::FollowPull`
    fn core_home(&self) -> Option<MovementCategory> {
        [Pull, Push, Legs]
            .into_iter()
            .find(|c| !self.members(*c).is_empty())
    }

    fn main_categories_empty(&self) -> bool {
        self.push.is_empty() && self.pull.is_empty() && self.legs.is_empty()
    }

    /// Muscles and display name for one pattern day
    fn resolve(&self, day: &DayTemplate, core: CoreRule) -> (String, Vec<MuscleGroup>) {
        let mut muscles: Vec<MuscleGroup> = day
            .categories
            .iter()
            .flat_map(|c| self.members(*c).iter().copied())
            .collect();

        let hosts_core = core == CoreRule::FollowPull
            && !self.core.is_empty()
            && self
                .core_home()
                .is_some_and(|home| day.categories == [home]);

        if hosts_core {
            muscles.extend(self.core.iter().copied());
            (format!("{} & Core", day.name), muscles)
        } else {
            (day.name.to_string(), muscles)
        }
    }
}

/// Divide `muscles` into `days` non-empty chunks.
///
/// With at least as many muscles as days the chunks differ in size by at
/// most one, larger chunks first. With fewer muscles than days the muscles
/// repeat round-robin so every requested day is populated.
pub fn chunk_evenly(muscles: &[MuscleGroup], days: usize) -> Vec<Vec<MuscleGroup>> {
    if muscles.is_empty() || days == 0 {
        return vec![Vec::new(); days];
    }

    if muscles.len() < days {
        return (0..days)
            .map(|i| vec![muscles[i % muscles.len()]])
            .collect();
    }

    let base = muscles.len() / days;
    let extra = muscles.len() % days;
    let mut chunks = Vec::with_capacity(days);
    let mut start = 0;
    for i in 0..days {
        let size = base + usize::from(i < extra);
        chunks.push(muscles[start..start + size].to_vec());
        start += size;
    }
    chunks
}

fn chunk_day_name(muscles: &[MuscleGroup]) -> String {
    muscles
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the training split for a set of target muscles and a frequency
///
/// `days_per_week` is expected in 1..=7; values outside are clamped.
pub fn schedule(target_muscles: &BTreeSet<MuscleGroup>, days_per_week: u8) -> TrainingSplit {
    let requested = days_per_week.clamp(1, 7);
    let pattern = &PATTERNS[usize::from(requested - 1)];
    let groups = CategoryGroups::partition(target_muscles);

    let resolved: Vec<(String, Vec<MuscleGroup>)> = pattern
        .days
        .iter()
        .map(|day| groups.resolve(day, pattern.core))
        .collect();

    let needs_fallback = match pattern.fallback {
        FallbackRule::AnyDayEmpty => pattern
            .days
            .iter()
            .zip(&resolved)
            .any(|(day, (_, muscles))| day.required && muscles.is_empty()),
        FallbackRule::MainCategoriesEmpty => groups.main_categories_empty(),
    };

    let (style, named_days) = if needs_fallback {
        tracing::debug!(
            "{} pattern cannot be filled from {} muscles, chunking across {} days",
            pattern.style,
            target_muscles.len(),
            requested
        );
        let all: Vec<MuscleGroup> = target_muscles.iter().copied().collect();
        let style = if requested == 1 {
            pattern.style
        } else {
            CUSTOM_SPLIT_STYLE
        };
        let days = chunk_evenly(&all, usize::from(requested))
            .into_iter()
            .map(|muscles| (chunk_day_name(&muscles), muscles))
            .collect();
        (style, days)
    } else {
        (pattern.style, resolved)
    };

    let days: Vec<TrainingDay> = named_days
        .into_iter()
        .filter(|(_, muscles)| !muscles.is_empty())
        .enumerate()
        .map(|(i, (name, muscle_groups))| TrainingDay {
            label: format!("Day {} \u{2013} {}", i + 1, name),
            muscle_groups,
        })
        .collect();

    let rest_days = requested.saturating_sub(days.len() as u8);
    tracing::debug!(
        "Scheduled {} split: {} training days, {} rest days",
        style,
        days.len(),
        rest_days
    );

    TrainingSplit {
        style: style.to_string(),
        days,
        rest_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MuscleGroup::*;

    fn set(muscles: &[MuscleGroup]) -> BTreeSet<MuscleGroup> {
        muscles.iter().copied().collect()
    }

    fn names(split: &TrainingSplit) -> Vec<&str> {
        split
            .days
            .iter()
            .map(|d| d.label.split(" \u{2013} ").nth(1).unwrap_or(""))
            .collect()
    }

    fn assert_covers(split: &TrainingSplit, targets: &BTreeSet<MuscleGroup>) {
        for muscle in targets {
            assert!(
                split.days.iter().any(|d| d.muscle_groups.contains(muscle)),
                "{} missing from split {:?}",
                muscle,
                split
            );
        }
    }

    #[test]
    fn test_one_day_full_body() {
        let targets = set(&[Chest, Back, Quads, Abs]);
        let split = schedule(&targets, 1);
        assert_eq!(split.days.len(), 1);
        assert_eq!(split.days[0].label, "Day 1 \u{2013} Full Body");
        assert_eq!(split.days[0].muscle_groups, vec![Chest, Back, Quads, Abs]);
        assert_eq!(split.rest_days, 0);
    }

    #[test]
    fn test_two_day_upper_lower() {
        let targets = set(&[Chest, Back, Abs, Quads, Calves]);
        let split = schedule(&targets, 2);
        assert_eq!(split.style, "Upper/Lower");
        assert_eq!(split.days[0].muscle_groups, vec![Chest, Back, Abs]);
        assert_eq!(split.days[1].muscle_groups, vec![Quads, Calves]);
    }

    #[test]
    fn test_two_day_falls_back_to_halves() {
        let targets = set(&[Chest, Shoulders, Biceps]);
        let split = schedule(&targets, 2);
        assert_eq!(split.style, CUSTOM_SPLIT_STYLE);
        assert_eq!(split.days.len(), 2);
        assert_eq!(split.days[0].muscle_groups, vec![Chest, Shoulders]);
        assert_eq!(split.days[1].muscle_groups, vec![Biceps]);
    }

    #[test]
    fn test_three_day_push_pull_legs() {
        let targets = set(&[Chest, Back, Quads, Hamstrings]);
        let split = schedule(&targets, 3);
        assert_eq!(split.style, "Push/Pull/Legs");
        assert_eq!(names(&split), vec!["Push", "Pull", "Legs"]);
        assert_eq!(split.days[2].muscle_groups, vec![Quads, Hamstrings]);
    }

    #[test]
    fn test_three_day_core_follows_pull() {
        let targets = set(&[Chest, Back, Abs, Glutes]);
        let split = schedule(&targets, 3);
        assert_eq!(names(&split), vec!["Push", "Pull & Core", "Legs"]);
        assert_eq!(split.days[1].muscle_groups, vec![Back, Abs]);
    }

    #[test]
    fn test_three_day_core_moves_to_push_without_pull() {
        let targets = set(&[Chest, Triceps, Abs, Quads]);
        let split = schedule(&targets, 3);
        assert_eq!(names(&split), vec!["Push & Core", "Legs"]);
        assert_eq!(split.days[0].muscle_groups, vec![Chest, Triceps, Abs]);
        assert_eq!(split.rest_days, 1);
        assert_covers(&split, &targets);
    }

    #[test]
    fn test_four_day_two_cycles() {
        let targets = set(&[Chest, Back, Abs, Quads]);
        let split = schedule(&targets, 4);
        assert_eq!(names(&split), vec!["Upper", "Lower", "Upper", "Lower"]);
        assert_eq!(split.days[0].muscle_groups, vec![Chest, Back, Abs]);
        assert_eq!(split.days[2].muscle_groups, vec![Chest, Back]);
    }

    #[test]
    fn test_five_day_pattern() {
        let targets = set(&[Chest, Back, Biceps, Abs, Quads, Glutes]);
        let split = schedule(&targets, 5);
        assert_eq!(
            names(&split),
            vec!["Push", "Pull & Core", "Legs", "Upper", "Lower"]
        );
        assert_eq!(split.days[3].muscle_groups, vec![Chest, Back, Biceps]);
    }

    #[test]
    fn test_five_day_core_only_chunks() {
        let targets = set(&[Abs]);
        let split = schedule(&targets, 5);
        assert_eq!(split.style, CUSTOM_SPLIT_STYLE);
        assert_eq!(split.days.len(), 5);
        assert!(split.days.iter().all(|d| d.muscle_groups == vec![Abs]));
        assert_eq!(split.rest_days, 0);
    }

    #[test]
    fn test_six_day_repeats_twice() {
        let targets = set(&[Chest, Back, Abs, Quads]);
        let split = schedule(&targets, 6);
        assert_eq!(
            names(&split),
            vec!["Push", "Pull & Core", "Legs", "Push", "Pull & Core", "Legs"]
        );
    }

    #[test]
    fn test_seven_day_all_muscles() {
        let targets: BTreeSet<_> = MuscleGroup::ALL.into_iter().collect();
        let split = schedule(&targets, 7);
        assert_eq!(split.days.len(), 7);
        assert_eq!(
            names(&split),
            vec!["Push", "Pull", "Legs", "Push", "Pull", "Legs", "Core & Recovery"]
        );
        assert_eq!(split.days[6].muscle_groups, vec![Abs]);
        assert_covers(&split, &targets);
    }

    #[test]
    fn test_seven_day_without_core_drops_recovery_day() {
        let targets = set(&[Chest, Back, Quads]);
        let split = schedule(&targets, 7);
        assert_eq!(split.days.len(), 6);
        assert_eq!(split.rest_days, 1);
    }

    #[test]
    fn test_chunk_evenly_sizes() {
        let muscles = [Chest, Back, Shoulders, Biceps, Triceps];
        let chunks = chunk_evenly(&muscles, 3);
        let sizes: Vec<_> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(chunks.concat(), muscles.to_vec());
    }

    #[test]
    fn test_chunk_evenly_cycles_when_short() {
        let chunks = chunk_evenly(&[Chest, Back], 5);
        assert_eq!(
            chunks,
            vec![vec![Chest], vec![Back], vec![Chest], vec![Back], vec![Chest]]
        );
    }

    #[test]
    fn test_coverage_and_day_count_for_every_frequency() {
        let selections = [
            set(&[Chest]),
            set(&[Abs]),
            set(&[Biceps, Calves]),
            set(&[Chest, Back, Quads]),
            set(&[Shoulders, Abs, Hamstrings, Glutes]),
            MuscleGroup::ALL.into_iter().collect(),
        ];

        for targets in &selections {
            for days in 1..=7u8 {
                let split = schedule(targets, days);
                assert!(!split.days.is_empty());
                assert!(split.days.len() <= usize::from(days));
                assert_eq!(split.days.len() + usize::from(split.rest_days), usize::from(days));
                assert!(split.days.iter().all(|d| !d.muscle_groups.is_empty()));
                assert_covers(&split, targets);
                if split.style == CUSTOM_SPLIT_STYLE {
                    assert_eq!(split.days.len(), usize::from(days));
                }
            }
        }
    }
}
