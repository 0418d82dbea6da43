//! Exercise selection for one (day, muscle group) slot.
//!
//! Candidates are narrowed by equipment and goal, widened again in two
//! fallback stages when nothing matches, and up to three are drawn without
//! replacement from the injected random source.

use crate::prescription::AgeBracket;
use crate::random::RandomSource;
use crate::{
    Catalog, DifficultyTier, EquipmentKind, ExerciseDefinition, Goal, MuscleGroup,
};
use std::collections::{BTreeSet, HashSet};

/// Upper bound on exercises drawn for one muscle group on one day
pub const MAX_EXERCISES_PER_MUSCLE: usize = 3;

/// Inputs for one selection slot
#[derive(Clone, Copy, Debug)]
pub struct SelectionRequest<'a> {
    pub muscle: MuscleGroup,
    pub equipment: &'a BTreeSet<EquipmentKind>,
    pub goal: Goal,
    pub age: u8,
    pub level: DifficultyTier,
}

/// Which filter produced the candidate pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolStage {
    /// Equipment and goal both satisfied
    Matched,
    /// Nothing matched; bodyweight exercises for the muscle
    BodyweightOnly,
    /// Still nothing; every exercise for the muscle
    Unfiltered,
}

/// A drawn exercise with its resolved display text
#[derive(Clone, Debug)]
pub struct SelectedExercise<'c> {
    pub definition: &'c ExerciseDefinition,
    pub display_name: String,
    pub description: String,
}

fn equipment_available(exercise: &ExerciseDefinition, equipment: &BTreeSet<EquipmentKind>) -> bool {
    exercise.is_bodyweight_only() || exercise.equipment.iter().any(|e| equipment.contains(e))
}

/// Candidate pool for a muscle, with the fallback stage that produced it
///
/// An empty pool only comes back when the catalog has nothing at all for
/// the muscle.
pub fn candidate_pool<'c>(
    catalog: &'c Catalog,
    muscle: MuscleGroup,
    equipment: &BTreeSet<EquipmentKind>,
    goal: Goal,
) -> (Vec<&'c ExerciseDefinition>, PoolStage) {
    let matched: Vec<_> = catalog
        .for_muscle(muscle)
        .filter(|e| equipment_available(e, equipment) && e.goal_templates.contains_key(&goal))
        .collect();
    if !matched.is_empty() {
        return (matched, PoolStage::Matched);
    }

    let bodyweight: Vec<_> = catalog
        .for_muscle(muscle)
        .filter(|e| e.is_bodyweight_only())
        .collect();
    if !bodyweight.is_empty() {
        tracing::debug!(
            "No {} exercise for {} with the given equipment, using bodyweight options",
            goal,
            muscle
        );
        return (bodyweight, PoolStage::BodyweightOnly);
    }

    tracing::debug!("No bodyweight option for {}, using the full list", muscle);
    (catalog.for_muscle(muscle).collect(), PoolStage::Unfiltered)
}

/// Display name and description for the user's tier
///
/// Falls back from the exact tier to Beginner to the first defined tier,
/// and to the catalog name when the exercise has no variants.
pub fn resolve_variant(exercise: &ExerciseDefinition, level: DifficultyTier) -> (String, String) {
    let variants = &exercise.difficulty_variants;
    let variant = variants
        .get(&level)
        .or_else(|| variants.get(&DifficultyTier::Beginner))
        .or_else(|| variants.values().next());

    match variant {
        Some(v) => (v.display_name.clone(), v.description.clone()),
        None => (exercise.name.clone(), String::new()),
    }
}

/// Age-flagged label for exercises whose hardest tier is Advanced
pub fn age_adjusted_name(exercise: &ExerciseDefinition, display_name: String, age: u8) -> String {
    if exercise.hardest_tier() != Some(DifficultyTier::Advanced) {
        return display_name;
    }
    match AgeBracket::from_age(age) {
        AgeBracket::Youth => format!("{} (Modified)", display_name),
        AgeBracket::Senior => format!("{} (Low-Impact)", display_name),
        AgeBracket::Adult => display_name,
    }
}

/// Draw up to three exercises for one slot
///
/// `used` holds the exercise names already placed on the same day; drawn
/// names are added to it so no exercise repeats within a day.
pub fn select_exercises<'c>(
    catalog: &'c Catalog,
    request: &SelectionRequest<'_>,
    used: &mut HashSet<String>,
    rng: &mut impl RandomSource,
) -> Vec<SelectedExercise<'c>> {
    let (pool, stage) = candidate_pool(catalog, request.muscle, request.equipment, request.goal);

    let mut remaining: Vec<&ExerciseDefinition> = pool
        .into_iter()
        .filter(|e| !used.contains(&e.name))
        .collect();

    let mut chosen = Vec::with_capacity(MAX_EXERCISES_PER_MUSCLE);
    while chosen.len() < MAX_EXERCISES_PER_MUSCLE && !remaining.is_empty() {
        let pick = remaining.swap_remove(rng.next_index(remaining.len()));
        if used.insert(pick.name.clone()) {
            chosen.push(pick);
        }
    }

    if chosen.is_empty() {
        tracing::warn!("No exercises available for {} ({:?} pool)", request.muscle, stage);
    } else {
        tracing::debug!(
            "Selected {} exercise(s) for {} from {:?} pool",
            chosen.len(),
            request.muscle,
            stage
        );
    }

    chosen
        .into_iter()
        .map(|definition| {
            let (display_name, description) = resolve_variant(definition, request.level);
            SelectedExercise {
                definition,
                display_name: age_adjusted_name(definition, display_name, request.age),
                description,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FIXTURE: &str = r#"
[[exercise]]
name = "Push-Up"
muscles = ["chest"]
equipment = ["bodyweight"]
goals = ["hypertrophy", "endurance"]
variants.beginner = { display_name = "Incline Push-Up" }
variants.advanced = { display_name = "Archer Push-Up" }

[[exercise]]
name = "Bench Press"
muscles = ["chest"]
equipment = ["barbell", "bench"]
goals = ["strength", "hypertrophy"]
variants.intermediate = { display_name = "Paused Bench Press" }

[[exercise]]
name = "Dumbbell Fly"
muscles = ["chest"]
equipment = ["dumbbells"]
goals = ["hypertrophy"]

[[exercise]]
name = "Cable Fly"
muscles = ["chest"]
equipment = ["cable"]
goals = ["hypertrophy"]

[[exercise]]
name = "Chest Dip"
muscles = ["chest"]
equipment = ["bodyweight"]
goals = ["strength"]
variants.novice = { display_name = "Assisted Dip" }
variants.intermediate = { display_name = "Chest Dip" }

[[exercise]]
name = "Leg Press"
muscles = ["quads"]
equipment = ["machine"]
goals = ["strength"]
"#;

    fn fixture() -> Catalog {
        Catalog::from_toml_str(FIXTURE).unwrap()
    }

    fn equipment(kinds: &[EquipmentKind]) -> BTreeSet<EquipmentKind> {
        kinds.iter().copied().collect()
    }

    fn request(
        muscle: MuscleGroup,
        equipment: &BTreeSet<EquipmentKind>,
        goal: Goal,
    ) -> SelectionRequest<'_> {
        SelectionRequest {
            muscle,
            equipment,
            goal,
            age: 30,
            level: DifficultyTier::Intermediate,
        }
    }

    fn names(pool: &[&ExerciseDefinition]) -> Vec<String> {
        pool.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_pool_filters_equipment_and_goal() {
        let catalog = fixture();
        let kit = equipment(&[EquipmentKind::Dumbbells]);
        let (pool, stage) = candidate_pool(&catalog, MuscleGroup::Chest, &kit, Goal::Hypertrophy);
        assert_eq!(stage, PoolStage::Matched);
        // Bodyweight exercises always pass the equipment check
        assert_eq!(names(&pool), vec!["Push-Up", "Dumbbell Fly"]);
    }

    #[test]
    fn test_pool_falls_back_to_bodyweight() {
        let catalog = fixture();
        let kit = equipment(&[EquipmentKind::Kettlebell]);
        let (pool, stage) = candidate_pool(&catalog, MuscleGroup::Chest, &kit, Goal::WeightLoss);
        assert_eq!(stage, PoolStage::BodyweightOnly);
        assert_eq!(names(&pool), vec!["Push-Up", "Chest Dip"]);
    }

    #[test]
    fn test_pool_falls_back_to_full_list() {
        let catalog = fixture();
        let kit = equipment(&[EquipmentKind::Bodyweight]);
        let (pool, stage) = candidate_pool(&catalog, MuscleGroup::Quads, &kit, Goal::Endurance);
        assert_eq!(stage, PoolStage::Unfiltered);
        assert_eq!(names(&pool), vec!["Leg Press"]);
    }

    #[test]
    fn test_empty_muscle_yields_empty_slot() {
        let catalog = fixture();
        let kit = equipment(&[EquipmentKind::Bodyweight]);
        let mut used = HashSet::new();
        let picks = select_exercises(
            &catalog,
            &request(MuscleGroup::Calves, &kit, Goal::Strength),
            &mut used,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(picks.is_empty());
    }

    #[test]
    fn test_selection_is_bounded_and_unique() {
        let catalog = fixture();
        let kit: BTreeSet<_> = EquipmentKind::ALL.into_iter().collect();
        for seed in 0..50 {
            let mut used = HashSet::new();
            let picks = select_exercises(
                &catalog,
                &request(MuscleGroup::Chest, &kit, Goal::Hypertrophy),
                &mut used,
                &mut StdRng::seed_from_u64(seed),
            );
            assert_eq!(picks.len(), MAX_EXERCISES_PER_MUSCLE);
            let unique: HashSet<_> = picks.iter().map(|p| &p.definition.name).collect();
            assert_eq!(unique.len(), picks.len());
            assert_eq!(used.len(), picks.len());
        }
    }

    #[test]
    fn test_small_pool_returns_fewer() {
        let catalog = fixture();
        let kit = equipment(&[EquipmentKind::Barbell]);
        let mut used = HashSet::new();
        let picks = select_exercises(
            &catalog,
            &request(MuscleGroup::Chest, &kit, Goal::Strength),
            &mut used,
            &mut StepRng::new(0, 0),
        );
        let mut drawn: Vec<_> = picks.iter().map(|p| p.definition.name.as_str()).collect();
        drawn.sort();
        assert_eq!(drawn, vec!["Bench Press", "Chest Dip"]);
    }

    #[test]
    fn test_used_names_are_skipped() {
        let catalog = fixture();
        let kit = equipment(&[EquipmentKind::Barbell]);
        let mut used: HashSet<String> = ["Bench Press".to_string()].into_iter().collect();
        let picks = select_exercises(
            &catalog,
            &request(MuscleGroup::Chest, &kit, Goal::Strength),
            &mut used,
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].definition.name, "Chest Dip");
    }

    #[test]
    fn test_variant_fallback_order() {
        let catalog = fixture();
        let push_up = catalog.get("Push-Up").unwrap();
        // No intermediate variant: Beginner wins
        assert_eq!(
            resolve_variant(push_up, DifficultyTier::Intermediate).0,
            "Incline Push-Up"
        );
        assert_eq!(resolve_variant(push_up, DifficultyTier::Advanced).0, "Archer Push-Up");

        let dip = catalog.get("Chest Dip").unwrap();
        // Neither exact nor Beginner: first defined tier
        assert_eq!(resolve_variant(dip, DifficultyTier::Advanced).0, "Assisted Dip");

        let fly = catalog.get("Cable Fly").unwrap();
        assert_eq!(resolve_variant(fly, DifficultyTier::Advanced).0, "Cable Fly");
    }

    #[test]
    fn test_age_labels_only_for_advanced_exercises() {
        let catalog = fixture();
        let push_up = catalog.get("Push-Up").unwrap();
        let bench = catalog.get("Bench Press").unwrap();

        assert_eq!(
            age_adjusted_name(push_up, "Incline Push-Up".into(), 15),
            "Incline Push-Up (Modified)"
        );
        assert_eq!(
            age_adjusted_name(push_up, "Incline Push-Up".into(), 70),
            "Incline Push-Up (Low-Impact)"
        );
        assert_eq!(
            age_adjusted_name(push_up, "Incline Push-Up".into(), 40),
            "Incline Push-Up"
        );
        assert_eq!(
            age_adjusted_name(bench, "Paused Bench Press".into(), 70),
            "Paused Bench Press"
        );
    }
}
