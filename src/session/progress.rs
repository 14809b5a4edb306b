//! Progress aggregation
//!
//! Pure functions over the completed-sets list and the workout template.
//! Percentages are clamped to [0, 100]: the backend allows logging more sets
//! than prescribed, and over-logging must never show as more than 100%.

use crate::api::{CompletedSet, Workout, WorkoutExercise};

/// Number of acknowledged sets for one exercise.
pub fn completed_count(completed: &[CompletedSet], exercise_name: &str) -> usize {
    completed
        .iter()
        .filter(|set| set.exercise == exercise_name)
        .count()
}

/// Completion percentage for one prescription, clamped to [0, 100].
pub fn exercise_progress(completed: &[CompletedSet], prescription: &WorkoutExercise) -> u8 {
    let count = completed_count(completed, &prescription.exercise);
    let target = prescription.sets.max(1);
    percentage(count, target as usize)
}

/// Overall completion percentage across all prescriptions, clamped to
/// [0, 100].
pub fn overall_progress(completed: &[CompletedSet], workout: &Workout) -> u8 {
    let target: usize = workout
        .exercises
        .iter()
        .map(|ex| ex.sets as usize)
        .sum::<usize>()
        .max(1);
    percentage(completed.len(), target)
}

fn percentage(count: usize, target: usize) -> u8 {
    let pct = (100.0 * count as f64 / target as f64).round();
    pct.min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn set(exercise: &str) -> CompletedSet {
        CompletedSet {
            uuid: uuid::Uuid::new_v4().to_string(),
            exercise: exercise.to_string(),
            reps: Some(10),
            weight: None,
            duration: None,
            rest: None,
            pre: None,
            datetime: Utc::now(),
        }
    }

    fn prescription(exercise: &str, sets: u32) -> WorkoutExercise {
        WorkoutExercise {
            uuid: String::new(),
            exercise: exercise.to_string(),
            order: 0,
            sets,
            reps: None,
            weight: None,
            duration: None,
            rest: None,
            notes: None,
        }
    }

    fn workout(exercises: Vec<WorkoutExercise>) -> Workout {
        Workout {
            uuid: "w".to_string(),
            name: "Test".to_string(),
            creator: String::new(),
            description: None,
            notes: None,
            public: false,
            exercises,
            total_duration: 0,
        }
    }

    #[test]
    fn progress_is_rounded_per_exercise() {
        let presc = prescription("Squat", 3);
        let completed = vec![set("Squat")];
        assert_eq!(exercise_progress(&completed, &presc), 33);

        let completed = vec![set("Squat"), set("Squat")];
        assert_eq!(exercise_progress(&completed, &presc), 67);
    }

    #[test]
    fn over_logging_clamps_to_100() {
        let presc = prescription("Squat", 3);
        let completed: Vec<_> = (0..5).map(|_| set("Squat")).collect();
        assert_eq!(exercise_progress(&completed, &presc), 100);

        let w = workout(vec![prescription("Squat", 3)]);
        assert_eq!(overall_progress(&completed, &w), 100);
    }

    #[test]
    fn zero_target_sets_does_not_divide_by_zero() {
        let presc = prescription("Squat", 0);
        assert_eq!(exercise_progress(&[], &presc), 0);
        assert_eq!(exercise_progress(&[set("Squat")], &presc), 100);
    }

    #[test]
    fn overall_progress_spans_exercises() {
        let w = workout(vec![prescription("Squat", 2), prescription("Bench", 2)]);

        assert_eq!(overall_progress(&[], &w), 0);
        assert_eq!(overall_progress(&[set("Squat")], &w), 25);
        assert_eq!(
            overall_progress(&[set("Squat"), set("Squat"), set("Bench")], &w),
            75
        );
    }

    #[test]
    fn counts_only_matching_exercise() {
        let completed = vec![set("Squat"), set("Bench"), set("Squat")];
        assert_eq!(completed_count(&completed, "Squat"), 2);
        assert_eq!(completed_count(&completed, "Deadlift"), 0);
    }
}
