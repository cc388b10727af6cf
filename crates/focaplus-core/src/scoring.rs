//! XP scoring engine.
//!
//! Converts studied time into experience points:
//!
//! ```text
//! XP = max(1, round(floor(duration_secs / 60) * multiplier))
//! ```
//!
//! The multiplier comes from the activity type (2.0 for assessment prep,
//! 1.5 for homework, 1.0 otherwise). Unrecognized activity labels fall back
//! to 1.0 rather than erroring. Both entry points are pure functions with
//! no hidden state, so identical inputs always produce identical outputs.

use crate::session::ActivityType;

/// Multiplier applied when the activity label is not recognized.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Look up the XP multiplier for a display label.
///
/// Unknown labels get [`DEFAULT_MULTIPLIER`], never an error.
pub fn multiplier_for_label(label: &str) -> f64 {
    ActivityType::from_label(label)
        .map(ActivityType::multiplier)
        .unwrap_or(DEFAULT_MULTIPLIER)
}

/// Compute XP for a studied duration and an activity display label.
pub fn calculate_xp(duration_seconds: u64, activity_label: &str) -> u32 {
    xp_with_multiplier(duration_seconds, multiplier_for_label(activity_label))
}

/// Compute XP for a studied duration and a known activity type.
pub fn xp_for(duration_seconds: u64, activity: ActivityType) -> u32 {
    xp_with_multiplier(duration_seconds, activity.multiplier())
}

fn xp_with_multiplier(duration_seconds: u64, multiplier: f64) -> u32 {
    let minutes = duration_seconds / 60;
    let rounded = (minutes as f64 * multiplier).round();
    let points = if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    };
    points.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_earns_the_floor() {
        for activity in ActivityType::ALL {
            assert_eq!(calculate_xp(0, activity.label()), 1);
        }
        assert_eq!(calculate_xp(0, "whatever"), 1);
    }

    #[test]
    fn sub_minute_durations_earn_the_floor() {
        assert_eq!(calculate_xp(59, "Estudar Conteúdo"), 1);
        assert_eq!(calculate_xp(1, "Estudar para Avaliação"), 1);
    }

    #[test]
    fn two_minutes_of_content_earns_two() {
        assert_eq!(calculate_xp(120, "Estudar Conteúdo"), 2);
    }

    #[test]
    fn assessment_prep_doubles_the_reward() {
        assert_eq!(calculate_xp(120, "Estudar para Avaliação"), 4);
    }

    #[test]
    fn homework_rounds_half_up() {
        // 90 s floors to 1 minute; 1 * 1.5 = 1.5 rounds to 2.
        assert_eq!(calculate_xp(90, "Fazer Tarefa de casa"), 2);
        // 3 minutes * 1.5 = 4.5 rounds to 5.
        assert_eq!(calculate_xp(180, "Fazer Tarefa de casa"), 5);
    }

    #[test]
    fn watching_lessons_gets_the_base_rate() {
        assert_eq!(calculate_xp(185, "Assistir Aula"), 3);
    }

    #[test]
    fn unrecognized_labels_behave_like_the_base_rate() {
        assert_eq!(calculate_xp(3600, "Cooking"), calculate_xp(3600, "Assistir Aula"));
        assert_eq!(calculate_xp(3600, ""), 60);
        assert_eq!(multiplier_for_label("???"), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn identical_inputs_yield_identical_outputs() {
        let a = calculate_xp(12_345, "Fazer Tarefa de casa");
        let b = calculate_xp(12_345, "Fazer Tarefa de casa");
        assert_eq!(a, b);
    }

    #[test]
    fn typed_entry_point_matches_label_lookup() {
        for activity in ActivityType::ALL {
            assert_eq!(
                xp_for(4_321, activity),
                calculate_xp(4_321, activity.label())
            );
        }
    }

    #[test]
    fn full_pomodoro_block_scores_by_studied_minutes() {
        // 25 studied minutes at 2.0.
        assert_eq!(xp_for(1500, ActivityType::StudyForAssessment), 50);
        // Two blocks at the base rate.
        assert_eq!(xp_for(3000, ActivityType::StudyContent), 50);
    }
}
