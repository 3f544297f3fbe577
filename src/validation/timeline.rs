use crate::db::models::milestone::MilestoneInput;
use crate::db::models::timeline::{TimelineInput, TimelinePhaseInput};
use crate::error::AppError;

use super::{require_text, validate_date_range, validate_input};

pub fn validate_timeline_input(input: &TimelineInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.name, "Timeline name is required")
}

pub fn validate_phase_input(input: &TimelinePhaseInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.name, "Phase name is required")?;
    validate_date_range(input.start_date, input.end_date, "Phase")
}

pub fn validate_milestone_input(input: &MilestoneInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.title, "Milestone title is required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_phase_validation() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut phase = TimelinePhaseInput {
            timeline_id: Uuid::new_v4(),
            name: "Design".to_string(),
            start_date: start,
            end_date: start + Duration::days(14),
        };
        assert!(validate_phase_input(&phase).is_ok());

        phase.end_date = start;
        assert!(validate_phase_input(&phase).is_err());

        phase.end_date = start - Duration::days(1);
        assert!(validate_phase_input(&phase).is_err());
    }

    #[test]
    fn test_milestone_validation() {
        let mut milestone = MilestoneInput {
            timeline_id: Uuid::new_v4(),
            title: "Kickoff".to_string(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            is_completed: false,
        };
        assert!(validate_milestone_input(&milestone).is_ok());

        milestone.title = String::new();
        assert!(validate_milestone_input(&milestone).is_err());
    }

    #[test]
    fn test_timeline_validation() {
        let timeline = TimelineInput {
            project_id: Uuid::new_v4(),
            name: "a".repeat(129),
        };
        assert!(validate_timeline_input(&timeline).is_err());
    }
}
