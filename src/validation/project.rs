use crate::db::models::document::DocumentInput;
use crate::db::models::duty::CreateProjectDutyInput;
use crate::db::models::project::CreateProjectInput;
use crate::error::AppError;

use super::{require_text, validate_date_range, validate_input};

pub fn validate_project_input(input: &CreateProjectInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.name, "Project name is required")?;
    validate_date_range(input.start_date, input.end_date, "Project")
}

pub fn validate_duty_input(input: &CreateProjectDutyInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.title, "Duty title is required")
}

pub fn validate_document_input(input: &DocumentInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.file_name, "File name is required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn project(start_month: u32, end_month: u32) -> CreateProjectInput {
        CreateProjectInput {
            name: "Redesign".to_string(),
            description: None,
            start_date: Utc.with_ymd_and_hms(2024, start_month, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, end_month, 1, 0, 0, 0).unwrap(),
            is_collaboration: false,
            team_id: Uuid::new_v4(),
            project_manager_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_project_validation() {
        assert!(validate_project_input(&project(1, 6)).is_ok());
        assert!(validate_project_input(&project(6, 1)).is_err());
        assert!(validate_project_input(&project(3, 3)).is_err());

        let mut blank = project(1, 6);
        blank.name = "   ".to_string();
        assert!(validate_project_input(&blank).is_err());

        let mut long = project(1, 6);
        long.name = "a".repeat(129);
        assert!(validate_project_input(&long).is_err());
    }

    #[test]
    fn test_document_validation() {
        let mut input = DocumentInput {
            project_duty_id: Uuid::new_v4(),
            file_name: "brief.pdf".to_string(),
            file_url: "https://files.example.com/brief.pdf".to_string(),
        };
        assert!(validate_document_input(&input).is_ok());

        input.file_url = "not a url".to_string();
        assert!(validate_document_input(&input).is_err());
    }
}
