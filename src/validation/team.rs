use crate::db::models::team::CreateTeamInput;
use crate::error::AppError;

use super::{require_text, validate_input};

pub fn validate_team_input(input: &CreateTeamInput) -> Result<(), AppError> {
    validate_input(input)?;
    require_text(&input.name, "Team name is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_validation() {
        let valid = CreateTeamInput {
            name: "Alpha".to_string(),
            description: Some("Core team".to_string()),
        };
        assert!(validate_team_input(&valid).is_ok());

        let blank = CreateTeamInput {
            name: "  ".to_string(),
            description: None,
        };
        assert!(validate_team_input(&blank).is_err());

        let long_description = CreateTeamInput {
            name: "Alpha".to_string(),
            description: Some("a".repeat(1025)),
        };
        assert!(validate_team_input(&long_description).is_err());
    }
}
