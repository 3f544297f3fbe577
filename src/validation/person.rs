use crate::db::enums::{MemberRole, PersonType};
use crate::db::models::person::{CreatePersonInput, PersonKind, UpdatePersonInput};
use crate::error::AppError;

use super::{require_text, validate_input};

/// Team members must carry a role; project managers never do.
fn validate_role(kind: PersonType, role: Option<MemberRole>) -> Result<PersonKind, AppError> {
    match (kind, role) {
        (PersonType::TeamMember, Some(role)) => Ok(PersonKind::TeamMember { role }),
        (PersonType::TeamMember, None) => Err(AppError::validation("Team member role is required")),
        (PersonType::ProjectManager, None) => Ok(PersonKind::ProjectManager),
        (PersonType::ProjectManager, Some(_)) => Err(AppError::validation(
            "Project managers do not have a member role",
        )),
    }
}

pub fn validate_create_person(
    kind: PersonType,
    input: &CreatePersonInput,
) -> Result<PersonKind, AppError> {
    validate_input(input)?;
    require_text(&input.first_name, "First name is required")?;
    require_text(&input.last_name, "Last name is required")?;
    if let Some(user_name) = &input.user_name {
        require_text(user_name, "User name cannot be blank")?;
    }
    validate_role(kind, input.role)
}

pub fn validate_update_person(
    kind: PersonType,
    input: &UpdatePersonInput,
) -> Result<PersonKind, AppError> {
    validate_input(input)?;
    require_text(&input.first_name, "First name is required")?;
    require_text(&input.last_name, "Last name is required")?;
    validate_role(kind, input.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(role: Option<MemberRole>) -> CreatePersonInput {
        CreatePersonInput {
            first_name: "Thandi".to_string(),
            last_name: "Mokoena".to_string(),
            email: "thandi@example.com".to_string(),
            password: "secret123".to_string(),
            user_name: None,
            role,
        }
    }

    #[test]
    fn team_member_requires_role() {
        let developer = create_input(Some(MemberRole::Developer));
        let kind = validate_create_person(PersonType::TeamMember, &developer).unwrap();
        assert_eq!(kind, PersonKind::TeamMember { role: MemberRole::Developer });
        assert_eq!(kind.person_type(), PersonType::TeamMember);
        assert!(validate_create_person(PersonType::TeamMember, &create_input(None)).is_err());
    }

    #[test]
    fn project_manager_rejects_role() {
        assert!(validate_create_person(PersonType::ProjectManager, &create_input(None)).is_ok());
        let tester = create_input(Some(MemberRole::Tester));
        assert!(validate_create_person(PersonType::ProjectManager, &tester).is_err());
    }

    #[test]
    fn invalid_email_and_blank_names_are_rejected() {
        let mut input = create_input(None);
        input.email = "not-an-email".to_string();
        assert!(validate_create_person(PersonType::ProjectManager, &input).is_err());

        let mut input = create_input(None);
        input.first_name = "  ".to_string();
        assert!(validate_create_person(PersonType::ProjectManager, &input).is_err());

        let mut input = create_input(None);
        input.password = "123".to_string();
        assert!(validate_create_person(PersonType::ProjectManager, &input).is_err());
    }

    #[test]
    fn update_keeps_role_rule() {
        let input = UpdatePersonInput {
            first_name: "Thandi".to_string(),
            last_name: "Mokoena".to_string(),
            email: "thandi@example.com".to_string(),
            role: None,
        };
        assert!(validate_update_person(PersonType::ProjectManager, &input).is_ok());
        assert!(validate_update_person(PersonType::TeamMember, &input).is_err());
    }
}
