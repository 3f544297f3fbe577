use crate::db::enums::{MemberRole, PersonType};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Row of the shared `persons` table. TeamMember and ProjectManager are
/// told apart by `person_type`; see [`PersonKind`].
#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::persons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Person {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub person_type: PersonType,
    pub role: Option<MemberRole>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Subtype of a person row. Only team members carry a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonKind {
    TeamMember { role: MemberRole },
    ProjectManager,
}

impl PersonKind {
    pub fn person_type(&self) -> PersonType {
        match self {
            PersonKind::TeamMember { .. } => PersonType::TeamMember,
            PersonKind::ProjectManager => PersonType::ProjectManager,
        }
    }

    pub fn role(&self) -> Option<MemberRole> {
        match self {
            PersonKind::TeamMember { role } => Some(*role),
            PersonKind::ProjectManager => None,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::persons)]
pub struct NewPerson {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub person_type: PersonType,
    pub role: Option<MemberRole>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::persons)]
#[diesel(treat_none_as_null = true)]
pub struct PersonChangeset {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<MemberRole>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Person API DTOs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub person_type: PersonType,
    pub role: Option<MemberRole>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            user_id: person.user_id,
            first_name: person.first_name,
            last_name: person.last_name,
            email: person.email,
            person_type: person.person_type,
            role: person.role,
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

/// Input for creating a team member or a project manager. `role` is required
/// for team members and ignored for project managers.
#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonInput {
    #[validate(length(
        min = 1,
        max = 64,
        message = "First name must be between 1 and 64 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 64,
        message = "Last name must be between 1 and 64 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"), length(max = 256))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password must be between 6 and 128 characters"
    ))]
    pub password: String,

    #[validate(length(min = 1, max = 256))]
    pub user_name: Option<String>,

    pub role: Option<MemberRole>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonInput {
    #[validate(length(
        min = 1,
        max = 64,
        message = "First name must be between 1 and 64 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 64,
        message = "Last name must be between 1 and 64 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"), length(max = 256))]
    pub email: String,

    pub role: Option<MemberRole>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonListInput {
    pub keyword: Option<String>,
    pub role: Option<MemberRole>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
