use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Document {
    pub id: Uuid,
    pub project_duty_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::documents)]
pub struct NewDocument {
    pub project_duty_id: Uuid,
    pub file_name: String,
    pub file_url: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::documents)]
pub struct DocumentChangeset {
    pub project_duty_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub id: Uuid,
    pub project_duty_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            project_duty_id: document.project_duty_id,
            file_name: document.file_name,
            file_url: document.file_url,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    pub project_duty_id: Uuid,

    #[validate(length(
        min = 1,
        max = 256,
        message = "File name must be between 1 and 256 characters"
    ))]
    pub file_name: String,

    #[validate(url(message = "File URL must be a valid URL"), length(max = 2048))]
    pub file_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListInput {
    pub project_duty_id: Option<Uuid>,
    pub keyword: Option<String>,
    pub skip_count: Option<i64>,
    pub max_result_count: Option<i64>,
}
