use chrono::{TimeZone, Utc};
use mveledziso_backend::db::enums::{DutyPriority, DutyStatus, EntityKind};
use mveledziso_backend::db::models::{
    ApiResponse, CreateCommentInput, CreateProjectDutyInput, CreateProjectInput, PagedResult,
    TeamDto,
};
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_dtos_serialize_camel_case() {
    let team = TeamDto {
        id: Uuid::new_v4(),
        name: "Alpha".to_string(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let page = PagedResult::new(1, vec![team]);
    let value = serde_json::to_value(ApiResponse::success(page, "ok")).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["totalCount"], 1);
    assert!(value["data"]["items"][0].get("createdAt").is_some());
    assert!(value["data"]["items"][0].get("created_at").is_none());
}

#[test]
fn test_project_input_reads_camel_case() {
    let team_id = Uuid::new_v4();
    let manager_id = Uuid::new_v4();
    let input: CreateProjectInput = serde_json::from_value(json!({
        "name": "Redesign",
        "startDate": "2024-01-01T00:00:00Z",
        "endDate": "2024-06-01T00:00:00Z",
        "teamId": team_id,
        "projectManagerId": manager_id
    }))
    .unwrap();

    assert_eq!(input.start_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(input.team_id, team_id);
    assert!(!input.is_collaboration);
    assert!(input.description.is_none());
}

#[test]
fn test_duty_input_defaults_status_and_priority() {
    let input: CreateProjectDutyInput = serde_json::from_value(json!({
        "projectId": Uuid::new_v4(),
        "title": "Wireframes"
    }))
    .unwrap();

    assert_eq!(input.status, DutyStatus::Todo);
    assert_eq!(input.priority, DutyPriority::Medium);
}

#[test]
fn test_comment_input_uses_entity_kind_names() {
    let input: CreateCommentInput = serde_json::from_value(json!({
        "entityType": "ProjectDuty",
        "entityId": Uuid::new_v4(),
        "content": "Looks good"
    }))
    .unwrap();
    assert_eq!(input.entity_type, EntityKind::ProjectDuty);

    let unknown = serde_json::from_value::<CreateCommentInput>(json!({
        "entityType": "Spaceship",
        "entityId": Uuid::new_v4(),
        "content": "?"
    }));
    assert!(unknown.is_err());
}
