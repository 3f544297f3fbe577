use axum::extract::Query;
use axum::http::Uri;
use mveledziso_backend::db::enums::{DutyStatus, NotificationType};
use mveledziso_backend::db::models::{
    IdQuery, NotificationListInput, ProjectDutyListInput, ProjectListInput,
};
use uuid::Uuid;

#[test]
fn test_list_query_parses_filters_and_paging() {
    let team_id = Uuid::new_v4();
    let uri: Uri = format!(
        "/api/services/app/Project/GetList?keyword=red&teamId={}&isCollaboration=true&skipCount=20&maxResultCount=10",
        team_id
    )
    .parse()
    .unwrap();

    let Query(input) = Query::<ProjectListInput>::try_from_uri(&uri).unwrap();
    assert_eq!(input.keyword.as_deref(), Some("red"));
    assert_eq!(input.team_id, Some(team_id));
    assert_eq!(input.is_collaboration, Some(true));
    assert_eq!(input.skip_count, Some(20));
    assert_eq!(input.max_result_count, Some(10));
}

#[test]
fn test_empty_list_query_means_no_filters() {
    let uri: Uri = "/api/services/app/ProjectDuty/GetList".parse().unwrap();
    let Query(input) = Query::<ProjectDutyListInput>::try_from_uri(&uri).unwrap();
    assert!(input.project_id.is_none());
    assert!(input.status.is_none());
    assert!(input.skip_count.is_none());
}

#[test]
fn test_enum_filters_use_variant_names() {
    let uri: Uri = "/x?status=InProgress".parse().unwrap();
    let Query(input) = Query::<ProjectDutyListInput>::try_from_uri(&uri).unwrap();
    assert_eq!(input.status, Some(DutyStatus::InProgress));

    let uri: Uri = "/x?isRead=false&notificationType=DutyAssigned"
        .parse()
        .unwrap();
    let Query(input) = Query::<NotificationListInput>::try_from_uri(&uri).unwrap();
    assert_eq!(input.is_read, Some(false));
    assert_eq!(input.notification_type, Some(NotificationType::DutyAssigned));
}

#[test]
fn test_id_query_requires_valid_uuid() {
    let id = Uuid::new_v4();
    let uri: Uri = format!("/api/services/app/Team/Get?id={}", id)
        .parse()
        .unwrap();
    assert_eq!(Query::<IdQuery>::try_from_uri(&uri).unwrap().0.id, id);

    let uri: Uri = "/api/services/app/Team/Get?id=42".parse().unwrap();
    assert!(Query::<IdQuery>::try_from_uri(&uri).is_err());
}
