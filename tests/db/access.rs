use mveledziso_backend::config::AuthConfig;
use mveledziso_backend::db::enums::{EntityKind, NotificationType};
use mveledziso_backend::db::models::{
    AuthenticateRequest, CreateActivityLogInput, CreateNotificationInput, NotificationListInput,
    RegisterRequest, UpdateActivityLogInput, UpdateNotificationInput,
};
use mveledziso_backend::error::AppError;
use mveledziso_backend::middleware::auth::AuthService;
use mveledziso_backend::services::{
    ActivityLogsService, CrudService, NotificationsService, TokenAuthService,
};

use super::{caller, connection, team, unique};

fn auth_service() -> AuthService {
    AuthService::new(&AuthConfig {
        jwt_secret: "test-secret".to_string(),
        access_token_expires_in: 3600,
        issuer: "mveledziso".to_string(),
        bcrypt_cost: 4,
    })
}

fn register_request(user_name: &str) -> RegisterRequest {
    RegisterRequest {
        user_name: user_name.to_string(),
        email_address: format!("{}@example.com", user_name),
        name: "Thandi".to_string(),
        surname: "Mokoena".to_string(),
        password: "123qwe".to_string(),
    }
}

#[test]
#[ignore = "requires database"]
fn test_registered_user_can_authenticate() {
    let mut conn = connection();
    let auth = auth_service();
    let user_name = unique("admin");

    let registered =
        TokenAuthService::register(&mut conn, &auth, 4, &register_request(&user_name)).unwrap();
    let claims = auth.verify_token(&registered.access_token).unwrap();
    assert_eq!(claims.sub, registered.user_id);

    let result = TokenAuthService::authenticate(
        &mut conn,
        &auth,
        &AuthenticateRequest {
            user_name_or_email_address: user_name.clone(),
            password: "123qwe".to_string(),
        },
    )
    .unwrap();
    assert_eq!(result.user_id, registered.user_id);

    let err = TokenAuthService::register(&mut conn, &auth, 4, &register_request(&user_name))
        .unwrap_err();
    assert_eq!(err.code(), Some("USER_NAME_EXISTS"));
}

#[test]
#[ignore = "requires database"]
fn test_notification_list_follows_visibility() {
    let mut conn = connection();
    let sender = caller(&mut conn);
    let recipient = caller(&mut conn);
    let stranger = caller(&mut conn);

    let alpha = team(&mut conn, &sender, "Alpha");
    NotificationsService::create(
        &mut conn,
        &sender,
        CreateNotificationInput {
            user_id: recipient.user_id,
            message: "You were added to Alpha".to_string(),
            notification_type: NotificationType::TeamUpdate,
            entity_type: EntityKind::Team,
            entity_id: alpha.id,
        },
    )
    .unwrap();

    let others_inbox = NotificationListInput {
        user_id: Some(recipient.user_id),
        ..Default::default()
    };

    let seen_by_stranger =
        NotificationsService::get_list(&mut conn, &stranger, others_inbox.clone()).unwrap();
    assert_eq!(seen_by_stranger.total_count, 0);
    assert!(seen_by_stranger.items.is_empty());

    let seen_by_sender =
        NotificationsService::get_list(&mut conn, &sender, others_inbox).unwrap();
    assert_eq!(seen_by_sender.total_count, 1);

    let own_inbox =
        NotificationsService::get_list(&mut conn, &recipient, NotificationListInput::default())
            .unwrap();
    assert_eq!(own_inbox.total_count, 1);
    assert_eq!(own_inbox.items[0].message, "You were added to Alpha");
}

#[test]
#[ignore = "requires database"]
fn test_only_recipient_changes_read_state() {
    let mut conn = connection();
    let sender = caller(&mut conn);
    let recipient = caller(&mut conn);

    let alpha = team(&mut conn, &sender, "Alpha");
    let notification = NotificationsService::create(
        &mut conn,
        &sender,
        CreateNotificationInput {
            user_id: recipient.user_id,
            message: "Standup moved".to_string(),
            notification_type: NotificationType::Info,
            entity_type: EntityKind::Team,
            entity_id: alpha.id,
        },
    )
    .unwrap();

    let err = NotificationsService::update(
        &mut conn,
        &sender,
        notification.id,
        UpdateNotificationInput {
            message: "Standup moved".to_string(),
            notification_type: NotificationType::Info,
            is_read: true,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    let edited = NotificationsService::update(
        &mut conn,
        &sender,
        notification.id,
        UpdateNotificationInput {
            message: "Standup moved to 10:00".to_string(),
            notification_type: NotificationType::Info,
            is_read: false,
        },
    )
    .unwrap();
    assert_eq!(edited.message, "Standup moved to 10:00");
    assert!(!edited.is_read);

    let read = NotificationsService::update(
        &mut conn,
        &recipient,
        notification.id,
        UpdateNotificationInput {
            message: edited.message.clone(),
            notification_type: NotificationType::Info,
            is_read: true,
        },
    )
    .unwrap();
    assert!(read.is_read);
}

#[test]
#[ignore = "requires database"]
fn test_activity_log_changes_limited_to_recorder() {
    let mut conn = connection();
    let recorder = caller(&mut conn);
    let other = caller(&mut conn);

    let alpha = team(&mut conn, &recorder, "Alpha");
    let log = ActivityLogsService::create(
        &mut conn,
        &recorder,
        CreateActivityLogInput {
            entity_type: EntityKind::Team,
            entity_id: alpha.id,
            action: "Reviewed".to_string(),
            details: None,
        },
    )
    .unwrap();

    let err = ActivityLogsService::update(
        &mut conn,
        &other,
        log.id,
        UpdateActivityLogInput {
            action: "Tampered".to_string(),
            details: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    let err = ActivityLogsService::delete(&mut conn, &other, log.id).unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    let unchanged = ActivityLogsService::get(&mut conn, &other, log.id).unwrap();
    assert_eq!(unchanged.action, "Reviewed");

    ActivityLogsService::delete(&mut conn, &recorder, log.id).unwrap();
    assert!(matches!(
        ActivityLogsService::get(&mut conn, &recorder, log.id),
        Err(AppError::NotFound { .. })
    ));
}
