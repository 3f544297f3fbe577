use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use mveledziso_backend::db::enums::{DutyPriority, DutyStatus, EntityKind, TeamRole};
use mveledziso_backend::db::models::{
    CreateCommentInput, CreateProjectDutyInput, MilestoneInput, MilestoneListInput,
    ProjectDutyListInput, TeamListInput, TimelineInput, TimelinePhaseInput, TimelinePhaseListInput,
    UpdateCommentInput, UserDutyInput, UserDutyListInput, UserTeamInput, UserTeamListInput,
};
use mveledziso_backend::error::AppError;
use mveledziso_backend::services::context::RequestContext;
use mveledziso_backend::services::{
    CommentsService, CrudService, MilestonesService, NotificationsService, ProjectDutiesService,
    ProjectManagersService, ProjectsService, TeamsService, TimelinePhasesService, TimelinesService,
    UserDutiesService, UserTeamsService,
};
use uuid::Uuid;

use super::{caller, connection, project, project_manager, team, team_member, unique};

#[test]
#[ignore = "requires database"]
fn test_project_timeline_milestone_scenario() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    let redesign = project(&mut conn, &ctx, &alpha, &manager, "Redesign");

    let timeline = TimelinesService::create(
        &mut conn,
        &ctx,
        TimelineInput {
            project_id: redesign.id,
            name: "Redesign timeline".to_string(),
        },
    )
    .unwrap();

    let discovery = TimelinePhasesService::create(
        &mut conn,
        &ctx,
        TimelinePhaseInput {
            timeline_id: timeline.id,
            name: "Discovery".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        },
    )
    .unwrap();

    let kickoff = MilestonesService::create(
        &mut conn,
        &ctx,
        MilestoneInput {
            timeline_id: timeline.id,
            title: "Kickoff".to_string(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            is_completed: false,
        },
    )
    .unwrap();

    let detail = TimelinesService::get_by_project(&mut conn, &ctx, redesign.id).unwrap();
    assert_eq!(detail.timeline.id, timeline.id);
    assert_eq!(detail.milestones.len(), 1);
    assert_eq!(detail.milestones[0].title, "Kickoff");

    ProjectsService::delete(&mut conn, &ctx, redesign.id).unwrap();

    assert!(matches!(
        TimelinesService::get(&mut conn, &ctx, timeline.id),
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        MilestonesService::get(&mut conn, &ctx, kickoff.id),
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        TimelinePhasesService::get(&mut conn, &ctx, discovery.id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
#[ignore = "requires database"]
fn test_create_then_get_returns_input() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    let created = project(&mut conn, &ctx, &alpha, &manager, "Redesign");

    let fetched = ProjectsService::get(&mut conn, &ctx, created.id).unwrap();
    assert_eq!(fetched.name, "Redesign");
    assert_eq!(fetched.team_id, alpha.id);
    assert_eq!(fetched.project_manager_id, manager.id);
    assert_eq!(fetched.start_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(fetched.end_date, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    assert!(!fetched.is_collaboration);
}

#[test]
#[ignore = "requires database"]
fn test_project_delete_cascades_to_duties() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    let redesign = project(&mut conn, &ctx, &alpha, &manager, "Redesign");

    let duty = ProjectDutiesService::create(
        &mut conn,
        &ctx,
        CreateProjectDutyInput {
            project_id: redesign.id,
            title: "Wireframes".to_string(),
            description: None,
            status: DutyStatus::Todo,
            priority: DutyPriority::High,
            due_date: None,
        },
    )
    .unwrap();

    ProjectsService::delete(&mut conn, &ctx, redesign.id).unwrap();

    assert!(matches!(
        ProjectDutiesService::get(&mut conn, &ctx, duty.id),
        Err(AppError::NotFound { .. })
    ));
    let remaining = ProjectDutiesService::get_list(
        &mut conn,
        &ctx,
        ProjectDutyListInput {
            project_id: Some(redesign.id),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(remaining.total_count, 0);
}

#[test]
#[ignore = "requires database"]
fn test_owner_of_project_cannot_be_deleted() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    project(&mut conn, &ctx, &alpha, &manager, "Redesign");

    let err = TeamsService::delete(&mut conn, &ctx, alpha.id).unwrap_err();
    assert_eq!(err.code(), Some("REFERENCE_CONSTRAINT"));

    let err = ProjectManagersService::delete(&mut conn, &ctx, manager.id).unwrap_err();
    assert_eq!(err.code(), Some("REFERENCE_CONSTRAINT"));

    assert!(TeamsService::get(&mut conn, &ctx, alpha.id).is_ok());
    assert!(ProjectManagersService::get(&mut conn, &ctx, manager.id).is_ok());
}

#[test]
#[ignore = "requires database"]
fn test_paging_does_not_repeat_rows() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let prefix = unique("paging");
    for i in 0..5 {
        team(&mut conn, &ctx, &format!("{} {}", prefix, i));
    }

    let mut seen = HashSet::new();
    for skip in [0, 2, 4] {
        let page = TeamsService::get_list(
            &mut conn,
            &ctx,
            TeamListInput {
                keyword: Some(prefix.clone()),
                skip_count: Some(skip),
                max_result_count: Some(2),
            },
        )
        .unwrap();
        assert_eq!(page.total_count, 5);
        assert!(page.items.len() <= 2);
        for item in page.items {
            assert!(seen.insert(item.id), "row {} returned twice", item.id);
        }
    }
    assert_eq!(seen.len(), 5);
}

#[test]
#[ignore = "requires database"]
fn test_invalid_phase_inserts_nothing() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    let redesign = project(&mut conn, &ctx, &alpha, &manager, "Redesign");
    let timeline = TimelinesService::create(
        &mut conn,
        &ctx,
        TimelineInput {
            project_id: redesign.id,
            name: "Plan".to_string(),
        },
    )
    .unwrap();

    let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let err = TimelinePhasesService::create(
        &mut conn,
        &ctx,
        TimelinePhaseInput {
            timeline_id: timeline.id,
            name: "Design".to_string(),
            start_date: start,
            end_date: start - Duration::days(1),
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let phases = TimelinePhasesService::get_list(
        &mut conn,
        &ctx,
        TimelinePhaseListInput {
            timeline_id: Some(timeline.id),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(phases.total_count, 0);
}

#[test]
#[ignore = "requires database"]
fn test_missing_parent_is_not_found() {
    let mut conn = connection();
    let ctx = caller(&mut conn);
    let missing = Uuid::new_v4();

    let err = MilestonesService::create(
        &mut conn,
        &ctx,
        MilestoneInput {
            timeline_id: missing,
            title: "Kickoff".to_string(),
            description: None,
            due_date: Utc::now(),
            is_completed: false,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let milestones = MilestonesService::get_list(
        &mut conn,
        &ctx,
        MilestoneListInput {
            timeline_id: Some(missing),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(milestones.total_count, 0);

    let member = team_member(&mut conn, &ctx);
    let err = UserTeamsService::create(
        &mut conn,
        &ctx,
        UserTeamInput {
            team_id: missing,
            team_member_id: member.id,
            role: TeamRole::Member,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let memberships = UserTeamsService::get_list(
        &mut conn,
        &ctx,
        UserTeamListInput {
            team_member_id: Some(member.id),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(memberships.total_count, 0);

    let err = UserDutiesService::create(
        &mut conn,
        &ctx,
        UserDutyInput {
            project_duty_id: missing,
            team_member_id: member.id,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    // A project manager id never resolves as a team member.
    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    let redesign = project(&mut conn, &ctx, &alpha, &manager, "Redesign");
    let duty = ProjectDutiesService::create(
        &mut conn,
        &ctx,
        CreateProjectDutyInput {
            project_id: redesign.id,
            title: "Wireframes".to_string(),
            description: None,
            status: DutyStatus::Todo,
            priority: DutyPriority::Low,
            due_date: None,
        },
    )
    .unwrap();

    let err = UserTeamsService::create(
        &mut conn,
        &ctx,
        UserTeamInput {
            team_id: alpha.id,
            team_member_id: manager.id,
            role: TeamRole::Member,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = UserDutiesService::create(
        &mut conn,
        &ctx,
        UserDutyInput {
            project_duty_id: duty.id,
            team_member_id: manager.id,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let assignments = UserDutiesService::get_list(
        &mut conn,
        &ctx,
        UserDutyListInput {
            project_duty_id: Some(duty.id),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(assignments.total_count, 0);
}

#[test]
#[ignore = "requires database"]
fn test_duty_assignment_notifies_member() {
    let mut conn = connection();
    let ctx = caller(&mut conn);

    let alpha = team(&mut conn, &ctx, "Alpha");
    let manager = project_manager(&mut conn, &ctx);
    let redesign = project(&mut conn, &ctx, &alpha, &manager, "Redesign");
    let member = team_member(&mut conn, &ctx);
    let duty = ProjectDutiesService::create(
        &mut conn,
        &ctx,
        CreateProjectDutyInput {
            project_id: redesign.id,
            title: "Wireframes".to_string(),
            description: None,
            status: DutyStatus::Todo,
            priority: DutyPriority::Medium,
            due_date: None,
        },
    )
    .unwrap();

    UserDutiesService::create(
        &mut conn,
        &ctx,
        UserDutyInput {
            project_duty_id: duty.id,
            team_member_id: member.id,
        },
    )
    .unwrap();

    let member_ctx = RequestContext::new(member.user_id, ctx.settings);
    let unread = NotificationsService::get_unread_count(&mut conn, &member_ctx).unwrap();
    assert_eq!(unread.count, 1);

    let marked = NotificationsService::mark_all_as_read(&mut conn, &member_ctx).unwrap();
    assert_eq!(marked.count, 1);
    let unread = NotificationsService::get_unread_count(&mut conn, &member_ctx).unwrap();
    assert_eq!(unread.count, 0);
}

#[test]
#[ignore = "requires database"]
fn test_only_author_edits_comment() {
    let mut conn = connection();
    let author = caller(&mut conn);
    let other = caller(&mut conn);

    let alpha = team(&mut conn, &author, "Alpha");
    let comment = CommentsService::create(
        &mut conn,
        &author,
        CreateCommentInput {
            entity_type: EntityKind::Team,
            entity_id: alpha.id,
            content: "Welcome aboard".to_string(),
        },
    )
    .unwrap();

    let err = CommentsService::update(
        &mut conn,
        &other,
        comment.id,
        UpdateCommentInput {
            content: "Hijacked".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    CommentsService::delete(&mut conn, &author, comment.id).unwrap();
    assert!(matches!(
        CommentsService::get(&mut conn, &author, comment.id),
        Err(AppError::NotFound { .. })
    ));

    let err = CommentsService::create(
        &mut conn,
        &author,
        CreateCommentInput {
            entity_type: EntityKind::Project,
            entity_id: Uuid::new_v4(),
            content: "Nobody home".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
