use diesel::prelude::*;

use crate::db::enums::{EntityKind, PersonType};
use crate::db::models::entity_ref::EntityRef;

/// Existence checks for polymorphic `(entity_type, entity_id)` references,
/// which have no foreign key behind them.
pub struct EntityRefRepo;

impl EntityRefRepo {
    pub fn exists(
        conn: &mut PgConnection,
        target: EntityRef,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema;
        use diesel::dsl::exists;

        let id = target.id;
        match target.kind {
            EntityKind::Project => diesel::select(exists(
                schema::projects::table.filter(schema::projects::id.eq(id)),
            ))
            .get_result(conn),
            EntityKind::ProjectDuty => diesel::select(exists(
                schema::project_duties::table.filter(schema::project_duties::id.eq(id)),
            ))
            .get_result(conn),
            EntityKind::Team => {
                diesel::select(exists(schema::teams::table.filter(schema::teams::id.eq(id))))
                    .get_result(conn)
            }
            EntityKind::Timeline => diesel::select(exists(
                schema::timelines::table.filter(schema::timelines::id.eq(id)),
            ))
            .get_result(conn),
            EntityKind::TimelinePhase => diesel::select(exists(
                schema::timeline_phases::table.filter(schema::timeline_phases::id.eq(id)),
            ))
            .get_result(conn),
            EntityKind::Milestone => diesel::select(exists(
                schema::milestones::table.filter(schema::milestones::id.eq(id)),
            ))
            .get_result(conn),
            EntityKind::Document => diesel::select(exists(
                schema::documents::table.filter(schema::documents::id.eq(id)),
            ))
            .get_result(conn),
            EntityKind::Comment => diesel::select(exists(
                schema::comments::table
                    .filter(schema::comments::id.eq(id))
                    .filter(schema::comments::is_deleted.eq(false)),
            ))
            .get_result(conn),
            EntityKind::TeamMember => Self::person_exists(conn, id, PersonType::TeamMember),
            EntityKind::ProjectManager => Self::person_exists(conn, id, PersonType::ProjectManager),
        }
    }

    fn person_exists(
        conn: &mut PgConnection,
        person_id: uuid::Uuid,
        kind: PersonType,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::persons::dsl::*;
        diesel::select(diesel::dsl::exists(
            persons
                .filter(id.eq(person_id))
                .filter(person_type.eq(kind)),
        ))
        .get_result(conn)
    }
}
