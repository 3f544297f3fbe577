use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Declares an enum persisted as its variant name in a text column.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
        #[diesel(sql_type = Text)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("Unrecognized {} value: {}", stringify!($name), s))
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
                let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
                s.parse::<$name>().map_err(Into::into)
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }
    };
}

text_enum! {
    /// Discriminator of the shared `persons` table.
    PersonType { TeamMember, ProjectManager }
}

text_enum! {
    /// Job role of a team member.
    MemberRole { Developer, Designer, Tester, Analyst, Other }
}

text_enum! {
    /// Role of a member inside one team.
    TeamRole { Member, Lead }
}

text_enum! {
    DutyStatus { Todo, InProgress, Review, Done }
}

text_enum! {
    DutyPriority { Low, Medium, High, Critical }
}

text_enum! {
    NotificationType { Info, DutyAssigned, TeamUpdate, CommentAdded, MilestoneDue }
}

text_enum! {
    /// Tag of a polymorphic `(entity_type, entity_id)` reference.
    EntityKind {
        Project, ProjectDuty, Team, Timeline, TimelinePhase, Milestone, Document, Comment,
        TeamMember, ProjectManager,
    }
}

impl Default for DutyStatus {
    fn default() -> Self {
        DutyStatus::Todo
    }
}

impl Default for DutyPriority {
    fn default() -> Self {
        DutyPriority::Medium
    }
}

impl Default for TeamRole {
    fn default() -> Self {
        TeamRole::Member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_variant_names_case_insensitively() {
        assert_eq!("InProgress".parse::<DutyStatus>(), Ok(DutyStatus::InProgress));
        assert_eq!("inprogress".parse::<DutyStatus>(), Ok(DutyStatus::InProgress));
        assert_eq!("projectduty".parse::<EntityKind>(), Ok(EntityKind::ProjectDuty));
        assert!("in_progress".parse::<DutyStatus>().is_err());
    }

    #[test]
    fn entity_kind_names_fit_the_entity_type_column() {
        assert!(EntityKind::ALL.iter().all(|k| k.as_str().len() <= 50));
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&NotificationType::DutyAssigned).unwrap();
        assert_eq!(json, "\"DutyAssigned\"");
        let back: PersonType = serde_json::from_str("\"ProjectManager\"").unwrap();
        assert_eq!(back, PersonType::ProjectManager);
    }
}
