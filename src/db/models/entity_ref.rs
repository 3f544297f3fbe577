use crate::db::enums::EntityKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Polymorphic pointer used by comments, notifications and activity logs.
/// There is no foreign key behind it; existence is checked per kind by
/// `EntityRefRepo::exists`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Uuid,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_kind_and_id() {
        let id = Uuid::nil();
        let r = EntityRef::new(EntityKind::Milestone, id);
        assert_eq!(r.to_string(), format!("Milestone:{}", id));
    }
}
