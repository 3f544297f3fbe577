use diesel::pg::Pg;
use diesel::prelude::*;

use super::{Page, like_pattern};
use crate::db::enums::PersonType;
use crate::db::models::person::{NewPerson, Person, PersonChangeset, PersonListInput};

pub struct PersonRepo;

impl PersonRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_person: &NewPerson,
    ) -> Result<Person, diesel::result::Error> {
        diesel::insert_into(crate::schema::persons::table)
            .values(new_person)
            .returning(Person::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        person_id: uuid::Uuid,
    ) -> Result<Option<Person>, diesel::result::Error> {
        use crate::schema::persons::dsl::*;
        persons
            .filter(id.eq(person_id))
            .select(Person::as_select())
            .first(conn)
            .optional()
    }

    /// Finds a person only if it is of the requested subtype.
    pub fn find_by_id_and_type(
        conn: &mut PgConnection,
        person_id: uuid::Uuid,
        kind: PersonType,
    ) -> Result<Option<Person>, diesel::result::Error> {
        use crate::schema::persons::dsl::*;
        persons
            .filter(id.eq(person_id))
            .filter(person_type.eq(kind))
            .select(Person::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_with_type(
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

    pub fn update(
        conn: &mut PgConnection,
        person_id: uuid::Uuid,
        changes: &PersonChangeset,
    ) -> Result<Person, diesel::result::Error> {
        use crate::schema::persons::dsl::*;
        diesel::update(persons.filter(id.eq(person_id)))
            .set(changes)
            .returning(Person::as_returning())
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        person_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::persons::dsl::*;
        diesel::delete(persons.filter(id.eq(person_id))).execute(conn)
    }

    fn filtered(
        kind: PersonType,
        filter: &PersonListInput,
    ) -> crate::schema::persons::BoxedQuery<'static, Pg> {
        use crate::schema::persons::dsl::*;
        let mut query = persons.filter(person_type.eq(kind)).into_boxed();

        if let Some(pattern) = like_pattern(filter.keyword.as_deref()) {
            query = query.filter(
                first_name
                    .ilike(pattern.clone())
                    .or(last_name.ilike(pattern.clone()))
                    .or(email.ilike(pattern)),
            );
        }
        if let Some(r) = filter.role {
            query = query.filter(role.eq(r));
        }
        query
    }

    /// One page of persons of `kind` plus the total number of matches.
    pub fn list(
        conn: &mut PgConnection,
        kind: PersonType,
        filter: &PersonListInput,
        page: Page,
    ) -> Result<(Vec<Person>, i64), diesel::result::Error> {
        use crate::schema::persons::dsl::*;
        let total = Self::filtered(kind, filter)
            .count()
            .get_result::<i64>(conn)?;
        let items = Self::filtered(kind, filter)
            .order((created_at.asc(), id.asc()))
            .offset(page.offset)
            .limit(page.limit)
            .select(Person::as_select())
            .load(conn)?;
        Ok((items, total))
    }
}
