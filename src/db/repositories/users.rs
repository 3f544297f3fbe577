use diesel::prelude::*;

use crate::db::models::auth::{NewUser, User};

pub struct UserRepo;

impl UserRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(id.eq(user_id))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    /// Login lookup: matches either the user name or the email address.
    pub fn find_by_user_name_or_email(
        conn: &mut PgConnection,
        login: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(user_name.eq(login).or(email.eq(login)))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn exists_by_user_name(
        conn: &mut PgConnection,
        target_user_name: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(user_name.eq(target_user_name))))
            .get_result(conn)
    }

    pub fn exists_by_email(
        conn: &mut PgConnection,
        target_email: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(users.filter(email.eq(target_email))))
            .get_result(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    }

    /// Keeps the login identity in step with the person's profile.
    pub fn update_profile(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
        new_email: &str,
        new_name: &str,
        new_surname: &str,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set((
                email.eq(new_email),
                name.eq(new_name),
                surname.eq(new_surname),
                updated_at.eq(chrono::Utc::now()),
            ))
            .execute(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        user_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::delete(users.filter(id.eq(user_id))).execute(conn)
    }
}
