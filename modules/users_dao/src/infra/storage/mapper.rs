//! Row → domain mapping shared by every read of the `user` table.

use sea_orm::{DbErr, FromQueryResult, QueryResult, Value};

use crate::contract::model::{User, UserProfile};

impl FromQueryResult for User {
    fn from_query_result(row: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(User {
            id: Some(row.try_get(pre, "id")?),
            login: row.try_get(pre, "login")?,
            password: row.try_get(pre, "password")?,
            user_name: row.try_get(pre, "user_name")?,
            email: row.try_get(pre, "email")?,
            active: row.try_get(pre, "active")?,
            user_profile: profile_from_row(row, pre)?,
        })
    }
}

fn profile_from_row(row: &QueryResult, pre: &str) -> Result<UserProfile, DbErr> {
    Ok(UserProfile {
        id: row.try_get(pre, "profile_id")?,
        profile_info: row.try_get(pre, "profile_info")?,
    })
}

/// The seven writable columns in bind order:
/// login, password, user_name, email, profile_id, profile_info, active.
pub fn column_values(user: &User) -> Vec<Value> {
    vec![
        user.login.clone().into(),
        user.password.clone().into(),
        user.user_name.clone().into(),
        user.email.clone().into(),
        user.user_profile.id.into(),
        user.user_profile.profile_info.clone().into(),
        user.active.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_values_follow_bind_order() {
        let u = User::new(
            "abc",
            "123",
            "Alice",
            "a@x.com",
            true,
            UserProfile::new(1, "admin"),
        );
        let values = column_values(&u);
        assert_eq!(
            values,
            vec![
                Value::from("abc".to_string()),
                Value::from("123".to_string()),
                Value::from("Alice".to_string()),
                Value::from("a@x.com".to_string()),
                Value::from(1i32),
                Value::from("admin".to_string()),
                Value::from(true),
            ]
        );
    }
}
