use serde::Deserialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Form body shared by the signup and login pages.
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}
