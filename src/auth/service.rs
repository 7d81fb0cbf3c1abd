use crate::{
    auth::{hash_password, pw::verify_dummy, verify_password},
    database::{users, DbPool},
    errors::{AppError, Result},
    models::User,
};

/// Register a new user. Fails with `DuplicateUsername` when the name is taken,
/// including when a concurrent signup wins the race to the UNIQUE constraint.
pub async fn signup(pool: &DbPool, username: &str, password: &str) -> Result<User> {
    if users::find_by_username(pool, username).await?.is_some() {
        return Err(AppError::duplicate_username(username));
    }

    let password_hash = hash_password(password)?;

    match users::create_user(pool, username, &password_hash).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "user signed up");
            Ok(user)
        }
        Err(e) if is_unique_violation(&e) => Err(AppError::duplicate_username(username)),
        Err(e) => Err(AppError::database(format!("Failed to create user: {}", e))),
    }
}

/// Check a username/password pair. Unknown users and wrong passwords get the
/// same error after the same amount of hashing work.
pub async fn login(pool: &DbPool, username: &str, password: &str) -> Result<User> {
    let Some(user) = users::find_by_username(pool, username).await? else {
        verify_dummy(password)?;
        tracing::info!(username = %username, "login failed, unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::info!(username = %username, "login failed, wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(user)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}
