use eventbook_common::{params::UserInput, views::User};
use eventbook_db::{
    models::DbUser,
    password::hash_password,
    storage::{Storage, UserStore},
};
use tracing::{info, instrument};

use crate::error::ApiError;

/// Register a user unless one with the same email already exists.
///
/// The existence check and the insert are separate store calls, so two
/// concurrent registrations for one email can both get through.
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_user(db: &dyn Storage, input: UserInput) -> Result<User, ApiError> {
    // 1. Refuse known emails
    if UserStore::get_by_email(db, &input.email).await?.is_some() {
        return Err(ApiError::UserExists);
    }

    // 2. Hash the password
    let password_hash = hash(input.password).await?;

    // 3. Persist the user
    let created = UserStore::create(db, DbUser::new(input.email, password_hash)).await?;

    info!(user_id = ?created.id, "User registered");

    // 4. Hand it back without the digest
    Ok(created.into())
}

async fn hash(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(anyhow::Error::from)?
        .map_err(ApiError::from)
}
