use clap::Parser;
use eventbook_db::{
    models::DbUser,
    password::hash_password,
    storage::{UserStore, parse_object_id},
};
use thiserror::Error;

#[derive(Clone, Parser)]
pub struct CreateUserParams {
    #[clap(short, long)]
    pub email: String,

    #[clap(short, long)]
    pub password: String,

    /// Store the user under this id instead of a generated one, e.g. to
    /// seed the user that API requests act as.
    #[clap(long)]
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("A user with email {0} exists already")]
    EmailTaken(String),

    #[error("A user with id {0} exists already")]
    IdTaken(String),
}

pub async fn create_user(
    stg: &impl UserStore,
    CreateUserParams {
        email,
        password,
        id,
    }: CreateUserParams,
) -> anyhow::Result<DbUser> {
    let id = id.as_deref().map(parse_object_id).transpose()?;

    if UserStore::get_by_email(stg, &email).await?.is_some() {
        return Err(CreateUserError::EmailTaken(email).into());
    }

    if let Some(id) = id {
        if UserStore::get(stg, id).await?.is_some() {
            return Err(CreateUserError::IdTaken(id.to_hex()).into());
        }
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let mut user = DbUser::new(email, password_hash);
    user.id = id;

    let new_user = UserStore::create(stg, user).await?;
    Ok(new_user)
}
