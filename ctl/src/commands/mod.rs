mod create_user;

pub use create_user::*;

use eventbook_db::storage::Storage;

pub async fn ping(stg: &impl Storage) -> anyhow::Result<()> {
    stg.ping().await?;
    Ok(())
}
