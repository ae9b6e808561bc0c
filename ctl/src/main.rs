use clap::{Parser, Subcommand};
use eventbook_db::storage::mongodb::{MongoDBConfig, MongoDBStorage};

use crate::commands::CreateUserParams;

mod commands;

#[derive(Parser)]
pub struct Args {
    #[clap(subcommand)]
    command: Command,

    #[clap(
        short = 'D',
        long,
        env = "EVENTBOOK_MONGODB_URI",
        default_value = "mongodb://localhost:27017/eventbook"
    )]
    db_url: String,

    #[clap(long, env = "MONGO_USER")]
    mongo_user: Option<String>,

    #[clap(long, env = "MONGO_PASSWORD", hide_env_values = true)]
    mongo_password: Option<String>,

    #[clap(long, env = "MONGO_DB")]
    mongo_db: Option<String>,
}

#[derive(Clone, Subcommand)]
pub enum Command {
    /// Register a user, optionally under a fixed id.
    #[command(name = "create-user")]
    CreateUser(CreateUserParams),

    /// Check that the store is reachable.
    #[command(name = "ping")]
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let stg = MongoDBStorage::connect(&MongoDBConfig {
        uri: args.db_url,
        username: args.mongo_user,
        password: args.mongo_password,
        database: args.mongo_db,
    })
    .await?;

    match args.command {
        Command::CreateUser(params) => {
            let user = commands::create_user(&stg, params).await?;
            println!("Created {user}");
        }
        Command::Ping => {
            commands::ping(&stg).await?;
            println!("MongoDB is reachable");
        }
    }

    Ok(())
}
