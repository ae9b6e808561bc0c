use clap::Parser;
use eventbook_db::storage::mongodb::MongoDBConfig;
use std::net::SocketAddr;

/// The identity every request acts as until callers can identify themselves.
pub const DEFAULT_CREATOR_ID: &str = "676d34a7e7675c4abb68bf51";

#[derive(Clone, Parser)]
pub struct EventbookApiConfig {
    #[clap(
        short,
        long,
        env = "EVENTBOOK_BIND_ADDR",
        default_value = "0.0.0.0:3000"
    )]
    pub bind_addr: SocketAddr,

    /// Origin allowed to call the API from a browser.
    #[clap(
        long,
        env = "EVENTBOOK_PUBLIC_URL",
        default_value = "http://localhost:3000"
    )]
    pub public_url: String,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    /// Print the GraphQL schema in SDL form and exit.
    #[clap(long, default_value_t = false)]
    pub dump_schema: bool,

    /// Do not serve the GraphiQL console on `GET /graphql`.
    #[clap(long, default_value_t = false)]
    pub no_graphiql: bool,

    /// MongoDB deployment to connect to. Credentials and database are
    /// layered on top from `mongo_user`, `mongo_password` and `mongo_db`.
    #[clap(
        long,
        env = "EVENTBOOK_MONGODB_HOST",
        default_value = "mongodb://localhost:27017"
    )]
    pub mongodb_host: String,

    /// Complete connection string. Replaces `mongodb_host` when set.
    #[clap(long, env = "EVENTBOOK_MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    #[clap(long, env = "MONGO_USER")]
    pub mongo_user: Option<String>,

    #[clap(long, env = "MONGO_PASSWORD", hide_env_values = true)]
    pub mongo_password: Option<String>,

    #[clap(long, env = "MONGO_DB")]
    pub mongo_db: Option<String>,

    /// Store id of the user that created events are attributed to.
    #[clap(long, env = "EVENTBOOK_CREATOR_ID", default_value = DEFAULT_CREATOR_ID)]
    pub creator_id: String,
}

impl EventbookApiConfig {
    /// Combine the store parameters into a single connection target.
    pub fn store_config(&self) -> MongoDBConfig {
        MongoDBConfig {
            uri: self
                .mongodb_uri
                .clone()
                .unwrap_or_else(|| self.mongodb_host.clone()),
            username: self.mongo_user.clone().filter(|u| !u.is_empty()),
            password: self.mongo_password.clone(),
            database: self.mongo_db.clone().filter(|d| !d.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> EventbookApiConfig {
        let mut argv = vec!["eventbook-api"];
        argv.extend_from_slice(args);
        EventbookApiConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.creator_id, DEFAULT_CREATOR_ID);
        assert!(!config.no_graphiql);
    }

    #[test]
    fn test_store_config_from_parts() {
        let config = parse(&[
            "--mongodb-host",
            "mongodb+srv://cluster0.example.mongodb.net",
            "--mongo-user",
            "admin",
            "--mongo-password",
            "hunter2",
            "--mongo-db",
            "events",
        ]);

        let store = config.store_config();
        assert_eq!(store.uri, "mongodb+srv://cluster0.example.mongodb.net");
        assert_eq!(store.username.as_deref(), Some("admin"));
        assert_eq!(store.password.as_deref(), Some("hunter2"));
        assert_eq!(store.database.as_deref(), Some("events"));
    }

    #[test]
    fn test_store_config_uri_replaces_host() {
        let config = parse(&[
            "--mongodb-host",
            "mongodb://ignored:27017",
            "--mongodb-uri",
            "mongodb://db.internal:27017/prod",
        ]);

        assert_eq!(config.store_config().uri, "mongodb://db.internal:27017/prod");
    }

    #[test]
    fn test_store_config_ignores_blank_parts() {
        let config = parse(&["--mongo-user", "", "--mongo-db", ""]);

        let store = config.store_config();
        assert_eq!(store.username, None);
        assert_eq!(store.database, None);
    }
}
