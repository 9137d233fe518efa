use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};

use healer_core::catalog::Catalog;
use healer_core::config::HealerConfig;
use healer_core::error::{HealerError, HealerResult};

/// Handle on a MongoDB deployment. Cheap to clone.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect with the configured URI, credentials and timeout, then ping.
    pub async fn connect(config: &HealerConfig) -> HealerResult<Self> {
        tracing::info!(
            uri = %redact_uri(config.connection_string()),
            timeout = ?config.connect_timeout(),
            "Connecting to MongoDB"
        );

        let mut options = ClientOptions::parse(config.connection_string())
            .await
            .map_err(|e| {
                HealerError::Connection(anyhow::anyhow!("Invalid MongoDB connection string: {e}"))
            })?;
        options.app_name = Some("healerdb".to_string());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        if let Some((username, password)) = config.credentials() {
            let mut credential = Credential::default();
            credential.username = Some(username.to_string());
            credential.password = password.map(str::to_string);
            options.credential = Some(credential);
        }

        let client = Client::with_options(options).map_err(|e| {
            HealerError::Connection(anyhow::anyhow!("MongoDB client creation failed: {e}"))
        })?;

        let store = Self { client };
        store.ping().await?;
        tracing::info!("Connected to MongoDB");
        Ok(store)
    }

    pub async fn ping(&self) -> HealerResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| HealerError::Connection(anyhow::anyhow!("MongoDB ping failed: {e}")))?;
        tracing::debug!("Pinged MongoDB");
        Ok(())
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("Disconnected from MongoDB");
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn db(&self, database: &str) -> Database {
        self.client.database(database)
    }

    pub(crate) fn coll(&self, database: &str, collection: &str) -> Collection<Document> {
        self.client.database(database).collection::<Document>(collection)
    }
}

#[async_trait]
impl Catalog for MongoStore {
    async fn database_names(&self) -> HealerResult<Vec<String>> {
        self.list_databases().await
    }

    async fn collection_names(&self, database: &str) -> HealerResult<Vec<String>> {
        self.list_collections(database).await
    }

    async fn create_database(&self, database: &str) -> HealerResult<()> {
        MongoStore::create_database(self, database).await
    }

    async fn drop_database(&self, database: &str) -> HealerResult<()> {
        MongoStore::drop_database(self, database).await
    }

    async fn create_collection(&self, database: &str, collection: &str) -> HealerResult<()> {
        MongoStore::create_collection(self, database, collection).await
    }

    async fn drop_collection(&self, database: &str, collection: &str) -> HealerResult<()> {
        MongoStore::drop_collection(self, database, collection).await
    }
}

/// Hide the userinfo part of a connection string before logging it.
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let host_end = rest.find('/').unwrap_or(rest.len());
    match rest[..host_end].rfind('@') {
        Some(at) => format!("{}***@{}", &uri[..scheme_end + 3], &rest[at + 1..]),
        None => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_uri() {
        assert_eq!(
            redact_uri("mongodb://healer:pw@db:27017/enum"),
            "mongodb://***@db:27017/enum"
        );
        assert_eq!(redact_uri("mongodb://localhost:27017"), "mongodb://localhost:27017");
        assert_eq!(redact_uri("not a uri"), "not a uri");
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let config =
            HealerConfig::from_yaml_str("healerdb:\n  connstr: \"http://localhost\"\n").unwrap();
        match MongoStore::connect(&config).await {
            Err(HealerError::Connection(e)) => {
                assert!(e.to_string().contains("Invalid MongoDB connection string"))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("connected with a malformed URI"),
        }
    }
}
