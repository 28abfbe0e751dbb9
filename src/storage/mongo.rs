use crate::config::DatabaseConfig;
use crate::domain::user::User;
use crate::storage::records::UserDocument;
use crate::storage::{Result, StorageError, UserStore, within};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};

#[derive(Clone, Debug)]
pub struct MongoUserStore {
    client: Client,
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Builds the driver client for the configured deployment.
    ///
    /// Parsing a `mongodb+srv://` string resolves DNS records, so the call is
    /// bounded by the connect timeout. The driver otherwise connects lazily and
    /// an unreachable server only surfaces on the first operation (see
    /// [`UserStore::ping`]).
    ///
    /// # Errors
    /// Returns a `StorageError` if the connection string cannot be parsed or
    /// resolved within the connect timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let resolve = async { Client::with_uri_str(&config.url).await.map_err(StorageError::from) };
        let client = within(config.connect_timeout(), resolve).await?;
        let collection = client.database(&config.name).collection::<UserDocument>(&config.collection);

        Ok(Self { client, collection })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: &User) -> Result<()> {
        self.collection.insert_one(UserDocument::from(user)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        document.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let documents: Vec<UserDocument> =
            self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?.try_collect().await?;

        documents.into_iter().map(User::try_from).collect()
    }

    async fn ping(&self) -> Result<()> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
