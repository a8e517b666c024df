use anyhow::Context;
use axum::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::doc,
    options::ClientOptions,
    Client, Collection, Database,
};
use tracing::{info, instrument};

use crate::users::repo_types::{NewUser, UserChanges, UserId, UserRecord};

/// Data access for the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user and returns the id the store assigned.
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserId>;

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<UserRecord>>;

    /// First user whose username or email equals `login`.
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<UserRecord>>;

    async fn list(&self) -> anyhow::Result<Vec<UserRecord>>;

    /// Applies `changes` in one write. Returns `false` when no document has that id.
    async fn update(&self, id: UserId, changes: UserChanges) -> anyhow::Result<bool>;

    /// Removes every user and returns how many were removed.
    async fn delete_all(&self) -> anyhow::Result<u64>;

    /// Returns `false` when no document has that id.
    async fn delete(&self, id: UserId) -> anyhow::Result<bool>;
}

pub struct MongoUserStore {
    users: Collection<UserRecord>,
}

impl MongoUserStore {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection::<UserRecord>(Self::COLLECTION),
        }
    }

    /// Connects and pings the database so a bad URI fails at startup.
    pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("parse MONGO_URI")?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options).context("build mongodb client")?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .context("ping mongodb")?;

        info!(database, collection = Self::COLLECTION, "connected to mongodb");
        Ok(Self::new(&db))
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    #[instrument(skip(self, user))]
    async fn insert(&self, user: NewUser) -> anyhow::Result<UserId> {
        let result = self
            .users
            .clone_with_type::<NewUser>()
            .insert_one(&user)
            .await
            .context("insert user")?;
        let id = result
            .inserted_id
            .as_object_id()
            .context("store returned a non-ObjectId _id")?;
        Ok(UserId::from(id))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<UserRecord>> {
        let user = self
            .users
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .context("find user by id")?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_login(&self, login: &str) -> anyhow::Result<Option<UserRecord>> {
        let filter = doc! { "$or": [ { "username": login }, { "email": login } ] };
        let user = self
            .users
            .find_one(filter)
            .await
            .context("find user by username or email")?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> anyhow::Result<Vec<UserRecord>> {
        let cursor = self.users.find(doc! {}).await.context("list users")?;
        let users: Vec<UserRecord> = cursor.try_collect().await.context("read users cursor")?;
        Ok(users)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: UserId, changes: UserChanges) -> anyhow::Result<bool> {
        let result = self
            .users
            .update_one(
                doc! { "_id": id.as_object_id() },
                doc! { "$set": changes.to_document() },
            )
            .await
            .context("update user")?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> anyhow::Result<u64> {
        let result = self
            .users
            .delete_many(doc! {})
            .await
            .context("delete all users")?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> anyhow::Result<bool> {
        let result = self
            .users
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .context("delete user")?;
        Ok(result.deleted_count == 1)
    }
}
