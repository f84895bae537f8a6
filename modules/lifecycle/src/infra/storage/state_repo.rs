use anyhow::Context;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use crate::contract::model::State;
use crate::domain::store::{StateRepository, StoreError};
use crate::infra::storage::entity::state::{ActiveModel as StateAM, Column, Entity as StateEntity};
use crate::infra::storage::sea_orm_store::map_db_err;

pub struct SeaOrmStateRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmStateRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> StateRepository for SeaOrmStateRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<State>, StoreError> {
        let rows = StateEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("list states failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, label: &str, description: Option<&str>) -> Result<State, StoreError> {
        let now = Utc::now();
        let m = StateAM {
            id: NotSet,
            label: Set(label.to_string()),
            description: Set(description.map(str::to_string)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = m
            .insert(&self.conn)
            .await
            .map_err(|e| map_db_err(e, "insert state failed"))?;
        Ok(created.into())
    }
}
