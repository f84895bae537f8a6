//! SeaORM-backed `EntityStore` shared by every entity type.
//!
//! Generic over `C: ConnectionTrait`, so it can be built with a
//! `DatabaseConnection` or a transaction.

use std::marker::PhantomData;

use anyhow::Context;
use fleetdesk_db::errors::is_unique_violation;
use fleetdesk_db::search::{paginate_search, SearchError, SearchSpec};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter,
};
use search_core::{resolve_page_size, Page, PageLimits, SearchQuery};
use uuid::Uuid;

use crate::domain::entity::LifecycleEntity;
use crate::domain::store::{EntityStore, SearchScope, StoreError};

/// Binds a domain entity to its SeaORM table.
pub trait StoredEntity: LifecycleEntity {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + Send;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// `None` for stateless tables.
    fn state_column() -> Option<<Self::Entity as EntityTrait>::Column>;

    fn search_spec() -> SearchSpec<Self::Entity>;

    fn from_model(model: <Self::Entity as EntityTrait>::Model) -> Self;

    fn to_active_model(&self) -> Self::ActiveModel;
}

pub struct SeaOrmStore<T, C>
where
    T: StoredEntity,
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
    spec: SearchSpec<T::Entity>,
    limits: PageLimits,
    _entity: PhantomData<fn() -> T>,
}

impl<T, C> SeaOrmStore<T, C>
where
    T: StoredEntity,
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C, limits: PageLimits) -> Self {
        Self {
            conn,
            spec: T::search_spec(),
            limits,
            _entity: PhantomData,
        }
    }
}

pub(crate) fn map_db_err(err: DbErr, context: &'static str) -> StoreError {
    if is_unique_violation(&err) {
        return StoreError::UniqueViolation(err.to_string());
    }
    StoreError::Backend(anyhow::Error::new(err).context(context))
}

fn map_search_err(err: SearchError) -> StoreError {
    match err {
        SearchError::Query(e) => StoreError::Query(e),
        SearchError::Db(e) => map_db_err(e, "search failed"),
    }
}

#[async_trait::async_trait]
impl<T, C> EntityStore<T> for SeaOrmStore<T, C>
where
    T: StoredEntity,
    <T::Entity as EntityTrait>::Model: IntoActiveModel<T::ActiveModel> + Sync,
    <T::Entity as EntityTrait>::Column: ColumnTrait + Copy,
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, entity: T) -> Result<(), StoreError> {
        T::Entity::insert(entity.to_active_model())
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| map_db_err(e, "insert failed"))?;
        Ok(())
    }

    async fn update(&self, entity: T) -> Result<bool, StoreError> {
        let res = T::Entity::update_many()
            .set(entity.to_active_model())
            .filter(T::id_column().eq(entity.id()))
            .exec(&self.conn)
            .await
            .map_err(|e| map_db_err(e, "update failed"))?;
        Ok(res.rows_affected > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let found = T::Entity::find()
            .filter(T::id_column().eq(id))
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(T::from_model))
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let rows = T::Entity::find()
            .all(&self.conn)
            .await
            .context("find_all failed")?;
        Ok(rows.into_iter().map(T::from_model).collect())
    }

    async fn find_by_state(&self, state_id: i64) -> Result<Vec<T>, StoreError> {
        let Some(state_col) = T::state_column() else {
            return Ok(Vec::new());
        };
        let rows = T::Entity::find()
            .filter(state_col.eq(state_id))
            .all(&self.conn)
            .await
            .context("find_by_state failed")?;
        Ok(rows.into_iter().map(T::from_model).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = T::Entity::delete_many()
            .filter(T::id_column().eq(id))
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn search(
        &self,
        query: &SearchQuery,
        scope: SearchScope,
    ) -> Result<Page<T>, StoreError> {
        let mut select = T::Entity::find();
        if let SearchScope::State(state_id) = scope {
            match T::state_column() {
                Some(col) => select = select.filter(col.eq(state_id)),
                None => {
                    let size = resolve_page_size(query.page_size, self.limits)?;
                    return Ok(Page::empty(query.page, size, 0));
                }
            }
        }

        paginate_search(
            select,
            &self.conn,
            query,
            &self.spec,
            self.limits,
            T::from_model,
        )
        .await
        .map_err(map_search_err)
    }
}
