//! Free-text search + offset pagination over SeaORM selects.
//!
//! Each entity declares a [`SearchSpec`]: the columns a term is matched against
//! (own columns and columns of entities reached by one join hop), the columns a
//! caller may sort by, the default sort column and a unique tiebreaker.
//! Matching is a case-insensitive substring test, OR-combined across columns.
//!
//! Searchable columns must hold text already folded with [`search_core::fold_case`];
//! the term is folded the same way and compared with a plain `LIKE`, so matching
//! does not depend on how the backend lowercases non-ASCII text.

use std::collections::HashMap;

use sea_orm::{
    sea_query::{Expr, LikeExpr, Order, SimpleExpr},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, IdenStatic, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationDef, Select,
};
use search_core::{page_offset, resolve_page_size, Page, PageInfo, PageLimits, SearchQuery, SortDir};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Query(#[from] search_core::Error),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

/// A searchable column that lives on a related entity, reached by one join.
#[derive(Clone)]
pub struct JoinedColumn {
    relation: fn() -> RelationDef,
    column: SimpleExpr,
}

#[derive(Clone)]
pub struct SearchSpec<E: EntityTrait> {
    columns: Vec<E::Column>,
    joined: Vec<JoinedColumn>,
    sortable: HashMap<String, E::Column>,
    default_sort: E::Column,
    tiebreaker: E::Column,
}

impl<E> SearchSpec<E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// `default_sort` is the primary label column; `tiebreaker` must be unique (the primary key).
    pub fn new(default_sort: (&str, E::Column), tiebreaker: E::Column) -> Self {
        let mut sortable = HashMap::new();
        sortable.insert(default_sort.0.to_lowercase(), default_sort.1);
        Self {
            columns: Vec::new(),
            joined: Vec::new(),
            sortable,
            default_sort: default_sort.1,
            tiebreaker,
        }
    }

    #[must_use]
    pub fn search(mut self, col: E::Column) -> Self {
        self.columns.push(col);
        self
    }

    /// Match the term against `col` of the entity `R` reached through `relation`.
    #[must_use]
    pub fn search_joined<R>(mut self, relation: fn() -> RelationDef, col: R::Column) -> Self
    where
        R: EntityTrait,
    {
        self.joined.push(JoinedColumn {
            relation,
            column: Expr::col((R::default(), col)).into(),
        });
        self
    }

    #[must_use]
    pub fn sortable(mut self, api_name: &str, col: E::Column) -> Self {
        self.sortable.insert(api_name.to_lowercase(), col);
        self
    }

    pub fn has_searchable_fields(&self) -> bool {
        !self.columns.is_empty() || !self.joined.is_empty()
    }

    fn resolve_sort(&self, query: &SearchQuery) -> Result<(E::Column, SortDir), search_core::Error> {
        match &query.sort {
            None => Ok((self.default_sort, SortDir::Asc)),
            Some(key) => self
                .sortable
                .get(&key.field.to_lowercase())
                .map(|col| (*col, key.dir))
                .ok_or_else(|| search_core::Error::InvalidSortField(key.field.clone())),
        }
    }

    /// OR-condition of `col LIKE '%term%'` over every searchable column; `folded_term`
    /// must come from [`SearchQuery::normalized_term`].
    fn term_condition(&self, folded_term: &str) -> Condition {
        let pattern = like_contains(folded_term);
        let own = self
            .columns
            .iter()
            .map(|col| -> SimpleExpr { Expr::col((E::default(), *col)).into() });
        let joined = self.joined.iter().map(|j| j.column.clone());

        own.chain(joined).fold(Condition::any(), |cond, expr| {
            cond.add(Expr::expr(expr).like(LikeExpr::new(pattern.clone()).escape('\\')))
        })
    }
}

/* ---------- LIKE helpers ---------- */

fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> String {
    format!("%{}%", like_escape(s))
}

/// Extension trait for applying a search term and its ordering to a plain SeaORM `Select<E>`.
pub trait SearchExt<E: EntityTrait>: Sized {
    fn apply_search_term(self, query: &SearchQuery, spec: &SearchSpec<E>) -> Self;

    fn apply_search_order(
        self,
        query: &SearchQuery,
        spec: &SearchSpec<E>,
    ) -> Result<Self, search_core::Error>;
}

impl<E> SearchExt<E> for Select<E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    fn apply_search_term(self, query: &SearchQuery, spec: &SearchSpec<E>) -> Self {
        // Empty term matches every row, including rows whose searchable columns are NULL.
        if query.matches_everything() {
            return self;
        }
        if !spec.has_searchable_fields() {
            return self.filter(Expr::val(1).eq(0));
        }
        let select = spec
            .joined
            .iter()
            .fold(self, |s, j| s.join(JoinType::LeftJoin, (j.relation)()));
        select.filter(spec.term_condition(&query.normalized_term()))
    }

    fn apply_search_order(
        self,
        query: &SearchQuery,
        spec: &SearchSpec<E>,
    ) -> Result<Self, search_core::Error> {
        let (col, dir) = spec.resolve_sort(query)?;
        let order = match dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        let mut select = self.order_by(col, order);
        if col.as_str() != spec.tiebreaker.as_str() {
            select = select.order_by(spec.tiebreaker, Order::Asc);
        }
        Ok(select)
    }
}

/// One-shot search combiner: term filter → count → order + tiebreaker → offset/limit.
///
/// `select` may already carry scoping filters (e.g. a state restriction); totals
/// are computed over that restricted set.
pub async fn paginate_search<E, C, D, F>(
    select: Select<E>,
    conn: &C,
    query: &SearchQuery,
    spec: &SearchSpec<E>,
    limits: PageLimits,
    model_to_domain: F,
) -> Result<Page<D>, SearchError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    E::Column: ColumnTrait + Copy,
    C: ConnectionTrait + Send + Sync,
    F: Fn(E::Model) -> D,
{
    let page_size = resolve_page_size(query.page_size, limits)?;
    let filtered = select.apply_search_term(query, spec);

    // Validate ordering before touching the database.
    let ordered = filtered.clone().apply_search_order(query, spec)?;

    let total = filtered.count(conn).await?;
    let offset = page_offset(query.page, page_size);
    if offset >= total {
        return Ok(Page::empty(query.page, page_size, total));
    }

    let rows = ordered
        .offset(offset)
        .limit(page_size)
        .all(conn)
        .await?;

    tracing::trace!(total, returned = rows.len(), "search page fetched");

    Ok(Page::new(
        rows.into_iter().map(model_to_domain).collect(),
        PageInfo::new(query.page, page_size, total),
    ))
}
