// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Repository
// File: crates/menu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info};
use uuid::Uuid;

use menu_core::domain::MenuNode;
use menu_core::error::DomainError;
use menu_core::repositories::{AtomicOperation, MenuFilter, MenuRepository, ParentScope};

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuRow> for MenuNode {
    fn from(row: MenuRow) -> Self {
        MenuNode {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            url: row.url,
            order: row.sort_order,
            is_active: row.is_active,
            parent_id: row.parent_id,
            children: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Map constraint violations back onto the invariants they guard
fn write_error(context: &str, menu: &MenuNode, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::NameConflict {
                parent_id: menu.parent_id,
                name: menu.name.clone(),
            };
        }
        if db.is_foreign_key_violation() {
            if let Some(parent_id) = menu.parent_id {
                return DomainError::ParentNotFound(parent_id);
            }
        }
    }
    DomainError::DatabaseError(e.to_string())
}

fn read_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, description, icon, url,
                sort_order, is_active, parent_id,
                created_at, updated_at
            FROM menus
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| read_error("finding menu by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_many(&self, filter: &MenuFilter) -> Result<Vec<MenuNode>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT
                id, name, description, icon, url,
                sort_order, is_active, parent_id,
                created_at, updated_at
            FROM menus
            WHERE TRUE
            "#,
        );

        match filter.parent {
            ParentScope::Any => {}
            ParentScope::Root => {
                query.push(" AND parent_id IS NULL");
            }
            ParentScope::Of(parent_id) => {
                query.push(" AND parent_id = ").push_bind(parent_id);
            }
        }
        if let Some(name) = &filter.name {
            query.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(exclude_id) = filter.exclude_id {
            query.push(" AND id <> ").push_bind(exclude_id);
        }
        query.push(" ORDER BY sort_order ASC, created_at ASC, id ASC");

        let rows: Vec<MenuRow> = query
            .build_query_as::<MenuRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("listing menus", e))?;

        debug!("Loaded {} menu rows", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, menu: &MenuNode) -> Result<MenuNode, DomainError> {
        info!("Creating menu: {}", menu.name);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (
                id, name, description, icon, url,
                sort_order, is_active, parent_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, name, description, icon, url,
                sort_order, is_active, parent_id,
                created_at, updated_at
            "#
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(&menu.icon)
        .bind(&menu.url)
        .bind(menu.order)
        .bind(menu.is_active)
        .bind(menu.parent_id)
        .bind(menu.created_at)
        .bind(menu.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("creating menu", menu, e))?;

        info!("Menu created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, menu: &MenuNode) -> Result<MenuNode, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            UPDATE menus
            SET
                name = $2,
                description = $3,
                icon = $4,
                url = $5,
                sort_order = $6,
                is_active = $7,
                parent_id = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, description, icon, url,
                sort_order, is_active, parent_id,
                created_at, updated_at
            "#
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(&menu.icon)
        .bind(&menu.url)
        .bind(menu.order)
        .bind(menu.is_active)
        .bind(menu.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("updating menu", menu, e))?;

        row.map(Into::into).ok_or(DomainError::MenuNotFound(menu.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| read_error("deleting menu", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MenuNotFound(*id));
        }
        Ok(())
    }

    async fn run_atomic(&self, operations: Vec<AtomicOperation>) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| read_error("opening transaction", e))?;

        // Returning early drops `tx`, which rolls the whole batch back
        for operation in &operations {
            match operation {
                AtomicOperation::SetOrder { id, order } => {
                    let result = sqlx::query(
                        "UPDATE menus SET sort_order = $2, updated_at = NOW() WHERE id = $1",
                    )
                    .bind(id)
                    .bind(order)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| read_error("reordering menu", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::MenuNotFound(*id));
                    }
                }
                AtomicOperation::Delete(id) => {
                    let result = sqlx::query("DELETE FROM menus WHERE id = $1")
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| read_error("deleting menu in batch", e))?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::MenuNotFound(*id));
                    }
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| read_error("committing transaction", e))?;

        debug!("Committed batch of {} menu operations", operations.len());
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| read_error("pinging database", e))?;
        Ok(())
    }
}
