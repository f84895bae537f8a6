use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

/// Seeds ACTIVE (1), INACTIVE (2) and ELIMINATED (3). Existing rows are kept.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r#"
INSERT INTO states (id, label, description, created_at, updated_at) VALUES
    (1, 'ACTIVE', 'Visible and in use', now(), now()),
    (2, 'INACTIVE', 'Kept but not in use', now(), now()),
    (3, 'ELIMINATED', 'Logically deleted', now(), now())
ON CONFLICT DO NOTHING;

SELECT setval(pg_get_serial_sequence('states', 'id'), (SELECT MAX(id) FROM states));
                "#
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r#"
INSERT OR IGNORE INTO states (id, label, description, created_at, updated_at) VALUES
    (1, 'ACTIVE', 'Visible and in use', strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    (2, 'INACTIVE', 'Kept but not in use', strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    (3, 'ELIMINATED', 'Logically deleted', strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), strftime('%Y-%m-%dT%H:%M:%fZ', 'now'));
                "#
            }
            sea_orm::DatabaseBackend::MySql => {
                return Err(DbErr::Migration("MySQL is not supported".to_string()));
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared(
            "DELETE FROM states WHERE label IN ('ACTIVE', 'INACTIVE', 'ELIMINATED');",
        )
        .await?;
        Ok(())
    }
}
