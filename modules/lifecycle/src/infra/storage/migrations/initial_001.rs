use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

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
CREATE TABLE IF NOT EXISTS states (
    id BIGSERIAL PRIMARY KEY NOT NULL,
    label VARCHAR(32) NOT NULL,
    description VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_states_label ON states(label);

CREATE TABLE IF NOT EXISTS provinces (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_provinces_name ON provinces(name);
CREATE INDEX IF NOT EXISTS idx_provinces_state ON provinces(state_id);

CREATE TABLE IF NOT EXISTS identifiers (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_identifiers_name ON identifiers(name);
CREATE INDEX IF NOT EXISTS idx_identifiers_state ON identifiers(state_id);

CREATE TABLE IF NOT EXISTS contacts (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    email_folded VARCHAR(255),
    identifier_id UUID REFERENCES identifiers(id),
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_contacts_state ON contacts(state_id);

CREATE TABLE IF NOT EXISTS auths (
    id UUID PRIMARY KEY NOT NULL,
    username VARCHAR(255) NOT NULL,
    username_folded VARCHAR(255) NOT NULL,
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_auths_username ON auths(username);

CREATE TABLE IF NOT EXISTS admins (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    auth_id UUID REFERENCES auths(id),
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_admins_state ON admins(state_id);

CREATE TABLE IF NOT EXISTS agents (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    email_folded VARCHAR(255),
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_agents_state ON agents(state_id);

CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_products_state ON products(state_id);

CREATE TABLE IF NOT EXISTS leads (
    id UUID PRIMARY KEY NOT NULL,
    name VARCHAR(255) NOT NULL,
    name_folded VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    email_folded VARCHAR(255),
    agent_id UUID REFERENCES agents(id),
    state_id BIGINT NOT NULL REFERENCES states(id),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_leads_state ON leads(state_id);

CREATE TABLE IF NOT EXISTS agent_products (
    id UUID PRIMARY KEY NOT NULL,
    agent_id UUID NOT NULL REFERENCES agents(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_agent_products_pair ON agent_products(agent_id, product_id);
                "#
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r#"
CREATE TABLE IF NOT EXISTS states (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    label TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_states_label ON states(label);

CREATE TABLE IF NOT EXISTS provinces (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_provinces_name ON provinces(name);
CREATE INDEX IF NOT EXISTS idx_provinces_state ON provinces(state_id);

CREATE TABLE IF NOT EXISTS identifiers (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_identifiers_name ON identifiers(name);
CREATE INDEX IF NOT EXISTS idx_identifiers_state ON identifiers(state_id);

CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    email TEXT,
    email_folded TEXT,
    identifier_id TEXT REFERENCES identifiers(id),
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_contacts_state ON contacts(state_id);

CREATE TABLE IF NOT EXISTS auths (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL,
    username_folded TEXT NOT NULL,
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_auths_username ON auths(username);

CREATE TABLE IF NOT EXISTS admins (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    auth_id TEXT REFERENCES auths(id),
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_admins_state ON admins(state_id);

CREATE TABLE IF NOT EXISTS agents (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    email TEXT,
    email_folded TEXT,
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_agents_state ON agents(state_id);

CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_products_state ON products(state_id);

CREATE TABLE IF NOT EXISTS leads (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_folded TEXT NOT NULL,
    email TEXT,
    email_folded TEXT,
    agent_id TEXT REFERENCES agents(id),
    state_id INTEGER NOT NULL REFERENCES states(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_leads_state ON leads(state_id);

CREATE TABLE IF NOT EXISTS agent_products (
    id TEXT PRIMARY KEY NOT NULL,
    agent_id TEXT NOT NULL REFERENCES agents(id) ON DELETE CASCADE,
    product_id TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS uk_agent_products_pair ON agent_products(agent_id, product_id);
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
        let sql = r#"
DROP TABLE IF EXISTS agent_products;
DROP TABLE IF EXISTS leads;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS agents;
DROP TABLE IF EXISTS admins;
DROP TABLE IF EXISTS auths;
DROP TABLE IF EXISTS contacts;
DROP TABLE IF EXISTS identifiers;
DROP TABLE IF EXISTS provinces;
DROP TABLE IF EXISTS states;
        "#;
        conn.execute_unprepared(sql).await?;
        Ok(())
    }
}
