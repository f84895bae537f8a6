//! Model ↔ contract conversions and the table binding of every entity.
//!
//! Every searchable text column has a `*_folded` twin written here with
//! [`fold_case`]; search specs match against the twins only.

use fleetdesk_db::search::SearchSpec;
use sea_orm::{RelationTrait, Set};
use search_core::fold_case;

use crate::contract::model::{
    Admin, Agent, AgentProduct, Auth, Contact, Identifier, Lead, Product, Province, State,
};
use crate::infra::storage::entity::{
    admin, agent, agent_product, auth, contact, identifier, lead, product, province, state,
};
use crate::infra::storage::sea_orm_store::StoredEntity;

impl From<state::Model> for State {
    fn from(m: state::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/* ---------- provinces ---------- */

impl StoredEntity for Province {
    type Entity = province::Entity;
    type ActiveModel = province::ActiveModel;

    fn id_column() -> province::Column {
        province::Column::Id
    }

    fn state_column() -> Option<province::Column> {
        Some(province::Column::StateId)
    }

    fn search_spec() -> SearchSpec<province::Entity> {
        SearchSpec::new(("name", province::Column::Name), province::Column::Id)
            .search(province::Column::NameFolded)
            .sortable("created_at", province::Column::CreatedAt)
            .sortable("updated_at", province::Column::UpdatedAt)
    }

    fn from_model(m: province::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> province::ActiveModel {
        province::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- identifiers ---------- */

impl StoredEntity for Identifier {
    type Entity = identifier::Entity;
    type ActiveModel = identifier::ActiveModel;

    fn id_column() -> identifier::Column {
        identifier::Column::Id
    }

    fn state_column() -> Option<identifier::Column> {
        Some(identifier::Column::StateId)
    }

    fn search_spec() -> SearchSpec<identifier::Entity> {
        SearchSpec::new(("name", identifier::Column::Name), identifier::Column::Id)
            .search(identifier::Column::NameFolded)
            .sortable("created_at", identifier::Column::CreatedAt)
    }

    fn from_model(m: identifier::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> identifier::ActiveModel {
        identifier::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- contacts (joined: identifier name) ---------- */

impl StoredEntity for Contact {
    type Entity = contact::Entity;
    type ActiveModel = contact::ActiveModel;

    fn id_column() -> contact::Column {
        contact::Column::Id
    }

    fn state_column() -> Option<contact::Column> {
        Some(contact::Column::StateId)
    }

    fn search_spec() -> SearchSpec<contact::Entity> {
        SearchSpec::new(("name", contact::Column::Name), contact::Column::Id)
            .search(contact::Column::NameFolded)
            .search(contact::Column::EmailFolded)
            .search_joined::<identifier::Entity>(
                || contact::Relation::Identifier.def(),
                identifier::Column::NameFolded,
            )
            .sortable("email", contact::Column::Email)
            .sortable("created_at", contact::Column::CreatedAt)
    }

    fn from_model(m: contact::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            identifier_id: m.identifier_id,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> contact::ActiveModel {
        contact::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            email: Set(self.email.clone()),
            email_folded: Set(self.email.as_deref().map(fold_case)),
            identifier_id: Set(self.identifier_id),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- auths ---------- */

impl StoredEntity for Auth {
    type Entity = auth::Entity;
    type ActiveModel = auth::ActiveModel;

    fn id_column() -> auth::Column {
        auth::Column::Id
    }

    fn state_column() -> Option<auth::Column> {
        Some(auth::Column::StateId)
    }

    fn search_spec() -> SearchSpec<auth::Entity> {
        SearchSpec::new(("username", auth::Column::Username), auth::Column::Id)
            .search(auth::Column::UsernameFolded)
            .sortable("created_at", auth::Column::CreatedAt)
    }

    fn from_model(m: auth::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> auth::ActiveModel {
        auth::ActiveModel {
            id: Set(self.id),
            username: Set(self.username.clone()),
            username_folded: Set(fold_case(&self.username)),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- admins (joined: auth username) ---------- */

impl StoredEntity for Admin {
    type Entity = admin::Entity;
    type ActiveModel = admin::ActiveModel;

    fn id_column() -> admin::Column {
        admin::Column::Id
    }

    fn state_column() -> Option<admin::Column> {
        Some(admin::Column::StateId)
    }

    fn search_spec() -> SearchSpec<admin::Entity> {
        SearchSpec::new(("name", admin::Column::Name), admin::Column::Id)
            .search(admin::Column::NameFolded)
            .search_joined::<auth::Entity>(
                || admin::Relation::Auth.def(),
                auth::Column::UsernameFolded,
            )
            .sortable("created_at", admin::Column::CreatedAt)
    }

    fn from_model(m: admin::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            auth_id: m.auth_id,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> admin::ActiveModel {
        admin::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            auth_id: Set(self.auth_id),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- agents ---------- */

impl StoredEntity for Agent {
    type Entity = agent::Entity;
    type ActiveModel = agent::ActiveModel;

    fn id_column() -> agent::Column {
        agent::Column::Id
    }

    fn state_column() -> Option<agent::Column> {
        Some(agent::Column::StateId)
    }

    fn search_spec() -> SearchSpec<agent::Entity> {
        SearchSpec::new(("name", agent::Column::Name), agent::Column::Id)
            .search(agent::Column::NameFolded)
            .search(agent::Column::EmailFolded)
            .sortable("email", agent::Column::Email)
            .sortable("created_at", agent::Column::CreatedAt)
    }

    fn from_model(m: agent::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> agent::ActiveModel {
        agent::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            email: Set(self.email.clone()),
            email_folded: Set(self.email.as_deref().map(fold_case)),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- products ---------- */

impl StoredEntity for Product {
    type Entity = product::Entity;
    type ActiveModel = product::ActiveModel;

    fn id_column() -> product::Column {
        product::Column::Id
    }

    fn state_column() -> Option<product::Column> {
        Some(product::Column::StateId)
    }

    fn search_spec() -> SearchSpec<product::Entity> {
        SearchSpec::new(("name", product::Column::Name), product::Column::Id)
            .search(product::Column::NameFolded)
            .sortable("created_at", product::Column::CreatedAt)
    }

    fn from_model(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> product::ActiveModel {
        product::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- leads (joined: agent name) ---------- */

impl StoredEntity for Lead {
    type Entity = lead::Entity;
    type ActiveModel = lead::ActiveModel;

    fn id_column() -> lead::Column {
        lead::Column::Id
    }

    fn state_column() -> Option<lead::Column> {
        Some(lead::Column::StateId)
    }

    fn search_spec() -> SearchSpec<lead::Entity> {
        SearchSpec::new(("name", lead::Column::Name), lead::Column::Id)
            .search(lead::Column::NameFolded)
            .search(lead::Column::EmailFolded)
            .search_joined::<agent::Entity>(
                || lead::Relation::Agent.def(),
                agent::Column::NameFolded,
            )
            .sortable("email", lead::Column::Email)
            .sortable("created_at", lead::Column::CreatedAt)
    }

    fn from_model(m: lead::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            agent_id: m.agent_id,
            state_id: m.state_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> lead::ActiveModel {
        lead::ActiveModel {
            id: Set(self.id),
            name: Set(self.name.clone()),
            name_folded: Set(fold_case(&self.name)),
            email: Set(self.email.clone()),
            email_folded: Set(self.email.as_deref().map(fold_case)),
            agent_id: Set(self.agent_id),
            state_id: Set(self.state_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}

/* ---------- agent_products (stateless) ---------- */

impl StoredEntity for AgentProduct {
    type Entity = agent_product::Entity;
    type ActiveModel = agent_product::ActiveModel;

    fn id_column() -> agent_product::Column {
        agent_product::Column::Id
    }

    fn state_column() -> Option<agent_product::Column> {
        None
    }

    // No text columns: only the empty term matches.
    fn search_spec() -> SearchSpec<agent_product::Entity> {
        SearchSpec::new(
            ("created_at", agent_product::Column::CreatedAt),
            agent_product::Column::Id,
        )
        .sortable("updated_at", agent_product::Column::UpdatedAt)
    }

    fn from_model(m: agent_product::Model) -> Self {
        Self {
            id: m.id,
            agent_id: m.agent_id,
            product_id: m.product_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    fn to_active_model(&self) -> agent_product::ActiveModel {
        agent_product::ActiveModel {
            id: Set(self.id),
            agent_id: Set(self.agent_id),
            product_id: Set(self.product_id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }
}
