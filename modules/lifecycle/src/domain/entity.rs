//! Capability trait shared by every lifecycled entity type.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Whether an entity type carries a state reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Carries a state; delete is a transition to ELIMINATED.
    Stateful,
    /// Pure association row; delete removes it physically.
    Stateless,
}

pub trait LifecycleEntity: Clone + Send + Sync + 'static {
    /// Name used in logs and `NotFound` messages.
    const KIND: &'static str;
    const LIFECYCLE: Lifecycle;

    fn id(&self) -> Uuid;

    /// Current state; always `None` for stateless types.
    fn state_id(&self) -> Option<i64>;

    /// No-op for stateless types.
    fn set_state_id(&mut self, state_id: i64);

    /// Assign identity and creation time to a new entity.
    fn init(&mut self, id: Uuid, at: DateTime<Utc>);

    /// Advance `updated_at`.
    fn touch(&mut self, at: DateTime<Utc>);

    /// Field-level checks run before create and update.
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn is_stateful() -> bool {
        Self::LIFECYCLE == Lifecycle::Stateful
    }
}

/// Rejects blank names. Shared by entity `validate` impls.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be blank"));
    }
    Ok(())
}

/// Implements [`LifecycleEntity`] for a contract struct with `id`, `state_id`,
/// `created_at` and `updated_at` fields.
macro_rules! stateful_entity {
    ($ty:ty, $kind:literal, |$this:ident| $validate:block) => {
        impl LifecycleEntity for $ty {
            const KIND: &'static str = $kind;
            const LIFECYCLE: Lifecycle = Lifecycle::Stateful;

            fn id(&self) -> Uuid {
                self.id
            }

            fn state_id(&self) -> Option<i64> {
                Some(self.state_id)
            }

            fn set_state_id(&mut self, state_id: i64) {
                self.state_id = state_id;
            }

            fn init(&mut self, id: Uuid, at: DateTime<Utc>) {
                self.id = id;
                self.created_at = at;
                self.updated_at = at;
            }

            fn touch(&mut self, at: DateTime<Utc>) {
                self.updated_at = at;
            }

            fn validate(&self) -> Result<(), DomainError> {
                let $this = self;
                $validate
            }
        }
    };
}

mod impls {
    use super::*;
    use crate::contract::model::{
        Admin, Agent, AgentProduct, Auth, Contact, Identifier, Lead, Product, Province,
    };

    stateful_entity!(Province, "Province", |p| { require_non_blank("name", &p.name) });
    stateful_entity!(Identifier, "Identifier", |i| { require_non_blank("name", &i.name) });
    stateful_entity!(Contact, "Contact", |c| { require_non_blank("name", &c.name) });
    stateful_entity!(Auth, "Auth", |a| { require_non_blank("username", &a.username) });
    stateful_entity!(Admin, "Admin", |a| { require_non_blank("name", &a.name) });
    stateful_entity!(Agent, "Agent", |a| { require_non_blank("name", &a.name) });
    stateful_entity!(Product, "Product", |p| { require_non_blank("name", &p.name) });
    stateful_entity!(Lead, "Lead", |l| { require_non_blank("name", &l.name) });

    impl LifecycleEntity for AgentProduct {
        const KIND: &'static str = "AgentProduct";
        const LIFECYCLE: Lifecycle = Lifecycle::Stateless;

        fn id(&self) -> Uuid {
            self.id
        }

        fn state_id(&self) -> Option<i64> {
            None
        }

        fn set_state_id(&mut self, _state_id: i64) {}

        fn init(&mut self, id: Uuid, at: DateTime<Utc>) {
            self.id = id;
            self.created_at = at;
            self.updated_at = at;
        }

        fn touch(&mut self, at: DateTime<Utc>) {
            self.updated_at = at;
        }
    }
}
