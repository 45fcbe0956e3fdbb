//! # Access Module
//!
//! The capability object the engine consults instead of re-deriving role
//! semantics at every call site.
//!
//! ## How Authorization Reaches the Engine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Capability Resolution                              │
//! │                                                                         │
//! │  Surrounding system (auth layer, outside this workspace)                │
//! │  ├── Authenticates the request (JWT, session, whatever)                 │
//! │  └── Loads the User row                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Actor::from_user(&user)  ← resolved ONCE per request                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  SaleService / StockService / ProductService                            │
//! │  └── consult actor.can_sell / can_cancel / can_adjust                   │
//! │      (never compare role strings, never walk the hierarchy again)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! Admins own an inventory; employees sell from their manager's inventory.
//! The hierarchy is flat: one manager per employee, managers have none.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, Role, Sale, User};

// =============================================================================
// Actor
// =============================================================================

/// Who is acting, and which inventory they act on.
///
/// Resolved once per request from a `User` row. The engine treats this as
/// opaque capability data: predicates answer yes/no, the services never
/// inspect roles beyond them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user.
    pub user_id: String,

    /// The acting user's role.
    pub role: Role,

    /// The admin whose inventory this actor operates on: the user's own id
    /// for admins, the manager's id for employees.
    pub inventory_owner_id: String,
}

impl Actor {
    /// Resolves a user into an actor.
    ///
    /// Fails for an employee with no manager: such a user has no inventory
    /// to sell from, and guessing one would hide a data problem.
    pub fn from_user(user: &User) -> CoreResult<Actor> {
        let inventory_owner_id = match user.role {
            Role::Admin => user.id.clone(),
            Role::Employee => match &user.manager_id {
                Some(manager_id) => manager_id.clone(),
                None => {
                    return Err(CoreError::forbidden(
                        &user.id,
                        "act without an assigned manager",
                    ))
                }
            },
        };

        Ok(Actor {
            user_id: user.id.clone(),
            role: user.role,
            inventory_owner_id,
        })
    }

    /// May this actor sell the given product?
    ///
    /// True when the product belongs to the inventory the actor operates on.
    #[inline]
    pub fn can_sell(&self, product: &Product) -> bool {
        product.owner_id == self.inventory_owner_id
    }

    /// May this actor cancel the given sale?
    ///
    /// Admins may cancel any sale; employees only their own.
    #[inline]
    pub fn can_cancel(&self, sale: &Sale) -> bool {
        self.role == Role::Admin || sale.user_id == self.user_id
    }

    /// May this actor manually adjust the given product's stock?
    ///
    /// Admin-only, and only within their own inventory.
    #[inline]
    pub fn can_adjust(&self, product: &Product) -> bool {
        self.role == Role::Admin && product.owner_id == self.inventory_owner_id
    }

    /// May this actor create or edit products?
    ///
    /// Admin-only; employees never own catalog entries.
    #[inline]
    pub fn can_manage_products(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, role: Role, manager_id: Option<&str>) -> User {
        User {
            id: id.to_string(),
            username: format!("user-{id}"),
            role,
            manager_id: manager_id.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    fn product(id: &str, owner_id: &str) -> Product {
        Product {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name: "Test".to_string(),
            category: None,
            price_cents: 100,
            stock: 10,
            code: format!("TEST-{id}"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sale(id: &str, user_id: &str) -> Sale {
        Sale {
            id: id.to_string(),
            user_id: user_id.to_string(),
            total_cents: 1000,
            payment_method: None,
            is_cancelled: false,
            cancelled_at: None,
            cancelled_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_actor_owns_own_inventory() {
        let admin = user("a1", Role::Admin, None);
        let actor = Actor::from_user(&admin).unwrap();
        assert_eq!(actor.inventory_owner_id, "a1");
        assert!(actor.can_sell(&product("p1", "a1")));
        assert!(!actor.can_sell(&product("p2", "other-admin")));
    }

    #[test]
    fn test_employee_actor_sells_managers_inventory() {
        let employee = user("e1", Role::Employee, Some("a1"));
        let actor = Actor::from_user(&employee).unwrap();
        assert_eq!(actor.inventory_owner_id, "a1");
        assert!(actor.can_sell(&product("p1", "a1")));
        assert!(!actor.can_sell(&product("p2", "a2")));
    }

    #[test]
    fn test_employee_without_manager_is_rejected() {
        let orphan = user("e1", Role::Employee, None);
        assert!(matches!(
            Actor::from_user(&orphan),
            Err(CoreError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_cancel_rights() {
        let admin = Actor::from_user(&user("a1", Role::Admin, None)).unwrap();
        let employee = Actor::from_user(&user("e1", Role::Employee, Some("a1"))).unwrap();

        let own_sale = sale("s1", "e1");
        let other_sale = sale("s2", "e2");

        assert!(employee.can_cancel(&own_sale));
        assert!(!employee.can_cancel(&other_sale));

        // Admins may cancel anything.
        assert!(admin.can_cancel(&own_sale));
        assert!(admin.can_cancel(&other_sale));
    }

    #[test]
    fn test_adjust_rights_are_admin_only() {
        let admin = Actor::from_user(&user("a1", Role::Admin, None)).unwrap();
        let employee = Actor::from_user(&user("e1", Role::Employee, Some("a1"))).unwrap();

        let own_product = product("p1", "a1");
        let foreign_product = product("p2", "a2");

        assert!(admin.can_adjust(&own_product));
        assert!(!admin.can_adjust(&foreign_product));
        // Employees may sell but never adjust.
        assert!(employee.can_sell(&own_product));
        assert!(!employee.can_adjust(&own_product));
    }

    #[test]
    fn test_product_management_is_admin_only() {
        let admin = Actor::from_user(&user("a1", Role::Admin, None)).unwrap();
        let employee = Actor::from_user(&user("e1", Role::Employee, Some("a1"))).unwrap();

        assert!(admin.can_manage_products());
        assert!(!employee.can_manage_products());
    }
}
