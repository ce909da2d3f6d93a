//! # Eduke Core
//!
//! Authorization model and shared error types for the Eduke client.
//!
//! - [`permissions`]: the closed permission and role sets and the static role policy
//! - [`authz`]: the [`Authorizer`] query service
//! - [`gating`]: filtering navigation entries and actions by permission
//! - [`errors`]: client error types
//!
//! # Example
//!
//! ```
//! use eduke_core::{Authorizer, Permission, Role, StaticAuthorizer};
//!
//! let authz = StaticAuthorizer::standard();
//! assert!(authz.has_permission(Some(Role::BranchAdmin), Permission::ManagePos));
//! assert!(!authz.has_permission(None, Permission::ViewDashboard));
//! assert!(authz.is_branch_scoped(Some(Role::Staff)));
//! ```

pub mod authz;
pub mod errors;
pub mod gating;
pub mod permissions;

// Re-export commonly used types at crate root
pub use authz::{Authorizer, StaticAuthorizer};
pub use errors::{ClientError, UnknownRole};
pub use gating::{Gated, filter_by_permission};
pub use permissions::{Permission, PermissionSet, Role, RolePermissionMap, Scope};
