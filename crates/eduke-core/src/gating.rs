//! Permission gating for navigation entries and actions.
//!
//! An item is enabled when the role holds *any* of the permissions it is
//! tagged with.

use crate::authz::Authorizer;
use crate::permissions::{Permission, Role};

/// Something that is shown only to roles holding one of its permissions.
pub trait Gated {
    fn required_permissions(&self) -> &[Permission];
}

impl<T: Gated + ?Sized> Gated for &T {
    fn required_permissions(&self) -> &[Permission] {
        (**self).required_permissions()
    }
}

/// Keep the items `role` may see, in their original order.
///
/// Items tagged with no permissions are never enabled.
pub fn filter_by_permission<I, T, A>(items: I, role: Option<Role>, authorizer: &A) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Gated,
    A: Authorizer + ?Sized,
{
    items
        .into_iter()
        .filter(|item| authorizer.has_any_permission(role, item.required_permissions()))
        .collect()
}
