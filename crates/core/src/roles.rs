//! Well-known role name constants.
//!
//! These must match the `role` values provisioned in the `users` table.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Whether the role may edit content (create, stage, publish, tag).
pub fn can_edit(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
