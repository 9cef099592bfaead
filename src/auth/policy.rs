//! Role checks used by the handlers. The store is still authoritative;
//! these gates exist so the API refuses an operation before it reaches
//! the record store.

use super::AuthUser;

/// Only administrators may remove job records.
pub fn can_delete_jobs(user: &AuthUser) -> bool {
    user.is_admin()
}
