//! Role checks for ledger edits.
//!
//! Admins may do everything. Managers may edit meals, shopping and rent.
//! Members are read-only. Reads are open to every signed-in account.

use super::{Error, User, UserRole};

/// An edit guarded by a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Record meals, shopping and rent.
    EditLedger,
    /// Add household members.
    CreateMembers,
    /// Change a member's household role.
    ChangeMemberRoles,
}

impl Permission {
    /// Whether `role` holds this permission.
    #[must_use]
    pub const fn allows(self, role: UserRole) -> bool {
        match self {
            Self::EditLedger => can_edit(role),
            Self::CreateMembers => can_create_members(role),
            Self::ChangeMemberRoles => can_change_member_roles(role),
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::EditLedger => "edit the ledger",
            Self::CreateMembers => "add members",
            Self::ChangeMemberRoles => "change member roles",
        }
    }
}

/// Admins and managers may edit the ledger.
#[must_use]
pub const fn can_edit(role: UserRole) -> bool {
    matches!(role, UserRole::Admin | UserRole::Manager)
}

/// Only admins may add members.
#[must_use]
pub const fn can_create_members(role: UserRole) -> bool {
    matches!(role, UserRole::Admin)
}

/// Only admins may change member roles.
#[must_use]
pub const fn can_change_member_roles(role: UserRole) -> bool {
    matches!(role, UserRole::Admin)
}

/// Reject `user` with a forbidden error unless their role grants `permission`.
///
/// # Examples
/// ```
/// use messbook::domain::{authorize, Permission, User, UserId, UserRole, Username};
///
/// let manager = User::new(UserId::random(), Username::new("meg").expect("valid"), UserRole::Manager);
/// assert!(authorize(&manager, Permission::EditLedger).is_ok());
/// assert!(authorize(&manager, Permission::CreateMembers).is_err());
/// ```
pub fn authorize(user: &User, permission: Permission) -> Result<(), Error> {
    if permission.allows(user.role()) {
        return Ok(());
    }
    Err(Error::forbidden(format!(
        "{} accounts may not {}",
        user.role(),
        permission.describe()
    )))
}
