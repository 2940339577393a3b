//! Ownership guard shared by every mutation of movies, ratings, comments and
//! replies. Callers check that the entity exists first, so a missing entity is
//! reported as not found even to a user who would not own it.

use super::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[must_use]
pub fn authorize(owner_id: UserId, acting_user_id: UserId) -> Access {
    if owner_id == acting_user_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_allowed() {
        assert_eq!(authorize(UserId::new(3), UserId::new(3)), Access::Allow);
        assert!(authorize(UserId::new(3), UserId::new(3)).is_allowed());
    }

    #[test]
    fn other_users_are_denied() {
        assert_eq!(authorize(UserId::new(3), UserId::new(4)), Access::Deny);
        assert!(!authorize(UserId::new(4), UserId::new(3)).is_allowed());
    }
}
