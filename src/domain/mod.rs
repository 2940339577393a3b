//! Domain types for the movie catalog with strong typing.
//!
//! Entity identifiers are newtypes so a `RatingId` can never be passed where a
//! `MovieId` is expected. The rating rules and the ownership guard live in the
//! submodules and are free of any database concerns.

pub mod ownership;
pub mod rating;

pub use ownership::{Access, authorize};
pub use rating::{RATING_MAX, RATING_MIN, RatingValue, average_rating, round_to_cents};

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user. Every ownership check is made against it.
    UserId
);
entity_id!(
    /// Identifier of a movie in the catalog.
    MovieId
);
entity_id!(RatingId);
entity_id!(CommentId);
entity_id!(ReplyId);

/// Offset/limit window used by movie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    #[must_use]
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }
}
