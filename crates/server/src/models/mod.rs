//! Domain models for the StorePulse service.
//!
//! These types represent validated domain objects, separate from the
//! database row types owned by the `db` module. They serialize directly as
//! API responses; nothing here ever carries a password hash.

pub mod rating;
pub mod session;
pub mod store;
pub mod user;

pub use rating::{Rating, RatingWithUser};
pub use session::{CurrentUser, session_keys};
pub use store::{OwnedStore, Store, StoreWithAggregate};
pub use user::{User, UserSummary};
