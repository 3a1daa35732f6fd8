//! Core types for StorePulse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod listing;
pub mod rating;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use listing::{Page, PageRequest, SortOrder, StoreSortField, UserSortField};
pub use rating::{RatingValue, RatingValueError};
pub use role::{RoleFilter, UserRole};
