//! Domain layer for FoodiePal.
//!
//! Core types shared by every other layer, free of HTTP, storage or runtime
//! concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`restaurant`]: Restaurants, coordinates, location fixes and camera regions
//! - [`user`]: Signed-in user identity
//!
//! # Examples
//!
//! ```
//! use foodiepal::domain::{Restaurant, Result};
//!
//! fn sample() -> Result<Restaurant> {
//!     Ok(Restaurant::new("a", "Cafe A", 37.001, -122.001, None))
//! }
//! ```

pub mod error;
pub mod restaurant;
pub mod user;

pub use error::{FoodiePalError, Result};
pub use restaurant::{Coordinate, LocationFix, Region, Restaurant, CLOSE_UP_DELTA, DEFAULT_CENTER};
pub use user::User;
