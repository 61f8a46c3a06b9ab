//! Persistence layer for Aero Shell.
//!
//! Stores the user profile and display settings as JSON, written atomically
//! (temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use aero_persistence::{Profile, ProfileStore};
//!
//! let store = ProfileStore::new("/home/user/.aero_shell/profile.json");
//!
//! if !store.is_onboarded() {
//!     store.save(&Profile::new("ada").with_time_24(true)).unwrap();
//! }
//! let profile = store.load().unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod profile_store;

pub use error::{PersistenceError, Result};
pub use profile_store::{Profile, ProfileStore};
