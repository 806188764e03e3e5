//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod clock;
pub mod database;
pub mod seed;

// Re-exports - In-Memory
pub use clock::{FixedClock, SystemClock};
pub use database::{DatabaseConnections, InMemoryPostRepository};
pub use seed::{SeedError, load_posts};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
