//! Application services - use cases composed from ports.

mod catalog;

pub use catalog::PostCatalog;
