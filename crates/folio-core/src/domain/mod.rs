//! Domain entities - the core business objects.

mod page;
mod post;

pub use page::{Page, PageRequest};
pub use post::Post;
