//! Item catalog boundary.
//!
//! The catalog supplies candidate items ordered by rank and static metadata lookups. The
//! scheduler only consumes it; loading the content is the caller's job.

pub mod memory;

pub use memory::InMemoryCatalog;

use crate::models::ItemMeta;
use std::collections::HashSet;

pub trait ItemCatalog {
    /// Highest-ranked items whose ids are not in `exclude`, at most `limit` of them.
    fn list_unlearned_ranked(&self, exclude: &HashSet<&str>, limit: usize) -> Vec<ItemMeta>;

    fn get_meta(&self, item_id: &str) -> Option<ItemMeta>;
}

impl<T: ItemCatalog + ?Sized> ItemCatalog for &T {
    fn list_unlearned_ranked(&self, exclude: &HashSet<&str>, limit: usize) -> Vec<ItemMeta> {
        (**self).list_unlearned_ranked(exclude, limit)
    }

    fn get_meta(&self, item_id: &str) -> Option<ItemMeta> {
        (**self).get_meta(item_id)
    }
}
