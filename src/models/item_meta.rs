//! Static catalog metadata for one item.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub item_id: String,
    /// Corpus frequency; higher means more common
    pub frequency: f64,
    /// 1-based position in the catalog ordering
    pub rank: u32,
}
