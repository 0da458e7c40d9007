//! Catalog held entirely in memory, optionally loaded from a JSON array of items.
use super::ItemCatalog;
use crate::error::Result;
use crate::models::ItemMeta;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    /// Sorted by rank, then by descending frequency
    items: Vec<ItemMeta>,
    index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new(mut items: Vec<ItemMeta>) -> Self {
        items.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| b.frequency.total_cmp(&a.frequency))
        });
        // Keep the best-ranked entry per id
        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.item_id.clone()));

        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.item_id.clone(), i))
            .collect();

        Self { items, index }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<ItemMeta> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.as_ref().display(),
            items = catalog.len(),
            "loaded item catalog"
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn list_unlearned_ranked(&self, exclude: &HashSet<&str>, limit: usize) -> Vec<ItemMeta> {
        self.items
            .iter()
            .filter(|item| !exclude.contains(item.item_id.as_str()))
            .take(limit)
            .cloned()
            .collect()
    }

    fn get_meta(&self, item_id: &str) -> Option<ItemMeta> {
        self.index.get(item_id).map(|&i| self.items[i].clone())
    }
}
