use std::collections::HashMap;

use super::{sort_by_date, ContentStore, RawItem, StoreError};

/// Keeps partitions in memory, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    partitions: HashMap<String, Vec<RawItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `partition` (possibly empty) and appends `items` to it.
    pub fn insert<I>(&mut self, partition: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = RawItem>,
    {
        self.partitions
            .entry(partition.to_owned())
            .or_default()
            .extend(items);
        self
    }
}

impl ContentStore for MemoryStore {
    fn fetch_all(
        &self,
        partition: &str,
        sort_field: &str,
        descending: bool,
    ) -> Result<Vec<RawItem>, StoreError> {
        let mut items = self
            .partitions
            .get(partition)
            .cloned()
            .ok_or_else(|| StoreError::UnknownPartition(partition.to_owned()))?;

        sort_by_date(&mut items, sort_field, descending);
        Ok(items)
    }
}
