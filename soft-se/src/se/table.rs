use crate::se::keys::{KeyId, KeyRecord, KeyValue};
use crate::se::Error;
use heapless::Vec;

/// Read-only keys, fixed when the secure element is created.
pub struct KeyTable<const MAX_KEYS: usize> {
    records: Vec<KeyRecord, MAX_KEYS>, // Sorted by key ID
}

impl<const MAX_KEYS: usize> KeyTable<MAX_KEYS> {
    pub fn try_new<'a>(records: impl IntoIterator<Item = &'a KeyRecord>) -> Result<Self, Error> {
        let mut table = Self {
            records: Vec::new(),
        };
        for record in records {
            table
                .records
                .push(record.clone())
                .map_err(|_| Error::KeyStoreTooSmall)?;
        }
        table.records.sort_unstable_by_key(|record| record.id);
        if table.records.windows(2).any(|w| w[0].id == w[1].id) {
            return Err(Error::DuplicateIds);
        }
        Ok(table)
    }

    pub fn get(&self, id: KeyId) -> Option<&KeyValue> {
        let index = self
            .records
            .binary_search_by_key(&id, |record| record.id)
            .ok()?;
        self.records.get(index).map(|record| &record.value)
    }

    pub fn contains(&self, id: KeyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.records.iter().map(|record| record.id)
    }
}
