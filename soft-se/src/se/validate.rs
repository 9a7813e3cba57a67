//! Shape checks for key lists.
//!
//! Key, EUI, address and PIN widths are fixed by their types, so what remains to check at
//! runtime is completeness and uniqueness of a key list.

use crate::se::keys::{KeyId, KeyLifetime, KeyRecord, KEY_COUNT};
use crate::se::Error;

/// Fails with `DuplicateIds` if any key ID appears more than once.
pub fn check_unique(records: &[KeyRecord]) -> Result<(), Error> {
    let mut seen = [false; KEY_COUNT];
    for record in records {
        let index = record.id as usize;
        if seen[index] {
            return Err(Error::DuplicateIds);
        }
        seen[index] = true;
    }
    Ok(())
}

/// Checks that `records` is a complete key list of one device.
pub fn check_key_list(records: &[KeyRecord]) -> Result<(), Error> {
    check_unique(records)?;
    if records.len() != KEY_COUNT {
        return Err(Error::MissingKeys(KEY_COUNT - records.len()));
    }
    check_constant_keys(records)
}

/// Constant keys must keep their all-zero value.
pub fn check_constant_keys(records: &[KeyRecord]) -> Result<(), Error> {
    match records
        .iter()
        .find(|record| record.id.lifetime() == KeyLifetime::Constant && !record.value.is_zero())
    {
        Some(record) => Err(Error::NonZeroConstantKey(record.id)),
        None => Ok(()),
    }
}

/// The record for `id`, if present.
pub fn find(records: &[KeyRecord], id: KeyId) -> Option<&KeyRecord> {
    records.iter().find(|record| record.id == id)
}
