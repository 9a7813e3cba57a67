use crate::se::keys::{KeyId, KeyValue};
use crate::se::Error;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyPermissions {
    /// Whether or not the key can be set with outside data.
    pub import: bool,
    /// Whether or not the key material can leave the secure element.
    pub export: bool,
    /// Whether or not a stored key can be replaced by an import.
    pub overwrite: bool,
    /// Whether or not the key can be deleted.
    pub delete: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyInfo {
    pub id: KeyId,
    pub permissions: KeyPermissions,
}

/// Mutable storage for the keys that change at runtime.
pub trait KeyStore {
    /// Layout and permissions of the slot for `id`.
    fn get_key_info(&self, id: KeyId) -> Result<KeyInfo, Error>;

    /// Write key to storage.
    fn import_key(&mut self, id: KeyId, data: &[u8]) -> Result<(), Error>;

    /// Read key from storage.
    ///
    /// returns: The part of `dest` the key was written to or an error.
    fn export_key<'data>(&self, id: KeyId, dest: &'data mut [u8]) -> Result<&'data [u8], Error>;

    /// Read key from storage.
    ///
    /// Unlike `export_key()`, this function exports keys even if their permissions do not allow
    /// so. It is meant for the cryptographic engine of the secure element, which is trusted.
    ///
    /// returns: The part of `dest` the key was written to or an error.
    fn export_key_unchecked<'data>(
        &self,
        id: KeyId,
        dest: &'data mut [u8],
    ) -> Result<&'data [u8], Error>;

    /// Delete and zeroize the key for given ID.
    ///
    /// return: An error, if the key could not be found.
    fn delete(&mut self, id: KeyId) -> Result<(), Error>;

    /// Returns whether or not a key for the given 'id' is present in the store.
    fn is_stored(&self, id: KeyId) -> bool;

    /// Read a key into a [`KeyValue`] without checking the export permission.
    fn key_value_unchecked(&self, id: KeyId) -> Result<KeyValue, Error> {
        let mut buffer = [0u8; crate::se::keys::KEY_SIZE];
        let value = KeyValue::try_from(self.export_key_unchecked(id, &mut buffer)?);
        zeroize::Zeroize::zeroize(&mut buffer);
        value
    }
}
