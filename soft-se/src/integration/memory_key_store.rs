use crate::se::keys::{KeyId, KEY_SIZE};
use crate::se::keystore::{KeyInfo, KeyStore};
use crate::se::Error;
use heapless::Vec;
use zeroize::Zeroize;

/// Key store that keeps all keys in RAM.
pub struct MemoryKeyStore<const MAX_KEYS: usize> {
    layout: SortedKeyStoreLayout<MAX_KEYS>,
}

impl<const MAX_KEYS: usize> MemoryKeyStore<MAX_KEYS> {
    pub fn try_new(key_infos: &[KeyInfo]) -> Result<Self, Error> {
        Ok(Self {
            layout: SortedKeyStoreLayout::try_from(key_infos)?,
        })
    }

    /// IDs of all keys this store has a slot for, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.layout.inner.iter().map(|slot| slot.info.id)
    }
}

impl<const MAX_KEYS: usize> KeyStore for MemoryKeyStore<MAX_KEYS> {
    fn get_key_info(&self, id: KeyId) -> Result<KeyInfo, Error> {
        match self.layout.get(id) {
            None => Err(Error::InvalidKeyId),
            Some(slot) => Ok(slot.info),
        }
    }

    fn import_key(&mut self, id: KeyId, data: &[u8]) -> Result<(), Error> {
        match self.layout.get_mut(id) {
            None => Err(Error::InvalidKeyId),
            Some(slot) => {
                if !slot.info.permissions.import {
                    return Err(Error::NotAllowed);
                }
                if slot.stored && !slot.info.permissions.overwrite {
                    return Err(Error::NotAllowed);
                }
                if data.len() != KEY_SIZE {
                    return Err(Error::InvalidKeySize);
                }
                slot.key.copy_from_slice(data);
                slot.stored = true;
                Ok(())
            }
        }
    }

    fn export_key<'data>(&self, id: KeyId, dest: &'data mut [u8]) -> Result<&'data [u8], Error> {
        match self.layout.get(id) {
            None => Err(Error::InvalidKeyId),
            Some(slot) => {
                if !slot.info.permissions.export {
                    return Err(Error::NotAllowed);
                }
                self.export_key_unchecked(id, dest)
            }
        }
    }

    fn export_key_unchecked<'data>(
        &self,
        id: KeyId,
        dest: &'data mut [u8],
    ) -> Result<&'data [u8], Error> {
        match self.layout.get(id) {
            None => Err(Error::InvalidKeyId),
            Some(slot) => {
                if !slot.stored {
                    return Err(Error::KeyNotFound);
                }
                if dest.len() < KEY_SIZE {
                    return Err(Error::InvalidBufferSize);
                }
                let dest = &mut dest[..KEY_SIZE];
                dest.copy_from_slice(&slot.key);
                Ok(dest)
            }
        }
    }

    fn delete(&mut self, id: KeyId) -> Result<(), Error> {
        match self.layout.get_mut(id) {
            None => Err(Error::InvalidKeyId),
            Some(slot) => {
                if !slot.info.permissions.delete {
                    return Err(Error::NotAllowed);
                }
                if !slot.stored {
                    return Err(Error::KeyNotFound);
                }
                slot.key.zeroize();
                slot.stored = false;
                Ok(())
            }
        }
    }

    fn is_stored(&self, id: KeyId) -> bool {
        match self.layout.get(id) {
            None => false,
            Some(slot) => slot.stored,
        }
    }
}

impl<const MAX_KEYS: usize> Drop for MemoryKeyStore<MAX_KEYS> {
    fn drop(&mut self) {
        for slot in self.layout.inner.iter_mut() {
            slot.key.zeroize();
        }
    }
}

/// Storage slot of a single key. Every key has the same fixed size.
struct KeySlot {
    /// Static information about this key
    info: KeyInfo,
    key: [u8; KEY_SIZE],
    /// Whether `key` holds imported material
    stored: bool,
}

/// Keeps a list of `KeySlot`s sorted by key ID
#[derive(Default)]
struct SortedKeyStoreLayout<const MAX_KEYS: usize> {
    inner: Vec<KeySlot, MAX_KEYS>,
}

impl<const MAX_KEYS: usize> SortedKeyStoreLayout<MAX_KEYS> {
    pub fn get(&self, id: KeyId) -> Option<&KeySlot> {
        let index = self
            .inner
            .binary_search_by_key(&id, |slot| slot.info.id)
            .ok()?;
        self.inner.get(index)
    }

    pub fn get_mut(&mut self, id: KeyId) -> Option<&mut KeySlot> {
        let index = self
            .inner
            .binary_search_by_key(&id, |slot| slot.info.id)
            .ok()?;
        self.inner.get_mut(index)
    }
}

impl<const MAX_KEYS: usize> TryFrom<&[KeyInfo]> for SortedKeyStoreLayout<MAX_KEYS> {
    type Error = Error;

    fn try_from(key_infos: &[KeyInfo]) -> Result<Self, Self::Error> {
        if key_infos.len() > MAX_KEYS {
            return Err(Error::KeyStoreTooSmall);
        }

        // Sort by key ID
        let mut key_infos: Vec<_, MAX_KEYS> = key_infos.iter().collect();
        key_infos.sort_unstable_by_key(|key_info| key_info.id);

        // Check for duplicate IDs
        if key_infos.windows(2).any(|w| w[0].id == w[1].id) {
            return Err(Error::DuplicateIds);
        }

        let mut ret = Self::default();
        for key_info in key_infos {
            let slot = KeySlot {
                info: *key_info,
                key: [0u8; KEY_SIZE],
                stored: false,
            };
            ret.inner
                .push(slot)
                .map_err(|_| Error::KeyStoreTooSmall)?;
        }
        Ok(ret)
    }
}
