use crate::config::keys::NUM_TABLE_KEYS;
use crate::se::compat;
use crate::se::identity::{DevAddr, DeviceIdentity, Eui64, Pin};
use crate::se::keys::{KeyId, KeyLifetime, KeyRecord, KeyValue, KEY_SIZE};
use crate::se::keystore::KeyStore;
use crate::se::table::KeyTable;
use crate::se::validate;
use crate::se::Error;
use strum::IntoEnumIterator;

/// Identity and keys of one end device.
///
/// Root and constant keys sit in a read-only [`KeyTable`]. Session and dynamic keys are kept in
/// the key store `S` and change only through [`SecureElement::update_key`].
pub struct SecureElement<S: KeyStore> {
    identity: DeviceIdentity,
    table: KeyTable<NUM_TABLE_KEYS>,
    store: S,
}

impl<S: KeyStore> SecureElement<S> {
    /// Creates the secure element from a complete key list.
    ///
    /// The store must provide a slot with import permission for every key that changes at
    /// runtime.
    pub fn try_new(
        identity: DeviceIdentity,
        records: &[KeyRecord],
        mut store: S,
    ) -> Result<Self, Error> {
        validate::check_key_list(records)?;
        let table = KeyTable::try_new(records.iter().filter(|record| !record.id.is_updatable()))?;
        for record in records.iter().filter(|record| record.id.is_updatable()) {
            store.import_key(record.id, record.value.as_bytes())?;
        }
        log::debug!(
            "secure element ready: dev_eui={} join_eui={} keys={}",
            identity.dev_eui,
            identity.join_eui,
            records.len()
        );
        Ok(Self {
            identity,
            table,
            store,
        })
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn dev_eui(&self) -> Eui64 {
        self.identity.dev_eui
    }

    pub fn join_eui(&self) -> Eui64 {
        self.identity.join_eui
    }

    pub fn dev_addr(&self) -> DevAddr {
        self.identity.dev_addr
    }

    /// Replace the device address, e.g. with the one assigned in a join accept.
    pub fn set_dev_addr(&mut self, dev_addr: DevAddr) {
        log::debug!("device address {} -> {}", self.identity.dev_addr, dev_addr);
        self.identity.dev_addr = dev_addr;
    }

    pub fn pin(&self) -> Pin {
        self.identity.pin
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write a derived key. Root and constant keys are refused.
    pub fn update_key(&mut self, id: KeyId, value: &KeyValue) -> Result<(), Error> {
        if !id.is_updatable() {
            log::warn!("refused update of {} key {:?}", id.c_name(), id.lifetime());
            return Err(Error::NotAllowed);
        }
        let info = self.store.get_key_info(id)?;
        if !info.permissions.import || (self.store.is_stored(id) && !info.permissions.overwrite) {
            log::warn!("key store does not allow updating {}", id.c_name());
            return Err(Error::NotAllowed);
        }
        self.store.import_key(id, value.as_bytes())?;
        log::debug!("updated key {}", id.c_name());
        Ok(())
    }

    /// Delete a dynamic key. Reading it afterwards fails with `KeyNotFound`.
    pub fn delete_key(&mut self, id: KeyId) -> Result<(), Error> {
        if self.table.contains(id) {
            return Err(Error::NotAllowed);
        }
        if !self.store.get_key_info(id)?.permissions.delete {
            log::warn!("key store does not allow deleting {}", id.c_name());
            return Err(Error::NotAllowed);
        }
        self.store.delete(id)?;
        log::debug!("deleted key {}", id.c_name());
        Ok(())
    }

    /// Reset all dynamic keys to their zero placeholder, as before the first join.
    pub fn reset_dynamic_keys(&mut self) -> Result<(), Error> {
        for id in KeyId::iter().filter(|id| id.lifetime() == KeyLifetime::Dynamic) {
            self.store.import_key(id, &[0u8; KEY_SIZE])?;
        }
        log::debug!("dynamic keys reset");
        Ok(())
    }

    /// Whether the secure element currently holds a value for `id`.
    pub fn contains_key(&self, id: KeyId) -> bool {
        self.table.contains(id) || self.store.is_stored(id)
    }

    /// IDs of all keys currently held, in ascending order.
    pub fn key_ids(&self) -> impl Iterator<Item = KeyId> + '_ {
        KeyId::iter().filter(|id| self.contains_key(*id))
    }

    /// Read a key for use by the cryptographic engine, ignoring export permissions.
    pub fn export_key_unchecked<'data>(
        &self,
        id: KeyId,
        dest: &'data mut [u8],
    ) -> Result<&'data [u8], Error> {
        match self.table.get(id) {
            Some(value) => {
                if dest.len() < KEY_SIZE {
                    return Err(Error::InvalidBufferSize);
                }
                let dest = &mut dest[..KEY_SIZE];
                dest.copy_from_slice(value.as_bytes());
                Ok(dest)
            }
            None => self.store.export_key_unchecked(id, dest),
        }
    }

    /// Read a key for use outside the secure element. Root and constant keys never leave it.
    pub fn export_key<'data>(
        &self,
        id: KeyId,
        dest: &'data mut [u8],
    ) -> Result<&'data [u8], Error> {
        if self.table.contains(id) {
            return Err(Error::NotAllowed);
        }
        self.store.export_key(id, dest)
    }

    pub fn key_value_unchecked(&self, id: KeyId) -> Result<KeyValue, Error> {
        match self.table.get(id) {
            Some(value) => Ok(value.clone()),
            None => self.store.key_value_unchecked(id),
        }
    }

    /// Checks that the network session keys are identical, as LoRaWAN 1.0.x requires.
    pub fn check_lorawan10_consistency(&self) -> Result<(), Error> {
        compat::check_lorawan10_consistency(|id| self.key_value_unchecked(id))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::keys::{KEY_INFOS, KEY_LIST, NUM_STORED_KEYS};
    use crate::integration::memory_key_store::MemoryKeyStore;
    use crate::se::keys::KEY_COUNT;

    const IDENTITY: DeviceIdentity = DeviceIdentity {
        dev_eui: Eui64::from_u64(0x70B3_D58F_F101_5889),
        join_eui: Eui64::from_u64(0x70B3_D57E_D001_245D),
        dev_addr: DevAddr::new(0x2601_1234),
        pin: Pin::new([0, 0, 0, 0]),
    };

    fn init() -> SecureElement<MemoryKeyStore<NUM_STORED_KEYS>> {
        let store = MemoryKeyStore::try_new(&KEY_INFOS).expect("failed to create key store");
        SecureElement::try_new(IDENTITY, &KEY_LIST, store).expect("failed to create element")
    }

    #[test]
    fn holds_every_key() {
        let se = init();
        assert_eq!(se.key_ids().count(), KEY_COUNT);
        let mut buffer = [0u8; KEY_SIZE];
        for record in KEY_LIST.iter() {
            assert_eq!(
                se.export_key_unchecked(record.id, &mut buffer)
                    .expect("failed to read key"),
                record.value.as_bytes()
            );
        }
        assert_eq!(se.check_lorawan10_consistency(), Ok(()));
    }

    #[test]
    fn root_keys_are_immutable() {
        let mut se = init();
        let value = KeyValue::new([0x55; KEY_SIZE]);
        assert_eq!(se.update_key(KeyId::AppKey, &value), Err(Error::NotAllowed));
        assert_eq!(se.update_key(KeyId::NwkKey, &value), Err(Error::NotAllowed));
        assert_eq!(
            se.update_key(KeyId::SlotRandZeroKey, &value),
            Err(Error::NotAllowed)
        );
        assert_eq!(se.delete_key(KeyId::AppKey), Err(Error::NotAllowed));
        assert_eq!(
            se.key_value_unchecked(KeyId::NwkKey),
            Ok(KEY_LIST[1].value.clone())
        );
    }

    #[test]
    fn dynamic_keys_update_and_reset() {
        let mut se = init();
        let value = KeyValue::new([0x55; KEY_SIZE]);
        assert_eq!(se.update_key(KeyId::McKey2, &value), Ok(()));
        assert_eq!(se.key_value_unchecked(KeyId::McKey2), Ok(value.clone()));
        assert_eq!(se.update_key(KeyId::AppSKey, &value), Ok(()));

        assert_eq!(se.reset_dynamic_keys(), Ok(()));
        assert_eq!(se.key_value_unchecked(KeyId::McKey2), Ok(KeyValue::ZERO));
        // Session keys survive a reset of the dynamic keys
        assert_eq!(se.key_value_unchecked(KeyId::AppSKey), Ok(value));
    }

    #[test]
    fn delete_dynamic_key() {
        let mut se = init();
        assert_eq!(se.delete_key(KeyId::JSEncKey), Ok(()));
        assert!(!se.contains_key(KeyId::JSEncKey));
        assert_eq!(
            se.key_value_unchecked(KeyId::JSEncKey),
            Err(Error::KeyNotFound)
        );
        assert_eq!(se.delete_key(KeyId::FNwkSIntKey), Err(Error::NotAllowed));
        assert_eq!(se.key_ids().count(), KEY_COUNT - 1);
    }

    #[test]
    fn keys_do_not_leave_the_element() {
        let se = init();
        let mut buffer = [0u8; KEY_SIZE];
        assert_eq!(
            se.export_key(KeyId::AppKey, &mut buffer),
            Err(Error::NotAllowed)
        );
        assert_eq!(
            se.export_key(KeyId::AppSKey, &mut buffer),
            Err(Error::NotAllowed)
        );
        let mut small = [0u8; KEY_SIZE - 1];
        assert_eq!(
            se.export_key_unchecked(KeyId::AppKey, &mut small),
            Err(Error::InvalidBufferSize)
        );
    }

    #[test]
    fn inconsistent_session_keys() {
        let mut se = init();
        let value = KeyValue::new([0x55; KEY_SIZE]);
        se.update_key(KeyId::SNwkSIntKey, &value)
            .expect("failed to update key");
        assert_eq!(
            se.check_lorawan10_consistency(),
            Err(Error::KeyMismatch(KeyId::SNwkSIntKey, KeyId::FNwkSIntKey))
        );
    }

    #[test]
    fn dev_addr_assignment() {
        let mut se = init();
        assert_eq!(se.dev_addr(), DevAddr::new(0x2601_1234));
        se.set_dev_addr(DevAddr::new(0x2602_0000));
        assert_eq!(se.identity().dev_addr, DevAddr::new(0x2602_0000));
        assert_eq!(se.dev_eui(), IDENTITY.dev_eui);
        assert_eq!(se.join_eui(), IDENTITY.join_eui);
        assert_eq!(se.pin(), IDENTITY.pin);
    }

    #[test]
    fn store_permissions_apply() {
        let mut key_infos = KEY_INFOS;
        for info in key_infos.iter_mut() {
            match info.id {
                KeyId::McKey1 => info.permissions.delete = false,
                KeyId::McKeKey => info.permissions.overwrite = false,
                _ => {}
            }
        }
        let store = MemoryKeyStore::<NUM_STORED_KEYS>::try_new(&key_infos)
            .expect("failed to create key store");
        let mut se =
            SecureElement::try_new(IDENTITY, &KEY_LIST, store).expect("failed to create element");
        assert_eq!(se.delete_key(KeyId::McKey1), Err(Error::NotAllowed));
        assert!(se.contains_key(KeyId::McKey1));
        assert_eq!(
            se.update_key(KeyId::McKeKey, &KeyValue::new([0x55; KEY_SIZE])),
            Err(Error::NotAllowed)
        );
        assert_eq!(se.key_value_unchecked(KeyId::McKeKey), Ok(KeyValue::ZERO));
        assert_eq!(se.delete_key(KeyId::McKey2), Ok(()));
    }

    #[test]
    fn store_without_slots_is_rejected() {
        let store = MemoryKeyStore::<NUM_STORED_KEYS>::try_new(&KEY_INFOS[1..])
            .expect("failed to create key store");
        assert!(matches!(
            SecureElement::try_new(IDENTITY, &KEY_LIST, store),
            Err(Error::InvalidKeyId)
        ));
        let store = MemoryKeyStore::<NUM_STORED_KEYS>::try_new(&KEY_INFOS)
            .expect("failed to create key store");
        assert!(matches!(
            SecureElement::try_new(IDENTITY, &KEY_LIST[1..], store),
            Err(Error::MissingKeys(1))
        ));
    }
}
