use crate::se::keys::{KeyId, KeyLifetime, KeyRecord, KEY_COUNT};
use crate::se::keystore::{KeyInfo, KeyPermissions};

/// Number of keys that live in the mutable key store
pub const NUM_STORED_KEYS: usize = 20;
/// Number of keys that live in the read-only key table
pub const NUM_TABLE_KEYS: usize = KEY_COUNT - NUM_STORED_KEYS;

const DEFAULT_KEY: [u8; 16] = [
    0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF, 0x4F, 0x3C,
];

/// Default key list of the device, in secure element order.
pub const KEY_LIST: [KeyRecord; KEY_COUNT] = [
    // LoRaWAN 1.0.x: GenAppKey
    KeyRecord::new(KeyId::AppKey, DEFAULT_KEY),
    // LoRaWAN 1.0.x: AppKey
    KeyRecord::new(
        KeyId::NwkKey,
        [
            0x76, 0x8F, 0xA0, 0xE3, 0x5E, 0x09, 0x1B, 0x57, 0x08, 0xAB, 0x26, 0xDE, 0xCB, 0x3A,
            0xE8, 0x9A,
        ],
    ),
    KeyRecord::zero(KeyId::JSIntKey),
    KeyRecord::zero(KeyId::JSEncKey),
    // LoRaWAN 1.0.x: NwkSKey
    KeyRecord::new(KeyId::FNwkSIntKey, DEFAULT_KEY),
    // Must be the same as FNwkSIntKey
    KeyRecord::new(KeyId::SNwkSIntKey, DEFAULT_KEY),
    // Must be the same as FNwkSIntKey
    KeyRecord::new(KeyId::NwkSEncKey, DEFAULT_KEY),
    KeyRecord::new(KeyId::AppSKey, DEFAULT_KEY),
    KeyRecord::zero(KeyId::McRootKey),
    KeyRecord::zero(KeyId::McKeKey),
    KeyRecord::zero(KeyId::McKey0),
    KeyRecord::zero(KeyId::McAppSKey0),
    KeyRecord::zero(KeyId::McNwkSKey0),
    KeyRecord::zero(KeyId::McKey1),
    KeyRecord::zero(KeyId::McAppSKey1),
    KeyRecord::zero(KeyId::McNwkSKey1),
    KeyRecord::zero(KeyId::McKey2),
    KeyRecord::zero(KeyId::McAppSKey2),
    KeyRecord::zero(KeyId::McNwkSKey2),
    KeyRecord::zero(KeyId::McKey3),
    KeyRecord::zero(KeyId::McAppSKey3),
    KeyRecord::zero(KeyId::McNwkSKey3),
    KeyRecord::zero(KeyId::SlotRandZeroKey),
];

/// Store permissions of a key that changes at runtime.
pub const fn stored_key_info(id: KeyId) -> KeyInfo {
    KeyInfo {
        id,
        permissions: KeyPermissions {
            import: true,
            export: false,
            overwrite: true,
            delete: matches!(id.lifetime(), KeyLifetime::Dynamic),
        },
    }
}

/// Store layout for every key that changes at runtime.
pub const KEY_INFOS: [KeyInfo; NUM_STORED_KEYS] = [
    stored_key_info(KeyId::JSIntKey),
    stored_key_info(KeyId::JSEncKey),
    stored_key_info(KeyId::FNwkSIntKey),
    stored_key_info(KeyId::SNwkSIntKey),
    stored_key_info(KeyId::NwkSEncKey),
    stored_key_info(KeyId::AppSKey),
    stored_key_info(KeyId::McRootKey),
    stored_key_info(KeyId::McKeKey),
    stored_key_info(KeyId::McKey0),
    stored_key_info(KeyId::McAppSKey0),
    stored_key_info(KeyId::McNwkSKey0),
    stored_key_info(KeyId::McKey1),
    stored_key_info(KeyId::McAppSKey1),
    stored_key_info(KeyId::McNwkSKey1),
    stored_key_info(KeyId::McKey2),
    stored_key_info(KeyId::McAppSKey2),
    stored_key_info(KeyId::McNwkSKey2),
    stored_key_info(KeyId::McKey3),
    stored_key_info(KeyId::McAppSKey3),
    stored_key_info(KeyId::McNwkSKey3),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn store_layout_covers_updatable_keys() {
        assert!(KEY_INFOS.iter().all(|info| info.id.is_updatable()));
        assert_eq!(
            KEY_LIST.iter().filter(|r| r.id.is_updatable()).count(),
            NUM_STORED_KEYS
        );
        assert_eq!(
            KEY_LIST.iter().filter(|r| !r.id.is_updatable()).count(),
            NUM_TABLE_KEYS
        );
    }

    #[test]
    fn dynamic_keys_start_zeroed() {
        assert!(KEY_LIST
            .iter()
            .filter(|r| r.id.lifetime() == KeyLifetime::Dynamic)
            .all(|r| r.value.is_zero()));
        assert!(KEY_LIST
            .iter()
            .filter(|r| r.id.lifetime() != KeyLifetime::Dynamic && r.id != KeyId::SlotRandZeroKey)
            .all(|r| !r.value.is_zero()));
    }

    #[test]
    fn only_dynamic_keys_can_be_deleted() {
        for info in KEY_INFOS {
            assert_eq!(
                info.permissions.delete,
                info.id.lifetime() == KeyLifetime::Dynamic
            );
            assert!(info.permissions.import && info.permissions.overwrite);
            assert!(!info.permissions.export);
        }
    }
}
