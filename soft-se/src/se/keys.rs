use crate::se::Error;
use core::fmt;
use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of every secure element key in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of keys a complete key list holds.
pub const KEY_COUNT: usize = KeyId::COUNT;

/// Identifier of a secure element key.
///
/// The discriminants are those of the C secure element so that raw key lists
/// stay interchangeable.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    EnumCount,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum KeyId {
    /// Application root key. LoRaWAN 1.0.x calls it `GenAppKey`.
    #[strum(serialize = "APP_KEY")]
    AppKey = 0,
    /// Network root key. LoRaWAN 1.0.x calls it `AppKey`.
    #[strum(serialize = "NWK_KEY")]
    NwkKey = 1,
    #[strum(serialize = "J_S_INT_KEY")]
    JSIntKey = 2,
    #[strum(serialize = "J_S_ENC_KEY")]
    JSEncKey = 3,
    #[strum(serialize = "F_NWK_S_INT_KEY")]
    FNwkSIntKey = 4,
    #[strum(serialize = "S_NWK_S_INT_KEY")]
    SNwkSIntKey = 5,
    #[strum(serialize = "NWK_S_ENC_KEY")]
    NwkSEncKey = 6,
    #[strum(serialize = "APP_S_KEY")]
    AppSKey = 7,
    #[strum(serialize = "MC_ROOT_KEY")]
    McRootKey = 8,
    #[strum(serialize = "MC_KE_KEY")]
    McKeKey = 9,
    #[strum(serialize = "MC_KEY_0")]
    McKey0 = 10,
    #[strum(serialize = "MC_APP_S_KEY_0")]
    McAppSKey0 = 11,
    #[strum(serialize = "MC_NWK_S_KEY_0")]
    McNwkSKey0 = 12,
    #[strum(serialize = "MC_KEY_1")]
    McKey1 = 13,
    #[strum(serialize = "MC_APP_S_KEY_1")]
    McAppSKey1 = 14,
    #[strum(serialize = "MC_NWK_S_KEY_1")]
    McNwkSKey1 = 15,
    #[strum(serialize = "MC_KEY_2")]
    McKey2 = 16,
    #[strum(serialize = "MC_APP_S_KEY_2")]
    McAppSKey2 = 17,
    #[strum(serialize = "MC_NWK_S_KEY_2")]
    McNwkSKey2 = 18,
    #[strum(serialize = "MC_KEY_3")]
    McKey3 = 19,
    #[strum(serialize = "MC_APP_S_KEY_3")]
    McAppSKey3 = 20,
    #[strum(serialize = "MC_NWK_S_KEY_3")]
    McNwkSKey3 = 21,
    /// All zeros key used to randomize class B ping slots.
    #[strum(serialize = "SLOT_RAND_ZERO_KEY")]
    SlotRandZeroKey = 22,
}

/// How a key comes into existence and whether it may change at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyLifetime {
    /// Long-term secret provisioned with the firmware. Never written at runtime.
    Root,
    /// Provisioned for ABP devices and replaced by derived keys after a join.
    Session,
    /// Zero placeholder until the key derivation writes it.
    Dynamic,
    /// Fixed value that no one may change.
    Constant,
}

impl KeyId {
    pub const fn lifetime(&self) -> KeyLifetime {
        match self {
            KeyId::AppKey | KeyId::NwkKey => KeyLifetime::Root,
            KeyId::FNwkSIntKey | KeyId::SNwkSIntKey | KeyId::NwkSEncKey | KeyId::AppSKey => {
                KeyLifetime::Session
            }
            KeyId::SlotRandZeroKey => KeyLifetime::Constant,
            _ => KeyLifetime::Dynamic,
        }
    }

    /// Whether the key may be written after the secure element was created.
    pub const fn is_updatable(&self) -> bool {
        matches!(
            self.lifetime(),
            KeyLifetime::Session | KeyLifetime::Dynamic
        )
    }

    pub const fn is_multicast(&self) -> bool {
        (*self as u8) >= (KeyId::McRootKey as u8) && (*self as u8) <= (KeyId::McNwkSKey3 as u8)
    }

    /// Multicast group a key belongs to, if any.
    pub const fn multicast_group(&self) -> Option<u8> {
        let raw = *self as u8;
        if raw >= KeyId::McKey0 as u8 && raw <= KeyId::McNwkSKey3 as u8 {
            Some((raw - KeyId::McKey0 as u8) / 3)
        } else {
            None
        }
    }

    /// Name of the identifier in the C secure element, e.g. `NWK_S_ENC_KEY`.
    pub fn c_name(&self) -> &'static str {
        self.into()
    }

    pub const fn description(&self) -> &'static str {
        match self {
            KeyId::AppKey => "Application root key",
            KeyId::NwkKey => "Network root key",
            KeyId::JSIntKey => "Join session integrity key",
            KeyId::JSEncKey => "Join session encryption key",
            KeyId::FNwkSIntKey => "Forwarding network session integrity key",
            KeyId::SNwkSIntKey => "Serving network session integrity key",
            KeyId::NwkSEncKey => "Network session encryption key",
            KeyId::AppSKey => "Application session key",
            KeyId::McRootKey => "Multicast root key",
            KeyId::McKeKey => "Multicast key encryption key",
            KeyId::McKey0 => "Multicast group #0 root key",
            KeyId::McAppSKey0 => "Multicast group #0 application session key",
            KeyId::McNwkSKey0 => "Multicast group #0 network session key",
            KeyId::McKey1 => "Multicast group #1 root key",
            KeyId::McAppSKey1 => "Multicast group #1 application session key",
            KeyId::McNwkSKey1 => "Multicast group #1 network session key",
            KeyId::McKey2 => "Multicast group #2 root key",
            KeyId::McAppSKey2 => "Multicast group #2 application session key",
            KeyId::McNwkSKey2 => "Multicast group #2 network session key",
            KeyId::McKey3 => "Multicast group #3 root key",
            KeyId::McAppSKey3 => "Multicast group #3 application session key",
            KeyId::McNwkSKey3 => "Multicast group #3 network session key",
            KeyId::SlotRandZeroKey => "All zeros key (class B usage)",
        }
    }
}

impl TryFrom<u8> for KeyId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        KeyId::from_repr(value).ok_or(Error::InvalidKeyId)
    }
}

impl From<KeyId> for u8 {
    fn from(value: KeyId) -> Self {
        value as u8
    }
}

/// 16 bytes of secret key material. Zeroized when dropped.
#[derive(Clone, Eq, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct KeyValue([u8; KEY_SIZE]);

impl KeyValue {
    pub const ZERO: KeyValue = KeyValue([0u8; KEY_SIZE]);

    pub const fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }
}

impl TryFrom<&[u8]> for KeyValue {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value.try_into().map_err(|_| Error::InvalidKeySize)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyValue(..)")
    }
}

/// A key identifier together with its value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRecord {
    pub id: KeyId,
    pub value: KeyValue,
}

impl KeyRecord {
    pub const fn new(id: KeyId, value: [u8; KEY_SIZE]) -> Self {
        Self {
            id,
            value: KeyValue::new(value),
        }
    }

    pub const fn zero(id: KeyId) -> Self {
        Self {
            id,
            value: KeyValue::ZERO,
        }
    }
}

#[cfg(test)]
mod test {
    extern crate alloc;
    use super::*;
    use alloc::format;
    use strum::IntoEnumIterator;

    #[test]
    fn discriminants_are_contiguous() {
        assert_eq!(KEY_COUNT, 23);
        for (index, id) in KeyId::iter().enumerate() {
            assert_eq!(u8::from(id) as usize, index);
            assert_eq!(KeyId::try_from(index as u8), Ok(id));
        }
        assert_eq!(KeyId::try_from(23), Err(Error::InvalidKeyId));
    }

    #[test]
    fn lifetimes() {
        assert_eq!(KeyId::AppKey.lifetime(), KeyLifetime::Root);
        assert_eq!(KeyId::NwkKey.lifetime(), KeyLifetime::Root);
        assert_eq!(KeyId::AppSKey.lifetime(), KeyLifetime::Session);
        assert_eq!(KeyId::JSIntKey.lifetime(), KeyLifetime::Dynamic);
        assert_eq!(KeyId::McNwkSKey3.lifetime(), KeyLifetime::Dynamic);
        assert_eq!(KeyId::SlotRandZeroKey.lifetime(), KeyLifetime::Constant);
        assert!(!KeyId::NwkKey.is_updatable());
        assert!(!KeyId::SlotRandZeroKey.is_updatable());
        assert!(KeyId::FNwkSIntKey.is_updatable());
        assert!(KeyId::McKeKey.is_updatable());
    }

    #[test]
    fn multicast_groups() {
        assert!(!KeyId::AppSKey.is_multicast());
        assert!(KeyId::McRootKey.is_multicast());
        assert!(!KeyId::SlotRandZeroKey.is_multicast());
        assert_eq!(KeyId::McRootKey.multicast_group(), None);
        assert_eq!(KeyId::McKey0.multicast_group(), Some(0));
        assert_eq!(KeyId::McNwkSKey1.multicast_group(), Some(1));
        assert_eq!(KeyId::McAppSKey2.multicast_group(), Some(2));
        assert_eq!(KeyId::McKey3.multicast_group(), Some(3));
    }

    #[test]
    fn c_names() {
        assert_eq!(KeyId::AppKey.c_name(), "APP_KEY");
        assert_eq!(KeyId::SNwkSIntKey.c_name(), "S_NWK_S_INT_KEY");
        assert_eq!(KeyId::McAppSKey3.c_name(), "MC_APP_S_KEY_3");
    }

    #[test]
    fn key_value_size_and_redaction() {
        assert_eq!(
            KeyValue::try_from(&[0u8; 15][..]),
            Err(Error::InvalidKeySize)
        );
        assert_eq!(
            KeyValue::try_from(&[0u8; 17][..]),
            Err(Error::InvalidKeySize)
        );
        let mut value = KeyValue::try_from(&[0xAB; KEY_SIZE][..]).expect("valid key size");
        assert!(!format!("{:?}", value).contains("AB"));
        assert!(!format!("{:?}", value).contains("171"));
        value.zeroize();
        assert!(value.is_zero());
    }

    #[test]
    fn key_value_zeroizes_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<KeyValue>();

        let mut slot = core::mem::MaybeUninit::new(KeyValue::new([0xAB; KEY_SIZE]));
        // SAFETY: `slot` was initialized above and is not used as a `KeyValue` afterwards.
        unsafe { slot.assume_init_drop() };
        // SAFETY: the bytes of a dropped `KeyValue` are still plain `u8`s.
        let bytes: [u8; KEY_SIZE] = unsafe { core::mem::transmute_copy(&slot) };
        assert_eq!(bytes, [0u8; KEY_SIZE]);
    }
}
