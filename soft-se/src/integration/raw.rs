use crate::se;
use crate::se::identity::{self, DevAddr, DeviceIdentity, Eui64, Pin};
use crate::se::keys::{KeyId, KeyRecord};

/// Raw version of keys::KeyRecord
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RawKeyRecord {
    /// Numeric value of the key identifier.
    pub key_id: u8,
    pub key_value: [u8; 16],
}

/// Raw version of identity::DeviceIdentity
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RawIdentity {
    /// Big-endian device EUI.
    pub dev_eui: [u8; 8],
    /// Big-endian join EUI.
    pub join_eui: [u8; 8],
    pub dev_addr: u32,
    pub pin: [u8; 4],
}

/// Raw version of se::Error
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyStoreErrorRaw {
    /// The operation is not permitted.
    NotAllowed,
    /// The requested key ID is not defined.
    InvalidKeyId,
    /// The provided buffer has an invalid size.
    InvalidBufferSize,
    /// The requested key was not found.
    KeyNotFound,
    /// The key store cannot hold the amount of requested keys.
    KeyStoreTooSmall,
    /// Duplicate key IDs in key list.
    DuplicateIds,
    /// Key material is not 16 bytes long.
    InvalidKeySize,
    /// Key list is incomplete.
    MissingKeys,
    /// A constant key is not all zeros.
    NonZeroConstantKey,
    /// Keys that must be identical differ.
    KeyMismatch,
    /// The secure element is not initialized.
    NotInitialized,
    /// The secure element is already initialized.
    AlreadyInitialized,
    /// The secure element is in use.
    Busy,
}

/// Raw version of identity::ParseError
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IdentityErrorRaw {
    /// Wrong number of hex digits.
    InvalidLength,
    /// Invalid hex digit.
    InvalidDigit,
    /// Misplaced or mixed separators.
    InvalidSeparator,
}

impl From<&KeyRecord> for RawKeyRecord {
    fn from(value: &KeyRecord) -> Self {
        Self {
            key_id: value.id.into(),
            key_value: *value.value.as_bytes(),
        }
    }
}

impl TryFrom<&RawKeyRecord> for KeyRecord {
    type Error = se::Error;

    fn try_from(value: &RawKeyRecord) -> Result<Self, Self::Error> {
        Ok(KeyRecord::new(KeyId::try_from(value.key_id)?, value.key_value))
    }
}

impl From<&DeviceIdentity> for RawIdentity {
    fn from(value: &DeviceIdentity) -> Self {
        Self {
            dev_eui: *value.dev_eui.as_bytes(),
            join_eui: *value.join_eui.as_bytes(),
            dev_addr: value.dev_addr.value(),
            pin: *value.pin.as_bytes(),
        }
    }
}

impl From<&RawIdentity> for DeviceIdentity {
    fn from(value: &RawIdentity) -> Self {
        Self {
            dev_eui: Eui64::new(value.dev_eui),
            join_eui: Eui64::new(value.join_eui),
            dev_addr: DevAddr::new(value.dev_addr),
            pin: Pin::new(value.pin),
        }
    }
}

impl From<se::Error> for KeyStoreErrorRaw {
    fn from(value: se::Error) -> Self {
        match value {
            se::Error::NotAllowed => KeyStoreErrorRaw::NotAllowed,
            se::Error::InvalidKeyId => KeyStoreErrorRaw::InvalidKeyId,
            se::Error::InvalidBufferSize => KeyStoreErrorRaw::InvalidBufferSize,
            se::Error::KeyNotFound => KeyStoreErrorRaw::KeyNotFound,
            se::Error::KeyStoreTooSmall => KeyStoreErrorRaw::KeyStoreTooSmall,
            se::Error::DuplicateIds => KeyStoreErrorRaw::DuplicateIds,
            se::Error::InvalidKeySize => KeyStoreErrorRaw::InvalidKeySize,
            se::Error::MissingKeys(_) => KeyStoreErrorRaw::MissingKeys,
            se::Error::NonZeroConstantKey(_) => KeyStoreErrorRaw::NonZeroConstantKey,
            se::Error::KeyMismatch(_, _) => KeyStoreErrorRaw::KeyMismatch,
            se::Error::NotInitialized => KeyStoreErrorRaw::NotInitialized,
            se::Error::AlreadyInitialized => KeyStoreErrorRaw::AlreadyInitialized,
            se::Error::Busy => KeyStoreErrorRaw::Busy,
        }
    }
}

impl From<identity::ParseError> for IdentityErrorRaw {
    fn from(value: identity::ParseError) -> Self {
        match value {
            identity::ParseError::InvalidLength(_) => IdentityErrorRaw::InvalidLength,
            identity::ParseError::InvalidDigit => IdentityErrorRaw::InvalidDigit,
            identity::ParseError::InvalidSeparator => IdentityErrorRaw::InvalidSeparator,
        }
    }
}
