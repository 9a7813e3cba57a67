pub mod compat;
pub mod element;
pub mod identity;
pub mod keys;
pub mod keystore;
pub mod table;
pub mod validate;

/// Errors of the key table, the key store and the secure element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, displaydoc::Display)]
pub enum Error {
    /// the operation is not permitted
    NotAllowed,
    /// the requested key ID is not defined
    InvalidKeyId,
    /// the provided buffer has an invalid size
    InvalidBufferSize,
    /// the requested key was not found
    KeyNotFound,
    /// the key store cannot hold the amount of requested keys
    KeyStoreTooSmall,
    /// duplicate key IDs in key list
    DuplicateIds,
    /// key material must be exactly 16 bytes
    InvalidKeySize,
    /// key list is missing {0} key(s)
    MissingKeys(usize),
    /// constant key {0:?} is not all zeros
    NonZeroConstantKey(keys::KeyId),
    /// key {0:?} must be identical to key {1:?}
    KeyMismatch(keys::KeyId, keys::KeyId),
    /// the secure element is not initialized
    NotInitialized,
    /// the secure element is already initialized
    AlreadyInitialized,
    /// the secure element is in use
    Busy,
}
