pub mod identity;
pub mod keys;

use crate::integration::memory_key_store::MemoryKeyStore;
use crate::se::element::SecureElement;
use crate::se::identity::Platform;
use crate::se::Error;

/// Secure element with the default key store layout.
pub type DefaultSecureElement = SecureElement<MemoryKeyStore<{ keys::NUM_STORED_KEYS }>>;

/// Secure element holding the configured identity and key list.
pub fn default_secure_element<P: Platform + ?Sized>(
    platform: &mut P,
) -> Result<DefaultSecureElement, Error> {
    let store = MemoryKeyStore::try_new(&keys::KEY_INFOS)?;
    SecureElement::try_new(identity::IDENTITY.resolve(platform), &keys::KEY_LIST, store)
}
