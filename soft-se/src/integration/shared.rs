use crate::se::element::SecureElement;
use crate::se::keystore::KeyStore;
use crate::se::Error;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

/// Secure element that lives in a `static` and is created once at start-up.
pub struct SharedSecureElement<M: RawMutex, S: KeyStore> {
    inner: Mutex<M, RefCell<Option<SecureElement<S>>>>,
}

impl<M: RawMutex, S: KeyStore> Default for SharedSecureElement<M, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, S: KeyStore> SharedSecureElement<M, S> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    pub fn init(&self, secure_element: SecureElement<S>) -> Result<(), Error> {
        self.inner.lock(|cell| {
            let mut slot = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
            if slot.is_some() {
                log::warn!("secure element initialized twice");
                return Err(Error::AlreadyInitialized);
            }
            *slot = Some(secure_element);
            Ok(())
        })
    }

    pub fn is_initialized(&self) -> Result<bool, Error> {
        self.inner.lock(|cell| {
            let slot = cell.try_borrow().map_err(|_| Error::Busy)?;
            Ok(slot.is_some())
        })
    }

    /// Run `f` with exclusive access to the secure element.
    ///
    /// Accessing the same instance from within `f` fails with [`Error::Busy`].
    pub fn with<U>(&self, f: impl FnOnce(&mut SecureElement<S>) -> U) -> Result<U, Error> {
        self.inner.lock(|cell| {
            let mut slot = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
            slot.as_mut().map(f).ok_or(Error::NotInitialized)
        })
    }

    /// Remove the secure element, e.g. to reprovision the device.
    pub fn take(&self) -> Result<Option<SecureElement<S>>, Error> {
        self.inner.lock(|cell| {
            let mut slot = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
            Ok(slot.take())
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::keys::NUM_STORED_KEYS;
    use crate::config::{default_secure_element, DefaultSecureElement};
    use crate::integration::memory_key_store::MemoryKeyStore;
    use crate::se::identity::{Eui64, Platform};
    use crate::se::keys::{KeyId, KeyValue};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    struct TestPlatform;

    impl Platform for TestPlatform {
        fn unique_id(&mut self) -> Eui64 {
            Eui64::from_u64(1)
        }

        fn random_seed(&mut self) -> u64 {
            7
        }
    }

    static SECURE_ELEMENT: SharedSecureElement<
        CriticalSectionRawMutex,
        MemoryKeyStore<NUM_STORED_KEYS>,
    > = SharedSecureElement::new();

    fn create() -> DefaultSecureElement {
        default_secure_element(&mut TestPlatform).expect("failed to create secure element")
    }

    #[test]
    fn init_once_and_use() {
        assert_eq!(SECURE_ELEMENT.with(|_| ()), Err(Error::NotInitialized));
        assert_eq!(SECURE_ELEMENT.is_initialized(), Ok(false));
        assert_eq!(SECURE_ELEMENT.init(create()), Ok(()));
        assert_eq!(SECURE_ELEMENT.is_initialized(), Ok(true));
        assert_eq!(SECURE_ELEMENT.init(create()), Err(Error::AlreadyInitialized));

        let value = KeyValue::new([0x11; 16]);
        assert_eq!(
            SECURE_ELEMENT.with(|se| se.update_key(KeyId::McRootKey, &value)),
            Ok(Ok(()))
        );
        assert_eq!(
            SECURE_ELEMENT.with(|se| se.key_value_unchecked(KeyId::McRootKey)),
            Ok(Ok(value))
        );

        assert!(matches!(SECURE_ELEMENT.take(), Ok(Some(_))));
        assert_eq!(SECURE_ELEMENT.is_initialized(), Ok(false));
        assert!(matches!(SECURE_ELEMENT.take(), Ok(None)));
    }

    #[test]
    fn nested_access_is_busy() {
        static NESTED: SharedSecureElement<
            CriticalSectionRawMutex,
            MemoryKeyStore<NUM_STORED_KEYS>,
        > = SharedSecureElement::new();

        assert_eq!(NESTED.init(create()), Ok(()));
        assert_eq!(
            NESTED.with(|_| NESTED.is_initialized()),
            Ok(Err(Error::Busy))
        );
        assert_eq!(NESTED.with(|_| NESTED.with(|_| ())), Ok(Err(Error::Busy)));
        assert_eq!(
            NESTED.with(|_| NESTED.init(create())),
            Ok(Err(Error::Busy))
        );
        assert_eq!(
            NESTED.with(|_| NESTED.take().map(|se| se.is_some())),
            Ok(Err(Error::Busy))
        );
        // The outer access still works afterwards
        assert_eq!(NESTED.with(|se| se.contains_key(KeyId::AppKey)), Ok(true));
        assert_eq!(NESTED.is_initialized(), Ok(true));
    }
}
