#![allow(dead_code)]

use soft_se::{
    config::{self, DefaultSecureElement},
    se::identity::{Eui64, Platform},
    se::keys::{KeyId, KeyValue, KEY_SIZE},
};

pub const PLATFORM_EUI: Eui64 = Eui64::from_u64(0x0004_A30B_001C_0530);
pub const PLATFORM_SEED: u64 = 0x5EED;

/// Platform with fixed values so that identities are reproducible.
pub struct TestPlatform {
    pub unique_id_calls: usize,
    pub random_seed_calls: usize,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self {
            unique_id_calls: 0,
            random_seed_calls: 0,
        }
    }
}

impl Platform for TestPlatform {
    fn unique_id(&mut self) -> Eui64 {
        self.unique_id_calls += 1;
        PLATFORM_EUI
    }

    fn random_seed(&mut self) -> u64 {
        self.random_seed_calls += 1;
        PLATFORM_SEED
    }
}

pub fn init_secure_element() -> DefaultSecureElement {
    config::default_secure_element(&mut TestPlatform::new())
        .expect("failed to create secure element")
}

pub fn read_key(se: &DefaultSecureElement, id: KeyId) -> [u8; KEY_SIZE] {
    let mut buffer = [0u8; KEY_SIZE];
    se.export_key_unchecked(id, &mut buffer)
        .expect("failed to read key");
    buffer
}

/// Stand-in for the key derivation, which produces a distinct value per key.
pub fn derived_key(id: KeyId) -> KeyValue {
    let mut bytes = [0xA5u8; KEY_SIZE];
    bytes[0] = id as u8;
    KeyValue::new(bytes)
}
