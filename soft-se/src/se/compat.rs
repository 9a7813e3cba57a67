//! Naming compatibility between LoRaWAN 1.0.x and 1.1.x.
//!
//! The secure element uses the 1.1.x names for keys and EUIs. A 1.0.x device
//! maps onto them as follows:
//!
//! | 1.0.x                 | 1.1.x                                                                 |
//! |-----------------------|-----------------------------------------------------------------------|
//! | `LORAWAN_DEVICE_EUI`  | `LORAWAN_DEVICE_EUI`                                                  |
//! | `LORAWAN_APP_EUI`     | `LORAWAN_JOIN_EUI`                                                    |
//! | `LORAWAN_GEN_APP_KEY` | `LORAWAN_APP_KEY`                                                     |
//! | `LORAWAN_APP_KEY`     | `LORAWAN_NWK_KEY`                                                     |
//! | `LORAWAN_NWK_S_KEY`   | `LORAWAN_F_NWK_S_INT_KEY`, `LORAWAN_S_NWK_S_INT_KEY`, `LORAWAN_NWK_S_ENC_KEY` |
//! | `LORAWAN_APP_S_KEY`   | `LORAWAN_APP_S_KEY`                                                   |

use crate::se::keys::{KeyId, KeyValue};
use crate::se::Error;

/// Identity value names of LoRaWAN 1.0.x.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lorawan10Name {
    DeviceEui,
    AppEui,
    GenAppKey,
    AppKey,
    NwkSKey,
    AppSKey,
}

/// Identity value names of LoRaWAN 1.1.x.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Lorawan11Name {
    DeviceEui,
    JoinEui,
    Key(KeyId),
}

pub const LORAWAN10_NAMES: [Lorawan10Name; 6] = [
    Lorawan10Name::DeviceEui,
    Lorawan10Name::AppEui,
    Lorawan10Name::GenAppKey,
    Lorawan10Name::AppKey,
    Lorawan10Name::NwkSKey,
    Lorawan10Name::AppSKey,
];

/// Pairs of keys that have to be bit-identical on a 1.0.x device. The first key of each pair
/// must equal the second.
pub const MUST_MATCH: [(KeyId, KeyId); 2] = [
    (KeyId::SNwkSIntKey, KeyId::FNwkSIntKey),
    (KeyId::NwkSEncKey, KeyId::FNwkSIntKey),
];

impl Lorawan10Name {
    pub const fn lorawan11_names(&self) -> &'static [Lorawan11Name] {
        match self {
            Lorawan10Name::DeviceEui => &[Lorawan11Name::DeviceEui],
            Lorawan10Name::AppEui => &[Lorawan11Name::JoinEui],
            Lorawan10Name::GenAppKey => &[Lorawan11Name::Key(KeyId::AppKey)],
            Lorawan10Name::AppKey => &[Lorawan11Name::Key(KeyId::NwkKey)],
            Lorawan10Name::NwkSKey => &[
                Lorawan11Name::Key(KeyId::FNwkSIntKey),
                Lorawan11Name::Key(KeyId::SNwkSIntKey),
                Lorawan11Name::Key(KeyId::NwkSEncKey),
            ],
            Lorawan10Name::AppSKey => &[Lorawan11Name::Key(KeyId::AppSKey)],
        }
    }

    /// Macro name used by 1.0.x configuration headers.
    pub const fn macro_name(&self) -> &'static str {
        match self {
            Lorawan10Name::DeviceEui => "LORAWAN_DEVICE_EUI",
            Lorawan10Name::AppEui => "LORAWAN_APP_EUI",
            Lorawan10Name::GenAppKey => "LORAWAN_GEN_APP_KEY",
            Lorawan10Name::AppKey => "LORAWAN_APP_KEY",
            Lorawan10Name::NwkSKey => "LORAWAN_NWK_S_KEY",
            Lorawan10Name::AppSKey => "LORAWAN_APP_S_KEY",
        }
    }
}

/// The 1.0.x name of a 1.1.x key, if 1.0.x knows it.
pub const fn lorawan10_name(id: KeyId) -> Option<Lorawan10Name> {
    match id {
        KeyId::AppKey => Some(Lorawan10Name::GenAppKey),
        KeyId::NwkKey => Some(Lorawan10Name::AppKey),
        KeyId::FNwkSIntKey | KeyId::SNwkSIntKey | KeyId::NwkSEncKey => {
            Some(Lorawan10Name::NwkSKey)
        }
        KeyId::AppSKey => Some(Lorawan10Name::AppSKey),
        _ => None,
    }
}

/// Keys a 1.0.x device never uses on its own.
pub const fn unused_in_lorawan10(id: KeyId) -> bool {
    matches!(
        id,
        KeyId::JSIntKey | KeyId::JSEncKey | KeyId::SNwkSIntKey | KeyId::NwkSEncKey
    )
}

/// Checks the [`MUST_MATCH`] pairs. `lookup` returns the current value of a key.
pub fn check_lorawan10_consistency<F>(mut lookup: F) -> Result<(), Error>
where
    F: FnMut(KeyId) -> Result<KeyValue, Error>,
{
    for (key, reference) in MUST_MATCH {
        if lookup(key)? != lookup(reference)? {
            return Err(Error::KeyMismatch(key, reference));
        }
    }
    Ok(())
}
