use crate::se::identity::{DevAddr, DevAddrSource, Eui64, EuiSource, IdentityConfig, Pin};

/// When `true` the device EUI is [`DEVICE_EUI`], otherwise the MCU unique ID replaces it.
pub const STATIC_DEVICE_EUI: bool = true;

/// End-device IEEE EUI (big endian)
pub const DEVICE_EUI: Eui64 = Eui64::new([0x70, 0xB3, 0xD5, 0x8F, 0xF1, 0x01, 0x58, 0x89]);

/// App/Join server IEEE EUI (big endian)
pub const JOIN_EUI: Eui64 = Eui64::new([0x70, 0xB3, 0xD5, 0x7E, 0xD0, 0x01, 0x24, 0x5D]);

pub const SECURE_ELEMENT_PIN: Pin = Pin::new([0x00, 0x00, 0x00, 0x00]);

/// When `true` the device address is [`DEVICE_ADDRESS`], otherwise it is drawn from a pseudo
/// random generator seeded by the MCU platform.
pub const STATIC_DEVICE_ADDRESS: bool = false;

/// Device address on the network (big endian)
pub const DEVICE_ADDRESS: DevAddr = DevAddr::new(0x0000_0000);

pub const IDENTITY: IdentityConfig = IdentityConfig {
    dev_eui: if STATIC_DEVICE_EUI {
        EuiSource::Static(DEVICE_EUI)
    } else {
        EuiSource::Platform(DEVICE_EUI)
    },
    join_eui: JOIN_EUI,
    dev_addr: if STATIC_DEVICE_ADDRESS {
        DevAddrSource::Static(DEVICE_ADDRESS)
    } else {
        DevAddrSource::Random(DEVICE_ADDRESS)
    },
    pin: SECURE_ELEMENT_PIN,
};
