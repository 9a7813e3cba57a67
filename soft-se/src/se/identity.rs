use core::fmt;
use core::str::FromStr;
use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaCha20Rng,
};

/// Size of an EUI-64 in bytes.
pub const EUI_SIZE: usize = 8;
/// Size of the secure element PIN in bytes.
pub const PIN_SIZE: usize = 4;
/// Largest device address handed out by [`DevAddr::random`].
pub const RANDOM_DEV_ADDR_MAX: u32 = 0x01FF_FFFF;

/// Errors when parsing identity values from text.
#[derive(Copy, Clone, Debug, Eq, PartialEq, displaydoc::Display)]
pub enum ParseError {
    /// expected {0} hex digits
    InvalidLength(usize),
    /// invalid hex digit
    InvalidDigit,
    /// separators must sit between every byte and all be the same
    InvalidSeparator,
}

/// IEEE EUI-64, stored big-endian.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Eui64([u8; EUI_SIZE]);

impl Eui64 {
    pub const fn new(bytes: [u8; EUI_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    pub const fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    pub const fn as_bytes(&self) -> &[u8; EUI_SIZE] {
        &self.0
    }

    /// Bytes in over-the-air order, which is little-endian.
    pub fn to_le_bytes(&self) -> [u8; EUI_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }
}

impl From<[u8; EUI_SIZE]> for Eui64 {
    fn from(value: [u8; EUI_SIZE]) -> Self {
        Self(value)
    }
}

impl FromStr for Eui64 {
    type Err = ParseError;

    /// Accepts `70B3D58FF1015889`, `70-B3-D5-8F-F1-01-58-89` or
    /// `70:B3:D5:8F:F1:01:58:89`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; EUI_SIZE];
        decode_hex(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Eui64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Device address on the network.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DevAddr(u32);

impl DevAddr {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    pub const fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Pseudo random address in `0..=RANDOM_DEV_ADDR_MAX`. Equal seeds give equal addresses.
    pub fn random(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self(rng.next_u32() & RANDOM_DEV_ADDR_MAX)
    }
}

impl From<u32> for DevAddr {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for DevAddr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut bytes = [0u8; 4];
        decode_hex(s, &mut bytes)?;
        Ok(Self(u32::from_be_bytes(bytes)))
    }
}

impl fmt::Display for DevAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Secure element PIN.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Pin([u8; PIN_SIZE]);

impl Pin {
    pub const fn new(bytes: [u8; PIN_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; PIN_SIZE] {
        &self.0
    }
}

impl FromStr for Pin {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; PIN_SIZE];
        decode_hex(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(..)")
    }
}

/// Resolved identity of one end device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DeviceIdentity {
    pub dev_eui: Eui64,
    /// Join EUI. LoRaWAN 1.0.x calls it `AppEui`.
    pub join_eui: Eui64,
    pub dev_addr: DevAddr,
    pub pin: Pin,
}

/// Values the identity takes from the hardware platform.
pub trait Platform {
    /// Unique ID of the MCU, used as device EUI when it is not static.
    fn unique_id(&mut self) -> Eui64;

    /// Seed for the random device address.
    fn random_seed(&mut self) -> u64;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EuiSource {
    Static(Eui64),
    /// The MCU unique ID. The configured EUI is kept for the C header only.
    Platform(Eui64),
}

impl EuiSource {
    /// The configured EUI, whether or not the platform overrides it.
    pub const fn configured(&self) -> Eui64 {
        match self {
            EuiSource::Static(eui) | EuiSource::Platform(eui) => *eui,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DevAddrSource {
    Static(DevAddr),
    /// Drawn from a seeded generator. The configured address is kept for the C header only.
    Random(DevAddr),
}

impl DevAddrSource {
    /// The configured address, whether or not it is replaced by a random one.
    pub const fn configured(&self) -> DevAddr {
        match self {
            DevAddrSource::Static(addr) | DevAddrSource::Random(addr) => *addr,
        }
    }
}

/// Identity as it is configured, before platform values are filled in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IdentityConfig {
    pub dev_eui: EuiSource,
    pub join_eui: Eui64,
    pub dev_addr: DevAddrSource,
    pub pin: Pin,
}

impl IdentityConfig {
    pub fn resolve<P: Platform + ?Sized>(&self, platform: &mut P) -> DeviceIdentity {
        let dev_eui = match self.dev_eui {
            EuiSource::Static(eui) => eui,
            EuiSource::Platform(_) => platform.unique_id(),
        };
        let dev_addr = match self.dev_addr {
            DevAddrSource::Static(addr) => addr,
            DevAddrSource::Random(_) => DevAddr::random(platform.random_seed()),
        };
        log::debug!("resolved identity: dev_eui={} dev_addr={}", dev_eui, dev_addr);
        DeviceIdentity {
            dev_eui,
            join_eui: self.join_eui,
            dev_addr,
            pin: self.pin,
        }
    }
}

/// Decodes hex digits into `dest`. Bytes are either written back to back or all separated
/// by the same `-` or `:`.
fn decode_hex(s: &str, dest: &mut [u8]) -> Result<(), ParseError> {
    let input = s.as_bytes();
    let digits = 2 * dest.len();
    let separator = match input.get(2) {
        Some(c @ (b'-' | b':')) => *c,
        _ => {
            if input.len() != digits {
                return Err(ParseError::InvalidLength(digits));
            }
            return hex::decode_to_slice(input, dest).map_err(|_| ParseError::InvalidDigit);
        }
    };
    if input.len() != digits + dest.len() - 1 {
        return Err(ParseError::InvalidLength(digits));
    }
    for (byte, chunk) in dest.iter_mut().zip(input.chunks(3)) {
        if chunk.len() == 3 && chunk[2] != separator {
            return Err(ParseError::InvalidSeparator);
        }
        hex::decode_to_slice(&chunk[..2], core::slice::from_mut(byte))
            .map_err(|_| ParseError::InvalidDigit)?;
    }
    Ok(())
}
