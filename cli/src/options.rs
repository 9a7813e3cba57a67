use clap::Args;
use soft_se::{
    config,
    se::identity::{DevAddr, DevAddrSource, Eui64, EuiSource, IdentityConfig, Pin, Platform},
    se::keys::{KeyId, KeyRecord, KeyValue, KEY_COUNT, KEY_SIZE},
};

/// Values that replace the configured identity, e.g. to provision another unit.
#[derive(Args, Clone, Debug, Default)]
pub struct Overrides {
    /// Static device EUI (16 hex digits, `-` or `:` separators allowed)
    #[clap(long, value_parser = parse_eui)]
    pub dev_eui: Option<Eui64>,
    /// Join EUI, called AppEUI in LoRaWAN 1.0.x
    #[clap(long, value_parser = parse_eui)]
    pub join_eui: Option<Eui64>,
    /// Static device address (8 hex digits)
    #[clap(long, value_parser = parse_dev_addr)]
    pub dev_addr: Option<DevAddr>,
    /// Secure element PIN (8 hex digits)
    #[clap(long, value_parser = parse_pin)]
    pub pin: Option<Pin>,
    /// Application root key, called GenAppKey in LoRaWAN 1.0.x (32 hex digits)
    #[clap(long, value_parser = parse_key)]
    pub app_key: Option<KeyValue>,
    /// Network root key, called AppKey in LoRaWAN 1.0.x (32 hex digits)
    #[clap(long, value_parser = parse_key)]
    pub nwk_key: Option<KeyValue>,
    /// ABP network session key, written to all three 1.1.x network session keys (32 hex digits)
    #[clap(long, value_parser = parse_key)]
    pub nwk_s_key: Option<KeyValue>,
    /// ABP application session key (32 hex digits)
    #[clap(long, value_parser = parse_key)]
    pub app_s_key: Option<KeyValue>,
    /// Seed for a random device address
    #[clap(long)]
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn identity_config(&self) -> IdentityConfig {
        let mut identity = config::identity::IDENTITY;
        if let Some(dev_eui) = self.dev_eui {
            identity.dev_eui = EuiSource::Static(dev_eui);
        }
        if let Some(join_eui) = self.join_eui {
            identity.join_eui = join_eui;
        }
        if let Some(dev_addr) = self.dev_addr {
            identity.dev_addr = DevAddrSource::Static(dev_addr);
        }
        if let Some(pin) = self.pin {
            identity.pin = pin;
        }
        identity
    }

    pub fn key_list(&self) -> [KeyRecord; KEY_COUNT] {
        let mut records = config::keys::KEY_LIST;
        for record in records.iter_mut() {
            let replacement = match record.id {
                KeyId::AppKey => self.app_key.as_ref(),
                KeyId::NwkKey => self.nwk_key.as_ref(),
                KeyId::FNwkSIntKey | KeyId::SNwkSIntKey | KeyId::NwkSEncKey => {
                    self.nwk_s_key.as_ref()
                }
                KeyId::AppSKey => self.app_s_key.as_ref(),
                _ => None,
            };
            if let Some(value) = replacement {
                record.value = value.clone();
            }
        }
        records
    }

    pub fn platform(&self) -> HostPlatform {
        HostPlatform { seed: self.seed }
    }
}

/// Platform values of the host the tool runs on.
pub struct HostPlatform {
    seed: Option<u64>,
}

impl Platform for HostPlatform {
    fn unique_id(&mut self) -> Eui64 {
        log::warn!("host has no MCU unique ID, using 00-00-00-00-00-00-00-00");
        Eui64::default()
    }

    fn random_seed(&mut self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn parse_eui(s: &str) -> Result<Eui64, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_dev_addr(s: &str) -> Result<DevAddr, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_pin(s: &str) -> Result<Pin, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_key(s: &str) -> Result<KeyValue, String> {
    let mut bytes = [0u8; KEY_SIZE];
    hex::decode_to_slice(s, &mut bytes).map_err(|e| format!("{e}"))?;
    Ok(KeyValue::new(bytes))
}
