use soft_se::se::{
    compat::{self, MUST_MATCH},
    identity::{DevAddrSource, DeviceIdentity, EuiSource, IdentityConfig},
    keys::{KeyLifetime, KeyRecord, KeyValue},
};
use std::fmt::{self, Write};

/// Renders the `se-identity.h` header consumed by the C secure element.
pub fn c_header(identity: &IdentityConfig, records: &[KeyRecord]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_c_header(&mut out, identity, records)?;
    Ok(out)
}

/// Human readable listing of a resolved identity and its keys.
pub fn summary(
    identity: &DeviceIdentity,
    records: &[KeyRecord],
    reveal: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "DevEUI   {}", identity.dev_eui)?;
    writeln!(out, "JoinEUI  {}", identity.join_eui)?;
    writeln!(out, "DevAddr  {}", identity.dev_addr)?;
    if reveal {
        writeln!(out, "PIN      {}", hex::encode_upper(identity.pin.as_bytes()))?;
    } else {
        writeln!(out, "PIN      ********")?;
    }
    writeln!(out)?;
    for record in records {
        let lifetime = format!("{:?}", record.id.lifetime());
        writeln!(
            out,
            "{:>2} {:<18} {:<8} {}",
            u8::from(record.id),
            record.id.c_name(),
            lifetime,
            key_value(&record.value, reveal)
        )?;
    }
    Ok(out)
}

fn write_c_header(
    out: &mut String,
    identity: &IdentityConfig,
    records: &[KeyRecord],
) -> fmt::Result {
    writeln!(out, "/*!")?;
    writeln!(out, " * \\file      se-identity.h")?;
    writeln!(out, " *")?;
    writeln!(out, " * \\brief     Secure Element identity and keys")?;
    writeln!(out, " */")?;
    writeln!(out, "#ifndef __SOFT_SE_IDENTITY_H__")?;
    writeln!(out, "#define __SOFT_SE_IDENTITY_H__")?;
    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "extern \"C\" {{")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;

    let static_eui = matches!(identity.dev_eui, EuiSource::Static(_));
    let dev_eui = identity.dev_eui.configured();
    writeln!(out, "#define STATIC_DEVICE_EUI {}", static_eui as u8)?;
    writeln!(out)?;
    writeln!(out, "/*!\n * end-device IEEE EUI (big endian)\n */")?;
    writeln!(out, "#define LORAWAN_DEVICE_EUI {}", byte_list(dev_eui.as_bytes()))?;
    writeln!(out)?;
    writeln!(out, "/*!\n * App/Join server IEEE EUI (big endian)\n */")?;
    writeln!(
        out,
        "#define LORAWAN_JOIN_EUI {}",
        byte_list(identity.join_eui.as_bytes())
    )?;
    writeln!(out)?;
    writeln!(out, "/*!\n * Secure-element pin\n */")?;
    writeln!(
        out,
        "#define SECURE_ELEMENT_PIN {}",
        byte_list(identity.pin.as_bytes())
    )?;
    writeln!(out)?;

    let static_addr = matches!(identity.dev_addr, DevAddrSource::Static(_));
    let dev_addr = identity.dev_addr.configured();
    writeln!(out, "#define STATIC_DEVICE_ADDRESS {}", static_addr as u8)?;
    writeln!(out)?;
    writeln!(out, "/*!\n * Device address on the network (big endian)\n */")?;
    writeln!(
        out,
        "#define LORAWAN_DEVICE_ADDRESS ( uint32_t )0x{}",
        dev_addr
    )?;
    writeln!(out)?;

    writeln!(out, "#define SOFT_SE_KEY_LIST \\")?;
    writeln!(out, "    {{ \\")?;
    for record in records {
        write_key_record(out, record)?;
    }
    writeln!(out, "    }},")?;
    writeln!(out)?;

    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#endif  //  __SOFT_SE_IDENTITY_H__")
}

fn write_key_record(out: &mut String, record: &KeyRecord) -> fmt::Result {
    let id = record.id;
    writeln!(out, "        {{ \\")?;
    writeln!(out, "            /*! \\")?;
    match id.lifetime() {
        KeyLifetime::Dynamic => {
            writeln!(out, "             * {} (Dynamically updated) \\", id.description())?
        }
        KeyLifetime::Constant => {
            writeln!(out, "             * {} (constant) \\", id.description())?
        }
        KeyLifetime::Root | KeyLifetime::Session => {
            writeln!(out, "             * {} \\", id.description())?
        }
    }
    if let Some(name) = compat::lorawan10_name(id) {
        writeln!(
            out,
            "             * LoRaWAN 1.0.x: {} \\",
            name.macro_name()
        )?;
    }
    if compat::unused_in_lorawan10(id) {
        writeln!(out, "             * WARNING: NOT USED FOR 1.0.x DEVICES \\")?;
    }
    for (key, reference) in MUST_MATCH {
        if key == id {
            writeln!(
                out,
                "             * WARNING: MUST BE THE SAME AS {} \\",
                reference.c_name()
            )?;
        }
    }
    writeln!(out, "             */ \\")?;
    writeln!(out, "            .KeyID = {}, \\", id.c_name())?;
    writeln!(
        out,
        "            .KeyValue = {}, \\",
        byte_list(record.value.as_bytes())
    )?;
    writeln!(out, "        }}, \\")
}

/// `{ 0x70, 0xB3, ... }`
pub fn byte_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|byte| format!("0x{:02X}", byte)).collect();
    format!("{{ {} }}", items.join(", "))
}

/// Key value for display, hidden unless `reveal` is set.
pub fn key_value(value: &KeyValue, reveal: bool) -> String {
    if reveal {
        hex::encode_upper(value.as_bytes())
    } else if value.is_zero() {
        "<zero>".to_string()
    } else {
        "*".repeat(2 * value.as_bytes().len())
    }
}
