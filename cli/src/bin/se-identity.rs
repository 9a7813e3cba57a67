use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use cli::{options::Overrides, render};
use log::{error, info};
use soft_se::config::keys::{KEY_INFOS, NUM_STORED_KEYS};
use soft_se::integration::memory_key_store::MemoryKeyStore;
use soft_se::se::element::SecureElement;
use soft_se::se::validate;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    overrides: Overrides,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved identity and the key list
    Show {
        /// Print key values and PIN instead of masking them
        #[clap(long)]
        reveal: bool,
    },
    /// Validate the key list and load it into a secure element
    Check,
    /// Render the C `se-identity.h` header
    Header {
        /// Output file, stdout if omitted
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;
    let args = Args::parse();
    let config = args.overrides.identity_config();
    let records = args.overrides.key_list();

    match args.command {
        Command::Show { reveal } => {
            let identity = config.resolve(&mut args.overrides.platform());
            print!("{}", render::summary(&identity, &records, reveal)?);
        }
        Command::Check => {
            validate::check_key_list(&records).map_err(|e| {
                error!("Invalid key list: {}", e);
                anyhow!("invalid key list: {e}")
            })?;
            let identity = config.resolve(&mut args.overrides.platform());
            let store = MemoryKeyStore::<NUM_STORED_KEYS>::try_new(&KEY_INFOS)
                .map_err(|e| anyhow!("failed to create key store: {e}"))?;
            let se = SecureElement::try_new(identity, &records, store)
                .map_err(|e| anyhow!("failed to load key list: {e}"))?;
            se.check_lorawan10_consistency().map_err(|e| {
                error!("LoRaWAN 1.0.x consistency check failed: {}", e);
                anyhow!("{e}")
            })?;
            info!(
                "Key list OK: {} keys, DevEUI {}, JoinEUI {}",
                se.key_ids().count(),
                se.dev_eui(),
                se.join_eui()
            );
        }
        Command::Header { output } => {
            let header = render::c_header(&config, &records)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, header)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => print!("{}", header),
            }
        }
    }
    Ok(())
}
