//! Configuration management.

use clap::Subcommand;

use recharge_core::RechargeConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as TOML
    Show,
    /// Get a value by dot-separated key (e.g. recovery.rate_per_hour)
    Get { key: String },
    /// Set a value by dot-separated key
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = RechargeConfig::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = RechargeConfig::load()?;
            match config.get(&key) {
                Some(value) => {
                    println!("{value}");
                    Ok(())
                }
                None => Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = RechargeConfig::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {value}");
            Ok(())
        }
    }
}
