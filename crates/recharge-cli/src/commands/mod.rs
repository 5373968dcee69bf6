pub mod ask;
pub mod config;
pub mod limits;
pub mod log;
pub mod patterns;
pub mod recommend;
pub mod status;

use recharge_core::{BatteryEngine, FileStore, RechargeConfig};

/// Open the engine over the platform data directory with the user's
/// configuration applied.
pub fn open_engine() -> Result<BatteryEngine, Box<dyn std::error::Error>> {
    let config = RechargeConfig::load()?;
    let store = FileStore::open()?;
    Ok(BatteryEngine::with_config(Box::new(store), &config))
}
