//! Runtime config loader (strict parsing).

pub mod schema;

use std::fs;

use tribridge_core::error::{Result, RpcError};

pub use schema::{BridgeSection, RpcConfig, WebviewSection};

pub fn load_from_file(path: &str) -> Result<RpcConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RpcError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RpcConfig> {
    let cfg: RpcConfig =
        serde_yaml::from_str(s).map_err(|e| RpcError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
