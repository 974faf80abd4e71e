use crate::address::IpAddress;
use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Load and validate a job file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open {:?}", config_path))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse {:?}", config_path))?;

    info!("Loaded {} networks", config.networks.len());

    config.validate()?;

    Ok(config)
}

/// Read a plain network list: one address per line, `#` starts a comment
pub fn load_network_list(path: &Path) -> Result<Vec<IpAddress>> {
    info!("Reading networks from: {:?}", path);

    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {:?}", path))?;

    let mut networks = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let entry = line.split('#').next().unwrap_or_default().trim();
        if entry.is_empty() {
            continue;
        }
        let ip = IpAddress::parse(entry)
            .wrap_err_with(|| format!("{:?} line {}", path, lineno + 1))?;
        networks.push(ip);
    }

    debug!("Parsed {} networks from {:?}", networks.len(), path);
    Ok(networks)
}
