use crate::api::transport::mask_secret;
use crate::api::DEVELOPER_PORTAL;
use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::Config;
use crate::error::Result;

/// Execute config command
pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("✅ Configuration updated: {} = {}", key, display_value(&key, &value));
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}: {}", key, display_value(&key, &value));
                }
                None => {
                    println!("Configuration key '{}' not found", key);
                }
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = Config::config_file_path()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
        ConfigCommand::Init => {
            Config::initialize()?;
            println!("✅ Configuration initialized");
            println!();
            println!("To set your credentials, run:");
            println!("  fsreg config set api.username YOUR_EMAIL");
            println!("  fsreg config set api.key YOUR_API_KEY");
            println!();
            println!("Get your API key from: {}", DEVELOPER_PORTAL);
            Ok(())
        }
    }
}

/// Mask the API key for display
fn display_value(key: &str, value: &str) -> String {
    if key == "api.key" {
        mask_secret(value)
    } else {
        value.to_string()
    }
}
