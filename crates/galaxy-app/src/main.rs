//! `galaxy` binary entry point.

use clap::Parser;
use galaxy_app::platform::PlatformDirs;
use galaxy_app::settings;
use galaxy_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.as_deref() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve config directory: {e}");
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let (config, load_failure) = settings::load_config(&dirs.config_dir, &args);

    galaxy_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let config_path = Config::file_path(&dirs.config_dir);
    match load_failure {
        None => info!("Using config {}", config_path.display()),
        Some(e) => warn!(
            "Failed to load config {}: {e}, using defaults",
            config_path.display()
        ),
    }

    if let Err(e) = galaxy_app::run(config, Some(dirs.config_dir)) {
        error!("{e}");
        std::process::exit(1);
    }
}
