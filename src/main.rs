use clap::Parser;
use log::{debug, error, info};
use std::process::exit;
use sysunit::{Config, cli::Cli, error::Error, logging, svcmgr};

fn main() -> Result<(), Error> {
    let args = Cli::parse();
    logging::setup(args.debug)?;

    info!("sysunit v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {args:?}");

    let config_path = args.config.unwrap_or_else(Config::default_path);
    debug!("Loading config from {}", config_path.display());

    let config: Config = match confy::load_path(config_path) {
        Ok(config) => config,
        Err(why) => {
            error!("Failed to load configuration: {why}");
            exit(1);
        }
    };

    svcmgr::main(args.command, &config);

    Ok(())
}
