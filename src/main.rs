use chnroutes::config::Config;
use chnroutes::output::write_networks;
use chnroutes::{generate_networks, read_registry_file};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = Config::from_env()?;
    let data = read_registry_file(&config.registry_file)?;
    let networks = generate_networks(&data, &config)?;

    let stdout = std::io::stdout();
    write_networks(&networks, config.output, &mut stdout.lock())?;

    log::info!("#End main() wrote {} networks", networks.len());
    Ok(())
}
