use colored::Colorize;
use ip_address_kit::commands;
use ip_address_kit::config::{log_config_path, Config};
use std::env;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    // logging first, so config warnings are not lost
    log4rs::init_file(log_config_path(|key| env::var(key).ok()), Default::default())?;
    let config = Config::from_env();
    colored::control::set_override(config.color);
    log::info!("#Start main()");

    let args: Vec<String> = env::args().skip(1).collect();
    match commands::run(&args, &config) {
        Ok(out) => {
            println!("{out}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", "ERROR".red());
            std::process::exit(1);
        }
    }
}
