use caiman::cli::{CliCommand, CommandTable, State};
use caiman::config::Config;
use dotenv::dotenv;
use std::env;
use std::process;

fn main() {
    dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1);
    let name = match args.next() {
        Some(name) => name,
        None => {
            eprintln!("Usage: caiman <command> [arguments]");
            process::exit(1);
        }
    };
    let command = CliCommand {
        name,
        args: args.collect(),
    };

    let config = match Config::read() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Couldn't read the configuration file: {:?}", error);
            process::exit(1);
        }
    };

    let commands = CommandTable::new();
    let mut state = State { config };

    if let Err(error) = commands.run(&mut state, &command) {
        eprintln!("Command '{}' failed: {:?}", command.name, error);
        process::exit(1);
    }
}
