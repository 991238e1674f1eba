use clap::Parser;
use underbar::app::{handle_fatal_error, init_logging, AppConfig};
use underbar::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    let config = AppConfig::new(cli.verbose).with_compact(cli.compact);
    init_logging(&config);

    match cli::run(&cli, &config) {
        Ok(output) => println!("{}", output),
        Err(e) => handle_fatal_error(e, cli.verbose),
    }
}
