use celcheck::cli::Cli;
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    match celcheck::run_command(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
