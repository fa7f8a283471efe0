mod app;
mod args;
mod effects;
mod logging;
mod persistence;
mod render;

use std::process::ExitCode;

fn main() -> ExitCode {
    let options = match args::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            eprintln!("{}", args::USAGE);
            return ExitCode::from(2);
        }
    };

    let destination = if options.log_to_file {
        logging::LogDestination::File
    } else {
        logging::LogDestination::Terminal
    };
    logging::initialize(destination);

    app::run(options)
}
