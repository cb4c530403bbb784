use std::process;
use clap::Parser;

#[macro_use]
extern crate log;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;


/// Parse command line arguments and run `somafilt_rs::run()`
fn main() {
    // ----------------------------- Run CLI Parser
    let cli = parser::Cli::parse();

    // ----------------------------- Init logger.
    if let Err(e) = logger::Logger::init(cli.verbosity()) {
        eprintln!("{e}");
        process::exit(1);
    }

    // ----------------------------- Serialize command line arguments
    if let Err(e) = cli.serialize() {
        error!("{:?}", e);
        process::exit(1);
    };

    // ----------------------------- Run the filtering pipeline.
    match somafilt_rs::run(&cli) {
        Ok(outputs) => debug!("{outputs:#?}"),
        Err(e) => {
            error!("{:?}", e);
            process::exit(1);
        }
    }
}
