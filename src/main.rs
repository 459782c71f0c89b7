use env_logger::Env;
use floorplot::{pipeline, RunConfig};
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match RunConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(2);
        }
    };

    match pipeline::run(&config) {
        Ok(summary) => {
            println!(
                "Client found on {} and plotted at ({:.0}, {:.0}) px. Image saved as {} ({}x{}).",
                summary.floor,
                summary.pixel_x,
                summary.pixel_y,
                summary.output_path,
                summary.output_width,
                summary.output_height
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
