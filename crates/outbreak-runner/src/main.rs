//! Runner that drives one outbreak to completion and persists its statistics.

mod report;
mod settings;
mod telemetry;

use anyhow::{Context, Result};
use outbreak_world::Outbreak;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = settings::load_config()?;
    info!(
        seed = config.outbreak.seed,
        size = config.outbreak.world.size,
        "Starting outbreak runner"
    );

    let mut outbreak = Outbreak::new(&config.outbreak)?;
    let result = outbreak.run();

    match &config.output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path))?;
            report::write_csv(&mut BufWriter::new(file), &result.history)?;
            info!("Statistics written to {}", path);
        }
        None => {
            let stdout = io::stdout();
            report::write_csv(&mut stdout.lock(), &result.history)?;
        }
    }

    if config.print_tiles {
        eprint!("{}", outbreak.world().render());
    }

    info!(
        iterations = result.iterations,
        termination = ?result.termination,
        "Runner finished"
    );
    Ok(())
}
