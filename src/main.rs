mod cli;
mod convert;
mod error;
mod raster;

use std::io;
use std::process::ExitCode;

use anyhow::Result;

use cli::Cli;
use raster::PdfiumRasterizer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_or_exit();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let rasterizer = PdfiumRasterizer::bind()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    convert::convert_pdf(&rasterizer, &cli.pdf_path, &cli.output_dir, &mut out)?;
    Ok(())
}
