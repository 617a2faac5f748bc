use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

/// Render each page of a PDF to <OUTPUT_DIR>/page_<n>.jpg at 300 DPI,
/// printing every written path on its own line.
#[derive(Parser, Debug)]
#[command(name = "pdf2jpeg", about, disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// PDF file to convert
    #[arg(allow_hyphen_values = true)]
    pub pdf_path: PathBuf,

    /// Existing directory that receives the page images
    #[arg(allow_hyphen_values = true)]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Parse the process arguments, exiting with status 1 and a usage
    /// message on stderr unless exactly two were given.
    pub fn parse_or_exit() -> Self {
        match Self::parse_exact(std::env::args_os()) {
            Ok(cli) => cli,
            Err(err) => {
                eprint!("{err}");
                std::process::exit(1);
            }
        }
    }

    /// Accept exactly two raw arguments after the program name, taken
    /// verbatim whatever they look like.
    pub fn parse_exact<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let given = args.len().saturating_sub(1);
        if given != 2 {
            return Err(Self::command().error(
                ErrorKind::WrongNumberOfValues,
                format!("expected 2 arguments, found {given}"),
            ));
        }

        // Everything after `--` is positional, so `-scan.pdf` or `--` are paths.
        args.insert(1, OsString::from("--"));
        Self::try_parse_from(args)
    }
}
