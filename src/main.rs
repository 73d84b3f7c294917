//! # lsmeta CLI
//!
//! Writes the listing of one directory to stdout. With the error channel
//! enabled, a directory that cannot be read produces
//! `{"errno": N, "message": "..."}` on stderr and exit status 1. Any other
//! failure propagates out of `main`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lsmeta::{value, ListingError, Variant};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(
    name = "lsmeta",
    version,
    about = "List a directory's children with stat and symlink metadata"
)]
struct Cli {
    /// Directory whose immediate children are listed.
    path: PathBuf,

    /// Behaviour preset.
    #[clap(long, value_enum, env = "LSMETA_VARIANT", default_value_t = VariantArg::Remote)]
    variant: VariantArg,

    /// Override: treat a failed readlink as fatal.
    #[clap(long)]
    strict_link_target_read: Option<bool>,

    /// Override: report an unreadable directory on stderr with exit status 1.
    #[clap(long)]
    report_errors_on_channel: Option<bool>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Local,
    Remote,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Local  => Variant::Local,
            VariantArg::Remote => Variant::Remote,
        }
    }
}

/// Logs go to stderr and are off unless `RUST_LOG` asks for them, since
/// stderr doubles as the structured error channel.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let mut builder = lsmeta::listing()
        .path(&cli.path)
        .variant(cli.variant.into());
    if let Some(yes) = cli.strict_link_target_read {
        builder = builder.strict_link_target_read(yes);
    }
    if let Some(yes) = cli.report_errors_on_channel {
        builder = builder.report_errors_on_channel(yes);
    }
    let config = builder.config();
    tracing::debug!(?config, path = %cli.path.display(), "starting listing");

    match builder.run() {
        Ok(listing) => {
            listing
                .write_to(&mut io::stdout().lock())
                .context("writing listing to stdout")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ ListingError::DirectoryRead { .. }) if config.report_errors_on_channel => {
            let mut stderr = io::stderr().lock();
            stderr.write_all(&value::to_bytes(&err.to_payload()))?;
            stderr.flush()?;
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err.into()),
    }
}
