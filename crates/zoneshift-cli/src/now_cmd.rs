use std::process::ExitCode;

use chrono::Utc;
use tracing::debug;
use zoneshift_core::{ZoneCatalog, convert_instant};

use crate::cli::NowArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{core_error, print_conversion, resolve_source};

pub fn run_now(args: NowArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let now = Utc::now();
    let catalog = ZoneCatalog::build(now);

    let home = resolve_source(&catalog, &args.from)?;
    debug!(home = %home, targets = args.to.len(), "Converting current time");

    let conversion = convert_instant(&catalog, &home, &args.to, now).map_err(core_error)?;
    print_conversion(&conversion, output_format)?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
