use std::process::ExitCode;

use chrono::Utc;
use tracing::debug;
use zoneshift_core::{ZoneCatalog, convert_civil};

use crate::cli::ConvertArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{
    core_error, parse_fold_policy, parse_gap_policy, parse_local_time, print_conversion,
    resolve_source,
};

pub fn run_convert(args: ConvertArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let fold = parse_fold_policy(&args.fold)?;
    let gap = parse_gap_policy(&args.gap)?;
    let civil = parse_local_time(&args.local)?;

    let catalog = ZoneCatalog::build(Utc::now());
    let home = resolve_source(&catalog, &args.from)?;
    debug!(home = %home, fold = %fold, gap = %gap, "Converting civil time");

    let conversion = convert_civil(&catalog, &home, &args.to, civil, fold, gap)
        .map_err(core_error)?;
    print_conversion(&conversion, output_format)?;

    Ok(ExitCode::from(EXIT_SUCCESS))
}
