use clap::{Parser, Subcommand};

/// DST-safe timezone conversion tool
#[derive(Parser, Debug)]
#[command(name = "zoneshift")]
#[command(about = "DST-safe timezone conversion tool")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the current time into one or more target timezones
    Now(NowArgs),
    /// Convert a civil (wall-clock) time into one or more target timezones
    Convert(ConvertArgs),
    /// Explain how a local time resolves in a timezone (DST handling)
    Explain(ExplainArgs),
    /// List known IANA timezones with their current UTC offsets
    Zones(ZonesArgs),
    /// Detect the home timezone and report which heuristic decided
    Detect(DetectArgs),
}

#[derive(clap::Args, Debug)]
pub struct NowArgs {
    /// Source IANA timezone (defaults to the detected home zone)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Target IANA timezone (repeatable)
    #[arg(short, long = "to")]
    pub to: Vec<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Civil time in the source timezone (e.g., 2024-06-01T15:00:00)
    #[arg(short, long)]
    pub local: String,

    /// Source IANA timezone (defaults to the detected home zone)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Target IANA timezone (repeatable)
    #[arg(short, long = "to")]
    pub to: Vec<String>,

    /// Ambiguous-time tie break: earlier, later
    #[arg(long, default_value = "earlier")]
    pub fold: String,

    /// Nonexistent-time resolution: shift-forward, shift-backward
    #[arg(long, default_value = "shift-forward")]
    pub gap: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ExplainArgs {
    /// IANA timezone
    #[arg(short, long)]
    pub tz: String,

    /// Local time string (without offset, e.g., 2023-11-05T01:30:00)
    #[arg(short, long)]
    pub local: String,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ZonesArgs {
    /// Only list zones whose name contains this substring
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct DetectArgs {
    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
