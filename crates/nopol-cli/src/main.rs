mod config;
mod registry;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, Settings, load_settings};
use nopol_core::{Error as CoreError, RegionCodeTable};
use nopol_generate::{
    GenerateOptions, GenerationEngine, GenerationError, LicensePlateGenerator, OutputFormat,
    write_records,
};
use registry::{RunContext, RunOptions, init_logging, start_run, write_bytes_atomic, write_report};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("unknown registration code: {0}")]
    UnknownCode(String),
}

impl CliError {
    /// 2 for bad input (unknown region or code, bad table, params or format), 1 otherwise.
    fn exit_code(&self) -> u8 {
        match self {
            CliError::UnknownCode(_)
            | CliError::Core(CoreError::NotFound(_) | CoreError::InvalidTable(_))
            | CliError::Generation(
                GenerationError::InvalidRegion(_)
                | GenerationError::InvalidParams(_)
                | GenerationError::InvalidFormat(_),
            ) => 2,
            _ => 1,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "nopol", version, about = "Indonesian vehicle identifier generator")]
struct Cli {
    /// Settings file (defaults to ./nopol.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// JSON region table replacing the built-in one.
    #[arg(long, global = true, value_name = "PATH")]
    regions: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate license plates.
    Plate(PlateArgs),
    /// Generate VIN frame numbers.
    Vin(VinArgs),
    /// Generate engine numbers.
    Engine(DrawArgs),
    /// List known regions.
    Regions(RegionsArgs),
    /// Find the region owning a registration code.
    Lookup(LookupArgs),
    /// Generate a batch of vehicle records.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// Number of values to print.
    #[arg(long, short = 'n', default_value_t = 1)]
    count: u64,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PlateArgs {
    /// Region name, exactly as listed by `nopol regions`.
    #[arg(long, short)]
    region: Option<String>,
    #[command(flatten)]
    draw: DrawArgs,
}

#[derive(Args, Debug)]
struct VinArgs {
    /// Write an ISO 3779 check digit at position 9.
    #[arg(long, default_value_t = false)]
    check_digit: bool,
    #[command(flatten)]
    draw: DrawArgs,
}

#[derive(Args, Debug)]
struct RegionsArgs {
    /// Print each region's registration codes.
    #[arg(long, default_value_t = false)]
    codes: bool,
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Registration code such as `B` or `AB`.
    code: String,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of records (config default: 10).
    #[arg(long, short = 'n')]
    count: Option<u64>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Restrict plates to one region.
    #[arg(long, short)]
    region: Option<String>,
    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Directory for run artifacts (config, records, logs, report).
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Write an ISO 3779 check digit into every VIN.
    #[arg(long, default_value_t = false)]
    check_digit: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config,
        regions,
        command,
    } = cli;
    let settings = load_settings(config.as_deref())?;
    let mut out = io::stdout().lock();

    match command {
        Command::Generate(args) => run_generate(args, &settings, regions, &mut out),
        Command::Plate(args) => {
            let table = open_table(&settings, regions.as_deref())?;
            run_plate(args, table, &mut out)
        }
        Command::Vin(args) => {
            init_logging(None)?;
            let generator = settings.vin_generator(args.check_digit);
            let mut rng = seeded(args.draw.seed);
            for _ in 0..args.draw.count {
                writeln!(out, "{}", generator.generate(&mut rng))?;
            }
            Ok(())
        }
        Command::Engine(args) => {
            init_logging(None)?;
            let generator = settings.engine_generator()?;
            let mut rng = seeded(args.seed);
            for _ in 0..args.count {
                writeln!(out, "{}", generator.generate(&mut rng))?;
            }
            Ok(())
        }
        Command::Regions(args) => {
            let table = open_table(&settings, regions.as_deref())?;
            for entry in table.entries() {
                if args.codes {
                    writeln!(out, "{}\t{}", entry.name, entry.codes.join(","))?;
                } else {
                    writeln!(out, "{}", entry.name)?;
                }
            }
            Ok(())
        }
        Command::Lookup(args) => {
            let table = open_table(&settings, regions.as_deref())?;
            let region = table
                .region_name_from_code(&args.code)
                .ok_or_else(|| CliError::UnknownCode(args.code.clone()))?;
            writeln!(out, "{region}")?;
            Ok(())
        }
    }
}

fn open_table(
    settings: &Settings,
    regions: Option<&Path>,
) -> Result<Arc<RegionCodeTable>, CliError> {
    init_logging(None)?;
    let table = settings.region_table(regions)?;
    tracing::debug!(event = "regions_loaded", regions = table.len());
    Ok(table)
}

fn run_plate(
    args: PlateArgs,
    table: Arc<RegionCodeTable>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let Some(region) = args.region.as_deref()
        && !table.contains_region(region)
    {
        return Err(GenerationError::InvalidRegion(region.to_string()).into());
    }

    let generator = LicensePlateGenerator::new(table);
    let mut rng = seeded(args.draw.seed);
    for _ in 0..args.draw.count {
        let plate = generator.generate(args.region.as_deref(), &mut rng)?;
        writeln!(out, "{plate}")?;
    }
    Ok(())
}

fn run_generate(
    args: GenerateArgs,
    settings: &Settings,
    regions: Option<PathBuf>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let defaults = &settings.generate;
    let format = args.format.map(OutputFormat::from).unwrap_or(defaults.format);
    let seed = args
        .seed
        .or(defaults.seed)
        .unwrap_or_else(|| rand::rng().random());
    let options = GenerateOptions {
        count: args.count.unwrap_or(defaults.count),
        seed: Some(seed),
        region: args.region.or_else(|| defaults.region.clone()),
    };
    let check_digit = args.check_digit || settings.vin.check_digit;
    let engines = settings.engine_generator()?;
    let regions = regions.or_else(|| settings.regions.path.clone());

    let table = settings.region_table(regions.as_deref())?;
    if let Some(region) = options.region.as_deref()
        && !table.contains_region(region)
    {
        return Err(GenerationError::InvalidRegion(region.to_string()).into());
    }

    let run_paths = match &args.run_dir {
        Some(run_dir) => {
            let run_ctx = RunContext {
                run_id: Uuid::new_v4().to_string(),
                started_at: chrono::Utc::now(),
                run_dir: run_dir.clone(),
                options: RunOptions {
                    count: options.count,
                    seed,
                    region: options.region.clone(),
                    format,
                    check_digit,
                    engine_digits: engines.digits(),
                    regions: regions.clone(),
                },
            };
            let paths = start_run(&run_ctx)?;
            init_logging(Some(&paths.logs_path))?;
            tracing::info!(event = "run_started", run_id = %run_ctx.run_id);
            Some(paths)
        }
        None => {
            init_logging(None)?;
            None
        }
    };

    tracing::info!(event = "regions_loaded", regions = table.len());

    let engine = GenerationEngine::new(
        LicensePlateGenerator::new(table),
        settings.vin_generator(check_digit),
        engines,
    );
    let result = engine.run(&options)?;

    let mut buffer = Vec::new();
    let bytes = write_records(format, &mut buffer, &result.records)?;

    if let Some(paths) = &run_paths {
        write_bytes_atomic(&paths.records_path, &buffer)?;
        write_report(paths, &result.report)?;
        tracing::info!(event = "records_written", path = %paths.records_path.display(), bytes);
    }

    match &args.out {
        Some(path) => {
            write_bytes_atomic(path, &buffer)?;
            tracing::info!(event = "records_written", path = %path.display(), bytes);
        }
        None if run_paths.is_none() => out.write_all(&buffer)?,
        None => {}
    }

    if let Some(paths) = &run_paths {
        writeln!(io::stderr(), "run written to {}", paths.root.display())?;
    }

    tracing::info!(
        event = "run_finished",
        status = "success",
        records = result.report.records,
        seed = result.report.seed,
        duration_ms = result.report.duration_ms
    );
    Ok(())
}

fn seeded(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::debug!(seed, "random source seeded");
    ChaCha8Rng::seed_from_u64(seed)
}
