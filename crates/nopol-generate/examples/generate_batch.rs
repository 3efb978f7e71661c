use std::env;
use std::io;
use std::sync::Arc;

use nopol_generate::{
    GenerateOptions, GenerationEngine, OutputFormat, RegionCodeTable, write_records,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions {
        count: 10,
        seed: None,
        region: None,
    };
    let mut format = OutputFormat::Csv;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" => options.count = args.next().ok_or("missing --count value")?.parse()?,
            "--seed" => options.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            "--region" => options.region = args.next(),
            "--format" => format = args.next().ok_or("missing --format value")?.parse()?,
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let engine = GenerationEngine::with_table(Arc::new(RegionCodeTable::indonesia()));
    let result = engine.run(&options)?;
    write_records(format, io::stdout().lock(), &result.records)?;
    eprintln!("seed {}", result.report.seed);
    Ok(())
}
