use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use nopol_generate::{GenerationReport, OutputFormat};

use super::RegistryResult;

/// Serializable options for runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub count: u64,
    pub seed: u64,
    pub region: Option<String>,
    pub format: OutputFormat,
    pub check_digit: bool,
    pub engine_digits: usize,
    /// Region table file, `None` for the built-in table.
    pub regions: Option<PathBuf>,
}

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub options: RunOptions,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
struct RunConfig<'a> {
    run_id: &'a str,
    started_at: String,
    cli_version: &'static str,
    options: &'a RunOptions,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub records_path: PathBuf,
    pub logs_path: PathBuf,
    pub report_path: PathBuf,
}

/// Create `{timestamp}__run_{id}` under the run directory with its config and
/// an empty log file.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));
    create_dir_all(&root)?;

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        cli_version: env!("CARGO_PKG_VERSION"),
        options: &ctx.options,
    };
    write_bytes_atomic(&root.join("config.json"), &serde_json::to_vec_pretty(&config)?)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        records_path: root.join(format!("records.{}", ctx.options.format.extension())),
        report_path: root.join("report.json"),
        logs_path,
        root,
    })
}

pub fn write_report(paths: &RunPaths, report: &GenerationReport) -> RegistryResult<()> {
    write_bytes_atomic(&paths.report_path, &serde_json::to_vec_pretty(report)?)
}

/// Write through a sibling `.tmp` file so readers never see partial output.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> RegistryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(run_dir: &Path) -> RunContext {
        RunContext {
            run_id: "test".to_string(),
            started_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .expect("timestamp")
                .with_timezone(&Utc),
            run_dir: run_dir.to_path_buf(),
            options: RunOptions {
                count: 5,
                seed: 42,
                region: Some("Bali".to_string()),
                format: OutputFormat::Jsonl,
                check_digit: false,
                engine_digits: 7,
                regions: None,
            },
        }
    }

    #[test]
    fn start_run_lays_out_artifacts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let paths = start_run(&context(dir.path())).expect("start run");

        assert_eq!(paths.root, dir.path().join("2024-01-01T00-00-00Z__run_test"));
        assert!(paths.logs_path.exists());
        assert!(paths.records_path.ends_with("records.jsonl"));

        let config: serde_json::Value = serde_json::from_slice(
            &std::fs::read(paths.root.join("config.json")).expect("read config"),
        )
        .expect("config json");
        assert_eq!(config["run_id"], "test");
        assert_eq!(config["options"]["seed"], 42);
        assert_eq!(config["options"]["format"], "jsonl");
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("out.csv");
        write_bytes_atomic(&path, b"first").expect("first write");
        write_bytes_atomic(&path, b"second").expect("second write");
        assert_eq!(std::fs::read(&path).expect("read"), b"second");
        assert!(!dir.path().join("nested").join("out.csv.tmp").exists());
    }
}
