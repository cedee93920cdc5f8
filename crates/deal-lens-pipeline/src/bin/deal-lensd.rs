use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use deal_lens_intel::{build_intel_suite, Dossier, DossierFileConfig, IntelSourceConfig};
use deal_lens_pipeline::{
    AnalysisReport, AnalysisRequest, ExportFormat, Orchestrator, PipelineConfig, TracingObserver,
};
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct RequestFile {
    #[serde(flatten)]
    request: AnalysisRequest,
    #[serde(default)]
    dossier: Option<Dossier>,
    /// Resolved against the request file's directory when relative.
    #[serde(default)]
    dossier_path: Option<PathBuf>,
}

fn main() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let request_path = std::env::var("DEAL_LENS_REQUEST")
        .map_or_else(|_| PathBuf::from("data/request.json"), PathBuf::from);
    let format = std::env::var("DEAL_LENS_EXPORT")
        .unwrap_or_else(|_| "json".to_string())
        .parse::<ExportFormat>()
        .map_err(io::Error::other)?;

    let file = read_request(&request_path)?;
    let source = intel_source(&request_path, file.dossier, file.dossier_path)?;
    let intel = build_intel_suite(source).map_err(io::Error::other)?;
    let orchestrator = Orchestrator::new(PipelineConfig::from_env(), intel)
        .map_err(io::Error::other)?
        .with_observer(Arc::new(TracingObserver));

    info!(path = %request_path.display(), "running analysis");
    let (report, code) = match orchestrator.run(&file.request) {
        Ok(report) => (report, ExitCode::SUCCESS),
        Err(failure) => {
            error!(kind = ?failure.kind(), "{}", failure.message());
            (failure.fallback, ExitCode::FAILURE)
        }
    };
    write_export(&report, format)?;
    Ok(code)
}

fn read_request(path: &Path) -> io::Result<RequestFile> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn intel_source(
    request_path: &Path,
    inline: Option<Dossier>,
    dossier_path: Option<PathBuf>,
) -> io::Result<IntelSourceConfig> {
    match (inline, dossier_path) {
        (Some(dossier), None) => Ok(IntelSourceConfig::Inline(dossier)),
        (None, Some(path)) => {
            let path = if path.is_relative() {
                request_path
                    .parent()
                    .map_or_else(|| path.clone(), |dir| dir.join(&path))
            } else {
                path
            };
            Ok(IntelSourceConfig::DossierFile(DossierFileConfig::new(path)))
        }
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "request must set exactly one of `dossier` or `dossier_path`",
        )),
    }
}

fn write_export(report: &AnalysisReport, format: ExportFormat) -> io::Result<()> {
    let text = report.export(format).map_err(io::Error::other)?;
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}
