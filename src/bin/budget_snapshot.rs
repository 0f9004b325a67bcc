use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use budget_charts::api::{
    BudgetPage, BudgetPageConfig, BudgetSource, DiagnosticLog, FileBudgetSource, RenderStatus,
    SurfaceTree,
};
use budget_charts::core::Viewport;
use budget_charts::render::SvgRenderer;

const USAGE: &str =
    "usage: budget_snapshot [--source <url|path>] --out-dir <dir> [--config <page-config.json>]";

struct CliArgs {
    source: Option<String>,
    out_dir: PathBuf,
    config: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = budget_charts::telemetry::init_default_tracing();

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            BudgetPageConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => BudgetPageConfig::default(),
    };
    let source = build_source(args.source.as_deref(), &config)?;

    let mut tree = SurfaceTree::new();
    let canvas = tree.insert_canvas(config.pie.surface_id.clone(), Viewport::new(700, 400));
    let container = tree.insert_svg(config.arc.surface_id.clone(), Viewport::new(600, 400));

    let log = DiagnosticLog::new();
    let mut page = BudgetPage::new(config, source, SvgRenderer::new())
        .map_err(|err| err.to_string())?
        .with_sink(log.clone());
    page.mount(&tree);
    let report = page
        .wait()
        .ok_or_else(|| "no budget fetch was started".to_owned())?;
    if report.status != RenderStatus::Rendered {
        let reason = log
            .entries()
            .last()
            .map(|entry| entry.message.clone())
            .unwrap_or_else(|| format!("{:?}", report.status));
        return Err(format!("budget fetch did not render: {reason}"));
    }

    fs::create_dir_all(&args.out_dir)
        .map_err(|err| format!("failed to create `{}`: {err}", args.out_dir.display()))?;

    write_text(
        &args.out_dir.join("arc_chart.svg"),
        &container.borrow().to_document(),
    )?;
    if let Some(document) = page.backend().document() {
        write_text(&args.out_dir.join("pie_chart.svg"), &document)?;
    }

    #[cfg(feature = "cairo-backend")]
    {
        use budget_charts::render::{CairoRenderer, Renderer};

        if let Some(instance) = canvas.borrow().attached() {
            let viewport = instance.frame.viewport;
            let mut renderer = CairoRenderer::new(viewport.width as i32, viewport.height as i32)
                .map_err(|err| err.to_string())?;
            renderer
                .render(&instance.frame)
                .map_err(|err| err.to_string())?;
            renderer
                .write_png(&args.out_dir.join("pie_chart.png"))
                .map_err(|err| err.to_string())?;
        }
    }
    #[cfg(not(feature = "cairo-backend"))]
    let _ = &canvas;

    println!(
        "pie slices: {}, arcs: {}, diagnostics: {}",
        report.pie.as_ref().map_or(0, |pie| pie.slice_count),
        report.arc.as_ref().map_or(0, |arc| arc.arc_count),
        log.len()
    );
    Ok(())
}

/// Without `--source` the page config's endpoint is read over HTTP.
fn build_source(
    source: Option<&str>,
    config: &BudgetPageConfig,
) -> Result<Arc<dyn BudgetSource>, String> {
    match source {
        Some(path) if !is_url(path) => Ok(Arc::new(FileBudgetSource::new(path))),
        url => http_source(url, config),
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(feature = "http-source")]
fn http_source(
    url: Option<&str>,
    config: &BudgetPageConfig,
) -> Result<Arc<dyn BudgetSource>, String> {
    use budget_charts::api::HttpBudgetSource;

    let http = match url {
        Some(url) => HttpBudgetSource::new(
            url,
            config
                .endpoint
                .timeout_ms
                .map(std::time::Duration::from_millis),
        ),
        None => HttpBudgetSource::from_endpoint(&config.endpoint),
    }
    .map_err(|err| err.to_string())?;
    Ok(Arc::new(http))
}

#[cfg(not(feature = "http-source"))]
fn http_source(
    url: Option<&str>,
    config: &BudgetPageConfig,
) -> Result<Arc<dyn BudgetSource>, String> {
    let url = url.map_or_else(|| config.endpoint.url(), str::to_owned);
    Err(format!(
        "reading `{url}` needs the `http-source` feature; pass a file path with --source"
    ))
}

fn write_text(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut source = None::<String>;
    let mut out_dir = None::<PathBuf>;
    let mut config = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--source" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --source".to_owned())?;
                source = Some(value);
            }
            "--out-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out-dir".to_owned())?;
                out_dir = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let out_dir = out_dir.ok_or_else(|| format!("missing --out-dir\n{USAGE}"))?;
    Ok(CliArgs {
        source,
        out_dir,
        config,
    })
}
