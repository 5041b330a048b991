//! ptcalc CLI - proficiency-testing analysis and reporting.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ptcalc_rs::config::MainConfig;
use ptcalc_rs::engine::executor::{Method, RoundExecutor};
use ptcalc_rs::engine::validator::{Frame, Validator};
use ptcalc_rs::report::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "ptcalc")]
#[command(version)]
#[command(about = "Proficiency-testing analysis per ISO 13528: assigned values, uncertainties, and performance scores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (TOML or YAML); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an input data file against the configured column mapping
    Validate {
        /// Path to the input data file (CSV)
        input: PathBuf,
    },

    /// Run the full analysis and render a report
    Calculate {
        /// Path to the input data file (CSV)
        input: PathBuf,

        /// Base path for the output report (extension added automatically)
        #[arg(short = 'o', long, default_value = "report")]
        output_report: PathBuf,

        /// Report format (pdf, html, docx); overrides the configured default
        #[arg(short = 'f', long)]
        output_format: Option<OutputFormat>,

        /// Override the configured calculation method (A, CRM, Formulation, Expert)
        #[arg(long)]
        method: Option<Method>,

        /// Override the configured standard deviation for proficiency assessment
        #[arg(long)]
        sigma_pt: Option<f64>,

        /// Save the intermediate results record as JSON at this path
        #[arg(long)]
        results_json: Option<PathBuf>,
    },

    /// Render a report from a previously saved results record
    ReportOnly {
        /// Path to a results record JSON produced by `calculate`
        results_input: PathBuf,

        /// Base path for the output report (extension added automatically)
        #[arg(short = 'o', long, default_value = "report")]
        output_report: PathBuf,

        /// Report format (pdf, html, docx); overrides the configured default
        #[arg(short = 'f', long)]
        output_format: Option<OutputFormat>,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = MainConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Validate { input } => validate(&config, &input),
        Commands::Calculate {
            input,
            output_report,
            output_format,
            method,
            sigma_pt,
            results_json,
        } => calculate(
            config,
            &input,
            &output_report,
            output_format,
            method,
            sigma_pt,
            results_json,
        ),
        Commands::ReportOnly {
            results_input,
            output_report,
            output_format,
        } => report_only(&config, &results_input, &output_report, output_format),
    }
}

fn validate(config: &MainConfig, input: &Path) -> Result<()> {
    let frame = Frame::from_csv_path(input).context("reading input data")?;
    let validated = Validator::validate_frame(&frame, &config.column_map())
        .context("validating input data")?;

    println!("Validation passed: {}", input.display());
    println!("  Participants:    {}", validated.dataset.len());
    println!("  Id column:       {}", config.input_data.id_col);
    println!("  Result column:   {}", config.input_data.result_col);
    if let Some(ref col) = config.input_data.uncertainty_col {
        let reported = validated
            .dataset
            .uncertainties
            .as_ref()
            .map(|u| u.iter().filter(|e| e.is_some()).count())
            .unwrap_or(0);
        println!("  Uncertainty col: {col} ({reported} reported)");
    }
    for dropped in &validated.dropped_rows {
        warn!(row = dropped.index, reason = %dropped.reason, "row dropped");
    }
    Ok(())
}

fn calculate(
    mut config: MainConfig,
    input: &Path,
    output_report: &Path,
    output_format: Option<OutputFormat>,
    method: Option<Method>,
    sigma_pt: Option<f64>,
    results_json: Option<PathBuf>,
) -> Result<()> {
    // CLI overrides win over the config file.
    if let Some(method) = method {
        config.calculation.method = method;
    }
    if let Some(sigma) = sigma_pt {
        config.calculation.sigma_pt = Some(sigma);
    }

    let frame = Frame::from_csv_path(input).context("reading input data")?;
    let validated = Validator::validate_frame(&frame, &config.column_map())
        .context("validating input data")?;
    info!(participants = validated.dataset.len(), "data validated");

    let request = config.to_request();
    let record = RoundExecutor::run_validated(&request, &validated).context("running round")?;
    println!("{record}");

    let results_path =
        results_json.unwrap_or_else(|| output_report.with_extension("results.json"));
    report::write_results_json(&record, &results_path).context("saving results record")?;
    info!(path = %results_path.display(), "results record saved");

    render(&config, &results_path, output_report, output_format)
}

fn report_only(
    config: &MainConfig,
    results_input: &Path,
    output_report: &Path,
    output_format: Option<OutputFormat>,
) -> Result<()> {
    // Parse up front so a malformed record fails before the renderer runs.
    let record = report::read_results_json(results_input).context("loading results record")?;
    info!(
        participants = record.n_participants(),
        method = %record.method,
        "results record loaded"
    );

    render(config, results_input, output_report, output_format)
}

fn render(
    config: &MainConfig,
    results_path: &Path,
    output_report: &Path,
    output_format: Option<OutputFormat>,
) -> Result<()> {
    let Some(template) = config.reporting.template.as_ref() else {
        warn!("no report template configured (reporting.template); skipping report rendering");
        return Ok(());
    };
    if !template.exists() {
        bail!("report template not found: {}", template.display());
    }

    let format = output_format.unwrap_or(config.reporting.default_format);
    let output = output_report.with_extension(format.as_str());
    report::render_report(
        report::DEFAULT_RENDERER,
        template,
        results_path,
        format,
        &output,
    )
    .context("rendering report")?;

    println!("Report generated: {}", output.display());
    Ok(())
}
