//! Superstore CLI binary.
//!
//! Predicts order sales from the command line, in batches from CSV, or
//! behind the web form.

mod artifact_dir;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array1;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use superstore::model::ModelMetrics;
use superstore::{ArtifactPaths, BatchError, OrderInputRecord, Predictor};
use superstore_output::{
    BatchRow, ExportFormat, Exporter, LabelledOrder, PredictionReport, ReportFormat,
    format_currency, read_orders_file, report,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Orders predicted per progress step.
const BATCH_CHUNK: usize = 256;

#[derive(Parser)]
#[command(name = "superstore")]
#[command(about = "Superstore: predict order sales with a pre-trained model", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding sales_model.json and the le_*.json encoders
    #[arg(long, global = true, env = "SUPERSTORE_ARTIFACTS")]
    artifacts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict sales for one order
    Predict {
        #[command(flatten)]
        order: OrderArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Include the encoded model features
        #[arg(long)]
        show_features: bool,
    },

    /// Predict every order of a CSV file
    Batch {
        /// Order CSV with a header row
        input: PathBuf,

        /// Output file; format follows the extension (.csv or .json)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Write JSON instead of CSV to stdout
        #[arg(long)]
        json: bool,
    },

    /// Score the model on a CSV labelled with a `sales` column
    Evaluate {
        /// Labelled order CSV
        input: PathBuf,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the order form over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },

    /// List the options of every categorical field and their codes
    Options {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the model's recorded performance
    Metrics {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct OrderArgs {
    /// Number of units (1-100)
    #[arg(long, default_value_t = 5)]
    quantity: u32,

    /// Price per unit in dollars (0-10000)
    #[arg(long, default_value_t = 100.0)]
    unit_price: f64,

    /// Discount percentage (0-80)
    #[arg(long, default_value_t = 15.0)]
    discount: f64,

    /// Product category
    #[arg(long, default_value = "Furniture")]
    category: String,

    /// Customer segment
    #[arg(long, default_value = "Consumer")]
    segment: String,

    /// Sales region
    #[arg(long, default_value = "Central")]
    region: String,

    /// Shipping mode
    #[arg(long, default_value = "First Class")]
    ship_mode: String,

    /// Order year (2020-2030)
    #[arg(long, default_value_t = 2024)]
    year: i32,

    /// Order month (1-12)
    #[arg(long, default_value_t = 11)]
    month: u32,

    /// Weekday name
    #[arg(long, default_value = "Friday")]
    day_of_week: String,

    /// Order date (YYYY-MM-DD); sets year, month and weekday
    #[arg(long, conflicts_with_all = ["year", "month", "day_of_week"])]
    date: Option<NaiveDate>,
}

impl From<OrderArgs> for OrderInputRecord {
    fn from(args: OrderArgs) -> Self {
        let order = Self {
            quantity: args.quantity,
            unit_price: args.unit_price,
            discount: Self::discount_from_pct(args.discount),
            category: args.category,
            segment: args.segment,
            region: args.region,
            ship_mode: args.ship_mode,
            year: args.year,
            month: args.month,
            day_of_week: args.day_of_week,
        };
        match args.date {
            Some(date) => order.with_date(date),
            None => order,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cwd = std::env::current_dir()?;
    let dir = artifact_dir::resolve(cli.artifacts, &cwd);
    tracing::debug!(dir = %dir.display(), "artifact directory");
    let predictor = Predictor::load(&ArtifactPaths::new(dir))?;

    match cli.command {
        Commands::Predict {
            order,
            format,
            show_features,
        } => predict(&predictor, order.into(), format.into(), show_features)?,
        Commands::Batch {
            input,
            output,
            json,
        } => batch(&predictor, &input, output.as_deref(), json)?,
        Commands::Evaluate { input, json } => evaluate(&predictor, &input, json)?,
        Commands::Serve { bind } => serve(predictor, bind)?,
        Commands::Options { json } => options(&predictor, json)?,
        Commands::Metrics { json } => metrics(&predictor, json)?,
    }

    Ok(())
}

fn predict(
    predictor: &Predictor,
    order: OrderInputRecord,
    format: ReportFormat,
    show_features: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let prediction = predictor.predict_with_features(&order)?;
    let mut report = PredictionReport::new(
        order,
        prediction.result,
        *predictor.metrics(),
        predictor.model_name(),
    );
    if show_features {
        report = report.with_features(prediction.features);
    }

    print!("{}", report.render(format)?);
    if show_features && format == ReportFormat::Text {
        println!("\nFeatures");
        println!("{}", "-".repeat(40));
        for (name, value) in prediction.features.named() {
            println!("{:<22}{:>18}", name, value);
        }
    }
    Ok(())
}

fn batch(
    predictor: &Predictor,
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let orders: Vec<OrderInputRecord> = read_orders_file(input)?
        .into_iter()
        .map(|labelled| labelled.order)
        .collect();

    let results = predict_with_progress(predictor, &orders)?;
    let rows: Vec<BatchRow> = orders
        .iter()
        .zip(&results)
        .map(|(order, result)| BatchRow::new(order, result))
        .collect();

    match output {
        Some(path) => {
            rows.export_to_file(path, ExportFormat::from_path(path))?;
            eprintln!("Wrote {} predictions to {}", rows.len(), path.display());
        }
        None => {
            let format = if json {
                ExportFormat::PrettyJson
            } else {
                ExportFormat::Csv
            };
            io::stdout().write_all(rows.export_to_string(format)?.as_bytes())?;
        }
    }
    Ok(())
}

/// Predict in chunks so the progress bar advances on large files.
fn predict_with_progress(
    predictor: &Predictor,
    orders: &[OrderInputRecord],
) -> Result<Vec<superstore::PredictionResult>, BatchError> {
    let pb = ProgressBar::new(orders.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.set_message("Predicting...");

    let mut results = Vec::with_capacity(orders.len());
    for (chunk_index, chunk) in orders.chunks(BATCH_CHUNK).enumerate() {
        let offset = chunk_index * BATCH_CHUNK;
        let chunk_results = predictor.predict_many(chunk).map_err(|err| match err {
            BatchError::Row { row, source } => BatchError::Row {
                row: row + offset,
                source,
            },
            other => other,
        });
        match chunk_results {
            Ok(chunk_results) => results.extend(chunk_results),
            Err(err) => {
                pb.abandon_with_message("Failed!");
                return Err(err);
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_with_message(format!("Predicted {} orders", orders.len()));
    Ok(results)
}

fn evaluate(
    predictor: &Predictor,
    input: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let labelled = read_orders_file(input)?;
    let (orders, observed) = split_labels(labelled)?;

    let results = predict_with_progress(predictor, &orders)?;
    let y_true = Array1::from(observed);
    let y_pred: Array1<f64> = results.iter().map(|r| r.predicted_sales).collect();
    let computed = ModelMetrics::compute(&y_true, &y_pred)?;

    if json {
        let value = serde_json::json!({
            "rows": orders.len(),
            "computed": computed,
            "recorded": predictor.metrics(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("\nEvaluation on {} orders", orders.len());
        println!("{}", "=".repeat(40));
        println!("{:<12}{:>14}{:>14}", "Metric", "Computed", "Recorded");
        println!("{}", "-".repeat(40));
        let recorded = predictor.metrics();
        println!("{:<12}{:>14.4}{:>14.4}", "R2", computed.r2, recorded.r2);
        println!(
            "{:<12}{:>14}{:>14}",
            "MAE",
            format_currency(computed.mae),
            format_currency(recorded.mae)
        );
        println!(
            "{:<12}{:>14}{:>14}",
            "RMSE",
            format_currency(computed.rmse),
            format_currency(recorded.rmse)
        );
    }
    Ok(())
}

/// Separate orders from their observed sales; every row must be labelled.
fn split_labels(
    labelled: Vec<LabelledOrder>,
) -> Result<(Vec<OrderInputRecord>, Vec<f64>), Box<dyn std::error::Error>> {
    let mut orders = Vec::with_capacity(labelled.len());
    let mut observed = Vec::with_capacity(labelled.len());
    for (i, row) in labelled.into_iter().enumerate() {
        let sales = row
            .sales
            .ok_or_else(|| format!("row {} has no sales value", i + 1))?;
        orders.push(row.order);
        observed.push(sales);
    }
    Ok((orders, observed))
}

fn serve(predictor: Predictor, bind: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = superstore_web::app(Arc::new(predictor))?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(bind).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok::<_, Box<dyn std::error::Error>>(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

fn options(predictor: &Predictor, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let options = predictor.options();
    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    let class_counts = predictor.encoders().class_counts();
    for field in options {
        match class_counts.iter().find(|(f, _)| *f == field.field) {
            Some((_, count)) => println!("\n{} ({} classes)", field.field.label(), count),
            None => println!("\n{}", field.field.label()),
        }
        println!("{}", "-".repeat(30));
        for option in field.options {
            let code = option
                .code
                .map_or_else(|| "(not in encoder)".to_string(), |c| c.to_string());
            println!("  {:<20}{:>8}", option.name, code);
        }
    }
    Ok(())
}

fn metrics(predictor: &Predictor, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let recorded = predictor.metrics();
    if json {
        println!("{}", serde_json::to_string_pretty(recorded)?);
        return Ok(());
    }

    println!("\nModel Performance: {}", predictor.model_name());
    println!("{}", "=".repeat(40));
    for (label, value) in report::performance(recorded) {
        println!("{:<22}{:>18}", label, value);
    }
    println!("\n{}", report::caption(predictor.model_name(), recorded));
    Ok(())
}
