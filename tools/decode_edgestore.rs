use anyhow::{Context, Result};
use clap::Parser;
use graph_row_decoder::config::Config;
use graph_row_decoder::{
    decode_source, export_to_csv, export_to_json, DecoderSetup, ExportFormat, ExportOptions,
    RocksDbEdgeStore, RowDecoder, SchemaCatalog,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "decode_edgestore")]
#[command(about = "Decode every row of an edgestore into vertices and export them", long_about = None)]
struct Args {
    /// Edgestore (RocksDB) directory
    #[arg(long)]
    db: PathBuf,

    /// Schema catalog (JSON)
    #[arg(long)]
    schema: PathBuf,

    /// Output file (json) or directory (csv)
    #[arg(short, long)]
    output: PathBuf,

    /// Export format (json, csv)
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Configuration file (JSON); environment variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Fail on partitioned vertices instead of skipping them
    #[arg(long)]
    no_filter_partitioned: bool,

    /// Keep going when a row fails to decode
    #[arg(long)]
    skip_errors: bool,

    /// Log format (json, pretty)
    #[arg(long)]
    log_format: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    apply_overrides(&mut config, &args);

    init_logging(&config)?;

    let format: ExportFormat = args.format.parse()?;

    tracing::info!("Decoding edgestore at {:?}", args.db);
    tracing::info!("Configuration: {:?}", config);

    let catalog = SchemaCatalog::from_path(&args.schema)
        .with_context(|| format!("Failed to load schema from {:?}", args.schema))?;
    tracing::info!(
        "Loaded {} relation types and {} vertex labels",
        catalog.type_count(),
        catalog.vertex_label_count()
    );

    let store = RocksDbEdgeStore::open_read_only(&args.db)
        .with_context(|| format!("Failed to open edgestore at {:?}", args.db))?;
    let decoder = RowDecoder::new(DecoderSetup::with_catalog(catalog, config.decoder));

    let start = Instant::now();
    let output = decode_source(&decoder, &store, &config.batch)?;
    let elapsed = start.elapsed();

    let options = ExportOptions::default();
    let (vertex_count, edge_count) = match format {
        ExportFormat::Json => export_to_json(&output.vertices, &args.output, &options)?,
        ExportFormat::Csv => {
            std::fs::create_dir_all(&args.output)?;
            export_to_csv(
                &output.vertices,
                args.output.join("vertices.csv"),
                args.output.join("edges.csv"),
                &options,
            )?
        }
    };

    decoder.close();

    println!("\n=== Decode Summary ===");
    println!("Rows read:         {}", output.stats.rows_read);
    println!("Vertices decoded:  {}", output.stats.vertices_decoded);
    println!("Rows skipped:      {}", output.stats.rows_skipped);
    println!("Rows failed:       {}", output.stats.rows_failed);
    println!("Exported:          {} vertices, {} edges", vertex_count, edge_count);
    println!("Elapsed:           {:.2?}", elapsed);

    if !output.stats.errors.is_empty() {
        println!("\nFirst errors:");
        for error in output.stats.errors.iter().take(10) {
            println!("  - {}", error);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(threads) = args.threads {
        config.batch.threads = threads;
    }
    if args.no_filter_partitioned {
        config.decoder.filter_partitioned_vertices = false;
    }
    if args.skip_errors {
        config.batch.skip_errors = true;
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
