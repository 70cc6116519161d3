use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use std::path::Path;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use altmat::config::PipelineConfig;
use altmat::input::load_cohort;
use altmat::output::schema;
use altmat::pipeline::PipelineRunner;

#[derive(Parser)]
#[command(name = "altmat")]
#[command(
    about = "Gene-by-sample alteration matrix builder",
    long_about = "Builds a filtered, bounded gene-by-sample alteration matrix from tumor \
mutation and copy-number profiles: verifies copy-number calls against expression, resolves \
mixed-direction genes, masks hyper-altered samples, and keeps the top-ranked genes."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the filtered alteration matrix
    Build {
        /// Tab-delimited copy-number profile (ID + one discrete code column per sample).
        #[arg(long, required = true)]
        cna: String,
        /// Tab-delimited mutation profile with the same sample columns as the copy-number profile.
        #[arg(long = "mut", required = true)]
        mutations: String,
        /// Tab-delimited expression profile used to verify copy-number calls (optional).
        #[arg(long)]
        expr: Option<String>,
        /// Path to pipeline configuration JSON file (thresholds, gene whitelist).
        #[arg(long)]
        config: Option<String>,
        /// Prefix for output files. Writes <prefix>.matrix.txt and <prefix>.summary.json.
        #[arg(long, required = true)]
        out_prefix: String,
        /// Force overwrite of existing output files.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the JSON schema of the run summary
    Schema,
}

fn check_output_paths(
    prefix: &str,
    suffixes: &[&str],
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(prefix);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }

    if !force {
        for suffix in suffixes {
            let p = format!("{}{}", prefix, suffix);
            if Path::new(&p).exists() {
                return Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("Output file {} already exists. Use --force to overwrite.", p),
                )));
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        }
        .unwrap_or_else(|e| panic!("Could not open log file '{}': {}", path, e));
        log_builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    log_builder.init();

    match &cli.command {
        Commands::Build { cna, mutations, expr, config, out_prefix, force } => {
            if let Err(e) = check_output_paths(out_prefix, &[".matrix.txt", ".summary.json"], *force)
            {
                error!("{}", e);
                return;
            }

            let pipeline_config = match config {
                Some(path) => match PipelineConfig::load(path) {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Error loading pipeline config {}: {}", path, e);
                        return;
                    }
                },
                None => PipelineConfig::default(),
            };

            let start = std::time::Instant::now();
            let data = match load_cohort(
                cna,
                mutations,
                expr.as_deref(),
                &pipeline_config.genes.include,
            ) {
                Ok(d) => d,
                Err(e) => {
                    error!("Error loading profiles: {:#}", e);
                    return;
                }
            };

            match PipelineRunner::new(&pipeline_config).run(data) {
                Ok(result) => {
                    if let Err(e) = result.write_to_prefix(out_prefix) {
                        error!("Error writing output: {}", e);
                        return;
                    }
                    info!(
                        "Wrote {} genes x {} samples in {:.2?}",
                        result.summary.genes_retained,
                        result.summary.non_hyper_samples,
                        start.elapsed()
                    );
                }
                Err(e) => error!("Pipeline failed: {:#}", e),
            }
        }
        Commands::Schema => {
            println!("{}", schema::schema_json_pretty());
        }
    }
}
