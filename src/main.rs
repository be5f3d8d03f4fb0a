// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! QubitOS gate synthesis CLI
//!
//! # Usage
//!
//! ```bash
//! # Synthesize the default Haar-random 4 × 4 target
//! qubit-os-synth run
//!
//! # Custom config, shorter run, write the report
//! qubit-os-synth --config synth.yaml run --iterations 200 --output report.json
//!
//! # Show effective configuration
//! qubit-os-synth config
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qubit_os_gate_synth::report::SynthesisReport;
use qubit_os_gate_synth::synthesis::UnitarySynthesizer;
use qubit_os_gate_synth::{config::Config, Result, VERSION};

/// QubitOS continuous-variable gate synthesis
#[derive(Parser)]
#[command(name = "qubit-os-synth")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Learn a Fock-space circuit implementing a target unitary")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a synthesis
    Run {
        /// Number of optimizer steps
        #[arg(long)]
        iterations: Option<usize>,

        /// Number of ansatz layers
        #[arg(long)]
        depth: Option<usize>,

        /// Seed for initialization and the random target
        #[arg(long)]
        seed: Option<u64>,

        /// Write the JSON report to this path
        #[arg(short, long, env = "QUBITOS_SYNTH_REPORT")]
        output: Option<PathBuf>,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    match cli.command {
        Commands::Run {
            iterations,
            depth,
            seed,
            output,
        } => {
            // Override config with CLI args
            if let Some(n) = iterations {
                config.synthesis.iterations = n;
            }
            if let Some(n) = depth {
                config.synthesis.depth = n;
            }
            if let Some(s) = seed {
                config.synthesis.seed = s;
            }
            if let Some(path) = output {
                config.output.report_path = Some(path.to_string_lossy().into_owned());
            }

            config.validate()?;
            run(&config)?;
        }

        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let target = config.target_block()?;
    let synthesizer = UnitarySynthesizer::new(config.synthesis.clone())?;

    info!(
        version = VERSION,
        cutoff = config.synthesis.cutoff,
        gate_cutoff = config.synthesis.gate_cutoff,
        depth = config.synthesis.depth,
        iterations = config.synthesis.iterations,
        "Starting synthesis"
    );

    let result = synthesizer.optimize(&target)?;
    let report = SynthesisReport::from_result(&config.synthesis, &result);
    println!("{}", report.render_summary());

    if let Some(path) = &config.output.report_path {
        report.write_json(Path::new(path))?;
        info!(path = %path, "Report written");
    }
    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
