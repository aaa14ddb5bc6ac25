//! `fluid`: run the field probe with numeric types chosen on the command line.
//!
//! Usage: `fluid <FILE> [--p-type T] [--v-type T] [--v-flow-type T]`

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use fluid_dispatch::domain::{FieldDimensions, RunConfig};
use fluid_dispatch::engine::{DispatchError, DispatchSessionBuilder, FieldProbe};
use fluid_dispatch::interfaces::LoggingObserver;
use fluid_dispatch::registry::default_catalogue;

#[derive(Parser, Debug)]
#[command(name = "fluid")]
#[command(about = "Probe a fluid field with run-time selected numeric types")]
#[command(after_help = type_help())]
struct Args {
    /// Field layout file
    #[arg(required_unless_present_any = ["list_types", "list_specializations"])]
    path: Option<PathBuf>,

    /// Particle quantity type
    #[arg(long = "p-type", default_value = "DOUBLE")]
    p_type: String,

    /// Velocity type
    #[arg(long = "v-type", default_value = "DOUBLE")]
    v_type: String,

    /// Velocity flow type
    #[arg(long = "v-flow-type", default_value = "DOUBLE")]
    v_flow_type: String,

    /// Field rows read from the file
    #[arg(long, default_value_t = fluid_dispatch::domain::DEFAULT_ROWS)]
    rows: usize,

    /// Field columns read from the file
    #[arg(long, default_value_t = fluid_dispatch::domain::DEFAULT_COLS)]
    cols: usize,

    /// List registered type names and exit
    #[arg(long)]
    list_types: bool,

    /// List built type combinations and exit
    #[arg(long)]
    list_specializations: bool,
}

fn type_help() -> String {
    default_catalogue().help_text()
}

fn main() {
    fluid_dispatch::logging::init_logging();

    let args = Args::parse();

    let session = match DispatchSessionBuilder::<FieldProbe>::new()
        .with_observer(std::sync::Arc::new(LoggingObserver))
        .build()
    {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to build dispatch session: {}", e);
            process::exit(e.exit_code());
        }
    };

    if args.list_types {
        print!("{}", session.catalogue().help_text());
    }
    if args.list_specializations {
        print!("{}", session.table().manifest());
    }
    if args.list_types || args.list_specializations {
        return;
    }

    let mut config = RunConfig::new(args.p_type, args.v_type, args.v_flow_type)
        .with_dimensions(FieldDimensions::new(args.rows, args.cols));
    if let Some(path) = args.path {
        config = config.with_field_path(path);
    }

    match session.run(&FieldProbe, &config) {
        Ok(Ok(report)) => {
            info!("Probe finished");
            println!("{}", report);
        }
        Ok(Err(e)) => {
            let e = DispatchError::from(e);
            error!("Simulation failed: {}", e);
            process::exit(e.exit_code());
        }
        Err(e) => {
            match &e {
                DispatchError::UnknownTypeName { .. } => {
                    error!("{}", e);
                    error!("Run with --list-types to see registered names");
                }
                DispatchError::UnbuiltCombination { .. } => {
                    error!("{}", e);
                    error!("Run with --list-specializations to see built combinations");
                }
                _ => error!("{}", e),
            }
            process::exit(e.exit_code());
        }
    }
}
