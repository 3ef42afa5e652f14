use std::{error::Error, process::ExitCode};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use unitscript::{
    cli::{Cli, parse_args},
    parser::load_unit,
    script::{ScriptSynthesizer, unit_name_from_path},
};

fn main() -> ExitCode {
    let args = parse_args();
    init_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let parsed = load_unit(&args.unit)?;
    let unit_name = unit_name_from_path(&args.unit)?;
    info!("Translating unit '{unit_name}' from {:?}", args.unit);

    ScriptSynthesizer::new(&parsed.unit, unit_name)
        .interpreter(args.interpreter.as_str())
        .require_exec_start(args.strict)
        .write_to_path(&args.out)?;

    info!(
        "Wrote {:?} ({} ExecStartPre command(s), {} line(s) skipped)",
        args.out,
        parsed.unit.exec_start_pre.len(),
        parsed.diagnostics.len()
    );

    let model = serde_json::to_string_pretty(&parsed.unit)?;
    debug!("Parsed unit: {model}");
    if args.print_model {
        println!("{model}");
    }

    Ok(())
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
