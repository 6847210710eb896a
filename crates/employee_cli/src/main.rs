//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire configuration, logging and the datastore together.
//! - Print a short deterministic report for local sanity checks.

use employee_core::{
    core_version, init_logging, DatastoreEmployeeRepository, EmployeeService, StoreConfig,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("employee_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }

    let store = config.open_datastore()?;
    let service = EmployeeService::new(DatastoreEmployeeRepository::new(&store));
    let count = service.employee_count()?;
    info!(
        "event=cli_report module=cli status=ok namespace={} count={count}",
        config.effective_namespace()
    );

    println!("employee_core version={}", core_version());
    println!("namespace={}", config.effective_namespace());
    println!("employees={count}");
    Ok(())
}
