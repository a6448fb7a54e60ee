//! Epithelial Flux - Entry point
//!
//! Console diagnostics binary for the transport engine.
//!
//! CLI Usage:
//!   cargo run                                  # Solve the baseline scenario
//!   cargo run -- --scenario glucose            # Glucose absorption demo
//!   cargo run -- --scenario chloride --export  # Solve, then export JSON + CSV
//!   cargo run -- -n 5000 --params run.json     # Custom budget and parameters

use std::time::Instant;

use anyhow::Result;
use epithelial_flux::{
    config::SimulationParameters,
    export::{export_fluxes_csv, export_result_json},
    presets,
    solver::{solve, Scenario},
};

/// Build a named scenario from the parameter file
///
/// The baseline playground takes its junction settings and SGLT isoform
/// from the parameters; the wired demos fix their own junction mode.
fn build_scenario(name: &str, params: &SimulationParameters) -> Option<Scenario> {
    match name {
        "baseline" => Some(presets::baseline_scenario(
            params.paracellular,
            params.sglt_isoform,
        )),
        "glucose" => Some(presets::glucose_absorption_scenario(params.sglt_isoform)),
        "chloride" => Some(presets::chloride_secretion_scenario()),
        _ => None,
    }
}

/// Parse CLI arguments
fn parse_args() -> (Option<String>, Option<usize>, bool, Option<String>) {
    let args: Vec<String> = std::env::args().collect();
    let mut scenario = None;
    let mut steps = None;
    let mut export = false;
    let mut params_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" | "-s" => {
                i += 1;
                if i < args.len() {
                    scenario = Some(args[i].clone());
                }
            }
            "-n" | "--steps" => {
                i += 1;
                if i < args.len() {
                    steps = args[i].parse().ok();
                }
            }
            "--export" | "-e" => export = true,
            "--params" | "-p" => {
                i += 1;
                if i < args.len() {
                    params_path = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!("Epithelial Flux");
                println!();
                println!("Usage: epithelial-flux [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --scenario NAME  Scenario to solve: baseline, glucose, chloride");
                println!("  -n, --steps N        Override the solver step budget");
                println!("  -e, --export         Export the result as JSON and CSV");
                println!("  -p, --params PATH    Parameter file (default: data/parameters.json)");
                println!("  --help, -h           Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (scenario, steps, export, params_path)
}

fn main() -> Result<()> {
    env_logger::init();

    let (scenario_arg, steps_override, export, params_path) = parse_args();

    let params = SimulationParameters::load_or_default(
        params_path.as_deref().unwrap_or("data/parameters.json"),
    );
    for warning in params.validate() {
        log::warn!("Parameter warning: {}", warning);
    }

    let mut solver_config = params.solver.clone();
    if let Some(max_steps) = steps_override {
        solver_config.max_steps = max_steps;
    }

    let scenario_name = scenario_arg.unwrap_or_else(|| params.scenario.clone());
    let scenario = match build_scenario(&scenario_name, &params) {
        Some(scenario) => scenario,
        None => {
            eprintln!(
                "Unknown scenario '{}' (expected baseline, glucose or chloride)",
                scenario_name
            );
            std::process::exit(1);
        }
    };

    println!("=== Epithelial Flux - {} scenario ===", scenario_name);
    println!();
    for warning in scenario.validate() {
        println!("⚠️  {}", warning);
    }

    // Every run starts from the baseline cytosol; feed a previous result's
    // icf back through the library API for carried-forward experiments.
    let initial_icf = presets::baseline_icf();

    let start = Instant::now();
    let result = solve(&scenario, &solver_config, &initial_icf);
    let elapsed = start.elapsed();

    result.print_summary();
    println!();
    println!(
        "Solve time: {:.2?} ({} steps, {:.0} steps/s)",
        elapsed,
        result.steps,
        result.steps as f64 / elapsed.as_secs_f64().max(1e-9)
    );

    if export {
        let json_path = export_result_json(&scenario_name, &result)?;
        println!("Exported JSON: {}", json_path.display());
        let csv_path = export_fluxes_csv(&result)?;
        println!("Exported CSV: {}", csv_path.display());
    }

    Ok(())
}
