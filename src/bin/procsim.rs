use std::env;
use std::process::ExitCode;
use std::time::Duration;

use u_procsim::logging;
use u_procsim::parser::load_config;
use u_procsim::scheduler::Solver;
use u_procsim::verify::verify_files;

fn print_usage() {
    println!("procsim <command>");
    println!("commands:");
    println!("  run <config> <seconds>");
    println!("    search for a schedule within the time budget and print it");
    println!("  verify <config> <trace>");
    println!("    replay a trace against a configuration");
}

fn parse_seconds(value: Option<&String>) -> Result<Duration, String> {
    let raw = value.ok_or_else(|| "missing seconds".to_string())?;
    raw.parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("invalid seconds: {raw}"))
}

fn run(args: &[String]) -> Result<(), String> {
    let config_path = args.get(2).ok_or_else(|| "missing config".to_string())?;
    let budget = parse_seconds(args.get(3))?;

    let cfg = load_config(config_path).map_err(|err| format!("{config_path}: {err}"))?;
    println!(
        "{} processes, {} stocks, {} to optimize",
        cfg.process_count(),
        cfg.item_count(),
        cfg.objective_keys().len()
    );

    let report = Solver::new().with_time_budget(budget).solve(&cfg);
    print!("{}", report.render());
    Ok(())
}

fn verify(args: &[String]) -> Result<(), String> {
    let config_path = args.get(2).ok_or_else(|| "missing config".to_string())?;
    let trace_path = args.get(3).ok_or_else(|| "missing trace".to_string())?;

    let report = verify_files(config_path, trace_path).map_err(|err| err.to_string())?;
    println!("Trace is valid: {} launches", report.launches);
    println!("Total cycles: {}", report.cycle);
    println!("Final stock:");
    for (name, qty) in &report.final_stocks {
        println!("{name}: {qty}");
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init();
    let args: Vec<String> = env::args().collect();

    let outcome = match args.get(1).map(String::as_str) {
        Some("run") => run(&args),
        Some("verify") => verify(&args),
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
