use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use ikp_algorithms::{solve_challenge, Diagnostics, Verbosity};
use ikp_instance::{Instance, Solution, Track};
use ikp_utils::{jsonify, load_json_object, Quantity};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    cell::RefCell,
    fs,
    io::{BufReader, Write},
    path::PathBuf,
    time::Instant,
};
use tracing::info;

fn cli() -> Command {
    Command::new("ikp-runtime")
        .about("Solves 0/1 knapsack instances with the interval DP")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compute_solution")
                .about("Solves an instance and prints the solution")
                .arg(
                    arg!([INSTANCE] "Path to a .kp instance file, or '-' for stdin")
                        .default_value("-")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--modulo <BASE> "Base the weights are rounded in (1 solves exactly)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--exponents <EXPONENT> "Digit position to drop; repeat for several")
                        .action(ArgAction::Append)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--verbose [LEVEL] "Diagnostic detail: 0, 1 or 2")
                        .default_value("0")
                        .value_parser(clap::value_parser!(u8).range(0..=2)),
                )
                .arg(
                    arg!(--info [INFO_FILE] "If set, runtime and total profit are saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Generates a random instance and prints it in .kp format")
                .arg(arg!(<SEED> "Seed for the generator").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--num_items [NUM_ITEMS] "Number of items")
                        .default_value("50")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--max_weight [MAX_WEIGHT] "Largest item weight")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--max_profit [MAX_PROFIT] "Largest item profit")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--budget [BUDGET] "Capacity as a percentage of the total weight")
                        .default_value("25")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("compute_solution", sub_m)) => compute_solution(
            sub_m.get_one::<String>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<u64>("modulo").cloned(),
            sub_m
                .get_many::<u32>("exponents")
                .map(|values| values.cloned().collect()),
            *sub_m.get_one::<u8>("verbose").unwrap(),
            sub_m.get_one::<PathBuf>("info").cloned(),
            sub_m.get_one::<String>("hyperparameters").cloned(),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            *sub_m.get_one::<u64>("SEED").unwrap(),
            Track {
                num_items: *sub_m.get_one::<usize>("num_items").unwrap(),
                max_weight: *sub_m.get_one::<u32>("max_weight").unwrap(),
                max_profit: *sub_m.get_one::<u32>("max_profit").unwrap(),
                budget: *sub_m.get_one::<u32>("budget").unwrap(),
            },
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Serialize)]
struct SolveInfo {
    runtime: f64,
    total_profit: Quantity,
}

pub fn compute_solution(
    instance_path: String,
    modulo: Option<u64>,
    exponents: Option<Vec<u32>>,
    verbose: u8,
    info_file: Option<PathBuf>,
    hyperparameters: Option<String>,
) -> Result<()> {
    let verbosity = Verbosity::from_level(verbose);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(verbosity.level_filter())
        .init();
    let diagnostics = Diagnostics::new(verbosity);

    let instance = load_instance(&instance_path)?;
    let hyperparameters = merge_hyperparameters(hyperparameters, modulo, exponents)?;

    let start = Instant::now();
    let latest = RefCell::new(Option::<Solution>::None);
    let save_solution = |solution: &Solution| -> Result<()> {
        *latest.borrow_mut() = Some(solution.clone());
        Ok(())
    };
    solve_challenge(&instance, &save_solution, &hyperparameters, &diagnostics)?;
    let runtime = start.elapsed().as_secs_f64();
    let solution = latest
        .into_inner()
        .ok_or_else(|| anyhow!("Solver returned without a solution"))?;

    let evaluation = instance.verify_solution(&solution)?;
    info!(
        "Solved {} items in {:.3}s: weight {}, profit {}",
        instance.num_items(),
        runtime,
        evaluation.total_weight,
        evaluation.total_profit
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    instance.write_solution(&solution, &mut out)?;
    out.flush()?;

    if let Some(path) = info_file {
        let record = SolveInfo {
            runtime,
            total_profit: evaluation.total_profit,
        };
        fs::write(&path, jsonify(&record))?;
    }
    Ok(())
}

pub fn generate_instance(seed: u64, track: Track) -> Result<()> {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    let instance = Instance::generate_instance(&bytes, &track)?;
    print!("{}", instance.to_kp_string());
    Ok(())
}

fn load_instance(path: &str) -> Result<Instance> {
    let instance = if path == "-" {
        Instance::parse(std::io::stdin().lock())
    } else {
        let file = fs::File::open(path)
            .map_err(|e| anyhow!("Failed to read instance file {}: {}", path, e))?;
        Instance::parse(BufReader::new(file))
    };
    Ok(instance?)
}

/// Command line flags win over the same keys in `hyperparameters`.
fn merge_hyperparameters(
    hyperparameters: Option<String>,
    modulo: Option<u64>,
    exponents: Option<Vec<u32>>,
) -> Result<Option<Map<String, Value>>> {
    let mut merged = match hyperparameters {
        Some(h) => Some(load_json_object(&h)?),
        None => None,
    };
    if modulo.is_some() || exponents.is_some() {
        let map = merged.get_or_insert_with(Map::new);
        if let Some(modulo) = modulo {
            map.insert("modulo".to_string(), Value::from(modulo));
        }
        if let Some(exponents) = exponents {
            map.insert("exponents".to_string(), Value::from(exponents));
        }
    }
    Ok(merged)
}
