use anyhow::{anyhow, Result};
use clap::{arg, Command};
use ikp_instance::{Evaluation, Instance, Solution};
use std::{
    fs,
    io::{BufRead, BufReader},
};
use tracing::{debug, level_filters::LevelFilter};

fn cli() -> Command {
    Command::new("ikp-verifier")
        .about("Checks a solution against a knapsack instance")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution")
                .arg(
                    arg!(<INSTANCE> "Path to a .kp instance file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Path to a solution file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(--verbose "Log the totals that were checked")),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<String>("INSTANCE").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
            sub_m.get_flag("verbose"),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn verify_solution(instance_path: String, solution_path: String, verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    if instance_path == "-" && solution_path == "-" {
        return Err(anyhow!("Instance and solution cannot both be read from stdin"));
    }
    let instance = Instance::parse(open(&instance_path)?)?;
    let evaluation = check_solution(&instance, open(&solution_path)?)?;
    debug!(
        "Checked {} items: weight {} of {}, profit {}",
        instance.num_items(),
        evaluation.total_weight,
        instance.capacity,
        evaluation.total_profit
    );
    println!("Solution is valid");
    Ok(())
}

/// Parses solver output for `instance` and checks that it fits and that the
/// declared profit is the real one.
fn check_solution<R: BufRead>(instance: &Instance, reader: R) -> Result<Evaluation> {
    let (declared_profit, solution) = Solution::parse_output(reader, instance)?;
    let evaluation = instance
        .verify_solution(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    if declared_profit != evaluation.total_profit {
        return Err(anyhow!(
            "Invalid solution: declared profit {} but taken items sum to {}",
            declared_profit,
            evaluation.total_profit
        ));
    }
    Ok(evaluation)
}

fn open(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(std::io::stdin().lock()))
    } else {
        let file =
            fs::File::open(path).map_err(|e| anyhow!("Failed to read file {}: {}", path, e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
