//! Line-oriented calculator driver.
//!
//! Reads one JSON scenario per stdin line and prints one JSON result per
//! line on stdout:
//!
//! ```text
//! {"gen":9,"attacker":{...},"defender":{...},"move":{...},"field":{...}}
//! ```
//!
//! Usage:
//!   cargo run -p poke_calc --bin fixture_runner -- --notation px < scenarios.jsonl

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

use poke_calc::{
    calculate, display, get_ko_chance, get_recoil, get_recovery, Damage, Field, Generation, Move, MoveSet, Notation,
    Pokemon, PokemonSet,
};

#[derive(Parser)]
#[command(name = "fixture_runner")]
struct Cli {
    /// Log every pipeline decision to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Report malformed distributions as errors instead of debug noise
    #[arg(long)]
    strict: bool,

    /// Percent of max HP ("%") or pixels of the HP bar ("px")
    #[arg(long, default_value = "%", value_parser = parse_notation)]
    notation: Notation,
}

fn parse_notation(s: &str) -> std::result::Result<Notation, String> {
    match s {
        "%" | "percent" => Ok(Notation::Percent),
        "px" | "pixels" => Ok(Notation::Pixels),
        other => Err(format!("unknown notation: {other}")),
    }
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

#[derive(Deserialize)]
struct Scenario {
    #[serde(default = "default_gen")]
    gen: u8,
    attacker: PokemonSet,
    defender: PokemonSet,
    #[serde(rename = "move")]
    move_data: MoveSet,
    #[serde(default)]
    field: Field,
}

fn default_gen() -> u8 {
    9
}

#[derive(Serialize)]
struct Output {
    damage: Damage,
    min: u32,
    max: u32,
    ko: Option<f64>,
    ko_text: String,
    recovery: [i64; 2],
    recoil: [f64; 2],
    desc: String,
}

fn run(scenario: Scenario, cli: &Cli) -> Result<Output> {
    let gen = Generation::from_num(scenario.gen)?;
    let attacker = Pokemon::from_set(scenario.attacker).context("building attacker")?;
    let defender = Pokemon::from_set(scenario.defender).context("building defender")?;
    let mv = Move::from_set(scenario.move_data).context("building move")?;

    let result = calculate(gen, &attacker, &defender, &mv, &scenario.field);
    let (min, max) = result.range();
    let ko = get_ko_chance(gen, &result.attacker, &result.defender, &result.mv, &result.field, &result.damage, cli.strict);
    let recovery = get_recovery(gen, &result.attacker, &result.defender, &result.mv, &result.damage, cli.notation);
    let recoil =
        get_recoil(gen, &result.attacker, &result.defender, &result.mv, &result.damage, &result.field, cli.notation);

    Ok(Output {
        desc: display(gen, &result, cli.notation, cli.strict),
        damage: result.damage,
        min,
        max,
        ko: ko.chance,
        ko_text: ko.text,
        recovery: recovery.recovery,
        recoil: recoil.recoil,
    })
}

fn install_logger(verbose: bool) -> Result<()> {
    log::set_logger(&LOGGER).context("installing logger")?;
    log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_logger(cli.verbose)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let scenario: Scenario = match serde_json::from_str(&line) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error parsing scenario on line {}: {}", index + 1, e);
                continue;
            }
        };

        match run(scenario, &cli) {
            Ok(output) => {
                serde_json::to_writer(&mut out, &output)?;
                writeln!(out)?;
            }
            Err(e) => eprintln!("Error on line {}: {:#}", index + 1, e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_second_logger_install_reports_context() {
        install_logger(false).unwrap();
        let err = install_logger(true).unwrap_err();
        assert_eq!(err.to_string(), "installing logger");
        assert_eq!(log::max_level(), LevelFilter::Warn);
    }
}
