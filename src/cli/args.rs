use crate::models::difficulty::Difficulty;

pub const DEFAULT_TICKS: u32 = 600;
pub const DEFAULT_DT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    pub ticks: u32,
    pub dt: f64,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            seed: None,
            difficulty: Difficulty::default(),
            ticks: DEFAULT_TICKS,
            dt: DEFAULT_DT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Args),
    Help,
}

pub const USAGE: &str = "\
Usage: starraid [OPTIONS]

Options:
  -s, --seed <INT>          Seed for the random number generator
  -d, --difficulty <TIER>   novice, pilot, warrior or commander [default: pilot]
  -t, --ticks <INT>         Number of simulation ticks to run [default: 600]
      --dt <SECONDS>        Seconds per tick [default: 0.1]
  -h, --help                Print help";

fn value_for<I: Iterator<Item = String>>(flag: &str, iter: &mut I) -> Result<String, String> {
    iter.next().ok_or_else(|| format!("{} requires a value", flag))
}

/// Parse process arguments (without the program name).
pub fn parse() -> Result<Command, String> {
    parse_from(std::env::args().skip(1))
}

pub fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut parsed = Args::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" | "-s" => {
                let val = value_for(&arg, &mut iter)?;
                parsed.seed = Some(
                    val.parse::<u64>()
                        .map_err(|_| format!("seed must be a valid integer, got '{}'", val))?,
                );
            }
            "--difficulty" | "-d" => {
                parsed.difficulty = value_for(&arg, &mut iter)?.parse()?;
            }
            "--ticks" | "-t" => {
                let val = value_for(&arg, &mut iter)?;
                parsed.ticks = val
                    .parse::<u32>()
                    .map_err(|_| format!("ticks must be a non-negative integer, got '{}'", val))?;
            }
            "--dt" => {
                let val = value_for(&arg, &mut iter)?;
                parsed.dt = match val.parse::<f64>() {
                    Ok(dt) if dt > 0.0 && dt.is_finite() => dt,
                    _ => return Err(format!("dt must be a positive number, got '{}'", val)),
                };
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Run(parsed))
}
