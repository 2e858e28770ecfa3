use std::env;
use std::time::Duration;

use quadrant_lcs::{LcsComparison, LcsEngineBuilder};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    #[cfg(feature = "tracing")]
    init_tracing();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("lcs_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let engine = match LcsEngineBuilder::new()
        .with_parallelism(options.workers)
        .with_split_depth(options.depth)
        .build()
    {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("lcs_probe: {err}");
            std::process::exit(2);
        }
    };

    let (a, b) = options.inputs();
    eprintln!("Using {} workers.", engine.workers());

    let mut sys = System::new();
    let mut runs = Vec::with_capacity(options.repeat);
    for _ in 0..options.repeat {
        let before = rss_kib(&mut sys);
        match engine.compare(&a, &b) {
            Ok(report) => runs.push(Run {
                report,
                rss_delta_kib: rss_kib(&mut sys).saturating_sub(before),
            }),
            Err(err) => {
                eprintln!("lcs_probe: computation failed: {err}");
                std::process::exit(1);
            }
        }
    }

    options.format.write(&runs, engine.workers());

    if runs.iter().any(|r| !r.report.agrees()) {
        eprintln!("lcs_probe: serial and parallel lengths disagree");
        std::process::exit(1);
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

struct Options {
    workers: usize,
    first: Input,
    second: Input,
    repeat: usize,
    depth: usize,
    format: OutputFormat,
}

enum Input {
    Literal(String),
    Synthetic { len: usize, offset: usize },
}

impl Input {
    fn bytes(&self) -> Vec<u8> {
        match self {
            Input::Literal(s) => s.as_bytes().to_vec(),
            Input::Synthetic { len, offset } => deterministic_dna(*len, *offset),
        }
    }
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut repeat = 1usize;
        let mut depth = 1usize;
        let mut synthetic: Option<usize> = None;
        let mut format = OutputFormat::Text;
        let mut positional = Vec::new();

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                format = OutputFormat::from_str(&next_value(&mut args, "--format")?)?;
            } else if let Some(value) = arg.strip_prefix("--repeat=") {
                repeat = parse_positive(value, "repeat count")?;
            } else if arg == "--repeat" {
                repeat = parse_positive(&next_value(&mut args, "--repeat")?, "repeat count")?;
            } else if let Some(value) = arg.strip_prefix("--depth=") {
                depth = parse_count(value, "split depth")?;
            } else if arg == "--depth" {
                depth = parse_count(&next_value(&mut args, "--depth")?, "split depth")?;
            } else if let Some(value) = arg.strip_prefix("--synthetic=") {
                synthetic = Some(parse_count(value, "synthetic length")?);
            } else if arg == "--synthetic" {
                synthetic = Some(parse_count(
                    &next_value(&mut args, "--synthetic")?,
                    "synthetic length",
                )?);
            } else if arg.starts_with("--") {
                return Err(format!("unrecognized argument '{arg}'"));
            } else {
                positional.push(arg);
            }
        }

        let mut positional = positional.into_iter();
        let workers = positional
            .next()
            .ok_or_else(|| "missing worker count".to_string())
            .and_then(|w| parse_positive(&w, "worker count"))?;

        let (first, second) = match synthetic {
            Some(len) => (
                Input::Synthetic { len, offset: 0 },
                Input::Synthetic { len, offset: 1 },
            ),
            None => {
                let first = positional
                    .next()
                    .ok_or_else(|| "missing first string".to_string())?;
                let second = positional
                    .next()
                    .ok_or_else(|| "missing second string".to_string())?;
                (Input::Literal(first), Input::Literal(second))
            }
        };
        if let Some(extra) = positional.next() {
            return Err(format!("unexpected argument '{extra}'"));
        }

        Ok(Self {
            workers,
            first,
            second,
            repeat,
            depth,
            format,
        })
    }

    fn inputs(&self) -> (Vec<u8>, Vec<u8>) {
        (self.first.bytes(), self.second.bytes())
    }

    fn print_help() {
        println!(
            "\
Usage: lcs_probe <workers> <string1> <string2> [options]
       lcs_probe <workers> --synthetic <len> [options]

Computes the LCS length of two strings with the serial and the parallel
quadrant scheduler and reports both timings and the speedup.

Options:
  --synthetic <N>          Use two generated DNA strings of length N instead of literals
  --repeat <N>             Number of timed runs (default: 1)
  --depth <N>              Recursive quadrant split depth (default: 1)
  --format <text|csv>      Output format (default: text)
  -h, --help               Print this help message

Examples:
  cargo run --bin lcs_probe -- 4 ABCBDAB BDCABA
  cargo run --release --bin lcs_probe -- 8 --synthetic 20000 --repeat 3 --format csv
"
        );
    }
}

fn next_value<I, T>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    args.next()
        .map(Into::into)
        .ok_or_else(|| format!("missing value after {flag}"))
}

fn parse_count(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a non-negative integer"))
}

fn parse_positive(value: &str, what: &str) -> Result<usize, String> {
    match parse_count(value, what)? {
        0 => Err(format!("{what} must be at least 1")),
        n => Ok(n),
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Text,
    Csv,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, runs: &[Run], workers: usize) {
        match self {
            OutputFormat::Text => write_text(runs),
            OutputFormat::Csv => write_csv(runs, workers),
        }
    }
}

struct Run {
    report: LcsComparison,
    rss_delta_kib: u64,
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

fn format_speedup(report: &LcsComparison) -> String {
    match report.speedup() {
        Some(s) => format!("{s:.3}"),
        None => "n/a".to_string(),
    }
}

fn write_text(runs: &[Run]) {
    for (idx, run) in runs.iter().enumerate() {
        let r = &run.report;
        if runs.len() > 1 {
            println!("Run {}/{}:", idx + 1, runs.len());
        }
        println!(
            "Length of Serial LCS: {}  |  Length of Parallel LCS: {}.",
            r.serial, r.parallel
        );
        println!("Serial LCS took: {:.3} mseconds.", millis(r.serial_elapsed));
        println!("Parallel LCS took: {:.3} mseconds.", millis(r.parallel_elapsed));
        println!("Total Speedup = {}.", format_speedup(r));
    }
}

fn write_csv(runs: &[Run], workers: usize) {
    println!("run,workers,serial_len,parallel_len,serial_ms,parallel_ms,speedup,rss_delta_kib");
    for (idx, run) in runs.iter().enumerate() {
        let r = &run.report;
        println!(
            "{},{},{},{},{:.3},{:.3},{},{}",
            idx + 1,
            workers,
            r.serial,
            r.parallel,
            millis(r.serial_elapsed),
            millis(r.parallel_elapsed),
            format_speedup(r),
            run.rss_delta_kib
        );
    }
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|p| p.memory() / 1024)
        .unwrap_or(0)
}

fn deterministic_dna(len: usize, offset: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|i| ALPHABET[(i * 7 + offset) % ALPHABET.len()])
        .collect()
}
