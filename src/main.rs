//! The perf binary: generates sample documents and races the pipeline
//! against `serde_json` on them.
//!
//! ```text
//! jetjson generate <name> [max_props] [max_depth]   write a sample file
//! jetjson run                                       time every sample
//! ```
//!
//! Timing wraps the plain `lex`/`parse` entry points from the outside;
//! results and failures pass through the wrappers unchanged.

use jetjson::generate::Generator;
use jetjson::timing::{format_time, timed, MetricRegistry};
use jetjson::{Lexer, Parser};
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

const DATA_SAMPLES_DIR: &str = "data_samples";
const DOCUMENTS_PER_SAMPLE: usize = 10;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("generate") => generate_sample(&args[1..]),
        Some("run") | None => run_samples(),
        Some(other) => {
            eprintln!("Unknown command '{}'", other);
            usage();
            ExitCode::FAILURE
        }
    }
}

fn usage() {
    eprintln!("Usage:");
    eprintln!("  jetjson generate <name> [max_props] [max_depth]");
    eprintln!("  jetjson run");
}

fn generate_sample(args: &[String]) -> ExitCode {
    let Some(name) = args.first() else {
        eprintln!("Missing sample name");
        usage();
        return ExitCode::FAILURE;
    };

    let max_props = match parse_bound(args.get(1), 10) {
        Ok(n) => n,
        Err(raw) => {
            eprintln!("Invalid max_props '{}'", raw);
            return ExitCode::FAILURE;
        }
    };
    let max_depth = match parse_bound(args.get(2), 5) {
        Ok(n) => n,
        Err(raw) => {
            eprintln!("Invalid max_depth '{}'", raw);
            return ExitCode::FAILURE;
        }
    };

    let mut generator = Generator::from_entropy(max_props, max_depth);
    let sample = generator.sample(DOCUMENTS_PER_SAMPLE);
    let text = match serde_json::to_string_pretty(&sample) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to serialize the sample: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let path = Path::new(DATA_SAMPLES_DIR).join(format!("{}.json", name));
    if let Err(e) = fs::create_dir_all(DATA_SAMPLES_DIR).and_then(|_| fs::write(&path, text)) {
        eprintln!("Failed to write {}: {}", path.display(), e);
        return ExitCode::FAILURE;
    }

    println!("Wrote {}", path.display());
    ExitCode::SUCCESS
}

fn parse_bound(raw: Option<&String>, default: usize) -> Result<usize, String> {
    match raw {
        Some(raw) => raw.parse().map_err(|_| raw.clone()),
        None => Ok(default),
    }
}

fn run_samples() -> ExitCode {
    let entries = match fs::read_dir(DATA_SAMPLES_DIR) {
        Ok(entries) => entries,
        Err(_) => {
            // First run: put the directory in place for the generate command.
            if let Err(e) = fs::create_dir_all(DATA_SAMPLES_DIR) {
                eprintln!("Failed to create {}: {}", DATA_SAMPLES_DIR, e);
                return ExitCode::FAILURE;
            }
            println!(
                "No data samples available. Generate some with \
                 jetjson generate <name> [max_props] [max_depth]"
            );
            return ExitCode::SUCCESS;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map(|e| e == "json") != Some(true) {
            continue;
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path.display(), e);
                continue;
            }
        };

        println!("--- Running {} data sample ---", path.display());

        let mut lex_metrics = MetricRegistry::new("lex");
        let tokens = match lex_metrics.time("lex", || Lexer::new(&contents).lex()) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("lex failed: {}", e);
                continue;
            }
        };
        print!("{}", lex_metrics.report());

        let mut parse_metrics = MetricRegistry::new("parse");
        match parse_metrics.time("parse", || Parser::new(&tokens).parse()) {
            Ok(_) => print!("{}", parse_metrics.report()),
            Err(e) => {
                eprintln!("parse failed: {}", e);
                continue;
            }
        }

        let (native, elapsed) = timed(|| serde_json::from_str::<serde_json::Value>(&contents));
        match native {
            Ok(_) => println!("serde_json::from_str took: {}", format_time(elapsed, 3)),
            Err(e) => eprintln!("serde_json failed: {}", e),
        }
    }

    ExitCode::SUCCESS
}
