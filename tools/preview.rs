/// Preview — command-line driver for inspecting generated reports.
///
/// Usage: preview --language <code> [--format <ul|ol>] [--seed <n>] [--payload <file>]
///
/// Reads an event payload (JSON object or array) from the given file, or
/// from stdin when no file is passed, and prints the body, headline, and
/// error code of the generated report. RUST_LOG controls pipeline
/// logging.

use std::io::Read;

use report_engine::core::pipeline::{OutputFormat, ReportEngine};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut language: Option<String> = None;
    let mut format = OutputFormat::UnorderedList;
    let mut seed: Option<u64> = None;
    let mut payload_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--language" if i + 1 < args.len() => {
                i += 1;
                language = Some(args[i].clone());
            }
            "--format" if i + 1 < args.len() => {
                i += 1;
                format = match OutputFormat::parse(&args[i]) {
                    Some(f) => f,
                    None => {
                        eprintln!("Unknown format: {} (expected ul or ol)", args[i]);
                        std::process::exit(1);
                    }
                };
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = match args[i].parse() {
                    Ok(s) => Some(s),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i]);
                        std::process::exit(1);
                    }
                };
            }
            "--payload" if i + 1 < args.len() => {
                i += 1;
                payload_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(language) = language else {
        eprintln!("--language is required");
        print_usage();
        std::process::exit(1);
    };

    let payload = match payload_path {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("ERROR reading {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buf = String::new();
            if std::io::stdin().read_to_string(&mut buf).is_err() {
                eprintln!("ERROR reading payload from stdin");
                std::process::exit(1);
            }
            buf
        }
    };

    let mut builder = ReportEngine::builder();
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR building engine: {}", e);
            std::process::exit(1);
        }
    };

    println!("Languages: {}", engine.languages().join(", "));

    let report = engine.generate(&language, format, &payload);
    println!("\n--- Body ---");
    println!("{}", report.body);
    if let Some(headline) = &report.headline {
        println!("--- Headline ---");
        println!("{}", headline);
    }
    match &report.error {
        Some(code) => println!("--- Error: {} ---", code),
        None => println!("--- OK ---"),
    }
}

fn print_usage() {
    println!("Preview — command-line driver for inspecting generated reports.");
    println!();
    println!("Usage: preview --language <code> [--format <ul|ol>] [--seed <n>] [--payload <file>]");
    println!();
    println!("  --language <code>  Report language (en, fi, de, fr)");
    println!("  --format <ul|ol>   Body list style (default: ul)");
    println!("  --seed <n>         Pin the RNG seed");
    println!("  --payload <file>   Event payload JSON (default: stdin)");
}
