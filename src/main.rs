use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::Level;

use json_path_like_eval::context::DEFAULT_MAX_DEPTH;
use json_path_like_eval::render::render_nodelist;
use json_path_like_eval::{loader, Context, Evaluator, Result};

/// Evaluate a JSONPath-like query against a JSON file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON document to query
    file: PathBuf,
    /// Query, e.g. `$.store.book[0]` or `size(items) * 2`
    query: String,
    /// Print compact JSON instead of the indented form
    #[arg(long)]
    compact: bool,
    /// How deep sub-expressions may nest
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.to_string().trim_end());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let doc = loader::from_file(&args.file)?;
    let evaluator = Evaluator::new(Context::default().with_max_depth(args.max_depth));
    let nodes = evaluator.evaluate(&doc, &args.query)?;

    // A single match is printed bare, anything else as an array.
    let out = match (nodes.as_slice(), args.compact) {
        ([only], true) => serde_json::to_string(&**only)?,
        ([only], false) => only.to_pretty_string(),
        (_, true) => serde_json::to_string(&nodes)?,
        (_, false) => render_nodelist(&nodes),
    };
    Ok(out)
}
