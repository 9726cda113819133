use clap::{Parser, ValueEnum};
use funcscore_cli::loader::load_searcher;
use funcscore_core::config;
use funcscore_core::search::{sort_by_source, FunctionQuery, SortOrder};
use funcscore_core::source::{FloatFieldSource, ReciprocalFloatFunction};
use funcscore_core::{DocId, ValueSource};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}

#[derive(Parser)]
#[command(name = "funcscore", about = "Reciprocal decay scoring over JSON-lines documents")]
struct Args {
    /// JSON-lines input, one document object per line
    #[arg(short, long)]
    input: PathBuf,

    /// Numeric field to score on
    #[arg(short, long)]
    field: String,

    /// Multiplier m in a/(m*x+b)
    #[arg(long, default_value_t = config::RECIP_DEFAULT_M, allow_negative_numbers = true)]
    m: f32,

    /// Numerator a in a/(m*x+b)
    #[arg(long, default_value_t = config::RECIP_DEFAULT_A, allow_negative_numbers = true)]
    a: f32,

    /// Offset b in a/(m*x+b)
    #[arg(long, default_value_t = config::RECIP_DEFAULT_B, allow_negative_numbers = true)]
    b: f32,

    /// Documents per in-memory segment
    #[arg(long, env = "FUNCSCORE_SEGMENT_SIZE", default_value_t = config::DEFAULT_SEGMENT_SIZE)]
    segment_size: usize,

    /// Number of results to print
    #[arg(short = 'k', long, env = "FUNCSCORE_TOP_K", default_value_t = config::DEFAULT_TOP_K)]
    top_k: usize,

    /// Include a per-document score explanation
    #[arg(long, default_value_t = false, conflicts_with = "sort")]
    explain: bool,

    /// Print documents ordered by value instead of by score
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
}

#[derive(Serialize)]
struct ScoreRow {
    doc: DocId,
    score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("funcscore_cli=info".parse()?)
                .add_directive("funcscore_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.segment_size == 0 || args.segment_size > config::MAX_SEGMENT_SIZE {
        eprintln!(
            "Error: segment-size must be between 1 and {}",
            config::MAX_SEGMENT_SIZE
        );
        std::process::exit(1);
    }
    if args.top_k == 0 || args.top_k > config::MAX_K {
        eprintln!("Error: top-k must be between 1 and {}", config::MAX_K);
        std::process::exit(1);
    }

    let searcher = load_searcher(&args.input, &args.field, args.segment_size)?;
    let source: Arc<dyn ValueSource> = Arc::new(ReciprocalFloatFunction::new(
        Arc::new(FloatFieldSource::new(args.field.as_str())),
        args.m,
        args.a,
        args.b,
    ));

    let start = Instant::now();
    let mut out = Vec::new();
    match args.sort {
        Some(order) => {
            for row in sort_by_source(&searcher, source.as_ref(), order.into(), args.top_k)? {
                out.push(serde_json::to_string(&row)?);
            }
        }
        None => {
            let query = FunctionQuery::new(source.clone());
            for hit in query.search(&searcher, args.top_k)? {
                let explanation = if args.explain {
                    Some(query.explain(&searcher, hit.doc)?)
                } else {
                    None
                };
                out.push(serde_json::to_string(&ScoreRow {
                    doc: hit.doc,
                    score: hit.score,
                    explanation,
                })?);
            }
        }
    }
    tracing::info!(
        source = %source,
        results = out.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Query completed"
    );

    for line in out {
        println!("{line}");
    }
    Ok(())
}
