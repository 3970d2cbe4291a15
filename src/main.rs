use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use question_search::corpus;
use question_search::error::EngineError;
use question_search::SearchEngine;

#[derive(Debug, Parser)]
#[command(name = "question-search", about = "TF-IDF question similarity search")]
struct Args {
    /// Path to the newline-delimited JSON question corpus.
    #[arg(short = 'd', long, default_value = "data/questions.jsonl")]
    corpus: PathBuf,

    /// Path to the stop-word list (a JSON array of lower-case strings).
    #[arg(short = 's', long, default_value = "data/stop_words_english.json")]
    stop_words: PathBuf,

    /// Size of the embedding vectors (also the vocabulary cap).
    #[arg(short = 'v', long, default_value_t = 100)]
    embedding_size: usize,

    /// Path to the engine snapshot cache.
    #[arg(long, default_value = "cached/engine.cbor")]
    cache: PathBuf,

    /// Rebuild the engine from the corpus even when a cache exists.
    #[arg(long)]
    force_reprocess: bool,

    /// Run a single query and exit; without it an interactive prompt starts.
    #[arg(short, long)]
    query: Option<String>,

    /// Number of similar questions to return per query.
    #[arg(short = 'n', long, default_value_t = 5)]
    top: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let engine = match load_engine(&args) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("failed to initialize engine: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(query) = &args.query {
        run_query(&engine, query, args.top);
    } else {
        run_interactive(&engine, args.top);
    }
    ExitCode::SUCCESS
}

/// Restore from the cache when possible, otherwise build from the corpus and
/// persist the result. A missing or corrupt cache falls back to a build; a
/// malformed corpus is fatal.
fn load_engine(args: &Args) -> Result<SearchEngine, EngineError> {
    if !args.force_reprocess {
        match SearchEngine::restore(&args.cache) {
            Ok(engine) => return Ok(engine),
            Err(e @ (EngineError::NotFound(_) | EngineError::Corrupt(_))) => {
                tracing::warn!("cache unusable ({e}), rebuilding from corpus");
            }
            Err(e) => return Err(e),
        }
    }

    let documents = corpus::load_documents(&args.corpus)?;
    let stop_words: HashSet<String> = corpus::load_stop_words(&args.stop_words)?;
    let engine = SearchEngine::build(documents, stop_words, args.embedding_size)?;
    if let Err(e) = engine.persist(&args.cache) {
        // A failed cache write only costs the next startup a rebuild.
        tracing::warn!("could not persist engine cache: {e}");
    }
    Ok(engine)
}

fn run_query(engine: &SearchEngine, query: &str, top: usize) {
    let n = top.min(engine.len());
    match engine.query(query, n) {
        Ok(hits) => {
            for (score, text) in hits.iter().rev() {
                println!("{score:.4}\t{text}");
            }
        }
        Err(e) => eprintln!("[error] {e}"),
    }
}

fn run_interactive(engine: &SearchEngine, top: usize) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Query> ");
        let _ = stdout.flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("[error] read error: {e}");
                break;
            }
        }
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("exit")
            || trimmed.eq_ignore_ascii_case("quit")
        {
            break;
        }
        run_query(engine, trimmed, top);
    }
}
