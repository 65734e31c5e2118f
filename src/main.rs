use anyhow::{Context, Result};
use clap::Parser;
use scenegraph::backends::{BackendOptions, Parser as SceneGraphParser};
use scenegraph::format::write_table;
use scenegraph::lexicon::LexiconCache;
use scenegraph::Config;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Sentences shown by `--demo`.
const DEMO_SENTENCES: &[&str] = &[
    "A woman is playing the piano in the room.",
    "A woman playing the piano in the room.",
    "A piano is played by a woman in the room.",
    "A woman is playing the space craft at NASA.",
    "A woman is playing with a space craft at NASA.",
    "A woman next to a piano.",
    "A woman in front of a piano.",
    "A woman standing next to a piano.",
    "The woman is a pianist.",
    "A giraffe grazing a tree in the wildness with other wildlife.",
    "Cow standing on sidewalk in city area near shops.",
];

#[derive(Parser, Debug)]
#[command(name = "scenegraph")]
#[command(version, about = "Parse sentences into scene graphs of entities and relations")]
struct Args {
    /// Sentences to parse; reads from stdin interactively when none are given
    sentences: Vec<String>,

    /// Configuration file (defaults to $SCENEGRAPH_CONFIG or ./scenegraph.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Annotation backend identifier (spacy, conllu)
    #[arg(short, long)]
    backend: Option<String>,

    /// Backend option, repeatable (e.g. -o model=en_core_web_lg)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Print graphs as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Parse the built-in demo sentences
    #[arg(long)]
    demo: bool,

    /// Hide the entity table
    #[arg(long)]
    no_entities: bool,

    /// Hide the relation table
    #[arg(long)]
    no_relations: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let _ = dotenv::dotenv();
            Config::load_from(path)?
        }
        None => Config::load()?,
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", &config.log_level)
    ).init();

    if let Some(backend) = &args.backend {
        config.parser.backend = backend.clone();
    }
    for pair in &args.options {
        let (key, value) = BackendOptions::parse_pair(pair)?;
        config.parser.options.insert(key, value);
    }

    let lexicons = LexiconCache::new();
    let parser = SceneGraphParser::from_config(&config, &lexicons)
        .with_context(|| format!("Failed to initialize backend {:?}", config.parser.backend))?;

    if args.demo {
        for sentence in DEMO_SENTENCES {
            run_sentence(&parser, sentence, &args)?;
        }
    }

    for sentence in &args.sentences {
        run_sentence(&parser, sentence, &args)?;
    }

    if !args.demo && args.sentences.is_empty() {
        run_interactive(&parser, &args)?;
    }

    Ok(())
}

/// Read sentences from stdin until `q` or end of input
fn run_interactive(parser: &SceneGraphParser, args: &Args) -> Result<()> {
    println!("Input your own sentence. Type q to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        if line.trim() == "q" {
            break;
        }
        run_sentence(parser, &line, args)?;
    }

    Ok(())
}

/// Parse and print one sentence; parse failures are logged and skipped
fn run_sentence(parser: &SceneGraphParser, sentence: &str, args: &Args) -> Result<()> {
    let graph = match parser.parse(sentence) {
        Ok(graph) => graph,
        Err(e) => {
            log::warn!("Failed to parse {:?}: {}", sentence, e);
            return Ok(());
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        writeln!(out, "{}", graph.to_json()?)?;
    } else {
        writeln!(out, "Sentence: {}", sentence)?;
        write_table(&mut out, &graph, !args.no_entities, !args.no_relations)?;
        writeln!(out)?;
    }

    Ok(())
}
