use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sense_disambiguator::NoContextPolicy;
use sense_graph::Weighting;
use sense_inventory::CaseFolding;
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;

mod config;
mod induce;
mod query;
mod tokenize;

use config::AppConfig;
use induce::InduceJob;
use tokenize::tokenize;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "sense")]
#[command(
    about = "Word sense induction and disambiguation over word embeddings",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML settings file with [induction] and [disambiguation] sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Induce sense inventories from word vectors
    Induce(InduceArgs),

    /// List the known senses of a word
    Senses(SensesArgs),

    /// Rank the senses of a word, or of every token, in context
    Disambiguate(DisambiguateArgs),

    /// Split text into the tokens the other commands expect
    Tokenize(TokenizeArgs),
}

#[derive(Args)]
struct InduceArgs {
    /// Word vectors in word2vec text format (.gz allowed)
    #[arg(long)]
    vectors: PathBuf,

    /// Output prefix; writes <PREFIX>.top<K>.inventory.tsv per neighbor budget
    #[arg(long)]
    output: PathBuf,

    /// Neighbor budgets (comma separated)
    #[arg(long, value_delimiter = ',')]
    neighbors: Vec<usize>,

    /// Word list file (first column per line) instead of the embedding vocabulary
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Number of vocabulary words to induce
    #[arg(long, conflicts_with = "all_words")]
    limit: Option<usize>,

    /// Induce the whole vocabulary
    #[arg(long)]
    all_words: bool,

    /// Rows to read from the vectors file
    #[arg(long)]
    max_vectors: Option<usize>,

    /// Words per neighbor precomputation batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// Label propagation passes
    #[arg(long)]
    iterations: Option<usize>,

    /// Edge weighting for label propagation
    #[arg(long, value_enum)]
    weighting: Option<WeightingArg>,

    /// Induce punctuation-only words too
    #[arg(long)]
    keep_punctuation: bool,

    /// Neighbor cache file, reused when present
    #[arg(long)]
    neighbor_cache: Option<PathBuf>,

    /// Continue interrupted inventories instead of overwriting them
    #[arg(long)]
    resume: bool,
}

#[derive(Args)]
struct SensesArgs {
    /// Sense inventory TSV
    #[arg(long)]
    inventory: PathBuf,

    /// Case folding policy (exact, title-lower, title-lower-upper)
    #[arg(long)]
    case_folding: Option<CaseFolding>,

    word: String,
}

#[derive(Args)]
struct DisambiguateArgs {
    /// Word vectors the inventory was induced from
    #[arg(long)]
    vectors: PathBuf,

    /// Sense inventory TSV
    #[arg(long)]
    inventory: PathBuf,

    /// Rows to read from the vectors file
    #[arg(long)]
    max_vectors: Option<usize>,

    /// Word to disambiguate; every token when omitted
    #[arg(long)]
    target: Option<String>,

    /// Context as tokens
    #[arg(long, num_args = 1.., conflicts_with = "text")]
    tokens: Vec<String>,

    /// Context as raw text
    #[arg(long)]
    text: Option<String>,

    /// Context words averaged into the context vector
    #[arg(long)]
    most_significant: Option<usize>,

    /// Case folding policy (exact, title-lower, title-lower-upper)
    #[arg(long)]
    case_folding: Option<CaseFolding>,

    /// Fail when a sense keyword has no vector
    #[arg(long)]
    strict: bool,

    /// Result when no context word is usable
    #[arg(long, value_enum)]
    no_context: Option<NoContextArg>,
}

#[derive(Args)]
struct TokenizeArgs {
    /// Text to split; read from stdin when omitted
    text: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum WeightingArg {
    Top,
    Lin,
    Log,
}

impl From<WeightingArg> for Weighting {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::Top => Weighting::Top,
            WeightingArg::Lin => Weighting::Lin,
            WeightingArg::Log => Weighting::Log,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum NoContextArg {
    UniformTie,
    Unknown,
}

impl From<NoContextArg> for NoContextPolicy {
    fn from(arg: NoContextArg) -> Self {
        match arg {
            NoContextArg::UniformTie => NoContextPolicy::UniformTie,
            NoContextArg::Unknown => NoContextPolicy::Unknown,
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Induce(args) => run_induce(args, config, cli.quiet).await?,
        Commands::Senses(args) => run_senses(args, config).await?,
        Commands::Disambiguate(args) => run_disambiguate(args, config).await?,
        Commands::Tokenize(args) => run_tokenize(args)?,
    }

    Ok(())
}

async fn run_induce(args: InduceArgs, config: AppConfig, quiet: bool) -> Result<()> {
    let mut induction = config.induction;
    if !args.neighbors.is_empty() {
        induction.neighbor_counts = args.neighbors;
    }
    if args.all_words {
        induction.limit = None;
    } else if args.limit.is_some() {
        induction.limit = args.limit;
    }
    if let Some(batch_size) = args.batch_size {
        induction.batch_size = batch_size;
    }
    if let Some(iterations) = args.iterations {
        induction.iterations = iterations;
    }
    if let Some(weighting) = args.weighting {
        induction.weighting = weighting.into();
    }
    if args.keep_punctuation {
        induction.skip_punctuation = false;
    }

    let job = InduceJob {
        vectors: args.vectors,
        output: args.output,
        vocabulary: args.vocabulary,
        max_vectors: args.max_vectors,
        neighbor_cache: args.neighbor_cache,
        resume: args.resume,
        show_progress: !quiet,
        config: induction,
    };

    let outcomes = tokio::task::spawn_blocking(move || induce::run(&job))
        .await
        .context("Induction task panicked")??;

    print_json(&outcomes)
}

async fn run_senses(args: SensesArgs, config: AppConfig) -> Result<()> {
    let folding = args
        .case_folding
        .unwrap_or(config.disambiguation.case_folding);
    let inventory = query::load_inventory(args.inventory).await?;

    print_json(&query::senses(&inventory, &args.word, folding))
}

async fn run_disambiguate(args: DisambiguateArgs, config: AppConfig) -> Result<()> {
    let tokens = match args.text.as_deref() {
        Some(text) => tokenize(text),
        None => args.tokens,
    };
    if tokens.is_empty() && args.target.is_none() {
        bail!("Nothing to disambiguate: pass --tokens, --text or --target");
    }

    let mut settings = config.disambiguation;
    if let Some(most_significant) = args.most_significant {
        settings.most_significant = most_significant;
    }
    if let Some(folding) = args.case_folding {
        settings.case_folding = folding;
    }
    if args.strict {
        settings.strict_keywords = true;
    }
    if let Some(policy) = args.no_context {
        settings.no_context = policy.into();
    }
    settings.validate()?;

    let model = query::load_model(args.vectors, args.inventory, args.max_vectors).await?;
    let result = query::disambiguate(&model, settings, &tokens, args.target.as_deref())?;

    print_json(&result)
}

fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    print_json(&tokenize(&text))
}
