use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sense_graph::ChineseWhispers;
use sense_inventory::{
    InductionConfig, InductionReport, InventoryWriter, SenseInducer, SenseInventory,
};
use sense_vector_store::{FlatIndex, NeighborCache, WordVectors};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Everything a batch induction run needs
#[derive(Debug, Clone)]
pub struct InduceJob {
    pub vectors: PathBuf,

    /// Output prefix; one `<prefix>.top<K>.inventory.tsv` per neighbor budget
    pub output: PathBuf,

    /// Word list to induce instead of the embedding vocabulary
    pub vocabulary: Option<PathBuf>,

    /// Rows read from the vectors file (None = all)
    pub max_vectors: Option<usize>,

    /// Neighbor cache file: loaded when present, written after a fresh build
    pub neighbor_cache: Option<PathBuf>,

    /// Append to existing inventories, skipping words they already hold
    pub resume: bool,

    pub show_progress: bool,

    pub config: InductionConfig,
}

/// Result of one neighbor budget
#[derive(Debug, Serialize)]
pub struct BudgetOutcome {
    pub neighbors: usize,
    pub output: String,

    /// Words skipped because the inventory already had them
    pub resumed: usize,

    pub report: InductionReport,
}

pub fn inventory_path(prefix: &Path, neighbors: usize) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(format!(".top{neighbors}.inventory.tsv"));
    PathBuf::from(name)
}

/// Run induction for every configured neighbor budget
pub fn run(job: &InduceJob) -> Result<Vec<BudgetOutcome>> {
    job.config.validate()?;

    let vectors = WordVectors::load(&job.vectors, job.max_vectors)
        .with_context(|| format!("Failed to load vectors from {}", job.vectors.display()))?;
    let vocabulary = select_vocabulary(&vectors, job.vocabulary.as_deref(), job.config.limit)?;
    log::info!("Inducing senses for {} words", vocabulary.len());

    let index = FlatIndex::new(&vectors);
    let cache = neighbor_cache(&index, &vocabulary, job)?;

    let mut outcomes = Vec::with_capacity(job.config.neighbor_counts.len());
    for &neighbors in &job.config.neighbor_counts {
        let path = inventory_path(&job.output, neighbors);
        let (pending, resumed) = pending_words(&vocabulary, &path, job.resume)?;

        let mut writer = if job.resume {
            InventoryWriter::append(&path)
        } else {
            InventoryWriter::create(&path)
        }
        .with_context(|| format!("Failed to open {}", path.display()))?;

        let labeler = ChineseWhispers::new(job.config.iterations, job.config.weighting);
        let inducer = SenseInducer::new(&vectors, &cache, neighbors, labeler);

        let progress = progress_bar(pending.len(), neighbors, job.show_progress);
        let report = inducer
            .induce_all(&pending, job.config.skip_punctuation, |_, records| {
                progress.inc(1);
                writer.write_records(records)
            })
            .with_context(|| format!("Failed to write {}", path.display()))?;
        progress.finish_and_clear();

        log::info!("Wrote {}", path.display());
        outcomes.push(BudgetOutcome {
            neighbors,
            output: path.display().to_string(),
            resumed,
            report,
        });
    }

    Ok(outcomes)
}

/// Words to induce: the word list file when given, the embedding vocabulary otherwise
fn select_vocabulary(
    vectors: &WordVectors,
    list: Option<&Path>,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    let words: Vec<String> = match list {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read vocabulary {}", path.display()))?;
            text.lines()
                .filter_map(|line| line.split_whitespace().next())
                .map(str::to_string)
                .collect()
        }
        None => vectors.words().to_vec(),
    };

    Ok(match limit {
        Some(limit) => words.into_iter().take(limit).collect(),
        None => words,
    })
}

fn neighbor_cache<'a>(
    index: &'a FlatIndex<'a>,
    vocabulary: &[String],
    job: &InduceJob,
) -> Result<NeighborCache<'a, FlatIndex<'a>>> {
    let depth = job.config.cache_depth();

    if let Some(path) = job.neighbor_cache.as_deref().filter(|path| path.exists()) {
        let cache = NeighborCache::load(index, path)
            .with_context(|| format!("Failed to load neighbor cache {}", path.display()))?;
        if cache.depth() < depth {
            bail!(
                "Neighbor cache {} holds {} neighbors per word, {} are needed",
                path.display(),
                cache.depth(),
                depth
            );
        }
        return Ok(cache);
    }

    let cache = NeighborCache::build(index, vocabulary, depth, job.config.batch_size)?;
    if let Some(path) = &job.neighbor_cache {
        cache
            .save(path)
            .with_context(|| format!("Failed to save neighbor cache {}", path.display()))?;
    }
    Ok(cache)
}

fn pending_words(vocabulary: &[String], path: &Path, resume: bool) -> Result<(Vec<String>, usize)> {
    if !resume || !path.exists() {
        return Ok((vocabulary.to_vec(), 0));
    }

    let done = SenseInventory::load(path)
        .with_context(|| format!("Failed to read existing inventory {}", path.display()))?;
    let pending: Vec<String> = vocabulary
        .iter()
        .filter(|word| !done.contains_word(word))
        .cloned()
        .collect();
    let resumed = vocabulary.len() - pending.len();
    log::info!("{}: {} words already induced", path.display(), resumed);

    Ok((pending, resumed))
}

fn progress_bar(len: usize, neighbors: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    let template = "{prefix} [{elapsed_precise}] {bar:40} {pos}/{len}";
    if let Ok(style) = ProgressStyle::with_template(template) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_prefix(format!("top{neighbors}"));
    bar
}
