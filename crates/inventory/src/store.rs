use crate::casing::CaseFolding;
use crate::error::{InventoryError, Result};
use crate::sense::SenseRecord;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Header row of inventory files
pub const TSV_HEADER: &str = "word\tcid\tkeyword\tcluster";

const CLUSTER_SEPARATOR: &str = ", ";

/// Word → senses lookup over a fully loaded inventory.
///
/// Immutable once built; share it behind an `Arc` for concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct SenseInventory {
    senses: HashMap<String, Vec<SenseRecord>>,
    records: usize,
}

impl SenseInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = SenseRecord>) -> Self {
        let mut inventory = Self::new();
        for record in records {
            inventory.insert(record);
        }
        inventory
    }

    pub fn insert(&mut self, record: SenseRecord) {
        self.senses
            .entry(record.word.clone())
            .or_default()
            .push(record);
        self.records += 1;
    }

    /// Senses stored under exactly `word`
    pub fn get(&self, word: &str) -> &[SenseRecord] {
        self.senses.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// Senses stored under any spelling of `word` allowed by `folding`
    pub fn lookup(&self, word: &str, folding: CaseFolding) -> Vec<&SenseRecord> {
        folding
            .variants(word)
            .iter()
            .flat_map(|variant| self.get(variant))
            .collect()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.senses.contains_key(word)
    }

    /// Words with at least one sense
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.senses.keys().map(String::as_str)
    }

    /// Number of sense records
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn word_count(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Load an inventory TSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading sense inventory from {:?}", path);
        let file = File::open(path)?;
        let inventory = Self::read_tsv(BufReader::new(file))?;
        log::info!(
            "Loaded {} senses for {} words",
            inventory.len(),
            inventory.word_count()
        );
        Ok(inventory)
    }

    /// Parse `word \t cid \t keyword \t cluster` rows. The header row is optional.
    pub fn read_tsv<R: BufRead>(reader: R) -> Result<Self> {
        let mut inventory = Self::new();

        for (offset, line) in reader.lines().enumerate() {
            let line_no = offset + 1;
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() || (line_no == 1 && line == TSV_HEADER) {
                continue;
            }
            inventory.insert(parse_row(line_no, line)?);
        }

        Ok(inventory)
    }

    /// Write all records, words in alphabetical order
    pub fn write_tsv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = InventoryWriter::new(out)?;
        let mut words: Vec<&String> = self.senses.keys().collect();
        words.sort();
        for word in words {
            writer.write_records(&self.senses[word])?;
        }
        writer.into_inner().flush()?;
        Ok(())
    }
}

fn parse_row(line_no: usize, line: &str) -> Result<SenseRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [word, sense_id, keyword, cluster] = fields.as_slice() else {
        return Err(InventoryError::parse(
            line_no,
            format!("expected 4 tab-separated fields, got {}", fields.len()),
        ));
    };

    let sense_id = sense_id
        .trim()
        .parse::<usize>()
        .map_err(|e| InventoryError::parse(line_no, format!("bad sense id '{sense_id}': {e}")))?;

    let cluster = cluster
        .split(',')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .map(str::to_string)
        .collect();

    Ok(SenseRecord {
        word: word.to_string(),
        sense_id,
        keyword: keyword.to_string(),
        cluster,
    })
}

/// Appends inventory rows, flushing after every word so an interrupted batch leaves
/// only complete words behind.
pub struct InventoryWriter<W: Write> {
    out: W,
}

impl InventoryWriter<BufWriter<File>> {
    /// Start a new file, replacing any existing one
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }

    /// Continue an existing file; the header is written only if the file is empty
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        let mut out = BufWriter::new(file);
        if is_empty {
            writeln!(out, "{TSV_HEADER}")?;
            out.flush()?;
        }
        Ok(Self { out })
    }
}

impl<W: Write> InventoryWriter<W> {
    /// Wrap `out` and write the header row
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{TSV_HEADER}")?;
        Ok(Self { out })
    }

    /// Write one word's rows. Every row is checked before any is written, so a
    /// rejected word leaves nothing behind.
    pub fn write_records(&mut self, records: &[SenseRecord]) -> Result<()> {
        records.iter().try_for_each(validate)?;

        for record in records {
            writeln!(
                self.out,
                "{}\t{}\t{}\t{}",
                record.word,
                record.sense_id,
                record.keyword,
                record.cluster.join(CLUSTER_SEPARATOR)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn validate(record: &SenseRecord) -> Result<()> {
    let breaks_row = |s: &str| s.contains(['\t', '\n', '\r']);
    if breaks_row(&record.word) || breaks_row(&record.keyword) {
        return Err(InventoryError::InvalidRecord(format!(
            "'{}' / '{}' contains a tab or line break",
            record.word, record.keyword
        )));
    }
    if let Some(member) = record
        .cluster
        .iter()
        .find(|member| breaks_row(member) || member.contains(','))
    {
        return Err(InventoryError::InvalidRecord(format!(
            "cluster member '{}' of '{}' contains a separator",
            member, record.word
        )));
    }
    Ok(())
}
