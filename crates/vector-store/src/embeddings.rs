use crate::error::{Result, VectorStoreError};
use crate::ops::normalize;
use crate::types::EmbeddingStore;
use flate2::read::GzDecoder;
use ndarray::Array2;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Immutable in-memory word vectors, one L2-normalized row per vocabulary word.
///
/// Rows keep the order of the source file, which for fastText/word2vec dumps is
/// descending frequency, so a `limit` keeps the most frequent words.
#[derive(Debug)]
pub struct WordVectors {
    words: Vec<String>,
    index: HashMap<String, usize>,
    matrix: Array2<f32>,
}

impl WordVectors {
    /// Build a store from `(word, vector)` pairs. Vectors are normalized; when a word
    /// occurs more than once the first occurrence wins.
    pub fn from_entries<I, W>(dimension: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, Vec<f32>)>,
        W: Into<String>,
    {
        let mut words = Vec::new();
        let mut index = HashMap::new();
        let mut data = Vec::new();

        for (word, mut vector) in entries {
            let word = word.into();
            if vector.len() != dimension {
                return Err(VectorStoreError::InvalidDimension {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
            if index.contains_key(&word) {
                log::debug!("Duplicate vector for '{}' ignored", word);
                continue;
            }
            normalize(&mut vector);
            index.insert(word.clone(), words.len());
            words.push(word);
            data.extend_from_slice(&vector);
        }

        let matrix = Array2::from_shape_vec((words.len(), dimension), data)
            .map_err(|e| VectorStoreError::Other(format!("Failed to shape vectors: {e}")))?;

        Ok(Self {
            words,
            index,
            matrix,
        })
    }

    /// Load a word2vec/fastText text file; `.gz` files are decompressed on the fly.
    pub fn load(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading word vectors from {:?}", path);

        let file = File::open(path).map_err(|e| {
            VectorStoreError::StoreUnavailable(format!("{}: {}", path.display(), e))
        })?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        let vectors = Self::read_text(BufReader::new(reader), limit)?;
        log::info!(
            "Loaded {} word vectors of dimension {}",
            vectors.len(),
            vectors.dimension()
        );
        Ok(vectors)
    }

    /// Parse the text format: a `count dimension` header followed by one
    /// `word v1 ... vd` row per word. Invalid UTF-8 is replaced, not rejected.
    pub fn read_text<R: BufRead>(reader: R, limit: Option<usize>) -> Result<Self> {
        let mut lines = reader.split(b'\n');

        let header = match lines.next() {
            Some(line) => String::from_utf8_lossy(&line?).into_owned(),
            None => return Err(VectorStoreError::parse(1, "missing header")),
        };
        let (count, dimension) = parse_header(&header)?;

        let capacity = limit.map_or(count, |limit| limit.min(count));
        let mut entries = Vec::with_capacity(capacity);

        for (offset, line) in lines.enumerate() {
            if limit.is_some_and(|limit| entries.len() >= limit) {
                break;
            }
            let line_no = offset + 2;
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let mut parts = line.split_ascii_whitespace();

            let Some(word) = parts.next() else {
                continue;
            };
            let vector = parts
                .map(|component| match component.parse::<f32>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    Ok(_) => Err(VectorStoreError::parse(
                        line_no,
                        format!("non-finite component '{component}'"),
                    )),
                    Err(e) => Err(VectorStoreError::parse(
                        line_no,
                        format!("bad component '{component}': {e}"),
                    )),
                })
                .collect::<Result<Vec<f32>>>()?;

            if vector.len() != dimension {
                return Err(VectorStoreError::parse(
                    line_no,
                    format!("expected {} components, got {}", dimension, vector.len()),
                ));
            }
            entries.push((word.to_string(), vector));
        }

        Self::from_entries(dimension, entries)
    }

    /// Words in row order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_at(&self, row: usize) -> Option<&str> {
        self.words.get(row).map(String::as_str)
    }

    pub fn row_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Normalized vectors as a `len × dimension` matrix
    pub fn matrix(&self) -> &Array2<f32> {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl EmbeddingStore for WordVectors {
    fn dimension(&self) -> usize {
        self.matrix.ncols()
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        let row = self.row_of(word)?;
        self.matrix.row(row).to_slice()
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let mut parts = header.split_ascii_whitespace();
    let mut field = |name: &str| -> Result<usize> {
        let raw = parts
            .next()
            .ok_or_else(|| VectorStoreError::parse(1, format!("missing {name} in header")))?;
        raw.parse::<usize>()
            .map_err(|e| VectorStoreError::parse(1, format!("bad {name} '{raw}': {e}")))
    };
    let count = field("word count")?;
    let dimension = field("dimension")?;
    if dimension == 0 {
        return Err(VectorStoreError::parse(1, "dimension must be > 0"));
    }
    Ok((count, dimension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE: &str = "3 2\nriver 0.0 2.0 \nmoney 3.0 4.0\nbank 1.0 1.0\n";

    #[test]
    fn test_read_text_normalizes_rows() {
        let vectors = WordVectors::read_text(SAMPLE.as_bytes(), None).unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors.dimension(), 2);
        assert_eq!(vectors.vector("river").unwrap(), &[0.0, 1.0]);

        let money = vectors.vector("money").unwrap();
        assert!((money[0] - 0.6).abs() < 1e-6);
        assert!((money[1] - 0.8).abs() < 1e-6);
        assert!(!vectors.contains("shore"));
    }

    #[test]
    fn test_read_text_respects_limit() {
        let vectors = WordVectors::read_text(SAMPLE.as_bytes(), Some(2)).unwrap();
        assert_eq!(vectors.words(), &["river".to_string(), "money".to_string()]);
        assert!(!vectors.contains("bank"));
    }

    #[test]
    fn test_read_text_rejects_wrong_width() {
        let err = WordVectors::read_text("1 3\nriver 1.0 2.0\n".as_bytes(), None).unwrap_err();
        assert!(matches!(err, VectorStoreError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_read_text_rejects_non_finite_components() {
        for row in ["river nan 1.0", "river 1.0 inf", "river -inf 0.5"] {
            let text = format!("1 2\n{row}\n");
            let err = WordVectors::read_text(text.as_bytes(), None).unwrap_err();
            assert!(matches!(err, VectorStoreError::ParseError { line: 2, .. }));
        }
    }

    #[test]
    fn test_read_text_rejects_bad_header() {
        assert!(WordVectors::read_text("".as_bytes(), None).is_err());
        assert!(WordVectors::read_text("three 2\n".as_bytes(), None).is_err());
        assert!(WordVectors::read_text("3 0\n".as_bytes(), None).is_err());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let vectors =
            WordVectors::from_entries(2, vec![("a", vec![1.0, 0.0]), ("a", vec![0.0, 1.0])])
                .unwrap();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors.vector("a").unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn test_load_gzip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cc.en.vec.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let vectors = WordVectors::load(&path, None).unwrap();
        assert_eq!(vectors.len(), 3);
        assert!(vectors.contains("bank"));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = WordVectors::load("/nonexistent/vectors.vec", None).unwrap_err();
        assert!(matches!(err, VectorStoreError::StoreUnavailable(_)));
    }
}
