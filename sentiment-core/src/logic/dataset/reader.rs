use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use super::record::LabeledTweet;
use super::{DatasetError, COLUMN_COUNT};

/// Streaming reader over a headerless six-column CSV
pub struct DatasetReader<R: Read> {
    inner: csv::Reader<R>,
}

impl DatasetReader<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading dataset: {}", path.display());
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> DatasetReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self { inner }
    }

    /// Iterate rows in file order
    pub fn records(&mut self) -> impl Iterator<Item = Result<LabeledTweet, DatasetError>> + '_ {
        self.inner.byte_records().map(|row| parse_row(&row?))
    }
}

/// The corpus is Latin-1: every byte is one code point
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_row(row: &csv::ByteRecord) -> Result<LabeledTweet, DatasetError> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    if row.len() != COLUMN_COUNT {
        return Err(DatasetError::Columns { line, found: row.len() });
    }

    let field = |i: usize| latin1(row.get(i).unwrap_or_default());

    let code = field(0);
    let label_code = code.trim().parse::<u8>().map_err(|_| DatasetError::InvalidLabel {
        line,
        value: code.clone(),
    })?;

    Ok(LabeledTweet {
        label_code,
        id: field(1),
        date: field(2),
        query: field(3),
        user: field(4),
        text: field(5),
    })
}

/// Uniform sample of `n` items without replacement in one pass
/// (Algorithm R). Returns the sample in random order and the number of
/// items seen.
pub fn reservoir_sample<T, E, I, R>(items: I, n: usize, rng: &mut R) -> Result<(Vec<T>, usize), E>
where
    I: IntoIterator<Item = Result<T, E>>,
    R: Rng + ?Sized,
{
    let mut reservoir = Vec::with_capacity(n);
    let mut seen = 0usize;

    for item in items {
        let item = item?;
        if seen < n {
            reservoir.push(item);
        } else {
            let j = rng.gen_range(0..=seen);
            if j < n {
                reservoir[j] = item;
            }
        }
        seen += 1;
    }

    reservoir.shuffle(rng);
    Ok((reservoir, seen))
}

impl<R: Read> DatasetReader<R> {
    /// Draw `n` rows. Fails if the file has fewer rows than requested.
    pub fn sample<G: Rng + ?Sized>(&mut self, n: usize, rng: &mut G) -> Result<Vec<LabeledTweet>, DatasetError> {
        if n == 0 {
            return Err(DatasetError::EmptySample);
        }

        let (sample, seen) = reservoir_sample(self.records(), n, rng)?;
        if seen < n {
            return Err(DatasetError::InsufficientRows { requested: n, available: seen });
        }

        log::debug!("Sampled {} of {} rows", sample.len(), seen);
        Ok(sample)
    }
}
