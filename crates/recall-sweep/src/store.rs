//! Append-only results log.
//!
//! Every finished recall process becomes one JSON object per line. The file
//! is only ever opened for appending, so earlier checkpoints are never
//! rewritten. A crash in the middle of a write leaves at most one torn last
//! line, which is skipped on load and sealed off before the next append.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use recall_core::{GeneratorKind, RecallResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SweepConfig;
use crate::key::ConfigKey;
use crate::runner::cell_seed;

/// One recall process result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Sweep repetition index.
    pub run: usize,
    /// Activation probability (f).
    pub activation: f64,
    /// Number of items (L).
    pub items: usize,
    /// Neurons per ensemble (N).
    pub neurons: usize,
    /// Generator used for the ensembles.
    pub generator: GeneratorKind,
    /// Seed of the cell's random stream.
    pub seed: u64,
    /// Distinct items recalled.
    pub distinct: usize,
    /// When the result was produced.
    pub recorded_at: DateTime<Utc>,
}

impl RunRecord {
    /// The (f, L) cell this record belongs to.
    pub fn key(&self) -> ConfigKey {
        ConfigKey::new(self.activation, self.items)
    }

    /// Whether this record was produced by the sweep `config` describes.
    ///
    /// N and the generator must match, and the stored seed must be the one
    /// the sweep's base seed derives for this cell.
    pub fn belongs_to(&self, config: &SweepConfig) -> bool {
        self.neurons == config.neurons
            && self.generator == config.generator
            && self.seed == cell_seed(config.seed, self.run, &self.key())
    }
}

/// Statistics from loading the log.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Non-empty lines read.
    pub total: u64,
    /// Lines parsed into records.
    pub loaded: u64,
    /// Lines that could not be parsed.
    pub skipped: u64,
}

impl LoadStats {
    /// Check if every line was parsed.
    pub fn is_success(&self) -> bool {
        self.skipped == 0 && self.total == self.loaded
    }
}

/// JSON Lines results store.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    /// Open (creating if needed) the log at `path`.
    pub fn open(path: impl Into<PathBuf>) -> RecallResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;
        seal_torn_tail(&mut file)?;

        debug!(path = %path.display(), "results store opened");
        Ok(Self { path })
    }

    /// Location of the log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records as a single write, then flush them to disk.
    pub fn append(&self, records: &[RunRecord]) -> RecallResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut buf = String::new();
        for record in records {
            buf.push_str(&serde_json::to_string(record)?);
            buf.push('\n');
        }

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(buf.as_bytes())?;
        file.flush()?;
        file.sync_data()?;
        Ok(())
    }

    /// Read every parsable record, in file order.
    pub fn load(&self) -> RecallResult<(Vec<RunRecord>, LoadStats)> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut stats = LoadStats::default();
        let mut records = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            stats.total += 1;
            match serde_json::from_str::<RunRecord>(&line) {
                Ok(record) => {
                    records.push(record);
                    stats.loaded += 1;
                }
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "skipping unreadable result line");
                    stats.skipped += 1;
                }
            }
        }
        Ok((records, stats))
    }

    /// Distinct counts per (f, L) cell over the whole log, each list ordered
    /// by run index.
    pub fn grouped(&self) -> RecallResult<BTreeMap<ConfigKey, Vec<usize>>> {
        let (records, _) = self.load()?;
        Ok(group_by_key(&records))
    }

    /// Like [`grouped`](Self::grouped), restricted to records of one sweep.
    pub fn grouped_for(&self, config: &SweepConfig) -> RecallResult<BTreeMap<ConfigKey, Vec<usize>>> {
        let (records, _) = self.load()?;
        let records: Vec<RunRecord> = records.into_iter().filter(|r| r.belongs_to(config)).collect();
        Ok(group_by_key(&records))
    }
}

/// Group records by cell; within a cell results are ordered by run index.
pub fn group_by_key(records: &[RunRecord]) -> BTreeMap<ConfigKey, Vec<usize>> {
    let mut sorted: Vec<&RunRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.run);

    let mut grouped: BTreeMap<ConfigKey, Vec<usize>> = BTreeMap::new();
    for record in sorted {
        grouped.entry(record.key()).or_default().push(record.distinct);
    }
    grouped
}

/// Terminate a torn last line so the next append starts on a fresh line.
fn seal_torn_tail(file: &mut File) -> RecallResult<()> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        warn!("results log ends with a torn line; sealing it");
        file.write_all(b"\n")?;
        file.sync_data()?;
    }
    Ok(())
}
