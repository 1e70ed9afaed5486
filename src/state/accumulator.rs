//! Run-wide record accumulator
//!
//! Every crawl driver commits its parsed records here. The accumulator keeps
//! records in commit order, refuses value-equal duplicates and decides when a
//! checkpoint flush to the record sink is due.

use crate::model::ProfileRecord;
use crate::output::{OutputResult, RecordSink};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered, value-deduplicated collection of profile records
#[derive(Debug)]
pub struct Accumulator {
    records: Vec<ProfileRecord>,
    seen: HashSet<ProfileRecord>,
    checkpoint_interval: usize,
    /// Record count at the last successful checkpoint
    last_checkpoint: usize,
}

impl Accumulator {
    /// Creates an empty accumulator that checkpoints every
    /// `checkpoint_interval` records
    pub fn new(checkpoint_interval: usize) -> Self {
        Self {
            records: Vec::new(),
            seen: HashSet::new(),
            checkpoint_interval: checkpoint_interval.max(1),
            last_checkpoint: 0,
        }
    }

    /// Appends a record unless a value-equal record is already stored
    ///
    /// Returns true if the record was appended.
    pub fn insert(&mut self, record: ProfileRecord) -> bool {
        if self.seen.contains(&record) {
            return false;
        }
        self.seen.insert(record.clone());
        self.records.push(record);
        true
    }

    pub fn contains(&self, record: &ProfileRecord) -> bool {
        self.seen.contains(record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in commit order
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    /// Returns true if the record count crossed a multiple of the checkpoint
    /// interval since the last checkpoint
    pub fn checkpoint_due(&self) -> bool {
        self.len() / self.checkpoint_interval > self.last_checkpoint / self.checkpoint_interval
    }

    /// Records that the current contents were checkpointed
    pub fn mark_checkpoint(&mut self) {
        self.last_checkpoint = self.len();
    }
}

/// Result of committing one batch of records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Records appended by this commit
    pub added: usize,

    /// Records skipped as duplicates
    pub duplicates: usize,

    /// Accumulator size after the commit
    pub total: usize,

    /// Whether this commit wrote a checkpoint
    pub checkpointed: bool,
}

/// Accumulator shared by all drivers of a run, together with its sink
///
/// Cloning is cheap and yields a handle to the same accumulator. Appending a
/// batch, deciding on a checkpoint and writing it happen under one lock, so
/// concurrent drivers can neither store a record twice nor skip or repeat a
/// checkpoint.
#[derive(Clone)]
pub struct SharedAccumulator {
    inner: Arc<Mutex<Accumulator>>,
    sink: Arc<dyn RecordSink>,
}

impl SharedAccumulator {
    pub fn new(checkpoint_interval: usize, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Accumulator::new(checkpoint_interval))),
            sink,
        }
    }

    // The accumulator is append-only, so a panic elsewhere cannot leave it
    // half-updated in a way that matters.
    fn lock(&self) -> MutexGuard<'_, Accumulator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commits a batch of records in order and writes a checkpoint if due
    ///
    /// A failed checkpoint is logged and left due, so the next commit tries
    /// again.
    pub fn commit(&self, batch: Vec<ProfileRecord>) -> CommitOutcome {
        let mut acc = self.lock();

        let mut added = 0;
        let mut duplicates = 0;
        for record in batch {
            if acc.insert(record) {
                added += 1;
            } else {
                duplicates += 1;
            }
        }

        let mut checkpointed = false;
        if acc.checkpoint_due() {
            match self.sink.flush(acc.records()) {
                Ok(()) => {
                    acc.mark_checkpoint();
                    checkpointed = true;
                    tracing::info!("Checkpoint written at {} records", acc.len());
                }
                Err(e) => {
                    tracing::error!("Checkpoint at {} records failed: {}", acc.len(), e);
                }
            }
        }

        CommitOutcome {
            added,
            duplicates,
            total: acc.len(),
            checkpointed,
        }
    }

    /// Flushes the full accumulator to the sink, whatever its size
    ///
    /// Returns the number of records written.
    pub fn flush(&self) -> OutputResult<usize> {
        let mut acc = self.lock();
        self.sink.flush(acc.records())?;
        acc.mark_checkpoint();
        Ok(acc.len())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
