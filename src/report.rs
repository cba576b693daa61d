use std::fmt;
use thiserror::Error;

/// An item excluded from a batch, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skip {
    /// What was skipped: a file name, or a peripheral position.
    pub item: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Reasons for excluding a single item from a batch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    /// The peripheral has no `<name>`.
    #[error("peripheral has no name")]
    Unnamed,
    /// The file could not be read.
    #[error("unreadable: {0}")]
    Unreadable(String),
    /// The file is not a valid peripheral record.
    #[error("malformed record: {0}")]
    Malformed(String),
    /// The record could not be written.
    #[error("unwritable: {0}")]
    Unwritable(String),
}

/// Outcome of a batch: the items that made it, and those that did not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report<T> {
    /// Successfully processed items, in processing order.
    pub items: Vec<T>,
    /// Skipped items, in processing order.
    pub skipped: Vec<Skip>,
}

impl Skip {
    /// Creates a new skip record.
    pub fn new(item: impl Into<String>, reason: SkipReason) -> Self {
        Self { item: item.into(), reason }
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item, self.reason)
    }
}

impl<T> Report<T> {
    /// Records the outcome of one item.
    pub fn push(&mut self, outcome: Result<T, Skip>) {
        match outcome {
            Ok(item) => self.items.push(item),
            Err(skip) => {
                log::warn!("skipped {skip}");
                self.skipped.push(skip);
            }
        }
    }
}

impl<T> Default for Report<T> {
    fn default() -> Self {
        Self { items: Vec::new(), skipped: Vec::new() }
    }
}

impl<T> FromIterator<Result<T, Skip>> for Report<T> {
    fn from_iter<I: IntoIterator<Item = Result<T, Skip>>>(iter: I) -> Self {
        let mut report = Self::default();
        for outcome in iter {
            report.push(outcome);
        }
        report
    }
}
