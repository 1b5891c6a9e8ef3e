//! Per-record migration outcomes

use std::fmt;

use serde::Serialize;

/// Which migration step a record went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordKind {
    Frozen,
    Token,
    ARecord,
    TxtRecord,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Frozen => "frozen",
            Self::Token => "token",
            Self::ARecord => "A record",
            Self::TxtRecord => "TXT record",
        };
        f.write_str(name)
    }
}

/// Outcome of migrating a single record
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub kind: RecordKind,
    /// Source key or fqdn identifying the record
    pub record: String,
    /// `Err` carries the rendered error
    pub result: Result<(), String>,
}

/// Collected outcomes of one migration pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, kind: RecordKind, record: impl Into<String>) {
        self.outcomes.push(RecordOutcome {
            kind,
            record: record.into(),
            result: Ok(()),
        });
    }

    pub fn record_failure(
        &mut self,
        kind: RecordKind,
        record: impl Into<String>,
        error: impl fmt::Display,
    ) {
        self.outcomes.push(RecordOutcome {
            kind,
            record: record.into(),
            result: Err(error.to_string()),
        });
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Outcomes of one kind
    pub fn of_kind(&self, kind: RecordKind) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(move |o| o.kind == kind)
    }

    /// Appends another report's outcomes
    pub fn merge(&mut self, other: Self) {
        self.outcomes.extend(other.outcomes);
    }
}
