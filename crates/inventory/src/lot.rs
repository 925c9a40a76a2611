//! Lot numbering.
//!
//! A lot number reads `"{sequence}/{bags}"`, with a trailing `*` when the
//! intake carried a remark.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use coldstore_core::{DomainError, DomainResult};

/// Monotonic lot counter owned by one ledger. Values are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSequence {
    next: u64,
}

impl LotSequence {
    pub const FIRST: u64 = 1;

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// The value the next call to [`advance`](Self::advance) will return.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Allocate the current value and move the counter forward by one.
    ///
    /// Fails without moving when the counter has no successor.
    pub fn advance(&mut self) -> DomainResult<u64> {
        let allocated = self.next;
        self.next = allocated
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("lot sequence exhausted"))?;
        Ok(allocated)
    }
}

impl Default for LotSequence {
    fn default() -> Self {
        Self::starting_at(Self::FIRST)
    }
}

fn has_remark(remark: &str) -> bool {
    !remark.trim().is_empty()
}

/// Lot identifier assigned to a recorded stock entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LotNumber {
    sequence: u64,
    bags: u64,
    remarked: bool,
}

impl LotNumber {
    pub fn new(sequence: u64, bags: u64, remark: &str) -> Self {
        Self {
            sequence,
            bags,
            remarked: has_remark(remark),
        }
    }

    /// Form preview before submission; zero bags render as `-`.
    pub fn preview(sequence: u64, bags: u64, remark: &str) -> String {
        if bags == 0 {
            let star = if has_remark(remark) { "*" } else { "" };
            format!("{sequence}/-{star}")
        } else {
            Self::new(sequence, bags, remark).to_string()
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn bags(&self) -> u64 {
        self.bags
    }

    pub fn is_remarked(&self) -> bool {
        self.remarked
    }
}

impl core::fmt::Display for LotNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.sequence, self.bags)?;
        if self.remarked {
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl FromStr for LotNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (body, remarked) = match s.strip_suffix('*') {
            Some(body) => (body, true),
            None => (s, false),
        };
        let invalid = || DomainError::validation(format!("malformed lot number: {s:?}"));
        let (seq, bags) = body.split_once('/').ok_or_else(invalid)?;
        Ok(Self {
            sequence: seq.parse().map_err(|_| invalid())?,
            bags: bags.parse().map_err(|_| invalid())?,
            remarked,
        })
    }
}

impl TryFrom<String> for LotNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LotNumber> for String {
    fn from(value: LotNumber) -> Self {
        value.to_string()
    }
}
