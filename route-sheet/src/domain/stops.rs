//! Stop requests: the ordered station names a user wants to travel through.

use std::fmt;

use super::error::DomainError;

/// Minimum number of entries in a stop request (origin and destination).
pub const MIN_STOPS: usize = 2;

/// Maximum number of entries (origin, two waypoints, destination).
pub const MAX_STOPS: usize = 4;

/// One of the four input cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSlot {
    Origin,
    Via1,
    Via2,
    Destination,
}

impl InputSlot {
    /// All slots in input-row order.
    pub const ALL: [InputSlot; 4] = [
        InputSlot::Origin,
        InputSlot::Via1,
        InputSlot::Via2,
        InputSlot::Destination,
    ];

    /// Zero-based row of this slot on the input surface.
    pub fn index(self) -> usize {
        match self {
            InputSlot::Origin => 0,
            InputSlot::Via1 => 1,
            InputSlot::Via2 => 2,
            InputSlot::Destination => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row label shown next to the input cell.
    pub fn label(self) -> &'static str {
        match self {
            InputSlot::Origin => "Origin",
            InputSlot::Via1 => "Via 1",
            InputSlot::Via2 => "Via 2",
            InputSlot::Destination => "Destination",
        }
    }

    /// Whether the slot must be filled for a search.
    pub fn is_endpoint(self) -> bool {
        matches!(self, InputSlot::Origin | InputSlot::Destination)
    }
}

impl fmt::Display for InputSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-empty entry of a stop request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopEntry {
    /// 1-based position in the original request.
    pub position: usize,
    /// Input cell the entry came from.
    pub slot: InputSlot,
    /// Name as typed, trimmed.
    pub name: String,
}

/// A validated stop request.
///
/// Holds the non-empty entries in travel order. The first entry is always
/// the origin and the last the destination; empty waypoints are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRequest {
    entries: Vec<StopEntry>,
}

impl StopRequest {
    /// Validate 2-4 raw names into a request.
    ///
    /// The first and last names are mandatory. Waypoints may be blank.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, DomainError> {
        let count = names.len();
        if !(MIN_STOPS..=MAX_STOPS).contains(&count) {
            return Err(DomainError::InvalidStopCount(count));
        }

        let mut entries = Vec::with_capacity(count);
        for (i, raw) in names.iter().enumerate() {
            let name = raw.as_ref().trim();
            let slot = slot_for(i, count);

            if name.is_empty() {
                if slot.is_endpoint() {
                    return Err(DomainError::MissingEndpoint { position: i + 1 });
                }
                continue;
            }

            entries.push(StopEntry {
                position: i + 1,
                slot,
                name: name.to_string(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[StopEntry] {
        &self.entries
    }

    pub fn origin(&self) -> &StopEntry {
        &self.entries[0]
    }

    pub fn destination(&self) -> &StopEntry {
        &self.entries[self.entries.len() - 1]
    }
}

/// Map the i-th of `count` entries onto an input slot.
fn slot_for(i: usize, count: usize) -> InputSlot {
    if i == 0 {
        InputSlot::Origin
    } else if i + 1 == count {
        InputSlot::Destination
    } else if i == 1 {
        InputSlot::Via1
    } else {
        InputSlot::Via2
    }
}
