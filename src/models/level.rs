use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotKind {
    Support,
    Resistance,
}

impl std::fmt::Display for PivotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Support => write!(f, "SUPPORT"),
            Self::Resistance => write!(f, "RESISTANCE"),
        }
    }
}

/// A local extremum confirmed by a symmetric bar neighborhood. Resistance
/// pivots carry the bar high, support pivots the bar low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub index: usize,
    pub price: f64,
    pub kind: PivotKind,
}

/// A horizontal price level: same-kind pivots merged within tolerance.
#[derive(Debug, Clone)]
pub struct Level {
    /// Running mean of the member pivot prices.
    pub price: f64,
    pub kind: PivotKind,
    pub members: Vec<Pivot>,
}

impl Level {
    pub fn seed(pivot: Pivot) -> Self {
        Self {
            price: pivot.price,
            kind: pivot.kind,
            members: vec![pivot],
        }
    }

    /// Merge one more pivot, updating the centroid incrementally:
    /// `(centroid * n + price) / (n + 1)`.
    pub fn absorb(&mut self, pivot: Pivot) {
        debug_assert_eq!(self.kind, pivot.kind);
        let n = self.members.len() as f64;
        self.price = (self.price * n + pivot.price) / (n + 1.0);
        self.members.push(pivot);
    }

    pub fn touch_count(&self) -> usize {
        self.members.len()
    }
}
