use serde::{Deserialize, Serialize};

/// One offshoot of an arm
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub length: f64,
    /// Distance from the arm's base where the branch sprouts
    pub position: f64,
}

impl Branch {
    pub fn new(position: f64, length: f64) -> Self {
        Self { length, position }
    }

    fn truncated(self) -> Self {
        Self::new(self.position.trunc(), self.length.trunc())
    }
}

/// The full branch list of one snowflake, in generation order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub branches: Vec<Branch>,
}

impl Configuration {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self { branches }
    }

    /// Same branches with fractional parts dropped, as persisted in a fragment
    pub fn truncated(&self) -> Self {
        Self::new(self.branches.iter().map(|b| b.truncated()).collect())
    }

    /// Radius of the hexagon core: the smallest branch position
    pub fn hexagon_size(&self) -> Option<f64> {
        hexagon_size(&self.branches)
    }
}

pub fn hexagon_size(branches: &[Branch]) -> Option<f64> {
    branches.iter().map(|b| b.position).reduce(f64::min)
}
