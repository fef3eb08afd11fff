use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Side length of the square world the snowflake is drawn in
pub const VIEW_BOX_SIZE: f64 = 2000.0;

pub const STROKE_WIDTH_RANGE: (f64, f64) = (1.0, 100.0);
pub const BRANCH_WIDTH_RANGE: (f64, f64) = (1.0, 250.0);
pub const MAX_BRANCHES_RANGE: (u32, u32) = (1, 20);
pub const SIZE_RANGE: (u32, u32) = (1, 2000);

/// Digest used by the deterministic number generator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    #[default]
    Sha1,
    Sha256,
}

/// Display and generation parameters for one snowflake
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    pub stroke_width: f64,
    pub branch_width: f64,
    /// Upper bound for the generated branch count
    pub max_branches: u32,
    pub rotate: bool,
    /// Radial world scale, in view box units
    pub size: u32,
    pub border: bool,
    pub fill_color: String,
    pub border_color: String,
    pub digest: DigestKind,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            stroke_width: 12.0,
            branch_width: 60.0,
            max_branches: 10,
            rotate: false,
            size: 600,
            border: true,
            fill_color: "#ffffff".to_string(),
            border_color: "#5b8fd6".to_string(),
            digest: DigestKind::Sha1,
        }
    }
}

impl DrawSettings {
    /// Clamp every numeric field into its accepted range.
    /// NaN widths fall back to the lower bound.
    pub fn clamped(mut self) -> Self {
        self.stroke_width = clamp_width(self.stroke_width, STROKE_WIDTH_RANGE);
        self.branch_width = clamp_width(self.branch_width, BRANCH_WIDTH_RANGE);
        self.max_branches = self.max_branches.clamp(MAX_BRANCHES_RANGE.0, MAX_BRANCHES_RANGE.1);
        self.size = self.size.clamp(SIZE_RANGE.0, SIZE_RANGE.1);
        self
    }

    /// Clamp numbers and reject colors that are not hex strings
    pub fn validated(self) -> Result<Self> {
        validate_color(&self.fill_color)?;
        validate_color(&self.border_color)?;
        Ok(self.clamped())
    }
}

fn clamp_width(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// Accepts `#rgb` and `#rrggbb`
pub fn validate_color(color: &str) -> Result<()> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| Error::InvalidColor(color.to_string()))?;
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidColor(color.to_string()))
    }
}
