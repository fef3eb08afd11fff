//! Branch model builder: seed text to branch list.

use crate::config::DrawSettings;
use crate::dng::Dng;
use crate::error::{Error, Result};
use crate::model::{Branch, Configuration};
use rand::Rng;

/// Derive the branch list for `seed`.
///
/// Every branch is computed before the configuration is returned; a failed
/// derivation yields no partial list.
pub fn build(seed: &str, draw: &DrawSettings) -> Result<Configuration> {
    if seed.is_empty() {
        return Err(Error::EmptySeed);
    }

    let dng = Dng::new(draw.digest);
    let size = u64::from(draw.size);
    let count = branch_count(&dng, seed, draw.max_branches)?;

    let mut branches = Vec::with_capacity(count as usize);
    for k in 0..count {
        let raw_length = dng.derive(0, size, &format!("{seed} branch {k} Length"))?;
        let position = dng.derive(0, size, &format!("{seed} branch {k} Position"))?;
        branches.push(Branch::new(
            position as f64,
            taper(raw_length as f64, position as f64, size as f64),
        ));
    }

    tracing::debug!(seed, count, digest = ?draw.digest, "derived branches");
    Ok(Configuration::new(branches))
}

fn branch_count(dng: &Dng, seed: &str, max_branches: u32) -> Result<u64> {
    let max = u64::from(max_branches);
    if max <= 1 {
        return Ok(1);
    }
    dng.derive(1, max, &format!("{seed} branches"))
}

/// Shorten branches that sprout far from the root
fn taper(length: f64, position: f64, size: f64) -> f64 {
    length * (1.0 - position / size).max(0.0).sqrt()
}

/// Unseeded branch list for when neither a seed nor a fragment is available
pub fn sample<R: Rng>(draw: &DrawSettings, rng: &mut R) -> Configuration {
    let max_branches = draw.max_branches.max(1);
    let size = draw.size.max(1);
    let count = rng.gen_range(1..=max_branches);
    let branches = (0..count)
        .map(|_| {
            Branch::new(
                rng.gen_range(1..=size) as f64,
                rng.gen_range(1..=size) as f64,
            )
        })
        .collect();
    Configuration::new(branches)
}
