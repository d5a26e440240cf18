use std::collections::HashSet;

use chrono::NaiveDate;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use sha3::{Digest, Sha3_256};
use weeknight_recipe::{ProteinType, Recipe};

/// Picks one recipe per day out of a candidate pool.
pub struct Selector {
    rng: StdRng,
    balance_protein: bool,
}

impl Selector {
    /// Same week and seed always yield the same sequence of picks. Without a
    /// seed the generator is drawn from OS entropy.
    pub fn seeded(week_start: NaiveDate, seed: Option<&str>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed_value(week_start, seed)),
            None => StdRng::from_os_rng(),
        };

        Self {
            rng,
            balance_protein: true,
        }
    }

    pub fn balance_protein(mut self, enabled: bool) -> Self {
        self.balance_protein = enabled;
        self
    }

    /// Prefers recipes not yet used this run, then recipes whose protein
    /// differs from `previous_protein`. Both preferences yield when they would
    /// leave nothing to choose from.
    pub fn pick<'a>(
        &mut self,
        pool: &[&'a Recipe],
        used: &HashSet<String>,
        previous_protein: Option<ProteinType>,
    ) -> Option<&'a Recipe> {
        let fresh = pool
            .iter()
            .copied()
            .filter(|r| !used.contains(&r.id))
            .collect::<Vec<_>>();

        let mut choices = if fresh.is_empty() {
            pool.to_vec()
        } else {
            fresh
        };

        if self.balance_protein
            && let Some(previous) = previous_protein
        {
            let balanced = choices
                .iter()
                .copied()
                .filter(|r| r.protein_type != Some(previous))
                .collect::<Vec<_>>();

            if !balanced.is_empty() {
                choices = balanced;
            }
        }

        choices.choose(&mut self.rng).copied()
    }
}

fn seed_value(week_start: NaiveDate, seed: &str) -> u64 {
    let digest = Sha3_256::digest(format!("{week_start}-{seed}").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);

    u64::from_le_bytes(bytes)
}
