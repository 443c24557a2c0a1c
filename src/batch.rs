//! Bulk simulation: run every ordered pairing of a roster many times in
//! parallel and tabulate win rates. Matches are independent, so the grid
//! parallelizes cleanly; each cell gets its own seeded rng.

use crate::engine::MatchEngine;
use crate::sim::wrestler::Wrestler;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Aggregates for one roster pairing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellStats {
    /// Row wrestler's share of wins.
    pub win_rate: f64,
    pub avg_quality: f64,
    pub avg_turns: f64,
}

pub fn compute_matchup_matrix(
    roster: &[Wrestler],
    sims_per_cell: usize,
    seed: u64,
) -> anyhow::Result<Vec<Vec<CellStats>>> {
    if roster.is_empty() {
        anyhow::bail!("roster must not be empty");
    }
    if sims_per_cell == 0 {
        anyhow::bail!("sims_per_cell must be > 0");
    }
    let tasks: Vec<(usize, usize)> = (0..roster.len())
        .flat_map(|a| (0..roster.len()).map(move |b| (a, b)))
        .collect();
    let cell_results: Vec<(usize, usize, CellStats)> = tasks
        .par_iter()
        .map(|&(a_idx, b_idx)| {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((a_idx as u64) << 32) ^ (b_idx as u64));
            let mut wins = 0u64;
            let mut quality_sum = 0f64;
            let mut turns_sum = 0f64;
            for _ in 0..sims_per_cell {
                let match_seed = cell_rng.gen();
                let mut engine = MatchEngine::new(
                    roster[a_idx].clone(),
                    roster[b_idx].clone(),
                    match_seed,
                );
                let result = engine.run_to_end();
                if result.winner == roster[a_idx].name {
                    wins += 1;
                }
                quality_sum += result.quality as f64;
                turns_sum += result.turns as f64;
            }
            let total = sims_per_cell as f64;
            let stats = CellStats {
                win_rate: wins as f64 / total,
                avg_quality: quality_sum / total,
                avg_turns: turns_sum / total,
            };
            (a_idx, b_idx, stats)
        })
        .collect();

    let mut matrix = vec![vec![CellStats::default(); roster.len()]; roster.len()];
    for (a_idx, b_idx, stats) in cell_results {
        matrix[a_idx][b_idx] = stats;
    }
    Ok(matrix)
}

/// Win-rate grid as CSV, one row per roster entry.
pub fn write_csv(matrix: &[Vec<CellStats>], path: &std::path::Path) -> anyhow::Result<()> {
    let mut out = String::new();
    for (row_idx, row) in matrix.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if col_idx > 0 {
                out.push(',');
            }
            out.push_str(&format!("{:.4}", cell.win_rate));
        }
        if row_idx + 1 < matrix.len() {
            out.push('\n');
        }
    }
    std::fs::write(path, out)?;
    Ok(())
}
