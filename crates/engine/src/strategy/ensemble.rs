//! Ensemble strategy: run several base strategies and keep the best plan.

use cartonize_core::scoring::SolutionWeights;
use cartonize_core::{AllocationResult, Container, Error, Item, Result};

use super::{best_fit, greedy, largest_first};
use crate::placer::Placer;

type StrategyFn = fn(&Placer, &[Item], &[&Container]) -> Result<AllocationResult>;

const CANDIDATES: [StrategyFn; 3] = [greedy::allocate, best_fit::allocate, largest_first::allocate];

pub(crate) fn allocate(
    placer: &Placer,
    items: &[Item],
    catalog: &[&Container],
) -> Result<AllocationResult> {
    let mut solutions = Vec::with_capacity(CANDIDATES.len());
    for run in CANDIDATES {
        match run(placer, items, catalog) {
            Ok(solution) => solutions.push(solution),
            Err(err) => log::debug!("ensemble candidate failed: {}", err),
        }
    }

    let cheapest = solutions
        .iter()
        .map(AllocationResult::total_price)
        .filter(|price| *price > 0.0)
        .fold(None::<f64>, |acc, price| match acc {
            Some(current) if current <= price => Some(current),
            _ => Some(price),
        });

    let weights = placer.policy().solution;
    let mut best: Option<(f64, AllocationResult)> = None;
    for solution in solutions {
        let score = solution_score(&solution, items.len(), cheapest, &weights);
        if best.as_ref().map_or(true, |(b, _)| score > *b) {
            best = Some((score, solution));
        }
    }

    let (_, winner) = best.ok_or(Error::AllocationExhausted {
        unplaced: items.len(),
    })?;
    log::debug!(
        "ensemble picked {} with {} containers",
        winner.strategy().unwrap_or("unnamed"),
        winner.container_count()
    );
    Ok(winner)
}

fn solution_score(
    solution: &AllocationResult,
    order_size: usize,
    cheapest: Option<f64>,
    weights: &SolutionWeights,
) -> f64 {
    let price = solution.total_price();
    let cost_efficiency = match cheapest {
        Some(floor) if price > 0.0 => floor / price,
        _ => 1.0,
    };
    let items_ratio = if order_size > 0 {
        solution.item_count() as f64 / order_size as f64
    } else {
        1.0
    };
    let count_score = 1.0 / solution.container_count().max(1) as f64;

    weights.cost_efficiency * cost_efficiency
        + weights.container_efficiency * solution.average_utilization()
        + weights.items_packed * items_ratio
        + weights.container_count * count_score
}
