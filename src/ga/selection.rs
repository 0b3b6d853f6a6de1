//! Selection strategies for the knapsack GA.
//!
//! Two fixed strategies are used at different points of a generation:
//!
//! - [`roulette_wheel`] builds the whole intermediate population by
//!   fitness-proportionate sampling with replacement.
//! - [`tournament`] picks the second crossover parent. The tournament spans
//!   the entire (shuffled) population, so it always returns a member of
//!   maximum fitness; the shuffle only decides which one among ties.
//!
//! All strategies assume **maximization** (higher fitness = better).
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::population::Population;
use super::types::Individual;
use crate::random;

/// Roulette-wheel selection of a full population.
///
/// For each output slot a threshold `r` is drawn from `(0, 1]` and members
/// are walked in storage order, accumulating normalized fitness, until the
/// running sum reaches `r`. When the sum never gets there (rounding, or a
/// population whose total fitness is zero) the last member is taken.
///
/// Normalized fitness must be current (see
/// [`Population::recompute_normalized_fitness`]). The result has the same
/// size as the input; its population fitness is not yet computed.
///
/// # Complexity
/// O(n²)
pub fn roulette_wheel<R: Rng>(population: &Population, rng: &mut R) -> Population {
    let size = population.size();
    let num_items = population
        .individuals()
        .first()
        .map_or(0, Individual::chromosome_length);
    let mut selected = Population::empty(size, num_items, population.knapsack_capacity());

    if size == 0 {
        return selected;
    }

    let degenerate = population.population_fitness() <= 0.0;
    for slot in 0..size {
        let chosen = if degenerate {
            size - 1
        } else {
            spin(population.individuals(), rng)
        };
        selected.set_individual(slot, population.individual(chosen).clone());
    }
    selected
}

/// One spin of the wheel: index of the chosen member.
fn spin<R: Rng>(individuals: &[Individual], rng: &mut R) -> usize {
    // (0, 1]: a zero-share member can never satisfy the threshold.
    let threshold = 1.0 - rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (i, ind) in individuals.iter().enumerate() {
        cumulative += ind.normalized_fitness();
        if cumulative >= threshold {
            return i;
        }
    }
    individuals.len() - 1 // floating-point fallback
}

/// Full-population tournament.
///
/// Shuffles a copy of the member order and returns a clone of the first
/// member of highest fitness in that order.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &Population, rng: &mut R) -> Individual {
    assert!(
        population.size() > 0,
        "cannot select from empty population"
    );

    let mut contestants: Vec<&Individual> = population.individuals().iter().collect();
    random::shuffle(&mut contestants, rng);

    let mut best = contestants[0];
    for &ind in &contestants[1..] {
        if ind.fitness() > best.fitness() {
            best = ind;
        }
    }
    best.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::random::create_rng;

    /// Population where member i packs only item i, whose benefit is
    /// `values[i]`.
    fn make_population(values: &[u32]) -> Population {
        let n = values.len();
        let catalog = Catalog::from(values.iter().map(|&v| (1, v)).collect::<Vec<_>>());
        let individuals = (0..n)
            .map(|i| {
                let mut genes = vec![false; n];
                genes[i] = true;
                Individual::from_chromosome(genes, 1)
            })
            .collect();
        let mut pop = Population::from_individuals(individuals, 1);
        pop.recompute_volume(&catalog);
        pop.recompute_fitness(&catalog);
        pop.recompute_normalized_fitness();
        pop
    }

    fn index_of(pop: &Population, ind: &Individual) -> usize {
        pop.individuals()
            .iter()
            .position(|m| m.chromosome() == ind.chromosome())
            .expect("selected individual comes from the population")
    }

    #[test]
    fn test_roulette_single_holder_always_selected() {
        // Member 2 holds all the fitness: normalized 1.0, everyone else 0.0.
        let pop = make_population(&[0, 0, 7, 0, 0]);
        assert_eq!(pop.individual(2).normalized_fitness(), 1.0);

        for seed in 0..20 {
            let mut rng = create_rng(seed);
            let selected = roulette_wheel(&pop, &mut rng);
            assert_eq!(selected.size(), 5);
            for ind in selected.individuals() {
                assert_eq!(index_of(&pop, ind), 2);
            }
        }
    }

    #[test]
    fn test_roulette_proportional() {
        let pop = make_population(&[1, 3]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 2];
        for _ in 0..2000 {
            let selected = roulette_wheel(&pop, &mut rng);
            for ind in selected.individuals() {
                counts[index_of(&pop, ind)] += 1;
            }
        }
        // Expect a 1:3 split of 4000 draws.
        assert!(
            (800..1200).contains(&counts[0]),
            "expected ~1000 picks of the weaker member, got {counts:?}"
        );
    }

    #[test]
    fn test_roulette_zero_fitness_falls_back_to_last() {
        let pop = make_population(&[0, 0, 0, 0]);
        let mut rng = create_rng(42);
        let selected = roulette_wheel(&pop, &mut rng);
        for ind in selected.individuals() {
            assert_eq!(index_of(&pop, ind), 3);
        }
    }

    #[test]
    fn test_roulette_copies_are_independent() {
        let pop = make_population(&[5, 5]);
        let mut rng = create_rng(42);
        let mut selected = roulette_wheel(&pop, &mut rng);
        let mut changed = selected.individual(0).clone();
        changed.flip_gene(0);
        selected.set_individual(0, changed);

        assert_eq!(pop, make_population(&[5, 5]), "input must be untouched");
    }

    #[test]
    fn test_tournament_returns_a_best_member() {
        let pop = make_population(&[4, 9, 1, 9, 3]);
        let mut rng = create_rng(42);

        let mut winners = [0u32; 5];
        for _ in 0..1000 {
            let winner = tournament(&pop, &mut rng);
            assert_eq!(winner.fitness(), 9);
            winners[index_of(&pop, &winner)] += 1;
        }
        // Ties are broken by the shuffle, so both maxima win sometimes.
        assert!(winners[1] > 300 && winners[3] > 300, "got {winners:?}");
    }

    #[test]
    fn test_tournament_does_not_reorder_input() {
        let pop = make_population(&[1, 2, 3, 4]);
        let before = pop.clone();
        let mut rng = create_rng(42);
        tournament(&pop, &mut rng);
        assert_eq!(pop, before);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_tournament_empty_population_panics() {
        let pop = Population::from_individuals(vec![], 10);
        let mut rng = create_rng(42);
        tournament(&pop, &mut rng);
    }
}
