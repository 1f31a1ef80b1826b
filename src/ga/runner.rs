//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the full process:
//! initialize → (evaluate → select → mutate → dedup/refill) × generations.
//!
//! Each generation keeps the top `elite_count` individuals as parents, fills
//! the population back up with mutated clones of them, removes duplicates
//! (parents win), and backfills any shortfall with fresh random individuals
//! so the population cannot collapse onto a handful of solutions.

use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Final population: evaluated, duplicate-free, best first.
    pub population: Vec<I>,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    ///
    /// Returns an error if the configuration is invalid; nothing is
    /// evaluated in that case.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked once per generation boundary. A cancelled run
    /// returns the population as it stood at that boundary.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let size = config.population_size;
        let elite_count = config.elite_count();

        // 1. Initialize and evaluate
        let mut population: Vec<P::Individual> = (0..size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_slice(problem, &mut population, config.parallel);
        sort_best_first(&mut population);

        let mut best = population[0].clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness().to_f64());

        let mut generations = 0;
        let mut cancelled = false;

        // 2. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Select: population is sorted, keep the distinct top individuals
            let mut seen = HashSet::with_capacity(size);
            let parents: Vec<P::Individual> = population
                .into_iter()
                .take(elite_count)
                .filter(|ind| seen.insert(problem.key(ind)))
                .collect();

            // Mutate: one clone + mutation per missing slot, duplicates dropped
            let mut offspring: Vec<P::Individual> = Vec::with_capacity(size - parents.len());
            for _ in parents.len()..size {
                let idx = config.selection.select(&parents, &mut rng);
                let mut child = parents[idx].clone();
                child.set_fitness(<P::Individual as Individual>::Fitness::worst());
                problem.mutate(&mut child, &mut rng);
                if seen.insert(problem.key(&child)) {
                    offspring.push(child);
                }
            }

            // Refill
            while parents.len() + offspring.len() < size {
                offspring.push(problem.create_individual(&mut rng));
            }

            // Evaluate new individuals only; parents keep their fitness
            evaluate_slice(problem, &mut offspring, config.parallel);

            population = parents;
            population.append(&mut offspring);
            sort_best_first(&mut population);

            if population[0].fitness() > best.fitness() {
                best = population[0].clone();
            }
            fitness_history.push(best.fitness().to_f64());
            generations = gen + 1;

            tracing::trace!(
                generation = generations,
                best = best.fitness().to_f64(),
                "generation complete"
            );
            problem.on_generation(generations, best.fitness());
        }

        // 3. Final population without duplicates
        let mut seen = HashSet::with_capacity(population.len());
        population.retain(|ind| seen.insert(problem.key(ind)));

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            population,
            generations,
            cancelled,
            fitness_history,
        })
    }
}

/// Stable sort, highest fitness first.
fn sort_best_first<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Evaluate every individual in the slice.
///
/// Returns only after all evaluations are done, so the caller's sort always
/// sees a complete generation.
#[cfg(feature = "parallel")]
fn evaluate_slice<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, individuals);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_slice<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], _parallel: bool) {
    evaluate_sequential(problem, individuals);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    for ind in individuals.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use rand::Rng;

    // ---- OneMax: maximize the number of set bits ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: i64,
    }

    impl Individual for BitString {
        type Fitness = i64;
        fn fitness(&self) -> i64 {
            self.fitness
        }
        fn set_fitness(&mut self, f: i64) {
            self.fitness = f;
        }
    }

    struct OneMaxProblem {
        n: usize,
    }

    impl GaProblem for OneMaxProblem {
        type Individual = BitString;
        type Key = Vec<bool>;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            BitString {
                bits: (0..self.n).map(|_| rng.random_bool(0.5)).collect(),
                fitness: i64::MIN,
            }
        }

        fn evaluate(&self, ind: &BitString) -> i64 {
            ind.bits.iter().filter(|&&b| b).count() as i64
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
            let idx = rng.random_range(0..self.n);
            ind.bits[idx] = !ind.bits[idx];
        }

        fn key(&self, ind: &BitString) -> Vec<bool> {
            ind.bits.clone()
        }
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(100)
            .with_elite_ratio(0.2)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMaxProblem { n: 20 };
        let result = GaRunner::run(&problem, &config()).unwrap();
        assert!(
            result.best_fitness >= 18,
            "expected at least 18 set bits, got {}",
            result.best_fitness
        );
        assert_eq!(result.generations, 100);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_invalid_config_rejected_before_work() {
        let problem = OneMaxProblem { n: 4 };
        let config = config().with_max_generations(0);
        assert!(matches!(
            GaRunner::run(&problem, &config),
            Err(ConfigError::ZeroGenerations)
        ));
    }

    #[test]
    fn test_elite_preservation() {
        let problem = OneMaxProblem { n: 16 };
        let result = GaRunner::run(&problem, &config()).unwrap();
        for window in result.fitness_history.windows(2) {
            assert!(window[1] >= window[0], "best fitness must never regress");
        }
    }

    #[test]
    fn test_fitness_history_length() {
        let problem = OneMaxProblem { n: 10 };
        let result = GaRunner::run(&problem, &config().with_max_generations(30)).unwrap();
        assert_eq!(result.fitness_history.len(), 31);
    }

    #[test]
    fn test_final_population_is_deduplicated_and_sorted() {
        // Only 8 distinct individuals exist; refill keeps the size up
        // during the run, the final population is unique.
        let problem = OneMaxProblem { n: 3 };
        let result = GaRunner::run(&problem, &config()).unwrap();
        assert!(result.population.len() <= 8);

        let keys: HashSet<Vec<bool>> = result.population.iter().map(|i| i.bits.clone()).collect();
        assert_eq!(keys.len(), result.population.len());

        for w in result.population.windows(2) {
            assert!(w[0].fitness >= w[1].fitness);
        }
        assert_eq!(result.best_fitness, 3);
    }

    #[test]
    fn test_cancelled_before_first_generation() {
        let problem = OneMaxProblem { n: 10 };
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&problem, &config(), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
        assert!(!result.population.is_empty());
    }

    #[test]
    fn test_cancellation_from_callback() {
        struct Cancelling {
            inner: OneMaxProblem,
            flag: Arc<AtomicBool>,
        }
        impl GaProblem for Cancelling {
            type Individual = BitString;
            type Key = Vec<bool>;
            fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
                self.inner.create_individual(rng)
            }
            fn evaluate(&self, ind: &BitString) -> i64 {
                self.inner.evaluate(ind)
            }
            fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
                self.inner.mutate(ind, rng)
            }
            fn key(&self, ind: &BitString) -> Vec<bool> {
                self.inner.key(ind)
            }
            fn on_generation(&self, generation: usize, _best: i64) {
                if generation == 5 {
                    self.flag.store(true, Ordering::Relaxed);
                }
            }
        }

        let flag = Arc::new(AtomicBool::new(false));
        let problem = Cancelling {
            inner: OneMaxProblem { n: 10 },
            flag: flag.clone(),
        };
        let result = GaRunner::run_with_cancel(&problem, &config(), Some(flag)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_seed_reproducible() {
        let problem = OneMaxProblem { n: 24 };
        let a = GaRunner::run(&problem, &config().with_max_generations(20)).unwrap();
        let b = GaRunner::run(&problem, &config().with_max_generations(20)).unwrap();
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best.bits, b.best.bits);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        // Evaluation is pure and the RNG never leaves this thread.
        let problem = OneMaxProblem { n: 24 };
        let seq = GaRunner::run(&problem, &config().with_max_generations(20)).unwrap();
        let par = GaRunner::run(
            &problem,
            &config().with_max_generations(20).with_parallel(true),
        )
        .unwrap();
        assert_eq!(seq.fitness_history, par.fitness_history);
        assert_eq!(seq.best.bits, par.best.bits);
    }

    #[test]
    fn test_all_selection_strategies() {
        let problem = OneMaxProblem { n: 12 };
        for selection in [
            Selection::Uniform,
            Selection::Tournament(2),
            Selection::Rank,
        ] {
            let result = GaRunner::run(&problem, &config().with_selection(selection)).unwrap();
            assert!(
                result.best_fitness >= 10,
                "selection {selection:?} got {}",
                result.best_fitness
            );
        }
    }
}
