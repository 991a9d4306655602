use rand::Rng;

use super::model::Dataset;

/// Pick `n` distinct row indices uniformly at random.
///
/// `n` is clamped to the dataset size; the result is in draw order.
pub fn sample_indices<R: Rng + ?Sized>(dataset: &Dataset, n: usize, rng: &mut R) -> Vec<usize> {
    let amount = n.min(dataset.len());
    rand::seq::index::sample(rng, dataset.len(), amount).into_vec()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::data::model::{N_FEATURES, Record};

    fn dataset(n: usize) -> Dataset {
        Dataset::from_records(
            (0..n)
                .map(|i| Record {
                    id: format!("P{i}"),
                    features: [0.0; N_FEATURES],
                    label: "CYT".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn draws_distinct_rows() {
        let ds = dataset(20);
        let mut rng = StdRng::seed_from_u64(7);
        let idx = sample_indices(&ds, 10, &mut rng);
        assert_eq!(idx.len(), 10);
        assert!(idx.iter().all(|&i| i < 20));
        assert_eq!(idx.iter().collect::<BTreeSet<_>>().len(), 10);
    }

    #[test]
    fn clamps_to_dataset_size() {
        let ds = dataset(4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut idx = sample_indices(&ds, 10, &mut rng);
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }
}
