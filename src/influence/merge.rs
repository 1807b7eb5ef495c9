use super::{DatasetCount, EngagementAggregate, MergedAggregate};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// The three influencer tables produced from all contributing datasets.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CrossDatasetAggregate {
    /// Every per-dataset aggregate, in dataset order.
    pub combined: Vec<EngagementAggregate>,
    /// Distinct datasets per author, in author id order (see `compare_ids`).
    pub counts: Vec<DatasetCount>,
    /// `combined` with each record's `num_datasets` attached.
    pub merged: Vec<MergedAggregate>,
}

impl CrossDatasetAggregate {
    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    /// The number of distinct authors across all datasets.
    pub fn author_count(&self) -> usize {
        self.counts.len()
    }
}

/// Numeric ids in numeric order, then any other ids as strings.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => Ordering::Equal,
    }
    .then_with(|| a.cmp(b))
}

/// Unions per-dataset aggregates and annotates each with the number of
/// distinct datasets its author appears in.
pub fn merge<I: IntoIterator<Item = Vec<EngagementAggregate>>>(
    per_dataset: I,
) -> CrossDatasetAggregate {
    let combined = per_dataset.into_iter().flatten().collect::<Vec<_>>();

    let mut datasets_by_author: HashMap<&str, HashSet<&str>> = HashMap::new();

    for aggregate in &combined {
        datasets_by_author
            .entry(aggregate.author_id.as_str())
            .or_default()
            .insert(aggregate.dataset.as_str());
    }

    let mut counts = datasets_by_author
        .iter()
        .map(|(author_id, datasets)| DatasetCount {
            author_id: author_id.to_string(),
            num_datasets: datasets.len(),
        })
        .collect::<Vec<_>>();

    counts.sort_by(|a, b| compare_ids(&a.author_id, &b.author_id));

    let lookup = counts
        .iter()
        .map(|count| (count.author_id.as_str(), count.num_datasets))
        .collect::<HashMap<_, _>>();

    // Every combined author has a count, so the join is one-to-one.
    let merged = combined
        .iter()
        .map(|aggregate| {
            let num_datasets = lookup
                .get(aggregate.author_id.as_str())
                .copied()
                .unwrap_or_default();

            MergedAggregate::new(aggregate, num_datasets)
        })
        .collect::<Vec<_>>();

    CrossDatasetAggregate {
        combined,
        counts,
        merged,
    }
}
