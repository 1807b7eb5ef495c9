pub mod aggregate;
pub mod merge;

pub use aggregate::aggregate;
pub use merge::{merge, CrossDatasetAggregate};

use serde_derive::Serialize;

/// One author's activity within one dataset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EngagementAggregate {
    pub author_id: String,
    pub username: Option<String>,
    pub followers: Option<u64>,
    pub engagement: u64,
    pub dataset: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DatasetCount {
    pub author_id: String,
    pub num_datasets: usize,
}

/// An [`EngagementAggregate`] with the author's cross-dataset count attached.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MergedAggregate {
    pub author_id: String,
    pub username: Option<String>,
    pub followers: Option<u64>,
    pub engagement: u64,
    pub dataset: String,
    pub num_datasets: usize,
}

impl MergedAggregate {
    pub fn new(aggregate: &EngagementAggregate, num_datasets: usize) -> MergedAggregate {
        MergedAggregate {
            author_id: aggregate.author_id.clone(),
            username: aggregate.username.clone(),
            followers: aggregate.followers,
            engagement: aggregate.engagement,
            dataset: aggregate.dataset.clone(),
            num_datasets,
        }
    }
}
