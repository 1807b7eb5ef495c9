use crate::dataset::Dataset;

pub const ID: &str = "id";
pub const TEXT: &str = "text";
pub const CREATED_AT: &str = "created_at";
pub const AUTHOR_ID: &str = "author_id";
pub const AUTHOR_USERNAME: &str = "author.username";
pub const FOLLOWERS_COUNT: &str = "author.public_metrics.followers_count";
pub const LIKE_COUNT: &str = "public_metrics.like_count";
pub const REPLY_COUNT: &str = "public_metrics.reply_count";
pub const RETWEET_COUNT: &str = "public_metrics.retweet_count";
pub const HASHTAGS: &str = "entities.hashtags";
pub const RETWEETED_ID: &str = "referenced_tweets.retweeted.id";
pub const REPLIED_TO_ID: &str = "referenced_tweets.replied_to.id";
pub const QUOTED_ID: &str = "referenced_tweets.quoted.id";
pub const RETWEETED_USER_ID: &str = "retweeted_user_id";
pub const IN_REPLY_TO_USER_ID: &str = "in_reply_to_user_id";
pub const QUOTED_USER_ID: &str = "quoted_user_id";

/// Columns that are reported as missing-value counts when present.
pub const KEY_FIELDS: [&str; 4] = [ID, AUTHOR_ID, TEXT, CREATED_AT];

/// A named set of columns that must all be present (exact names).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gate<const N: usize> {
    name: &'static str,
    columns: [&'static str; N],
}

/// Author identity, display name, follower count, and the three engagement
/// counts, in that order.
pub const ENGAGEMENT: Gate<6> = Gate::new(
    "engagement",
    [
        AUTHOR_ID,
        AUTHOR_USERNAME,
        FOLLOWERS_COUNT,
        LIKE_COUNT,
        REPLY_COUNT,
        RETWEET_COUNT,
    ],
);

impl<const N: usize> Gate<N> {
    pub const fn new(name: &'static str, columns: [&'static str; N]) -> Self {
        Gate { name, columns }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn columns(&self) -> &[&'static str; N] {
        &self.columns
    }

    pub fn passes(&self, dataset: &Dataset) -> bool {
        self.columns.iter().all(|column| dataset.has_column(column))
    }

    /// Column indices in gate order, if every column is present.
    pub fn resolve(&self, dataset: &Dataset) -> Option<[usize; N]> {
        let mut indices = [0; N];

        for (index, column) in indices.iter_mut().zip(self.columns.iter()) {
            *index = dataset.column_index(column)?;
        }

        Some(indices)
    }

    pub fn missing(&self, dataset: &Dataset) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|column| !dataset.has_column(column))
            .copied()
            .collect()
    }
}
