use super::EngagementAggregate;
use crate::dataset::{Dataset, Row, Value};
use crate::schema::ENGAGEMENT;
use std::collections::HashMap;

struct Accumulator {
    author_id: String,
    username: Option<String>,
    followers: Option<u64>,
    engagement: u64,
}

impl Accumulator {
    fn new(author_id: String) -> Accumulator {
        Accumulator {
            author_id,
            username: None,
            followers: None,
            engagement: 0,
        }
    }

    fn observe(&mut self, username: Option<&Value>, followers: Option<u64>, engagement: u64) {
        if self.username.is_none() {
            self.username = username.map(|value| value.as_text().into_owned());
        }

        self.followers = match (self.followers, followers) {
            (Some(current), Some(observed)) => Some(current.max(observed)),
            (current, observed) => current.or(observed),
        };

        self.engagement = self.engagement.saturating_add(engagement);
    }

    fn finish(self, dataset: &str) -> EngagementAggregate {
        EngagementAggregate {
            author_id: self.author_id,
            username: self.username,
            followers: self.followers,
            engagement: self.engagement,
            dataset: dataset.to_string(),
        }
    }
}

/// Likes, replies, and retweets of one row, with missing counts as zero.
fn row_engagement(row: &Row, counts: &[usize]) -> u64 {
    counts
        .iter()
        .filter_map(|index| row.get(*index).and_then(Value::as_count))
        .fold(0, u64::saturating_add)
}

/// Groups a dataset's rows by author, summing engagement and keeping the
/// largest follower count.
///
/// Returns `None` when the dataset lacks any engagement column. Rows without
/// an author id are ignored. The display name of each aggregate is the first
/// non-null name seen for that author, and aggregates are in first-seen
/// author order.
pub fn aggregate(dataset: &Dataset) -> Option<Vec<EngagementAggregate>> {
    let [author_id, username, followers, likes, replies, retweets] =
        match ENGAGEMENT.resolve(dataset) {
            Some(indices) => indices,
            None => {
                log::debug!(
                    "{} lacks {:?}, skipping engagement",
                    dataset.name(),
                    ENGAGEMENT.missing(dataset)
                );
                return None;
            }
        };

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut accumulators: Vec<Accumulator> = vec![];

    for row in dataset.rows() {
        let author = match row.get(author_id) {
            Some(value) => value.as_key().into_owned(),
            None => continue,
        };

        let position = *positions.entry(author.clone()).or_insert_with(|| {
            accumulators.push(Accumulator::new(author));
            accumulators.len() - 1
        });

        accumulators[position].observe(
            row.get(username),
            row.get(followers).and_then(Value::as_count),
            row_engagement(&row, &[likes, replies, retweets]),
        );
    }

    Some(
        accumulators
            .into_iter()
            .map(|accumulator| accumulator.finish(dataset.name()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::aggregate;
    use crate::dataset::Dataset;
    use crate::influence::EngagementAggregate;

    const HEADER: &str = "author_id,author.username,author.public_metrics.followers_count,public_metrics.like_count,public_metrics.reply_count,public_metrics.retweet_count";

    fn dataset(name: &str, rows: &[&str]) -> Dataset {
        let content = format!("{}\n{}\n", HEADER, rows.join("\n"));
        Dataset::from_reader(name, content.as_bytes()).unwrap()
    }

    #[test]
    fn followers_are_a_max_and_engagement_a_sum() {
        let data = dataset(
            "a.csv",
            &["1,alice,100,1,2,3", "2,bob,5,0,0,1", "1,alice,250,4,0,0"],
        );

        let expected = vec![
            EngagementAggregate {
                author_id: "1".to_string(),
                username: Some("alice".to_string()),
                followers: Some(250),
                engagement: 10,
                dataset: "a.csv".to_string(),
            },
            EngagementAggregate {
                author_id: "2".to_string(),
                username: Some("bob".to_string()),
                followers: Some(5),
                engagement: 1,
                dataset: "a.csv".to_string(),
            },
        ];

        assert_eq!(aggregate(&data), Some(expected));
    }

    #[test]
    fn null_counts_are_zero() {
        let data = dataset("a.csv", &["1,alice,,,,", "1,alice,,NaN,2,", "3,carol,-5,-1,1,"]);
        let result = aggregate(&data).unwrap();

        assert_eq!(result[0].engagement, 2);
        assert_eq!(result[0].followers, None);
        assert_eq!(result[1].engagement, 1);
        assert_eq!(result[1].followers, None);
    }

    #[test]
    fn same_id_with_different_names_aggregates_together() {
        let data = dataset("a.csv", &["1,,10,1,0,0", "1,alice,20,1,0,0", "1,alice_2,5,1,0,0"]);
        let result = aggregate(&data).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].username, Some("alice".to_string()));
        assert_eq!(result[0].followers, Some(20));
        assert_eq!(result[0].engagement, 3);
    }

    #[test]
    fn rows_without_author_are_ignored() {
        let data = dataset("a.csv", &[",ghost,10,1,1,1", "2.0,bob,7.0,1.0,0,0"]);
        let result = aggregate(&data).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].author_id, "2");
        assert_eq!(result[0].followers, Some(7));
    }

    #[test]
    fn numeric_looking_usernames_keep_their_text() {
        let data = dataset("a.csv", &["1,1e5,10,1,0,0", "2,12E3,20,1,0,0", "3,1.50,5,0,0,0"]);
        let usernames = aggregate(&data)
            .unwrap()
            .into_iter()
            .map(|record| record.username)
            .collect::<Vec<_>>();

        assert_eq!(
            usernames,
            vec![
                Some("1e5".to_string()),
                Some("12E3".to_string()),
                Some("1.50".to_string())
            ]
        );
    }

    #[test]
    fn null_username_rows_still_count() {
        let data = dataset("a.csv", &["1,,10,1,1,1", "1,,20,2,0,0"]);
        let result = aggregate(&data).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].username, None);
        assert_eq!(result[0].followers, Some(20));
        assert_eq!(result[0].engagement, 5);
    }

    #[test]
    fn missing_column_yields_nothing() {
        let content = "author_id,author.username,public_metrics.like_count,public_metrics.reply_count,public_metrics.retweet_count\n1,alice,1,1,1\n";
        let data = Dataset::from_reader("b.csv", content.as_bytes()).unwrap();

        assert_eq!(aggregate(&data), None);
    }
}
