use crate::dataset::{Dataset, Value};
use crate::schema;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const ZONED_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    // Twitter API v1: "Wed Oct 10 20:19:24 +0000 2018"
    "%a %b %d %H:%M:%S %z %Y",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Outcome of checking that every timestamp in a column parses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimestampCheck {
    /// The dataset has no timestamp column.
    Absent,
    Valid,
    Errors(usize),
}

impl Display for TimestampCheck {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        match self {
            TimestampCheck::Absent => f.write_str("None"),
            TimestampCheck::Valid => f.write_str("0"),
            TimestampCheck::Errors(count) => write!(
                f,
                "datetime parsing errors detected ({} unparseable values)",
                count
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldPopulation {
    pub column: String,
    /// Share of non-null values, or `None` for a dataset without rows.
    pub fraction: Option<f64>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MissingValues {
    pub column: String,
    pub count: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Influencer {
    pub author_id: String,
    pub username: Option<String>,
    pub followers: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BasicStats {
    pub dataset: String,
    pub rows: usize,
    pub unique_users: Option<usize>,
    pub tweets_with_hashtags: Option<usize>,
    pub retweets: Option<usize>,
    pub replies: Option<usize>,
    pub quotes: Option<usize>,
    pub duplicate_ids: Option<usize>,
    pub missing_values: Vec<MissingValues>,
    pub created_at: TimestampCheck,
    pub field_population: Vec<FieldPopulation>,
    pub top_influencers: Option<Vec<Influencer>>,
}

impl BasicStats {
    pub fn compute(dataset: &Dataset, top_n: usize) -> BasicStats {
        BasicStats {
            dataset: dataset.name().to_string(),
            rows: dataset.len(),
            unique_users: unique_count(dataset, schema::AUTHOR_ID),
            tweets_with_hashtags: non_null_count(dataset, schema::HASHTAGS),
            retweets: non_null_count(dataset, schema::RETWEETED_ID),
            replies: non_null_count(dataset, schema::REPLIED_TO_ID),
            quotes: non_null_count(dataset, schema::QUOTED_ID),
            duplicate_ids: duplicate_count(dataset, schema::ID),
            missing_values: schema::KEY_FIELDS
                .iter()
                .filter_map(|column| {
                    non_null_count(dataset, column).map(|present| MissingValues {
                        column: column.to_string(),
                        count: dataset.len() - present,
                    })
                })
                .collect(),
            created_at: check_timestamps(dataset, schema::CREATED_AT),
            field_population: field_population(dataset),
            top_influencers: top_influencers(dataset, top_n),
        }
    }
}

fn non_null_count(dataset: &Dataset, column: &str) -> Option<usize> {
    dataset
        .column_values(column)
        .map(|values| values.filter(Option::is_some).count())
}

fn unique_count(dataset: &Dataset, column: &str) -> Option<usize> {
    dataset.column_values(column).map(|values| {
        values
            .flatten()
            .map(|value| value.as_key())
            .unique()
            .count()
    })
}

/// Rows whose value repeats an earlier row's; nulls repeat each other.
fn duplicate_count(dataset: &Dataset, column: &str) -> Option<usize> {
    dataset.column_values(column).map(|values| {
        let mut seen = HashSet::new();

        values
            .filter(|value| !seen.insert(value.map(|value| value.as_key())))
            .count()
    })
}

fn field_population(dataset: &Dataset) -> Vec<FieldPopulation> {
    dataset
        .columns()
        .iter()
        .map(|column| FieldPopulation {
            column: column.clone(),
            fraction: if dataset.is_empty() {
                None
            } else {
                non_null_count(dataset, column)
                    .map(|count| count as f64 / dataset.len() as f64)
            },
        })
        .collect()
}

pub fn parses_as_timestamp(value: &Value) -> bool {
    match value {
        Value::Integer(_) => true,
        Value::Float(value, _) => value.is_finite(),
        Value::Text(text) => {
            let text = text.trim();

            DateTime::parse_from_rfc3339(text).is_ok()
                || DateTime::parse_from_rfc2822(text).is_ok()
                || ZONED_DATE_TIME_FORMATS
                    .iter()
                    .any(|format| DateTime::parse_from_str(text, format).is_ok())
                || DATE_TIME_FORMATS
                    .iter()
                    .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
                || DATE_FORMATS
                    .iter()
                    .any(|format| NaiveDate::parse_from_str(text, format).is_ok())
        }
    }
}

fn check_timestamps(dataset: &Dataset, column: &str) -> TimestampCheck {
    match dataset.column_values(column) {
        None => TimestampCheck::Absent,
        Some(values) => {
            let errors = values
                .flatten()
                .filter(|value| !parses_as_timestamp(value))
                .count();

            if errors == 0 {
                TimestampCheck::Valid
            } else {
                TimestampCheck::Errors(errors)
            }
        }
    }
}

/// The first row of each author, by follower count descending.
///
/// Authors without a follower count sort last; ties keep row order.
fn top_influencers(dataset: &Dataset, top_n: usize) -> Option<Vec<Influencer>> {
    let author_index = dataset.column_index(schema::AUTHOR_ID)?;
    let followers_index = dataset.column_index(schema::FOLLOWERS_COUNT)?;
    let mut seen = HashSet::new();

    let mut influencers = dataset
        .rows()
        .filter_map(|row| {
            let author_id = row.get(author_index)?.as_key().into_owned();

            if seen.insert(author_id.clone()) {
                Some(Influencer {
                    author_id,
                    username: row
                        .get_optional(schema::AUTHOR_USERNAME)
                        .map(|value| value.as_text().into_owned()),
                    followers: row.get(followers_index).and_then(Value::as_count),
                })
            } else {
                None
            }
        })
        .collect::<Vec<_>>();

    influencers.sort_by_key(|influencer| std::cmp::Reverse(influencer.followers));
    influencers.truncate(top_n);

    Some(influencers)
}
