use super::{optional, Report};
use crate::stats::BasicStats;
use serde_derive::Serialize;

#[derive(Serialize)]
pub struct BasicStatsReport {
    dataset: String,
    rows: usize,
    unique_users: String,
    tweets_with_hashtags: String,
    retweets: String,
    replies: String,
    quotes: String,
    has_influencers: bool,
    influencers: Vec<InfluencerLine>,
    duplicate_ids: String,
    missing_values: Vec<MissingLine>,
    created_at_errors: String,
    field_population: Vec<PopulationLine>,
}

#[derive(Serialize)]
struct InfluencerLine {
    author_id: String,
    username: String,
    followers: String,
}

#[derive(Serialize)]
struct MissingLine {
    column: String,
    count: usize,
}

#[derive(Serialize)]
struct PopulationLine {
    column: String,
    fraction: String,
}

impl BasicStatsReport {
    pub fn new(stats: &BasicStats) -> Self {
        BasicStatsReport {
            dataset: stats.dataset.clone(),
            rows: stats.rows,
            unique_users: optional(stats.unique_users),
            tweets_with_hashtags: optional(stats.tweets_with_hashtags),
            retweets: optional(stats.retweets),
            replies: optional(stats.replies),
            quotes: optional(stats.quotes),
            has_influencers: stats.top_influencers.is_some(),
            influencers: stats
                .top_influencers
                .iter()
                .flatten()
                .map(|influencer| InfluencerLine {
                    author_id: influencer.author_id.clone(),
                    username: optional(influencer.username.as_ref()),
                    followers: optional(influencer.followers),
                })
                .collect(),
            duplicate_ids: optional(stats.duplicate_ids),
            missing_values: stats
                .missing_values
                .iter()
                .map(|missing| MissingLine {
                    column: missing.column.clone(),
                    count: missing.count,
                })
                .collect(),
            created_at_errors: stats.created_at.to_string(),
            field_population: stats
                .field_population
                .iter()
                .map(|field| PopulationLine {
                    column: field.column.clone(),
                    fraction: field
                        .fraction
                        .map(|fraction| format!("{:.3}", fraction))
                        .unwrap_or_else(|| "nan".to_string()),
                })
                .collect(),
        }
    }
}

impl Report for BasicStatsReport {
    fn title() -> &'static str {
        "basic_stats"
    }

    fn template() -> &'static str {
        "================================================================================
File: {dataset}
================================================================================

Basic Stats:
rows: {rows}
unique_users: {unique_users}
tweets_with_hashtags: {tweets_with_hashtags}
retweets: {retweets}
replies: {replies}
quotes: {quotes}

Top Influencers:
{{ if has_influencers }}{{ for influencer in influencers }}{influencer.author_id} {influencer.username} {influencer.followers}
{{ endfor }}{{ else }}Influencer fields not present.
{{ endif }}
Cleaning Issues:
duplicate_ids: {duplicate_ids}
{{ for missing in missing_values }}missing {missing.column}: {missing.count}
{{ endfor }}created_at_errors: {created_at_errors}

Field Population (percent non-null):
{{ for field in field_population }}{field.column}: {field.fraction}
{{ endfor }}"
    }
}
