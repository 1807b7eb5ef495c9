use std::fs;
use std::path::Path;
use tweet_crosswalk::config::Config;
use tweet_crosswalk::graph::{CsvGraphSink, Relation};
use tweet_crosswalk::pipeline::{self, Outcome, Pipeline, Task};

const ENGAGEMENT_HEADER: &str = "id,author_id,author.username,author.public_metrics.followers_count,public_metrics.like_count,public_metrics.reply_count,public_metrics.retweet_count,retweeted_user_id,in_reply_to_user_id";

fn write_example_datasets(dir: &Path) {
    fs::write(
        dir.join("a.csv"),
        format!(
            "{}\n{}\n{}\n{}\n",
            ENGAGEMENT_HEADER,
            "1,100,alice,100,1,1,1,200,",
            "2,101,bob,20,,5,,,100",
            "3,100,alice,250,2,,,200,",
        ),
    )
    .unwrap();

    // No follower column, but interaction ids are present.
    fs::write(
        dir.join("b.csv"),
        "id,author_id,author.username,public_metrics.like_count,public_metrics.reply_count,public_metrics.retweet_count,retweeted_user_id,quoted_user_id\n4,300,carol,9,9,9,100,101\n5,300,carol,1,1,1,100,\n",
    )
    .unwrap();

    fs::write(
        dir.join("c.csv"),
        format!(
            "{}\n{}\n",
            ENGAGEMENT_HEADER, "6,101.0,bob,30.0,0,0,10,,"
        ),
    )
    .unwrap();

    fs::write(dir.join("d.csv"), "id,author_id\n7,100,unexpected\n").unwrap();
}

fn new_pipeline(input: &Path, output: &Path) -> Pipeline {
    Pipeline::new(Config::default().with_input(input).with_output(output))
}

#[test]
fn cross_dataset_influencers() {
    let input = tempfile::tempdir().unwrap();
    write_example_datasets(input.path());

    let loaded = new_pipeline(input.path(), input.path()).load().unwrap();

    assert_eq!(loaded.datasets.len(), 3);
    assert_eq!(loaded.failures.len(), 1);

    let aggregate = pipeline::influencers(&loaded);
    let datasets = aggregate
        .combined
        .iter()
        .map(|record| (record.author_id.as_str(), record.dataset.as_str()))
        .collect::<Vec<_>>();

    assert_eq!(
        datasets,
        vec![("100", "a.csv"), ("101", "a.csv"), ("101", "c.csv")]
    );

    let alice = &aggregate.combined[0];
    assert_eq!(alice.followers, Some(250));
    assert_eq!(alice.engagement, 5);

    assert_eq!(aggregate.merged.len(), aggregate.combined.len());

    for merged in &aggregate.merged {
        let expected = if merged.author_id == "101" { 2 } else { 1 };
        assert_eq!(merged.num_datasets, expected);
    }
}

#[test]
fn end_to_end_artifacts() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_example_datasets(input.path());

    let run = match new_pipeline(input.path(), output.path()).run(Task::All).unwrap() {
        Outcome::Completed(run) => run,
        Outcome::NoData { .. } => panic!("Expected a completed run"),
    };

    assert_eq!(run.stats.len(), 3);
    assert_eq!(run.failures.len(), 1);
    assert!(!run.no_influencer_data());
    assert_eq!(run.files.len(), 9);

    let counts = fs::read_to_string(output.path().join("influencer_dataset_counts.csv")).unwrap();
    assert_eq!(counts, "author_id,num_datasets\n100,1\n101,2\n");

    let merged = fs::read_to_string(
        output
            .path()
            .join("influencers_with_cross_dataset_stats.csv"),
    )
    .unwrap();
    assert_eq!(
        merged,
        "author_id,username,followers,engagement,dataset,num_datasets\n100,alice,250,5,a.csv,1\n101,bob,20,5,a.csv,2\n101,bob,30,10,c.csv,2\n"
    );

    let graphs = run.graphs.unwrap();
    let sink = CsvGraphSink::new(output.path());

    // b.csv fails the engagement gate but still contributes edges.
    assert!(graphs.retweet.contains_edge("300", "100"));
    assert_eq!(graphs.retweet.edge_count(), 2);
    assert_eq!(graphs.reply.edge_count(), 1);
    assert_eq!(graphs.quote.edge_count(), 1);

    assert_eq!(sink.read_graph(Relation::Retweet).unwrap(), graphs.retweet);
    assert_eq!(sink.read_graph(Relation::Reply).unwrap(), graphs.reply);
    assert_eq!(sink.read_graph(Relation::Quote).unwrap(), graphs.quote);
}

#[test]
fn only_failures_means_no_data() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("broken.csv"), "id\n1,2\n").unwrap();

    match new_pipeline(input.path(), output.path()).run(Task::All).unwrap() {
        Outcome::NoData { failures } => assert_eq!(failures.len(), 1),
        Outcome::Completed(_) => panic!("Expected no data"),
    }

    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn unreadable_input_directory_is_an_error() {
    let input = tempfile::tempdir().unwrap();
    let missing = input.path().join("missing");

    assert!(new_pipeline(&missing, input.path()).run(Task::All).is_err());
}
