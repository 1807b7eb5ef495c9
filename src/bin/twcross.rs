use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tweet_crosswalk::config::Config;
use tweet_crosswalk::error::Error;
use tweet_crosswalk::pipeline::{Outcome, Pipeline, Run, Task};
use tweet_crosswalk::reports::{
    BasicStatsReport, GraphSummaryReport, LoadFailureReport, ManifestReport, Report,
};

fn main() -> Result<(), Error> {
    let opts: Opts = Opts::parse();
    let _ = tweet_crosswalk::cli::init_logging(opts.verbose);

    let mut config = match &opts.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(input) = &opts.input {
        config = config.with_input(input);
    }

    if let Some(output) = &opts.output {
        config = config.with_output(output);
    }

    let task = match opts.command {
        SubCommand::Stats => Task::Stats,
        SubCommand::Influencers => Task::Influencers,
        SubCommand::Graphs => Task::Graphs,
        SubCommand::All => Task::All,
    };

    log::info!("Loading datasets from {:?}", config.input.directory);

    match Pipeline::new(config).run(task)? {
        Outcome::NoData { failures } => {
            eprint!("{}", LoadFailureReport::new(&failures).generate()?);
            println!("No data found.");
        }
        Outcome::Completed(run) => print_run(&run)?,
    }

    Ok(())
}

fn print_run(run: &Run) -> Result<(), Error> {
    eprint!("{}", LoadFailureReport::new(&run.failures).generate()?);

    for stats in &run.stats {
        println!("{}", BasicStatsReport::new(stats).generate()?);
    }

    if run.no_influencer_data() {
        println!("No datasets provided influencer information.");
    }

    if let Some(graphs) = &run.graphs {
        print!("{}", GraphSummaryReport::new(graphs).generate()?);
    }

    if !run.files.is_empty() {
        print!("{}", ManifestReport::new(&run.files).generate()?);
    }

    Ok(())
}

#[derive(Parser)]
#[clap(name = "twcross", version, author)]
struct Opts {
    /// Level of verbosity
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,
    /// TOML configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Directory of tweet export CSV files (overrides the configuration)
    #[clap(short, long)]
    input: Option<PathBuf>,
    /// Directory for generated tables and graphs (overrides the configuration)
    #[clap(short, long)]
    output: Option<PathBuf>,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Print descriptive statistics for every dataset
    Stats,
    /// Write cross-dataset influencer tables
    Influencers,
    /// Write the retweet, reply, and quote networks
    Graphs,
    /// Do all of the above with a single load
    All,
}
