use crate::config::Config;
use crate::dataset::{self, LoadFailure, Loaded};
use crate::error::Result;
use crate::graph::{self, CsvGraphSink, GraphSink, InteractionGraphs};
use crate::influence::{self, CrossDatasetAggregate};
use crate::output;
use crate::stats::BasicStats;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Task {
    Stats,
    Influencers,
    Graphs,
    All,
}

impl Task {
    fn includes(&self, other: Task) -> bool {
        *self == Task::All || *self == other
    }
}

/// What a completed run computed and wrote.
#[derive(Debug, Default)]
pub struct Run {
    pub failures: Vec<LoadFailure>,
    pub stats: Vec<BasicStats>,
    /// Present when influencers were requested; empty when no dataset had the
    /// engagement columns.
    pub influencers: Option<CrossDatasetAggregate>,
    pub graphs: Option<InteractionGraphs>,
    pub files: Vec<PathBuf>,
}

impl Run {
    pub fn no_influencer_data(&self) -> bool {
        self.influencers
            .as_ref()
            .map(|aggregate| aggregate.is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// No file in the input directory could be loaded.
    NoData { failures: Vec<LoadFailure> },
    Completed(Run),
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load(&self) -> Result<Loaded> {
        dataset::load_directory(&self.config.input.directory, &self.config.input.extension)
    }

    pub fn basic_stats(&self, loaded: &Loaded) -> Vec<BasicStats> {
        loaded
            .iter()
            .map(|dataset| BasicStats::compute(dataset, self.config.influencers.top_n))
            .collect()
    }

    pub fn write_influencers(&self, aggregate: &CrossDatasetAggregate) -> Result<Vec<PathBuf>> {
        output::create_directory(&self.config.output.directory)?;
        output::write_influencers(&self.config.output.directory, aggregate)
    }

    pub fn write_graphs<S: GraphSink>(
        &self,
        sink: &mut S,
        graphs: &InteractionGraphs,
    ) -> Result<Vec<PathBuf>> {
        output::create_directory(&self.config.output.directory)?;

        let mut files = vec![];

        for graph in graphs.iter() {
            files.extend(sink.write_graph(graph)?);
        }

        Ok(files)
    }

    /// Loads the input directory and performs the task, writing artifacts to
    /// the output directory.
    pub fn run(&self, task: Task) -> Result<Outcome> {
        let loaded = self.load()?;

        if loaded.is_empty() {
            log::warn!(
                "No datasets loaded from {:?}",
                self.config.input.directory
            );

            return Ok(Outcome::NoData {
                failures: loaded.failures,
            });
        }

        let mut run = Run::default();

        if task.includes(Task::Stats) {
            run.stats = self.basic_stats(&loaded);
        }

        if task.includes(Task::Influencers) {
            let aggregate = influencers(&loaded);

            if aggregate.is_empty() {
                log::warn!("No datasets provided influencer information");
            } else {
                run.files.extend(self.write_influencers(&aggregate)?);
            }

            run.influencers = Some(aggregate);
        }

        if task.includes(Task::Graphs) {
            let graphs = graph::build(loaded.iter());
            let mut sink = CsvGraphSink::new(&self.config.output.directory);

            run.files.extend(self.write_graphs(&mut sink, &graphs)?);
            run.graphs = Some(graphs);
        }

        run.failures = loaded.failures;

        Ok(Outcome::Completed(run))
    }
}

/// Aggregates every dataset that has the engagement columns and merges the
/// results.
pub fn influencers(loaded: &Loaded) -> CrossDatasetAggregate {
    influence::merge(loaded.iter().filter_map(influence::aggregate))
}
