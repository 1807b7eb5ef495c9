use super::Report;
use crate::dataset::LoadFailure;
use crate::graph::InteractionGraphs;
use serde_derive::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct GraphSummaryReport {
    graphs: Vec<GraphLine>,
}

#[derive(Serialize)]
struct GraphLine {
    relation: String,
    nodes: usize,
    edges: usize,
}

impl GraphSummaryReport {
    pub fn new(graphs: &InteractionGraphs) -> Self {
        GraphSummaryReport {
            graphs: graphs
                .iter()
                .map(|graph| GraphLine {
                    relation: capitalize(graph.relation().name()),
                    nodes: graph.node_count(),
                    edges: graph.edge_count(),
                })
                .collect(),
        }
    }
}

impl Report for GraphSummaryReport {
    fn title() -> &'static str {
        "graph_summary"
    }

    fn template() -> &'static str {
        "{{ for graph in graphs }}{graph.relation} network nodes: {graph.nodes}
{graph.relation} network edges: {graph.edges}
{{ endfor }}"
    }
}

#[derive(Serialize)]
pub struct ManifestReport {
    files: Vec<String>,
}

impl ManifestReport {
    pub fn new(files: &[PathBuf]) -> Self {
        ManifestReport {
            files: files
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
    }
}

impl Report for ManifestReport {
    fn title() -> &'static str {
        "manifest"
    }

    fn template() -> &'static str {
        "Generated:
{{ for file in files }}{file}
{{ endfor }}"
    }
}

#[derive(Serialize)]
pub struct LoadFailureReport {
    failures: Vec<FailureLine>,
}

#[derive(Serialize)]
struct FailureLine {
    path: String,
    message: String,
}

impl LoadFailureReport {
    pub fn new(failures: &[LoadFailure]) -> Self {
        LoadFailureReport {
            failures: failures
                .iter()
                .map(|failure| FailureLine {
                    path: failure.path.display().to_string(),
                    message: failure.message.clone(),
                })
                .collect(),
        }
    }
}

impl Report for LoadFailureReport {
    fn title() -> &'static str {
        "load_failures"
    }

    fn template() -> &'static str {
        "{{ for failure in failures }}Failed to load {failure.path}: {failure.message}
{{ endfor }}"
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
