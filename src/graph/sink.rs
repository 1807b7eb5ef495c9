use super::{InteractionGraph, Relation};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::{Path, PathBuf};

/// A destination for finished graphs.
pub trait GraphSink {
    /// Persists the node list and edge list, returning the files written.
    fn write_graph(&mut self, graph: &InteractionGraph) -> Result<Vec<PathBuf>>;
}

/// Writes each graph as a pair of CSV files: `<relation>_network.nodes.csv`
/// with an `id` column and `<relation>_network.edges.csv` with `source` and
/// `target` columns.
pub struct CsvGraphSink {
    directory: PathBuf,
}

impl CsvGraphSink {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        CsvGraphSink {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn nodes_path(&self, relation: Relation) -> PathBuf {
        self.directory
            .join(format!("{}_network.nodes.csv", relation.name()))
    }

    pub fn edges_path(&self, relation: Relation) -> PathBuf {
        self.directory
            .join(format!("{}_network.edges.csv", relation.name()))
    }

    /// Loads a graph previously written by this sink.
    pub fn read_graph(&self, relation: Relation) -> Result<InteractionGraph> {
        let mut graph = InteractionGraph::new(relation);

        let nodes_path = self.nodes_path(relation);
        let mut nodes = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&nodes_path)
            .map_err(|source| Error::ArtifactRead {
                path: nodes_path.clone(),
                source,
            })?;

        for result in nodes.records() {
            let record = result.map_err(|source| Error::ArtifactRead {
                path: nodes_path.clone(),
                source,
            })?;

            if let Some(id) = record.get(0) {
                graph.add_node(id);
            }
        }

        let edges_path = self.edges_path(relation);
        let mut edges = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&edges_path)
            .map_err(|source| Error::ArtifactRead {
                path: edges_path.clone(),
                source,
            })?;

        for result in edges.records() {
            let record = result.map_err(|source| Error::ArtifactRead {
                path: edges_path.clone(),
                source,
            })?;

            if let (Some(source), Some(target)) = (record.get(0), record.get(1)) {
                graph.add_edge(source, target);
            }
        }

        Ok(graph)
    }
}

impl GraphSink for CsvGraphSink {
    fn write_graph(&mut self, graph: &InteractionGraph) -> Result<Vec<PathBuf>> {
        let nodes_path = self.nodes_path(graph.relation());
        write_rows(
            &nodes_path,
            &["id"],
            graph.nodes().map(|id| vec![id]),
        )?;

        let edges_path = self.edges_path(graph.relation());
        write_rows(
            &edges_path,
            &["source", "target"],
            graph.edges().map(|(source, target)| vec![source, target]),
        )?;

        log::info!(
            "Wrote {} network to {:?} and {:?}",
            graph.relation(),
            nodes_path,
            edges_path
        );

        Ok(vec![nodes_path, edges_path])
    }
}

fn write_rows<'a, I: Iterator<Item = Vec<&'a str>>>(
    path: &Path,
    header: &[&str],
    rows: I,
) -> Result<()> {
    let to_error = |source| Error::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new().from_path(path).map_err(to_error)?;
    writer.write_record(header).map_err(to_error)?;

    for row in rows {
        writer.write_record(&row).map_err(to_error)?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CsvGraphSink, GraphSink};
    use crate::graph::{InteractionGraph, Relation};

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvGraphSink::new(dir.path());

        let mut graph = InteractionGraph::new(Relation::Reply);
        graph.add_edge("100", "200");
        graph.add_edge("200", "300");
        graph.add_edge("007", "100");

        let written = sink.write_graph(&graph).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("reply_network.nodes.csv"),
                dir.path().join("reply_network.edges.csv"),
            ]
        );
        assert_eq!(sink.read_graph(Relation::Reply).unwrap(), graph);
    }

    #[test]
    fn round_trip_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvGraphSink::new(dir.path());
        let graph = InteractionGraph::new(Relation::Quote);

        sink.write_graph(&graph).unwrap();
        let read = sink.read_graph(Relation::Quote).unwrap();

        assert_eq!(read.node_count(), 0);
        assert_eq!(read.edge_count(), 0);
    }

    #[test]
    fn read_missing_graph() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvGraphSink::new(dir.path());

        assert!(sink.read_graph(Relation::Retweet).is_err());
    }
}
