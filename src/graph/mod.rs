pub mod sink;

pub use sink::{CsvGraphSink, GraphSink};

use crate::dataset::Dataset;
use crate::schema::{self, Gate};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Relation {
    Retweet,
    Reply,
    Quote,
}

impl Relation {
    pub fn name(&self) -> &'static str {
        match self {
            Relation::Retweet => "retweet",
            Relation::Reply => "reply",
            Relation::Quote => "quote",
        }
    }

    /// The column holding the id of the account on the receiving end.
    pub fn target_column(&self) -> &'static str {
        match self {
            Relation::Retweet => schema::RETWEETED_USER_ID,
            Relation::Reply => schema::IN_REPLY_TO_USER_ID,
            Relation::Quote => schema::QUOTED_USER_ID,
        }
    }

    /// Source and target columns, in that order.
    pub fn gate(&self) -> Gate<2> {
        Gate::new(self.name(), [schema::AUTHOR_ID, self.target_column()])
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        f.write_str(self.name())
    }
}

/// A directed graph without parallel edges, with author ids as nodes.
#[derive(Clone, Debug)]
pub struct InteractionGraph {
    relation: Relation,
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl InteractionGraph {
    pub fn new(relation: Relation) -> InteractionGraph {
        InteractionGraph {
            relation,
            graph: DiGraph::new(),
            nodes: HashMap::new(),
        }
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(index) = self.nodes.get(id) {
            *index
        } else {
            let index = self.graph.add_node(id.to_string());
            self.nodes.insert(id.to_string(), index);
            index
        }
    }

    /// Adds `source -> target`; adding an existing edge changes nothing.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let source = self.add_node(source);
        let target = self.add_node(target);
        self.graph.update_edge(source, target, ());
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.nodes.get(source), self.nodes.get(target)) {
            (Some(source), Some(target)) => self.graph.contains_edge(*source, *target),
            _ => false,
        }
    }

    /// Node ids in the order they were first observed.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph
            .node_indices()
            .map(move |index| self.graph[index].as_str())
    }

    /// Edges in the order they were first observed.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    /// Adds an edge for every row of the dataset with both endpoints present.
    ///
    /// Returns the number of qualifying rows, or `None` if the dataset lacks
    /// either column.
    pub fn extend_from(&mut self, dataset: &Dataset) -> Option<usize> {
        let [source_index, target_index] = self.relation.gate().resolve(dataset)?;
        let mut rows = 0;

        for row in dataset.rows() {
            if let (Some(source), Some(target)) = (row.get(source_index), row.get(target_index)) {
                self.add_edge(&source.as_key(), &target.as_key());
                rows += 1;
            }
        }

        Some(rows)
    }
}

impl PartialEq for InteractionGraph {
    /// Graphs are equal when their relation, node set, and edge set are.
    fn eq(&self, other: &Self) -> bool {
        self.relation == other.relation
            && self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self.nodes().all(|id| other.nodes.contains_key(id))
            && self
                .edges()
                .all(|(source, target)| other.contains_edge(source, target))
    }
}

/// The three graphs of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionGraphs {
    pub retweet: InteractionGraph,
    pub reply: InteractionGraph,
    pub quote: InteractionGraph,
}

impl InteractionGraphs {
    pub fn iter(&self) -> impl Iterator<Item = &InteractionGraph> {
        vec![&self.retweet, &self.reply, &self.quote].into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|graph| graph.node_count() == 0)
    }
}

/// Builds the retweet, reply, and quote graphs over all datasets.
///
/// Each relation checks its own columns per dataset, so a dataset missing
/// engagement columns can still contribute edges.
pub fn build<'a, I: IntoIterator<Item = &'a Dataset>>(datasets: I) -> InteractionGraphs {
    let mut graphs = InteractionGraphs {
        retweet: InteractionGraph::new(Relation::Retweet),
        reply: InteractionGraph::new(Relation::Reply),
        quote: InteractionGraph::new(Relation::Quote),
    };

    for dataset in datasets {
        for graph in vec![&mut graphs.retweet, &mut graphs.reply, &mut graphs.quote] {
            match graph.extend_from(dataset) {
                Some(rows) => log::debug!(
                    "{} contributed {} {} rows",
                    dataset.name(),
                    rows,
                    graph.relation()
                ),
                None => log::debug!(
                    "{} lacks {} columns",
                    dataset.name(),
                    graph.relation()
                ),
            }
        }
    }

    for graph in graphs.iter() {
        log::info!(
            "{} network: {} nodes, {} edges",
            graph.relation(),
            graph.node_count(),
            graph.edge_count()
        );
    }

    graphs
}

#[cfg(test)]
mod tests {
    use super::{build, InteractionGraph, Relation};
    use crate::dataset::Dataset;

    fn dataset(name: &str, content: &str) -> Dataset {
        Dataset::from_reader(name, content.as_bytes()).unwrap()
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let mut graph = InteractionGraph::new(Relation::Retweet);
        graph.add_edge("1", "2");
        graph.add_edge("1", "2");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        graph.add_edge("2", "1");

        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn null_endpoints_are_ignored() {
        let content = "author_id,retweeted_user_id\n1,10\n2,\n3,11\n4,NaN\n5,12\n6,13\n10,14\n7,\n8,15\n9,16\n";
        let graphs = build(vec![&dataset("a.csv", content)]);

        assert_eq!(graphs.retweet.edge_count(), 7);
        assert_eq!(graphs.retweet.node_count(), 13);
        assert_eq!(graphs.reply.node_count(), 0);
        assert_eq!(graphs.quote.edge_count(), 0);
    }

    #[test]
    fn edges_union_across_datasets() {
        let a = dataset(
            "a.csv",
            "author_id,in_reply_to_user_id,quoted_user_id\n1,2,\n1,2,3\n",
        );
        let b = dataset("b.csv", "author_id,in_reply_to_user_id\n1.0,2.0\n2,1\n");
        let c = dataset("c.csv", "id,in_reply_to_user_id\n9,1\n");

        let graphs = build(vec![&a, &b, &c]);

        assert_eq!(graphs.reply.node_count(), 2);
        assert_eq!(graphs.reply.edge_count(), 2);
        assert!(graphs.reply.contains_edge("1", "2"));
        assert!(graphs.reply.contains_edge("2", "1"));
        assert_eq!(graphs.quote.edges().collect::<Vec<_>>(), vec![("1", "3")]);
        assert!(graphs.retweet.nodes().next().is_none());
    }

    #[test]
    fn ids_beyond_i64_stay_distinct() {
        let content = "author_id,quoted_user_id\n18446744073709551615,18446744073709551614\n";
        let graphs = build(vec![&dataset("a.csv", content)]);

        assert_eq!(graphs.quote.node_count(), 2);
        assert_eq!(graphs.quote.edge_count(), 1);
        assert!(graphs
            .quote
            .contains_edge("18446744073709551615", "18446744073709551614"));
    }

    #[test]
    fn graph_equality_ignores_order() {
        let mut first = InteractionGraph::new(Relation::Quote);
        first.add_edge("1", "2");
        first.add_edge("3", "1");

        let mut second = InteractionGraph::new(Relation::Quote);
        second.add_edge("3", "1");
        second.add_edge("1", "2");

        assert_eq!(first, second);

        second.add_node("4");

        assert_ne!(first, second);
    }
}
