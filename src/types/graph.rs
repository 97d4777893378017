use super::edge::Edge;
use super::ids::{Direction, RelationId, VertexId};
use super::vertex::Vertex;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while mutating a RowGraph
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),

    #[error("Edge with ID {0} already exists")]
    DuplicateEdge(RelationId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph scoped to the decoding of one row
///
/// Holds the row's own vertex plus every placeholder neighbor its edges
/// reference. Vertices are looked up by ID with get-or-create semantics; a
/// vertex's label is fixed by whichever call creates it.
#[derive(Debug, Clone, Default)]
pub struct RowGraph {
    vertices: HashMap<VertexId, Vertex>,
    edges: HashMap<RelationId, Edge>,
}

impl RowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a vertex, creating it with `label` if it does not exist yet
    ///
    /// The label is ignored for vertices that already exist.
    pub fn get_or_create_vertex(&mut self, id: VertexId, label: Option<&str>) -> &mut Vertex {
        self.vertices
            .entry(id)
            .or_insert_with(|| Vertex::new(id, label.map(str::to_owned)))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(&id)
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Detach a vertex from the graph; its edges stay in place
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.vertices.remove(&id)
    }

    /// Add an edge between two existing vertices
    ///
    /// # Returns
    /// * `Ok(&mut Edge)` - the new edge, for attaching properties
    /// * `Err(GraphError::VertexNotFound)` if either endpoint is missing
    /// * `Err(GraphError::DuplicateEdge)` if the ID is already in use
    pub fn add_edge(
        &mut self,
        id: RelationId,
        label: &str,
        out_vertex: VertexId,
        in_vertex: VertexId,
    ) -> GraphResult<&mut Edge> {
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateEdge(id));
        }
        for endpoint in [out_vertex, in_vertex] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(GraphError::VertexNotFound(endpoint));
            }
        }

        if let Some(tail) = self.vertices.get_mut(&out_vertex) {
            tail.push_out_edge(id);
        }
        if let Some(head) = self.vertices.get_mut(&in_vertex) {
            head.push_in_edge(id);
        }

        Ok(self
            .edges
            .entry(id)
            .or_insert_with(|| Edge::new(id, out_vertex, in_vertex, label)))
    }

    pub fn edge(&self, id: RelationId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Edges incident to `vertex` in the given direction
    ///
    /// With `Direction::Both` a self-loop is returned twice, once per end.
    pub fn edges_of(&self, vertex: &Vertex, direction: Direction) -> Vec<&Edge> {
        let (out_ids, in_ids): (&[RelationId], &[RelationId]) = match direction {
            Direction::Out => (vertex.out_edge_ids(), &[]),
            Direction::In => (&[], vertex.in_edge_ids()),
            Direction::Both => (vertex.out_edge_ids(), vertex.in_edge_ids()),
        };
        out_ids
            .iter()
            .chain(in_ids.iter())
            .filter_map(|id| self.edges.get(id))
            .collect()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vid(raw: u64) -> VertexId {
        VertexId::from_raw(raw)
    }

    #[test]
    fn test_get_or_create_keeps_first_label() {
        let mut graph = RowGraph::new();

        graph.get_or_create_vertex(vid(8), Some("person"));
        let again = graph.get_or_create_vertex(vid(8), Some("company"));

        assert_eq!(again.label(), Some("person"));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_add_edge_links_both_endpoints() {
        let mut graph = RowGraph::new();
        graph.get_or_create_vertex(vid(8), Some("person"));
        graph.get_or_create_vertex(vid(16), None);

        let edge = graph.add_edge(RelationId(5), "knows", vid(8), vid(16)).unwrap();
        edge.set_property("since", json!(2020));

        let tail = graph.vertex(vid(8)).unwrap();
        let head = graph.vertex(vid(16)).unwrap();
        assert_eq!(tail.out_edge_ids(), &[RelationId(5)]);
        assert_eq!(head.in_edge_ids(), &[RelationId(5)]);

        let out = graph.edges_of(tail, Direction::Out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].get_property("since"), Some(&json!(2020)));
        assert!(graph.edges_of(tail, Direction::In).is_empty());
    }

    #[test]
    fn test_add_edge_missing_vertex() {
        let mut graph = RowGraph::new();
        graph.get_or_create_vertex(vid(8), None);

        let result = graph.add_edge(RelationId(5), "knows", vid(8), vid(16));
        assert_eq!(result.err(), Some(GraphError::VertexNotFound(vid(16))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_duplicate_id() {
        let mut graph = RowGraph::new();
        graph.get_or_create_vertex(vid(8), None);
        graph.get_or_create_vertex(vid(16), None);

        graph.add_edge(RelationId(5), "knows", vid(8), vid(16)).unwrap();
        let result = graph.add_edge(RelationId(5), "knows", vid(16), vid(8));

        assert_eq!(result.err(), Some(GraphError::DuplicateEdge(RelationId(5))));
        assert_eq!(graph.vertex(vid(16)).unwrap().out_edge_ids().len(), 0);
    }

    #[test]
    fn test_self_loop_both_directions() {
        let mut graph = RowGraph::new();
        graph.get_or_create_vertex(vid(8), None);
        graph.add_edge(RelationId(9), "likes", vid(8), vid(8)).unwrap();

        let vertex = graph.vertex(vid(8)).unwrap();
        assert_eq!(graph.edges_of(vertex, Direction::Both).len(), 2);
    }
}
