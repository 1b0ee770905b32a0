//! Thin ingestion adapter: interns event nodes and adds the resulting quad.
//!
//! Grounded in `original_source`'s `SordInserter`/`SerdNode`
//! boundary (`src/sord_inserter.c` / `src/model.c` in spirit: a node arrives
//! fully decoded as (kind, lexical, datatype?, lang?), is interned, and only
//! then assembled into a tuple). The core never parses or resolves surface
//! syntax — a caller's syntax reader decodes `base`/`prefix` declarations
//! and relative URIs before events reach [`IngestionSink`].

use rdf_model::{TermId, World};

use crate::error::{StorageError, StorageResult};
use crate::model::Model;
use rdf_model::Quad;

/// A fully-decoded node as handed to [`IngestionSink::statement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeEvent {
    Uri(String),
    Blank(String),
    Literal { lexical: String, datatype: Option<String>, language: Option<String> },
}

/// One decoded statement, as produced by a syntax reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementEvent {
    pub graph: Option<NodeEvent>,
    pub subject: NodeEvent,
    pub predicate: NodeEvent,
    pub object: NodeEvent,
}

/// Consumer of a decoded event stream.
pub trait IngestionSink {
    /// A `@base`-equivalent declaration. No-op here: URI resolution is a
    /// caller concern.
    fn base(&mut self, uri: &str);
    /// A prefix mapping declaration. No-op here, same reason as `base`.
    fn prefix(&mut self, name: &str, uri: &str);
    /// Intern `event`'s components and add the resulting quad. Interning
    /// failure (e.g. an empty URI) surfaces as an error; no partial add
    /// occurs — either every component interns and the quad is added, or
    /// nothing changes.
    fn statement(&mut self, event: StatementEvent) -> StorageResult<()>;
}

fn intern(world: &World, node: &NodeEvent) -> Result<TermId, rdf_model::RdfError> {
    match node {
        NodeEvent::Uri(iri) => world.get_uri(iri),
        NodeEvent::Blank(label) => world.get_blank(label),
        NodeEvent::Literal { lexical, datatype, language } => {
            let datatype = match datatype {
                Some(d) => Some(world.get_uri(d)?),
                None => None,
            };
            world.get_literal(lexical, datatype, language.as_deref())
        }
    }
}

fn intern_checked(world: &World, node: &NodeEvent) -> StorageResult<TermId> {
    intern(world, node).map_err(|e| StorageError::BadArgument(e.to_string()))
}

/// Feeds a decoded event stream straight into one [`Model`].
///
/// When built with [`ModelSink::with_graph_override`], every statement is
/// added to that graph regardless of its own `graph` field — the override
/// always wins.
pub struct ModelSink<'m> {
    model: &'m mut Model,
    graph_override: Option<TermId>,
}

impl<'m> ModelSink<'m> {
    pub fn new(model: &'m mut Model) -> Self {
        ModelSink { model, graph_override: None }
    }

    pub fn with_graph_override(model: &'m mut Model, graph: TermId) -> Self {
        ModelSink { model, graph_override: Some(graph) }
    }
}

impl<'m> IngestionSink for ModelSink<'m> {
    fn base(&mut self, _uri: &str) {}

    fn prefix(&mut self, _name: &str, _uri: &str) {}

    fn statement(&mut self, event: StatementEvent) -> StorageResult<()> {
        let world = self.model.world().clone();
        let s = intern_checked(&world, &event.subject)?;
        let p = intern_checked(&world, &event.predicate)?;
        let o = intern_checked(&world, &event.object)?;
        let g = match self.graph_override {
            Some(g) => g,
            None => match &event.graph {
                Some(node) => intern_checked(&world, node)?,
                None => TermId::NULL,
            },
        };
        self.model.add(Quad::new(s, p, o, g))?;
        Ok(())
    }
}
