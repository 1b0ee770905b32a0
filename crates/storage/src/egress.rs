//! Thin egress adapter: the dual of [`crate::sink`].
//!
//! Grounded in `original_source`'s `sord_write`/serializer
//! boundary: a writer just walks `begin(model)` and decodes each quad's
//! terms back into events, leaving syntax formatting and the
//! inline-object decision (via [`crate::Model::is_inline_object`]) to the
//! caller.

use rdf_model::{Term, TermKind};

use crate::model::Model;
use crate::sink::{NodeEvent, StatementEvent};

// `datatype` is left `None` here; only `iter_events` resolves it, since
// that's the one call site with a `World` in scope to turn the handle back
// into a lexical form.
fn term_to_event(term: Term) -> NodeEvent {
    match term.kind {
        TermKind::Uri => NodeEvent::Uri(term.lexical.to_string()),
        TermKind::Blank => NodeEvent::Blank(term.lexical.to_string()),
        TermKind::Literal => NodeEvent::Literal {
            lexical: term.lexical.to_string(),
            datatype: None,
            language: term.language.as_deref().map(str::to_owned),
        },
    }
}

/// Decode every quad in `model` back into a [`StatementEvent`], in the
/// default order's storage order. A literal's datatype event, if any, is
/// resolved against `model`'s world since [`Term`] only carries the
/// datatype's handle.
pub fn iter_events(model: &Model) -> impl Iterator<Item = StatementEvent> + '_ {
    let world = model.world().clone();
    let mut iter = model.begin();
    std::iter::from_fn(move || {
        let quad = iter.next().ok().flatten()?;
        let resolve = |id| world.term(id).map(term_to_event).expect("quad references a live term");
        let subject = resolve(quad.s);
        let predicate = resolve(quad.p);
        let mut object = resolve(quad.o);
        if let NodeEvent::Literal { datatype, .. } = &mut object {
            if let Some(dt) = world.term(quad.o).and_then(|t| t.datatype) {
                *datatype = world.term(dt).map(|d| d.lexical.to_string());
            }
        }
        let graph = if quad.is_default_graph() { None } else { Some(resolve(quad.g)) };
        Some(StatementEvent { graph, subject, predicate, object })
    })
}
