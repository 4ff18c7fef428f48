//! One generation request: fetch the three sources, build the graph,
//! serialize it.

pub mod generator;

pub use generator::{
    generate, GenerateError, GenerateRequest, Generator, MissingCause, MissingSource,
    SerializedGraph, MISSING_DATA_MESSAGE,
};
pub use rdfgen::{GraphSummary, RdfFormat, Vocabulary};
pub use sources::{CollectingReporter, ErrorReporter, Role, TracingReporter};
