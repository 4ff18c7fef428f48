//! RDF side of the generator: vocabulary, cross-product graph builder and
//! serialization.

pub mod builder;
pub mod serializer;
pub mod vocab;

pub use builder::{BuildError, GraphBuilder, GraphSummary};
pub use serializer::{parse, serialize, RdfFormat, SerializeError, FILE_STEM};
pub use vocab::{entity_uri, Vocabulary, DEFAULT_NAMESPACE};

pub use oxrdf::Graph;
