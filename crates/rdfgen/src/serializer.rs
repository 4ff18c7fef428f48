use oxrdf::{Graph, IriParseError};
use oxrdfxml::{RdfXmlParser, RdfXmlSerializer};
use oxttl::{NTriplesParser, NTriplesSerializer, TurtleParser, TurtleSerializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

use crate::vocab::Vocabulary;

/// Stem of the downloadable file name.
pub const FILE_STEM: &str = "drug_disease_target";

const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    #[default]
    #[serde(alias = "ttl")]
    Turtle,
    #[serde(alias = "nt")]
    NTriples,
    #[serde(alias = "xml")]
    RdfXml,
}

impl RdfFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::RdfXml => "application/rdf+xml",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
            RdfFormat::RdfXml => "rdf",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", FILE_STEM, self.file_extension())
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "ntriples",
            RdfFormat::RdfXml => "rdfxml",
        })
    }
}

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to write {format}: {source}")]
    Write {
        format: RdfFormat,
        #[source]
        source: io::Error,
    },
    #[error("invalid prefix IRI: {0}")]
    Prefix(#[from] IriParseError),
    #[error("failed to parse {format}: {message}")]
    Parse { format: RdfFormat, message: String },
}

/// Render the whole graph in one buffer.
pub fn serialize(graph: &Graph, format: RdfFormat, vocab: &Vocabulary) -> Result<Vec<u8>, SerializeError> {
    let write_err = |source: io::Error| SerializeError::Write { format, source };

    let bytes = match format {
        RdfFormat::Turtle => {
            let mut writer = TurtleSerializer::new()
                .with_prefix("ex", vocab.namespace())?
                .with_prefix("rdf", RDF_NAMESPACE)?
                .for_writer(Vec::new());
            for triple in graph {
                writer.serialize_triple(triple).map_err(write_err)?;
            }
            writer.finish().map_err(write_err)?
        }
        RdfFormat::NTriples => {
            let mut writer = NTriplesSerializer::new().for_writer(Vec::new());
            for triple in graph {
                writer.serialize_triple(triple).map_err(write_err)?;
            }
            writer.finish()
        }
        RdfFormat::RdfXml => {
            let mut writer = RdfXmlSerializer::new().for_writer(Vec::new());
            for triple in graph {
                writer.serialize_triple(triple).map_err(write_err)?;
            }
            writer.finish().map_err(write_err)?
        }
    };

    tracing::debug!(format = %format, triples = graph.len(), bytes = bytes.len(), "Serialized graph");

    Ok(bytes)
}

/// Read a serialized document back into a graph.
pub fn parse(bytes: &[u8], format: RdfFormat) -> Result<Graph, SerializeError> {
    let mut graph = Graph::new();
    match format {
        RdfFormat::Turtle => {
            for triple in TurtleParser::new().for_reader(bytes) {
                graph.insert(&triple.map_err(|e| parse_error(format, e))?);
            }
        }
        RdfFormat::NTriples => {
            for triple in NTriplesParser::new().for_reader(bytes) {
                graph.insert(&triple.map_err(|e| parse_error(format, e))?);
            }
        }
        RdfFormat::RdfXml => {
            for triple in RdfXmlParser::new().for_reader(bytes) {
                graph.insert(&triple.map_err(|e| parse_error(format, e))?);
            }
        }
    }

    Ok(graph)
}

fn parse_error(format: RdfFormat, e: impl fmt::Display) -> SerializeError {
    SerializeError::Parse {
        format,
        message: e.to_string(),
    }
}
