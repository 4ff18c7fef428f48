use oxrdf::vocab::rdf;
use oxrdf::{Graph, TripleRef};
use serde::Serialize;
use sources::{Record, Role};
use thiserror::Error;

use crate::vocab::Vocabulary;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("no records for: {}", format_roles(.roles))]
    MissingData { roles: Vec<Role> },
}

fn format_roles(roles: &[Role]) -> String {
    roles.iter().map(Role::label).collect::<Vec<_>>().join(", ")
}

/// Links every drug to every disease and every target.
pub struct GraphBuilder {
    vocab: Vocabulary,
}

impl GraphBuilder {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Build the cross-product graph, or fail if any input is empty.
    pub fn build(
        &self,
        drugs: &[Record],
        diseases: &[Record],
        targets: &[Record],
    ) -> Result<Graph, BuildError> {
        let roles: Vec<Role> = [
            (Role::Drug, drugs.is_empty()),
            (Role::Disease, diseases.is_empty()),
            (Role::Target, targets.is_empty()),
        ]
        .into_iter()
        .filter_map(|(role, empty)| empty.then_some(role))
        .collect();

        if !roles.is_empty() {
            return Err(BuildError::MissingData { roles });
        }

        let mut graph = Graph::new();

        for drug in drugs {
            let drug_uri = self.vocab.entity(drug);
            graph.insert(TripleRef::new(drug_uri.as_ref(), rdf::TYPE, self.vocab.drug()));

            for disease in diseases {
                let disease_uri = self.vocab.entity(disease);
                graph.insert(TripleRef::new(
                    drug_uri.as_ref(),
                    self.vocab.treats(),
                    disease_uri.as_ref(),
                ));
            }

            for target in targets {
                let target_uri = self.vocab.entity(target);
                graph.insert(TripleRef::new(
                    drug_uri.as_ref(),
                    self.vocab.affects(),
                    target_uri.as_ref(),
                ));
            }
        }

        tracing::info!(
            drugs = drugs.len(),
            diseases = diseases.len(),
            targets = targets.len(),
            triples = graph.len(),
            "Built drug-disease-target graph"
        );

        Ok(graph)
    }
}

/// Triple counts by predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub type_triples: usize,
    pub treats_triples: usize,
    pub affects_triples: usize,
    pub total_triples: usize,
}

impl GraphSummary {
    pub fn of(graph: &Graph, vocab: &Vocabulary) -> Self {
        Self {
            type_triples: graph.triples_for_predicate(rdf::TYPE).count(),
            treats_triples: graph.triples_for_predicate(vocab.treats()).count(),
            affects_triples: graph.triples_for_predicate(vocab.affects()).count(),
            total_triples: graph.len(),
        }
    }
}
