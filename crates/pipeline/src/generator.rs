use rdfgen::{BuildError, GraphBuilder, GraphSummary, RdfFormat, SerializeError, Vocabulary};
use serde::{Deserialize, Serialize};
use sources::{ApiClient, ErrorReporter, FetchOutcome, Role, TracingReporter};
use std::borrow::Cow;
use thiserror::Error;

pub const MISSING_DATA_MESSAGE: &str = "Missing data from one of the APIs. Please check the inputs.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub drug_api: String,
    pub disease_api: String,
    pub target_api: String,
    #[serde(default)]
    pub format: Option<RdfFormat>,
}

impl GenerateRequest {
    pub fn new(
        drug_api: impl Into<String>,
        disease_api: impl Into<String>,
        target_api: impl Into<String>,
    ) -> Self {
        Self {
            drug_api: drug_api.into(),
            disease_api: disease_api.into(),
            target_api: target_api.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn url(&self, role: Role) -> &str {
        match role {
            Role::Drug => &self.drug_api,
            Role::Disease => &self.disease_api,
            Role::Target => &self.target_api,
        }
    }

    /// Every URL must be non-blank.
    pub fn validate(&self) -> Result<(), GenerateError> {
        match Role::ALL.into_iter().find(|role| self.url(*role).trim().is_empty()) {
            Some(role) => Err(GenerateError::MissingEndpoint(role)),
            None => Ok(()),
        }
    }
}

/// Why a source contributed no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cause", content = "reason", rename_all = "snake_case")]
pub enum MissingCause {
    Empty,
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingSource {
    pub role: Role,
    #[serde(flatten)]
    pub cause: MissingCause,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no {0} API URL provided")]
    MissingEndpoint(Role),
    #[error("{}", MISSING_DATA_MESSAGE)]
    MissingData { sources: Vec<MissingSource> },
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Serialized graph ready for preview or download.
#[derive(Debug, Clone)]
pub struct SerializedGraph {
    pub bytes: Vec<u8>,
    pub format: RdfFormat,
    pub summary: GraphSummary,
}

impl SerializedGraph {
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn file_name(&self) -> String {
        self.format.file_name()
    }

    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }
}

pub struct Generator {
    client: ApiClient,
    builder: GraphBuilder,
    default_format: RdfFormat,
}

impl Generator {
    pub fn new(client: ApiClient, vocab: Vocabulary, default_format: RdfFormat) -> Self {
        Self {
            client,
            builder: GraphBuilder::new(vocab),
            default_format,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.builder.vocabulary()
    }

    /// Run the whole pipeline for one request. Nothing is kept between calls.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        reporter: &dyn ErrorReporter,
    ) -> Result<SerializedGraph, GenerateError> {
        if let Err(e) = request.validate() {
            reporter.report(&e.to_string());
            return Err(e);
        }

        // Joined, so each outcome stays in its own role whatever finishes first.
        let (drugs, diseases, targets) = tokio::join!(
            self.client.fetch(Role::Drug, &request.drug_api, reporter),
            self.client.fetch(Role::Disease, &request.disease_api, reporter),
            self.client.fetch(Role::Target, &request.target_api, reporter),
        );

        let graph = match self
            .builder
            .build(drugs.records(), diseases.records(), targets.records())
        {
            Ok(graph) => graph,
            Err(BuildError::MissingData { roles }) => {
                let sources = roles
                    .into_iter()
                    .map(|role| {
                        let outcome = match role {
                            Role::Drug => &drugs,
                            Role::Disease => &diseases,
                            Role::Target => &targets,
                        };
                        missing_source(role, outcome)
                    })
                    .collect::<Vec<_>>();

                tracing::warn!(?sources, "Generation aborted: missing data");
                reporter.report(MISSING_DATA_MESSAGE);
                return Err(GenerateError::MissingData { sources });
            }
        };

        let format = request.format.unwrap_or(self.default_format);
        let summary = GraphSummary::of(&graph, self.vocabulary());

        let bytes = rdfgen::serialize(&graph, format, self.vocabulary()).map_err(|e| {
            reporter.report(&e.to_string());
            GenerateError::from(e)
        })?;

        tracing::info!(
            format = %format,
            triples = summary.total_triples,
            bytes = bytes.len(),
            "Generated RDF document"
        );

        Ok(SerializedGraph {
            bytes,
            format,
            summary,
        })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(ApiClient::default(), Vocabulary::default(), RdfFormat::default())
    }
}

fn missing_source(role: Role, outcome: &FetchOutcome) -> MissingSource {
    let cause = match outcome.error() {
        Some(e) => MissingCause::FetchFailed(e.to_string()),
        None => MissingCause::Empty,
    };
    MissingSource { role, cause }
}

/// Generate a Turtle document from three endpoints, reporting to the log.
pub async fn generate(
    drug_api: &str,
    disease_api: &str,
    target_api: &str,
) -> Result<SerializedGraph, GenerateError> {
    Generator::default()
        .generate(
            &GenerateRequest::new(drug_api, disease_api, target_api),
            &TracingReporter,
        )
        .await
}
