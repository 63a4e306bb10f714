//! Response types for the glossary API.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Server version response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Server version.
    pub version: String,
}

/// A concept scheme with its label resolved to one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptScheme {
    /// Scheme IRI.
    pub iri: String,
    /// Scheme notation.
    pub notation: String,
    /// Preferred label.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Scope note.
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
}

/// A concept scheme together with its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullConceptScheme {
    /// Scheme IRI.
    pub iri: String,
    /// Scheme notation.
    pub notation: String,
    /// Preferred label.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Scope note.
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
    /// Member collections.
    pub collections: Vec<Entity>,
    /// Member concepts.
    pub concepts: Vec<Concept>,
}

/// A collection reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Entity IRI.
    pub iri: String,
    /// Entity notation.
    pub notation: String,
    /// Preferred label.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
}

/// A concept with labels resolved to one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    /// Concept IRI.
    pub iri: String,
    /// Dataset-local identifier.
    pub identifier: String,
    /// Concept notation.
    pub notation: String,
    /// Preferred label.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Alternative labels.
    #[serde(rename = "altLabels")]
    pub alt_labels: Vec<String>,
    /// Scope note.
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
}

/// Concepts-of-a-scheme listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptsList {
    /// The concepts.
    pub concepts: Vec<Concept>,
}

/// A semantic relation between two concepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Relation kind (`broader`, `narrower`, `related`, ...).
    #[serde(rename = "type")]
    pub relation_type: String,
    /// IRI of the source concept.
    pub source_concept_iri: String,
    /// IRI of the target concept.
    pub target_concept_iri: String,
}

/// A concept together with its schemes and relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullConcept {
    /// Concept IRI.
    pub iri: String,
    /// Dataset-local identifier.
    pub identifier: String,
    /// Concept notation.
    pub notation: String,
    /// Preferred label.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Alternative labels.
    #[serde(rename = "altLabels")]
    pub alt_labels: Vec<String>,
    /// Scope note.
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
    /// IRIs of the schemes the concept belongs to.
    pub concept_schemes: Vec<String>,
    /// Relations touching the concept.
    pub relations: Vec<Relation>,
}

/// A collection together with its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Collection IRI.
    pub iri: String,
    /// Collection notation.
    pub notation: String,
    /// Preferred label.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Member sub-collections.
    pub collections: Vec<Entity>,
    /// Member concepts.
    pub concepts: Vec<Concept>,
}

/// A dataset that was ingested successfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Dataset file name.
    pub name: String,
    /// Dataset download URL.
    pub url: String,
}

/// A dataset that failed to ingest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedDatasetReport {
    /// Dataset file name.
    pub name: String,
    /// Dataset download URL.
    pub url: String,
    /// The error that stopped ingestion.
    pub error: String,
}

/// Outcome of an `init_datasets` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitDatasetsReport {
    /// Datasets stored successfully.
    pub saved_datasets: Vec<DatasetReport>,
    /// Datasets that failed, with their errors.
    pub failed_datasets: Vec<FailedDatasetReport>,
}
