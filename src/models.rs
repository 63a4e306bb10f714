//! Request and response models for the REST API.
//!
//! Field spelling follows the SKOS attribute names (`prefLabel`, `altLabels`,
//! `scopeNote`) so the JSON mirrors what consumers of the glossary expect.

use crate::skos::{Collection, Concept, ConceptScheme, SemanticRelation, SemanticRelationType};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Version response, also the container health probe body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    /// Server version.
    pub version: String,
}

impl Default for VersionResponse {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A concept scheme with its label resolved to one language.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConceptSchemeResponse {
    /// Scheme IRI.
    pub iri: String,
    /// Scheme notation.
    pub notation: String,
    /// Preferred label in the requested language.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Scope note.
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
}

impl ConceptSchemeResponse {
    /// Resolves a scheme to the requested language.
    #[must_use]
    pub fn from_scheme(scheme: &ConceptScheme, lang: &str) -> Self {
        Self {
            iri: scheme.iri.clone(),
            notation: scheme.notation.clone(),
            pref_label: scheme.pref_label(lang).to_string(),
            scope_note: scheme.scope_note.clone(),
        }
    }
}

/// A collection reference with its label resolved to one language.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityResponse {
    /// Entity IRI.
    pub iri: String,
    /// Entity notation.
    pub notation: String,
    /// Preferred label in the requested language.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
}

impl EntityResponse {
    /// Resolves a collection to the requested language.
    #[must_use]
    pub fn from_collection(collection: &Collection, lang: &str) -> Self {
        Self {
            iri: collection.iri.clone(),
            notation: collection.notation.clone(),
            pref_label: collection.pref_label(lang).to_string(),
        }
    }
}

/// A concept with labels and notes resolved to one language.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConceptResponse {
    /// Concept IRI.
    pub iri: String,
    /// Dataset-local identifier.
    pub identifier: String,
    /// Concept notation.
    pub notation: String,
    /// Preferred label in the requested language.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Alternative labels in the requested language.
    #[serde(rename = "altLabels")]
    pub alt_labels: Vec<String>,
    /// Scope note in the requested language.
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
}

impl ConceptResponse {
    /// Resolves a concept to the requested language.
    #[must_use]
    pub fn from_concept(concept: &Concept, lang: &str) -> Self {
        Self {
            iri: concept.iri.clone(),
            identifier: concept.identifier.clone(),
            notation: concept.notation.clone(),
            pref_label: concept.pref_label(lang).to_string(),
            alt_labels: concept.alt_labels_in(lang).to_vec(),
            scope_note: concept.scope_note(lang).to_string(),
        }
    }
}

/// A semantic relation between two concepts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelationResponse {
    /// Relation kind.
    #[serde(rename = "type")]
    pub relation_type: SemanticRelationType,
    /// IRI of the source concept.
    pub source_concept_iri: String,
    /// IRI of the target concept.
    pub target_concept_iri: String,
}

impl From<&SemanticRelation> for RelationResponse {
    fn from(relation: &SemanticRelation) -> Self {
        Self {
            relation_type: relation.relation_type,
            source_concept_iri: relation.source_concept_iri.clone(),
            target_concept_iri: relation.target_concept_iri.clone(),
        }
    }
}

/// A concept scheme with its member collections and concepts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FullConceptSchemeResponse {
    /// The scheme itself.
    #[serde(flatten)]
    pub scheme: ConceptSchemeResponse,
    /// Member collections.
    pub collections: Vec<EntityResponse>,
    /// Member concepts.
    pub concepts: Vec<ConceptResponse>,
}

/// A collection with its member collections and concepts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionResponse {
    /// The collection itself.
    #[serde(flatten)]
    pub collection: EntityResponse,
    /// Member sub-collections.
    pub collections: Vec<EntityResponse>,
    /// Member concepts.
    pub concepts: Vec<ConceptResponse>,
}

/// A concept with its schemes and relations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FullConceptResponse {
    /// The concept itself.
    #[serde(flatten)]
    pub concept: ConceptResponse,
    /// IRIs of the schemes the concept belongs to.
    pub concept_schemes: Vec<String>,
    /// Relations touching the concept, in either direction.
    pub relations: Vec<RelationResponse>,
}

/// Wrapper for the concepts-of-a-scheme listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConceptsResponse {
    /// The concepts.
    pub concepts: Vec<ConceptResponse>,
}

/// A dataset that was ingested successfully.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetReport {
    /// Dataset file name.
    pub name: String,
    /// Dataset download URL.
    pub url: String,
}

/// A dataset that failed to ingest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailedDatasetReport {
    /// Dataset file name.
    pub name: String,
    /// Dataset download URL.
    pub url: String,
    /// The error that stopped ingestion.
    pub error: String,
}

/// Outcome of an `init_datasets` run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InitDatasetsResponse {
    /// Datasets stored successfully.
    pub saved_datasets: Vec<DatasetReport>,
    /// Datasets that failed, with their errors.
    pub failed_datasets: Vec<FailedDatasetReport>,
}

/// Language selection for read endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LangQuery {
    /// Language code; defaults to English.
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Scheme selection for listing endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SchemeQuery {
    /// IRI of the concept scheme.
    pub concept_scheme_iri: String,
    /// Language code; defaults to English.
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Collection selection.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CollectionQuery {
    /// IRI of the collection.
    pub collection_iri: String,
    /// Language code; defaults to English.
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Concept selection.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ConceptQuery {
    /// IRI of the concept.
    pub concept_iri: String,
    /// Language code; defaults to English.
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Search parameters.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Term to match against preferred labels.
    pub search_term: String,
    /// Language code; defaults to English.
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Ingestion parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct InitDatasetsQuery {
    /// Re-download datasets even when a local copy exists.
    #[serde(default)]
    pub reload: bool,
}

fn default_lang() -> String {
    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skos::{LangListMap, LangMap};

    fn sample_concept() -> Concept {
        let mut pref_labels = LangMap::new();
        pref_labels.insert("en".to_string(), "Wheat".to_string());
        pref_labels.insert("de".to_string(), "Weizen".to_string());
        let mut alt_labels = LangListMap::new();
        alt_labels.insert("en".to_string(), vec!["Common wheat".to_string()]);
        let mut scope_notes = LangMap::new();
        scope_notes.insert("en".to_string(), "Cereal".to_string());

        Concept {
            iri: "https://example.org/concept/wheat".to_string(),
            identifier: "0111".to_string(),
            notation: "0111".to_string(),
            pref_labels,
            alt_labels,
            scope_notes,
        }
    }

    #[test]
    fn test_version_response_default() {
        let version = VersionResponse::default();
        assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_concept_response_resolves_language() {
        let concept = sample_concept();

        let response = ConceptResponse::from_concept(&concept, "de");
        assert_eq!(response.pref_label, "Weizen");
        // Falls back to English where German is missing.
        assert_eq!(response.alt_labels, ["Common wheat"]);
        assert_eq!(response.scope_note, "Cereal");
    }

    #[test]
    fn test_concept_response_json_keys() {
        let response = ConceptResponse::from_concept(&sample_concept(), "en");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"prefLabel\":\"Wheat\""));
        assert!(json.contains("\"altLabels\":[\"Common wheat\"]"));
        assert!(json.contains("\"scopeNote\":\"Cereal\""));
        assert!(json.contains("\"identifier\":\"0111\""));
    }

    #[test]
    fn test_relation_response_json_type_key() {
        let relation = SemanticRelation {
            relation_type: SemanticRelationType::Broader,
            source_concept_iri: "a".to_string(),
            target_concept_iri: "b".to_string(),
        };
        let json = serde_json::to_string(&RelationResponse::from(&relation)).unwrap();

        assert!(json.contains("\"type\":\"broader\""));
        assert!(json.contains("\"source_concept_iri\":\"a\""));
    }

    #[test]
    fn test_full_scheme_response_flattens_entity_fields() {
        let scheme = ConceptScheme {
            iri: "https://example.org/scheme".to_string(),
            notation: "S".to_string(),
            scope_note: String::new(),
            pref_labels: LangMap::new(),
        };
        let response = FullConceptSchemeResponse {
            scheme: ConceptSchemeResponse::from_scheme(&scheme, "en"),
            collections: vec![],
            concepts: vec![],
        };
        let json = serde_json::to_string(&response).unwrap();

        // Flattened: iri sits at the top level, not under "scheme".
        assert!(json.contains("\"iri\":\"https://example.org/scheme\""));
        assert!(!json.contains("\"scheme\""));
    }

    #[test]
    fn test_lang_query_defaults_to_english() {
        let query: LangQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.lang, "en");
    }
}
