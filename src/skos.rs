//! SKOS domain types.
//!
//! The glossary stores SKOS concept schemes, concepts, collections and the
//! semantic relations between concepts (see
//! <https://www.w3.org/TR/skos-reference/>). Labels and notes are kept per
//! language code; lookups fall back to English and then to an empty value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Labels or notes keyed by language code.
pub type LangMap = BTreeMap<String, String>;

/// List-valued labels (e.g. altLabels) keyed by language code.
pub type LangListMap = BTreeMap<String, Vec<String>>;

/// Resolves a language-keyed attribute, falling back to English and then to
/// an empty string.
pub fn get_in_language<'a>(attribute: &'a LangMap, lang: &str) -> &'a str {
    attribute
        .get(lang)
        .or_else(|| attribute.get("en"))
        .map_or("", String::as_str)
}

/// Resolves a list-valued language-keyed attribute, falling back to English
/// and then to an empty list.
pub fn get_in_language_list<'a>(attribute: &'a LangListMap, lang: &str) -> &'a [String] {
    attribute
        .get(lang)
        .or_else(|| attribute.get("en"))
        .map_or(&[], Vec::as_slice)
}

/// Discriminator for the polymorphic member table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    /// A SKOS concept.
    Concept,
    /// A SKOS collection.
    Collection,
}

impl MemberType {
    /// Returns the database representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Collection => "collection",
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concept" => Ok(Self::Concept),
            "collection" => Ok(Self::Collection),
            other => Err(format!("unknown member type: {other}")),
        }
    }
}

/// Kinds of SKOS semantic relations between concepts.
///
/// `broader`/`narrower` assert a direct hierarchical link; the transitive
/// variants carry inferred ancestor/descendant links; `related` is the
/// associative link. The string forms match the SKOS core element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SemanticRelationType {
    /// Direct hierarchical link to a more general concept.
    Broader,
    /// Direct hierarchical link to a more specific concept.
    Narrower,
    /// Associative link.
    Related,
    /// Transitive closure of `broader`.
    BroaderTransitive,
    /// Transitive closure of `narrower`.
    NarrowerTransitive,
}

impl SemanticRelationType {
    /// All relation kinds, in the order they are scanned during parsing.
    pub const ALL: [Self; 5] = [
        Self::Broader,
        Self::Narrower,
        Self::Related,
        Self::BroaderTransitive,
        Self::NarrowerTransitive,
    ];

    /// Returns the SKOS core element name for this relation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broader => "broader",
            Self::Narrower => "narrower",
            Self::Related => "related",
            Self::BroaderTransitive => "broaderTransitive",
            Self::NarrowerTransitive => "narrowerTransitive",
        }
    }
}

impl fmt::Display for SemanticRelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticRelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broader" => Ok(Self::Broader),
            "narrower" => Ok(Self::Narrower),
            "related" => Ok(Self::Related),
            "broaderTransitive" => Ok(Self::BroaderTransitive),
            "narrowerTransitive" => Ok(Self::NarrowerTransitive),
            other => Err(format!("unknown semantic relation type: {other}")),
        }
    }
}

/// An aggregation of SKOS concepts, typically one per ingested dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptScheme {
    /// Internationalized Resource Identifier of the scheme.
    pub iri: String,
    /// Scheme notation.
    pub notation: String,
    /// Scope note.
    pub scope_note: String,
    /// Preferred labels per language.
    pub pref_labels: LangMap,
}

impl ConceptScheme {
    /// Preferred label in `lang`, with English fallback.
    #[must_use]
    pub fn pref_label(&self, lang: &str) -> &str {
        get_in_language(&self.pref_labels, lang)
    }
}

/// A unit of thought within a knowledge organization system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Internationalized Resource Identifier of the concept.
    pub iri: String,
    /// Dataset-local identifier.
    pub identifier: String,
    /// Concept notation.
    pub notation: String,
    /// Preferred labels per language.
    pub pref_labels: LangMap,
    /// Alternative labels per language.
    pub alt_labels: LangListMap,
    /// Scope notes per language.
    pub scope_notes: LangMap,
}

impl Concept {
    /// Preferred label in `lang`, with English fallback.
    #[must_use]
    pub fn pref_label(&self, lang: &str) -> &str {
        get_in_language(&self.pref_labels, lang)
    }

    /// Alternative labels in `lang`, with English fallback.
    #[must_use]
    pub fn alt_labels_in(&self, lang: &str) -> &[String] {
        get_in_language_list(&self.alt_labels, lang)
    }

    /// Scope note in `lang`, with English fallback.
    #[must_use]
    pub fn scope_note(&self, lang: &str) -> &str {
        get_in_language(&self.scope_notes, lang)
    }
}

/// A labeled group of SKOS concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Internationalized Resource Identifier of the collection.
    pub iri: String,
    /// Collection notation.
    pub notation: String,
    /// Preferred labels per language.
    pub pref_labels: LangMap,
}

impl Collection {
    /// Preferred label in `lang`, with English fallback.
    #[must_use]
    pub fn pref_label(&self, lang: &str) -> &str {
        get_in_language(&self.pref_labels, lang)
    }
}

/// A typed link between two concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRelation {
    /// Relation kind.
    #[serde(rename = "type")]
    pub relation_type: SemanticRelationType,
    /// IRI of the source concept.
    pub source_concept_iri: String,
    /// IRI of the target concept.
    pub target_concept_iri: String,
}

/// Membership of a concept or collection in a concept scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InScheme {
    /// IRI of the concept scheme.
    pub scheme_iri: String,
    /// IRI of the member.
    pub member_iri: String,
}

/// Membership of a concept or collection in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InCollection {
    /// IRI of the enclosing collection.
    pub collection_iri: String,
    /// IRI of the member.
    pub member_iri: String,
}

/// All entities extracted from a single RDF dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDataset {
    /// Concept schemes.
    pub concept_schemes: Vec<ConceptScheme>,
    /// Concepts.
    pub concepts: Vec<Concept>,
    /// Collections.
    pub collections: Vec<Collection>,
    /// Semantic relations between concepts.
    pub semantic_relations: Vec<SemanticRelation>,
    /// Scheme membership rows.
    pub in_schemes: Vec<InScheme>,
    /// Collection membership rows.
    pub in_collections: Vec<InCollection>,
}

impl ParsedDataset {
    /// Returns true when the dataset produced no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concept_schemes.is_empty()
            && self.concepts.is_empty()
            && self.collections.is_empty()
    }
}
