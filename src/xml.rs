//! SKOS RDF/XML parsing.
//!
//! Datasets arrive as RDF/XML with entities in the SKOS core namespace.
//! Parsing is tolerant: missing notations, notes or labels default to empty
//! values, and label elements without an `xml:lang` attribute are skipped.

use crate::skos::{
    Collection, Concept, ConceptScheme, InCollection, InScheme, LangListMap, LangMap,
    ParsedDataset, SemanticRelation, SemanticRelationType,
};
use roxmltree::{Document, Node};
use thiserror::Error;

/// SKOS core namespace.
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// XML namespace (carries the `lang` attribute).
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Errors raised while parsing a dataset.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Malformed(#[from] roxmltree::Error),
}

/// Returns an `rdf:`-namespaced attribute, or empty when absent.
fn rdf_attr<'a>(node: Node<'a, '_>, name: &str) -> &'a str {
    node.attribute((RDF_NS, name)).unwrap_or("")
}

/// Returns true when `node` is a SKOS element with the given local name.
fn is_skos(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(SKOS_NS)
        && node.tag_name().name() == name
}

/// Text of the first SKOS child with the given name, or empty.
fn skos_child_text(node: Node<'_, '_>, name: &str) -> String {
    node.children()
        .find(|child| is_skos(*child, name))
        .and_then(|child| child.text())
        .unwrap_or("")
        .to_string()
}

/// Collects `{lang -> text}` over all SKOS children with the given name.
fn skos_lang_map(node: Node<'_, '_>, name: &str) -> LangMap {
    node.children()
        .filter(|child| is_skos(*child, name))
        .filter_map(|child| {
            let lang = child.attribute((XML_NS, "lang"))?;
            Some((lang.to_string(), child.text().unwrap_or("").to_string()))
        })
        .collect()
}

/// Collects `{lang -> [text]}` over all SKOS children with the given name.
fn skos_lang_list_map(node: Node<'_, '_>, name: &str) -> LangListMap {
    let mut map = LangListMap::new();
    for child in node.children().filter(|child| is_skos(*child, name)) {
        let Some(lang) = child.attribute((XML_NS, "lang")) else {
            continue;
        };
        map.entry(lang.to_string())
            .or_default()
            .push(child.text().unwrap_or("").to_string());
    }
    map
}

/// Collects `rdf:resource` attributes over all SKOS children with the given
/// name, skipping children without the attribute.
fn skos_child_resources(node: Node<'_, '_>, name: &str) -> Vec<String> {
    node.children()
        .filter(|child| is_skos(*child, name))
        .map(|child| rdf_attr(child, "resource").to_string())
        .filter(|resource| !resource.is_empty())
        .collect()
}

/// Text of the first child named `identifier`, in any namespace. Dataset
/// publishers use differing vocabularies (dc, dct, custom) for this field.
fn identifier_text(node: Node<'_, '_>) -> String {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == "identifier")
        .and_then(|child| child.text())
        .unwrap_or("")
        .to_string()
}

fn concept_scheme_from_element(element: Node<'_, '_>) -> ConceptScheme {
    ConceptScheme {
        iri: rdf_attr(element, "about").to_string(),
        notation: skos_child_text(element, "notation"),
        scope_note: skos_child_text(element, "scopeNote"),
        pref_labels: skos_lang_map(element, "prefLabel"),
    }
}

fn concept_from_element(element: Node<'_, '_>) -> Concept {
    Concept {
        iri: rdf_attr(element, "about").to_string(),
        identifier: identifier_text(element),
        notation: skos_child_text(element, "notation"),
        pref_labels: skos_lang_map(element, "prefLabel"),
        alt_labels: skos_lang_list_map(element, "altLabel"),
        scope_notes: skos_lang_map(element, "scopeNote"),
    }
}

fn collection_from_element(element: Node<'_, '_>) -> Collection {
    Collection {
        iri: rdf_attr(element, "about").to_string(),
        notation: skos_child_text(element, "notation"),
        pref_labels: skos_lang_map(element, "prefLabel"),
    }
}

fn semantic_relations_from_element(element: Node<'_, '_>) -> Vec<SemanticRelation> {
    let source_iri = rdf_attr(element, "about");
    SemanticRelationType::ALL
        .iter()
        .flat_map(|&relation_type| {
            skos_child_resources(element, relation_type.as_str())
                .into_iter()
                .map(move |target_iri| SemanticRelation {
                    relation_type,
                    source_concept_iri: source_iri.to_string(),
                    target_concept_iri: target_iri,
                })
        })
        .collect()
}

fn in_schemes_from_element(element: Node<'_, '_>) -> Vec<InScheme> {
    let member_iri = rdf_attr(element, "about");
    skos_child_resources(element, "inScheme")
        .into_iter()
        .map(|scheme_iri| InScheme {
            scheme_iri,
            member_iri: member_iri.to_string(),
        })
        .collect()
}

fn in_collections_from_element(element: Node<'_, '_>) -> Vec<InCollection> {
    let collection_iri = rdf_attr(element, "about");
    skos_child_resources(element, "member")
        .into_iter()
        .map(|member_iri| InCollection {
            collection_iri: collection_iri.to_string(),
            member_iri,
        })
        .collect()
}

/// Parses a SKOS RDF/XML document into its glossary entities.
///
/// A well-formed document without SKOS entities yields an empty dataset.
///
/// # Errors
/// Returns [`XmlError::Malformed`] for non-XML input.
pub fn parse_dataset(xml: &str) -> Result<ParsedDataset, XmlError> {
    let document = Document::parse(xml)?;
    let root = document.root_element();

    let scheme_elements: Vec<Node<'_, '_>> = root
        .children()
        .filter(|node| is_skos(*node, "ConceptScheme"))
        .collect();
    let concept_elements: Vec<Node<'_, '_>> = root
        .children()
        .filter(|node| is_skos(*node, "Concept"))
        .collect();
    let collection_elements: Vec<Node<'_, '_>> = root
        .children()
        .filter(|node| is_skos(*node, "Collection"))
        .collect();

    let concept_schemes = scheme_elements
        .iter()
        .map(|element| concept_scheme_from_element(*element))
        .collect::<Vec<_>>();
    let concepts = concept_elements
        .iter()
        .map(|element| concept_from_element(*element))
        .collect::<Vec<_>>();
    let collections = collection_elements
        .iter()
        .map(|element| collection_from_element(*element))
        .collect::<Vec<_>>();

    let semantic_relations = concept_elements
        .iter()
        .flat_map(|element| semantic_relations_from_element(*element))
        .collect();

    // Both concepts and collections can sit in a scheme or a collection.
    let member_elements = collection_elements.iter().chain(concept_elements.iter());
    let mut in_schemes = Vec::new();
    let mut in_collections = Vec::new();
    for element in member_elements {
        in_schemes.extend(in_schemes_from_element(*element));
        in_collections.extend(in_collections_from_element(*element));
    }

    Ok(ParsedDataset {
        concept_schemes,
        concepts,
        collections,
        semantic_relations,
        in_schemes,
        in_collections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:skos="http://www.w3.org/2004/02/skos/core#"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <skos:ConceptScheme rdf:about="https://example.org/scheme/crops">
    <skos:notation>CROPS</skos:notation>
    <skos:scopeNote>Test crop classification</skos:scopeNote>
    <skos:prefLabel xml:lang="en">Crops</skos:prefLabel>
    <skos:prefLabel xml:lang="de">Kulturen</skos:prefLabel>
  </skos:ConceptScheme>
  <skos:Collection rdf:about="https://example.org/collection/cereals">
    <skos:notation>CER</skos:notation>
    <skos:prefLabel xml:lang="en">Cereals</skos:prefLabel>
    <skos:inScheme rdf:resource="https://example.org/scheme/crops"/>
    <skos:member rdf:resource="https://example.org/concept/wheat"/>
    <skos:member rdf:resource="https://example.org/concept/barley"/>
  </skos:Collection>
  <skos:Concept rdf:about="https://example.org/concept/wheat">
    <dc:identifier>0111</dc:identifier>
    <skos:notation>0111</skos:notation>
    <skos:prefLabel xml:lang="en">Wheat</skos:prefLabel>
    <skos:altLabel xml:lang="en">Common wheat</skos:altLabel>
    <skos:altLabel xml:lang="en">Bread wheat</skos:altLabel>
    <skos:scopeNote xml:lang="en">Triticum aestivum</skos:scopeNote>
    <skos:inScheme rdf:resource="https://example.org/scheme/crops"/>
    <skos:broader rdf:resource="https://example.org/concept/barley"/>
    <skos:related rdf:resource="https://example.org/concept/barley"/>
  </skos:Concept>
  <skos:Concept rdf:about="https://example.org/concept/barley">
    <skos:prefLabel xml:lang="en">Barley</skos:prefLabel>
    <skos:inScheme rdf:resource="https://example.org/scheme/crops"/>
    <skos:narrower rdf:resource="https://example.org/concept/wheat"/>
  </skos:Concept>
</rdf:RDF>
"#;

    #[test]
    fn test_parse_concept_scheme() {
        let dataset = parse_dataset(SAMPLE).expect("should parse");

        assert_eq!(dataset.concept_schemes.len(), 1);
        let scheme = &dataset.concept_schemes[0];
        assert_eq!(scheme.iri, "https://example.org/scheme/crops");
        assert_eq!(scheme.notation, "CROPS");
        assert_eq!(scheme.scope_note, "Test crop classification");
        assert_eq!(scheme.pref_label("de"), "Kulturen");
        assert_eq!(scheme.pref_label("fr"), "Crops");
    }

    #[test]
    fn test_parse_concepts() {
        let dataset = parse_dataset(SAMPLE).expect("should parse");

        assert_eq!(dataset.concepts.len(), 2);
        let wheat = &dataset.concepts[0];
        assert_eq!(wheat.iri, "https://example.org/concept/wheat");
        assert_eq!(wheat.identifier, "0111");
        assert_eq!(wheat.notation, "0111");
        assert_eq!(wheat.alt_labels_in("en"), ["Common wheat", "Bread wheat"]);
        assert_eq!(wheat.scope_note("en"), "Triticum aestivum");

        // Missing optional fields default to empty.
        let barley = &dataset.concepts[1];
        assert_eq!(barley.identifier, "");
        assert_eq!(barley.notation, "");
        assert!(barley.alt_labels_in("en").is_empty());
    }

    #[test]
    fn test_parse_collection_and_membership() {
        let dataset = parse_dataset(SAMPLE).expect("should parse");

        assert_eq!(dataset.collections.len(), 1);
        assert_eq!(dataset.collections[0].notation, "CER");

        // Scheme membership: the collection plus both concepts.
        assert_eq!(dataset.in_schemes.len(), 3);
        assert!(dataset.in_schemes.iter().all(|in_scheme| {
            in_scheme.scheme_iri == "https://example.org/scheme/crops"
        }));

        assert_eq!(dataset.in_collections.len(), 2);
        assert_eq!(
            dataset.in_collections[0].collection_iri,
            "https://example.org/collection/cereals"
        );
    }

    #[test]
    fn test_parse_semantic_relations() {
        let dataset = parse_dataset(SAMPLE).expect("should parse");

        assert_eq!(dataset.semantic_relations.len(), 3);
        let broader = dataset
            .semantic_relations
            .iter()
            .find(|relation| relation.relation_type == SemanticRelationType::Broader)
            .expect("broader relation");
        assert_eq!(broader.source_concept_iri, "https://example.org/concept/wheat");
        assert_eq!(broader.target_concept_iri, "https://example.org/concept/barley");

        assert!(dataset.semantic_relations.iter().any(|relation| {
            relation.relation_type == SemanticRelationType::Narrower
                && relation.source_concept_iri == "https://example.org/concept/barley"
        }));
    }

    #[test]
    fn test_parse_malformed_document() {
        assert!(matches!(
            parse_dataset("<rdf:RDF"),
            Err(XmlError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_document_without_entities_is_empty() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
        let dataset = parse_dataset(xml).expect("should parse");
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_label_without_lang_is_skipped() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                              xmlns:skos="http://www.w3.org/2004/02/skos/core#">
          <skos:Concept rdf:about="https://example.org/concept/x">
            <skos:prefLabel>No language</skos:prefLabel>
            <skos:prefLabel xml:lang="en">With language</skos:prefLabel>
          </skos:Concept>
        </rdf:RDF>"#;

        let dataset = parse_dataset(xml).expect("should parse");
        assert_eq!(dataset.concepts[0].pref_labels.len(), 1);
        assert_eq!(dataset.concepts[0].pref_label("en"), "With language");
    }
}
