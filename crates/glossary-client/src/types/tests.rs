use super::*;

#[test]
fn test_deserialize_version() {
    let json = r#"{"version":"0.2.0"}"#;
    let version: VersionResponse = serde_json::from_str(json).unwrap();
    assert_eq!(version.version, "0.2.0");
}

#[test]
fn test_deserialize_concept_scheme() {
    let json = r#"{
        "iri": "http://example.org/scheme",
        "notation": "CS",
        "prefLabel": "Scheme",
        "scopeNote": "A test scheme"
    }"#;
    let scheme: ConceptScheme = serde_json::from_str(json).unwrap();
    assert_eq!(scheme.iri, "http://example.org/scheme");
    assert_eq!(scheme.pref_label, "Scheme");
    assert_eq!(scheme.scope_note, "A test scheme");
}

#[test]
fn test_deserialize_concept_camel_case_keys() {
    let json = r#"{
        "iri": "http://example.org/c1",
        "identifier": "c1",
        "notation": "C1",
        "prefLabel": "Concept one",
        "altLabels": ["First concept"],
        "scopeNote": ""
    }"#;
    let concept: Concept = serde_json::from_str(json).unwrap();
    assert_eq!(concept.pref_label, "Concept one");
    assert_eq!(concept.alt_labels, vec!["First concept"]);
    assert_eq!(concept.scope_note, "");
}

#[test]
fn test_deserialize_full_concept() {
    let json = r#"{
        "iri": "http://example.org/c1",
        "identifier": "c1",
        "notation": "C1",
        "prefLabel": "Concept one",
        "altLabels": [],
        "scopeNote": "",
        "concept_schemes": ["http://example.org/scheme"],
        "relations": [
            {
                "type": "broader",
                "source_concept_iri": "http://example.org/c1",
                "target_concept_iri": "http://example.org/c2"
            }
        ]
    }"#;
    let concept: FullConcept = serde_json::from_str(json).unwrap();
    assert_eq!(concept.concept_schemes.len(), 1);
    assert_eq!(concept.relations[0].relation_type, "broader");
    assert_eq!(concept.relations[0].target_concept_iri, "http://example.org/c2");
}

#[test]
fn test_deserialize_collection() {
    let json = r#"{
        "iri": "http://example.org/col",
        "notation": "COL",
        "prefLabel": "Collection",
        "collections": [
            {"iri": "http://example.org/sub", "notation": "SUB", "prefLabel": "Sub"}
        ],
        "concepts": []
    }"#;
    let collection: Collection = serde_json::from_str(json).unwrap();
    assert_eq!(collection.collections.len(), 1);
    assert_eq!(collection.collections[0].pref_label, "Sub");
    assert!(collection.concepts.is_empty());
}

#[test]
fn test_deserialize_init_datasets_report() {
    let json = r#"{
        "saved_datasets": [
            {"name": "sample.rdf", "url": "http://example.org/sample.rdf"}
        ],
        "failed_datasets": [
            {"name": "broken.rdf", "url": "http://example.org/broken.rdf", "error": "timeout"}
        ]
    }"#;
    let report: InitDatasetsReport = serde_json::from_str(json).unwrap();
    assert_eq!(report.saved_datasets.len(), 1);
    assert_eq!(report.failed_datasets[0].error, "timeout");
}

#[test]
fn test_serialize_round_trip() {
    let concept = Concept {
        iri: "http://example.org/c1".to_string(),
        identifier: "c1".to_string(),
        notation: "C1".to_string(),
        pref_label: "Concept one".to_string(),
        alt_labels: vec!["First".to_string()],
        scope_note: "note".to_string(),
    };
    let json = serde_json::to_string(&concept).unwrap();
    assert!(json.contains("\"prefLabel\""));
    assert!(json.contains("\"altLabels\""));
    let back: Concept = serde_json::from_str(&json).unwrap();
    assert_eq!(back.pref_label, concept.pref_label);
}
