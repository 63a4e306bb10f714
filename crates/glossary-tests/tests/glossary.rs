//! Glossary query endpoint tests.
//!
//! These only read, so they are safe to run against a populated instance.

use glossary_client::Error;
use glossary_tests::connect_or_skip;

#[tokio::test]
async fn test_list_schemes() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let schemes = client.list_schemes("en").await.expect("Failed to list schemes");

    for scheme in &schemes {
        assert!(!scheme.iri.is_empty());
    }
}

#[tokio::test]
async fn test_scheme_members_match_concept_listing() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let schemes = client.list_schemes("en").await.expect("Failed to list schemes");
    let Some(scheme) = schemes.first() else {
        return;
    };

    let full = client
        .get_scheme(&scheme.iri, "en")
        .await
        .expect("Failed to get scheme");
    let listing = client
        .list_concepts(&scheme.iri, "en")
        .await
        .expect("Failed to list concepts");

    assert_eq!(full.iri, scheme.iri);
    assert_eq!(full.concepts.len(), listing.concepts.len());
}

#[tokio::test]
async fn test_concept_belongs_to_its_scheme() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let schemes = client.list_schemes("en").await.expect("Failed to list schemes");
    let Some(scheme) = schemes.first() else {
        return;
    };
    let listing = client
        .list_concepts(&scheme.iri, "en")
        .await
        .expect("Failed to list concepts");
    let Some(concept) = listing.concepts.first() else {
        return;
    };

    let full = client
        .get_concept(&concept.iri, "en")
        .await
        .expect("Failed to get concept");

    assert_eq!(full.iri, concept.iri);
    assert!(full.concept_schemes.contains(&scheme.iri));
    for relation in &full.relations {
        assert!(
            relation.source_concept_iri == full.iri || relation.target_concept_iri == full.iri
        );
    }
}

#[tokio::test]
async fn test_unknown_scheme_is_not_found() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let result = client
        .get_scheme("http://example.invalid/no-such-scheme", "en")
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_unknown_concept_is_not_found() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let result = client
        .get_concept("http://example.invalid/no-such-concept", "en")
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_search_nonsense_term_is_empty() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let found = client
        .search("zz-no-concept-has-this-label-zz", "en")
        .await
        .expect("Search failed");

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_search_matches_carry_labels() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    let schemes = client.list_schemes("en").await.expect("Failed to list schemes");
    let Some(scheme) = schemes.first() else {
        return;
    };
    let listing = client
        .list_concepts(&scheme.iri, "en")
        .await
        .expect("Failed to list concepts");
    let Some(concept) = listing.concepts.iter().find(|c| !c.pref_label.is_empty()) else {
        return;
    };

    let found = client
        .search(&concept.pref_label, "en")
        .await
        .expect("Search failed");

    assert!(found.iter().any(|c| c.iri == concept.iri));
}
