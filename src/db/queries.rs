//! Glossary queries and dataset persistence.
//!
//! All access goes through plain `sqlx` queries against the schema in
//! `migrations/`. Language maps travel as JSONB; language fallback is
//! resolved in Rust (see [`crate::skos`]), except for search, which resolves
//! the label inside the query so matching happens server-side.

use crate::skos::{
    Collection, Concept, ConceptScheme, LangListMap, LangMap, MemberType, ParsedDataset,
    SemanticRelation, SemanticRelationType,
};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::collections::HashSet;
use tracing::debug;

/// Concept scheme row.
#[derive(Debug, FromRow)]
struct SchemeRow {
    iri: String,
    notation: String,
    scope_note: String,
    pref_labels: Json<LangMap>,
}

impl From<SchemeRow> for ConceptScheme {
    fn from(row: SchemeRow) -> Self {
        Self {
            iri: row.iri,
            notation: row.notation,
            scope_note: row.scope_note,
            pref_labels: row.pref_labels.0,
        }
    }
}

/// Concept row, joined across `collection_members` and `concepts`.
#[derive(Debug, FromRow)]
struct ConceptRow {
    iri: String,
    identifier: String,
    notation: String,
    pref_labels: Json<LangMap>,
    alt_labels: Json<LangListMap>,
    scope_notes: Json<LangMap>,
}

impl From<ConceptRow> for Concept {
    fn from(row: ConceptRow) -> Self {
        Self {
            iri: row.iri,
            identifier: row.identifier,
            notation: row.notation,
            pref_labels: row.pref_labels.0,
            alt_labels: row.alt_labels.0,
            scope_notes: row.scope_notes.0,
        }
    }
}

/// Collection row.
#[derive(Debug, FromRow)]
struct CollectionRow {
    iri: String,
    notation: String,
    pref_labels: Json<LangMap>,
}

impl From<CollectionRow> for Collection {
    fn from(row: CollectionRow) -> Self {
        Self {
            iri: row.iri,
            notation: row.notation,
            pref_labels: row.pref_labels.0,
        }
    }
}

/// Semantic relation row.
#[derive(Debug, FromRow)]
struct RelationRow {
    relation_type: String,
    source_concept_iri: String,
    target_concept_iri: String,
}

impl TryFrom<RelationRow> for SemanticRelation {
    type Error = sqlx::Error;

    fn try_from(row: RelationRow) -> Result<Self, Self::Error> {
        let relation_type: SemanticRelationType = row
            .relation_type
            .parse()
            .map_err(|message: String| sqlx::Error::Decode(message.into()))?;
        Ok(Self {
            relation_type,
            source_concept_iri: row.source_concept_iri,
            target_concept_iri: row.target_concept_iri,
        })
    }
}

const CONCEPT_SELECT: &str = r#"
    SELECT m.iri, c.identifier, m.notation, m.pref_labels, c.alt_labels, c.scope_notes
    FROM collection_members m
    JOIN concepts c ON c.iri = m.iri
"#;

/// Removes all glossary data. Ingestion starts from a clean slate.
///
/// # Errors
/// Returns an error if the truncate fails.
pub async fn clear_glossary(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        TRUNCATE concept_schemes, collection_members, concepts, collections,
                 in_scheme, in_collection, semantic_relations
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Persists one parsed dataset in a single transaction.
///
/// Association and relation rows whose endpoints are not part of the dataset
/// (dangling references across datasets) are skipped rather than violating
/// foreign keys.
///
/// # Errors
/// Returns an error if any insert fails; the transaction is rolled back.
pub async fn save_dataset(pool: &PgPool, dataset: &ParsedDataset) -> Result<(), sqlx::Error> {
    let scheme_iris: HashSet<&str> = dataset
        .concept_schemes
        .iter()
        .map(|scheme| scheme.iri.as_str())
        .collect();
    let concept_iris: HashSet<&str> = dataset
        .concepts
        .iter()
        .map(|concept| concept.iri.as_str())
        .collect();
    let collection_iris: HashSet<&str> = dataset
        .collections
        .iter()
        .map(|collection| collection.iri.as_str())
        .collect();
    let member_iris: HashSet<&str> = concept_iris.union(&collection_iris).copied().collect();

    let mut tx = pool.begin().await?;

    for scheme in &dataset.concept_schemes {
        sqlx::query(
            r#"
            INSERT INTO concept_schemes (iri, notation, scope_note, pref_labels)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (iri) DO NOTHING
            "#,
        )
        .bind(&scheme.iri)
        .bind(&scheme.notation)
        .bind(&scheme.scope_note)
        .bind(Json(&scheme.pref_labels))
        .execute(&mut *tx)
        .await?;
    }

    for collection in &dataset.collections {
        sqlx::query(
            r#"
            INSERT INTO collection_members (iri, notation, pref_labels, member_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (iri) DO NOTHING
            "#,
        )
        .bind(&collection.iri)
        .bind(&collection.notation)
        .bind(Json(&collection.pref_labels))
        .bind(MemberType::Collection.as_str())
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO collections (iri) VALUES ($1) ON CONFLICT (iri) DO NOTHING")
            .bind(&collection.iri)
            .execute(&mut *tx)
            .await?;
    }

    for concept in &dataset.concepts {
        sqlx::query(
            r#"
            INSERT INTO collection_members (iri, notation, pref_labels, member_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (iri) DO NOTHING
            "#,
        )
        .bind(&concept.iri)
        .bind(&concept.notation)
        .bind(Json(&concept.pref_labels))
        .bind(MemberType::Concept.as_str())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO concepts (iri, identifier, alt_labels, scope_notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (iri) DO NOTHING
            "#,
        )
        .bind(&concept.iri)
        .bind(&concept.identifier)
        .bind(Json(&concept.alt_labels))
        .bind(Json(&concept.scope_notes))
        .execute(&mut *tx)
        .await?;
    }

    let mut skipped = 0usize;
    for in_scheme in &dataset.in_schemes {
        if !scheme_iris.contains(in_scheme.scheme_iri.as_str())
            || !member_iris.contains(in_scheme.member_iri.as_str())
        {
            skipped += 1;
            continue;
        }
        sqlx::query(
            r#"
            INSERT INTO in_scheme (scheme_iri, member_iri)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&in_scheme.scheme_iri)
        .bind(&in_scheme.member_iri)
        .execute(&mut *tx)
        .await?;
    }

    for in_collection in &dataset.in_collections {
        if !collection_iris.contains(in_collection.collection_iri.as_str())
            || !member_iris.contains(in_collection.member_iri.as_str())
        {
            skipped += 1;
            continue;
        }
        sqlx::query(
            r#"
            INSERT INTO in_collection (collection_iri, member_iri)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&in_collection.collection_iri)
        .bind(&in_collection.member_iri)
        .execute(&mut *tx)
        .await?;
    }

    for relation in &dataset.semantic_relations {
        if !concept_iris.contains(relation.source_concept_iri.as_str())
            || !concept_iris.contains(relation.target_concept_iri.as_str())
        {
            skipped += 1;
            continue;
        }
        sqlx::query(
            r#"
            INSERT INTO semantic_relations (relation_type, source_concept_iri, target_concept_iri)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(relation.relation_type.as_str())
        .bind(&relation.source_concept_iri)
        .bind(&relation.target_concept_iri)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    if skipped > 0 {
        debug!("Skipped {} dangling association rows", skipped);
    }

    Ok(())
}

/// Returns all concept schemes.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_concept_schemes(pool: &PgPool) -> Result<Vec<ConceptScheme>, sqlx::Error> {
    let rows: Vec<SchemeRow> = sqlx::query_as(
        "SELECT iri, notation, scope_note, pref_labels FROM concept_schemes ORDER BY iri",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ConceptScheme::from).collect())
}

/// Returns one concept scheme, if present.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_concept_scheme(
    pool: &PgPool,
    scheme_iri: &str,
) -> Result<Option<ConceptScheme>, sqlx::Error> {
    let row: Option<SchemeRow> = sqlx::query_as(
        "SELECT iri, notation, scope_note, pref_labels FROM concept_schemes WHERE iri = $1",
    )
    .bind(scheme_iri)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(ConceptScheme::from))
}

/// Returns the concepts that belong to a concept scheme.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_concepts_in_scheme(
    pool: &PgPool,
    scheme_iri: &str,
) -> Result<Vec<Concept>, sqlx::Error> {
    let sql = format!(
        "{CONCEPT_SELECT} JOIN in_scheme s ON s.member_iri = m.iri \
         WHERE s.scheme_iri = $1 ORDER BY m.iri"
    );
    let rows: Vec<ConceptRow> = sqlx::query_as(&sql).bind(scheme_iri).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Concept::from).collect())
}

/// Returns the collections that belong to a concept scheme.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_collections_in_scheme(
    pool: &PgPool,
    scheme_iri: &str,
) -> Result<Vec<Collection>, sqlx::Error> {
    let rows: Vec<CollectionRow> = sqlx::query_as(
        r#"
        SELECT m.iri, m.notation, m.pref_labels
        FROM collection_members m
        JOIN collections c ON c.iri = m.iri
        JOIN in_scheme s ON s.member_iri = m.iri
        WHERE s.scheme_iri = $1
        ORDER BY m.iri
        "#,
    )
    .bind(scheme_iri)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Collection::from).collect())
}

/// Returns one collection, if present.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_collection(
    pool: &PgPool,
    collection_iri: &str,
) -> Result<Option<Collection>, sqlx::Error> {
    let row: Option<CollectionRow> = sqlx::query_as(
        r#"
        SELECT m.iri, m.notation, m.pref_labels
        FROM collection_members m
        JOIN collections c ON c.iri = m.iri
        WHERE m.iri = $1
        "#,
    )
    .bind(collection_iri)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Collection::from))
}

/// Returns the concepts directly contained in a collection.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_concepts_in_collection(
    pool: &PgPool,
    collection_iri: &str,
) -> Result<Vec<Concept>, sqlx::Error> {
    let sql = format!(
        "{CONCEPT_SELECT} JOIN in_collection i ON i.member_iri = m.iri \
         WHERE i.collection_iri = $1 ORDER BY m.iri"
    );
    let rows: Vec<ConceptRow> = sqlx::query_as(&sql)
        .bind(collection_iri)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Concept::from).collect())
}

/// Returns the sub-collections directly contained in a collection.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_collections_in_collection(
    pool: &PgPool,
    collection_iri: &str,
) -> Result<Vec<Collection>, sqlx::Error> {
    let rows: Vec<CollectionRow> = sqlx::query_as(
        r#"
        SELECT m.iri, m.notation, m.pref_labels
        FROM collection_members m
        JOIN collections c ON c.iri = m.iri
        JOIN in_collection i ON i.member_iri = m.iri
        WHERE i.collection_iri = $1
        ORDER BY m.iri
        "#,
    )
    .bind(collection_iri)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Collection::from).collect())
}

/// Returns one concept, if present.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_concept(pool: &PgPool, concept_iri: &str) -> Result<Option<Concept>, sqlx::Error> {
    let sql = format!("{CONCEPT_SELECT} WHERE m.iri = $1");
    let row: Option<ConceptRow> = sqlx::query_as(&sql)
        .bind(concept_iri)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Concept::from))
}

/// Returns the IRIs of the schemes a member belongs to.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn get_scheme_iris_of_member(
    pool: &PgPool,
    member_iri: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT scheme_iri FROM in_scheme WHERE member_iri = $1 ORDER BY scheme_iri")
            .bind(member_iri)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(iri,)| iri).collect())
}

/// Returns the semantic relations touching a concept, in either direction.
///
/// # Errors
/// Returns an error if the query fails or a stored relation type is unknown.
pub async fn get_relations(
    pool: &PgPool,
    concept_iri: &str,
) -> Result<Vec<SemanticRelation>, sqlx::Error> {
    let rows: Vec<RelationRow> = sqlx::query_as(
        r#"
        SELECT relation_type, source_concept_iri, target_concept_iri
        FROM semantic_relations
        WHERE source_concept_iri = $1 OR target_concept_iri = $1
        ORDER BY source_concept_iri, target_concept_iri, relation_type
        "#,
    )
    .bind(concept_iri)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(SemanticRelation::try_from).collect()
}

/// Finds concepts whose preferred label in `lang` (with English fallback)
/// contains `search_term`, case-insensitively.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn search_concepts(
    pool: &PgPool,
    search_term: &str,
    lang: &str,
) -> Result<Vec<Concept>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(search_term));
    let sql = format!(
        "{CONCEPT_SELECT} \
         WHERE COALESCE(m.pref_labels->>$2, m.pref_labels->>'en', '') ILIKE $1 \
         ORDER BY m.iri"
    );
    let rows: Vec<ConceptRow> = sqlx::query_as(&sql)
        .bind(pattern)
        .bind(lang)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Concept::from).collect())
}

/// Escapes `LIKE` wildcards so the search term is matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
