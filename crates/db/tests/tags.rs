//! Integration tests for tag definitions and object-tag associations.

use sqlx::PgPool;
use tunobase_core::site::SiteScope;
use tunobase_core::types::DbId;
use tunobase_db::models::site::CreateSite;
use tunobase_db::models::tag::TagCount;
use tunobase_db::repositories::{SiteRepo, TagRepo};

async fn site(pool: &PgPool, domain: &str) -> DbId {
    SiteRepo::create(
        pool,
        &CreateSite {
            domain: domain.to_string(),
            name: domain.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn titles(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_tags_creates_and_attaches(pool: PgPool) {
    let home = site(&pool, "home.example").await;

    let tags = TagRepo::replace_tags(&pool, home, "content", 1, &titles(&["Sport", "News", "News "]))
        .await
        .unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(names, vec!["News", "Sport"]);
    assert_eq!(tags[0].slug, "news");
    assert_eq!(tags[0].site_id, Some(home));

    let attached = TagRepo::get_tags_for_object(&pool, "content", 1, SiteScope::Site(home))
        .await
        .unwrap();
    assert_eq!(attached.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_tags_replaces_previous_set(pool: PgPool) {
    let home = site(&pool, "home.example").await;
    let first = TagRepo::replace_tags(&pool, home, "content", 7, &titles(&["a", "b"]))
        .await
        .unwrap();
    TagRepo::replace_tags(&pool, home, "content", 7, &titles(&["b", "c"]))
        .await
        .unwrap();

    let attached: Vec<String> = TagRepo::get_tags_for_object(&pool, "content", 7, SiteScope::All)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(attached, vec!["b", "c"]);

    // Existing definitions are reused rather than duplicated.
    let b_before = first.iter().find(|t| t.title == "b").unwrap().id;
    let b_after = TagRepo::get_tags_for_object(&pool, "content", 7, SiteScope::All)
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.title == "b")
        .unwrap()
        .tag_id;
    assert_eq!(b_before, b_after);

    TagRepo::replace_tags(&pool, home, "content", 7, &[]).await.unwrap();
    assert!(TagRepo::get_tags_for_object(&pool, "content", 7, SiteScope::All)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_retrieve_tags_is_case_insensitive_and_site_scoped(pool: PgPool) {
    let home = site(&pool, "home.example").await;
    let other = site(&pool, "other.example").await;
    TagRepo::replace_tags(&pool, home, "content", 1, &titles(&["Football", "Basketball", "Chess"]))
        .await
        .unwrap();
    TagRepo::replace_tags(&pool, other, "content", 1, &titles(&["Ballet"]))
        .await
        .unwrap();

    let found = TagRepo::retrieve_tags(&pool, home, "BALL").await.unwrap();
    assert_eq!(found, vec!["Basketball", "Football"]);

    let literal = TagRepo::retrieve_tags(&pool, home, "%").await.unwrap();
    assert!(literal.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_tags_and_counts_per_type(pool: PgPool) {
    let home = site(&pool, "home.example").await;
    TagRepo::replace_tags(&pool, home, "content", 1, &titles(&["news", "sport"]))
        .await
        .unwrap();
    TagRepo::replace_tags(&pool, home, "content", 2, &titles(&["news"]))
        .await
        .unwrap();
    TagRepo::replace_tags(&pool, home, "gallery", 1, &titles(&["photos"]))
        .await
        .unwrap();

    let unique = TagRepo::get_unique_tags_for_object_type(&pool, "content", SiteScope::Site(home))
        .await
        .unwrap();
    assert_eq!(unique, vec!["news", "sport"]);

    let counts = TagRepo::get_tag_counts_for_object_type(&pool, "content", SiteScope::All)
        .await
        .unwrap();
    assert_eq!(
        counts,
        vec![
            TagCount {
                title: "news".into(),
                count: 2
            },
            TagCount {
                title: "sport".into(),
                count: 1
            },
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_tag_cascades_to_associations(pool: PgPool) {
    let home = site(&pool, "home.example").await;
    let tags = TagRepo::replace_tags(&pool, home, "content", 3, &titles(&["temp"]))
        .await
        .unwrap();

    assert!(TagRepo::delete(&pool, tags[0].id).await.unwrap());
    assert!(!TagRepo::delete(&pool, tags[0].id).await.unwrap());
    assert!(TagRepo::find_by_id(&pool, tags[0].id).await.unwrap().is_none());
    assert!(TagRepo::get_tags_for_object(&pool, "content", 3, SiteScope::All)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_replacements_keep_one_writers_set(pool: PgPool) {
    let home = site(&pool, "home.example").await;
    let first = titles(&["a", "b"]);
    let second = titles(&["c"]);

    for object_pk in 1..=20 {
        let (left, right) = tokio::join!(
            TagRepo::replace_tags(&pool, home, "content", object_pk, &first),
            TagRepo::replace_tags(&pool, home, "content", object_pk, &second),
        );
        left.unwrap();
        right.unwrap();

        let attached: Vec<String> =
            TagRepo::get_tags_for_object(&pool, "content", object_pk, SiteScope::All)
                .await
                .unwrap()
                .into_iter()
                .map(|t| t.title)
                .collect();
        assert!(
            attached == first || attached == second,
            "object {object_pk} ended with a merged set: {attached:?}"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_association_is_rejected(pool: PgPool) {
    let home = site(&pool, "home.example").await;
    let tags = TagRepo::replace_tags(&pool, home, "content", 5, &titles(&["once"]))
        .await
        .unwrap();

    let err = sqlx::query(
        "INSERT INTO content_object_tags (content_type, object_pk, site_id, tag_id) \
         VALUES ('content', 5, $1, $2)",
    )
    .bind(home)
    .bind(tags[0].id)
    .execute(&pool)
    .await
    .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_content_object_tags")
    );
}
