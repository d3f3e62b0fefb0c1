use sqlx::PgPool;
use tunobase_db::repositories::SiteRepo;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    tunobase_db::health_check(&pool).await.unwrap();

    let states: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM content_states ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        states,
        vec![
            (1, "unpublished".to_string()),
            (2, "staged".to_string()),
            (3, "published".to_string()),
            (4, "deleted".to_string()),
        ]
    );
}

/// Seeded state ids must match the Rust enum.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_states_match_enum(pool: PgPool) {
    let rows: Vec<(i16, String)> = sqlx::query_as("SELECT id, label FROM content_states")
        .fetch_all(&pool)
        .await
        .unwrap();
    for (id, label) in rows {
        let state = tunobase_core::state::ContentState::from_id(id)
            .unwrap_or_else(|| panic!("state id {id} has no enum variant"));
        assert_eq!(state.label(), label);
    }
}

/// The current site is created on first start-up and reused afterwards.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_site_get_or_create_is_idempotent(pool: PgPool) {
    assert!(SiteRepo::find_by_domain(&pool, "example.com")
        .await
        .unwrap()
        .is_none());

    let first = SiteRepo::get_or_create(&pool, "example.com").await.unwrap();
    let second = SiteRepo::get_or_create(&pool, "example.com").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.name, "example.com");

    let found = SiteRepo::find_by_domain(&pool, "example.com").await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(first.id));
}
