use sea_orm::Database;

use engine::{AuthorizedUser, Engine, EngineError};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn user(email: &str) -> AuthorizedUser {
    AuthorizedUser {
        id: 0,
        email: email.to_string(),
        name: Some("Test".to_string()),
        is_admin: false,
    }
}

#[tokio::test]
async fn insert_then_get() {
    let engine = engine_with_db().await;

    let created = engine
        .insert_authorized_user(user("a@example.com"))
        .await
        .unwrap();
    assert!(created.id > 0);

    let fetched = engine.authorized_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert!(!fetched.is_admin);
}

#[tokio::test]
async fn duplicated_emails_are_allowed() {
    let engine = engine_with_db().await;

    let first = engine
        .insert_authorized_user(user("same@example.com"))
        .await
        .unwrap();
    let second = engine
        .insert_authorized_user(user("same@example.com"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(engine.list_authorized_users().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_overwrites_every_field() {
    let engine = engine_with_db().await;
    let created = engine
        .insert_authorized_user(user("a@example.com"))
        .await
        .unwrap();

    let changed = AuthorizedUser {
        id: created.id,
        email: "b@example.com".to_string(),
        name: None,
        is_admin: true,
    };
    engine
        .update_authorized_user(created.id, changed.clone())
        .await
        .unwrap();

    let fetched = engine.authorized_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, changed);
}

#[tokio::test]
async fn update_errors() {
    let engine = engine_with_db().await;
    let created = engine
        .insert_authorized_user(user("a@example.com"))
        .await
        .unwrap();

    let mut other = created.clone();
    other.id += 1;
    let err = engine
        .update_authorized_user(created.id, other)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::IdMismatch(_)));

    let mut ghost = user("ghost@example.com");
    ghost.id = 999;
    let err = engine.update_authorized_user(999, ghost).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let mut long = created.clone();
    long.email = "e".repeat(101);
    let err = engine
        .update_authorized_user(created.id, long)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidField(_)));
}

#[tokio::test]
async fn delete_then_missing() {
    let engine = engine_with_db().await;
    let created = engine
        .insert_authorized_user(user("a@example.com"))
        .await
        .unwrap();

    assert!(engine.authorized_user_exists(created.id).await.unwrap());
    engine.delete_authorized_user(created.id).await.unwrap();
    assert!(!engine.authorized_user_exists(created.id).await.unwrap());
    assert_eq!(engine.authorized_user(created.id).await.unwrap(), None);

    let err = engine.delete_authorized_user(created.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}
