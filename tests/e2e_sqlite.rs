//! End-to-end tests for the `SQLite` repositories.
//!
//! Run with: `cargo test --features "sqlx_sqlite" --test e2e_sqlite`

#![cfg(feature = "sqlx_sqlite")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

// setup_db() hands out a fresh in-memory database per test; #[serial] keeps
// the argon2-heavy tests from starving each other.

use chrono::{Duration, Utc};
use serial_test::serial;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tessera::actions::{LoginAction, SignupAction};
use tessera::crypto::Argon2Hasher;
use tessera::sqlite::{
    SqliteSessionRepository, SqliteTodoRepository, SqliteUserRepository, create_repositories,
    migrations,
};
use tessera::todos::{
    CreateTodoAction, DeleteTodoAction, GetTodoAction, ListTodosAction, StatusFilter,
    TodoQuery, TodoRepository, TodoUpdate, UpdateTodoAction,
};
use tessera::validators::PasswordPolicy;
use tessera::{
    AuthContext, AuthError, SecretString, Session, SessionConfig, SessionManager,
    SessionRepository, User, UserRepository,
};

async fn setup_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite database");

    migrations::run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn manager(pool: SqlitePool) -> SessionManager<SqliteSessionRepository, SqliteUserRepository> {
    SessionManager::new(
        SqliteSessionRepository::new(pool.clone()),
        SqliteUserRepository::new(pool),
        SessionConfig::default(),
    )
}

async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    let user = User {
        id: tessera::crypto::generate_user_id(),
        username: username.to_owned(),
        password_hash: "not-a-real-hash".to_owned(),
    };
    SqliteUserRepository::new(pool.clone())
        .create_user(&user)
        .await
        .unwrap();
    user
}

#[tokio::test]
#[serial]
async fn test_migrations_are_idempotent() {
    let pool = setup_db().await;
    migrations::run(&pool).await.unwrap();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _tessera_migrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(applied, 3);
}

#[tokio::test]
#[serial]
async fn test_user_repository() {
    let pool = setup_db().await;
    let repo = SqliteUserRepository::new(pool.clone());
    let user = seed_user(&pool, "alice").await;

    let found = repo.find_user_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found, user);

    let found = repo.find_user_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(found.username, "alice");

    assert!(repo.find_user_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_duplicate_username_hits_unique_index() {
    let pool = setup_db().await;
    seed_user(&pool, "alice").await;

    let duplicate = User {
        id: tessera::crypto::generate_user_id(),
        username: "alice".to_owned(),
        password_hash: "other".to_owned(),
    };
    let result = SqliteUserRepository::new(pool).create_user(&duplicate).await;
    assert_eq!(result.unwrap_err(), AuthError::DuplicateUsername);
}

#[tokio::test]
#[serial]
async fn test_session_repository_round_trip() {
    let pool = setup_db().await;
    let user = seed_user(&pool, "alice").await;
    let repo = SqliteSessionRepository::new(pool);

    let now = Utc::now();
    let session = Session {
        id: tessera::crypto::generate_session_id(),
        user_id: user.id.clone(),
        expires_at: now + Duration::days(30),
        created_at: now,
    };
    repo.create_session(&session).await.unwrap();

    let found = repo.find_session(&session.id).await.unwrap().unwrap();
    assert_eq!(found.user_id, user.id);
    assert_eq!(found.expires_at.timestamp_millis(), session.expires_at.timestamp_millis());

    let later = now + Duration::days(45);
    repo.update_session_expiry(&session.id, later).await.unwrap();
    let found = repo.find_session(&session.id).await.unwrap().unwrap();
    assert_eq!(found.expires_at.timestamp_millis(), later.timestamp_millis());

    repo.delete_session(&session.id).await.unwrap();
    repo.delete_session(&session.id).await.unwrap();
    assert!(repo.find_session(&session.id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_expired_session_is_reaped_on_validate() {
    let pool = setup_db().await;
    let user = seed_user(&pool, "alice").await;
    let manager = manager(pool);

    let now = Utc::now();
    let expired = Session {
        id: tessera::crypto::generate_session_id(),
        user_id: user.id.clone(),
        expires_at: now - Duration::seconds(1),
        created_at: now - Duration::days(30),
    };
    manager.sessions().create_session(&expired).await.unwrap();

    let validation = manager.validate_session(&expired.id).await.unwrap();
    assert!(!validation.is_valid());
    assert!(
        manager
            .sessions()
            .find_session(&expired.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[serial]
async fn test_prune_and_revoke() {
    let pool = setup_db().await;
    let user = seed_user(&pool, "alice").await;
    let manager = manager(pool);

    let now = Utc::now();
    for _ in 0..2 {
        let session = Session {
            id: tessera::crypto::generate_session_id(),
            user_id: user.id.clone(),
            expires_at: now - Duration::hours(1),
            created_at: now - Duration::days(31),
        };
        manager.sessions().create_session(&session).await.unwrap();
    }
    manager.create_session(&user.id).await.unwrap();
    manager.create_session(&user.id).await.unwrap();

    assert_eq!(manager.prune_expired().await.unwrap(), 2);
    assert_eq!(manager.invalidate_user_sessions(&user.id).await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_signup_login_and_validate() {
    let pool = setup_db().await;
    let hasher = Argon2Hasher::new(1024, 1, 1);
    let manager = manager(pool);
    let password = SecretString::new("hunter22hunter22");

    let signup =
        SignupAction::with_hasher(manager.clone(), PasswordPolicy::default(), hasher.clone());
    let (user, first) = signup.execute("alice", &password).await.unwrap();

    let result = signup.execute("alice", &password).await;
    assert_eq!(result.unwrap_err(), AuthError::DuplicateUsername);

    let login = LoginAction::with_hasher(manager.clone(), hasher);
    let (same_user, second) = login.execute("alice", &password).await.unwrap();
    assert_eq!(same_user.id, user.id);
    assert_ne!(first.id, second.id);

    let wrong = login.execute("alice", &SecretString::new("nope")).await;
    assert_eq!(wrong.unwrap_err(), AuthError::InvalidCredentials);

    for session in [&first, &second] {
        let validation = manager.validate_session(&session.id).await.unwrap();
        assert_eq!(validation.user.unwrap().id, user.id);
    }
}

#[tokio::test]
#[serial]
async fn test_user_deletion_cascades() {
    let pool = setup_db().await;
    let user = seed_user(&pool, "alice").await;
    let (_, sessions, todos) = create_repositories(pool.clone());
    let manager = manager(pool.clone());
    let session = manager.create_session(&user.id).await.unwrap();

    let ctx = AuthContext {
        session: session.clone(),
        user: user.clone(),
    };
    CreateTodoAction::new(todos.clone())
        .execute(&ctx, "Buy milk", false)
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user.id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(sessions.find_session(&session.id).await.unwrap().is_none());
    let page = ListTodosAction::new(todos)
        .execute(&ctx, &TodoQuery::default())
        .await
        .unwrap();
    assert!(page.todos.is_empty());
}

#[tokio::test]
#[serial]
async fn test_todo_procedures() {
    let pool = setup_db().await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let manager = manager(pool.clone());
    let todos = SqliteTodoRepository::new(pool);

    let ctx_for = |user: &User, session: Session| AuthContext {
        session,
        user: user.clone(),
    };
    let alice_ctx = ctx_for(&alice, manager.create_session(&alice.id).await.unwrap());
    let bob_ctx = ctx_for(&bob, manager.create_session(&bob.id).await.unwrap());

    let create = CreateTodoAction::new(todos.clone());
    let milk = create.execute(&alice_ctx, "Buy milk", false).await.unwrap();
    create.execute(&alice_ctx, "Walk 100% of the dog", true).await.unwrap();
    create.execute(&bob_ctx, "Bob's todo", false).await.unwrap();

    let get = GetTodoAction::new(todos.clone());
    assert_eq!(get.execute(&alice_ctx, &milk.id).await.unwrap().title, "Buy milk");
    assert_eq!(
        get.execute(&bob_ctx, &milk.id).await.unwrap_err(),
        AuthError::NotFound
    );

    let list = ListTodosAction::new(todos.clone());
    let page = list.execute(&alice_ctx, &TodoQuery::default()).await.unwrap();
    assert_eq!(page.todos.len(), 2);
    assert!(!page.has_more);

    let query = TodoQuery {
        title: Some("100%".to_owned()),
        ..TodoQuery::default()
    };
    let page = list.execute(&alice_ctx, &query).await.unwrap();
    assert_eq!(page.todos.len(), 1);
    assert!(page.todos[0].completed);

    let query = TodoQuery {
        status: StatusFilter::Active,
        ..TodoQuery::default()
    };
    let page = list.execute(&alice_ctx, &query).await.unwrap();
    assert_eq!(page.todos.len(), 1);
    assert_eq!(page.todos[0].id, milk.id);

    let update = UpdateTodoAction::new(todos.clone());
    let changes = TodoUpdate {
        completed: Some(true),
        ..TodoUpdate::default()
    };
    assert_eq!(
        update.execute(&bob_ctx, &milk.id, &changes).await.unwrap_err(),
        AuthError::NotFound
    );
    let updated = update.execute(&alice_ctx, &milk.id, &changes).await.unwrap();
    assert!(updated.completed);

    let delete = DeleteTodoAction::new(todos.clone());
    delete.execute(&bob_ctx, &milk.id).await.unwrap();
    assert!(todos.find_todo(&alice.id, &milk.id).await.unwrap().is_some());
    delete.execute(&alice_ctx, &milk.id).await.unwrap();
    assert!(todos.find_todo(&alice.id, &milk.id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_todo_pagination() {
    let pool = setup_db().await;
    let alice = seed_user(&pool, "alice").await;
    let manager = manager(pool.clone());
    let todos = SqliteTodoRepository::new(pool);
    let ctx = AuthContext {
        session: manager.create_session(&alice.id).await.unwrap(),
        user: alice.clone(),
    };

    let now = Utc::now();
    for i in 0..11 {
        let created_at = now - Duration::minutes(i);
        todos
            .create_todo(&tessera::Todo {
                id: format!("todo-{i:02}"),
                user_id: alice.id.clone(),
                title: format!("todo {i}"),
                description: String::new(),
                completed: false,
                created_at,
                updated_at: created_at,
            })
            .await
            .unwrap();
    }

    let list = ListTodosAction::new(todos);
    let first = list.execute(&ctx, &TodoQuery::default()).await.unwrap();
    assert_eq!(first.todos.len(), 10);
    assert!(first.has_more);
    assert_eq!(first.todos[0].id, "todo-00");

    let query = TodoQuery {
        cursor: 10,
        ..TodoQuery::default()
    };
    let second = list.execute(&ctx, &query).await.unwrap();
    assert_eq!(second.todos.len(), 1);
    assert!(!second.has_more);
    assert_eq!(second.todos[0].id, "todo-10");
}
