use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use super::handlers;
use super::middleware::session_middleware;
use crate::config::TesseraConfig;
use crate::crypto::Argon2Hasher;
use crate::session::SessionManager;
use crate::todos::TodoRepository;
use crate::validators::PasswordPolicy;
use crate::{SessionRepository, UserRepository};

#[derive(Clone)]
pub struct AppState<S, U, T> {
    pub sessions: SessionManager<S, U>,
    pub todos: T,
    pub password_policy: PasswordPolicy,
    pub hasher: Argon2Hasher,
}

impl<S, U, T> AppState<S, U, T>
where
    S: SessionRepository,
    U: UserRepository,
    T: TodoRepository,
{
    pub fn new(session_repo: S, user_repo: U, todo_repo: T, config: TesseraConfig) -> Self {
        Self {
            sessions: SessionManager::new(session_repo, user_repo, config.session),
            todos: todo_repo,
            password_policy: config.password_policy,
            hasher: config.hasher,
        }
    }
}

/// `/signup`, `/login`, `/signout`, `/me`, `/session`.
pub fn auth_routes<S, U, T>() -> Router<AppState<S, U, T>>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    Router::new()
        .route("/signup", post(handlers::signup::<S, U, T>))
        .route("/login", post(handlers::login::<S, U, T>))
        .route("/signout", post(handlers::signout::<S, U, T>))
        .route("/me", get(handlers::current_user::<S, U, T>))
        .route("/session", get(handlers::current_session))
}

/// `/` and `/{id}`. Every route requires a session.
pub fn todo_routes<S, U, T>() -> Router<AppState<S, U, T>>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_todos::<S, U, T>).post(handlers::create_todo::<S, U, T>),
        )
        .route(
            "/{id}",
            get(handlers::get_todo::<S, U, T>)
                .put(handlers::update_todo::<S, U, T>)
                .delete(handlers::delete_todo::<S, U, T>),
        )
}

/// The whole API under `/auth` and `/todos`, wrapped in the session
/// middleware.
pub fn router<S, U, T>(state: AppState<S, U, T>) -> Router
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/todos", todo_routes())
        .layer(from_fn_with_state(
            state.clone(),
            session_middleware::<S, U, T>,
        ))
        .with_state(state)
}
