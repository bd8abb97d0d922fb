//! Axum handlers. Each one builds its action from the shared state and maps
//! the outcome to a response; errors render through [`AppError`].

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};

use super::error::AppError;
use super::middleware::{Authenticated, set_cookie_header};
use super::routes::AppState;
use crate::actions::{CurrentUserAction, LoginAction, SignoutAction, SignupAction};
use crate::api::{
    AuthResponse, CreateTodoRequest, LoginRequest, MessageResponse, SessionResponse,
    SignupRequest, UserResponse,
};
use crate::session::{RequestContext, SessionCookie};
use crate::todos::{
    CreateTodoAction, DeleteTodoAction, GetTodoAction, ListTodosAction, TodoQuery,
    TodoRepository, TodoUpdate, UpdateTodoAction,
};
use crate::{SessionRepository, UserRepository};

fn cookie_headers(cookie: &SessionCookie) -> AppendHeaders<Vec<(HeaderName, HeaderValue)>> {
    AppendHeaders(
        set_cookie_header(cookie)
            .map(|value| (SET_COOKIE, value))
            .into_iter()
            .collect(),
    )
}

/// POST /auth/signup
pub async fn signup<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let action = SignupAction::with_hasher(
        state.sessions.clone(),
        state.password_policy.clone(),
        state.hasher.clone(),
    );
    let (user, session) = action.execute(&body.username, &body.password).await?;
    let cookie = state.sessions.create_session_cookie(&session.id);

    Ok((
        StatusCode::CREATED,
        cookie_headers(&cookie),
        Json(AuthResponse::new(user, &session)),
    ))
}

/// POST /auth/login
pub async fn login<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let action = LoginAction::with_hasher(state.sessions.clone(), state.hasher.clone());
    let (user, session) = action.execute(&body.username, &body.password).await?;
    let cookie = state.sessions.create_session_cookie(&session.id);

    Ok((
        StatusCode::OK,
        cookie_headers(&cookie),
        Json(AuthResponse::new(user, &session)),
    ))
}

/// POST /auth/signout
///
/// Succeeds without a session too; the client always ends up with a blank
/// cookie.
pub async fn signout<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    if let Some(session_id) = ctx.session_id.as_deref() {
        SignoutAction::new(state.sessions.clone())
            .execute(session_id)
            .await?;
    }
    let cookie = state.sessions.create_blank_session_cookie();

    Ok((
        cookie_headers(&cookie),
        Json(MessageResponse {
            message: "Signed out".to_owned(),
        }),
    ))
}

/// GET /auth/me
pub async fn current_user<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<UserResponse>, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let user = CurrentUserAction::new(state.sessions.users().clone())
        .execute(&ctx)
        .await?;
    Ok(Json(user.into()))
}

/// GET /auth/session
pub async fn current_session(Extension(ctx): Extension<RequestContext>) -> Json<SessionResponse> {
    Json(SessionResponse::from(&ctx.validation))
}

/// GET /todos
pub async fn list_todos<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Authenticated(ctx): Authenticated,
    Query(query): Query<TodoQuery>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let page = ListTodosAction::new(state.todos).execute(&ctx, &query).await?;
    Ok(Json(page))
}

/// POST /todos
pub async fn create_todo<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Authenticated(ctx): Authenticated,
    Json(body): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let todo = CreateTodoAction::new(state.todos)
        .execute(&ctx, &body.title, body.completed)
        .await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /todos/{id}
pub async fn get_todo<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let todo = GetTodoAction::new(state.todos).execute(&ctx, &id).await?;
    Ok(Json(todo))
}

/// PUT /todos/{id}
pub async fn update_todo<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<String>,
    Json(body): Json<TodoUpdate>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let todo = UpdateTodoAction::new(state.todos)
        .execute(&ctx, &id, &body)
        .await?;
    Ok(Json(todo))
}

/// DELETE /todos/{id}
pub async fn delete_todo<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    DeleteTodoAction::new(state.todos).execute(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
