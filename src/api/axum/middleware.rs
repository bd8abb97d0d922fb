use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::error::AppError;
use super::routes::AppState;
use crate::session::{AuthContext, RequestContext, SessionCookie, read_cookie};
use crate::todos::TodoRepository;
use crate::{AuthError, SessionRepository, UserRepository};

/// Caller identity for handlers behind the gate. Rejects with 401.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthContext);

impl Authenticated {
    pub fn into_inner(self) -> AuthContext {
        self.0
    }
}

/// Finds the session cookie across every `Cookie` header of the request.
pub fn session_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| read_cookie(header, name))
}

pub(crate) fn set_cookie_header(cookie: &SessionCookie) -> Option<HeaderValue> {
    HeaderValue::from_str(&cookie.to_header_value())
        .inspect_err(|e| {
            log::error!(
                target: "tessera::api",
                "msg=\"unencodable cookie header\" error=\"{e}\""
            );
        })
        .ok()
}

/// Resolves the session for every request.
///
/// Puts a [`RequestContext`] in the request extensions, runs the handler, then
/// writes the cookie the session manager asked for. A handler that already
/// set a cookie (login, signout) wins over the middleware's decision.
pub async fn session_middleware<S, U, T>(
    State(state): State<AppState<S, U, T>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let cookie_name = &state.sessions.config().cookie_name;
    let session_id = session_cookie_value(request.headers(), cookie_name);

    let resolution = match state.sessions.resolve(session_id.as_deref()).await {
        Ok(resolution) => resolution,
        Err(err) => return AppError(err).into_response(),
    };

    request.extensions_mut().insert(resolution.context);
    let mut response = next.run(request).await;

    if response.headers().contains_key(SET_COOKIE) {
        return response;
    }

    if let Some(value) = resolution.cookie.cookie().and_then(set_cookie_header) {
        response.headers_mut().append(SET_COOKIE, value);
    }

    response
}

impl<St> FromRequestParts<St> for Authenticated
where
    St: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<RequestContext>().ok_or_else(|| {
            AppError(AuthError::ConfigurationError(
                "session middleware is not installed".to_owned(),
            ))
        })?;

        Ok(Self(ctx.authorize()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_value_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("a=1; session=abc123"));

        assert_eq!(
            session_cookie_value(&headers, "session"),
            Some("abc123".to_owned())
        );
        assert_eq!(session_cookie_value(&HeaderMap::new(), "session"), None);
    }
}
