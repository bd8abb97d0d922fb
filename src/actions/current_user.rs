use crate::session::AuthContext;
use crate::{AuthError, User, UserRepository};

pub struct CurrentUserAction<U> {
    user_repository: U,
}

impl<U: UserRepository> CurrentUserAction<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    /// Reads the caller's user fresh from storage.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "current_user", skip_all, err))]
    pub async fn execute(&self, ctx: &AuthContext) -> Result<User, AuthError> {
        self.user_repository
            .find_user_by_id(ctx.user_id())
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}
