mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::CreateTodoAction;
pub use delete::DeleteTodoAction;
pub use get::GetTodoAction;
pub use list::{ITEMS_PER_PAGE, ListTodosAction};
pub use update::UpdateTodoAction;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Utc};

    use crate::todos::Todo;
    use crate::{AuthContext, Session, User};

    pub fn context() -> AuthContext {
        let user = User::mock();
        AuthContext {
            session: Session {
                id: "session123".to_owned(),
                user_id: user.id.clone(),
                expires_at: Utc::now() + Duration::days(30),
                created_at: Utc::now(),
            },
            user,
        }
    }

    pub fn todo(user_id: &str, title: &str, age: Duration) -> Todo {
        let created_at = Utc::now() - age;
        Todo {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            title: title.to_owned(),
            description: String::new(),
            completed: false,
            created_at,
            updated_at: created_at,
        }
    }
}
