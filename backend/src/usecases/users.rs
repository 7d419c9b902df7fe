use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    entities::users::{InsertUserEntity, UserEntity},
    repositories::users::UserRepository,
    value_objects::{
        enums::user_roles::UserRole,
        users::{LoginModel, RegisterUserModel},
    },
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{auth, axum_http::error_responses::AppError};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub campus: String,
    pub role: String,
    pub rating_avg: f64,
    pub rating_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for UserDto {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            display_name: entity.display_name,
            campus: entity.campus,
            role: entity.role,
            rating_avg: entity.rating_avg,
            rating_count: entity.rating_count,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginDto {
    pub token: String,
    pub user: UserDto,
}

pub struct UserUseCase<T>
where
    T: UserRepository + Send + Sync + 'static,
{
    user_repository: Arc<T>,
}

impl<T> UserUseCase<T>
where
    T: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<T>) -> Self {
        Self { user_repository }
    }

    pub async fn register(&self, model: RegisterUserModel) -> Result<Uuid, AppError> {
        let email = model.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::BadRequest("A valid email is required".to_string()));
        }
        if model.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if model.display_name.trim().is_empty() {
            return Err(AppError::BadRequest("Display name is required".to_string()));
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            warn!(%email, "users: registration attempt for existing email");
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = auth::hash_password(&model.password)?;
        let now = Utc::now();
        let user_id = self
            .user_repository
            .register(InsertUserEntity {
                email: email.clone(),
                password_hash,
                display_name: model.display_name.trim().to_string(),
                campus: model.campus.trim().to_string(),
                role: UserRole::User.to_string(),
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(%user_id, "users: registered");
        Ok(user_id)
    }

    pub async fn login(&self, model: LoginModel) -> Result<LoginDto, AppError> {
        let email = model.email.trim().to_lowercase();

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) if user.is_active => user,
            _ => return Err(AppError::Unauthorized),
        };

        if !auth::verify_password(&model.password, &user.password_hash)? {
            warn!(%user.id, "users: login with wrong password");
            return Err(AppError::Unauthorized);
        }

        let token = auth::issue_token(user.id, &user.email, &user.role)
            .map_err(|_| AppError::Unauthorized)?;

        info!(%user.id, "users: logged in");
        Ok(LoginDto {
            token,
            user: UserDto::from(user),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserDto, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserDto::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::users::MockUserRepository;
    use mockall::predicate::eq;

    fn sample_user(email: &str, password: &str, is_active: bool) -> UserEntity {
        let now = Utc::now();
        UserEntity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: auth::hash_password(password).unwrap(),
            display_name: "Sam".to_string(),
            campus: "North".to_string(),
            role: UserRole::User.to_string(),
            is_active,
            rating_avg: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut user_repo = MockUserRepository::new();
        let existing = sample_user("taken@campus.edu", "longenoughpw", true);

        user_repo
            .expect_find_by_email()
            .with(eq("taken@campus.edu"))
            .returning(move |_| {
                let existing = existing.clone();
                Box::pin(async move { Ok(Some(existing)) })
            });

        let usecase = UserUseCase::new(Arc::new(user_repo));
        let result = usecase
            .register(RegisterUserModel {
                email: "Taken@campus.edu".to_string(),
                password: "longenoughpw".to_string(),
                display_name: "Sam".to_string(),
                campus: "North".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let user_repo = MockUserRepository::new();

        let usecase = UserUseCase::new(Arc::new(user_repo));
        let result = usecase
            .register(RegisterUserModel {
                email: "new@campus.edu".to_string(),
                password: "short".to_string(),
                display_name: "Sam".to_string(),
                campus: "North".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        unsafe { std::env::set_var("JWT_SECRET", "supersecretjwtsecretforunittesting123") };

        let mut user_repo = MockUserRepository::new();
        let user = sample_user("sam@campus.edu", "correct-password", true);

        user_repo.expect_find_by_email().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });

        let usecase = UserUseCase::new(Arc::new(user_repo));
        let result = usecase
            .login(LoginModel {
                email: "sam@campus.edu".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn login_rejects_deactivated_user() {
        let mut user_repo = MockUserRepository::new();
        let user = sample_user("sam@campus.edu", "correct-password", false);

        user_repo.expect_find_by_email().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });

        let usecase = UserUseCase::new(Arc::new(user_repo));
        let result = usecase
            .login(LoginModel {
                email: "sam@campus.edu".to_string(),
                password: "correct-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
