//! Authentication service
//!
//! Email/password accounts with bcrypt hashes and JWT access tokens.

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    AuthTokenResponse, LoginRequest, PaginatedResponse, PaginationParams, RegisterRequest, User,
    UserResponse, UserRole,
};

use super::jwt::{generate_access_token, JwtError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Admin accounts cannot be self-registered")]
    RoleNotAllowed,

    #[error("User not found")]
    UserNotFound,

    #[error("Administrators cannot delete their own account")]
    CannotDeleteSelf,

    #[error("Password hashing failed: {0}")]
    HashError(String),

    #[error("Token error: {0}")]
    TokenError(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AuthError::EmailTaken
            }
            _ => AuthError::DatabaseError(e.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::TokenError(e.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::EmailTaken => ApiError::Conflict(e.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            AuthError::RoleNotAllowed | AuthError::CannotDeleteSelf => {
                ApiError::Forbidden(e.to_string())
            }
            AuthError::UserNotFound => ApiError::NotFound(e.to_string()),
            AuthError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            AuthError::HashError(_) | AuthError::TokenError(_) => {
                ApiError::InternalError(e.to_string())
            }
        }
    }
}

async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .map_err(|e| AuthError::HashError(e.to_string()))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
    jwt_secret: String,
    access_token_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(db_pool: PgPool, jwt_secret: String, access_token_ttl_seconds: i64) -> Self {
        Self {
            db_pool,
            jwt_secret,
            access_token_ttl_seconds,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Create an account and sign it in
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthTokenResponse, AuthError> {
        let role = request.role.unwrap_or(UserRole::Buyer);
        if role == UserRole::Admin {
            return Err(AuthError::RoleNotAllowed);
        }

        let email = request.email.trim().to_lowercase();
        let user = self
            .insert_user(&email, request.name.as_deref(), role, request.password)
            .await?;

        tracing::info!(user_id = %user.id, role = role.as_str(), "User registered");

        self.issue_token(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthTokenResponse, AuthError> {
        let email = request.email.trim().to_lowercase();
        let user: User = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(request.password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(user)
    }

    fn issue_token(&self, user: User) -> Result<AuthTokenResponse, AuthError> {
        let jti = Uuid::new_v4().to_string();
        let access_token =
            generate_access_token(&user, &jti, &self.jwt_secret, self.access_token_ttl_seconds)?;

        Ok(AuthTokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl_seconds,
            user: user.into(),
        })
    }

    async fn insert_user(
        &self,
        email: &str,
        name: Option<&str>,
        role: UserRole,
        password: String,
    ) -> Result<User, AuthError> {
        let password_hash = hash_password(password).await?;
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, role, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(role)
        .bind(&password_hash)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<User, AuthError> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn list_users(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<UserResponse>, AuthError> {
        let (page, limit, offset) = params.resolve();

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db_pool)
            .await?;

        let users: Vec<User> =
            sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.db_pool)
                .await?;

        Ok(PaginatedResponse {
            data: users.into_iter().map(UserResponse::from).collect(),
            total,
            page,
            limit,
        })
    }

    pub async fn update_role(&self, user_id: Uuid, role: UserRole) -> Result<User, AuthError> {
        let user: User = sqlx::query_as(
            "UPDATE users SET role = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(role)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user_id, role = role.as_str(), "User role changed");

        Ok(user)
    }

    pub async fn delete_user(&self, acting_user: Uuid, user_id: Uuid) -> Result<(), AuthError> {
        if acting_user == user_id {
            return Err(AuthError::CannotDeleteSelf);
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }

    /// Create the bootstrap admin account unless the email is already registered
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.trim().to_lowercase();
        let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.db_pool)
            .await?;

        match existing {
            Some(user) if user.role == UserRole::Admin => Ok(()),
            Some(user) => {
                tracing::warn!(user_id = %user.id, "Bootstrap admin email belongs to a non-admin account");
                Ok(())
            }
            None => {
                let user = self
                    .insert_user(&email, Some("Administrator"), UserRole::Admin, password.to_string())
                    .await?;
                tracing::info!(user_id = %user.id, "Bootstrap admin created");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse".to_string()).await.unwrap();
        assert!(verify_password("correct horse".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[test]
    fn test_auth_error_status_mapping() {
        use axum::http::StatusCode;

        let cases = [
            (AuthError::EmailTaken, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::CannotDeleteSelf, StatusCode::FORBIDDEN),
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }
}
