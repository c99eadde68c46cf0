use std::sync::Arc;

use validator::Validate;

use crate::auth::password::{verify_dummy, verify_password};
use crate::entities::token::AuthResponse;
use crate::entities::user::{SignInRequest, User};
use crate::errors::AuthError;
use crate::repositories::token::TokenServiceRepository;
use crate::repositories::user::UserRepository;

pub struct AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub user_repo: Arc<R>,
    pub token_service: T,
}

impl<R, T> AuthHandler<R, T>
where
    R: UserRepository + ?Sized,
    T: TokenServiceRepository,
{
    pub fn new(user_repo: Arc<R>, token_service: T) -> Self {
        AuthHandler {
            user_repo,
            token_service,
        }
    }

    /// Signs a user in by checking the password against the stored argon2 hash
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self
            .user_repo
            .get_user_by_username(&request.username)
            .await
            .map_err(|e| {
                tracing::error!("User lookup failed: {}", e);
                AuthError::WrongCredentials
            })?;
        let Some(user) = user else {
            verify_dummy(&request.password);
            return Err(AuthError::WrongCredentials);
        };

        if !user.is_active {
            tracing::warn!("Sign-in attempt for inactive user {}", user.username);
            return Err(AuthError::WrongCredentials);
        }

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!("Password verification failed: {}", e);
                AuthError::WrongCredentials
            })?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let response = self.create_auth_response(&user)?;

        tracing::info!("User {} signed in", user.username);
        Ok(response)
    }

    pub fn create_auth_response(&self, user: &User) -> Result<AuthResponse, AuthError> {
        let access_token = self.token_service.create_jwt(user).map_err(|e| {
            tracing::warn!("Failed to create JWT: {}", e);
            AuthError::TokenCreation
        })?;

        Ok(AuthResponse::new(access_token))
    }
}
