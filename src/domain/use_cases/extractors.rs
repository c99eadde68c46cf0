use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{entities::token::Claims, errors::AuthError};

/// The authenticated caller, taken from the claims the auth middleware
/// attached to the request. Fails with `MissingCredentials` when there are
/// none, so public routes take `Option<CurrentUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
}

impl TryFrom<&Claims> for CurrentUser {
    type Error = AuthError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;
        Ok(CurrentUser {
            user_id,
            username: claims.username.clone(),
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = match req.extensions().get::<Claims>() {
            Some(claims) => CurrentUser::try_from(claims).map_err(actix_web::Error::from),
            None => Err(AuthError::MissingCredentials.into()),
        };
        ready(result)
    }
}
