//! Authenticated user extracted from the identity session cookie.
//!
//! Sign-in happens on the external auth service, which stores a signed JWT in
//! the identity cookie shared across the domain. Handlers only ever see the
//! validated claims.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// JWT claims issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User email.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Roles granted to this user, e.g. `fin`, `fin_admin`.
    pub roles: Vec<String>,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            name: claims.name,
            roles: claims.roles,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorInternalServerError("server config missing")));
        };

        let token = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => match identity.id() {
                Ok(token) => token,
                Err(_) => return ready(Err(ErrorUnauthorized("session has no identity"))),
            },
            Err(_) => return ready(Err(ErrorUnauthorized("not authenticated"))),
        };

        let key = DecodingKey::from_secret(config.secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(&token, &key, &validation) {
            Ok(data) => ready(Ok(data.claims.into())),
            Err(e) => {
                log::debug!("Rejected session token: {e}");
                ready(Err(ErrorUnauthorized("invalid session token")))
            }
        }
    }
}
