//! Explicit "current member" context handed to whatever needs to gate on
//! authentication. Hydrated once from a persisted access token and updated
//! only through [`SessionContext::login`] / [`SessionContext::logout`].

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::domain::{MemberId, MemberPosition};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub member_id: MemberId,
    pub member_nick: Option<String>,
    pub member_type: Option<MemberPosition>,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenClaims {
    #[serde(rename = "_id")]
    id: MemberId,
    #[serde(default)]
    member_nick: Option<String>,
    #[serde(default)]
    member_type: Option<MemberPosition>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Reads the member claims from a JWT payload. The signature is the server's
/// business; the client only needs to know who it is acting as.
pub fn decode_access_token(
    token: &str,
    now: DateTime<Utc>,
) -> Result<AuthenticatedMember, CatalogError> {
    let token = token.trim();
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(CatalogError::InvalidToken(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| CatalogError::InvalidToken(format!("payload is not base64url: {err}")))?;
    let claims: AccessTokenClaims = serde_json::from_slice(&bytes)
        .map_err(|err| CatalogError::InvalidToken(format!("unexpected claims: {err}")))?;

    if let Some(exp) = claims.exp {
        if exp <= now.timestamp() {
            return Err(CatalogError::InvalidToken("token expired".to_string()));
        }
    }

    Ok(AuthenticatedMember {
        member_id: claims.id,
        member_nick: claims.member_nick,
        member_type: claims.member_type,
        access_token: token.to_string(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    member: Arc<RwLock<Option<AuthenticatedMember>>>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builds the context from a persisted token. An unreadable or expired
    /// token leaves the session anonymous.
    pub fn hydrate(persisted_token: Option<&str>) -> Self {
        let member = persisted_token.and_then(|token| {
            match decode_access_token(token, Utc::now()) {
                Ok(member) => Some(member),
                Err(err) => {
                    warn!(error = %err, "ignoring persisted access token");
                    None
                }
            }
        });
        Self {
            member: Arc::new(RwLock::new(member)),
        }
    }

    pub async fn login(&self, token: &str) -> Result<MemberId, CatalogError> {
        let member = decode_access_token(token, Utc::now())?;
        let member_id = member.member_id.clone();
        *self.member.write().await = Some(member);
        info!(member_id = %member_id, "session: logged in");
        Ok(member_id)
    }

    pub async fn logout(&self) {
        if self.member.write().await.take().is_some() {
            info!("session: logged out");
        }
    }

    pub async fn current(&self) -> Option<AuthenticatedMember> {
        self.member.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.member.read().await.is_some()
    }
}
