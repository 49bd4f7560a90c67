use crate::application::{
    error::{ApplicationError, ApplicationResult},
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    ports::{security::TokenManager, time::Clock},
};
use crate::domain::user::{UserId, UserRepository};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    username: String,
    role: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Signed bearer tokens: base64(claims JSON) + "." + base64(HMAC-SHA256).
/// Tokens carry identity only; capabilities are re-derived from the stored
/// user on every request, so a deactivated account is locked out immediately.
pub struct HmacTokenManager {
    key: Vec<u8>,
    ttl: Duration,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl HmacTokenManager {
    pub fn new(
        secret: &[u8],
        ttl_seconds: i64,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            key: secret.to_vec(),
            ttl: Duration::seconds(ttl_seconds),
            users,
            clock,
        }
    }

    fn sign(&self, payload: &[u8]) -> ApplicationResult<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify_signature(&self, payload: &[u8], signature: &[u8]) -> ApplicationResult<()> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        mac.update(payload);
        mac.verify_slice(signature)
            .map_err(|_| ApplicationError::unauthorized("invalid token"))
    }
}

fn invalid_token() -> ApplicationError {
    ApplicationError::unauthorized("invalid token")
}

#[async_trait]
impl TokenManager for HmacTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            sub: i64::from(subject.user_id),
            username: subject.username,
            role: subject.role.as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let encoded = URL_SAFE_NO_PAD.encode(&payload);
        let signature = self.sign(encoded.as_bytes())?;

        Ok(AuthTokenDto {
            token: format!("{encoded}.{}", URL_SAFE_NO_PAD.encode(signature)),
            issued_at,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let (encoded, signature) = token.split_once('.').ok_or_else(invalid_token)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| invalid_token())?;
        self.verify_signature(encoded.as_bytes(), &signature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| invalid_token())?;
        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| invalid_token())?;

        let now = self.clock.now();
        if claims.exp <= now.timestamp() {
            return Err(ApplicationError::unauthorized("token expired"));
        }

        let issued_at = DateTime::<Utc>::from_timestamp(claims.iat, 0).ok_or_else(invalid_token)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(invalid_token)?;

        let user_id = UserId::new(claims.sub).map_err(|_| invalid_token())?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApplicationError::unauthorized("user is not active"))?;

        // Role and capabilities come from the stored user, not the claims.
        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username.to_string(),
            role: user.role,
            capabilities: user.role.default_capabilities(),
            is_active: user.is_active,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainResult;
    use crate::domain::user::{NewUser, PasswordHash, Role, User, Username};
    use std::sync::Mutex;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[derive(Default)]
    struct InMemoryUsers {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUsers {
        fn with(user: User) -> Self {
            Self {
                users: Mutex::new(vec![user]),
            }
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn count(&self) -> DomainResult<u64> {
            Ok(self.users.lock().unwrap().len() as u64)
        }

        async fn insert(&self, _new_user: NewUser) -> DomainResult<User> {
            unimplemented!("not used by these tests")
        }

        async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.username == *username)
                .cloned())
        }

        async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.id == id)
                .cloned())
        }
    }

    fn sample_user(is_active: bool) -> User {
        User {
            id: UserId::new(1).unwrap(),
            username: Username::new("alice").unwrap(),
            password_hash: PasswordHash::new("hash").unwrap(),
            role: Role::Customer,
            is_active,
            created_at: Utc::now(),
        }
    }

    fn manager(users: InMemoryUsers, now: DateTime<Utc>) -> HmacTokenManager {
        HmacTokenManager::new(
            b"0123456789abcdef0123456789abcdef",
            3600,
            Arc::new(users),
            Arc::new(FixedClock(now)),
        )
    }

    #[tokio::test]
    async fn issue_then_authenticate() {
        let user = sample_user(true);
        let now = Utc::now();
        let manager = manager(InMemoryUsers::with(user.clone()), now);

        let token = manager
            .issue(TokenSubject::from_user(&user))
            .await
            .unwrap();
        let resolved = manager.authenticate(&token.token).await.unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.role, Role::Customer);
        assert!(resolved.has_capability("reviews", "create"));
        assert!(!resolved.has_capability("products", "create"));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let user = sample_user(true);
        let manager = manager(InMemoryUsers::with(user.clone()), Utc::now());

        let token = manager
            .issue(TokenSubject::from_user(&user))
            .await
            .unwrap();
        let mut tampered = token.token;
        tampered.replace_range(0..1, "x");

        let err = manager.authenticate(&tampered).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn inactive_user_is_rejected() {
        let user = sample_user(false);
        let manager = manager(InMemoryUsers::with(user.clone()), Utc::now());

        let token = manager
            .issue(TokenSubject::from_user(&user))
            .await
            .unwrap();
        let err = manager.authenticate(&token.token).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let user = sample_user(true);
        let issued = Utc::now() - Duration::hours(2);
        let issuer = manager(InMemoryUsers::with(user.clone()), issued);
        let token = issuer.issue(TokenSubject::from_user(&user)).await.unwrap();

        let verifier = manager(InMemoryUsers::with(user), Utc::now());
        let err = verifier.authenticate(&token.token).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
