// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MemberRepository, ProfileRepository},
    models::auth::{Claims, Profile, RegisterUserPayload, UpdateProfilePayload},
};

#[derive(Clone)]
pub struct AuthService {
    profile_repo: ProfileRepository,
    member_repo: MemberRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        profile_repo: ProfileRepository,
        member_repo: MemberRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self { profile_repo, member_repo, jwt_secret, pool }
    }

    pub async fn register_user(&self, input: &RegisterUserPayload) -> Result<String, AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = input.password.clone();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Cria o perfil
        let profile = self
            .profile_repo
            .create_profile(
                &mut *tx,
                &input.email,
                &input.full_name,
                input.phone.as_deref(),
                &hashed_password,
            )
            .await?;

        // 3. Liga as entradas do quadro de membros com o mesmo e-mail
        let linked = self
            .member_repo
            .link_profile_by_email(&mut *tx, profile.id, &profile.email)
            .await?;

        if linked > 0 {
            tracing::info!("🔗 Perfil vinculado a {} membros na transação.", linked);
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        self.create_token(profile.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let profile = self
            .profile_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = profile.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(profile.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Profile, AppError> {
        let claims = self.decode_claims(token)?;

        self.profile_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Profile, AppError> {
        self.profile_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn update_profile(&self, id: Uuid, input: &UpdateProfilePayload) -> Result<Profile, AppError> {
        self.profile_repo
            .update_profile(id, &input.full_name, input.phone.as_deref())
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lazy_pool;

    fn service(secret: &str) -> AuthService {
        let pool = lazy_pool();
        AuthService::new(
            ProfileRepository::new(pool.clone()),
            MemberRepository::new(pool.clone()),
            secret.to_string(),
            pool,
        )
    }

    #[tokio::test]
    async fn issued_token_carries_the_profile_id() {
        let svc = service("secret");
        let user = Uuid::new_v4();

        let token = svc.create_token(user).expect("token");
        let claims = svc.decode_claims(&token).expect("claims");

        assert_eq!(claims.sub, user);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let token = service("one").create_token(Uuid::new_v4()).expect("token");

        let result = service("two").decode_claims(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        assert!(matches!(service("secret").decode_claims("not-a-jwt"), Err(AppError::InvalidToken)));
    }
}
