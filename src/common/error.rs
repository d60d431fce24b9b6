// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    services::payment_gateway::GatewayError,
};

// Nosso tipo de erro, agora com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // O usuário não tem papel na mutuelle pedida
    #[error("Nenhum papel atribuído")]
    NoRole,

    #[error("Acesso negado")]
    Forbidden,

    // Usuário com papéis em várias mutuelles (ou super admin) sem o cabeçalho x-mutuelle-id
    #[error("É preciso escolher uma mutuelle")]
    MutuelleSelectionRequired(Vec<Uuid>),

    #[error("Cabeçalho x-mutuelle-id inválido")]
    InvalidMutuelleHeader,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("O membro não tem e-mail cadastrado")]
    MissingContactInfo,

    #[error("Informe um tipo de cotisation ou um valor")]
    AmountOrConfigRequired,

    #[error("Valor inválido")]
    InvalidAmount,

    #[error("Tipo de cotisation inativo")]
    InactiveConfig,

    #[error("Papel incompatível com o escopo")]
    InvalidRoleScope,

    // Erros do gateway de pagamento (Paystack)
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Código estável usado como chave no catálogo de traduções.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::UserNotFound => "user_not_found",
            AppError::NoRole => "no_role",
            AppError::Forbidden => "forbidden",
            AppError::MutuelleSelectionRequired(_) => "mutuelle_selection_required",
            AppError::InvalidMutuelleHeader => "invalid_mutuelle_header",
            AppError::NotFound(_) => "not_found",
            AppError::MissingContactInfo => "missing_contact_info",
            AppError::AmountOrConfigRequired => "amount_or_config_required",
            AppError::InvalidAmount => "invalid_amount",
            AppError::InactiveConfig => "inactive_config",
            AppError::InvalidRoleScope => "invalid_role_scope",
            AppError::Gateway(GatewayError::Rejected { .. }) => "payment_rejected",
            AppError::Gateway(GatewayError::NotConfigured) => "payment_not_configured",
            AppError::Gateway(_) => "payment_unavailable",
            _ => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MutuelleSelectionRequired(_)
            | AppError::InvalidMutuelleHeader
            | AppError::MissingContactInfo
            | AppError::AmountOrConfigRequired
            | AppError::InvalidAmount
            | AppError::InactiveConfig
            | AppError::InvalidRoleScope => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NoRole | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // "Pagamento recusado" precisa ser distinguível de "erro do sistema"
            AppError::Gateway(GatewayError::Rejected { .. })
            | AppError::Gateway(GatewayError::Transport(_))
            | AppError::Gateway(GatewayError::InvalidResponse(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro interno na resposta da API, já traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        if status.is_server_error() {
            // O `tracing` loga a mensagem detalhada; o cliente recebe só a genérica.
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let details = match &self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                Some(Value::Object(details))
            }
            AppError::MutuelleSelectionRequired(ids) => Some(json!({ "mutuelleIds": ids })),
            AppError::NotFound(entity) => Some(json!({ "entity": entity })),
            AppError::Gateway(GatewayError::Rejected { message, .. }) => {
                Some(json!({ "provider": message }))
            }
            _ => None,
        };

        ApiError {
            status,
            error: store.translate(&locale.0, self.code()).to_string(),
            details,
        }
    }
}

// A resposta de erro que sai pela API
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    fn fr() -> Locale {
        Locale("fr".to_string())
    }

    #[test]
    fn provider_rejection_is_distinct_from_store_failure() {
        let declined = AppError::Gateway(GatewayError::Rejected {
            status: 400,
            message: "Transaction reference not found".into(),
        });
        let store = AppError::DatabaseError(sqlx::Error::RowNotFound);

        assert_eq!(declined.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(declined.code(), store.code());
    }

    #[test]
    fn missing_secret_is_a_server_error() {
        let err = AppError::Gateway(GatewayError::NotConfigured);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "payment_not_configured");
    }

    #[test]
    fn validation_details_are_keyed_by_field() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("Le nom est obligatoire.".into());
        errors.add("fullName", err);

        let api = AppError::ValidationError(errors).to_api_error(&fr(), &I18nStore::default());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert_eq!(details["fullName"][0], "Le nom est obligatoire.");
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let api = AppError::InternalServerError(anyhow::anyhow!("pool timed out"))
            .to_api_error(&fr(), &I18nStore::default());

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool"));
    }
}
