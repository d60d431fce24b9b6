// src/models/contribution.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::validate_positive_amount;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contribution_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContributionType {
    Monthly,
    Surprise,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contribution_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Pending, // En attente
    Paid,    // Payé (só depois da verificação no Paystack)
}

// --- Structs ---

// Modelo de cotisation (mensal, surpresa, especial)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionConfig {
    pub id: Uuid,

    #[schema(ignore)]
    pub mutuelle_id: Uuid,

    #[schema(example = "Cotisation mensuelle")]
    pub name: String,

    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: ContributionType,

    #[schema(example = "5000.00")]
    pub amount: Decimal,

    #[schema(example = "Mensuel")]
    pub frequency: Option<String>,

    pub is_active: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigPayload {
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    #[schema(example = "Cotisation mensuelle")]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ContributionType,

    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(example = "5000.00")]
    pub amount: Decimal,

    pub frequency: Option<String>,
    pub description: Option<String>,
}

// Edição parcial: só os campos enviados mudam
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigPayload {
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<ContributionType>,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Option<Decimal>,

    pub frequency: Option<String>,
    pub is_active: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfigFilter {
    pub active: Option<bool>,
}

// Uma cotisation de um membro
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: Uuid,

    #[schema(ignore)]
    pub mutuelle_id: Uuid,

    pub member_id: Uuid,
    pub config_id: Option<Uuid>,

    #[schema(example = "5000.00")]
    pub amount: Decimal,

    pub status: ContributionStatus,

    #[schema(example = "paystack")]
    pub payment_method: String,

    #[schema(example = "ref123")]
    pub payment_reference: Option<String>,

    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha do histórico (com os nomes para a tela)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub contribution: Contribution,

    #[schema(example = "Aïcha Traoré")]
    pub member_name: String,

    #[schema(example = "Cotisation mensuelle")]
    pub config_name: Option<String>,
}

/// Dados para inserir uma cotisation pendente
#[derive(Debug, Clone, PartialEq)]
pub struct NewContribution {
    pub mutuelle_id: Uuid,
    pub member_id: Uuid,
    pub config_id: Option<Uuid>,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiateContributionPayload {
    pub member_id: Uuid,

    pub config_id: Option<Uuid>,

    /// Substitui o valor do modelo quando informado
    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(example = "5000.00")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InitiateQuery {
    /// `true`: responde 303 com Location apontando para a página de pagamento
    #[serde(default)]
    pub redirect: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiatedContribution {
    pub contribution: Contribution,

    #[schema(example = "https://checkout.paystack.com/0peioxfhpn")]
    pub authorization_url: String,
}

// Corpo do webhook de verificação
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentPayload {
    #[schema(example = "ref123")]
    pub reference: String,
    pub contribution_id: Uuid,
}
