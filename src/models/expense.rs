// src/models/expense.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::validate_positive_amount;

// Lançamento simples de despesa, sem máquina de estados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    #[schema(ignore)]
    pub mutuelle_id: Uuid,

    #[schema(example = "Location de salle")]
    pub title: String,

    #[schema(example = "logistique")]
    pub category: String,

    pub description: Option<String>,

    #[schema(example = "15000.00")]
    pub amount: Decimal,

    pub paid_by: Option<Uuid>,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    #[schema(example = "Location de salle")]
    pub title: String,

    #[validate(length(min = 1, message = "La catégorie est obligatoire."))]
    #[schema(example = "logistique")]
    pub category: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive_amount"))]
    #[schema(example = "15000.00")]
    pub amount: Decimal,

    /// Padrão: agora
    pub paid_at: Option<DateTime<Utc>>,
}
