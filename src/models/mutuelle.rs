// src/models/mutuelle.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Mutuelle (o tenant raiz)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Mutuelle {
    pub id: Uuid,

    #[schema(example = "Mutuelle des Enseignants")]
    pub name: String,

    #[schema(example = "Entraide des enseignants du quartier")]
    pub description: Option<String>,

    #[schema(example = "125000.00")]
    pub total_balance: Decimal,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutuellePayload {
    #[validate(length(min = 1, message = "Le nom de la mutuelle est obligatoire."))]
    #[schema(example = "Mutuelle des Enseignants")]
    pub name: String,

    pub description: Option<String>,
}
