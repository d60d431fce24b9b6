// src/models/member.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "member_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

// Uma entrada do quadro de membros de uma mutuelle
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,

    #[schema(ignore)]
    pub mutuelle_id: Uuid,

    /// Preenchido apenas quando o membro tem login
    pub profile_id: Option<Uuid>,

    #[schema(example = "Aïcha Traoré")]
    pub full_name: String,

    #[schema(example = "aicha@example.com")]
    pub email: Option<String>,

    #[schema(example = "+225 07 00 00 00 00")]
    pub phone: Option<String>,

    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Formulário de criação/edição (o formulário envia sempre todos os campos)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    #[validate(length(min = 1, message = "Le nom complet est obligatoire."))]
    #[schema(example = "Aïcha Traoré")]
    pub full_name: String,

    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub status: Option<MemberStatus>,

    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberFilter {
    pub status: Option<MemberStatus>,
}
