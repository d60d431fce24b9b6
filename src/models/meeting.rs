// src/models/meeting.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "meeting_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,

    #[schema(ignore)]
    pub mutuelle_id: Uuid,

    #[schema(example = "Assemblée générale")]
    pub title: String,

    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,

    #[schema(example = "Salle communale")]
    pub location: Option<String>,

    pub status: MeetingStatus,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeetingPayload {
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    #[schema(example = "Assemblée générale")]
    pub title: String,

    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub location: Option<String>,
}

// Edição parcial
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingPayload {
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub status: Option<MeetingStatus>,
    pub notes: Option<String>,
}

// Presença de um membro numa reunião (chave: reunião + membro)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeetingAttendance {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub member_id: Uuid,
    pub status: AttendanceStatus,
    pub marked_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendancePayload {
    pub member_id: Uuid,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}
