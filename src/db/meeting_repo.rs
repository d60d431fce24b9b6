// src/db/meeting_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::meeting::{
        CreateMeetingPayload, MarkAttendancePayload, Meeting, MeetingAttendance, UpdateMeetingPayload,
    },
};

#[derive(Clone)]
pub struct MeetingRepository {
    pool: PgPool,
}

impl MeetingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, mutuelle_id: Uuid) -> Result<Vec<Meeting>, AppError> {
        let meetings = sqlx::query_as::<_, Meeting>(
            "SELECT * FROM meetings WHERE mutuelle_id = $1 ORDER BY scheduled_at DESC",
        )
        .bind(mutuelle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(meetings)
    }

    pub async fn create(
        &self,
        mutuelle_id: Uuid,
        created_by: Uuid,
        input: &CreateMeetingPayload,
    ) -> Result<Meeting, AppError> {
        let meeting = sqlx::query_as::<_, Meeting>(
            r#"
            INSERT INTO meetings (mutuelle_id, title, description, scheduled_at, location, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(mutuelle_id)
        .bind(&input.title)
        .bind(input.description.as_deref())
        .bind(input.scheduled_at)
        .bind(input.location.as_deref())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(meeting)
    }

    pub async fn update(
        &self,
        mutuelle_id: Uuid,
        id: Uuid,
        input: &UpdateMeetingPayload,
    ) -> Result<Option<Meeting>, AppError> {
        let meeting = sqlx::query_as::<_, Meeting>(
            r#"
            UPDATE meetings
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                scheduled_at = COALESCE($5, scheduled_at),
                location = COALESCE($6, location),
                status = COALESCE($7, status),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1 AND mutuelle_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(mutuelle_id)
        .bind(input.title.as_deref())
        .bind(input.description.as_deref())
        .bind(input.scheduled_at)
        .bind(input.location.as_deref())
        .bind(input.status)
        .bind(input.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(meeting)
    }

    pub async fn list_attendance(
        &self,
        mutuelle_id: Uuid,
        meeting_id: Uuid,
    ) -> Result<Vec<MeetingAttendance>, AppError> {
        let rows = sqlx::query_as::<_, MeetingAttendance>(
            r#"
            SELECT a.id, a.meeting_id, a.member_id, a.status, a.marked_at, a.notes
            FROM meeting_attendance a
            JOIN meetings mt ON mt.id = a.meeting_id
            WHERE a.meeting_id = $1 AND mt.mutuelle_id = $2
            ORDER BY a.marked_at ASC NULLS LAST
            "#,
        )
        .bind(meeting_id)
        .bind(mutuelle_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Uma linha por (reunião, membro): marcar de novo sobrescreve.
    /// O membro precisa pertencer à mesma mutuelle da reunião.
    pub async fn upsert_attendance(
        &self,
        mutuelle_id: Uuid,
        meeting_id: Uuid,
        input: &MarkAttendancePayload,
    ) -> Result<Option<MeetingAttendance>, AppError> {
        let row = sqlx::query_as::<_, MeetingAttendance>(
            r#"
            INSERT INTO meeting_attendance (meeting_id, member_id, status, marked_at, notes)
            SELECT mt.id, mb.id, $4, NOW(), $5
            FROM meetings mt
            JOIN members mb ON mb.mutuelle_id = mt.mutuelle_id
            WHERE mt.id = $1 AND mt.mutuelle_id = $2 AND mb.id = $3
            ON CONFLICT (meeting_id, member_id)
            DO UPDATE SET status = EXCLUDED.status,
                          marked_at = EXCLUDED.marked_at,
                          notes = EXCLUDED.notes
            RETURNING id, meeting_id, member_id, status, marked_at, notes
            "#,
        )
        .bind(meeting_id)
        .bind(mutuelle_id)
        .bind(input.member_id)
        .bind(input.status)
        .bind(input.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
