// src/services/meeting_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MeetingRepository,
    models::{
        meeting::{
            CreateMeetingPayload, MarkAttendancePayload, Meeting, MeetingAttendance, UpdateMeetingPayload,
        },
        roles::RoleScope,
    },
    services::access::{self, Access, Resource},
};

#[derive(Clone)]
pub struct MeetingService {
    repo: MeetingRepository,
}

impl MeetingService {
    pub fn new(repo: MeetingRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, scope: &RoleScope, mutuelle_id: Uuid) -> Result<Vec<Meeting>, AppError> {
        if !access::can(scope, mutuelle_id, Resource::Meeting, Access::Read) {
            return Ok(Vec::new());
        }
        self.repo.list(mutuelle_id).await
    }

    pub async fn create(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        created_by: Uuid,
        input: &CreateMeetingPayload,
    ) -> Result<Meeting, AppError> {
        access::ensure(scope, mutuelle_id, Resource::Meeting, Access::Write)?;
        self.repo.create(mutuelle_id, created_by, input).await
    }

    pub async fn update(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        id: Uuid,
        input: &UpdateMeetingPayload,
    ) -> Result<Meeting, AppError> {
        access::ensure(scope, mutuelle_id, Resource::Meeting, Access::Write)?;
        self.repo
            .update(mutuelle_id, id, input)
            .await?
            .ok_or(AppError::NotFound("meeting"))
    }

    pub async fn list_attendance(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        meeting_id: Uuid,
    ) -> Result<Vec<MeetingAttendance>, AppError> {
        if !access::can(scope, mutuelle_id, Resource::Meeting, Access::Read) {
            return Ok(Vec::new());
        }
        self.repo.list_attendance(mutuelle_id, meeting_id).await
    }

    /// Marca (ou remarca) a presença. Reunião e membro precisam ser da mesma mutuelle.
    pub async fn mark_attendance(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        meeting_id: Uuid,
        input: &MarkAttendancePayload,
    ) -> Result<MeetingAttendance, AppError> {
        access::ensure(scope, mutuelle_id, Resource::Meeting, Access::Write)?;
        self.repo
            .upsert_attendance(mutuelle_id, meeting_id, input)
            .await?
            .ok_or(AppError::NotFound("meeting_attendance"))
    }
}
