// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_me,
        handlers::auth::get_my_scope,
        handlers::auth::get_my_roles,

        // --- Mutuelles ---
        handlers::mutuelles::list_mutuelles,
        handlers::mutuelles::create_mutuelle,
        handlers::mutuelles::update_mutuelle,

        // --- Roles ---
        handlers::roles::grant_role,

        // --- Members ---
        handlers::members::list_members,
        handlers::members::create_member,
        handlers::members::update_member,
        handlers::members::delete_member,

        // --- Contributions ---
        handlers::contribution_configs::list_configs,
        handlers::contribution_configs::create_config,
        handlers::contribution_configs::update_config,
        handlers::contributions::list_contributions,
        handlers::contributions::initiate_contribution,

        // --- Expenses ---
        handlers::expenses::list_expenses,
        handlers::expenses::create_expense,
        handlers::expenses::delete_expense,

        // --- Meetings ---
        handlers::meetings::list_meetings,
        handlers::meetings::create_meeting,
        handlers::meetings::update_meeting,
        handlers::meetings::list_attendance,
        handlers::meetings::mark_attendance,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Webhooks ---
        handlers::webhooks::verify_payment,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Profile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateProfilePayload,
            models::auth::AuthResponse,

            // --- Roles ---
            models::roles::AppRole,
            models::roles::ScopedRole,
            models::roles::UserRole,
            models::roles::ScopeResponse,
            models::roles::GrantRolePayload,

            // --- Mutuelles ---
            models::mutuelle::Mutuelle,
            models::mutuelle::MutuellePayload,

            // --- Members ---
            models::member::MemberStatus,
            models::member::Member,
            models::member::MemberPayload,

            // --- Contributions ---
            models::contribution::ContributionType,
            models::contribution::ContributionStatus,
            models::contribution::ContributionConfig,
            models::contribution::CreateConfigPayload,
            models::contribution::UpdateConfigPayload,
            models::contribution::Contribution,
            models::contribution::ContributionSummary,
            models::contribution::InitiateContributionPayload,
            models::contribution::InitiatedContribution,
            models::contribution::VerifyPaymentPayload,

            // --- Expenses ---
            models::expense::Expense,
            models::expense::CreateExpensePayload,

            // --- Meetings ---
            models::meeting::MeetingStatus,
            models::meeting::AttendanceStatus,
            models::meeting::Meeting,
            models::meeting::CreateMeetingPayload,
            models::meeting::UpdateMeetingPayload,
            models::meeting::MeetingAttendance,
            models::meeting::MarkAttendancePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Perfil e escopo do usuário"),
        (name = "Mutuelles", description = "Gestão das mutuelles"),
        (name = "Roles", description = "Atribuição de papéis"),
        (name = "Members", description = "Quadro de membros"),
        (name = "Contributions", description = "Cotisations e pagamentos"),
        (name = "Expenses", description = "Despesas"),
        (name = "Meetings", description = "Reuniões e presenças"),
        (name = "Dashboard", description = "Indicadores"),
        (name = "Webhooks", description = "Retorno do Paystack")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
