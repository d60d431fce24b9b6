// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{auth::auth_guard, scope::scope_guard},
};

pub fn app_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do próprio usuário (só auth_guard)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me).put(handlers::auth::update_me))
        .route("/me/scope", get(handlers::auth::get_my_scope))
        .route("/me/roles", get(handlers::auth::get_my_roles))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Rotas de uma mutuelle: auth_guard roda primeiro, depois scope_guard
    let mutuelle_routes = Router::new()
        .route(
            "/api/mutuelles",
            get(handlers::mutuelles::list_mutuelles).post(handlers::mutuelles::create_mutuelle),
        )
        .route("/api/mutuelles/{id}", put(handlers::mutuelles::update_mutuelle))
        .route("/api/roles", post(handlers::roles::grant_role))
        .route(
            "/api/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/api/members/{id}",
            put(handlers::members::update_member).delete(handlers::members::delete_member),
        )
        .route(
            "/api/contribution-configs",
            get(handlers::contribution_configs::list_configs)
                .post(handlers::contribution_configs::create_config),
        )
        .route(
            "/api/contribution-configs/{id}",
            put(handlers::contribution_configs::update_config),
        )
        .route("/api/contributions", get(handlers::contributions::list_contributions))
        .route(
            "/api/contributions/initiate",
            post(handlers::contributions::initiate_contribution),
        )
        .route(
            "/api/expenses",
            get(handlers::expenses::list_expenses).post(handlers::expenses::create_expense),
        )
        .route(
            "/api/expenses/{id}",
            axum::routing::delete(handlers::expenses::delete_expense),
        )
        .route(
            "/api/meetings",
            get(handlers::meetings::list_meetings).post(handlers::meetings::create_meeting),
        )
        .route("/api/meetings/{id}", put(handlers::meetings::update_meeting))
        .route(
            "/api/meetings/{id}/attendance",
            get(handlers::meetings::list_attendance).put(handlers::meetings::mark_attendance),
        )
        .route("/api/dashboard/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), scope_guard))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Webhook público do Paystack
    let webhook_routes = Router::new().route(
        "/api/webhooks/paystack/verify",
        post(handlers::webhooks::verify_payment).options(handlers::webhooks::verify_payment_preflight),
    );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .merge(mutuelle_routes)
        .merge(webhook_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
