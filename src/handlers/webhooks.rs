// src/handlers/webhooks.rs
// Rota pública chamada pela página de retorno do Paystack. Sem auth_guard.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    models::contribution::VerifyPaymentPayload,
    services::{contribution_service::VerificationOutcome, payment_gateway::GatewayError},
};

const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

fn cors_headers() -> [(HeaderName, &'static str); 2] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
    ]
}

// OPTIONS /api/webhooks/paystack/verify
pub async fn verify_payment_preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

// POST /api/webhooks/paystack/verify
#[utoipa::path(
    post,
    path = "/api/webhooks/paystack/verify",
    tag = "Webhooks",
    request_body = VerifyPaymentPayload,
    responses(
        (status = 200, description = "{success: true, data} ou {success: false, message}"),
        (status = 400, description = "Paystack recusou a verificação"),
        (status = 500, description = "Configuração ausente, corpo inválido ou falha interna")
    )
)]
pub async fn verify_payment(
    State(app_state): State<AppState>,
    payload: Result<Json<VerifyPaymentPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!("Corpo inválido no webhook de verificação: {}", rejection.body_text());
            return failure(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text());
        }
    };

    let outcome = app_state
        .contribution_service
        .verify(&payload.reference, payload.contribution_id)
        .await;

    match outcome {
        Ok(VerificationOutcome::Paid { transaction, .. }) => (
            StatusCode::OK,
            cors_headers(),
            Json(json!({ "success": true, "data": transaction })),
        )
            .into_response(),
        Ok(VerificationOutcome::NotSuccessful { .. }) => (
            StatusCode::OK,
            cors_headers(),
            Json(json!({ "success": false, "message": "Payment not successful" })),
        )
            .into_response(),
        Err(err) => {
            let status = match &err {
                AppError::Gateway(GatewayError::Rejected { .. }) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(
                contribution_id = %payload.contribution_id,
                reference = %payload.reference,
                "Falha na verificação do pagamento: {:?}",
                err
            );
            failure(status, err.to_string())
        }
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (status, cors_headers(), Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
        Router,
    };
    use rust_decimal::Decimal;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        models::contribution::ContributionStatus,
        routes::app_router,
        test_support::{test_state, InMemoryContributionStore, InMemoryRoleStore, StubGateway},
    };

    struct Harness {
        app: Router,
        store: Arc<InMemoryContributionStore>,
        gateway: Arc<StubGateway>,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryContributionStore::default());
        let gateway = Arc::new(StubGateway::default());
        let state = test_state(Arc::new(InMemoryRoleStore::default()), store.clone(), gateway.clone());
        Harness { app: app_router(state), store, gateway }
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/webhooks/paystack/verify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
    }

    #[tokio::test]
    async fn preflight_returns_cors_headers_and_empty_body() {
        let h = harness();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/webhooks/paystack/verify")
            .body(Body::empty())
            .expect("request");

        let response = h.app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn verified_reference_marks_the_contribution_paid() {
        let h = harness();
        let mutuelle = Uuid::new_v4();
        let member = h.store.add_member(mutuelle, "Aïcha Traoré", Some("aicha@example.com"));
        let id = h.store.add_pending(mutuelle, member, Decimal::from(5000));
        h.gateway.set_verification("ref123", "success", id, Decimal::from(5000));

        let body = json!({ "reference": "ref123", "contributionId": id }).to_string();
        let response = h.app.oneshot(post(&body)).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        let json = read_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["reference"], "ref123");

        let stored = h.store.contributions();
        assert_eq!(stored[0].status, ContributionStatus::Paid);
        assert_eq!(stored[0].payment_reference.as_deref(), Some("ref123"));
        assert!(stored[0].paid_at.is_some());
    }

    #[tokio::test]
    async fn failed_payment_reports_success_false() {
        let h = harness();
        let mutuelle = Uuid::new_v4();
        let member = h.store.add_member(mutuelle, "Kofi", Some("kofi@example.com"));
        let id = h.store.add_pending(mutuelle, member, Decimal::from(1000));
        h.gateway.set_verification("ref-failed", "failed", id, Decimal::from(1000));

        let body = json!({ "reference": "ref-failed", "contributionId": id }).to_string();
        let response = h.app.oneshot(post(&body)).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Payment not successful");
        assert_eq!(h.store.contributions()[0].status, ContributionStatus::Pending);
    }

    #[tokio::test]
    async fn provider_rejection_is_a_bad_request() {
        let h = harness();
        let body = json!({ "reference": "unknown", "contributionId": Uuid::new_v4() }).to_string();

        let response = h.app.oneshot(post(&body)).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        assert_eq!(read_json(response).await["error"], "Transaction reference not found");
    }

    #[tokio::test]
    async fn missing_secret_is_a_server_error() {
        let h = harness();
        h.gateway.without_secret();
        let body = json!({ "reference": "ref123", "contributionId": Uuid::new_v4() }).to_string();

        let response = h.app.oneshot(post(&body)).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await["error"], "PAYSTACK_SECRET_KEY is not configured");
    }

    #[tokio::test]
    async fn unreadable_body_is_a_server_error() {
        let h = harness();

        let response = h.app.oneshot(post("{not json")).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        assert!(read_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn store_failure_is_a_server_error() {
        let h = harness();
        let id = Uuid::new_v4();
        h.gateway.set_verification("ref123", "success", id, Decimal::from(5000));
        h.store.fail_next();
        let body = json!({ "reference": "ref123", "contributionId": id }).to_string();

        let response = h.app.oneshot(post(&body)).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn reference_of_another_contribution_is_not_a_payment() {
        let h = harness();
        let mutuelle = Uuid::new_v4();
        let member = h.store.add_member(mutuelle, "Kofi", Some("kofi@example.com"));
        let paid = h.store.add_pending(mutuelle, member, Decimal::from(100));
        let other = h.store.add_pending(mutuelle, member, Decimal::from(500_000));
        h.gateway.set_verification("ref-small", "success", paid, Decimal::from(100));

        let body = json!({ "reference": "ref-small", "contributionId": other }).to_string();
        let response = h.app.oneshot(post(&body)).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["success"], false);
        assert_eq!(h.store.balance(mutuelle), Decimal::ZERO);
        assert!(h.store.contributions().iter().all(|c| c.status == ContributionStatus::Pending));
    }
}
