// src/services/payment_gateway.rs

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::config::PaystackSettings;

#[derive(Debug, Error)]
pub enum GatewayError {
    // A mensagem é devolvida tal e qual pelo webhook
    #[error("PAYSTACK_SECRET_KEY is not configured")]
    NotConfigured,

    // O Paystack respondeu com status != 2xx
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Falha de comunicação com o Paystack: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Resposta inesperada do Paystack: {0}")]
    InvalidResponse(String),

    #[error("Valor não representável em subunidades: {0}")]
    InvalidAmount(Decimal),
}

// Vai para o Paystack em snake_case, como o front antigo enviava
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMetadata {
    pub contribution_id: Uuid,
    pub member_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializePayment {
    pub amount: Decimal,
    pub email: String,
    pub metadata: PaymentMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSession {
    pub authorization_url: String,
    pub access_code: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct VerifiedTransaction {
    /// Status da transação segundo o provedor ("success", "failed", "abandoned"...)
    pub status: String,
    /// Dados brutos da transação, repassados ao cliente do webhook
    pub data: Value,
}

impl VerifiedTransaction {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Cotisation gravada nos metadados quando a sessão foi aberta.
    pub fn contribution_id(&self) -> Option<Uuid> {
        // O Paystack devolve o objeto, ou a string JSON se foi enviado assim
        let metadata = match self.data.get("metadata")? {
            Value::String(encoded) => serde_json::from_str(encoded).ok()?,
            other => other.clone(),
        };
        metadata.get("contribution_id")?.as_str()?.parse().ok()
    }

    /// Valor cobrado, em subunidades.
    pub fn amount(&self) -> Option<i64> {
        self.data.get("amount")?.as_i64()
    }
}

/// Contrato do provedor de pagamento externo.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(&self, request: &InitializePayment) -> Result<PaymentSession, GatewayError>;

    async fn verify(&self, reference: &str) -> Result<VerifiedTransaction, GatewayError>;
}

// Envelope padrão das respostas do Paystack: { status, message, data }
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    message: Option<String>,
    data: Option<T>,
}

#[derive(Serialize)]
struct InitializeBody<'a> {
    amount: i64,
    email: &'a str,
    metadata: &'a PaymentMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
}

/// O Paystack trabalha em subunidades (centavos): 5000 -> 500000.
pub fn to_subunits(amount: Decimal) -> Result<i64, GatewayError> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .filter(|value| *value > 0)
        .ok_or(GatewayError::InvalidAmount(amount))
}

#[derive(Clone)]
pub struct PaystackClient {
    http: Client,
    base_url: Url,
    secret_key: Option<String>,
    currency: Option<String>,
    callback_url: Option<String>,
}

impl PaystackClient {
    pub fn new(settings: &PaystackSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.base_url).context("PAYSTACK_BASE_URL inválida")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("PAYSTACK_BASE_URL inválida: {}", settings.base_url);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Falha ao criar o cliente HTTP do Paystack")?;

        Ok(Self {
            http,
            base_url,
            secret_key: settings.secret_key.clone(),
            currency: settings.currency.clone(),
            callback_url: settings.callback_url.clone(),
        })
    }

    // A chave é lida a cada chamada: sem ela, só esta chamada falha
    fn secret(&self) -> Result<&str, GatewayError> {
        self.secret_key.as_deref().ok_or(GatewayError::NotConfigured)
    }

    // Os segmentos são codificados (a referência vem do cliente)
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidResponse("URL base sem caminho".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: Response,
        fallback_message: &str,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope<Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| fallback_message.to_string());
            tracing::error!("Paystack respondeu {}: {}", status, message);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        envelope
            .data
            .ok_or_else(|| GatewayError::InvalidResponse("campo `data` ausente".into()))
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn initialize(&self, request: &InitializePayment) -> Result<PaymentSession, GatewayError> {
        let secret = self.secret()?;
        let body = InitializeBody {
            amount: to_subunits(request.amount)?,
            email: &request.email,
            metadata: &request.metadata,
            currency: self.currency.as_deref(),
            callback_url: self.callback_url.as_deref(),
        };

        let response = self
            .http
            .post(self.endpoint(&["transaction", "initialize"])?)
            .bearer_auth(secret)
            .json(&body)
            .send()
            .await?;

        Self::read_envelope(response, "Failed to initialize payment").await
    }

    async fn verify(&self, reference: &str) -> Result<VerifiedTransaction, GatewayError> {
        let secret = self.secret()?;

        let response = self
            .http
            .get(self.endpoint(&["transaction", "verify", reference])?)
            .bearer_auth(secret)
            .send()
            .await?;

        let data: Value = Self::read_envelope(response, "Failed to verify payment").await?;
        let status = data
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(VerifiedTransaction { status, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn dec(units: i64) -> Decimal {
        Decimal::from(units)
    }

    fn client_for(server: &MockServer, secret: Option<&str>) -> PaystackClient {
        PaystackClient::new(&PaystackSettings {
            secret_key: secret.map(str::to_string),
            base_url: server.base_url(),
            currency: None,
            callback_url: None,
        })
        .expect("client")
    }

    fn metadata() -> PaymentMetadata {
        PaymentMetadata {
            contribution_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn amounts_are_sent_in_subunits() {
        assert_eq!(to_subunits(dec(5000)).unwrap(), 500_000);
        assert_eq!(to_subunits(Decimal::new(1050, 2)).unwrap(), 1050);
        assert!(matches!(to_subunits(Decimal::ZERO), Err(GatewayError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn initialize_returns_the_authorization_url() {
        let server = MockServer::start();
        let meta = metadata();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/transaction/initialize")
                .header("authorization", "Bearer sk_test_123")
                .json_body(json!({
                    "amount": 500000,
                    "email": "aicha@example.com",
                    "metadata": {
                        "contribution_id": meta.contribution_id,
                        "member_id": meta.member_id,
                    },
                }));
            then.status(200).json_body(json!({
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.paystack.com/abc",
                    "access_code": "abc",
                    "reference": "ref123",
                },
            }));
        });

        let session = client_for(&server, Some("sk_test_123"))
            .initialize(&InitializePayment {
                amount: dec(5000),
                email: "aicha@example.com".into(),
                metadata: meta.clone(),
            })
            .await
            .expect("session");

        assert_eq!(session.authorization_url, "https://checkout.paystack.com/abc");
        assert_eq!(session.reference.as_deref(), Some("ref123"));
        mock.assert();
    }

    #[tokio::test]
    async fn verify_reports_the_provider_status() {
        let server = MockServer::start();
        let meta = metadata();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/transaction/verify/ref123");
            then.status(200).json_body(json!({
                "status": true,
                "message": "Verification successful",
                "data": {
                    "status": "success",
                    "reference": "ref123",
                    "amount": 500000,
                    "metadata": { "contribution_id": meta.contribution_id, "member_id": meta.member_id },
                },
            }));
        });

        let transaction = client_for(&server, Some("sk_test_123"))
            .verify("ref123")
            .await
            .expect("transaction");

        assert!(transaction.is_success());
        assert_eq!(transaction.amount(), Some(500_000));
        assert_eq!(transaction.contribution_id(), Some(meta.contribution_id));
        mock.assert();
    }

    #[test]
    fn metadata_sent_as_a_json_string_is_read_too() {
        let id = Uuid::new_v4();
        let transaction = VerifiedTransaction {
            status: "success".into(),
            data: json!({ "metadata": json!({ "contribution_id": id }).to_string() }),
        };
        assert_eq!(transaction.contribution_id(), Some(id));

        let without = VerifiedTransaction { status: "success".into(), data: json!({ "metadata": "" }) };
        assert_eq!(without.contribution_id(), None);
        assert_eq!(without.amount(), None);
    }

    #[tokio::test]
    async fn verify_maps_http_errors_to_rejections() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/transaction/verify/unknown");
            then.status(400).json_body(json!({
                "status": false,
                "message": "Transaction reference not found",
            }));
        });

        let err = client_for(&server, Some("sk_test_123"))
            .verify("unknown")
            .await
            .unwrap_err();

        match err {
            GatewayError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Transaction reference not found");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        mock.assert();
    }

    #[tokio::test]
    async fn rejection_without_json_body_uses_default_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/transaction/verify/ref123");
            then.status(502).body("Bad Gateway");
        });

        let err = client_for(&server, Some("sk_test_123"))
            .verify("ref123")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to verify payment");
    }

    #[tokio::test]
    async fn missing_secret_never_reaches_the_provider() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/transaction/verify/ref123");
            then.status(200);
        });

        let err = client_for(&server, None).verify("ref123").await.unwrap_err();

        assert!(matches!(err, GatewayError::NotConfigured));
        mock.assert_calls(0);
    }

    #[test]
    fn references_are_percent_encoded_in_the_path() {
        let client = PaystackClient::new(&PaystackSettings {
            secret_key: None,
            base_url: "https://api.paystack.co".into(),
            currency: None,
            callback_url: None,
        })
        .expect("client");

        let url = client.endpoint(&["transaction", "verify", "a/b"]).expect("url");

        assert_eq!(url.as_str(), "https://api.paystack.co/transaction/verify/a%2Fb");
    }
}
