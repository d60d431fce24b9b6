// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        ConfigRepository, ContributionRepository, ContributionStore, DashboardRepository,
        ExpenseRepository, MeetingRepository, MemberRepository, MutuelleRepository,
        ProfileRepository, RoleRepository, RoleStore,
    },
    services::{
        auth::AuthService,
        config_service::ConfigService,
        contribution_service::ContributionService,
        dashboard_service::DashboardService,
        expense_service::ExpenseService,
        meeting_service::MeetingService,
        member_service::MemberService,
        mutuelle_service::MutuelleService,
        payment_gateway::{PaymentGateway, PaystackClient},
        role_service::RoleService,
    },
};

pub const DEFAULT_PAYSTACK_URL: &str = "https://api.paystack.co";

#[derive(Debug, Clone)]
pub struct PaystackSettings {
    // Opcional: a ausência só derruba as chamadas de pagamento
    pub secret_key: Option<String>,
    pub base_url: String,
    pub currency: Option<String>,
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub paystack: PaystackSettings,
}

impl Settings {
    /// Lê a configuração do ambiente (e do `.env`, se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Variáveis vazias contam como ausentes
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = optional("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = optional("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let max_connections = match optional("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {raw}"))?,
            None => 5,
        };

        let secret_key = optional("PAYSTACK_SECRET_KEY");
        if secret_key.is_none() {
            tracing::warn!("⚠️ PAYSTACK_SECRET_KEY não definida: pagamentos vão falhar");
        }

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            max_connections,
            paystack: PaystackSettings {
                secret_key,
                base_url: optional("PAYSTACK_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PAYSTACK_URL.to_string()),
                currency: optional("PAYSTACK_CURRENCY"),
                callback_url: optional("PAYSTACK_CALLBACK_URL"),
            },
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub role_service: RoleService,
    pub contribution_service: ContributionService,
    pub config_service: ConfigService,
    pub member_service: MemberService,
    pub mutuelle_service: MutuelleService,
    pub expense_service: ExpenseService,
    pub meeting_service: MeetingService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let gateway = PaystackClient::new(&settings.paystack)?;

        Ok(Self::from_parts(
            db_pool.clone(),
            &settings.jwt_secret,
            Arc::new(RoleRepository::new(db_pool.clone())),
            Arc::new(ContributionRepository::new(db_pool)),
            Arc::new(gateway),
        ))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(
        db_pool: PgPool,
        jwt_secret: &str,
        role_store: Arc<dyn RoleStore>,
        contribution_store: Arc<dyn ContributionStore>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let auth_service = AuthService::new(
            ProfileRepository::new(db_pool.clone()),
            MemberRepository::new(db_pool.clone()),
            jwt_secret.to_string(),
            db_pool.clone(),
        );

        Self {
            i18n_store: Arc::new(I18nStore::default()),
            auth_service,
            role_service: RoleService::new(role_store),
            contribution_service: ContributionService::new(contribution_store, gateway),
            config_service: ConfigService::new(ConfigRepository::new(db_pool.clone())),
            member_service: MemberService::new(MemberRepository::new(db_pool.clone())),
            mutuelle_service: MutuelleService::new(MutuelleRepository::new(db_pool.clone())),
            expense_service: ExpenseService::new(ExpenseRepository::new(db_pool.clone())),
            meeting_service: MeetingService::new(MeetingRepository::new(db_pool.clone())),
            dashboard_service: DashboardService::new(DashboardRepository::new(db_pool.clone())),
            db_pool,
        }
    }
}
