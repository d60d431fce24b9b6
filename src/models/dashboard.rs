// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Os cards do topo do tableau de bord
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub member_count: i64,             // Membros ativos
    pub paid_contributions: Decimal,   // Total já pago
    pub pending_contributions: i64,    // Cotisations aguardando pagamento
    pub meeting_count: i64,
    pub expenses_total: Decimal,
    pub total_balance: Decimal,        // Saldo do livro-caixa da mutuelle
}
