// src/services/contribution_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ContributionStore,
    models::{
        contribution::{
            Contribution, ContributionSummary, InitiateContributionPayload, InitiatedContribution,
            NewContribution,
        },
        roles::{RoleScope, ScopedRole},
    },
    services::{
        access::{self, Access, Resource},
        payment_gateway::{
            to_subunits, InitializePayment, PaymentGateway, PaymentMetadata, VerifiedTransaction,
        },
    },
};

/// Resultado da verificação de um pagamento junto ao provedor.
#[derive(Debug)]
pub enum VerificationOutcome {
    Paid { contribution: Contribution, transaction: Value },
    NotSuccessful { status: String },
}

#[derive(Clone)]
pub struct ContributionService {
    store: Arc<dyn ContributionStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl ContributionService {
    pub fn new(store: Arc<dyn ContributionStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { store, gateway }
    }

    pub async fn list(&self, scope: &RoleScope, mutuelle_id: Uuid) -> Result<Vec<ContributionSummary>, AppError> {
        if !access::can(scope, mutuelle_id, Resource::Contribution, Access::Read) {
            return Ok(Vec::new());
        }
        self.store.list_contributions(mutuelle_id).await
    }

    /// Cria (ou reaproveita) a cotisation pendente e abre a sessão de pagamento.
    /// Não espera o pagamento: quem confirma é o webhook de verificação.
    pub async fn initiate(
        &self,
        scope: &RoleScope,
        mutuelle_id: Uuid,
        input: &InitiateContributionPayload,
    ) -> Result<InitiatedContribution, AppError> {
        access::ensure(scope, mutuelle_id, Resource::Contribution, Access::Write)?;

        // Um membro só paga a própria cotisation
        if let RoleScope::Scoped { role: ScopedRole::Member, member_id, .. } = scope {
            if *member_id != Some(input.member_id) {
                return Err(AppError::Forbidden);
            }
        }

        if input.config_id.is_none() && input.amount.is_none() {
            return Err(AppError::AmountOrConfigRequired);
        }
        if input.amount.is_some_and(|amount| amount <= Decimal::ZERO) {
            return Err(AppError::InvalidAmount);
        }

        let config = match input.config_id {
            Some(config_id) => {
                let config = self
                    .store
                    .find_config(config_id)
                    .await?
                    .filter(|c| c.mutuelle_id == mutuelle_id)
                    .ok_or(AppError::NotFound("contribution_config"))?;
                if !config.is_active {
                    return Err(AppError::InactiveConfig);
                }
                Some(config)
            }
            None => None,
        };

        let amount = input
            .amount
            .or(config.as_ref().map(|c| c.amount))
            .ok_or(AppError::AmountOrConfigRequired)?;

        let member = self
            .store
            .find_member(input.member_id)
            .await?
            .filter(|m| m.mutuelle_id == mutuelle_id)
            .ok_or(AppError::NotFound("member"))?;

        // Sem e-mail não há sessão de pagamento; validado antes de gravar qualquer coisa
        let email = member
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(AppError::MissingContactInfo)?
            .to_string();

        let new_contribution = NewContribution {
            mutuelle_id,
            member_id: member.id,
            config_id: config.as_ref().map(|c| c.id),
            amount,
        };

        let contribution = match self.store.find_reusable_pending(&new_contribution).await? {
            Some(existing) => {
                tracing::info!(contribution_id = %existing.id, "Reaproveitando cotisation pendente");
                existing
            }
            None => {
                let created = self.store.insert_pending(&new_contribution).await?;
                tracing::info!(contribution_id = %created.id, %amount, "Cotisation criada (pendente)");
                created
            }
        };

        let session = self
            .gateway
            .initialize(&InitializePayment {
                amount,
                email,
                metadata: PaymentMetadata { contribution_id: contribution.id, member_id: member.id },
            })
            .await
            .map_err(|e| {
                tracing::warn!(
                    contribution_id = %contribution.id,
                    "Sessão de pagamento não criada; cotisation continua pendente: {}",
                    e
                );
                e
            })?;

        Ok(InitiatedContribution { contribution, authorization_url: session.authorization_url })
    }

    /// Confirma o pagamento junto ao provedor e marca a cotisation como paga.
    /// A transação só quita a cotisation que ela mesma descreve (metadados e valor).
    /// Verificar de novo uma cotisation já paga não escreve nada.
    pub async fn verify(&self, reference: &str, contribution_id: Uuid) -> Result<VerificationOutcome, AppError> {
        let transaction = self.gateway.verify(reference).await?;

        if !transaction.is_success() {
            tracing::warn!(%contribution_id, reference, status = %transaction.status, "Pagamento não confirmado");
            return Ok(VerificationOutcome::NotSuccessful { status: transaction.status });
        }

        let contribution = self
            .store
            .find_contribution(contribution_id)
            .await?
            .ok_or(AppError::NotFound("contribution"))?;

        if let Some(mismatch) = self.mismatch(&transaction, &contribution, reference).await? {
            tracing::warn!(%contribution_id, reference, mismatch, "Transação não corresponde à cotisation");
            return Ok(VerificationOutcome::NotSuccessful { status: mismatch.to_string() });
        }

        let contribution = match self.store.mark_paid(contribution_id, reference).await? {
            Some(paid) => {
                tracing::info!(%contribution_id, reference, "Cotisation paga");
                paid
            }
            // Já estava paga: devolve a linha gravada
            None => self
                .store
                .find_contribution(contribution_id)
                .await?
                .ok_or(AppError::NotFound("contribution"))?,
        };

        Ok(VerificationOutcome::Paid { contribution, transaction: transaction.data })
    }

    async fn mismatch(
        &self,
        transaction: &VerifiedTransaction,
        contribution: &Contribution,
        reference: &str,
    ) -> Result<Option<&'static str>, AppError> {
        if transaction.contribution_id() != Some(contribution.id) {
            return Ok(Some("metadata_mismatch"));
        }
        if transaction.amount() != Some(to_subunits(contribution.amount)?) {
            return Ok(Some("amount_mismatch"));
        }
        let holder = self.store.find_by_reference(reference).await?;
        if holder.is_some_and(|other| other.id != contribution.id) {
            return Ok(Some("reference_already_used"));
        }
        Ok(None)
    }
}
