pub mod auth;
pub mod contribution;
pub mod dashboard;
pub mod expense;
pub mod meeting;
pub mod member;
pub mod mutuelle;
pub mod roles;

use rust_decimal::Decimal;
use validator::ValidationError;

// Valores monetários precisam ser estritamente positivos
pub(crate) fn validate_positive_amount(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Le montant doit être supérieur à zéro.".into());
        return Err(err);
    }
    Ok(())
}
