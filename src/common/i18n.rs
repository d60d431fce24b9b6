// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "fr";

// Mensagens exibidas ao usuário final, por código de erro
const FR: &[(&str, &str)] = &[
    ("validation_failed", "Un ou plusieurs champs sont invalides."),
    ("email_already_exists", "Cet e-mail est déjà utilisé."),
    ("invalid_credentials", "E-mail ou mot de passe invalide."),
    ("invalid_token", "Jeton d'authentification invalide ou absent."),
    ("user_not_found", "Utilisateur introuvable."),
    ("no_role", "Aucun rôle ne vous a été attribué."),
    ("forbidden", "Vous n'avez pas l'autorisation d'effectuer cette action."),
    ("mutuelle_selection_required", "Veuillez sélectionner une mutuelle (en-tête x-mutuelle-id)."),
    ("invalid_mutuelle_header", "L'en-tête x-mutuelle-id doit être un UUID valide."),
    ("not_found", "Ressource introuvable."),
    ("missing_contact_info", "Email du membre introuvable"),
    ("amount_or_config_required", "Choisissez un type de cotisation ou saisissez un montant."),
    ("invalid_amount", "Le montant doit être supérieur à zéro."),
    ("inactive_config", "Ce type de cotisation n'est plus actif."),
    ("invalid_role_scope", "Ce rôle n'est pas compatible avec la mutuelle indiquée."),
    ("payment_rejected", "Le paiement a été refusé par le prestataire."),
    ("payment_not_configured", "Le paiement en ligne n'est pas configuré."),
    ("payment_unavailable", "Le service de paiement est indisponible."),
    ("internal_error", "Une erreur inattendue s'est produite."),
];

const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("email_already_exists", "This e-mail is already in use."),
    ("invalid_credentials", "Invalid e-mail or password."),
    ("invalid_token", "Authentication token is invalid or missing."),
    ("user_not_found", "User not found."),
    ("no_role", "No role has been assigned to you."),
    ("forbidden", "You are not allowed to perform this action."),
    ("mutuelle_selection_required", "Please select a mutuelle (x-mutuelle-id header)."),
    ("invalid_mutuelle_header", "The x-mutuelle-id header must be a valid UUID."),
    ("not_found", "Resource not found."),
    ("missing_contact_info", "Member e-mail not found."),
    ("amount_or_config_required", "Choose a contribution type or enter an amount."),
    ("invalid_amount", "The amount must be greater than zero."),
    ("inactive_config", "This contribution type is no longer active."),
    ("invalid_role_scope", "This role does not match the given mutuelle."),
    ("payment_rejected", "The payment was rejected by the provider."),
    ("payment_not_configured", "Online payment is not configured."),
    ("payment_unavailable", "The payment service is unavailable."),
    ("internal_error", "An unexpected error occurred."),
];

/// Catálogo de mensagens por idioma. O francês é o idioma padrão.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("fr", FR.iter().copied().collect());
        catalogs.insert("en", EN.iter().copied().collect());
        Self { catalogs }
    }
}

impl I18nStore {
    pub fn translate<'a>(&'a self, lang: &str, code: &'a str) -> &'a str {
        self.lookup(lang, code)
            .or_else(|| self.lookup(DEFAULT_LANG, code))
            .unwrap_or(code)
    }

    fn lookup(&self, lang: &str, code: &str) -> Option<&'static str> {
        self.catalogs.get(lang)?.get(code).copied()
    }
}
