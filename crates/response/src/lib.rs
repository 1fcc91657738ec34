//! Response Generator (C6) — spec.md §4.6. `generate` runs the decision
//! order (missing info → confirmation → auth → preconditions → high-risk
//! backstop → success) and never performs I/O; all required context is
//! passed in by the caller (`cba-pipeline`).

mod message;
mod preconditions;
mod types;

pub use preconditions::evaluate as evaluate_preconditions;
pub use types::{AuthChallenge, GeneratedResponse, IntentMeta, PreconditionResult, PreconditionStatus, ResponseType, UserProfile};

use cba_catalog::RiskLevel;
use cba_extractor::{EntityType, ExtractedEntity};
use chrono::NaiveTime;

pub fn generate(
    intent: &IntentMeta,
    entities: &[ExtractedEntity],
    missing_required: &[String],
    suggestions: &[String],
    user_profile: Option<&UserProfile>,
    now: NaiveTime,
) -> GeneratedResponse {
    if !missing_required.is_empty() {
        return GeneratedResponse {
            response_type: ResponseType::MissingInfo,
            message: "A few more details are needed to continue.".to_string(),
            missing_required: missing_required.to_vec(),
            follow_up_questions: suggestions.to_vec(),
            auth_challenge: None,
            preconditions: vec![],
            risk_warning: None,
        };
    }

    if matches!(intent.risk_level, RiskLevel::Medium | RiskLevel::High | RiskLevel::Critical) {
        let lines = message::confirmation_lines(entities, &intent.required_entities, &intent.optional_entities);
        let message = if lines.is_empty() {
            format!("Please confirm: {}.", intent.name)
        } else {
            format!("Please confirm {}:\n{}", intent.name, lines.join("\n"))
        };
        return GeneratedResponse {
            response_type: ResponseType::ConfirmationNeeded,
            message,
            missing_required: vec![],
            follow_up_questions: vec![],
            auth_challenge: None,
            preconditions: vec![],
            risk_warning: None,
        };
    }

    if let Some(profile) = user_profile {
        if profile.auth_level < intent.auth_required {
            return GeneratedResponse {
                response_type: ResponseType::AuthRequired,
                message: format!("This action requires a higher authentication level ({:?}).", intent.auth_required),
                missing_required: vec![],
                follow_up_questions: vec![],
                auth_challenge: Some(AuthChallenge { required_level: intent.auth_required, methods: challenge_methods(intent.auth_required), timeout: 300 }),
                preconditions: vec![],
                risk_warning: None,
            };
        }
    }

    let amount = entities.iter().find(|e| e.entity_type == EntityType::Amount).and_then(|e| e.value.as_f64());
    let precondition_results = preconditions::evaluate(&intent.preconditions, amount, intent.daily_limit, user_profile, now);
    if let Some(failed) = precondition_results.iter().find(|p| p.status == PreconditionStatus::Failed) {
        return GeneratedResponse {
            response_type: ResponseType::Error,
            message: failed.message.clone().unwrap_or_else(|| format!("{} failed", failed.name)),
            missing_required: vec![],
            follow_up_questions: failed.action_required.clone().into_iter().collect(),
            auth_challenge: None,
            preconditions: precondition_results,
            risk_warning: None,
        };
    }

    // Defensive backstop: medium/high/critical risk already returned above.
    // Kept as an explicit check per the original design so a future change
    // to the risk-level branch above can never silently skip confirmation.
    if matches!(intent.risk_level, RiskLevel::High | RiskLevel::Critical) {
        return GeneratedResponse {
            response_type: ResponseType::ConfirmationNeeded,
            message: format!("This is a {:?}-risk action and requires explicit confirmation.", intent.risk_level),
            missing_required: vec![],
            follow_up_questions: vec![],
            auth_challenge: None,
            preconditions: precondition_results,
            risk_warning: Some(format!("{:?} risk action", intent.risk_level)),
        };
    }

    GeneratedResponse {
        response_type: ResponseType::Success,
        message: message::success_message(&intent.category, &intent.subcategory, &intent.name, entities),
        missing_required: vec![],
        follow_up_questions: vec![],
        auth_challenge: None,
        preconditions: precondition_results,
        risk_warning: None,
    }
}

fn challenge_methods(level: cba_catalog::AuthLevel) -> Vec<String> {
    use cba_catalog::AuthLevel;
    match level {
        AuthLevel::None => vec![],
        AuthLevel::Basic => vec!["pin".to_string()],
        AuthLevel::Full => vec!["pin".to_string(), "security_question".to_string()],
        AuthLevel::Challenge => vec!["biometric".to_string(), "pin".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_catalog::AuthLevel;
    use cba_extractor::EntitySource;

    fn base_intent() -> IntentMeta {
        IntentMeta {
            id: "accounts.balance.check".to_string(),
            name: "Check Balance".to_string(),
            category: "accounts".to_string(),
            subcategory: "balance".to_string(),
            risk_level: RiskLevel::Low,
            auth_required: AuthLevel::Basic,
            required_entities: vec![],
            optional_entities: vec![],
            preconditions: vec![],
            daily_limit: None,
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn missing_required_takes_priority() {
        let intent = base_intent();
        let response = generate(&intent, &[], &["amount".to_string()], &["What amount?".to_string()], None, noon());
        assert_eq!(response.response_type, ResponseType::MissingInfo);
    }

    #[test]
    fn medium_risk_requires_confirmation() {
        let mut intent = base_intent();
        intent.risk_level = RiskLevel::Medium;
        let response = generate(&intent, &[], &[], &[], None, noon());
        assert_eq!(response.response_type, ResponseType::ConfirmationNeeded);
    }

    #[test]
    fn insufficient_auth_triggers_challenge() {
        let mut intent = base_intent();
        intent.auth_required = AuthLevel::Full;
        let profile = UserProfile { user_id: "u1".to_string(), auth_level: AuthLevel::Basic, available_balance: 1000.0 };
        let response = generate(&intent, &[], &[], &[], Some(&profile), noon());
        assert_eq!(response.response_type, ResponseType::AuthRequired);
        assert!(response.auth_challenge.is_some());
    }

    #[test]
    fn failed_precondition_surfaces_error() {
        let mut intent = base_intent();
        intent.preconditions = vec!["balance_check".to_string()];
        let profile = UserProfile { user_id: "u1".to_string(), auth_level: AuthLevel::Basic, available_balance: 10.0 };
        let entities = vec![ExtractedEntity::new(EntityType::Amount, serde_json::json!(500.0), "$500", 0.85, EntitySource::Pattern)];
        let response = generate(&intent, &entities, &[], &[], Some(&profile), noon());
        assert_eq!(response.response_type, ResponseType::Error);
    }

    #[test]
    fn success_templates_balance_message() {
        let intent = base_intent();
        let mut account_entity = ExtractedEntity::new(EntityType::AccountId, serde_json::json!("CHK001"), "CHK001", 0.95, EntitySource::Enrichment);
        account_entity.enriched_record = Some(serde_json::json!({"id": "CHK001", "name": "Primary Checking", "type": "checking", "balance": 5000.0, "currency": "USD"}));
        let response = generate(&intent, &[account_entity], &[], &[], None, noon());
        assert_eq!(response.response_type, ResponseType::Success);
        assert!(response.message.contains("$5,000.00"));
    }
}
