//! Pipeline Orchestrator (C9) — spec.md §4.9. `Pipeline::process` drives the
//! state machine: session resolution, the pending-clarification and
//! pending-approval short-circuits, and otherwise the full RESOLVE_REFS ->
//! CLASSIFY -> EXTRACT -> ENRICH -> REFINE -> GEN_RESPONSE chain, ending in
//! an execution gate, `StateManager::update`, and turn timing.

mod approval;
mod clarify;
mod error;
mod flatten;
mod gate;
mod sanitize;
mod types;

pub use error::CoreError;
pub use types::{ApprovalView, PendingClarificationView, TurnRequest, TurnResponse, TurnStatus, UiContext, UserProfileInput, VerificationPayload};

use std::collections::HashSet;
use std::sync::Arc;

use cba_catalog::IntentCatalog;
use cba_classifier::{classify, ClassificationCache, ClassifyContext, ClassifyRequest};
use cba_enricher::enrich;
use cba_extractor::{extract, EntityType, ExtractRequest, ExtractedEntity, ExtractionContext};
use cba_llm::Llm;
use cba_mock::Banking;
use cba_operations::{execute, OperationStatus, UserContext};
use cba_refiner::refine;
use cba_response::{generate, IntentMeta, ResponseType, UserProfile};
use cba_state::{PendingApproval, PendingClarification, SessionContext, StateManager};
use tracing::Instrument;

pub struct Pipeline {
    llm: Arc<dyn Llm>,
    banking: Arc<dyn Banking>,
    catalog: IntentCatalog,
    classification_cache: ClassificationCache,
    state: StateManager,
}

impl Pipeline {
    pub fn new(llm: Arc<dyn Llm>, banking: Arc<dyn Banking>, catalog: IntentCatalog, state: StateManager) -> Self {
        Self { llm, banking, catalog, classification_cache: ClassificationCache::new(), state }
    }

    #[tracing::instrument(skip(self, request), fields(session_id))]
    pub async fn process(&self, request: TurnRequest) -> TurnResponse {
        let started = std::time::Instant::now();
        let session_id = request.session_id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        tracing::Span::current().record("session_id", tracing::field::display(&session_id));

        if let Err(reason) = sanitize::sanitize(&request.query) {
            return error_response(session_id, None, 0.0, &[], CoreError::InputRejected(reason), started);
        }

        let mut context = self.state.get_context(&session_id).await;

        if let Some(clarification) = context.pending_clarification.clone() {
            return self.resume_clarification(&mut context, clarification, &request, started).await;
        }

        if context.get_pending_approval().is_some() {
            if let Some(approve) = approval::decision(&request.query) {
                let pending = context.pending_approval.clone().expect("checked above");
                return self.resolve_approval(&mut context, pending, approve, &request, started).await;
            }
        }

        let utterance = tracing::debug_span!("resolve_references")
            .in_scope(|| if request.skip_resolution { request.query.clone() } else { context.resolve_references(&request.query) });

        let classification = classify(
            self.llm.as_ref(),
            &self.catalog,
            &self.classification_cache,
            &ClassifyRequest { utterance: utterance.clone(), context: Some(ClassifyContext { last_intent: context.last_intent.clone() }), include_risk: true },
        )
        .instrument(tracing::debug_span!("classify"))
        .await;

        let mut entity_names = classification.required_entities.clone();
        entity_names.extend(classification.optional_entities.iter().cloned());
        let extraction = extract(
            self.llm.as_ref(),
            &ExtractRequest {
                utterance: utterance.clone(),
                intent_id: Some(classification.intent_id.clone()),
                required_entities: entity_names,
                context: Some(ExtractionContext { last_recipient: context.last_recipient.clone(), last_amount: context.last_amount }),
            },
        )
        .instrument(tracing::debug_span!("extract"))
        .await;

        let mut entities = extraction.entities;
        let Some(intent) = self.catalog.get(&classification.intent_id) else {
            let reason = CoreError::NotFound(format!("unrecognized intent '{}'", classification.intent_id));
            return error_response(session_id, Some(classification.intent_id), classification.confidence, &entities, reason, started);
        };
        enrich(self.banking.as_ref(), &intent.enrichment_requirements, &mut entities).instrument(tracing::debug_span!("enrich")).await;

        self.finish_turn(
            &mut context,
            &classification.intent_id,
            entities,
            &utterance,
            &request.query,
            classification.confidence,
            request.user_profile.as_ref(),
            extraction.warnings,
            started,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn finish_turn(
        &self,
        context: &mut SessionContext,
        intent_id: &str,
        entities: Vec<ExtractedEntity>,
        utterance: &str,
        original_query: &str,
        confidence: f64,
        user_profile: Option<&UserProfileInput>,
        warnings: Vec<String>,
        started: std::time::Instant,
    ) -> TurnResponse {
        let session_id = context.session_id.clone();

        if let Some(clarification) = clarify::ambiguous_clarification(intent_id, &entities) {
            context.set_pending_clarification(clarification.clone());
            self.state.update(context, original_query, utterance, intent_id, confidence, flatten::to_map(&entities)).await;
            return clarify::response(session_id, &clarification, started.elapsed().as_millis() as u64);
        }

        let (refined_id, _reason) = tracing::debug_span!("refine").in_scope(|| refine(intent_id, &entities, utterance));
        let Some(intent) = self.catalog.get(&refined_id) else {
            self.state.update(context, original_query, utterance, intent_id, confidence, flatten::to_map(&entities)).await;
            let reason = CoreError::NotFound(format!("unrecognized intent '{refined_id}'"));
            return error_response(session_id, Some(intent_id.to_string()), confidence, &entities, reason, started);
        };

        let missing_required = clarify::missing_for(intent, &entities);
        let suggestions: Vec<String> = missing_required.iter().map(|m| clarify::generic_suggestion(m)).collect();
        let profile = user_profile.map(user_profile_view);
        let generated = tracing::debug_span!("generate_response")
            .in_scope(|| generate(&intent_meta(intent), &entities, &missing_required, &suggestions, profile.as_ref(), chrono::Utc::now().time()));

        let entities_json = flatten::to_map(&entities);
        self.state.update(context, original_query, utterance, &refined_id, confidence, entities_json.clone()).await;

        match generated.response_type {
            ResponseType::MissingInfo => {
                let clarification = PendingClarification {
                    original_intent: refined_id.clone(),
                    original_entities: entities_json.clone(),
                    missing_entities: missing_required,
                    options: vec![],
                    awaiting_response: true,
                    created_at: chrono::Utc::now(),
                };
                context.set_pending_clarification(clarification.clone());
                self.state.save(context).await;
                clarify::response(session_id, &clarification, started.elapsed().as_millis() as u64)
            }
            ResponseType::ConfirmationNeeded => {
                let approval = self.suspend_approval(context, &refined_id, &entities, &entities_json).await;
                TurnResponse {
                    status: TurnStatus::ConfirmationNeeded,
                    session_id,
                    intent: Some(refined_id),
                    confidence,
                    entities: entities_json,
                    message: generated.message,
                    ui_assistance: None,
                    execution: None,
                    processing_time_ms: started.elapsed().as_millis() as u64,
                    requires_confirmation: true,
                    pending_clarification: None,
                    approval: Some(approval),
                    next_steps: None,
                    warnings,
                }
            }
            ResponseType::AuthRequired => TurnResponse {
                status: TurnStatus::AuthRequired,
                session_id,
                intent: Some(refined_id),
                confidence,
                entities: entities_json,
                message: generated.message,
                ui_assistance: generated.auth_challenge.as_ref().and_then(|c| serde_json::to_value(c).ok()),
                execution: None,
                processing_time_ms: started.elapsed().as_millis() as u64,
                requires_confirmation: false,
                pending_clarification: None,
                approval: None,
                next_steps: None,
                warnings,
            },
            ResponseType::Error => TurnResponse {
                status: TurnStatus::Error,
                session_id,
                intent: Some(refined_id),
                confidence,
                entities: entities_json,
                message: generated.message,
                ui_assistance: None,
                execution: None,
                processing_time_ms: started.elapsed().as_millis() as u64,
                requires_confirmation: false,
                pending_clarification: None,
                approval: None,
                next_steps: (!generated.follow_up_questions.is_empty()).then_some(generated.follow_up_questions),
                warnings,
            },
            ResponseType::Success | ResponseType::Warning | ResponseType::Info => {
                if !gate::is_executable(&refined_id) {
                    return TurnResponse {
                        status: TurnStatus::Info,
                        session_id,
                        intent: Some(refined_id),
                        confidence,
                        entities: entities_json,
                        message: generated.message,
                        ui_assistance: None,
                        execution: None,
                        processing_time_ms: started.elapsed().as_millis() as u64,
                        requires_confirmation: false,
                        pending_clarification: None,
                        approval: None,
                        next_steps: None,
                        warnings,
                    };
                }

                let user_context = user_profile.map(operation_user_context);
                let result = execute(self.banking.as_ref(), &self.catalog, &refined_id, &entities_json, user_context.as_ref())
                    .instrument(tracing::debug_span!("execute"))
                    .await;

                if result.status == OperationStatus::RequiresApproval {
                    let approval = self.suspend_approval(context, &refined_id, &entities, &entities_json).await;
                    return TurnResponse {
                        status: TurnStatus::ConfirmationNeeded,
                        session_id,
                        intent: Some(refined_id),
                        confidence,
                        entities: entities_json,
                        message: result.message.clone(),
                        ui_assistance: None,
                        execution: Some(result),
                        processing_time_ms: started.elapsed().as_millis() as u64,
                        requires_confirmation: true,
                        pending_clarification: None,
                        approval: Some(approval),
                        next_steps: None,
                        warnings,
                    };
                }

                TurnResponse {
                    status: if result.status == OperationStatus::Completed { TurnStatus::Success } else { TurnStatus::Error },
                    session_id,
                    intent: Some(refined_id),
                    confidence,
                    entities: entities_json,
                    message: generated.message,
                    ui_assistance: None,
                    next_steps: result.next_steps.clone(),
                    processing_time_ms: started.elapsed().as_millis() as u64,
                    requires_confirmation: false,
                    pending_clarification: None,
                    approval: None,
                    warnings,
                    execution: Some(result),
                }
            }
        }
    }

    async fn resume_clarification(
        &self,
        context: &mut SessionContext,
        clarification: PendingClarification,
        request: &TurnRequest,
        started: std::time::Instant,
    ) -> TurnResponse {
        let session_id = context.session_id.clone();

        if !clarification.options.is_empty() {
            if let Some(idx) = SessionContext::resolve_clarification(&request.query, &clarification.options) {
                let mut entities = flatten::from_map(&clarification.original_entities);
                clarify::resolve_recipient_choice(&mut entities, idx, self.banking.home_bank());
                context.clear_pending_clarification();
                return self
                    .finish_turn(
                        context,
                        &clarification.original_intent,
                        entities,
                        &request.query,
                        &request.query,
                        1.0,
                        request.user_profile.as_ref(),
                        vec![],
                        started,
                    )
                    .await;
            }
            self.state.save(context).await;
            return clarify::response(session_id, &clarification, started.elapsed().as_millis() as u64);
        }

        let extraction = extract(
            self.llm.as_ref(),
            &ExtractRequest {
                utterance: request.query.clone(),
                intent_id: Some(clarification.original_intent.clone()),
                required_entities: clarification.missing_entities.clone(),
                context: Some(ExtractionContext { last_recipient: context.last_recipient.clone(), last_amount: context.last_amount }),
            },
        )
        .await;

        let mut entities = flatten::from_map(&clarification.original_entities);
        for fresh in extraction.entities {
            entities.retain(|e| e.entity_type != fresh.entity_type);
            entities.push(fresh);
        }
        if let Some(intent) = self.catalog.get(&clarification.original_intent) {
            enrich(self.banking.as_ref(), &intent.enrichment_requirements, &mut entities).await;
        }

        let present: HashSet<&str> = entities.iter().map(|e| e.entity_type.as_str()).collect();
        let still_missing: Vec<String> = clarification.missing_entities.iter().filter(|m| !present.contains(m.as_str())).cloned().collect();

        if still_missing.is_empty() {
            context.clear_pending_clarification();
            return self
                .finish_turn(
                    context,
                    &clarification.original_intent,
                    entities,
                    &request.query,
                    &request.query,
                    1.0,
                    request.user_profile.as_ref(),
                    extraction.warnings,
                    started,
                )
                .await;
        }

        let updated = PendingClarification { missing_entities: still_missing, ..clarification };
        context.set_pending_clarification(updated.clone());
        self.state.save(context).await;
        clarify::response(session_id, &updated, started.elapsed().as_millis() as u64)
    }

    async fn resolve_approval(
        &self,
        context: &mut SessionContext,
        approval: PendingApproval,
        approve: bool,
        request: &TurnRequest,
        started: std::time::Instant,
    ) -> TurnResponse {
        let session_id = context.session_id.clone();

        if !approve {
            context.pending_approval = None;
            self.state.save(context).await;
            return TurnResponse {
                status: TurnStatus::Cancelled,
                session_id,
                intent: Some(approval.transaction_type.clone()),
                confidence: 1.0,
                entities: approval.details.get("entities").cloned().unwrap_or(serde_json::Value::Null),
                message: "the pending request has been cancelled".to_string(),
                ui_assistance: None,
                execution: None,
                processing_time_ms: started.elapsed().as_millis() as u64,
                requires_confirmation: false,
                pending_clarification: None,
                approval: None,
                next_steps: None,
                warnings: vec![],
            };
        }

        let verification = request.verification_data.clone().unwrap_or_default();
        let verified = context.verify_approval(verification.biometric_success, verification.pin.as_deref(), verification.security_answer.as_deref());

        if !verified {
            self.state.save(context).await;

            if let Some(remaining) = context.pending_approval.clone() {
                let expires_in_secs = (remaining.expires_at - chrono::Utc::now()).num_seconds().max(0);
                return TurnResponse {
                    status: TurnStatus::ConfirmationNeeded,
                    session_id,
                    intent: Some(approval.transaction_type.clone()),
                    confidence: 1.0,
                    entities: approval.details.get("entities").cloned().unwrap_or(serde_json::Value::Null),
                    message: "that verification didn't match; please try again".to_string(),
                    ui_assistance: None,
                    execution: None,
                    processing_time_ms: started.elapsed().as_millis() as u64,
                    requires_confirmation: true,
                    pending_clarification: None,
                    approval: Some(ApprovalView { approval_method: remaining.approval_method.clone(), expires_in_secs }),
                    next_steps: None,
                    warnings: vec![],
                };
            }

            let error = if approval.is_expired() { CoreError::ApprovalExpired } else { CoreError::ApprovalMaxAttempts };
            tracing::warn!(%error, "approval verification did not complete");
            return TurnResponse {
                status: TurnStatus::Error,
                session_id,
                intent: Some(approval.transaction_type.clone()),
                confidence: 1.0,
                entities: approval.details.get("entities").cloned().unwrap_or(serde_json::Value::Null),
                message: error.to_string(),
                ui_assistance: None,
                execution: None,
                processing_time_ms: started.elapsed().as_millis() as u64,
                requires_confirmation: false,
                pending_clarification: None,
                approval: None,
                next_steps: None,
                warnings: vec![],
            };
        }

        let operation_id = approval.details.get("operation_id").and_then(|v| v.as_str()).unwrap_or(&approval.transaction_type).to_string();
        let entities_json = approval.details.get("entities").cloned().unwrap_or_else(|| serde_json::json!({}));
        let user_context = request.user_profile.as_ref().map(operation_user_context);
        let result = execute(self.banking.as_ref(), &self.catalog, &operation_id, &entities_json, user_context.as_ref())
            .instrument(tracing::debug_span!("execute"))
            .await;

        self.state.update(context, &request.query, &request.query, &operation_id, 1.0, entities_json.clone()).await;

        TurnResponse {
            status: if result.status == OperationStatus::Completed { TurnStatus::Success } else { TurnStatus::Error },
            session_id,
            intent: Some(operation_id),
            confidence: 1.0,
            entities: entities_json,
            message: result.message.clone(),
            ui_assistance: None,
            next_steps: result.next_steps.clone(),
            processing_time_ms: started.elapsed().as_millis() as u64,
            requires_confirmation: false,
            pending_clarification: None,
            approval: None,
            warnings: vec![],
            execution: Some(result),
        }
    }

    async fn suspend_approval(&self, context: &mut SessionContext, intent_id: &str, entities: &[ExtractedEntity], entities_json: &serde_json::Value) -> ApprovalView {
        let amount = entities.iter().find(|e| e.entity_type == EntityType::Amount).and_then(|e| e.value.as_f64()).unwrap_or(0.0);
        let requested = self.banking.request_transaction_approval(intent_id, amount).await;
        let details = serde_json::json!({ "operation_id": intent_id, "entities": entities_json });
        let approval = PendingApproval::new(intent_id, amount, details, requested.approval_method.as_str(), requested.token);
        let view = ApprovalView { approval_method: approval.approval_method.clone(), expires_in_secs: requested.expires_in_secs as i64 };
        context.set_pending_approval(approval);
        self.state.save(context).await;
        view
    }
}

fn error_response(session_id: String, intent: Option<String>, confidence: f64, entities: &[ExtractedEntity], error: CoreError, started: std::time::Instant) -> TurnResponse {
    tracing::warn!(%error, "turn ended in error");
    TurnResponse {
        status: TurnStatus::Error,
        session_id,
        intent,
        confidence,
        entities: flatten::to_map(entities),
        message: error.to_string(),
        ui_assistance: None,
        execution: None,
        processing_time_ms: started.elapsed().as_millis() as u64,
        requires_confirmation: false,
        pending_clarification: None,
        approval: None,
        next_steps: None,
        warnings: vec![],
    }
}

fn intent_meta(intent: &cba_catalog::Intent) -> IntentMeta {
    IntentMeta {
        id: intent.id.clone(),
        name: intent.name.clone(),
        category: intent.category.clone(),
        subcategory: intent.subcategory.clone(),
        risk_level: intent.risk_level,
        auth_required: intent.auth_required,
        required_entities: intent.required_entities.clone(),
        optional_entities: intent.optional_entities.clone(),
        preconditions: intent.preconditions.clone(),
        daily_limit: intent.daily_limit,
    }
}

fn user_profile_view(profile: &UserProfileInput) -> UserProfile {
    UserProfile { user_id: profile.user_id.clone(), auth_level: profile.auth_level, available_balance: profile.available_balance }
}

fn operation_user_context(profile: &UserProfileInput) -> UserContext {
    UserContext { user_id: Some(profile.user_id.clone()), auth_level: Some(format!("{:?}", profile.auth_level)), available_balance: Some(profile.available_balance) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_llm::MockLlm;
    use cba_mock::MockBankingService;
    use cba_state::{InMemoryCache, InMemoryDatabase};

    fn pipeline() -> Pipeline {
        let state = StateManager::new(Arc::new(InMemoryCache::new()), Arc::new(InMemoryDatabase::new()));
        Pipeline::new(Arc::new(MockLlm), Arc::new(MockBankingService::new()), IntentCatalog::new(), state)
    }

    fn request(query: &str, session_id: Option<&str>) -> TurnRequest {
        TurnRequest {
            query: query.to_string(),
            session_id: session_id.map(str::to_string),
            skip_resolution: false,
            ui_context: None,
            user_profile: None,
            verification_data: None,
        }
    }

    fn request_with_pin(query: &str, session_id: Option<&str>, pin: &str) -> TurnRequest {
        TurnRequest { verification_data: Some(VerificationPayload { pin: Some(pin.to_string()), ..Default::default() }), ..request(query, session_id) }
    }

    // The collaborator stack here is the mock/demo one: `MockLlm` always
    // errors (by design, see its own doc comment) and the pattern phase only
    // ever produces amount/date/routing/phone/email/account_id. Utterances
    // below are chosen so every required entity they rely on is reachable
    // through that pattern phase alone, without a live model backing it.

    #[tokio::test]
    async fn balance_check_with_account_id_is_informational() {
        let pipeline = pipeline();
        let response = pipeline.process(request("what's my balance for account CHK001", None)).await;
        assert_eq!(response.status, TurnStatus::Info);
        assert!(response.execution.is_none());
    }

    #[tokio::test]
    async fn missing_account_id_clarifies_then_completes() {
        let pipeline = pipeline();
        let first = pipeline.process(request("what's my balance", None)).await;
        assert_eq!(first.status, TurnStatus::ClarificationNeeded);
        let missing = first.pending_clarification.as_ref().unwrap().missing_entities.clone();
        assert!(missing.contains(&"account_id".to_string()));

        let second = pipeline.process(request("CHK001", Some(&first.session_id))).await;
        assert_eq!(second.status, TurnStatus::Info);
    }

    #[tokio::test]
    async fn bill_pay_confirmation_then_approval_executes() {
        let pipeline = pipeline();
        let first = pipeline.process(request("pay my bill of $100 from CHK001", None)).await;
        assert_eq!(first.status, TurnStatus::ConfirmationNeeded);
        let approval = first.approval.as_ref().unwrap();
        assert_eq!(approval.approval_method, "pin");
        assert!(approval.expires_in_secs > 0);

        let second = pipeline.process(request_with_pin("yes confirm", Some(&first.session_id), "1234")).await;
        assert_eq!(second.status, TurnStatus::Success);
        assert_eq!(second.execution.unwrap().status, OperationStatus::Completed);
    }

    #[tokio::test]
    async fn approving_without_a_matching_pin_does_not_execute() {
        let pipeline = pipeline();
        let first = pipeline.process(request("pay my bill of $100 from CHK001", None)).await;
        assert_eq!(first.status, TurnStatus::ConfirmationNeeded);

        let second = pipeline.process(request("yes confirm", Some(&first.session_id))).await;
        assert_eq!(second.status, TurnStatus::ConfirmationNeeded);
        assert!(second.execution.is_none());
        assert!(second.approval.is_some());

        let third = pipeline.process(request_with_pin("yes confirm", Some(&first.session_id), "1234")).await;
        assert_eq!(third.status, TurnStatus::Success);
    }

    #[tokio::test]
    async fn approval_is_abandoned_after_max_attempts() {
        let pipeline = pipeline();
        let first = pipeline.process(request("pay my bill of $100 from CHK001", None)).await;
        assert_eq!(first.status, TurnStatus::ConfirmationNeeded);

        let session = Some(first.session_id.as_str());
        let second = pipeline.process(request_with_pin("yes confirm", session, "0000")).await;
        assert_eq!(second.status, TurnStatus::ConfirmationNeeded);
        let third = pipeline.process(request_with_pin("yes confirm", session, "0000")).await;
        assert_eq!(third.status, TurnStatus::ConfirmationNeeded);
        let fourth = pipeline.process(request_with_pin("yes confirm", session, "0000")).await;
        assert_eq!(fourth.status, TurnStatus::Error);
        assert!(fourth.approval.is_none());
    }

    #[tokio::test]
    async fn cancelling_a_pending_approval_clears_it() {
        let pipeline = pipeline();
        let first = pipeline.process(request("pay my bill of $100 from CHK001", None)).await;
        assert_eq!(first.status, TurnStatus::ConfirmationNeeded);

        let second = pipeline.process(request("no, cancel that", Some(&first.session_id))).await;
        assert_eq!(second.status, TurnStatus::Cancelled);
    }
}
