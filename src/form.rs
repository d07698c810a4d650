//! Form engine
//!
//! [`Form`] ties the value store, touched tracker and validator together and
//! drives submission. One instance backs one data-entry screen: the screen
//! forwards change/blur/submit events and renders `values()`/`errors()`.
//!
//! Submission moves through `Idle → Validating → Transporting → Settled`.
//! An invalid form goes straight back to `Idle` without touching the
//! transport; a form without a transport settles with its own values.

use crate::error::FormError;
use crate::state::{Errors, FormState, SUBMIT_ERROR_KEY};
use crate::transport::{Method, SubmitTarget, Transport};
use crate::validation::{RuleSet, Validator};
use crate::Values;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Completion callback, invoked with the transport result (or the raw
/// values for a local-only form)
pub type OnSubmit = Box<dyn FnMut(&Value) -> anyhow::Result<()> + Send>;

/// Where a submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Transporting,
    Settled,
}

/// Result of a submission that did not fail in the transport
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; the transport was not called
    Invalid(Errors),
    /// The transport result, or the form values when no transport is set
    Submitted(Value),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// A change coming from an input control
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub name: String,
    pub value: Value,
}

impl ChangeEvent {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Text-like inputs and selects carry their string value
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::String(value.into()))
    }

    /// Checkboxes carry their checked state instead of a value
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self::new(name, Value::Bool(checked))
    }
}

/// Holds the in-flight flag up for the duration of a transport call.
/// Dropping it (including when the submit future is cancelled) clears the
/// flag; a phase still at `Transporting` falls back to `Idle`.
struct InFlight<'a> {
    flag: &'a watch::Sender<bool>,
    phase: &'a mut SubmitPhase,
}

impl<'a> InFlight<'a> {
    fn begin(flag: &'a watch::Sender<bool>, phase: &'a mut SubmitPhase) -> Self {
        *phase = SubmitPhase::Transporting;
        flag.send_replace(true);
        Self { flag, phase }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
        if *self.phase == SubmitPhase::Transporting {
            *self.phase = SubmitPhase::Idle;
        }
    }
}

pub struct Form {
    state: FormState,
    validator: Validator,
    transport: Option<(Arc<dyn Transport>, SubmitTarget)>,
    on_submit: Option<OnSubmit>,
    phase: SubmitPhase,
}

impl Form {
    /// Local-only form with rules and no transport
    pub fn new(initial: Values, rules: RuleSet) -> Self {
        Self::builder(initial).rules(rules).build()
    }

    pub fn builder(initial: Values) -> FormBuilder {
        FormBuilder {
            initial,
            rules: RuleSet::default(),
            transport: None,
            on_submit: None,
        }
    }

    // --- exposed state ---

    pub fn values(&self) -> &Values {
        self.state.values.all()
    }

    pub fn value(&self, name: &str) -> &Value {
        self.state.values.get(name)
    }

    pub fn errors(&self) -> &Errors {
        &self.state.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.state.error(name)
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        self.state.touched.fields()
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.state.touched.is_touched(name)
    }

    pub fn is_dirty(&self) -> bool {
        self.state.values.is_dirty()
    }

    pub fn dirty_fields(&self) -> Vec<String> {
        self.state.values.dirty_fields()
    }

    /// True while a submission is in flight, or while the transport reports
    /// a request of its own
    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
            || self
                .transport
                .as_ref()
                .is_some_and(|(transport, _)| transport.is_loading())
    }

    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.state.subscribe_submitting()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn rules(&self) -> &RuleSet {
        self.validator.rules()
    }

    pub fn target(&self) -> Option<&SubmitTarget> {
        self.transport.as_ref().map(|(_, target)| target)
    }

    // --- events ---

    /// Store the new value; re-validate only once the field has been touched
    pub fn handle_change(&mut self, event: ChangeEvent) {
        let ChangeEvent { name, value } = event;
        self.state.values.set(name.clone(), value);
        if self.state.touched.is_touched(&name) {
            self.revalidate(&name);
        }
    }

    /// Mark the field touched and show its current error
    pub fn handle_blur(&mut self, name: &str) {
        self.state.touched.touch(name);
        self.revalidate(name);
    }

    /// Validate everything and, when valid, hand the values to the transport
    /// (or straight to the completion callback for a local-only form).
    ///
    /// A transport or callback failure is written to the `submit` error slot
    /// and also returned.
    pub async fn handle_submit(&mut self) -> Result<SubmitOutcome, FormError> {
        self.phase = SubmitPhase::Validating;
        self.state
            .touched
            .touch_all(self.validator.rules().names());

        if !self.validate_form() {
            self.phase = SubmitPhase::Idle;
            info!(
                invalid_fields = self.state.errors.len(),
                "submit rejected by validation"
            );
            return Ok(SubmitOutcome::Invalid(self.state.errors.clone()));
        }

        let result = match self.transport.clone() {
            Some((transport, target)) => match self.send(transport.as_ref(), &target).await {
                Ok(result) => result,
                Err(err) => {
                    self.phase = SubmitPhase::Settled;
                    warn!(endpoint = %target, error = %err, "submit failed");
                    self.state.set_error(SUBMIT_ERROR_KEY, err.to_string());
                    return Err(FormError::Transport(err));
                }
            },
            None => Value::Object(self.state.values.all().clone()),
        };

        self.phase = SubmitPhase::Settled;
        if let Some(on_submit) = self.on_submit.as_mut() {
            if let Err(err) = on_submit(&result) {
                warn!(error = %err, "submit callback failed");
                self.state.set_error(SUBMIT_ERROR_KEY, err.to_string());
                return Err(FormError::Callback(err));
            }
        }
        info!("submit settled");
        Ok(SubmitOutcome::Submitted(result))
    }

    async fn send(
        &mut self,
        transport: &dyn Transport,
        target: &SubmitTarget,
    ) -> anyhow::Result<Value> {
        let _in_flight = InFlight::begin(self.state.submitting_sender(), &mut self.phase);
        info!(endpoint = %target, "submitting form");
        let payload = self.state.values.all();
        match target.method {
            Method::Post => transport.post(&target.endpoint, payload).await,
            Method::Put => transport.put(&target.endpoint, payload).await,
        }
    }

    // --- imperative operations ---

    /// Replace one value without validating it
    pub fn set_field_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.state.values.set(name, value.into());
    }

    /// Merge several values at once, e.g. data fetched for an edit screen
    pub fn set_field_values(&mut self, partial: Values) {
        self.state.values.set_many(partial);
    }

    /// Set or (with an empty message) clear an error directly
    pub fn set_field_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.state.set_error(name, message);
    }

    pub fn reset_form(&mut self) {
        self.state.reset();
        self.phase = SubmitPhase::Idle;
    }

    /// Reset with a new baseline
    pub fn reset_form_with(&mut self, initial: Values) {
        self.state.reset_to(initial);
        self.phase = SubmitPhase::Idle;
    }

    /// Validate every declared field and replace the error map with the
    /// result. Returns whether the form is valid.
    pub fn validate_form(&mut self) -> bool {
        self.state.errors = self.validator.validate_all(self.state.values.all());
        self.state.errors.is_empty()
    }

    /// Check a candidate value for one field without storing anything.
    /// Cross-field rules see the current values with the candidate applied.
    pub fn validate_field(&self, name: &str, value: &Value) -> Option<String> {
        let mut snapshot = self.state.values.all().clone();
        snapshot.insert(name.to_string(), value.clone());
        self.validator.validate_field(name, value, &snapshot)
    }

    fn revalidate(&mut self, name: &str) {
        let message = self.validator.validate_field(
            name,
            self.state.values.get(name),
            self.state.values.all(),
        );
        debug!(field = name, has_error = message.is_some(), "field error updated");
        self.state.set_error(name, message.unwrap_or_default());
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("state", &self.state)
            .field("rules", self.validator.rules())
            .field("target", &self.target())
            .field("phase", &self.phase)
            .finish()
    }
}

pub struct FormBuilder {
    initial: Values,
    rules: RuleSet,
    transport: Option<(Arc<dyn Transport>, SubmitTarget)>,
    on_submit: Option<OnSubmit>,
}

impl FormBuilder {
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>, target: SubmitTarget) -> Self {
        self.transport = Some((transport, target));
        self
    }

    pub fn on_submit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Value) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Form {
        Form {
            state: FormState::new(self.initial),
            validator: Validator::new(self.rules),
            transport: self.transport,
            on_submit: self.on_submit,
            phase: SubmitPhase::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::validation::FieldRules;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    fn values(pairs: &[(&str, Value)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn email_rules() -> RuleSet {
        RuleSet::new().field("email", FieldRules::new().required().email())
    }

    fn email_form() -> Form {
        Form::new(values(&[("email", json!(""))]), email_rules())
    }

    fn idle_mock() -> MockTransport {
        let mut mock = MockTransport::new();
        mock.expect_is_loading().return_const(false);
        mock
    }

    /// Records every value handed to the completion callback
    fn recorder() -> (
        Arc<Mutex<Vec<Value>>>,
        impl FnMut(&Value) -> anyhow::Result<()> + Send + 'static,
    ) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |value: &Value| -> anyhow::Result<()> {
            sink.lock().unwrap().push(value.clone());
            Ok(())
        })
    }

    mod change_and_blur {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_change_on_untouched_field_hides_error() {
            let mut form = email_form();
            form.handle_change(ChangeEvent::text("email", "not-an-email"));
            assert_eq!(form.value("email"), &json!("not-an-email"));
            assert!(form.error("email").is_none());
        }

        #[test]
        fn test_blur_shows_error_for_same_value() {
            let mut form = email_form();
            form.handle_change(ChangeEvent::text("email", "not-an-email"));
            form.handle_blur("email");
            assert!(form.is_touched("email"));
            assert_eq!(
                form.error("email"),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_change_after_blur_validates_each_keystroke() {
            let mut form = email_form();
            form.handle_blur("email");
            assert_eq!(form.error("email"), Some("This field is required"));
            form.handle_change(ChangeEvent::text("email", "ada@"));
            assert_eq!(
                form.error("email"),
                Some("Please enter a valid email address")
            );
            form.handle_change(ChangeEvent::text("email", "ada@acme.com"));
            assert!(form.error("email").is_none());
        }

        #[test]
        fn test_checkbox_change_stores_bool() {
            let mut form = Form::new(
                values(&[("remote", json!(false))]),
                RuleSet::new().field("remote", FieldRules::new().required()),
            );
            form.handle_change(ChangeEvent::checkbox("remote", true));
            assert_eq!(form.value("remote"), &json!(true));
            form.handle_change(ChangeEvent::checkbox("remote", false));
            form.handle_blur("remote");
            assert!(form.error("remote").is_none());
        }

        #[test]
        fn test_change_on_undeclared_field_never_errors() {
            let mut form = email_form();
            form.handle_blur("notes");
            form.handle_change(ChangeEvent::text("notes", ""));
            assert!(form.error("notes").is_none());
            assert_eq!(form.value("notes"), &json!(""));
        }

        #[test]
        fn test_cross_field_rule_sees_post_change_snapshot() {
            let rules = RuleSet::new().field(
                "confirm_password",
                FieldRules::new().required().custom(|value, all| {
                    (all.get("new_password") != Some(value))
                        .then(|| "Passwords do not match".to_string())
                }),
            );
            let mut form = Form::new(
                values(&[
                    ("new_password", json!("Secret123")),
                    ("confirm_password", json!("")),
                ]),
                rules,
            );
            form.handle_blur("confirm_password");
            form.handle_change(ChangeEvent::text("confirm_password", "Secret12"));
            assert_eq!(form.error("confirm_password"), Some("Passwords do not match"));
            form.handle_change(ChangeEvent::text("confirm_password", "Secret123"));
            assert!(form.error("confirm_password").is_none());
        }
    }

    mod imperative {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_field_value_does_not_validate() {
            let mut form = email_form();
            form.handle_blur("email");
            form.set_field_value("email", "still-wrong");
            assert_eq!(form.value("email"), &json!("still-wrong"));
            assert_eq!(form.error("email"), Some("This field is required"));
        }

        #[test]
        fn test_set_field_values_merges_and_marks_dirty() {
            let mut form = email_form();
            form.set_field_values(values(&[
                ("email", json!("ada@acme.com")),
                ("department", json!("Finance")),
            ]));
            assert_eq!(form.value("department"), &json!("Finance"));
            assert!(form.is_dirty());
            assert_eq!(
                form.dirty_fields(),
                vec!["department".to_string(), "email".to_string()]
            );
        }

        #[test]
        fn test_set_field_error_and_clear() {
            let mut form = email_form();
            form.set_field_error("email", "Already registered");
            assert_eq!(form.error("email"), Some("Already registered"));
            form.set_field_error("email", "");
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_validate_field_does_not_store() {
            let form = email_form();
            assert_eq!(
                form.validate_field("email", &json!("")).as_deref(),
                Some("This field is required")
            );
            assert!(form.validate_field("email", &json!("x@y.io")).is_none());
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_validate_form_reports_validity() {
            let mut form = email_form();
            assert!(!form.validate_form());
            form.set_field_value("email", "ada@acme.com");
            assert!(form.validate_form());
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_reset_form_is_idempotent() {
            let mut form = email_form();
            form.handle_change(ChangeEvent::text("email", "bad"));
            form.handle_blur("email");

            form.reset_form();
            let values_once = form.values().clone();
            let errors_once = form.errors().clone();
            let touched_once = form.touched().clone();

            form.reset_form();
            assert_eq!(form.values(), &values_once);
            assert_eq!(form.errors(), &errors_once);
            assert_eq!(form.touched(), &touched_once);
            assert!(touched_once.is_empty());
            assert!(!form.is_dirty());
            assert_eq!(form.phase(), SubmitPhase::Idle);
        }

        #[test]
        fn test_reset_form_with_replaces_baseline() {
            let mut form = email_form();
            form.reset_form_with(values(&[("email", json!("ada@acme.com"))]));
            assert_eq!(form.value("email"), &json!("ada@acme.com"));
            assert!(!form.is_dirty());
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_form_never_calls_transport() {
            let mut mock = idle_mock();
            mock.expect_post().never();
            let mut form = Form::builder(values(&[("email", json!(""))]))
                .rules(email_rules())
                .transport(Arc::new(mock), SubmitTarget::post("/employees"))
                .build();

            let outcome = form.handle_submit().await.unwrap();

            match outcome {
                SubmitOutcome::Invalid(errors) => {
                    assert_eq!(
                        errors.get("email").map(String::as_str),
                        Some("This field is required")
                    );
                }
                other => panic!("expected invalid outcome, got {other:?}"),
            }
            assert!(!form.validate_form());
            assert_eq!(form.error("email"), Some("This field is required"));
            assert!(!form.is_submitting());
            assert_eq!(form.phase(), SubmitPhase::Idle);
        }

        #[tokio::test]
        async fn test_submit_touches_every_declared_field() {
            let mut form = Form::new(
                values(&[("email", json!("")), ("name", json!(""))]),
                RuleSet::new()
                    .field("email", FieldRules::new().required().email())
                    .field("name", FieldRules::new().required()),
            );
            form.handle_submit().await.unwrap();
            assert!(form.is_touched("email"));
            assert!(form.is_touched("name"));

            // Now change-time validation is visible without a blur
            form.handle_change(ChangeEvent::text("name", "Ada"));
            assert!(form.error("name").is_none());
        }

        #[tokio::test]
        async fn test_successful_transport_flow() {
            let mut mock = idle_mock();
            let observed = Arc::new(Mutex::new(None::<bool>));

            // The form's flag receiver only exists after build; the transport
            // reads it through this slot.
            let rx_slot: Arc<Mutex<Option<watch::Receiver<bool>>>> = Arc::new(Mutex::new(None));
            let rx_for_mock = Arc::clone(&rx_slot);
            let observed_in_mock = Arc::clone(&observed);

            mock.expect_post()
                .times(1)
                .returning(move |endpoint, payload| {
                    assert_eq!(endpoint, "/employees");
                    assert_eq!(payload.get("email"), Some(&json!("ada@acme.com")));
                    let flag = rx_for_mock
                        .lock()
                        .unwrap()
                        .as_ref()
                        .map(|rx| *rx.borrow());
                    *observed_in_mock.lock().unwrap() = flag;
                    Ok(json!({ "id": 42, "email": "ada@acme.com" }))
                });

            let (calls, callback) = recorder();
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .transport(Arc::new(mock), SubmitTarget::post("/employees"))
                .on_submit(callback)
                .build();
            *rx_slot.lock().unwrap() = Some(form.subscribe_submitting());

            assert!(!form.is_submitting());
            let outcome = form.handle_submit().await.unwrap();

            assert_eq!(*observed.lock().unwrap(), Some(true));
            assert!(!form.is_submitting());
            assert_eq!(form.phase(), SubmitPhase::Settled);
            assert_eq!(
                outcome,
                SubmitOutcome::Submitted(json!({ "id": 42, "email": "ada@acme.com" }))
            );
            assert_eq!(
                *calls.lock().unwrap(),
                vec![json!({ "id": 42, "email": "ada@acme.com" })]
            );
            assert!(form.error(SUBMIT_ERROR_KEY).is_none());
        }

        #[tokio::test]
        async fn test_put_method_uses_put() {
            let mut mock = idle_mock();
            mock.expect_post().never();
            mock.expect_put()
                .times(1)
                .returning(|endpoint, _| {
                    assert_eq!(endpoint, "/employees/7");
                    Ok(json!({ "updated": true }))
                });
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .transport(Arc::new(mock), SubmitTarget::put("/employees/7"))
                .build();

            let outcome = form.handle_submit().await.unwrap();
            assert_eq!(outcome, SubmitOutcome::Submitted(json!({ "updated": true })));
        }

        #[tokio::test]
        async fn test_transport_failure_is_stored_and_returned() {
            let mut mock = idle_mock();
            mock.expect_post()
                .times(1)
                .returning(|_, _| Err(anyhow::anyhow!("network down")));
            let (calls, callback) = recorder();
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .transport(Arc::new(mock), SubmitTarget::post("/employees"))
                .on_submit(callback)
                .build();

            let err = form.handle_submit().await.unwrap_err();

            assert!(matches!(err, FormError::Transport(_)));
            assert_eq!(err.to_string(), "network down");
            assert_eq!(form.error(SUBMIT_ERROR_KEY), Some("network down"));
            assert!(!form.is_submitting());
            assert_eq!(form.phase(), SubmitPhase::Settled);
            assert!(calls.lock().unwrap().is_empty());
            // Edits survive so the user can resubmit
            assert_eq!(form.value("email"), &json!("ada@acme.com"));
        }

        #[tokio::test]
        async fn test_resubmit_clears_previous_submit_error() {
            let mut mock = idle_mock();
            let mut attempts = 0;
            mock.expect_post().times(2).returning(move |_, _| {
                attempts += 1;
                if attempts == 1 {
                    Err(anyhow::anyhow!("network down"))
                } else {
                    Ok(json!({ "id": 1 }))
                }
            });
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .transport(Arc::new(mock), SubmitTarget::post("/employees"))
                .build();

            assert!(form.handle_submit().await.is_err());
            assert!(form.handle_submit().await.unwrap().is_submitted());
            assert!(form.error(SUBMIT_ERROR_KEY).is_none());
        }

        #[test]
        fn test_local_only_form_passes_values_to_callback() {
            let (calls, callback) = recorder();
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .on_submit(callback)
                .build();

            let outcome = tokio_test::block_on(form.handle_submit()).unwrap();

            let expected = json!({ "email": "ada@acme.com" });
            assert_eq!(outcome, SubmitOutcome::Submitted(expected.clone()));
            assert_eq!(*calls.lock().unwrap(), vec![expected]);
            assert_eq!(form.phase(), SubmitPhase::Settled);
        }

        #[test]
        fn test_callback_failure_lands_in_submit_slot() {
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .on_submit(|_| Err(anyhow::anyhow!("could not refresh list")))
                .build();

            let err = tokio_test::block_on(form.handle_submit()).unwrap_err();
            assert!(matches!(err, FormError::Callback(_)));
            assert_eq!(form.error(SUBMIT_ERROR_KEY), Some("could not refresh list"));
        }

        #[test]
        fn test_transport_loading_flag_counts_as_submitting() {
            let mut mock = MockTransport::new();
            mock.expect_is_loading().return_const(true);
            let form = Form::builder(Values::new())
                .transport(Arc::new(mock), SubmitTarget::post("/documents"))
                .build();
            assert!(form.is_submitting());
        }

        /// Transport whose requests never complete
        struct StalledTransport;

        #[async_trait]
        impl Transport for StalledTransport {
            async fn post(&self, _endpoint: &str, _payload: &Values) -> anyhow::Result<Value> {
                std::future::pending().await
            }

            async fn put(&self, _endpoint: &str, _payload: &Values) -> anyhow::Result<Value> {
                std::future::pending().await
            }
        }

        #[tokio::test]
        async fn test_cancelled_submit_clears_in_flight_flag() {
            let mut form = Form::builder(values(&[("email", json!("ada@acme.com"))]))
                .rules(email_rules())
                .transport(Arc::new(StalledTransport), SubmitTarget::post("/travel"))
                .build();
            let rx = form.subscribe_submitting();

            let timed_out =
                tokio::time::timeout(Duration::from_millis(20), form.handle_submit()).await;

            assert!(timed_out.is_err());
            assert!(!*rx.borrow());
            assert!(!form.is_submitting());
            assert_eq!(form.phase(), SubmitPhase::Idle);
            assert!(form.error(SUBMIT_ERROR_KEY).is_none());
        }
    }
}
