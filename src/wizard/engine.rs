use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::schema::{InputKind, StepSpec, WizardSchema};
use crate::backend::{BackendClient, BackendError};
use crate::upload::{self, Uploader};

/// Everything a wizard remembers between requests. Lives in the cookie
/// session until the wizard is cancelled or submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: usize,
    pub data: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
    /// Form-level message (failed submission).
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(Option<String>),
    /// The last step has field errors; nothing was sent.
    Invalid,
    /// The backend call failed; entered data is kept.
    Failed(BackendError),
}

pub struct Wizard<'s> {
    schema: &'s WizardSchema,
    state: WizardState,
}

impl<'s> Wizard<'s> {
    pub fn new(schema: &'s WizardSchema) -> Self {
        Self::resume(schema, WizardState::default())
    }

    /// Continue from saved state. A step index past the end (schema changed
    /// since the state was saved) is clamped.
    pub fn resume(schema: &'s WizardSchema, mut state: WizardState) -> Self {
        state.current_step = state.current_step.min(schema.last_step());
        Self { schema, state }
    }

    pub fn schema(&self) -> &'s WizardSchema {
        self.schema
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn into_state(self) -> WizardState {
        self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn current(&self) -> &'s StepSpec {
        &self.schema.steps[self.state.current_step]
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step == self.schema.last_step()
    }

    pub fn value(&self, name: &str) -> &str {
        self.state.data.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.state.errors.get(name).map(String::as_str)
    }

    /// Store submitted values for the current step's fields. Photo fields are
    /// never taken from input; they are set by [`Wizard::attach_photo`].
    pub fn set_input<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let step = self.current();
        for (name, value) in values {
            if let Some(field) = step.fields.iter().find(|f| f.name == name) {
                if field.kind == InputKind::Photo {
                    continue;
                }
                self.state
                    .data
                    .insert(field.name.to_string(), field.normalize(value));
            }
        }
    }

    /// Run `step`'s rules over the stored data, replacing that step's errors.
    pub fn validate(&mut self, step: usize) -> bool {
        let Some(spec) = self.schema.steps.get(step) else {
            return false;
        };
        let mut ok = true;
        for field in &spec.fields {
            self.state.errors.remove(field.name);
            let value = self.state.data.get(field.name).map(String::as_str).unwrap_or("");
            if let Some(msg) = field.check(value) {
                self.state.errors.insert(field.name.to_string(), msg);
                ok = false;
            }
        }
        ok
    }

    /// Advance if the current step validates.
    pub fn next(&mut self) -> bool {
        if self.is_last_step() || !self.validate(self.state.current_step) {
            return false;
        }
        self.state.current_step += 1;
        self.state.message = None;
        true
    }

    /// Go back one step. Never validates; a no-op on the first step.
    pub fn prev(&mut self) {
        self.state.current_step = self.state.current_step.saturating_sub(1);
        self.state.message = None;
    }

    pub fn set_error(&mut self, field: &str, message: &str) {
        self.state
            .errors
            .insert(field.to_string(), message.to_string());
    }

    pub fn reset(&mut self) {
        self.state = WizardState::default();
    }

    /// Upload a browser data URL into photo field `field` of the current
    /// step. Failures become that field's error.
    pub async fn attach_photo(&mut self, uploader: &dyn Uploader, field: &str, data_url: &str) -> bool {
        let is_photo_field = self
            .current()
            .fields
            .iter()
            .any(|f| f.name == field && f.kind == InputKind::Photo);
        if !is_photo_field {
            return false;
        }
        match upload::upload_data_url(uploader, data_url).await {
            Ok(url) => {
                self.state.errors.remove(field);
                self.state.data.insert(field.to_string(), url);
                true
            }
            Err(e) => {
                log::warn!("Photo upload for {} failed: {e}", self.schema.slug);
                self.set_error(field, &e.user_message());
                false
            }
        }
    }

    /// Request body: every stored value, with number inputs sent as numbers.
    pub fn payload(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.state.data {
            let is_number = self
                .schema
                .field(name)
                .is_some_and(|f| f.kind == InputKind::Number);
            let json = match value.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Some(n) if is_number => serde_json::Value::Number(n),
                _ => serde_json::Value::String(value.clone()),
            };
            map.insert(name.clone(), json);
        }
        serde_json::Value::Object(map)
    }

    /// Validate the last step only, then post the payload once. Success
    /// resets the wizard; failure keeps everything and records a message.
    pub async fn submit(&mut self, client: &BackendClient, cookie: Option<&str>) -> SubmitOutcome {
        if !self.is_last_step() || !self.validate(self.schema.last_step()) {
            return SubmitOutcome::Invalid;
        }
        let body = self.payload();
        match client
            .send(Method::POST, &self.schema.endpoint, Some(&body), cookie)
            .await
        {
            Ok(message) => {
                log::info!("Submitted {} wizard", self.schema.slug);
                self.reset();
                SubmitOutcome::Submitted(message)
            }
            Err(e) => {
                log::error!("Submitting {} wizard failed: {e}", self.schema.slug);
                self.state.message = Some(e.user_message());
                SubmitOutcome::Failed(e)
            }
        }
    }
}
