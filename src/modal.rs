//! View state of a form dialog: `Form -> Success -> (reset) -> Form`.
//!
//! The modal never talks to the network itself. `begin_submit` hands the
//! caller what to send, and `finish_submit` records the outcome. While a
//! request is outstanding `submitting` is set and further submits are
//! rejected; closing the dialog does not cancel the request.

use serde_json::Value;

use crate::core::diff::{DirtyFields, Patch};
use crate::core::validation::ValidationErrors;
use crate::error::{AdminError, AdminResult, FALLBACK_ERROR_MESSAGE};
use crate::forms::{build_diff, CreateForm, EditForm};
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Form,
    Success,
}

enum Mode<F> {
    Create { body: fn(&F) -> Value },
    Edit { id: String },
}

/// What the caller has to do after a submit click.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    /// Nothing changed; the dialog has been closed.
    NoOp,
    Create(Value),
    Update { id: String, patch: Patch },
}

pub struct FormModal<F: EditForm> {
    mode: Mode<F>,
    original: F,
    current: F,
    dirty: DirtyFields,
    phase: ModalPhase,
    submitting: bool,
    errors: ValidationErrors,
    open: bool,
}

impl<F: EditForm> FormModal<F> {
    pub fn open_edit(id: impl Into<String>, values: F) -> Self {
        Self {
            mode: Mode::Edit { id: id.into() },
            original: values.clone(),
            current: values,
            dirty: DirtyFields::new(),
            phase: ModalPhase::Form,
            submitting: false,
            errors: ValidationErrors::new(),
            open: true,
        }
    }

    pub fn open_create() -> Self
    where
        F: CreateForm,
    {
        Self {
            mode: Mode::Create { body: F::create_body },
            original: F::default(),
            current: F::default(),
            dirty: DirtyFields::new(),
            phase: ModalPhase::Form,
            submitting: false,
            errors: ValidationErrors::new(),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty(&self) -> &DirtyFields {
        &self.dirty
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn values(&self) -> &F {
        &self.current
    }

    pub fn record_id(&self) -> Option<&str> {
        match &self.mode {
            Mode::Edit { id } => Some(id),
            Mode::Create { .. } => None,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, Mode::Create { .. })
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.open && self.phase == ModalPhase::Form && !self.submitting
    }

    pub fn update(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.current);
        self.dirty = F::dirty_fields(&self.original, &self.current);
    }

    pub fn begin_submit(&mut self) -> AdminResult<SubmitStep> {
        if self.submitting {
            return Err(AdminError::Busy);
        }
        if self.phase != ModalPhase::Form {
            self.open = false;
            return Ok(SubmitStep::NoOp);
        }

        if let Err(errors) = self.current.validate() {
            self.errors = errors.clone();
            return Err(AdminError::Validation(errors));
        }
        self.errors = ValidationErrors::new();

        let step = match &self.mode {
            Mode::Create { body } => SubmitStep::Create(body(&self.current)),
            Mode::Edit { id } => {
                let patch = build_diff(&self.original, &self.current, &self.dirty);
                if patch.is_empty() {
                    tracing::debug!(record = %id, "empty diff, closing without request");
                    self.open = false;
                    return Ok(SubmitStep::NoOp);
                }
                SubmitStep::Update { id: id.clone(), patch }
            }
        };

        self.submitting = true;
        Ok(step)
    }

    /// Records the outcome of the request started by `begin_submit`.
    /// Returns whether it succeeded.
    pub fn finish_submit(
        &mut self,
        result: Result<(), &AdminError>,
        notifier: &dyn Notifier,
        success_message: &str,
    ) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.original = self.current.clone();
                self.dirty = DirtyFields::new();
                self.phase = ModalPhase::Success;
                notifier.success(success_message);
                true
            }
            Err(err) => {
                // form stays open and dirty so the user can retry
                if let AdminError::Validation(errors) = err {
                    self.errors = errors.clone();
                }
                notifier.error(&err.toast_message(FALLBACK_ERROR_MESSAGE));
                false
            }
        }
    }

    /// Back to an editable form after a success screen. Create dialogs start
    /// over blank; edit dialogs continue from the saved values.
    pub fn reset(&mut self) {
        if self.is_create() {
            self.original = F::default();
            self.current = F::default();
        } else {
            self.current = self.original.clone();
        }
        self.dirty = DirtyFields::new();
        self.errors = ValidationErrors::new();
        self.phase = ModalPhase::Form;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
