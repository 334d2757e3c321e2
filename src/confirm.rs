// Confirmation dialog state machine
//
// Replaces the callback-chained loading/error boolean flags of a typical
// mutation dialog with one explicit result type and a small state machine.
// The flow is headless: it owns no rendering and no network calls. The caller
// awaits the mutation itself and feeds the outcome back in, so closing the
// dialog mid-flight never aborts the request; it only discards the UI's
// interest in the result.

use crate::types::{ApiError, ApiResult};

/// The state of a single awaitable mutation.
#[derive(Debug, Clone)]
pub enum MutationState<T> {
    Pending,
    Success(T),
    Failure(ApiError),
}

impl<T> MutationState<T> {
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => MutationState::Success(value),
            Err(error) => MutationState::Failure(error),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MutationState::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MutationState::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            MutationState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ApiError> {
        match self {
            MutationState::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Dialog lifecycle states.
///
/// `Idle -> Confirming` on open; `Confirming -> Submitting` only with the
/// confirmation checkbox set; a failed submit returns to `Confirming` with
/// the error recorded, a successful one returns to `Idle` (dialog closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Idle,
    Confirming,
    Submitting,
}

/// Generic confirm-then-submit flow.
#[derive(Debug, Clone)]
pub struct ConfirmFlow {
    state: DialogState,
    confirmed: bool,
    error: Option<String>,
    notification: Option<String>,
}

impl Default for ConfirmFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmFlow {
    pub fn new() -> Self {
        Self {
            state: DialogState::Idle,
            confirmed: false,
            error: None,
            notification: None,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Idle
    }

    /// Inline error from the last failed submit, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success notification recorded when the last submit completed.
    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Open the dialog.
    pub fn open(&mut self) {
        if self.state == DialogState::Idle {
            self.state = DialogState::Confirming;
            self.confirmed = false;
            self.error = None;
            self.notification = None;
        }
    }

    /// Close the dialog without submitting. Valid at any time; an in-flight
    /// request is not aborted, its result is simply no longer displayed.
    pub fn cancel(&mut self) {
        self.state = DialogState::Idle;
        self.confirmed = false;
        self.error = None;
    }

    /// Set the confirmation checkbox.
    pub fn set_confirmed(&mut self, confirmed: bool) {
        if self.state == DialogState::Confirming {
            self.confirmed = confirmed;
        }
    }

    /// The primary action is enabled only while confirming with the checkbox
    /// set.
    pub fn can_submit(&self) -> bool {
        self.state == DialogState::Confirming && self.confirmed
    }

    /// Move into the submitting state. Fails unless `can_submit()`.
    pub fn begin_submit(&mut self) -> ApiResult<()> {
        if !self.can_submit() {
            return Err(ApiError::validation(
                "cannot submit without confirmation",
            ));
        }
        self.state = DialogState::Submitting;
        self.error = None;
        Ok(())
    }

    /// Record a successful completion: the dialog closes and the
    /// notification is kept for display.
    pub fn complete_success(&mut self, notification: impl Into<String>) {
        if self.state != DialogState::Submitting {
            // The dialog was closed mid-flight; nothing to show.
            return;
        }
        self.state = DialogState::Idle;
        self.confirmed = false;
        self.notification = Some(notification.into());
    }

    /// Record a failed completion: the dialog stays open, returns to the
    /// confirming state, and surfaces the primary reason inline.
    pub fn complete_failure(&mut self, error: &ApiError) {
        if self.state != DialogState::Submitting {
            return;
        }
        self.state = DialogState::Confirming;
        self.confirmed = false;
        self.error = Some(error.primary_reason());
    }
}

/// The two directions of the database lifecycle dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Suspend,
    Resume,
}

impl LifecycleAction {
    pub fn title(&self, label: &str) -> String {
        match self {
            LifecycleAction::Suspend => format!("Suspend {}", label),
            LifecycleAction::Resume => format!("Power On {}", label),
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            LifecycleAction::Suspend => "Suspend Cluster",
            LifecycleAction::Resume => "Power On Cluster",
        }
    }

    pub fn warning_copy(&self) -> &'static str {
        match self {
            LifecycleAction::Suspend => {
                "This cluster will stop serving clients immediately. You can power on \
                 the cluster again later, and it will resume in the same state."
            }
            LifecycleAction::Resume => {
                "This cluster will power on and resume serving clients immediately."
            }
        }
    }

    pub fn success_copy(&self) -> &'static str {
        match self {
            LifecycleAction::Suspend => "Database Cluster suspended successfully.",
            LifecycleAction::Resume => "Database Cluster powered on successfully.",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            LifecycleAction::Suspend => LifecycleAction::Resume,
            LifecycleAction::Resume => LifecycleAction::Suspend,
        }
    }
}

/// Confirm dialog for suspending or powering on a database cluster.
///
/// Bidirectional: after a successful submit the action flips, so the same
/// dialog instance offers the opposite operation next time it opens.
#[derive(Debug, Clone)]
pub struct LifecycleDialog {
    action: LifecycleAction,
    label: String,
    flow: ConfirmFlow,
}

impl LifecycleDialog {
    pub fn new(action: LifecycleAction, label: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
            flow: ConfirmFlow::new(),
        }
    }

    pub fn action(&self) -> LifecycleAction {
        self.action
    }

    pub fn title(&self) -> String {
        self.action.title(&self.label)
    }

    pub fn button_label(&self) -> &'static str {
        self.action.button_label()
    }

    pub fn warning_copy(&self) -> &'static str {
        self.action.warning_copy()
    }

    pub fn flow(&self) -> &ConfirmFlow {
        &self.flow
    }

    pub fn open(&mut self) {
        self.flow.open();
    }

    pub fn cancel(&mut self) {
        self.flow.cancel();
    }

    pub fn set_confirmed(&mut self, confirmed: bool) {
        self.flow.set_confirmed(confirmed);
    }

    pub fn can_submit(&self) -> bool {
        self.flow.can_submit()
    }

    pub fn begin_submit(&mut self) -> ApiResult<()> {
        self.flow.begin_submit()
    }

    /// Drive the dialog from a mutation result.
    ///
    /// `Pending` leaves the dialog submitting; success closes it, records the
    /// action's exact notification copy, and flips the action; failure keeps
    /// it open with the primary reason inline.
    pub fn apply<T>(&mut self, result: &MutationState<T>) {
        match result {
            MutationState::Pending => {}
            MutationState::Success(_) => {
                self.flow.complete_success(self.action.success_copy());
                self.action = self.action.opposite();
            }
            MutationState::Failure(error) => {
                self.flow.complete_failure(error);
            }
        }
    }
}
