//! Application state and core logic

use crate::config::FormConfig;
use crate::platform::has_shortcut_modifier;
use crate::state::{FieldRef, FormController, FormDefinition, SubmitOutcome};
use crate::transition::{select_runner, TransitionClock};
use crate::transport::{HttpTransport, SubmissionError, SubmissionTransport};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

type SubmissionResult = Result<(), SubmissionError>;

/// Main application struct
pub struct App {
    /// The form being filled in
    pub form: FormController,
    /// Transport used for submissions
    transport: Arc<dyn SubmissionTransport>,
    /// Start of the running step transition, if any
    pub transition_clock: TransitionClock,
    /// Focused field within the active step
    pub focused_field: usize,
    /// Feedback message for the status line
    pub status_message: Option<String>,
    /// Results of in-flight submissions
    results_tx: mpsc::UnboundedSender<SubmissionResult>,
    results_rx: mpsc::UnboundedReceiver<SubmissionResult>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create an App from user configuration.
    /// `definition_path` overrides the configured form definition.
    pub fn from_config(config: &FormConfig, definition_path: Option<PathBuf>) -> Result<Self> {
        let definition = match definition_path.or_else(|| config.form_definition.clone()) {
            Some(path) => {
                tracing::info!("Loading form definition from {}", path.display());
                FormDefinition::load(&path)?
            }
            None => FormDefinition::booking(),
        };
        let state = definition.into_state()?;

        let clock = TransitionClock::default();
        let term = std::env::var("TERM").ok();
        let runner = select_runner(config.transitions_enabled(), term.as_deref(), &clock);
        let form = FormController::new(state, runner)
            .with_title(config.submission_title_or_default());

        let transport = HttpTransport::new(config.endpoint.as_deref(), config.nonce.clone())?;
        tracing::info!("Submissions go to {}", transport.url());

        Ok(Self::new(form, Arc::new(transport), clock))
    }

    pub fn new(
        form: FormController,
        transport: Arc<dyn SubmissionTransport>,
        transition_clock: TransitionClock,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            form,
            transport,
            transition_clock,
            focused_field: 0,
            status_message: None,
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether a step transition is still animating
    pub fn is_animating(&self) -> bool {
        self.transition_clock.is_running(Instant::now())
    }

    /// The focused field of the active step
    pub fn focused_field_ref(&self) -> Option<FieldRef> {
        let step = self.form.state().active_step()?;
        let field = step.fields.get(self.focused_field)?;
        Some(FieldRef::new(step.id, &field.id))
    }

    fn active_field_count(&self) -> usize {
        self.form
            .state()
            .active_step()
            .map(|s| s.field_count())
            .unwrap_or(0)
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.quit = true;
            return;
        }

        if self.form.is_submitting() {
            tracing::debug!("Ignoring {:?} while submitting", key.code);
            return;
        }

        if self.form.state().submitted {
            self.handle_submitted_key(key);
        } else {
            self.handle_editing_key(key);
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        let reset = match key.code {
            KeyCode::Char('r') if has_shortcut_modifier(key.modifiers) => true,
            KeyCode::Enter => true,
            _ => false,
        };
        if reset {
            self.form.reset();
            self.focused_field = 0;
            self.status_message = None;
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let shortcut = has_shortcut_modifier(key.modifiers);
        match key.code {
            KeyCode::Char('n') if shortcut => self.next_step(),
            KeyCode::Char('b') if shortcut => self.previous_step(),
            KeyCode::Char('s') if shortcut => self.submit(),
            KeyCode::PageDown => self.next_step(),
            KeyCode::PageUp => self.previous_step(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Enter => {
                if self.focused_field + 1 < self.active_field_count() {
                    self.next_field();
                } else {
                    self.next_step();
                }
            }
            KeyCode::Backspace => self.edit_focused(|field| field.value_without_last_char()),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused(|field| field.value_with_char(c));
            }
            _ => {}
        }
    }

    fn next_field(&mut self) {
        let count = self.active_field_count();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    fn prev_field(&mut self) {
        let count = self.active_field_count();
        if count == 0 {
            return;
        }
        if self.focused_field == 0 {
            self.focused_field = count - 1;
        } else {
            self.focused_field -= 1;
        }
    }

    fn next_step(&mut self) {
        let before = self.form.state().active_step_id();
        self.form.go_next();
        if self.form.state().active_step_id() != before {
            self.focused_field = 0;
        }
    }

    fn previous_step(&mut self) {
        let before = self.form.state().active_step_id();
        self.form.go_back();
        if self.form.state().active_step_id() != before {
            self.focused_field = 0;
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&crate::state::Field) -> String) {
        let Some(field_ref) = self.focused_field_ref() else {
            return;
        };
        let Some(value) = self.form.state().field(&field_ref).map(edit) else {
            return;
        };
        self.form.update_field(&field_ref, value);
    }

    /// Start a submission on a background task; the result arrives
    /// through [`poll_submission`](Self::poll_submission).
    fn submit(&mut self) {
        if !self.form.is_last_step() {
            self.status_message = Some("Review the last step before submitting".to_string());
            return;
        }
        let Some(submission) = self.form.begin_submit() else {
            return;
        };
        self.status_message = None;

        let transport = Arc::clone(&self.transport);
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let result = transport
                .post(&submission.title, &submission.content)
                .await;
            if results.send(result).is_err() {
                tracing::debug!("App closed before submission finished");
            }
        });
    }

    /// Apply a finished submission, if one has arrived
    pub fn poll_submission(&mut self) -> Option<SubmitOutcome> {
        let result = self.results_rx.try_recv().ok()?;
        let outcome = self.form.finish_submit(result);
        self.status_message = match &outcome {
            SubmitOutcome::Submitted => Some("Booking submitted!".to_string()),
            _ => None,
        };
        Some(outcome)
    }
}
