//! Form controller: step navigation, field capture and submission

use super::field::{Field, FieldRef};
use super::form_state::FormState;
use super::review::review_content;
use crate::transition::TransitionRunner;
use crate::transport::{SubmissionError, SubmissionTransport};

/// Title and content assembled for one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub content: String,
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Failed(String),
    /// Another submission was still in flight; nothing changed
    AlreadySubmitting,
    /// The form was already submitted and has not been reset
    AlreadySubmitted,
}

/// Owns the state of one form and applies every operation on it
pub struct FormController {
    state: FormState,
    transitions: Box<dyn TransitionRunner>,
    title: String,
}

impl FormController {
    pub const DEFAULT_TITLE: &'static str = "Booking Form Submission";

    pub fn new(state: FormState, transitions: Box<dyn TransitionRunner>) -> Self {
        Self {
            state,
            transitions,
            title: Self::DEFAULT_TITLE.to_string(),
        }
    }

    /// Set the title sent with every submission
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Apply a batch of changes through the transition runner
    fn commit(&mut self, mutation: impl FnOnce(&mut FormState)) {
        let state = &mut self.state;
        self.transitions.run(Box::new(move || mutation(state)));
    }

    fn touch(&mut self) {
        self.state.revision += 1;
        debug_assert!(self.state.is_consistent(), "inconsistent form state");
    }

    /// Activate the step after the active one; no-op on the last step
    pub fn go_next(&mut self) {
        self.move_active(true);
    }

    /// Activate the step before the active one; no-op on the first step
    pub fn go_back(&mut self) {
        self.move_active(false);
    }

    fn move_active(&mut self, forward: bool) {
        let Some(current) = self.state.active_index() else {
            tracing::debug!("No active step to navigate from");
            return;
        };
        let current_id = self.state.steps[current].id;
        let target_id = if forward {
            current_id.checked_add(1)
        } else {
            current_id.checked_sub(1)
        };
        let Some(target) =
            target_id.and_then(|id| self.state.steps.iter().position(|s| s.id == id))
        else {
            tracing::debug!("Step {current_id} is at the boundary, staying put");
            return;
        };

        self.commit(move |state| {
            state.steps[current].is_active = false;
            state.steps[target].is_active = true;
        });
        self.touch();
        tracing::debug!("Moved from step {current_id} to step {}", self.state.steps[target].id);
    }

    /// Set a field's value as typed. Returns false if the field does not exist.
    pub fn update_field(&mut self, field: &FieldRef, value: impl Into<String>) -> bool {
        let Some(target) = self.state.field_mut(field) else {
            tracing::debug!(
                "Ignoring update for unknown field {}/{}",
                field.step_id,
                field.field_id
            );
            return false;
        };
        target.value = value.into();
        self.touch();
        true
    }

    /// Every field across all steps, in step order then field order
    pub fn review_fields(&self) -> Vec<&Field> {
        self.state
            .steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .collect()
    }

    /// Whether the first step is active. False once submitted.
    pub fn is_first_step(&self) -> bool {
        self.state.steps.first().is_some_and(|s| s.is_active)
    }

    /// Whether the last step is active. False once submitted.
    pub fn is_last_step(&self) -> bool {
        self.state.steps.last().is_some_and(|s| s.is_active)
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    /// Mark the form as submitting and assemble what to send.
    /// Returns `None` while another submission is in flight or once submitted.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.state.submitting {
            tracing::warn!("Submission already in flight, rejecting another");
            return None;
        }
        if self.state.submitted {
            tracing::warn!("Form already submitted, reset before submitting again");
            return None;
        }
        self.state.submitting = true;
        self.touch();

        let content = review_content(self.review_fields());
        tracing::info!("Submitting form with {} fields", self.state.total_field_count());
        Some(Submission {
            title: self.title.clone(),
            content,
        })
    }

    /// Apply the transport's answer to a submission started with
    /// [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(()) => {
                self.commit(|state| {
                    for step in &mut state.steps {
                        step.is_active = false;
                    }
                    state.submitted = true;
                    state.error_message.clear();
                });
                tracing::info!("Form submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::warn!("Form submission failed: {err}");
                self.state.error_message = err.message.clone();
                SubmitOutcome::Failed(err.message)
            }
        };
        self.state.submitting = false;
        self.touch();
        outcome
    }

    /// Submit the reviewed fields through `transport`, waiting for the answer.
    ///
    /// Single-await form of `begin_submit` followed by `finish_submit`. The
    /// terminal app calls the two halves itself so it can repaint while the
    /// request runs on a spawned task, leaving this entry point to callers
    /// that can hold the controller across the await.
    #[allow(dead_code)]
    pub async fn submit(&mut self, transport: &dyn SubmissionTransport) -> SubmitOutcome {
        if self.state.submitted {
            return SubmitOutcome::AlreadySubmitted;
        }
        let Some(submission) = self.begin_submit() else {
            return SubmitOutcome::AlreadySubmitting;
        };
        let result = transport
            .post(&submission.title, &submission.content)
            .await;
        self.finish_submit(result)
    }

    /// Clear every field and return to the first step.
    /// The last error message is kept.
    pub fn reset(&mut self) {
        self.commit(|state| {
            for step in &mut state.steps {
                step.is_active = false;
                for field in &mut step.fields {
                    field.clear();
                }
            }
            if let Some(first) = state.steps.first_mut() {
                first.is_active = true;
            }
            state.submitted = false;
        });
        self.touch();
        tracing::debug!("Form reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Step;
    use crate::transition::ImmediateTransition;
    use crate::transport::MockSubmissionTransport;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts batches so tests can see which operations are wrapped
    struct CountingTransition {
        batches: Rc<Cell<usize>>,
    }

    impl TransitionRunner for CountingTransition {
        fn run<'a>(&self, mutation: Box<dyn FnOnce() + 'a>) {
            self.batches.set(self.batches.get() + 1);
            mutation();
        }
    }

    fn two_step_state() -> FormState {
        FormState::from_steps(vec![
            Step::new(0, vec![Field::new("name", "Name")]),
            Step::new(1, vec![Field::new("date", "Date")]),
        ])
        .unwrap()
    }

    fn three_step_state() -> FormState {
        FormState::from_steps(vec![
            Step::new(
                0,
                vec![Field::new("name", "Name"), Field::new("email", "Email")],
            ),
            Step::new(1, vec![Field::new("date", "Date")]),
            Step::new(2, vec![Field::new("notes", "Notes")]),
        ])
        .unwrap()
    }

    fn controller(state: FormState) -> FormController {
        FormController::new(state, Box::new(ImmediateTransition))
    }

    fn counting_controller(state: FormState) -> (FormController, Rc<Cell<usize>>) {
        let batches = Rc::new(Cell::new(0));
        let runner = CountingTransition {
            batches: batches.clone(),
        };
        (FormController::new(state, Box::new(runner)), batches)
    }

    fn succeeding_transport() -> MockSubmissionTransport {
        let mut transport = MockSubmissionTransport::new();
        transport.expect_post().times(1).returning(|_, _| Ok(()));
        transport
    }

    fn failing_transport(message: &'static str) -> MockSubmissionTransport {
        let mut transport = MockSubmissionTransport::new();
        transport
            .expect_post()
            .times(1)
            .returning(move |_, _| Err(SubmissionError::new(message)));
        transport
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_go_next_activates_following_step() {
            let mut form = controller(two_step_state());
            form.go_next();
            assert!(!form.state().steps[0].is_active);
            assert!(form.state().steps[1].is_active);
            assert!(form.state().is_consistent());
        }

        #[test]
        fn test_go_next_on_last_step_is_noop() {
            let mut form = controller(two_step_state());
            form.go_next();
            let before = form.state().clone();
            form.go_next();
            assert_eq!(form.state(), &before);
        }

        #[test]
        fn test_go_back_on_first_step_is_noop() {
            let mut form = controller(two_step_state());
            let before = form.state().clone();
            form.go_back();
            assert_eq!(form.state(), &before);
        }

        #[test]
        fn test_next_then_back_round_trips() {
            let mut form = controller(three_step_state());
            form.go_next();
            assert_eq!(form.state().active_step_id(), Some(1));
            form.go_next();
            form.go_back();
            assert_eq!(form.state().active_step_id(), Some(1));
            form.go_back();
            assert_eq!(form.state().active_step_id(), Some(0));
        }

        #[test]
        fn test_navigation_with_ids_starting_at_one() {
            let state = FormState::from_steps(vec![
                Step::new(1, vec![]),
                Step::new(2, vec![]),
            ])
            .unwrap();
            let mut form = controller(state);
            form.go_back();
            assert_eq!(form.state().active_step_id(), Some(1));
            form.go_next();
            assert_eq!(form.state().active_step_id(), Some(2));
        }

        #[test]
        fn test_navigation_is_batched() {
            let (mut form, batches) = counting_controller(three_step_state());
            form.go_next();
            form.go_back();
            assert_eq!(batches.get(), 2);
        }

        #[test]
        fn test_boundary_noop_skips_runner() {
            let (mut form, batches) = counting_controller(two_step_state());
            form.go_back();
            assert_eq!(batches.get(), 0);
            assert_eq!(form.state().revision, 0);
        }

        #[test]
        fn test_navigation_after_submit_is_noop() {
            let mut form = controller(two_step_state());
            form.begin_submit();
            form.finish_submit(Ok(()));
            let before = form.state().clone();
            form.go_next();
            form.go_back();
            assert_eq!(form.state(), &before);
        }

        #[test]
        fn test_single_active_step_throughout() {
            let mut form = controller(three_step_state());
            for _ in 0..4 {
                form.go_next();
                assert_eq!(form.state().active_count(), 1);
            }
            for _ in 0..4 {
                form.go_back();
                assert_eq!(form.state().active_count(), 1);
            }
        }
    }

    mod boundaries {
        use super::*;

        #[test]
        fn test_first_and_last_flags() {
            let mut form = controller(three_step_state());
            assert!(form.is_first_step());
            assert!(!form.is_last_step());
            form.go_next();
            assert!(!form.is_first_step());
            assert!(!form.is_last_step());
            form.go_next();
            assert!(form.is_last_step());
        }

        #[test]
        fn test_single_step_is_first_and_last() {
            let state = FormState::from_steps(vec![Step::new(0, vec![])]).unwrap();
            let form = controller(state);
            assert!(form.is_first_step());
            assert!(form.is_last_step());
        }

        #[test]
        fn test_both_false_after_submission() {
            let mut form = controller(two_step_state());
            form.begin_submit();
            form.finish_submit(Ok(()));
            assert!(!form.is_first_step());
            assert!(!form.is_last_step());
        }
    }

    mod fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_update_field_sets_raw_value() {
            let mut form = controller(two_step_state());
            assert!(form.update_field(&FieldRef::new(0, "name"), "  Alice "));
            assert_eq!(form.state().steps[0].fields[0].value, "  Alice ");
        }

        #[test]
        fn test_update_field_on_inactive_step() {
            let mut form = controller(two_step_state());
            assert!(form.update_field(&FieldRef::new(1, "date"), "2024-01-01"));
            assert_eq!(form.state().steps[1].fields[0].value, "2024-01-01");
            assert_eq!(form.state().active_step_id(), Some(0));
        }

        #[test]
        fn test_update_unknown_field_is_noop() {
            let mut form = controller(two_step_state());
            let before = form.state().clone();
            assert!(!form.update_field(&FieldRef::new(0, "missing"), "x"));
            assert!(!form.update_field(&FieldRef::new(9, "name"), "x"));
            assert_eq!(form.state(), &before);
        }

        #[test]
        fn test_update_field_is_not_batched() {
            let (mut form, batches) = counting_controller(two_step_state());
            form.update_field(&FieldRef::new(0, "name"), "Alice");
            assert_eq!(batches.get(), 0);
            assert_eq!(form.state().revision, 1);
        }
    }

    mod review {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_review_fields_in_step_then_field_order() {
            let form = controller(three_step_state());
            let ids: Vec<&str> = form.review_fields().iter().map(|f| f.id.as_str()).collect();
            assert_eq!(ids, vec!["name", "email", "date", "notes"]);
            assert_eq!(form.review_fields().len(), form.state().total_field_count());
        }

        #[test]
        fn test_review_content_fragment() {
            let mut form = controller(two_step_state());
            form.update_field(&FieldRef::new(0, "name"), "Alice");
            form.update_field(&FieldRef::new(1, "date"), "2024-01-01");
            let submission = form.begin_submit().unwrap();
            assert_eq!(
                submission.content,
                "<p><strong>Name</strong>: Alice</p><p><strong>Date</strong>: 2024-01-01</p>"
            );
            assert_eq!(submission.title, "Booking Form Submission");
        }

        #[test]
        fn test_review_is_read_only() {
            let form = controller(two_step_state());
            let before = form.state().clone();
            let _ = form.review_fields();
            assert_eq!(form.state(), &before);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_success_deactivates_all_steps() {
            let mut form = controller(two_step_state());
            let transport = succeeding_transport();
            let outcome = form.submit(&transport).await;

            assert_eq!(outcome, SubmitOutcome::Submitted);
            let state = form.state();
            assert!(state.steps.iter().all(|s| !s.is_active));
            assert!(state.submitted);
            assert!(!state.submitting);
            assert_eq!(state.error_message, "");
            assert!(state.is_consistent());
        }

        #[tokio::test]
        async fn test_failure_keeps_active_step() {
            let mut form = controller(three_step_state());
            form.go_next();
            let transport = failing_transport("Network error");
            let outcome = form.submit(&transport).await;

            assert_eq!(outcome, SubmitOutcome::Failed("Network error".to_string()));
            let state = form.state();
            assert_eq!(state.error_message, "Network error");
            assert_eq!(state.active_step_id(), Some(1));
            assert!(!state.submitting);
            assert!(!state.submitted);
        }

        #[tokio::test]
        async fn test_success_clears_previous_error() {
            let mut form = controller(two_step_state());
            form.submit(&failing_transport("Server unavailable")).await;
            assert!(form.state().has_error());

            form.submit(&succeeding_transport()).await;
            assert_eq!(form.state().error_message, "");
        }

        #[tokio::test]
        async fn test_retry_after_failure_matches_direct_success() {
            let mut retried = controller(two_step_state());
            retried.submit(&failing_transport("Timeout")).await;
            let outcome = retried.submit(&succeeding_transport()).await;
            assert_eq!(outcome, SubmitOutcome::Submitted);

            let mut direct = controller(two_step_state());
            direct.submit(&succeeding_transport()).await;

            assert_eq!(retried.state().steps, direct.state().steps);
            assert_eq!(retried.state().error_message, direct.state().error_message);
            assert!(retried.state().is_consistent());
        }

        #[tokio::test]
        async fn test_transport_receives_title_and_content() {
            let mut form = controller(two_step_state()).with_title("Reservation");
            form.update_field(&FieldRef::new(0, "name"), "Alice");

            let mut transport = MockSubmissionTransport::new();
            transport
                .expect_post()
                .withf(|title, content| {
                    title == "Reservation"
                        && content == "<p><strong>Name</strong>: Alice</p><p><strong>Date</strong>: </p>"
                })
                .times(1)
                .returning(|_, _| Ok(()));

            assert_eq!(form.submit(&transport).await, SubmitOutcome::Submitted);
        }

        #[test]
        fn test_submitting_is_visible_before_transport_answers() {
            let mut form = controller(two_step_state());
            let submission = form.begin_submit();
            assert!(submission.is_some());
            assert!(form.is_submitting());
            assert!(!form.state().submitted);
        }

        #[test]
        fn test_second_begin_is_rejected() {
            let mut form = controller(two_step_state());
            form.begin_submit();
            let revision = form.state().revision;
            assert!(form.begin_submit().is_none());
            assert_eq!(form.state().revision, revision);
        }

        #[tokio::test]
        async fn test_submit_while_in_flight_skips_transport() {
            let mut form = controller(two_step_state());
            form.begin_submit();

            let mut transport = MockSubmissionTransport::new();
            transport.expect_post().never();

            let outcome = form.submit(&transport).await;
            assert_eq!(outcome, SubmitOutcome::AlreadySubmitting);
            assert!(form.is_submitting());
        }

        #[tokio::test]
        async fn test_submit_after_success_is_rejected() {
            let mut form = controller(two_step_state());
            form.submit(&succeeding_transport()).await;

            let mut transport = MockSubmissionTransport::new();
            transport.expect_post().never();
            let outcome = form.submit(&transport).await;

            assert_eq!(outcome, SubmitOutcome::AlreadySubmitted);
            assert!(!form.is_submitting());
            assert!(form.state().is_consistent());
        }

        #[test]
        fn test_success_is_batched_failure_is_not() {
            let (mut form, batches) = counting_controller(two_step_state());
            form.begin_submit();
            form.finish_submit(Err(SubmissionError::new("boom")));
            assert_eq!(batches.get(), 0);

            form.begin_submit();
            form.finish_submit(Ok(()));
            assert_eq!(batches.get(), 1);
        }

        #[test]
        fn test_submit_with_blocking_runtime() {
            let mut form = controller(two_step_state());
            let transport = succeeding_transport();
            let outcome = tokio_test::block_on(form.submit(&transport));
            assert_eq!(outcome, SubmitOutcome::Submitted);
        }
    }

    mod reset {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_reset_after_submission() {
            let mut form = controller(two_step_state());
            form.update_field(&FieldRef::new(0, "name"), "Alice");
            form.submit(&succeeding_transport()).await;

            form.reset();
            let state = form.state();
            assert!(!state.submitted);
            assert_eq!(state.active_step_id(), Some(0));
            assert!(form.review_fields().iter().all(|f| f.value.is_empty()));
            assert!(state.is_consistent());
        }

        #[test]
        fn test_reset_from_middle_step() {
            let mut form = controller(three_step_state());
            form.go_next();
            form.go_next();
            form.update_field(&FieldRef::new(2, "notes"), "Window seat");

            form.reset();
            assert_eq!(form.state().active_step_id(), Some(0));
            assert_eq!(form.state().active_count(), 1);
            assert_eq!(form.state().steps[2].fields[0].value, "");
        }

        #[test]
        fn test_reset_keeps_error_message() {
            let mut form = controller(two_step_state());
            form.begin_submit();
            form.finish_submit(Err(SubmissionError::new("Network error")));

            form.reset();
            assert_eq!(form.state().error_message, "Network error");
        }

        #[test]
        fn test_reset_is_batched() {
            let (mut form, batches) = counting_controller(two_step_state());
            form.reset();
            assert_eq!(batches.get(), 1);
        }
    }

    mod scenarios {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_scenario_next_from_first_step() {
            let state = FormState::from_steps(vec![
                Step::new(0, vec![Field::new("1", "Name")]),
                Step::new(1, vec![]),
            ])
            .unwrap();
            let mut form = controller(state);
            form.go_next();
            assert!(form.state().steps[1].is_active);
            assert!(!form.state().steps[0].is_active);
        }

        #[test]
        fn test_scenario_back_from_first_step() {
            let mut form = controller(two_step_state());
            let before = form.state().clone();
            form.go_back();
            assert_eq!(form.state(), &before);
        }

        #[tokio::test]
        async fn test_scenario_failed_submission_then_retry() {
            let mut form = controller(two_step_state());
            form.go_next();
            form.submit(&failing_transport("Network error")).await;
            assert_eq!(form.state().active_step_id(), Some(1));

            let outcome = form.submit(&succeeding_transport()).await;
            assert_eq!(outcome, SubmitOutcome::Submitted);
            assert!(form.state().submitted);
        }
    }
}
