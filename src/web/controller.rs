// src/web/controller.rs
// Page controller: one validate -> call -> display cycle per form submission

use super::page::{PageView, Panel, render_page};
use super::state::AppState;
use crate::experts::{ExpertClient, Submission};
use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Where a submission cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Validating,
    Calling,
    Displaying,
}

impl PageState {
    pub fn can_transition_to(self, next: PageState) -> bool {
        use PageState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Calling)
                | (Calling, Displaying)
                | (Displaying, Idle)
        )
    }
}

/// One pass through the state machine, recording every state visited
#[derive(Debug)]
pub struct Cycle {
    state: PageState,
    visited: Vec<PageState>,
}

impl Default for Cycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Cycle {
    pub fn new() -> Self {
        Self {
            state: PageState::Idle,
            visited: vec![PageState::Idle],
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn visited(&self) -> &[PageState] {
        &self.visited
    }

    fn advance(&mut self, next: PageState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid page transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "Page state");
        self.state = next;
        self.visited.push(next);
    }
}

/// Form fields as posted by the page
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub persona: String,
    #[serde(default)]
    pub text: String,
}

/// Run one submission through Validating, Calling and Displaying, ending Idle.
///
/// Blank text goes straight back to Idle with a warning and no model call.
pub async fn run_cycle(
    client: &ExpertClient,
    submission: Submission,
    cancel: &CancellationToken,
) -> (PageView, Cycle) {
    let mut cycle = Cycle::new();

    cycle.advance(PageState::Validating);
    if let Err(e) = submission.validate() {
        cycle.advance(PageState::Idle);
        let view = PageView {
            selected: submission.persona_key,
            text: submission.user_text,
            panel: Panel::Warning(e.to_user_string()),
        };
        return (view, cycle);
    }

    cycle.advance(PageState::Calling);
    let outcome = client.consult(&submission, cancel).await;

    cycle.advance(PageState::Displaying);
    let view = PageView {
        selected: submission.persona_key,
        text: submission.user_text,
        panel: outcome.into(),
    };

    cycle.advance(PageState::Idle);
    (view, cycle)
}

/// GET / : fresh form
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let registry = state.registry();
    Html(render_page(registry, &PageView::idle(registry)))
}

/// POST / : one submission cycle
pub async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Html<String> {
    let submission = Submission::new(form.persona, form.text);
    let (view, _cycle) = run_cycle(&state.client, submission, &state.call_token()).await;
    Html(render_page(state.registry(), &view))
}
