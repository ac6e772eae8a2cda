//! Session phases and the pure transition function

use crate::sanitize::{assess, InputRejection};
use crate::session::SessionError;

/// Where the session stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing confirmed yet
    #[default]
    Idle,
    /// The candidate was not recognized; the user picks a suggestion
    AwaitingSelection {
        candidate: String,
        suggestions: Vec<String>,
    },
    /// Industry confirmed, generation pending or failed
    ///
    /// `regenerate` is set when the failed generation was an explicit
    /// regeneration; a retry replays it with the cache bypassed.
    Confirmed { industry: String, regenerate: bool },
    /// A report for `industry` is cached
    Reported { industry: String },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingSelection { .. } => "awaiting_selection",
            Phase::Confirmed { .. } => "confirmed",
            Phase::Reported { .. } => "reported",
        }
    }

    /// Confirmed industry, if any
    pub fn industry(&self) -> Option<&str> {
        match self {
            Phase::Confirmed { industry, .. } | Phase::Reported { industry } => Some(industry),
            _ => None,
        }
    }
}

/// Input fed to the session by the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user typed an industry
    Submit(String),
    /// The user picked suggestion `n` (zero-based)
    ConfirmSuggestion(usize),
    /// Drop the current input and start over
    TryDifferentInput,
    /// Repeat the step that last failed
    Retry,
    /// Generate a new report for the confirmed industry
    Regenerate,
    /// Show the cached report again
    Show,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Submit(_) => "submit",
            SessionEvent::ConfirmSuggestion(_) => "confirm_suggestion",
            SessionEvent::TryDifferentInput => "try_different_input",
            SessionEvent::Retry => "retry",
            SessionEvent::Regenerate => "regenerate",
            SessionEvent::Show => "show",
        }
    }
}

/// What the session must do for an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Input failed the local check; no call is made
    RejectInput(InputRejection),
    /// Correct and validate `input`
    Validate { input: String },
    /// Produce the report for `industry`; `force` bypasses the cache
    Generate { industry: String, force: bool },
    /// Serve the cached report for `industry`
    ServeCached { industry: String },
    /// Back to idle
    Reset,
}

/// Map `(phase, event)` to an action
///
/// `last_input` is the most recent raw input the session accepted. The
/// same input submitted again while its industry is confirmed does not
/// re-run classification.
pub fn next_action(
    phase: &Phase,
    event: &SessionEvent,
    last_input: Option<&str>,
) -> Result<Action, SessionError> {
    let unexpected = || SessionError::UnexpectedEvent {
        event: event.name(),
        phase: phase.name(),
    };

    match (phase, event) {
        (_, SessionEvent::Submit(text)) => {
            if let Err(reason) = assess(text) {
                return Ok(Action::RejectInput(reason));
            }
            let same_input = last_input.is_some_and(|last| last.trim() == text.trim());
            match phase {
                Phase::Reported { industry } if same_input => Ok(Action::ServeCached {
                    industry: industry.clone(),
                }),
                Phase::Confirmed { industry, .. } if same_input => Ok(Action::Generate {
                    industry: industry.clone(),
                    force: false,
                }),
                _ => Ok(Action::Validate {
                    input: text.trim().to_string(),
                }),
            }
        }

        (Phase::AwaitingSelection { suggestions, .. }, SessionEvent::ConfirmSuggestion(index)) => {
            suggestions
                .get(*index)
                .map(|industry| Action::Generate {
                    industry: industry.clone(),
                    force: false,
                })
                .ok_or(SessionError::NoSuchSuggestion {
                    index: *index,
                    available: suggestions.len(),
                })
        }

        (_, SessionEvent::TryDifferentInput) => Ok(Action::Reset),

        (Phase::Idle, SessionEvent::Retry) => last_input
            .map(|input| Action::Validate {
                input: input.to_string(),
            })
            .ok_or_else(unexpected),
        (
            Phase::Confirmed {
                industry,
                regenerate,
            },
            SessionEvent::Retry,
        ) => Ok(Action::Generate {
            industry: industry.clone(),
            force: *regenerate,
        }),
        (Phase::Reported { industry }, SessionEvent::Retry) => Ok(Action::ServeCached {
            industry: industry.clone(),
        }),
        // A failed regeneration leaves the previous report in the cache
        (
            Phase::Confirmed { industry, .. } | Phase::Reported { industry },
            SessionEvent::Show,
        ) => Ok(Action::ServeCached {
            industry: industry.clone(),
        }),

        (
            Phase::Confirmed { industry, .. } | Phase::Reported { industry },
            SessionEvent::Regenerate,
        ) => Ok(Action::Generate {
            industry: industry.clone(),
            force: true,
        }),

        (_, SessionEvent::Show) => Err(SessionError::NoReport),

        _ => Err(unexpected()),
    }
}
