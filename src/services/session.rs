// Conversation Flow Controller
// Explicit two-state machine replacing the bot's implicit per-chat session
// state. Transitions are returned as values so the flow is testable without
// any chat transport.

use std::collections::HashMap;

use crate::models::AnalysisReport;
use crate::services::detection::{render_report, AnalysisError};

pub const START_MESSAGE: &str = "👋 Добро пожаловать в чат-бот \"ОБЩЕЕ-ЧАСТНОЕ\"!\n\n\
    Чтобы отправить интервью на анализ, используй команду\n\n/new_interview\n\n\
    Помни, что интервью должно быть в формате DOCX-файла, где вопрос начинается с \"В:\", а ответ с \"О:\"";

pub const REQUEST_DOCUMENT_MESSAGE: &str =
    "Отправь файл в формате .DOCX с интервью, где вопросы должны начинаться с \"В:\", а ответы с \"О:\"";

pub const FALLBACK_MESSAGE: &str = "Не знаю, что это значит :(\n\n\
    Чтобы отправить интервью на анализ, используй команду\n\n/new_interview";

pub const WRONG_FORMAT_MESSAGE: &str =
    "ОШИБКА: нужен файл в формате .DOCX с интервью, где вопросы должны начинаться с \"В:\", а ответы с \"О:\"! Отправь новое интервью:";

pub const MALFORMED_MESSAGE: &str = "ОШИБКА: неверная структура интервью!\n\
    Необходимо, чтобы вопросы начинались с \"В:\", а ответы с \"О:\".\n\
    Попробуй снова /new_interview";

pub const NO_ANSWERS_MESSAGE: &str =
    "ОШИБКА: ответов (начинаются с \"О:\") не найдены! Попробуй снова /new_interview";

pub const GENERIC_FAILURE_MESSAGE: &str = "Произошла ошибка, попробуй снова /new_interview";

/// Per-session conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingDocument,
}

/// Incoming conversation event, as delivered by the chat transport.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Start,
    NewInterview,
    Document { file_name: String },
    Text(String),
}

/// What the transport should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Reply(String),
    /// Retrieve the document bytes, run the analysis and feed its outcome
    /// back through [`apply_outcome`].
    AcceptDocument,
    Ignore,
}

/// Pure transition function for non-analysis events.
pub fn transition(state: SessionState, event: &SessionEvent) -> (SessionState, SessionAction) {
    match (state, event) {
        (SessionState::Idle, SessionEvent::Start) => (
            SessionState::Idle,
            SessionAction::Reply(START_MESSAGE.to_string()),
        ),
        (SessionState::Idle, SessionEvent::NewInterview) => (
            SessionState::AwaitingDocument,
            SessionAction::Reply(REQUEST_DOCUMENT_MESSAGE.to_string()),
        ),
        (SessionState::Idle, SessionEvent::Text(text)) => {
            // Unknown slash commands are ignored, anything else gets guidance.
            if text.starts_with('/') {
                (SessionState::Idle, SessionAction::Ignore)
            } else {
                (
                    SessionState::Idle,
                    SessionAction::Reply(FALLBACK_MESSAGE.to_string()),
                )
            }
        }
        (SessionState::Idle, SessionEvent::Document { .. }) => (
            SessionState::Idle,
            SessionAction::Reply(FALLBACK_MESSAGE.to_string()),
        ),
        (SessionState::AwaitingDocument, SessionEvent::Document { .. }) => {
            (SessionState::AwaitingDocument, SessionAction::AcceptDocument)
        }
        // Only a document advances the waiting state.
        (SessionState::AwaitingDocument, _) => {
            (SessionState::AwaitingDocument, SessionAction::Ignore)
        }
    }
}

/// Map an analysis outcome to the next state and the reply to deliver.
///
/// A wrong-format submission keeps the session waiting for a resubmission;
/// every other outcome (success included) returns the session to idle.
pub fn apply_outcome(
    outcome: &Result<AnalysisReport, AnalysisError>,
) -> (SessionState, String) {
    match outcome {
        Ok(report) => (SessionState::Idle, render_report(report)),
        Err(AnalysisError::WrongFormat) => (
            SessionState::AwaitingDocument,
            WRONG_FORMAT_MESSAGE.to_string(),
        ),
        Err(AnalysisError::MalformedTranscript { .. }) => {
            (SessionState::Idle, MALFORMED_MESSAGE.to_string())
        }
        Err(AnalysisError::NoAnswersFound) => (SessionState::Idle, NO_ANSWERS_MESSAGE.to_string()),
        Err(AnalysisError::Classification(_)) => {
            (SessionState::Idle, GENERIC_FAILURE_MESSAGE.to_string())
        }
    }
}

/// Session states keyed by session id. One transcript at a time per session:
/// a session already in `AwaitingDocument` cannot enter it twice.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    states: HashMap<i64, SessionState>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, session_id: i64) -> SessionState {
        self.states.get(&session_id).copied().unwrap_or_default()
    }

    /// Run one event through the state machine and persist the new state.
    pub fn handle(&mut self, session_id: i64, event: &SessionEvent) -> SessionAction {
        let (next, action) = transition(self.state(session_id), event);
        self.states.insert(session_id, next);
        action
    }

    /// Record an analysis outcome and return the reply text.
    pub fn finish(
        &mut self,
        session_id: i64,
        outcome: &Result<AnalysisReport, AnalysisError>,
    ) -> String {
        let (next, reply) = apply_outcome(outcome);
        self.states.insert(session_id, next);
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Label, MethodTally};

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            run_id: "run".to_string(),
            sentence_count: 2,
            model_tally: MethodTally { general: 2, specific: 0 },
            morph_tally: MethodTally { general: 0, specific: 2 },
            model_verdict: Label::General,
            morph_verdict: Label::Specific,
        }
    }

    #[test]
    fn test_start_keeps_idle() {
        let (state, action) = transition(SessionState::Idle, &SessionEvent::Start);
        assert_eq!(state, SessionState::Idle);
        assert_eq!(action, SessionAction::Reply(START_MESSAGE.to_string()));
    }

    #[test]
    fn test_new_interview_enters_awaiting() {
        let (state, action) = transition(SessionState::Idle, &SessionEvent::NewInterview);
        assert_eq!(state, SessionState::AwaitingDocument);
        assert!(matches!(action, SessionAction::Reply(_)));
    }

    #[test]
    fn test_idle_text_gets_guidance() {
        let (state, action) =
            transition(SessionState::Idle, &SessionEvent::Text("привет".to_string()));
        assert_eq!(state, SessionState::Idle);
        assert_eq!(action, SessionAction::Reply(FALLBACK_MESSAGE.to_string()));
    }

    #[test]
    fn test_idle_unknown_command_ignored() {
        let (_, action) =
            transition(SessionState::Idle, &SessionEvent::Text("/unknown".to_string()));
        assert_eq!(action, SessionAction::Ignore);
    }

    #[test]
    fn test_awaiting_ignores_everything_but_documents() {
        for event in [
            SessionEvent::Start,
            SessionEvent::NewInterview,
            SessionEvent::Text("текст".to_string()),
        ] {
            let (state, action) = transition(SessionState::AwaitingDocument, &event);
            assert_eq!(state, SessionState::AwaitingDocument);
            assert_eq!(action, SessionAction::Ignore);
        }
    }

    #[test]
    fn test_awaiting_accepts_document() {
        let event = SessionEvent::Document {
            file_name: "interview.docx".to_string(),
        };
        let (state, action) = transition(SessionState::AwaitingDocument, &event);
        assert_eq!(state, SessionState::AwaitingDocument);
        assert_eq!(action, SessionAction::AcceptDocument);
    }

    #[test]
    fn test_wrong_format_keeps_awaiting() {
        let outcome: Result<AnalysisReport, AnalysisError> = Err(AnalysisError::WrongFormat);
        let (state, reply) = apply_outcome(&outcome);
        assert_eq!(state, SessionState::AwaitingDocument);
        assert_eq!(reply, WRONG_FORMAT_MESSAGE);
    }

    #[test]
    fn test_other_errors_reset_to_idle() {
        let outcome: Result<AnalysisReport, AnalysisError> = Err(AnalysisError::NoAnswersFound);
        let (state, reply) = apply_outcome(&outcome);
        assert_eq!(state, SessionState::Idle);
        assert_eq!(reply, NO_ANSWERS_MESSAGE);

        let outcome: Result<AnalysisReport, AnalysisError> =
            Err(AnalysisError::MalformedTranscript { line: "x".to_string() });
        let (state, _) = apply_outcome(&outcome);
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn test_success_resets_to_idle_with_report() {
        let outcome = Ok(sample_report());
        let (state, reply) = apply_outcome(&outcome);
        assert_eq!(state, SessionState::Idle);
        assert!(reply.contains("Интервью проанализировано"));
    }

    #[test]
    fn test_registry_full_round() {
        let mut registry = SessionRegistry::new();
        assert_eq!(registry.state(7), SessionState::Idle);

        registry.handle(7, &SessionEvent::NewInterview);
        assert_eq!(registry.state(7), SessionState::AwaitingDocument);

        let action = registry.handle(
            7,
            &SessionEvent::Document {
                file_name: "interview.docx".to_string(),
            },
        );
        assert_eq!(action, SessionAction::AcceptDocument);

        let reply = registry.finish(7, &Ok(sample_report()));
        assert!(reply.contains("Результат"));
        assert_eq!(registry.state(7), SessionState::Idle);

        // Sessions are independent.
        assert_eq!(registry.state(8), SessionState::Idle);
    }
}
