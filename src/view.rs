//! Per-screen view state.
//!
//! A screen holds one [`ViewState`] per data set it shows. `load` drives the
//! request lifecycle and guarantees the loading flag drops on both the
//! success and the failure path, with failures turned into a [`Notice`].

use std::future::Future;

use crate::api::{ApiError, ErrorClass, Outcome};

pub const MSG_SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const MSG_OFFLINE: &str =
    "An error occurred. Please check your internet connection and try again.";
pub const MSG_UNEXPECTED: &str = "The server sent an unexpected response. Please try again.";
pub const MSG_GENERIC: &str = "An error occurred. Please try again.";

/// Lifecycle of the most recent request: `Idle → InFlight → Succeeded | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// A non-blocking, user-visible message (alert or inline banner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn from_error(title: &str, err: &ApiError) -> Self {
        let message = if err.requires_reauth() {
            MSG_SESSION_EXPIRED.to_string()
        } else {
            match (err.class(), err) {
                (ErrorClass::Transport, _) => MSG_OFFLINE.to_string(),
                (_, ApiError::Malformed { .. }) => MSG_UNEXPECTED.to_string(),
                _ => err
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| MSG_GENERIC.to_string()),
            }
        };
        Self {
            title: title.to_string(),
            message,
        }
    }
}

#[derive(Debug)]
pub struct ViewState<T> {
    data: Option<T>,
    phase: RequestPhase,
    notice: Option<Notice>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: None,
            phase: RequestPhase::Idle,
            notice: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn loading(&self) -> bool {
        self.phase == RequestPhase::InFlight
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the pending notice once it has been shown.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn begin(&mut self) {
        self.phase = RequestPhase::InFlight;
        self.notice = None;
    }

    /// Record an outcome. On failure the previously shown data is kept.
    pub fn finish(&mut self, outcome: Outcome<T>, error_title: &str) {
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.phase = RequestPhase::Succeeded;
            }
            Err(err) => {
                log::warn!("{}: {}", error_title, err);
                self.notice = Some(Notice::from_error(error_title, &err));
                self.phase = RequestPhase::Failed;
            }
        }
    }

    /// Run one request through the lifecycle.
    pub async fn load<F>(&mut self, error_title: &str, request: F)
    where
        F: Future<Output = Outcome<T>>,
    {
        self.begin();
        let outcome = request.await;
        self.finish(outcome, error_title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TransportKind;

    fn transport() -> ApiError {
        ApiError::Transport {
            kind: TransportKind::Connect,
            message: "connection refused".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_success_clears_loading() {
        let mut view: ViewState<String> = ViewState::new();
        assert_eq!(view.phase(), RequestPhase::Idle);

        view.load("Error", async { Ok("Jane Doe".to_string()) }).await;

        assert!(!view.loading());
        assert_eq!(view.phase(), RequestPhase::Succeeded);
        assert_eq!(view.data().map(String::as_str), Some("Jane Doe"));
        assert!(view.notice().is_none());
    }

    #[tokio::test]
    async fn test_load_failure_clears_loading_and_sets_notice() {
        let mut view: ViewState<String> = ViewState::new();
        view.load("Error fetching data", async { Err(transport()) })
            .await;

        assert!(!view.loading());
        assert_eq!(view.phase(), RequestPhase::Failed);
        assert!(view.data().is_none());
        let notice = view.take_notice().unwrap();
        assert_eq!(notice.title, "Error fetching data");
        assert_eq!(notice.message, MSG_OFFLINE);
        assert!(view.notice().is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let mut view: ViewState<u32> = ViewState::new();
        view.load("Error", async { Ok(1) }).await;
        view.load("Error", async { Err(ApiError::from_status(500, "")) })
            .await;

        assert_eq!(view.data(), Some(&1));
        assert_eq!(view.notice().unwrap().message, MSG_GENERIC);
    }

    #[test]
    fn test_begin_marks_in_flight() {
        let mut view: ViewState<u32> = ViewState::new();
        view.begin();
        assert!(view.loading());
        view.finish(Ok(2), "Error");
        assert!(!view.loading());
    }

    #[test]
    fn test_notice_messages() {
        let unauthorized = ApiError::from_status(401, r#"{"message":"Unauthorized"}"#);
        assert_eq!(
            Notice::from_error("Error", &unauthorized).message,
            MSG_SESSION_EXPIRED
        );

        let forbidden = ApiError::from_status(403, r#"{"message":"Forbidden"}"#);
        assert_eq!(Notice::from_error("Error", &forbidden).message, "Forbidden");

        let malformed = ApiError::Malformed {
            status: 200,
            message: "missing field `fullName`".to_string(),
        };
        assert_eq!(Notice::from_error("Error", &malformed).message, MSG_UNEXPECTED);
    }
}
