//! Display state and its transitions.
//!
//! The widget never touches a surface directly while deciding what to show:
//! it folds [`Event`]s into a [`DisplayState`] and renders the result into
//! two [`Region`]s.

use std::fmt;

use serde::Serialize;

use super::error::{FailureKind, FetchError};

/// Placeholder shown in the status region while a request is in flight.
pub const LOADING_TEXT: &str = "...";

/// Fixed marker shown in the status region after a failure.
pub const ERROR_TEXT: &str = "Error";

/// Class shared by every status region rendering.
const STATUS_CLASS: &str = "counter";

/// Current rendering mode of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl DisplayMode {
    /// Visual class name for this mode, if it has one.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Loading => Some("loading"),
            Self::Success => Some("success"),
            Self::Error => Some("error"),
        }
    }
}

/// Which request the user asked for. Only changes the failure wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    #[default]
    Get,
    Update,
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("get"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Counter value as reported by the endpoint.
///
/// An absent `count` is kept as `None` and rendered as `undefined` rather
/// than being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Count(pub Option<u64>);

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("undefined"),
        }
    }
}

/// Input to [`DisplayState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A request was issued.
    RequestStarted,
    /// The in-flight request finished.
    Settled(Result<Count, FetchError>),
}

/// What the widget currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DisplayState {
    pub mode: DisplayMode,
    /// Counter value on success, failure reason on error.
    pub text: String,
    /// Kind of the last failure, set only in [`DisplayMode::Error`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl DisplayState {
    /// Compute the state that follows `event`.
    ///
    /// Any state may move to `Loading`. Only `Loading` may settle; a settle
    /// event in any other mode leaves the state untouched.
    #[must_use]
    pub fn apply(&self, event: Event) -> Self {
        match event {
            Event::RequestStarted => Self {
                mode: DisplayMode::Loading,
                text: LOADING_TEXT.to_string(),
                failure: None,
            },
            Event::Settled(outcome) if self.mode == DisplayMode::Loading => match outcome {
                Ok(count) => Self {
                    mode: DisplayMode::Success,
                    text: count.to_string(),
                    failure: None,
                },
                Err(err) => Self {
                    mode: DisplayMode::Error,
                    text: err.to_string(),
                    failure: Some(err.kind()),
                },
            },
            Event::Settled(_) => {
                tracing::debug!(mode = ?self.mode, "ignoring settle outside of loading");
                self.clone()
            }
        }
    }

    /// Rendering of the status region.
    #[must_use]
    pub fn status_region(&self) -> Region {
        let text = match self.mode {
            DisplayMode::Idle => String::new(),
            DisplayMode::Loading | DisplayMode::Success => self.text.clone(),
            DisplayMode::Error => ERROR_TEXT.to_string(),
        };
        let class = match self.mode.class() {
            Some(class) => format!("{STATUS_CLASS} {class}"),
            None => STATUS_CLASS.to_string(),
        };
        Region { text, class }
    }

    /// Rendering of the message region.
    #[must_use]
    pub fn message_region(&self, action: RequestAction) -> Region {
        match self.mode {
            DisplayMode::Idle | DisplayMode::Loading => Region::default(),
            DisplayMode::Success => Region {
                text: format!("✅ Visitor count: {}", self.text),
                class: "success".to_string(),
            },
            DisplayMode::Error => Region {
                text: format!("❌ Failed to {action} counter: {}", self.text),
                class: "error".to_string(),
            },
        }
    }
}

/// Text and visual class of one display region.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Region {
    pub text: String,
    pub class: String,
}
