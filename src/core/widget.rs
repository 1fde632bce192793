//! The counter widget.

use super::client::CounterClient;
use super::error::{Error, FetchError, Result};
use super::state::{Count, DisplayState, Event, RequestAction};
use super::surface::DisplaySurface;

/// Identifies the request started by [`CounterWidget::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Fetches the visitor count and reflects it in two display regions.
///
/// The status region shows the count, a loading placeholder or the error
/// marker. The message region shows a success or failure message.
#[derive(Debug)]
pub struct CounterWidget<S> {
    client: CounterClient,
    surface: S,
    status_region: String,
    message_region: String,
    state: DisplayState,
    action: RequestAction,
    latest: u64,
}

impl<S: DisplaySurface> CounterWidget<S> {
    /// Bind a widget to `endpoint` and to two regions of `surface`.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is invalid or a region is missing.
    pub fn new(
        endpoint: &str,
        status_region: impl Into<String>,
        message_region: impl Into<String>,
        surface: S,
    ) -> Result<Self> {
        let client = CounterClient::new(endpoint)?;
        Self::with_client(client, status_region, message_region, surface)
    }

    /// Bind a widget using an existing client.
    ///
    /// # Errors
    ///
    /// Returns error if `surface` has no region for either locator.
    pub fn with_client(
        client: CounterClient,
        status_region: impl Into<String>,
        message_region: impl Into<String>,
        surface: S,
    ) -> Result<Self> {
        let status_region = status_region.into();
        let message_region = message_region.into();

        for locator in [&status_region, &message_region] {
            if !surface.has_region(locator) {
                return Err(Error::MissingRegion(locator.clone()));
            }
        }

        tracing::info!(
            endpoint = %client.endpoint(),
            status_region = %status_region,
            message_region = %message_region,
            "counter widget bound"
        );

        Ok(Self {
            client,
            surface,
            status_region,
            message_region,
            state: DisplayState::default(),
            action: RequestAction::default(),
            latest: 0,
        })
    }

    /// Current display state.
    #[must_use]
    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    /// The surface the widget renders into.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Client used for requests. Cheap to clone for background fetches.
    #[must_use]
    pub const fn client(&self) -> &CounterClient {
        &self.client
    }

    /// Action of the most recent request.
    #[must_use]
    pub const fn action(&self) -> RequestAction {
        self.action
    }

    /// Fetch the count and show it, or show why it failed.
    pub async fn refresh(&mut self) -> &DisplayState {
        self.run(RequestAction::Get).await
    }

    /// Same request as [`refresh`](Self::refresh), reported as an update.
    pub async fn update(&mut self) -> &DisplayState {
        self.run(RequestAction::Update).await
    }

    async fn run(&mut self, action: RequestAction) -> &DisplayState {
        let ticket = self.begin(action);
        let outcome = self.client.fetch().await;
        self.settle(ticket, outcome);
        &self.state
    }

    /// Enter the loading state for a new request.
    ///
    /// The returned ticket supersedes every earlier one.
    pub fn begin(&mut self, action: RequestAction) -> Ticket {
        self.latest += 1;
        self.action = action;
        self.transition(Event::RequestStarted);
        Ticket(self.latest)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and leaves the display untouched when a newer request
    /// has been started since.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<Count, FetchError>,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding superseded counter response"
            );
            return false;
        }

        match &outcome {
            Ok(count) => tracing::info!(count = %count, "counter updated"),
            Err(err) => tracing::warn!(kind = %err.kind(), error = %err, "counter request failed"),
        }

        self.transition(Event::Settled(outcome));
        true
    }

    fn transition(&mut self, event: Event) {
        self.state = self.state.apply(event);

        let status = self.state.status_region();
        let message = self.state.message_region(self.action);
        self.surface.render(&self.status_region, &status);
        self.surface.render(&self.message_region, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FailureKind;
    use crate::core::state::{DisplayMode, LOADING_TEXT};
    use crate::core::surface::MemorySurface;

    const ENDPOINT: &str = "http://127.0.0.1:9/count";

    fn widget() -> CounterWidget<MemorySurface> {
        CounterWidget::new(
            ENDPOINT,
            "counter",
            "message",
            MemorySurface::with_regions(["counter", "message"]),
        )
        .unwrap()
    }

    #[test]
    fn missing_region_fails_binding() {
        let result = CounterWidget::new(
            ENDPOINT,
            "counter",
            "message",
            MemorySurface::with_regions(["counter"]),
        );
        assert!(matches!(result, Err(Error::MissingRegion(ref id)) if id == "message"));
    }

    #[test]
    fn begin_renders_loading() {
        let mut widget = widget();
        widget.begin(RequestAction::Get);

        assert_eq!(widget.state().mode, DisplayMode::Loading);
        let status = widget.surface().region("counter").unwrap();
        assert_eq!(status.text, LOADING_TEXT);
        assert_eq!(status.class, "counter loading");
        assert_eq!(widget.surface().text("message"), "");
    }

    #[test]
    fn settle_renders_outcome() {
        let mut widget = widget();
        let ticket = widget.begin(RequestAction::Get);
        assert!(widget.settle(ticket, Ok(Count(Some(42)))));

        assert_eq!(widget.surface().text("counter"), "42");
        assert_eq!(widget.surface().text("message"), "✅ Visitor count: 42");
    }

    #[test]
    fn begin_clears_previous_message() {
        let mut widget = widget();
        let ticket = widget.begin(RequestAction::Get);
        widget.settle(ticket, Err(FetchError::Http { status: 500 }));
        assert!(!widget.surface().text("message").is_empty());

        widget.begin(RequestAction::Get);
        assert_eq!(widget.surface().text("message"), "");
        assert_eq!(widget.surface().region("message").unwrap().class, "");
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut widget = widget();
        let first = widget.begin(RequestAction::Get);
        let second = widget.begin(RequestAction::Update);

        assert!(widget.settle(second, Err(FetchError::Network("offline".into()))));
        assert!(!widget.settle(first, Ok(Count(Some(1)))));

        assert_eq!(widget.state().failure, Some(FailureKind::NetworkError));
        assert_eq!(
            widget.surface().text("message"),
            "❌ Failed to update counter: offline"
        );
    }

    #[test]
    fn late_first_response_does_not_override_pending_second() {
        let mut widget = widget();
        let first = widget.begin(RequestAction::Get);
        let _second = widget.begin(RequestAction::Get);

        assert!(!widget.settle(first, Ok(Count(Some(1)))));
        assert_eq!(widget.state().mode, DisplayMode::Loading);
    }
}
