//! TUI application state.

use tokio::sync::mpsc;

use crate::config::WidgetConfig;
use crate::core::{
    Count, CounterWidget, FetchError, MemorySurface, Region, RequestAction, Ticket,
};

/// Outcome of a background fetch, tagged with the request that started it.
#[derive(Debug)]
pub struct FetchResult {
    pub ticket: Ticket,
    pub outcome: Result<Count, FetchError>,
}

/// Application state for the TUI.
pub struct App {
    /// The widget, rendering into an in-memory surface drawn every frame.
    pub widget: CounterWidget<MemorySurface>,

    status_region: String,
    message_region: String,
    result_tx: mpsc::UnboundedSender<FetchResult>,
}

impl App {
    /// Create the app, binding a widget to the configured endpoint.
    ///
    /// Fetch results are delivered on the returned receiver and must be
    /// passed back through [`App::apply`].
    pub fn new(
        config: &WidgetConfig,
    ) -> crate::core::Result<(Self, mpsc::UnboundedReceiver<FetchResult>)> {
        let surface =
            MemorySurface::with_regions([config.status_region.as_str(), config.message_region.as_str()]);
        let widget = CounterWidget::new(
            &config.endpoint,
            config.status_region.as_str(),
            config.message_region.as_str(),
            surface,
        )?;
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let app = Self {
            widget,
            status_region: config.status_region.clone(),
            message_region: config.message_region.clone(),
            result_tx,
        };

        Ok((app, result_rx))
    }

    /// Start a request in the background. The display switches to loading immediately.
    pub fn request(&mut self, action: RequestAction) {
        let ticket = self.widget.begin(action);
        let client = self.widget.client().clone();
        let tx = self.result_tx.clone();

        tokio::spawn(async move {
            let outcome = client.fetch().await;
            let _ = tx.send(FetchResult { ticket, outcome });
        });
    }

    /// Apply a finished fetch to the widget.
    pub fn apply(&mut self, result: FetchResult) {
        self.widget.settle(result.ticket, result.outcome);
    }

    /// Current contents of the status region.
    #[must_use]
    pub fn status(&self) -> Region {
        self.widget
            .surface()
            .region(&self.status_region)
            .cloned()
            .unwrap_or_default()
    }

    /// Current contents of the message region.
    #[must_use]
    pub fn message(&self) -> Region {
        self.widget
            .surface()
            .region(&self.message_region)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DisplayMode;

    fn config() -> WidgetConfig {
        WidgetConfig {
            endpoint: "http://127.0.0.1:9/count".to_string(),
            ..WidgetConfig::default()
        }
    }

    #[tokio::test]
    async fn request_enters_loading_before_result() {
        let (mut app, _rx) = App::new(&config()).unwrap();
        app.request(RequestAction::Get);

        assert_eq!(app.widget.state().mode, DisplayMode::Loading);
        assert_eq!(app.status().class, "counter loading");
        assert_eq!(app.message(), Region::default());
    }

    #[tokio::test]
    async fn applied_result_is_rendered() {
        let (mut app, _rx) = App::new(&config()).unwrap();
        let ticket = app.widget.begin(RequestAction::Get);

        app.apply(FetchResult {
            ticket,
            outcome: Ok(Count(Some(12))),
        });

        assert_eq!(app.status().text, "12");
        assert_eq!(app.message().class, "success");
    }

    #[tokio::test]
    async fn stale_result_is_ignored() {
        let (mut app, _rx) = App::new(&config()).unwrap();
        let first = app.widget.begin(RequestAction::Get);
        let second = app.widget.begin(RequestAction::Get);

        app.apply(FetchResult {
            ticket: second,
            outcome: Ok(Count(Some(2))),
        });
        app.apply(FetchResult {
            ticket: first,
            outcome: Ok(Count(Some(1))),
        });

        assert_eq!(app.status().text, "2");
    }

    #[test]
    fn custom_locators_are_used() {
        let config = WidgetConfig {
            status_region: "visits".to_string(),
            message_region: "notice".to_string(),
            ..config()
        };
        let (app, _rx) = App::new(&config).unwrap();
        assert!(app.widget.surface().region("visits").is_some());
        assert!(app.widget.surface().region("notice").is_some());
    }
}
