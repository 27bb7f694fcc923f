use serde::{Deserialize, Serialize};

/// Reading returned by a provider, before any presentation mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
}

/// Successful lookup, as shown on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub city: String,
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayError {
    pub message: String,
}

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// What the page renders: nothing yet, a reading, or an error. Never both.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayView {
    #[default]
    Empty,
    Weather(WeatherView),
    Error(DisplayError),
}

impl DisplayView {
    pub fn weather(&self) -> Option<&WeatherView> {
        match self {
            DisplayView::Weather(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DisplayError> {
        match self {
            DisplayView::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WeatherView> for DisplayView {
    fn from(view: WeatherView) -> Self {
        DisplayView::Weather(view)
    }
}

impl From<DisplayError> for DisplayView {
    fn from(err: DisplayError) -> Self {
        DisplayView::Error(err)
    }
}
