//! Turns a submitted city name into something the page can show.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::LookupError,
    model::{CurrentConditions, DisplayView, WeatherView},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Never fails: every outcome is folded into a [`DisplayView`].
    pub async fn lookup(&self, raw_city: &str) -> DisplayView {
        match self.try_lookup(raw_city).await {
            Ok(view) => {
                debug!(city = %view.city, "weather lookup succeeded");
                DisplayView::Weather(view)
            }
            Err(err) => {
                match &err {
                    LookupError::EmptyCity => debug!("weather lookup skipped: empty city"),
                    LookupError::NotFound { city, status } => {
                        warn!(city = %city, status, "weather lookup rejected by provider")
                    }
                    LookupError::Fetch(reason) => {
                        warn!(reason = %reason, "weather lookup failed")
                    }
                }
                DisplayView::Error(err.into())
            }
        }
    }

    /// Blank input returns early without touching the provider.
    pub async fn try_lookup(&self, raw_city: &str) -> Result<WeatherView, LookupError> {
        let city = raw_city.trim();
        if city.is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let conditions = self
            .provider
            .current_weather(city)
            .await
            .map_err(|err| LookupError::from_provider(city, err))?;

        Ok(present(conditions))
    }
}

fn present(conditions: CurrentConditions) -> WeatherView {
    WeatherView {
        city: conditions.name,
        temperature_celsius: conditions.temperature,
        feels_like_celsius: conditions.feels_like,
        description: title_case(&conditions.description),
    }
}

/// Upper-case the first letter of each word and lower-case the rest.
///
/// Words are runs of alphabetic characters; an apostrophe inside a word
/// does not start a new one, so `"it's"` stays `"It's"`. This intentionally
/// differs from Python's `str.title()`, which gives `"It'S"` and title-cases
/// digraphs such as `ǆ` to `ǅ` where this upper-cases them to `Ǆ`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
                in_word = true;
            }
        } else {
            out.push(ch);
            in_word = in_word && ch == '\'';
        }
    }

    out
}
