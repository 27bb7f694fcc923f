//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration loading (file + environment)
//! - Abstraction over the weather provider, with the OpenWeather client
//! - The lookup step: input validation and mapping into display models
//!
//! It is used by `weather-web`, but has no knowledge of HTTP serving or templates.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{LookupError, ProviderError};
pub use lookup::{WeatherLookup, title_case};
pub use model::{CurrentConditions, DisplayError, DisplayView, WeatherView};
pub use provider::{WeatherProvider, provider_from_config};
