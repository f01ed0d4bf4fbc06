//! Weather API client, the real environment source
//!
//! Integrates with an OpenWeatherMap-style API for current conditions and
//! forecasts, queried by location name.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{DailyForecast, EnvironmentReading};

use crate::error::{AppError, AppResult};
use crate::services::environment::EnvironmentSource;

/// Number of days folded out of the 3-hourly forecast list
const FORECAST_DAYS: usize = 5;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    pop: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient against the production endpoint
    pub fn new(api_key: String, timeout: Duration) -> AppResult<Self> {
        Self::with_base_url(
            api_key,
            "https://api.openweathermap.org/data/2.5".to_string(),
            timeout,
        )
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::EnvironmentUnavailable(format!("weather API request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::EnvironmentUnavailable(format!(
                "weather API error: {} - {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            AppError::EnvironmentUnavailable(format!("failed to parse weather response: {}", e))
        })
    }

    async fn fetch_current(&self, location: &str) -> AppResult<OwmCurrentResponse> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url, location, self.api_key
        );
        self.get_json(&url).await
    }

    async fn fetch_forecast(&self, location: &str) -> AppResult<OwmForecastResponse> {
        let url = format!(
            "{}/forecast?q={}&appid={}&units=metric",
            self.base_url, location, self.api_key
        );
        self.get_json(&url).await
    }

    /// Fold the 3-hourly forecast list into at most [`FORECAST_DAYS`]
    /// daily entries
    fn build_daily_forecast(items: &[OwmForecastItem]) -> Vec<DailyForecast> {
        let mut days: BTreeMap<NaiveDate, Vec<&OwmForecastItem>> = BTreeMap::new();
        for item in items {
            let date = DateTime::from_timestamp(item.dt, 0)
                .unwrap_or_else(Utc::now)
                .date_naive();
            days.entry(date).or_default().push(item);
        }

        days.into_iter()
            .take(FORECAST_DAYS)
            .map(|(date, slots)| {
                let max = slots
                    .iter()
                    .map(|s| s.main.temp_max)
                    .fold(f64::MIN, f64::max);
                let min = slots
                    .iter()
                    .map(|s| s.main.temp_min)
                    .fold(f64::MAX, f64::min);
                let pop = slots.iter().map(|s| s.pop).fold(0.0, f64::max);
                let humidity =
                    slots.iter().map(|s| s.main.humidity).sum::<i32>() / slots.len().max(1) as i32;
                DailyForecast {
                    day: date.format("%a").to_string(),
                    date,
                    max_celsius: Decimal::from_f64_retain(max).unwrap_or_default().round_dp(1),
                    min_celsius: Decimal::from_f64_retain(min).unwrap_or_default().round_dp(1),
                    rain_chance_percent: (pop * 100.0).round() as i32,
                    humidity_percent: humidity,
                }
            })
            .collect()
    }

    fn convert(
        &self,
        location: &str,
        current: OwmCurrentResponse,
        forecast: Vec<OwmForecastItem>,
    ) -> EnvironmentReading {
        let rain_chance = forecast
            .first()
            .map(|item| (item.pop * 100.0).round() as i32)
            .unwrap_or(0);

        EnvironmentReading {
            location: location.to_string(),
            temperature_celsius: Decimal::from_f64_retain(current.main.temp)
                .unwrap_or_default()
                .round_dp(1),
            humidity_percent: current.main.humidity,
            rain_chance_percent: rain_chance,
            wind_speed_kmh: Decimal::from_f64_retain(current.wind.speed * 3.6)
                .unwrap_or_default()
                .round_dp(1),
            condition: current
                .weather
                .first()
                .map(|w| w.main.clone())
                .unwrap_or_default(),
            forecast: Self::build_daily_forecast(&forecast),
            fetched_at: Utc::now(),
        }
    }
}

#[async_trait]
impl EnvironmentSource for WeatherClient {
    async fn fetch(&self, location: &str) -> AppResult<EnvironmentReading> {
        let current = self.fetch_current(location).await?;

        // The current conditions drive scoring; a failed forecast call
        // degrades to an empty forecast instead of failing the reading
        let forecast = match self.fetch_forecast(location).await {
            Ok(response) => response.list,
            Err(err) => {
                tracing::warn!(location = %location, error = %err, "forecast fetch failed");
                Vec::new()
            }
        };

        Ok(self.convert(location, current, forecast))
    }
}
