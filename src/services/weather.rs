// SPDX-License-Identifier: MIT

//! Outbound weather provider clients.
//!
//! Two providers are supported:
//! - wttr.in (no API key)
//! - OpenWeather (requires `OPENWEATHER_API_KEY`)
//!
//! Provider failures surface as [`AppError::Upstream`] with the provider
//! message passed through to the caller.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);

/// Weather provider HTTP client.
#[derive(Clone)]
pub struct WeatherService {
    http: reqwest::Client,
    wttr_base_url: String,
    openweather_base_url: String,
    openweather_api_key: Option<String>,
}

/// Normalized report from wttr.in.
#[derive(Debug, Serialize)]
pub struct WttrReport {
    pub provider: &'static str,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed_kmph: Option<f64>,
    pub wind_dir_deg: Option<f64>,
    pub condition: Option<String>,
    pub icon: Option<String>,
}

/// Normalized report from OpenWeather.
#[derive(Debug, Serialize)]
pub struct OpenWeatherReport {
    pub provider: &'static str,
    pub coord: Option<serde_json::Value>,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    pub weather: Option<String>,
    pub weather_description: Option<String>,
    pub icon: Option<String>,
}

// ─── Provider wire formats ───────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCondition>,
}

#[derive(Debug, Default, Deserialize)]
struct WttrCondition {
    #[serde(rename = "temp_C", default)]
    temp_c: Option<String>,
    #[serde(rename = "FeelsLikeC", default)]
    feels_like_c: Option<String>,
    #[serde(default)]
    humidity: Option<String>,
    #[serde(rename = "windspeedKmph", default)]
    windspeed_kmph: Option<String>,
    #[serde(rename = "winddirDegree", default)]
    winddir_degree: Option<String>,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
    #[serde(rename = "weatherIconUrl", default)]
    weather_icon_url: Vec<WttrValue>,
}

#[derive(Debug, Default, Deserialize)]
struct WttrValue {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwmResponse {
    #[serde(default)]
    coord: Option<serde_json::Value>,
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
    deg: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWeather {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

impl WeatherService {
    pub fn new(openweather_api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            wttr_base_url: "https://wttr.in".to_string(),
            openweather_base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            openweather_api_key,
        }
    }

    /// Current conditions from wttr.in.
    pub async fn wttr_current(&self, lat: &str, lon: &str) -> Result<WttrReport, AppError> {
        let url = format!("{}/{},{}?format=j1", self.wttr_base_url, lat, lon);

        let response = self
            .http
            .get(&url)
            .timeout(PROVIDER_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "wttr.in returned status {}",
                response.status()
            )));
        }

        let parsed: WttrResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("wttr.in response unreadable: {}", e)))?;

        Ok(Self::map_wttr(parsed))
    }

    fn map_wttr(parsed: WttrResponse) -> WttrReport {
        let cur = parsed.current_condition.into_iter().next().unwrap_or_default();

        let to_num = |v: Option<String>| v.and_then(|s| s.parse::<f64>().ok());

        WttrReport {
            provider: "wttr",
            temperature: to_num(cur.temp_c),
            feels_like: to_num(cur.feels_like_c),
            humidity: to_num(cur.humidity),
            wind_speed_kmph: to_num(cur.windspeed_kmph),
            wind_dir_deg: to_num(cur.winddir_degree),
            condition: cur.weather_desc.into_iter().next().map(|v| v.value),
            icon: cur.weather_icon_url.into_iter().next().map(|v| v.value),
        }
    }

    /// Current conditions from OpenWeather (metric units).
    pub async fn openweather_current(
        &self,
        lat: &str,
        lon: &str,
    ) -> Result<OpenWeatherReport, AppError> {
        let api_key = self
            .openweather_api_key
            .as_deref()
            .ok_or_else(|| AppError::Upstream("OPENWEATHER_API_KEY not configured".to_string()))?;

        let url = format!("{}/weather", self.openweather_base_url);

        let response = self
            .http
            .get(&url)
            .timeout(PROVIDER_TIMEOUT)
            .query(&[
                ("lat", lat),
                ("lon", lon),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", "fr"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "OpenWeather returned status {}",
                response.status()
            )));
        }

        let parsed: OwmResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("OpenWeather response unreadable: {}", e)))?;

        Ok(Self::map_openweather(parsed))
    }

    fn map_openweather(parsed: OwmResponse) -> OpenWeatherReport {
        let main = parsed.main.unwrap_or_default();
        let wind = parsed.wind.unwrap_or_default();
        let weather = parsed.weather.into_iter().next().unwrap_or_default();

        OpenWeatherReport {
            provider: "openweather",
            coord: parsed.coord,
            temp: main.temp,
            feels_like: main.feels_like,
            pressure: main.pressure,
            humidity: main.humidity,
            wind_speed: wind.speed,
            wind_deg: wind.deg,
            weather: weather.main,
            weather_description: weather.description,
            icon: weather
                .icon
                .map(|i| format!("https://openweathermap.org/img/wn/{}@2x.png", i)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_wttr_fixture() {
        let fixture = serde_json::json!({
            "current_condition": [{
                "temp_C": "18",
                "FeelsLikeC": "17",
                "humidity": "62",
                "windspeedKmph": "14",
                "winddirDegree": "230",
                "weatherDesc": [{"value": "Partly cloudy"}],
                "weatherIconUrl": [{"value": "http://example.com/icon.png"}]
            }]
        });

        let parsed: WttrResponse = serde_json::from_value(fixture).unwrap();
        let report = WeatherService::map_wttr(parsed);

        assert_eq!(report.provider, "wttr");
        assert_eq!(report.temperature, Some(18.0));
        assert_eq!(report.feels_like, Some(17.0));
        assert_eq!(report.humidity, Some(62.0));
        assert_eq!(report.wind_speed_kmph, Some(14.0));
        assert_eq!(report.wind_dir_deg, Some(230.0));
        assert_eq!(report.condition.as_deref(), Some("Partly cloudy"));
    }

    #[test]
    fn test_map_wttr_empty_response() {
        let report = WeatherService::map_wttr(WttrResponse::default());
        assert_eq!(report.temperature, None);
        assert_eq!(report.condition, None);
    }

    #[test]
    fn test_map_openweather_fixture() {
        let fixture = serde_json::json!({
            "coord": {"lat": 48.85, "lon": 2.35},
            "main": {"temp": 21.3, "feels_like": 20.8, "pressure": 1013.0, "humidity": 55.0},
            "wind": {"speed": 3.6, "deg": 180.0},
            "weather": [{"main": "Clear", "description": "ciel dégagé", "icon": "01d"}]
        });

        let parsed: OwmResponse = serde_json::from_value(fixture).unwrap();
        let report = WeatherService::map_openweather(parsed);

        assert_eq!(report.provider, "openweather");
        assert_eq!(report.temp, Some(21.3));
        assert_eq!(report.weather.as_deref(), Some("Clear"));
        assert_eq!(
            report.icon.as_deref(),
            Some("https://openweathermap.org/img/wn/01d@2x.png")
        );
    }

    #[tokio::test]
    async fn test_missing_openweather_key_is_upstream_error() {
        let service = WeatherService::new(None);
        let err = service.openweather_current("48.85", "2.35").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
