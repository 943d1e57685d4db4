//! [EVCC](https://evcc.io) REST API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    api::{client, gateway::ChargeGateway},
    core::{
        forecast::ForecastSlot,
        snapshot::{BatteryMode, StateSnapshot},
    },
    prelude::*,
    quantity::{percent::Percent, rate::KilowattHourRate},
};

pub struct Api {
    client: Client,
    base_url: String,
}

impl Api {
    pub fn try_new(host: &str) -> Result<Self> {
        Ok(Self { client: client::try_new()?, base_url: format!("http://{host}") })
    }
}

#[async_trait]
impl ChargeGateway for Api {
    #[instrument(skip_all)]
    async fn get_state(&self) -> Result<StateSnapshot> {
        let url = format!("{}/api/state", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to call `{url}`"))?
            .error_for_status()
            .with_context(|| format!("`{url}` failed"))?
            .json::<StateResponse>()
            .await
            .context("failed to deserialize the gateway state")?;
        debug!(
            mode = ?response.result.battery_mode,
            n_slots = response.result.forecast.grid.len(),
            "fetched"
        );
        Ok(response.result.into())
    }

    #[instrument(skip_all, fields(threshold = %threshold))]
    async fn set_grid_charge_limit(&self, threshold: KilowattHourRate) -> Result {
        let url = format!("{}/api/batterygridchargelimit/{}", self.base_url, threshold.0);
        self.client
            .post(&url)
            .send()
            .await
            .with_context(|| format!("failed to call `{url}`"))?
            .error_for_status()
            .with_context(|| format!("`{url}` failed"))?;
        debug!("applied");
        Ok(())
    }
}

#[derive(Deserialize)]
struct StateResponse {
    result: StateResult,
}

#[derive(Deserialize)]
struct StateResult {
    #[serde(rename = "batteryMode", default)]
    battery_mode: BatteryMode,

    #[serde(rename = "batterySoc")]
    battery_soc: Percent,

    #[serde(rename = "tariffGrid")]
    tariff_grid: KilowattHourRate,

    #[serde(default)]
    forecast: Forecast,
}

#[derive(Default, Deserialize)]
struct Forecast {
    #[serde(default)]
    grid: Vec<ForecastSlot>,
}

impl From<StateResult> for StateSnapshot {
    fn from(result: StateResult) -> Self {
        Self {
            battery_mode: result.battery_mode,
            state_of_charge: result.battery_soc,
            tariff: result.tariff_grid,
            forecast: result.forecast.grid,
        }
    }
}
