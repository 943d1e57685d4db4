mod api;
mod cli;
mod config;
mod core;
mod prelude;
mod quantity;
mod tables;

use std::path::Path;

use chrono::{DateTime, Local, Timelike};
use clap::{Parser, crate_version};
use tokio::time::sleep;

use crate::{
    api::{evcc, gateway::ChargeGateway},
    cli::{Args, Command, WatchArgs},
    config::Config,
    core::{
        band::TimeBand,
        engine::{ChargeCommand, decide},
        window::select,
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
    tables::build_forecast_table,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let config = Config::read_from(&args.config)?;
    let level = if config.global.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().without_time().compact().with_max_level(level).init();
    info!(version = crate_version!(), "starting…");

    match args.command {
        Command::Watch(watch_args) => watch(&args.config, &config, &watch_args).await,
        Command::Peek => peek(&config).await,
    }
}

/// The control loop: reload the configuration, pick the band covering the
/// current hour, run one decision cycle, sleep, repeat.
///
/// A failed cycle is logged and skipped; the loop keeps running. The gateway
/// host is read once at startup, everything else is hot-reloadable.
async fn watch(config_path: &Path, initial: &Config, args: &WatchArgs) -> Result {
    let gateway = evcc::Api::try_new(&initial.evcc.host)?;
    loop {
        let config = Config::read_from(config_path)?;
        let now = Local::now();
        match config.band_for_hour(now.hour()) {
            Some((name, band)) => {
                debug!(band = name, "running the check");
                if let Err(error) = run_cycle(&gateway, name, band, now, args.scout).await {
                    error!("cycle failed, skipping: {error:#}");
                }
            }
            None => info!("off shift, no band covers the current hour"),
        }
        if config.global.interval_secs == 0 {
            // Zero interval means a single cycle.
            return Ok(());
        }
        debug!(secs = config.global.interval_secs, "sleeping…");
        sleep(config.interval()).await;
    }
}

/// One decision cycle: fetch → select → decide → actuate.
async fn run_cycle<G: ChargeGateway>(
    gateway: &G,
    band_name: &str,
    band: &TimeBand,
    now: DateTime<Local>,
    scout: bool,
) -> Result {
    info!(from = band.start_hour, to = band.end_hour, "checking for the cheapest price window");
    let snapshot = gateway.get_state().await?;
    debug!(
        mode = ?snapshot.battery_mode,
        soc = %snapshot.state_of_charge,
        limit = %band.soc_limit
    );
    info!(tariff = %snapshot.tariff, "current grid tariff");

    let window = select(&snapshot, band)
        .with_context(|| format!("band `{band_name}` does not fit the forecast"))?;
    match &window {
        Some(window) => {
            info!(price = %window.price, start = %window.start, "cheapest window");
        }
        None => info!("the forecast is empty, nothing to decide"),
    }

    match decide(window.as_ref(), now) {
        ChargeCommand::Start(threshold) => {
            if scout {
                info!(%threshold, "scout mode, would start charging");
            } else {
                gateway.set_grid_charge_limit(threshold).await?;
                info!(%threshold, "charging started");
            }
        }
        ChargeCommand::Stop => {
            if scout {
                info!("scout mode, would stop charging");
            } else {
                gateway.set_grid_charge_limit(KilowattHourRate::ZERO).await?;
                info!("charging stopped");
            }
        }
        ChargeCommand::NoOp => {
            debug!("nothing to command");
        }
    }
    Ok(())
}

/// One-shot inspection: fetch the state and render the forecast, with the
/// slot the active band would pick highlighted. Never commands anything.
async fn peek(config: &Config) -> Result {
    let gateway = evcc::Api::try_new(&config.evcc.host)?;
    let snapshot = gateway.get_state().await?;
    info!(
        mode = ?snapshot.battery_mode,
        soc = %snapshot.state_of_charge,
        tariff = %snapshot.tariff,
        "gateway state"
    );
    let window = match config.band_for_hour(Local::now().hour()) {
        Some((name, band)) => {
            info!(band = name, "active band");
            select(&snapshot, band)?
        }
        None => None,
    };
    println!("{}", build_forecast_table(&snapshot.forecast, window.as_ref()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use crate::{
        core::{
            forecast::ForecastSlot,
            snapshot::{BatteryMode, StateSnapshot},
        },
        quantity::percent::Percent,
    };

    struct FakeGateway {
        snapshot: StateSnapshot,
        commanded: Mutex<Vec<KilowattHourRate>>,
    }

    impl FakeGateway {
        fn new(snapshot: StateSnapshot) -> Self {
            Self { snapshot, commanded: Mutex::new(Vec::new()) }
        }

        fn commanded(&self) -> Vec<KilowattHourRate> {
            self.commanded.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChargeGateway for FakeGateway {
        async fn get_state(&self) -> Result<StateSnapshot> {
            Ok(self.snapshot.clone())
        }

        async fn set_grid_charge_limit(&self, threshold: KilowattHourRate) -> Result {
            self.commanded.lock().unwrap().push(threshold);
            Ok(())
        }
    }

    fn snapshot(mode: BatteryMode, soc: f64, tariff: f64, prices: &[f64]) -> StateSnapshot {
        let forecast = prices
            .iter()
            .enumerate()
            .map(|(hour, price)| {
                let hour = u32::try_from(hour).unwrap();
                ForecastSlot {
                    start: Local.with_ymd_and_hms(2026, 1, 15, hour, 0, 0).unwrap(),
                    end: Local.with_ymd_and_hms(2026, 1, 15, hour + 1, 0, 0).unwrap(),
                    price: KilowattHourRate(*price),
                }
            })
            .collect();
        StateSnapshot {
            battery_mode: mode,
            state_of_charge: Percent(soc),
            tariff: KilowattHourRate(tariff),
            forecast,
        }
    }

    fn band(start_hour: u32, end_hour: u32) -> TimeBand {
        TimeBand { start_hour, end_hour, soc_limit: Percent(80.0) }
    }

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 15, hour, 20, 0).unwrap()
    }

    #[tokio::test]
    async fn test_cycle_starts_charging() -> Result {
        let mut prices = vec![0.30; 16];
        prices[14] = 0.12;
        let gateway = FakeGateway::new(snapshot(BatteryMode::Normal, 40.0, 0.30, &prices));
        run_cycle(&gateway, "afternoon", &band(13, 15), at_hour(14), false).await?;
        assert_eq!(gateway.commanded(), [KilowattHourRate(0.12)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_cycle_stops_on_price_rise() -> Result {
        let mut prices = vec![0.30; 16];
        prices[14] = 0.12;
        let gateway = FakeGateway::new(snapshot(BatteryMode::Charging, 40.0, 0.35, &prices));
        run_cycle(&gateway, "afternoon", &band(13, 15), at_hour(14), false).await?;
        assert_eq!(gateway.commanded(), [KilowattHourRate::ZERO]);
        Ok(())
    }

    #[tokio::test]
    async fn test_scout_mode_commands_nothing() -> Result {
        let mut prices = vec![0.30; 16];
        prices[14] = 0.12;
        let gateway = FakeGateway::new(snapshot(BatteryMode::Normal, 40.0, 0.30, &prices));
        run_cycle(&gateway, "afternoon", &band(13, 15), at_hour(14), true).await?;
        assert!(gateway.commanded().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_forecast_commands_nothing() -> Result {
        let gateway = FakeGateway::new(snapshot(BatteryMode::Normal, 40.0, 0.30, &[]));
        run_cycle(&gateway, "afternoon", &band(13, 15), at_hour(14), false).await?;
        assert!(gateway.commanded().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_band_past_horizon_fails_the_cycle() {
        let gateway = FakeGateway::new(snapshot(BatteryMode::Normal, 40.0, 0.30, &[0.1, 0.2]));
        let error =
            run_cycle(&gateway, "afternoon", &band(13, 15), at_hour(14), false).await.unwrap_err();
        assert!(error.to_string().contains("afternoon"));
        assert!(gateway.commanded().is_empty());
    }
}
