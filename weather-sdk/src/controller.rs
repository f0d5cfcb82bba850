use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    events::{EventBus, SdkEvent},
    model::CityQuery,
    presentation::{WeatherUiMapper, WeatherUiModel},
    usecase::GetWeatherInfo,
};

/// What the weather screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Loading,
    Content(WeatherUiModel),
    Error,
}

/// Drives one weather screen: a single fetch cycle and its lifecycle signals.
///
/// The state starts out as [`UiState::Loading`]. [`initialize`](Self::initialize)
/// runs the fetch once; later calls are ignored. A failed fetch is terminal.
#[derive(Debug)]
pub struct WeatherController {
    city: CityQuery,
    get_weather_info: Arc<dyn GetWeatherInfo>,
    mapper: WeatherUiMapper,
    events: EventBus,
    state: watch::Sender<UiState>,
    started: AtomicBool,
}

impl WeatherController {
    pub fn new(
        city: CityQuery,
        get_weather_info: Arc<dyn GetWeatherInfo>,
        mapper: WeatherUiMapper,
        events: EventBus,
    ) -> Self {
        let (state, _) = watch::channel(UiState::Loading);
        Self {
            city,
            get_weather_info,
            mapper,
            events,
            state,
            started: AtomicBool::new(false),
        }
    }

    pub fn city(&self) -> &CityQuery {
        &self.city
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Fetch weather for the configured city and publish the outcome.
    pub async fn initialize(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!(city = %self.city, "weather screen already initialized, ignoring");
            return;
        }

        self.set_state(UiState::Loading);

        match self.get_weather_info.fetch_weather_info(&self.city).await {
            Ok(info) => self.set_state(UiState::Content(self.mapper.to_ui_model(&info))),
            Err(err) => {
                warn!(city = %self.city, error = %err, "weather fetch failed");
                self.set_state(UiState::Error);
                self.events.emit(SdkEvent::FinishedWithError(Arc::new(err)));
            }
        }
    }

    /// The user dismissed the screen.
    pub fn on_back_click(&self) {
        self.events.emit(SdkEvent::Finished);
    }

    fn set_state(&self, state: UiState) {
        debug!(city = %self.city, ?state, "ui state changed");
        self.state.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Result, WeatherError},
        model::{CurrentWeather, HourlyWeather, WeatherInfo},
    };
    use async_trait::async_trait;
    use chrono::{Local, TimeZone};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::broadcast::{self, error::TryRecvError};

    #[derive(Debug)]
    enum Outcome {
        Success(WeatherInfo),
        Failure(&'static str),
    }

    #[derive(Debug)]
    struct StubGetWeatherInfo {
        outcome: Outcome,
        calls: AtomicUsize,
    }

    impl StubGetWeatherInfo {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self { outcome, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl GetWeatherInfo for StubGetWeatherInfo {
        async fn fetch_weather_info(&self, city: &CityQuery) -> Result<WeatherInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(city.as_str(), "Munich");
            match &self.outcome {
                Outcome::Success(info) => Ok(info.clone()),
                Outcome::Failure(body) => Err(WeatherError::Status {
                    endpoint: "current",
                    status: 502,
                    body: body.to_string(),
                }),
            }
        }
    }

    fn munich() -> WeatherInfo {
        let at = |hour| Local.with_ymd_and_hms(2024, 6, 10, hour, 0, 0).single().unwrap();
        WeatherInfo {
            current: CurrentWeather {
                city_name: "Munich".to_string(),
                temperature_celsius: 19.5,
                description: "Overcast".to_string(),
                local_observation_time: at(14),
            },
            hourly: vec![HourlyWeather {
                temperature_celsius: 18.0,
                description: "Light rain".to_string(),
                local_timestamp: at(15),
            }],
        }
    }

    fn controller(
        use_case: Arc<StubGetWeatherInfo>,
    ) -> (WeatherController, broadcast::Receiver<SdkEvent>) {
        let events = EventBus::new();
        let rx = events.subscribe();
        let controller = WeatherController::new(
            CityQuery::new("Munich").unwrap(),
            use_case,
            WeatherUiMapper,
            events,
        );
        (controller, rx)
    }

    #[tokio::test]
    async fn successful_fetch_shows_content() {
        let use_case = StubGetWeatherInfo::new(Outcome::Success(munich()));
        let (controller, mut rx) = controller(use_case.clone());

        assert_eq!(controller.state(), UiState::Loading);

        controller.initialize().await;

        let expected = WeatherUiMapper.to_ui_model(&munich());
        assert_eq!(controller.state(), UiState::Content(expected));
        assert_eq!(use_case.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn failed_fetch_shows_error_and_emits_once() {
        let use_case = StubGetWeatherInfo::new(Outcome::Failure("Network error"));
        let (controller, mut rx) = controller(use_case);

        assert_eq!(controller.state(), UiState::Loading);

        controller.initialize().await;

        assert_eq!(controller.state(), UiState::Error);
        match rx.try_recv().expect("one event expected") {
            SdkEvent::FinishedWithError(err) => match err.as_ref() {
                WeatherError::Status { status, body, .. } => {
                    assert_eq!(*status, 502);
                    assert_eq!(body, "Network error");
                }
                other => panic!("unexpected cause: {other:?}"),
            },
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn second_initialize_is_ignored() {
        let use_case = StubGetWeatherInfo::new(Outcome::Failure("down"));
        let (controller, mut rx) = controller(use_case.clone());

        controller.initialize().await;
        controller.initialize().await;

        assert_eq!(use_case.calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), UiState::Error);
        assert!(rx.try_recv().is_ok());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn state_subscribers_observe_content() {
        let use_case = StubGetWeatherInfo::new(Outcome::Success(munich()));
        let (controller, _rx) = controller(use_case);
        let mut state_rx = controller.subscribe_state();

        controller.initialize().await;

        state_rx.changed().await.unwrap();
        assert!(matches!(*state_rx.borrow_and_update(), UiState::Content(_)));
    }

    #[tokio::test]
    async fn back_click_emits_finished_in_every_state() {
        for outcome in [None, Some(Outcome::Success(munich())), Some(Outcome::Failure("x"))] {
            let initialize = outcome.is_some();
            let use_case =
                StubGetWeatherInfo::new(outcome.unwrap_or(Outcome::Success(munich())));
            let (controller, mut rx) = controller(use_case);

            if initialize {
                controller.initialize().await;
                if controller.state() == UiState::Error {
                    assert!(matches!(rx.try_recv(), Ok(SdkEvent::FinishedWithError(_))));
                }
            }

            controller.on_back_click();

            assert!(matches!(rx.try_recv(), Ok(SdkEvent::Finished)));
            assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        }
    }
}
