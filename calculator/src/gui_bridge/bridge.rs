use crate::gui_bridge::model::VisualizationModel;
use crate::input::EstimateForm;
use crate::workflow::runner::Runner;
use carboncore::telemetry::LogManager;
use carboncore::Country;
use serde::Serialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

type SharedModel = Arc<RwLock<VisualizationModel>>;

#[derive(Debug, Serialize)]
struct CountryEntry {
    country: Country,
    label: String,
    intensity_g_per_kwh: f64,
}

/// Bridge that serves the latest estimate over HTTP and accepts new forms.
pub struct GuiBridge {
    state: SharedModel,
    runner: Arc<Runner>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(VisualizationModel::default())),
            runner,
        }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let report_route = warp::path("report")
            .and(warp::path::end())
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| {
                let guard = state.read().unwrap_or_else(PoisonError::into_inner);
                warp::reply::json(&*guard)
            });

        let estimate_route = warp::path("estimate")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter.clone())
            .map(
                |form: EstimateForm, state: SharedModel, runner: Arc<Runner>| {
                    match runner.execute(&form) {
                        Ok(outcome) => {
                            let model = VisualizationModel::from_outcome(&outcome);
                            store(&state, model.clone());
                            warp::reply::with_status(warp::reply::json(&model), StatusCode::OK)
                        }
                        Err(err) => warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": format!("{:#}", err),
                            })),
                            StatusCode::UNPROCESSABLE_ENTITY,
                        ),
                    }
                },
            );

        let metrics_route = warp::path("metrics")
            .and(warp::path::end())
            .and(warp::get())
            .and(runner_filter.clone())
            .map(|runner: Arc<Runner>| warp::reply::json(&runner.metrics()));

        let countries_route = warp::path("countries")
            .and(warp::path::end())
            .and(warp::get())
            .and(runner_filter)
            .map(|runner: Arc<Runner>| {
                let entries: Vec<CountryEntry> = runner
                    .country_defaults()
                    .into_iter()
                    .map(|(country, intensity_g_per_kwh)| CountryEntry {
                        country,
                        label: country.label(),
                        intensity_g_per_kwh,
                    })
                    .collect();
                warp::reply::json(&entries)
            });

        report_route
            .or(estimate_route)
            .or(metrics_route)
            .or(countries_route)
    }

    /// Serves the routes from a background thread until the process exits.
    pub fn spawn(&self, address: SocketAddr) {
        let routes = self.routes();
        thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
    }

    pub fn publish(&self, model: &VisualizationModel) {
        store(&self.state, model.clone());
        let logger = LogManager::new();
        match &model.result {
            Some(result) => logger.record(&format!(
                "[GUI] published estimate: {:.4} g CO2-eq",
                result.emissions_g
            )),
            None => logger.record("[GUI] published empty estimate"),
        }
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn store(state: &SharedModel, model: VisualizationModel) {
    let mut guard = state.write().unwrap_or_else(PoisonError::into_inner);
    *guard = model;
}

#[cfg(test)]
mod tests {
    use super::*;
    use carboncore::IntensityTable;
    use serde_json::Value;

    fn bridge() -> GuiBridge {
        GuiBridge::new(Arc::new(Runner::new(IntensityTable::eu_default())))
    }

    #[test]
    fn gui_bridge_updates_state() {
        let gui = bridge();
        let form = EstimateForm {
            prompt: "list five facts about bees".into(),
            ..Default::default()
        };
        let outcome = gui.runner.execute(&form).unwrap();
        let model = VisualizationModel::from_outcome(&outcome);
        gui.publish(&model);
        assert_eq!(gui.snapshot().result, outcome.result);
    }

    #[tokio::test]
    async fn estimate_route_publishes_report() {
        let gui = bridge();
        let routes = gui.routes();

        let response = warp::test::request()
            .method("POST")
            .path("/estimate")
            .json(&json!({"workload": "image", "units": 3, "intensity_override": 475.0}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        let emissions = body["result"]["emissions_g"].as_f64().unwrap();
        assert!((emissions - 7.125).abs() < 1e-9);

        let response = warp::test::request()
            .method("GET")
            .path("/report")
            .reply(&routes)
            .await;
        let report: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(report["workload"], "image");
        assert_eq!(report["chart"]["bars"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn invalid_override_is_unprocessable() {
        let gui = bridge();
        let routes = gui.routes();

        let response = warp::test::request()
            .method("POST")
            .path("/estimate")
            .json(&json!({"prompt": "hi", "intensity_override": -5.0}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = warp::test::request()
            .method("GET")
            .path("/metrics")
            .reply(&routes)
            .await;
        let metrics: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(metrics["rejected"], 1);
    }

    #[tokio::test]
    async fn countries_route_lists_defaults() {
        let routes = bridge().routes();
        let response = warp::test::request()
            .method("GET")
            .path("/countries")
            .reply(&routes)
            .await;
        let entries: Value = serde_json::from_slice(response.body()).unwrap();
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), 27);
        assert_eq!(entries[0]["country"], "austria");
        assert_eq!(entries[0]["intensity_g_per_kwh"], 366.0);
    }
}
