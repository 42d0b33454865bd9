use crate::bridge::model::ScanModel;
use crate::generator::profile::{build_scan_frame_from_config, GeneratorConfig};
use crate::workflow::runner::Runner;
use anyhow::{Context, Result};
use lidarcore::scan::ScanFrame;
use log::{error, info};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct IngestError;

impl warp::reject::Reject for IngestError {}

type SharedModel = Arc<RwLock<ScanModel>>;

fn store(state: &SharedModel, model: ScanModel) {
    match state.write() {
        Ok(mut guard) => *guard = model,
        Err(poisoned) => *poisoned.into_inner() = model,
    }
}

fn load(state: &SharedModel) -> ScanModel {
    match state.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// HTTP bridge that filters posted scans and serves the latest result.
pub struct ScanBridge {
    state: SharedModel,
    runner: Arc<Runner>,
}

impl ScanBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ScanModel::default())),
            runner,
        }
    }

    /// Starts serving on a background thread with its own runtime.
    pub fn spawn(&self, addr: SocketAddr) -> Result<()> {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner = self.runner.clone();
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("scan")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: SharedModel| warp::reply::json(&load(&state)));

        let post_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |frame: ScanFrame, state: SharedModel, runner: Arc<Runner>| async move {
                    match runner.execute(&frame) {
                        Ok(result) => {
                            let kept = result.points.len();
                            store(&state, ScanModel::from_result(&result, None));
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({"status": "ok", "kept": kept})),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            error!("ingest error: {:#}", err);
                            Err(warp::reject::custom(IngestError))
                        }
                    }
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig, state: SharedModel, runner: Arc<Runner>| async move {
                    match build_scan_frame_from_config(&config)
                        .and_then(|frame| runner.execute(&frame))
                    {
                        Ok(result) => {
                            if let Some(name) = config.scenario.as_ref() {
                                info!(
                                    "scenario {} -> kept {}, discarded {}",
                                    name,
                                    result.points.len(),
                                    result.discarded_points
                                );
                            }
                            let discarded = result.discarded_points;
                            store(
                                &state,
                                ScanModel::from_result(&result, config.scenario.clone()),
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "discarded": discarded,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            error!("ingest-config error: {:#}", err);
                            Err(warp::reject::custom(IngestError))
                        }
                    }
                },
            );

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building bridge runtime")?;
        thread::spawn(move || {
            let routes = get_route.or(post_route).or(generator_route);
            runtime.block_on(async move {
                warp::serve(routes).run(addr).await;
            });
        });

        info!("scan bridge listening on http://{}", addr);
        Ok(())
    }

    pub fn publish(&self, model: ScanModel) {
        info!(
            "publishing scan: kept {} of {}, discarded {}",
            model.kept_count, model.input_count, model.discarded_points
        );
        store(&self.state, model);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ScanModel {
        load(&self.state)
    }
}
