use anyhow::Context;
use bridge::http::{bridge_bind_address, ScanBridge};
use bridge::model::ScanModel;
use clap::Parser;
use generator::profile::build_scan_frame_from_config;
use lidarcore::scan::ScanFrame;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Near-range scan filter driver")]
struct Args {
    /// Filter one synthetic rotation and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Filter a recorded scan frame (JSON) instead of a synthetic one
    #[arg(long)]
    input: Option<PathBuf>,
    /// Write the filtered scan frame as JSON
    #[arg(long)]
    output: Option<PathBuf>,
    /// Rotation speed in degrees per second
    #[arg(long, default_value_t = 3600.0)]
    speed: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Pass scans through unfiltered
    #[arg(long, default_value_t = false)]
    no_filter: bool,
    /// Keep the HTTP bridge alive for incoming scans
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn load_frame(path: &Path) -> anyhow::Result<ScanFrame> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading scan frame {}", path.display()))?;
    ScanFrame::from_json(&contents).with_context(|| format!("decoding {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.speed, args.seed, !args.no_filter)
    };

    let runner = Arc::new(Runner::new(workflow_config.clone()));
    let bridge = ScanBridge::new(runner.clone());

    let frame = match args.input.as_ref() {
        Some(path) => Some(load_frame(path)?),
        None if args.offline => Some(build_scan_frame_from_config(&workflow_config.generator)?),
        None => None,
    };

    if let Some(frame) = frame {
        let result = runner.execute(&frame)?;

        println!(
            "Offline run -> kept {}/{} points, far {}, groups {}, discarded {}",
            result.points.len(),
            result.input_count,
            result.far_count,
            result.group_count,
            result.discarded_points
        );

        bridge.publish(ScanModel::from_result(
            &result,
            workflow_config.generator.scenario.clone(),
        ));

        if let Some(path) = args.output.as_ref() {
            let encoded = serde_json::to_string_pretty(&result.to_frame(frame.speed_deg_s))
                .context("encoding filtered scan frame")?;
            fs::write(path, encoded)
                .with_context(|| format!("writing filtered scan {}", path.display()))?;
        }

        let report = format!(
            "input={} kept={} far={} groups={} discarded={} notes={:?}\n",
            result.input_count,
            result.points.len(),
            result.far_count,
            result.group_count,
            result.discarded_points,
            result.notes
        );
        let report_path = PathBuf::from("tools/data/offline_filter.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report {}", report_path.display()))?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        bridge.spawn(bridge_bind_address())?;
        println!("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
