use crate::generator::template::{in_sector, rotation_angles};
use anyhow::ensure;
use lidarcore::scan::{PointData, ScanFrame};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic rotation: a far wall all around,
/// one near obstacle and a sprinkling of multi-path specks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub speed_deg_s: f64,
    pub angular_resolution: f32,
    pub wall_distance_mm: u16,
    pub obstacle_start_deg: f32,
    pub obstacle_span_deg: f32,
    pub obstacle_distance_mm: u16,
    pub noise_specks: usize,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            speed_deg_s: 3600.0,
            angular_resolution: 0.8,
            wall_distance_mm: 6500,
            obstacle_start_deg: 80.0,
            obstacle_span_deg: 20.0,
            obstacle_distance_mm: 1200,
            noise_specks: 12,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

// Keeps specks clear of the obstacle so they never touch it.
const SPECK_MARGIN_DEG: f32 = 2.0;

fn build_points(config: &GeneratorConfig) -> anyhow::Result<Vec<PointData>> {
    ensure!(
        config.angular_resolution > 0.0,
        "angular resolution must be positive, got {}",
        config.angular_resolution
    );
    ensure!(
        config.obstacle_span_deg + 2.0 * SPECK_MARGIN_DEG < 180.0,
        "obstacle span {} leaves no room for noise",
        config.obstacle_span_deg
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let angles = rotation_angles(config.angular_resolution);
    let mut points = Vec::with_capacity(angles.len() + config.noise_specks);

    for angle in angles {
        let point = if in_sector(angle, config.obstacle_start_deg, config.obstacle_span_deg) {
            let distance = config.obstacle_distance_mm.saturating_add(rng.gen_range(0..=5));
            PointData::new(angle, distance, rng.gen_range(200..=255))
        } else {
            let distance = config.wall_distance_mm.saturating_add(rng.gen_range(0..=40));
            PointData::new(angle, distance, rng.gen_range(80..=120))
        };
        points.push(point);
    }

    let keep_out_start = config.obstacle_start_deg - SPECK_MARGIN_DEG;
    let keep_out_span = config.obstacle_span_deg + 2.0 * SPECK_MARGIN_DEG;
    for _ in 0..config.noise_specks {
        let mut angle: f32 = rng.gen_range(0.0..360.0);
        if in_sector(angle, keep_out_start, keep_out_span) {
            angle = (angle + 180.0).rem_euclid(360.0);
        }
        points.push(PointData::new(
            angle,
            rng.gen_range(150..=2500),
            rng.gen_range(0..=15),
        ));
    }

    // Drivers give no ordering guarantee.
    points.shuffle(&mut rng);
    Ok(points)
}

pub fn build_scan_frame_from_config(config: &GeneratorConfig) -> anyhow::Result<ScanFrame> {
    let points = build_points(config)?;
    Ok(ScanFrame::new(points, config.speed_deg_s))
}
