use lidarcore::prelude::FilterConfig;
use lidarcore::processing::NearFilter;
use lidarcore::scan::PointData;

const FAST: f64 = 3600.0;
const SLOW: f64 = 1800.0;

fn arc(start: f32, step: f32, count: usize, distance: u16, confidence: u8) -> Vec<PointData> {
    (0..count)
        .map(|i| PointData::new(start + i as f32 * step, distance, confidence))
        .collect()
}

fn sorted(mut points: Vec<PointData>) -> Vec<PointData> {
    points.sort_by(|a, b| {
        a.angle
            .total_cmp(&b.angle)
            .then(a.distance.cmp(&b.distance))
            .then(a.confidence.cmp(&b.confidence))
    });
    points
}

fn mixed_scan() -> Vec<PointData> {
    let mut scan = Vec::new();
    // Back wall, outside the near range.
    scan.extend(arc(60.0, 0.8, 40, 7200, 90));
    // Table leg: dense, confidence too low to matter.
    scan.extend(arc(150.0, 0.5, 18, 900, 8));
    // Chair: confident and small.
    scan.extend(arc(200.0, 0.7, 6, 1800, 160));
    // Multi-path specks.
    scan.push(PointData::new(240.0, 350, 20));
    scan.push(PointData::new(241.0, 352, 30));
    scan.extend(arc(300.0, 0.6, 5, 2500, 9));
    // Object straddling the seam.
    scan.extend(arc(358.0, 0.5, 4, 1200, 120));
    scan.extend(arc(0.1, 0.5, 4, 1210, 120));
    scan.reverse();
    scan
}

#[test]
fn empty_scan_yields_empty_output() {
    assert!(NearFilter::new(FAST).filter(&[]).is_empty());
}

#[test]
fn all_far_scan_is_unchanged() {
    let mut scan = arc(10.0, 1.0, 30, 5000, 3);
    scan.extend(arc(5.0, 7.0, 10, 12000, 0));
    assert_eq!(NearFilter::new(FAST).filter(&scan), scan);
}

#[test]
fn partition_accounts_for_every_sample() {
    let scan = mixed_scan();
    let outcome = NearFilter::new(FAST).run(&scan);
    assert_eq!(outcome.far_count + outcome.near_count, scan.len());
    assert_eq!(
        outcome.points.len() + outcome.discarded_points,
        scan.len()
    );
}

#[test]
fn far_points_lead_output_in_encounter_order() {
    let scan = mixed_scan();
    let far: Vec<PointData> = scan.iter().copied().filter(|p| p.distance >= 5000).collect();
    let output = NearFilter::new(FAST).filter(&scan);
    assert_eq!(&output[..far.len()], far.as_slice());
    assert!(output[far.len()..].iter().all(|p| p.distance < 5000));
}

#[test]
fn mixed_scan_keeps_obstacles_and_drops_specks() {
    let outcome = NearFilter::new(FAST).run(&mixed_scan());
    // Wall 40, table leg 18, chair 6, seam object 8.
    assert_eq!(outcome.points.len(), 72);
    assert_eq!(outcome.discarded_points, 7);
    assert!(outcome.wrap_merged);
}

#[test]
fn dense_low_confidence_cluster_is_retained() {
    let scan = arc(100.0, 0.5, 16, 1000, 5);
    let output = NearFilter::new(FAST).filter(&scan);
    assert_eq!(output, scan);
}

#[test]
fn sparse_low_confidence_pair_is_discarded() {
    let mut scan = arc(20.0, 1.0, 5, 6000, 100);
    scan.extend(arc(50.0, 0.5, 2, 800, 100));
    let output = NearFilter::new(FAST).filter(&scan);
    assert_eq!(output.len(), 5);
    assert!(output.iter().all(|p| p.distance == 6000));
}

#[test]
fn seam_groups_merge_into_dense_cluster() {
    let head = arc(0.2, 0.4, 8, 1000, 10);
    let tail = arc(356.8, 0.4, 8, 1000, 10);
    let scan: Vec<PointData> = head.iter().chain(tail.iter()).copied().collect();

    let outcome = NearFilter::new(FAST).run(&scan);
    assert!(outcome.wrap_merged);
    assert_eq!(outcome.group_count, 1);
    let expected: Vec<PointData> = tail.iter().chain(head.iter()).copied().collect();
    assert_eq!(outcome.points, expected);
}

#[test]
fn seam_groups_at_different_range_stay_apart() {
    let head = arc(0.2, 0.4, 8, 1000, 10);
    let tail = arc(356.8, 0.4, 8, 1500, 10);
    let scan: Vec<PointData> = head.into_iter().chain(tail).collect();

    let outcome = NearFilter::new(FAST).run(&scan);
    assert!(!outcome.wrap_merged);
    assert_eq!(outcome.group_count, 2);
    assert!(outcome.points.is_empty());
}

#[test]
fn angular_limit_follows_rotation_speed() {
    // 1.2 degree steps: inside the 1.6 limit at 10 Hz, outside 0.8 at 5 Hz.
    let scan = arc(100.0, 1.2, 3, 1000, 100);

    let fast = NearFilter::new(FAST).run(&scan);
    assert_eq!(fast.group_count, 1);
    assert_eq!(fast.points.len(), 3);

    let slow = NearFilter::new(SLOW).run(&scan);
    assert_eq!(slow.group_count, 3);
    assert!(slow.points.is_empty());
}

#[test]
fn speed_update_applies_to_next_scan() {
    let scan = arc(100.0, 1.2, 3, 1000, 100);
    let mut filter = NearFilter::new(FAST);
    assert_eq!(filter.filter(&scan).len(), 3);
    filter.set_speed(SLOW);
    assert!(filter.filter(&scan).is_empty());
}

#[test]
fn refiltering_output_is_stable() {
    let filter = NearFilter::new(FAST);
    let first = filter.filter(&mixed_scan());
    let second = filter.filter(&first);
    assert_eq!(sorted(second), sorted(first));
}

#[test]
fn input_order_does_not_change_kept_set() {
    let filter = NearFilter::new(FAST);
    let scan = mixed_scan();
    let mut shuffled = scan.clone();
    shuffled.rotate_left(17);
    assert_eq!(
        sorted(filter.filter(&scan)),
        sorted(filter.filter(&shuffled))
    );
}

#[test]
fn custom_thresholds_are_honoured() {
    let config = FilterConfig {
        confidence_low: 150,
        ..Default::default()
    };
    let filter = NearFilter::with_config(FAST, config).unwrap();
    let scan = arc(200.0, 0.7, 6, 1800, 140);
    assert!(filter.filter(&scan).is_empty());
    assert_eq!(NearFilter::new(FAST).filter(&scan), scan);
}
