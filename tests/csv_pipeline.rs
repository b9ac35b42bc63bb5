use std::io::Write;

use bevy_math::Vec3;
use tempfile::tempdir;

use vidi_graph::GraphError;
use vidi_graph::core::{DataPoint, DegenerateAxisPolicy, GraphConfig};
use vidi_graph::data::load_points;
use vidi_graph::plot::plan_markers;

fn write_csv(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn csv_file_to_marker_positions() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "points.csv", "x,y,z,name\n0,0,0,a\n10,5,2,b\n");

    let config: GraphConfig = "csv: points.csv; id: 4".parse().unwrap();
    let points = load_points(path).unwrap();
    assert_eq!(
        points,
        vec![DataPoint::new(0.0, 0.0, 0.0), DataPoint::new(10.0, 5.0, 2.0)]
    );

    let plans = plan_markers(&points, config.dimensions(), config.degenerate_axis).unwrap();
    assert_eq!(plans[0].position, Vec3::ZERO);
    assert_eq!(plans[1].position, Vec3::new(1.0, 1.0, -1.0));
    assert_eq!(plans[1].point.label_text(), "(10,5,2)");
}

#[test]
fn scaled_volume_honours_configured_size() {
    let dir = tempdir().unwrap();
    let mut body = String::from("x,y,z\n");
    for i in 0..40 {
        let t = i as f64;
        body.push_str(&format!("{},{},{}\n", t * 0.5 - 3.0, (t * 0.7).sin() * 8.0, t * t));
    }
    let path = write_csv(dir.path(), "wave.csv", &body);

    let config = GraphConfig::new().size(3.0, 2.0, 4.0);
    let points = load_points(path).unwrap();
    let plans = plan_markers(&points, config.dimensions(), config.degenerate_axis).unwrap();

    let eps = 1e-5;
    for plan in &plans {
        let p = plan.position;
        assert!((-eps..=3.0 + eps).contains(&p.x));
        assert!((-eps..=2.0 + eps).contains(&p.y));
        assert!((-4.0 - eps..=eps).contains(&p.z));
    }
    // first row has the smallest x and z, last row the largest
    assert_eq!(plans[0].position.x, 0.0);
    assert_eq!(plans[0].position.z, 0.0);
    assert_eq!(plans[39].position.x, 3.0);
    assert_eq!(plans[39].position.z, -4.0);
}

#[test]
fn constant_column_with_reject_policy_fails() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "flat.csv", "x,y,z\n5,1,1\n5,2,3\n");
    let points = load_points(path).unwrap();

    let config = GraphConfig::new().degenerate_axis(DegenerateAxisPolicy::Reject);
    let err = plan_markers(&points, config.dimensions(), config.degenerate_axis).unwrap_err();
    assert!(matches!(
        err.current_context(),
        GraphError::DegenerateAxis { .. }
    ));

    let plans = plan_markers(&points, config.dimensions(), DegenerateAxisPolicy::ClampToLow)
        .unwrap();
    assert!(plans.iter().all(|p| p.position.x == 0.0));
}

#[test]
fn bad_cell_fails_the_whole_load() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "bad.csv", "x,y,z\n1,2,3\n4,5,six\n");

    let err = load_points(path).unwrap_err();
    assert!(matches!(
        err.current_context(),
        GraphError::ResourceLoad { .. }
    ));
    let parse = err
        .frames()
        .find_map(|frame| frame.downcast_ref::<GraphError>().filter(|e| {
            matches!(e, GraphError::DataParse { .. })
        }));
    assert_eq!(
        parse,
        Some(&GraphError::DataParse {
            row: 2,
            column: "z",
            value: "six".to_string(),
        })
    );
}
