use std::f64::consts::PI;
use std::io::Write;

use slotcar::{SlotcarConfig, SlotcarError};
use tempfile::{tempdir, NamedTempFile};

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_match_reference_vehicle() {
    let config = SlotcarConfig::default();
    assert_eq!(config.tire_radius, 0.1);
    assert_eq!(config.base_width, 0.52);
    assert_eq!(config.nominal_turn_speed, PI / 8.0);
    assert_eq!(config.max_wheel_force, 10_000_000.0);
    assert_eq!(config.joints.left, "joint_tire_left");
    assert_eq!(config.joints.right, "joint_tire_right");
    assert!(config.validate().is_ok());
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let file = write_yaml(
        "nominal_drive_speed: 0.8\nstop_radius: 0.4\ntracking:\n  heading_gain: 3.5\njoints:\n  left: wheel_l\n",
    );

    let config = SlotcarConfig::load(file.path()).unwrap();

    assert_eq!(config.nominal_drive_speed, 0.8);
    assert_eq!(config.stop_radius, 0.4);
    assert_eq!(config.tracking.heading_gain, 3.5);
    assert_eq!(config.tracking.arrival_distance, 0.05);
    assert_eq!(config.joints.left, "wheel_l");
    assert_eq!(config.joints.right, "joint_tire_right");
    assert_eq!(config.base_width, 0.52);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let file = write_yaml("tire_radius: 0.0\n");

    let err = SlotcarConfig::load(file.path()).unwrap_err();

    let cause = err.downcast_ref::<SlotcarError>().expect("validation error");
    assert!(matches!(
        cause,
        SlotcarError::InvalidConfig {
            field: "tire_radius",
            ..
        }
    ));
}

#[test]
fn malformed_yaml_reports_the_path() {
    let file = write_yaml("stop_radius: [not, a, number]\n");

    let err = SlotcarConfig::load(file.path()).unwrap_err();

    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn validate_flags_each_bad_field() {
    let mut config = SlotcarConfig::default();
    config.stop_distance = -1.0;
    assert!(matches!(
        config.validate(),
        Err(SlotcarError::InvalidConfig {
            field: "stop_distance",
            ..
        })
    ));

    let mut config = SlotcarConfig::default();
    config.joints.right.clear();
    assert!(matches!(
        config.validate(),
        Err(SlotcarError::InvalidConfig { field: "joints", .. })
    ));

    let mut config = SlotcarConfig::default();
    config.max_drive_acceleration = f64::INFINITY;
    assert!(config.validate().is_ok());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = SlotcarConfig::load_or_default(&dir.path().join("absent.yaml")).unwrap();
    assert_eq!(config, SlotcarConfig::default());
}

#[test]
fn params_are_derived_from_config() {
    let mut config = SlotcarConfig::default();
    config.nominal_drive_speed = 1.2;
    config.stop_distance = 2.0;

    let drive = config.drive_params();
    assert_eq!(drive.nominal_drive_speed, 1.2);
    assert_eq!(drive.tire_radius, config.tire_radius);

    let follower = config.follower_params();
    assert_eq!(follower.nominal_drive_speed, 1.2);
    assert_eq!(follower.stop_distance, 2.0);
    assert_eq!(follower.heading_gain, config.tracking.heading_gain);
}
