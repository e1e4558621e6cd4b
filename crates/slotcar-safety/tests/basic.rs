use slotcar_core::{Body, BodyId, Pose, Vec3};
use slotcar_safety::{classify, is_blocked, InfrastructureSet, StopZone};

const VEHICLE: BodyId = BodyId(1);

fn origin() -> Pose {
    Pose::planar(0.0, 0.0, 0.0)
}

fn world() -> Vec<Body> {
    vec![
        Body::dynamic(1, "tinyRobot1", Vec3::ZERO),
        Body::dynamic(2, "main_door", Vec3::planar(1.0, 0.0)),
        Body::dynamic(3, "lift_1", Vec3::planar(10.0, 0.0)),
        Body::dynamic(4, "deliveryRobot", Vec3::planar(4.0, 4.0)),
        Body::fixed(5, "door_frame", Vec3::planar(2.0, 0.0)),
        Body::dynamic(6, "Door_B", Vec3::planar(1.0, 0.2)),
    ]
}

#[test]
fn classifier_exempts_vehicle_doors_and_lifts() {
    let set = classify(VEHICLE, &world());

    let members = set.iter().collect::<Vec<_>>();
    assert_eq!(members, vec![BodyId(1), BodyId(2), BodyId(3)]);
}

#[test]
fn classifier_skips_static_bodies_and_is_case_sensitive() {
    let set = classify(VEHICLE, &world());

    assert!(!set.contains(BodyId(5)), "static door frame must not be classified");
    assert!(!set.contains(BodyId(6)), "matching is case-sensitive");
    assert!(!set.contains(BodyId(4)));
}

#[test]
fn classifier_on_empty_world_yields_only_the_vehicle() {
    let set = classify(VEHICLE, &[]);
    assert_eq!(set.len(), 1);
    assert!(set.contains(VEHICLE));
}

#[test]
fn body_in_stop_zone_blocks() {
    let bodies = vec![Body::dynamic(9, "cart", Vec3::planar(1.0, 0.0))];
    let set = classify(VEHICLE, &bodies);

    assert!(is_blocked(&origin(), 1.0, 0.5, &bodies, &set));
}

#[test]
fn exempt_body_never_blocks_regardless_of_proximity() {
    let bodies = vec![Body::dynamic(9, "lift_cabin", Vec3::planar(1.0, 0.0))];
    let set = classify(VEHICLE, &bodies);

    assert!(set.contains(BodyId(9)));
    assert!(!is_blocked(&origin(), 1.0, 0.5, &bodies, &set));
}

#[test]
fn static_bodies_never_block() {
    let bodies = vec![Body::fixed(9, "wall", Vec3::planar(1.0, 0.0))];
    let set = InfrastructureSet::default();

    assert!(!is_blocked(&origin(), 1.0, 0.5, &bodies, &set));
}

#[test]
fn radius_test_is_strict() {
    let bodies = vec![Body::dynamic(9, "cart", Vec3::planar(1.5, 0.0))];
    let set = InfrastructureSet::default();

    assert!(!is_blocked(&origin(), 1.0, 0.5, &bodies, &set));
    assert!(is_blocked(&origin(), 1.0, 0.5001, &bodies, &set));
}

#[test]
fn stop_zone_follows_heading() {
    // Facing +y: a body at (1, 0) is beside the vehicle, a body at (0, 1) is ahead.
    let pose = Pose::planar(0.0, 0.0, core::f64::consts::FRAC_PI_2);
    let beside = vec![Body::dynamic(9, "cart", Vec3::planar(1.0, 0.0))];
    let ahead = vec![Body::dynamic(9, "cart", Vec3::planar(0.0, 1.0))];
    let set = InfrastructureSet::default();

    assert!(!is_blocked(&pose, 1.0, 0.5, &beside, &set));
    assert!(is_blocked(&pose, 1.0, 0.5, &ahead, &set));
}

#[test]
fn first_blocker_reports_the_offending_body() {
    let bodies = vec![
        Body::dynamic(1, "tinyRobot1", Vec3::ZERO),
        Body::dynamic(7, "cart", Vec3::planar(1.1, 0.1)),
    ];
    let set = classify(VEHICLE, &bodies);
    let zone = StopZone::new(1.0, 0.5);

    assert_eq!(zone.first_blocker(&origin(), &bodies, &set), Some(BodyId(7)));
}

#[test]
fn vehicle_inside_its_own_zone_is_ignored() {
    // A zero stop distance puts the zone on the vehicle itself.
    let bodies = vec![Body::dynamic(1, "tinyRobot1", Vec3::ZERO)];
    let set = classify(VEHICLE, &bodies);

    assert!(!is_blocked(&origin(), 0.0, 0.5, &bodies, &set));
}
