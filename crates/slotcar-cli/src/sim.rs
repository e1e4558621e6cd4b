//! Kinematic stand-in for a physics engine: wheels reach their commanded velocity
//! instantly and scripted bodies move at constant velocity.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use slotcar::core::{
    wrap_angle, Body, BodyId, JointProvider, Pose, Vec3, WheelActuator, WheelSide, WorldView,
};
use slotcar::drive::DifferentialDrive;
use slotcar::{SlotcarConfig, Vehicle};

#[derive(Debug, Default)]
struct JointState {
    target: f64,
    velocity: f64,
    max_force: f64,
}

/// Handle to a wheel joint owned by the world.
#[derive(Debug, Clone, Default)]
pub struct SimJoint {
    state: Rc<RefCell<JointState>>,
}

impl SimJoint {
    pub fn max_force(&self) -> f64 {
        self.state.borrow().max_force
    }

    fn settle(&self) -> f64 {
        let mut state = self.state.borrow_mut();
        state.velocity = state.target;
        state.velocity
    }
}

impl WheelActuator for SimJoint {
    fn set_target_velocity(&mut self, velocity: f64) {
        self.state.borrow_mut().target = velocity;
    }

    fn set_max_force(&mut self, force: f64) {
        self.state.borrow_mut().max_force = force;
    }

    fn current_velocity(&self) -> f64 {
        self.state.borrow().velocity
    }
}

pub struct KinematicWorld {
    time: f64,
    pose: Pose,
    kinematics: DifferentialDrive,
    wheel_joints: [String; 2],
    joints: BTreeMap<String, SimJoint>,
    bodies: Vec<Body>,
    /// Parallel to `bodies`; the vehicle entry is unused.
    velocities: Vec<Vec3>,
    next_id: u64,
}

impl KinematicWorld {
    /// World holding only the vehicle, with both wheel joints named as in `config`.
    pub fn new(vehicle: &Vehicle, start: Pose, config: &SlotcarConfig) -> Self {
        let wheel_joints = WheelSide::BOTH.map(|side| config.joints.name(side).to_string());
        let joints = wheel_joints
            .iter()
            .map(|name| (name.clone(), SimJoint::default()))
            .collect();

        Self {
            time: 0.0,
            pose: start,
            kinematics: DifferentialDrive::new(config.drive_params()),
            wheel_joints,
            joints,
            bodies: vec![Body::dynamic(
                vehicle.id.stable_id(),
                vehicle.name.clone(),
                start.position,
            )],
            velocities: vec![Vec3::ZERO],
            next_id: vehicle.id.stable_id() + 1,
        }
    }

    /// Add a body; static bodies ignore `velocity`.
    pub fn spawn(
        &mut self,
        name: &str,
        position: Vec3,
        velocity: Vec3,
        is_static: bool,
    ) -> BodyId {
        let id = self.next_id;
        self.next_id += 1;
        let body = if is_static {
            Body::fixed(id, name, position)
        } else {
            Body::dynamic(id, name, position)
        };
        self.bodies.push(body);
        self.velocities.push(velocity);
        BodyId(id)
    }

    pub fn wheel(&self, side: WheelSide) -> Option<&SimJoint> {
        self.joints.get(&self.wheel_joints[side.index()])
    }

    /// Advance time by `dt`, integrating the vehicle from its wheel velocities.
    pub fn step(&mut self, dt: f64) {
        let wheels = WheelSide::BOTH.map(|side| self.wheel(side).map_or(0.0, SimJoint::settle));
        let (forward, yaw_rate) = self.kinematics.body_velocities(wheels);

        let mid_yaw = self.pose.yaw + 0.5 * yaw_rate * dt;
        self.pose.position += forward * dt * Vec3::from_yaw(mid_yaw);
        self.pose.yaw = wrap_angle(self.pose.yaw + yaw_rate * dt);

        for (i, (body, velocity)) in self.bodies.iter_mut().zip(&self.velocities).enumerate() {
            if i == 0 {
                body.position = self.pose.position;
            } else if !body.is_static {
                body.position += *velocity * dt;
            }
        }
        self.time += dt;
    }
}

impl WorldView for KinematicWorld {
    fn sim_time(&self) -> f64 {
        self.time
    }

    fn vehicle_pose(&self) -> Pose {
        self.pose
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}

impl JointProvider for KinematicWorld {
    type Actuator = SimJoint;

    fn joint(&mut self, name: &str) -> Option<SimJoint> {
        self.joints.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> KinematicWorld {
        KinematicWorld::new(
            &Vehicle::new("tinyRobot1", BodyId(1)),
            Pose::default(),
            &SlotcarConfig::default(),
        )
    }

    #[test]
    fn equal_wheel_speeds_drive_straight() {
        let mut world = world();
        let mut left = world.joint("joint_tire_left").unwrap();
        let mut right = world.joint("joint_tire_right").unwrap();
        left.set_target_velocity(5.0);
        right.set_target_velocity(5.0);

        world.step(1.0);

        let pose = world.vehicle_pose();
        assert!((pose.position.x - 0.5).abs() < 1e-12);
        assert_eq!(pose.position.y, 0.0);
        assert_eq!(pose.yaw, 0.0);
        assert_eq!(world.bodies()[0].position, pose.position);
        assert_eq!(right.current_velocity(), 5.0);
    }

    #[test]
    fn opposite_wheel_speeds_turn_in_place() {
        let mut world = world();
        let mut left = world.joint("joint_tire_left").unwrap();
        let mut right = world.joint("joint_tire_right").unwrap();
        left.set_target_velocity(-1.0);
        right.set_target_velocity(1.0);

        world.step(0.5);

        let pose = world.vehicle_pose();
        assert!(pose.position.length() < 1e-12);
        assert!((pose.yaw - 0.5 * 0.2 / 0.52).abs() < 1e-12);
    }

    #[test]
    fn scripted_bodies_move_unless_static() {
        let mut world = world();
        world.spawn("cart", Vec3::planar(1.0, 0.0), Vec3::planar(0.0, 2.0), false);
        world.spawn("pillar", Vec3::planar(3.0, 0.0), Vec3::planar(1.0, 0.0), true);

        world.step(0.25);

        assert_eq!(world.bodies()[1].position, Vec3::planar(1.0, 0.5));
        assert_eq!(world.bodies()[2].position, Vec3::planar(3.0, 0.0));
        assert_eq!(world.sim_time(), 0.25);
    }
}
