//! Scenario files and the headless run loop.

use std::fmt;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use slotcar::core::{
    BodyId, ModeRequest, PathRequest, Pose, RobotMode, Vec3, Waypoint, WorldView,
};
use slotcar::{ReferenceSlotcar, Slotcar, SlotcarConfig, VecEventSink, Vehicle};

use crate::sim::{KinematicWorld, SimJoint};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_robot_name")]
    pub robot_name: String,

    #[serde(default)]
    pub fleet_name: String,

    #[serde(default)]
    pub task_id: String,

    #[serde(default)]
    pub start: StartPose,

    /// Mode request sent alongside the path
    #[serde(default)]
    pub mode: Option<RobotMode>,

    pub path: Vec<Waypoint>,

    #[serde(default)]
    pub bodies: Vec<ScenarioBody>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StartPose {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub yaw: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioBody {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

fn default_robot_name() -> String {
    "tinyRobot1".to_string()
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    fn path_request(&self) -> PathRequest {
        PathRequest {
            fleet_name: self.fleet_name.clone(),
            robot_name: self.robot_name.clone(),
            task_id: self.task_id.clone(),
            path: self.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub driven: u64,
    pub idle: u64,
    pub stops: usize,
    pub resumes: usize,
    pub first_blocker: Option<BodyId>,
    pub path_finished: bool,
    pub final_pose: Pose,
    pub final_time: f64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ticks:        {} ({} driven, {} idle)",
            self.ticks, self.driven, self.idle
        )?;
        writeln!(f, "sim time:     {:.2}s", self.final_time)?;
        writeln!(f, "stops:        {}", self.stops)?;
        writeln!(f, "resumes:      {}", self.resumes)?;
        if let Some(blocker) = self.first_blocker {
            writeln!(f, "first stop:   {blocker}")?;
        }
        writeln!(f, "path done:    {}", self.path_finished)?;
        write!(
            f,
            "final pose:   x={:.3} y={:.3} yaw={:.3}",
            self.final_pose.position.x, self.final_pose.position.y, self.final_pose.yaw
        )
    }
}

/// Controller and world after a run, for callers that want more than the summary.
pub struct Run {
    pub summary: RunSummary,
    pub slotcar: ReferenceSlotcar<SimJoint, VecEventSink>,
    pub world: KinematicWorld,
}

/// Step the world `ticks` times with the reference controller following the scenario path.
pub fn run(config: &SlotcarConfig, scenario: &Scenario, ticks: u64, dt: f64) -> Result<Run> {
    ensure!(dt > 0.0 && dt.is_finite(), "time step must be positive, got {dt}");
    ensure!(!scenario.path.is_empty(), "scenario path has no waypoints");

    let vehicle = Vehicle::new(scenario.robot_name.clone(), BodyId(1));
    let start = Pose::planar(scenario.start.x, scenario.start.y, scenario.start.yaw);
    let mut world = KinematicWorld::new(&vehicle, start, config);
    for body in &scenario.bodies {
        world.spawn(
            &body.name,
            Vec3::planar(body.x, body.y),
            Vec3::planar(body.vx, body.vy),
            body.is_static,
        );
    }

    let mut slotcar: ReferenceSlotcar<SimJoint, VecEventSink> =
        Slotcar::from_config(vehicle, config, &mut world, VecEventSink::new());

    let commands = slotcar.command_sender();
    commands.send_path(scenario.path_request())?;
    if let Some(mode) = scenario.mode {
        commands.send_mode(ModeRequest {
            fleet_name: scenario.fleet_name.clone(),
            robot_name: scenario.robot_name.clone(),
            mode,
        })?;
    }

    let mut summary = RunSummary::default();
    for _ in 0..ticks {
        let report = slotcar.tick(&world);
        if report.is_idle() {
            summary.idle += 1;
        } else {
            summary.driven += 1;
        }
        if summary.first_blocker.is_none() {
            summary.first_blocker = report
                .drive()
                .filter(|d| d.transition.is_some())
                .and_then(|d| d.blocker);
        }
        world.step(dt);
    }

    summary.ticks = ticks;
    summary.stops = slotcar.events().stops();
    summary.resumes = slotcar.events().resumes();
    summary.path_finished = slotcar.tracker().is_finished();
    summary.final_pose = world.vehicle_pose();
    summary.final_time = world.sim_time();

    tracing::info!(
        task_id = %scenario.task_id,
        stops = summary.stops,
        resumes = summary.resumes,
        finished = summary.path_finished,
        "Scenario complete"
    );

    Ok(Run {
        summary,
        slotcar,
        world,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotcar::core::WheelSide;
    use slotcar::safety::StopState;

    const STRAIGHT: &str = r#"
task_id: straight
path:
  - { t: 0.0, x: 0.0, y: 0.0, yaw: 0.0 }
  - { t: 20.0, x: 3.0, y: 0.0, yaw: 0.0 }
  - { t: 22.0, x: 3.0, y: 0.0, yaw: 0.0 }
"#;

    fn scenario_with(bodies: &str) -> Scenario {
        serde_yaml::from_str(&format!("{STRAIGHT}bodies:\n{bodies}")).unwrap()
    }

    fn run_for(scenario: &Scenario, ticks: u64) -> Run {
        run(&SlotcarConfig::default(), scenario, ticks, 0.05).unwrap()
    }

    #[test]
    fn parses_defaults() {
        let scenario: Scenario = serde_yaml::from_str(STRAIGHT).unwrap();
        assert_eq!(scenario.robot_name, "tinyRobot1");
        assert_eq!(scenario.path.len(), 3);
        assert!(scenario.bodies.is_empty());
        assert!(scenario.mode.is_none());
    }

    #[test]
    fn clear_path_is_followed_to_the_end() {
        let scenario: Scenario = serde_yaml::from_str(STRAIGHT).unwrap();
        let run = run_for(&scenario, 500);

        assert!(run.summary.path_finished);
        assert_eq!(run.summary.stops, 0);
        assert!(run.summary.idle > 0);
        assert!((run.summary.final_pose.position.x - 3.0).abs() < 0.2);
        assert_eq!(
            run.world.wheel(WheelSide::Left).map(|w| w.max_force()),
            Some(10_000_000.0)
        );
    }

    #[test]
    fn parked_cart_stops_the_vehicle() {
        let scenario = scenario_with("  - { name: cart, x: 2.0, y: 0.0 }\n");
        let run = run_for(&scenario, 500);

        assert_eq!(run.summary.stops, 1);
        assert_eq!(run.summary.resumes, 0);
        assert_eq!(run.summary.first_blocker, Some(BodyId(2)));
        assert_eq!(run.slotcar.stop_state(), StopState::Stopped);
        assert!(!run.summary.path_finished);
        assert!(run.summary.final_pose.position.x < 1.0);
    }

    #[test]
    fn doors_and_static_bodies_are_driven_through() {
        let scenario = scenario_with(
            "  - { name: lobby_door, x: 2.0, y: 0.0 }\n  - { name: pillar, x: 1.5, y: 0.0, static: true }\n",
        );
        let run = run_for(&scenario, 500);

        assert_eq!(run.summary.stops, 0);
        assert!(run.summary.path_finished);
    }

    #[test]
    fn crossing_body_pauses_then_resumes() {
        let scenario = scenario_with("  - { name: cart, x: 1.5, y: -3.0, vy: 1.0 }\n");
        let run = run_for(&scenario, 600);

        assert!(run.summary.stops >= 1);
        assert_eq!(run.summary.stops, run.summary.resumes);
        assert!(run.summary.path_finished);
    }

    #[test]
    fn rejects_bad_time_step() {
        let scenario: Scenario = serde_yaml::from_str(STRAIGHT).unwrap();
        assert!(run(&SlotcarConfig::default(), &scenario, 10, 0.0).is_err());
    }
}
