use slotcar_core::{
    Body, BodyId, Command, ControlTarget, DriveMapper, ElapsedClock, JointProvider, ModeRequest,
    PathRequest, Pose, RobotMode, TrajectoryTracker, WheelActuator, WorldView,
};
use slotcar_drive::{DifferentialDrive, WaypointFollower};
use slotcar_safety::{
    classify, InfrastructureSet, StopArbiter, StopState, StopTransition, StopZone,
};

use crate::commands::{command_channel, CommandInbox, CommandSender};
use crate::events::{EventSink, NullEventSink, SlotcarEvent};
use crate::wheels::WheelPair;
use crate::{SlotcarConfig, SlotcarError};

/// Name and world identity of the controlled vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub name: String,
    pub id: BodyId,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, id: BodyId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Exemption set lifecycle. Classification waits for the first tick because the world may
/// still be assembling when the controller is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Ready(InfrastructureSet),
}

impl Lifecycle {
    pub fn infrastructure(&self) -> Option<&InfrastructureSet> {
        match self {
            Lifecycle::Uninitialized => None,
            Lifecycle::Ready(set) => Some(set),
        }
    }

    /// Classify on the first call; returns whether classification ran.
    fn ensure_ready(&mut self, vehicle: BodyId, bodies: &[Body]) -> bool {
        match self {
            Lifecycle::Ready(_) => false,
            Lifecycle::Uninitialized => {
                *self = Lifecycle::Ready(classify(vehicle, bodies));
                true
            }
        }
    }
}

/// What one call to [`Slotcar::tick`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub time: f64,
    pub dt: f64,
    /// Infrastructure classification ran on this tick.
    pub classified: bool,
    pub outcome: TickOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No trajectory target: monitor, drive mapper and wheels were left alone.
    Idle,
    Driven(DriveReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveReport {
    pub blocker: Option<BodyId>,
    pub transition: Option<StopTransition>,
    /// Target from the tracker.
    pub requested: ControlTarget,
    /// Target handed to the drive mapper after the stop veto.
    pub commanded: ControlTarget,
    pub wheel_targets: [f64; 2],
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        matches!(self.outcome, TickOutcome::Idle)
    }

    pub fn drive(&self) -> Option<&DriveReport> {
        match &self.outcome {
            TickOutcome::Idle => None,
            TickOutcome::Driven(report) => Some(report),
        }
    }

    pub fn transition(&self) -> Option<StopTransition> {
        self.drive().and_then(|d| d.transition)
    }
}

/// Per-tick controller for one differential-drive vehicle.
///
/// Each tick: classify infrastructure (first tick only), measure elapsed time, apply queued
/// commands, ask the tracker for a target, check the stop zone, and drive the wheels.
pub struct Slotcar<T, D, A, S = NullEventSink>
where
    T: TrajectoryTracker,
    D: DriveMapper,
    A: WheelActuator,
    S: EventSink,
{
    vehicle: Vehicle,
    tracker: T,
    drive: D,
    wheels: WheelPair<A>,
    max_wheel_force: f64,
    lifecycle: Lifecycle,
    clock: ElapsedClock,
    arbiter: StopArbiter,
    mode: RobotMode,
    sender: CommandSender,
    inbox: CommandInbox,
    setup_errors: Vec<SlotcarError>,
    events: S,
    ticks: u64,
}

impl<T, D, A> Slotcar<T, D, A, NullEventSink>
where
    T: TrajectoryTracker,
    D: DriveMapper,
    A: WheelActuator,
{
    pub fn new<J>(
        vehicle: Vehicle,
        config: &SlotcarConfig,
        tracker: T,
        drive: D,
        joints: &mut J,
    ) -> Self
    where
        J: JointProvider<Actuator = A>,
    {
        Self::with_event_sink(vehicle, config, tracker, drive, joints, NullEventSink)
    }
}

impl<T, D, A, S> Slotcar<T, D, A, S>
where
    T: TrajectoryTracker,
    D: DriveMapper,
    A: WheelActuator,
    S: EventSink,
{
    pub fn with_event_sink<J>(
        vehicle: Vehicle,
        config: &SlotcarConfig,
        tracker: T,
        drive: D,
        joints: &mut J,
        mut events: S,
    ) -> Self
    where
        J: JointProvider<Actuator = A>,
    {
        let (wheels, setup_errors) = WheelPair::bind(joints, &config.joints);
        for err in &setup_errors {
            tracing::error!(vehicle = %vehicle.name, "{err}");
            if let SlotcarError::MissingActuator { joint, .. } = err {
                events.emit(SlotcarEvent::MissingActuator {
                    joint: joint.clone(),
                });
            }
        }
        tracing::info!(
            vehicle = %vehicle.name,
            id = %vehicle.id,
            "Slotcar controller attached"
        );

        let (sender, inbox) = command_channel();
        Self {
            vehicle,
            tracker,
            drive,
            wheels,
            max_wheel_force: config.max_wheel_force,
            lifecycle: Lifecycle::Uninitialized,
            clock: ElapsedClock::new(),
            arbiter: StopArbiter::new(),
            mode: RobotMode::Moving,
            sender,
            inbox,
            setup_errors,
            events,
            ticks: 0,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn name(&self) -> &str {
        &self.vehicle.name
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn drive(&self) -> &D {
        &self.drive
    }

    pub fn wheels(&self) -> &WheelPair<A> {
        &self.wheels
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.events
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn stop_state(&self) -> StopState {
        self.arbiter.state()
    }

    /// Last mode received. Stored for hosts; no control decision reads it.
    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    pub fn setup_errors(&self) -> &[SlotcarError] {
        &self.setup_errors
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sender for commands produced outside the tick; they take effect on the next tick.
    pub fn command_sender(&self) -> CommandSender {
        self.sender.clone()
    }

    /// Apply a path request now. Returns `false` if it is addressed to another vehicle.
    pub fn handle_path_request(&mut self, request: &PathRequest, pose: &Pose) -> bool {
        if request.robot_name != self.vehicle.name {
            tracing::debug!(
                vehicle = %self.vehicle.name,
                target = %request.robot_name,
                "Ignoring path request for another robot"
            );
            return false;
        }

        self.tracker.set_path(request, pose);
        tracing::info!(
            vehicle = %self.vehicle.name,
            task_id = %request.task_id,
            waypoints = request.path.len(),
            "Accepted path request"
        );
        self.events.emit(SlotcarEvent::PathAccepted {
            tick: self.ticks,
            task_id: request.task_id.clone(),
            waypoints: request.path.len(),
        });
        true
    }

    /// Record a mode request. Returns `false` if it is addressed to another vehicle.
    pub fn handle_mode_request(&mut self, request: &ModeRequest) -> bool {
        if request.robot_name != self.vehicle.name {
            tracing::debug!(
                vehicle = %self.vehicle.name,
                target = %request.robot_name,
                "Ignoring mode request for another robot"
            );
            return false;
        }

        self.mode = request.mode;
        self.events.emit(SlotcarEvent::ModeChanged {
            tick: self.ticks,
            mode: request.mode,
        });
        true
    }

    fn apply_pending_commands(&mut self, pose: &Pose) {
        for command in self.inbox.drain() {
            match command {
                Command::Path(request) => {
                    self.handle_path_request(&request, pose);
                }
                Command::Mode(request) => {
                    self.handle_mode_request(&request);
                }
            }
        }
    }

    pub fn tick<W>(&mut self, world: &W) -> TickReport
    where
        W: WorldView + ?Sized,
    {
        let tick = self.ticks;
        self.ticks += 1;

        let classified = self
            .lifecycle
            .ensure_ready(self.vehicle.id, world.bodies());
        if classified {
            if let Some(set) = self.lifecycle.infrastructure() {
                tracing::debug!(
                    vehicle = %self.vehicle.name,
                    exempt = set.len(),
                    "Classified infrastructure"
                );
            }
        }

        let time = world.sim_time();
        let dt = self.clock.advance(time);
        if dt < 0.0 {
            tracing::warn!(vehicle = %self.vehicle.name, dt, "Simulation time went backwards");
        }

        let pose = world.vehicle_pose();
        self.apply_pending_commands(&pose);

        let Some(requested) = self.tracker.update(&pose, time) else {
            return TickReport {
                tick,
                time,
                dt,
                classified,
                outcome: TickOutcome::Idle,
            };
        };

        let zone = StopZone::new(self.tracker.stop_distance(), self.tracker.stop_radius());
        let blocker = self
            .lifecycle
            .infrastructure()
            .and_then(|set| zone.first_blocker(&pose, world.bodies(), set));

        let transition = self.arbiter.observe(blocker.is_some());
        match transition {
            Some(StopTransition::Stopping) => {
                tracing::info!(
                    vehicle = %self.vehicle.name,
                    blocker = ?blocker,
                    "{}",
                    StopTransition::Stopping.message()
                );
                self.events.emit(SlotcarEvent::Stopping { tick, blocker });
            }
            Some(StopTransition::Resuming) => {
                tracing::info!(
                    vehicle = %self.vehicle.name,
                    "{}",
                    StopTransition::Resuming.message()
                );
                self.events.emit(SlotcarEvent::Resuming { tick });
            }
            None => {}
        }

        let commanded = self.arbiter.apply(requested);
        let measured = self.wheels.measured_velocities();
        let wheel_targets = self.drive.compute_wheel_targets(
            measured,
            commanded.forward_velocity,
            commanded.yaw_rate,
            dt,
        );
        self.wheels.apply(wheel_targets, self.max_wheel_force);

        TickReport {
            tick,
            time,
            dt,
            classified,
            outcome: TickOutcome::Driven(DriveReport {
                blocker,
                transition,
                requested,
                commanded,
                wheel_targets,
            }),
        }
    }
}

/// Controller wired with the bundled waypoint follower and differential-drive mapper.
pub type ReferenceSlotcar<A, S = NullEventSink> =
    Slotcar<WaypointFollower, DifferentialDrive, A, S>;

impl<A, S> Slotcar<WaypointFollower, DifferentialDrive, A, S>
where
    A: WheelActuator,
    S: EventSink,
{
    pub fn from_config<J>(
        vehicle: Vehicle,
        config: &SlotcarConfig,
        joints: &mut J,
        events: S,
    ) -> Self
    where
        J: JointProvider<Actuator = A>,
    {
        Self::with_event_sink(
            vehicle,
            config,
            WaypointFollower::new(config.follower_params()),
            DifferentialDrive::new(config.drive_params()),
            joints,
            events,
        )
    }
}
