// dualtrack_core/src/task.rs

//! The periodic odometry task.
//!
//! The estimator is moved onto a dedicated thread that runs one update per
//! period until it is told to stop. Consumers hold an `OdometryHandle`: pose
//! reads go through the shared snapshot, re-anchoring goes through a command
//! channel and is applied between two cycles.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::config::TaskConfig;
use crate::error::TaskError;
use crate::estimation::{SharedPose, StateEstimator};
use crate::messages::{PoseCommand, PoseSnapshot};
use crate::types::{Pose2D, PoseAnchor};

/// Cloneable access to a running odometry task.
#[derive(Debug, Clone)]
pub struct OdometryHandle {
    pose: SharedPose,
    commands: Sender<PoseCommand>,
}

impl OdometryHandle {
    /// The latest pose as one consistent triple.
    pub fn pose(&self) -> Pose2D {
        self.pose.pose()
    }

    pub fn snapshot(&self) -> PoseSnapshot {
        self.pose.snapshot()
    }

    // Single-field reads: combining them may mix two cycles, use `pose()`.

    pub fn x(&self) -> f64 {
        self.pose.x()
    }

    pub fn y(&self) -> f64 {
        self.pose.y()
    }

    pub fn heading(&self) -> f64 {
        self.pose.heading()
    }

    /// Queues a re-anchor; it takes effect before the next update.
    pub fn set_position(&self, anchor: PoseAnchor) -> Result<(), TaskError> {
        self.send(PoseCommand::SetPosition(anchor))
    }

    /// Queues a heading reset; it takes effect before the next update.
    pub fn reset_heading(&self) -> Result<(), TaskError> {
        self.send(PoseCommand::ResetHeading)
    }

    fn send(&self, command: PoseCommand) -> Result<(), TaskError> {
        self.commands.send(command).map_err(|_| TaskError::Stopped)
    }
}

/// A running odometry thread. Dropping it signals the thread to stop.
pub struct OdometryTask<E: StateEstimator + 'static> {
    handle: Option<JoinHandle<E>>,
    running: Arc<AtomicBool>,
    odometry: OdometryHandle,
}

impl<E: StateEstimator + 'static> OdometryTask<E> {
    /// Spawns the odometry thread. Fails without spawning if `config` does
    /// not validate.
    pub fn spawn(estimator: E, config: TaskConfig) -> Result<Self, TaskError> {
        config.validate()?;

        let running = Arc::new(AtomicBool::new(true));
        let pose = SharedPose::new(estimator.pose());
        let (tx, rx) = unbounded();

        let handle = {
            let running = running.clone();
            let pose = pose.clone();
            thread::Builder::new()
                .name("odometry".into())
                .spawn(move || run_odometry_loop(estimator, config, pose, rx, running))?
        };

        Ok(Self {
            handle: Some(handle),
            running,
            odometry: OdometryHandle { pose, commands: tx },
        })
    }

    pub fn handle(&self) -> OdometryHandle {
        self.odometry.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the thread to stop, waits for it and returns the estimator.
    pub fn stop(mut self) -> Result<E, TaskError> {
        self.running.store(false, Ordering::Relaxed);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| TaskError::Panicked),
            None => Err(TaskError::Stopped),
        }
    }
}

impl<E: StateEstimator + 'static> Drop for OdometryTask<E> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn run_odometry_loop<E: StateEstimator>(
    mut estimator: E,
    config: TaskConfig,
    pose: SharedPose,
    commands: Receiver<PoseCommand>,
    running: Arc<AtomicBool>,
) -> E {
    let period = config.period();
    let mut telemetry = TelemetryCountdown::new(config.telemetry_every);
    tracing::info!(period_ms = config.period_ms, "odometry task started");

    while running.load(Ordering::Relaxed) {
        let cycle_start = Instant::now();

        let mut reanchored = false;
        while let Ok(command) = commands.try_recv() {
            tracing::debug!(?command, "applying pose command");
            estimator.apply(command);
            reanchored = true;
        }
        if reanchored {
            pose.overwrite(estimator.pose());
        }

        let current = estimator.update();
        pose.publish(current);

        if telemetry.tick() {
            tracing::info!(
                "x:{:.3} y:{:.3} h:{:.3}",
                current.x,
                current.y,
                current.heading
            );
        }

        if let Some(remaining) = period.checked_sub(cycle_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    tracing::info!(cycles = pose.snapshot().cycle, "odometry task stopped");
    estimator
}

/// Counts cycles down to the next telemetry line. An interval of 0 disables
/// telemetry.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct TelemetryCountdown {
    every: u32,
    remaining: u32,
}

impl TelemetryCountdown {
    pub fn new(every: u32) -> Self {
        Self {
            every,
            remaining: every,
        }
    }

    /// Returns true when a telemetry line is due. Never fires when disabled.
    pub fn tick(&mut self) -> bool {
        if self.every == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.every;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriveGeometry;
    use crate::error::ConfigError;
    use crate::estimation::PoseEstimator;
    use crate::sensors::{EncoderDriver, SimulatedEncoder, SimulatedInertial};
    use approx::assert_abs_diff_eq;
    use std::time::Duration;

    fn fast_config() -> TaskConfig {
        TaskConfig {
            period_ms: 1,
            telemetry_every: 5,
        }
    }

    /// Both wheels share one encoder so a straight-line move can never be
    /// observed half-applied by a concurrent cycle.
    fn estimator() -> (PoseEstimator, EncoderDriver, DriveGeometry) {
        let geometry = DriveGeometry::default();
        let (encoder, wheels) = SimulatedEncoder::new();
        let (inertial, _imu) = SimulatedInertial::new();
        let estimator = PoseEstimator::new(
            geometry,
            Box::new(encoder.clone()),
            Box::new(encoder),
            Box::new(inertial),
        );
        (estimator, wheels, geometry)
    }

    /// Polls until `condition` holds or a generous deadline passes.
    fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    #[test]
    fn test_telemetry_countdown() {
        let mut countdown = TelemetryCountdown::new(3);
        let fired: Vec<bool> = (0..7).map(|_| countdown.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);

        let mut disabled = TelemetryCountdown::new(0);
        assert!((0..10).all(|_| !disabled.tick()));
    }

    #[test]
    fn test_task_publishes_and_stops() {
        let (estimator, wheels, geometry) = estimator();
        // Move before the first cycle so no cycle can observe the move halfway.
        let inches = 12.0;
        wheels.advance(inches * geometry.degrees_per_inch());

        let task = OdometryTask::spawn(estimator, fast_config()).unwrap();
        let handle = task.handle();

        assert!(wait_for(|| handle.snapshot().cycle >= 3));
        assert!(task.is_running());
        let pose = handle.pose();
        assert_abs_diff_eq!(pose.x, inches, epsilon = 1e-9);
        assert_abs_diff_eq!(pose.y, 0.0, epsilon = 1e-9);

        let estimator = task.stop().unwrap();
        assert_abs_diff_eq!(estimator.x(), inches, epsilon = 1e-9);

        // The channel is closed once the thread has returned.
        assert!(matches!(handle.reset_heading(), Err(TaskError::Stopped)));
    }

    #[test]
    fn test_spawn_rejects_zero_period() {
        let (estimator, _wheels, _) = estimator();
        let config = TaskConfig {
            period_ms: 0,
            telemetry_every: 0,
        };
        assert!(matches!(
            OdometryTask::spawn(estimator, config),
            Err(TaskError::Config(ConfigError::ZeroPeriod))
        ));
    }

    #[test]
    fn test_task_applies_commands_between_cycles() {
        let (estimator, _wheels, _) = estimator();
        let task = OdometryTask::spawn(estimator, fast_config()).unwrap();
        let handle = task.handle();

        handle
            .set_position(PoseAnchor::at(10.0, 20.0).with_heading(90.0))
            .unwrap();
        assert!(wait_for(|| handle.pose() == Pose2D::new(10.0, 20.0, 90.0)));

        // The anchor holds across further cycles.
        let cycle = handle.snapshot().cycle;
        assert!(wait_for(|| handle.snapshot().cycle >= cycle + 3));
        assert_eq!(handle.pose(), Pose2D::new(10.0, 20.0, 90.0));

        handle.reset_heading().unwrap();
        assert!(wait_for(|| handle.pose() == Pose2D::new(10.0, 20.0, 0.0)));

        let estimator = task.stop().unwrap();
        assert_eq!(estimator.reference_heading(), 0.0);
    }

    #[test]
    fn test_dropping_task_stops_thread() {
        let (estimator, _wheels, _) = estimator();
        let task = OdometryTask::spawn(estimator, fast_config()).unwrap();
        let handle = task.handle();
        drop(task);

        // Once the loop exits, the receiver is dropped and sends fail.
        assert!(wait_for(|| handle.reset_heading().is_err()));
        let cycle = handle.snapshot().cycle;
        thread::sleep(Duration::from_millis(20));
        assert_eq!(handle.snapshot().cycle, cycle);
    }
}
