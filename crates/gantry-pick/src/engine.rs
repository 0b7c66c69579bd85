//! The pick simulation engine.
//!
//! [`PickEngine`] owns all mutable state and advances only inside
//! [`PickEngine::tick`], which the host drives with wall-clock deltas.
//! A tick runs in fixed phase order:
//!
//! 1. Advance the simulation clock by `dt`.
//! 2. Apply due delayed commands (stale generations are dropped).
//! 3. Spawn a new object if the spawn interval has elapsed.
//! 4. Step the arm toward its target.
//! 5. Advance belt objects, a fresh spawn included; a held object tracks
//!    the arm instead. Record misses, remove exited objects.
//! 6. Expire the grasp pulse.
//!
//! Commands never mutate state at issue time. They are validated, stamped
//! with the current latency and run generation, and queued; the latency
//! between issuing and seeing the effect is the quantity under study.

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::arm::Arm;
use crate::command::{Command, DelayQueue, RunGeneration};
use crate::conveyor::{
    ConveyorObject, ObjectAdvance, ObjectKey, ObjectStatus, advance_free_object, track,
};
use crate::event::{EventBuffer, PickEvent};
use crate::locale::{self, OperatorLocale, RobotRegion};

/// How long the gripper visibly stays closed after a grab lands.
pub const GRASP_PULSE_MS: f64 = 150.0;

// ---------------------------------------------------------------------------
// PickStats
// ---------------------------------------------------------------------------

/// Running pick/miss tallies for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PickStats {
    pub picks: u32,
    pub misses: u32,
}

impl PickStats {
    /// Total resolved attempts.
    pub fn total(&self) -> u32 {
        self.picks + self.misses
    }

    /// Success fraction in `[0, 1]`, or `None` before any attempt resolves.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(f64::from(self.picks) / f64::from(total))
        }
    }
}

// ---------------------------------------------------------------------------
// PickEngine
// ---------------------------------------------------------------------------

/// The latency-compensated pick simulator.
#[derive(Debug)]
pub struct PickEngine {
    locale: OperatorLocale,
    region: RobotRegion,

    running: bool,
    /// Bumped on every start, stop, and configuration change; in-flight
    /// commands from older generations no-op when they come due.
    generation: RunGeneration,
    /// Simulation clock in milliseconds since the last start.
    clock_ms: f64,

    objects: SlotMap<ObjectKey, ConveyorObject>,
    /// Serial for the next spawned object. Never reset, so serials stay
    /// unique across runs.
    next_serial: u64,
    /// Clock of the most recent spawn. `None` right after start, so the
    /// first running tick spawns immediately.
    last_spawn_ms: Option<f64>,

    arm: Arm,
    /// The object currently in the gripper, if any.
    held: Option<ObjectKey>,
    /// Clock until which the gripper renders closed.
    grasp_until_ms: Option<f64>,

    stats: PickStats,
    commands: DelayQueue,
    events: EventBuffer,
}

impl PickEngine {
    /// Create a stopped engine for the given locale/region pair.
    pub fn new(locale: OperatorLocale, region: RobotRegion) -> Self {
        Self {
            locale,
            region,
            running: false,
            generation: 0,
            clock_ms: 0.0,
            objects: SlotMap::with_key(),
            next_serial: 0,
            last_spawn_ms: None,
            arm: Arm::at_home(),
            held: None,
            grasp_until_ms: None,
            stats: PickStats::default(),
            commands: DelayQueue::new(),
            events: EventBuffer::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Effective round-trip latency for the current configuration.
    pub fn latency_ms(&self) -> f64 {
        locale::effective_latency_ms(self.locale, self.region)
    }

    pub fn operator_locale(&self) -> OperatorLocale {
        self.locale
    }

    pub fn robot_region(&self) -> RobotRegion {
        self.region
    }

    /// Switch operator locale. A change mid-run clears objects, stats, and
    /// in-flight commands so results are never mixed across latencies; the
    /// run keeps going under the new latency.
    pub fn set_operator_locale(&mut self, locale: OperatorLocale) {
        if self.locale == locale {
            return;
        }
        self.locale = locale;
        self.reset_run_state();
        debug!(latency_ms = self.latency_ms(), "operator locale changed");
    }

    /// Switch robot region. Same mid-run semantics as
    /// [`Self::set_operator_locale`].
    pub fn set_robot_region(&mut self, region: RobotRegion) {
        if self.region == region {
            return;
        }
        self.region = region;
        self.reset_run_state();
        debug!(latency_ms = self.latency_ms(), "robot region changed");
    }

    // -----------------------------------------------------------------------
    // Run control
    // -----------------------------------------------------------------------

    /// Start a fresh run: clock zeroed, belt emptied, stats cleared, arm
    /// homed, pending commands invalidated.
    pub fn start(&mut self) {
        self.reset_run_state();
        self.clock_ms = 0.0;
        self.running = true;
        debug!(latency_ms = self.latency_ms(), "run started");
    }

    /// Stop the run. State is frozen for inspection; in-flight commands
    /// are invalidated.
    pub fn stop(&mut self) {
        self.running = false;
        self.generation += 1;
        self.commands.clear();
        debug!(stats = ?self.stats, "run stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn reset_run_state(&mut self) {
        self.objects.clear();
        self.held = None;
        self.grasp_until_ms = None;
        self.arm = Arm::at_home();
        self.stats = PickStats::default();
        self.last_spawn_ms = None;
        self.generation += 1;
        self.commands.clear();
        self.events.clear();
    }

    // -----------------------------------------------------------------------
    // Command issue
    // -----------------------------------------------------------------------

    /// Command the arm to `x`, clamped to the reachable band. Dropped if
    /// the simulation is not running.
    pub fn issue_move(&mut self, x: f64) {
        if !self.running {
            return;
        }
        let target = x.clamp(track::MOVE_MIN_X, track::MOVE_MAX_X);
        self.schedule(Command::Move { target });
    }

    /// Command a grab. Dropped if not running or already holding.
    pub fn issue_grab(&mut self) {
        if !self.running || self.held.is_some() {
            return;
        }
        self.schedule(Command::Grab);
    }

    /// Command a release. Dropped if not running or holding nothing.
    pub fn issue_release(&mut self) {
        if !self.running || self.held.is_none() {
            return;
        }
        self.schedule(Command::Release);
    }

    fn schedule(&mut self, command: Command) {
        let latency = self.latency_ms();
        trace!(?command, latency_ms = latency, "command scheduled");
        self.commands
            .schedule(command, self.clock_ms, latency, self.generation);
    }

    /// Commands currently in flight.
    pub fn in_flight_commands(&self) -> usize {
        self.commands.pending_count()
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the simulation by `dt_ms` of wall-clock time. No-op while
    /// stopped. Negative deltas are treated as zero.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.running {
            return;
        }
        let dt_ms = dt_ms.max(0.0);
        self.clock_ms += dt_ms;

        // Phase 1: due commands.
        let drained = self.commands.drain_due(self.clock_ms, self.generation);
        for command in drained.stale {
            self.events.push(PickEvent::StaleCommandDropped {
                command,
                at_ms: self.clock_ms,
            });
        }
        for command in drained.due {
            self.apply_command(command);
        }

        // Phase 2: spawn.
        let spawn_due = self
            .last_spawn_ms
            .is_none_or(|last| self.clock_ms - last > track::SPAWN_INTERVAL_MS);
        if spawn_due {
            self.spawn_object();
        }

        // Phase 3: arm.
        self.arm.advance();

        // Phase 4: objects.
        self.advance_objects(dt_ms);

        // Phase 5: grasp pulse expiry.
        if self.grasp_until_ms.is_some_and(|until| until <= self.clock_ms) {
            self.grasp_until_ms = None;
        }
    }

    fn apply_command(&mut self, command: Command) {
        self.events.push(PickEvent::CommandApplied {
            command,
            at_ms: self.clock_ms,
        });
        match command {
            Command::Move { target } => self.arm.set_target(target),
            Command::Grab => self.fire_grab(),
            Command::Release => self.fire_release(),
        }
    }

    /// A grab landing after its delay. The gripper always pulses; capture
    /// succeeds only if a moving object's grip point is inside the pick
    /// zone and within reach of the arm right now.
    fn fire_grab(&mut self) {
        self.grasp_until_ms = Some(self.clock_ms + GRASP_PULSE_MS);

        // The issue-time check cannot see commands still in flight, so a
        // second grab may land while the first already captured. Re-check.
        if self.held.is_some() {
            return;
        }

        let arm_x = self.arm.position;
        let captured = self
            .objects
            .iter()
            .filter(|(_, obj)| {
                obj.status == ObjectStatus::Moving
                    && obj.in_pick_zone()
                    && (obj.grip_point() - arm_x).abs() < track::CAPTURE_RADIUS
            })
            // SlotMap iteration order is unspecified; the serial breaks the
            // tie deterministically in favor of the oldest object.
            .min_by_key(|(_, obj)| obj.serial)
            .map(|(key, _)| key);

        if let Some(key) = captured {
            let serial = self.objects[key].serial;
            self.objects[key].status = ObjectStatus::Held;
            self.held = Some(key);
            self.stats.picks += 1;
            self.events.push(PickEvent::ObjectPicked {
                serial,
                at_ms: self.clock_ms,
            });
            trace!(serial, picks = self.stats.picks, "object captured");
        }
    }

    /// A release landing after its delay. Discards the held object; no-op
    /// if nothing is held by the time it fires.
    fn fire_release(&mut self) {
        if let Some(key) = self.held.take() {
            if let Some(obj) = self.objects.remove(key) {
                self.events.push(PickEvent::ObjectReleased {
                    serial: obj.serial,
                    at_ms: self.clock_ms,
                });
            }
        }
    }

    fn spawn_object(&mut self) {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.objects.insert(ConveyorObject::spawn(serial));
        self.last_spawn_ms = Some(self.clock_ms);
        self.events.push(PickEvent::ObjectSpawned {
            serial,
            at_ms: self.clock_ms,
        });
    }

    fn advance_objects(&mut self, dt_ms: f64) {
        let arm_x = self.arm.position;
        let mut exited: Vec<ObjectKey> = Vec::new();

        for (key, obj) in self.objects.iter_mut() {
            if self.held == Some(key) {
                // Held objects ride the gripper, not the belt.
                obj.position = arm_x - track::GRIP_OFFSET;
                continue;
            }
            match advance_free_object(obj, dt_ms) {
                ObjectAdvance::OnBelt => {}
                ObjectAdvance::JustMissed => {
                    self.stats.misses += 1;
                    self.events.push(PickEvent::ObjectMissed {
                        serial: obj.serial,
                        at_ms: self.clock_ms,
                    });
                }
                ObjectAdvance::Exited => exited.push(key),
            }
        }

        for key in exited {
            if let Some(obj) = self.objects.remove(key) {
                self.events.push(PickEvent::ObjectExited {
                    serial: obj.serial,
                    at_ms: self.clock_ms,
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    /// Simulation clock in milliseconds since the last start.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn stats(&self) -> PickStats {
        self.stats
    }

    pub fn arm(&self) -> Arm {
        self.arm
    }

    /// Objects currently on the track (including a held one).
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn objects(&self) -> &SlotMap<ObjectKey, ConveyorObject> {
        &self.objects
    }

    /// Serial of the held object, if any.
    pub fn held_serial(&self) -> Option<u64> {
        self.held.map(|key| self.objects[key].serial)
    }

    /// Whether the gripper is inside its closed pulse.
    pub fn is_grasping(&self) -> bool {
        self.grasp_until_ms
            .is_some_and(|until| until > self.clock_ms)
    }

    /// Drain all events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PickEvent> {
        self.events.drain()
    }
}

impl Default for PickEngine {
    fn default() -> Self {
        Self::new(OperatorLocale::Mexico, RobotRegion::Texas)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
