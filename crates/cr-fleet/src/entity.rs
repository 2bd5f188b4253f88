//! Vehicle, depot, and charger records.

use std::fmt;

use cr_core::{DepotId, Point, Positioned, VehicleId};

/// Charge level of a freshly swapped battery.
pub const FULL_CHARGE: f64 = 100.0;

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// A battery-powered vehicle parked somewhere in the area.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    id:       VehicleId,
    position: Point,
    charge:   f64,
    reserved: bool,
}

impl Vehicle {
    /// Unvalidated constructor; [`FleetBuilder`](crate::FleetBuilder) checks
    /// the inputs before calling it.
    pub(crate) fn new(id: VehicleId, position: Point, charge: f64) -> Self {
        Self { id, position, charge, reserved: false }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Charge level in `[0, 100]`.
    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// `true` once the charger has claimed this vehicle.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// Unreserved and strictly below `threshold`.
    #[inline]
    pub fn needs_service(&self, threshold: f64) -> bool {
        !self.reserved && self.charge < threshold
    }

    /// Move to `to`, draining `distance * decay_rate` charge (floored at 0).
    ///
    /// Returns the distance moved.  Reserved vehicles are frozen: the call is
    /// a no-op returning 0.
    pub fn relocate(&mut self, to: Point, decay_rate: f64) -> f64 {
        if self.reserved {
            return 0.0;
        }
        let moved = self.position.distance_to(to);
        self.position = to;
        self.charge = (self.charge - moved * decay_rate).clamp(0.0, FULL_CHARGE);
        moved
    }

    /// Swap in a full battery and mark the vehicle as claimed.
    pub fn service(&mut self) {
        self.charge = FULL_CHARGE;
        self.reserved = true;
    }
}

impl Positioned for Vehicle {
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} with charge {:.0}%", self.id, self.position, self.charge)
    }
}

// ── Depot ─────────────────────────────────────────────────────────────────────

/// A fixed station stocking charged packs.
///
/// `charged + discharged == capacity` always holds: drawing packs moves them
/// from one count to the other.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    id:         DepotId,
    position:   Point,
    capacity:   u32,
    charged:    u32,
    discharged: u32,
    visited:    bool,
}

impl Depot {
    pub(crate) fn new(id: DepotId, position: Point, capacity: u32) -> Self {
        Self {
            id,
            position,
            capacity,
            charged: capacity,
            discharged: 0,
            visited: false,
        }
    }

    #[inline]
    pub fn id(&self) -> DepotId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn charged(&self) -> u32 {
        self.charged
    }

    #[inline]
    pub fn discharged(&self) -> u32 {
        self.discharged
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Hand out up to `wanted` charged packs, taking back as many discharged
    /// ones.  Marks the depot visited and returns the number handed out.
    pub fn draw(&mut self, wanted: u32) -> u32 {
        let drawn = wanted.min(self.charged);
        self.charged -= drawn;
        self.discharged += drawn;
        self.visited = true;
        drawn
    }
}

impl Positioned for Depot {
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}

impl fmt::Display for Depot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} with {} charged and {} discharged packs",
            self.id, self.position, self.charged, self.discharged
        )
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// The mobile charger.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    position:  Point,
    packs:     u32,
    capacity:  u32,
    travelled: f64,
    /// Vehicles serviced since the last depot visit.
    cursor:    u32,
}

impl Agent {
    /// A charger at `start` carrying no packs.
    pub fn new(start: Point, capacity: u32) -> Self {
        Self {
            position: start,
            packs: 0,
            capacity,
            travelled: 0.0,
            cursor: 0,
        }
    }

    #[inline]
    pub fn packs(&self) -> u32 {
        self.packs
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Cumulative distance travelled so far.
    #[inline]
    pub fn travelled(&self) -> f64 {
        self.travelled
    }

    /// Position in the current ranked candidate list.
    #[inline]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Packs the charger can still take on.
    #[inline]
    pub fn free_slots(&self) -> u32 {
        self.capacity - self.packs
    }

    /// Travel to `to`, adding `cost` to the distance counter.
    pub fn move_to(&mut self, to: Point, cost: f64) {
        debug_assert!(cost >= 0.0);
        self.position = to;
        self.travelled += cost;
    }

    /// Take on `packs` packs at a depot and reset the candidate cursor.
    pub fn load(&mut self, packs: u32) {
        self.packs = (self.packs + packs).min(self.capacity);
        self.cursor = 0;
    }

    /// Hand one pack to a vehicle.
    ///
    /// # Panics
    /// Panics in debug mode if the charger is empty.
    pub fn deliver(&mut self) {
        debug_assert!(self.packs > 0, "deliver with no packs on board");
        self.packs = self.packs.saturating_sub(1);
        self.cursor += 1;
    }
}

impl Positioned for Agent {
    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}
