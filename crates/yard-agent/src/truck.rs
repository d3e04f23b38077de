//! Truck lifecycle: drive in, wait for loading, drive home.

use yard_core::Coord;

/// Where a truck is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TruckPhase {
    /// Driving the outbound route towards the facility.
    Outbound,
    /// Parked at the loading ramp until the order is fully loaded.
    Waiting,
    /// Driving the return route home.
    Return,
    /// Route completed; the truck is ready to be recycled.
    Done,
}

/// What one `advance` asks the caller to do.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TruckStep {
    /// Emit a movement command to this coordinate.
    Move(Coord),
    /// Just transitioned OUTBOUND → WAITING.  Nothing is emitted: physical
    /// arrival is signaled by the platform's fence-entry event, not by the
    /// state machine.
    Arrived,
    /// Waiting at the ramp, order not fully loaded yet.
    Hold,
    /// Return route completed; recycle the truck.
    Finished,
}

/// Phase + step index of one truck.  Step index is always within
/// `[0, route_len]` of the current leg.
#[derive(Clone, Debug)]
pub struct TruckMachine {
    phase: TruckPhase,
    step: usize,
}

impl Default for TruckMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TruckMachine {
    /// A freshly admitted truck at the start of its outbound leg.
    pub fn new() -> Self {
        Self {
            phase: TruckPhase::Outbound,
            step: 0,
        }
    }

    pub fn phase(&self) -> TruckPhase {
        self.phase
    }

    /// Advance one tick.
    ///
    /// `fully_loaded` is the externally maintained flag derived from the
    /// order trackable; this machine only reads it.  A zero-length leg
    /// completes immediately (OUTBOUND arrives on its first advance, RETURN
    /// finishes on its first loaded advance).
    pub fn advance(
        &mut self,
        outbound_route: &[Coord],
        return_route: &[Coord],
        fully_loaded: bool,
    ) -> TruckStep {
        match self.phase {
            TruckPhase::Outbound => {
                if self.step < outbound_route.len() {
                    let coord = outbound_route[self.step];
                    self.step += 1;
                    TruckStep::Move(coord)
                } else {
                    self.phase = TruckPhase::Waiting;
                    self.step = 0;
                    TruckStep::Arrived
                }
            }

            TruckPhase::Waiting => {
                if !fully_loaded {
                    return TruckStep::Hold;
                }
                self.phase = TruckPhase::Return;
                self.return_step(return_route)
            }

            TruckPhase::Return => self.return_step(return_route),

            TruckPhase::Done => TruckStep::Finished,
        }
    }

    fn return_step(&mut self, return_route: &[Coord]) -> TruckStep {
        if self.step < return_route.len() {
            let coord = return_route[self.step];
            self.step += 1;
            TruckStep::Move(coord)
        } else {
            self.phase = TruckPhase::Done;
            TruckStep::Finished
        }
    }
}
