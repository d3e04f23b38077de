//! Unit tests for the truck and forklift machines.

use yard_core::Coord;

use crate::forklift::{ForkliftMachine, ForkliftPhase, ForkliftStep};
use crate::truck::{TruckMachine, TruckPhase, TruckStep};

fn route(n: usize) -> Vec<Coord> {
    (0..n).map(|i| Coord::new(i as f64, 0.0)).collect()
}

// ── Truck ─────────────────────────────────────────────────────────────────────

mod truck_tests {
    use super::*;

    #[test]
    fn outbound_replays_every_coordinate_in_order() {
        let outbound = route(4);
        let ret = route(2);
        let mut machine = TruckMachine::new();

        for expected in &outbound {
            assert_eq!(machine.advance(&outbound, &ret, false), TruckStep::Move(*expected));
        }
        // Exactly N moves, then the arrival transition with nothing emitted.
        assert_eq!(machine.advance(&outbound, &ret, false), TruckStep::Arrived);
        assert_eq!(machine.phase(), TruckPhase::Waiting);
    }

    #[test]
    fn waiting_holds_until_fully_loaded() {
        let outbound = route(1);
        let ret = route(3);
        let mut machine = TruckMachine::new();
        machine.advance(&outbound, &ret, false); // move
        machine.advance(&outbound, &ret, false); // arrived

        for _ in 0..5 {
            assert_eq!(machine.advance(&outbound, &ret, false), TruckStep::Hold);
        }
        assert_eq!(machine.phase(), TruckPhase::Waiting);

        // The first loaded advance starts the return leg immediately.
        assert_eq!(machine.advance(&outbound, &ret, true), TruckStep::Move(ret[0]));
        assert_eq!(machine.phase(), TruckPhase::Return);
    }

    #[test]
    fn return_leg_is_bounded_by_its_own_route() {
        let outbound = route(5);
        let ret = route(2); // shorter than outbound
        let mut machine = TruckMachine::new();
        for _ in 0..6 {
            machine.advance(&outbound, &ret, false); // 5 moves + arrival
        }

        assert_eq!(machine.advance(&outbound, &ret, true), TruckStep::Move(ret[0]));
        assert_eq!(machine.advance(&outbound, &ret, true), TruckStep::Move(ret[1]));
        assert_eq!(machine.advance(&outbound, &ret, true), TruckStep::Finished);
        assert_eq!(machine.phase(), TruckPhase::Done);
    }

    #[test]
    fn finished_is_sticky() {
        let outbound = route(0);
        let ret = route(0);
        let mut machine = TruckMachine::new();

        // Zero-length legs complete immediately.
        assert_eq!(machine.advance(&outbound, &ret, false), TruckStep::Arrived);
        assert_eq!(machine.advance(&outbound, &ret, true), TruckStep::Finished);
        assert_eq!(machine.advance(&outbound, &ret, true), TruckStep::Finished);
        assert_eq!(machine.phase(), TruckPhase::Done);
    }
}

// ── Forklift ──────────────────────────────────────────────────────────────────

mod forklift_tests {
    use super::*;

    #[test]
    fn pickup_leg_counts_up_then_waits_at_the_end() {
        let r = route(3);
        let mut machine = ForkliftMachine::new();

        for expected in &r {
            assert_eq!(machine.advance(&r), ForkliftStep::Move(*expected));
        }
        // The gate: AtPickup every tick, no step consumed, until the caller
        // commits the transition.
        assert_eq!(machine.advance(&r), ForkliftStep::AtPickup);
        assert_eq!(machine.advance(&r), ForkliftStep::AtPickup);
        assert_eq!(machine.phase(), ForkliftPhase::ToPickup);
    }

    #[test]
    fn dropoff_leg_replays_backwards_down_to_zero_inclusive() {
        let r = route(3);
        let mut machine = ForkliftMachine::new();
        for _ in 0..3 {
            machine.advance(&r);
        }
        assert_eq!(machine.advance(&r), ForkliftStep::AtPickup);

        machine.begin_dropoff(r.len());
        assert_eq!(machine.advance(&r), ForkliftStep::Move(r[2]));
        assert_eq!(machine.advance(&r), ForkliftStep::Move(r[1]));
        assert_eq!(machine.advance(&r), ForkliftStep::Move(r[0]));
        assert_eq!(machine.advance(&r), ForkliftStep::AtDropoff);
        // Never decremented below zero; terminal report repeats.
        assert_eq!(machine.advance(&r), ForkliftStep::AtDropoff);
    }

    #[test]
    fn empty_route_completes_each_leg_immediately() {
        let r = route(0);
        let mut machine = ForkliftMachine::new();
        assert_eq!(machine.advance(&r), ForkliftStep::AtPickup);

        machine.begin_dropoff(0);
        assert_eq!(machine.advance(&r), ForkliftStep::AtDropoff);
    }
}
