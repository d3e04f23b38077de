//! The fixed-period tick driver.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use yard_core::{Barcode, SimRng};
use yard_events::route_events;
use yard_hub::{FenceEvent, LocationFeed, Positioning};
use yard_routes::RouteTable;

use crate::advance::advance_all;
use crate::error::SimResult;
use crate::events::apply_action;
use crate::jobs::{try_start_delivery, try_start_pick};
use crate::state::WarehouseState;

/// The scheduler: owns the world state, the static tables, the platform
/// client, and both ends of the push channel.
///
/// Generic over [`Positioning`] so scenario tests can drive it against an
/// in-memory platform.
pub struct Scheduler<P: Positioning> {
    pub client: P,
    pub table: RouteTable,
    pub state: WarehouseState,

    /// Inbound fence-event batches from the push channel, drained at the
    /// top of every tick.
    pub fences: mpsc::UnboundedReceiver<Vec<FenceEvent>>,

    /// Outbound movement commands.
    pub locations: LocationFeed,

    pub rng: SimRng,

    /// Target tick period.
    pub period: Duration,

    /// Catalog barcodes, cached for order generation.
    catalog: Vec<Barcode>,
}

impl<P: Positioning> Scheduler<P> {
    pub fn new(
        client: P,
        table: RouteTable,
        fences: mpsc::UnboundedReceiver<Vec<FenceEvent>>,
        locations: LocationFeed,
        rng: SimRng,
        period: Duration,
    ) -> Self {
        let state = WarehouseState::new(&table);
        let catalog = table.catalog();
        Self {
            client,
            table,
            state,
            fences,
            locations,
            rng,
            period,
            catalog,
        }
    }

    /// Run forever at the configured period.
    ///
    /// The interval waits out the remainder of each period (`max(0,
    /// period - elapsed)`); an overrunning tick delays the next one rather
    /// than bursting.  Only process shutdown stops the loop.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }

    /// Run exactly `n` ticks back-to-back.  Test hook; no pacing.
    pub async fn run_ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick().await;
        }
    }

    // ── One tick ──────────────────────────────────────────────────────────

    async fn tick(&mut self) {
        // ① Events: drain buffered fence-crossing batches, in order.
        while let Ok(batch) = self.fences.try_recv() {
            for action in route_events(&batch, &self.table) {
                debug!(?action, "applying fence action");
                if let Err(err) =
                    apply_action(action, &self.client, &self.table, &mut self.state).await
                {
                    warn!(%err, "fence action failed; continuing");
                }
            }
        }

        // ② Admit newly available trucks.
        if !self.state.idle_trucks.is_empty() {
            self.state.admit_trucks(&self.catalog, &mut self.rng);
        }

        // ③ Poll transiting products for loaded confirmations.
        if !self.state.transiting.is_empty() {
            if let Err(err) = self.poll_transiting().await {
                warn!(%err, "transiting-product poll failed; continuing");
            }
        }

        // ④ Matching — before advancement; the pre-matching counts below
        //    keep a job created this tick from advancing until next tick.
        let pick_count = self.state.picks.len();
        let delivery_count = self.state.deliveries.len();

        if !self.state.idle_forklifts.is_empty() && !self.state.pending_jobs.is_empty() {
            if let Err(err) = try_start_pick(&self.client, &self.table, &mut self.state).await {
                warn!(%err, "pick matching failed; continuing");
            }
        }
        if !self.state.waiting_trucks.is_empty() && !self.state.waiting_products.is_empty() {
            if let Err(err) = try_start_delivery(&self.client, &self.table, &mut self.state).await {
                warn!(%err, "delivery matching failed; continuing");
            }
        }

        // ⑤ Advance every active agent; barrier inside.
        advance_all(
            &self.client,
            &mut self.state,
            &self.locations,
            &self.table.zone_id,
            pick_count,
            delivery_count,
        )
        .await;
    }

    // ── Loaded-confirmation poll ──────────────────────────────────────────

    /// Check the transiting watch list for deleted trackables.
    ///
    /// A not-found read means the product was picked up by the loading
    /// process: drop it from the list and re-derive every truck's
    /// fully-loaded flag from its order trackable.  A watched trackable
    /// that turns out not to be a product is dropped without a refresh.
    /// At most one removal per poll.
    async fn poll_transiting(&mut self) -> SimResult<()> {
        for index in 0..self.state.transiting.len() {
            let id = self.state.transiting[index].clone();
            let found = self.client.get_trackable(&id).await?;
            match found {
                None => {
                    self.state.transiting.remove(index);
                    self.refresh_fully_loaded().await?;
                    return Ok(());
                }
                Some(doc) if !doc.is_product() => {
                    self.state.transiting.remove(index);
                    return Ok(());
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Re-fetch each active truck's order trackable and compare the
    /// requested and loaded product lists.
    async fn refresh_fully_loaded(&mut self) -> SimResult<()> {
        for truck in &mut self.state.trucks {
            let Some(order_id) = truck.order.as_ref().map(|o| o.id.clone()) else {
                continue;
            };
            let found = self.client.get_trackable(&order_id).await?;
            if let Some(doc) = found {
                truck.fully_loaded = doc.is_fully_loaded();
                truck.order = Some(doc);
            }
        }
        Ok(())
    }
}
