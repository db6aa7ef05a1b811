//! Reservation desk
//!
//! Every status move, edit, booking and table change goes through the
//! lifecycle authority in `shared` before the backend sees it. A rejected
//! action sends nothing. Successful mutations invalidate the cached lists they
//! affect.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use shared::lifecycle::{self, Action, rules};
use shared::models::{
    DiningTable, NewReservation, Reservation, ReservationEdit, ReservationFilter,
    ReservationStatus, ReservationUpdate, Role, TableInfo,
};

use crate::cache::QueryCache;
use crate::graphql::ReservationBackend;
use crate::{ClientError, ClientResult, SessionContext};

/// A listed reservation with the actions its viewer may trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRow {
    pub reservation: Reservation,
    pub actions: Vec<Action>,
}

impl ReservationRow {
    pub fn offers(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

/// Marks a reservation as submitting until dropped
struct Submission<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// Cached lists are scoped to the principal that fetched them
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ListKey {
    principal: String,
    role: Role,
    filter: ReservationFilter,
}

pub struct ReservationDesk<B> {
    backend: B,
    session: Arc<SessionContext>,
    lists: QueryCache<ListKey, Vec<Reservation>>,
    tables: QueryCache<(), Vec<DiningTable>>,
    in_flight: Mutex<HashSet<String>>,
}

impl<B: ReservationBackend> ReservationDesk<B> {
    pub fn new(backend: B, session: Arc<SessionContext>, stale_time: Duration) -> Self {
        Self {
            backend,
            session,
            lists: QueryCache::new(stale_time),
            tables: QueryCache::new(stale_time),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Drop every cached list
    pub fn invalidate(&self) {
        self.lists.invalidate_all();
        self.tables.invalidate_all();
        tracing::debug!("Query cache cleared");
    }

    // ========== Reservations ==========

    /// Reservations visible to the signed-in principal
    pub async fn reservations(&self, filter: &ReservationFilter) -> ClientResult<Vec<Reservation>> {
        let principal = self.session.require_principal()?;
        let key = ListKey {
            principal: principal.id,
            role: principal.role,
            filter: filter.clone(),
        };
        if let Some(hit) = self.lists.get(&key) {
            tracing::debug!(count = hit.len(), "Reservation list served from cache");
            return Ok(hit);
        }

        let list = self
            .backend
            .list_reservations(&self.session, principal.role, filter)
            .await?;
        self.lists.put(key, list.clone());
        Ok(list)
    }

    /// Reservations paired with the actions the principal may take on each
    pub async fn rows(&self, filter: &ReservationFilter) -> ClientResult<Vec<ReservationRow>> {
        let role = self.session.role().ok_or(ClientError::Unauthenticated)?;
        let list = self.reservations(filter).await?;
        Ok(list
            .into_iter()
            .map(|reservation| ReservationRow {
                actions: lifecycle::available_actions(reservation.status, role),
                reservation,
            })
            .collect())
    }

    pub async fn reservation(&self, id: &str) -> ClientResult<Reservation> {
        self.backend.get_reservation(&self.session, id).await
    }

    /// Move `current` to `target`
    ///
    /// The move is checked against `current.status` and the principal's role
    /// before exactly one update is sent.
    pub async fn transition(
        &self,
        current: &Reservation,
        target: ReservationStatus,
    ) -> ClientResult<Reservation> {
        let principal = self.session.require_principal()?;
        if let Err(e) = lifecycle::check_transition(current.status, target, principal.role) {
            tracing::warn!(
                reservation = %current.id,
                from = %current.status,
                to = %target,
                role = %principal.role,
                error = %e,
                "Transition rejected"
            );
            return Err(e.into());
        }

        let _submission = self.begin(&current.id)?;
        let update = ReservationUpdate::status(current.id.as_str(), target);
        let updated = self.backend.update_reservation(&self.session, &update).await?;
        self.lists.invalidate_all();

        if updated.status != target {
            return Err(ClientError::InvalidResponse(format!(
                "reservation {} came back {} instead of {}",
                updated.id, updated.status, target
            )));
        }

        tracing::info!(
            reservation = %updated.id,
            from = %current.status,
            to = %target,
            "Status updated"
        );
        Ok(updated)
    }

    /// Fetch the current status first, then [`transition`](Self::transition)
    pub async fn transition_by_id(
        &self,
        id: &str,
        target: ReservationStatus,
    ) -> ClientResult<Reservation> {
        self.session.require_principal()?;
        let current = self.reservation(id).await?;
        self.transition(&current, target).await
    }

    pub async fn approve(&self, current: &Reservation) -> ClientResult<Reservation> {
        self.transition(current, ReservationStatus::Approved).await
    }

    pub async fn cancel(&self, current: &Reservation) -> ClientResult<Reservation> {
        self.transition(current, ReservationStatus::Cancelled).await
    }

    pub async fn complete(&self, current: &Reservation) -> ClientResult<Reservation> {
        self.transition(current, ReservationStatus::Completed).await
    }

    /// Rewrite contact, date and party size of a Requested reservation
    pub async fn edit(
        &self,
        current: &Reservation,
        edit: &ReservationEdit,
    ) -> ClientResult<Reservation> {
        let principal = self.session.require_principal()?;
        lifecycle::check_edit(current.status, principal.role)?;
        rules::check_fields(edit)?;
        rules::check_party_size(edit.number_of_people, current.table.seats)?;

        let _submission = self.begin(&current.id)?;
        let update = ReservationUpdate::edit(current.id.as_str(), edit);
        let updated = self.backend.update_reservation(&self.session, &update).await?;
        self.lists.invalidate_all();

        tracing::info!(reservation = %updated.id, "Reservation edited");
        Ok(updated)
    }

    /// Book a table, starting from tomorrow
    pub async fn book(&self, booking: &NewReservation) -> ClientResult<Reservation> {
        self.book_on(booking, Local::now().date_naive()).await
    }

    /// [`book`](Self::book) with an explicit "today"
    pub async fn book_on(
        &self,
        booking: &NewReservation,
        today: NaiveDate,
    ) -> ClientResult<Reservation> {
        self.session.require_principal()?;
        rules::check_fields(booking)?;
        rules::check_booking_date(booking.date, today)?;
        let tables = self.tables().await?;
        rules::check_booking_party(booking.number_of_people, &tables)?;

        let created = self.backend.add_reservation(&self.session, booking).await?;
        self.lists.invalidate_all();

        tracing::info!(
            reservation = %created.id,
            date = %created.date,
            party = created.number_of_people,
            "Reservation booked"
        );
        Ok(created)
    }

    // ========== Tables ==========

    pub async fn tables(&self) -> ClientResult<Vec<DiningTable>> {
        self.session.require_principal()?;
        if let Some(hit) = self.tables.get(&()) {
            tracing::debug!(count = hit.len(), "Table list served from cache");
            return Ok(hit);
        }
        let tables = self.backend.list_tables(&self.session).await?;
        self.tables.put((), tables.clone());
        Ok(tables)
    }

    /// Seat counts a new table may still take
    pub async fn seat_options(&self) -> ClientResult<Vec<u32>> {
        let tables = self.tables().await?;
        Ok(rules::available_seat_options(&tables))
    }

    pub async fn add_table(&self, seats: u32) -> ClientResult<DiningTable> {
        let principal = self.session.require_principal()?;
        rules::require_role(principal.role, Role::Staff)?;
        let tables = self.tables().await?;
        rules::check_new_table(seats, &tables)?;

        let table = self.backend.add_table(&self.session, TableInfo { seats }).await?;
        self.tables.invalidate_all();

        tracing::info!(table = %table.id, seats = table.seats, "Table added");
        Ok(table)
    }

    /// Raise the seat count of a table
    pub async fn update_table(&self, id: &str, seats: u32) -> ClientResult<DiningTable> {
        let principal = self.session.require_principal()?;
        rules::require_role(principal.role, Role::Staff)?;
        let tables = self.tables().await?;
        let current = tables
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::TableNotFound(id.to_string()))?;
        rules::check_seat_revision(current.seats, seats)?;

        let table = self
            .backend
            .update_table(&self.session, id, TableInfo { seats })
            .await?;
        self.tables.invalidate_all();

        tracing::info!(table = %table.id, from = current.seats, to = table.seats, "Table updated");
        Ok(table)
    }

    fn begin(&self, id: &str) -> ClientResult<Submission<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(id.to_string()) {
            return Err(ClientError::Busy(id.to_string()));
        }
        Ok(Submission {
            in_flight: &self.in_flight,
            id: id.to_string(),
        })
    }
}
