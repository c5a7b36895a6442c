// 🎛️ Filter State Controller
//
// Single owner of:
//   - the FilterState (only mutated through update_filter)
//   - the doctor collection (Unloaded until a fetch lands)
//   - the derived visible set + URL query string
//
// Every state or collection change runs, in this order:
//   1. Engine recompute (visible set)
//   2. URL re-serialization (from scratch)
//   3. Subscriber notification (registration order)

use crate::engine::{compute_visible, suggestions};
use crate::model::{Doctor, FilterState, FilterUpdate};
use crate::query::{parse_query, to_query};
use crate::source::{DoctorSource, FetchError};
use crate::specialties::list_specialties;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load doctor data. Please try again later.";

// ============================================================================
// COLLECTION
// ============================================================================

/// "Not yet available" is distinct from "loaded, zero doctors"
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Collection {
    #[default]
    Unloaded,
    Loaded {
        doctors: Vec<Doctor>,
        fetched_at: DateTime<Utc>,
    },
}

impl Collection {
    pub fn doctors(&self) -> Option<&[Doctor]> {
        match self {
            Collection::Unloaded => None,
            Collection::Loaded { doctors, .. } => Some(doctors),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Collection::Loaded { .. })
    }
}

// ============================================================================
// FETCH TICKETS
// ============================================================================

/// Generation token for one fetch attempt. Only the newest ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { count: usize },
    /// A newer fetch was started; this result was discarded
    Superseded,
}

// ============================================================================
// EVENTS + NOTIFICATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    StateChanged { query: String },
    CollectionChanged { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// User-facing, non-blocking message (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(description: impl Into<String>) -> Self {
        Notification {
            title: "Error".to_string(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn FnMut(&ControllerEvent, &FilterState) + Send>;

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct FilterController {
    state: FilterState,
    query: String,
    collection: Collection,
    visible: Option<Vec<Doctor>>,
    specialties: Vec<String>,
    latest_ticket: u64,
    notifications: Vec<Notification>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterController {
    pub fn new(state: FilterState) -> Self {
        let query = to_query(&state);
        FilterController {
            state,
            query,
            collection: Collection::Unloaded,
            visible: None,
            specialties: Vec::new(),
            latest_ticket: 0,
            notifications: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Session start: state comes from the URL query string, once
    pub fn from_query(query: &str) -> Self {
        Self::new(parse_query(query))
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Current persisted representation (no leading '?')
    pub fn query_string(&self) -> &str {
        &self.query
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn is_loaded(&self) -> bool {
        self.collection.is_loaded()
    }

    /// Full collection, None while unloaded
    pub fn doctors(&self) -> Option<&[Doctor]> {
        self.collection.doctors()
    }

    /// Visible set, None while unloaded (Some(empty) = zero results)
    pub fn visible(&self) -> Option<&[Doctor]> {
        self.visible.as_deref()
    }

    /// Specialty index of the loaded collection
    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Autocomplete for the current search query, against the full collection
    pub fn suggestions(&self, limit: usize) -> Vec<&Doctor> {
        match self.collection.doctors() {
            Some(doctors) => suggestions(doctors, &self.state.search_query, limit),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// The only way FilterState changes. Applied synchronously, in call order.
    pub fn update_filter(&mut self, update: FilterUpdate) {
        self.state = self.state.merge(update);
        self.recompute();
        self.query = to_query(&self.state);
        debug!(query = %self.query, "filter state updated");

        let event = ControllerEvent::StateChanged {
            query: self.query.clone(),
        };
        self.notify(&event);
    }

    /// Replace the collection directly (bypasses fetch tickets)
    pub fn set_doctors(&mut self, doctors: Vec<Doctor>) {
        let count = doctors.len();
        self.collection = Collection::Loaded {
            doctors,
            fetched_at: Utc::now(),
        };
        self.specialties = self.collection.doctors().map(list_specialties).unwrap_or_default();
        self.recompute();
        self.notify(&ControllerEvent::CollectionChanged { count });
    }

    /// Start a fetch. Any ticket handed out earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    /// Land a fetch result. Stale tickets are discarded whatever they carry.
    /// On failure the collection is left as it was and a notification is queued.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Doctor>, FetchError>,
    ) -> Result<FetchOutcome, FetchError> {
        if ticket.0 != self.latest_ticket {
            debug!(ticket = ticket.0, latest = self.latest_ticket, "discarding superseded fetch");
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(doctors) => {
                let count = doctors.len();
                info!(count, "doctors loaded");
                self.set_doctors(doctors);
                Ok(FetchOutcome::Applied { count })
            }
            Err(e) => {
                error!(error = %e, "failed to load doctors");
                self.notifications.push(Notification::error(LOAD_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// begin_fetch + source.fetch_records + complete_fetch
    pub async fn load_from(&mut self, source: &dyn DoctorSource) -> Result<FetchOutcome, FetchError> {
        let ticket = self.begin_fetch();
        let result = source.fetch_records().await;
        self.complete_fetch(ticket, result)
    }

    /// Drain queued notifications (oldest first)
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ------------------------------------------------------------------------
    // Subscribers
    // ------------------------------------------------------------------------

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn recompute(&mut self) {
        self.visible = self
            .collection
            .doctors()
            .map(|doctors| compute_visible(doctors, &self.state));
    }

    fn notify(&mut self, event: &ControllerEvent) {
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(event, state);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
