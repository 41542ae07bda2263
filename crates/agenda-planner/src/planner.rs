//! Planner facade: the operations a calling layer exposes to users.

use agenda_core::{AgendaConfig, AgendaError, Catalog, Clock, Result, Session, SessionSummary, TimeOfDay};
use agenda_router::{VenueRouter, DEFAULT_VENUE};
use agenda_session::{Itinerary, ItineraryStore, StoreStats, SweepReport};
use std::sync::Arc;

use crate::recommend::{is_complete, next_available_per_room, recommend};
use crate::room::{RoomSchedule, RoomScheduleMode};
use crate::status::{analyze, SessionStatus};
use crate::timeline::Timeline;
use crate::types::*;

pub struct Planner {
    config: AgendaConfig,
    catalog: Arc<dyn Catalog>,
    store: Arc<ItineraryStore>,
    router: VenueRouter,
    clock: Arc<dyn Clock>,
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AgendaError::MissingArgument(name));
    }
    Ok(value)
}

fn summaries(sessions: Vec<&Session>) -> Vec<SessionSummary> {
    sessions.into_iter().map(Session::summary).collect()
}

impl Planner {
    /// Planner over the default venue with a fresh store.
    pub fn new(config: AgendaConfig, catalog: Arc<dyn Catalog>, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(ItineraryStore::new(&config.store, Arc::clone(&clock)));
        let router = VenueRouter::new(DEFAULT_VENUE.clone())?;
        Ok(Self { config, catalog, store, router, clock })
    }

    pub fn with_store(mut self, store: Arc<ItineraryStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_router(mut self, router: VenueRouter) -> Self {
        self.router = router;
        self
    }

    pub fn config(&self) -> &AgendaConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ItineraryStore> {
        &self.store
    }

    pub fn router(&self) -> &VenueRouter {
        &self.router
    }

    /// Unfiltered open slots after the itinerary's current threshold.
    fn candidates(&self, it: &Itinerary) -> Vec<&Session> {
        next_available_per_room(self.catalog.sessions_for_day(&it.day), it.last_end_time, &it.schedule)
    }

    fn options(&self, it: &Itinerary) -> Vec<SessionSummary> {
        summaries(recommend(&self.candidates(it), &self.config.planning))
    }

    fn complete(&self, it: &Itinerary, open_slots: usize) -> bool {
        is_complete(open_slots, it.last_end_time, it.len(), &self.config.planning)
    }

    pub fn start_planning(&self, day: &str) -> Result<PlanningStarted> {
        let day = required(day, "day")?;
        let day = self.config.event.resolve_day(day)?;
        let first = self.catalog.first_sessions_of_day(&day.key);
        if first.is_empty() {
            return Err(AgendaError::EmptyDay { day: day.key.clone() });
        }
        let it = self.store.create(day, self.config.planning.day_start);
        tracing::info!(session_id = %it.id, day = %day.key, options = first.len(), "planning started");
        Ok(PlanningStarted { session_id: it.id, day: day.key.clone(), options: summaries(first) })
    }

    pub fn choose_session(&self, session_id: &str, code: &str) -> Result<SessionChosen> {
        let session_id = required(session_id, "session_id")?;
        let code = required(code, "session_code")?;
        let session = self
            .catalog
            .session_by_code(code)
            .ok_or_else(|| AgendaError::SessionNotFound { code: code.to_string() })?;

        let result = self.store.update(session_id, |it| {
            if session.day != it.day {
                return Err(AgendaError::DayMismatch {
                    code: session.code.clone(),
                    session_day: session.day.clone(),
                    itinerary_day: it.day.clone(),
                });
            }
            it.add_session(session.clone())?;
            Ok(it.clone())
        });
        let it = match result {
            Ok(it) => it,
            Err(e) => {
                tracing::info!(session_id, code, error = %e, "selection rejected");
                return Err(e);
            }
        };

        let candidates = self.candidates(&it);
        let is_complete = self.complete(&it, candidates.len());
        let next_options = summaries(recommend(&candidates, &self.config.planning));
        tracing::info!(
            session_id,
            code,
            scheduled = it.len(),
            last_end = %it.last_end_time,
            options = next_options.len(),
            "session added"
        );
        Ok(SessionChosen { session_id: it.id, selected: session.clone(), next_options, is_complete })
    }

    pub fn get_options(&self, session_id: &str) -> Result<PlanningOptions> {
        let it = self.store.get(required(session_id, "session_id")?)?;
        Ok(PlanningOptions {
            options: self.options(&it),
            last_end_time: it.last_end_time,
            scheduled: it.len(),
            session_id: it.id,
        })
    }

    /// Whether the itinerary counts as fully planned.
    pub fn is_complete(&self, session_id: &str) -> Result<bool> {
        let it = self.store.get(required(session_id, "session_id")?)?;
        Ok(self.complete(&it, self.candidates(&it).len()))
    }

    pub fn get_schedule(&self, session_id: &str) -> Result<ScheduleView> {
        let it = self.store.get(required(session_id, "session_id")?)?;
        let is_complete = self.complete(&it, self.candidates(&it).len());
        Ok(ScheduleView {
            is_complete,
            timeline: Timeline::build(it.day.clone(), &it.schedule),
            schedule: it.sorted_schedule(),
            day: it.day,
            last_end_time: it.last_end_time,
            completed: it.completed,
            session_id: it.id,
        })
    }

    pub fn get_next_status(&self, session_id: &str) -> Result<SessionStatus> {
        let it = self.store.get(required(session_id, "session_id")?)?;
        let now = self.clock.now();
        let event = &self.config.event;
        if !event.is_active(now) {
            return Ok(SessionStatus::OutsideEventPeriod {
                event: event.name.clone(),
                days: event.days.iter().map(|d| d.date).collect(),
            });
        }
        if it.is_empty() {
            return Ok(SessionStatus::NoSchedule);
        }

        let status = analyze(&it.sorted_schedule(), event.local_time(now), &self.router, &self.config.status);
        if let SessionStatus::ScheduleComplete { scheduled } = status {
            if !it.completed {
                let open = self.candidates(&it).len();
                if open > 0 {
                    return Ok(SessionStatus::PlanningAvailable {
                        scheduled,
                        last_end_time: it.last_end_time,
                        available_sessions: open,
                    });
                }
            }
        }
        tracing::debug!(session_id = %it.id, status = status.kind(), "status computed");
        Ok(status)
    }

    pub fn finish_planning(&self, session_id: &str) -> Result<PlanningFinished> {
        let it = self.store.update(required(session_id, "session_id")?, |it| {
            it.finish();
            Ok(it.clone())
        })?;
        tracing::info!(session_id = %it.id, scheduled = it.len(), "planning finished");
        Ok(PlanningFinished {
            schedule: it.sorted_schedule(),
            scheduled: it.len(),
            day: it.day,
            last_end_time: it.last_end_time,
            session_id: it.id,
        })
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Full catalog record, abstract included.
    pub fn session_detail(&self, code: &str) -> Result<Session> {
        let code = required(code, "session_code")?;
        self.catalog
            .session_by_code(code)
            .cloned()
            .ok_or_else(|| AgendaError::SessionNotFound { code: code.to_string() })
    }

    /// Sessions in `room`. Without a day, uses today's event day, or the
    /// first event day outside the event.
    pub fn room_schedule(&self, room: &str, day: Option<&str>, mode: RoomScheduleMode) -> Result<RoomSchedule> {
        let room = required(room, "room")?;
        let now = self.clock.now();
        let event = &self.config.event;
        let today = event.day_at(now);
        let day = match day.map(str::trim).filter(|d| !d.is_empty()) {
            Some(name) => event.resolve_day(name)?,
            None => today.or_else(|| event.days.first()).ok_or_else(|| AgendaError::Config("no event days".into()))?,
        };

        let sessions = self.catalog.sessions_in_room(&day.key, room);
        if sessions.is_empty() {
            return Err(AgendaError::RoomNotFound { room: room.to_string(), day: day.key.clone() });
        }
        let current_time: TimeOfDay = event.local_time(now);
        let current = sessions.iter().find(|s| s.is_running_at(current_time)).map(|s| s.summary());
        let next = sessions.iter().find(|s| s.start > current_time).map(|s| s.summary());

        let (listed, current, next) = match mode {
            RoomScheduleMode::Full => (sessions.iter().map(|s| s.summary()).collect(), current, next),
            RoomScheduleMode::CurrentOnly => (current.iter().cloned().collect(), current, None),
            RoomScheduleMode::NextOnly => (next.iter().cloned().collect(), None, next),
        };
        Ok(RoomSchedule {
            room: room.to_string(),
            day: day.key.clone(),
            mode,
            current_time,
            during_event: today.is_some(),
            sessions: listed,
            current,
            next,
            total_sessions: sessions.len(),
        })
    }

    /// Evict itineraries idle longer than the configured TTL.
    pub fn sweep(&self) -> SweepReport {
        self.store.sweep(self.config.store.ttl())
    }
}
