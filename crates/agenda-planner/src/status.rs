//! "What now?" classification of an itinerary against the current time.
//!
//! Everything here is recomputed from scratch on each query. The planner
//! handles the states that need more than the schedule itself (outside the
//! event, empty schedule, more planning available); [`analyze`] covers the
//! rest.

use agenda_core::{Session, StatusConfig, TimeOfDay};
use agenda_router::{RouteInfo, VenueRouter};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Whether and when to start walking to the next session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "advice", rename_all = "snake_case")]
pub enum MoveAdvice {
    /// Next session is in the same room.
    StayPut,
    Relaxed { spare_minutes: i32 },
    LeaveNow,
    Hurry,
}

impl MoveAdvice {
    /// `gap_minutes` is the time available before the next session starts.
    pub fn assess(gap_minutes: i32, route: &RouteInfo, comfortable_buffer: i32) -> Self {
        if !route.requires_walking() {
            return MoveAdvice::StayPut;
        }
        let buffer = gap_minutes - i32::from(route.walking_minutes);
        if buffer > comfortable_buffer {
            MoveAdvice::Relaxed { spare_minutes: buffer }
        } else if buffer > 0 {
            MoveAdvice::LeaveNow
        } else {
            MoveAdvice::Hurry
        }
    }

    fn message(&self) -> String {
        match self {
            MoveAdvice::StayPut => "The next session is in the same room, you can stay where you are.".into(),
            MoveAdvice::Relaxed { spare_minutes } => {
                format!("Plenty of time: {} minutes to spare for a rest or the booths.", spare_minutes)
            }
            MoveAdvice::LeaveNow => "Start heading over now.".into(),
            MoveAdvice::Hurry => "Time is tight, go right away!".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    OutsideEventPeriod {
        event: String,
        days: Vec<NaiveDate>,
    },
    NoSchedule,
    Ongoing {
        current: Session,
        remaining_minutes: i32,
        next: Option<Session>,
        route: Option<RouteInfo>,
        advice: Option<MoveAdvice>,
    },
    /// Inside the grace window after a session. `next` is absent after the
    /// last one of the day.
    JustEnded {
        previous: Session,
        next: Option<Session>,
        break_minutes: Option<i32>,
        route: Option<RouteInfo>,
        advice: Option<MoveAdvice>,
    },
    Break {
        previous: Option<Session>,
        next: Session,
        break_minutes: i32,
        route: RouteInfo,
        /// Absent before the first session, when there is no origin room.
        advice: Option<MoveAdvice>,
    },
    /// Schedule finished but more sessions could still be booked.
    PlanningAvailable {
        scheduled: usize,
        last_end_time: TimeOfDay,
        available_sessions: usize,
    },
    ScheduleComplete {
        scheduled: usize,
    },
}

impl SessionStatus {
    /// Snake-case tag, same as the serialized `status` field.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionStatus::OutsideEventPeriod { .. } => "outside_event_period",
            SessionStatus::NoSchedule => "no_schedule",
            SessionStatus::Ongoing { .. } => "ongoing",
            SessionStatus::JustEnded { .. } => "just_ended",
            SessionStatus::Break { .. } => "break",
            SessionStatus::PlanningAvailable { .. } => "planning_available",
            SessionStatus::ScheduleComplete { .. } => "schedule_complete",
        }
    }

    /// User-facing text.
    pub fn message(&self) -> String {
        let mut out = String::new();
        match self {
            SessionStatus::OutsideEventPeriod { event, days } => {
                let days: Vec<String> = days.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
                let _ = write!(
                    out,
                    "{} is not running right now (event days: {}). You can still review your planned schedule or look up session details.",
                    event,
                    days.join(", ")
                );
            }
            SessionStatus::NoSchedule => {
                out.push_str("You have not planned anything yet. Start planning a day to build your schedule.");
            }
            SessionStatus::Ongoing { current, remaining_minutes, next, route, .. } => {
                let _ = write!(
                    out,
                    "You are in {} attending \"{}\", {} minutes left.",
                    current.room, current.title, remaining_minutes
                );
                match next {
                    Some(next) => {
                        push_next(&mut out, next);
                        if let Some(route) = route.as_ref().filter(|r| r.requires_walking()) {
                            push_route(&mut out, route);
                        }
                    }
                    None => out.push_str(" This is your last session today."),
                }
            }
            SessionStatus::JustEnded { next: None, .. } => {
                out.push_str("Your session just ended. That was the last one on your schedule today.");
            }
            SessionStatus::JustEnded { next: Some(next), break_minutes, route, advice, .. } => {
                let _ = write!(out, "Your session just ended! {} minutes until the next one.", break_minutes.unwrap_or(0));
                push_next(&mut out, next);
                push_advice(&mut out, route.as_ref(), advice.as_ref());
            }
            SessionStatus::Break { next, break_minutes, route, advice, .. } => {
                let _ = write!(out, "You have a {}-minute break.", break_minutes);
                push_next(&mut out, next);
                match advice {
                    Some(advice) => push_advice(&mut out, Some(route), Some(advice)),
                    None => {
                        let _ = write!(out, "\n\n{}.", route.description);
                    }
                }
            }
            SessionStatus::PlanningAvailable { scheduled, last_end_time, available_sessions } => {
                let _ = write!(
                    out,
                    "You have {} sessions planned, ending at {}. {} more time slots still have sessions you could add. Finish planning if you are happy, or ask for more options.",
                    scheduled, last_end_time, available_sessions
                );
            }
            SessionStatus::ScheduleComplete { .. } => {
                out.push_str("All sessions on your schedule are done. Enjoy the rest of the event: visit the booths, join a BoF, meet other attendees.");
            }
        }
        out
    }
}

fn push_next(out: &mut String, next: &Session) {
    let _ = write!(out, "\n\nNext: {}-{} in {}\n\"{}\"", next.start, next.end, next.room, next.title);
}

fn push_route(out: &mut String, route: &RouteInfo) {
    let _ = write!(
        out,
        "\n\nRoute: {} (about {} min, may take longer)",
        route.description, route.walking_minutes
    );
}

fn push_advice(out: &mut String, route: Option<&RouteInfo>, advice: Option<&MoveAdvice>) {
    if let Some(route) = route.filter(|r| r.requires_walking()) {
        push_route(out, route);
    }
    if let Some(advice) = advice {
        out.push('\n');
        out.push_str(&advice.message());
    }
}

/// Classify `now` against a start-sorted schedule. Returns
/// [`SessionStatus::ScheduleComplete`] once everything is over, including
/// for an empty schedule.
pub fn analyze(sorted: &[Session], now: TimeOfDay, router: &VenueRouter, config: &StatusConfig) -> SessionStatus {
    let grace = i32::from(config.just_ended_grace_minutes);
    let within_grace = |prev: &Session| {
        let since = prev.end.minutes_until(now);
        (0..=grace).contains(&since)
    };

    for (i, session) in sorted.iter().enumerate() {
        if session.is_running_at(now) {
            let next = sorted.get(i + 1);
            let route = next.map(|n| router.route(Some(&session.room), &n.room));
            let advice = next
                .zip(route.as_ref())
                .map(|(n, r)| MoveAdvice::assess(session.end.minutes_until(n.start), r, config.comfortable_buffer_minutes));
            return SessionStatus::Ongoing {
                current: session.clone(),
                remaining_minutes: now.minutes_until(session.end),
                next: next.cloned(),
                route,
                advice,
            };
        }

        if now < session.start {
            let previous = i.checked_sub(1).map(|p| &sorted[p]);
            let break_minutes = now.minutes_until(session.start);
            let route = router.route(previous.map(|p| p.room.as_str()), &session.room);
            let advice = previous.map(|_| MoveAdvice::assess(break_minutes, &route, config.comfortable_buffer_minutes));
            return match previous {
                Some(prev) if within_grace(prev) => SessionStatus::JustEnded {
                    previous: prev.clone(),
                    next: Some(session.clone()),
                    break_minutes: Some(break_minutes),
                    route: Some(route),
                    advice,
                },
                _ => SessionStatus::Break {
                    previous: previous.cloned(),
                    next: session.clone(),
                    break_minutes,
                    route,
                    advice,
                },
            };
        }
    }

    match sorted.last() {
        Some(last) if within_grace(last) => SessionStatus::JustEnded {
            previous: last.clone(),
            next: None,
            break_minutes: None,
            route: None,
            advice: None,
        },
        _ => SessionStatus::ScheduleComplete { scheduled: sorted.len() },
    }
}
