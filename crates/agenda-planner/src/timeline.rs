use agenda_core::{Session, TimeOfDay, TimeSpan};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Session { session: Session },
    Gap { start: TimeOfDay, end: TimeOfDay, minutes: u16 },
}

/// Start-ordered view of an itinerary with the free time made explicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub day: String,
    pub entries: Vec<TimelineEntry>,
    pub session_count: usize,
    /// First start to last end.
    pub span: Option<TimeSpan>,
}

impl Timeline {
    pub fn build(day: impl Into<String>, schedule: &[Session]) -> Self {
        let mut sorted: Vec<&Session> = schedule.iter().collect();
        sorted.sort_by_key(|s| s.start);

        let mut entries = Vec::with_capacity(sorted.len() * 2);
        let mut prev_end: Option<TimeOfDay> = None;
        for s in &sorted {
            if let Some(end) = prev_end.filter(|end| s.start > *end) {
                entries.push(TimelineEntry::Gap {
                    start: end,
                    end: s.start,
                    minutes: TimeSpan::new(end, s.start).duration_minutes(),
                });
            }
            entries.push(TimelineEntry::Session { session: (*s).clone() });
            prev_end = Some(prev_end.map_or(s.end, |e| e.max(s.end)));
        }

        let span = match (sorted.first(), prev_end) {
            (Some(first), Some(end)) => Some(TimeSpan::new(first.start, end)),
            _ => None,
        };
        Self { day: day.into(), entries, session_count: sorted.len(), span }
    }

    pub fn total_minutes(&self) -> u16 {
        self.span.map_or(0, |s| s.duration_minutes())
    }

    pub fn free_minutes(&self) -> u16 {
        self.entries
            .iter()
            .map(|e| match e {
                TimelineEntry::Gap { minutes, .. } => *minutes,
                TimelineEntry::Session { .. } => 0,
            })
            .sum()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "No sessions selected yet");
        }
        writeln!(f, "Your schedule for {}\n", self.day)?;
        for entry in &self.entries {
            match entry {
                TimelineEntry::Gap { start, end, minutes } => {
                    writeln!(f, "{}-{} | free ({} min)\n", start, end, minutes)?;
                }
                TimelineEntry::Session { session: s } => {
                    writeln!(f, "{}-{} | {}", s.start, s.end, s.room)?;
                    match s.primary_tag() {
                        Some(tag) => writeln!(f, "   [{}] {}", tag, s.title)?,
                        None => writeln!(f, "   {}", s.title)?,
                    }
                    writeln!(
                        f,
                        "   {} | {} | {} {}\n",
                        format_speakers(&s.speakers),
                        s.track,
                        s.language,
                        s.difficulty
                    )?;
                }
            }
        }
        let total = self.total_minutes();
        write!(f, "{} sessions, spanning {}h{:02}m", self.session_count, total / 60, total % 60)
    }
}

/// `A`, `A, B`, `A, B, C`, then `A and N others`.
pub fn format_speakers(speakers: &[String]) -> String {
    match speakers {
        [] => "Unknown speaker".into(),
        [only] => only.clone(),
        _ if speakers.len() <= 3 => speakers.join(", "),
        [first, rest @ ..] => format!("{} and {} others", first, rest.len()),
    }
}
