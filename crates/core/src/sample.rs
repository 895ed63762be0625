//! Sample production data.
//!
//! Used to seed an empty database on first boot and to back the scripted
//! assistant when no upstream AI provider is configured. Schedule timestamps
//! are generated relative to a reference instant so the day buckets stay
//! meaningful regardless of when the server starts.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::assist::{ActorAssignment, ProductionBoard, SceneCard};
use crate::roster::{CrewMember, CrewStatus, Script, ScriptStatus};
use crate::schedule::{Priority, ScheduledItem};

fn at_time(day: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid sample time");
    day.date_naive()
        .and_time(time)
        .and_utc()
}

/// The demo shooting schedule: three items today, one tomorrow, one later in
/// the week.
pub fn schedule_items(now: DateTime<Utc>) -> Vec<ScheduledItem> {
    let today = now;
    let tomorrow = now + Duration::days(1);
    let later = now + Duration::days(4);

    let specs = [
        ("Desert Chase Scene Filming", "Al Qudra Desert", today, (10, 30), (14, 0), Priority::High, 12),
        ("Market Scene Setup", "Old Dubai Market Set", today, (8, 0), (10, 0), Priority::Medium, 8),
        ("Actor Rehearsal - Palace Scene", "Studio B", today, (15, 30), (17, 30), Priority::Medium, 5),
        ("Script Review Meeting", "Conference Room", tomorrow, (9, 0), (10, 30), Priority::Normal, 6),
        ("Final Scene Filming", "Dubai Marina", later, (11, 0), (17, 0), Priority::High, 15),
    ];

    specs
        .into_iter()
        .map(|(title, location, day, (sh, sm), (eh, em), priority, participants)| {
            ScheduledItem::new(
                title,
                location,
                at_time(day, sh, sm),
                at_time(day, eh, em),
                priority,
                participants,
            )
            .expect("sample items are well-formed")
        })
        .collect()
}

/// The demo crew roster.
pub fn crew_members() -> Vec<CrewMember> {
    let specs = [
        ("Ahmad", "First Assistant Director", CrewStatus::Active),
        ("Mohammed", "Production Manager", CrewStatus::Active),
        ("Remas", "Lead Actor", CrewStatus::Active),
        ("Dana", "Supporting Actor", CrewStatus::Active),
        ("Hager", "Scene Director", CrewStatus::Active),
        ("Layla Hassan", "Script Supervisor", CrewStatus::OnLeave),
    ];
    specs
        .into_iter()
        .map(|(name, role, status)| {
            let mut member = CrewMember::new(name, role);
            member.status = status;
            member
        })
        .collect()
}

/// The demo script list.
pub fn scripts(now: DateTime<Utc>) -> Vec<Script> {
    let specs = [
        ("Desert Chase Scene", "Scene 12", "Ahmed Al-Farsi", ScriptStatus::Approved, 2),
        ("Market Conversation", "Scene 15", "Layla Hassan", ScriptStatus::InReview, 5),
        ("Palace Interior", "Scene 8", "Malik Ibrahim", ScriptStatus::NeedsRevisions, 24),
        ("Final Confrontation", "Scene 24", "Sarah Al-Mansour", ScriptStatus::Draft, 72),
    ];
    specs
        .into_iter()
        .map(|(title, scene_number, assigned_to, status, hours_ago)| {
            let mut script = Script::new(title, scene_number, assigned_to);
            script.status = status;
            script.updated_at = now - Duration::hours(hours_ago);
            script
        })
        .collect()
}

/// The production board the scripted assistant answers from.
pub fn production_board() -> ProductionBoard {
    ProductionBoard {
        scenes: vec![
            SceneCard {
                name: "Desert Chase Scene".into(),
                location: "Al Qudra Desert".into(),
                time: "10:30 AM".into(),
                status: "In Progress".into(),
                responsible: "Ahmad".into(),
                actors: vec!["Remas".into(), "Ahmad".into()],
            },
            SceneCard {
                name: "Market Scene".into(),
                location: "Old Dubai Market Set".into(),
                time: "2:00 PM".into(),
                status: "Pending".into(),
                responsible: "Mohammed".into(),
                actors: vec!["Dana".into(), "Mohammed".into()],
            },
            SceneCard {
                name: "Palace Interior".into(),
                location: "Studio B".into(),
                time: "3:30 PM".into(),
                status: "Pending".into(),
                responsible: "Hager".into(),
                actors: vec!["Hager".into()],
            },
        ],
        actors: vec![
            ActorAssignment {
                name: "Remas".into(),
                current_scene: "Desert Chase Scene".into(),
                next_scene: "Market Scene".into(),
                schedule: "10:30 AM".into(),
            },
            ActorAssignment {
                name: "Dana".into(),
                current_scene: "Market Scene".into(),
                next_scene: "Palace Interior".into(),
                schedule: "2:00 PM".into(),
            },
            ActorAssignment {
                name: "Hager".into(),
                current_scene: "Palace Interior".into(),
                next_scene: "Final Scene".into(),
                schedule: "3:30 PM".into(),
            },
            ActorAssignment {
                name: "Ahmad".into(),
                current_scene: "Desert Chase Scene".into(),
                next_scene: "Market Scene".into(),
                schedule: "10:30 AM".into(),
            },
            ActorAssignment {
                name: "Mohammed".into(),
                current_scene: "Market Scene".into(),
                next_scene: "Final Scene".into(),
                schedule: "2:00 PM".into(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{bucket_for, DayBucket};
    use chrono::TimeZone;

    #[test]
    fn sample_schedule_spans_today_tomorrow_and_week() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 7, 0, 0).unwrap();
        let items = schedule_items(now);
        assert_eq!(items.len(), 5);

        let buckets: Vec<_> = items.iter().map(|i| bucket_for(i, now)).collect();
        assert_eq!(buckets.iter().filter(|b| **b == DayBucket::Today).count(), 3);
        assert_eq!(buckets.iter().filter(|b| **b == DayBucket::Tomorrow).count(), 1);
        assert_eq!(buckets.iter().filter(|b| **b == DayBucket::ThisWeek).count(), 1);
    }

    #[test]
    fn sample_rows_are_well_formed() {
        let now = Utc::now();
        for item in schedule_items(now) {
            assert!(item.starts_at <= item.ends_at);
        }
        assert!(!crew_members().is_empty());
        assert!(!scripts(now).is_empty());
        assert_eq!(production_board().scenes.len(), 3);
    }
}
