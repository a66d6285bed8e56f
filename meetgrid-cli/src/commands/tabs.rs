use anyhow::Result;
use chrono::NaiveDateTime;
use meetgrid_core::{classify, primary_category, Category, CategoryCounts, Classification, Meeting};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;

use super::Context;
use crate::render::{pluralize, Render};
use crate::snapshot::SnapshotProvider;

#[derive(Serialize)]
struct TabsOutput<'a> {
    now: NaiveDateTime,
    counts: CategoryCounts,
    #[serde(flatten)]
    tabs: Classification<'a>,
}

pub fn run(ctx: Context, tab: Option<Category>, json: bool) -> Result<()> {
    let meetings = ctx.provider().fetch_meetings(&ctx.event_id, &ctx.viewer_id)?;
    let now = ctx.clock.now();

    if json {
        let value = tabs_json(&meetings, now, tab)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let classification = classify(&meetings, now);
    println!("{}", classification.counts().render());
    println!();

    match tab {
        Some(category) => print_tab(category, classification.get(category)),
        None => {
            for (category, listed) in group_by_primary(&meetings, now) {
                print_tab(category, &listed);
            }
        }
    }

    Ok(())
}

/// JSON document for `--json`: one tab's meetings, or counts plus every tab.
fn tabs_json(meetings: &[Meeting], now: NaiveDateTime, tab: Option<Category>) -> serde_json::Result<Value> {
    let classification = classify(meetings, now);

    match tab {
        Some(category) => serde_json::to_value(classification.get(category)),
        None => serde_json::to_value(TabsOutput {
            now,
            counts: classification.counts(),
            tabs: classification,
        }),
    }
}

/// Non-empty tabs in tab order, each meeting under its primary category only.
fn group_by_primary(meetings: &[Meeting], now: NaiveDateTime) -> Vec<(Category, Vec<&Meeting>)> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let listed: Vec<&Meeting> = meetings
                .iter()
                .filter(|m| primary_category(m, now) == Some(category))
                .collect();
            (category, listed)
        })
        .filter(|(_, listed)| !listed.is_empty())
        .collect()
}

fn print_tab(category: Category, meetings: &[&Meeting]) {
    let label = format!("({} {})", meetings.len(), pluralize("meeting", meetings.len()));
    println!("{} {}", category.render().bold(), label.dimmed());

    if meetings.is_empty() {
        println!("   {}", "Nothing here".dimmed());
    }

    for m in meetings {
        println!("   {}", m.render());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn snapshot() -> Vec<Meeting> {
        vec![
            Meeting::new("done", "Breakfast").with_times(at(8, 0), at(8, 30)).approved(true),
            Meeting::new("live", "Booth tour").with_times(at(9, 0), at(10, 0)).approved(true),
            Meeting::new("later", "Lunch").with_times(at(12, 0), at(13, 0)).approved(true),
            Meeting::new("asked", "Intro").with_times(at(14, 0), at(14, 30)),
            Meeting::new("off", "Panel")
                .with_times(at(15, 0), at(16, 0))
                .approved(true)
                .cancelled(true),
        ]
    }

    fn ids(meetings: &[&Meeting]) -> Vec<String> {
        meetings.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_group_by_primary_lists_each_meeting_once_in_tab_order() {
        let meetings = snapshot();
        let groups = group_by_primary(&meetings, at(9, 30));

        let tabs: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            tabs,
            vec![
                Category::Pending,
                Category::Upcoming,
                Category::Ongoing,
                Category::Completed,
                Category::Cancelled,
            ]
        );

        let listed: usize = groups.iter().map(|(_, ms)| ms.len()).sum();
        assert_eq!(listed, meetings.len());
        assert_eq!(ids(&groups[2].1), vec!["live"]);
    }

    #[test]
    fn test_group_by_primary_puts_contradictory_flags_under_ongoing_only() {
        let meetings = vec![Meeting::new("odd", "Sync")
            .with_times(at(9, 0), at(10, 0))
            .approved(true)
            .with_hint("pending")];

        let groups = group_by_primary(&meetings, at(9, 30));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, Category::Ongoing);
        assert_eq!(ids(&groups[0].1), vec!["odd"]);
    }

    #[test]
    fn test_group_by_primary_skips_empty_tabs() {
        let meetings = snapshot();
        let groups = group_by_primary(&meetings[..1], at(9, 30));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, Category::Completed);
        assert!(group_by_primary(&[], at(9, 30)).is_empty());
    }

    #[test]
    fn test_tabs_json_full_document_has_counts_and_every_tab() {
        let meetings = snapshot();
        let value = tabs_json(&meetings, at(9, 30), None).unwrap();

        assert_eq!(value["now"], "2025-03-20T09:30:00");
        assert_eq!(value["counts"]["ongoing"], 1);
        assert_eq!(value["counts"]["cancelled"], 1);
        for category in Category::ALL {
            assert!(value[category.label()].is_array(), "missing {category}");
        }
        assert_eq!(value["upcoming"][0]["id"], "later");
    }

    #[test]
    fn test_tabs_json_single_tab_is_bare_array() {
        let meetings = snapshot();
        let value = tabs_json(&meetings, at(9, 30), Some(Category::Pending)).unwrap();

        let listed = value.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], "asked");
    }
}
