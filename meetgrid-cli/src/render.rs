//! TUI rendering for meetgrid types.
//!
//! Extension traits that add colored terminal output to meetgrid-core
//! types using owo_colors.

use chrono::NaiveDateTime;
use meetgrid_core::{Category, CategoryCounts, LayoutBlock, Meeting};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let label = self.label();
        match self {
            Category::Pending => label.yellow().to_string(),
            Category::Upcoming => label.cyan().to_string(),
            Category::Ongoing => label.green().to_string(),
            Category::Completed => label.dimmed().to_string(),
            Category::Cancelled => label.red().to_string(),
        }
    }
}

impl Render for CategoryCounts {
    /// Badge line, e.g. "pending 2  upcoming 1  ongoing 0 ..."
    fn render(&self) -> String {
        Category::ALL
            .iter()
            .map(|c| format!("{} {}", c.render(), self.get(*c).bold()))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl Render for Meeting {
    fn render(&self) -> String {
        let marker = if self.is_initiator {
            "*".bold().to_string()
        } else {
            " ".to_string()
        };

        format!(
            "{} {} {}",
            format_range(self.start_at, self.end_at),
            marker,
            self.title
        )
    }
}

/// Render a layout block next to the meeting it places.
pub fn render_block(block: &LayoutBlock, meeting: Option<&Meeting>) -> String {
    let title = meeting.map(|m| m.title.as_str()).unwrap_or(&block.meeting_id);
    let range = meeting
        .map(|m| format_range(m.start_at, m.end_at))
        .unwrap_or_default();
    let column = format!("[{}/{}]", block.column_index + 1, block.cluster_size);
    let geometry = format!(
        "left {:>5.1}% width {:>5.1}%  row {:02}:00 +{:.0}px h {:.0}px",
        block.left_pct, block.column_width_pct, block.hour_slot, block.top_offset, block.height
    );

    format!("{} {} {}  {}", range, column.cyan(), title, geometry.dimmed())
}

/// "09:00-09:30", with "??:??" for unknown times.
fn format_range(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> String {
    format!("{}-{}", format_time(start), format_time(end))
}

fn format_time(time: Option<NaiveDateTime>) -> String {
    match time {
        Some(t) => t.format("%H:%M").to_string(),
        None => "??:??".to_string(),
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
