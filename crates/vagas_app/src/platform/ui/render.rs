use std::collections::HashMap;
use std::fmt::Write as _;

use vagas_core::{
    AppViewModel, Field, JobCardView, JobId, ResultState, SortDirection, SortField, Theme,
    ViewMode, VisitedStore, WorkMode,
};

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const NO_MORE_CARDS: &str = "-- no more jobs --";

struct Palette {
    title: &'static str,
    accent: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                title: "\x1b[1;97m",
                accent: "\x1b[36m",
            },
            Theme::Light => Self {
                title: "\x1b[1;30m",
                accent: "\x1b[34m",
            },
        }
    }
}

/// Text for one `RenderPage` effect. A fresh page starts with the header.
pub fn render_page(
    view: &AppViewModel,
    job_ids: &[JobId],
    append: bool,
    visited: &impl VisitedStore,
) -> String {
    let palette = Palette::for_theme(view.preferences.theme);
    let mut out = String::new();
    if !append {
        out.push_str(&render_status(view));
        if view.result_state == ResultState::Empty {
            out.push_str("No jobs match the current filters.\n");
        }
    }

    let cards: HashMap<JobId, &JobCardView> =
        view.cards.iter().map(|card| (card.job_id, card)).collect();
    for card in job_ids.iter().filter_map(|id| cards.get(id)) {
        render_any(&mut out, view, card, visited, &palette);
    }

    if !view.has_more && !view.cards.is_empty() {
        let _ = writeln!(out, "{DIM}{NO_MORE_CARDS}{RESET}");
    }
    out
}

/// A shown card drawn again with its current visited marker. Empty when the
/// card is not part of the view.
pub fn render_redraw(view: &AppViewModel, job_id: JobId, visited: &impl VisitedStore) -> String {
    let palette = Palette::for_theme(view.preferences.theme);
    let mut out = String::new();
    if let Some(card) = view.cards.iter().find(|card| card.job_id == job_id) {
        render_any(&mut out, view, card, visited, &palette);
    }
    out
}

/// One-line summary of what is loaded and which filters apply.
pub fn render_status(view: &AppViewModel) -> String {
    let mut out = String::new();
    match &view.result_state {
        ResultState::Idle => out.push_str("Nothing loaded yet."),
        ResultState::Loading => out.push_str("Loading jobs..."),
        ResultState::Failed(message) => {
            let _ = write!(out, "Could not load jobs: {message}. Type `reload` to try again");
        }
        ResultState::Empty | ResultState::Ready => {
            let _ = write!(out, "{} of {} jobs", view.filtered_count, view.total_count);
            if let Some(updated) = &view.last_modified {
                let _ = write!(out, " | updated {updated}");
            }
            if view.skipped_records > 0 {
                let _ = write!(out, " | {} invalid records skipped", view.skipped_records);
            }
        }
    }

    if view.search_input != view.committed_query {
        let _ = write!(out, " | search: {:?} (typing)", view.search_input);
    } else if !view.committed_query.is_empty() {
        let _ = write!(out, " | search: {:?}", view.committed_query);
    }
    let _ = write!(out, " | quick: {}", view.quick_filter.as_str());
    if let Some(period) = view.date_period {
        let _ = write!(out, " | last {} days", period.days());
    }
    for filter in view.active_filters() {
        let _ = write!(out, " | {}: {}", filter.field, filter.selected.join(", "));
    }
    let _ = writeln!(
        out,
        " | sort: {} {} | theme: {}",
        sort_field_name(view.sort.field),
        sort_direction_name(view.sort.direction),
        view.preferences.theme.as_str()
    );
    out
}

/// Values of one filter field with their job counts; accepted values are checked.
pub fn render_options(view: &AppViewModel, field: &Field) -> String {
    let Some(filter) = view.filters.iter().find(|filter| &filter.field == field) else {
        return format!("`{field}` is not a filter field.\n");
    };
    if filter.entries.is_empty() {
        return format!("No values for `{field}`.\n");
    }
    let mut out = String::new();
    for entry in &filter.entries {
        let mark = if filter.selected.contains(&entry.value) { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {} ({})", entry.value, entry.count);
    }
    out
}

pub fn render_opened(job_id: JobId, url: &str) -> String {
    format!("Job {job_id}: {url}\n")
}

pub fn help() -> &'static str {
    "\
Commands:
  search <text>              search title, company, level, category, type and location
  quick <all|remote|onsite|hybrid|affirmative>
  period <1|7|30|90|all>     only jobs posted in the last N days
  select <field> <a|b|...>   accept only these values (no values clears the field)
  selectall <field>          accept every value of a field
  options <field>            list the values of a filter field
  clear                      reset quick filter, period and field filters
  sort <date|company|title> [asc|desc]
  more                       show the next page
  open <id>                  open a job and mark it visited
  theme                      toggle dark/light
  view <cards|compact>
  reload                     fetch the job list again
  quit
"
}

fn render_any(
    out: &mut String,
    view: &AppViewModel,
    card: &JobCardView,
    visited: &impl VisitedStore,
    palette: &Palette,
) {
    let seen = visited.is_visited(card.job_id);
    match view.preferences.view_mode {
        ViewMode::Cards => render_card(out, card, seen, palette),
        ViewMode::Compact => render_compact(out, card, seen, palette),
    }
}

fn render_card(out: &mut String, card: &JobCardView, seen: bool, palette: &Palette) {
    let title_style = if seen { DIM } else { palette.title };
    let _ = writeln!(
        out,
        "#{} {title_style}{}{RESET} {}{}",
        card.job_id,
        card.title,
        work_mode_marker(card.work_mode),
        if seen { " (visited)" } else { "" },
    );
    let _ = writeln!(
        out,
        "   {}{}{RESET} ({})",
        palette.accent, card.company, card.company_type
    );
    let _ = writeln!(out, "   {} | {} | {}", card.level, card.category, card.location);
    let _ = writeln!(out, "   {}", card.date);
    out.push('\n');
}

fn render_compact(out: &mut String, card: &JobCardView, seen: bool, palette: &Palette) {
    let title_style = if seen { DIM } else { palette.title };
    let _ = writeln!(
        out,
        "#{:<5} {} {} {title_style}{}{RESET} - {} ({})",
        card.job_id,
        card.date,
        work_mode_marker(card.work_mode),
        card.title,
        card.company,
        card.location,
    );
}

fn work_mode_marker(mode: WorkMode) -> &'static str {
    match mode {
        WorkMode::Remote => "[remote]",
        WorkMode::Onsite => "[onsite]",
        WorkMode::Hybrid => "[hybrid]",
        WorkMode::Unknown => "[?]",
    }
}

fn sort_field_name(field: SortField) -> &'static str {
    match field {
        SortField::Date => "date",
        SortField::Company => "company",
        SortField::Title => "title",
    }
}

fn sort_direction_name(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}
