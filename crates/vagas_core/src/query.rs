use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, normalize_opt, TextCollator};
use crate::{Field, Job};

/// Named single-predicate shortcuts shown above the result list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    #[default]
    All,
    Remote,
    Onsite,
    Hybrid,
    Affirmative,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 5] = [
        QuickFilter::All,
        QuickFilter::Remote,
        QuickFilter::Onsite,
        QuickFilter::Hybrid,
        QuickFilter::Affirmative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuickFilter::All => "all",
            QuickFilter::Remote => "remote",
            QuickFilter::Onsite => "onsite",
            QuickFilter::Hybrid => "hybrid",
            QuickFilter::Affirmative => "affirmative",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|quick| quick.as_str() == name)
    }
}

/// Bucketed "posted within the last N days" window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePeriod {
    Day,
    Week,
    Month,
    Quarter,
}

impl DatePeriod {
    pub fn days(self) -> i64 {
        match self {
            DatePeriod::Day => 1,
            DatePeriod::Week => 7,
            DatePeriod::Month => 30,
            DatePeriod::Quarter => 90,
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        [
            DatePeriod::Day,
            DatePeriod::Week,
            DatePeriod::Month,
            DatePeriod::Quarter,
        ]
        .into_iter()
        .find(|period| period.days() == days)
    }

    /// Whole-day age `today - date` is at most the window. Missing dates never match.
    pub fn contains(self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        date.is_some_and(|date| (today - date).num_days() <= self.days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Company,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sort column and direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// `field == equals` test used by the quick-filter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPredicate {
    pub field: Field,
    pub equals: String,
}

impl FieldPredicate {
    pub fn new(field: Field, equals: impl Into<String>) -> Self {
        Self {
            field,
            equals: equals.into(),
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        job.field(&self.field) == Some(self.equals.as_str())
    }
}

/// Caller-supplied mapping from quick filter to predicates.
///
/// A job passes a quick filter when any of its predicates matches. `All` is
/// always a no-op; any other quick filter without predicates matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuickFilterTable(BTreeMap<QuickFilter, Vec<FieldPredicate>>);

impl Default for QuickFilterTable {
    fn default() -> Self {
        Self::empty()
            .with(QuickFilter::Remote, FieldPredicate::new(Field::Remote, "01 - Sim"))
            .with(QuickFilter::Onsite, FieldPredicate::new(Field::Remote, "02 - Não"))
            .with(QuickFilter::Hybrid, FieldPredicate::new(Field::Remote, "03 - Híbrido"))
            .with(
                QuickFilter::Affirmative,
                FieldPredicate::new(Field::Affirmative, "01 - Sim"),
            )
    }
}

impl QuickFilterTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds a predicate to `quick`.
    pub fn with(mut self, quick: QuickFilter, predicate: FieldPredicate) -> Self {
        self.0.entry(quick).or_default().push(predicate);
        self
    }

    /// Replaces every predicate of `quick`.
    pub fn replace(mut self, quick: QuickFilter, predicates: Vec<FieldPredicate>) -> Self {
        self.0.insert(quick, predicates);
        self
    }

    pub fn predicates(&self, quick: QuickFilter) -> &[FieldPredicate] {
        self.0.get(&quick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn matches(&self, quick: QuickFilter, job: &Job) -> bool {
        if quick == QuickFilter::All {
            return true;
        }
        self.predicates(quick)
            .iter()
            .any(|predicate| predicate.matches(job))
    }
}

/// Everything the user can constrain or reorder the list by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub query: String,
    pub quick_filter: QuickFilter,
    pub date_period: Option<DatePeriod>,
    /// Accepted values per field. An empty or absent set leaves the field unconstrained.
    pub selections: BTreeMap<Field, BTreeSet<String>>,
    pub sort: SortKey,
}

impl FilterSpec {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_quick_filter(mut self, quick: QuickFilter) -> Self {
        self.quick_filter = quick;
        self
    }

    pub fn with_date_period(mut self, period: Option<DatePeriod>) -> Self {
        self.date_period = period;
        self
    }

    pub fn with_selection<I, S>(mut self, field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.selections.remove(&field);
        } else {
            self.selections.insert(field, values);
        }
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Drops field selections, the quick filter and the date window. Search text and
    /// sort order are kept.
    pub fn cleared(self) -> Self {
        Self {
            query: self.query,
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Same sort, no constraints. Re-applying it to a result list keeps that list as is.
    pub fn unconstrained(&self) -> Self {
        Self::default().with_sort(self.sort)
    }

    pub fn active_selections(&self) -> impl Iterator<Item = (&Field, &BTreeSet<String>)> {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
    }
}

/// Pure filter/sort pipeline over an immutable job list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryEngine {
    quick_filters: QuickFilterTable,
}

impl QueryEngine {
    pub fn new(quick_filters: QuickFilterTable) -> Self {
        Self { quick_filters }
    }

    pub fn quick_filters(&self) -> &QuickFilterTable {
        &self.quick_filters
    }

    pub fn apply<'a>(&self, jobs: &'a [Job], spec: &FilterSpec, today: NaiveDate) -> Vec<&'a Job> {
        self.apply_indices(jobs, spec, today)
            .into_iter()
            .map(|index| &jobs[index])
            .collect()
    }

    /// Positions into `jobs` of the matching records, in result order.
    ///
    /// Stages run as search, quick filter, date window, field selections, sort.
    pub fn apply_indices(&self, jobs: &[Job], spec: &FilterSpec, today: NaiveDate) -> Vec<usize> {
        let mut hits: Vec<usize> = (0..jobs.len()).collect();

        let query = normalize(spec.query.trim());
        if !query.is_empty() {
            hits.retain(|&index| search_text(&jobs[index]).contains(&query));
        }

        if spec.quick_filter != QuickFilter::All {
            hits.retain(|&index| self.quick_filters.matches(spec.quick_filter, &jobs[index]));
        }

        if let Some(period) = spec.date_period {
            hits.retain(|&index| period.contains(jobs[index].inserted_on(), today));
        }

        for (field, accepted) in spec.active_selections() {
            hits.retain(|&index| {
                jobs[index]
                    .field(field)
                    .is_some_and(|value| accepted.contains(value))
            });
        }

        let mut collator = TextCollator::case_insensitive();
        hits.sort_by(|&a, &b| {
            let ordering = compare_by(&mut collator, &jobs[a], &jobs[b], spec.sort.field);
            match spec.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        hits
    }
}

fn search_text(job: &Job) -> String {
    Field::SEARCHABLE
        .iter()
        .map(|field| normalize_opt(job.field(field)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn compare_by(collator: &mut TextCollator, a: &Job, b: &Job, field: SortField) -> Ordering {
    match field {
        // `None` orders before every date.
        SortField::Date => a.inserted_on().cmp(&b.inserted_on()),
        SortField::Company => collator.compare(
            a.company.as_deref().unwrap_or_default(),
            b.company.as_deref().unwrap_or_default(),
        ),
        SortField::Title => collator.compare(
            a.title.as_deref().unwrap_or_default(),
            b.title.as_deref().unwrap_or_default(),
        ),
    }
}
