use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub const SCHEME_WEEK: &str = "week";
pub const SCHEME_MONTH_WEEK: &str = "monthWeek";

/// How entries are keyed and labelled for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeriodScheme {
    #[default]
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "monthWeek")]
    MonthWeek,
}

impl PeriodScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodScheme::Week => SCHEME_WEEK,
            PeriodScheme::MonthWeek => SCHEME_MONTH_WEEK,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "week" => Some(PeriodScheme::Week),
            "monthweek" | "month_week" | "month-week" => Some(PeriodScheme::MonthWeek),
            _ => None,
        }
    }

    pub fn first_period(self) -> Period {
        match self {
            PeriodScheme::Week => Period::Week { week: 1 },
            PeriodScheme::MonthWeek => Period::MonthWeek { month: 1, week: 1 },
        }
    }
}

/// Sort key of an entry. Derived ordering compares month before week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Week { week: u32 },
    MonthWeek { month: u32, week: u32 },
}

impl Period {
    pub fn scheme(self) -> PeriodScheme {
        match self {
            Period::Week { .. } => PeriodScheme::Week,
            Period::MonthWeek { .. } => PeriodScheme::MonthWeek,
        }
    }

    pub fn week(self) -> u32 {
        match self {
            Period::Week { week } | Period::MonthWeek { week, .. } => week,
        }
    }

    pub fn month(self) -> Option<u32> {
        match self {
            Period::Week { .. } => None,
            Period::MonthWeek { month, .. } => Some(month),
        }
    }

    pub fn is_valid(self) -> bool {
        match self {
            Period::Week { week } => week >= 1,
            Period::MonthWeek { month, week } => week >= 1 && (1..=12).contains(&month),
        }
    }

    /// Default period for the entry after this one: same month, next week.
    pub fn next(self) -> Period {
        match self {
            Period::Week { week } => Period::Week {
                week: week.saturating_add(1),
            },
            Period::MonthWeek { month, week } => Period::MonthWeek {
                month,
                week: week.saturating_add(1),
            },
        }
    }

    pub fn label(self) -> String {
        match self {
            Period::Week { week } => format!("{}주차", week),
            Period::MonthWeek { month, week } => format!("{}월 {}주차", month, week),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyEntry {
    pub period: Period,
    pub subject: String,
    pub chapter: String,
    pub details: String,
}

impl WeeklyEntry {
    pub fn new(
        period: Period,
        subject: impl Into<String>,
        chapter: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            period,
            subject: subject.into(),
            chapter: chapter.into(),
            details: details.into(),
        }
    }
}

/// The entry currently being filled in by the user. Subject and chapter may
/// be empty here; `add_entry` refuses them later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub period: Period,
    pub subject: String,
    pub chapter: String,
    pub details: String,
}

impl EntryDraft {
    fn starting_at(period: Period) -> Self {
        Self {
            period,
            subject: String::new(),
            chapter: String::new(),
            details: String::new(),
        }
    }

    pub fn to_entry(&self) -> WeeklyEntry {
        WeeklyEntry::new(
            self.period,
            self.subject.clone(),
            self.chapter.clone(),
            self.details.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPlan {
    id: String,
    name: String,
    entries: Vec<WeeklyEntry>,
}

impl ClassPlan {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in display order (ascending period, insertion order on ties).
    pub fn entries(&self) -> &[WeeklyEntry] {
        &self.entries
    }

    fn insert_sorted(&mut self, entry: WeeklyEntry) {
        self.entries.push(entry);
        // Vec::sort_by_key is stable, so equal periods keep insertion order.
        self.entries.sort_by_key(|e| e.period);
    }
}

/// In-memory state for one planning session: classes, the selected class
/// and the pending entry draft.
///
/// Every mutation that fails its gate is a no-op and reports so through its
/// return value; nothing here raises an error.
#[derive(Debug, Clone)]
pub struct PlanStore {
    scheme: PeriodScheme,
    catalog: Catalog,
    classes: Vec<ClassPlan>,
    selected: Option<String>,
    draft: EntryDraft,
    issued_ids: HashSet<String>,
}

impl PlanStore {
    pub fn new(scheme: PeriodScheme, catalog: Catalog) -> Self {
        Self {
            scheme,
            catalog,
            classes: Vec::new(),
            selected: None,
            draft: EntryDraft::starting_at(scheme.first_period()),
            issued_ids: HashSet::new(),
        }
    }

    pub fn scheme(&self) -> PeriodScheme {
        self.scheme
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classes in creation order.
    pub fn classes(&self) -> &[ClassPlan] {
        &self.classes
    }

    pub fn class(&self, id: &str) -> Option<&ClassPlan> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected class, or `None` when nothing is selected or the
    /// selection does not point at a live class.
    pub fn selected_class(&self) -> Option<&ClassPlan> {
        self.selected.as_deref().and_then(|id| self.class(id))
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Creates an empty class and selects it. Returns the new id, or `None`
    /// when the name is blank.
    pub fn create_class(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("create_class ignored: blank name");
            return None;
        }
        let id = self.fresh_id();
        self.classes.push(ClassPlan {
            id: id.clone(),
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.selected = Some(id.clone());
        tracing::debug!(class_id = %id, name, "class created");
        Some(id)
    }

    pub fn select_class(&mut self, id: &str) {
        if self.class(id).is_none() {
            tracing::debug!(class_id = id, "selected id does not resolve to a class");
        }
        self.selected = Some(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn remove_class(&mut self, id: &str) -> bool {
        let Some(pos) = self.classes.iter().position(|c| c.id == id) else {
            tracing::debug!(class_id = id, "remove_class ignored: unknown class");
            return false;
        };
        self.classes.remove(pos);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        tracing::debug!(class_id = id, "class removed");
        true
    }

    fn entry_gate(&self, class_id: &str, entry: &WeeklyEntry) -> Result<usize, &'static str> {
        let Some(selected) = self.selected.as_deref() else {
            return Err("no class selected");
        };
        if selected != class_id {
            return Err("class is not the selected class");
        }
        let Some(pos) = self.classes.iter().position(|c| c.id == class_id) else {
            return Err("unknown class");
        };
        if entry.subject.is_empty() {
            return Err("subject is empty");
        }
        if entry.chapter.is_empty() {
            return Err("chapter is empty");
        }
        if !self.catalog.contains(&entry.subject, &entry.chapter) {
            return Err("chapter is not listed under subject");
        }
        if entry.period.scheme() != self.scheme {
            return Err("period does not match the active scheme");
        }
        if !entry.period.is_valid() {
            return Err("period is out of range");
        }
        Ok(pos)
    }

    /// Adds an entry to the selected class and re-sorts it. On success the
    /// draft advances to the following week with subject, chapter and
    /// details cleared.
    pub fn add_entry(&mut self, class_id: &str, entry: WeeklyEntry) -> bool {
        let entry = WeeklyEntry {
            period: entry.period,
            subject: entry.subject.trim().to_string(),
            chapter: entry.chapter.trim().to_string(),
            details: entry.details,
        };
        let pos = match self.entry_gate(class_id, &entry) {
            Ok(pos) => pos,
            Err(reason) => {
                tracing::debug!(class_id, reason, "add_entry ignored");
                return false;
            }
        };
        let next = entry.period.next();
        tracing::debug!(class_id, period = %entry.period.label(), "entry added");
        self.classes[pos].insert_sorted(entry);
        self.draft = EntryDraft::starting_at(next);
        true
    }

    /// Removes the entry at `index` of the class's sorted order.
    pub fn remove_entry(&mut self, class_id: &str, index: usize) -> Option<WeeklyEntry> {
        let Some(class) = self.classes.iter_mut().find(|c| c.id == class_id) else {
            tracing::debug!(class_id, "remove_entry ignored: unknown class");
            return None;
        };
        if index >= class.entries.len() {
            tracing::debug!(class_id, index, "remove_entry ignored: index out of bounds");
            return None;
        }
        Some(class.entries.remove(index))
    }

    /// Replaces the draft period. Periods from the other scheme or out of
    /// range are refused.
    pub fn set_draft_period(&mut self, period: Period) -> bool {
        if period.scheme() != self.scheme || !period.is_valid() {
            return false;
        }
        self.draft.period = period;
        true
    }

    /// Sets the draft subject. The chapter is always cleared, even when the
    /// subject did not change.
    pub fn set_draft_subject(&mut self, subject: &str) {
        self.draft.subject = subject.trim().to_string();
        self.draft.chapter.clear();
    }

    pub fn set_draft_chapter(&mut self, chapter: &str) {
        self.draft.chapter = chapter.trim().to_string();
    }

    pub fn set_draft_details(&mut self, details: &str) {
        self.draft.details = details.to_string();
    }

    pub fn commit_draft(&mut self, class_id: &str) -> bool {
        let entry = self.draft.to_entry();
        self.add_entry(class_id, entry)
    }
}
