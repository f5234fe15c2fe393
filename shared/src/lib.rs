use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user resolved from an OAuth session (provider + provider ID)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// Auth provider: "github", "google", etc.
    pub provider: String,
    pub provider_id: String,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub updated_at: String,
}

/// Lifecycle status of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
    Paused,
    Cancelled,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 5] = [
        GoalStatus::NotStarted,
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::Paused,
        GoalStatus::Cancelled,
    ];

    /// Display label, e.g. "In Progress"
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "Not Started",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::Paused => "Paused",
            GoalStatus::Cancelled => "Cancelled",
        }
    }

    /// Wire value, e.g. "IN_PROGRESS"
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "NOT_STARTED",
            GoalStatus::InProgress => "IN_PROGRESS",
            GoalStatus::Completed => "COMPLETED",
            GoalStatus::Paused => "PAUSED",
            GoalStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(value: &str) -> Option<GoalStatus> {
        GoalStatus::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

/// A long-term objective with a date range, owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    /// 1-100 characters
    pub title: String,
    /// Up to 500 characters
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Single glyph, e.g. "🎯"
    pub emoji: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub start_date: String,
    pub end_date: String,
    pub status: GoalStatus,
    pub user_id: i64,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub emoji: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub status: Option<GoalStatus>,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub emoji: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<GoalStatus>,
}

/// A recurring weekly activity tied to a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Hex color from the habit palette
    pub color: String,
    /// Comma-joined day codes, e.g. "Mon, Wed, Fri"
    pub days_of_week: String,
    pub start_date: String,
    pub end_date: String,
    /// Server-maintained streak counter
    pub streak_status: i32,
    pub goal_id: i64,
    pub goal_title: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequest {
    pub name: String,
    pub description: String,
    pub days_of_week: String,
    pub start_date: String,
    pub end_date: String,
    pub color: String,
    pub goal_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub days_of_week: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub streak_status: Option<i32>,
    pub color: Option<String>,
}

/// A single-day occurrence of a habit, completable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    /// ISO date (YYYY-MM-DD) of the day this task is scheduled on
    pub date: String,
    pub habit_id: i64,
    pub habit_name: String,
    /// Inherited from the parent habit for display
    pub color: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    pub date: String,
    pub habit_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub completed: Option<bool>,
    pub date: Option<String>,
}

/// A progress note attached to a goal, displayed newest-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub goal_id: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub content: String,
    pub goal_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub content: String,
}

/// One habit suggested by the AI recommendation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiHabitSuggestion {
    pub name: String,
    pub description: String,
    pub days_of_week: Vec<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendationResponse {
    pub reasoning: String,
    pub habits: Vec<AiHabitSuggestion>,
}

/// A suggestion plus the user's accept/deny choice. New candidates start accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct AiHabitCandidate {
    pub suggestion: AiHabitSuggestion,
    pub accepted: bool,
}

impl From<AiHabitSuggestion> for AiHabitCandidate {
    fn from(suggestion: AiHabitSuggestion) -> Self {
        AiHabitCandidate {
            suggestion,
            accepted: true,
        }
    }
}

/// Fixed habit color palette, cycled by creation order when auto-assigned
pub const HABIT_COLORS: [&str; 7] = [
    "#3B82F6", // Blue
    "#8B5CF6", // Purple
    "#10B981", // Green
    "#F59E0B", // Amber
    "#EC4899", // Pink
    "#EF4444", // Red
    "#06B6D4", // Cyan
];

pub fn color_for_index(index: usize) -> &'static str {
    HABIT_COLORS[index % HABIT_COLORS.len()]
}

/// Day codes with full names, in the order the habit form presents them
pub const DAYS_OF_WEEK: [(&str, &str); 7] = [
    ("Mon", "Monday"),
    ("Tue", "Tuesday"),
    ("Wed", "Wednesday"),
    ("Thu", "Thursday"),
    ("Fri", "Friday"),
    ("Sat", "Saturday"),
    ("Sun", "Sunday"),
];

/// Day code ("Mon".."Sun") for a calendar date
pub fn day_code_for(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

pub fn full_day_name(code: &str) -> Option<&'static str> {
    DAYS_OF_WEEK
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, full)| *full)
}

/// Split a stored "Mon, Wed, Fri" string back into day codes
pub fn split_day_codes(days_of_week: &str) -> Vec<String> {
    days_of_week
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Join day codes into the comma-joined wire format
pub fn join_day_codes(codes: &[String]) -> String {
    codes.join(", ")
}

/// Most recent Sunday at or before `d`
pub fn start_of_week(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.weekday().num_days_from_sunday() as i64)
}

/// Canonical YYYY-MM-DD key used to bucket tasks by calendar day.
/// Always derived from local calendar fields, never from UTC truncation.
pub fn date_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// The 7 days of the week beginning at `start`, Sunday..Saturday
pub fn days_in_week(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// The Sunday-to-Saturday span used for calendar display and task queries.
/// Invariant: `start` is always a Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The week containing `d`
    pub fn containing(d: NaiveDate) -> WeekWindow {
        WeekWindow {
            start: start_of_week(d),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (start + 6), inclusive
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn previous(&self) -> WeekWindow {
        WeekWindow {
            start: self.start - Duration::days(7),
        }
    }

    pub fn next(&self) -> WeekWindow {
        WeekWindow {
            start: self.start + Duration::days(7),
        }
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        days_in_week(self.start)
    }

    pub fn start_key(&self) -> String {
        date_key(self.start)
    }

    pub fn end_key(&self) -> String {
        date_key(self.end())
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        d >= self.start && d <= self.end()
    }
}

/// Group a flat task collection by date key, preserving input order per day.
/// Days with no tasks get no entry; look up misses as empty.
pub fn bucket_tasks_by_date(tasks: &[Task]) -> HashMap<String, Vec<Task>> {
    let mut buckets: HashMap<String, Vec<Task>> = HashMap::new();
    for task in tasks {
        buckets
            .entry(task.date.clone())
            .or_default()
            .push(task.clone());
    }
    buckets
}

/// Flip a task's completed flag in place, returning the pre-toggle value
/// so the caller can revert on remote failure.
pub fn apply_completion_toggle(tasks: &mut [Task], task_id: i64) -> Option<bool> {
    let task = tasks.iter_mut().find(|t| t.id == task_id)?;
    let previous = task.completed;
    task.completed = !previous;
    Some(previous)
}

/// Inverse of `apply_completion_toggle` for the rollback path
pub fn revert_completion_toggle(tasks: &mut [Task], task_id: i64, previous: bool) {
    if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
        task.completed = previous;
    }
}

pub const MAX_GOAL_TITLE_LEN: usize = 100;
pub const MAX_GOAL_DESCRIPTION_LEN: usize = 500;

/// The seven linear steps of the goal creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalWizardStep {
    Title,
    Description,
    Emoji,
    Image,
    Dates,
    AiReview,
    Review,
}

impl GoalWizardStep {
    pub const ALL: [GoalWizardStep; 7] = [
        GoalWizardStep::Title,
        GoalWizardStep::Description,
        GoalWizardStep::Emoji,
        GoalWizardStep::Image,
        GoalWizardStep::Dates,
        GoalWizardStep::AiReview,
        GoalWizardStep::Review,
    ];

    /// Zero-based position in the linear sequence
    pub fn index(&self) -> usize {
        GoalWizardStep::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Option<GoalWizardStep> {
        GoalWizardStep::ALL.get(self.index() + 1).copied()
    }

    pub fn back(&self) -> Option<GoalWizardStep> {
        self.index().checked_sub(1).map(|i| GoalWizardStep::ALL[i])
    }

    /// Steps whose payload is optional and can be skipped outright
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            GoalWizardStep::Description | GoalWizardStep::Emoji | GoalWizardStep::Image
        )
    }

    pub fn heading(&self) -> &'static str {
        match self {
            GoalWizardStep::Title => "What's your goal?",
            GoalWizardStep::Description => "Tell us more about it",
            GoalWizardStep::Emoji => "Pick an emoji",
            GoalWizardStep::Image => "Add an inspiring image",
            GoalWizardStep::Dates => "When will you work on it?",
            GoalWizardStep::AiReview => "Suggested habits",
            GoalWizardStep::Review => "Review your goal",
        }
    }
}

/// Form fields accumulated across the wizard steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub image_url: String,
    /// YYYY-MM-DD, empty until set
    pub start_date: String,
    pub end_date: String,
}

/// Lifecycle of the one-shot AI recommendation fetch on the AiReview step
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AiReviewState {
    #[default]
    NotRequested,
    Loading,
    Loaded {
        reasoning: String,
        candidates: Vec<AiHabitCandidate>,
    },
    Failed {
        message: String,
    },
    /// User explicitly opted out; suppresses re-fetch on re-entry
    Skipped,
}

impl AiReviewState {
    /// The fetch has settled one way or another and the step may be left
    pub fn is_settled(&self) -> bool {
        !matches!(self, AiReviewState::NotRequested | AiReviewState::Loading)
    }
}

/// Per-step advancement guard. Unlisted steps are always satisfied.
pub fn can_advance(step: GoalWizardStep, draft: &GoalDraft, ai: &AiReviewState) -> bool {
    match step {
        GoalWizardStep::Title => {
            let trimmed = draft.title.trim();
            !trimmed.is_empty() && trimmed.chars().count() <= MAX_GOAL_TITLE_LEN
        }
        GoalWizardStep::Dates => {
            !draft.start_date.is_empty()
                && !draft.end_date.is_empty()
                && draft.start_date <= draft.end_date
        }
        GoalWizardStep::AiReview => ai.is_settled(),
        _ => true,
    }
}

/// A habit creation queued behind the goal creation it depends on.
/// The goal id is not known until the goal call succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedHabit {
    pub name: String,
    pub description: String,
    pub days_of_week: String,
    pub color: String,
}

impl PlannedHabit {
    /// Bind the plan to the created goal, inheriting its date range
    pub fn into_request(self, goal: &Goal) -> CreateHabitRequest {
        CreateHabitRequest {
            name: self.name,
            description: self.description,
            days_of_week: self.days_of_week,
            start_date: goal.start_date.clone(),
            end_date: goal.end_date.clone(),
            color: self.color,
            goal_id: goal.id,
            user_id: goal.user_id,
        }
    }
}

/// Build the wizard submit plan: one goal creation plus one planned habit per
/// accepted AI candidate, palette colors cycled by candidate index.
pub fn plan_goal_submit(
    draft: &GoalDraft,
    ai: &AiReviewState,
    user_id: i64,
) -> (CreateGoalRequest, Vec<PlannedHabit>) {
    let non_empty = |s: &str| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_string())
    };

    let goal = CreateGoalRequest {
        title: draft.title.trim().to_string(),
        description: non_empty(&draft.description),
        image_url: non_empty(&draft.image_url),
        emoji: non_empty(&draft.emoji),
        start_date: draft.start_date.clone(),
        end_date: draft.end_date.clone(),
        status: Some(GoalStatus::NotStarted),
        user_id,
    };

    let habits = match ai {
        AiReviewState::Loaded { candidates, .. } => candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.accepted)
            .map(|(index, c)| PlannedHabit {
                name: c.suggestion.name.clone(),
                description: c.suggestion.description.clone(),
                days_of_week: join_day_codes(&c.suggestion.days_of_week),
                color: color_for_index(index).to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    (goal, habits)
}

/// Validation failures for the standalone habit creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitFormError {
    EmptyName,
    EmptyDescription,
    MissingGoal,
    NoDaysSelected,
    MissingStartDate,
    MissingEndDate,
    EndNotAfterStart,
}

impl HabitFormError {
    pub fn message(&self) -> &'static str {
        match self {
            HabitFormError::EmptyName => "Name is required",
            HabitFormError::EmptyDescription => "Description is required",
            HabitFormError::MissingGoal => "Goal is required",
            HabitFormError::NoDaysSelected => "Select at least one day",
            HabitFormError::MissingStartDate => "Start date is required",
            HabitFormError::MissingEndDate => "End date is required",
            HabitFormError::EndNotAfterStart => "End date must be after start date",
        }
    }
}

/// Gate before the habit form may submit. Empty result means valid.
pub fn validate_habit_form(
    name: &str,
    description: &str,
    goal_id: Option<i64>,
    selected_days: &[String],
    start_date: &str,
    end_date: &str,
) -> Vec<HabitFormError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(HabitFormError::EmptyName);
    }
    if description.trim().is_empty() {
        errors.push(HabitFormError::EmptyDescription);
    }
    if goal_id.is_none() {
        errors.push(HabitFormError::MissingGoal);
    }
    if selected_days.is_empty() {
        errors.push(HabitFormError::NoDaysSelected);
    }
    if start_date.is_empty() {
        errors.push(HabitFormError::MissingStartDate);
    }
    if end_date.is_empty() {
        errors.push(HabitFormError::MissingEndDate);
    } else if !start_date.is_empty() && end_date <= start_date {
        errors.push(HabitFormError::EndNotAfterStart);
    }

    errors
}

/// A task pre-generated for one selected weekday of the current week.
/// The name is editable before submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoTask {
    pub date: String,
    pub day_name: String,
    pub name: String,
}

/// One task per selected weekday falling within the Sunday-start week at
/// `week_start`. Only the current week is pre-generated; later weeks are not.
pub fn auto_tasks_for_week(
    habit_name: &str,
    selected_days: &[String],
    week_start: NaiveDate,
) -> Vec<AutoTask> {
    let trimmed = habit_name.trim();
    days_in_week(week_start)
        .into_iter()
        .filter(|date| selected_days.iter().any(|d| d == day_code_for(*date)))
        .map(|date| {
            let day_name = full_day_name(day_code_for(date)).unwrap_or("Day");
            let name = if trimmed.is_empty() {
                format!("Task - {}", day_name)
            } else {
                format!("{} - {}", trimmed, day_name)
            };
            AutoTask {
                date: date_key(date),
                day_name: day_name.to_string(),
                name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, day: &str, completed: bool) -> Task {
        Task {
            id,
            name: format!("Task {}", id),
            completed,
            date: day.to_string(),
            habit_id: 1,
            habit_name: "Morning run".to_string(),
            color: "#3B82F6".to_string(),
            user_id: 1,
            username: "octocat".to_string(),
            created_at: "2025-06-01T08:00:00Z".to_string(),
            updated_at: "2025-06-01T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn start_of_week_lands_on_sunday() {
        // A full week plus a year boundary and a leap day
        let samples = [
            date(2025, 6, 1),
            date(2025, 6, 2),
            date(2025, 6, 4),
            date(2025, 6, 7),
            date(2025, 1, 1),
            date(2024, 2, 29),
            date(2025, 12, 31),
        ];
        for d in samples {
            let start = start_of_week(d);
            assert_eq!(start.weekday(), chrono::Weekday::Sun, "for {}", d);
            let distance = (d - start).num_days();
            assert!((0..7).contains(&distance), "for {}", d);
        }
    }

    #[test]
    fn start_of_week_is_identity_on_sundays() {
        assert_eq!(start_of_week(date(2025, 6, 1)), date(2025, 6, 1));
    }

    #[test]
    fn days_in_week_returns_seven_consecutive_days() {
        let days = days_in_week(date(2025, 6, 1));
        assert_eq!(days.len(), 7);
        for (i, d) in days.iter().enumerate() {
            assert_eq!(*d, date(2025, 6, 1) + Duration::days(i as i64));
        }
        assert_eq!(days[6], date(2025, 6, 7));
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key(date(2025, 6, 4)), "2025-06-04");
        assert_eq!(parse_date_key("2025-06-04"), Some(date(2025, 6, 4)));
    }

    #[test]
    fn week_window_navigation() {
        let mut window = WeekWindow::containing(date(2025, 6, 1));
        assert_eq!(window.start(), date(2025, 6, 1));
        window = window.next();
        window = window.next();
        assert_eq!(window.start(), date(2025, 6, 15));
        assert_eq!(window.end(), date(2025, 6, 21));

        // Jump-to-today on Friday 2025-06-20 lands back on the same Sunday
        let today = WeekWindow::containing(date(2025, 6, 20));
        assert_eq!(today.start(), date(2025, 6, 15));

        assert_eq!(window.previous().previous().start(), date(2025, 6, 1));
    }

    #[test]
    fn week_window_contains_its_seven_days_only() {
        let window = WeekWindow::containing(date(2025, 6, 4));
        assert!(window.contains(date(2025, 6, 1)));
        assert!(window.contains(date(2025, 6, 7)));
        assert!(!window.contains(date(2025, 5, 31)));
        assert!(!window.contains(date(2025, 6, 8)));
    }

    #[test]
    fn bucketing_partitions_every_task_by_its_own_date() {
        let tasks = vec![
            task(1, "2025-06-02", false),
            task(2, "2025-06-02", true),
            task(3, "2025-06-04", false),
        ];
        let buckets = bucket_tasks_by_date(&tasks);

        assert_eq!(buckets.len(), 2);
        let monday = &buckets["2025-06-02"];
        assert_eq!(monday.len(), 2);
        // Insertion order preserved within a bucket
        assert_eq!(monday[0].id, 1);
        assert_eq!(monday[1].id, 2);
        assert_eq!(buckets["2025-06-04"].len(), 1);

        // Absent days have no entry; lookups come back empty
        assert!(buckets.get("2025-06-03").is_none());

        // Idempotent
        assert_eq!(buckets, bucket_tasks_by_date(&tasks));
    }

    #[test]
    fn toggle_flips_and_rollback_restores() {
        let mut tasks = vec![task(1, "2025-06-02", false), task(2, "2025-06-03", true)];

        let previous = apply_completion_toggle(&mut tasks, 1).unwrap();
        assert!(!previous);
        assert!(tasks[0].completed);

        // Simulated remote failure: revert to the pre-toggle value
        revert_completion_toggle(&mut tasks, 1, previous);
        assert!(!tasks[0].completed);

        // Unknown id is a no-op
        assert_eq!(apply_completion_toggle(&mut tasks, 99), None);
    }

    #[test]
    fn wizard_steps_are_linear() {
        let mut step = GoalWizardStep::Title;
        let mut visited = vec![step];
        while let Some(next) = step.next() {
            step = next;
            visited.push(step);
        }
        assert_eq!(visited, GoalWizardStep::ALL.to_vec());
        assert_eq!(GoalWizardStep::Review.next(), None);
        assert_eq!(GoalWizardStep::Title.back(), None);
        assert_eq!(
            GoalWizardStep::Dates.back(),
            Some(GoalWizardStep::Image)
        );
    }

    #[test]
    fn title_guard_rejects_whitespace_only_titles() {
        let mut draft = GoalDraft::default();
        let ai = AiReviewState::default();

        draft.title = "   ".to_string();
        assert!(!can_advance(GoalWizardStep::Title, &draft, &ai));

        draft.title = "Run 5k".to_string();
        assert!(can_advance(GoalWizardStep::Title, &draft, &ai));

        draft.title = "x".repeat(101);
        assert!(!can_advance(GoalWizardStep::Title, &draft, &ai));
    }

    #[test]
    fn dates_guard_requires_ordered_range() {
        let mut draft = GoalDraft {
            title: "Run 5k".to_string(),
            ..GoalDraft::default()
        };
        let ai = AiReviewState::default();

        draft.start_date = "2025-06-10".to_string();
        draft.end_date = "2025-06-01".to_string();
        assert!(!can_advance(GoalWizardStep::Dates, &draft, &ai));

        draft.start_date = "2025-06-01".to_string();
        draft.end_date = "2025-06-10".to_string();
        assert!(can_advance(GoalWizardStep::Dates, &draft, &ai));

        draft.end_date = String::new();
        assert!(!can_advance(GoalWizardStep::Dates, &draft, &ai));
    }

    #[test]
    fn ai_review_guard_waits_for_settlement() {
        let draft = GoalDraft::default();
        assert!(!can_advance(
            GoalWizardStep::AiReview,
            &draft,
            &AiReviewState::NotRequested
        ));
        assert!(!can_advance(
            GoalWizardStep::AiReview,
            &draft,
            &AiReviewState::Loading
        ));
        assert!(can_advance(
            GoalWizardStep::AiReview,
            &draft,
            &AiReviewState::Skipped
        ));
        assert!(can_advance(
            GoalWizardStep::AiReview,
            &draft,
            &AiReviewState::Failed {
                message: "timeout".to_string()
            }
        ));
        assert!(can_advance(
            GoalWizardStep::AiReview,
            &draft,
            &AiReviewState::Loaded {
                reasoning: String::new(),
                candidates: Vec::new()
            }
        ));
    }

    fn suggestion(name: &str) -> AiHabitSuggestion {
        AiHabitSuggestion {
            name: name.to_string(),
            description: "desc".to_string(),
            days_of_week: vec!["Mon".to_string(), "Wed".to_string()],
            rationale: "why".to_string(),
        }
    }

    #[test]
    fn submit_plan_with_no_accepted_candidates_creates_only_the_goal() {
        let draft = GoalDraft {
            title: "Learn Spanish".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-12-01".to_string(),
            ..GoalDraft::default()
        };
        let mut candidate: AiHabitCandidate = suggestion("Daily flashcards").into();
        candidate.accepted = false;
        let ai = AiReviewState::Loaded {
            reasoning: "Practice daily".to_string(),
            candidates: vec![candidate],
        };

        let (goal, habits) = plan_goal_submit(&draft, &ai, 7);
        assert_eq!(goal.title, "Learn Spanish");
        assert_eq!(goal.user_id, 7);
        assert!(habits.is_empty());
    }

    #[test]
    fn submit_plan_cycles_palette_by_candidate_index() {
        let draft = GoalDraft {
            title: "Get fit".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-09-01".to_string(),
            ..GoalDraft::default()
        };
        let mut second: AiHabitCandidate = suggestion("Stretching").into();
        second.accepted = false;
        let ai = AiReviewState::Loaded {
            reasoning: String::new(),
            candidates: vec![
                suggestion("Morning run").into(),
                second,
                suggestion("Meal prep").into(),
            ],
        };

        let (_, habits) = plan_goal_submit(&draft, &ai, 1);
        assert_eq!(habits.len(), 2);
        // Colors follow the candidate's position, not its position among accepted
        assert_eq!(habits[0].color, HABIT_COLORS[0]);
        assert_eq!(habits[1].color, HABIT_COLORS[2]);
        assert_eq!(habits[0].days_of_week, "Mon, Wed");
    }

    #[test]
    fn planned_habit_inherits_goal_dates_and_ownership() {
        let goal = Goal {
            id: 42,
            title: "Get fit".to_string(),
            description: None,
            image_url: None,
            emoji: None,
            start_date: "2025-06-01".to_string(),
            end_date: "2025-09-01".to_string(),
            status: GoalStatus::NotStarted,
            user_id: 7,
            username: "octocat".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        let planned = PlannedHabit {
            name: "Morning run".to_string(),
            description: "Run 30 minutes".to_string(),
            days_of_week: "Mon, Wed, Fri".to_string(),
            color: HABIT_COLORS[0].to_string(),
        };

        let request = planned.into_request(&goal);
        assert_eq!(request.goal_id, 42);
        assert_eq!(request.user_id, 7);
        assert_eq!(request.start_date, "2025-06-01");
        assert_eq!(request.end_date, "2025-09-01");
    }

    #[test]
    fn habit_form_validation_collects_every_failure() {
        let errors = validate_habit_form("", " ", None, &[], "", "");
        assert!(errors.contains(&HabitFormError::EmptyName));
        assert!(errors.contains(&HabitFormError::EmptyDescription));
        assert!(errors.contains(&HabitFormError::MissingGoal));
        assert!(errors.contains(&HabitFormError::NoDaysSelected));
        assert!(errors.contains(&HabitFormError::MissingStartDate));
        assert!(errors.contains(&HabitFormError::MissingEndDate));

        let days = vec!["Mon".to_string()];
        let errors = validate_habit_form(
            "Run",
            "Morning run",
            Some(1),
            &days,
            "2025-06-10",
            "2025-06-10",
        );
        assert_eq!(errors, vec![HabitFormError::EndNotAfterStart]);

        let errors = validate_habit_form(
            "Run",
            "Morning run",
            Some(1),
            &days,
            "2025-06-10",
            "2025-06-11",
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn auto_tasks_cover_selected_days_of_the_current_week() {
        let days = vec!["Mon".to_string(), "Wed".to_string()];
        let tasks = auto_tasks_for_week("Morning run", &days, date(2025, 6, 1));

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].date, "2025-06-02");
        assert_eq!(tasks[0].day_name, "Monday");
        assert_eq!(tasks[0].name, "Morning run - Monday");
        assert_eq!(tasks[1].date, "2025-06-04");
        assert_eq!(tasks[1].name, "Morning run - Wednesday");
    }

    #[test]
    fn auto_tasks_fall_back_to_placeholder_names() {
        let days = vec!["Sun".to_string()];
        let tasks = auto_tasks_for_week("  ", &days, date(2025, 6, 1));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Task - Sunday");
    }

    #[test]
    fn day_codes_round_trip_through_the_wire_format() {
        let codes = vec!["Mon".to_string(), "Wed".to_string(), "Fri".to_string()];
        let joined = join_day_codes(&codes);
        assert_eq!(joined, "Mon, Wed, Fri");
        assert_eq!(split_day_codes(&joined), codes);
        assert_eq!(split_day_codes(""), Vec::<String>::new());
    }

    #[test]
    fn palette_cycles_past_seven() {
        assert_eq!(color_for_index(0), "#3B82F6");
        assert_eq!(color_for_index(6), "#06B6D4");
        assert_eq!(color_for_index(7), "#3B82F6");
        assert_eq!(color_for_index(9), HABIT_COLORS[2]);
    }

    #[test]
    fn goal_status_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&GoalStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: GoalStatus = serde_json::from_str("\"NOT_STARTED\"").unwrap();
        assert_eq!(back, GoalStatus::NotStarted);
        assert_eq!(GoalStatus::parse("PAUSED"), Some(GoalStatus::Paused));
        assert_eq!(GoalStatus::parse("bogus"), None);
    }

    #[test]
    fn wire_structs_use_camel_case_fields() {
        let request = CreateTaskRequest {
            name: "Morning run - Monday".to_string(),
            date: "2025-06-02".to_string(),
            habit_id: 3,
            user_id: 7,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("habitId").is_some());
        assert!(json.get("userId").is_some());

        let habit_json = serde_json::json!({
            "id": 3,
            "name": "Morning run",
            "description": "Run 30 minutes",
            "color": "#3B82F6",
            "daysOfWeek": "Mon, Wed, Fri",
            "startDate": "2025-06-01",
            "endDate": "2025-09-01",
            "streakStatus": 4,
            "goalId": 42,
            "goalTitle": "Get fit",
            "userId": 7,
            "username": "octocat",
            "createdAt": "2025-06-01T08:00:00Z",
            "updatedAt": "2025-06-01T08:00:00Z"
        });
        let habit: Habit = serde_json::from_value(habit_json).unwrap();
        assert_eq!(habit.streak_status, 4);
        assert_eq!(split_day_codes(&habit.days_of_week).len(), 3);
    }

    #[test]
    fn ai_response_parses_from_collaborator_json() {
        let json = r#"{
            "reasoning": "Consistency beats intensity.",
            "habits": [
                {
                    "name": "30-minute morning run",
                    "description": "Run before work",
                    "daysOfWeek": ["Mon", "Wed", "Fri"],
                    "rationale": "Builds aerobic base"
                }
            ]
        }"#;
        let response: AiRecommendationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.habits.len(), 1);

        let candidate: AiHabitCandidate = response.habits[0].clone().into();
        assert!(candidate.accepted);
    }
}
