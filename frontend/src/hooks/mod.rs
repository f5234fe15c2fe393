pub mod use_goals;
pub mod use_habits;
pub mod use_notes;
pub mod use_session;
pub mod use_week_tasks;
