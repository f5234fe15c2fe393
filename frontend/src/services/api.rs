use gloo::net::http::Request;
use serde::Serialize;
use shared::{
    CreateGoalRequest, CreateHabitRequest, CreateNoteRequest, CreateTaskRequest, Goal, GoalStatus,
    Habit, Note, Task, UpdateGoalRequest, UpdateHabitRequest, UpdateNoteRequest, UpdateTaskRequest,
    User,
};

/// API client for the goal/habit/task/note backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Resolve an authenticated session's provider + provider ID to a user.
    /// Returns None when the backend has no record for the pair.
    pub async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, String> {
        let url = format!(
            "{}/users/provider/{}/{}",
            self.base_url, provider, provider_id
        );

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.status() == 404 {
                    return Ok(None);
                }
                if response.ok() {
                    match response.json::<User>().await {
                        Ok(user) => Ok(Some(user)),
                        Err(e) => Err(format!("Failed to parse user: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create a new goal
    pub async fn create_goal(&self, request: CreateGoalRequest) -> Result<Goal, String> {
        let url = format!("{}/goals", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Goal>().await {
                        Ok(goal) => Ok(goal),
                        Err(e) => Err(format!("Failed to parse goal: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get all goals for a user
    pub async fn get_goals_by_user(&self, user_id: i64) -> Result<Vec<Goal>, String> {
        let url = format!("{}/goals/user/{}", self.base_url, user_id);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Goal>>().await {
                        Ok(goals) => Ok(goals),
                        Err(e) => Err(format!("Failed to parse goals: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to fetch goals: {}", e)),
        }
    }

    /// Update a goal
    pub async fn update_goal(&self, id: i64, request: UpdateGoalRequest) -> Result<Goal, String> {
        let url = format!("{}/goals/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Goal>().await {
                        Ok(goal) => Ok(goal),
                        Err(e) => Err(format!("Failed to parse goal: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Update a goal's status field in isolation
    pub async fn update_goal_status(&self, id: i64, status: GoalStatus) -> Result<Goal, String> {
        #[derive(Serialize)]
        struct StatusRequest {
            status: GoalStatus,
        }

        let url = format!("{}/goals/{}/status", self.base_url, id);

        match Request::patch(&url)
            .json(&StatusRequest { status })
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Goal>().await {
                        Ok(goal) => Ok(goal),
                        Err(e) => Err(format!("Failed to parse goal: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a goal (the backend cascades to its habits and notes)
    pub async fn delete_goal(&self, id: i64) -> Result<(), String> {
        let url = format!("{}/goals/{}", self.base_url, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create a new habit
    pub async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, String> {
        let url = format!("{}/habits", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Habit>().await {
                        Ok(habit) => Ok(habit),
                        Err(e) => Err(format!("Failed to parse habit: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get all habits for a user
    pub async fn get_habits_by_user(&self, user_id: i64) -> Result<Vec<Habit>, String> {
        let url = format!("{}/habits/user/{}", self.base_url, user_id);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Habit>>().await {
                        Ok(habits) => Ok(habits),
                        Err(e) => Err(format!("Failed to parse habits: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to fetch habits: {}", e)),
        }
    }

    /// Get all habits for a goal
    pub async fn get_habits_by_goal(&self, goal_id: i64) -> Result<Vec<Habit>, String> {
        let url = format!("{}/habits/goal/{}", self.base_url, goal_id);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Habit>>().await {
                        Ok(habits) => Ok(habits),
                        Err(e) => Err(format!("Failed to parse habits: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to fetch habits: {}", e)),
        }
    }

    /// Update a habit
    pub async fn update_habit(&self, id: i64, request: UpdateHabitRequest) -> Result<Habit, String> {
        let url = format!("{}/habits/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Habit>().await {
                        Ok(habit) => Ok(habit),
                        Err(e) => Err(format!("Failed to parse habit: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a habit
    pub async fn delete_habit(&self, id: i64) -> Result<(), String> {
        let url = format!("{}/habits/{}", self.base_url, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create a new task
    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, String> {
        let url = format!("{}/tasks", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Task>().await {
                        Ok(task) => Ok(task),
                        Err(e) => Err(format!("Failed to parse task: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get a user's tasks within an inclusive date range (YYYY-MM-DD bounds)
    pub async fn get_tasks_by_date_range(
        &self,
        user_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Task>, String> {
        let url = format!(
            "{}/tasks/user/{}/week?startDate={}&endDate={}",
            self.base_url, user_id, start_date, end_date
        );

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Task>>().await {
                        Ok(tasks) => Ok(tasks),
                        Err(e) => Err(format!("Failed to parse tasks: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to fetch tasks: {}", e)),
        }
    }

    /// Toggle a task's completion flag. The server recalculates the owning
    /// habit's streak as a side effect.
    pub async fn toggle_task_completion(&self, id: i64) -> Result<Task, String> {
        let url = format!("{}/tasks/{}/toggle", self.base_url, id);

        match Request::patch(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Task>().await {
                        Ok(task) => Ok(task),
                        Err(e) => Err(format!("Failed to parse task: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Update a task
    pub async fn update_task(&self, id: i64, request: UpdateTaskRequest) -> Result<Task, String> {
        let url = format!("{}/tasks/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Task>().await {
                        Ok(task) => Ok(task),
                        Err(e) => Err(format!("Failed to parse task: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a task
    pub async fn delete_task(&self, id: i64) -> Result<(), String> {
        let url = format!("{}/tasks/{}", self.base_url, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create a new note on a goal
    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<Note, String> {
        let url = format!("{}/notes", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Note>().await {
                        Ok(note) => Ok(note),
                        Err(e) => Err(format!("Failed to parse note: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get all notes for a goal, ordered newest-first
    pub async fn get_notes_by_goal(&self, goal_id: i64) -> Result<Vec<Note>, String> {
        let url = format!("{}/notes/goal/{}", self.base_url, goal_id);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Vec<Note>>().await {
                        Ok(notes) => Ok(notes),
                        Err(e) => Err(format!("Failed to parse notes: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Failed to fetch notes: {}", e)),
        }
    }

    /// Update a note's content
    pub async fn update_note(&self, id: i64, request: UpdateNoteRequest) -> Result<Note, String> {
        let url = format!("{}/notes/{}", self.base_url, id);

        match Request::put(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<Note>().await {
                        Ok(note) => Ok(note),
                        Err(e) => Err(format!("Failed to parse note: {}", e)),
                    }
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Delete a note
    pub async fn delete_note(&self, id: i64) -> Result<(), String> {
        let url = format!("{}/notes/{}", self.base_url, id);

        match Request::delete(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    Ok(())
                } else {
                    Err(error_text(response).await)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefer the backend's error body over the bare status line
async fn error_text(response: gloo::net::http::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => format!("Server error {}", status),
    }
}
