use gloo::net::http::Request;
use serde_json::json;
use shared::AiRecommendationResponse;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Client for the habit recommendation collaborator. Fallible and possibly
/// slow; callers decide whether to retry or skip.
#[derive(Clone, PartialEq)]
pub struct AiClient {
    api_key: Option<String>,
}

impl AiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Generate habit recommendations for a goal title and description
    pub async fn generate_habit_recommendations(
        &self,
        goal_title: &str,
        goal_description: &str,
    ) -> Result<AiRecommendationResponse, String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| "AI recommendations are not configured".to_string())?;

        let body = json!({
            "model": "gpt-5",
            "messages": [
                {
                    "role": "system",
                    "content": "You are a helpful productivity coach that suggests specific, actionable habits. Always respond with valid JSON matching the requested format exactly."
                },
                {
                    "role": "user",
                    "content": recommendation_prompt(goal_title, goal_description)
                }
            ],
            "max_completion_tokens": 1000,
            "response_format": { "type": "json_object" }
        });

        let response = Request::post(CHAT_COMPLETIONS_URL)
            .header("Authorization", &format!("Bearer {}", api_key))
            .json(&body)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(if text.is_empty() {
                format!("Recommendation service error {}", status)
            } else {
                format!("Recommendation service error {}: {}", status, text)
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| "No content received from the recommendation service".to_string())?;

        let parsed: AiRecommendationResponse = serde_json::from_str(content)
            .map_err(|e| format!("Invalid recommendation format: {}", e))?;

        Ok(parsed)
    }
}

fn recommendation_prompt(goal_title: &str, goal_description: &str) -> String {
    let description = if goal_description.trim().is_empty() {
        "No additional description provided"
    } else {
        goal_description
    };

    format!(
        r#"You are a personal productivity coach helping someone achieve their goal. Based on the goal information below, suggest 3-5 specific, actionable habits that will help them achieve this goal.

Goal Title: "{goal_title}"
Goal Description: "{description}"

For each habit, provide:
1. A clear, specific name (e.g., "30-minute morning run")
2. A brief description of what to do
3. Recommended days of the week (as an array of day codes: Mon, Tue, Wed, Thu, Fri, Sat, Sun)
4. A rationale explaining WHY this habit helps achieve the goal

Also provide a brief reasoning (2-3 sentences) explaining your overall approach to helping achieve this goal.

Return your response as JSON in this exact format:
{{
  "reasoning": "Brief explanation of your overall strategy...",
  "habits": [
    {{
      "name": "Habit name",
      "description": "What to do",
      "daysOfWeek": ["Mon", "Wed", "Fri"],
      "rationale": "Why this helps"
    }}
  ]
}}

Guidelines:
- Be specific and actionable
- Consider frequency and sustainability
- Habits should directly contribute to the goal
- Recommend realistic schedules (don't overload every day)
- Keep names concise (under 50 characters)
- Keep descriptions brief (under 150 characters)
- Keep rationales brief (under 100 characters)"#
    )
}
