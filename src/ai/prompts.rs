use crate::model::Task;

pub fn analysis(description: &str, project: Option<&str>, tag: Option<&str>) -> String {
    let mut context = String::new();
    if let Some(p) = project {
        context.push_str(&format!("\nProject: {p}"));
    }
    if let Some(t) = tag {
        context.push_str(&format!("\nTag: {t}"));
    }

    format!(
        r#"You are a productivity coach. Using time-management principles such as the Eisenhower matrix, assess the task below and give short, practical advice.
Take the project and tag, if present, into account.
Rate the task on two scales from 1 to 10:
- importance: how much the task contributes to long-term goals, personal values or significant outcomes.
- urgency: how soon it needs attention, considering deadlines and the cost of delay.

Reply with a JSON object with exactly the keys "advice", "importance" and "urgency".
Example: {{"advice": "This matters; block out time for it this morning.", "importance": 9, "urgency": 8}}

Task: "{description}"{context}"#
    )
}

pub fn encouragement(task: &Task) -> String {
    format!(
        r#"The user's next task is: "{}".
It has an importance of {}/10 and an urgency of {}/10.
Write a short, personal, encouraging message that motivates the user to start it now.
Keep it concise and positive and address the user directly.
Reply with a JSON object with a single key "encouragement"."#,
        task.description,
        rating(task.importance),
        rating(task.urgency),
    )
}

pub fn summary(tasks: &[Task]) -> String {
    let list = tasks
        .iter()
        .map(|t| format!("- {}", t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a friendly, insightful productivity coach. Below is the user's current to-do list.
Give a brief, encouraging summary: point out common themes, likely challenges, and one or two high-level suggestions for approaching the day.
Keep the tone supportive and address the user directly.

To-do list:
{list}

Reply with a JSON object with a single key "summary"."#
    )
}

fn rating(score: u8) -> String {
    if score == 0 {
        "N/A".to_string()
    } else {
        score.to_string()
    }
}
