//! Default dataset used to seed the store on first run.
//!
//! Only consulted when no persisted state exists; after the first read the
//! database copy is authoritative.

use serde_json::{json, Value};

use crate::models::OrgChartState;

/// Fixed catalog of training topics offered to every organization.
const AVAILABLE_TRAINING_TOPICS: &[&str] = &[
    "English Communication",
    "Leadership Fundamentals",
    "Project Management",
    "Time Management",
    "Public Speaking",
    "Conflict Resolution",
    "Data Analysis Basics",
    "Technical Writing",
    "Customer Service Excellence",
    "Workplace Safety",
];

/// Build the default seed state: a small starter roster with no photos,
/// the fixed topic catalog, and no custom topics.
pub fn default_state() -> OrgChartState {
    OrgChartState {
        employees: default_employees(),
        custom_training_topics: Vec::new(),
        available_training_topics: AVAILABLE_TRAINING_TOPICS
            .iter()
            .map(|t| Value::String((*t).to_string()))
            .collect(),
        last_updated: String::new(),
    }
}

fn default_employees() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Amina Hassan",
            "position": "Chief Executive Officer",
            "photo": "",
            "parentId": null,
            "trainingTopics": []
        }),
        json!({
            "id": 2,
            "name": "Omar Khalil",
            "position": "Head of Operations",
            "photo": "",
            "parentId": 1,
            "trainingTopics": []
        }),
        json!({
            "id": 3,
            "name": "Layla Mansour",
            "position": "Head of Human Resources",
            "photo": "",
            "parentId": 1,
            "trainingTopics": []
        }),
        json!({
            "id": 4,
            "name": "Yousef Nasser",
            "position": "Operations Specialist",
            "photo": "",
            "parentId": 2,
            "trainingTopics": []
        }),
        json!({
            "id": 5,
            "name": "Sara Ibrahim",
            "position": "HR Coordinator",
            "photo": "",
            "parentId": 3,
            "trainingTopics": []
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_shape() {
        let state = default_state();
        assert!(!state.employees.is_empty());
        assert!(state.custom_training_topics.is_empty());
        assert_eq!(
            state.available_training_topics.first(),
            Some(&Value::String("English Communication".to_string()))
        );
        // Every seeded employee has an integer id and an empty photo
        for employee in &state.employees {
            assert!(employee["id"].is_i64() || employee["id"].is_u64());
            assert_eq!(employee["photo"], Value::String(String::new()));
        }
    }
}
