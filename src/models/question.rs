use serde::{Deserialize, Serialize};

/// Every question has exactly four answer options.
pub const NUM_OPTIONS: usize = 4;

/// A single multiple-choice question.
///
/// Immutable once stored in the bank; identity within a category is
/// positional (the index in the category's question list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_index: usize,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Question {
    /// Check the record against the bank's admission rules.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.text.trim().is_empty() {
            return Err("question text must not be empty");
        }
        if self.options.iter().any(|opt| opt.trim().is_empty()) {
            return Err("all four options must be filled in");
        }
        if self.correct_index >= NUM_OPTIONS {
            return Err("correct index must be between 0 and 3");
        }
        if self.points == 0 {
            return Err("points must be a positive number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            text: "What is 7 * 8?".to_string(),
            options: [
                "54".to_string(),
                "56".to_string(),
                "58".to_string(),
                "63".to_string(),
            ],
            correct_index: 1,
            points: 8,
            hint: Some("7*8=56".to_string()),
        }
    }

    #[test]
    fn test_valid_question_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_blank_option_rejected() {
        let mut q = sample();
        q.options[2] = "   ".to_string();
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_correct_index_out_of_range_rejected() {
        let mut q = sample();
        q.correct_index = 4;
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_zero_points_rejected() {
        let mut q = sample();
        q.points = 0;
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"correctIndex\":1"));
        assert!(json.contains("\"points\":8"));
    }

    #[test]
    fn test_missing_hint_is_accepted() {
        let json = r#"{"text":"t","options":["a","b","c","d"],"correctIndex":0,"points":10}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.hint, None);
    }
}
