//! The question bank: categories and their question lists.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Question;

use super::PersistError;

/// Error from a bank query or mutation.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("category name must not be empty")]
    EmptyCategoryName,
    #[error("category already exists: {0}")]
    DuplicateCategory(String),
    #[error("no such category: {0}")]
    UnknownCategory(String),
    #[error("invalid question: {0}")]
    InvalidQuestion(&'static str),
    #[error("no question at index {index} in category {category}")]
    QuestionIndexOutOfRange { category: String, index: usize },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Mapping from category name to its ordered question list.
///
/// Every mutation rewrites the whole document synchronously, so readers
/// always see the latest committed state.
pub struct QuestionBank {
    path: Option<PathBuf>,
    categories: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    /// Open the bank backed by a JSON document, seeding the starter
    /// bank when no document exists yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let categories = super::load_or(Some(path.as_path()), starter_bank);
        Self {
            path: Some(path),
            categories,
        }
    }

    /// A bank that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            categories: starter_bank(),
        }
    }

    /// An in-memory bank with no categories at all.
    pub fn empty() -> Self {
        Self {
            path: None,
            categories: BTreeMap::new(),
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Questions for a category; empty if the category is unknown.
    pub fn questions(&self, category: &str) -> &[Question] {
        self.categories.get(category).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), BankError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankError::EmptyCategoryName);
        }
        if self.categories.contains_key(name) {
            return Err(BankError::DuplicateCategory(name.to_string()));
        }
        self.categories.insert(name.to_string(), Vec::new());
        self.persist()
    }

    /// Remove a category and all of its questions. No undo.
    pub fn delete_category(&mut self, name: &str) -> Result<(), BankError> {
        if self.categories.remove(name).is_none() {
            return Err(BankError::UnknownCategory(name.to_string()));
        }
        self.persist()
    }

    pub fn add_question(&mut self, category: &str, question: Question) -> Result<(), BankError> {
        question.validate().map_err(BankError::InvalidQuestion)?;
        let list = self
            .categories
            .get_mut(category)
            .ok_or_else(|| BankError::UnknownCategory(category.to_string()))?;
        list.push(question);
        self.persist()
    }

    pub fn edit_question(
        &mut self,
        category: &str,
        index: usize,
        question: Question,
    ) -> Result<(), BankError> {
        question.validate().map_err(BankError::InvalidQuestion)?;
        let list = self
            .categories
            .get_mut(category)
            .ok_or_else(|| BankError::UnknownCategory(category.to_string()))?;
        let slot = list
            .get_mut(index)
            .ok_or_else(|| BankError::QuestionIndexOutOfRange {
                category: category.to_string(),
                index,
            })?;
        *slot = question;
        self.persist()
    }

    pub fn delete_question(&mut self, category: &str, index: usize) -> Result<Question, BankError> {
        let list = self
            .categories
            .get_mut(category)
            .ok_or_else(|| BankError::UnknownCategory(category.to_string()))?;
        if index >= list.len() {
            return Err(BankError::QuestionIndexOutOfRange {
                category: category.to_string(),
                index,
            });
        }
        let removed = list.remove(index);
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), BankError> {
        super::persist(self.path.as_deref(), &self.categories)?;
        Ok(())
    }
}

/// The bank shipped with a fresh install.
fn starter_bank() -> BTreeMap<String, Vec<Question>> {
    let mut categories = BTreeMap::new();
    categories.insert(
        "General".to_string(),
        vec![
            Question {
                text: "Which language runs in a web browser?".to_string(),
                options: [
                    "Java".to_string(),
                    "C".to_string(),
                    "Python".to_string(),
                    "JavaScript".to_string(),
                ],
                correct_index: 3,
                points: 10,
                hint: Some("It's the language of the web.".to_string()),
            },
            Question {
                text: "What does CSS stand for?".to_string(),
                options: [
                    "Computer Style Sheets".to_string(),
                    "Cascading Style Sheets".to_string(),
                    "Creative Style Syntax".to_string(),
                    "Code Styling System".to_string(),
                ],
                correct_index: 1,
                points: 10,
                hint: Some("Think cascading.".to_string()),
            },
        ],
    );
    categories.insert(
        "Math".to_string(),
        vec![Question {
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
        }],
    );
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str) -> Question {
        Question {
            text: text.to_string(),
            options: [
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_index: 0,
            points: 10,
            hint: None,
        }
    }

    #[test]
    fn test_starter_bank_is_seeded() {
        let bank = QuestionBank::in_memory();
        assert_eq!(bank.categories(), vec!["General", "Math"]);
        assert_eq!(bank.questions("General").len(), 2);
        assert_eq!(bank.questions("Math").len(), 1);
    }

    #[test]
    fn test_unknown_category_reads_empty() {
        let bank = QuestionBank::in_memory();
        assert!(bank.questions("History").is_empty());
    }

    #[test]
    fn test_add_category_rejects_duplicates_and_empty_names() {
        let mut bank = QuestionBank::in_memory();
        assert!(matches!(
            bank.add_category("General"),
            Err(BankError::DuplicateCategory(_))
        ));
        assert!(matches!(
            bank.add_category("   "),
            Err(BankError::EmptyCategoryName)
        ));
        bank.add_category("History").unwrap();
        assert!(bank.contains("History"));
        assert!(bank.questions("History").is_empty());
    }

    #[test]
    fn test_delete_category_removes_questions_with_it() {
        let mut bank = QuestionBank::in_memory();
        bank.delete_category("General").unwrap();
        assert!(!bank.contains("General"));
        assert!(bank.questions("General").is_empty());
        assert!(matches!(
            bank.delete_category("General"),
            Err(BankError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_add_question_validates_record() {
        let mut bank = QuestionBank::in_memory();
        let mut bad = question("q");
        bad.correct_index = 9;
        assert!(matches!(
            bank.add_question("Math", bad),
            Err(BankError::InvalidQuestion(_))
        ));
        assert_eq!(bank.questions("Math").len(), 1);

        bank.add_question("Math", question("What is 2 + 2?")).unwrap();
        assert_eq!(bank.questions("Math").len(), 2);
    }

    #[test]
    fn test_edit_question_replaces_in_place() {
        let mut bank = QuestionBank::in_memory();
        bank.edit_question("Math", 0, question("replacement")).unwrap();
        assert_eq!(bank.questions("Math")[0].text, "replacement");

        assert!(matches!(
            bank.edit_question("Math", 5, question("nope")),
            Err(BankError::QuestionIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_delete_question_shifts_later_indices() {
        let mut bank = QuestionBank::in_memory();
        let removed = bank.delete_question("General", 0).unwrap();
        assert!(removed.text.contains("browser"));
        assert_eq!(bank.questions("General").len(), 1);
        assert!(bank.questions("General")[0].text.contains("CSS"));
    }

    #[test]
    fn test_open_recovers_from_corrupt_document() {
        let dir = std::env::temp_dir().join(format!("neon-quiz-bank-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bank.json");
        std::fs::write(&path, "{not json").unwrap();

        let bank = QuestionBank::open(&path);
        assert_eq!(bank.categories(), vec!["General", "Math"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mutations_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("neon-quiz-bank-rt-{}", std::process::id()));
        let path = dir.join("bank.json");

        let mut bank = QuestionBank::open(&path);
        bank.add_category("History").unwrap();
        bank.add_question("History", question("Who was first?")).unwrap();

        let reloaded = QuestionBank::open(&path);
        assert_eq!(reloaded.questions("History").len(), 1);
        assert_eq!(reloaded.questions("History")[0].text, "Who was first?");

        std::fs::remove_dir_all(&dir).ok();
    }
}
