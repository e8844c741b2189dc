//! Collaborator interfaces and in-memory reference implementations.
//!
//! The engine never talks to a database directly: the embedding
//! application supplies an [`AttemptStore`] and a [`QuestionRepository`].
//! The in-memory variants here back the test suite and small embedders.

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::types::{Attempt, Question};

/// Append-only record of question attempts per user.
pub trait AttemptStore: Send + Sync {
    /// List a user's attempts, optionally narrowed by subject and topic.
    /// An unknown user yields an empty list, not an error.
    fn list_attempts(
        &self,
        user_id: &str,
        subject: Option<&str>,
        topic: Option<&str>,
    ) -> Result<Vec<Attempt>, StoreError>;

    /// Append one attempt. Atomic per attempt; no cross-attempt
    /// transaction is required.
    fn append_attempt(&self, attempt: Attempt) -> Result<(), StoreError>;
}

/// Read-only question bank.
pub trait QuestionRepository: Send + Sync {
    /// Full candidate pool, optionally filtered by subject.
    fn list_questions(&self, subject: Option<&str>) -> Result<Vec<Question>, StoreError>;
}

/// In-memory [`AttemptStore`] preserving append order.
#[derive(Default)]
pub struct MemoryAttemptStore {
    attempts: RwLock<Vec<Attempt>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attempts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.read().is_empty()
    }
}

impl AttemptStore for MemoryAttemptStore {
    fn list_attempts(
        &self,
        user_id: &str,
        subject: Option<&str>,
        topic: Option<&str>,
    ) -> Result<Vec<Attempt>, StoreError> {
        let attempts = self.attempts.read();
        Ok(attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter(|a| subject.map_or(true, |s| a.subject == s))
            .filter(|a| topic.map_or(true, |t| a.topic == t))
            .cloned()
            .collect())
    }

    fn append_attempt(&self, attempt: Attempt) -> Result<(), StoreError> {
        self.attempts.write().push(attempt);
        Ok(())
    }
}

/// In-memory [`QuestionRepository`].
#[derive(Default)]
pub struct MemoryQuestionBank {
    questions: RwLock<Vec<Question>>,
}

impl MemoryQuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions),
        }
    }

    pub fn insert(&self, question: Question) {
        self.questions.write().push(question);
    }
}

impl QuestionRepository for MemoryQuestionBank {
    fn list_questions(&self, subject: Option<&str>) -> Result<Vec<Question>, StoreError> {
        let questions = self.questions.read();
        Ok(questions
            .iter()
            .filter(|q| subject.map_or(true, |s| q.subject == s))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;
    use chrono::Utc;

    fn attempt(user: &str, subject: &str, topic: &str, correct: bool) -> Attempt {
        Attempt {
            user_id: user.to_string(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            question_id: format!("q-{topic}-{correct}"),
            correct,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn attempt_store_filters_by_user_subject_topic() {
        let store = MemoryAttemptStore::new();
        store.append_attempt(attempt("u1", "Physics", "Optics", true)).unwrap();
        store.append_attempt(attempt("u1", "Physics", "Waves", false)).unwrap();
        store.append_attempt(attempt("u2", "Physics", "Optics", true)).unwrap();

        assert_eq!(store.list_attempts("u1", None, None).unwrap().len(), 2);
        assert_eq!(
            store.list_attempts("u1", Some("Physics"), Some("Optics")).unwrap().len(),
            1
        );
        assert!(store.list_attempts("nobody", None, None).unwrap().is_empty());
    }

    #[test]
    fn question_bank_filters_by_subject() {
        let bank = MemoryQuestionBank::default();
        bank.insert(Question {
            id: "q1".to_string(),
            subject: "Physics".to_string(),
            topic: "Optics".to_string(),
            difficulty: Difficulty::Easy,
            content: serde_json::Value::Null,
        });
        bank.insert(Question {
            id: "q2".to_string(),
            subject: "Chemistry".to_string(),
            topic: "Bonding".to_string(),
            difficulty: Difficulty::Hard,
            content: serde_json::Value::Null,
        });

        assert_eq!(bank.list_questions(None).unwrap().len(), 2);
        let physics = bank.list_questions(Some("Physics")).unwrap();
        assert_eq!(physics.len(), 1);
        assert_eq!(physics[0].id, "q1");
    }
}
