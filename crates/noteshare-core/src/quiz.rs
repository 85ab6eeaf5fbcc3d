//! Quiz question types and server-side attempt scoring.
//!
//! Quizzes are stored as a JSON array of [`Question`] values; attempts
//! submit a map of question id to chosen option. Scoring happens on the
//! server with [`score_attempt`]; the client never computes or submits
//! a score.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One of the four multiple-choice options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

/// The option texts of a question, keyed A through D on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

/// A multiple-choice question as stored on a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable id answers are keyed by.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub question: String,
    pub options: Options,
    pub correct_answer: Choice,
    /// Points awarded for a correct answer.
    pub score: i32,
}

/// Total points available across `questions`.
#[must_use]
pub fn max_score(questions: &[Question]) -> i32 {
    questions.iter().map(|q| q.score).sum()
}

/// Grade an attempt.
///
/// Each question whose submitted choice equals its correct answer
/// contributes its score. Unanswered questions and answers keyed by
/// unknown question ids contribute nothing.
#[must_use]
pub fn score_attempt(questions: &[Question], answers: &HashMap<Uuid, Choice>) -> i32 {
    questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .map(|q| q.score)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: Choice, score: i32) -> Question {
        Question {
            id: Uuid::new_v4(),
            question: "What is 2 + 2?".to_string(),
            options: Options {
                a: "3".to_string(),
                b: "4".to_string(),
                c: "5".to_string(),
                d: "22".to_string(),
            },
            correct_answer: correct,
            score,
        }
    }

    #[test]
    fn test_score_all_correct() {
        let questions = vec![question(Choice::B, 5), question(Choice::D, 3)];
        let answers: HashMap<Uuid, Choice> = questions
            .iter()
            .map(|q| (q.id, q.correct_answer))
            .collect();
        assert_eq!(score_attempt(&questions, &answers), 8);
    }

    #[test]
    fn test_score_partial() {
        let questions = vec![question(Choice::A, 5), question(Choice::C, 3)];
        let mut answers = HashMap::new();
        answers.insert(questions[0].id, Choice::A); // correct
        answers.insert(questions[1].id, Choice::B); // wrong
        assert_eq!(score_attempt(&questions, &answers), 5);
    }

    #[test]
    fn test_score_unanswered_is_zero() {
        let questions = vec![question(Choice::A, 5)];
        assert_eq!(score_attempt(&questions, &HashMap::new()), 0);
    }

    #[test]
    fn test_score_unknown_question_id_ignored() {
        let questions = vec![question(Choice::A, 5)];
        let mut answers = HashMap::new();
        answers.insert(Uuid::new_v4(), Choice::A);
        assert_eq!(score_attempt(&questions, &answers), 0);
    }

    #[test]
    fn test_max_score() {
        let questions = vec![question(Choice::A, 5), question(Choice::B, 7)];
        assert_eq!(max_score(&questions), 12);
        assert_eq!(max_score(&[]), 0);
    }

    #[test]
    fn test_question_wire_format() {
        let q = question(Choice::B, 2);
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"correctAnswer\":\"B\""));
        assert!(json.contains("\"A\":\"3\""));
        assert!(json.contains("\"question\""));
    }

    #[test]
    fn test_question_deserialize_without_id_gets_one() {
        let json = r#"{
            "question": "Capital of France?",
            "options": {"A": "Paris", "B": "Lyon", "C": "Nice", "D": "Lille"},
            "correctAnswer": "A",
            "score": 1
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, Choice::A);
        assert!(!q.id.is_nil());
    }
}
