use crate::models::domain::Exercise;

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub is_correct: bool,
    pub points: i64,
}

pub struct GradingService;

impl GradingService {
    /// Grade a submitted answer against the exercise's answer key.
    ///
    /// Both sides are trimmed and compared case-insensitively; a correct
    /// answer earns the exercise's points, anything else earns nothing.
    pub fn evaluate(exercise: &Exercise, answer: &str) -> Grade {
        let is_correct = Self::normalize(answer) == Self::normalize(&exercise.correct_answer);

        Grade {
            is_correct,
            points: if is_correct { exercise.points } else { 0 },
        }
    }

    fn normalize(answer: &str) -> String {
        answer.trim().to_lowercase()
    }
}
