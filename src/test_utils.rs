#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Area, Course, DifficultyLevel, Exercise, Lesson, User, UserRole};

    pub fn student(first_name: &str) -> User {
        User::test_user(first_name, UserRole::Student)
    }

    pub fn teacher(first_name: &str) -> User {
        User::test_user(first_name, UserRole::Teacher)
    }

    /// An area with one course owned by `teacher_id`, one lesson worth
    /// 10 points and one exercise worth 5 points whose answer is `6x`.
    pub fn course_tree(teacher_id: &str) -> (Area, Course, Lesson, Exercise) {
        let area = Area::new("Calculus", 1);
        let course = Course::new("Derivatives", DifficultyLevel::Basic, teacher_id, &area.id);

        let mut lesson = Lesson::new(&course.id, "Power rule", 1);
        lesson.points = 10;

        let mut exercise = Exercise::new(&lesson.id, "Derivative", "d/dx 3x^2", "6x", 1);
        exercise.points = 5;

        (area, course, lesson, exercise)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_course_tree_is_linked() {
        let teacher = teacher("Maria");
        let (area, course, lesson, exercise) = course_tree(&teacher.id);

        assert_eq!(course.area_id, area.id);
        assert_eq!(course.teacher_id, teacher.id);
        assert_eq!(lesson.course_id, course.id);
        assert_eq!(exercise.lesson_id, lesson.id);
        assert_eq!(exercise.correct_answer, "6x");
    }

    #[test]
    fn test_student_fixture() {
        let user = student("Juan");
        assert_eq!(user.email, "juan@example.com");
        assert!(!user.is_teacher());
    }
}
