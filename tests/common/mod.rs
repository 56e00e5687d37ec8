//! In-memory stores honouring the same uniqueness and atomicity contracts as
//! the MongoDB repositories, plus helpers to build a wired `AppState`.
#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use edumath_server::{
    app_state::{AppState, Repositories},
    auth::Actor,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        Achievement, Area, AssignmentState, Course, CourseAssignment, CourseFilter, Enrollment,
        Exercise, ExerciseAttempt, Lesson, LessonProgress, ProgressState, TeacherStudentLink, User,
        UserAchievement, UserRole,
    },
    repositories::{
        AchievementRepository, AreaRepository, AttemptCounts, CourseAssignmentRepository,
        CourseRepository, EnrollmentRepository, ExerciseAttemptRepository, ExerciseRepository,
        LessonProgressRepository, LessonRepository, TeacherStudentRepository, UserRepository,
    },
};

type Table<T> = Arc<RwLock<HashMap<String, T>>>;

fn table<T>() -> Table<T> {
    Arc::new(RwLock::new(HashMap::new()))
}

fn paginate<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    let start = offset.max(0) as usize;
    if start >= items.len() {
        return vec![];
    }
    let end = (start + limit.max(0) as usize).min(items.len());
    items[start..end].to_vec()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self { users: table() }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let mut items: Vec<User> = self.users.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.registered_at.cmp(&b.registered_at).then_with(|| a.id.cmp(&b.id)));
        Ok((paginate(&items, offset, limit), items.len() as i64))
    }

    async fn update_profile(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user.id)))?;
        stored.first_name = user.first_name;
        stored.last_name = user.last_name;
        stored.birth_date = user.birth_date;
        stored.avatar_url = user.avatar_url;
        stored.active = user.active;
        Ok(stored.clone())
    }

    async fn add_points(&self, id: &str, points: i64) -> AppResult<User> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))?;
        stored.points += points;
        Ok(stored.clone())
    }

    async fn list_students_by_points(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let mut items: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.active && u.role == UserRole::Student)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.email.cmp(&b.email)));
        Ok((paginate(&items, offset, limit), items.len() as i64))
    }

    async fn count_students_ranked_ahead(&self, points: i64, email: &str) -> AppResult<i64> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.active && u.role == UserRole::Student)
            .filter(|u| u.points > points || (u.points == points && u.email.as_str() < email))
            .count() as i64)
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<i64> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.active && u.role == role)
            .count() as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAreaRepository {
    areas: Table<Area>,
}

#[async_trait]
impl AreaRepository for InMemoryAreaRepository {
    async fn create(&self, area: Area) -> AppResult<Area> {
        self.areas.write().await.insert(area.id.clone(), area.clone());
        Ok(area)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Area>> {
        Ok(self.areas.read().await.get(id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Area>> {
        let mut items: Vec<Area> = self.areas.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: Table<Course>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.courses.write().await.insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &CourseFilter, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)> {
        let mut items: Vec<Course> = self
            .courses
            .read()
            .await
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok((paginate(&items, offset, limit), items.len() as i64))
    }

    async fn update(&self, course: Course) -> AppResult<Course> {
        let mut courses = self.courses.write().await;
        if !courses.contains_key(&course.id) {
            return Err(AppError::NotFound(format!("Course with id '{}' not found", course.id)));
        }
        courses.insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.courses.read().await.values().filter(|c| c.active).count() as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLessonRepository {
    lessons: Table<Lesson>,
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn create(&self, lesson: Lesson) -> AppResult<Lesson> {
        self.lessons.write().await.insert(lesson.id.clone(), lesson.clone());
        Ok(lesson)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>> {
        Ok(self.lessons.read().await.get(id).cloned())
    }

    async fn list_active_by_course(&self, course_id: &str) -> AppResult<Vec<Lesson>> {
        let mut items: Vec<Lesson> = self
            .lessons
            .read()
            .await
            .values()
            .filter(|l| l.active && l.course_id == course_id)
            .cloned()
            .collect();
        items.sort_by_key(|l| l.position);
        Ok(items)
    }

    async fn update(&self, lesson: Lesson) -> AppResult<Lesson> {
        let mut lessons = self.lessons.write().await;
        if !lessons.contains_key(&lesson.id) {
            return Err(AppError::NotFound(format!("Lesson with id '{}' not found", lesson.id)));
        }
        lessons.insert(lesson.id.clone(), lesson.clone());
        Ok(lesson)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.lessons.read().await.values().filter(|l| l.active).count() as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExerciseRepository {
    exercises: Table<Exercise>,
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn create(&self, exercise: Exercise) -> AppResult<Exercise> {
        self.exercises
            .write()
            .await
            .insert(exercise.id.clone(), exercise.clone());
        Ok(exercise)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exercise>> {
        Ok(self.exercises.read().await.get(id).cloned())
    }

    async fn list_active_by_lesson(&self, lesson_id: &str) -> AppResult<Vec<Exercise>> {
        let mut items: Vec<Exercise> = self
            .exercises
            .read()
            .await
            .values()
            .filter(|e| e.active && e.lesson_id == lesson_id)
            .cloned()
            .collect();
        items.sort_by_key(|e| e.position);
        Ok(items)
    }

    async fn update(&self, exercise: Exercise) -> AppResult<Exercise> {
        let mut exercises = self.exercises.write().await;
        if !exercises.contains_key(&exercise.id) {
            return Err(AppError::NotFound(format!(
                "Exercise with id '{}' not found",
                exercise.id
            )));
        }
        exercises.insert(exercise.id.clone(), exercise.clone());
        Ok(exercise)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.exercises.read().await.values().filter(|e| e.active).count() as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: Table<Enrollment>,
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        let mut enrollments = self.enrollments.write().await;
        let duplicate = enrollments.values().any(|e| {
            e.active && e.user_id == enrollment.user_id && e.course_id == enrollment.course_id
        });
        if enrollment.active && duplicate {
            return Err(AppError::AlreadyExists(
                "You are already enrolled in this course".to_string(),
            ));
        }
        enrollments.insert(enrollment.id.clone(), enrollment.clone());
        Ok(enrollment)
    }

    async fn find_active(&self, user_id: &str, course_id: &str) -> AppResult<Option<Enrollment>> {
        Ok(self
            .enrollments
            .read()
            .await
            .values()
            .find(|e| e.active && e.user_id == user_id && e.course_id == course_id)
            .cloned())
    }

    async fn list_active_by_user(&self, user_id: &str) -> AppResult<Vec<Enrollment>> {
        let mut items: Vec<Enrollment> = self
            .enrollments
            .read()
            .await
            .values()
            .filter(|e| e.active && e.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(items)
    }

    async fn list_active_by_course(&self, course_id: &str) -> AppResult<Vec<Enrollment>> {
        Ok(self
            .enrollments
            .read()
            .await
            .values()
            .filter(|e| e.active && e.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn update_progress(
        &self,
        id: &str,
        progress_percentage: f64,
        completed_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut enrollments = self.enrollments.write().await;
        let stored = enrollments
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Enrollment with id '{}' not found", id)))?;
        stored.progress_percentage = progress_percentage;
        if completed_at.is_some() {
            stored.completed_at = completed_at;
        }
        Ok(())
    }

    async fn add_points(&self, id: &str, points: i64) -> AppResult<()> {
        let mut enrollments = self.enrollments.write().await;
        let stored = enrollments
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Enrollment with id '{}' not found", id)))?;
        stored.points += points;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLessonProgressRepository {
    records: Table<LessonProgress>,
}

#[async_trait]
impl LessonProgressRepository for InMemoryLessonProgressRepository {
    async fn create(&self, progress: LessonProgress) -> AppResult<LessonProgress> {
        let mut records = self.records.write().await;
        if records
            .values()
            .any(|r| r.user_id == progress.user_id && r.lesson_id == progress.lesson_id)
        {
            return Err(AppError::AlreadyExists(
                "Progress for this lesson already exists".to_string(),
            ));
        }
        records.insert(progress.id.clone(), progress.clone());
        Ok(progress)
    }

    async fn find(&self, user_id: &str, lesson_id: &str) -> AppResult<Option<LessonProgress>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.user_id == user_id && r.lesson_id == lesson_id)
            .cloned())
    }

    async fn update(&self, progress: LessonProgress) -> AppResult<LessonProgress> {
        let mut records = self.records.write().await;
        if !records.contains_key(&progress.id) {
            return Err(AppError::NotFound(format!(
                "Progress with id '{}' not found",
                progress.id
            )));
        }
        records.insert(progress.id.clone(), progress.clone());
        Ok(progress)
    }

    async fn complete_if_pending(&self, id: &str, points: i64, now: DateTime<Utc>) -> AppResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) if record.state != ProgressState::Completed => {
                record.state = ProgressState::Completed;
                record.completed_at = Some(now);
                record.points = points;
                if record.started_at.is_none() {
                    record.started_at = Some(now);
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_by_user_and_course(&self, user_id: &str, course_id: &str) -> AppResult<Vec<LessonProgress>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id && r.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<LessonProgress>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExerciseAttemptRepository {
    attempts: Table<ExerciseAttempt>,
}

#[async_trait]
impl ExerciseAttemptRepository for InMemoryExerciseAttemptRepository {
    async fn create(&self, attempt: ExerciseAttempt) -> AppResult<ExerciseAttempt> {
        self.attempts
            .write()
            .await
            .insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn list_by_user_and_exercise(&self, user_id: &str, exercise_id: &str) -> AppResult<Vec<ExerciseAttempt>> {
        let mut items: Vec<ExerciseAttempt> = self
            .attempts
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id && a.exercise_id == exercise_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(items)
    }

    async fn counts_by_user(&self, user_id: &str) -> AppResult<AttemptCounts> {
        let attempts = self.attempts.read().await;
        let mine: Vec<_> = attempts.values().filter(|a| a.user_id == user_id).collect();
        Ok(AttemptCounts {
            total: mine.len() as i64,
            correct: mine.iter().filter(|a| a.is_correct).count() as i64,
        })
    }

    async fn counts(&self) -> AppResult<AttemptCounts> {
        let attempts = self.attempts.read().await;
        Ok(AttemptCounts {
            total: attempts.len() as i64,
            correct: attempts.values().filter(|a| a.is_correct).count() as i64,
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTeacherStudentRepository {
    links: Table<TeacherStudentLink>,
}

#[async_trait]
impl TeacherStudentRepository for InMemoryTeacherStudentRepository {
    async fn create(&self, link: TeacherStudentLink) -> AppResult<TeacherStudentLink> {
        let mut links = self.links.write().await;
        if links.values().any(|l| {
            l.active && l.teacher_id == link.teacher_id && l.student_id == link.student_id
        }) {
            return Err(AppError::AlreadyExists(
                "The teacher is already linked to this student".to_string(),
            ));
        }
        links.insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn find_active(&self, teacher_id: &str, student_id: &str) -> AppResult<Option<TeacherStudentLink>> {
        Ok(self
            .links
            .read()
            .await
            .values()
            .find(|l| l.active && l.teacher_id == teacher_id && l.student_id == student_id)
            .cloned())
    }

    async fn list_active_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<TeacherStudentLink>> {
        Ok(self
            .links
            .read()
            .await
            .values()
            .filter(|l| l.active && l.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCourseAssignmentRepository {
    assignments: Table<CourseAssignment>,
}

#[async_trait]
impl CourseAssignmentRepository for InMemoryCourseAssignmentRepository {
    async fn create(&self, assignment: CourseAssignment) -> AppResult<CourseAssignment> {
        self.assignments
            .write()
            .await
            .insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<CourseAssignment>> {
        Ok(self.assignments.read().await.get(id).cloned())
    }

    async fn find_active(&self, teacher_id: &str, student_id: &str, course_id: &str) -> AppResult<Option<CourseAssignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .values()
            .find(|a| {
                a.active
                    && a.teacher_id == teacher_id
                    && a.student_id == student_id
                    && a.course_id == course_id
            })
            .cloned())
    }

    async fn list_active_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<CourseAssignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .values()
            .filter(|a| a.active && a.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn list_active_by_student(&self, student_id: &str) -> AppResult<Vec<CourseAssignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .values()
            .filter(|a| a.active && a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn update(&self, assignment: CourseAssignment) -> AppResult<CourseAssignment> {
        let mut assignments = self.assignments.write().await;
        if !assignments.contains_key(&assignment.id) {
            return Err(AppError::NotFound(format!(
                "Assignment with id '{}' not found",
                assignment.id
            )));
        }
        assignments.insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }

    async fn complete_for_student_course(&self, student_id: &str, course_id: &str) -> AppResult<u64> {
        let mut assignments = self.assignments.write().await;
        let mut changed = 0;
        for assignment in assignments.values_mut().filter(|a| {
            a.active
                && a.student_id == student_id
                && a.course_id == course_id
                && a.state != AssignmentState::Completed
        }) {
            assignment.state = AssignmentState::Completed;
            changed += 1;
        }
        Ok(changed)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAchievementRepository {
    achievements: Table<Achievement>,
    grants: Table<UserAchievement>,
}

#[async_trait]
impl AchievementRepository for InMemoryAchievementRepository {
    async fn create(&self, achievement: Achievement) -> AppResult<Achievement> {
        self.achievements
            .write()
            .await
            .insert(achievement.id.clone(), achievement.clone());
        Ok(achievement)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Achievement>> {
        Ok(self.achievements.read().await.get(id).cloned())
    }

    async fn list_active(&self) -> AppResult<Vec<Achievement>> {
        let mut items: Vec<Achievement> = self
            .achievements
            .read()
            .await
            .values()
            .filter(|a| a.active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn grant(&self, grant: UserAchievement) -> AppResult<UserAchievement> {
        let mut grants = self.grants.write().await;
        if grants
            .values()
            .any(|g| g.user_id == grant.user_id && g.achievement_id == grant.achievement_id)
        {
            return Err(AppError::AlreadyExists(
                "The user already has this achievement".to_string(),
            ));
        }
        grants.insert(grant.id.clone(), grant.clone());
        Ok(grant)
    }

    async fn list_grants_by_user(&self, user_id: &str) -> AppResult<Vec<UserAchievement>> {
        let mut items: Vec<UserAchievement> = self
            .grants
            .read()
            .await
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.awarded_at.cmp(&b.awarded_at));
        Ok(items)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// A fully wired application over fresh in-memory stores. The stores stay
/// reachable so tests can seed data and inspect results directly.
pub struct TestContext {
    pub state: AppState,
    pub repos: Repositories,
}

impl TestContext {
    pub fn new() -> Self {
        let repos = Repositories {
            users: Arc::new(InMemoryUserRepository::new()),
            areas: Arc::new(InMemoryAreaRepository::default()),
            courses: Arc::new(InMemoryCourseRepository::default()),
            lessons: Arc::new(InMemoryLessonRepository::default()),
            exercises: Arc::new(InMemoryExerciseRepository::default()),
            enrollments: Arc::new(InMemoryEnrollmentRepository::default()),
            progress: Arc::new(InMemoryLessonProgressRepository::default()),
            attempts: Arc::new(InMemoryExerciseAttemptRepository::default()),
            links: Arc::new(InMemoryTeacherStudentRepository::default()),
            assignments: Arc::new(InMemoryCourseAssignmentRepository::default()),
            achievements: Arc::new(InMemoryAchievementRepository::default()),
        };
        let state = AppState::from_repositories(Config::test_config(), repos.clone(), None);
        Self { state, repos }
    }

    pub async fn user(&self, first_name: &str, role: UserRole) -> (User, Actor) {
        let user = User::new(
            first_name,
            "Tester",
            &format!("{}@example.com", first_name.to_lowercase()),
            "not-a-real-hash",
            role,
        );
        let user = self.repos.users.create(user).await.expect("seed user");
        let actor = Actor::from(&user);
        (user, actor)
    }

    pub async fn area(&self) -> Area {
        self.repos
            .areas
            .create(Area::new("Algebra", 1))
            .await
            .expect("seed area")
    }

    pub async fn course(&self, teacher_id: &str, area_id: &str) -> Course {
        self.repos
            .courses
            .create(Course::new(
                "Derivatives",
                edumath_server::models::domain::DifficultyLevel::Basic,
                teacher_id,
                area_id,
            ))
            .await
            .expect("seed course")
    }

    pub async fn lesson(&self, course_id: &str, position: i32, points: i64) -> Lesson {
        let mut lesson = Lesson::new(course_id, &format!("Lesson {}", position), position);
        lesson.points = points;
        self.repos.lessons.create(lesson).await.expect("seed lesson")
    }

    pub async fn exercise(&self, lesson_id: &str, answer: &str, points: i64) -> Exercise {
        let mut exercise = Exercise::new(lesson_id, "Derivative", "d/dx 3x^2", answer, 1);
        exercise.points = points;
        self.repos
            .exercises
            .create(exercise)
            .await
            .expect("seed exercise")
    }

    pub async fn user_points(&self, user_id: &str) -> i64 {
        self.repos
            .users
            .find_by_id(user_id)
            .await
            .expect("lookup")
            .expect("user exists")
            .points
    }
}
