mod common;

use chrono::{Duration, Utc};
use mongodb::bson::{to_document, Bson};

use common::{
    InMemoryAchievementRepository, InMemoryEnrollmentRepository, InMemoryLessonProgressRepository,
    InMemoryTeacherStudentRepository, InMemoryUserRepository,
};
use edumath_server::{
    errors::AppError,
    models::domain::{
        Achievement, AssignmentState, CourseAssignment, Enrollment, LessonProgress,
        ProgressState, TeacherStudentLink, User, UserAchievement, UserRole,
    },
    repositories::{
        AchievementRepository, EnrollmentRepository, LessonProgressRepository,
        TeacherStudentRepository, UserRepository,
    },
};

fn make_user(first_name: &str, email: &str, role: UserRole) -> User {
    User::new(first_name, "Tester", email, "hash", role)
}

#[tokio::test]
async fn user_repository_uniqueness_points_and_ranking() {
    let repo = InMemoryUserRepository::new();

    let ana = repo
        .create(make_user("Ana", "ana@example.com", UserRole::Student))
        .await
        .expect("create ana");
    let juan = repo
        .create(make_user("Juan", "juan@example.com", UserRole::Student))
        .await
        .expect("create juan");
    repo.create(make_user("Maria", "maria@example.com", UserRole::Teacher))
        .await
        .expect("create teacher");

    let duplicate = repo
        .create(make_user("Other", "  ANA@example.com ", UserRole::Student))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo
        .find_by_email("Juan@Example.com")
        .await
        .expect("find by email should work");
    assert_eq!(found.map(|u| u.id), Some(juan.id.clone()));

    let updated = repo.add_points(&juan.id, 15).await.expect("add points");
    assert_eq!(updated.points, 15);
    let updated = repo.add_points(&juan.id, 5).await.expect("add points");
    assert_eq!(updated.points, 20);

    let missing = repo.add_points("missing", 5).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let (page, total) = repo
        .list_students_by_points(0, 10)
        .await
        .expect("ranking should work");
    assert_eq!(total, 2);
    assert_eq!(page[0].id, juan.id);
    assert_eq!(page[1].id, ana.id);

    let ahead = repo
        .count_students_ranked_ahead(ana.points, &ana.email)
        .await
        .expect("count should work");
    assert_eq!(ahead, 1);

    assert_eq!(repo.count_by_role(UserRole::Teacher).await.unwrap(), 1);
}

#[tokio::test]
async fn enrollment_repository_allows_one_active_enrollment() {
    let repo = InMemoryEnrollmentRepository::default();

    let first = repo
        .create(Enrollment::new("user-a", "course-1"))
        .await
        .expect("create enrollment");

    let duplicate = repo.create(Enrollment::new("user-a", "course-1")).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    repo.create(Enrollment::new("user-a", "course-2"))
        .await
        .expect("other course is fine");
    repo.create(Enrollment::new("user-b", "course-1"))
        .await
        .expect("other user is fine");

    let mut withdrawn = Enrollment::new("user-c", "course-1");
    withdrawn.active = false;
    repo.create(withdrawn).await.expect("inactive enrollment");
    repo.create(Enrollment::new("user-c", "course-1"))
        .await
        .expect("re-enrolling after withdrawal is fine");

    repo.add_points(&first.id, 10).await.expect("add points");
    let stamped = Utc::now();
    repo.update_progress(&first.id, 100.0, Some(stamped))
        .await
        .expect("update progress");
    repo.update_progress(&first.id, 50.0, None)
        .await
        .expect("update progress");

    let stored = repo
        .find_active("user-a", "course-1")
        .await
        .expect("find should work")
        .expect("enrollment exists");
    assert_eq!(stored.points, 10);
    assert_eq!(stored.progress_percentage, 50.0);
    assert_eq!(stored.completed_at, Some(stamped));

    assert_eq!(repo.list_active_by_user("user-a").await.unwrap().len(), 2);
    assert_eq!(repo.list_active_by_course("course-1").await.unwrap().len(), 3);
}

#[tokio::test]
async fn lesson_progress_completes_only_once() {
    let repo = InMemoryLessonProgressRepository::default();
    let started_at = Utc::now() - Duration::minutes(12);

    let record = repo
        .create(LessonProgress::started("user-a", "lesson-1", "course-1", started_at))
        .await
        .expect("create progress");

    let duplicate = repo
        .create(LessonProgress::not_started("user-a", "lesson-1", "course-1"))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let now = Utc::now();
    assert!(repo.complete_if_pending(&record.id, 10, now).await.unwrap());
    assert!(!repo
        .complete_if_pending(&record.id, 10, now + Duration::minutes(5))
        .await
        .unwrap());

    let stored = repo
        .find("user-a", "lesson-1")
        .await
        .expect("find should work")
        .expect("record exists");
    assert_eq!(stored.state, ProgressState::Completed);
    assert_eq!(stored.started_at, Some(started_at));
    assert_eq!(stored.completed_at, Some(now));
    assert_eq!(stored.points, 10);
    assert_eq!(stored.minutes_spent(), 12);

    assert!(!repo.complete_if_pending("missing", 10, now).await.unwrap());
    assert_eq!(
        repo.list_by_user_and_course("user-a", "course-1")
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn teacher_links_and_grants_are_unique() {
    let links = InMemoryTeacherStudentRepository::default();
    links
        .create(TeacherStudentLink::new("teacher-1", "student-1"))
        .await
        .expect("create link");
    let duplicate = links
        .create(TeacherStudentLink::new("teacher-1", "student-1"))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));
    assert!(links
        .find_active("teacher-1", "student-1")
        .await
        .unwrap()
        .is_some());
    assert!(links
        .find_active("teacher-2", "student-1")
        .await
        .unwrap()
        .is_none());

    let achievements = InMemoryAchievementRepository::default();
    let achievement = achievements
        .create(Achievement::new("Centurion", Some(100)))
        .await
        .expect("create achievement");
    achievements
        .grant(UserAchievement::new("student-1", &achievement.id))
        .await
        .expect("first grant");
    let again = achievements
        .grant(UserAchievement::new("student-1", &achievement.id))
        .await;
    assert!(matches!(again, Err(AppError::AlreadyExists(_))));
    assert_eq!(
        achievements
            .list_grants_by_user("student-1")
            .await
            .unwrap()
            .len(),
        1
    );
}

// The Mongo repositories filter on these stored field names and values.
#[test]
fn stored_documents_use_the_queried_field_names() {
    let record = LessonProgress::completed("user-a", "lesson-1", "course-1", 10, Utc::now());
    let doc = to_document(&record).expect("serialize progress");
    assert_eq!(
        doc.get("state"),
        Some(&Bson::String(ProgressState::Completed.as_str().to_string()))
    );
    assert_eq!(doc.get_str("lesson_id").unwrap(), "lesson-1");

    let mut assignment = CourseAssignment::new("teacher-1", "student-1", "course-1");
    assignment.state = AssignmentState::InProgress;
    let doc = to_document(&assignment).expect("serialize assignment");
    assert_eq!(
        doc.get_str("state").unwrap(),
        AssignmentState::InProgress.as_str()
    );
    assert!(doc.get_bool("active").unwrap());

    let user = make_user("Ana", "ana@example.com", UserRole::Student);
    let doc = to_document(&user).expect("serialize user");
    assert_eq!(doc.get_str("role").unwrap(), UserRole::Student.as_str());
    assert_eq!(doc.get_str("email").unwrap(), "ana@example.com");
}
