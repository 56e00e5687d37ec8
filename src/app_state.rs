use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AchievementRepository, AreaRepository, CourseAssignmentRepository, CourseRepository,
        EnrollmentRepository, ExerciseAttemptRepository, ExerciseRepository,
        LessonProgressRepository, LessonRepository, MongoAchievementRepository,
        MongoAreaRepository, MongoCourseAssignmentRepository, MongoCourseRepository,
        MongoEnrollmentRepository, MongoExerciseAttemptRepository, MongoExerciseRepository,
        MongoLessonProgressRepository, MongoLessonRepository, MongoTeacherStudentRepository,
        MongoUserRepository, TeacherStudentRepository, UserRepository,
    },
    services::{
        AccessService, AchievementService, AttemptService, AuthService, CourseService,
        EnrollmentService, ExerciseService, LessonService, ProgressService, RankingService,
        StatisticsService, TeacherService, UserService,
    },
};

/// Every store the services read and write.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub areas: Arc<dyn AreaRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub progress: Arc<dyn LessonProgressRepository>,
    pub attempts: Arc<dyn ExerciseAttemptRepository>,
    pub links: Arc<dyn TeacherStudentRepository>,
    pub assignments: Arc<dyn CourseAssignmentRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            areas: Arc::new(MongoAreaRepository::new(db)),
            courses: Arc::new(MongoCourseRepository::new(db)),
            lessons: Arc::new(MongoLessonRepository::new(db)),
            exercises: Arc::new(MongoExerciseRepository::new(db)),
            enrollments: Arc::new(MongoEnrollmentRepository::new(db)),
            progress: Arc::new(MongoLessonProgressRepository::new(db)),
            attempts: Arc::new(MongoExerciseAttemptRepository::new(db)),
            links: Arc::new(MongoTeacherStudentRepository::new(db)),
            assignments: Arc::new(MongoCourseAssignmentRepository::new(db)),
            achievements: Arc::new(MongoAchievementRepository::new(db)),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.areas.ensure_indexes().await?;
        self.courses.ensure_indexes().await?;
        self.lessons.ensure_indexes().await?;
        self.exercises.ensure_indexes().await?;
        self.enrollments.ensure_indexes().await?;
        self.progress.ensure_indexes().await?;
        self.attempts.ensure_indexes().await?;
        self.links.ensure_indexes().await?;
        self.assignments.ensure_indexes().await?;
        self.achievements.ensure_indexes().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Option<Database>,
    pub jwt_service: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub course_service: Arc<CourseService>,
    pub lesson_service: Arc<LessonService>,
    pub exercise_service: Arc<ExerciseService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub progress_service: Arc<ProgressService>,
    pub attempt_service: Arc<AttemptService>,
    pub teacher_service: Arc<TeacherService>,
    pub achievement_service: Arc<AchievementService>,
    pub ranking_service: Arc<RankingService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repositories = Repositories::mongo(&db);
        repositories.ensure_indexes().await?;

        Ok(Self::from_repositories(config, repositories, Some(db)))
    }

    /// Wires the services over any set of stores; tests pass in-memory ones.
    pub fn from_repositories(config: Config, repos: Repositories, db: Option<Database>) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_minutes,
        ));

        let access = Arc::new(AccessService::new(
            repos.courses.clone(),
            repos.lessons.clone(),
            repos.exercises.clone(),
            repos.enrollments.clone(),
            repos.links.clone(),
        ));
        let achievement_service = Arc::new(AchievementService::new(
            repos.achievements.clone(),
            repos.users.clone(),
        ));
        let progress_service = Arc::new(ProgressService::new(
            access.clone(),
            repos.lessons.clone(),
            repos.enrollments.clone(),
            repos.progress.clone(),
            repos.users.clone(),
            repos.assignments.clone(),
            achievement_service.clone(),
        ));
        let enrollment_service = Arc::new(EnrollmentService::new(
            access.clone(),
            repos.enrollments.clone(),
            progress_service.clone(),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(repos.users.clone(), jwt_service.clone())),
            user_service: Arc::new(UserService::new(repos.users.clone())),
            course_service: Arc::new(CourseService::new(
                access.clone(),
                repos.areas.clone(),
                repos.courses.clone(),
                repos.users.clone(),
            )),
            lesson_service: Arc::new(LessonService::new(
                access.clone(),
                repos.lessons.clone(),
                progress_service.clone(),
            )),
            exercise_service: Arc::new(ExerciseService::new(access.clone(), repos.exercises.clone())),
            attempt_service: Arc::new(AttemptService::new(
                access.clone(),
                repos.attempts.clone(),
                repos.enrollments.clone(),
                progress_service.clone(),
            )),
            teacher_service: Arc::new(TeacherService::new(
                access.clone(),
                repos.users.clone(),
                repos.links.clone(),
                repos.assignments.clone(),
                enrollment_service.clone(),
                progress_service.clone(),
            )),
            ranking_service: Arc::new(RankingService::new(repos.users.clone())),
            statistics_service: Arc::new(StatisticsService::new(
                access,
                repos.users,
                repos.courses,
                repos.lessons,
                repos.exercises,
                repos.enrollments,
                repos.progress,
                repos.attempts,
                repos.achievements,
            )),
            enrollment_service,
            progress_service,
            achievement_service,
            jwt_service,
            db,
            config: Arc::new(config),
        }
    }

    /// Ready when the database answers a ping; states without a database
    /// (in-memory stores) are always ready.
    pub async fn is_ready(&self) -> bool {
        match &self.db {
            Some(db) => db.health_check().await.is_ok(),
            None => true,
        }
    }
}
