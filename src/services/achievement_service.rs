use std::{collections::HashSet, sync::Arc};

use crate::{
    auth::policy::{authorize, Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{Achievement, User, UserAchievement},
        dto::request::CreateAchievementRequest,
    },
    repositories::{AchievementRepository, UserRepository},
};

pub struct AchievementService {
    achievements: Arc<dyn AchievementRepository>,
    users: Arc<dyn UserRepository>,
}

impl AchievementService {
    pub fn new(achievements: Arc<dyn AchievementRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { achievements, users }
    }

    pub async fn list(&self) -> AppResult<Vec<Achievement>> {
        self.achievements.list_active().await
    }

    pub async fn create(&self, actor: &Actor, request: CreateAchievementRequest) -> AppResult<Achievement> {
        authorize(actor, Action::ManageAchievements, Target::Platform).into_result()?;

        let mut achievement = Achievement::new(&request.name, request.points_required);
        achievement.description = request.description;
        achievement.icon = request.icon;

        let achievement = self.achievements.create(achievement).await?;
        log::info!("Created achievement {} ({})", achievement.name, achievement.id);
        Ok(achievement)
    }

    /// Achievements held by a user, paired with when they were awarded.
    pub async fn list_for_user(&self, actor: &Actor, user_id: &str) -> AppResult<Vec<(Achievement, UserAchievement)>> {
        authorize(actor, Action::ViewAchievements, Target::User { user_id }).into_result()?;
        self.user(user_id).await?;

        let mut held = Vec::new();
        for grant in self.achievements.list_grants_by_user(user_id).await? {
            if let Some(achievement) = self.achievements.find_by_id(&grant.achievement_id).await? {
                held.push((achievement, grant));
            }
        }
        Ok(held)
    }

    /// Manual grant; granting the same achievement twice is a conflict.
    pub async fn grant(&self, actor: &Actor, user_id: &str, achievement_id: &str) -> AppResult<(Achievement, UserAchievement)> {
        authorize(actor, Action::GrantAchievement, Target::Platform).into_result()?;

        self.user(user_id).await?;
        let achievement = self
            .achievements
            .find_by_id(achievement_id)
            .await?
            .filter(|a| a.active)
            .ok_or_else(|| {
                AppError::NotFound(format!("Achievement with id '{}' not found", achievement_id))
            })?;

        let grant = self
            .achievements
            .grant(UserAchievement::new(user_id, &achievement.id))
            .await?;
        log::info!("Granted achievement {} to user {}", achievement.name, user_id);
        Ok((achievement, grant))
    }

    /// Awards every threshold achievement the user's total now reaches and
    /// they do not hold yet. A grant lost to a concurrent award is ignored.
    pub async fn award_thresholds(&self, user: &User) -> AppResult<Vec<Achievement>> {
        let candidates: Vec<Achievement> = self
            .achievements
            .list_active()
            .await?
            .into_iter()
            .filter(|a| a.is_unlocked_by(user.points))
            .collect();

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let held: HashSet<String> = self
            .achievements
            .list_grants_by_user(&user.id)
            .await?
            .into_iter()
            .map(|g| g.achievement_id)
            .collect();

        let mut awarded = Vec::new();
        for achievement in candidates.into_iter().filter(|a| !held.contains(&a.id)) {
            match self
                .achievements
                .grant(UserAchievement::new(&user.id, &achievement.id))
                .await
            {
                Ok(_) => {
                    log::info!("User {} unlocked achievement {}", user.id, achievement.name);
                    awarded.push(achievement);
                }
                Err(AppError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(awarded)
    }

    async fn user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::UserRole,
        repositories::{MockAchievementRepository, MockUserRepository},
    };

    fn service(achievements: MockAchievementRepository, users: MockUserRepository) -> AchievementService {
        AchievementService::new(Arc::new(achievements), Arc::new(users))
    }

    fn student_with_points(points: i64) -> User {
        let mut user = User::test_user("juan", UserRole::Student);
        user.points = points;
        user
    }

    #[tokio::test]
    async fn test_award_thresholds_grants_only_reached_and_unheld() {
        let user = student_with_points(120);
        let reached = Achievement::new("Hundred", Some(100));
        let held = Achievement::new("Ten", Some(10));
        let unreached = Achievement::new("Thousand", Some(1000));
        let manual = Achievement::new("Teacher's pick", None);

        let held_grant = UserAchievement::new(&user.id, &held.id);
        let reached_id = reached.id.clone();

        let mut achievements = MockAchievementRepository::new();
        let catalogue = vec![reached.clone(), held, unreached, manual];
        achievements
            .expect_list_active()
            .returning(move || Ok(catalogue.clone()));
        achievements
            .expect_list_grants_by_user()
            .returning(move |_| Ok(vec![held_grant.clone()]));
        achievements
            .expect_grant()
            .times(1)
            .withf(move |g| g.achievement_id == reached_id)
            .returning(Ok);

        let awarded = service(achievements, MockUserRepository::new())
            .award_thresholds(&user)
            .await
            .unwrap();

        assert_eq!(awarded.len(), 1);
        assert_eq!(awarded[0].name, "Hundred");
    }

    #[tokio::test]
    async fn test_award_thresholds_ignores_concurrent_duplicate() {
        let user = student_with_points(100);
        let reached = Achievement::new("Hundred", Some(100));

        let mut achievements = MockAchievementRepository::new();
        achievements
            .expect_list_active()
            .returning(move || Ok(vec![reached.clone()]));
        achievements
            .expect_list_grants_by_user()
            .returning(|_| Ok(vec![]));
        achievements
            .expect_grant()
            .returning(|_| Err(AppError::AlreadyExists("already held".to_string())));

        let awarded = service(achievements, MockUserRepository::new())
            .award_thresholds(&user)
            .await
            .unwrap();
        assert!(awarded.is_empty());
    }

    #[tokio::test]
    async fn test_grant_requires_admin() {
        let teacher = Actor::new("t1", UserRole::Teacher);
        let result = service(MockAchievementRepository::new(), MockUserRepository::new())
            .grant(&teacher, "u1", "a1")
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_grant_unknown_user_is_not_found() {
        let admin = Actor::new("admin", UserRole::Admin);
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let result = service(MockAchievementRepository::new(), users)
            .grant(&admin, "ghost", "a1")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
