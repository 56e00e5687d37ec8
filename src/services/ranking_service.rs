use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::User, dto::response::RankingEntry},
    repositories::UserRepository,
};

/// Leaderboard over active students, by points then email.
pub struct RankingService {
    users: Arc<dyn UserRepository>,
}

impl RankingService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn leaderboard(&self, offset: i64, limit: i64) -> AppResult<(Vec<RankingEntry>, i64)> {
        let (students, total) = self.users.list_students_by_points(offset, limit).await?;

        let entries = students
            .iter()
            .enumerate()
            .map(|(i, user)| Self::entry(offset + i as i64 + 1, user))
            .collect();

        Ok((entries, total))
    }

    pub async fn rank_of(&self, user_id: &str) -> AppResult<RankingEntry> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .filter(|u| u.is_student() && u.active)
            .ok_or_else(|| AppError::NotFound(format!("No ranked student with id '{}'", user_id)))?;

        let ahead = self
            .users
            .count_students_ranked_ahead(user.points, &user.email)
            .await?;
        Ok(Self::entry(ahead + 1, &user))
    }

    fn entry(rank: i64, user: &User) -> RankingEntry {
        RankingEntry {
            rank,
            user_id: user.id.clone(),
            full_name: user.full_name(),
            points: user.points,
            level: user.level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::domain::UserRole, repositories::MockUserRepository};

    fn student(name: &str, points: i64) -> User {
        let mut user = User::test_user(name, UserRole::Student);
        user.points = points;
        user
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_continue_across_pages() {
        let page = vec![student("carla", 80), student("diego", 40)];
        let mut users = MockUserRepository::new();
        users
            .expect_list_students_by_points()
            .returning(move |_, _| Ok((page.clone(), 4)));

        let (entries, total) = RankingService::new(Arc::new(users))
            .leaderboard(2, 2)
            .await
            .unwrap();

        assert_eq!(total, 4);
        assert_eq!(entries[0].rank, 3);
        assert_eq!(entries[1].rank, 4);
        assert_eq!(entries[1].full_name, "diego Test");
    }

    #[tokio::test]
    async fn test_rank_of_counts_students_ahead() {
        let juan = student("juan", 150);
        let id = juan.id.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(juan.clone())));
        users
            .expect_count_students_ranked_ahead()
            .withf(|points, email| *points == 150 && email == "juan@example.com")
            .returning(|_, _| Ok(2));

        let entry = RankingService::new(Arc::new(users)).rank_of(&id).await.unwrap();
        assert_eq!(entry.rank, 3);
        assert_eq!(entry.level, 2);
    }

    #[tokio::test]
    async fn test_teachers_are_not_ranked() {
        let teacher = User::test_user("maria", UserRole::Teacher);
        let id = teacher.id.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(teacher.clone())));

        let result = RankingService::new(Arc::new(users)).rank_of(&id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
