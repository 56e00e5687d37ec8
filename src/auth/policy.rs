//! Role, ownership and relationship based access decisions.
//!
//! `authorize` is pure: callers resolve relationship facts (who owns a course,
//! whether the actor is enrolled, whether a teacher-student link exists) from
//! the store and pass them in through [`Target`]. Rules are evaluated in order
//! and the first rule that allows wins; anything left over is denied.

use crate::{
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: &str, role: UserRole) -> Self {
        Self {
            user_id: user_id.to_string(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor::new(&user.id, user.role)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    // Self-access
    ReadProfile,
    UpdateProfile,
    ViewProgress,
    ViewAttempts,
    ViewStatistics,
    ViewAchievements,
    // Ownership
    CreateCourse,
    ManageCourse,
    ManageContent,
    ViewCourseReport,
    // Assignment-scoped
    AssignCourse,
    ViewRoster,
    ViewAssignments,
    UpdateAssignment,
    RemoveAssignment,
    // Student-scoped
    ViewContent,
    AttemptExercise,
    ViewAssignedCourses,
    StartAssignment,
    // Admin only
    ManageUsers,
    ManageAreas,
    LinkTeacherStudent,
    ManageAchievements,
    GrantAchievement,
    ViewPlatformStatistics,
}

impl Action {
    fn is_self_access(&self) -> bool {
        matches!(
            self,
            Action::ReadProfile
                | Action::UpdateProfile
                | Action::ViewProgress
                | Action::ViewAttempts
                | Action::ViewStatistics
                | Action::ViewAchievements
        )
    }

    fn is_assignment_scoped(&self) -> bool {
        matches!(
            self,
            Action::AssignCourse
                | Action::ViewRoster
                | Action::ViewAssignments
                | Action::UpdateAssignment
                | Action::RemoveAssignment
        )
    }
}

/// The resource an action applies to, with the relationship facts the rules need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'a> {
    /// Resources belonging to a single user: profile, points, progress, attempts.
    User { user_id: &'a str },
    /// A course (or anything under it) and its owning teacher.
    Course { owner_id: &'a str },
    /// Lesson or exercise detail; `enrolled` is the actor's active enrollment.
    CourseContent { owner_id: &'a str, enrolled: bool },
    /// Roster and assignment records of one teacher.
    TeacherRecords { teacher_id: &'a str },
    /// An assignment as seen from its student party.
    StudentRecords { student_id: &'a str },
    /// A student's statistics; `linked` is an active link to the actor.
    StudentStatistics { student_id: &'a str, linked: bool },
    /// Platform-wide operations with no owner.
    Platform,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> AppResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(AppError::Forbidden(reason)),
        }
    }
}

pub fn authorize(actor: &Actor, action: Action, target: Target<'_>) -> Decision {
    if actor.is_admin() {
        return Decision::Allow;
    }

    if action.is_self_access() && is_self(actor, target) {
        return Decision::Allow;
    }

    if actor.role == UserRole::Teacher {
        if owns(actor, action, target) {
            return Decision::Allow;
        }

        if action.is_assignment_scoped() {
            if let Target::TeacherRecords { teacher_id } = target {
                if teacher_id == actor.user_id {
                    return Decision::Allow;
                }
            }
        }

        if let (Action::ViewStatistics, Target::StudentStatistics { linked: true, .. }) =
            (action, target)
        {
            return Decision::Allow;
        }
    }

    if actor.role == UserRole::Student && student_may(actor, action, target) {
        return Decision::Allow;
    }

    Decision::Deny(deny_reason(actor, action))
}

fn is_self(actor: &Actor, target: Target<'_>) -> bool {
    match target {
        Target::User { user_id } => user_id == actor.user_id,
        Target::StudentStatistics { student_id, .. } => student_id == actor.user_id,
        _ => false,
    }
}

fn owns(actor: &Actor, action: Action, target: Target<'_>) -> bool {
    match (action, target) {
        (Action::CreateCourse, Target::Platform) => true,
        (Action::ManageCourse, Target::Course { owner_id })
        | (Action::ManageContent, Target::Course { owner_id })
        | (Action::ViewCourseReport, Target::Course { owner_id })
        | (Action::ViewContent, Target::CourseContent { owner_id, .. }) => {
            owner_id == actor.user_id
        }
        _ => false,
    }
}

fn student_may(actor: &Actor, action: Action, target: Target<'_>) -> bool {
    match (action, target) {
        (Action::ViewContent, Target::CourseContent { enrolled, .. })
        | (Action::AttemptExercise, Target::CourseContent { enrolled, .. }) => enrolled,
        (Action::ViewAssignedCourses, Target::User { user_id })
        | (Action::StartAssignment, Target::StudentRecords { student_id: user_id }) => {
            user_id == actor.user_id
        }
        _ => false,
    }
}

fn deny_reason(actor: &Actor, action: Action) -> String {
    match (actor.role, action) {
        (UserRole::Student, Action::ViewContent) | (UserRole::Student, Action::AttemptExercise) => {
            "You must be enrolled in this course".to_string()
        }
        (UserRole::Student, a) if a.is_assignment_scoped() => {
            "Only teachers can manage assignments".to_string()
        }
        (UserRole::Teacher, Action::ViewStatistics) => {
            "This student is not linked to you".to_string()
        }
        (_, Action::ManageCourse) | (_, Action::ManageContent) | (_, Action::ViewCourseReport) => {
            "You do not own this course".to_string()
        }
        (_, Action::ViewAssignedCourses) | (_, Action::StartAssignment) => {
            "Only the assigned student can do this".to_string()
        }
        _ => "You do not have permission to perform this action".to_string(),
    }
}
