use std::{collections::HashSet, sync::Arc};

use crate::{
    auth::policy::{Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{AssignmentState, CourseAssignment, TeacherStudentLink, User, UserRole},
        dto::{
            request::{CreateAssignmentRequest, LinkTeacherStudentRequest, UpdateAssignmentRequest},
            response::CourseProgressDto,
        },
    },
    repositories::{CourseAssignmentRepository, TeacherStudentRepository, UserRepository},
    services::{
        access_service::AccessService, enrollment_service::EnrollmentService,
        progress_service::ProgressService,
    },
};

/// Teacher-student links, rosters and course assignments.
pub struct TeacherService {
    access: Arc<AccessService>,
    users: Arc<dyn UserRepository>,
    links: Arc<dyn TeacherStudentRepository>,
    assignments: Arc<dyn CourseAssignmentRepository>,
    enrollments: Arc<EnrollmentService>,
    progress: Arc<ProgressService>,
}

impl TeacherService {
    pub fn new(
        access: Arc<AccessService>,
        users: Arc<dyn UserRepository>,
        links: Arc<dyn TeacherStudentRepository>,
        assignments: Arc<dyn CourseAssignmentRepository>,
        enrollments: Arc<EnrollmentService>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            access,
            users,
            links,
            assignments,
            enrollments,
            progress,
        }
    }

    pub async fn link(&self, actor: &Actor, request: LinkTeacherStudentRequest) -> AppResult<TeacherStudentLink> {
        self.access
            .check(actor, Action::LinkTeacherStudent, Target::Platform)?;

        self.user_with_role(&request.teacher_id, UserRole::Teacher).await?;
        self.user_with_role(&request.student_id, UserRole::Student).await?;

        if self
            .links
            .find_active(&request.teacher_id, &request.student_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(
                "This student is already linked to the teacher".to_string(),
            ));
        }

        let link = self
            .links
            .create(TeacherStudentLink::new(&request.teacher_id, &request.student_id))
            .await?;
        log::info!("Linked student {} to teacher {}", link.student_id, link.teacher_id);
        Ok(link)
    }

    pub async fn roster(&self, actor: &Actor) -> AppResult<Vec<User>> {
        self.check_own_records(actor, Action::ViewRoster)?;

        let mut students = Vec::new();
        for link in self.links.list_active_by_teacher(&actor.user_id).await? {
            if let Some(student) = self.users.find_by_id(&link.student_id).await? {
                if student.active {
                    students.push(student);
                }
            }
        }
        Ok(students)
    }

    /// Bulk assignment. Unknown, inactive or non-student ids and students
    /// who already hold this assignment are skipped, not errors.
    pub async fn assign(&self, actor: &Actor, request: CreateAssignmentRequest) -> AppResult<Vec<CourseAssignment>> {
        self.check_own_records(actor, Action::AssignCourse)?;
        let course = self.access.active_course(&request.course_id).await?;

        let mut seen = HashSet::new();
        let mut created = Vec::new();

        for student_id in request.student_ids {
            if !seen.insert(student_id.clone()) {
                continue;
            }

            let eligible = matches!(
                self.users.find_by_id(&student_id).await?,
                Some(user) if user.is_student() && user.active
            );
            if !eligible {
                log::warn!("Skipping assignment for unknown or non-student id {}", student_id);
                continue;
            }

            if self
                .assignments
                .find_active(&actor.user_id, &student_id, &course.id)
                .await?
                .is_some()
            {
                log::warn!(
                    "Student {} already has course {} assigned; skipping",
                    student_id,
                    course.id
                );
                continue;
            }

            let mut assignment = CourseAssignment::new(&actor.user_id, &student_id, &course.id);
            assignment.due_date = request.due_date;
            assignment.notes = request.notes.clone();
            created.push(self.assignments.create(assignment).await?);
        }

        log::info!(
            "Teacher {} assigned course {} to {} student(s)",
            actor.user_id,
            course.id,
            created.len()
        );
        Ok(created)
    }

    pub async fn list_assignments(&self, actor: &Actor) -> AppResult<Vec<CourseAssignment>> {
        self.check_own_records(actor, Action::ViewAssignments)?;
        self.assignments.list_active_by_teacher(&actor.user_id).await
    }

    pub async fn update_assignment(&self, actor: &Actor, id: &str, request: UpdateAssignmentRequest) -> AppResult<CourseAssignment> {
        let mut assignment = self.assignment(id).await?;
        self.check_records_of(actor, Action::UpdateAssignment, &assignment.teacher_id)?;

        if request.due_date.is_some() {
            assignment.due_date = request.due_date;
        }
        if request.notes.is_some() {
            assignment.notes = request.notes;
        }
        if let Some(state) = request.state {
            assignment.state = state;
        }

        self.assignments.update(assignment).await
    }

    pub async fn remove_assignment(&self, actor: &Actor, id: &str) -> AppResult<CourseAssignment> {
        let mut assignment = self.assignment(id).await?;
        self.check_records_of(actor, Action::RemoveAssignment, &assignment.teacher_id)?;

        assignment.active = false;
        let assignment = self.assignments.update(assignment).await?;
        log::info!("Assignment {} removed by {}", assignment.id, actor.user_id);
        Ok(assignment)
    }

    pub async fn student_assignments(&self, actor: &Actor) -> AppResult<Vec<CourseAssignment>> {
        self.access.check(
            actor,
            Action::ViewAssignedCourses,
            Target::User {
                user_id: &actor.user_id,
            },
        )?;
        self.assignments.list_active_by_student(&actor.user_id).await
    }

    /// Moves an Assigned assignment to InProgress and enrolls the student in
    /// the course if they are not enrolled yet.
    pub async fn start_assignment(&self, actor: &Actor, id: &str) -> AppResult<CourseAssignment> {
        let mut assignment = self.assignment(id).await?;
        self.access.check(
            actor,
            Action::StartAssignment,
            Target::StudentRecords {
                student_id: &assignment.student_id,
            },
        )?;

        let course = self.access.active_course(&assignment.course_id).await?;
        match self.enrollments.enroll_user(&assignment.student_id, &course).await {
            Ok(_) | Err(AppError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }

        if assignment.state != AssignmentState::Assigned {
            return Ok(assignment);
        }
        assignment.state = AssignmentState::InProgress;
        let assignment = self.assignments.update(assignment).await?;
        log::info!("Student {} started assignment {}", assignment.student_id, assignment.id);
        Ok(assignment)
    }

    /// A student's progress in a course, for the course owner or a teacher
    /// linked to the student.
    pub async fn student_course_progress(&self, actor: &Actor, student_id: &str, course_id: &str) -> AppResult<CourseProgressDto> {
        let course = self.access.course(course_id).await?;
        self.user_with_role(student_id, UserRole::Student).await?;

        let owner_report = self.access.check(
            actor,
            Action::ViewCourseReport,
            Target::Course {
                owner_id: &course.teacher_id,
            },
        );
        if owner_report.is_err() {
            self.access.authorize_statistics(actor, student_id).await?;
        }

        self.progress.course_progress(student_id, &course.id).await
    }

    fn check_own_records(&self, actor: &Actor, action: Action) -> AppResult<()> {
        self.check_records_of(actor, action, &actor.user_id)
    }

    fn check_records_of(&self, actor: &Actor, action: Action, teacher_id: &str) -> AppResult<()> {
        self.access
            .check(actor, action, Target::TeacherRecords { teacher_id })
    }

    async fn assignment(&self, id: &str) -> AppResult<CourseAssignment> {
        self.assignments
            .find_by_id(id)
            .await?
            .filter(|a| a.active)
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id '{}' not found", id)))
    }

    async fn user_with_role(&self, user_id: &str, role: UserRole) -> AppResult<User> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;

        if user.role != role || !user.active {
            return Err(AppError::ValidationError(format!(
                "User '{}' is not an active {}",
                user_id,
                role.as_str()
            )));
        }
        Ok(user)
    }
}
