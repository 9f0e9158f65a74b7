pub mod grade_repository;
pub mod presence_repository;
pub mod school_class_repository;
pub mod session_repository;
pub mod student_repository;
pub mod subject_repository;
pub mod teacher_repository;
pub mod topic_repository;
pub mod user_repository;

pub use grade_repository::{GradeRepository, GradeWithLinks, NewGrade};
pub use presence_repository::PresenceRepository;
pub use school_class_repository::SchoolClassRepository;
pub use session_repository::SessionRepository;
pub use student_repository::{NewStudent, StudentFilter, StudentRepository};
pub use subject_repository::SubjectRepository;
pub use teacher_repository::{NewTeacher, TeacherRepository};
pub use topic_repository::TopicRepository;
pub use user_repository::UserRepository;
