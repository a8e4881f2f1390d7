pub mod admin;
pub mod attendance_record;

pub use admin::Entity as Admin;
pub use attendance_record::Entity as AttendanceRecord;
