pub mod m202510190001_create_admins;
pub mod m202510190002_create_attendance_records;
