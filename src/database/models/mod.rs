pub mod attendance;
pub mod authority;
pub mod candidate;
pub mod company;
pub mod department;
pub mod notification;
pub mod rank;
pub mod recruitment;
pub mod salary;
pub mod salary_record;
pub mod staff;

pub use attendance::{AttendanceCreate, AttendanceEdit, AttendanceRecord, ApproveStatus};
pub use authority::{
    Authority, AuthorityDetail, AuthorityDetailCreate, AuthorityDetailEdit, AuthorityDetailQuery, PasswordEdit,
    UserType,
};
pub use candidate::{Candidate, CandidateCreate, CandidateEdit, CandidateStatus};
pub use company::{BranchCompany, BranchCompanyCreate};
pub use department::{Department, DepartmentCreate, DepartmentEdit};
pub use notification::{Notification, NotificationCreate, NotificationEdit, URGENT_NOTICE_TYPE};
pub use rank::{Rank, RankCreate, RankEdit};
pub use recruitment::{Recruitment, RecruitmentCreate, RecruitmentEdit};
pub use salary::{Salary, SalaryCreate, SalaryEdit};
pub use salary_record::SalaryRecord;
pub use staff::{Sex, Staff, StaffCreate, StaffEdit, StaffView};
