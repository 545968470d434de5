pub mod device;
pub mod inspection;
pub mod job_order;
pub mod task_completion;
pub mod task_entry;
pub mod test_log;
pub mod user;
pub mod work_log;

pub use device::Device;
pub use inspection::QualityInspection;
pub use job_order::JobOrder;
pub use task_completion::{TaskCompletion, TaskCompletionFile};
pub use task_entry::TaskEntry;
pub use test_log::TestLog;
pub use user::User;
pub use work_log::ProductionWorkLog;
