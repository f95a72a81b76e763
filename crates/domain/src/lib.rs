mod duration;
mod month;
mod month_window;
mod playlist;
pub mod providers;
mod reminder;
mod shared;
mod submission;

pub use duration::{parse_offset, resolve_due_at, FormatError};
pub use month::{InvalidMonthError, MusicMonth, PromptDay, PRETTY_DATE_FORMAT};
pub use month_window::{MonthQuery, MonthStatus, MonthWindow};
pub use playlist::{ConvergencePlan, PlaylistBinding, PlaylistKey};
pub use reminder::Reminder;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use submission::{Submission, SubmissionQuery};
