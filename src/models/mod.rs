pub mod goal;
pub mod reserve;
pub mod selection;
pub mod teacher;

pub use goal::Goal;
pub use reserve::{NewReserveRequest, Reserve};
pub use selection::{NewSelectionRequest, Selection};
pub use teacher::{FreeSlots, NewTeacherRequest, Teacher, TeacherCard};
