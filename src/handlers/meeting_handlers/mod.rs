pub mod api;
pub mod calendar;
pub mod crud;
pub mod forms;
pub mod list;

pub use api::*;
pub use calendar::*;
pub use crud::*;
pub use forms::*;
pub use list::*;
