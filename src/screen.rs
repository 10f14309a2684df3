//! Review details screen: update-loop model and single-writer driver.
//!
//! The screen applies a user's rating optimistically, submits it to the
//! rating service, and rolls the entity back when the submission fails. A
//! failed submission surfaces as a transient error that clears itself after
//! a short, fixed window. The model applies events synchronously; the driver
//! owns it on one tokio task so observers always see a consistent
//! review/comment graph.

pub mod details;
pub mod handle;
pub mod messages;

pub use details::{ERROR_DISPLAY_WINDOW, ReviewDetailsModel, ReviewDetailsState};
pub use handle::ReviewDetailsScreen;
pub use messages::{Command, ScreenEvent};
