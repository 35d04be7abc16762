pub mod user;
pub mod order;
pub mod holding;

pub use user::{CurrentUser, User};
pub use order::{Order, Side};
pub use holding::Holding;
