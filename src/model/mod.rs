pub mod ids;
pub mod user;
pub mod group;

// Re-exports for convenience
pub use ids::{ids_match, Id};
pub use user::{Session, User};
pub use group::{Group, GroupMember, MembershipRecord, NewGroup};
