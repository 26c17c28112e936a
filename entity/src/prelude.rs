pub use super::device::Entity as Device;
pub use super::license::Entity as License;
pub use super::market::Entity as Market;
pub use super::notification::Entity as Notification;
pub use super::project::Entity as Project;
pub use super::version::Entity as Version;
