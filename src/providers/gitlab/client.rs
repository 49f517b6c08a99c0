mod core;
mod groups;
mod projects;

pub use self::core::GitLabClient;
