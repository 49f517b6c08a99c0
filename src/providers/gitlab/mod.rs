mod client;
mod links;
mod migrator;
mod types;


pub use client::GitLabClient;
pub use migrator::Migrator;
