mod home;
mod repository;

pub use home::{repository_path, HomePage};
pub use repository::RepositoryPage;
