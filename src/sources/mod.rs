pub mod frontmatter;
pub mod properties;
pub mod remote;

pub use frontmatter::FrontmatterSource;
pub use remote::RemoteSource;
