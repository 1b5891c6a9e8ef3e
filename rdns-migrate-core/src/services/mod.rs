//! 业务逻辑服务层

mod migration_service;
mod source_reader;

pub use migration_service::MigrationService;
pub use source_reader::{SourceReader, TOKEN_ORIGIN_KEY};
