//! 类型定义模块

mod record;
mod report;
mod response;

pub use record::{Domain, Frozen, StoreNode, Token};
pub use report::{MigrationReport, RecordKind, RecordOutcome};
pub use response::Response;
