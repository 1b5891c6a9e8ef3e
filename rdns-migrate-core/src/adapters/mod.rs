//! Concrete collaborator implementations

mod etcd_v2;

pub use etcd_v2::EtcdV2Store;
