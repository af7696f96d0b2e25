//! # Container Impl
//!
//! 这个 crate 提供 Wireup 组件容器抽象的具体实现。
//!
//! ## 主要实现
//!
//! - [`FactoryRegistryImpl`] - 读写锁保护的工厂注册中心
//! - [`construction_order`] - 基于拓扑排序的批次构造顺序计算
//! - [`ComponentContainerImpl`] - 容器树节点实现
//! - [`ComponentContainerBuilder`] - 容器构建器
//!
//! ## 锁约定
//!
//! 每个容器只串行化自身的本地组件表：查找取读锁，提交取写锁。
//! 工厂构造调用一律发生在容器锁之外，工厂因此可以回调同一容器
//! 解析依赖或构造嵌套作用域而不会死锁

pub mod container;
pub mod loader;
pub mod registry;

pub use container::{ComponentContainerBuilder, ComponentContainerImpl};
pub use loader::construction_order;
pub use registry::FactoryRegistryImpl;
