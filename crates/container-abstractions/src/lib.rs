//! # Container Abstractions
//!
//! 这个 crate 定义了 Wireup 组件容器的核心抽象接口。
//!
//! ## 核心抽象
//!
//! - [`ComponentFactory`] - 组件工厂，构造器与销毁器的组合
//! - [`FactoryRegistry`] - 组件工厂注册中心
//! - [`ComponentContainer`] - 容器树节点，持有本地组件命名空间
//! - [`Context`] - 构造期传给工厂的上下文
//! - [`TypedComponentFactory`] - 强类型工厂，经适配器泛化为统一签名
//!
//! ## 设计原则
//!
//! - 所有依赖以 `Arc<dyn Trait>` 形式注入
//! - 动态配置到静态配置的解码只在 [`decode_config`] 一处发生
//! - 注册中心在进程启动时显式构造并传入容器，不依赖全局状态

pub mod container;
pub mod factory;
pub mod registry;
pub mod simple;
pub mod typed;

pub use container::*;
pub use factory::*;
pub use registry::*;
pub use simple::*;
pub use typed::*;
