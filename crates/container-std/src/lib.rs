//! # Container Std
//!
//! 这个 crate 提供 Wireup 的标准作用域组件与路径解析器。
//!
//! ## 标准组件类型
//!
//! - `std.container` - 内联的嵌套作用域，配置内直接携带子批次
//! - `std.container-import` - 从外部文件导入批次的嵌套作用域
//! - `std.finder` - 以斜杠分隔的路径在容器树中定位组件
//!
//! ## 注册方式
//!
//! 注册中心在进程启动时显式构造，标准组件通过
//! [`register_std_components`] 一次性注册，不依赖任何全局状态

pub mod finder;
pub mod path;
pub mod scope;
pub mod source;

pub use finder::{FinderFactory, FINDER_TYPE};
pub use path::resolve_path;
pub use scope::{
    ImportContainerConfig, ImportContainerFactory, InlineContainerConfig, InlineContainerFactory,
    CONTAINER_TYPE, IMPORT_CONTAINER_TYPE,
};
pub use source::load_definitions_from_path;

use container_abstractions::{adapt, FactoryRegistry};
use std::sync::Arc;

/// 注册全部标准组件类型
pub fn register_std_components(registry: &dyn FactoryRegistry) {
    registry.register(adapt(scope::InlineContainerFactory));
    registry.register(adapt(scope::ImportContainerFactory));
    registry.register(Arc::new(finder::FinderFactory));
}
