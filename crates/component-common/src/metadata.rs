//! 组件元数据

use crate::component::{Component, ComponentName, ComponentTypeId};
use std::collections::HashSet;

/// 已加载组件的自省视图
///
/// 依赖集合来自加载时的声明，加载后不再复查
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    /// 组件名称
    pub name: ComponentName,
    /// 组件类型
    pub type_id: ComponentTypeId,
    /// 声明的依赖集合
    pub dependencies: HashSet<ComponentName>,
}

impl ComponentMetadata {
    /// 从已解析组件构造元数据视图
    pub fn of(name: ComponentName, component: &Component) -> Self {
        Self {
            name,
            type_id: component.type_id.clone(),
            dependencies: component.dependencies.clone(),
        }
    }
}
