//! 组件工厂注册中心抽象接口

use crate::factory::ComponentFactory;
use component_common::{ComponentError, ComponentTypeId};
use std::sync::Arc;

/// 组件工厂注册中心 trait
///
/// 注册通常在进程启动时一次性完成，查找则发生在每次组件构造时。
/// 实现必须对并发注册与查找安全
pub trait FactoryRegistry: Send + Sync {
    /// 注册组件工厂，同类型后注册者覆盖先注册者
    fn register(&self, factory: Arc<dyn ComponentFactory>);

    /// 按类型标识获取组件工厂
    fn get_factory(
        &self,
        type_id: &ComponentTypeId,
    ) -> Result<Arc<dyn ComponentFactory>, ComponentError>;

    /// 枚举所有已注册的组件类型
    fn registered_type_ids(&self) -> Vec<ComponentTypeId>;
}
