//! 工厂注册中心实现

use component_common::{ComponentError, ComponentTypeId};
use container_abstractions::{ComponentFactory, FactoryRegistry};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 读写锁保护的工厂注册中心
///
/// 注册取写锁，查找取读锁；同类型重复注册时后注册者覆盖先注册者
pub struct FactoryRegistryImpl {
    factories: RwLock<HashMap<ComponentTypeId, Arc<dyn ComponentFactory>>>,
}

impl FactoryRegistryImpl {
    /// 创建空的注册中心
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for FactoryRegistryImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryRegistry for FactoryRegistryImpl {
    fn register(&self, factory: Arc<dyn ComponentFactory>) {
        let type_id = factory.type_id();
        debug!("注册组件工厂: {}", type_id);
        self.factories.write().insert(type_id, factory);
    }

    fn get_factory(
        &self,
        type_id: &ComponentTypeId,
    ) -> Result<Arc<dyn ComponentFactory>, ComponentError> {
        self.factories
            .read()
            .get(type_id)
            .cloned()
            .ok_or_else(|| ComponentError::TypeNotRegistered {
                type_id: type_id.clone(),
            })
    }

    fn registered_type_ids(&self) -> Vec<ComponentTypeId> {
        let mut type_ids: Vec<ComponentTypeId> =
            self.factories.read().keys().cloned().collect();
        type_ids.sort();
        type_ids
    }
}
