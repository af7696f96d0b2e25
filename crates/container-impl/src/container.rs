//! 组件容器实现

use crate::loader::construction_order;
use crate::registry::FactoryRegistryImpl;
use component_common::{
    Component, ComponentDefinition, ComponentError, ComponentMetadata, ComponentName,
};
use container_abstractions::{ComponentContainer, Context, FactoryRegistry};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};
use tracing::{debug, error};

/// 容器树节点实现
///
/// 持有本地已解析组件表与共享的工厂注册中心；父链接是非所有权的弱引用，
/// 仅用于树导航，不维持父容器存活
pub struct ComponentContainerImpl {
    self_name: ComponentName,
    parent: Option<Weak<dyn ComponentContainer>>,
    factory_registry: Arc<dyn FactoryRegistry>,
    components: RwLock<HashMap<ComponentName, Component>>,
    self_weak: Weak<ComponentContainerImpl>,
}

impl ComponentContainerImpl {
    /// 自身的共享句柄，用于向工厂传递构造上下文
    fn self_handle(&self) -> Arc<dyn ComponentContainer> {
        let arc = self
            .self_weak
            .upgrade()
            .expect("容器在方法调用期间必然存活");
        arc
    }

    /// 解析单个配置条目
    ///
    /// 依赖检查与工厂查找在锁内完成后立即释放锁，工厂构造调用发生在
    /// 容器锁之外，允许工厂回调本容器
    fn load_component(
        &self,
        name: &ComponentName,
        definition: &ComponentDefinition,
    ) -> Result<Component, ComponentError> {
        let Some(type_id) = &definition.type_id else {
            if let Some(refer) = &definition.refer {
                // 引用组件，身份共享
                return self.get_component(refer);
            }
            return Err(ComponentError::config_invalid("type 与 refer 均未设置"));
        };

        // 检查依赖关系是否满足
        {
            let components = self.components.read();
            for dep in &definition.deps {
                if !components.contains_key(dep) {
                    return Err(ComponentError::DependencyNotFound {
                        dependency: dep.clone(),
                        referrer: name.clone(),
                    });
                }
            }
        }

        // 获取工厂
        let factory = self.factory_registry.get_factory(type_id)?;

        // 构造组件实例，此时不持有任何容器锁
        let ctx = Context::new(name.clone(), self.self_handle());
        let instance = factory.create_instance(ctx, &definition.config)?;

        Ok(Component {
            type_id: factory.type_id(),
            dependencies: definition.deps.iter().cloned().collect(),
            instance,
        })
    }
}

impl ComponentContainer for ComponentContainerImpl {
    fn factory_registry(&self) -> Arc<dyn FactoryRegistry> {
        self.factory_registry.clone()
    }

    fn get_component(&self, name: &ComponentName) -> Result<Component, ComponentError> {
        self.components
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ComponentError::NameNotFound { name: name.clone() })
    }

    fn load_anonymous_component(
        &self,
        definition: &ComponentDefinition,
    ) -> Result<Component, ComponentError> {
        self.load_component(&ComponentName::anonymous(), definition)
    }

    fn load_named_components(
        &self,
        batch: HashMap<ComponentName, ComponentDefinition>,
    ) -> Result<(), ComponentError> {
        // 名称格式校验先于任何构造
        for name in batch.keys() {
            if !name.is_valid() {
                return Err(ComponentError::NameInvalid { name: name.clone() });
            }
        }

        // 重复声明既有名称是错误，不做静默覆盖
        {
            let components = self.components.read();
            for name in batch.keys() {
                if components.contains_key(name) {
                    return Err(ComponentError::AlreadyExists { name: name.clone() });
                }
            }
        }

        // 记录完整的声明依赖集合，提交时写入组件元数据
        let declared: HashMap<ComponentName, HashSet<ComponentName>> = batch
            .iter()
            .map(|(name, definition)| {
                (name.clone(), definition.deps.iter().cloned().collect())
            })
            .collect();

        // 剔除容器中已解析的依赖，它们对本批次不构成排序约束
        let mut pending = batch;
        {
            let components = self.components.read();
            for definition in pending.values_mut() {
                definition.deps.retain(|dep| !components.contains_key(dep));
            }
        }

        // 对批次做拓扑排序，随后严格按序逐个构造
        let order = construction_order(&pending)?;
        debug!("组件批次加载顺序: {:?}", order);
        for name in order {
            let component = match self.load_component(&name, &pending[&name]) {
                Ok(component) => component,
                Err(err) => {
                    // 首个错误中止批次，已提交的组件保留
                    error!("组件加载失败: {}, {}", name, err);
                    return Err(err);
                }
            };
            let resolved = Component {
                type_id: component.type_id,
                dependencies: declared[&name].clone(),
                instance: component.instance,
            };
            debug!("组件已加载: {} ({})", name, resolved.type_id);
            self.components.write().insert(name, resolved);
        }
        Ok(())
    }

    fn put_component(&self, name: ComponentName, component: Component) {
        self.components.write().insert(name, component);
    }

    fn get_component_metadata(
        &self,
        name: &ComponentName,
    ) -> Result<ComponentMetadata, ComponentError> {
        let component = self.get_component(name)?;
        Ok(ComponentMetadata::of(name.clone(), &component))
    }

    fn loaded_component_names(&self) -> Vec<ComponentName> {
        self.components.read().keys().cloned().collect()
    }

    fn unload_named_components(
        &self,
        _names: &[ComponentName],
        _recursive: bool,
    ) -> Result<(), ComponentError> {
        unimplemented!("组件卸载暂未实现")
    }

    fn get_parent(&self) -> Option<Arc<dyn ComponentContainer>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    fn self_component_name(&self) -> ComponentName {
        self.self_name.clone()
    }
}

/// 容器构建器
///
/// 未指定注册中心时构建一个空的私有注册中心；父链接在构建时降级为
/// 弱引用
pub struct ComponentContainerBuilder {
    self_name: ComponentName,
    parent: Option<Weak<dyn ComponentContainer>>,
    factory_registry: Option<Arc<dyn FactoryRegistry>>,
}

impl ComponentContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            self_name: ComponentName::anonymous(),
            parent: None,
            factory_registry: None,
        }
    }

    /// 设置自身在父容器中的名称
    pub fn with_self_name(mut self, name: impl Into<ComponentName>) -> Self {
        self.self_name = name.into();
        self
    }

    /// 设置父容器
    pub fn with_parent(mut self, parent: &Arc<dyn ComponentContainer>) -> Self {
        self.parent = Some(Arc::downgrade(parent));
        self
    }

    /// 设置工厂注册中心
    pub fn with_factory_registry(mut self, registry: Arc<dyn FactoryRegistry>) -> Self {
        self.factory_registry = Some(registry);
        self
    }

    /// 构建容器
    pub fn build(self) -> Arc<ComponentContainerImpl> {
        let factory_registry = self
            .factory_registry
            .unwrap_or_else(|| Arc::new(FactoryRegistryImpl::new()));
        Arc::new_cyclic(|weak| ComponentContainerImpl {
            self_name: self.self_name,
            parent: self.parent,
            factory_registry,
            components: RwLock::new(HashMap::new()),
            self_weak: weak.clone(),
        })
    }
}

impl Default for ComponentContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
