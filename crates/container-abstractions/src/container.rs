//! 组件容器抽象接口

use crate::registry::FactoryRegistry;
use component_common::{
    Component, ComponentDefinition, ComponentError, ComponentMetadata, ComponentName,
};
use std::collections::HashMap;
use std::sync::Arc;

/// 组件容器 trait
///
/// 容器是树节点：持有本地已解析组件表、共享的工厂注册中心、指向父容器
/// 的非所有权引用以及自身在父容器中的名称。组件只有缺省与已解析两种
/// 状态，没有半构造状态
pub trait ComponentContainer: Send + Sync {
    /// 该容器使用的工厂注册中心
    fn factory_registry(&self) -> Arc<dyn FactoryRegistry>;

    /// 按名称获取本地组件，不会隐式向父容器查找
    fn get_component(&self, name: &ComponentName) -> Result<Component, ComponentError>;

    /// 按单个配置条目解析一个组件，结果不存入容器
    ///
    /// 纯引用条目退化为 [`get_component`](Self::get_component)，实例身份
    /// 共享；构造条目要求 `deps` 中的名称已全部在本地解析完毕
    fn load_anonymous_component(
        &self,
        definition: &ComponentDefinition,
    ) -> Result<Component, ComponentError>;

    /// 按拓扑顺序实例化一批具名组件
    ///
    /// 首个错误立即中止剩余批次；错误发生前已提交的组件保留在容器中，
    /// 不做回滚
    fn load_named_components(
        &self,
        batch: HashMap<ComponentName, ComponentDefinition>,
    ) -> Result<(), ComponentError>;

    /// 直接写入一个已解析组件，绕过常规构造
    ///
    /// 供导入/导出协作方以别名重新暴露组件使用，允许覆盖既有名称
    fn put_component(&self, name: ComponentName, component: Component);

    /// 获取已加载组件的元数据
    fn get_component_metadata(
        &self,
        name: &ComponentName,
    ) -> Result<ComponentMetadata, ComponentError>;

    /// 所有已加载的组件名
    fn loaded_component_names(&self) -> Vec<ComponentName>;

    /// 卸载一批组件，若指定 recursive 则递归卸载依赖组件
    ///
    /// 明确不在当前范围内实现
    fn unload_named_components(
        &self,
        names: &[ComponentName],
        recursive: bool,
    ) -> Result<(), ComponentError>;

    /// 父容器，根节点返回 `None`
    fn get_parent(&self) -> Option<Arc<dyn ComponentContainer>>;

    /// 自身在父容器中的名称
    fn self_component_name(&self) -> ComponentName;
}

/// 构造期传给工厂的上下文
///
/// 让工厂得知自身身份与所在容器，用于诊断与自引用装配
#[derive(Clone)]
pub struct Context {
    /// 正在构造的组件名称，匿名加载时为空
    pub name: ComponentName,
    /// 发起构造的容器
    pub container: Arc<dyn ComponentContainer>,
}

impl Context {
    /// 创建新的构造上下文
    pub fn new(name: ComponentName, container: Arc<dyn ComponentContainer>) -> Self {
        Self { name, container }
    }

    /// 组件在容器树中的绝对位置
    ///
    /// 自根向下依次为各级容器的自身名称，匿名节点被跳过
    pub fn absolute_path(&self) -> Vec<ComponentName> {
        let mut segments = Vec::new();
        if !self.name.is_empty() {
            segments.push(self.name.clone());
        }
        let mut current = Some(self.container.clone());
        while let Some(node) = current {
            let name = node.self_component_name();
            if !name.is_empty() {
                segments.push(name);
            }
            current = node.get_parent();
        }
        segments.reverse();
        segments
    }
}
