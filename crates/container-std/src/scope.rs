//! 嵌套作用域组件
//!
//! 以组件形式构建子容器：子容器共享父容器的工厂注册中心，持有指向
//! 父容器的非所有权链接，并以自身组件名作为树节点名称

use crate::source::load_definitions_from_path;
use component_common::{
    ComponentDefinition, ComponentError, ComponentName, ComponentTypeId,
};
use container_abstractions::{ComponentContainer, Context, TypedComponentFactory};
use container_impl::ComponentContainerBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// 内联嵌套作用域的类型标识
pub const CONTAINER_TYPE: &str = "std.container";

/// 文件导入嵌套作用域的类型标识
pub const IMPORT_CONTAINER_TYPE: &str = "std.container-import";

/// 按导出映射把子容器内的组件以别名重新暴露
///
/// 别名写入绕过常规构造，是刻意保留的跨批次重绑定模式
fn export_components(
    container: &dyn ComponentContainer,
    mapper: &HashMap<ComponentName, ComponentName>,
) -> Result<(), ComponentError> {
    for (alias, inner) in mapper {
        let component = container.get_component(inner)?;
        container.put_component(alias.clone(), component);
    }
    Ok(())
}

/// 以构造上下文派生一个子容器
fn child_container(ctx: &Context) -> Arc<dyn ComponentContainer> {
    ComponentContainerBuilder::new()
        .with_factory_registry(ctx.container.factory_registry())
        .with_parent(&ctx.container)
        .with_self_name(ctx.name.clone())
        .build()
}

/// 内联嵌套作用域配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InlineContainerConfig {
    /// 子作用域内的组件批次
    pub components: HashMap<ComponentName, ComponentDefinition>,
    /// 导出映射：别名 -> 子作用域内的组件名
    pub export_mapper: HashMap<ComponentName, ComponentName>,
}

/// 内联嵌套作用域工厂
pub struct InlineContainerFactory;

impl TypedComponentFactory for InlineContainerFactory {
    type Config = InlineContainerConfig;
    type Instance = Arc<dyn ComponentContainer>;

    fn type_id(&self) -> ComponentTypeId {
        ComponentTypeId::from(CONTAINER_TYPE)
    }

    fn create(
        &self,
        ctx: Context,
        config: InlineContainerConfig,
    ) -> Result<Arc<dyn ComponentContainer>, ComponentError> {
        debug!("构建内联子作用域: {:?}", ctx.absolute_path());
        let child = child_container(&ctx);
        child.load_named_components(config.components)?;
        export_components(child.as_ref(), &config.export_mapper)?;
        Ok(child)
    }
}

/// 文件导入嵌套作用域配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportContainerConfig {
    /// 批次配置文件路径
    pub from_file: PathBuf,
    /// 导出映射：别名 -> 子作用域内的组件名
    pub export_mapper: HashMap<ComponentName, ComponentName>,
}

/// 文件导入嵌套作用域工厂
pub struct ImportContainerFactory;

impl TypedComponentFactory for ImportContainerFactory {
    type Config = ImportContainerConfig;
    type Instance = Arc<dyn ComponentContainer>;

    fn type_id(&self) -> ComponentTypeId {
        ComponentTypeId::from(IMPORT_CONTAINER_TYPE)
    }

    fn create(
        &self,
        ctx: Context,
        config: ImportContainerConfig,
    ) -> Result<Arc<dyn ComponentContainer>, ComponentError> {
        debug!(
            "从文件导入子作用域: {} -> {:?}",
            config.from_file.display(),
            ctx.absolute_path()
        );
        let definitions = load_definitions_from_path(&config.from_file)?;
        let child = child_container(&ctx);
        child.load_named_components(definitions)?;
        export_components(child.as_ref(), &config.export_mapper)?;
        Ok(child)
    }
}
