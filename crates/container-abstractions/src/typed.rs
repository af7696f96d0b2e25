//! 类型化配置适配层
//!
//! 强类型的组件定义与注册中心的统一动态签名之间的双向桥接：
//! [`decode_config`] 把边界上的不透明配置值解码为具体配置类型，
//! [`TypedFactoryAdapter`] 把强类型工厂泛化为统一的工厂接口

use crate::container::{ComponentContainer, Context};
use crate::factory::ComponentFactory;
use component_common::{
    ComponentDefinition, ComponentError, ComponentName, ComponentTypeId, ConfigValue, Instance,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// 把不透明配置值解码为具体配置类型
///
/// 三种输入形态：缺省取零值；已类型化的值原样透传；原始数据走结构化
/// 解码。配置结构体约定携带 `#[serde(default, deny_unknown_fields)]`，
/// 多余的输入键会在解码时报错。其余形态一律失败
pub fn decode_config<C>(value: &ConfigValue) -> Result<C, ComponentError>
where
    C: DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    match value {
        ConfigValue::None => Ok(C::default()),
        ConfigValue::Typed(any) => any
            .downcast_ref::<C>()
            .cloned()
            .ok_or_else(ComponentError::type_mismatch::<C>),
        ConfigValue::Raw(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
            ComponentError::config_invalid(format!(
                "无法解码为 {}: {e}",
                std::any::type_name::<C>()
            ))
        }),
    }
}

/// 强类型组件工厂 trait
///
/// 以具体的配置类型与实例类型声明构造器，经 [`TypedFactoryAdapter`]
/// 泛化后注册
pub trait TypedComponentFactory: Send + Sync + 'static {
    /// 配置类型
    type Config: DeserializeOwned + Default + Clone + Send + Sync + 'static;
    /// 实例类型
    type Instance: Clone + Send + Sync + 'static;

    /// 组件唯一类型标识
    fn type_id(&self) -> ComponentTypeId;

    /// 构造组件实例
    fn create(&self, ctx: Context, config: Self::Config)
        -> Result<Self::Instance, ComponentError>;

    /// 销毁组件实例
    fn destroy(&self, ctx: Context, instance: Self::Instance) -> Result<(), ComponentError> {
        let _ = (ctx, instance);
        Ok(())
    }
}

/// 强类型工厂到统一工厂接口的适配器
pub struct TypedFactoryAdapter<F> {
    inner: F,
}

impl<F> TypedFactoryAdapter<F> {
    /// 包装一个强类型工厂
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F> ComponentFactory for TypedFactoryAdapter<F>
where
    F: TypedComponentFactory,
{
    fn type_id(&self) -> ComponentTypeId {
        self.inner.type_id()
    }

    fn create_instance(
        &self,
        ctx: Context,
        config: &ConfigValue,
    ) -> Result<Instance, ComponentError> {
        debug!("解码组件配置: {} -> {}", ComponentFactory::type_id(self), std::any::type_name::<F::Config>());
        let typed = decode_config::<F::Config>(config)?;
        let instance = self.inner.create(ctx, typed)?;
        Ok(Arc::new(instance))
    }

    fn destroy_instance(&self, ctx: Context, instance: Instance) -> Result<(), ComponentError> {
        let typed = instance
            .downcast_ref::<F::Instance>()
            .cloned()
            .ok_or_else(ComponentError::type_mismatch::<F::Instance>)?;
        self.inner.destroy(ctx, typed)
    }
}

/// 把强类型工厂泛化并装箱为可注册的工厂
pub fn adapt<F>(factory: F) -> Arc<dyn ComponentFactory>
where
    F: TypedComponentFactory,
{
    Arc::new(TypedFactoryAdapter::new(factory))
}

/// 强类型的组件配置条目
///
/// 与 [`ComponentDefinition`] 同构，但 `config` 携带具体类型；
/// 可以内嵌在其他组件的配置结构体中表达内嵌引用
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypedComponentConfig<C> {
    /// 组件类型，纯引用条目时省略
    #[serde(rename = "type")]
    pub type_id: Option<ComponentTypeId>,
    /// 引用的已解析组件名称
    pub refer: Option<ComponentName>,
    /// 构造前必须已存在的组件名称
    pub deps: Vec<ComponentName>,
    /// 强类型的组件自身配置
    pub config: Option<C>,
}

impl<C> Default for TypedComponentConfig<C> {
    fn default() -> Self {
        Self {
            type_id: None,
            refer: None,
            deps: Vec::new(),
            config: None,
        }
    }
}

impl<C> TypedComponentConfig<C>
where
    C: Any + Clone + Send + Sync,
{
    /// 创建由类型驱动构造的条目
    pub fn of_type(type_id: impl Into<ComponentTypeId>, config: C) -> Self {
        Self {
            type_id: Some(type_id.into()),
            config: Some(config),
            ..Self::default()
        }
    }

    /// 创建对已解析组件的纯引用条目
    pub fn refer_to(name: impl Into<ComponentName>) -> Self {
        Self {
            refer: Some(name.into()),
            ..Self::default()
        }
    }

    /// 设置依赖列表
    pub fn with_deps<I, N>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ComponentName>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// 转换为动态配置条目，配置值以已类型化形态携带
    pub fn to_definition(&self) -> ComponentDefinition {
        ComponentDefinition {
            type_id: self.type_id.clone(),
            refer: self.refer.clone(),
            deps: self.deps.clone(),
            config: match &self.config {
                Some(config) => ConfigValue::typed(config.clone()),
                None => ConfigValue::None,
            },
        }
    }

    /// 在指定容器上解析该条目并按 `T` 取回实例
    pub fn load<T>(&self, container: &dyn ComponentContainer) -> Result<T, ComponentError>
    where
        T: Clone + 'static,
    {
        load_component::<T>(container, &self.to_definition())
    }
}

/// 按单个配置条目解析组件并以 `T` 类型取回实例
///
/// `type` 与 `refer` 至少要设置一个；实例类型不符时返回类型不匹配错误
pub fn load_component<T>(
    container: &dyn ComponentContainer,
    definition: &ComponentDefinition,
) -> Result<T, ComponentError>
where
    T: Clone + 'static,
{
    if definition.type_id.is_none() && definition.refer.is_none() {
        return Err(ComponentError::config_invalid(format!(
            "type 与 refer 至少设置一个, 期望组件类型: {}",
            std::any::type_name::<T>()
        )));
    }
    let component = container.load_anonymous_component(definition)?;
    component
        .instance_as::<T>()
        .ok_or_else(ComponentError::type_mismatch::<T>)
}

/// 按名称获取组件并以 `T` 类型取回实例
pub fn get_component<T>(
    container: &dyn ComponentContainer,
    name: impl Into<ComponentName>,
) -> Result<T, ComponentError>
where
    T: Clone + 'static,
{
    let component = container.get_component(&name.into())?;
    component
        .instance_as::<T>()
        .ok_or_else(ComponentError::type_mismatch::<T>)
}
