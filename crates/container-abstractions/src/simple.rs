//! 闭包式简单工厂
//!
//! 用一对闭包快速声明一个强类型工厂，适合轻量注册与测试场景

use crate::container::Context;
use crate::typed::TypedComponentFactory;
use component_common::{ComponentError, ComponentTypeId};
use serde::de::DeserializeOwned;

type CreateFn<C, I> = dyn Fn(Context, C) -> Result<I, ComponentError> + Send + Sync;
type DestroyFn<I> = dyn Fn(Context, I) -> Result<(), ComponentError> + Send + Sync;

/// 闭包式组件工厂
///
/// 构造闭包必选，销毁闭包可选（缺省为空操作）
pub struct FnComponentFactory<C, I> {
    type_id: ComponentTypeId,
    create_fn: Box<CreateFn<C, I>>,
    destroy_fn: Option<Box<DestroyFn<I>>>,
}

impl<C, I> FnComponentFactory<C, I> {
    /// 以类型标识与构造闭包创建工厂
    pub fn new<F>(type_id: impl Into<ComponentTypeId>, create_fn: F) -> Self
    where
        F: Fn(Context, C) -> Result<I, ComponentError> + Send + Sync + 'static,
    {
        Self {
            type_id: type_id.into(),
            create_fn: Box::new(create_fn),
            destroy_fn: None,
        }
    }

    /// 设置销毁闭包
    pub fn with_destroy<F>(mut self, destroy_fn: F) -> Self
    where
        F: Fn(Context, I) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.destroy_fn = Some(Box::new(destroy_fn));
        self
    }
}

impl<C, I> TypedComponentFactory for FnComponentFactory<C, I>
where
    C: DeserializeOwned + Default + Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    type Config = C;
    type Instance = I;

    fn type_id(&self) -> ComponentTypeId {
        self.type_id.clone()
    }

    fn create(&self, ctx: Context, config: C) -> Result<I, ComponentError> {
        (self.create_fn)(ctx, config)
    }

    fn destroy(&self, ctx: Context, instance: I) -> Result<(), ComponentError> {
        match &self.destroy_fn {
            Some(destroy_fn) => destroy_fn(ctx, instance),
            None => Ok(()),
        }
    }
}
