//! 组件工厂抽象接口

use crate::container::Context;
use component_common::{ComponentError, ComponentTypeId, ConfigValue, Instance};

/// 组件工厂 trait
///
/// 构造器与销毁器的组合，按自身声明的类型标识注册到注册中心。
/// 配置的具体形态由实现约定，可以是原始数据也可以是已类型化的值
pub trait ComponentFactory: Send + Sync {
    /// 组件唯一类型标识
    fn type_id(&self) -> ComponentTypeId;

    /// 构造组件实例
    ///
    /// 调用发生在容器锁之外，实现可以回调同一容器解析依赖或内嵌引用
    fn create_instance(
        &self,
        ctx: Context,
        config: &ConfigValue,
    ) -> Result<Instance, ComponentError>;

    /// 销毁组件实例
    ///
    /// 与构造器成对声明；在卸载语义落地之前引擎不会驱动此方法
    fn destroy_instance(&self, ctx: Context, instance: Instance) -> Result<(), ComponentError> {
        let _ = (ctx, instance);
        Ok(())
    }
}
