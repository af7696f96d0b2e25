//! 路径查找组件
//!
//! 以路径字符串为配置，解析结果即目标组件的实例本身，身份保持共享

use crate::path::resolve_path;
use component_common::{ComponentError, ComponentTypeId, ConfigValue, Instance};
use container_abstractions::{decode_config, ComponentFactory, Context};
use tracing::debug;

/// 路径查找组件的类型标识
pub const FINDER_TYPE: &str = "std.finder";

/// 路径查找组件工厂
///
/// 直接实现统一工厂接口而非经过类型化适配器：解析出的实例必须原样
/// 返回，再包一层会破坏实例的身份共享
pub struct FinderFactory;

impl ComponentFactory for FinderFactory {
    fn type_id(&self) -> ComponentTypeId {
        ComponentTypeId::from(FINDER_TYPE)
    }

    fn create_instance(
        &self,
        ctx: Context,
        config: &ConfigValue,
    ) -> Result<Instance, ComponentError> {
        let path: String = decode_config(config)?;
        debug!("解析引用路径: {} (位于 {:?})", path, ctx.absolute_path());
        resolve_path(ctx.container.clone(), &path)
    }
}
