//! 错误类型定义

use crate::component::{ComponentName, ComponentTypeId};
use thiserror::Error;

/// 组件容器错误类型
///
/// 所有操作都同步返回错误，逐层立即上抛，不做部分恢复或重试
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件名称不存在: {name}")]
    NameNotFound { name: ComponentName },

    #[error("组件依赖不存在: {dependency}, 所属组件: {referrer}")]
    DependencyNotFound {
        dependency: ComponentName,
        referrer: ComponentName,
    },

    #[error("检测到循环依赖")]
    CircularDependency,

    #[error("组件类型未注册: {type_id}")]
    TypeNotRegistered { type_id: ComponentTypeId },

    #[error("组件类型不匹配, 期望类型: {expected}")]
    TypeMismatch { expected: String },

    #[error("组件配置无效: {reason}")]
    ConfigInvalid { reason: String },

    #[error("组件名称不合法: {name}")]
    NameInvalid { name: ComponentName },

    #[error("组件已存在: {name}")]
    AlreadyExists { name: ComponentName },

    #[error("组件构造失败: {component}")]
    FactoryFailed {
        component: ComponentName,
        #[source]
        source: anyhow::Error,
    },
}

impl ComponentError {
    /// 创建配置无效错误
    pub fn config_invalid(reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            reason: reason.into(),
        }
    }

    /// 创建以 `T` 为期望类型的类型不匹配错误
    pub fn type_mismatch<T>() -> Self {
        Self::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
        }
    }

    /// 包装组件构造过程中产生的任意错误
    pub fn factory_failed(
        component: ComponentName,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::FactoryFailed {
            component,
            source: source.into(),
        }
    }
}
