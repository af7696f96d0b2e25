//! 组件核心数据模型
//!
//! 定义组件类型标识、组件名称、声明式配置条目与已解析组件记录

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// 组件实例的不透明句柄
///
/// 实例共享通过 `Arc` 克隆完成，引用同一个组件永远得到同一个实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 组件类型标识
///
/// 在一个工厂注册中心内全局唯一，决定由哪个工厂构造组件
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTypeId(String);

impl ComponentTypeId {
    /// 创建新的组件类型标识
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 以字符串形式访问
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentTypeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentTypeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 组件名称的合法格式
static COMPONENT_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("组件名称正则必然合法"));

/// 组件名称
///
/// 在单个容器的本地命名空间内唯一，批量加载前统一校验格式
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentName(String);

impl ComponentName {
    /// 创建新的组件名称，不做格式校验
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 匿名组件使用的空名称
    pub fn anonymous() -> Self {
        Self(String::new())
    }

    /// 名称格式是否合法
    pub fn is_valid(&self) -> bool {
        COMPONENT_NAME_PATTERN.is_match(&self.0)
    }

    /// 是否为匿名名称
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 以字符串形式访问
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 组件配置的不透明边界值
///
/// 只有三种形态：缺省、已类型化的值、来自声明式配置源的原始数据。
/// 类型化适配器在组件构造时将其解码为具体配置类型，解码只发生一次
#[derive(Clone, Default)]
pub enum ConfigValue {
    /// 配置缺省，解码时取配置类型的零值
    #[default]
    None,
    /// 程序内直接给出的已类型化配置值，解码时原样透传
    Typed(Arc<dyn Any + Send + Sync>),
    /// 声明式配置源（JSON/YAML）携带的原始数据
    Raw(serde_json::Value),
}

impl ConfigValue {
    /// 包装一个已类型化的配置值
    pub fn typed<T: Any + Send + Sync>(value: T) -> Self {
        Self::Typed(Arc::new(value))
    }

    /// 包装一个原始配置值
    pub fn raw(value: serde_json::Value) -> Self {
        if value.is_null() {
            Self::None
        } else {
            Self::Raw(value)
        }
    }

    /// 配置是否缺省
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Typed(_) => f.write_str("Typed(..)"),
            Self::Raw(value) => write!(f, "Raw({value})"),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::raw(value))
    }
}

/// 声明式的组件配置条目
///
/// `refer` 与 `type` 恰好适用一种语义：`refer` 单独出现时该条目是对
/// 已解析组件的纯引用，否则由 `type` 驱动构造，`deps` 列出构造前必须
/// 已存在的组件名称
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentDefinition {
    /// 组件类型，纯引用条目时省略
    #[serde(rename = "type")]
    pub type_id: Option<ComponentTypeId>,
    /// 引用的已解析组件名称，构造新实例时省略
    pub refer: Option<ComponentName>,
    /// 构造该组件前必须已存在的组件名称
    pub deps: Vec<ComponentName>,
    /// 组件自身配置，按注册工厂的约定解释
    pub config: ConfigValue,
}

impl ComponentDefinition {
    /// 创建由类型驱动构造的条目
    pub fn of_type(type_id: impl Into<ComponentTypeId>) -> Self {
        Self {
            type_id: Some(type_id.into()),
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

    /// 设置组件自身配置
    pub fn with_config(mut self, config: ConfigValue) -> Self {
        self.config = config;
        self
    }

    /// 该条目是否为纯引用
    pub fn is_refer(&self) -> bool {
        self.type_id.is_none() && self.refer.is_some()
    }
}

/// 已解析的组件记录
///
/// 存入容器后不可变，依赖集合仅用于自省与诊断
#[derive(Clone)]
pub struct Component {
    /// 构造该组件的工厂类型
    pub type_id: ComponentTypeId,
    /// 声明的依赖集合
    pub dependencies: HashSet<ComponentName>,
    /// 组件实例
    pub instance: Instance,
}

impl Component {
    /// 按具体类型访问实例，类型不符时返回 `None`
    pub fn instance_as<T: Clone + 'static>(&self) -> Option<T> {
        self.instance.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_id", &self.type_id)
            .field("dependencies", &self.dependencies)
            .field("instance", &"<instance>")
            .finish()
    }
}
