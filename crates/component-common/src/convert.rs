//! 配置值的语义转换类型
//!
//! 声明式配置中常见的时长与时间戳以字符串书写，这里提供在解码时
//! 自动完成转换的包装类型，配置结构体直接使用它们作为字段类型

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// 时长配置值
///
/// 接受 "300ms"、"5s"、"2h" 等人类可读字符串，或以秒计的整数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DurationValue(Duration);

impl DurationValue {
    /// 包装一个时长
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// 取出内部时长
    pub fn get(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for DurationValue {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<DurationValue> for Duration {
    fn from(value: DurationValue) -> Self {
        value.0
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }
}

impl Serialize for DurationValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&humantime::format_duration(self.0))
    }
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = DurationValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("时长字符串(如 \"300ms\")或以秒计的整数")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        humantime::parse_duration(value)
            .map(DurationValue)
            .map_err(de::Error::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(DurationValue(Duration::from_secs(value)))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map(|secs| DurationValue(Duration::from_secs(secs)))
            .map_err(|_| de::Error::custom("时长不能为负数"))
    }
}

impl<'de> Deserialize<'de> for DurationValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DurationVisitor)
    }
}

/// 时间戳配置值
///
/// 接受 RFC3339 格式的字符串，统一转换为 UTC 时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampValue(DateTime<Utc>);

impl TimestampValue {
    /// 包装一个时间戳
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    /// 取出内部时间戳
    pub fn get(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for TimestampValue {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }
}

impl From<TimestampValue> for DateTime<Utc> {
    fn from(value: TimestampValue) -> Self {
        value.0
    }
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for TimestampValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0.to_rfc3339())
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = TimestampValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("RFC3339 格式的时间戳字符串")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| TimestampValue(dt.with_timezone(&Utc)))
            .map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for TimestampValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(TimestampVisitor)
    }
}
