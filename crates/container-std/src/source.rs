//! 批次配置文件加载
//!
//! 按文件后缀选择解析器：`.json` 走 JSON，`.yml`/`.yaml` 走 YAML，
//! 其余后缀一律拒绝

use component_common::{ComponentDefinition, ComponentError, ComponentName};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// 从外部文件加载一个批次的组件配置
pub fn load_definitions_from_path(
    path: &Path,
) -> Result<HashMap<ComponentName, ComponentDefinition>, ComponentError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ComponentError::config_invalid(format!("读取配置文件失败: {}: {e}", path.display()))
    })?;

    match path.extension().and_then(OsStr::to_str) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            ComponentError::config_invalid(format!("解析 JSON 配置失败: {}: {e}", path.display()))
        }),
        Some("yml") | Some("yaml") => serde_yaml::from_str(&content).map_err(|e| {
            ComponentError::config_invalid(format!("解析 YAML 配置失败: {}: {e}", path.display()))
        }),
        _ => Err(ComponentError::config_invalid(format!(
            "不支持的配置文件格式: {}",
            path.display()
        ))),
    }
}
