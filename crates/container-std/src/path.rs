//! 容器树路径解析
//!
//! 把斜杠分隔的相对或绝对地址解析为组件实例

use component_common::{ComponentError, ComponentName, Instance};
use container_abstractions::ComponentContainer;
use std::sync::Arc;

/// 从起始容器解析一个路径地址
///
/// 以 `/` 开头表示从容器树根节点开始（沿父链接回溯到顶）；`.` 为空操作；
/// `..` 移动到父容器，已在根节点时失败。非末段解析出的实例必须仍然是
/// 容器，末段解析出的实例即为结果；剥去锚点后路径为空时返回当前容器
/// 自身
pub fn resolve_path(
    start: Arc<dyn ComponentContainer>,
    path: &str,
) -> Result<Instance, ComponentError> {
    if path.is_empty() {
        return Err(ComponentError::config_invalid("引用路径不能为空"));
    }

    let mut segments: Vec<&str> = path.split('/').collect();
    let mut current = start;

    // 绝对路径，先把当前节点移到容器树的根
    if segments.first() == Some(&"") {
        segments.remove(0);
        while let Some(parent) = current.get_parent() {
            current = parent;
        }
    }

    let count = segments.len();
    for (index, segment) in segments.into_iter().enumerate() {
        if segment == "." {
            continue;
        }
        if segment == ".." {
            current = current.get_parent().ok_or_else(|| {
                ComponentError::config_invalid(format!("引用路径错误, {path} 越过容器树根节点"))
            })?;
            continue;
        }

        let component = current.get_component(&ComponentName::from(segment))?;

        // 已到达最后一段，返回解析出的实例
        if index == count - 1 {
            return Ok(component.instance);
        }

        // 还要继续向后寻找，下一跳必须仍然是容器
        current = component
            .instance
            .downcast_ref::<Arc<dyn ComponentContainer>>()
            .cloned()
            .ok_or_else(|| {
                ComponentError::config_invalid(format!("引用路径错误, {segment} 不是容器"))
            })?;
    }

    // 有效路径为空，结果是当前容器自身
    Ok(Arc::new(current) as Instance)
}
