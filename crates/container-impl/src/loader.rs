//! 批次构造顺序计算
//!
//! 对一个批次的组件配置做拓扑排序，保证依赖先于依赖者构造

use component_common::{ComponentDefinition, ComponentError, ComponentName};
use std::collections::{HashMap, VecDeque};

/// 计算一个批次的构造顺序
///
/// 以 Kahn 算法的反向角色运行：为每个名称统计有多少其他批次成员把它
/// 列为依赖，从无人依赖的名称开始处理，出队时递减其自身依赖的计数，
/// 最后反转输出序列，得到"依赖先构造"的顺序。
///
/// 依赖名称既不在批次内也未被调用方预先剔除时返回依赖缺失错误；
/// 输出序列短于批次时存在环，返回循环依赖错误（不报告环的成员）
pub fn construction_order(
    batch: &HashMap<ComponentName, ComponentDefinition>,
) -> Result<Vec<ComponentName>, ComponentError> {
    // 计算每个节点的入度
    let mut in_degree: HashMap<&ComponentName, usize> =
        batch.keys().map(|name| (name, 0)).collect();
    for (name, definition) in batch {
        for dep in &definition.deps {
            if !batch.contains_key(dep) {
                return Err(ComponentError::DependencyNotFound {
                    dependency: dep.clone(),
                    referrer: name.clone(),
                });
            }
            if let Some(counter) = in_degree.get_mut(dep) {
                *counter += 1;
            }
        }
    }

    // 初始化队列，将所有入度为 0 的节点加入队列
    let mut queue: VecDeque<&ComponentName> = in_degree
        .iter()
        .filter(|(_, counter)| **counter == 0)
        .map(|(name, _)| *name)
        .collect();

    // 拓扑排序
    let mut result: Vec<ComponentName> = Vec::with_capacity(batch.len());
    while let Some(node) = queue.pop_front() {
        result.push(node.clone());
        for dep in &batch[node].deps {
            if let Some(counter) = in_degree.get_mut(dep) {
                *counter -= 1;
                if *counter == 0 {
                    queue.push_back(dep);
                }
            }
        }
    }

    // 输出短于批次说明存在环
    if result.len() != batch.len() {
        return Err(ComponentError::CircularDependency);
    }

    result.reverse();
    Ok(result)
}
