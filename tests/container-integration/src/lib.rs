//! 组件容器的集中集成测试工程
//!
//! 测试用例见 `tests/` 目录
