//! 组件容器的端到端集成测试
//!
//! 覆盖从声明式配置到组件图的完整装配流程：批次拓扑加载、增量批次、
//! 嵌套作用域、跨作用域路径寻址与强类型取回

use component_common::{
    ComponentDefinition, ComponentError, ComponentName, ConfigValue, DurationValue,
};
use container_abstractions::{
    adapt, get_component, load_component, ComponentContainer, Context, FactoryRegistry,
    FnComponentFactory, TypedComponentConfig,
};
use container_impl::{ComponentContainerBuilder, FactoryRegistryImpl};
use container_std::register_std_components;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RedisConfig {
    host: String,
    port: u16,
    pass: String,
    timeout: Option<DurationValue>,
}

#[derive(Debug)]
struct Redis {
    config: RedisConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RestyConfig {
    base_url: String,
    cache: ComponentDefinition,
}

#[derive(Debug)]
struct Resty {
    config: RestyConfig,
    cache: Arc<Redis>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn build_registry() -> Arc<dyn FactoryRegistry> {
    let registry: Arc<dyn FactoryRegistry> = Arc::new(FactoryRegistryImpl::new());
    register_std_components(registry.as_ref());
    registry.register(adapt(FnComponentFactory::new(
        "redis",
        |_ctx, config: RedisConfig| Ok(Arc::new(Redis { config })),
    )));
    registry.register(adapt(FnComponentFactory::new(
        "resty",
        |ctx: Context, config: RestyConfig| {
            let cache: Arc<Redis> = load_component(ctx.container.as_ref(), &config.cache)?;
            Ok(Arc::new(Resty { config, cache }))
        },
    )));
    registry
}

fn build_container() -> Arc<dyn ComponentContainer> {
    ComponentContainerBuilder::new()
        .with_factory_registry(build_registry())
        .build()
}

#[test]
fn test_yaml_batch_end_to_end() {
    init_tracing();
    let container = build_container();

    let batch_yaml = r#"
redis_0:
  type: "redis"
  config:
    host: "h1"
    port: 6379
    pass: "p"
    timeout: "500ms"

resty_0:
  type: "resty"
  deps: [redis_0]
  config:
    base_url: "http://internal"
    cache: { refer: "redis_0" }
"#;
    let batch = serde_yaml::from_str(batch_yaml).unwrap();
    container.load_named_components(batch).unwrap();

    let redis: Arc<Redis> = get_component(container.as_ref(), "redis_0").unwrap();
    assert_eq!(redis.config.host, "h1");
    assert_eq!(redis.config.port, 6379);
    assert_eq!(
        redis.config.timeout.unwrap().get(),
        Duration::from_millis(500)
    );

    let resty: Arc<Resty> = get_component(container.as_ref(), "resty_0").unwrap();
    assert_eq!(resty.config.base_url, "http://internal");
    // resty 引用到的缓存实例与 redis_0 名下存储的是同一个
    assert!(Arc::ptr_eq(&resty.cache, &redis));

    assert!(matches!(
        container.get_component(&ComponentName::from("redis_1")),
        Err(ComponentError::NameNotFound { .. })
    ));
}

#[test]
fn test_incremental_batches_with_alias() {
    init_tracing();
    let container = build_container();

    container
        .load_named_components(HashMap::from([(
            ComponentName::from("ca"),
            TypedComponentConfig::of_type(
                "redis",
                RedisConfig {
                    host: "testa".to_string(),
                    ..RedisConfig::default()
                },
            )
            .to_definition(),
        )]))
        .unwrap();

    // 第二个批次以原始映射形态引用已解析的 ca
    let second_yaml = r#"
cb:
  type: "resty"
  deps: [ca]
  config:
    base_url: "http://second"
    cache: { refer: "ca" }

refer_a: { deps: [ca], refer: "ca" }
"#;
    let batch = serde_yaml::from_str(second_yaml).unwrap();
    container.load_named_components(batch).unwrap();

    let original: Arc<Redis> = get_component(container.as_ref(), "ca").unwrap();
    let resty: Arc<Resty> = get_component(container.as_ref(), "cb").unwrap();
    let alias: Arc<Redis> = get_component(container.as_ref(), "refer_a").unwrap();

    assert_eq!(resty.cache.config.host, "testa");
    assert!(Arc::ptr_eq(&resty.cache, &original));
    assert!(Arc::ptr_eq(&alias, &original));
}

#[test]
fn test_nested_scope_with_cross_scope_reference() {
    init_tracing();
    let container = build_container();

    let batch_yaml = r#"
shared_redis:
  type: "redis"
  config: { host: "shared" }

api_scope:
  type: "std.container"
  deps: [shared_redis]
  config:
    components:
      client:
        type: "resty"
        config:
          base_url: "http://api"
          cache: { type: "std.finder", config: "../shared_redis" }
"#;
    let batch = serde_yaml::from_str(batch_yaml).unwrap();
    container.load_named_components(batch).unwrap();

    let scope: Arc<dyn ComponentContainer> =
        get_component(container.as_ref(), "api_scope").unwrap();
    let client: Arc<Resty> = get_component(scope.as_ref(), "client").unwrap();
    let shared: Arc<Redis> = get_component(container.as_ref(), "shared_redis").unwrap();
    assert!(Arc::ptr_eq(&client.cache, &shared));
}

#[test]
fn test_missing_dependency_fails_batch() {
    init_tracing();
    let container = build_container();

    let batch = HashMap::from([
        (
            ComponentName::from("a1"),
            ComponentDefinition::of_type("redis").with_deps(["b1", "b2"]),
        ),
        (
            ComponentName::from("b1"),
            ComponentDefinition::of_type("redis").with_deps(["c1"]),
        ),
        (
            ComponentName::from("b2"),
            ComponentDefinition::of_type("redis").with_deps(["c2"]),
        ),
        (
            ComponentName::from("c1"),
            ComponentDefinition::of_type("redis"),
        ),
    ]);
    match container.load_named_components(batch) {
        Err(ComponentError::DependencyNotFound { dependency, .. }) => {
            assert_eq!(dependency, ComponentName::from("c2"));
        }
        other => panic!("期望依赖缺失错误, 实际: {other:?}"),
    }
}

#[test]
fn test_circular_dependency_fails_batch() {
    init_tracing();
    let container = build_container();

    let batch = HashMap::from([
        (
            ComponentName::from("a1"),
            ComponentDefinition::of_type("redis").with_deps(["b1"]),
        ),
        (
            ComponentName::from("b1"),
            ComponentDefinition::of_type("redis").with_deps(["a1"]),
        ),
    ]);
    assert!(matches!(
        container.load_named_components(batch),
        Err(ComponentError::CircularDependency)
    ));
    // 循环批次不产生任何部分加载结果
    assert!(container.loaded_component_names().is_empty());
}

#[test]
fn test_factory_error_aborts_batch_and_keeps_prefix() {
    init_tracing();
    let registry = build_registry();
    registry.register(adapt(FnComponentFactory::new(
        "flaky",
        |ctx: Context, _config: RedisConfig| -> Result<Arc<Redis>, ComponentError> {
            Err(ComponentError::factory_failed(
                ctx.name.clone(),
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "后端不可达"),
            ))
        },
    )));
    let container: Arc<dyn ComponentContainer> = ComponentContainerBuilder::new()
        .with_factory_registry(registry)
        .build();

    let batch = HashMap::from([
        (
            ComponentName::from("ok_0"),
            ComponentDefinition::of_type("redis"),
        ),
        (
            ComponentName::from("broken"),
            ComponentDefinition::of_type("flaky").with_deps(["ok_0"]),
        ),
    ]);
    let result = container.load_named_components(batch);
    match result {
        Err(ComponentError::FactoryFailed { component, .. }) => {
            assert_eq!(component, ComponentName::from("broken"));
        }
        other => panic!("期望组件构造失败错误, 实际: {other:?}"),
    }

    // 失败前已提交的组件保留，重试同一批次会因名称冲突报错
    assert!(container.get_component(&ComponentName::from("ok_0")).is_ok());
    assert!(matches!(
        container.load_named_components(HashMap::from([(
            ComponentName::from("ok_0"),
            ComponentDefinition::of_type("redis"),
        )])),
        Err(ComponentError::AlreadyExists { .. })
    ));
}

#[test]
fn test_typed_load_detects_wrong_instance_type() {
    init_tracing();
    let container = build_container();

    container
        .load_named_components(HashMap::from([(
            ComponentName::from("redis_0"),
            ComponentDefinition::of_type("redis")
                .with_config(ConfigValue::raw(serde_json::json!({"host": "h1"}))),
        )]))
        .unwrap();

    // 期望 Resty 实际是 Redis
    let result: Result<Arc<Resty>, _> = load_component(
        container.as_ref(),
        &ComponentDefinition::refer_to("redis_0"),
    );
    assert!(matches!(result, Err(ComponentError::TypeMismatch { .. })));
}

#[test]
fn test_definition_without_type_or_refer() {
    init_tracing();
    let container = build_container();

    let result: Result<Arc<Redis>, _> =
        load_component(container.as_ref(), &ComponentDefinition::default());
    assert!(matches!(result, Err(ComponentError::ConfigInvalid { .. })));
}
