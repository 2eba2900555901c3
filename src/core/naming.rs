use crate::config::{GenerationMode, Options};
use crate::core::types::{file_alias, resolve_type};
use crate::domain::model::{
    FileUnit, GenerationContext, MethodContext, MethodUnit, ServiceContext, ServiceUnit,
};
use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const GO_EXT: &str = "go";
pub const MANIFEST_EXT: &str = "gen.go";
pub const STRUCT_SUFFIX: &str = "Handler";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{(package_path|package|service_snake|service)\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// CamelCase 轉 snake_case
///
/// Every upper-case letter after the first character gets its own `_`, so
/// acronyms split letter by letter (`APIService` -> `a_p_i_service`). Already
/// generated trees depend on this exact rule.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// 展開目錄樣式中的佔位符；所有佔位符同時替換，展開結果不會被再次掃描
pub fn expand_placeholders(pattern: &str, package: &str, service_name: &str) -> String {
    placeholder_regex()
        .replace_all(pattern, |caps: &Captures| match &caps[1] {
            "package" => package.to_string(),
            "package_path" => package.replace('.', "/"),
            "service" => service_name.to_string(),
            _ => to_snake_case(service_name),
        })
        .into_owned()
}

/// Go package clause derived from the proto package (`test.v1` -> `test_v1`).
pub fn generalize_package_name(package: &str) -> String {
    let pkg = package.strip_prefix('.').unwrap_or(package).replace('.', "_");
    if pkg.starts_with(|c: char| c.is_ascii_digit()) {
        format!("pkg_{}", pkg)
    } else {
        pkg
    }
}

/// `example/gen/test/v1;testv1` -> `testv1`, `example/gen/test/v1` -> `v1`
pub fn go_package_name(go_package: &str) -> String {
    if go_package.is_empty() {
        return String::new();
    }
    if let Some((_, name)) = go_package.split_once(';') {
        return name.to_string();
    }
    go_package
        .rsplit('/')
        .next()
        .unwrap_or(go_package)
        .to_string()
}

/// `example/gen/test/v1;testv1` -> `example/gen/test/v1`
pub fn go_package_import(go_package: &str) -> String {
    match go_package.split_once(';') {
        Some((import, _)) => import.to_string(),
        None => go_package.to_string(),
    }
}

/// 以 `/` 串接輸出路徑，忽略空段與 `.`
pub fn join_output_path(dir: &str, file_name: &str) -> String {
    dir.split(['/', '\\'])
        .chain(std::iter::once(file_name))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

pub fn struct_name(service_name: &str) -> String {
    format!("{}{}", service_name, STRUCT_SUFFIX)
}

pub fn receiver_name(struct_name: &str) -> String {
    struct_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "h".to_string())
}

pub fn method_file_path(dir: &str, service_name: &str, method_name: &str) -> String {
    let base = format!(
        "{}_{}.{}",
        to_snake_case(service_name),
        to_snake_case(method_name),
        GO_EXT
    );
    join_output_path(dir, &base)
}

pub fn method_context(method: &MethodUnit, file: &FileUnit) -> MethodContext {
    MethodContext::new(
        method.name.clone(),
        resolve_type(&method.input_type, file),
        resolve_type(&method.output_type, file),
        method.client_streaming,
        method.server_streaming,
    )
}

/// 建立 service 層級的生成上下文
pub fn derive_context(file: &FileUnit, service: &ServiceUnit, options: &Options) -> GenerationContext {
    let struct_name = struct_name(&service.name);
    let snake_service = to_snake_case(&service.name);

    let dir = if options.dir_pattern.is_empty() {
        String::new()
    } else {
        expand_placeholders(&options.dir_pattern, &file.package, &service.name)
    };

    let manifest_path = join_output_path(
        &dir,
        &format!("{}{}.{}", snake_service, options.impl_suffix, MANIFEST_EXT),
    );
    let struct_path = join_output_path(
        &dir,
        &format!("{}{}.{}", snake_service, options.impl_suffix, GO_EXT),
    );

    let methods = service
        .methods
        .iter()
        .map(|method| method_context(method, file))
        .collect();

    GenerationContext {
        source_file: file.name.clone(),
        package_name: generalize_package_name(&file.package),
        receiver: receiver_name(&struct_name),
        struct_name,
        service: ServiceContext {
            name: service.name.clone(),
            methods,
        },
        method: None,
        manifest_path,
        struct_path,
        method_path: None,
        dir,
        mode: options.mode,
        per_service: options.mode == GenerationMode::PerService,
        proto_import: go_package_import(&file.go_package),
        proto_alias: file_alias(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(parameter: &str) -> Options {
        Options::from_parameter(parameter).unwrap()
    }

    fn test_file() -> FileUnit {
        FileUnit {
            name: "test/v1/test.proto".to_string(),
            package: "test.v1".to_string(),
            go_package: "example.com/test/gen/proto/test/v1;testv1".to_string(),
            services: vec![ServiceUnit {
                name: "TestService".to_string(),
                methods: vec![
                    MethodUnit {
                        name: "Echo".to_string(),
                        input_type: ".test.v1.EchoRequest".to_string(),
                        output_type: ".test.v1.EchoResponse".to_string(),
                        ..Default::default()
                    },
                    MethodUnit {
                        name: "EchoSummary".to_string(),
                        input_type: ".test.v1.EchoSummaryRequest".to_string(),
                        output_type: ".test.v1.EchoSummaryResponse".to_string(),
                        client_streaming: true,
                        ..Default::default()
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_to_snake_case() {
        let cases = [
            ("TestService", "test_service"),
            ("APIService", "a_p_i_service"),
            ("simpleTest", "simple_test"),
            ("Test", "test"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(to_snake_case(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_expand_placeholders() {
        let cases = [
            ("{package}", "test.v1"),
            ("{package_path}", "test/v1"),
            ("{service}", "TestService"),
            ("{service_snake}", "test_service"),
            ("{package_path}/{service_snake}", "test/v1/test_service"),
            ("handler", "handler"),
            ("{unknown}/{service}", "{unknown}/TestService"),
        ];
        for (pattern, expected) in cases {
            assert_eq!(
                expand_placeholders(pattern, "test.v1", "TestService"),
                expected,
                "pattern: {:?}",
                pattern
            );
        }
    }

    #[test]
    fn test_expansion_is_not_rescanned() {
        // service 名稱本身看起來像佔位符時不能再被展開
        assert_eq!(
            expand_placeholders("{service}", "test.v1", "{package}"),
            "{package}"
        );
    }

    #[test]
    fn test_generalize_package_name() {
        assert_eq!(generalize_package_name("test.v1"), "test_v1");
        assert_eq!(generalize_package_name(".test.v1"), "test_v1");
        assert_eq!(generalize_package_name("1password.api"), "pkg_1password_api");
        assert_eq!(generalize_package_name(""), "");
    }

    #[test]
    fn test_go_package_parts() {
        assert_eq!(go_package_name("example/gen/test/v1;testv1"), "testv1");
        assert_eq!(go_package_name("example/gen/test/v1"), "v1");
        assert_eq!(go_package_name(""), "");
        assert_eq!(go_package_import("example/gen/test/v1;testv1"), "example/gen/test/v1");
        assert_eq!(go_package_import("example/gen/test/v1"), "example/gen/test/v1");
    }

    #[test]
    fn test_join_output_path() {
        assert_eq!(join_output_path("", "a.go"), "a.go");
        assert_eq!(join_output_path("test/v1/", "a.go"), "test/v1/a.go");
        assert_eq!(join_output_path("./test//v1", "a.go"), "test/v1/a.go");
    }

    #[test]
    fn test_receiver_name() {
        assert_eq!(receiver_name("TestServiceHandler"), "t");
        assert_eq!(receiver_name(""), "h");
    }

    #[test]
    fn test_derive_context_default_layout() {
        let file = test_file();
        let ctx = derive_context(&file, &file.services[0], &options("out=gen"));

        assert_eq!(ctx.package_name, "test_v1");
        assert_eq!(ctx.struct_name, "TestServiceHandler");
        assert_eq!(ctx.receiver, "t");
        assert_eq!(ctx.manifest_path, "test_service_handler.gen.go");
        assert_eq!(ctx.struct_path, "test_service_handler.go");
        assert_eq!(ctx.dir, "");
        assert!(ctx.per_service);
        assert_eq!(ctx.proto_import, "example.com/test/gen/proto/test/v1");
        assert_eq!(ctx.proto_alias, "testv1");
        assert!(ctx.method.is_none());

        let names: Vec<_> = ctx.service.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Echo", "EchoSummary"]);
        assert_eq!(ctx.service.methods[0].input, "testv1.EchoRequest");
        assert!(ctx.service.methods[1].client_stream);
    }

    #[test]
    fn test_derive_context_with_pattern_and_suffix() {
        let file = test_file();
        let ctx = derive_context(
            &file,
            &file.services[0],
            &options("out=gen,mode=per_method,impl_suffix=_impl,dir_pattern={package_path}/{service_snake}"),
        );

        assert_eq!(ctx.dir, "test/v1/test_service");
        assert_eq!(ctx.manifest_path, "test/v1/test_service/test_service_impl.gen.go");
        assert_eq!(ctx.struct_path, "test/v1/test_service/test_service_impl.go");
        assert_eq!(ctx.mode, GenerationMode::PerMethod);
        assert!(!ctx.per_service);
        assert_eq!(
            method_file_path(&ctx.dir, "TestService", "EchoSummary"),
            "test/v1/test_service/test_service_echo_summary.go"
        );
    }

    #[test]
    fn test_method_override_leaves_service_context_untouched() {
        let file = test_file();
        let ctx = derive_context(&file, &file.services[0], &options("out=gen"));
        let method = method_context(&file.services[0].methods[0], &file);

        let method_ctx = ctx.for_method(method.clone(), Some("x.go".to_string()));

        assert_eq!(method_ctx.method, Some(method));
        assert_eq!(method_ctx.method_path.as_deref(), Some("x.go"));
        assert!(ctx.method.is_none());
        assert!(ctx.method_path.is_none());
        assert_eq!(method_ctx.struct_path, ctx.struct_path);
    }
}
