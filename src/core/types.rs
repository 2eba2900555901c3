use crate::core::naming::go_package_name;
use crate::domain::model::FileUnit;

/// Alias used for types declared in `file` itself.
///
/// Taken from `go_package`; a file without one falls back to the same
/// underscore alias foreign packages get.
pub fn file_alias(file: &FileUnit) -> String {
    let alias = go_package_name(&file.go_package);
    if alias.is_empty() {
        fallback_alias(file.package.strip_prefix('.').unwrap_or(&file.package))
    } else {
        alias
    }
}

/// 外部套件的近似別名：`google.protobuf` -> `google_protobuf`
///
/// This does not look up the real `go_package` of the imported file.
pub fn fallback_alias(package: &str) -> String {
    package.replace('.', "_")
}

/// 將 `.test.v1.EchoRequest` 轉成 Go 型別參照 `testv1.EchoRequest`
pub fn resolve_type(qualified: &str, owner: &FileUnit) -> String {
    let qualified = qualified.strip_prefix('.').unwrap_or(qualified);

    let Some((package, message)) = qualified.rsplit_once('.') else {
        return qualified.to_string();
    };

    let owner_package = owner.package.strip_prefix('.').unwrap_or(&owner.package);
    let alias = if package == owner_package {
        file_alias(owner)
    } else {
        fallback_alias(package)
    };

    format!("{}.{}", alias, message)
}
