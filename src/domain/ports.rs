use crate::domain::model::{GenerationContext, TemplateKind};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 將模板與上下文展開成原始碼文字
pub trait Renderer {
    fn render(&self, kind: TemplateKind, context: &GenerationContext) -> Result<String>;
}

/// Answers "is method M already defined on struct S in file F".
///
/// Must never fail: a missing or unparsable file simply reports `false`.
pub trait MethodOracle {
    fn method_exists(&self, path: &Path, struct_name: &str, method_name: &str) -> bool;
}

/// 唯讀的輸出目錄；寫入永遠由 protoc 負責
pub trait SourceTree {
    fn resolve(&self, relative: &str) -> PathBuf;
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

impl<T: Renderer + ?Sized> Renderer for &T {
    fn render(&self, kind: TemplateKind, context: &GenerationContext) -> Result<String> {
        (**self).render(kind, context)
    }
}

impl<T: MethodOracle + ?Sized> MethodOracle for &T {
    fn method_exists(&self, path: &Path, struct_name: &str, method_name: &str) -> bool {
        (**self).method_exists(path, struct_name, method_name)
    }
}

impl<T: SourceTree + ?Sized> SourceTree for &T {
    fn resolve(&self, relative: &str) -> PathBuf {
        (**self).resolve(relative)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }
}
