//! RenderingContext：一次渲染遍历内的可变状态（参数计数器 + 方言）。

use crate::flavor::{Flavor, default_flavor};
use crate::fragment::ParameterBindings;
use crate::value::SqlValue;

/// 一次顶层渲染分配一个 RenderingContext，用完即弃。
///
/// 计数器单调递增、从不复用，保证同一棵树里无论同一列/同一值出现多少次，
/// 每次绑定都拿到一个新名字。多个并发渲染各用各的 context，绝不共享。
#[derive(Debug)]
pub struct RenderingContext {
    flavor: Flavor,
    prefix: &'static str,
    sequence: usize,
}

/// 一次参数分配的结果：名字（如 `p1`）和嵌入 SQL 文本的标记（如 `:p1`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub marker: String,
}

impl RenderingContext {
    pub fn new(flavor: Flavor) -> Self {
        Self::with_prefix(flavor, "p")
    }

    /// 使用自定义参数名前缀（占位符名 = 前缀 + 序号）。
    pub fn with_prefix(flavor: Flavor, prefix: &'static str) -> Self {
        Self {
            flavor,
            prefix,
            sequence: 0,
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// 分配下一个占位符。每次绑定值都要重新分配，不能缓存复用。
    pub fn next_parameter(&mut self) -> Parameter {
        self.sequence += 1;
        let name = format!("{}{}", self.prefix, self.sequence);
        let marker = self.flavor.parameter_marker(&name);
        Parameter { name, marker }
    }
}

impl Default for RenderingContext {
    fn default() -> Self {
        Self::new(default_flavor())
    }
}

/// 顶层渲染的最终产物，交给外部执行层：SQL 文本 + 有序参数表。
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSql {
    pub sql: String,
    pub parameters: ParameterBindings,
}

impl RenderedSql {
    pub(crate) fn empty() -> Self {
        Self {
            sql: String::new(),
            parameters: Vec::new(),
        }
    }

    /// 按名字查找绑定值。
    pub fn parameter(&self, name: &str) -> Option<&SqlValue> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}
