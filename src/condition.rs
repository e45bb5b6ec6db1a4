//! Condition：单比较符条件与"值缺席"模型。
//!
//! `*_when_present` 构造器在值缺失时返回 `Condition::Absent`；缺席条件由
//! 外层条件树在渲染前剔除。直接渲染一个缺席条件属于调用方 bug，会 panic，
//! 而不是被悄悄吞掉。

use crate::fragment::FragmentAndParameters;
use crate::render::RenderingContext;
use crate::value::SqlValue;

/// 一个比较符条件：按操作数个数分为无值 / 单值 / 双值 / 列表，外加
/// 规范的缺席表示。
#[derive(Debug, Clone, PartialEq)]
pub enum Condition<T> {
    /// `is null` / `is not null`：只渲染操作符本身。
    NoValue { operator: &'static str },
    Single { operator: &'static str, value: T },
    /// 双操作数（`between ... and ...`）；任一操作数缺失则整个条件缺席。
    Pair {
        operator: &'static str,
        first: T,
        second: T,
    },
    List {
        operator: &'static str,
        values: Vec<T>,
    },
    /// 缺席条件：渲染前必须被外层条件树剔除。
    Absent,
}

impl<T> Condition<T> {
    pub fn is_null() -> Self {
        Self::NoValue {
            operator: "is null",
        }
    }

    pub fn is_not_null() -> Self {
        Self::NoValue {
            operator: "is not null",
        }
    }

    pub fn is_equal_to(value: T) -> Self {
        Self::Single {
            operator: "=",
            value,
        }
    }

    pub fn is_not_equal_to(value: T) -> Self {
        Self::Single {
            operator: "<>",
            value,
        }
    }

    pub fn is_greater_than(value: T) -> Self {
        Self::Single {
            operator: ">",
            value,
        }
    }

    pub fn is_greater_than_or_equal_to(value: T) -> Self {
        Self::Single {
            operator: ">=",
            value,
        }
    }

    pub fn is_less_than(value: T) -> Self {
        Self::Single {
            operator: "<",
            value,
        }
    }

    pub fn is_less_than_or_equal_to(value: T) -> Self {
        Self::Single {
            operator: "<=",
            value,
        }
    }

    pub fn is_like(value: T) -> Self {
        Self::Single {
            operator: "like",
            value,
        }
    }

    pub fn is_not_like(value: T) -> Self {
        Self::Single {
            operator: "not like",
            value,
        }
    }

    pub fn is_between(first: T, second: T) -> Self {
        Self::Pair {
            operator: "between",
            first,
            second,
        }
    }

    pub fn is_not_between(first: T, second: T) -> Self {
        Self::Pair {
            operator: "not between",
            first,
            second,
        }
    }

    /// 空列表直接缺席（渲染 `in ()` 没有意义）。
    pub fn is_in(values: impl IntoIterator<Item = T>) -> Self {
        Self::list("in", values.into_iter().collect())
    }

    pub fn is_not_in(values: impl IntoIterator<Item = T>) -> Self {
        Self::list("not in", values.into_iter().collect())
    }

    fn list(operator: &'static str, values: Vec<T>) -> Self {
        if values.is_empty() {
            Self::Absent
        } else {
            Self::List { operator, values }
        }
    }

    fn single_when_present(operator: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Single { operator, value },
            None => Self::Absent,
        }
    }

    pub fn is_equal_to_when_present(value: Option<T>) -> Self {
        Self::single_when_present("=", value)
    }

    pub fn is_not_equal_to_when_present(value: Option<T>) -> Self {
        Self::single_when_present("<>", value)
    }

    pub fn is_greater_than_when_present(value: Option<T>) -> Self {
        Self::single_when_present(">", value)
    }

    pub fn is_greater_than_or_equal_to_when_present(value: Option<T>) -> Self {
        Self::single_when_present(">=", value)
    }

    pub fn is_less_than_when_present(value: Option<T>) -> Self {
        Self::single_when_present("<", value)
    }

    pub fn is_less_than_or_equal_to_when_present(value: Option<T>) -> Self {
        Self::single_when_present("<=", value)
    }

    pub fn is_like_when_present(value: Option<T>) -> Self {
        Self::single_when_present("like", value)
    }

    pub fn is_not_like_when_present(value: Option<T>) -> Self {
        Self::single_when_present("not like", value)
    }

    /// 任一端缺失则整个条件缺席。
    pub fn is_between_when_present(first: Option<T>, second: Option<T>) -> Self {
        match (first, second) {
            (Some(first), Some(second)) => Self::is_between(first, second),
            _ => Self::Absent,
        }
    }

    pub fn is_not_between_when_present(first: Option<T>, second: Option<T>) -> Self {
        match (first, second) {
            (Some(first), Some(second)) => Self::is_not_between(first, second),
            _ => Self::Absent,
        }
    }

    /// 多值条件只有在所有操作数都在场时才在场：任一 `None` 整体缺席。
    pub fn is_in_when_present(values: impl IntoIterator<Item = Option<T>>) -> Self {
        match values.into_iter().collect::<Option<Vec<T>>>() {
            Some(values) => Self::list("in", values),
            None => Self::Absent,
        }
    }

    pub fn is_not_in_when_present(values: impl IntoIterator<Item = Option<T>>) -> Self {
        match values.into_iter().collect::<Option<Vec<T>>>() {
            Some(values) => Self::list("not in", values),
            None => Self::Absent,
        }
    }

    /// 固定比较符 token；缺席条件返回 `None`。
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Self::NoValue { operator }
            | Self::Single { operator, .. }
            | Self::Pair { operator, .. }
            | Self::List { operator, .. } => Some(operator),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// 用谓词过滤持有的值：不满足则整个条件坍缩为缺席。
    ///
    /// 双值条件要求两端都满足；列表条件保留满足的元素，清空即缺席。
    /// 缺席条件原样返回。
    pub fn filter(self, predicate: impl Fn(&T) -> bool) -> Self {
        match self {
            Self::Single { operator, value } => {
                if predicate(&value) {
                    Self::Single { operator, value }
                } else {
                    Self::Absent
                }
            }
            Self::Pair {
                operator,
                first,
                second,
            } => {
                if predicate(&first) && predicate(&second) {
                    Self::Pair {
                        operator,
                        first,
                        second,
                    }
                } else {
                    Self::Absent
                }
            }
            Self::List { operator, values } => {
                Self::list(operator, values.into_iter().filter(|v| predicate(v)).collect())
            }
            other => other,
        }
    }

    /// 变换持有的值。变换可以返回 `R` 或 `Option<R>`；返回 `None` 时条件
    /// 坍缩为缺席（与 when-present 构造器同一条规则）。
    pub fn map<R, U: Into<Option<R>>>(self, mut f: impl FnMut(T) -> U) -> Condition<R> {
        match self {
            Self::NoValue { operator } => Condition::NoValue { operator },
            Self::Single { operator, value } => match f(value).into() {
                Some(value) => Condition::Single { operator, value },
                None => Condition::Absent,
            },
            Self::Pair {
                operator,
                first,
                second,
            } => match (f(first).into(), f(second).into()) {
                (Some(first), Some(second)) => Condition::Pair {
                    operator,
                    first,
                    second,
                },
                _ => Condition::Absent,
            },
            Self::List { operator, values } => {
                match values
                    .into_iter()
                    .map(|v| f(v).into())
                    .collect::<Option<Vec<R>>>()
                {
                    Some(values) => Condition::list(operator, values),
                    None => Condition::Absent,
                }
            }
            Self::Absent => Condition::Absent,
        }
    }
}

impl<T: Into<SqlValue>> Condition<T> {
    /// 把持有的值统一成 `SqlValue`，供条件树存储。
    pub(crate) fn into_sql_values(self) -> Condition<SqlValue> {
        self.map(|v| v.into())
    }
}

impl Condition<SqlValue> {
    /// 在已渲染的列片段后渲染比较符和占位符。
    ///
    /// 调用前提：条件在场。缺席条件由外层条件树剔除，落到这里说明
    /// 树的构造逻辑有 bug。
    pub(crate) fn render(
        &self,
        ctx: &mut RenderingContext,
        column: FragmentAndParameters,
    ) -> FragmentAndParameters {
        match self {
            Self::NoValue { operator } => column.map_fragment(|s| format!("{s} {operator}")),
            Self::Single { operator, value } => {
                let p = ctx.next_parameter();
                column
                    .map_fragment(|s| format!("{s} {operator} {}", p.marker))
                    .with_parameter(p.name, value.clone())
            }
            Self::Pair {
                operator,
                first,
                second,
            } => {
                let p1 = ctx.next_parameter();
                let p2 = ctx.next_parameter();
                column
                    .map_fragment(|s| format!("{s} {operator} {} and {}", p1.marker, p2.marker))
                    .with_parameter(p1.name, first.clone())
                    .with_parameter(p2.name, second.clone())
            }
            Self::List { operator, values } => {
                let mut markers = Vec::with_capacity(values.len());
                let mut out = column;
                let mut bindings = Vec::with_capacity(values.len());
                for value in values {
                    let p = ctx.next_parameter();
                    markers.push(p.marker);
                    bindings.push((p.name, value.clone()));
                }
                for (name, value) in bindings {
                    out = out.with_parameter(name, value);
                }
                out.map_fragment(|s| format!("{s} {operator} ({})", markers.join(", ")))
            }
            Self::Absent => {
                panic!("rendering an absent condition is a bug in the calling code")
            }
        }
    }
}
