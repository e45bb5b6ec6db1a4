//! 列与函数节点：不可变的值表达式层。
//!
//! 所有节点构造后不可变；`as_` 等变换都是纯函数，返回共享子节点的新值。
//! 子节点用 `Arc` 持有，克隆只复制指针，同一棵树可以安全地被多线程反复渲染。

use crate::fragment::FragmentAndParameters;
use crate::render::RenderingContext;
use crate::value::SqlValue;
use std::sync::Arc;

/// SQL 表引用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTable {
    name: String,
}

impl SqlTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 该表的一个普通列（不带限定符；需要时用 `with_qualifier` 附加）。
    pub fn column(&self, name: impl Into<String>) -> Column {
        column(name)
    }
}

/// 一个值表达式节点：普通列、派生列、常量、绑定值或函数。
///
/// 别名只在 select 投影路径（`render_with_alias`）输出；
/// 出现在条件树里时永远不渲染别名。
#[derive(Debug, Clone)]
pub struct Column {
    alias: Option<String>,
    pub(crate) kind: ColumnKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ColumnKind {
    Plain {
        qualifier: Option<String>,
        name: String,
    },
    /// 与具体表无关的列（子查询场景），可携带类型提示供执行层参考。
    Derived {
        qualifier: Option<String>,
        name: String,
        type_hint: Option<String>,
    },
    /// 字面量文本，原样输出、从不参数化；正确性由调用方负责。
    Constant { text: String },
    /// 会按方言包成 `'...'` 字符串字面量的常量。
    StringConstant { text: String },
    /// 绑定一个参数值的叶子节点。
    Bound { value: SqlValue },
    Function(SqlFunction),
}

#[derive(Debug, Clone)]
pub(crate) enum SqlFunction {
    /// `name(child)`：聚合或一元函数。
    Call {
        name: &'static str,
        column: Arc<Column>,
    },
    /// 子节点按原顺序渲染、以运算符相连的 n 元表达式。
    Operator {
        op: &'static str,
        columns: Vec<Arc<Column>>,
    },
}

/// 普通列。
pub fn column(name: impl Into<String>) -> Column {
    Column {
        alias: None,
        kind: ColumnKind::Plain {
            qualifier: None,
            name: name.into(),
        },
    }
}

/// 派生列（子查询列），不参与表限定规则。
pub fn derived_column(name: impl Into<String>) -> Column {
    Column {
        alias: None,
        kind: ColumnKind::Derived {
            qualifier: None,
            name: name.into(),
            type_hint: None,
        },
    }
}

/// 原样输出的字面量。
pub fn constant(text: impl Into<String>) -> Column {
    Column {
        alias: None,
        kind: ColumnKind::Constant { text: text.into() },
    }
}

/// 按方言加引号的字符串字面量。
pub fn string_constant(text: impl Into<String>) -> Column {
    Column {
        alias: None,
        kind: ColumnKind::StringConstant { text: text.into() },
    }
}

/// 绑定一个值作为参数的叶子节点。
pub fn bound_value(value: impl Into<SqlValue>) -> Column {
    Column {
        alias: None,
        kind: ColumnKind::Bound {
            value: value.into(),
        },
    }
}

fn call(name: &'static str, inner: Column) -> Column {
    Column {
        alias: None,
        kind: ColumnKind::Function(SqlFunction::Call {
            name,
            column: Arc::new(inner),
        }),
    }
}

pub fn avg(column: Column) -> Column {
    call("avg", column)
}

pub fn sum(column: Column) -> Column {
    call("sum", column)
}

pub fn min(column: Column) -> Column {
    call("min", column)
}

pub fn max(column: Column) -> Column {
    call("max", column)
}

pub fn count(column: Column) -> Column {
    call("count", column)
}

/// `count(*)`。
pub fn count_all() -> Column {
    call("count", constant("*"))
}

pub fn upper(column: Column) -> Column {
    call("upper", column)
}

pub fn lower(column: Column) -> Column {
    call("lower", column)
}

fn operator(
    op: &'static str,
    first: Column,
    second: Column,
    rest: impl IntoIterator<Item = Column>,
) -> Column {
    let mut columns = vec![Arc::new(first), Arc::new(second)];
    columns.extend(rest.into_iter().map(Arc::new));
    Column {
        alias: None,
        kind: ColumnKind::Function(SqlFunction::Operator { op, columns }),
    }
}

pub fn add(first: Column, second: Column, rest: impl IntoIterator<Item = Column>) -> Column {
    operator("+", first, second, rest)
}

pub fn subtract(first: Column, second: Column, rest: impl IntoIterator<Item = Column>) -> Column {
    operator("-", first, second, rest)
}

pub fn multiply(first: Column, second: Column, rest: impl IntoIterator<Item = Column>) -> Column {
    operator("*", first, second, rest)
}

pub fn divide(first: Column, second: Column, rest: impl IntoIterator<Item = Column>) -> Column {
    operator("/", first, second, rest)
}

pub fn concatenate(
    first: Column,
    second: Column,
    rest: impl IntoIterator<Item = Column>,
) -> Column {
    operator("||", first, second, rest)
}

impl Column {
    /// 返回替换了别名的新节点；子节点共享、原节点不变。
    pub fn as_(&self, alias: impl Into<String>) -> Column {
        Column {
            alias: Some(alias.into()),
            kind: self.kind.clone(),
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// 列名（仅普通列/派生列有）。
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::Plain { name, .. } | ColumnKind::Derived { name, .. } => Some(name),
            _ => None,
        }
    }

    /// 附加表限定符，返回新节点；只对普通列/派生列生效。
    pub fn with_qualifier(&self, qualifier: impl Into<String>) -> Column {
        let mut out = self.clone();
        match &mut out.kind {
            ColumnKind::Plain { qualifier: q, .. } | ColumnKind::Derived { qualifier: q, .. } => {
                *q = Some(qualifier.into());
            }
            _ => {}
        }
        out
    }

    /// 附加类型提示，返回新节点；只对派生列生效。
    pub fn with_type_hint(&self, hint: impl Into<String>) -> Column {
        let mut out = self.clone();
        if let ColumnKind::Derived { type_hint, .. } = &mut out.kind {
            *type_hint = Some(hint.into());
        }
        out
    }

    pub fn type_hint(&self) -> Option<&str> {
        match &self.kind {
            ColumnKind::Derived { type_hint, .. } => type_hint.as_deref(),
            _ => None,
        }
    }

    /// 渲染表达式本身（不带别名）。条件树内部只会走这条路径。
    pub fn render(&self, ctx: &mut RenderingContext) -> FragmentAndParameters {
        match &self.kind {
            ColumnKind::Plain { qualifier, name }
            | ColumnKind::Derived {
                qualifier, name, ..
            } => match qualifier {
                Some(q) => FragmentAndParameters::from_fragment(format!("{q}.{name}")),
                None => FragmentAndParameters::from_fragment(name.clone()),
            },
            ColumnKind::Constant { text } => FragmentAndParameters::from_fragment(text.clone()),
            ColumnKind::StringConstant { text } => {
                FragmentAndParameters::from_fragment(ctx.flavor().quote_string(text))
            }
            ColumnKind::Bound { value } => {
                let p = ctx.next_parameter();
                FragmentAndParameters::from_fragment(p.marker).with_parameter(p.name, value.clone())
            }
            ColumnKind::Function(f) => f.render(ctx),
        }
    }

    /// 渲染 select 投影项：表达式 + 可选的 ` as 别名`。
    pub fn render_with_alias(&self, ctx: &mut RenderingContext) -> FragmentAndParameters {
        let rendered = self.render(ctx);
        match &self.alias {
            Some(alias) => rendered.map_fragment(|s| format!("{s} as {alias}")),
            None => rendered,
        }
    }
}

impl SqlFunction {
    fn render(&self, ctx: &mut RenderingContext) -> FragmentAndParameters {
        match self {
            Self::Call { name, column } => column
                .render(ctx)
                .map_fragment(|s| format!("{name}({s})")),
            Self::Operator { op, columns } => {
                let separator = format!(" {op} ");
                let mut iter = columns.iter();
                // Operator 构造时保证至少两个子节点
                let mut fragment = iter
                    .next()
                    .expect("operator function requires at least two columns")
                    .render(ctx);
                for c in iter {
                    fragment = fragment.append(&separator, c.render(ctx));
                }
                fragment
            }
        }
    }
}
