//! 条件树：AND/OR 连接、缺席成员剔除、连接符提升与嵌套括号。

use crate::column::Column;
use crate::condition::Condition;
use crate::fragment::FragmentAndParameters;
use crate::render::RenderingContext;
use crate::value::SqlValue;
use dyn_clone::DynClone;
use std::fmt;

/// 布尔连接符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 可由外部（比如 select DSL 的 exists 子查询）实现的自渲染谓词。
///
/// 谓词永远在场，不参与缺席剔除。
pub trait Predicate: DynClone + fmt::Debug + Send + Sync {
    fn render(&self, ctx: &mut RenderingContext) -> FragmentAndParameters;
}

dyn_clone::clone_trait_object!(Predicate);

/// 原样拼入的谓词片段（不含参数绑定）。
#[derive(Debug, Clone)]
pub struct RawPredicate {
    sql: String,
}

impl RawPredicate {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}

impl Predicate for RawPredicate {
    fn render(&self, _ctx: &mut RenderingContext) -> FragmentAndParameters {
        FragmentAndParameters::from_fragment(self.sql.clone())
    }
}

/// 对另一个谓词取反：`not (...)`。
#[derive(Debug, Clone)]
pub struct NotPredicate {
    inner: Box<dyn Predicate>,
}

impl NotPredicate {
    pub fn new(inner: impl Predicate + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Predicate for NotPredicate {
    fn render(&self, ctx: &mut RenderingContext) -> FragmentAndParameters {
        self.inner
            .render(ctx)
            .map_fragment(|s| format!("not ({s})"))
    }
}

/// 条件树的一个节点：列 + 条件、独立谓词、或嵌套子组。
#[derive(Debug, Clone)]
pub enum Criterion {
    Column {
        column: Column,
        condition: Condition<SqlValue>,
    },
    Predicate(Box<dyn Predicate>),
    Group(CriteriaGroup),
}

impl Criterion {
    pub fn column<T: Into<SqlValue>>(column: Column, condition: Condition<T>) -> Self {
        Self::Column {
            column,
            condition: condition.into_sql_values(),
        }
    }

    pub fn predicate(predicate: impl Predicate + 'static) -> Self {
        Self::Predicate(Box::new(predicate))
    }

    pub fn group(group: CriteriaGroup) -> Self {
        Self::Group(group)
    }

    pub fn is_absent(&self) -> bool {
        match self {
            Self::Column { condition, .. } => condition.is_absent(),
            Self::Predicate(_) => false,
            Self::Group(group) => group.is_absent(),
        }
    }

    /// 渲染一个在场节点。嵌套子组在这里加括号。
    fn render(&self, ctx: &mut RenderingContext) -> FragmentAndParameters {
        match self {
            Self::Column { column, condition } => {
                let rendered = column.render(ctx);
                condition.render(ctx, rendered)
            }
            Self::Predicate(predicate) => predicate.render(ctx),
            Self::Group(group) => group
                .render_nested(ctx)
                .expect("absent criterion must be elided before rendering"),
        }
    }
}

impl From<CriteriaGroup> for Criterion {
    fn from(group: CriteriaGroup) -> Self {
        Self::Group(group)
    }
}

/// 一个条件组：一个初始节点 + 有序的（连接符, 节点）序列。
///
/// 渲染时先剔除缺席成员；初始节点缺席时把第一个在场的后续成员提升为
/// 初始（其连接符被丢弃）；全部缺席则整组缺席，由父节点剔除。
/// 作为嵌套成员渲染时整组加括号（即使坍缩到只剩一个成员也加——这是
/// 固定行为）；顶层组不加。
#[derive(Debug, Clone)]
pub struct CriteriaGroup {
    initial: Box<Criterion>,
    subsequent: Vec<(Connector, Criterion)>,
}

impl CriteriaGroup {
    pub fn new(initial: impl Into<Criterion>) -> Self {
        Self {
            initial: Box::new(initial.into()),
            subsequent: Vec::new(),
        }
    }

    pub fn and(mut self, criterion: impl Into<Criterion>) -> Self {
        self.subsequent.push((Connector::And, criterion.into()));
        self
    }

    pub fn or(mut self, criterion: impl Into<Criterion>) -> Self {
        self.subsequent.push((Connector::Or, criterion.into()));
        self
    }

    /// 整组是否缺席（没有任何在场成员）。
    pub fn is_absent(&self) -> bool {
        self.initial.is_absent() && self.subsequent.iter().all(|(_, c)| c.is_absent())
    }

    /// 顶层渲染：不加括号。整组缺席返回 `None`。
    pub(crate) fn render_top_level(
        &self,
        ctx: &mut RenderingContext,
    ) -> Option<FragmentAndParameters> {
        self.render_members(ctx)
    }

    /// 嵌套渲染：在场时整组加括号。
    pub(crate) fn render_nested(
        &self,
        ctx: &mut RenderingContext,
    ) -> Option<FragmentAndParameters> {
        self.render_members(ctx)
            .map(|f| f.map_fragment(|s| format!("({s})")))
    }

    fn render_members(&self, ctx: &mut RenderingContext) -> Option<FragmentAndParameters> {
        // 剔除缺席成员；第一个在场成员不渲染连接符（提升即丢弃连接符）
        let mut members: Vec<(Option<Connector>, &Criterion)> = Vec::new();
        if !self.initial.is_absent() {
            members.push((None, &*self.initial));
        }
        for (connector, criterion) in &self.subsequent {
            if !criterion.is_absent() {
                let connector = if members.is_empty() {
                    None
                } else {
                    Some(*connector)
                };
                members.push((connector, criterion));
            }
        }

        let mut iter = members.into_iter();
        let (_, first) = iter.next()?;
        let mut fragment = first.render(ctx);
        for (connector, criterion) in iter {
            let connector = connector.expect("non-leading member must carry a connector");
            fragment = fragment.append(
                &format!(" {} ", connector.as_str()),
                criterion.render(ctx),
            );
        }
        Some(fragment)
    }
}
