//! WhereClause：顶层布尔表达式的渲染入口。
//!
//! 模型本身不可变，可以被多个线程反复渲染；每次 `render` 都会分配一个
//! 全新的 RenderingContext，绝不跨渲染共享。

use crate::criteria::CriteriaGroup;
use crate::flavor::{Flavor, default_flavor};
use crate::render::{RenderedSql, RenderingContext};

/// 顶层 WHERE 表达式：持有条件树根组与渲染方言。
#[derive(Debug, Clone)]
pub struct WhereClause {
    root: CriteriaGroup,
    flavor: Flavor,
}

impl WhereClause {
    pub fn new(root: CriteriaGroup) -> Self {
        Self::with_flavor(root, default_flavor())
    }

    pub fn with_flavor(root: CriteriaGroup, flavor: Flavor) -> Self {
        Self { root, flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn root(&self) -> &CriteriaGroup {
        &self.root
    }

    /// 渲染 `where ...`；整棵树缺席时输出为空。
    pub fn render(&self) -> RenderedSql {
        self.render_internal(Some("where "))
    }

    /// 只渲染布尔表达式本身，不带关键字（供 HAVING 等装配方嵌入）。
    pub fn render_expression(&self) -> RenderedSql {
        self.render_internal(None)
    }

    fn render_internal(&self, keyword: Option<&str>) -> RenderedSql {
        let mut ctx = RenderingContext::new(self.flavor);
        match self.root.render_top_level(&mut ctx) {
            Some(fragment) => {
                let (sql, parameters) = fragment.into_parts();
                let sql = match keyword {
                    Some(kw) => format!("{kw}{sql}"),
                    None => sql,
                };
                RenderedSql { sql, parameters }
            }
            None => RenderedSql::empty(),
        }
    }
}
