//! halo-sql-model：强类型、可组合的 SQL 语句模型与条件渲染库。
//!
//! 不可变的表达式/条件节点组成语句树，一次渲染遍历产出方言正确的 SQL
//! 文本 + 有序的具名参数表，交给外部执行层去绑定与执行。

pub mod column;
#[cfg(test)]
mod column_tests;
pub mod condition;
pub mod criteria;
#[cfg(test)]
mod criteria_tests;
pub mod flavor;
pub mod fragment;
pub mod insert;
pub mod render;
pub mod string_builder;
pub mod value;
pub mod where_clause;

pub use crate::column::{
    Column, SqlTable, add, avg, bound_value, column, concatenate, constant, count, count_all,
    derived_column, divide, lower, max, min, multiply, string_constant, subtract, sum, upper,
};
pub use crate::condition::Condition;
pub use crate::criteria::{
    Connector, CriteriaGroup, Criterion, NotPredicate, Predicate, RawPredicate,
};
pub use crate::flavor::{
    Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped,
};
pub use crate::fragment::{FragmentAndParameters, ParameterBindings};
pub use crate::insert::{
    BatchInsert, BatchInsertBuilder, BatchInsertModel, BuildError, ColumnMappingFinisher,
    IntoGatherer, ValueMapping, insert_batch,
};
pub use crate::render::{Parameter, RenderedSql, RenderingContext};
pub use crate::value::SqlValue;
pub use crate::where_clause::WhereClause;

/// 推荐的便捷命名空间：允许 `use halo_model::sqlmodel::{...}` 形式导入。
pub mod sqlmodel {
    pub use crate::*;
}
