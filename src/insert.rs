//! 批量 INSERT 语句模型：目标表 + 不透明记录 + 每列一条映射策略。
//!
//! 记录的内部结构这里从不解释；Property 映射只输出以属性名命名的占位符，
//! 值提取由外部执行层按名字完成、每条记录一次。

use crate::column::{Column, SqlTable};
use crate::flavor::Flavor;
use crate::string_builder::StringBuilder;

/// 语句装配错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("insert model has no records")]
    NoRecords,
    #[error("insert model has no column mappings")]
    NoColumnMappings,
    #[error("insert column mappings require plain named columns")]
    UnnamedColumn,
}

/// 一个目标列的取值策略；每列恰好一条。
#[derive(Debug, Clone)]
pub enum ValueMapping {
    /// 绑定到记录的具名属性，值提取延迟到执行层。
    Property { column: Column, property: String },
    /// SQL NULL。
    Null { column: Column },
    /// 原样拼入的常量片段，不转义。
    Constant { column: Column, text: String },
    /// 按方言包成字符串字面量的常量。
    StringConstant { column: Column, text: String },
}

impl ValueMapping {
    fn column(&self) -> &Column {
        match self {
            Self::Property { column, .. }
            | Self::Null { column }
            | Self::Constant { column, .. }
            | Self::StringConstant { column, .. } => column,
        }
    }
}

/// 入口：先收集记录，再用 `into_table` 指定目标表。
pub fn insert_batch<R>(records: impl IntoIterator<Item = R>) -> IntoGatherer<R> {
    IntoGatherer {
        records: records.into_iter().collect(),
    }
}

pub struct IntoGatherer<R> {
    records: Vec<R>,
}

impl<R> IntoGatherer<R> {
    pub fn into_table(self, table: SqlTable) -> BatchInsertBuilder<R> {
        BatchInsertBuilder {
            table,
            records: self.records,
            mappings: Vec::new(),
        }
    }
}

/// 自消耗 builder：`build()` 之后模型冻结，无法再改。
pub struct BatchInsertBuilder<R> {
    table: SqlTable,
    records: Vec<R>,
    mappings: Vec<ValueMapping>,
}

impl<R> BatchInsertBuilder<R> {
    /// 为一个目标列挑选映射策略。
    pub fn map(self, column: Column) -> ColumnMappingFinisher<R> {
        ColumnMappingFinisher {
            builder: self,
            column,
        }
    }

    /// 冻结模型。映射列与表的归属关系不做校验，由调用方负责。
    pub fn build(self) -> Result<BatchInsertModel<R>, BuildError> {
        if self.records.is_empty() {
            return Err(BuildError::NoRecords);
        }
        if self.mappings.is_empty() {
            return Err(BuildError::NoColumnMappings);
        }
        if self.mappings.iter().any(|m| m.column().name().is_none()) {
            return Err(BuildError::UnnamedColumn);
        }
        Ok(BatchInsertModel {
            table: self.table,
            records: self.records,
            mappings: self.mappings,
        })
    }
}

pub struct ColumnMappingFinisher<R> {
    builder: BatchInsertBuilder<R>,
    column: Column,
}

impl<R> ColumnMappingFinisher<R> {
    pub fn to_property(mut self, property: impl Into<String>) -> BatchInsertBuilder<R> {
        self.builder.mappings.push(ValueMapping::Property {
            column: self.column,
            property: property.into(),
        });
        self.builder
    }

    pub fn to_null(mut self) -> BatchInsertBuilder<R> {
        self.builder.mappings.push(ValueMapping::Null {
            column: self.column,
        });
        self.builder
    }

    pub fn to_constant(mut self, text: impl Into<String>) -> BatchInsertBuilder<R> {
        self.builder.mappings.push(ValueMapping::Constant {
            column: self.column,
            text: text.into(),
        });
        self.builder
    }

    pub fn to_string_constant(mut self, text: impl Into<String>) -> BatchInsertBuilder<R> {
        self.builder.mappings.push(ValueMapping::StringConstant {
            column: self.column,
            text: text.into(),
        });
        self.builder
    }
}

/// 冻结后的批量插入模型。
#[derive(Debug, Clone)]
pub struct BatchInsertModel<R> {
    table: SqlTable,
    records: Vec<R>,
    mappings: Vec<ValueMapping>,
}

impl<R> BatchInsertModel<R> {
    pub fn table(&self) -> &SqlTable {
        &self.table
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn column_mappings(&self) -> &[ValueMapping] {
        &self.mappings
    }

    /// 渲染语句文本。模型不动，可以换方言反复渲染。
    pub fn render(&self, flavor: Flavor) -> BatchInsert<'_, R> {
        let names: Vec<String> = self
            .mappings
            .iter()
            .map(|m| {
                m.column()
                    .name()
                    .expect("build() rejects unnamed mapping columns")
                    .to_string()
            })
            .collect();
        let values: Vec<String> = self
            .mappings
            .iter()
            .map(|m| match m {
                ValueMapping::Property { property, .. } => flavor.parameter_marker(property),
                ValueMapping::Null { .. } => "null".to_string(),
                ValueMapping::Constant { text, .. } => text.clone(),
                ValueMapping::StringConstant { text, .. } => flavor.quote_string(text),
            })
            .collect();

        let mut buf = StringBuilder::new();
        buf.write_leading("insert");
        buf.write_str(" into ");
        buf.write_str(self.table.name());
        buf.write_str(" (");
        buf.write_strings(&names, ", ");
        buf.write_char(')');
        buf.write_leading("values");
        buf.write_str(" (");
        buf.write_strings(&values, ", ");
        buf.write_char(')');

        BatchInsert {
            sql: buf.into_string(),
            records: &self.records,
        }
    }
}

/// 渲染产物：语句文本 + 待执行层逐条绑定的记录。
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInsert<'a, R> {
    pub sql: String,
    pub records: &'a [R],
}
