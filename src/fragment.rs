//! FragmentAndParameters：每个节点渲染产物 —— SQL 片段 + 有序参数绑定。

use crate::value::SqlValue;

/// 有序的参数绑定序列（按生成顺序，名字在一次渲染内全局唯一）。
pub type ParameterBindings = Vec<(String, SqlValue)>;

/// 一次节点渲染的产物：一段 SQL 文本 + 其中占位符对应的参数绑定。
///
/// 合并两个 FragmentAndParameters 时若出现重名参数，说明树的构造逻辑有
/// bug（占位符名来自单调计数器，正常情况下不可能撞名），直接 panic。
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentAndParameters {
    fragment: String,
    parameters: ParameterBindings,
}

impl FragmentAndParameters {
    /// 只有文本、没有参数的片段。
    pub fn from_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            parameters: Vec::new(),
        }
    }

    /// 文本 + 一组参数绑定。
    pub fn new(fragment: impl Into<String>, parameters: ParameterBindings) -> Self {
        let out = Self {
            fragment: fragment.into(),
            parameters,
        };
        out.assert_unique_names();
        out
    }

    /// 追加一个参数绑定。
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let name = name.into();
        assert!(
            !self.parameters.iter().any(|(n, _)| *n == name),
            "duplicate parameter name `{name}` in fragment"
        );
        self.parameters.push((name, value.into()));
        self
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parameters(&self) -> &[(String, SqlValue)] {
        &self.parameters
    }

    /// 纯文本变换，参数绑定原样保留（如包一层函数名或括号）。
    pub fn map_fragment(mut self, f: impl FnOnce(String) -> String) -> Self {
        self.fragment = f(self.fragment);
        self
    }

    /// 以 `separator` 连接两个片段，并按顺序合并参数绑定。
    pub fn append(mut self, separator: &str, other: Self) -> Self {
        self.fragment.push_str(separator);
        self.fragment.push_str(&other.fragment);
        for (name, value) in other.parameters {
            assert!(
                !self.parameters.iter().any(|(n, _)| *n == name),
                "duplicate parameter name `{name}` when merging fragments"
            );
            self.parameters.push((name, value));
        }
        self
    }

    pub(crate) fn into_parts(self) -> (String, ParameterBindings) {
        (self.fragment, self.parameters)
    }

    fn assert_unique_names(&self) {
        for (i, (name, _)) in self.parameters.iter().enumerate() {
            assert!(
                !self.parameters[..i].iter().any(|(n, _)| n == name),
                "duplicate parameter name `{name}` in fragment"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FragmentAndParameters;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_fragment_has_no_parameters() {
        let f = FragmentAndParameters::from_fragment("a = 1");
        assert_eq!(f.fragment(), "a = 1");
        assert!(f.parameters().is_empty());
    }

    #[test]
    fn append_keeps_parameter_order() {
        let a = FragmentAndParameters::from_fragment("a = :p1").with_parameter("p1", 1_i64);
        let b = FragmentAndParameters::from_fragment("b = :p2").with_parameter("p2", 2_i64);
        let merged = a.append(" and ", b);
        assert_eq!(merged.fragment(), "a = :p1 and b = :p2");
        assert_eq!(
            merged.parameters(),
            &[
                ("p1".to_string(), SqlValue::I64(1)),
                ("p2".to_string(), SqlValue::I64(2)),
            ]
        );
    }

    #[test]
    fn map_fragment_keeps_bindings() {
        let f = FragmentAndParameters::from_fragment("a = :p1")
            .with_parameter("p1", 1_i64)
            .map_fragment(|s| format!("({s})"));
        assert_eq!(f.fragment(), "(a = :p1)");
        assert_eq!(f.parameters().len(), 1);
    }

    #[test]
    #[should_panic(expected = "duplicate parameter name")]
    fn merging_duplicate_names_panics() {
        let a = FragmentAndParameters::from_fragment("a = :p1").with_parameter("p1", 1_i64);
        let b = FragmentAndParameters::from_fragment("b = :p1").with_parameter("p1", 2_i64);
        let _ = a.append(" and ", b);
    }

    #[test]
    #[should_panic(expected = "duplicate parameter name")]
    fn with_duplicate_parameter_panics() {
        let _ = FragmentAndParameters::from_fragment("a")
            .with_parameter("p1", 1_i64)
            .with_parameter("p1", 2_i64);
    }
}
