#[cfg(test)]
mod tests {
    use crate::column::{
        ColumnKind, SqlFunction, SqlTable, add, avg, bound_value, column, concatenate, constant,
        count_all, derived_column, lower, multiply, string_constant, upper,
    };
    use crate::flavor::Flavor;
    use crate::render::RenderingContext;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn ctx() -> RenderingContext {
        RenderingContext::new(Flavor::MySQL)
    }

    #[test]
    fn plain_column_renders_name() {
        let c = column("id");
        assert_eq!(c.render(&mut ctx()).fragment(), "id");
    }

    #[test]
    fn qualified_column_renders_dotted() {
        let c = column("id").with_qualifier("users");
        assert_eq!(c.render(&mut ctx()).fragment(), "users.id");
    }

    #[test]
    fn table_column_is_unqualified() {
        let t = SqlTable::new("users");
        assert_eq!(t.column("id").render(&mut ctx()).fragment(), "id");
    }

    #[test]
    fn derived_column_ignores_type_hint_in_rendering() {
        let c = derived_column("total")
            .with_qualifier("sub")
            .with_type_hint("DECIMAL");
        assert_eq!(c.render(&mut ctx()).fragment(), "sub.total");
        assert_eq!(c.type_hint(), Some("DECIMAL"));
    }

    #[test]
    fn constant_renders_verbatim_without_parameters() {
        let c = constant("current_timestamp");
        let f = c.render(&mut ctx());
        assert_eq!(f.fragment(), "current_timestamp");
        assert!(f.parameters().is_empty());
    }

    #[test]
    fn string_constant_is_quoted() {
        let c = string_constant("it's");
        assert_eq!(c.render(&mut ctx()).fragment(), "'it''s'");
    }

    #[test]
    fn bound_value_binds_a_parameter() {
        let c = bound_value(42_i64);
        let f = c.render(&mut ctx());
        assert_eq!(f.fragment(), ":p1");
        assert_eq!(f.parameters(), &[("p1".to_string(), SqlValue::I64(42))]);
    }

    #[test]
    fn aggregate_wraps_child() {
        let c = avg(column("price").with_qualifier("o"));
        assert_eq!(c.render(&mut ctx()).fragment(), "avg(o.price)");
    }

    #[test]
    fn unary_functions_nest() {
        let c = upper(lower(column("name")));
        assert_eq!(c.render(&mut ctx()).fragment(), "upper(lower(name))");
    }

    #[test]
    fn count_all_renders_star() {
        assert_eq!(count_all().render(&mut ctx()).fragment(), "count(*)");
    }

    #[test]
    fn operator_function_joins_children_in_order() {
        let c = add(column("a"), column("b"), [column("c")]);
        assert_eq!(c.render(&mut ctx()).fragment(), "a + b + c");

        let c = concatenate(column("first"), constant("' '"), [column("last")]);
        assert_eq!(c.render(&mut ctx()).fragment(), "first || ' ' || last");
    }

    #[test]
    fn operator_function_merges_child_parameters_in_traversal_order() {
        let c = multiply(column("qty"), bound_value(2_i64), [bound_value(3_i64)]);
        let f = c.render(&mut ctx());
        assert_eq!(f.fragment(), "qty * :p1 * :p2");
        assert_eq!(
            f.parameters(),
            &[
                ("p1".to_string(), SqlValue::I64(2)),
                ("p2".to_string(), SqlValue::I64(3)),
            ]
        );
    }

    #[test]
    fn as_does_not_mutate_the_original() {
        let c = column("id");
        let aliased = c.as_("user_id");
        assert_eq!(c.alias(), None);
        assert_eq!(aliased.alias(), Some("user_id"));
        // 原节点的渲染不受影响
        assert_eq!(c.render(&mut ctx()).fragment(), "id");
    }

    #[test]
    fn as_shares_function_children() {
        let c = avg(column("price"));
        let aliased = c.as_("avg_price");

        let child_of = |col: &crate::column::Column| match &col.kind {
            ColumnKind::Function(SqlFunction::Call { column, .. }) => Arc::clone(column),
            _ => panic!("expected a function column"),
        };
        assert!(Arc::ptr_eq(&child_of(&c), &child_of(&aliased)));
    }

    #[test]
    fn render_with_alias_emits_as_clause() {
        let c = avg(column("price")).as_("avg_price");
        assert_eq!(
            c.render_with_alias(&mut ctx()).fragment(),
            "avg(price) as avg_price"
        );
        // 条件路径的 render 永远不带别名
        assert_eq!(c.render(&mut ctx()).fragment(), "avg(price)");
    }
}
