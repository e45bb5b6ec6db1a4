#[cfg(test)]
mod tests {
    use crate::column::column;
    use crate::condition::Condition;
    use crate::criteria::{CriteriaGroup, Criterion, NotPredicate, RawPredicate};
    use crate::flavor::Flavor;
    use crate::render::RenderingContext;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    fn eq(name: &str, v: i64) -> Criterion {
        Criterion::column(column(name), Condition::is_equal_to(v))
    }

    fn absent(name: &str) -> Criterion {
        Criterion::column(column(name), Condition::<i64>::is_equal_to_when_present(None))
    }

    fn render(group: &CriteriaGroup) -> Option<(String, Vec<(String, SqlValue)>)> {
        let mut ctx = RenderingContext::new(Flavor::MySQL);
        group
            .render_top_level(&mut ctx)
            .map(|f| (f.fragment().to_string(), f.parameters().to_vec()))
    }

    #[test]
    fn single_member_group() {
        let g = CriteriaGroup::new(eq("a", 1));
        let (sql, params) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1");
        assert_eq!(params, vec![("p1".to_string(), SqlValue::I64(1))]);
    }

    #[test]
    fn connectors_join_members_in_order() {
        let g = CriteriaGroup::new(eq("a", 1)).and(eq("b", 2)).or(eq("c", 3));
        let (sql, _) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 and b = :p2 or c = :p3");
    }

    #[test]
    fn fully_absent_group_is_elided() {
        let g = CriteriaGroup::new(absent("a")).and(absent("b")).or(absent("c"));
        assert!(g.is_absent());
        assert!(render(&g).is_none());
    }

    #[test]
    fn absent_members_are_skipped() {
        let g = CriteriaGroup::new(eq("a", 1)).and(absent("b")).and(eq("c", 3));
        let (sql, params) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 and c = :p2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn promotion_drops_the_promoted_connector() {
        // [absent, (and, A), (or, B)] => "A or B"，提升成员的连接符被丢弃
        let g = CriteriaGroup::new(absent("x")).and(eq("a", 1)).or(eq("b", 2));
        let (sql, _) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 or b = :p2");
    }

    #[test]
    fn nested_group_is_parenthesized() {
        let inner = CriteriaGroup::new(eq("b", 2)).or(eq("c", 3));
        let g = CriteriaGroup::new(eq("a", 1)).and(inner);
        let (sql, _) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 and (b = :p2 or c = :p3)");
    }

    #[test]
    fn collapsed_nested_group_keeps_its_parentheses() {
        // 内层组坍缩到只剩一个成员时仍然加括号 —— 固定行为
        let inner = CriteriaGroup::new(absent("b")).or(eq("c", 3));
        let g = CriteriaGroup::new(eq("a", 1)).and(inner);
        let (sql, _) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 and (c = :p2)");
    }

    #[test]
    fn absent_nested_group_is_elided_by_its_parent() {
        let inner = CriteriaGroup::new(absent("b")).or(absent("c"));
        let g = CriteriaGroup::new(eq("a", 1)).and(inner);
        let (sql, params) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn absent_initial_group_promotes_a_nested_group() {
        let inner = CriteriaGroup::new(eq("b", 2)).or(eq("c", 3));
        let g = CriteriaGroup::new(absent("a")).and(inner);
        let (sql, _) = render(&g).unwrap();
        assert_eq!(sql, "(b = :p1 or c = :p2)");
    }

    #[test]
    fn repeated_values_get_distinct_parameter_names() {
        let g = CriteriaGroup::new(eq("a", 7)).and(eq("a", 7)).and(eq("a", 7));
        let (sql, params) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 and a = :p2 and a = :p3");
        assert_eq!(params.len(), 3);
        // 三个名字互不相同
        assert_ne!(params[0].0, params[1].0);
        assert_ne!(params[1].0, params[2].0);
        assert_ne!(params[0].0, params[2].0);
    }

    #[test]
    fn raw_predicate_renders_verbatim() {
        let g = CriteriaGroup::new(eq("a", 1))
            .and(Criterion::predicate(RawPredicate::new("exists (select 1)")));
        let (sql, params) = render(&g).unwrap();
        assert_eq!(sql, "a = :p1 and exists (select 1)");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn not_predicate_wraps_inner() {
        let g = CriteriaGroup::new(Criterion::predicate(NotPredicate::new(RawPredicate::new(
            "exists (select 1)",
        ))));
        let (sql, _) = render(&g).unwrap();
        assert_eq!(sql, "not (exists (select 1))");
    }

    #[test]
    fn group_is_cloneable_and_clone_renders_identically() {
        let g = CriteriaGroup::new(eq("a", 1))
            .and(Criterion::predicate(RawPredicate::new("b is not null")));
        let cloned = g.clone();
        assert_eq!(render(&g), render(&cloned));
    }
}
