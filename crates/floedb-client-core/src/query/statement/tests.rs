use super::*;
use proptest::prelude::*;

fn base() -> StatementBuilder {
    StatementBuilder::new().namespace("test")
}

#[test]
fn scan_is_decided_by_the_filter_alone() {
    // Bins and aggregation settings never affect the discriminator.
    let scan = base()
        .bins(["a", "b"])
        .aggregate_function("agg", "sum", Vec::<Value>::new())
        .task_id(9_u64)
        .build();
    assert!(scan.is_scan());
    assert_eq!(scan.mode(), QueryMode::ScanAggregate);

    let query = base().filter(Filter::equal("color", "blue")).build();
    assert!(!query.is_scan());
    assert_eq!(query.mode(), QueryMode::Query);
}

#[test]
fn bins_preserve_order_and_duplicates() {
    let statement = base().bins(["a", "b", "a"]).build();

    assert_eq!(statement.bin_names(), ["a", "b", "a"]);
}

#[test]
fn empty_bins_select_all() {
    let statement = base().build();
    assert!(statement.bin_names().is_empty());

    // Replacing a projection with an empty one goes back to all bins.
    let statement = base().bins(["a"]).bins(Vec::<String>::new()).build();
    assert!(statement.bin_names().is_empty());
}

#[test]
fn setters_overwrite_last_write_wins() {
    let statement = base()
        .namespace("other")
        .set_name("s1")
        .set_name("s2")
        .filter(Filter::equal("a", 1_i64))
        .filter(Filter::equal("b", 2_i64))
        .build();

    assert_eq!(statement.namespace(), "other");
    assert_eq!(statement.set_name(), Some("s2"));
    assert_eq!(statement.filter(), Some(&Filter::equal("b", 2_i64)));
}

#[test]
fn aggregation_modes_replace_each_other() {
    let loader: Arc<dyn ResourceLoader> = Arc::new(crate::query::udf::DirResourceLoader::new("/"));

    let statement = base()
        .aggregate_function_from_resource(
            loader,
            "udf/sum.lua",
            "old",
            "old_fn",
            Vec::<Value>::new(),
        )
        .aggregate_function("agg", "sum", Vec::<Value>::new())
        .build();

    // Switching modes replaces the whole variant; no resource leftovers.
    assert_eq!(statement.package_name(), Some("agg"));
    assert_eq!(statement.function_name(), Some("sum"));
    assert_eq!(statement.resource_path(), None);
    assert!(statement.resource_loader().is_none());
}

#[test]
fn prepare_always_sets_return_data() {
    let statement = base().build();
    assert!(!statement.return_data());

    let statement = statement.prepare(true);
    assert!(statement.return_data());

    let statement = statement.prepare(false);
    assert!(!statement.return_data());
}

#[test]
fn prepare_assigns_a_task_id_once() {
    let statement = base().build();
    assert!(statement.task_id().is_unassigned());

    let statement = statement.prepare(true);
    let assigned = statement.task_id();
    assert!(!assigned.is_unassigned());

    // A second prepare leaves the id untouched even when return_data flips.
    let statement = statement.prepare(false);
    assert_eq!(statement.task_id(), assigned);
}

#[test]
fn explicit_task_id_survives_prepare() {
    let statement = base().task_id(42_u64).build().prepare(true);

    assert_eq!(statement.task_id(), TaskId::from_raw(42));
}

#[test]
fn aggregate_function_populates_pre_deployed_fields() {
    let v1 = Value::Int(1);
    let v2 = Value::Text("x".to_string());
    let statement = base()
        .aggregate_function("pkg", "fn", [v1.clone(), v2.clone()])
        .build();

    assert_eq!(statement.package_name(), Some("pkg"));
    assert_eq!(statement.function_name(), Some("fn"));
    assert_eq!(statement.function_args(), [v1, v2]);
    assert_eq!(statement.resource_path(), None);
}

#[test]
fn aggregate_function_from_resource_populates_all_fields() {
    let loader: Arc<dyn ResourceLoader> = Arc::new(crate::query::udf::DirResourceLoader::new("/"));
    let statement = base()
        .aggregate_function_from_resource(loader, "udf/sum.lua", "agg", "sum", [7_i64])
        .build();

    assert_eq!(statement.resource_path(), Some("udf/sum.lua"));
    assert!(statement.resource_loader().is_some());
    assert_eq!(statement.package_name(), Some("agg"));
    assert_eq!(statement.function_name(), Some("sum"));
    assert_eq!(statement.function_args(), [Value::Int(7)]);
}

#[test]
fn no_aggregation_means_empty_flattened_views() {
    let statement = base().build();

    assert_eq!(statement.package_name(), None);
    assert_eq!(statement.function_name(), None);
    assert!(statement.function_args().is_empty());
    assert_eq!(statement.resource_path(), None);
    assert!(statement.resource_loader().is_none());
}

#[test]
fn plain_full_namespace_scan_scenario() {
    let statement = base().build().prepare(true);

    assert!(statement.is_scan());
    assert!(statement.return_data());
    assert!(!statement.task_id().is_unassigned());
    assert_eq!(statement.mode(), QueryMode::Scan);
}

#[test]
fn filtered_aggregation_scenario() {
    let statement = base()
        .filter(Filter::equal("status", "open"))
        .aggregate_function("agg", "sum", Vec::<Value>::new())
        .build()
        .prepare(false);

    assert!(!statement.is_scan());
    assert_eq!(statement.mode(), QueryMode::QueryAggregate);
    assert_eq!(statement.package_name(), Some("agg"));
    assert_eq!(statement.function_name(), Some("sum"));
    assert!(statement.function_args().is_empty());
    assert!(!statement.return_data());
}

#[test]
fn index_name_is_carried_verbatim() {
    let statement = base()
        .index_name("idx_color")
        .filter(Filter::equal("color", "blue"))
        .build();

    assert_eq!(statement.index_name(), Some("idx_color"));
    // Without an explicit index the execution layer falls back to the bin.
    assert_eq!(statement.filter().unwrap().bin_name(), "color");
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z0-9]{0,8}".prop_map(Value::Text),
    ]
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    ("[a-z]{1,8}", arb_value()).prop_map(|(bin, value)| Filter::equal(bin, value))
}

proptest! {
    #[test]
    fn scan_predicate_matches_filter_absence(
        bins in prop::collection::vec("[a-z]{1,8}", 0..4),
        filter in prop::option::of(arb_filter()),
        has_aggregation in any::<bool>(),
        task in any::<u64>(),
    ) {
        let mut builder = base().bins(bins).task_id(task);
        if let Some(filter) = filter.clone() {
            builder = builder.filter(filter);
        }
        if has_aggregation {
            builder = builder.aggregate_function("agg", "sum", Vec::<Value>::new());
        }
        let statement = builder.build();

        prop_assert_eq!(statement.is_scan(), filter.is_none());
        prop_assert_eq!(statement.mode().is_scan(), filter.is_none());
        prop_assert_eq!(statement.mode().is_aggregate(), has_aggregation);
    }

    #[test]
    fn prepare_fixes_return_data_for_any_prior_state(
        prior in any::<bool>(),
        return_data in any::<bool>(),
    ) {
        let statement = base().build().prepare(prior).prepare(return_data);

        prop_assert_eq!(statement.return_data(), return_data);
    }

    #[test]
    fn prepared_task_ids_are_never_the_sentinel(task in any::<u64>()) {
        let statement = base().task_id(task).build().prepare(true);

        prop_assert!(!statement.task_id().is_unassigned());
        if task != 0 {
            prop_assert_eq!(statement.task_id().get(), task);
        }
    }
}
