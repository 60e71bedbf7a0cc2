use cluster_policy::action::{AdjustmentType, ResizeParams};
use cluster_policy::cluster::ClusterRecord;
use cluster_policy::default_resize_resolvers::capacity_resolver::{calculate_desired, truncate_desired,
                                                                  CapacityResizeResolver};
use cluster_policy::resize_resolver::ResizeResolver;
use cluster_policy::{Action, ActionInputs, ActionKind, CheckStatus, EngineConfig};

fn resize_action(params: ResizeParams) -> Action {
    Action::new("resize-1", ActionKind::Resize, "cluster-1").with_inputs(ActionInputs {
        resize: params,
        ..Default::default()
    })
}

#[test]
fn test_calculate_desired() {
    assert_eq!(calculate_desired(5, AdjustmentType::ExactCapacity, 3.0, None), Some(3));
    assert_eq!(calculate_desired(5, AdjustmentType::ChangeInCapacity, -2.0, None), Some(3));
    assert_eq!(calculate_desired(10, AdjustmentType::ChangeInPercentage, 25.0, None), Some(12));
    assert_eq!(calculate_desired(10, AdjustmentType::ChangeInPercentage, -25.0, None), Some(8));
}

#[test]
fn test_percentage_below_one_node_moves_one_node() {
    assert_eq!(calculate_desired(4, AdjustmentType::ChangeInPercentage, 10.0, None), Some(5));
    assert_eq!(calculate_desired(4, AdjustmentType::ChangeInPercentage, -10.0, None), Some(3));
}

#[test]
fn test_percentage_honours_min_step() {
    assert_eq!(calculate_desired(10, AdjustmentType::ChangeInPercentage, 10.0, Some(3)), Some(13));
    assert_eq!(calculate_desired(10, AdjustmentType::ChangeInPercentage, -10.0, Some(3)), Some(7));
    assert_eq!(calculate_desired(10, AdjustmentType::ChangeInPercentage, 50.0, Some(3)), Some(15));
}

#[test]
fn test_calculate_desired_out_of_range() {
    assert_eq!(calculate_desired(5, AdjustmentType::ChangeInCapacity, 1e19, None), None);
    assert_eq!(calculate_desired(5, AdjustmentType::ChangeInPercentage, -1e300, Some(1)), None);
    assert_eq!(calculate_desired(5, AdjustmentType::ChangeInPercentage, 1e300, None), None);
    assert_eq!(calculate_desired(0, AdjustmentType::ChangeInPercentage, -1e300, Some(1)), Some(-1));
}

#[test]
fn test_truncate_desired() {
    let cluster = ClusterRecord::new("cluster-1", 5, 2, 8);
    assert_eq!(truncate_desired(&cluster, 1, None, None), 2);
    assert_eq!(truncate_desired(&cluster, 10, None, None), 8);
    assert_eq!(truncate_desired(&cluster, 10, None, Some(9)), 9);
    assert_eq!(truncate_desired(&cluster, 0, Some(1), None), 1);

    let unbounded = ClusterRecord::new("cluster-1", 5, 0, -1);
    assert_eq!(truncate_desired(&unbounded, 100, None, None), 100);
}

#[test]
fn test_check_size_params() {
    let resolver = CapacityResizeResolver::new(20);
    let cluster = ClusterRecord::new("cluster-1", 5, 2, 8);

    assert_eq!(resolver.check_size_params(&cluster, Some(5), None, None), None);
    assert_eq!(resolver.check_size_params(&cluster, Some(1), None, None).unwrap(),
               "The target capacity (1) is less than the cluster's min_size (2).");
    assert_eq!(resolver.check_size_params(&cluster, Some(3), Some(4), None).unwrap(),
               "The target capacity (3) is less than the specified min_size (4).");
    assert_eq!(resolver.check_size_params(&cluster, Some(7), None, Some(6)).unwrap(),
               "The target capacity (7) is greater than the specified max_size (6).");
    assert_eq!(resolver.check_size_params(&cluster, Some(5), Some(6), Some(4)).unwrap(),
               "The target capacity (5) is less than the specified min_size (6).");
    assert_eq!(resolver.check_size_params(&cluster, Some(7), Some(7), Some(6)).unwrap(),
               "The target capacity (7) is greater than the specified max_size (6).");
    assert_eq!(resolver.check_size_params(&cluster, Some(6), Some(6), None), None);
    assert_eq!(resolver.check_size_params(&cluster, Some(5), Some(9), Some(30)).unwrap(),
               "The target capacity (5) is less than the specified min_size (9).");
    assert_eq!(resolver.check_size_params(&cluster, Some(25), Some(0), Some(-1)).unwrap(),
               "The target capacity (25) is greater than the maximum number of nodes allowed per cluster (20).");
    assert_eq!(resolver.check_size_params(&cluster, Some(10), Some(0), Some(30)).unwrap(),
               "The specified max_size (30) is greater than the maximum number of nodes allowed per cluster (20).");

    assert_eq!(resolver.check_size_params(&cluster, None, None, Some(6)), None);
    assert_eq!(resolver.check_size_params(&cluster, None, None, Some(1)).unwrap(),
               "The specified max_size (1) is less than the current min_size (2) of the cluster.");
    assert_eq!(resolver.check_size_params(&cluster, None, Some(9), None).unwrap(),
               "The specified min_size (9) is greater than the current max_size (8) of the cluster.");
}

#[test]
fn test_resolver_records_deletion() {
    let resolver = CapacityResizeResolver::from_config(&EngineConfig::default());
    let cluster = ClusterRecord::new("cluster-1", 5, 0, -1);
    let mut action = resize_action(ResizeParams {
        adjustment_type: Some(AdjustmentType::ChangeInCapacity),
        number: Some(-2.0),
        ..Default::default()
    });

    let (status, reason) = resolver.parse_resize_params(&mut action, &cluster, 5);

    assert_eq!(status, CheckStatus::Ok);
    assert_eq!(reason, "Resize params are OK");
    assert_eq!(action.data.deletion().unwrap().count, 2);
    assert!(action.data.creation().is_none());
}

#[test]
fn test_resolver_without_adjustment_only_truncates() {
    let resolver = CapacityResizeResolver::new(100);
    let cluster = ClusterRecord::new("cluster-1", 5, 0, -1);
    let mut action = resize_action(ResizeParams {
        max_size: Some(3),
        ..Default::default()
    });

    let (status, _) = resolver.parse_resize_params(&mut action, &cluster, 5);

    assert_eq!(status, CheckStatus::Ok);
    assert_eq!(action.data.deletion().unwrap().count, 2);
}

#[test]
fn test_resolver_strict_rejects_out_of_range() {
    let resolver = CapacityResizeResolver::new(100);
    let cluster = ClusterRecord::new("cluster-1", 5, 2, 10);
    let mut action = resize_action(ResizeParams {
        adjustment_type: Some(AdjustmentType::ChangeInCapacity),
        number: Some(-4.0),
        strict: true,
        ..Default::default()
    });

    let (status, reason) = resolver.parse_resize_params(&mut action, &cluster, 5);

    assert_eq!(status, CheckStatus::Error);
    assert_eq!(reason, "The target capacity (1) is less than the cluster's min_size (2).");
    assert!(action.data.deletion().is_none());
    assert!(action.data.status.is_none());
}

#[test]
fn test_resolver_requires_number() {
    let resolver = CapacityResizeResolver::new(100);
    let cluster = ClusterRecord::new("cluster-1", 5, 0, -1);
    let mut action = resize_action(ResizeParams {
        adjustment_type: Some(AdjustmentType::ExactCapacity),
        ..Default::default()
    });

    let (status, _) = resolver.parse_resize_params(&mut action, &cluster, 5);

    assert_eq!(status, CheckStatus::Error);
}

#[test]
fn test_resolver_rejects_out_of_range_adjustment() {
    let resolver = CapacityResizeResolver::new(100);
    let cluster = ClusterRecord::new("cluster-1", 5, 0, -1);
    let oversized = [
        ResizeParams {
            adjustment_type: Some(AdjustmentType::ChangeInCapacity),
            number: Some(1e19),
            ..Default::default()
        },
        ResizeParams {
            adjustment_type: Some(AdjustmentType::ChangeInPercentage),
            number: Some(-1e300),
            min_step: Some(1),
            ..Default::default()
        },
        ResizeParams {
            adjustment_type: Some(AdjustmentType::ChangeInCapacity),
            number: Some(1e19),
            strict: true,
            ..Default::default()
        },
    ];

    for params in oversized {
        let mut action = resize_action(params);
        let (status, _) = resolver.parse_resize_params(&mut action, &cluster, 5);

        assert_eq!(status, CheckStatus::Error);
        assert!(action.data.deletion().is_none());
        assert!(action.data.creation().is_none());
    }
}

#[test]
fn test_resolver_rejects_non_finite_number() {
    let resolver = CapacityResizeResolver::new(100);
    let cluster = ClusterRecord::new("cluster-1", 5, 0, -1);
    let mut action = resize_action(ResizeParams {
        adjustment_type: Some(AdjustmentType::ChangeInCapacity),
        number: Some(f64::NAN),
        ..Default::default()
    });

    let (status, reason) = resolver.parse_resize_params(&mut action, &cluster, 5);

    assert_eq!(status, CheckStatus::Error);
    assert_eq!(reason, "The number (NaN) is not a finite value.");
}

#[test]
fn test_resolver_bounds_only_resize_below_min_size() {
    let resolver = CapacityResizeResolver::new(100);
    // Two of the cluster's nodes have failed, leaving it below min_size.
    let cluster = ClusterRecord::new("cluster-1", 4, 3, 10);
    let mut action = resize_action(ResizeParams {
        max_size: Some(8),
        strict: true,
        ..Default::default()
    });

    let (status, reason) = resolver.parse_resize_params(&mut action, &cluster, 2);

    assert_eq!(status, CheckStatus::Ok);
    assert_eq!(reason, "Resize params are OK");
    assert!(action.data.deletion().is_none());
    assert_eq!(action.data.creation().unwrap().count, 0);

    let mut action = resize_action(ResizeParams {
        max_size: Some(2),
        strict: true,
        ..Default::default()
    });
    let (status, reason) = resolver.parse_resize_params(&mut action, &cluster, 2);

    assert_eq!(status, CheckStatus::Error);
    assert_eq!(reason, "The specified max_size (2) is less than the current min_size (3) of the cluster.");
}
