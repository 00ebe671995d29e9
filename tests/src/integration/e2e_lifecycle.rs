//! # End-to-End Product Lifecycle
//!
//! Drives a hosted node the way an operator would: participants onboarded
//! by the admin, a unit moved farm to shelf, a recall raised downstream,
//! and the store reopened after a restart.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ft_node::{NodeConfig, NodeRuntime};
    use ft_registry::{ErrorKind, ReregistrationPolicy, SupplyChainApi};
    use ft_telemetry::{encode_metrics, register_metrics, PRODUCT_TRANSFERS};
    use shared_bus::{EventFilter, EventTopic, SupplyChainEvent};
    use shared_types::Role;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use tokio::time::timeout;

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    // =========================================================================
    // FARM TO SHELF
    // =========================================================================

    #[tokio::test]
    async fn test_farm_to_shelf_journey() {
        register_metrics().unwrap();
        let transfers_before = PRODUCT_TRANSFERS.get();
        let mut runtime = NodeRuntime::new(NodeConfig::new(ADMIN)).unwrap();
        runtime.start();
        let registry = runtime.registry();
        register_cast(registry.as_ref());

        let t = now();
        let id = registry
            .register_product(FARMER, "Heirloom Tomatoes", "Green Acres Field 3", t + WEEK, t)
            .unwrap();
        registry
            .transfer_product(FARMER, id, PROCESSOR, "Packhouse Line 1", t)
            .unwrap();
        registry
            .transfer_product(PROCESSOR, id, DISTRIBUTOR, "Cold Store 4", t)
            .unwrap();
        registry
            .transfer_product(DISTRIBUTOR, id, RETAILER, "Aisle 7", t)
            .unwrap();

        assert_eq!(
            registry.get_product_history(id).unwrap(),
            vec![
                "Registered at Green Acres Field 3 by Green Acres",
                "Transferred to Packhouse at Packhouse Line 1",
                "Transferred to FreshFleet at Cold Store 4",
                "Transferred to Corner Grocer at Aisle 7",
            ]
        );
        assert_eq!(
            registry.get_ownership_history(id).unwrap(),
            vec![FARMER, PROCESSOR, DISTRIBUTOR, RETAILER]
        );

        let product = registry.get_product(id).unwrap();
        assert_eq!(product.current_owner, RETAILER);
        assert_eq!(product.current_location, "Aisle 7");
        assert!(registry.is_product_safe(id, t).unwrap());

        // 4 participants + registration + 3 transfers
        assert_eq!(runtime.shutdown().await, 8);

        // Other tests share the process-wide collectors, so compare deltas
        assert!(PRODUCT_TRANSFERS.get() >= transfers_before + 3.0);
        let exposition = encode_metrics().unwrap();
        assert!(exposition.contains("ft_registry_transfers_total"));
        assert!(exposition.contains("ft_eventbus_messages_relayed_total"));
        assert!(exposition.contains("kind=\"product_transferred\""));
    }

    // =========================================================================
    // RECALL
    // =========================================================================

    #[tokio::test]
    async fn test_downstream_recall_freezes_unit() {
        let mut runtime = NodeRuntime::new(NodeConfig::new(ADMIN)).unwrap();
        runtime.start();
        let registry = runtime.registry();
        let mut recalls = runtime
            .bus()
            .subscribe(EventFilter::topics(vec![EventTopic::Contamination]));
        register_cast(registry.as_ref());

        let t = now();
        let id = registry
            .register_product(FARMER, "Spinach", "Field 9", t + WEEK, t)
            .unwrap();
        registry
            .transfer_product(FARMER, id, RETAILER, "Aisle 2", t)
            .unwrap();

        // Any verified participant may report, not only the owner
        registry.report_contamination(PROCESSOR, id).unwrap();

        let event = timeout(Duration::from_millis(200), recalls.recv())
            .await
            .expect("recall not published")
            .expect("bus closed");
        assert_eq!(
            event,
            SupplyChainEvent::ContaminationReported {
                product_id: id,
                reporter: PROCESSOR,
            }
        );

        assert!(!registry.is_product_safe(id, t).unwrap());
        let err = registry
            .transfer_product(RETAILER, id, DISTRIBUTOR, "Returns dock", t)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(
            registry.report_contamination(RETAILER, id).unwrap_err().kind(),
            ErrorKind::AlreadyFlagged
        );
        assert_eq!(
            registry.get_product_history(id).unwrap().last().unwrap(),
            "Contamination reported by Packhouse"
        );
        assert_eq!(registry.metrics().rejected(ErrorKind::AlreadyFlagged), 1);

        runtime.shutdown().await;
    }

    // =========================================================================
    // RESTART
    // =========================================================================

    #[tokio::test]
    async fn test_restart_keeps_trail_and_counter() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NodeConfig::new(ADMIN);
        config.storage.data_path = Some(dir.path().join("ledger").join("foodtrace.db"));
        let t = now();

        let first = {
            let runtime = NodeRuntime::new(config.clone()).unwrap();
            let registry = runtime.registry();
            register_cast(registry.as_ref());
            let id = registry
                .register_product(FARMER, "Oats", "North Field", t + WEEK, t)
                .unwrap();
            registry
                .transfer_product(FARMER, id, DISTRIBUTOR, "Silo 2", t)
                .unwrap();
            runtime.shutdown().await;
            id
        };

        let runtime = NodeRuntime::new(config).unwrap();
        let registry = runtime.registry();
        assert_eq!(
            registry.get_ownership_history(first).unwrap(),
            vec![FARMER, DISTRIBUTOR]
        );
        let second = registry
            .register_product(FARMER, "Barley", "South Field", t + WEEK, t)
            .unwrap();
        assert_eq!(second, first + 1);
        runtime.shutdown().await;
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    #[tokio::test]
    async fn test_reject_policy_from_environment() {
        let admin_hex = ADMIN.to_string();
        let config = NodeConfig::from_lookup(|name| match name {
            "FT_ADMIN_IDENTITY" => Some(admin_hex.clone()),
            "FT_REREGISTRATION" => Some("reject".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.registry.reregistration, ReregistrationPolicy::Reject);

        let runtime = NodeRuntime::new(config).unwrap();
        let registry = runtime.registry();
        registry
            .register_participant(ADMIN, FARMER, "Green Acres", Role::Farmer)
            .unwrap();
        let err = registry
            .register_participant(ADMIN, FARMER, "Green Acres Co-op", Role::Processor)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(registry.get_participant(FARMER).unwrap().unwrap().role, Role::Farmer);
        runtime.shutdown().await;
    }
}
