//! # Integration Test Flows
//!
//! Tests that the registry and the shared bus work together: every committed
//! write reaches subscribers, in commit order, filtered by topic or product.
//!
//! ## Flows Tested
//!
//! 1. **Registry → Recall consumer**: contamination reports reach a
//!    subscriber listening only on the contamination topic
//! 2. **Registry → Product tracker**: a product filter sees only its product
//! 3. **Concurrent writers**: ids stay sequential and events stay ordered

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ft_registry::{BusEventSink, SupplyChainApi};
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, SupplyChainEvent};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn bus_registry() -> (
        Arc<InMemoryEventBus>,
        impl SupplyChainApi + Send + Sync + 'static,
    ) {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = registry_with_sink(BusEventSink::new(Arc::clone(&bus)));
        (bus, registry)
    }

    async fn next(sub: &mut shared_bus::Subscription) -> SupplyChainEvent {
        timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("timeout waiting for event")
            .expect("bus closed")
    }

    // =========================================================================
    // REGISTRY → RECALL CONSUMER
    // =========================================================================

    #[tokio::test]
    async fn test_recall_consumer_receives_only_contamination() {
        let (bus, registry) = bus_registry();
        let mut recall = bus.subscribe(EventFilter::topics(vec![EventTopic::Contamination]));

        register_cast(&registry);
        let id = registry
            .register_product(FARMER, "Romaine", "Salinas", T0 + WEEK, T0)
            .unwrap();
        registry
            .transfer_product(FARMER, id, DISTRIBUTOR, "Cold store 4", T0 + 60)
            .unwrap();
        registry.report_contamination(RETAILER, id).unwrap();

        assert_eq!(
            next(&mut recall).await,
            SupplyChainEvent::ContaminationReported {
                product_id: id,
                reporter: RETAILER,
            }
        );
        assert_eq!(recall.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_writes_publish_nothing() {
        let (bus, registry) = bus_registry();
        register_cast(&registry);
        let id = registry
            .register_product(FARMER, "Eggs", "Coop 2", T0 + WEEK, T0)
            .unwrap();
        let mut sub = bus.subscribe(EventFilter::all());

        assert!(registry
            .transfer_product(DISTRIBUTOR, id, RETAILER, "Shelf", T0)
            .is_err());
        assert!(registry
            .register_product(STRANGER, "Eggs", "Unknown", T0 + WEEK, T0)
            .is_err());
        registry.report_contamination(PROCESSOR, id).unwrap();
        assert!(registry.report_contamination(PROCESSOR, id).is_err());

        assert!(matches!(
            next(&mut sub).await,
            SupplyChainEvent::ContaminationReported { .. }
        ));
        assert_eq!(sub.try_recv().unwrap(), None);
    }

    // =========================================================================
    // REGISTRY → PRODUCT TRACKER
    // =========================================================================

    #[tokio::test]
    async fn test_product_filter_tracks_one_unit() {
        let (bus, registry) = bus_registry();
        register_cast(&registry);
        let tracked = registry
            .register_product(FARMER, "Pallet A", "Farm", T0 + WEEK, T0)
            .unwrap();
        let other = registry
            .register_product(FARMER, "Pallet B", "Farm", T0 + WEEK, T0)
            .unwrap();
        let mut tracker = bus.subscribe(EventFilter::for_products(vec![tracked]));

        registry
            .transfer_product(FARMER, other, PROCESSOR, "Packhouse", T0 + 1)
            .unwrap();
        registry
            .transfer_product(FARMER, tracked, PROCESSOR, "Packhouse", T0 + 2)
            .unwrap();
        registry
            .transfer_product(PROCESSOR, tracked, DISTRIBUTOR, "Depot", T0 + 3)
            .unwrap();

        let locations: Vec<String> = [next(&mut tracker).await, next(&mut tracker).await]
            .into_iter()
            .filter_map(|event| match event {
                SupplyChainEvent::ProductTransferred {
                    product_id,
                    new_location,
                    ..
                } if product_id == tracked => Some(new_location),
                _ => None,
            })
            .collect();
        assert_eq!(locations, vec!["Packhouse", "Depot"]);
        assert_eq!(tracker.try_recv().unwrap(), None);
    }

    // =========================================================================
    // CONCURRENT WRITERS
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_stay_sequential() {
        let (bus, registry) = bus_registry();
        register_cast(&registry);
        let registry = Arc::new(registry);
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Products]));

        let writers: Vec<_> = [FARMER, PROCESSOR, DISTRIBUTOR, RETAILER]
            .into_iter()
            .map(|owner| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    (0..25)
                        .map(|_| {
                            registry
                                .register_product(owner, "Box", "Site", T0 + WEEK, T0)
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for writer in writers {
            ids.extend(writer.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=100).collect::<Vec<_>>());
        assert_eq!(registry.product_count().unwrap(), 100);

        // Events come out in commit order, which is id order
        let mut seen = Vec::new();
        for _ in 0..100 {
            seen.push(next(&mut sub).await.product_id().unwrap());
        }
        assert_eq!(seen, (1..=100).collect::<Vec<_>>());
    }
}
