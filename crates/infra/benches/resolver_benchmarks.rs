use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::sync::Arc;

use stockbridge_catalog::{DefaultScopes, InMemoryProductCatalog};
use stockbridge_core::{Sku, SourceCode, StockId};
use stockbridge_infra::{InMemoryInventoryStore, InventoryStore, SettingResolver, WriteOp};
use stockbridge_inventory::{Backorders, GlobalConfiguration, SourceItemConfiguration};

fn sku(value: &str) -> Sku {
    Sku::new(value).unwrap()
}

fn source(value: &str) -> SourceCode {
    SourceCode::new(value).unwrap()
}

fn setup(
    with_item_override: bool,
) -> SettingResolver<Arc<InMemoryInventoryStore>, Arc<InMemoryProductCatalog>> {
    let store = Arc::new(InMemoryInventoryStore::with_sources([
        source("default"),
        source("east"),
    ]));

    let mut batch = vec![WriteOp::SetGlobalConfig(GlobalConfiguration {
        backorders: Backorders::Disabled,
        notify_stock_qty: 1.0,
    })];
    if with_item_override {
        batch.push(WriteOp::UpsertSourceItemConfig {
            sku: sku("SKU-1"),
            source_code: source("east"),
            configuration: SourceItemConfiguration {
                backorders: Some(Backorders::AllowBelowZero),
                notify_stock_qty: Some(4.0),
            },
        });
    }
    store.apply(batch).unwrap();

    SettingResolver::new(
        store,
        Arc::new(InMemoryProductCatalog::new()),
        DefaultScopes::new(source("default"), StockId(1)),
    )
}

fn bench_setting_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("setting_resolution");

    // Best case: the narrowest scope answers immediately.
    group.bench_function("source_item_hit", |b| {
        let resolver = setup(true);
        b.iter(|| {
            resolver
                .backorders(black_box(&sku("SKU-1")), black_box(&source("east")))
                .unwrap()
        })
    });

    // Worst case: both narrower scopes miss and the walk reaches global.
    group.bench_function("global_fallback", |b| {
        let resolver = setup(false);
        b.iter(|| {
            resolver
                .backorders(black_box(&sku("SKU-1")), black_box(&source("east")))
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_setting_resolution);
criterion_main!(benches);
