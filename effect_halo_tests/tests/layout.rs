// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::f64::consts::PI;

use effect_halo::kurbo::Point;
use effect_halo::{
    Footprint, GridMetrics, HaloAdapter, HaloConfig, OffsetCache, SizeCategory, TokenId,
    offset_for, position_for,
};

use crate::util::{ImageLibrary, TestHost, TestScene, assert_close, min_distance, pump_loads};

/// A representative token footprint for each category.
fn footprint_for(category: SizeCategory) -> Footprint {
    let side = match category {
        SizeCategory::Tiny => 0.5,
        SizeCategory::Small => 1.0,
        SizeCategory::Medium => 2.0,
        SizeCategory::Large => 3.0,
        SizeCategory::Huge => 4.0,
        SizeCategory::Gigantic => 6.0,
    };
    Footprint::new(side, side)
}

fn active_adapter(host: &TestHost) -> HaloAdapter {
    let mut adapter = HaloAdapter::default();
    adapter.install(host.hooks()).expect("both hooks provided");
    adapter
}

#[test]
fn layout_offsets_are_deterministic() {
    let mut cache = OffsetCache::new();
    for category in SizeCategory::ALL {
        for index in [0, 1, 7, 31, 100] {
            assert_eq!(
                cache.offset(index, category),
                offset_for(index, category),
                "cached offset {index} for {category:?}"
            );
            assert_eq!(cache.offset(index, category), offset_for(index, category));
        }
    }
}

#[test]
fn layout_second_ring_is_rotated() {
    let first = offset_for(0, SizeCategory::Medium);
    let second = offset_for(16, SizeCategory::Medium);
    let third = offset_for(32, SizeCategory::Medium);

    assert_close(second.radial - first.radial, 0.3, "ring spacing");
    assert_close(second.angle - first.angle, PI / 16.0, "seam rotation");
    assert_close(third.angle, first.angle, "even rings line up");
}

#[test]
fn layout_category_boundaries() {
    let cases = [
        (0.5, SizeCategory::Tiny),
        (0.75, SizeCategory::Tiny),
        (0.76, SizeCategory::Small),
        (1.25, SizeCategory::Small),
        (1.26, SizeCategory::Medium),
        (2.25, SizeCategory::Medium),
        (2.26, SizeCategory::Large),
        (3.5, SizeCategory::Large),
        (3.51, SizeCategory::Huge),
        (4.5, SizeCategory::Huge),
        (4.51, SizeCategory::Gigantic),
        (10.0, SizeCategory::Gigantic),
    ];
    for (side, expected) in cases {
        assert_eq!(
            SizeCategory::classify(side, side),
            expected,
            "category of a {side}x{side} token"
        );
    }
    assert_eq!(
        SizeCategory::classify(1.0, 3.0),
        SizeCategory::Large,
        "the larger side decides"
    );
    assert_eq!(SizeCategory::classify(4.51, 1.0), SizeCategory::Gigantic);
}

#[test]
fn layout_first_ring_does_not_overlap() {
    let config = HaloConfig::default();
    let grid = GridMetrics::default();
    for category in SizeCategory::ALL {
        let footprint = footprint_for(category);
        let icon = config.icon_pixel_size(category, grid);
        let offset_scale = config.offset_scale(category);
        let ring: Vec<Point> = (0..category.row_capacity())
            .map(|index| position_for(index, category, footprint, grid, offset_scale))
            .collect();
        let closest = min_distance(&ring);
        assert!(
            closest >= icon,
            "{category:?}: badges {closest}px apart but {icon}px wide"
        );
    }
}

#[test]
fn layout_ring_is_centered_on_token() {
    let config = HaloConfig::default();
    for grid in [GridMetrics::square(100.0), GridMetrics::new(120.0, 100.0)] {
        let footprint = Footprint::new(1.0, 1.0);
        let category = footprint.category();
        let offset_scale = config.offset_scale(category);
        let capacity = category.row_capacity();
        let ring: Vec<Point> = (0..capacity)
            .map(|index| position_for(index, category, footprint, grid, offset_scale))
            .collect();
        let sum = ring.iter().fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        let center = Point::new(sum.0 / f64::from(capacity), sum.1 / f64::from(capacity));
        let expected = Point::new(grid.cell_width / 2.0, grid.cell_height / 2.0);
        assert!(
            center.distance(expected) < 1e-9,
            "ring center {center:?} is off the cell center {expected:?}"
        );
    }
}

#[test]
fn layout_failure_is_isolated_per_token() {
    let host = TestHost::new();
    let mut adapter = active_adapter(&host);
    let mut scene = TestScene::new();
    let mut library = ImageLibrary::with(&["blind", "prone"]);
    for source in ["blind", "prone"] {
        adapter
            .controller_mut()
            .atlas_mut()
            .get_or_create(source, |id| library.load(id));
    }
    let ids = [
        scene.add_token(1, Footprint::new(1.0, 1.0), &["blind", "prone"]),
        scene.add_token(2, Footprint::new(0.0, 0.0), &["blind"]),
        scene.add_token(3, Footprint::new(2.0, 2.0), &["prone"]),
    ];

    let report = adapter.on_scene_ready(&mut scene);

    assert_eq!(report.processed, [ids[0], ids[2]]);
    let failed: Vec<TokenId> = report.failed.iter().map(|(id, _)| *id).collect();
    assert_eq!(failed, [ids[1]], "only the empty token fails");
    assert_eq!(scene.token(ids[0]).halo_count(), 2);
    assert_eq!(scene.token(ids[2]).halo_count(), 1);
    assert_eq!(scene.token(ids[1]).halo_count(), 0, "failed token stays native");
    assert!(scene.token(ids[1]).background().visible, "failed token keeps its background");
}

#[test]
fn layout_follows_icon_size_setting() {
    let host = TestHost::new();
    let mut adapter = active_adapter(&host);
    let mut scene = TestScene::new();
    let mut library = ImageLibrary::with(&["bless"]);
    let id = scene.add_token(1, Footprint::new(1.0, 1.0), &["bless"]);
    adapter.on_scene_ready(&mut scene);
    pump_loads(&mut adapter, &mut scene, &mut library);

    let before = scene.token(id).badges().next().map(|b| b.size.width);
    assert_eq!(before, Some(18.0 * 0.85));

    let report = adapter
        .set_icon_base_size(&mut scene, 24.0)
        .expect("positive size");
    assert!(report.is_success(), "relayout after the size change");
    let after = scene.token(id).badges().next().map(|b| b.size.width);
    assert_eq!(after, Some(24.0 * 0.85));

    assert!(
        adapter.set_icon_base_size(&mut scene, -1.0).is_err(),
        "negative sizes are rejected"
    );
    assert_eq!(adapter.config().icon_base_size(), 24.0);
}

#[test]
fn layout_scales_with_grid() {
    let host = TestHost::new();
    let mut adapter = active_adapter(&host);
    let mut scene = TestScene::new();
    scene.grid = GridMetrics::square(50.0);
    let mut library = ImageLibrary::with(&["haste"]);
    let id = scene.add_token(1, Footprint::new(1.0, 1.0), &["haste"]);
    adapter.on_scene_ready(&mut scene);
    pump_loads(&mut adapter, &mut scene, &mut library);

    let badge = scene.token(id).badges().next().expect("token has a badge");
    assert_close(badge.size.width, 18.0 * 0.85 * 0.5, "icon size on a 50px grid");
    assert!(
        badge.position.x <= 50.0 + 18.0 && badge.position.y <= 50.0 + 18.0,
        "badge stays near a 50px token: {:?}",
        badge.position
    );
}
