mod common;

use common::{fixture_galaxy, fixture_ships, id};
use starroute_lib::error::Error;
use starroute_lib::{RoutePlan, ShipCatalog, WormholeStrategy};

#[test]
fn loads_fixture_catalog_and_lists_ships() {
    let catalog = fixture_ships();

    assert_eq!(catalog.ship_names(), vec!["Courier", "Explorer", "Shuttle"]);
    let courier = catalog.get("COURIER").expect("courier present");
    assert_eq!(courier.profile.jump_fuel, 200);
    assert_eq!(courier.profile.wormholes, WormholeStrategy::Some);
    assert!(catalog.source_path().is_some());
}

#[test]
fn rejects_duplicate_names_case_insensitive() {
    let csv = "name,hyperdrive_fuel,jump_fuel,jump_range\n".to_string()
        + "Courier,100,200,5\n"
        + "courier,100,0,0\n";

    let err = ShipCatalog::from_reader(csv.as_bytes()).expect_err("should reject duplicates");
    match err {
        Error::DuplicateShipName { name } => assert_eq!(name, "courier"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_missing_columns() {
    let csv = "name,hyperdrive_fuel\nCourier,100\n";
    let err = ShipCatalog::from_reader(csv.as_bytes()).expect_err("missing columns");
    match err {
        Error::ShipDataValidation { message } => {
            assert!(message.contains("jump_fuel"));
            assert!(message.contains("jump_range"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_invalid_numeric_values() {
    let csv = "name,hyperdrive_fuel,jump_fuel,jump_range\nCourier,-1,0,0\n";
    let err = ShipCatalog::from_reader(csv.as_bytes()).expect_err("negative fuel");
    match err {
        Error::ShipDataValidation { message } => assert!(message.contains("hyperdrive_fuel")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn catalog_ship_plans_from_its_location() {
    let galaxy = fixture_galaxy();
    let catalog = fixture_ships();
    let sol = id(&galaxy, "Sol");
    let sirius = id(&galaxy, "Sirius");

    let ship = catalog.get("Explorer").expect("explorer").clone().in_system(sol);
    let plan = RoutePlan::for_traveller(&galaxy, &ship, sirius).expect("plan runs");

    // Sirius sits within jump range of Sol.
    assert_eq!(plan.plan(), vec![sirius]);
    assert_eq!(plan.required_fuel(), Some(150));
}
