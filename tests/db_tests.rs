//! Tests de integración contra un PostgreSQL real.
//!
//! Necesitan `DATABASE_URL` apuntando a una base de pruebas; están marcados
//! con `#[ignore]` y se corren con `cargo test -- --ignored`. Cada test usa
//! nombres únicos (VIN, username, manufacturer) para poder repetirse sobre
//! la misma base.

use uuid::Uuid;

use fleet_management::dto::car_dto::{CarsQuery, CreateCarRequest};
use fleet_management::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use fleet_management::models::{EngineType, OnlineStatus};
use fleet_management::services::{CarService, DriverService};

async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a test database");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

fn car_request(manufacturer: &str, rating: Option<f64>) -> CreateCarRequest {
    CreateCarRequest {
        vin: format!("VIN-{}", Uuid::new_v4()),
        model: "Model 3".to_string(),
        license_plate: format!("PL-{}", Uuid::new_v4()),
        seat_count: 4,
        engine_type: EngineType::Electric,
        convertible: Some(false),
        rating,
        manufacturer: manufacturer.to_string(),
    }
}

fn driver_request(prefix: &str) -> CreateDriverRequest {
    CreateDriverRequest {
        username: format!("{}-{}", prefix, Uuid::new_v4()),
        password: "password00012".to_string(),
    }
}

// Las cotas de rating incluyen sus extremos: [4.0, 6.0] devuelve 4.0 y 6.0.
#[tokio::test]
#[ignore]
async fn rating_bounds_are_inclusive() {
    let pool = test_pool().await;
    let cars = CarService::new(pool.clone());
    let manufacturer = format!("Estrella-{}", Uuid::new_v4());

    for rating in [3.9, 4.0, 5.0, 6.0, 6.1] {
        cars.add_car(car_request(&manufacturer, Some(rating)))
            .await
            .expect("add_car");
    }

    let found = cars
        .find_cars(&CarsQuery {
            rating_low_bound: Some(4.0),
            rating_high_bound: Some(6.0),
            manufacturer: Some(manufacturer),
            ..Default::default()
        })
        .await
        .expect("find_cars");

    let mut ratings: Vec<f64> = found.cars.iter().map(|c| c.rating).collect();
    ratings.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(ratings, vec![4.0, 5.0, 6.0]);
}

// Robo de car: el holder OFFLINE pierde el car y el solicitante ONLINE
// queda con él; ambos lados de la relación se verifican releyendo la base.
#[tokio::test]
#[ignore]
async fn offline_holder_loses_the_car_to_an_online_requester() {
    let pool = test_pool().await;
    let cars = CarService::new(pool.clone());
    let drivers = DriverService::new(pool.clone());

    let manufacturer = format!("Estrella-{}", Uuid::new_v4());
    let car = cars
        .add_car(car_request(&manufacturer, Some(8.0)))
        .await
        .expect("add_car");

    let holder = drivers.create_driver(driver_request("holder")).await.expect("holder");
    let requester = drivers
        .create_driver(driver_request("requester"))
        .await
        .expect("requester");

    let online = UpdateDriverRequest {
        online_status: OnlineStatus::Online,
    };
    let offline = UpdateDriverRequest {
        online_status: OnlineStatus::Offline,
    };

    drivers.merge_driver(holder.id, online).await.expect("holder online");
    drivers.assign_car(holder.id, car.id).await.expect("initial assignment");
    drivers.merge_driver(holder.id, offline).await.expect("holder offline");

    let online = UpdateDriverRequest {
        online_status: OnlineStatus::Online,
    };
    drivers.merge_driver(requester.id, online).await.expect("requester online");
    drivers.assign_car(requester.id, car.id).await.expect("steal");

    let holder = drivers.get_driver(holder.id).await.expect("holder view");
    assert!(holder.car.is_none());

    let requester = drivers.get_driver(requester.id).await.expect("requester view");
    assert_eq!(requester.car.expect("requester holds the car").id, car.id);
}

// Los filtros de substring son literales: un `%` en el parámetro no actúa
// como comodín de LIKE.
#[tokio::test]
#[ignore]
async fn substring_filters_treat_percent_literally() {
    let pool = test_pool().await;
    let cars = CarService::new(pool.clone());
    let manufacturer = format!("Estrella-{}", Uuid::new_v4());

    let mut wildcard = car_request(&manufacturer, Some(5.0));
    wildcard.model = format!("Promo 100% {}", Uuid::new_v4());
    cars.add_car(wildcard).await.expect("add_car");

    let mut plain = car_request(&manufacturer, Some(5.0));
    plain.model = format!("Promo 100X {}", Uuid::new_v4());
    cars.add_car(plain).await.expect("add_car");

    let found = cars
        .find_cars(&CarsQuery {
            model: Some("100%".to_string()),
            manufacturer: Some(manufacturer),
            ..Default::default()
        })
        .await
        .expect("find_cars");

    assert_eq!(found.cars.len(), 1);
    assert!(found.cars[0].model.contains("100%"));
}
