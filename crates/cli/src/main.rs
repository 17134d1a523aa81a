//! Stayhub operator console
//!
//! Local tool for seeding demo data and working the hotel review queue.
//! It talks straight to the core storage, so it acts with admin rights.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stayhub_core::{
    Actor, AuthService, Database, Error, HotelFilter, HotelService, HotelStatus, NewHotel, NewRoom,
    Result, Role, RoomService,
};

mod config;

const USAGE: &str = "Usage: stayhub <command>

Commands:
  seed             Create demo users, hotels, and rooms
  hotels [city]    List approved hotels, optionally filtered by city
  pending          List hotels waiting for review
  approve <id>     Approve a pending hotel
  reject <id>      Reject a pending hotel back to draft";

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Stayhub console");

    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = config::Config::load()?;
    let db = Database::open(config.database_path()?)?;

    match command.as_str() {
        "seed" => seed(&db),
        "hotels" => list_hotels(&db, args.get(1).cloned()),
        "pending" => list_pending(&db),
        "approve" => review(&db, args.get(1), true),
        "reject" => review(&db, args.get(1), false),
        other => {
            eprintln!("unknown command: {other}\n\n{USAGE}");
            std::process::exit(2);
        }
    }
}

/// The console operates with full rights
fn console_actor() -> Actor {
    Actor::new(0, Role::Admin)
}

fn seed(db: &Database) -> Result<()> {
    let auth = AuthService::new(db);
    let hotels = HotelService::new(db);
    let rooms = RoomService::new(db);

    let owner = match db.users().find_by_username("demo_owner")? {
        Some(user) => user,
        None => {
            auth.register_with_role("demo_admin", "admin-pass-1", Role::Admin)?;
            auth.register("demo_owner", "owner-pass-1")?.0
        }
    };

    let hotel = hotels.create(
        &NewHotel {
            description: Some("Quiet seafront hotel near the old town".into()),
            star: Some("4".into()),
            tags: vec!["sea view".into(), "parking".into()],
            price: Some(420.0),
            promo: Some("late summer deal".into()),
            ..NewHotel::new("Harbor View", "Xiamen", "88 Harbor Street")
        },
        owner.id,
    )?;
    hotels.submit_for_review(hotel.id, owner.id)?;
    hotels.approve(hotel.id)?;

    rooms.create(hotel.id, &NewRoom::new("Twin Room", 299.0, 10), owner.actor())?;
    rooms.create(hotel.id, &NewRoom::new("King Room", 459.0, 5), owner.actor())?;

    let draft = hotels.create(
        &NewHotel::new("Mountain Lodge", "Wuyishan", "12 Tea Valley Road"),
        owner.id,
    )?;
    hotels.submit_for_review(draft.id, owner.id)?;

    println!(
        "seeded hotel {} (approved, 2 rooms) and hotel {} (pending review)",
        hotel.id, draft.id
    );
    Ok(())
}

fn list_hotels(db: &Database, city: Option<String>) -> Result<()> {
    let hotels = HotelService::new(db);
    let filter = HotelFilter {
        city,
        ..Default::default()
    };

    let page = hotels.list(&filter, None)?;
    if page.items.is_empty() {
        println!("no approved hotels");
        return Ok(());
    }

    for hotel in &page.items {
        let price = hotel
            .price
            .map(|p| format!("from {p:.0}"))
            .unwrap_or_else(|| "-".into());
        println!(
            "#{:<4} {:<24} {:<12} {:<10} {}",
            hotel.id, hotel.name, hotel.city, price, hotel.status
        );
    }
    println!("{} of {} hotels (page {})", page.items.len(), page.total, page.page);
    Ok(())
}

fn list_pending(db: &Database) -> Result<()> {
    let hotels = HotelService::new(db);
    let filter = HotelFilter {
        status: Some(HotelStatus::Pending),
        ..Default::default()
    };

    let page = hotels.list(&filter, Some(console_actor()))?;
    if page.items.is_empty() {
        println!("review queue is empty");
        return Ok(());
    }

    for hotel in &page.items {
        println!(
            "#{:<4} {:<24} {:<12} owner {}",
            hotel.id, hotel.name, hotel.city, hotel.owner_id
        );
    }
    Ok(())
}

fn review(db: &Database, id: Option<&String>, approve: bool) -> Result<()> {
    let id: i64 = id
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::Validation("expected a numeric hotel id".into()))?;

    let hotels = HotelService::new(db);
    let hotel = if approve {
        hotels.approve(id)?
    } else {
        hotels.reject(id)?
    };

    println!("hotel #{} \"{}\" is now {}", hotel.id, hotel.name, hotel.status);
    Ok(())
}
