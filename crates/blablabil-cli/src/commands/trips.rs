use anyhow::Result;
use blablabil_api::trips::TripSearchQuery;
use blablabil_application::bootstrap;

pub async fn search(
    from: String,
    to: String,
    date: String,
    passengers: u32,
    max_price: Option<f64>,
) -> Result<()> {
    let app = bootstrap().await?;

    let query = TripSearchQuery {
        from,
        to,
        date,
        passengers,
        price_max: max_price,
        ..Default::default()
    };

    let trips = app.trips.search(&query).await?;
    if trips.is_empty() {
        println!("No trips found.");
        return Ok(());
    }

    println!("Found {} trip(s):", trips.len());
    for trip in trips {
        println!(
            "  {}  {} -> {}  {} {}  {} kr/seat  {} seat(s) left",
            trip.id,
            trip.from_city,
            trip.to_city,
            trip.date,
            trip.departure_time,
            trip.price_per_seat,
            trip.available_seats
        );
        if let Some(vehicle) = trip.vehicle {
            println!("      {} {}", vehicle.make, vehicle.model);
        }
    }
    Ok(())
}
