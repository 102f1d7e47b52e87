use anyhow::{Context, Result};
use blablabil_api::bookings::{NewBooking, PaymentMethod};
use blablabil_application::bootstrap;

pub async fn book(trip_id: &str, seats: u32, payment: &str) -> Result<()> {
    let payment_method = match payment {
        "vipps" => PaymentMethod::Vipps,
        "cash" => PaymentMethod::Cash,
        other => anyhow::bail!("Unknown payment method '{other}', expected vipps or cash"),
    };

    let app = bootstrap().await?;

    let snapshot = app.session.snapshot().await;
    let Some(user) = snapshot.user else {
        anyhow::bail!("Not signed in. Run `blablabil login` first.");
    };

    let trip = app
        .trips
        .get(trip_id)
        .await
        .context("Failed to load the trip")?;
    if trip.available_seats < seats {
        anyhow::bail!("Only {} seat(s) left on this trip", trip.available_seats);
    }

    let booking = NewBooking {
        trip_id: trip.id.clone(),
        passenger_id: user.id,
        seats,
        payment_method,
        notes: None,
        contact_phone: Some(user.phone),
        contact_email: Some(user.email),
        total_amount: trip.price_per_seat * f64::from(seats),
    };

    let created = app
        .bookings
        .create(&booking)
        .await
        .context("Booking failed")?;

    println!(
        "✅ Booked {} seat(s) on {} -> {} ({})",
        created.seats, trip.from_city, trip.to_city, trip.date
    );
    println!(
        "   Booking {}  total {} kr  status: {}",
        created.id,
        created.total_amount,
        created.status.as_str()
    );
    if created.payment_method == PaymentMethod::Vipps {
        println!("💡 Complete the Vipps payment to confirm your seats.");
    }
    Ok(())
}
