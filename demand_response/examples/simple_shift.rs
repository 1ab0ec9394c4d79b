use demand_response::{generate_day, DemandResponder, GeneratorConfig, ShiftPolicy};

fn main() -> demand_response::Result<()> {
    // Default day: seed 42, peak boost between 08:00 and 20:00
    let day = generate_day(&GeneratorConfig::default())?;
    let responder = DemandResponder::new(ShiftPolicy::default())?;

    let consumption = day.consumption();
    let outcome = responder.apply(&consumption, &day.prices())?;

    println!("Demand Response Shift");
    println!("=====================");
    println!("Date: {}", day.date);
    println!();
    println!("Hour  Price ($)  Consumption  Adjusted  Peak");
    for (point, (adjusted, peak)) in day
        .points
        .iter()
        .zip(outcome.adjusted.iter().zip(&outcome.peak_mask))
    {
        println!(
            "{:>4}  {:>9.2}  {:>11.2}  {:>8.2}  {}",
            point.hour,
            point.price,
            point.consumption,
            adjusted,
            if *peak { "yes" } else { "" }
        );
    }

    let summary = &outcome.summary;
    println!();
    println!("Peak hours: {} / Off-peak hours: {}", summary.peak_hours, summary.off_peak_hours);
    println!("Shift per off-peak hour: {:.2} kWh", summary.shift_amount);
    println!(
        "Peak load: {:.2} kWh -> {:.2} kWh",
        summary.original_peak_load, summary.adjusted_peak_load
    );
    println!(
        "Total energy: {:.2} kWh -> {:.2} kWh ({:+.2})",
        summary.original_total, summary.adjusted_total, summary.energy_delta
    );

    Ok(())
}
