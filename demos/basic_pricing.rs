//! Example: Basic options pricing with Black-Scholes
//!
//! Run with: cargo run --example basic_pricing

use prismetrics::prelude::*;

fn main() -> PrismResult<()> {
    // Option parameters
    let spot = 100.0;
    let strike = 105.0;
    let time = 30.0 / 365.0; // 30 days
    let rate = 0.05; // 5% risk-free rate
    let vol = 0.20; // 20% volatility

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     ${:.2}", spot);
    println!("Strike:   ${:.2}", strike);
    println!("Time:     {:.4} years ({:.0} days)", time, time * 365.0);
    println!("Rate:     {:.1}%", rate * 100.0);
    println!("Vol:      {:.1}%\n", vol * 100.0);

    let call_price = bs_price(spot, strike, time, rate, vol, OptionType::Call)?;
    println!("Call Price: ${:.4}", call_price);

    let put_price = bs_price(spot, strike, time, rate, vol, OptionType::Put)?;
    println!("Put Price:  ${:.4}", put_price);

    // Verify put-call parity: C - P = S - K*e^(-rT)
    let parity_lhs = call_price - put_price;
    let parity_rhs = spot - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.2e}", (parity_lhs - parity_rhs).abs());

    println!("\n=== Greeks (Call) ===\n");
    let greeks = bs_greeks(spot, strike, time, rate, vol, OptionType::Call)?;
    for (greek, value) in greeks.iter() {
        println!("{:<6} {:>8.4}   {}", greek.label(), value, greek.description());
    }

    println!("\n=== Implied Volatility ===\n");
    let market_price = call_price + 0.50; // Simulated market price
    match implied_volatility(spot, strike, time, rate, market_price, OptionType::Call)? {
        Some(iv) => println!("Market price ${:.4} implies vol: {:.2}%", market_price, iv * 100.0),
        None => println!("No volatility reproduces ${:.4}", market_price),
    }

    println!("\n=== Historical Volatility ===\n");
    let closes = [100.0, 101.0, 102.0, 103.0, 99.0, 98.0, 105.0];
    match historical_volatility(&closes) {
        Some(hv) => println!("Annualized: {:.2}%", hv * 100.0),
        None => println!("Not enough history"),
    }

    println!("\n=== Call Price Heatmap ===\n");
    let inputs = PricingInputs::new(spot, strike, time, rate, vol, OptionType::Call)?;
    let heatmap = price_heatmap(&inputs, &HeatmapConfig::default())?;
    print!("{:>6}", "days");
    for k in heatmap.strikes.iter() {
        print!("{:>8.0}", k);
    }
    println!();
    for (i, t) in heatmap.times.iter().enumerate() {
        print!("{:>6.0}", t * 365.0);
        for p in heatmap.prices.row(i).iter() {
            print!("{:>8.2}", p);
        }
        println!();
    }

    Ok(())
}
