//! Prismetrics CLI
//!
//! Prices a sample contract, then pulls a live surface for a ticker.
//!
//! Usage: prismetrics [TICKER] [RATE]

use prismetrics::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let ticker = args.next().unwrap_or_else(|| "AAPL".to_string());
    let config = PrismConfig::default();
    let rate = args
        .next()
        .and_then(|r| r.parse::<f64>().ok())
        .unwrap_or(config.risk_free_rate);

    println!("Prismetrics Option Analysis");
    println!("===========================\n");

    // Example: Black-Scholes pricing
    let spot = 100.0;
    let strike = 105.0;
    let time = 30.0 / 365.0;
    let vol = 0.20;

    println!("Black-Scholes Pricing Example:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Time: {:.0} days", time * 365.0);
    println!("  Rate: {:.2}%", rate * 100.0);
    println!("  Vol: {:.1}%\n", vol * 100.0);

    for option_type in [OptionType::Call, OptionType::Put] {
        match (
            bs_price(spot, strike, time, rate, vol, option_type),
            bs_greeks(spot, strike, time, rate, vol, option_type),
        ) {
            (Ok(price), Ok(greeks)) => {
                println!("{} price: ${:.4}", option_type, price);
                for (greek, value) in greeks.iter() {
                    println!("  {:<6} {:>8.4}  ({})", greek.label(), value, greek.unit());
                }
            }
            (Err(e), _) | (_, Err(e)) => println!("{} pricing failed: {}", option_type, e),
        }
    }

    // Live data
    println!("\n--- Live Data: {} ---", ticker);

    let provider = match YahooClient::new()
        .and_then(|client| CachedProvider::new(client, config.cache.clone()))
    {
        Ok(p) => p,
        Err(e) => {
            println!("Could not set up data provider: {}", e);
            return;
        }
    };
    let engine = VolEngine::new(provider, config);

    match engine.spot(&ticker) {
        Ok(spot) => println!("Spot: ${:.2}", spot),
        Err(e) => {
            println!("Could not fetch {}: {}", ticker, e);
            println!("(This is expected if you're offline or Yahoo API is unavailable)");
            return;
        }
    }

    match engine.historical_volatility(&ticker) {
        Ok(Some(hv)) => println!("Historical vol (6mo): {:.2}%", hv * 100.0),
        Ok(None) => println!("Historical vol: not enough history"),
        Err(e) => println!("Historical vol failed: {}", e),
    }

    match engine.build_surface_at_rate(&ticker, rate) {
        Ok(Some(surface)) => {
            println!("\nImplied volatility surface ({} expiries):", surface.len());
            for slice in surface.slices() {
                let calls = slice.valid_points(OptionType::Call).len();
                let puts = slice.valid_points(OptionType::Put).len();
                println!(
                    "  {}  T={:.4}  strikes={:>3}  call IVs={:>3}  put IVs={:>3}",
                    slice.expiry,
                    slice.time_to_expiry,
                    slice.len(),
                    calls,
                    puts
                );
            }
            for (t, iv) in surface.atm_term_structure(OptionType::Call) {
                println!("  ATM call IV at T={:.4}: {:.2}%", t, iv * 100.0);
            }
        }
        Ok(None) => println!("Not enough option data to build a surface"),
        Err(e) => println!("Surface failed: {}", e),
    }

    println!("\n--- Done ---");
}
